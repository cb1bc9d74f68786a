//! # PubMed Fetcher
//!
//! Search PubMed through the NCBI E-utilities, fetch bibliographic metadata for
//! the matching articles and save it as a CSV table.
//!
//! ## Features
//!
//! - **Search**: one ESearch request returning up to `max_results` PMIDs
//! - **Fetch**: one batched EFetch request for all PMIDs
//! - **Flatten**: title, authors, date, journal details, abstract, keywords and
//!   DOI per article, with missing fields kept as `None`
//! - **Export**: CSV with a fixed preferred column order
//! - **Interactive shell**: prompt-driven pipeline behind the `pubmed-fetcher`
//!   binary
//!
//! ## Quick Start
//!
//! ```no_run
//! use pubmed_fetcher::{PubMedClient, export::write_csv};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubMedClient::new();
//!
//!     let pmids = client.search_articles("covid-19 treatment", 10).await?;
//!     let records = client.fetch_records(&pmids).await?;
//!
//!     for record in &records {
//!         println!("{}: {}", record.pubmed_url, record.title.as_deref().unwrap_or("N/A"));
//!     }
//!
//!     write_csv(&records, "covid.csv")?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod pubmed;
pub mod shell;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use error::{PubMedError, Result};
pub use pubmed::{ArticleRecord, Field, PubMedClient};
pub use shell::{RunOutcome, Shell, ShellOptions};
