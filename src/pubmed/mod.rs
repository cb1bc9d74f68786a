//! PubMed client for searching and fetching article metadata
//!
//! This module talks to the ESearch and EFetch E-utilities endpoints and turns
//! the EFetch XML into flat [`ArticleRecord`]s.

pub mod client;
pub mod models;
pub mod parser;
mod responses;
pub mod xml;

// Re-export public types
pub use client::PubMedClient;
pub use models::{ArticleRecord, Field};
pub use parser::{extract_records, parse_articles_from_xml};
pub use xml::{XmlElement, XmlNode, parse_document};
