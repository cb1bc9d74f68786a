use anyhow::Result;
use clap::Parser;
use pubmed_fetcher::{PubMedClient, Shell, ShellOptions};
use std::io;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "pubmed-fetcher",
    version,
    about = "Search PubMed and save article metadata as CSV",
    long_about = "Prompts for a PubMed query, a result limit and an output file, then writes the matching articles' metadata to a CSV table. Flags prefill the corresponding prompts."
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Search query (skips the query prompt)
    #[arg(short, long)]
    query: Option<String>,

    /// Maximum number of results (skips the limit prompt)
    #[arg(short = 'n', long)]
    max_results: Option<String>,

    /// Output CSV file (skips the filename prompt)
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let options = ShellOptions {
        query: cli.query,
        max_results: cli.max_results,
        output: cli.output,
    };

    let client = PubMedClient::new();
    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout()).with_options(options);

    let outcome = shell.run(&client).await?;
    tracing::debug!(?outcome, "Finished");

    Ok(())
}
