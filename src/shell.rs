//! Interactive front end
//!
//! [`Shell`] asks for a query, a result limit and an output file, runs
//! search, fetch, extraction and export in sequence and prints a summary.
//! Input and output are generic so the whole dialogue can be driven from
//! tests.

use crate::error::Result;
use crate::export::write_csv;
use crate::pubmed::{ArticleRecord, PubMedClient};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Result limit used when the answer is blank or invalid
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Output file used when the answer is blank
pub const DEFAULT_OUTPUT_FILE: &str = "output.csv";

const NOT_AVAILABLE: &str = "N/A";

/// Answers supplied up front (e.g. from command-line flags)
///
/// Every `Some` value skips the matching prompt but goes through the same
/// normalisation as a typed answer.
#[derive(Debug, Clone, Default)]
pub struct ShellOptions {
    pub query: Option<String>,
    pub max_results: Option<String>,
    pub output: Option<String>,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Records were written to `output`
    Completed { records: usize, output: PathBuf },
    /// The search produced no identifiers (or failed)
    NoResults,
    /// The details request produced no articles (or failed)
    NoDetails,
    /// Input ended before a query was entered
    Cancelled,
}

/// Prompt-driven pipeline runner
pub struct Shell<R, W> {
    input: R,
    output: W,
    options: ShellOptions,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            options: ShellOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ShellOptions) -> Self {
        self.options = options;
        self
    }

    /// Consume the shell and hand back its output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the whole dialogue and pipeline once
    ///
    /// Network and parse failures are reported on the output and end the run
    /// early with [`RunOutcome::NoResults`] or [`RunOutcome::NoDetails`].
    ///
    /// # Errors
    ///
    /// Only terminal I/O failures and failures writing the CSV file are
    /// returned as errors.
    pub async fn run(&mut self, client: &PubMedClient) -> Result<RunOutcome> {
        writeln!(self.output, "=== PubMed Paper Fetcher ===")?;

        let Some(query) = self.read_query()? else {
            writeln!(self.output, "\nNo query entered.")?;
            return Ok(RunOutcome::Cancelled);
        };
        let max_results = self.read_max_results()?;
        let output_path = self.read_output_path()?;

        writeln!(self.output, "\nSearching for: '{}'", query)?;
        writeln!(self.output, "Fetching paper IDs...")?;

        let pmids = match client.search_articles(&query, max_results).await {
            Ok(pmids) => pmids,
            Err(e) => {
                error!("Error fetching PubMed IDs: {}", e);
                writeln!(self.output, "Error fetching PubMed IDs: {}", e)?;
                Vec::new()
            }
        };

        if pmids.is_empty() {
            writeln!(self.output, "No papers found for your query.")?;
            return Ok(RunOutcome::NoResults);
        }

        writeln!(
            self.output,
            "Found {} papers. Fetching details...",
            pmids.len()
        )?;

        let records = match client.fetch_records(&pmids).await {
            Ok(records) => records,
            Err(e) => {
                error!("Error fetching paper details: {}", e);
                writeln!(self.output, "Error fetching paper details: {}", e)?;
                Vec::new()
            }
        };

        if records.is_empty() {
            writeln!(self.output, "Failed to fetch paper details.")?;
            return Ok(RunOutcome::NoDetails);
        }

        let written = write_csv(&records, &output_path)?;
        writeln!(
            self.output,
            "Saved {} papers to {}",
            written,
            output_path.display()
        )?;

        writeln!(self.output, "\n=== Summary ===")?;
        writeln!(self.output, "Query: {}", query)?;
        writeln!(self.output, "Papers found: {}", records.len())?;
        writeln!(self.output, "Output file: {}", output_path.display())?;

        writeln!(self.output, "\n=== First Paper Preview ===")?;
        write!(self.output, "{}", render_preview(&records[0]))?;
        self.output.flush()?;

        info!(
            records = records.len(),
            output = %output_path.display(),
            "Run completed"
        );

        Ok(RunOutcome::Completed {
            records: records.len(),
            output: output_path,
        })
    }

    /// Print `message`, then read one line; `None` at end of input
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_query(&mut self) -> Result<Option<String>> {
        if let Some(query) = self.options.query.take() {
            let query = query.trim().to_string();
            if !query.is_empty() {
                return Ok(Some(query));
            }
        }

        loop {
            match self.prompt("Enter PubMed search query: ")? {
                None => return Ok(None),
                Some(query) if query.is_empty() => {
                    writeln!(self.output, "A search query is required.")?;
                }
                Some(query) => return Ok(Some(query)),
            }
        }
    }

    fn read_max_results(&mut self) -> Result<usize> {
        let answer = match self.options.max_results.take() {
            Some(answer) => answer,
            None => self
                .prompt(&format!(
                    "Enter maximum number of results (default {}): ",
                    DEFAULT_MAX_RESULTS
                ))?
                .unwrap_or_default(),
        };

        match parse_max_results(&answer) {
            Some(max_results) => Ok(max_results),
            None => {
                warn!(input = %answer, "Invalid result count, using default");
                writeln!(
                    self.output,
                    "Invalid input. Using default of {} results.",
                    DEFAULT_MAX_RESULTS
                )?;
                Ok(DEFAULT_MAX_RESULTS)
            }
        }
    }

    fn read_output_path(&mut self) -> Result<PathBuf> {
        let answer = match self.options.output.take() {
            Some(answer) => answer,
            None => self
                .prompt(&format!(
                    "Enter output filename (default '{}'): ",
                    DEFAULT_OUTPUT_FILE
                ))?
                .unwrap_or_default(),
        };
        Ok(normalize_filename(&answer))
    }
}

/// Interpret the result-count answer
///
/// A blank answer selects [`DEFAULT_MAX_RESULTS`]; anything that is not a
/// positive integer gives `None`.
pub fn parse_max_results(input: &str) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return Some(DEFAULT_MAX_RESULTS);
    }
    input.parse::<usize>().ok().filter(|&n| n > 0)
}

/// Output path for a filename answer, with the `.csv` suffix enforced
pub fn normalize_filename(input: &str) -> PathBuf {
    let input = input.trim();
    if input.is_empty() {
        return PathBuf::from(DEFAULT_OUTPUT_FILE);
    }
    if input.ends_with(".csv") {
        PathBuf::from(input)
    } else {
        PathBuf::from(format!("{}.csv", input))
    }
}

/// Preview block for one record, `N/A` for anything missing
pub fn render_preview(record: &ArticleRecord) -> String {
    fn or_na(value: Option<&str>) -> &str {
        value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE)
    }

    format!(
        "Title: {}\nAuthors: {}\nJournal: {}\nDate: {}\nPubMed URL: {}\n",
        or_na(record.title.as_deref()),
        or_na(record.authors.as_deref()),
        or_na(record.journal.as_deref()),
        or_na(record.publication_date.as_deref()),
        or_na(Some(record.pubmed_url.as_str())),
    )
}
