//! CSV export of article records
//!
//! Columns follow [`Field::PREFERRED_ORDER`], restricted to the fields that at
//! least one record actually carries.

use crate::error::Result;
use crate::pubmed::{ArticleRecord, Field};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Columns to write for `records`, in preferred order
pub fn effective_columns(records: &[ArticleRecord]) -> Vec<Field> {
    Field::PREFERRED_ORDER
        .into_iter()
        .filter(|&field| records.iter().any(|record| record.has(field)))
        .collect()
}

/// Write `records` as CSV to `path`, overwriting any existing file
///
/// Returns the number of records written. An empty slice writes nothing and
/// leaves `path` untouched.
///
/// # Errors
///
/// * `PubMedError::CsvError` - If the file cannot be created or written
/// * `PubMedError::IoError` - If flushing the file fails
///
/// # Example
///
/// ```no_run
/// use pubmed_fetcher::ArticleRecord;
/// use pubmed_fetcher::export::write_csv;
///
/// let record = ArticleRecord {
///     pmid: Some("31978945".to_string()),
///     pubmed_url: ArticleRecord::url_for(Some("31978945")),
///     ..Default::default()
/// };
/// let written = write_csv(&[record], "papers.csv")?;
/// assert_eq!(written, 1);
/// # Ok::<(), pubmed_fetcher::PubMedError>(())
/// ```
#[instrument(skip(records, path), fields(records = records.len(), path = %path.as_ref().display()))]
pub fn write_csv<P: AsRef<Path>>(records: &[ArticleRecord], path: P) -> Result<usize> {
    if records.is_empty() {
        info!("No data to save.");
        return Ok(0);
    }

    let columns = effective_columns(records);
    debug!(columns = columns.len(), "Selected output columns");

    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(columns.iter().map(|field| field.column_name()))?;

    for record in records {
        writer.write_record(
            columns
                .iter()
                .map(|&field| record.get(field).unwrap_or_default()),
        )?;
    }

    writer.flush()?;

    info!(
        "Saved {} papers to {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records.len())
}
