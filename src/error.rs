use thiserror::Error;

/// Error types for PubMed fetcher operations
#[derive(Error, Debug)]
pub enum PubMedError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// XML parsing error with detailed message
    #[error("XML parsing error: {message}")]
    XmlParseError { message: String },

    /// Generic API error with HTTP status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Writing the CSV table failed
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// IO error for terminal or file operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PubMedError>;

impl From<quick_xml::Error> for PubMedError {
    fn from(err: quick_xml::Error) -> Self {
        PubMedError::XmlParseError {
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for PubMedError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        PubMedError::XmlParseError {
            message: format!("invalid attribute: {}", err),
        }
    }
}
