use serde::{Deserialize, Serialize};

/// ESearch JSON envelope
///
/// A body without `esearchresult` (or without `idlist`) deserializes to an
/// empty id list.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct ESearchResult {
    #[serde(default)]
    pub esearchresult: ESearchData,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct ESearchData {
    /// Total number of matches on the server, as a decimal string
    pub count: Option<String>,
    #[serde(default)]
    pub idlist: Vec<String>,
    /// Error message NCBI reports for unusable queries
    #[serde(rename = "ERROR")]
    pub error: Option<String>,
}
