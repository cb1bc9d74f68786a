use serde::{Deserialize, Serialize};

/// Prefix of the canonical article URL; the PMID is appended
pub const PUBMED_URL_PREFIX: &str = "https://pubmed.ncbi.nlm.nih.gov/";

/// Flattened metadata of one PubMed article
///
/// Every field except [`pubmed_url`](Self::pubmed_url) is optional. `None` means
/// the EFetch XML did not carry the value, which is different from an empty
/// string (an article with no keywords has `keywords == Some("")`).
///
/// The serde names match the CSV column headers, so a written table can be read
/// back into records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// PubMed ID
    pub pmid: Option<String>,
    /// Article title, inline markup flattened
    pub title: Option<String>,
    /// Author display names joined with `"; "`
    pub authors: Option<String>,
    /// Journal title or MEDLINE abbreviation
    pub journal: Option<String>,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
    pub publication_date: Option<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub pages: Option<String>,
    /// Abstract sections, each prefixed with its label when it has one
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    /// Keywords joined with `"; "`
    pub keywords: Option<String>,
    /// Digital Object Identifier
    pub doi: Option<String>,
    /// Canonical PubMed URL
    pub pubmed_url: String,
}

impl ArticleRecord {
    /// Build the canonical URL for a PMID (empty segment when unknown)
    pub fn url_for(pmid: Option<&str>) -> String {
        format!("{}{}", PUBMED_URL_PREFIX, pmid.unwrap_or(""))
    }

    /// Value of a column, `None` when the field is missing
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Pmid => self.pmid.as_deref(),
            Field::Title => self.title.as_deref(),
            Field::Authors => self.authors.as_deref(),
            Field::Journal => self.journal.as_deref(),
            Field::PublicationDate => self.publication_date.as_deref(),
            Field::Volume => self.volume.as_deref(),
            Field::Issue => self.issue.as_deref(),
            Field::Pages => self.pages.as_deref(),
            Field::Abstract => self.abstract_text.as_deref(),
            Field::Keywords => self.keywords.as_deref(),
            Field::Doi => self.doi.as_deref(),
            Field::PubmedUrl => Some(self.pubmed_url.as_str()),
        }
    }

    /// Whether the record carries this field at all
    pub fn has(&self, field: Field) -> bool {
        self.get(field).is_some()
    }
}

/// Output columns of the article table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Pmid,
    Title,
    Authors,
    Journal,
    PublicationDate,
    Volume,
    Issue,
    Pages,
    Abstract,
    Keywords,
    Doi,
    PubmedUrl,
}

impl Field {
    /// Preferred column order of the CSV table
    pub const PREFERRED_ORDER: [Field; 12] = [
        Field::Pmid,
        Field::Title,
        Field::Authors,
        Field::Journal,
        Field::PublicationDate,
        Field::Volume,
        Field::Issue,
        Field::Pages,
        Field::Abstract,
        Field::Keywords,
        Field::Doi,
        Field::PubmedUrl,
    ];

    /// CSV header name
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Pmid => "pmid",
            Field::Title => "title",
            Field::Authors => "authors",
            Field::Journal => "journal",
            Field::PublicationDate => "publication_date",
            Field::Volume => "volume",
            Field::Issue => "issue",
            Field::Pages => "pages",
            Field::Abstract => "abstract",
            Field::Keywords => "keywords",
            Field::Doi => "doi",
            Field::PubmedUrl => "pubmed_url",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}
