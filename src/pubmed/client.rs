use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::pubmed::models::ArticleRecord;
use crate::pubmed::parser::extract_records;
use crate::pubmed::responses::ESearchResult;
use crate::pubmed::xml::{XmlElement, parse_document};
use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

/// Client for the PubMed E-utilities ESearch and EFetch endpoints
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
}

impl PubMedClient {
    /// Create a new PubMed client with default configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_fetcher::PubMedClient;
    ///
    /// let client = PubMedClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a new PubMed client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_fetcher::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new().with_base_url("http://127.0.0.1:8080");
    /// let client = PubMedClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let mut builder = Client::builder().user_agent(config.effective_user_agent());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.effective_base_url().to_string(),
        }
    }

    /// Create a new PubMed client with a custom HTTP client and default configuration
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: ClientConfig::new().effective_base_url().to_string(),
        }
    }

    /// Search PubMed and return the matching PMIDs
    ///
    /// The result never holds more than `max_results` identifiers and keeps the
    /// order the service returned them in. A blank query or a zero limit returns
    /// an empty list without contacting the server.
    ///
    /// # Errors
    ///
    /// * `PubMedError::RequestError` - If the HTTP request fails
    /// * `PubMedError::ApiError` - If the server answers with a non-success status
    /// * `PubMedError::JsonError` - If the response body is not valid JSON
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_fetcher::PubMedClient;
    ///
    /// #[tokio::main(flavor = "current_thread")]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let pmids = client.search_articles("crispr off-target", 10).await?;
    ///     println!("Found {} articles", pmids.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(query = %query, max_results = max_results))]
    pub async fn search_articles(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        if query.trim().is_empty() || max_results == 0 {
            debug!("Empty query or zero limit, returning empty results");
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmode=json&retmax={}",
            self.base_url,
            urlencoding::encode(query),
            max_results
        );

        debug!("Making ESearch API request");
        let response = self.make_request(&url).await?;
        let body = response.text().await?;
        let search_result: ESearchResult = serde_json::from_str(&body)?;

        let data = search_result.esearchresult;
        if let Some(error) = &data.error {
            warn!(error = %error, "ESearch reported an error");
        }

        let mut pmids = data.idlist;
        if pmids.len() > max_results {
            debug!(
                returned = pmids.len(),
                "Server returned more ids than requested, truncating"
            );
            pmids.truncate(max_results);
        }

        info!(
            results_found = pmids.len(),
            total_count = data.count.as_deref().unwrap_or("unknown"),
            "Search completed successfully"
        );

        Ok(pmids)
    }

    /// Fetch the EFetch XML document for a batch of PMIDs
    ///
    /// All identifiers go into a single request. An empty slice returns an
    /// empty `PubmedArticleSet` element without any network call.
    ///
    /// # Errors
    ///
    /// * `PubMedError::RequestError` - If the HTTP request fails
    /// * `PubMedError::ApiError` - If the server answers with a non-success status
    /// * `PubMedError::XmlParseError` - If the response is not well-formed XML
    #[instrument(skip(self, pmids), fields(pmids_count = pmids.len()))]
    pub async fn fetch_document<S: AsRef<str>>(&self, pmids: &[S]) -> Result<XmlElement> {
        if pmids.is_empty() {
            debug!("No PMIDs given, skipping EFetch request");
            return Ok(XmlElement::new("PubmedArticleSet"));
        }

        let id_list = pmids
            .iter()
            .map(|pmid| urlencoding::encode(pmid.as_ref()).into_owned())
            .collect::<Vec<_>>()
            .join(",");

        let url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
            self.base_url, id_list
        );

        debug!("Making batch EFetch API request");
        let response = self.make_request(&url).await?;
        let xml_text = response.text().await?;

        let document = parse_document(&xml_text);
        if let Err(e) = &document {
            warn!("Failed to parse EFetch XML: {}", e);
        }
        document
    }

    /// Fetch and flatten the articles for a batch of PMIDs
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_fetcher::PubMedClient;
    ///
    /// #[tokio::main(flavor = "current_thread")]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let records = client.fetch_records(&["31978945", "33515491"]).await?;
    ///     for record in &records {
    ///         println!("{}", record.title.as_deref().unwrap_or("N/A"));
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn fetch_records<S: AsRef<str>>(&self, pmids: &[S]) -> Result<Vec<ArticleRecord>> {
        let document = self.fetch_document(pmids).await?;
        let records = extract_records(&document);

        info!(
            requested = pmids.len(),
            parsed = records.len(),
            "Batch fetch completed"
        );
        Ok(records)
    }

    async fn make_request(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("API request failed with status: {}", status);
            return Err(PubMedError::ApiError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        Ok(response)
    }
}

impl Default for PubMedClient {
    fn default() -> Self {
        Self::new()
    }
}
