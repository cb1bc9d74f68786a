//! Client configuration
//!
//! [`ClientConfig`] collects the few knobs the E-utilities client needs. All of
//! them have working defaults, so `ClientConfig::new()` talks to the public NCBI
//! endpoints with reqwest's default timeout behaviour.

use std::time::Duration;

/// Default NCBI E-utilities base URL
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Configuration for [`PubMedClient`](crate::PubMedClient)
///
/// # Example
///
/// ```
/// use pubmed_fetcher::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_timeout(Duration::from_secs(30))
///     .with_user_agent("my-review-tool/1.0");
///
/// assert_eq!(config.effective_user_agent(), "my-review-tool/1.0");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Override for the E-utilities base URL (mock servers, mirrors)
    pub base_url: Option<String>,
    /// Request timeout; `None` keeps the HTTP client's default
    pub timeout: Option<Duration>,
    /// Custom User-Agent header
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different E-utilities base URL
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom User-Agent header
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Base URL without a trailing slash
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    /// User-Agent sent with every request
    pub fn effective_user_agent(&self) -> String {
        match &self.user_agent {
            Some(agent) => agent.clone(),
            None => format!("pubmed-fetcher/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
