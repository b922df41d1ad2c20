use crate::config::{WikipediaConfig, LANGUAGE_PLACEHOLDER};
use crate::error::FetchError;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Query parameters asking MediaWiki for site statistics as JSON
const SITEINFO_QUERY: [(&str, &str); 4] = [
    ("action", "query"),
    ("meta", "siteinfo"),
    ("siprop", "statistics"),
    ("format", "json"),
];

/// Result of a single statistics fetch
pub type FetchOutcome = Result<SiteStatistics, FetchError>;

/// Statistics of one language edition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteStatistics {
    pub language_code: String,
    pub total_pages: u64,
    pub articles: u64,
    pub good_articles: u64,
    pub active_users: u64,
    pub edits: u64,
}

/// `action=query&meta=siteinfo` response
#[derive(Debug, Deserialize)]
pub struct SiteInfoResponse {
    pub query: Option<SiteInfoQuery>,
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct SiteInfoQuery {
    pub statistics: Option<RawStatistics>,
}

/// Counters as MediaWiki names them; absent counters read as zero
#[derive(Debug, Default, Deserialize)]
pub struct RawStatistics {
    #[serde(default)]
    pub pages: u64,
    #[serde(default)]
    pub articles: u64,
    #[serde(default)]
    pub good: u64,
    #[serde(default)]
    pub activeusers: u64,
    #[serde(default)]
    pub edits: u64,
}

/// Error object MediaWiki returns in place of `query`
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: Option<String>,
    pub info: Option<String>,
}

impl SiteInfoResponse {
    /// Extract `query.statistics` for `language_code`
    pub fn into_statistics(self, language_code: &str) -> FetchOutcome {
        if let Some(error) = self.error {
            return Err(FetchError::Parse(format!(
                "API returned error '{}': {}",
                error.code.as_deref().unwrap_or("unknown"),
                error.info.as_deref().unwrap_or("no details")
            )));
        }

        let query = self
            .query
            .ok_or_else(|| FetchError::Parse("missing key 'query'".to_string()))?;
        let stats = query
            .statistics
            .ok_or_else(|| FetchError::Parse("missing key 'statistics'".to_string()))?;

        Ok(SiteStatistics {
            language_code: language_code.to_string(),
            total_pages: stats.pages,
            articles: stats.articles,
            good_articles: stats.good,
            active_users: stats.activeusers,
            edits: stats.edits,
        })
    }
}

/// Wikipedia site statistics client
#[derive(Debug)]
pub struct WikipediaClient {
    config: WikipediaConfig,
    http_client: Client,
}

impl WikipediaClient {
    pub fn new(config: WikipediaConfig) -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Unexpected(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Build the siteinfo URL for a language edition
    pub fn endpoint(&self, language_code: &str) -> Result<Url, FetchError> {
        let raw = self
            .config
            .api_url
            .replace(LANGUAGE_PLACEHOLDER, language_code);

        // An unusable host is reported the same way a failed lookup would be.
        let mut url = Url::parse(&raw)
            .map_err(|e| FetchError::Network(format!("Invalid URL '{raw}': {e}")))?;
        url.query_pairs_mut().extend_pairs(SITEINFO_QUERY);

        Ok(url)
    }

    /// Fetch the statistics of one language edition.
    ///
    /// Transport failures and non-2xx answers become [`FetchError::Network`],
    /// a body without `query.statistics` becomes [`FetchError::Parse`].
    pub async fn fetch_statistics(&self, language_code: &str) -> FetchOutcome {
        let url = self.endpoint(language_code)?;
        debug!("Requesting site statistics from {}", url);

        let response = self.http_client.get(url).send().await.map_err(|e| {
            warn!("Request for '{}' failed: {}", language_code, e);
            FetchError::Network(e.to_string())
        })?;

        let status = response.status();
        debug!("Received HTTP {} for '{}'", status, language_code);

        let response = response
            .error_for_status()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to read response: {e}")))?;

        let parsed: SiteInfoResponse = serde_json::from_str(&body).map_err(|e| {
            debug!("Response text: {}", body);
            FetchError::Parse(format!("JSON parsing failed: {e}"))
        })?;

        let stats = parsed.into_statistics(language_code)?;
        debug!(
            "Statistics for '{}': {} pages, {} articles",
            language_code, stats.total_pages, stats.articles
        );
        Ok(stats)
    }
}

/// Build a client from `config` and fetch the statistics of `language_code`
pub async fn fetch_site_statistics(config: &WikipediaConfig, language_code: &str) -> FetchOutcome {
    let client = WikipediaClient::new(config.clone())?;
    client.fetch_statistics(language_code).await
}
