use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::news::{HeadlinesResponse, ProviderArticle};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Client for the provider's top-headlines endpoint.
#[derive(Debug, Clone)]
pub struct NewsClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout_duration: Duration,
    page_size: u32,
}

impl NewsClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .gzip(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout_duration: Duration::from_secs(10),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Point the client at a different endpoint, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_duration = timeout;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fetch one category's top headlines. A timed-out request surfaces as
    /// `Error::Timeout`, a non-success status as `Error::HttpError`, and a
    /// provider-level rejection (`status != "ok"`) as `Error::Provider`.
    pub async fn top_headlines(
        &self,
        category: &str,
        country: &str,
    ) -> Result<Vec<ProviderArticle>> {
        debug!("Fetching top headlines: category={} country={}", category, country);

        let mut url = Url::parse(&format!("{}/top-headlines", self.base_url))
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.query_pairs_mut()
            .append_pair("category", category)
            .append_pair("country", country)
            .append_pair("apiKey", &self.api_key)
            .append_pair("pageSize", &self.page_size.to_string());

        let response = timeout(self.timeout_duration, self.client.get(url).send())
            .await
            .map_err(|_| Error::Timeout(format!("Request for {} headlines timed out", category)))?
            .map_err(|e| Error::HttpError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::HttpError(format!(
                "HTTP {} fetching {} headlines: {}",
                response.status().as_u16(),
                category,
                response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
            )));
        }

        let body: HeadlinesResponse = response
            .json()
            .await
            .map_err(|e| Error::HttpError(format!("Failed to read response body: {}", e)))?;

        if body.status != "ok" {
            return Err(Error::Provider(format!(
                "Provider returned status {:?} for {} headlines",
                body.status, category
            )));
        }

        debug!(
            "Fetched {} of {} {} headlines",
            body.articles.len(),
            body.total_results,
            category
        );
        Ok(body.articles)
    }
}
