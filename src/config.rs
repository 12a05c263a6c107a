use crate::error::{Error, Result};

/// Runtime configuration, read from the process environment at startup.
///
/// The provider credential is optional: a missing key is a reportable
/// condition on the refresh endpoint, not a startup failure.
#[derive(Debug, Clone)]
pub struct Config {
    /// NewsAPI credential. `NEWS_API_KEY`, falling back to `NEWSAPI_KEY`.
    pub api_key: Option<String>,

    /// Country passed to the top-headlines endpoint when a refresh request
    /// does not specify one.
    pub country: String,

    /// Articles requested per category fetch.
    pub page_size: u32,

    /// Per-category fetch timeout in seconds. A timed-out category is
    /// skipped, same as a failed one.
    pub fetch_timeout: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("NEWS_API_KEY")
            .or_else(|_| std::env::var("NEWSAPI_KEY"))
            .ok()
            .filter(|key| !key.is_empty());

        let country = std::env::var("NEWSDESK_COUNTRY")
            .ok()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(default_country);

        let page_size = match std::env::var("NEWSDESK_PAGE_SIZE") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| Error::Config(format!("Invalid NEWSDESK_PAGE_SIZE: {}", raw)))?,
            Err(_) => default_page_size(),
        };

        let fetch_timeout = match std::env::var("NEWSDESK_FETCH_TIMEOUT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| Error::Config(format!("Invalid NEWSDESK_FETCH_TIMEOUT: {}", raw)))?,
            Err(_) => default_fetch_timeout(),
        };

        let config = Self {
            api_key,
            country,
            page_size,
            fetch_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("Page size must be greater than 0".to_string()));
        }

        if self.fetch_timeout == 0 {
            return Err(Error::Config(
                "Fetch timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            country: default_country(),
            page_size: default_page_size(),
            fetch_timeout: default_fetch_timeout(),
        }
    }
}

fn default_country() -> String {
    "us".to_string()
}
fn default_page_size() -> u32 {
    20
}
fn default_fetch_timeout() -> u64 {
    10
}
