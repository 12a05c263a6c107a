use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::news::{NewsClient, CATEGORIES};
use crate::storage::{ArticleStore, NewArticle};

/// Repopulates the article store from the provider on demand.
///
/// Each refresh fetches all fixed categories concurrently, drops unusable
/// entries, and replaces the store contents in a single call. A category
/// whose fetch fails is skipped; the refresh only fails outright when no
/// credential is configured or the store write fails.
pub struct RefreshCoordinator {
    store: Arc<dyn ArticleStore>,
    client: Option<NewsClient>,
    country: String,
}

impl RefreshCoordinator {
    pub fn new(store: Arc<dyn ArticleStore>, client: Option<NewsClient>, country: String) -> Self {
        Self {
            store,
            client,
            country,
        }
    }

    /// Refresh the store, returning the number of articles stored.
    ///
    /// The credential check happens before anything else: with no key
    /// configured the existing store contents are left untouched.
    pub async fn refresh(&self, country: Option<&str>) -> Result<usize> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::Config("News API key not configured".to_string()))?;
        let country = country.unwrap_or(&self.country);

        // Fan out one request per category; a failed category contributes
        // an empty batch instead of aborting the refresh.
        let fetches = CATEGORIES.iter().map(|category| async move {
            match client.top_headlines(category, country).await {
                Ok(articles) => (*category, articles),
                Err(e) => {
                    warn!("Skipping {} headlines: {}", category, e);
                    (*category, Vec::new())
                }
            }
        });
        let results = futures::future::join_all(fetches).await;

        // join_all preserves input order, so the batch stays grouped in the
        // fixed category order with provider order within each category.
        let batch: Vec<NewArticle> = results
            .into_iter()
            .flat_map(|(category, articles)| {
                articles
                    .into_iter()
                    .filter_map(move |raw| raw.into_new_article(category))
            })
            .collect();

        let stored = self
            .store
            .replace_articles(batch)
            .await
            .map_err(|e| Error::Storage(format!("Failed to store refreshed articles: {}", e)))?;
        info!("Refreshed article store: {} articles", stored.len());
        Ok(stored.len())
    }
}
