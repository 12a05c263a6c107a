pub mod client;
pub mod refresh;

pub use client::NewsClient;
pub use refresh::RefreshCoordinator;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::storage::NewArticle;

/// Categories fetched on every refresh, in the order their articles are
/// stored. Every refresh fetches all of them regardless of what a single
/// request asked for.
pub const CATEGORIES: [&str; 5] = ["technology", "business", "sports", "entertainment", "health"];

/// Title the provider substitutes for redacted articles.
pub const REMOVED_TITLE: &str = "[Removed]";

/// Top-headlines response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlinesResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: u32,
    #[serde(default)]
    pub articles: Vec<ProviderArticle>,
}

/// A raw article entry as the provider returns it. Every field is optional
/// so one sparse entry cannot fail deserialization of the whole page;
/// unusable entries are dropped during normalization instead.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderArticle {
    #[serde(default)]
    pub source: ProviderSource,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl ProviderArticle {
    /// Convert a provider entry into the store's insert form, tagged with
    /// the category it was fetched under. Returns `None` for entries with
    /// no usable title or url, the `[Removed]` sentinel, or no parseable
    /// publication time.
    pub fn into_new_article(self, category: &str) -> Option<NewArticle> {
        let title = self.title.filter(|t| !t.is_empty())?;
        if title == REMOVED_TITLE {
            return None;
        }
        let url = self.url.filter(|u| !u.is_empty())?;
        let published_at = self.published_at?;

        let source = self
            .source
            .name
            .or(self.source.id)
            .unwrap_or_else(|| "Unknown".to_string());

        Some(NewArticle {
            title,
            description: self.description,
            content: self.content,
            url,
            url_to_image: self.url_to_image,
            published_at,
            source,
            category: category.to_string(),
            author: self.author,
        })
    }
}
