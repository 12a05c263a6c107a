pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{ArticleFilter, ArticleStore, SortBy, ALL_CATEGORIES};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized news item owned by the store.
///
/// Serialized as camelCase to match the wire format the presentation
/// layer consumes (`urlToImage`, `publishedAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Assigned by the store on insertion; strictly increasing within a
    /// process lifetime until the store is cleared.
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub category: String,
    pub author: Option<String>,
}

/// Insert form of [`Article`]: everything except the store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub category: String,
    pub author: Option<String>,
}

impl NewArticle {
    pub fn into_article(self, id: i64) -> Article {
        Article {
            id,
            title: self.title,
            description: self.description,
            content: self.content,
            url: self.url,
            url_to_image: self.url_to_image,
            published_at: self.published_at,
            source: self.source,
            category: self.category,
            author: self.author,
        }
    }
}
