use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{Article, NewArticle};

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Sort order for article listings.
///
/// `Relevance` intentionally falls back to newest-first: no relevance
/// scoring is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Newest,
    Oldest,
    Relevance,
}

impl SortBy {
    /// Lenient parse used by the HTTP layer: unrecognized values fall back
    /// to newest-first rather than rejecting the request.
    pub fn from_param(value: &str) -> Self {
        match value {
            "oldest" => SortBy::Oldest,
            "relevance" => SortBy::Relevance,
            _ => SortBy::Newest,
        }
    }
}

/// Query parameters for listing articles. All fields are optional;
/// the default filter matches everything, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleFilter {
    /// Case-insensitive exact match; `None` or `"all"` matches everything.
    pub category: Option<String>,

    /// Inclusive lower bound on `published_at`.
    pub date_from: Option<DateTime<Utc>>,

    /// Inclusive upper bound on `published_at`.
    pub date_to: Option<DateTime<Utc>>,

    pub sort_by: SortBy,
}

impl ArticleFilter {
    pub fn matches(&self, article: &Article) -> bool {
        if let Some(category) = &self.category {
            if !category.eq_ignore_ascii_case(ALL_CATEGORIES)
                && !article.category.eq_ignore_ascii_case(category)
            {
                return false;
            }
        }

        if let Some(from) = self.date_from {
            if article.published_at < from {
                return false;
            }
        }

        if let Some(to) = self.date_to {
            if article.published_at > to {
                return false;
            }
        }

        true
    }
}

/// Store trait for the in-memory article collection.
///
/// Implementations must serialize mutations: id assignment inside
/// `insert_articles` is atomic per call, and `replace_articles` must not
/// expose a half-replaced collection to concurrent readers.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// List articles matching the filter, in the filter's sort order.
    /// Ties on `published_at` preserve insertion order.
    async fn list_articles(&self, filter: &ArticleFilter) -> Result<Vec<Article>>;

    /// Insert a batch, assigning strictly increasing ids continuing from
    /// the store's counter. Returns the stored articles in input order.
    async fn insert_articles(&self, articles: Vec<NewArticle>) -> Result<Vec<Article>>;

    /// Atomically discard the current collection (resetting the id counter)
    /// and insert the given batch in its place.
    async fn replace_articles(&self, articles: Vec<NewArticle>) -> Result<Vec<Article>>;

    /// Remove all articles and reset the id counter to 1. Idempotent.
    async fn clear(&self) -> Result<()>;

    /// Number of stored articles.
    async fn count(&self) -> Result<usize>;
}
