use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::Result;
use crate::storage::traits::{ArticleFilter, ArticleStore, SortBy};
use crate::storage::{Article, NewArticle};

/// In-memory article store: a growable arena in insertion order plus an id
/// counter, guarded by a single lock. Reads clone a snapshot so no caller
/// ever holds a reference into the store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    articles: Vec<Article>,
    next_id: i64,
}

impl Default for StoreInner {
    fn default() -> Self {
        Self {
            articles: Vec::new(),
            next_id: 1,
        }
    }
}

impl StoreInner {
    fn insert(&mut self, articles: Vec<NewArticle>) -> Vec<Article> {
        let mut created = Vec::with_capacity(articles.len());
        for article in articles {
            let id = self.next_id;
            self.next_id += 1;
            let article = article.into_article(id);
            self.articles.push(article.clone());
            created.push(article);
        }
        created
    }

    fn clear(&mut self) {
        self.articles.clear();
        self.next_id = 1;
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn list_articles(&self, filter: &ArticleFilter) -> Result<Vec<Article>> {
        let mut results: Vec<Article> = {
            let inner = self.inner.read();
            inner
                .articles
                .iter()
                .filter(|article| filter.matches(article))
                .cloned()
                .collect()
        };

        // Vec::sort_by is stable, so equal timestamps keep insertion order.
        match filter.sort_by {
            SortBy::Oldest => results.sort_by(|a, b| a.published_at.cmp(&b.published_at)),
            SortBy::Newest | SortBy::Relevance => {
                results.sort_by(|a, b| b.published_at.cmp(&a.published_at))
            }
        }

        Ok(results)
    }

    async fn insert_articles(&self, articles: Vec<NewArticle>) -> Result<Vec<Article>> {
        let mut inner = self.inner.write();
        Ok(inner.insert(articles))
    }

    async fn replace_articles(&self, articles: Vec<NewArticle>) -> Result<Vec<Article>> {
        // Clear and insert under one write lock so concurrent readers see
        // either the old collection or the new one, never the gap between.
        let mut inner = self.inner.write();
        inner.clear();
        Ok(inner.insert(articles))
    }

    async fn clear(&self) -> Result<()> {
        let mut inner = self.inner.write();
        inner.clear();
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.read().articles.len())
    }
}
