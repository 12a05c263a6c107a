use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::api::dates;
use crate::error::Error;
use crate::news::RefreshCoordinator;
use crate::storage::{Article, ArticleFilter, ArticleStore, SortBy};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ArticleStore>,
    pub coordinator: Arc<RefreshCoordinator>,
}

/// Client-visible failures. Internal detail is logged server-side; the
/// response body only ever carries these fixed messages.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("News API key not configured")]
    KeyMissing,

    #[error("Failed to fetch articles")]
    ListFailed,

    #[error("Failed to fetch fresh articles")]
    RefreshFailed,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::KeyMissing => StatusCode::BAD_REQUEST,
            ApiError::ListFailed | ApiError::RefreshFailed => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub category: Option<String>,
    pub date_range: Option<String>,
    pub custom_date: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArticleList {
    pub articles: Vec<Article>,
    pub total: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct FetchRequest {
    /// Accepted for wire compatibility; every refresh fetches the full
    /// fixed category list.
    pub category: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FetchResponse {
    pub message: String,
    pub count: usize,
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ArticleList>, ApiError> {
    let (date_from, date_to) =
        dates::resolve_range(query.date_range.as_deref(), query.custom_date.as_deref(), Utc::now());

    let filter = ArticleFilter {
        category: query.category,
        date_from,
        date_to,
        sort_by: query
            .sort_by
            .as_deref()
            .map(SortBy::from_param)
            .unwrap_or_default(),
    };

    let articles = state.store.list_articles(&filter).await.map_err(|e| {
        error!("Error listing articles: {}", e);
        ApiError::ListFailed
    })?;

    Ok(Json(ArticleList {
        total: articles.len(),
        articles,
    }))
}

pub async fn fetch_articles(
    State(state): State<AppState>,
    body: Option<Json<FetchRequest>>,
) -> Result<Json<FetchResponse>, ApiError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();

    match state.coordinator.refresh(request.country.as_deref()).await {
        Ok(count) => Ok(Json(FetchResponse {
            message: "Articles fetched successfully".to_string(),
            count,
        })),
        Err(Error::Config(_)) => Err(ApiError::KeyMissing),
        Err(e) => {
            error!("Error refreshing articles: {}", e);
            Err(ApiError::RefreshFailed)
        }
    }
}
