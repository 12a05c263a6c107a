pub mod dates;
pub mod routes;

pub use routes::AppState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

/// Build the application router. The presentation layer is served
/// separately, so CORS is wide open.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/articles", get(routes::list_articles))
        .route("/api/articles/fetch", post(routes::fetch_articles))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
