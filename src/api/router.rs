//! Router assembly: routes, fallback, body limit, and CORS.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::AppContext;

/// Request bodies (including uploads) are capped at 10 MB.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the service router.
pub fn api_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/summarize", post(endpoints::summarize::summarize))
        .route("/mock-data", get(endpoints::corpus::mock_data))
        .fallback(endpoints::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
