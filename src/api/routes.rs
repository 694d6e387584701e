//! API route configuration.

use crate::api::handlers::{health_handler, resolve_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes.
///
/// # Endpoints
///
/// - `POST /shorten`  - Register a short link
/// - `POST /redirect` - Resolve a short code to its target URL
/// - `GET  /health`   - Registry and click queue status
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/redirect", post(resolve_handler))
        .route("/health", get(health_handler))
}
