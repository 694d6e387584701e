//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`         - Short link redirect (307)
//! - `POST /api/shorten`    - Register a short link
//! - `POST /api/redirect`   - Resolve a short code as JSON
//! - `GET  /api/health`     - Health check: registry and click queue
//!
//! Single-segment paths belong to short codes; everything else lives under
//! `/api`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin may call the API
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes and middleware without path normalization.
///
/// Handy for tests that drive the router directly.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer())
}

/// Constructs the application router served by the binary.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
