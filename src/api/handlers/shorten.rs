//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com/a/b",
///   "customSlug": "my-link"
/// }
/// ```
///
/// `customSlug` is optional; without it a random 6-character code is generated.
///
/// # Response
///
/// ```json
/// {
///   "shortCode": "Xk9pL2",
///   "originalUrl": "https://example.com/a/b",
///   "shortUrl": "https://urlbite.site/Xk9pL2"
/// }
/// ```
///
/// # Errors
///
/// - 400 for a malformed body, an invalid URL or custom slug
/// - 409 if the custom slug is already taken
/// - 503 if no free code was found or the registry timed out
/// - 500 on other storage failures
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .register(&payload.original_url, payload.custom_slug.as_deref())
        .await?;

    Ok(Json(link.into()))
}
