//! Handlers for short code resolution.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Redirect},
};
use url::Url;
use validator::Validate;

use crate::api::dto::redirect::{RedirectRequest, RedirectResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// The click is counted in the background; the redirect is returned as soon
/// as the lookup completes.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.redirect_service.resolve(&code).await?;

    // Location must be ASCII; the parsed form percent-encodes the rest.
    let location = Url::parse(&original_url)
        .map(String::from)
        .unwrap_or(original_url);

    Ok(Redirect::temporary(&location))
}

/// Resolves a short code and returns the target as JSON.
///
/// # Endpoint
///
/// `POST /api/redirect`
///
/// # Request Body
///
/// ```json
/// { "shortCode": "Xk9pL2" }
/// ```
///
/// # Response
///
/// ```json
/// { "redirectUrl": "https://example.com/a/b" }
/// ```
///
/// # Errors
///
/// Returns 400 if the body is not valid JSON or `shortCode` is missing or
/// empty, 404 if it is not registered.
pub async fn resolve_handler(
    State(state): State<AppState>,
    payload: Result<Json<RedirectRequest>, JsonRejection>,
) -> Result<Json<RedirectResponse>, AppError> {
    let Json(payload) = payload?;
    payload
        .validate()
        .map_err(|_| AppError::BadRequest("Short code is required".to_string()))?;

    let redirect_url = state.redirect_service.resolve(&payload.short_code).await?;

    Ok(Json(RedirectResponse { redirect_url }))
}
