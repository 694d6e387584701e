//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::RegisteredLink;

/// Request to shorten a single URL.
///
/// A missing `originalUrl` deserializes to an empty string and is rejected
/// by the URL check like any other invalid input.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(length(max = 8192, message = "URL is too long"))]
    pub original_url: String,

    /// Optional custom short code. Empty means "generate one".
    #[serde(default)]
    pub custom_slug: Option<String>,
}

/// Successful shorten response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
}

impl From<RegisteredLink> for ShortenResponse {
    fn from(link: RegisteredLink) -> Self {
        Self {
            short_code: link.short_code,
            original_url: link.original_url,
            short_url: link.short_url,
        }
    }
}
