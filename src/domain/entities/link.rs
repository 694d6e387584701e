//! Short link entity representing a token-to-URL mapping.

use chrono::{DateTime, Utc};

/// A registered short link.
///
/// `short_code` and `original_url` never change after creation. The only
/// mutable field is `click_count`, which only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        short_code: String,
        original_url: String,
        click_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_code,
            original_url,
            click_count,
            created_at,
        }
    }
}

/// Input data for registering a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub short_code: String,
    pub original_url: String,
}

impl NewShortLink {
    pub fn new(short_code: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
            original_url: original_url.into(),
        }
    }
}
