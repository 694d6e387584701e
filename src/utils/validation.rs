//! Syntactic checks for custom slugs and target URLs.
//!
//! Both checks are pure. Whether a slug is still free is decided by the
//! registry, not here.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Full-string pattern a custom slug must match.
static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{3,50}$").expect("slug pattern is valid"));

/// Returns true if `candidate` is an acceptable custom slug.
///
/// # Rules
///
/// - Length: 3-50 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
///
/// # Examples
///
/// ```
/// use urlbite::utils::validation::is_valid_slug;
///
/// assert!(is_valid_slug("my-link_2024"));
/// assert!(!is_valid_slug("ab"));
/// assert!(!is_valid_slug("has space"));
/// ```
pub fn is_valid_slug(candidate: &str) -> bool {
    SLUG_REGEX.is_match(candidate)
}

/// Returns true if `input` parses as an absolute URL with an `http` or
/// `https` scheme.
///
/// Relative references, other schemes (`ftp:`, `javascript:`, `data:` ...)
/// and malformed strings are rejected, as is any ASCII control character
/// (the parser would silently strip or escape it, so the stored string would
/// no longer be what was parsed).
pub fn is_valid_url(input: &str) -> bool {
    if input.chars().any(|c| c.is_ascii_control()) {
        return false;
    }

    match Url::parse(input) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
