//! DTOs for the JSON redirect lookup endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to resolve a short code.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RedirectRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Short code is required"))]
    pub short_code: String,
}

/// Resolved target for a short code.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectResponse {
    pub redirect_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_short_code_fails_validation() {
        let request: RedirectRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_response_field_name() {
        let value = serde_json::to_value(RedirectResponse {
            redirect_url: "https://example.com".to_string(),
        })
        .unwrap();

        assert_eq!(value, json!({ "redirectUrl": "https://example.com" }));
    }
}
