//! DTOs for the short code generation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a long URL.
///
/// The URL is stored verbatim; no format check is applied beyond non-emptiness.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[validate(
        required(message = "Long URL is required"),
        length(min = 1, message = "Long URL is required")
    )]
    pub long_url: Option<String>,
}

/// Response carrying the allocated (or reused) short code.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub short_code: String,
    pub message: String,
}

impl GenerateResponse {
    pub fn new(short_code: String) -> Self {
        Self {
            short_code,
            message: "Short URL generated successfully".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_requires_long_url() {
        let missing: GenerateRequest = serde_json::from_value(json!({})).unwrap();
        assert!(missing.validate().is_err());

        let empty: GenerateRequest = serde_json::from_value(json!({ "longUrl": "" })).unwrap();
        assert!(empty.validate().is_err());

        let ok: GenerateRequest =
            serde_json::from_value(json!({ "longUrl": "https://example.com" })).unwrap();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_response_uses_camel_case() {
        let body = serde_json::to_value(GenerateResponse::new("abcd1234".to_string())).unwrap();

        assert_eq!(body["shortCode"], "abcd1234");
        assert_eq!(body["message"], "Short URL generated successfully");
    }
}
