//! # Authentication DTOs
//!
//! Bodies for `/auth/register`, `/auth/token`, `/auth/refresh` and `/auth/validate`.

use serde::{Deserialize, Serialize};

/// Registration request (`POST /auth/register`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
}

/// Registration response (201)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    pub message: String,
}

/// Password grant (`POST /auth/token`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Token pair issued on login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Refresh grant (`POST /auth/refresh`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Refresh response. The server may rotate the refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Identity of the bearer (`POST /auth/validate`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateResponse {
    pub user_id: String,
    pub username: String,
}

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Plain `{ "message": ... }` acknowledgement used by action endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionMessage {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_response_without_rotation() {
        let parsed: RefreshResponse =
            serde_json::from_str(r#"{"access_token":"a2"}"#).unwrap();
        assert_eq!(parsed.access_token, "a2");
        assert!(parsed.refresh_token.is_none());
    }

    #[test]
    fn test_register_request_omits_empty_contacts() {
        let req = RegisterRequest {
            username: "guest".to_string(),
            email: "guest@example.com".to_string(),
            password: "Secret123".to_string(),
            phone: None,
            telegram: Some("@guest".to_string()),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("phone").is_none());
        assert_eq!(json["telegram"], "@guest");
    }
}
