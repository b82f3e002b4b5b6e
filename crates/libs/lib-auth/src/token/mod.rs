//! # Access Token Claims
//!
//! Unverified decode of the JWT payload segment. The backend owns the
//! signing key; the client only reads role and expiry.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Claims signed into access and refresh tokens.
///
/// Older tokens carry the user id in `sub`, newer ones in `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, alias = "sub")]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role_id: i64,
    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn role(&self) -> Option<Role> {
        Role::from_id(self.role_id)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| lib_utils::from_unix(exp).ok())
    }

    /// True once `now + leeway` reaches `exp`. Tokens without `exp` never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        match self.expires_at() {
            Some(exp) => now + leeway >= exp,
            None => false,
        }
    }
}

/// Read the claims of a compact JWT without checking its signature or expiry.
pub fn decode_claims(token: &str) -> Result<Claims, Error> {
    let header = decode_header(token).map_err(|_| Error::Malformed)?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| Error::InvalidClaims(e.to_string()))
}

// region:    --- Error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("token is not a compact JWT")]
    Malformed,
    #[error("token payload is not valid claims JSON: {0}")]
    InvalidClaims(String),
}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-key-must-be-at-least-32-chars-long!";

    fn mint(payload: serde_json::Value) -> String {
        encode(&Header::default(), &payload, &EncodingKey::from_secret(SECRET.as_bytes()))
            .expect("JWT encoding should succeed")
    }

    #[test]
    fn test_decode_backend_claims() {
        let token = mint(serde_json::json!({
            "user_id": "3f2504e0-4f89-11d3-9a0c-0305e82c3301",
            "username": "guest",
            "role_id": 3,
            "exp": 1_900_000_000
        }));

        let claims = decode_claims(&token).expect("claims should decode");
        assert_eq!(claims.username, "guest");
        assert_eq!(claims.role(), Some(Role::SecretGuest));
        assert_eq!(claims.exp, Some(1_900_000_000));
    }

    #[test]
    fn test_sub_is_accepted_as_user_id() {
        let token = mint(serde_json::json!({"sub": "42", "username": "admin", "role_id": 1}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id, "42");
        assert_eq!(claims.role(), Some(Role::Admin));
        assert!(!claims.is_expired_at(Utc::now(), Duration::zero()));
    }

    #[test]
    fn test_expiry_with_leeway() {
        let now = Utc::now();
        let claims = Claims {
            user_id: "u".into(),
            username: "guest".into(),
            role_id: 3,
            exp: Some((now + Duration::seconds(20)).timestamp()),
        };
        assert!(!claims.is_expired_at(now, Duration::zero()));
        assert!(claims.is_expired_at(now, Duration::seconds(30)));
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(decode_claims("not-a-jwt"), Err(Error::Malformed));
        assert_eq!(decode_claims("a.b.c"), Err(Error::Malformed));
        assert_eq!(decode_claims("!!!.e30.c"), Err(Error::Malformed));

        let header = mint(serde_json::json!({})).split('.').next().unwrap().to_string();
        // "notjson"
        let token = format!("{header}.bm90anNvbg.sig");
        assert!(matches!(decode_claims(&token), Err(Error::InvalidClaims(_))));
    }

    #[test]
    fn test_signature_and_expiry_are_not_checked() {
        let expired = encode(
            &Header::default(),
            &serde_json::json!({"user_id": "u", "role_id": 2, "exp": 1_000}),
            &EncodingKey::from_secret(b"some-other-backend-secret-0123456789"),
        )
        .unwrap();

        let claims = decode_claims(&expired).unwrap();
        assert_eq!(claims.role(), Some(Role::Staff));
        assert!(claims.is_expired_at(Utc::now(), Duration::zero()));
    }
}
