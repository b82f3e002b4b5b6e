//! # Authentication Endpoints
//!
//! Registration and the token lifecycle. `login` and `refresh` write the
//! issued tokens into the client's session; `logout` only forgets them
//! locally, the backend keeps no server-side session.

use shared::{RefreshRequest, RefreshResponse, RegisterRequest, RegisterResponse, TokenRequest, TokenResponse, ValidateResponse};

use super::client::ApiClient;
use crate::core::error::{ApiError, AppError};
use crate::services::session::SessionTokens;
use crate::utils::validation;

/// Check a registration form before it is sent.
pub fn validate_registration(request: &RegisterRequest) -> Result<(), AppError> {
    let checks = [
        validation::validate_username(&request.username),
        validation::validate_email(&request.email),
        validation::validate_password(&request.password),
    ];
    match checks.into_iter().find_map(|c| c.error) {
        Some(message) => Err(AppError::Validation(message)),
        None => Ok(()),
    }
}

/// Create an account. Does not sign in.
#[tracing::instrument(skip(client, request), fields(username = %request.username))]
pub async fn register(client: &ApiClient, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
    let response = client.post("/auth/register", request, false).await?;
    tracing::info!("Registration accepted");
    Ok(response)
}

/// Password grant. The issued pair replaces whatever the session held.
#[tracing::instrument(skip(client, password))]
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let request = TokenRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    let tokens: TokenResponse = client.post("/auth/token", &request, false).await?;

    client
        .session()
        .store(SessionTokens::new(tokens.access_token.clone(), tokens.refresh_token.clone()));

    tracing::info!(duration_ms = start.elapsed().as_millis() as u64, "Login successful");
    Ok(tokens)
}

/// Identity behind the current access token, as the backend sees it.
#[tracing::instrument(skip(client))]
pub async fn validate(client: &ApiClient) -> Result<ValidateResponse, ApiError> {
    client.post("/auth/validate", &serde_json::json!({}), true).await
}

/// Explicit refresh with a caller-supplied refresh token.
///
/// Requests recover from an expired access token on their own; this is for
/// callers that hold a refresh token from elsewhere.
#[tracing::instrument(skip(client, refresh_token))]
pub async fn refresh(client: &ApiClient, refresh_token: &str) -> Result<RefreshResponse, ApiError> {
    let request = RefreshRequest {
        refresh_token: refresh_token.to_string(),
    };
    let tokens: RefreshResponse = client.post("/auth/refresh", &request, false).await?;

    let rotated = tokens.refresh_token.clone().or_else(|| Some(refresh_token.to_string()));
    client.session().update_access(tokens.access_token.clone(), rotated);
    Ok(tokens)
}

pub fn logout(client: &ApiClient) {
    client.session().clear();
    tracing::info!("Logged out");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            phone: None,
            telegram: None,
        }
    }

    #[test]
    fn test_validate_registration() {
        assert!(validate_registration(&form("guest_01", "guest@example.com", "SecurePass123")).is_ok());

        let err = validate_registration(&form("g", "guest@example.com", "SecurePass123")).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "Минимум 3 символа"));

        assert!(validate_registration(&form("guest_01", "guest", "SecurePass123")).is_err());
        assert!(validate_registration(&form("guest_01", "guest@example.com", "")).is_err());
    }
}
