//! # Common Error Types
//!
//! Two layers of errors:
//!
//! - [`ApiError`]: one failed backend call. Every request failure, whatever
//!   its cause, becomes exactly one of these, carrying a message, an HTTP
//!   status (`0` for network failures), an optional machine code and the raw
//!   error payload.
//! - [`AppError`]: application-level failures around the API (input
//!   validation, configuration, local state, session persistence).
//!
//! ## Error Codes
//!
//! | Variant        | `status()` | `code()`        |
//! |----------------|-----------:|-----------------|
//! | `Network`      | 0          | `NETWORK_ERROR` |
//! | `AuthRequired` | 401        | `AUTH_REQUIRED` |
//! | `AuthExpired`  | 401        | `AUTH_EXPIRED`  |
//! | `Http`         | response   | none            |
//! | `Decode`       | response   | `DECODE_ERROR`  |
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use guest_client::core::error::ApiError;
//!
//! fn describe(err: &ApiError) -> String {
//!     if err.is_conflict() {
//!         return "someone else was faster".to_string();
//!     }
//!     err.user_message()
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

pub const AUTH_REQUIRED_MESSAGE: &str = "Необходима авторизация";
pub const AUTH_EXPIRED_MESSAGE: &str = "Сессия истекла. Пожалуйста, войдите в систему заново";
pub const NETWORK_MESSAGE: &str = "Ошибка сети. Проверьте подключение к интернету";

/// Statuses that describe the request itself; repeating it cannot help.
const NON_RETRYABLE_STATUSES: [u16; 6] = [400, 401, 403, 404, 409, 422];

/// A failed backend call.
///
/// Cloneable so a single refresh failure can be handed to every request
/// that was waiting on it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, connect, TLS, timeout).
    #[error("{}", NETWORK_MESSAGE)]
    Network { cause: String },

    /// 401 on an authenticated request and no refresh token to recover with.
    #[error("{}", AUTH_REQUIRED_MESSAGE)]
    AuthRequired,

    /// 401 and the refresh exchange failed; the session has been cleared.
    #[error("{}", AUTH_EXPIRED_MESSAGE)]
    AuthExpired,

    /// Any other non-2xx response.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    /// A response or payload that does not match the expected shape.
    #[error("failed to decode response: {message}")]
    Decode { status: u16, message: String },
}

impl ApiError {
    pub fn network(cause: impl std::fmt::Display) -> Self {
        ApiError::Network {
            cause: cause.to_string(),
        }
    }

    pub fn decode(status: u16, cause: impl std::fmt::Display) -> Self {
        ApiError::Decode {
            status,
            message: cause.to_string(),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> u16 {
        match self {
            ApiError::Network { .. } => 0,
            ApiError::AuthRequired | ApiError::AuthExpired => 401,
            ApiError::Http { status, .. } | ApiError::Decode { status, .. } => *status,
        }
    }

    pub fn code(&self) -> Option<&'static str> {
        match self {
            ApiError::Network { .. } => Some("NETWORK_ERROR"),
            ApiError::AuthRequired => Some("AUTH_REQUIRED"),
            ApiError::AuthExpired => Some("AUTH_EXPIRED"),
            ApiError::Http { .. } => None,
            ApiError::Decode { .. } => Some("DECODE_ERROR"),
        }
    }

    /// Raw error payload for HTTP errors, the transport cause for network errors.
    pub fn details(&self) -> Option<Value> {
        match self {
            ApiError::Http { details, .. } => details.clone(),
            ApiError::Network { cause } => Some(Value::String(cause.clone())),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Http { status: 409, .. })
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::AuthRequired | ApiError::AuthExpired)
            || matches!(self, ApiError::Http { status: 401, .. })
    }

    /// Transient by nature: network failures, 5xx and 429.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network { .. } => true,
            ApiError::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Whether [`with_retry`](crate::services::api::retry::with_retry) may try again.
    ///
    /// Broader than [`is_retryable`](Self::is_retryable): only statuses that
    /// describe the request itself stop the loop.
    pub fn allows_retry(&self) -> bool {
        match self {
            ApiError::Decode { .. } | ApiError::AuthRequired | ApiError::AuthExpired => false,
            other => !NON_RETRYABLE_STATUSES.contains(&other.status()),
        }
    }

    /// Text to show an end user, in the product language.
    pub fn user_message(&self) -> String {
        if matches!(self, ApiError::Network { .. }) {
            return "Проверьте подключение к интернету и попробуйте снова".to_string();
        }
        match self.status() {
            401 => AUTH_EXPIRED_MESSAGE.to_string(),
            403 => "У вас нет прав для выполнения этого действия".to_string(),
            404 => "Запрашиваемый ресурс не найден".to_string(),
            409 => "Задание уже было принято или отклонено".to_string(),
            422 => "Проверьте правильность введенных данных".to_string(),
            s if s >= 500 => "Сервер временно недоступен. Попробуйте позже".to_string(),
            _ => self.message(),
        }
    }
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Input rejected before it reached the backend.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Environment or settings are unusable.
    #[error("Config error: {0}")]
    Config(String),

    /// Local state is not what the operation needs (not logged in, worker stopped).
    #[error("State error: {0}")]
    State(String),

    /// Session file could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}
