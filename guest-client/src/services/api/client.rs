//! # API Client
//!
//! Request wrapper shared by every endpoint module.
//!
//! ## Request Contract
//!
//! - Authenticated requests carry `Authorization: Bearer <access token>`
//!   taken from the injected [`Session`].
//! - 2xx: the body is decoded into the caller's type. 204 and an empty body
//!   decode as JSON `null`; a 202 whose body is empty or not JSON does too.
//!   Callers expecting no content ask for `()` or `Option<T>`.
//! - 401 on an authenticated request: the refresh token is exchanged at
//!   `/auth/refresh` and the request is replayed exactly once. Without a
//!   refresh token this fails with [`ApiError::AuthRequired`] and no network
//!   call; a failed exchange clears the session and fails with
//!   [`ApiError::AuthExpired`].
//! - Concurrent 401s share one in-flight refresh. A request whose 401 comes
//!   back after the session already holds a newer access token is replayed
//!   with that token and does not refresh again.
//! - Any other non-2xx: [`ApiError::Http`] with the body's `message`
//!   (default `HTTP <status>`) and the parsed body as details.

use std::sync::Arc;
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::{ChecklistItem, ChecklistSchema, ChecklistSection, ErrorBody, RefreshRequest, RefreshResponse, Report, UpdateItemRequest, UpdateSectionRequest};

use super::transport::{HttpRequest, HttpResponse, Method, RequestBody, ReqwestTransport};
use crate::config::ClientConfig;
use crate::core::error::{ApiError, AppError};
use crate::core::service::{ApiService, Transport};
use crate::services::session::Session;

type RefreshFuture = Shared<BoxFuture<'static, Result<String, ApiError>>>;

/// HTTP client for the Secret Guest backend.
///
/// Cheap to clone; clones share the connection pool, the session and the
/// in-flight refresh.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: String,
    transport: Arc<dyn Transport>,
    session: Arc<Session>,
    refresh: Mutex<Option<RefreshFuture>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("session", &self.inner.session)
            .finish()
    }
}

impl ApiClient {
    /// Client over reqwest with the configured timeout.
    pub fn new(config: &ClientConfig, session: Arc<Session>) -> Result<Self, AppError> {
        let transport = ReqwestTransport::new(config.http_timeout)?;
        Ok(Self::with_transport(config.api_url.clone(), Arc::new(transport), session))
    }

    pub fn with_transport(base_url: impl Into<String>, transport: Arc<dyn Transport>, session: Arc<Session>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            inner: Arc::new(ClientInner {
                base_url,
                transport,
                session,
                refresh: Mutex::new(None),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.inner.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, auth: bool) -> Result<T, ApiError> {
        self.request(Method::GET, path, RequestBody::Empty, auth).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B, auth: bool) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, json_body(body)?, auth).await
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str, auth: bool) -> Result<T, ApiError> {
        self.request(Method::POST, path, RequestBody::Empty, auth).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B, auth: bool) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, json_body(body)?, auth).await
    }

    /// PATCH without a body.
    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str, auth: bool) -> Result<T, ApiError> {
        self.request(Method::PATCH, path, RequestBody::Empty, auth).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, auth: bool) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, RequestBody::Empty, auth).await
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        auth: bool,
    ) -> Result<T, ApiError> {
        let response = self.execute(method, path, body, auth).await?;
        decode_body(&response)
    }

    /// Send a request to an absolute URL outside the API (presigned uploads).
    ///
    /// No bearer token, no refresh; non-2xx still becomes [`ApiError::Http`].
    pub async fn send_external(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let start = Instant::now();
        let method = request.method.clone();
        let response = self.inner.transport.send(request).await?;
        let duration_ms = start.elapsed().as_millis() as u64;

        if response.is_success() {
            tracing::debug!(%method, status = response.status, duration_ms, "External request succeeded");
            Ok(response)
        } else {
            let err = error_from_response(&response);
            tracing::warn!(%method, status = response.status, duration_ms, error = %err, "External request failed");
            Err(err)
        }
    }

    /// Exchange the refresh token now, joining a refresh already in flight.
    pub async fn refresh_session(&self) -> Result<String, ApiError> {
        self.shared_refresh().await
    }

    async fn execute(&self, method: Method, path: &str, body: RequestBody, auth: bool) -> Result<HttpResponse, ApiError> {
        let start = Instant::now();
        let bearer = if auth { self.session().access_token() } else { None };

        let request = HttpRequest::new(method.clone(), self.url(path)).body(body);
        let mut response = self
            .inner
            .transport
            .send(request.clone().bearer(bearer.clone()))
            .await?;

        if response.status == 401 && auth {
            tracing::debug!(%method, path, "Access token rejected");
            let fresh = self.recover_unauthorized(bearer.as_deref()).await?;
            response = self.inner.transport.send(request.bearer(Some(fresh))).await?;
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        if response.is_success() {
            tracing::debug!(%method, path, status = response.status, duration_ms, "Request succeeded");
            return Ok(response);
        }

        let err = error_from_response(&response);
        if err.is_conflict() {
            tracing::debug!(%method, path, duration_ms, "Request conflicted");
        } else {
            tracing::warn!(%method, path, status = response.status, duration_ms, error = %err, "Request failed");
        }
        Err(err)
    }

    /// Access token to replay a rejected request with.
    async fn recover_unauthorized(&self, rejected: Option<&str>) -> Result<String, ApiError> {
        if let Some(current) = self.session().access_token() {
            if rejected != Some(current.as_str()) {
                tracing::debug!("Session already refreshed, replaying");
                return Ok(current);
            }
        }
        self.shared_refresh().await
    }

    fn shared_refresh(&self) -> RefreshFuture {
        let mut slot = self.inner.refresh.lock();
        if let Some(in_flight) = slot.as_ref() {
            return in_flight.clone();
        }

        // The stored future must not keep `ClientInner` alive.
        let owner = Arc::downgrade(&self.inner);
        let transport = self.inner.transport.clone();
        let session = self.inner.session.clone();
        let url = self.url("/auth/refresh");
        let refresh = async move {
            let result = exchange_refresh_token(transport.as_ref(), &session, url).await;
            if let Some(inner) = owner.upgrade() {
                *inner.refresh.lock() = None;
            }
            result
        }
        .boxed()
        .shared();

        *slot = Some(refresh.clone());
        refresh
    }
}

#[tracing::instrument(skip(transport, session))]
async fn exchange_refresh_token(transport: &dyn Transport, session: &Session, url: String) -> Result<String, ApiError> {
    let Some(refresh_token) = session.refresh_token() else {
        tracing::debug!("No refresh token, sign-in required");
        return Err(ApiError::AuthRequired);
    };

    let body = json_body(&RefreshRequest { refresh_token })?;
    let request = HttpRequest::new(Method::POST, url).body(body);

    let outcome = match transport.send(request).await {
        Ok(response) if response.is_success() => {
            serde_json::from_slice::<RefreshResponse>(&response.body).map_err(|e| e.to_string())
        }
        Ok(response) => Err(format!("HTTP {}", response.status)),
        Err(e) => Err(e.details().map(|d| d.to_string()).unwrap_or_else(|| e.to_string())),
    };

    match outcome {
        Ok(tokens) => {
            session.update_access(tokens.access_token.clone(), tokens.refresh_token);
            tracing::info!("Access token refreshed");
            Ok(tokens.access_token)
        }
        Err(reason) => {
            tracing::warn!(%reason, "Token refresh failed, clearing session");
            session.clear();
            Err(ApiError::AuthExpired)
        }
    }
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody, ApiError> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::decode(0, e))
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

pub(crate) fn decode_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    let status = response.status;
    let absent = || serde_json::from_value(Value::Null).map_err(|e| ApiError::decode(status, e));

    if status == 204 || is_blank(&response.body) {
        return absent();
    }
    if status == 202 {
        return match serde_json::from_slice::<Value>(&response.body) {
            Ok(value) => serde_json::from_value(value).map_err(|e| ApiError::decode(status, e)),
            Err(_) => absent(),
        };
    }
    serde_json::from_slice(&response.body).map_err(|e| ApiError::decode(status, e))
}

pub(crate) fn error_from_response(response: &HttpResponse) -> ApiError {
    let details: Option<Value> = serde_json::from_slice(&response.body).ok();
    let message = details
        .clone()
        .and_then(|d| serde_json::from_value::<ErrorBody>(d).ok())
        .and_then(|body| body.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", response.status));

    ApiError::Http {
        status: response.status,
        message,
        details,
    }
}

/// Append `params` as a query string. Repeated keys are kept in order.
pub fn with_query(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        query.append_pair(key, value);
    }
    format!("{}?{}", path, query.finish())
}

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn update_item(&self, id: i64, request: UpdateItemRequest) -> Result<ChecklistItem, ApiError> {
        super::checklist::update_item(self, id, &request).await
    }

    async fn update_section(&self, id: i64, request: UpdateSectionRequest) -> Result<ChecklistSection, ApiError> {
        super::checklist::update_section(self, id, &request).await
    }

    async fn save_draft(&self, report_id: &str, schema: ChecklistSchema) -> Result<Report, ApiError> {
        super::reports::save_draft(self, report_id, &schema).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_no_content_and_empty_bodies() {
        decode_body::<()>(&HttpResponse::new(204, Vec::new())).unwrap();

        let none: Option<ErrorBody> = decode_body(&HttpResponse::new(200, "  ")).unwrap();
        assert_eq!(none, None);

        let accepted: Option<Value> = decode_body(&HttpResponse::new(202, "accepted")).unwrap();
        assert_eq!(accepted, None);

        let accepted_json: Option<Value> = decode_body(&HttpResponse::new(202, r#"{"ok":true}"#)).unwrap();
        assert_eq!(accepted_json, Some(json!({"ok": true})));
    }

    #[test]
    fn test_decode_mismatch_is_decode_error() {
        let err = decode_body::<ErrorBody>(&HttpResponse::new(200, "[1,2]")).unwrap_err();
        assert_eq!(err.code(), Some("DECODE_ERROR"));
        assert_eq!(err.status(), 200);

        let err = decode_body::<ErrorBody>(&HttpResponse::new(200, "<html>")).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn test_error_message_from_body() {
        let err = error_from_response(&HttpResponse::json(400, &json!({"message": "title is required"})));
        assert_eq!(err.message(), "title is required");
        assert_eq!(err.status(), 400);
        assert_eq!(err.details(), Some(json!({"message": "title is required"})));

        let err = error_from_response(&HttpResponse::new(502, "Bad Gateway"));
        assert_eq!(err.message(), "HTTP 502");
        assert_eq!(err.details(), None);
    }

    #[test]
    fn test_with_query_repeats_keys() {
        assert_eq!(with_query("/staff/checklist_sections", &[]), "/staff/checklist_sections");
        let path = with_query(
            "/staff/checklist_sections",
            &[("id", "1".into()), ("id", "2".into()), ("slug", "room & bath".into())],
        );
        assert_eq!(path, "/staff/checklist_sections?id=1&id=2&slug=room+%26+bath");
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("abc-123"), "abc-123");
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
    }
}
