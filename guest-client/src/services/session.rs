//! # Session
//!
//! The token pair for the signed-in user, shared by every request issued
//! through one [`ApiClient`](crate::services::api::ApiClient).
//!
//! Reads are synchronous snapshots; the lock is never held across an
//! `.await`. Every change is written through to the configured
//! [`TokenStore`]. A store failure is logged and the in-memory state stays
//! authoritative for the rest of the process.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Duration;
use lib_auth::{decode_claims, Claims, Role};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::core::error::{AppError, Result};
use crate::core::service::TokenStore;

/// Tokens the backend issued. Either may be absent independently.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl SessionTokens {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

impl std::fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokens")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

pub struct Session {
    tokens: RwLock<SessionTokens>,
    store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("tokens", &*self.tokens.read()).finish()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl Session {
    /// Session with nothing persisted beyond the process.
    pub fn in_memory() -> Self {
        Self {
            tokens: RwLock::new(SessionTokens::default()),
            store: Arc::new(MemoryTokenStore::default()),
        }
    }

    /// Restore whatever `store` holds.
    pub fn load(store: Arc<dyn TokenStore>) -> Result<Self> {
        let tokens = store.load()?;
        tracing::debug!(
            has_access = tokens.access_token.is_some(),
            has_refresh = tokens.refresh_token.is_some(),
            "Session restored"
        );
        Ok(Self {
            tokens: RwLock::new(tokens),
            store,
        })
    }

    pub fn tokens(&self) -> SessionTokens {
        self.tokens.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.tokens.read().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.tokens.read().refresh_token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.read().access_token.is_some()
    }

    /// Replace both tokens, as after a login.
    pub fn store(&self, tokens: SessionTokens) {
        *self.tokens.write() = tokens;
        self.persist();
    }

    /// Install a refreshed access token. The refresh token is only replaced
    /// when the backend rotated it.
    pub fn update_access(&self, access_token: String, refresh_token: Option<String>) {
        {
            let mut tokens = self.tokens.write();
            tokens.access_token = Some(access_token);
            if let Some(refresh) = refresh_token {
                tokens.refresh_token = Some(refresh);
            }
        }
        self.persist();
    }

    pub fn clear(&self) {
        *self.tokens.write() = SessionTokens::default();
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear persisted session");
        }
    }

    /// Claims of the current access token, read without verification.
    pub fn claims(&self) -> Option<Claims> {
        let token = self.access_token()?;
        match decode_claims(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(error = %e, "Access token claims unreadable");
                None
            }
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.claims().and_then(|c| c.role())
    }

    /// True when the access token expires within `leeway`. Unknown expiry counts as fresh.
    pub fn access_expires_within(&self, leeway: Duration) -> bool {
        self.claims()
            .is_some_and(|c| c.is_expired_at(lib_utils::now_utc(), leeway))
    }

    fn persist(&self) {
        let snapshot = self.tokens();
        if let Err(e) = self.store.save(&snapshot) {
            tracing::warn!(error = %e, "Failed to persist session");
        }
    }
}

/// Keeps the last saved tokens in memory. Useful as a default and in tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    saved: Mutex<SessionTokens>,
}

impl MemoryTokenStore {
    pub fn with_tokens(tokens: SessionTokens) -> Self {
        Self {
            saved: Mutex::new(tokens),
        }
    }

    pub fn saved(&self) -> SessionTokens {
        self.saved.lock().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<SessionTokens> {
        Ok(self.saved.lock().clone())
    }

    fn save(&self, tokens: &SessionTokens) -> Result<()> {
        *self.saved.lock() = tokens.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.saved.lock() = SessionTokens::default();
        Ok(())
    }
}

/// Stores the token pair as a small JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/secret-guest/session.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("secret-guest").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<SessionTokens> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(SessionTokens::default()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(SessionTokens::default());
        }
        serde_json::from_str(&raw)
            .map_err(|e| AppError::Storage(format!("session file {} is corrupt: {e}", self.path.display())))
    }

    fn save(&self, tokens: &SessionTokens) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(tokens).map_err(|e| AppError::Storage(e.to_string()))?;
        // Readers never observe a partially written file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_access_keeps_refresh_unless_rotated() {
        let session = Session::in_memory();
        session.store(SessionTokens::new("a1", "r1"));

        session.update_access("a2".into(), None);
        assert_eq!(session.access_token().as_deref(), Some("a2"));
        assert_eq!(session.refresh_token().as_deref(), Some("r1"));

        session.update_access("a3".into(), Some("r2".into()));
        assert_eq!(session.refresh_token().as_deref(), Some("r2"));
    }

    #[test]
    fn test_changes_are_written_through() {
        let store = Arc::new(MemoryTokenStore::default());
        let session = Session::load(store.clone()).unwrap();
        assert!(!session.is_authenticated());

        session.store(SessionTokens::new("a1", "r1"));
        assert_eq!(store.saved(), SessionTokens::new("a1", "r1"));

        session.clear();
        assert!(store.saved().is_empty());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_file_store_roundtrip_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("session.json"));

        assert!(store.load().unwrap().is_empty());

        store.save(&SessionTokens::new("a1", "r1")).unwrap();
        assert_eq!(store.load().unwrap(), SessionTokens::new("a1", "r1"));

        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        let err = FileTokenStore::new(&path).load().unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[test]
    fn test_debug_never_prints_tokens() {
        let session = Session::in_memory();
        session.store(SessionTokens::new("very-secret", "also-secret"));
        let printed = format!("{session:?}");
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn test_role_and_expiry_from_access_token() {
        use jsonwebtoken::{encode, EncodingKey, Header};

        let exp = (lib_utils::now_utc() + Duration::seconds(20)).timestamp();
        let payload = serde_json::json!({"user_id": "u-1", "username": "staff", "role_id": 2, "exp": exp});
        let token = encode(&Header::default(), &payload, &EncodingKey::from_secret(b"session-test-secret")).unwrap();

        let session = Session::in_memory();
        session.store(SessionTokens::new(token, "r"));
        assert_eq!(session.role(), Some(Role::Staff));
        assert_eq!(session.claims().map(|c| c.username).as_deref(), Some("staff"));
        assert!(!session.access_expires_within(Duration::zero()));
        assert!(session.access_expires_within(Duration::seconds(60)));
    }

    #[test]
    fn test_role_from_garbage_token_is_none() {
        let session = Session::in_memory();
        session.store(SessionTokens::new("not-a-jwt", "r"));
        assert_eq!(session.role(), None);
        assert!(!session.access_expires_within(Duration::seconds(30)));
    }
}
