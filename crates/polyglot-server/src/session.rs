//! In-memory session storage for locale persistence.

use dashmap::DashMap;
use polyglot_i18n::Locale;
use std::sync::Arc;
use uuid::Uuid;

/// Cookie carrying the session identifier.
pub const SESSION_COOKIE: &str = "polyglot_session";

/// Shared session-id -> locale store.
///
/// Sessions are created lazily on the first locale write; reads of an
/// unknown id simply miss. Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<DashMap<String, Locale>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locale stored for a session, if any.
    pub fn get(&self, session_id: &str) -> Option<Locale> {
        self.inner.get(session_id).map(|entry| entry.clone())
    }

    /// Store a locale for a session.
    pub fn set(&self, session_id: impl Into<String>, locale: Locale) {
        self.inner.insert(session_id.into(), locale);
    }

    /// Mint a fresh session id.
    pub fn create_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no sessions exist.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
