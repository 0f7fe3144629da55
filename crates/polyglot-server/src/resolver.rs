//! Strategy-driven locale resolution.
//!
//! The active strategy is a tagged variant selected once at startup.
//! Resolution operates on an explicit [`RequestContext`] built per
//! request by the middleware; there is no ambient locale state.

use crate::session::{SessionStore, SESSION_COOKIE};
use polyglot_i18n::Locale;
use std::cmp::Ordering;
use tracing::debug;

/// Where the effective locale comes from.
#[derive(Debug, Clone)]
pub enum ResolverStrategy {
    /// Always the given locale. Persistence is a no-op.
    Fixed(Locale),
    /// The request's `Accept-Language` header. Persistence is a no-op.
    AcceptHeader,
    /// A locale stored in the server-side session.
    Session,
    /// A locale stored in a client cookie.
    Cookie,
}

/// Resolves the effective locale for a request and persists changes.
///
/// Never fails: malformed or absent locale sources fall through to the
/// configured default.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    strategy: ResolverStrategy,
    default_locale: Locale,
    cookie_name: String,
}

impl LocaleResolver {
    /// Create a resolver.
    pub fn new(
        strategy: ResolverStrategy,
        default_locale: Locale,
        cookie_name: impl Into<String>,
    ) -> Self {
        Self {
            strategy,
            default_locale,
            cookie_name: cookie_name.into(),
        }
    }

    /// The configured default locale.
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Name of the cookie used by the cookie strategy.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Determine the effective locale for the request.
    pub fn resolve(&self, ctx: &RequestContext) -> Locale {
        let found = match &self.strategy {
            ResolverStrategy::Fixed(locale) => Some(locale.clone()),
            ResolverStrategy::AcceptHeader => {
                ctx.accept_language().and_then(parse_accept_language)
            }
            ResolverStrategy::Session => ctx.session_locale(),
            ResolverStrategy::Cookie => ctx.cookie_locale().and_then(Locale::parse),
        };

        found.unwrap_or_else(|| self.default_locale.clone())
    }

    /// Persist a locale change into the strategy's backing store.
    ///
    /// Session and cookie strategies persist; fixed and header
    /// strategies have nothing to write to.
    pub fn set_locale(&self, ctx: &mut RequestContext, locale: Locale) {
        match &self.strategy {
            ResolverStrategy::Session => ctx.persist_session(locale),
            ResolverStrategy::Cookie => ctx.persist_cookie(&self.cookie_name, locale),
            ResolverStrategy::Fixed(_) | ResolverStrategy::AcceptHeader => {
                debug!(locale = %locale, "Locale change ignored by non-persistent strategy");
            }
        }
    }
}

/// Per-request locale state, passed explicitly through the call chain.
///
/// Carries the request-side snapshot (header, cookie, session id) and
/// collects the cookies the response must set.
pub struct RequestContext {
    accept_language: Option<String>,
    cookie_locale: Option<String>,
    session_id: Option<String>,
    sessions: SessionStore,
    pending: Vec<PendingCookie>,
}

/// A cookie the response must set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
}

impl RequestContext {
    /// Start a context over the shared session store.
    pub fn new(sessions: SessionStore) -> Self {
        Self {
            accept_language: None,
            cookie_locale: None,
            session_id: None,
            sessions,
            pending: Vec::new(),
        }
    }

    /// Attach the raw `Accept-Language` header value.
    pub fn with_accept_language(mut self, value: Option<String>) -> Self {
        self.accept_language = value;
        self
    }

    /// Attach the raw locale cookie value.
    pub fn with_cookie_locale(mut self, value: Option<String>) -> Self {
        self.cookie_locale = value;
        self
    }

    /// Attach the session id from the session cookie.
    pub fn with_session_id(mut self, value: Option<String>) -> Self {
        self.session_id = value;
        self
    }

    fn accept_language(&self) -> Option<&str> {
        self.accept_language.as_deref()
    }

    fn cookie_locale(&self) -> Option<&str> {
        self.cookie_locale.as_deref()
    }

    /// Locale stored in this request's session, if any.
    fn session_locale(&self) -> Option<Locale> {
        self.session_id
            .as_deref()
            .and_then(|id| self.sessions.get(id))
    }

    /// Store the locale in the session, minting a session on first use.
    fn persist_session(&mut self, locale: Locale) {
        let id = match &self.session_id {
            Some(id) => id.clone(),
            None => {
                let id = self.sessions.create_id();
                self.pending.push(PendingCookie {
                    name: SESSION_COOKIE.to_string(),
                    value: id.clone(),
                });
                self.session_id = Some(id.clone());
                id
            }
        };
        self.sessions.set(id, locale);
    }

    /// Mark a locale cookie write; visible to `resolve` within the
    /// same request.
    fn persist_cookie(&mut self, cookie_name: &str, locale: Locale) {
        self.cookie_locale = Some(locale.to_string());
        self.pending.push(PendingCookie {
            name: cookie_name.to_string(),
            value: locale.to_string(),
        });
    }

    /// Cookies the response must set.
    pub fn pending_cookies(&self) -> &[PendingCookie] {
        &self.pending
    }
}

/// Pick the best parseable locale from an `Accept-Language` header.
///
/// Entries are weighted by `q=`, malformed tags and `*` are skipped.
fn parse_accept_language(header: &str) -> Option<Locale> {
    let mut candidates: Vec<(f32, Locale)> = Vec::new();

    for entry in header.split(',') {
        let mut parts = entry.split(';');
        let tag = parts.next().unwrap_or("").trim();

        let mut quality = 1.0f32;
        for param in parts {
            if let Some(value) = param.trim().strip_prefix("q=") {
                match value.parse::<f32>() {
                    Ok(q) => quality = q,
                    Err(_) => quality = 0.0,
                }
            }
        }

        if quality <= 0.0 {
            continue;
        }
        if let Some(locale) = Locale::parse(tag) {
            candidates.push((quality, locale));
        }
    }

    // Stable sort keeps header order among equal weights.
    candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    candidates.into_iter().next().map(|(_, locale)| locale)
}
