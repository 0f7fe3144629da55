//! Locale resolution middleware.
//!
//! Runs before every route: builds the per-request
//! [`RequestContext`], applies a valid `lang` query parameter through
//! [`LocaleResolver::set_locale`], stores the resolved locale as a
//! request extension, and appends any pending `Set-Cookie` headers to
//! the response.

use crate::resolver::{LocaleResolver, RequestContext};
use crate::session::{SessionStore, SESSION_COOKIE};
use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use futures::future::BoxFuture;
use polyglot_i18n::Locale;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug, info};

/// The locale resolved for the current request.
///
/// Inserted as a request extension; handlers extract it with
/// `Extension<ResolvedLocale>`.
#[derive(Debug, Clone)]
pub struct ResolvedLocale(pub Locale);

/// Locale resolution layer.
#[derive(Clone)]
pub struct LocaleLayer {
    resolver: Arc<LocaleResolver>,
    sessions: SessionStore,
    change_param: String,
}

impl LocaleLayer {
    /// Create the layer.
    pub fn new(
        resolver: Arc<LocaleResolver>,
        sessions: SessionStore,
        change_param: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            sessions,
            change_param: change_param.into(),
        }
    }
}

impl<S> Layer<S> for LocaleLayer {
    type Service = LocaleMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LocaleMiddleware {
            inner,
            resolver: self.resolver.clone(),
            sessions: self.sessions.clone(),
            change_param: self.change_param.clone(),
        }
    }
}

/// Locale resolution middleware service.
#[derive(Clone)]
pub struct LocaleMiddleware<S> {
    inner: S,
    resolver: Arc<LocaleResolver>,
    sessions: SessionStore,
    change_param: String,
}

impl<S> Service<Request> for LocaleMiddleware<S>
where
    S: Service<Request, Response = Response<Body>, Error = std::convert::Infallible>
        + Clone
        + Send
        + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let resolver = self.resolver.clone();
        let sessions = self.sessions.clone();
        let change_param = self.change_param.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let jar = CookieJar::from_headers(req.headers());
            let accept_language = req
                .headers()
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            let session_id = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
            let cookie_locale = jar
                .get(resolver.cookie_name())
                .map(|c| c.value().to_string());

            let mut ctx = RequestContext::new(sessions)
                .with_accept_language(accept_language)
                .with_cookie_locale(cookie_locale)
                .with_session_id(session_id);

            // Locale-change interceptor: a valid `lang` value persists
            // before the request is dispatched; invalid values fall
            // through silently.
            if let Some(requested) = query_param(req.uri().query(), &change_param) {
                match Locale::parse(&requested) {
                    Some(locale) => {
                        info!(locale = %locale, "Locale change requested via query parameter");
                        resolver.set_locale(&mut ctx, locale);
                    }
                    None => {
                        debug!(value = %requested, "Ignoring unparseable locale change");
                    }
                }
            }

            let locale = resolver.resolve(&ctx);
            req.extensions_mut().insert(ResolvedLocale(locale));

            let mut response = inner.call(req).await?;

            for pending in ctx.pending_cookies() {
                let cookie = Cookie::build((pending.name.clone(), pending.value.clone()))
                    .path("/")
                    .build();
                if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
                    response.headers_mut().append(header::SET_COOKIE, value);
                }
            }

            Ok(response)
        })
    }
}

/// First value of a query parameter, percent-decoded.
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
