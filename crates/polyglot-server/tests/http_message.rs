//! End-to-end tests driving the full router with in-process requests.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use polyglot_server::config::{ServerConfig, StrategyKind};
use polyglot_server::{routes, AppState};
use std::path::PathBuf;
use tower::ServiceExt;

fn test_config(strategy: StrategyKind) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.messages.dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("messages");
    config.locale.strategy = strategy;
    config
}

fn app(strategy: StrategyKind) -> Router {
    let config = test_config(strategy);
    routes::create_router(AppState::new(&config).expect("state should build"))
}

async fn get(app: &Router, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, Vec<String>, String) {
    let mut request = Request::builder().uri(uri);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    let response = app
        .clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let cookies = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, cookies, String::from_utf8(body.to_vec()).unwrap())
}

/// "name=value; Path=/" -> "name=value"
fn cookie_pair(set_cookie: &str) -> &str {
    set_cookie.split(';').next().unwrap().trim()
}

#[tokio::test]
async fn default_locale_when_nothing_present() {
    let app = app(StrategyKind::Session);
    let (status, cookies, body) = get(&app, "/api/message", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(cookies.is_empty());
    assert_eq!(body, "Greetings Mr Incognito");
}

#[tokio::test]
async fn accept_header_strategy_selects_translation() {
    let app = app(StrategyKind::AcceptHeader);

    let (status, _, body) = get(
        &app,
        "/api/message?username=Alice",
        &[("accept-language", "fr")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Bonjour Alice");

    let (_, _, body) = get(
        &app,
        "/api/message?username=Alice",
        &[("accept-language", "de-DE,de;q=0.9,en;q=0.5")],
    )
    .await;
    assert_eq!(body, "Hallo Alice");

    // Malformed header falls through to the default locale
    let (_, _, body) = get(
        &app,
        "/api/message",
        &[("accept-language", "!!not-a-locale!!")],
    )
    .await;
    assert_eq!(body, "Greetings Mr Incognito");
}

#[tokio::test]
async fn lang_param_persists_across_session() {
    let app = app(StrategyKind::Session);

    // The change request itself already answers in French and mints a
    // session cookie.
    let (status, cookies, body) = get(&app, "/api/message?lang=fr&username=Alice", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Bonjour Alice");
    assert_eq!(cookies.len(), 1);
    let session_cookie = cookie_pair(&cookies[0]).to_string();
    assert!(session_cookie.starts_with("polyglot_session="));

    // Subsequent requests on the same session stay French.
    let (_, cookies, body) = get(&app, "/api/message", &[("cookie", &session_cookie)]).await;
    assert!(cookies.is_empty());
    assert_eq!(body, "Bonjour Mr Incognito");

    // Until changed again.
    let (_, _, body) = get(
        &app,
        "/api/message?lang=de",
        &[("cookie", &session_cookie)],
    )
    .await;
    assert_eq!(body, "Hallo Mr Incognito");

    let (_, _, body) = get(&app, "/api/message", &[("cookie", &session_cookie)]).await;
    assert_eq!(body, "Hallo Mr Incognito");
}

#[tokio::test]
async fn invalid_lang_param_is_ignored() {
    let app = app(StrategyKind::Session);
    let (status, cookies, body) = get(&app, "/api/message?lang=klingon-empire", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(cookies.is_empty());
    assert_eq!(body, "Greetings Mr Incognito");
}

#[tokio::test]
async fn cookie_strategy_round_trip() {
    let app = app(StrategyKind::Cookie);

    let (_, cookies, body) = get(&app, "/api/message?lang=fr", &[]).await;
    assert_eq!(body, "Bonjour Mr Incognito");
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookie_pair(&cookies[0]), "polyglot_locale=fr");

    let (_, _, body) = get(
        &app,
        "/api/message",
        &[("cookie", "polyglot_locale=de")],
    )
    .await;
    assert_eq!(body, "Hallo Mr Incognito");

    // A tampered cookie value falls back to the default locale
    let (_, _, body) = get(
        &app,
        "/api/message",
        &[("cookie", "polyglot_locale=garbage!!")],
    )
    .await;
    assert_eq!(body, "Greetings Mr Incognito");
}

#[tokio::test]
async fn configured_greeting_code_serves_other_messages() {
    let mut config = test_config(StrategyKind::AcceptHeader);
    config.messages.greeting_code = "greeting.text".to_string();
    let app = routes::create_router(AppState::new(&config).unwrap());

    let (_, _, body) = get(&app, "/api/message", &[("accept-language", "en-US")]).await;
    assert_eq!(body, "Hi Welcome to I18n");

    let (_, _, body) = get(&app, "/api/message", &[("accept-language", "fr-FR")]).await;
    assert_eq!(body, "Salut Bienvenue sur i18n");

    let (_, _, body) = get(&app, "/api/message", &[("accept-language", "pl-PL")]).await;
    assert_eq!(body, "Witamy w I18n");
}

#[tokio::test]
async fn unknown_code_without_fallback_is_404() {
    let mut config = test_config(StrategyKind::Session);
    config.messages.greeting_code = "does.not.exist".to_string();
    config.messages.use_code_as_default_message = false;
    let app = routes::create_router(AppState::new(&config).unwrap());

    let (status, _, body) = get(&app, "/api/message", &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("message_not_found"));
}

#[tokio::test]
async fn unknown_code_with_fallback_returns_code() {
    let mut config = test_config(StrategyKind::Session);
    config.messages.greeting_code = "does.not.exist".to_string();
    let app = routes::create_router(AppState::new(&config).unwrap());

    let (status, _, body) = get(&app, "/api/message", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "does.not.exist");
}

#[tokio::test]
async fn health_endpoint() {
    let app = app(StrategyKind::Session);
    let (status, _, body) = get(&app, "/internal/health", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"status\":\"ok\""));
}

#[tokio::test]
async fn unmatched_route_is_json_404() {
    let app = app(StrategyKind::Session);
    let (status, _, body) = get(&app, "/nope", &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("not_found"));
}

#[tokio::test]
async fn startup_fails_on_malformed_bundle() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("messages.properties"),
        "greeting.text=ok\nthis line is broken\n",
    )
    .unwrap();

    let mut config = ServerConfig::default();
    config.messages.dir = dir.path().to_path_buf();
    assert!(AppState::new(&config).is_err());
}

#[tokio::test]
async fn startup_fails_without_default_table() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ServerConfig::default();
    config.messages.dir = dir.path().to_path_buf();
    assert!(AppState::new(&config).is_err());
}
