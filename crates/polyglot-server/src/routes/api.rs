//! Public message API.

use crate::error::ApiResult;
use crate::middleware::ResolvedLocale;
use crate::state::AppState;
use axum::{
    extract::{Extension, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::info;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/message", get(get_message))
}

#[derive(Debug, Deserialize)]
struct MessageQuery {
    #[serde(default = "default_username")]
    username: String,
}

fn default_username() -> String {
    "Mr Incognito".to_string()
}

/// `GET /api/message?username=<s>` — the localized greeting.
///
/// The locale was resolved by the middleware; the message code served
/// here is the configured `messages.greeting_code`.
async fn get_message(
    State(state): State<AppState>,
    Extension(ResolvedLocale(locale)): Extension<ResolvedLocale>,
    Query(query): Query<MessageQuery>,
) -> ApiResult<String> {
    info!(locale = %locale, "Returning greetings for locale");

    let message = state.messages.get_message(
        &state.config.messages.greeting_code,
        &[&query.username],
        &locale,
    )?;

    Ok(message)
}
