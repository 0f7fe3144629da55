//! Route configuration for the Polyglot API server.

mod api;
mod internal;

use crate::middleware::LocaleLayer;
use crate::state::AppState;
use axum::{http::StatusCode, response::IntoResponse, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    // Common middleware stack applied to all routes
    let common_middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.server.request_timeout_secs,
        )));

    let locale_layer = LocaleLayer::new(
        state.resolver.clone(),
        state.sessions.clone(),
        state.config.locale.change_param.clone(),
    );

    Router::new()
        // API routes
        .nest("/api", api::router())
        // Internal routes (health)
        .nest("/internal", internal::router())
        // Fallback for unmatched routes
        .fallback(fallback_handler)
        // Locale resolution wraps every route
        .layer(locale_layer)
        // Apply common middleware
        .layer(common_middleware)
        // Attach state
        .with_state(state)
}

async fn fallback_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({
            "error": "not_found",
            "message": "The requested resource was not found"
        })),
    )
}
