//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use polyglot_i18n::MessageError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error enum covering all error cases.
#[derive(Debug, Error)]
pub enum ApiError {
    // 400 Bad Request
    /// Malformed client input.
    #[error("Bad request: {0}")]
    BadRequest(String),

    // 404 Not Found
    /// No table carries the requested message code.
    #[error("Message '{code}' not found for locale {locale}")]
    MessageNotFound {
        /// The message code looked up.
        code: String,
        /// The locale the lookup ran under.
        locale: String,
    },

    // 500 Internal Server Error
    /// Unexpected failure; details are logged, not leaked.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MessageNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for client handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::MessageNotFound { .. } => "message_not_found",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl From<MessageError> for ApiError {
    fn from(err: MessageError) -> Self {
        match err {
            MessageError::NotFound { code, locale } => Self::MessageNotFound {
                code,
                locale: locale.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            error!(error = ?self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.error_code(),
                "message": message,
            })),
        )
            .into_response()
    }
}
