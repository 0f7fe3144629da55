//! Configuration validation.

use super::types::ServerConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bind port is zero.
    #[error("Invalid port: {0}")]
    InvalidPort(u16),

    /// The default locale string does not parse.
    #[error("Invalid default locale: {0}")]
    InvalidDefaultLocale(String),

    /// The locale-change query parameter is empty.
    #[error("Locale change parameter must not be empty")]
    EmptyChangeParam,

    /// The locale cookie name is empty.
    #[error("Locale cookie name must not be empty")]
    EmptyCookieName,

    /// The greeting message code is empty.
    #[error("Greeting message code must not be empty")]
    EmptyGreetingCode,
}

/// Validate server configuration at startup.
pub fn validate_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::InvalidPort(0));
    }

    if config.locale.default_locale().is_none() {
        return Err(ConfigError::InvalidDefaultLocale(
            config.locale.default.clone(),
        ));
    }

    if config.locale.change_param.trim().is_empty() {
        return Err(ConfigError::EmptyChangeParam);
    }

    if config.locale.cookie_name.trim().is_empty() {
        return Err(ConfigError::EmptyCookieName);
    }

    if config.messages.greeting_code.trim().is_empty() {
        return Err(ConfigError::EmptyGreetingCode);
    }

    Ok(())
}
