//! Server configuration types.

use polyglot_i18n::Locale;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Main server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server binding configuration.
    #[serde(default)]
    pub server: BindConfig,
    /// Message bundle configuration.
    #[serde(default)]
    pub messages: MessagesConfig,
    /// Locale resolution configuration.
    #[serde(default)]
    pub locale: LocaleSettings,
}

/// Server binding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8091
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl BindConfig {
    /// The socket address to bind to.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// Message bundle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// Directory holding the `.properties` tables.
    #[serde(default = "default_messages_dir")]
    pub dir: PathBuf,
    /// Table base name.
    #[serde(default = "default_basename")]
    pub basename: String,
    /// Return the message code itself when no table carries it.
    #[serde(default = "default_true")]
    pub use_code_as_default_message: bool,
    /// The message code served by `GET /api/message`.
    #[serde(default = "default_greeting_code")]
    pub greeting_code: String,
}

fn default_messages_dir() -> PathBuf {
    PathBuf::from("messages")
}

fn default_basename() -> String {
    "messages".to_string()
}

fn default_true() -> bool {
    true
}

fn default_greeting_code() -> String {
    "welcome.message".to_string()
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            dir: default_messages_dir(),
            basename: default_basename(),
            use_code_as_default_message: default_true(),
            greeting_code: default_greeting_code(),
        }
    }
}

/// Locale resolution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleSettings {
    /// Default locale when nothing else applies.
    #[serde(default = "default_locale_tag")]
    pub default: String,
    /// Resolution strategy.
    #[serde(default)]
    pub strategy: StrategyKind,
    /// Query parameter that triggers a locale change.
    #[serde(default = "default_change_param")]
    pub change_param: String,
    /// Cookie name used by the cookie strategy.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_locale_tag() -> String {
    "en-US".to_string()
}

fn default_change_param() -> String {
    "lang".to_string()
}

fn default_cookie_name() -> String {
    "polyglot_locale".to_string()
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            default: default_locale_tag(),
            strategy: StrategyKind::default(),
            change_param: default_change_param(),
            cookie_name: default_cookie_name(),
        }
    }
}

impl LocaleSettings {
    /// Parse the configured default locale.
    pub fn default_locale(&self) -> Option<Locale> {
        Locale::parse(&self.default)
    }
}

/// Locale resolution strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Always the configured default locale.
    Fixed,
    /// The `Accept-Language` request header.
    AcceptHeader,
    /// A value stored in the server-side session.
    #[default]
    Session,
    /// A value stored in a client cookie.
    Cookie,
}
