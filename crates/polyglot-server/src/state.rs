//! Shared application state.

use crate::config::{ServerConfig, StrategyKind};
use crate::resolver::{LocaleResolver, ResolverStrategy};
use crate::session::SessionStore;
use anyhow::Context;
use polyglot_i18n::{load_bundle, BundleConfig, MessageSource};
use std::sync::Arc;
use tracing::info;

/// State shared by all request handlers.
///
/// Everything here is either immutable (`config`, `messages`,
/// `resolver`) or internally synchronized (`sessions`), so clones are
/// cheap and lock-free on the read path.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Loaded message catalogs.
    pub messages: Arc<MessageSource>,
    /// The active locale resolution strategy.
    pub resolver: Arc<LocaleResolver>,
    /// Session-id -> locale store.
    pub sessions: SessionStore,
}

impl AppState {
    /// Build the state: load the bundle and wire the resolver.
    ///
    /// A missing default table or malformed line aborts startup here.
    pub fn new(config: &ServerConfig) -> Result<Self, anyhow::Error> {
        let default_locale = config.locale.default_locale().with_context(|| {
            format!("invalid default locale '{}'", config.locale.default)
        })?;

        let bundle = load_bundle(&BundleConfig {
            dir: config.messages.dir.clone(),
            basename: config.messages.basename.clone(),
        })
        .context("failed to load message bundle")?;
        info!(
            locales = bundle.tables.len(),
            default_entries = bundle.default_table.len(),
            "Message bundle loaded"
        );

        let messages = MessageSource::new(
            bundle,
            default_locale.clone(),
            config.messages.use_code_as_default_message,
        );

        let strategy = match config.locale.strategy {
            StrategyKind::Fixed => ResolverStrategy::Fixed(default_locale.clone()),
            StrategyKind::AcceptHeader => ResolverStrategy::AcceptHeader,
            StrategyKind::Session => ResolverStrategy::Session,
            StrategyKind::Cookie => ResolverStrategy::Cookie,
        };
        let resolver = LocaleResolver::new(
            strategy,
            default_locale,
            config.locale.cookie_name.clone(),
        );

        Ok(Self {
            config: Arc::new(config.clone()),
            messages: Arc::new(messages),
            resolver: Arc::new(resolver),
            sessions: SessionStore::new(),
        })
    }
}
