//! Polyglot API Server
//!
//! HTTP front end for the locale-aware message service.
//!
//! # Architecture
//!
//! The server is built on Axum and follows a layered architecture:
//!
//! - **Routes**: HTTP endpoint definitions
//! - **Middleware**: request-scoped locale resolution and the `lang`
//!   change interceptor
//! - **Resolver**: strategy-driven locale resolution over an explicit
//!   request context
//! - **polyglot-i18n**: message catalogs and fallback lookup

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod middleware;
pub mod resolver;
pub mod routes;
pub mod session;
pub mod shutdown;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use resolver::{LocaleResolver, RequestContext, ResolverStrategy};
pub use state::AppState;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

/// Server builder for constructing and running the API server.
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a new server with the given configuration.
    ///
    /// Loads the message bundle; a malformed or missing table is fatal
    /// here, before the listener is bound.
    pub fn new(config: ServerConfig) -> Result<Self, anyhow::Error> {
        let state = AppState::new(&config)?;
        Ok(Self { config, state })
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        routes::create_router(self.state.clone())
    }

    /// Run the server, binding to the configured address.
    pub async fn run(self) -> Result<(), anyhow::Error> {
        let addr = self.config.server.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;

        info!("Server listening on {}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown::shutdown_signal())
            .await?;

        Ok(())
    }
}
