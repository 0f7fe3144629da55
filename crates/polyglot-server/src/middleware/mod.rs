//! Middleware for the Polyglot API server.

pub mod locale;

pub use locale::{LocaleLayer, LocaleMiddleware, ResolvedLocale};
