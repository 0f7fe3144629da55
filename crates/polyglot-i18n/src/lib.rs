//! Locale-aware message catalogs for Polyglot.
//!
//! This crate knows nothing about HTTP. It provides:
//!
//! - [`Locale`]: a language + optional region identifier,
//! - [`Catalog`]: a key -> template table for one locale,
//! - [`loader`]: `.properties` bundle loading,
//! - [`MessageSource`]: fallback-chain lookup with positional
//!   placeholder substitution.

pub mod format;
pub mod loader;
pub mod source;

use std::collections::HashMap;
use std::fmt;

/// A locale identifier: language code plus optional region.
///
/// Immutable once constructed and compared structurally. The language
/// is stored lowercase, the region uppercase, so `en-us`, `en_US` and
/// `EN-US` all parse to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Build a locale from pre-validated parts.
    pub fn new(language: impl Into<String>, region: Option<&str>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: region.map(|r| r.to_uppercase()),
        }
    }

    /// Parse from a locale string (e.g. "en", "en-US", "pl_PL").
    ///
    /// Returns `None` for anything that is not a 2-3 letter language
    /// optionally followed by a 2-letter or 3-digit region. Malformed
    /// input is treated as absent, never as an error.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let mut parts = s.split(['-', '_']);
        let language = parts.next()?;
        let region = parts.next();
        if parts.next().is_some() {
            // Variants and extensions are out of scope.
            return None;
        }

        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return None;
        }

        if let Some(region) = region {
            let alpha2 = region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic());
            let digit3 = region.len() == 3 && region.chars().all(|c| c.is_ascii_digit());
            if !alpha2 && !digit3 {
                return None;
            }
        }

        Some(Self::new(language, region))
    }

    /// The lowercase language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The uppercase region code, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Drop the region, keeping the bare language.
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            region: None,
        }
    }

    /// Lookup order for this locale, most specific first.
    ///
    /// `pl-PL` yields `[pl-PL, pl]`; `fr` yields `[fr]`. The default
    /// locale's own chain is appended by [`MessageSource`], not here.
    pub fn fallback_chain(&self) -> Vec<Self> {
        let mut chain = vec![self.clone()];
        if self.region.is_some() {
            chain.push(self.language_only());
        }
        chain
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

/// Message catalog for a single locale.
///
/// Populated once at load time and read-only afterwards, so it can be
/// shared across request handlers without locking.
#[derive(Debug, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the template for a message code.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.messages.get(code).map(|s| s.as_str())
    }

    /// Add an entry (loading and tests).
    pub fn insert(&mut self, code: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(code.into(), template.into());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate over the message codes.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(|s| s.as_str())
    }
}

pub use loader::{load_bundle, BundleConfig, BundleError, LoadedBundle};
pub use source::{MessageError, MessageSource};
