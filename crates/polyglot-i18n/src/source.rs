//! Message resolution with locale fallback.

use super::format;
use super::loader::LoadedBundle;
use super::{Catalog, Locale};
use std::collections::HashMap;

/// Message lookup errors.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("message '{code}' not found for locale {locale}")]
    NotFound { code: String, locale: Locale },
}

/// Resolves (code, arguments, locale) to a display string.
///
/// Lookup walks the requested locale's fallback chain, then the default
/// locale's chain, then the default table. Immutable after
/// construction; share it behind an `Arc`.
#[derive(Debug)]
pub struct MessageSource {
    default_table: Catalog,
    tables: HashMap<Locale, Catalog>,
    default_locale: Locale,
    use_code_as_default: bool,
}

impl MessageSource {
    /// Build a source from a loaded bundle.
    pub fn new(bundle: LoadedBundle, default_locale: Locale, use_code_as_default: bool) -> Self {
        Self {
            default_table: bundle.default_table,
            tables: bundle.tables,
            default_locale,
            use_code_as_default,
        }
    }

    /// The configured default locale.
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Resolve a message code for a locale and substitute arguments.
    ///
    /// Placeholders with no matching argument stay literal. When no
    /// table carries the code, either the code itself is returned
    /// (`use_code_as_default`) or [`MessageError::NotFound`] is raised.
    pub fn get_message(
        &self,
        code: &str,
        args: &[&str],
        locale: &Locale,
    ) -> Result<String, MessageError> {
        match self.lookup(code, locale) {
            Some(template) => Ok(format::expand(template, args)),
            None if self.use_code_as_default => Ok(code.to_string()),
            None => Err(MessageError::NotFound {
                code: code.to_string(),
                locale: locale.clone(),
            }),
        }
    }

    /// Find the template for a code, most specific locale first.
    fn lookup(&self, code: &str, locale: &Locale) -> Option<&str> {
        let mut chain = locale.fallback_chain();
        if locale != &self.default_locale {
            chain.extend(self.default_locale.fallback_chain());
        }

        for candidate in &chain {
            if let Some(template) = self.tables.get(candidate).and_then(|c| c.get(code)) {
                return Some(template);
            }
        }

        self.default_table.get(code)
    }
}
