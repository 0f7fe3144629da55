//! Message bundle loading.
//!
//! Bundles are Java-style `.properties` tables: one default table
//! (`messages.properties`) plus zero or more locale-suffixed tables
//! (`messages_fr.properties`, `messages_pl_PL.properties`). A missing
//! default table or a malformed line is fatal; the service never starts
//! on a partially loaded bundle.

use super::{Catalog, Locale};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Bundle loader configuration.
#[derive(Debug, Clone)]
pub struct BundleConfig {
    /// Directory containing the `.properties` files.
    pub dir: PathBuf,
    /// Table base name (e.g. "messages").
    pub basename: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("messages"),
            basename: "messages".to_string(),
        }
    }
}

/// A fully loaded bundle: the default table plus per-locale tables.
#[derive(Debug, Default)]
pub struct LoadedBundle {
    /// Entries from the unsuffixed default table.
    pub default_table: Catalog,
    /// Entries from each locale-suffixed table.
    pub tables: HashMap<Locale, Catalog>,
}

/// Bundle loading errors.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed line {line} in {path}: missing '=' separator")]
    Malformed { path: PathBuf, line: usize },

    #[error("default table {0} not found")]
    MissingDefault(PathBuf),
}

/// Load a bundle from disk.
pub fn load_bundle(config: &BundleConfig) -> Result<LoadedBundle, BundleError> {
    let default_path = config.dir.join(format!("{}.properties", config.basename));
    if !default_path.exists() {
        return Err(BundleError::MissingDefault(default_path));
    }
    let default_table = load_table(&default_path)?;
    debug!(path = %default_path.display(), entries = default_table.len(), "Loaded default table");

    let mut tables = HashMap::new();
    let entries = fs::read_dir(&config.dir).map_err(|source| BundleError::Io {
        path: config.dir.clone(),
        source,
    })?;

    let prefix = format!("{}_", config.basename);
    for entry in entries {
        let entry = entry.map_err(|source| BundleError::Io {
            path: config.dir.clone(),
            source,
        })?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(suffix) = name
            .strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix(".properties"))
        else {
            continue;
        };

        match Locale::parse(suffix) {
            Some(locale) => {
                let catalog = load_table(&path)?;
                debug!(path = %path.display(), locale = %locale, entries = catalog.len(), "Loaded locale table");
                tables.insert(locale, catalog);
            }
            None => {
                warn!(path = %path.display(), "Skipping table with unrecognized locale suffix");
            }
        }
    }

    Ok(LoadedBundle {
        default_table,
        tables,
    })
}

/// Load a single `.properties` table.
fn load_table(path: &Path) -> Result<Catalog, BundleError> {
    let content = fs::read_to_string(path).map_err(|source| BundleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_properties(&content, path)
}

/// Parse `.properties` content.
///
/// `key=value` or `key: value` per line, `#`/`!` comments, blank lines
/// skipped. The key is trimmed; the value starts after the separator
/// with leading whitespace removed and supports `\n`, `\t` and `\\`
/// escapes. A non-comment line without a separator is malformed.
fn parse_properties(content: &str, path: &Path) -> Result<Catalog, BundleError> {
    let mut catalog = Catalog::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let sep = line
            .char_indices()
            .find(|(_, c)| *c == '=' || *c == ':')
            .map(|(i, _)| i);
        let Some(sep) = sep else {
            return Err(BundleError::Malformed {
                path: path.to_path_buf(),
                line: idx + 1,
            });
        };

        let key = line[..sep].trim();
        let value = line[sep + 1..].trim_start();
        if key.is_empty() {
            return Err(BundleError::Malformed {
                path: path.to_path_buf(),
                line: idx + 1,
            });
        }

        catalog.insert(key, unescape(value));
    }

    Ok(catalog)
}

/// Unescape the minimal `.properties` escape set.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_bundle(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_parse_properties() {
        let content = "\
# greeting tables
greeting.text=Hi Welcome to I18n
welcome.message = Greetings {0}
lang.change: Change the language
! another comment

escaped=line one\\nline two\ttab stays";
        let catalog = parse_properties(content, Path::new("test.properties")).unwrap();
        assert_eq!(catalog.get("greeting.text"), Some("Hi Welcome to I18n"));
        assert_eq!(catalog.get("welcome.message"), Some("Greetings {0}"));
        assert_eq!(catalog.get("lang.change"), Some("Change the language"));
        assert_eq!(catalog.get("escaped"), Some("line one\nline two\ttab stays"));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_malformed_line_is_fatal() {
        let result = parse_properties("ok=fine\njust some text\n", Path::new("bad.properties"));
        match result {
            Err(BundleError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_key_is_fatal() {
        let result = parse_properties("=no key here\n", Path::new("bad.properties"));
        assert!(matches!(result, Err(BundleError::Malformed { line: 1, .. })));
    }

    #[test]
    fn test_load_bundle() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(
            dir.path(),
            "messages.properties",
            "greeting.text=Hi Welcome to I18n\nwelcome.message=Greetings {0}\n",
        );
        write_bundle(
            dir.path(),
            "messages_fr.properties",
            "greeting.text=Salut Bienvenue sur i18n\nwelcome.message=Bonjour {0}\n",
        );
        write_bundle(
            dir.path(),
            "messages_pl_PL.properties",
            "greeting.text=Witamy w I18n\n",
        );
        // Unrecognized suffix is skipped, not fatal
        write_bundle(dir.path(), "messages_klingon.properties", "x=y\n");
        // Unrelated file is ignored
        write_bundle(dir.path(), "README.txt", "not a table\n");

        let bundle = load_bundle(&BundleConfig {
            dir: dir.path().to_path_buf(),
            basename: "messages".to_string(),
        })
        .unwrap();

        assert_eq!(bundle.default_table.get("greeting.text"), Some("Hi Welcome to I18n"));
        assert_eq!(bundle.tables.len(), 2);

        let fr = bundle.tables.get(&Locale::new("fr", None)).unwrap();
        assert_eq!(fr.get("welcome.message"), Some("Bonjour {0}"));

        let pl = bundle.tables.get(&Locale::new("pl", Some("PL"))).unwrap();
        assert_eq!(pl.get("greeting.text"), Some("Witamy w I18n"));
    }

    #[test]
    fn test_missing_default_table() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), "messages_fr.properties", "a=b\n");

        let result = load_bundle(&BundleConfig {
            dir: dir.path().to_path_buf(),
            basename: "messages".to_string(),
        });
        assert!(matches!(result, Err(BundleError::MissingDefault(_))));
    }

    #[test]
    fn test_malformed_locale_table_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), "messages.properties", "a=b\n");
        write_bundle(dir.path(), "messages_de.properties", "broken line\n");

        let result = load_bundle(&BundleConfig {
            dir: dir.path().to_path_buf(),
            basename: "messages".to_string(),
        });
        assert!(matches!(result, Err(BundleError::Malformed { .. })));
    }
}
