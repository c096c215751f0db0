//! Per-locale translation trees.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::registry::DEFAULT_LOCALE;

/// A node of a locale's catalog.
///
/// # Examples
///
/// ```json
/// "nav": {
///   "home": "Home",
///   "about": "About"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    /// A localized string
    Text(String),
    /// Nested segments
    Node(BTreeMap<String, CatalogEntry>),
}

impl CatalogEntry {
    /// The string held by a leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CatalogEntry::Text(text) => Some(text),
            CatalogEntry::Node(_) => None,
        }
    }

    /// Follows a dotted path from this entry.
    ///
    /// Returns `None` when a segment is missing, when a leaf is reached
    /// before the path ends, or when the path ends on a node.
    pub fn walk(&self, key: &str) -> Option<&str> {
        key.split('.')
            .try_fold(self, |entry, segment| match entry {
                CatalogEntry::Node(children) => children.get(segment),
                CatalogEntry::Text(_) => None,
            })
            .and_then(CatalogEntry::as_text)
    }

    /// Every dotted path that ends on a leaf, sorted.
    pub fn key_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_paths(String::new(), &mut paths);
        paths.sort_unstable();
        paths
    }

    fn collect_paths(&self, prefix: String, out: &mut Vec<String>) {
        match self {
            CatalogEntry::Text(_) if !prefix.is_empty() => out.push(prefix),
            CatalogEntry::Text(_) => {}
            CatalogEntry::Node(children) => {
                for (segment, child) in children {
                    let path = if prefix.is_empty() {
                        segment.clone()
                    } else {
                        format!("{prefix}.{segment}")
                    };
                    child.collect_paths(path, out);
                }
            }
        }
    }
}

/// Errors raised while building a [`Catalog`] from JSON.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog must be an object keyed by locale code")]
    NotAnObject,

    #[error("catalog for locale '{locale}' is malformed: {source}")]
    InvalidLocale {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog for locale '{0}' must be an object, not a string")]
    TextRoot(String),

    #[error("default locale '{0}' has no catalog")]
    MissingDefault(String),
}

/// All locale trees plus the locale they fall back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    locales: BTreeMap<String, CatalogEntry>,
    default_locale: String,
}

// Bundled by build.rs from locales/
static BUNDLED: Lazy<Catalog> = Lazy::new(|| {
    const BUNDLED_TRANSLATIONS: &str = include_str!(
        concat!(env!("OUT_DIR"), "/all_translations.json")
    );

    Catalog::from_json_str(BUNDLED_TRANSLATIONS, DEFAULT_LOCALE).unwrap_or_else(|e| {
        error!("failed to load bundled translations: {e}");
        Catalog::empty(DEFAULT_LOCALE)
    })
});

impl Catalog {
    /// The catalog compiled into this crate from `locales/`.
    pub fn bundled() -> &'static Catalog {
        &BUNDLED
    }

    /// A catalog with one empty tree for `default_locale`.
    pub fn empty(default_locale: &str) -> Self {
        let mut locales = BTreeMap::new();
        locales.insert(default_locale.to_string(), CatalogEntry::Node(BTreeMap::new()));
        Self {
            locales,
            default_locale: default_locale.to_string(),
        }
    }

    /// Parses `{"<locale>": { ...nested strings... }, ...}`.
    pub fn from_json_str(json: &str, default_locale: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value, default_locale)
    }

    /// Same as [`Catalog::from_json_str`] for an already parsed value.
    pub fn from_value(value: Value, default_locale: &str) -> Result<Self, CatalogError> {
        let Value::Object(object) = value else {
            return Err(CatalogError::NotAnObject);
        };

        let mut locales = BTreeMap::new();
        for (locale, tree) in object {
            let entry = CatalogEntry::deserialize(tree).map_err(|source| {
                CatalogError::InvalidLocale {
                    locale: locale.clone(),
                    source,
                }
            })?;
            if matches!(entry, CatalogEntry::Text(_)) {
                return Err(CatalogError::TextRoot(locale));
            }
            locales.insert(locale, entry);
        }

        if !locales.contains_key(default_locale) {
            return Err(CatalogError::MissingDefault(default_locale.to_string()));
        }

        Ok(Self {
            locales,
            default_locale: default_locale.to_string(),
        })
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Locale codes that have a tree, sorted.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    pub fn get(&self, locale: &str) -> Option<&CatalogEntry> {
        self.locales.get(locale)
    }

    /// Walks one locale's tree, without any fallback.
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        self.locales.get(locale)?.walk(key)
    }

    /// How complete each locale is relative to the default locale.
    pub fn coverage(&self) -> CoverageReport {
        let expected = self
            .get(&self.default_locale)
            .map(CatalogEntry::key_paths)
            .unwrap_or_default();

        let locales = self.locales
            .iter()
            .map(|(locale, tree)| {
                let present = tree.key_paths();
                let missing: Vec<String> = expected
                    .iter()
                    .filter(|key| tree.walk(key).is_none())
                    .cloned()
                    .collect();
                let empty: Vec<String> = expected
                    .iter()
                    .filter(|key| tree.walk(key) == Some(""))
                    .cloned()
                    .collect();
                let extra = present
                    .into_iter()
                    .filter(|key| expected.binary_search(key).is_err())
                    .collect();

                let translated = expected.len() - missing.len() - empty.len();
                let coverage_percent = if expected.is_empty() {
                    100.0
                } else {
                    (translated as f64 / expected.len() as f64) * 100.0
                };

                LocaleCoverage {
                    locale: locale.clone(),
                    missing,
                    empty,
                    extra,
                    coverage_percent,
                }
            })
            .collect();

        CoverageReport {
            default_locale: self.default_locale.clone(),
            total_keys: expected.len(),
            locales,
        }
    }
}

/// Result of [`Catalog::coverage`].
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    pub default_locale: String,
    /// Number of keys in the default locale.
    pub total_keys: usize,
    /// One entry per locale, sorted by code.
    pub locales: Vec<LocaleCoverage>,
}

impl CoverageReport {
    pub fn locale(&self, code: &str) -> Option<&LocaleCoverage> {
        self.locales.iter().find(|l| l.locale == code)
    }

    /// True when no locale is missing a key or holds an empty string.
    pub fn is_complete(&self) -> bool {
        self.locales.iter().all(LocaleCoverage::is_complete)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCoverage {
    pub locale: String,
    /// Default-locale keys this locale lacks.
    pub missing: Vec<String>,
    /// Default-locale keys this locale maps to `""`.
    pub empty: Vec<String>,
    /// Keys this locale has that the default locale does not.
    pub extra: Vec<String>,
    /// Share of default-locale keys with a non-empty string, in `[0, 100]`.
    pub coverage_percent: f64,
}

impl LocaleCoverage {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.empty.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "en": {
            "nav": { "home": "Home", "blog": "Blog" },
            "footer": { "rights": "All rights reserved." }
        },
        "es": {
            "nav": { "home": "Inicio", "blog": "" },
            "footer": "Todos los derechos reservados.",
            "extra": { "only": "Solo" }
        }
    }"#;

    fn fixture() -> Catalog {
        Catalog::from_json_str(FIXTURE, "en").unwrap()
    }

    #[test]
    fn walk_follows_segments() {
        let catalog = fixture();
        assert_eq!(catalog.lookup("en", "nav.home"), Some("Home"));
        assert_eq!(catalog.lookup("es", "nav.home"), Some("Inicio"));
        assert_eq!(catalog.lookup("es", "nav.blog"), Some(""));
    }

    #[test]
    fn walk_degrades_to_none() {
        let catalog = fixture();
        // node at the end of the path
        assert_eq!(catalog.lookup("en", "nav"), None);
        // leaf before the end of the path
        assert_eq!(catalog.lookup("es", "footer.rights"), None);
        assert_eq!(catalog.lookup("en", "nav.home.extra"), None);
        assert_eq!(catalog.lookup("en", "missing.key"), None);
        assert_eq!(catalog.lookup("en", ""), None);
        assert_eq!(catalog.lookup("fr", "nav.home"), None);
    }

    #[test]
    fn key_paths_are_sorted_leaves() {
        let catalog = fixture();
        let paths = catalog.get("en").unwrap().key_paths();
        assert_eq!(paths, ["footer.rights", "nav.blog", "nav.home"]);
    }

    #[test]
    fn rejects_malformed_catalogs() {
        assert!(matches!(Catalog::from_json_str("{", "en"), Err(CatalogError::Json(_))));
        assert!(matches!(Catalog::from_json_str("[]", "en"), Err(CatalogError::NotAnObject)));
        assert!(matches!(
            Catalog::from_json_str(r#"{"en": {"nav": {"home": 1}}}"#, "en"),
            Err(CatalogError::InvalidLocale { locale, .. }) if locale == "en"
        ));
        assert!(matches!(
            Catalog::from_json_str(r#"{"en": "Home"}"#, "en"),
            Err(CatalogError::TextRoot(locale)) if locale == "en"
        ));
        assert!(matches!(
            Catalog::from_json_str(r#"{"es": {}}"#, "en"),
            Err(CatalogError::MissingDefault(locale)) if locale == "en"
        ));
    }

    #[test]
    fn coverage_reports_gaps() {
        let report = fixture().coverage();
        assert_eq!(report.default_locale, "en");
        assert_eq!(report.total_keys, 3);
        assert!(!report.is_complete());

        let en = report.locale("en").unwrap();
        assert!(en.is_complete());
        assert_eq!(en.coverage_percent, 100.0);

        let es = report.locale("es").unwrap();
        assert_eq!(es.missing, ["footer.rights"]);
        assert_eq!(es.empty, ["nav.blog"]);
        assert_eq!(es.extra, ["extra.only", "footer"]);
        assert!((es.coverage_percent - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_catalog_has_default_tree() {
        let catalog = Catalog::empty("en");
        assert_eq!(catalog.locales().collect::<Vec<_>>(), ["en"]);
        assert_eq!(catalog.lookup("en", "nav.home"), None);
        assert!(catalog.coverage().is_complete());
    }

    #[test]
    fn bundled_catalog_is_complete() {
        let catalog = Catalog::bundled();
        assert_eq!(catalog.default_locale(), DEFAULT_LOCALE);
        assert_eq!(catalog.lookup("en", "nav.home"), Some("Home"));
        assert_eq!(catalog.lookup("es", "language.picker"), Some("Cambiar idioma"));
        assert!(catalog.coverage().is_complete());
    }
}
