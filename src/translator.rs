//! Key lookup bound to a locale, with fallback to the default locale.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{ debug, warn };

use crate::catalog::Catalog;
use crate::keys::Key;

/// Looks up keys for one locale.
///
/// Resolution order for a key:
/// 1. the bound locale's string, if present and non-empty
/// 2. the default locale's string, if present and non-empty
/// 3. the key itself, so gaps stay visible in rendered pages
///
/// # Example
///
/// ```rust
/// use site_intl::{ keys, use_translations };
///
/// let t = use_translations("es");
/// assert_eq!(t.t(keys::nav::HOME), "Inicio");
/// assert_eq!(t.translate("nonexistent.key"), "nonexistent.key");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    catalog: &'a Catalog,
    locale: &'a str,
}

/// A translator over the bundled catalog.
pub fn use_translations(locale: &str) -> Translator<'_> {
    Translator::new(Catalog::bundled(), locale)
}

impl<'a> Translator<'a> {
    /// Binds `locale` to `catalog`.
    ///
    /// The locale is not validated; one without a tree in the catalog
    /// resolves everything from the default locale.
    pub fn new(catalog: &'a Catalog, locale: &'a str) -> Self {
        if catalog.get(locale).is_none() {
            debug!(
                locale,
                fallback = catalog.default_locale(),
                "no catalog for locale, every lookup uses the fallback"
            );
        }
        Self { catalog, locale }
    }

    pub fn locale(&self) -> &'a str {
        self.locale
    }

    /// Translates a key known at compile time.
    pub fn t(&self, key: Key) -> String {
        self.translate(key.as_str())
    }

    /// Translates any dotted key. Never returns an empty string unless
    /// `key` itself is empty.
    pub fn translate(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(text) => text.to_string(),
            None => {
                warn!(locale = self.locale, key, "missing translation");
                key.to_string()
            }
        }
    }

    /// The resolved string, without echoing the key when nothing matches.
    pub fn lookup(&self, key: &str) -> Option<&'a str> {
        let translation = self.catalog.lookup(self.locale, key).filter(|s| !s.is_empty());
        if translation.is_some() {
            return translation;
        }

        let fallback = self.catalog
            .lookup(self.catalog.default_locale(), key)
            .filter(|s| !s.is_empty());
        if fallback.is_some() && self.locale != self.catalog.default_locale() {
            debug!(
                locale = self.locale,
                key,
                fallback = self.catalog.default_locale(),
                "using fallback translation"
            );
        }
        fallback
    }

    /// Translates a key and fills its `{{...}}` placeholders in order.
    ///
    /// ```rust
    /// // "greeting": "Hello {{name}}, you have {{count}} messages"
    /// // t.t_with_args(keys::greeting, &[&"Ana", &3]) == "Hello Ana, you have 3 messages"
    /// ```
    pub fn t_with_args(&self, key: Key, args: &[&dyn ToString]) -> String {
        self.translate_with_args(key.as_str(), args)
    }

    /// Untyped counterpart of [`Translator::t_with_args`].
    pub fn translate_with_args(&self, key: &str, args: &[&dyn ToString]) -> String {
        replace_placeholders(&self.translate(key), args)
    }
}

static ARG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(\w*)\}\}").expect("placeholder pattern is a valid regex")
});

// Placeholders without a matching argument are dropped; surplus arguments are ignored.
fn replace_placeholders(template: &str, args: &[&dyn ToString]) -> String {
    let parts: Vec<&str> = ARG_RE.split(template).collect();
    let mut result = String::with_capacity(template.len());

    for (i, part) in parts.iter().enumerate() {
        result.push_str(part);
        if i + 1 < parts.len() {
            if let Some(arg) = args.get(i) {
                result.push_str(&arg.to_string());
            }
        }
    }

    result
}
