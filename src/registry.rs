//! Supported locales and the default locale.
//!
//! The table is generated at build time from `locales/languages.json` and
//! never changes afterwards. The build fails unless it is non-empty and
//! contains the default locale.

/// A locale the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// Short identifier used as the first URL path segment (e.g. "en", "es").
    pub code: &'static str,
    /// Human-readable label, written in the locale itself (e.g. "Español").
    pub display_name: &'static str,
}

include!(concat!(env!("OUT_DIR"), "/registry.rs"));

/// All supported locales, in declaration order.
pub fn languages() -> &'static [Locale] {
    LANGUAGES
}

/// The locale every lookup falls back to.
pub fn default_locale() -> &'static Locale {
    &DEFAULT_LANGUAGE
}

/// Finds a registered locale by its code.
pub fn find(code: &str) -> Option<&'static Locale> {
    LANGUAGES.iter().find(|locale| locale.code == code)
}

/// Whether `code` names a registered locale.
pub fn is_supported(code: &str) -> bool {
    find(code).is_some()
}

/// Display name of a registered locale.
///
/// ```rust
/// assert_eq!(site_intl::registry::display_name("es"), Some("Español"));
/// assert_eq!(site_intl::registry::display_name("xx"), None);
/// ```
pub fn display_name(code: &str) -> Option<&'static str> {
    find(code).map(|locale| locale.display_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locale_is_registered() {
        assert!(!languages().is_empty());
        assert!(is_supported(DEFAULT_LOCALE));
        assert_eq!(default_locale().code, DEFAULT_LOCALE);
        assert_eq!(find(DEFAULT_LOCALE), Some(default_locale()));
    }

    #[test]
    fn languages_keep_declaration_order() {
        let codes: Vec<_> = languages().iter().map(|l| l.code).collect();
        assert_eq!(codes, ["es", "en"]);
        assert_eq!(DEFAULT_LOCALE, "en");
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("en"), Some("English"));
        assert_eq!(display_name("es"), Some("Español"));
        assert_eq!(display_name(""), None);
        assert!(!is_supported("EN"));
    }
}
