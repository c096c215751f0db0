//! Locale-prefixed site paths.

/// Prefixes site paths with a locale segment.
///
/// ```rust
/// let translate = site_intl::use_translated_path("es");
/// assert_eq!(translate.translate_path("/about"), "/es/about");
/// assert_eq!(translate.translate_path_to("about", "en"), "/en/about");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathTranslator<'a> {
    locale: &'a str,
}

/// A path prefixer bound to `locale`. The locale is not validated.
pub fn use_translated_path(locale: &str) -> PathTranslator<'_> {
    PathTranslator { locale }
}

impl<'a> PathTranslator<'a> {
    pub fn locale(&self) -> &'a str {
        self.locale
    }

    /// Prefixes `path` with the bound locale.
    pub fn translate_path(&self, path: &str) -> String {
        localized_path(self.locale, path)
    }

    /// Prefixes `path` with `locale` instead of the bound one.
    pub fn translate_path_to(&self, path: &str, locale: &str) -> String {
        localized_path(locale, path)
    }
}

/// `/{locale}/{rest}` with exactly one `/` inserted between the locale and
/// a path that does not already start with one.
pub fn localized_path(locale: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("/{locale}{path}")
    } else {
        format!("/{locale}/{path}")
    }
}
