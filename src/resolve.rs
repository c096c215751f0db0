//! Active locale from a URL path.

use url::Url;

use crate::registry::{ self, DEFAULT_LOCALE };

/// Resolves the locale of a site path such as `/es/about`.
///
/// `path` must start with `/`: its first segment is the locale candidate.
/// A candidate that is not registered, including the empty one of `/`,
/// resolves to [`DEFAULT_LOCALE`]. The result is always a registered code.
///
/// ```rust
/// use site_intl::resolve_locale;
///
/// assert_eq!(resolve_locale("/es/about"), "es");
/// assert_eq!(resolve_locale("/fr/about"), "en");
/// assert_eq!(resolve_locale("/"), "en");
/// ```
pub fn resolve_locale(path: &str) -> &'static str {
    let candidate = path.split('/').nth(1).unwrap_or_default();
    registry::find(candidate).map_or(DEFAULT_LOCALE, |locale| locale.code)
}

/// [`resolve_locale`] on the path of a full URL.
pub fn resolve_locale_from_url(url: &Url) -> &'static str {
    resolve_locale(url.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_segment_wins() {
        assert_eq!(resolve_locale("/es/"), "es");
        assert_eq!(resolve_locale("/es"), "es");
        assert_eq!(resolve_locale("/en/blog/post"), "en");
    }

    #[test]
    fn unregistered_segment_falls_back() {
        assert_eq!(resolve_locale("/"), DEFAULT_LOCALE);
        assert_eq!(resolve_locale(""), DEFAULT_LOCALE);
        assert_eq!(resolve_locale("/about"), DEFAULT_LOCALE);
        assert_eq!(resolve_locale("/ES/about"), DEFAULT_LOCALE);
        assert_eq!(resolve_locale("//es"), DEFAULT_LOCALE);
    }

    #[test]
    fn path_without_leading_slash_skips_first_segment() {
        assert_eq!(resolve_locale("es/about"), DEFAULT_LOCALE);
        assert_eq!(resolve_locale("about/es"), "es");
    }

    #[test]
    fn urls_use_their_path() {
        let url = Url::parse("https://example.com/es/blog?page=2#top").unwrap();
        assert_eq!(resolve_locale_from_url(&url), "es");

        let root = Url::parse("https://example.com").unwrap();
        assert_eq!(resolve_locale_from_url(&root), DEFAULT_LOCALE);
    }
}
