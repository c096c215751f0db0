//! Translation keys derived from the default locale's catalog.
//!
//! `build.rs` walks the default catalog and emits one nested module per
//! node and one constant per leaf, so `keys::nav::HOME` is the key
//! `"nav.home"`. A key that is removed or renamed in the default catalog
//! stops compiling wherever it is used.

use std::fmt;

/// A dotted key path known to exist in the default locale's catalog.
///
/// Only the generated constants can build one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(&'static str);

impl Key {
    pub(crate) const fn new(path: &'static str) -> Self {
        Self(path)
    }

    /// The dotted path, e.g. `"nav.home"`.
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        self.0
    }
}

include!(concat!(env!("OUT_DIR"), "/keys.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_constants_carry_dotted_paths() {
        assert_eq!(nav::HOME.as_str(), "nav.home");
        assert_eq!(footer::RIGHTS.to_string(), "footer.rights");
        assert_eq!(language::PICKER.as_ref(), "language.picker");
    }

    #[test]
    fn all_is_sorted_and_complete() {
        let paths: Vec<_> = ALL.iter().map(|k| k.as_str()).collect();
        let mut sorted = paths.clone();
        sorted.sort_unstable();
        assert_eq!(paths, sorted);
        assert_eq!(paths.len(), 8);
        assert!(paths.contains(&"hero.title"));
    }
}
