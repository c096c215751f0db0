#![forbid(unsafe_code)]

//! # site-intl
//!
//! Localization lookup for a statically generated, multi-locale website:
//!
//! - **Locale Registry**: supported locales and the default one ([`registry`])
//! - **Bundled Catalog**: per-locale nested strings compiled in from `locales/` ([`catalog`])
//! - **Typed Keys**: one constant per key of the default locale ([`keys`])
//! - **Fallback System**: bound locale, then default locale, then the key itself
//! - **Localized Paths**: `/about` becomes `/es/about`
//!
//! ## Quick Start
//!
//! ```rust
//! use site_intl::{ keys, resolve_locale, use_translated_path, use_translations };
//!
//! let locale = resolve_locale("/es/blog");
//! let t = use_translations(locale);
//! let translate_path = use_translated_path(locale);
//!
//! assert_eq!(t.t(keys::nav::BLOG), "Blog");
//! assert_eq!(t.t(keys::nav::CONTACT), "Contacto");
//! assert_eq!(translate_path.translate_path("/contact"), "/es/contact");
//! ```
//!
//! ## Translation Files
//!
//! `locales/languages.json` lists the locales and names the default one;
//! `locales/<code>.json` holds each locale's strings. The build fails if a
//! registered locale has no file, if the default is not registered, or if a
//! value is neither a string nor an object. Keys missing from a
//! non-default locale only produce build warnings, since lookups fall back
//! to the default locale.
//!
//! ## Logging
//!
//! Fallbacks are reported through [`tracing`]: `debug` when the default
//! locale fills a gap, `warn` when a key is echoed back.

pub mod catalog;
pub mod keys;
pub mod path;
pub mod registry;
pub mod resolve;
pub mod translator;

pub use catalog::{ Catalog, CatalogEntry, CatalogError, CoverageReport, LocaleCoverage };
pub use keys::Key;
pub use path::{ localized_path, use_translated_path, PathTranslator };
pub use registry::{ Locale, DEFAULT_LOCALE };
pub use resolve::{ resolve_locale, resolve_locale_from_url };
pub use translator::{ use_translations, Translator };
