//! Internationalization (i18n) for the site's static text.
//!
//! All language metadata, the built-in dictionary and its quality checks live
//! here. Applying translations to the page is the binder's job.
//!
//! # Architecture
//!
//! - `registry`: The site languages, the canonical one and those offered in the selectors
//! - `language`: Validated `Language` handle backed by the registry
//! - `dictionary`: Per-language key → string tables, with the built-in site copy
//! - `validator`: Dictionary coverage and key-format checks
//! - `metrics`: Counters for binder passes, updates and misses
//!
//! # Example
//!
//! ```rust
//! use homecare_site::i18n::{Dictionary, Language};
//!
//! let dictionary = Dictionary::builtin();
//! assert_eq!(dictionary.lookup("en", "nav.home"), Some("Home"));
//!
//! let punjabi = Language::from_code("pa").unwrap();
//! assert_eq!(punjabi.native_name(), "ਪੰਜਾਬੀ");
//! ```

mod dictionary;
mod language;
mod metrics;
mod registry;
mod validator;

pub use dictionary::{Dictionary, ENGLISH_STRINGS, HINDI_STRINGS, PUNJABI_STRINGS};
pub use language::Language;
pub use metrics::{BindingMetrics, MetricsReport};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use validator::{DictionaryValidator, ValidationReport};
