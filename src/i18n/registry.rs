//! The site languages: which ones ship a dictionary table, which one the copy
//! is written in, and which ones the language selectors offer.
//!
//! The table is a `static`, so lookups never allocate and never fail to
//! initialize.

/// One site language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Code stored under `lang` and used as the `<option>` value (e.g. "pa")
    pub code: &'static str,

    /// English name, used as the option's `title` (e.g. "Punjabi")
    pub name: &'static str,

    /// Name in the language's own script, shown as the option label
    pub native_name: &'static str,

    /// The language the page markup is written in; every other table is
    /// checked against it
    pub is_canonical: bool,

    /// Offered in the language selectors
    pub enabled: bool,
}

/// Lookup over the site's language table.
#[derive(Debug)]
pub struct LanguageRegistry {
    languages: &'static [LanguageConfig],
}

static REGISTRY: LanguageRegistry = LanguageRegistry {
    languages: &[
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            enabled: true,
        },
        LanguageConfig {
            code: "hi",
            name: "Hindi",
            native_name: "हिन्दी",
            is_canonical: false,
            enabled: true,
        },
        LanguageConfig {
            code: "pa",
            name: "Punjabi",
            native_name: "ਪੰਜਾਬੀ",
            is_canonical: false,
            enabled: true,
        },
    ],
};

impl LanguageRegistry {
    /// The site's registry.
    pub fn get() -> &'static LanguageRegistry {
        &REGISTRY
    }

    /// The language registered under `code`, if any.
    pub fn get_by_code(&self, code: &str) -> Option<&'static LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Languages offered in the selectors, in display order.
    pub fn list_enabled(&self) -> impl Iterator<Item = &'static LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled)
    }

    /// The language the page markup is written in.
    ///
    /// The first entry stands in if none is marked canonical.
    pub fn canonical(&self) -> &'static LanguageConfig {
        let languages = self.languages;
        languages
            .iter()
            .find(|lang| lang.is_canonical)
            .unwrap_or(&languages[0])
    }
}
