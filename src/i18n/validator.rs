//! Dictionary quality validation.
//!
//! Checks that every translated table stays aligned with the canonical one:
//! keys a translation lacks fall back to the page's original text (a warning),
//! keys only a translation defines can never be bound from canonical markup
//! (an error), and keys must follow the dotted `section.name` format.

use crate::i18n::{Dictionary, Language, LanguageRegistry};
use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make an entry unusable
    pub errors: Vec<String>,

    /// Gaps that degrade to the original page text
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks dictionary tables for gaps and malformed keys.
pub struct DictionaryValidator;

static KEY_REGEX: OnceLock<Regex> = OnceLock::new();

impl DictionaryValidator {
    /// Validate every table in `dictionary` against the `canonical` language.
    pub fn validate(dictionary: &Dictionary, canonical: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        if !dictionary.has_language(canonical) {
            report
                .errors
                .push(format!("Canonical language '{}' has no table", canonical));
            return report;
        }

        let canonical_keys = dictionary.keys(canonical);

        for key in &canonical_keys {
            if !Self::is_valid_key(key) {
                report.errors.push(format!("Malformed key '{}'", key));
            }
        }

        for language in dictionary.languages() {
            let keys = dictionary.keys(language);

            for key in &keys {
                if dictionary
                    .lookup(language, key)
                    .is_some_and(|value| value.trim().is_empty())
                {
                    report
                        .warnings
                        .push(format!("Empty value for '{}' in '{}'", key, language));
                }
            }

            if language == canonical {
                continue;
            }

            let missing: Vec<&str> = canonical_keys
                .iter()
                .filter(|key| !keys.contains(*key))
                .copied()
                .collect();
            if !missing.is_empty() {
                report.warnings.push(format!(
                    "Language '{}' is missing {} key(s): {:?}",
                    language,
                    missing.len(),
                    missing
                ));
            }

            let orphans: Vec<&str> = keys
                .iter()
                .filter(|key| !canonical_keys.contains(*key))
                .copied()
                .collect();
            if !orphans.is_empty() {
                report.errors.push(format!(
                    "Language '{}' defines keys absent from '{}': {:?}",
                    language, canonical, orphans
                ));
            }
        }

        report
    }

    /// Validate against the site's registry: tables are measured against the
    /// canonical language, and every language the selectors offer needs one.
    pub fn validate_site(dictionary: &Dictionary) -> ValidationReport {
        let mut report = Self::validate(dictionary, Language::canonical().code());
        for lang in LanguageRegistry::get().list_enabled() {
            if !dictionary.has_language(lang.code) {
                report.errors.push(format!(
                    "Language '{}' ({}) is offered but has no table",
                    lang.code, lang.name
                ));
            }
        }
        report
    }

    /// Dotted lowercase key such as `nav.home` or `hero.title1`.
    fn is_valid_key(key: &str) -> bool {
        let regex = KEY_REGEX
            .get_or_init(|| Regex::new(r"^[a-z][a-z0-9]*(\.[a-z][a-z0-9]*)+$").unwrap());
        regex.is_match(key)
    }
}
