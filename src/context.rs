//! Explicit per-page language context.
//!
//! Holds what the language components would otherwise read from ambient
//! globals: the active language, the dictionary, the root of the UI scope the
//! binder walks, and the binding counters.

use crate::dom::NodeId;
use crate::i18n::{BindingMetrics, Dictionary, Language};
use std::sync::Arc;

#[derive(Debug)]
pub struct SiteContext {
    active_language: String,
    dictionary: Arc<Dictionary>,
    root: NodeId,
    metrics: BindingMetrics,
}

impl SiteContext {
    pub fn new(language: &str, dictionary: Arc<Dictionary>, root: NodeId) -> Self {
        Self {
            active_language: language.to_string(),
            dictionary,
            root,
            metrics: BindingMetrics::new(),
        }
    }

    /// Code of the active language. May name a language without a table, in
    /// which case nothing is overridden.
    pub fn active_language(&self) -> &str {
        &self.active_language
    }

    /// The active language if it is a registered site language.
    pub fn language(&self) -> Option<Language> {
        Language::from_code(&self.active_language).ok()
    }

    pub fn set_active_language(&mut self, language: &str) {
        self.active_language = language.to_string();
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn metrics(&self) -> &BindingMetrics {
        &self.metrics
    }

    /// Look `key` up in the active language.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.dictionary.lookup(&self.active_language, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_lookup_follows_active_language() {
        let doc = Document::new();
        let mut context = SiteContext::new("en", Arc::new(Dictionary::builtin()), doc.root());
        assert_eq!(context.lookup("nav.contact"), Some("Contact"));

        context.set_active_language("pa");
        assert_eq!(context.active_language(), "pa");
        assert_eq!(context.lookup("nav.contact"), Some("ਸੰਪਰਕ"));
    }

    #[test]
    fn test_language_for_unregistered_code_is_none() {
        let doc = Document::new();
        let context = SiteContext::new("fr", Arc::new(Dictionary::builtin()), doc.root());
        assert!(context.language().is_none());
        assert_eq!(context.lookup("nav.home"), None);
    }

    #[test]
    fn test_language_for_registered_code() {
        let doc = Document::new();
        let context = SiteContext::new("hi", Arc::new(Dictionary::builtin()), doc.root());
        let hindi = context.language().unwrap();
        assert_eq!(hindi, Language::from_code("hi").unwrap());
        assert_eq!(hindi.native_name(), "हिन्दी");
    }
}
