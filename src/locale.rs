//! Language manager: preference → dictionary → page, and back from the selectors.

use crate::binder::{self, ApplyReport};
use crate::context::SiteContext;
use crate::dom::{Document, NodeId};
use crate::i18n::Dictionary;
use crate::preferences::{PreferenceKey, PreferenceStore};
use crate::selector::SelectorSync;
use std::sync::Arc;
use tracing::{debug, info};

/// Owns the active site language and reapplies it to the page.
pub struct LanguageManager {
    context: SiteContext,
    selectors: SelectorSync,
}

impl LanguageManager {
    /// Read the saved language (or `default_language`), apply it to the page
    /// and attach the language selectors.
    pub fn init(
        doc: &mut Document,
        prefs: &PreferenceStore,
        dictionary: Arc<Dictionary>,
        default_language: &str,
    ) -> Self {
        let language = prefs.get(PreferenceKey::Lang, default_language);
        let context = SiteContext::new(&language, dictionary, doc.root());

        let report = binder::apply(doc, &context);
        debug!("Initial language {:?} applied: {:?}", language, report);

        let selectors = SelectorSync::attach(doc, &language);
        Self { context, selectors }
    }

    pub fn active_language(&self) -> &str {
        self.context.active_language()
    }

    /// Dictionary and active language used for text binding.
    pub fn context(&self) -> &SiteContext {
        &self.context
    }

    pub fn selectors(&self) -> &SelectorSync {
        &self.selectors
    }

    /// Switch to `language`, persist it and re-bind the page.
    pub fn set_language(
        &mut self,
        doc: &mut Document,
        prefs: &mut PreferenceStore,
        language: &str,
    ) -> ApplyReport {
        self.context.set_active_language(language);
        prefs.set(PreferenceKey::Lang, language);
        binder::apply(doc, &self.context)
    }

    /// Handle a user change on a language control.
    ///
    /// Returns `false` if `origin` is not one of the managed selectors.
    pub fn handle_change(
        &mut self,
        doc: &mut Document,
        prefs: &mut PreferenceStore,
        origin: NodeId,
        value: &str,
    ) -> bool {
        if !self.selectors.owns(origin) {
            return false;
        }

        info!("Language changed to {:?}", value);
        self.set_language(doc, prefs, value);
        self.selectors.propagate(doc, origin, value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::TEXT_KEY_ATTR;
    use crate::selector::SELECTOR_CLASS;
    use crate::storage::MemoryStorage;

    struct Page {
        doc: Document,
        title: NodeId,
        desktop: NodeId,
        mobile: NodeId,
    }

    fn page() -> Page {
        let mut doc = Document::new();
        let body = doc.body();
        let title = doc
            .build("h1")
            .attr(TEXT_KEY_ATTR, "hero.title2")
            .text("24x7 Available")
            .append_to(body);
        let desktop = doc.build("select").class(SELECTOR_CLASS).append_to(body);
        let mobile = doc.build("select").class(SELECTOR_CLASS).append_to(body);
        Page {
            doc,
            title,
            desktop,
            mobile,
        }
    }

    #[test]
    fn test_init_uses_default_without_preference() {
        let mut page = page();
        let prefs = PreferenceStore::in_memory();
        let manager =
            LanguageManager::init(&mut page.doc, &prefs, Arc::new(Dictionary::builtin()), "en");

        assert_eq!(manager.active_language(), "en");
        assert_eq!(page.doc.value(page.desktop), "en");
        assert_eq!(page.doc.value(page.mobile), "en");
    }

    #[test]
    fn test_init_applies_saved_language() {
        let mut page = page();
        let prefs = PreferenceStore::new(Box::new(MemoryStorage::with_items([("lang", "hi")])));
        let manager =
            LanguageManager::init(&mut page.doc, &prefs, Arc::new(Dictionary::builtin()), "en");

        assert_eq!(manager.active_language(), "hi");
        assert_eq!(page.doc.text(page.title), "24x7 उपलब्ध");
        assert_eq!(page.doc.value(page.mobile), "hi");
    }

    #[test]
    fn test_handle_change_syncs_persists_and_applies() {
        let mut page = page();
        let mut prefs = PreferenceStore::in_memory();
        let mut manager =
            LanguageManager::init(&mut page.doc, &prefs, Arc::new(Dictionary::builtin()), "en");

        page.doc.set_value(page.mobile, "pa");
        assert!(manager.handle_change(&mut page.doc, &mut prefs, page.mobile, "pa"));

        assert_eq!(manager.active_language(), "pa");
        assert_eq!(prefs.get(PreferenceKey::Lang, "en"), "pa");
        assert_eq!(page.doc.value(page.desktop), "pa");
        assert_eq!(page.doc.text(page.title), "24x7 ਉਪਲਬਧ");
    }

    #[test]
    fn test_handle_change_ignores_foreign_control() {
        let mut page = page();
        let mut prefs = PreferenceStore::in_memory();
        let body = page.doc.body();
        let other = page.doc.build("select").append_to(body);
        let mut manager =
            LanguageManager::init(&mut page.doc, &prefs, Arc::new(Dictionary::builtin()), "en");

        assert!(!manager.handle_change(&mut page.doc, &mut prefs, other, "hi"));
        assert_eq!(manager.active_language(), "en");
        assert_eq!(prefs.get(PreferenceKey::Lang, "none"), "none");
    }

    #[test]
    fn test_switching_back_to_english_restores_text() {
        let mut page = page();
        let mut prefs = PreferenceStore::in_memory();
        let mut manager =
            LanguageManager::init(&mut page.doc, &prefs, Arc::new(Dictionary::builtin()), "en");

        manager.set_language(&mut page.doc, &mut prefs, "hi");
        manager.set_language(&mut page.doc, &mut prefs, "en");
        assert_eq!(page.doc.text(page.title), "24x7 Available");
    }
}
