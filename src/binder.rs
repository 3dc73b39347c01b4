//! Applies dictionary strings to elements tagged for localization.
//!
//! Two markup forms are recognized:
//!
//! - `data-i18n="<key>"` replaces the element's text
//! - `data-i18n-attr="<attribute>"` with `data-i18n-key="<key>"` sets the
//!   named attribute (e.g. `placeholder`, `aria-label`, `title`)
//!
//! A key with no entry (or an empty one) leaves the element as it is.

use crate::context::SiteContext;
use crate::dom::{Document, NodeId};
use crate::i18n::Dictionary;
use serde::Serialize;
use tracing::debug;

pub const TEXT_KEY_ATTR: &str = "data-i18n";
pub const TARGET_ATTR: &str = "data-i18n-attr";
pub const ATTR_KEY_ATTR: &str = "data-i18n-key";

/// What one binder pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub texts_updated: usize,
    pub attributes_updated: usize,
    /// Bound elements whose key had no entry for the language
    pub misses: usize,
}

impl ApplyReport {
    /// Whether the pass modified the document at all.
    pub fn changed(&self) -> bool {
        self.texts_updated > 0 || self.attributes_updated > 0
    }
}

/// Apply the context's active language under its root scope, recording metrics.
pub fn apply(doc: &mut Document, context: &SiteContext) -> ApplyReport {
    let report = apply_language(
        doc,
        context.dictionary(),
        context.root(),
        context.active_language(),
    );
    context
        .metrics()
        .record_pass(report.texts_updated, report.attributes_updated, report.misses);
    report
}

/// Apply `language` from `dictionary` to every bound element under `scope`.
///
/// Idempotent: a second pass with the same inputs reports no updates.
pub fn apply_language(
    doc: &mut Document,
    dictionary: &Dictionary,
    scope: NodeId,
    language: &str,
) -> ApplyReport {
    let mut report = ApplyReport::default();

    for (node, key) in text_targets(doc, scope) {
        let Some(value) = resolve(dictionary, language, &key) else {
            report.misses += 1;
            continue;
        };
        let element = doc.element(node);
        if element.text() != value || !element.children().is_empty() {
            doc.set_text(node, value);
            report.texts_updated += 1;
        }
    }

    for (node, attribute, key) in attribute_targets(doc, scope) {
        let Some(value) = resolve(dictionary, language, &key) else {
            report.misses += 1;
            continue;
        };
        if doc.attribute(node, &attribute) != Some(value) {
            doc.set_attribute(node, &attribute, value);
            report.attributes_updated += 1;
        }
    }

    debug!(
        "Applied language {:?}: {} text, {} attribute, {} missing",
        language, report.texts_updated, report.attributes_updated, report.misses
    );
    report
}

fn resolve<'a>(dictionary: &'a Dictionary, language: &str, key: &str) -> Option<&'a str> {
    dictionary
        .lookup(language, key)
        .filter(|value| !value.is_empty())
}

fn text_targets(doc: &Document, scope: NodeId) -> Vec<(NodeId, String)> {
    doc.query_all(scope, |el| el.attribute(TEXT_KEY_ATTR).is_some())
        .into_iter()
        .filter_map(|node| {
            doc.attribute(node, TEXT_KEY_ATTR)
                .map(|key| (node, key.to_string()))
        })
        .collect()
}

/// Elements with both a non-empty target attribute and a non-empty key.
fn attribute_targets(doc: &Document, scope: NodeId) -> Vec<(NodeId, String, String)> {
    doc.query_all(scope, |el| el.attribute(TARGET_ATTR).is_some())
        .into_iter()
        .filter_map(|node| {
            let attribute = doc.attribute(node, TARGET_ATTR).filter(|a| !a.is_empty())?;
            let key = doc.attribute(node, ATTR_KEY_ATTR).filter(|k| !k.is_empty())?;
            Some((node, attribute.to_string(), key.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn page() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let home = doc
            .build("a")
            .attr(TEXT_KEY_ATTR, "nav.home")
            .text("Home")
            .append_to(body);
        let untranslated = doc
            .build("span")
            .attr(TEXT_KEY_ATTR, "footer.note")
            .text("Made in Punjab")
            .append_to(body);
        let search = doc
            .build("input")
            .attr(TARGET_ATTR, "placeholder")
            .attr(ATTR_KEY_ATTR, "nav.contact")
            .attr("placeholder", "Contact")
            .append_to(body);
        (doc, home, untranslated, search)
    }

    // ==================== Text Tests ====================

    #[test]
    fn test_apply_replaces_text() {
        let (mut doc, home, _, _) = page();
        let root = doc.root();
        let report = apply_language(&mut doc, &Dictionary::builtin(), root, "hi");

        assert_eq!(doc.text(home), "होम");
        assert_eq!(report.texts_updated, 1);
    }

    #[test]
    fn test_missing_key_keeps_original_text() {
        let (mut doc, _, untranslated, _) = page();
        let root = doc.root();
        let report = apply_language(&mut doc, &Dictionary::builtin(), root, "pa");

        assert_eq!(doc.text(untranslated), "Made in Punjab");
        assert_eq!(report.misses, 1);
    }

    #[test]
    fn test_unknown_language_changes_nothing() {
        let (mut doc, home, _, search) = page();
        let root = doc.root();
        let report = apply_language(&mut doc, &Dictionary::builtin(), root, "fr");

        assert!(!report.changed());
        assert_eq!(report.misses, 3);
        assert_eq!(doc.text(home), "Home");
        assert_eq!(doc.attribute(search, "placeholder"), Some("Contact"));
    }

    #[test]
    fn test_empty_entry_is_treated_as_missing() {
        let (mut doc, home, _, _) = page();
        let root = doc.root();
        let dict = Dictionary::new().with_table("en", &[("nav.home", "")]);
        let report = apply_language(&mut doc, &dict, root, "en");

        assert_eq!(doc.text(home), "Home");
        assert_eq!(report.texts_updated, 0);
    }

    // ==================== Attribute Tests ====================

    #[test]
    fn test_apply_sets_named_attribute() {
        let (mut doc, _, _, search) = page();
        let root = doc.root();
        let report = apply_language(&mut doc, &Dictionary::builtin(), root, "pa");

        assert_eq!(doc.attribute(search, "placeholder"), Some("ਸੰਪਰਕ"));
        assert_eq!(report.attributes_updated, 1);
    }

    #[test]
    fn test_attribute_target_without_key_is_skipped() {
        let mut doc = Document::new();
        let body = doc.body();
        let node = doc
            .build("button")
            .attr(TARGET_ATTR, "aria-label")
            .append_to(body);
        let root = doc.root();

        let report = apply_language(&mut doc, &Dictionary::builtin(), root, "en");
        assert_eq!(report, ApplyReport::default());
        assert_eq!(doc.attribute(node, "aria-label"), None);
    }

    // ==================== Idempotence Tests ====================

    #[test]
    fn test_apply_is_idempotent() {
        let (mut doc, home, _, search) = page();
        let root = doc.root();
        let dict = Dictionary::builtin();

        let first = apply_language(&mut doc, &dict, root, "pa");
        assert!(first.changed());
        let text = doc.text(home).to_string();
        let placeholder = doc.attribute(search, "placeholder").map(str::to_string);

        let second = apply_language(&mut doc, &dict, root, "pa");
        assert!(!second.changed());
        assert_eq!(doc.text(home), text);
        assert_eq!(doc.attribute(search, "placeholder").map(str::to_string), placeholder);
    }

    #[test]
    fn test_text_with_children_is_replaced_once() {
        let mut doc = Document::new();
        let body = doc.body();
        let link = doc.build("a").attr(TEXT_KEY_ATTR, "nav.blog").append_to(body);
        doc.build("svg").append_to(link);
        let root = doc.root();
        let dict = Dictionary::builtin();

        assert_eq!(apply_language(&mut doc, &dict, root, "en").texts_updated, 1);
        assert!(doc.element(link).children().is_empty());
        assert_eq!(apply_language(&mut doc, &dict, root, "en").texts_updated, 0);
    }

    // ==================== Context Tests ====================

    #[test]
    fn test_apply_records_metrics() {
        let (mut doc, _, _, _) = page();
        let context = SiteContext::new("hi", Arc::new(Dictionary::builtin()), doc.root());

        apply(&mut doc, &context);
        apply(&mut doc, &context);

        let report = context.metrics().report();
        assert_eq!(report.passes, 2);
        assert_eq!(report.texts_updated, 1);
        assert_eq!(report.attributes_updated, 1);
        assert_eq!(report.misses, 2);
    }

    #[test]
    fn test_apply_only_touches_scope() {
        let mut doc = Document::new();
        let body = doc.body();
        let section = doc.build("section").append_to(body);
        let inside = doc
            .build("h1")
            .attr(TEXT_KEY_ATTR, "blog.title")
            .append_to(section);
        let outside = doc
            .build("h1")
            .attr(TEXT_KEY_ATTR, "blog.title")
            .text("Blog")
            .append_to(body);

        apply_language(&mut doc, &Dictionary::builtin(), section, "en");
        assert_eq!(doc.text(inside), "Blog & Updates");
        assert_eq!(doc.text(outside), "Blog");
    }
}
