//! Keeps every language-selection control showing the same value.

use crate::dom::{Document, NodeId};
use crate::i18n::LanguageRegistry;

/// Class marking a language `<select>` (desktop and mobile variants).
pub const SELECTOR_CLASS: &str = "language-select";

#[derive(Debug, Clone, Default)]
pub struct SelectorSync {
    controls: Vec<NodeId>,
}

impl SelectorSync {
    /// Find every `.language-select` control and show `language` in each.
    ///
    /// A control with no options of its own is filled with the languages
    /// the registry offers.
    pub fn attach(doc: &mut Document, language: &str) -> Self {
        let controls = doc.query_by_class(doc.root(), SELECTOR_CLASS);
        for &control in &controls {
            if doc.first_by_tag(control, "option").is_none() {
                fill_options(doc, control);
            }
            doc.set_value(control, language);
        }
        Self { controls }
    }

    pub fn controls(&self) -> &[NodeId] {
        &self.controls
    }

    pub fn owns(&self, node: NodeId) -> bool {
        self.controls.contains(&node)
    }

    /// Copy `value` into every control except `origin`, which already shows it.
    pub fn propagate(&self, doc: &mut Document, origin: NodeId, value: &str) {
        for &control in self.controls.iter().filter(|&&c| c != origin) {
            doc.set_value(control, value);
        }
    }
}

fn fill_options(doc: &mut Document, control: NodeId) {
    for lang in LanguageRegistry::get().list_enabled() {
        doc.build("option")
            .value(lang.code)
            .attr("title", lang.name)
            .text(lang.native_name)
            .append_to(control);
    }
}
