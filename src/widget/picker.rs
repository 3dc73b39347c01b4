//! The translate button and its searchable language menu.

use super::languages::{filter_languages, WIDGET_LANGUAGES};
use crate::dom::{Document, NodeId};

const OPEN_CLASS: &str = "open";
const HIDDEN_CLASS: &str = "hidden";
const ITEM_CLASS: &str = "translator-item";
const LANG_ATTR: &str = "data-lang";

/// What a click inside the picker did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    /// The trigger flipped the menu; `true` when it is now open
    Toggled(bool),
    /// A language item was chosen and the menu closed
    Selected(String),
}

#[derive(Debug, Clone)]
pub struct TranslatorPicker {
    wrapper: NodeId,
    trigger: NodeId,
    menu: NodeId,
    search: NodeId,
    list: NodeId,
}

impl TranslatorPicker {
    /// Build the picker with the full language list and place it right after
    /// the theme toggle, or pinned to the top right corner if there is none.
    pub fn build(doc: &mut Document) -> Self {
        let wrapper = doc
            .build("span")
            .class("translator-wrapper")
            .attr("role", "group")
            .finish();
        let trigger = doc
            .build("button")
            .class("translator-trigger")
            .attr("type", "button")
            .attr("aria-label", "Translate page")
            .append_to(wrapper);
        let menu = doc
            .build("div")
            .class("translator-menu")
            .attr("role", "menu")
            .append_to(wrapper);
        let search = doc
            .build("input")
            .class("translator-search")
            .attr("type", "search")
            .attr("placeholder", "Search language...")
            .append_to(menu);
        let list = doc.build("div").append_to(menu);

        for (name, code) in WIDGET_LANGUAGES {
            doc.build("button")
                .class(ITEM_CLASS)
                .attr("type", "button")
                .attr(LANG_ATTR, code)
                .text(name)
                .append_to(list);
        }

        let picker = Self {
            wrapper,
            trigger,
            menu,
            search,
            list,
        };
        picker.place(doc);
        picker
    }

    fn place(&self, doc: &mut Document) {
        let toggle = doc.query_first(doc.root(), |el| {
            el.attribute("data-theme-toggle").is_some()
                || el.id() == Some("theme-toggle")
                || el.has_class("theme-toggle")
        });
        if toggle.is_some_and(|toggle| doc.insert_after(toggle, self.wrapper)) {
            return;
        }

        doc.set_style(self.wrapper, "position", "fixed");
        doc.set_style(self.wrapper, "top", "12px");
        doc.set_style(self.wrapper, "right", "12px");
        let body = doc.body();
        doc.append_child(body, self.wrapper);
    }

    /// Show only the languages whose name matches `filter`. The items are
    /// built once; filtering hides the rest.
    pub fn render(&self, doc: &mut Document, filter: &str) {
        let matching: Vec<&str> = filter_languages(filter).map(|(_, code)| code).collect();
        for item in doc.query_by_class(self.list, ITEM_CLASS) {
            let code = doc.attribute(item, LANG_ATTR).unwrap_or_default();
            if matching.iter().any(|&m| m == code) {
                doc.remove_class(item, HIDDEN_CLASS);
            } else {
                doc.add_class(item, HIDDEN_CLASS);
            }
        }
    }

    pub fn wrapper(&self) -> NodeId {
        self.wrapper
    }

    pub fn trigger(&self) -> NodeId {
        self.trigger
    }

    pub fn search(&self) -> NodeId {
        self.search
    }

    /// The language items currently listed (not filtered out).
    pub fn items(&self, doc: &Document) -> Vec<NodeId> {
        doc.query_all(self.list, |el| {
            el.has_class(ITEM_CLASS) && !el.has_class(HIDDEN_CLASS)
        })
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.has_class(self.menu, OPEN_CLASS)
    }

    pub fn close(&self, doc: &mut Document) {
        doc.remove_class(self.menu, OPEN_CLASS);
    }

    /// The search box changed.
    pub fn on_search_input(&self, doc: &mut Document, query: &str) {
        doc.set_value(self.search, query);
        self.render(doc, query);
    }

    /// Handle a click on `target`; `None` if it was not on the trigger or an item.
    pub fn handle_click(&self, doc: &mut Document, target: NodeId) -> Option<PickerAction> {
        if doc.contains(self.trigger, target) {
            let open = doc.toggle_class(self.menu, OPEN_CLASS);
            return Some(PickerAction::Toggled(open));
        }

        let item = self
            .items(doc)
            .into_iter()
            .find(|&item| doc.contains(item, target))?;
        let code = doc.attribute(item, LANG_ATTR).unwrap_or_default().to_string();
        self.close(doc);
        Some(PickerAction::Selected(code))
    }

    /// Document-level click: anything outside the picker closes the menu.
    pub fn handle_document_click(&self, doc: &mut Document, target: NodeId) {
        if !doc.contains(self.wrapper, target) {
            self.close(doc);
        }
    }
}
