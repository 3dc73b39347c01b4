//! Mobile navigation menu.

use crate::dom::{Document, NodeId};
use tracing::debug;

pub const MENU_ID: &str = "mobile-menu";
pub const BUTTON_ID: &str = "mobile-menu-button";

const HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The menu button, if both it and the menu exist.
    pub fn trigger(doc: &Document) -> Option<NodeId> {
        let button = doc.get_element_by_id(BUTTON_ID)?;
        doc.get_element_by_id(MENU_ID)?;
        Some(button)
    }

    pub fn toggle(&mut self, doc: &mut Document) {
        let Some(menu) = doc.get_element_by_id(MENU_ID) else {
            return;
        };
        self.open = !self.open;
        if self.open {
            doc.remove_class(menu, HIDDEN_CLASS);
        } else {
            doc.add_class(menu, HIDDEN_CLASS);
        }
        debug!("Mobile menu open: {}", self.open);
    }

    pub fn close(&mut self, doc: &mut Document) {
        let Some(menu) = doc.get_element_by_id(MENU_ID) else {
            return;
        };
        self.open = false;
        doc.add_class(menu, HIDDEN_CLASS);
    }

    /// Document-level click: close unless the click landed in the menu or on its button.
    pub fn handle_document_click(&mut self, doc: &mut Document, target: NodeId) {
        let Some(menu) = doc.get_element_by_id(MENU_ID) else {
            return;
        };
        let on_button = doc
            .get_element_by_id(BUTTON_ID)
            .is_some_and(|button| doc.contains(button, target));
        if !doc.contains(menu, target) && !on_button {
            self.close(doc);
        }
    }
}
