//! Floating "back to top" button.

use crate::dom::{Document, NodeId, ScrollBehavior};

pub const BUTTON_CLASS: &str = "back-to-top";
const VISIBLE_CLASS: &str = "visible";

/// Scroll offset (px) past which the button shows.
const SHOW_AFTER: f64 = 2.0;

#[derive(Debug)]
pub struct BackToTop {
    button: NodeId,
    frame_pending: bool,
}

impl BackToTop {
    /// Create the button and append it to the body.
    pub fn attach(doc: &mut Document) -> Self {
        let body = doc.body();
        let button = doc
            .build("button")
            .class(BUTTON_CLASS)
            .attr("aria-label", "Back to top")
            .append_to(body);
        Self {
            button,
            frame_pending: false,
        }
    }

    pub fn button(&self) -> NodeId {
        self.button
    }

    /// Note a scroll event. Returns `true` when this event requested a new
    /// animation frame, `false` when one is already pending.
    pub fn on_scroll(&mut self) -> bool {
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Run the pending visibility update, if any.
    pub fn on_animation_frame(&mut self, doc: &mut Document) {
        if !self.frame_pending {
            return;
        }
        self.frame_pending = false;
        self.update_visibility(doc);
    }

    pub fn update_visibility(&self, doc: &mut Document) {
        if doc.scroll_y() > SHOW_AFTER {
            doc.add_class(self.button, VISIBLE_CLASS);
        } else {
            doc.remove_class(self.button, VISIBLE_CLASS);
        }
    }

    pub fn scroll_to_top(&self, doc: &mut Document) {
        doc.scroll_to(0.0, ScrollBehavior::Smooth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(doc: &Document, back: &BackToTop) -> bool {
        doc.has_class(back.button(), VISIBLE_CLASS)
    }

    #[test]
    fn test_attach_appends_button() {
        let mut doc = Document::new();
        let back = BackToTop::attach(&mut doc);
        assert_eq!(doc.element(back.button()).parent(), Some(doc.body()));
        assert_eq!(doc.attribute(back.button(), "aria-label"), Some("Back to top"));
        assert!(!visible(&doc, &back));
    }

    #[test]
    fn test_visibility_threshold() {
        let mut doc = Document::new();
        let back = BackToTop::attach(&mut doc);

        doc.set_scroll_y(2.0);
        back.update_visibility(&mut doc);
        assert!(!visible(&doc, &back));

        doc.set_scroll_y(3.0);
        back.update_visibility(&mut doc);
        assert!(visible(&doc, &back));
    }

    #[test]
    fn test_scroll_events_coalesce_per_frame() {
        let mut doc = Document::new();
        let mut back = BackToTop::attach(&mut doc);

        doc.set_scroll_y(400.0);
        assert!(back.on_scroll());
        assert!(!back.on_scroll());
        assert!(!back.on_scroll());
        // Nothing changes until the frame runs
        assert!(!visible(&doc, &back));

        back.on_animation_frame(&mut doc);
        assert!(visible(&doc, &back));
        assert!(!back.frame_pending());
        assert!(back.on_scroll());
    }

    #[test]
    fn test_frame_without_scroll_is_noop() {
        let mut doc = Document::new();
        let mut back = BackToTop::attach(&mut doc);
        doc.set_scroll_y(400.0);
        back.on_animation_frame(&mut doc);
        assert!(!visible(&doc, &back));
    }

    #[test]
    fn test_scroll_to_top_is_smooth() {
        let mut doc = Document::new();
        let back = BackToTop::attach(&mut doc);
        doc.set_scroll_y(900.0);

        back.scroll_to_top(&mut doc);
        assert_eq!(doc.scroll_y(), 0.0);
        assert_eq!(doc.last_scroll_behavior(), Some(ScrollBehavior::Smooth));
    }
}
