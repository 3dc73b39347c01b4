//! In-memory document model.
//!
//! A small element arena standing in for the page's DOM. Components query and
//! mutate it the way the page scripts would. Dispatched events, alerts and
//! navigation are recorded so the host (and tests) can observe them.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Document shared between the site controller and timer-driven tasks.
///
/// Everything runs on one thread, so a `RefCell` is enough. Never hold a
/// borrow across an `.await`.
pub type SharedDocument = Rc<RefCell<Document>>;

/// Handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Kinds of events components dispatch programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Change,
    Input,
}

/// A programmatically dispatched event, with the target's value at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedEvent {
    pub target: NodeId,
    pub kind: EventKind,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// A single element: tag, attributes, classes, text and form state.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    value: String,
    disabled: bool,
    style: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            text: String::new(),
            value: String::new(),
            disabled: false,
            style: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// The page: an `<html>` root with `<head>` and `<body>`, plus window state.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    /// Slots of dropped subtrees, reused by `create_element`
    free: Vec<NodeId>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    hostname: String,
    scroll_y: f64,
    last_scroll: Option<ScrollBehavior>,
    location: Option<String>,
    globals: BTreeSet<String>,
    events: Vec<DispatchedEvent>,
    alerts: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_hostname("localhost")
    }

    /// Create an empty page served from `hostname`.
    pub fn with_hostname(hostname: &str) -> Self {
        let mut doc = Self {
            nodes: vec![Element::new("html")],
            free: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            hostname: hostname.to_string(),
            scroll_y: 0.0,
            last_scroll: None,
            location: None,
            globals: BTreeSet::new(),
            events: Vec::new(),
            alerts: Vec::new(),
        };
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.append_child(doc.root, head);
        doc.append_child(doc.root, body);
        doc.head = head;
        doc.body = body;
        doc
    }

    /// Wrap the document for sharing with async tasks.
    pub fn into_shared(self) -> SharedDocument {
        Rc::new(RefCell::new(self))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    // ==================== Tree ====================

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        if let Some(node) = self.free.pop() {
            self.nodes[node.0] = Element::new(tag);
            return node;
        }
        self.nodes.push(Element::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    /// Elements currently allocated, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Create a detached element and configure it fluently.
    pub fn build(&mut self, tag: &str) -> ElementBuilder<'_> {
        let node = self.create_element(tag);
        ElementBuilder { doc: self, node }
    }

    pub fn element(&self, node: NodeId) -> &Element {
        &self.nodes[node.0]
    }

    fn element_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.nodes[node.0]
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.element_mut(parent).children.push(child);
        self.element_mut(child).parent = Some(parent);
    }

    /// Insert `node` immediately after `reference`.
    ///
    /// Returns `false` (and leaves `node` untouched) when `reference` has no parent.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> bool {
        let Some(parent) = self.element(reference).parent else {
            return false;
        };
        self.detach(node);
        let siblings = &mut self.element_mut(parent).children;
        let index = siblings
            .iter()
            .position(|&n| n == reference)
            .map_or(siblings.len(), |i| i + 1);
        siblings.insert(index, node);
        self.element_mut(node).parent = Some(parent);
        true
    }

    /// Remove `node` (and its subtree) from the tree.
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    /// Drop every child subtree of `node`. The dropped ids are recycled and
    /// must not be used again.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.element_mut(node).children);
        for child in children {
            self.element_mut(child).parent = None;
            self.release(child);
        }
    }

    fn release(&mut self, node: NodeId) {
        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            if [self.root, self.head, self.body].contains(&current) {
                continue;
            }
            let element = std::mem::replace(&mut self.nodes[current.0], Element::new(""));
            pending.extend(element.children);
            self.free.push(current);
        }
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.element_mut(node).parent.take() {
            self.element_mut(parent).children.retain(|&n| n != node);
        }
    }

    /// Whether `node` is attached to this document's root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.element(n).parent;
        }
        false
    }

    /// Descendants of `scope` in document order, excluding `scope` itself.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.element(scope).children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.element(node).children.iter().rev().copied());
        }
        out
    }

    // ==================== Queries ====================

    /// All elements under `scope` matching `predicate`, in document order.
    pub fn query_all<F>(&self, scope: NodeId, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| predicate(self.element(n)))
            .collect()
    }

    /// First element under `scope` matching `predicate`.
    pub fn query_first<F>(&self, scope: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(scope)
            .into_iter()
            .find(|&n| predicate(self.element(n)))
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_first(self.root, |el| el.id() == Some(id))
    }

    pub fn query_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.query_all(scope, |el| el.has_class(class))
    }

    pub fn first_by_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.query_first(scope, |el| el.has_class(class))
    }

    pub fn first_by_tag(&self, scope: NodeId, tag: &str) -> Option<NodeId> {
        self.query_first(scope, |el| el.tag() == tag)
    }

    // ==================== Content ====================

    pub fn text(&self, node: NodeId) -> &str {
        self.element(node).text()
    }

    /// Replace the element's text. Like `textContent`, this drops its
    /// children (see [`Document::clear_children`]).
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        self.element_mut(node).text = text.to_string();
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).attribute(name)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.element_mut(node)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        self.element_mut(node).attributes.remove(name);
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).has_class(class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.element_mut(node).classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.element_mut(node).classes.retain(|c| c != class);
    }

    /// Toggle `class`, returning whether it is present afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    pub fn value(&self, node: NodeId) -> &str {
        self.element(node).value()
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        self.element_mut(node).value = value.to_string();
    }

    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        self.element_mut(node).disabled = disabled;
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.element_mut(node)
            .style
            .insert(property.to_string(), value.to_string());
    }

    // ==================== Window state ====================

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    pub fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior) {
        self.set_scroll_y(y);
        self.last_scroll = Some(behavior);
    }

    pub fn last_scroll_behavior(&self) -> Option<ScrollBehavior> {
        self.last_scroll
    }

    pub fn navigate(&mut self, href: &str) {
        self.location = Some(href.to_string());
    }

    /// Where the page navigated to, if anywhere.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Register a window-level callback name (e.g. a script-ready hook).
    pub fn register_global(&mut self, name: &str) {
        self.globals.insert(name.to_string());
    }

    pub fn has_global(&self, name: &str) -> bool {
        self.globals.contains(name)
    }

    pub fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    // ==================== Events ====================

    pub fn dispatch_event(&mut self, target: NodeId, kind: EventKind) {
        let value = self.value(target).to_string();
        self.events.push(DispatchedEvent {
            target,
            kind,
            value,
        });
    }

    pub fn events(&self) -> &[DispatchedEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<DispatchedEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Fluent element construction, see [`Document::build`].
pub struct ElementBuilder<'a> {
    doc: &'a mut Document,
    node: NodeId,
}

impl<'a> ElementBuilder<'a> {
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Add one or more whitespace-separated classes.
    pub fn class(self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.doc.add_class(self.node, class);
        }
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.doc.set_attribute(self.node, name, value);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.doc.set_text(self.node, text);
        self
    }

    pub fn value(self, value: &str) -> Self {
        self.doc.set_value(self.node, value);
        self
    }

    pub fn append_to(self, parent: NodeId) -> NodeId {
        self.doc.append_child(parent, self.node);
        self.node
    }

    /// Leave the element detached.
    pub fn finish(self) -> NodeId {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Tree Tests ====================

    #[test]
    fn test_new_document_has_head_and_body() {
        let doc = Document::new();
        assert_eq!(doc.element(doc.root()).tag(), "html");
        assert_eq!(doc.element(doc.head()).tag(), "head");
        assert_eq!(doc.element(doc.body()).tag(), "body");
        assert_eq!(doc.element(doc.root()).children(), &[doc.head(), doc.body()]);
    }

    #[test]
    fn test_descendants_are_in_document_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let nav = doc.build("nav").id("nav").append_to(body);
        let a = doc.build("a").id("a").append_to(nav);
        let b = doc.build("a").id("b").append_to(nav);
        let footer = doc.build("footer").id("footer").append_to(body);

        let order = doc.descendants(body);
        assert_eq!(order, vec![nav, a, b, footer]);
    }

    #[test]
    fn test_insert_after_places_node_next_to_reference() {
        let mut doc = Document::new();
        let body = doc.body();
        let first = doc.build("button").append_to(body);
        let last = doc.build("button").append_to(body);
        let middle = doc.create_element("span");

        assert!(doc.insert_after(first, middle));
        assert_eq!(doc.element(body).children(), &[first, middle, last]);
    }

    #[test]
    fn test_insert_after_detached_reference_fails() {
        let mut doc = Document::new();
        let orphan = doc.create_element("div");
        let node = doc.create_element("span");
        assert!(!doc.insert_after(orphan, node));
        assert!(doc.element(node).parent().is_none());
    }

    #[test]
    fn test_remove_disconnects_subtree() {
        let mut doc = Document::new();
        let body = doc.body();
        let outer = doc.build("div").append_to(body);
        let inner = doc.build("p").id("inner").append_to(outer);

        doc.remove(outer);
        assert!(!doc.is_connected(inner));
        assert!(doc.get_element_by_id("inner").is_none());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let mut doc = Document::new();
        let body = doc.body();
        let menu = doc.build("div").append_to(body);
        let item = doc.build("a").append_to(menu);
        assert!(doc.contains(menu, menu));
        assert!(doc.contains(menu, item));
        assert!(!doc.contains(item, menu));
    }

    // ==================== Content Tests ====================

    #[test]
    fn test_set_text_drops_children() {
        let mut doc = Document::new();
        let body = doc.body();
        let link = doc.build("a").append_to(body);
        let icon = doc.build("svg").append_to(link);

        doc.set_text(link, "Home");
        assert_eq!(doc.text(link), "Home");
        assert!(doc.element(link).children().is_empty());
        assert!(!doc.is_connected(icon));
    }

    #[test]
    fn test_dropped_subtrees_are_recycled() {
        let mut doc = Document::new();
        let body = doc.body();
        let list = doc.build("ul").append_to(body);
        let baseline = doc.node_count();

        for round in 0..20 {
            doc.clear_children(list);
            for i in 0..5 {
                let item = doc.build("li").text(&format!("{round}-{i}")).append_to(list);
                doc.build("span").append_to(item);
            }
        }

        assert_eq!(doc.node_count(), baseline + 10);
        assert_eq!(doc.nodes.len(), baseline + 10);
        assert_eq!(doc.element(list).children().len(), 5);
    }

    #[test]
    fn test_recycled_node_starts_fresh() {
        let mut doc = Document::new();
        let body = doc.body();
        let old = doc.build("p").id("old").class("x").append_to(body);
        doc.clear_children(body);

        let fresh = doc.build("div").append_to(body);
        assert_eq!(fresh, old);
        assert_eq!(doc.element(fresh).tag(), "div");
        assert!(doc.element(fresh).classes().is_empty());
        assert!(doc.get_element_by_id("old").is_none());
    }

    #[test]
    fn test_clearing_root_keeps_head_and_body_slots() {
        let mut doc = Document::new();
        let root = doc.root();
        let body = doc.body();
        doc.clear_children(root);
        let node = doc.create_element("div");
        assert_ne!(node, body);
        assert_ne!(node, doc.head());
    }

    #[test]
    fn test_class_helpers() {
        let mut doc = Document::new();
        let node = doc.build("div").class("a b").finish();
        assert!(doc.has_class(node, "a"));
        assert!(doc.has_class(node, "b"));

        doc.add_class(node, "a");
        assert_eq!(doc.element(node).classes().len(), 2);

        assert!(!doc.toggle_class(node, "a"));
        assert!(doc.toggle_class(node, "open"));
        assert!(doc.has_class(node, "open"));
    }

    #[test]
    fn test_dispatch_event_captures_value() {
        let mut doc = Document::new();
        let body = doc.body();
        let select = doc.build("select").value("pa").append_to(body);
        doc.dispatch_event(select, EventKind::Change);

        let events = doc.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].target, select);
        assert_eq!(events[0].kind, EventKind::Change);
        assert_eq!(events[0].value, "pa");
        assert!(doc.events().is_empty());
    }

    #[test]
    fn test_scroll_never_negative() {
        let mut doc = Document::new();
        doc.set_scroll_y(-20.0);
        assert_eq!(doc.scroll_y(), 0.0);
        doc.scroll_to(0.0, ScrollBehavior::Smooth);
        assert_eq!(doc.last_scroll_behavior(), Some(ScrollBehavior::Smooth));
    }
}
