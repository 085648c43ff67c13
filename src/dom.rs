//! Owned element tree standing in for the host page's DOM fragment.
//!
//! The host rendering framework hands a decorator one block as a
//! pre-parsed fragment. Decorators own that fragment exclusively for
//! the duration of the call and mutate it in place, so the tree is a
//! plain owned value: no interior mutability, no parent pointers.
//!
//! Only what decorators need is modeled: tags, class lists, ordered
//! children, text content, and HTML serialization for the host.

use std::fmt::Write as _;

// ═══════════════════════════════════════════════════════════
// Node / Element
// ═══════════════════════════════════════════════════════════

/// One node of a block fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with a tag, class list, and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add a class.
    pub fn with_class(mut self, class: &str) -> Self {
        self.push_class(class);
        self
    }

    /// Builder: append a text child.
    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    /// Builder: append an element child.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    // ── Class list ───────────────────────────────────────

    pub fn push_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Iterate class names in authored order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    // ── Children ─────────────────────────────────────────

    pub fn append_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn append_element(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Iterate direct element children, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Take ownership of all children, leaving the element empty.
    pub fn take_children(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.children)
    }

    /// Replace all children with the given nodes.
    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    /// Replace all children with a single element (the DOM
    /// `replaceChildren(el)` decorators lean on).
    pub fn replace_children_with(&mut self, child: Element) {
        self.children = vec![Node::Element(child)];
    }

    // ── Text ─────────────────────────────────────────────

    /// Concatenated text of all descendants, like DOM `textContent`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    // ── Serialization ────────────────────────────────────

    /// Serialize the subtree to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_html(&self.classes.join(" ")));
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(el) => el.write_html(out),
                Node::Text(text) => out.push_str(&escape_html(text)),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Element(el) => collect_text(&el.children, out),
            Node::Text(text) => out.push_str(text),
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_concatenates_descendants() {
        let el = Element::new("div")
            .with_child(Element::new("p").with_text("Stay "))
            .with_child(Element::new("em").with_text("hungry"));
        assert_eq!(el.text_content(), "Stay hungry");
    }

    #[test]
    fn text_content_of_empty_element_is_empty() {
        assert_eq!(Element::new("div").text_content(), "");
    }

    #[test]
    fn push_class_deduplicates() {
        let mut el = Element::new("div");
        el.push_class("quote");
        el.push_class("quote");
        assert_eq!(el.classes().count(), 1);
        assert!(el.has_class("quote"));
    }

    #[test]
    fn replace_children_with_swaps_subtree() {
        let mut el = Element::new("div").with_text("raw");
        el.replace_children_with(Element::new("blockquote").with_text("rendered"));
        assert_eq!(el.children().len(), 1);
        assert_eq!(el.text_content(), "rendered");
    }

    #[test]
    fn take_children_leaves_element_empty() {
        let mut el = Element::new("div").with_text("a").with_text("b");
        let taken = el.take_children();
        assert_eq!(taken.len(), 2);
        assert!(el.children().is_empty());
    }

    #[test]
    fn child_elements_skips_text_nodes() {
        let el = Element::new("div")
            .with_text("stray")
            .with_child(Element::new("p"));
        assert_eq!(el.child_elements().count(), 1);
    }

    #[test]
    fn to_html_renders_tags_and_classes() {
        let el = Element::new("p")
            .with_class("quote-author")
            .with_text("Ada Lovelace");
        assert_eq!(el.to_html(), "<p class=\"quote-author\">Ada Lovelace</p>");
    }

    #[test]
    fn to_html_escapes_text() {
        let el = Element::new("blockquote").with_text("1 < 2 & \"so on\"");
        assert_eq!(
            el.to_html(),
            "<blockquote>1 &lt; 2 &amp; &quot;so on&quot;</blockquote>"
        );
    }

    #[test]
    fn to_html_nests_children_in_order() {
        let el = Element::new("div")
            .with_child(Element::new("blockquote").with_text("q"))
            .with_child(Element::new("p").with_class("quote-author").with_text("a"));
        assert_eq!(
            el.to_html(),
            "<div><blockquote>q</blockquote><p class=\"quote-author\">a</p></div>"
        );
    }
}
