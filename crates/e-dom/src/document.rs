//! Document - High-level document API
//!
//! Element creation, selector queries, class/attribute/style/text access
//! and the forced-layout read, all addressed by `NodeId`.

use crate::geometry::parse_px;
use crate::{
    inner_html, outer_html, DomError, DomResult, DomTree, NodeId, Rect, SelectorList,
    StyleDeclaration, TokenList,
};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a document with an empty `<html><head></head><body></body></html>`
    pub fn new(url: &str) -> Self {
        let mut document = Self::empty(url);
        let tree = &mut document.tree;

        // Names are static and valid, so creation cannot fail
        let html = tree.create_element("html").unwrap_or(NodeId::NONE);
        let head = tree.create_element("head").unwrap_or(NodeId::NONE);
        let body = tree.create_element("body").unwrap_or(NodeId::NONE);
        for (parent, child) in [(tree.root(), html), (html, head), (html, body)] {
            if let Err(err) = tree.append_child(parent, child) {
                tracing::warn!("Failed to build document skeleton: {}", err);
            }
        }

        document.finalize();
        document
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate `<html>`, `<head>` and `<body>` after the tree was built
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        let html = tree
            .element_children(tree.root())
            .find(|&id| tree.tag_name(id) == Some("html"))
            .unwrap_or(NodeId::NONE);
        let find_child = |tag: &str| {
            tree.element_children(html)
                .find(|&id| tree.tag_name(id) == Some(tag))
                .unwrap_or(NodeId::NONE)
        };
        let (head, body) = (find_child("head"), find_child("body"));

        self.html_element = html;
        self.head_element = head;
        self.body_element = body;
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree
            .element_children(self.head_element)
            .find(|&id| self.tree.tag_name(id) == Some("title"))
            .map(|id| self.tree.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// Get `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get `<head>` element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get `<body>` element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&node| self.tree.attribute(node, "id") == Some(id))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> DomResult<NodeId> {
        self.tree.create_element(tag)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// `querySelectorAll` on `scope`, or on the whole document if `None`
    pub fn query_selector_all(&self, scope: Option<NodeId>, selector: &str) -> DomResult<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(list.query_all(&self.tree, scope.unwrap_or(NodeId::ROOT)))
    }

    /// `querySelector` on `scope`, or on the whole document if `None`
    pub fn query_selector(&self, scope: Option<NodeId>, selector: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(list.query_first(&self.tree, scope.unwrap_or(NodeId::ROOT)))
    }

    /// `element.matches(selector)`
    pub fn matches(&self, element: NodeId, selector: &str) -> DomResult<bool> {
        Ok(SelectorList::parse(selector)?.matches(&self.tree, element))
    }

    /// `element.closest(selector)`
    pub fn closest(&self, element: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        Ok(SelectorList::parse(selector)?.closest(&self.tree, element))
    }

    // ========================================================================
    // Classes
    // ========================================================================

    /// Current class tokens of `element`
    pub fn class_list(&self, element: NodeId) -> TokenList {
        TokenList::parse(self.tree.attribute(element, "class").unwrap_or(""))
    }

    /// Whether `element` carries class `token`
    pub fn has_class(&self, element: NodeId, token: &str) -> bool {
        self.class_list(element).contains(token)
    }

    /// `classList.add`
    pub fn add_class(&mut self, element: NodeId, token: &str) -> DomResult<()> {
        self.update_classes(element, |list| list.add(token))
    }

    /// `classList.remove`
    pub fn remove_class(&mut self, element: NodeId, token: &str) -> DomResult<()> {
        self.update_classes(element, |list| list.remove(token))
    }

    /// `classList.toggle`, returns whether the class is now present
    pub fn toggle_class(&mut self, element: NodeId, token: &str) -> DomResult<bool> {
        let mut present = false;
        self.update_classes(element, |list| {
            present = list.toggle(token)?;
            Ok(true)
        })?;
        Ok(present)
    }

    fn update_classes<F>(&mut self, element: NodeId, update: F) -> DomResult<()>
    where
        F: FnOnce(&mut TokenList) -> DomResult<bool>,
    {
        self.require_element(element)?;
        let mut list = self.class_list(element);
        if update(&mut list)? {
            self.tree.set_attribute(element, "class", &list.value())?;
        }
        Ok(())
    }

    // ========================================================================
    // Attributes, text, markup
    // ========================================================================

    /// `getAttribute`
    pub fn attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.tree.attribute(element, name)
    }

    /// `setAttribute`
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.tree.set_attribute(element, name, value)
    }

    /// `textContent` getter
    pub fn text_content(&self, node: NodeId) -> String {
        self.tree.text_content(node)
    }

    /// `textContent` setter
    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> DomResult<()> {
        self.tree.set_text_content(node, text)
    }

    /// `innerHTML` getter
    pub fn inner_html(&self, node: NodeId) -> String {
        inner_html(&self.tree, node)
    }

    /// `outerHTML` getter
    pub fn outer_html(&self, node: NodeId) -> String {
        outer_html(&self.tree, node)
    }

    // ========================================================================
    // Inline style and layout
    // ========================================================================

    /// Parsed inline style of `element`
    pub fn style(&self, element: NodeId) -> StyleDeclaration {
        StyleDeclaration::parse(self.tree.attribute(element, "style").unwrap_or(""))
    }

    /// `element.style[name] = value`
    pub fn set_style_property(&mut self, element: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.require_element(element)?;
        let mut style = self.style(element);
        style.set_property(name, value);
        self.tree.set_attribute(element, "style", &style.css_text())
    }

    /// Border box of `element` after flushing pending layout.
    /// Detached or `display: none` elements report an empty box.
    pub fn offset_rect(&mut self, element: NodeId) -> Rect {
        self.tree.layout.flush();

        let rendered = self.tree.get(element).is_some_and(|n| n.is_element())
            && self.tree.is_connected(element)
            && !std::iter::once(element)
                .chain(self.tree.ancestors(element))
                .any(|id| self.style(id).property("display") == Some("none"));
        if !rendered {
            return Rect::default();
        }

        let style = self.style(element);
        let length = |name: &str| style.property(name).and_then(parse_px).unwrap_or(0.0);
        Rect::from_xywh(0.0, 0.0, length("width"), length("height"))
    }

    /// `element.offsetHeight`
    pub fn offset_height(&mut self, element: NodeId) -> f64 {
        self.offset_rect(element).height
    }

    /// Number of layout passes forced so far
    pub fn layout_passes(&self) -> u64 {
        self.tree.layout().passes()
    }

    fn require_element(&self, node: NodeId) -> DomResult<()> {
        match self.tree.get(node) {
            Some(n) if n.is_element() => Ok(()),
            Some(_) => Err(DomError::NotAnElement(node)),
            None => Err(DomError::NotFound(node)),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
