//! DOM Tree (arena-based allocation)

use std::borrow::Cow;

use crate::node::{Node, NodeData};
use crate::operations::{validate_attribute_name, validate_element_name};
use crate::{DomError, DomResult, InternedString, LayoutState, NodeId, StringInterner};

/// Arena-based DOM tree. Index 0 is always the document node.
#[derive(Debug)]
pub struct DomTree {
    pub(crate) nodes: Vec<Node>,
    interner: StringInterner,
    pub(crate) layout: LayoutState,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
            layout: LayoutState::default(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Get a node, or `NotFound`
    pub(crate) fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element. Names are ASCII-lowercased.
    pub fn create_element(&mut self, name: &str) -> DomResult<NodeId> {
        validate_element_name(name)?;
        let name = self.interner.intern(&lowercase(name));
        Ok(self.push(Node::element(name)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::new(NodeData::Comment(content.to_string())))
    }

    /// Access the interner
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Access the interner mutably
    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned name
    #[inline]
    pub fn resolve(&self, id: InternedString) -> &str {
        self.interner.get(id)
    }

    /// Tag name of an element, `None` for other node types
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| self.resolve(e.name))
    }

    /// Children of `id` as `(NodeId, &Node)` pairs
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Element children of `id`
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(|(_, node)| node.is_element())
            .map(|(id, _)| id)
    }

    /// All descendants of `id` in document (pre-)order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        stack.reverse();

        while let Some(current) = stack.pop() {
            out.push(current);
            let start = stack.len();
            stack.extend(self.children(current).map(|(c, _)| c));
            stack[start..].reverse();
        }
        out
    }

    /// Ancestors of `id`, nearest first, excluding `id`
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.get(id).map_or(NodeId::NONE, |n| n.parent);
        std::iter::from_fn(move || {
            let id = current.some()?;
            current = self.nodes[id.index()].parent;
            Some(id)
        })
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor == node || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Whether `id` is reachable from the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(NodeId::ROOT, id)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(t)) | Some(NodeData::Comment(t)) => t.clone(),
            Some(_) => self
                .descendants(id)
                .into_iter()
                .filter_map(|d| self.nodes[d.index()].as_text())
                .collect(),
            None => String::new(),
        }
    }

    /// Replace all children with a single text node (none if `text` is empty)
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        self.node(id)?;
        if let NodeData::Text(t) | NodeData::Comment(t) = &mut self.nodes[id.index()].data {
            *t = text.to_string();
            self.layout.invalidate();
            return Ok(());
        }
        self.clear_children(id)?;
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node)?;
        }
        Ok(())
    }

    /// Get an attribute value
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let name = self.interner.lookup(&lowercase(name))?;
        self.get(id)?.as_element()?.attrs.get(name)
    }

    /// Set an attribute value. Names are ASCII-lowercased.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        validate_attribute_name(name)?;
        self.node(id)?;
        let name = self.interner.intern(&lowercase(name));
        let element = self.nodes[id.index()]
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))?;
        element.attrs.set(name, value.to_string());
        tracing::trace!(node = %id, "set attribute");
        self.layout.invalidate();
        Ok(())
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let name = self.interner.lookup(&lowercase(name))?;
        let removed = self.get_mut(id)?.as_element_mut()?.attrs.remove(name);
        if removed.is_some() {
            self.layout.invalidate();
        }
        removed
    }

    /// Layout bookkeeping
    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }
}

/// ASCII-lowercase `name`, borrowing when it already is
fn lowercase(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.some()?;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_borrows_when_possible() {
        assert!(matches!(lowercase("data-state"), Cow::Borrowed("data-state")));
        assert!(matches!(lowercase("Data-State"), Cow::Owned(ref s) if s == "data-state"));
    }

    #[test]
    fn test_create_element_lowercases() {
        let mut tree = DomTree::new();
        let id = tree.create_element("DIV").unwrap();
        assert_eq!(tree.tag_name(id), Some("div"));
    }

    #[test]
    fn test_descendants_document_order() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a").unwrap();
        let b = tree.create_element("b").unwrap();
        let c = tree.create_element("i").unwrap();
        let d = tree.create_element("u").unwrap();
        tree.append_child(tree.root(), a).unwrap();
        tree.append_child(a, b).unwrap();
        tree.append_child(b, c).unwrap();
        tree.append_child(a, d).unwrap();

        assert_eq!(tree.descendants(tree.root()), vec![a, b, c, d]);
        assert_eq!(tree.descendants(a), vec![b, c, d]);
    }

    #[test]
    fn test_text_content_round() {
        let mut tree = DomTree::new();
        let p = tree.create_element("p").unwrap();
        let em = tree.create_element("em").unwrap();
        tree.append_child(p, em).unwrap();
        tree.set_text_content(em, "world").unwrap();
        let hello = tree.create_text("hello ");
        tree.prepend_child(p, hello).unwrap();

        assert_eq!(tree.text_content(p), "hello world");

        tree.set_text_content(p, "").unwrap();
        assert_eq!(tree.children(p).count(), 0);
    }

    #[test]
    fn test_attribute_case_insensitive_names() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div").unwrap();
        tree.set_attribute(div, "Data-State", "open").unwrap();
        assert_eq!(tree.attribute(div, "data-state"), Some("open"));
        assert_eq!(tree.remove_attribute(div, "DATA-STATE"), Some("open".to_string()));
        assert_eq!(tree.attribute(div, "data-state"), None);
    }

    #[test]
    fn test_set_attribute_on_text_fails() {
        let mut tree = DomTree::new();
        let text = tree.create_text("x");
        assert_eq!(tree.set_attribute(text, "id", "a"), Err(DomError::NotAnElement(text)));
    }
}
