//! DOM Node Operations
//!
//! Core node manipulation: append, prepend, insert-before, remove, deep clone.
//! Insertion always moves: a node that already has a parent is detached first.

use crate::node::{Node, NodeData};
use crate::{DomTree, NodeId};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found, or has no parent to be removed from
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    /// Insertion would create a cycle or place a node under a non-container
    #[error("Hierarchy request error: cannot insert {child} into {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Invalid tag, attribute or token name
    #[error("Invalid character in name: {0:?}")]
    InvalidCharacter(String),

    /// Unparseable selector or empty token
    #[error("Syntax error: {0:?}")]
    Syntax(String),

    /// Element-only operation applied to another node type
    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),
}

/// Validate a tag name passed to `create_element`
pub(crate) fn validate_element_name(name: &str) -> DomResult<()> {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return Err(DomError::InvalidCharacter(name.to_string())),
    }
    if chars.any(is_forbidden_name_char) {
        return Err(DomError::InvalidCharacter(name.to_string()));
    }
    Ok(())
}

/// Validate an attribute name passed to `set_attribute`
pub(crate) fn validate_attribute_name(name: &str) -> DomResult<()> {
    if name.is_empty() || name.chars().any(is_forbidden_name_char) {
        return Err(DomError::InvalidCharacter(name.to_string()));
    }
    Ok(())
}

fn is_forbidden_name_char(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\0' | '/' | '>' | '<' | '"' | '\'' | '=')
}

impl DomTree {
    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_before(parent, child, NodeId::NONE)
    }

    /// Insert `child` as the first child of `parent`
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let first = self.node(parent)?.first_child;
        self.insert_before(parent, child, first)
    }

    /// Insert `child` under `parent` before `reference` (`NONE` appends)
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) -> DomResult<()> {
        self.check_insertion(parent, child)?;

        let mut reference = reference;
        if reference.is_valid() && self.node(reference)?.parent != parent {
            return Err(DomError::NotFound(reference));
        }
        // Inserting a node before itself keeps its slot
        if reference == child {
            reference = self.node(child)?.next_sibling;
        }

        self.detach(child);

        let prev = if reference.is_valid() {
            self.nodes[reference.index()].prev_sibling
        } else {
            self.nodes[parent.index()].last_child
        };

        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = reference;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        if reference.is_valid() {
            self.nodes[reference.index()].prev_sibling = child;
        } else {
            self.nodes[parent.index()].last_child = child;
        }

        tracing::trace!(%parent, %child, "inserted node");
        self.layout.invalidate();
        Ok(())
    }

    /// Remove `node` from its parent. Fails if it has none.
    pub fn remove(&mut self, node: NodeId) -> DomResult<()> {
        if !self.node(node)?.parent.is_valid() {
            return Err(DomError::NotFound(node));
        }
        self.detach(node);
        tracing::trace!(%node, "removed node");
        Ok(())
    }

    /// Unlink `node` from its parent and siblings; no-op if already detached
    pub(crate) fn detach(&mut self, node: NodeId) {
        let Some(n) = self.nodes.get(node.index()) else {
            return;
        };
        let (parent, prev, next) = (n.parent, n.prev_sibling, n.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let n = &mut self.nodes[node.index()];
        n.parent = NodeId::NONE;
        n.prev_sibling = NodeId::NONE;
        n.next_sibling = NodeId::NONE;
        self.layout.invalidate();
    }

    /// Detach every child of `node`
    pub fn clear_children(&mut self, node: NodeId) -> DomResult<()> {
        self.node(node)?;
        while let Some(child) = self.nodes[node.index()].first_child.some() {
            self.detach(child);
        }
        Ok(())
    }

    /// Deep-clone `node` and its descendants. The clone is detached.
    pub fn clone_deep(&mut self, node: NodeId) -> DomResult<NodeId> {
        let data = match &self.node(node)?.data {
            NodeData::Document => return Err(DomError::NotAnElement(node)),
            data => data.clone(),
        };
        let copy = self.push(Node::new(data));

        let mut child = self.nodes[node.index()].first_child;
        while child.is_valid() {
            let child_copy = self.clone_deep(child)?;
            self.append_child(copy, child_copy)?;
            child = self.nodes[child.index()].next_sibling;
        }
        Ok(copy)
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;

        let container = matches!(parent_node.data, NodeData::Document | NodeData::Element(_));
        let insertable = !matches!(child_node.data, NodeData::Document);
        if !container || !insertable || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_element_name() {
        assert!(validate_element_name("div").is_ok());
        assert!(validate_element_name("my-widget").is_ok());
        assert!(validate_element_name("").is_err());
        assert!(validate_element_name("1abc").is_err());
        assert!(validate_element_name("a b").is_err());
        assert!(validate_element_name("a/b").is_err());
    }

    #[test]
    fn test_validate_attribute_name() {
        assert!(validate_attribute_name("data-x").is_ok());
        assert!(validate_attribute_name("").is_err());
        assert!(validate_attribute_name("a=b").is_err());
    }

    #[test]
    fn test_prepend_inserts_first() {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul").unwrap();
        let a = tree.create_element("li").unwrap();
        let b = tree.create_element("li").unwrap();
        tree.append_child(ul, a).unwrap();
        tree.prepend_child(ul, b).unwrap();

        let order: Vec<_> = tree.children(ul).map(|(id, _)| id).collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn test_append_moves_between_parents() {
        let mut tree = DomTree::new();
        let first = tree.create_element("div").unwrap();
        let second = tree.create_element("div").unwrap();
        let child = tree.create_element("span").unwrap();

        tree.append_child(first, child).unwrap();
        tree.append_child(second, child).unwrap();

        assert_eq!(tree.children(first).count(), 0);
        assert_eq!(tree.get(child).unwrap().parent, second);
    }

    #[test]
    fn test_insert_ancestor_is_rejected() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div").unwrap();
        let inner = tree.create_element("div").unwrap();
        tree.append_child(outer, inner).unwrap();

        assert!(matches!(
            tree.append_child(inner, outer),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert!(tree.append_child(outer, outer).is_err());
    }

    #[test]
    fn test_remove_detached_fails() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div").unwrap();
        assert_eq!(tree.remove(div), Err(DomError::NotFound(div)));
    }

    #[test]
    fn test_clone_deep_copies_subtree() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div").unwrap();
        let span = tree.create_element("span").unwrap();
        let text = tree.create_text("hi");
        tree.append_child(div, span).unwrap();
        tree.append_child(span, text).unwrap();
        tree.set_attribute(div, "id", "orig").unwrap();

        let copy = tree.clone_deep(div).unwrap();
        assert_ne!(copy, div);
        assert!(!tree.get(copy).unwrap().parent.is_valid());
        assert_eq!(tree.attribute(copy, "id"), Some("orig"));
        assert_eq!(tree.text_content(copy), "hi");
    }
}
