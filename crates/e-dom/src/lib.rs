//! E DOM - Document Object Model
//!
//! Arena-backed DOM tree that serves as the host for E collections.
//! Nodes are addressed by `NodeId` and never freed; detached subtrees
//! simply stop being reachable from the document root.

mod attributes;
mod classlist;
mod document;
mod geometry;
mod interner;
mod node;
mod operations;
mod selector;
mod serialize;
mod style;
mod tree;

pub use attributes::{Attr, Attributes};
pub use classlist::TokenList;
pub use document::Document;
pub use geometry::{LayoutState, Rect};
pub use interner::{InternedString, StringInterner};
pub use node::{ElementData, Node, NodeData};
pub use operations::{DomError, DomResult};
pub use selector::{AttrOp, Combinator, Compound, SelectorList, SimpleSelector};
pub use serialize::{inner_html, outer_html};
pub use style::StyleDeclaration;
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this ID points at a node (is not `NONE`)
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// `Some(self)` unless this is the `NONE` sentinel
    #[inline]
    pub fn some(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#none")
        }
    }
}
