//! Host DOM capability
//!
//! Everything a collection does to the document goes through this trait.
//! Methods take `&self`: the host owns the tree and its interior
//! mutability, and runs on a single thread.

use std::fmt::Debug;

/// DOM operations a [`Collection`](crate::Collection) needs from its host
pub trait DomHost {
    /// Opaque reference to one node in the host tree
    type Handle: Copy + Eq + Debug;
    /// Failure raised by the host (invalid names, bad selectors, ...)
    type Error: std::error::Error;

    /// Create a detached element with the given tag name
    fn create_element(&self, tag: &str) -> Result<Self::Handle, Self::Error>;

    /// All elements matching `selector` under `scope` (the whole document
    /// if `None`), in document order. The result is a snapshot.
    fn query_all(&self, scope: Option<Self::Handle>, selector: &str) -> Result<Vec<Self::Handle>, Self::Error>;

    /// Whether `element` matches `selector`
    fn matches(&self, element: Self::Handle, selector: &str) -> Result<bool, Self::Error>;

    /// Nearest inclusive ancestor of `element` matching `selector`
    fn closest(&self, element: Self::Handle, selector: &str) -> Result<Option<Self::Handle>, Self::Error>;

    /// Move `child` to the end of `parent`
    fn append_child(&self, parent: Self::Handle, child: Self::Handle) -> Result<(), Self::Error>;

    /// Move `child` to the start of `parent`
    fn prepend_child(&self, parent: Self::Handle, child: Self::Handle) -> Result<(), Self::Error>;

    /// Detach `node` from its parent; fails if it has none
    fn remove(&self, node: Self::Handle) -> Result<(), Self::Error>;

    /// Detached deep copy of `node`
    fn clone_deep(&self, node: Self::Handle) -> Result<Self::Handle, Self::Error>;

    fn add_class(&self, element: Self::Handle, token: &str) -> Result<(), Self::Error>;
    fn remove_class(&self, element: Self::Handle, token: &str) -> Result<(), Self::Error>;
    /// Toggle `token`, returning whether it is now present
    fn toggle_class(&self, element: Self::Handle, token: &str) -> Result<bool, Self::Error>;
    fn has_class(&self, element: Self::Handle, token: &str) -> bool;

    fn attribute(&self, element: Self::Handle, name: &str) -> Option<String>;
    fn set_attribute(&self, element: Self::Handle, name: &str, value: &str) -> Result<(), Self::Error>;

    fn text_content(&self, node: Self::Handle) -> String;
    fn set_text_content(&self, node: Self::Handle, text: &str) -> Result<(), Self::Error>;

    fn inner_html(&self, node: Self::Handle) -> String;
    /// Replace the children of `node` with parsed `markup`, unsanitized
    fn set_inner_html(&self, node: Self::Handle, markup: &str) -> Result<(), Self::Error>;

    /// Set one inline style property (camelCase or kebab-case name)
    fn set_style_property(&self, element: Self::Handle, name: &str, value: &str) -> Result<(), Self::Error>;

    /// Read a box metric, flushing pending layout first
    fn force_layout(&self, element: Self::Handle) -> f64;
}
