//! The fluent collection
//!
//! Traversal derives a new collection, mutators act on every held element
//! and hand back the receiver, accessors read from the first element.
//! Every method short-circuits on an empty collection without touching
//! the host.

use std::borrow::Cow;
use std::fmt;

use crate::target::{Construction, Target};
use crate::DomHost;

/// Ordered handles to elements of one host document
pub struct Collection<'d, H: DomHost> {
    host: &'d H,
    handles: Vec<H::Handle>,
}

/// Argument to [`Collection::filter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterBy<'a> {
    /// Keep everything (returns the receiver itself)
    Any,
    /// Keep elements matching a selector
    Selector(&'a str),
    /// Keep only the element at this position
    Index(usize),
}

impl<'a> From<&'a str> for FilterBy<'a> {
    fn from(selector: &'a str) -> Self {
        FilterBy::Selector(selector)
    }
}

impl From<usize> for FilterBy<'_> {
    fn from(index: usize) -> Self {
        FilterBy::Index(index)
    }
}

impl<'a, T: Into<FilterBy<'a>>> From<Option<T>> for FilterBy<'a> {
    fn from(by: Option<T>) -> Self {
        by.map_or(FilterBy::Any, Into::into)
    }
}

impl<'d, H: DomHost> Collection<'d, H> {
    /// Build a collection from any supported input.
    ///
    /// `"<tag>"` creates one detached element, other strings query the
    /// whole document, sequences are taken as-is and a single handle
    /// becomes a one-element collection. Empty input gives an empty
    /// collection. Host failures (bad tag name, bad selector) propagate.
    pub fn new<'a>(host: &'d H, target: impl Into<Target<'a, H::Handle>>) -> Result<Self, H::Error> {
        let handles = match target.into().classify() {
            Construction::Empty => Vec::new(),
            Construction::CreateTag(tag) => vec![host.create_element(&tag)?],
            Construction::QuerySelector(selector) => host.query_all(None, selector)?,
            Construction::FromSequence(handles) => handles,
            Construction::FromSingle(handle) => vec![handle],
        };
        tracing::trace!(len = handles.len(), "built collection");
        Ok(Self { host, handles })
    }

    /// An empty collection bound to `host`
    pub fn empty(host: &'d H) -> Self {
        Self {
            host,
            handles: Vec::new(),
        }
    }

    /// The host this collection operates on
    pub fn host(&self) -> &'d H {
        self.host
    }

    fn derive(&self, handles: Vec<H::Handle>) -> Self {
        Self {
            host: self.host,
            handles,
        }
    }

    fn first(&self) -> Option<H::Handle> {
        self.handles.first().copied()
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Narrow the collection.
    ///
    /// `FilterBy::Any` returns the receiver itself (`Cow::Borrowed`); a
    /// selector keeps matching elements in order; an index keeps the one
    /// element at that position, or nothing if out of range.
    pub fn filter<'a>(&self, by: impl Into<FilterBy<'a>>) -> Result<Cow<'_, Self>, H::Error> {
        if self.handles.is_empty() {
            return Ok(Cow::Borrowed(self));
        }

        match by.into() {
            FilterBy::Any => Ok(Cow::Borrowed(self)),
            FilterBy::Selector(selector) => {
                let mut kept = Vec::with_capacity(self.handles.len());
                for &handle in &self.handles {
                    if self.host.matches(handle, selector)? {
                        kept.push(handle);
                    }
                }
                Ok(Cow::Owned(self.derive(kept)))
            }
            FilterBy::Index(index) => {
                let kept = self.handles.get(index).copied().into_iter().collect();
                Ok(Cow::Owned(self.derive(kept)))
            }
        }
    }

    /// Descendants of the first element matching `selector`.
    /// Only the first element's subtree is searched.
    pub fn find(&self, selector: &str) -> Result<Self, H::Error> {
        match self.first() {
            Some(root) if !selector.is_empty() => {
                Ok(self.derive(self.host.query_all(Some(root), selector)?))
            }
            _ => Ok(self.derive(Vec::new())),
        }
    }

    /// Nearest inclusive ancestor of the first element matching `selector`
    pub fn closest(&self, selector: &str) -> Result<Self, H::Error> {
        match self.first() {
            Some(start) if !selector.is_empty() => {
                let found = self.host.closest(start, selector)?;
                Ok(self.derive(found.into_iter().collect()))
            }
            _ => Ok(self.derive(Vec::new())),
        }
    }

    // ========================================================================
    // Structural mutation
    // ========================================================================

    /// Append every child into every held element.
    ///
    /// A node has one parent, so a child appended into several elements
    /// ends up in the last one.
    pub fn append<'a>(&self, children: impl Into<Target<'a, H::Handle>>) -> Result<&Self, H::Error> {
        self.insert_children(children, H::append_child)
    }

    /// Prepend every child into every held element, one at a time, so
    /// later children land in front of earlier ones
    pub fn prepend<'a>(&self, children: impl Into<Target<'a, H::Handle>>) -> Result<&Self, H::Error> {
        self.insert_children(children, H::prepend_child)
    }

    /// Append every held element into every parent
    pub fn append_to<'a>(&self, parents: impl Into<Target<'a, H::Handle>>) -> Result<&Self, H::Error> {
        self.insert_into(parents, H::append_child)
    }

    /// Prepend every held element into every parent
    pub fn prepend_to<'a>(&self, parents: impl Into<Target<'a, H::Handle>>) -> Result<&Self, H::Error> {
        self.insert_into(parents, H::prepend_child)
    }

    fn insert_children<'a, F>(&self, children: impl Into<Target<'a, H::Handle>>, insert: F) -> Result<&Self, H::Error>
    where
        F: Fn(&H, H::Handle, H::Handle) -> Result<(), H::Error>,
    {
        if self.handles.is_empty() {
            return Ok(self);
        }
        let children = Collection::new(self.host, children)?;
        for &parent in &self.handles {
            for &child in &children.handles {
                insert(self.host, parent, child)?;
            }
        }
        Ok(self)
    }

    fn insert_into<'a, F>(&self, parents: impl Into<Target<'a, H::Handle>>, insert: F) -> Result<&Self, H::Error>
    where
        F: Fn(&H, H::Handle, H::Handle) -> Result<(), H::Error>,
    {
        if self.handles.is_empty() {
            return Ok(self);
        }
        let parents = Collection::new(self.host, parents)?;
        for &node in &self.handles {
            for &parent in &parents.handles {
                insert(self.host, parent, node)?;
            }
        }
        Ok(self)
    }

    /// Detached deep copies of every held element, in order
    pub fn deep_clone(&self) -> Result<Self, H::Error> {
        let clones = self
            .handles
            .iter()
            .map(|&handle| self.host.clone_deep(handle))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.derive(clones))
    }

    /// Detach every held element from its parent.
    /// Fails on the first element that has no parent.
    pub fn remove(&self) -> Result<(), H::Error> {
        for &handle in &self.handles {
            self.host.remove(handle)?;
        }
        Ok(())
    }

    // ========================================================================
    // Classes
    // ========================================================================

    pub fn add_class(&self, name: &str) -> Result<&Self, H::Error> {
        self.each_class(name, H::add_class)
    }

    pub fn remove_class(&self, name: &str) -> Result<&Self, H::Error> {
        self.each_class(name, H::remove_class)
    }

    /// Toggle `name` on each element based on that element's own state
    pub fn toggle_class(&self, name: &str) -> Result<&Self, H::Error> {
        self.each_class(name, |host, handle, name| host.toggle_class(handle, name).map(drop))
    }

    /// Whether any held element carries class `name`
    pub fn has_class(&self, name: &str) -> bool {
        !name.is_empty() && self.handles.iter().any(|&h| self.host.has_class(h, name))
    }

    fn each_class<F>(&self, name: &str, apply: F) -> Result<&Self, H::Error>
    where
        F: Fn(&H, H::Handle, &str) -> Result<(), H::Error>,
    {
        if name.is_empty() {
            return Ok(self);
        }
        for &handle in &self.handles {
            apply(self.host, handle, name)?;
        }
        Ok(self)
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Set `key` (or `data-{namespace}-{key}`) on every element.
    /// Skipped when `key` or `value` is empty.
    pub fn set_attr(&self, key: &str, value: &str, namespace: Option<&str>) -> Result<&Self, H::Error> {
        if self.handles.is_empty() || key.is_empty() || value.is_empty() {
            return Ok(self);
        }
        let key = attribute_key(key, namespace);
        for &handle in &self.handles {
            self.host.set_attribute(handle, &key, value)?;
        }
        Ok(self)
    }

    /// Read `key` (or `data-{namespace}-{key}`) from the first element
    pub fn attr(&self, key: &str, namespace: Option<&str>) -> Option<String> {
        let first = self.first()?;
        if key.is_empty() {
            return None;
        }
        self.host.attribute(first, &attribute_key(key, namespace))
    }

    /// Alternate each element's attribute between `values[0]` and
    /// `values[1]`, starting with `values[1]`. Skipped unless exactly two
    /// values are given.
    pub fn toggle_attr(&self, key: &str, values: &[&str], namespace: Option<&str>) -> Result<&Self, H::Error> {
        let &[first, second] = values else {
            return Ok(self);
        };
        if self.handles.is_empty() {
            return Ok(self);
        }

        let key = attribute_key(key, namespace);
        for &handle in &self.handles {
            let next = match self.host.attribute(handle, &key) {
                Some(current) if current == second => first,
                _ => second,
            };
            self.host.set_attribute(handle, &key, next)?;
        }
        Ok(self)
    }

    // ========================================================================
    // Text and markup
    // ========================================================================

    pub fn set_text(&self, text: &str) -> Result<&Self, H::Error> {
        for &handle in &self.handles {
            self.host.set_text_content(handle, text)?;
        }
        Ok(self)
    }

    /// Text content of the first element
    pub fn text(&self) -> Option<String> {
        self.first().map(|handle| self.host.text_content(handle))
    }

    /// Replace every element's children with `markup`. Not sanitized.
    pub fn set_html(&self, markup: &str) -> Result<&Self, H::Error> {
        for &handle in &self.handles {
            self.host.set_inner_html(handle, markup)?;
        }
        Ok(self)
    }

    /// Markup content of the first element
    pub fn html(&self) -> Option<String> {
        self.first().map(|handle| self.host.inner_html(handle))
    }

    // ========================================================================
    // Style and layout
    // ========================================================================

    /// Apply every `(property, value)` pair to every element's inline style
    pub fn css<I, K, V>(&self, styles: I) -> Result<&Self, H::Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if self.handles.is_empty() {
            return Ok(self);
        }
        let styles: Vec<(K, V)> = styles.into_iter().collect();
        for &handle in &self.handles {
            for (property, value) in &styles {
                self.host
                    .set_style_property(handle, property.as_ref(), value.as_ref())?;
            }
        }
        Ok(self)
    }

    /// Force a layout read on every element, flushing pending style changes
    pub fn repaint(&self) -> &Self {
        for &handle in &self.handles {
            let height = self.host.force_layout(handle);
            tracing::trace!(?handle, height, "forced layout");
        }
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Every held handle, in order
    pub fn nodes(&self) -> &[H::Handle] {
        &self.handles
    }

    /// Handle at `index`, `None` when out of range
    pub fn get(&self, index: usize) -> Option<H::Handle> {
        self.handles.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = H::Handle> + '_ {
        self.handles.iter().copied()
    }
}

fn attribute_key<'k>(key: &'k str, namespace: Option<&str>) -> Cow<'k, str> {
    match namespace {
        Some(ns) if !ns.is_empty() => Cow::Owned(format!("data-{ns}-{key}")),
        _ => Cow::Borrowed(key),
    }
}

impl<H: DomHost> Clone for Collection<'_, H> {
    fn clone(&self) -> Self {
        self.derive(self.handles.clone())
    }
}

impl<H: DomHost> fmt::Debug for Collection<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.handles).finish()
    }
}

impl<'c, H: DomHost> IntoIterator for &'c Collection<'_, H> {
    type Item = H::Handle;
    type IntoIter = std::iter::Copied<std::slice::Iter<'c, H::Handle>>;

    fn into_iter(self) -> Self::IntoIter {
        self.handles.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Page, PageError};

    #[test]
    fn test_attribute_key() {
        assert_eq!(attribute_key("state", None), "state");
        assert_eq!(attribute_key("state", Some("")), "state");
        assert_eq!(attribute_key("state", Some("menu")), "data-menu-state");
    }

    #[test]
    fn test_filter_any_is_identity() -> Result<(), PageError> {
        let page = Page::parse("<p>a</p><p>b</p>")?;
        let ps = page.select("p")?;

        let same = ps.filter(FilterBy::Any)?;
        assert!(matches!(same, Cow::Borrowed(c) if std::ptr::eq(c, &ps)));

        let none: Option<&str> = None;
        assert!(matches!(ps.filter(none)?, Cow::Borrowed(_)));
        Ok(())
    }

    #[test]
    fn test_filter_by_index() -> Result<(), PageError> {
        let page = Page::parse("<p>a</p><p>b</p>")?;
        let ps = page.select("p")?;

        let second = ps.filter(1usize)?;
        assert_eq!(second.nodes(), &[ps.nodes()[1]]);
        assert!(ps.filter(5usize)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_toggle_attr_needs_exactly_two_values() -> Result<(), PageError> {
        let page = Page::default();
        let div = page.select("<div>")?;

        div.toggle_attr("state", &["on"], None)?;
        div.toggle_attr("state", &["a", "b", "c"], None)?;
        assert_eq!(div.attr("state", None), None);
        Ok(())
    }

    #[test]
    fn test_iteration() -> Result<(), PageError> {
        let page = Page::parse("<i></i><i></i><i></i>")?;
        let items = page.select("i")?;

        let collected: Vec<_> = (&items).into_iter().collect();
        assert_eq!(collected, items.nodes());
        assert_eq!(items.iter().count(), 3);
        assert_eq!(items.get(3), None);
        Ok(())
    }
}
