//! `e-dom` binding
//!
//! `Page` owns a `Document` behind a `RefCell` so collections can share it
//! and still mutate it through `&self`.

use std::cell::{Ref, RefCell, RefMut};

use e_dom::{Document, DomError, NodeId};
use e_html::{HtmlConfig, HtmlParser, ParseError};

use crate::{Collection, DomHost, Target};

/// Errors raised by the `e-dom` host
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Html(#[from] ParseError),
}

/// A document that collections can operate on
#[derive(Debug)]
pub struct Page {
    document: RefCell<Document>,
    parser: HtmlParser,
}

impl Page {
    /// Page with an empty `<html><head></head><body></body></html>`
    pub fn new(url: &str) -> Self {
        Self::from_document(Document::new(url))
    }

    /// Wrap an existing document
    pub fn from_document(document: Document) -> Self {
        Self::with_config(document, HtmlConfig::default())
    }

    /// Wrap an existing document; `config` applies to `set_html` parsing
    pub fn with_config(document: Document, config: HtmlConfig) -> Self {
        Self {
            document: RefCell::new(document),
            parser: HtmlParser::with_config(config),
        }
    }

    /// Parse a whole HTML document
    pub fn parse(html: &str) -> Result<Self, PageError> {
        Self::parse_with_config(html, HtmlConfig::default())
    }

    /// Parse a whole HTML document with explicit parser configuration
    pub fn parse_with_config(html: &str, config: HtmlConfig) -> Result<Self, PageError> {
        let parser = HtmlParser::with_config(config);
        let document = parser.parse(html)?;
        Ok(Self {
            document: RefCell::new(document),
            parser,
        })
    }

    /// Borrow the document
    pub fn document(&self) -> Ref<'_, Document> {
        self.document.borrow()
    }

    /// Borrow the document mutably
    pub fn document_mut(&self) -> RefMut<'_, Document> {
        self.document.borrow_mut()
    }

    /// Unwrap the document
    pub fn into_document(self) -> Document {
        self.document.into_inner()
    }

    /// `Collection::new(self, target)`
    pub fn select<'a>(&self, target: impl Into<Target<'a, NodeId>>) -> Result<Collection<'_, Self>, PageError> {
        Collection::new(self, target)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

impl DomHost for Page {
    type Handle = NodeId;
    type Error = PageError;

    fn create_element(&self, tag: &str) -> Result<NodeId, PageError> {
        Ok(self.document_mut().create_element(tag)?)
    }

    fn query_all(&self, scope: Option<NodeId>, selector: &str) -> Result<Vec<NodeId>, PageError> {
        Ok(self.document().query_selector_all(scope, selector)?)
    }

    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, PageError> {
        Ok(self.document().matches(element, selector)?)
    }

    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, PageError> {
        Ok(self.document().closest(element, selector)?)
    }

    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), PageError> {
        Ok(self.document_mut().tree_mut().append_child(parent, child)?)
    }

    fn prepend_child(&self, parent: NodeId, child: NodeId) -> Result<(), PageError> {
        Ok(self.document_mut().tree_mut().prepend_child(parent, child)?)
    }

    fn remove(&self, node: NodeId) -> Result<(), PageError> {
        Ok(self.document_mut().tree_mut().remove(node)?)
    }

    fn clone_deep(&self, node: NodeId) -> Result<NodeId, PageError> {
        Ok(self.document_mut().tree_mut().clone_deep(node)?)
    }

    fn add_class(&self, element: NodeId, token: &str) -> Result<(), PageError> {
        Ok(self.document_mut().add_class(element, token)?)
    }

    fn remove_class(&self, element: NodeId, token: &str) -> Result<(), PageError> {
        Ok(self.document_mut().remove_class(element, token)?)
    }

    fn toggle_class(&self, element: NodeId, token: &str) -> Result<bool, PageError> {
        Ok(self.document_mut().toggle_class(element, token)?)
    }

    fn has_class(&self, element: NodeId, token: &str) -> bool {
        self.document().has_class(element, token)
    }

    fn attribute(&self, element: NodeId, name: &str) -> Option<String> {
        self.document().attribute(element, name).map(str::to_string)
    }

    fn set_attribute(&self, element: NodeId, name: &str, value: &str) -> Result<(), PageError> {
        Ok(self.document_mut().set_attribute(element, name, value)?)
    }

    fn text_content(&self, node: NodeId) -> String {
        self.document().text_content(node)
    }

    fn set_text_content(&self, node: NodeId, text: &str) -> Result<(), PageError> {
        Ok(self.document_mut().set_text_content(node, text)?)
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.document().inner_html(node)
    }

    fn set_inner_html(&self, node: NodeId, markup: &str) -> Result<(), PageError> {
        let mut document = self.document_mut();
        let tree = document.tree_mut();
        tree.clear_children(node)?;
        if !markup.is_empty() {
            self.parser.parse_fragment_into(tree, node, markup)?;
        }
        Ok(())
    }

    fn set_style_property(&self, element: NodeId, name: &str, value: &str) -> Result<(), PageError> {
        Ok(self.document_mut().set_style_property(element, name, value)?)
    }

    fn force_layout(&self, element: NodeId) -> f64 {
        self.document_mut().offset_height(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page() {
        let page = Page::parse("<ul><li>a</li><li>b</li></ul>").unwrap();
        assert_eq!(page.query_all(None, "li").unwrap().len(), 2);
    }

    #[test]
    fn test_set_inner_html_replaces_children() {
        let page = Page::default();
        let body = page.document().body();

        page.set_inner_html(body, "<p>one</p>").unwrap();
        page.set_inner_html(body, "<p>two</p><p>three</p>").unwrap();
        assert_eq!(page.inner_html(body), "<p>two</p><p>three</p>");

        page.set_inner_html(body, "").unwrap();
        assert_eq!(page.inner_html(body), "");
    }

    #[test]
    fn test_errors_pass_through() {
        let page = Page::default();
        assert!(matches!(
            page.create_element("not valid"),
            Err(PageError::Dom(DomError::InvalidCharacter(_)))
        ));
        assert!(matches!(
            page.query_all(None, "div >"),
            Err(PageError::Dom(DomError::Syntax(_)))
        ));
    }

    #[test]
    fn test_into_document() {
        let page = Page::new("https://example.com/");
        let div = page.create_element("div").unwrap();
        let body = page.document().body();
        page.append_child(body, div).unwrap();

        let document = page.into_document();
        assert_eq!(document.url(), "https://example.com/");
        assert_eq!(document.inner_html(document.body()), "<div></div>");
    }
}
