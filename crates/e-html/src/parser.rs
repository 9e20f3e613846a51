//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts the result into our arena tree.

use e_dom::{Document, DomTree, NodeId};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{local_name, ns, parse_document, parse_fragment, LocalName, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::{HtmlConfig, ParseError};

/// HTML5 parser
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    config: HtmlConfig,
}

impl HtmlParser {
    /// Create a parser with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with explicit configuration
    pub fn with_config(config: HtmlConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &HtmlConfig {
        &self.config
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), self.opts()).one(html);

        let mut document = Document::empty(url);
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root)?;
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Parse `markup` the way `innerHTML` does, with `parent` as the context
    /// element, and append the resulting nodes under `parent`. Non-element
    /// parents parse in a `<body>` context. Returns the number of top-level
    /// nodes appended.
    pub fn parse_fragment_into(&self, tree: &mut DomTree, parent: NodeId, markup: &str) -> Result<usize, ParseError> {
        let context_name = tree
            .tag_name(parent)
            .map_or(local_name!("body"), LocalName::from);
        let context = QualName::new(None, ns!(html), context_name);
        let dom = parse_fragment(
            RcDom::default(),
            self.opts(),
            context,
            Vec::new(),
            self.config.scripting,
        )
        .one(markup);

        // Fragment output hangs off a synthetic <html> element
        let document_children = dom.document.children.borrow();
        let root = document_children.first().ok_or(ParseError::MissingRoot)?;

        let before = tree.children(parent).count();
        for child in root.children.borrow().iter() {
            self.convert_node(child, tree, parent)?;
        }
        let appended = tree.children(parent).count() - before;

        tracing::debug!(parent = %parent, appended, "Parsed HTML fragment");
        Ok(appended)
    }

    fn opts(&self) -> ParseOpts {
        ParseOpts {
            tree_builder: TreeBuilderOpts {
                scripting_enabled: self.config.scripting,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Convert an RcDom node (and its subtree) into `tree` under `parent`
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> Result<(), ParseError> {
        match &handle.data {
            RcNodeData::Document => {
                self.convert_children(handle, tree, parent)?;
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                if self.config.keep_whitespace_text || !text.trim().is_empty() {
                    let id = tree.create_text(&text);
                    tree.append_child(parent, id)?;
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Element { name, attrs, template_contents, .. } => {
                let id = match tree.create_element(&name.local) {
                    Ok(id) => id,
                    Err(err) => {
                        // Keep the content even if the tag name is unusable
                        tracing::debug!("Skipping element <{}>: {}", &*name.local, err);
                        return self.convert_children(handle, tree, parent);
                    }
                };

                for attr in attrs.borrow().iter() {
                    if let Err(err) = tree.set_attribute(id, &attr.name.local, &attr.value) {
                        tracing::debug!("Skipping attribute {}: {}", &*attr.name.local, err);
                    }
                }
                tree.append_child(parent, id)?;

                if let Some(contents) = template_contents.borrow().as_ref() {
                    self.convert_children(contents, tree, id)?;
                }
                self.convert_children(handle, tree, id)?;
            }
            RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {
                // Not represented in the arena tree
            }
        }
        Ok(())
    }

    fn convert_children(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> Result<(), ParseError> {
        for child in handle.children.borrow().iter() {
            self.convert_node(child, tree, parent)?;
        }
        Ok(())
    }
}
