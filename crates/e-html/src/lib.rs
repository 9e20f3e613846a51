//! E HTML Parser
//!
//! HTML5 document and fragment parsing built on html5ever. Parsed output is
//! converted into `e-dom` nodes.

mod config;
mod parser;

pub use config::HtmlConfig;
pub use parser::HtmlParser;

use e_dom::{Document, DomError, DomTree, NodeId};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse `markup` as body content and append the result under `parent`
pub fn parse_fragment_into(tree: &mut DomTree, parent: NodeId, markup: &str) -> Result<usize, ParseError> {
    HtmlParser::new().parse_fragment_into(tree, parent, markup)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to build tree: {0}")]
    Dom(#[from] DomError),

    #[error("Fragment parse produced no root element")]
    MissingRoot,
}
