//! HTML serialization
//!
//! `innerHTML` / `outerHTML` getters following the HTML fragment
//! serialization algorithm.

use crate::node::NodeData;
use crate::{DomTree, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "source", "track", "wbr",
];

/// Elements whose text children are emitted without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Serialize the children of `id`
pub fn inner_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    for (child, _) in tree.children(id) {
        write_node(tree, child, &mut out);
    }
    out
}

/// Serialize `id` itself, including its own tag
pub fn outer_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

fn write_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for (child, _) in tree.children(id) {
                write_node(tree, child, out);
            }
        }
        NodeData::Element(element) => {
            let tag = tree.resolve(element.name);
            out.push('<');
            out.push_str(tag);
            for attr in element.attrs.iter() {
                out.push(' ');
                out.push_str(tree.resolve(attr.name));
                out.push_str("=\"");
                escape(&attr.value, true, out);
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }
            for (child, _) in tree.children(id) {
                write_node(tree, child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        NodeData::Text(text) => {
            let raw = tree
                .get(node.parent)
                .and_then(|p| p.as_element())
                .is_some_and(|p| RAW_TEXT_ELEMENTS.contains(&tree.resolve(p.name)));
            if raw {
                out.push_str(text);
            } else {
                escape(text, false, out);
            }
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

fn escape(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_nested() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div").unwrap();
        let br = tree.create_element("br").unwrap();
        let text = tree.create_text("a < b & c");
        tree.set_attribute(div, "title", "say \"hi\"").unwrap();
        tree.append_child(div, text).unwrap();
        tree.append_child(div, br).unwrap();

        assert_eq!(inner_html(&tree, div), "a &lt; b &amp; c<br>");
        assert_eq!(
            outer_html(&tree, div),
            "<div title=\"say &quot;hi&quot;\">a &lt; b &amp; c<br></div>"
        );
    }

    #[test]
    fn test_raw_text_and_comments() {
        let mut tree = DomTree::new();
        let style = tree.create_element("style").unwrap();
        let css = tree.create_text("a > b {}");
        tree.append_child(style, css).unwrap();
        let note = tree.create_comment(" note ");
        let div = tree.create_element("div").unwrap();
        tree.append_child(div, style).unwrap();
        tree.append_child(div, note).unwrap();

        assert_eq!(inner_html(&tree, div), "<style>a > b {}</style><!-- note -->");
    }
}
