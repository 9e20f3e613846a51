//! Edge case and stress tests for e-html
//!
//! Malformed content, unusual input and deep nesting.

use e_dom::DomTree;
use e_html::HtmlParser;

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_parse_empty_string() {
    let doc = HtmlParser::new().parse("").unwrap();
    // html5ever still builds html/head/body
    assert!(doc.document_element().is_valid());
    assert!(doc.body().is_valid());
}

#[test]
fn test_parse_null_bytes() {
    let doc = HtmlParser::new().parse("Hello\0World").unwrap();
    assert!(doc.tree().len() > 1);
}

#[test]
fn test_parse_only_whitespace() {
    let doc = HtmlParser::new().parse("   \t\n\r\n   ").unwrap();
    assert!(doc.tree().len() >= 1);
}

#[test]
fn test_parse_only_doctype() {
    let doc = HtmlParser::new().parse("<!DOCTYPE html>").unwrap();
    // Doctype is dropped, the skeleton remains
    assert_eq!(doc.tree().element_children(doc.tree().root()).count(), 1);
}

// ============================================================================
// MALFORMED HTML
// ============================================================================

#[test]
fn test_parse_unclosed_tags() {
    let doc = HtmlParser::new().parse("<div><p><span>text").unwrap();
    assert_eq!(doc.inner_html(doc.body()), "<div><p><span>text</span></p></div>");
}

#[test]
fn test_parse_mismatched_tags() {
    let doc = HtmlParser::new().parse("<div><p></div></p>").unwrap();
    assert!(doc.query_selector(None, "div").unwrap().is_some());
}

#[test]
fn test_parse_extra_closing_tags() {
    let doc = HtmlParser::new().parse("<div></div></div></div></div>").unwrap();
    assert_eq!(doc.query_selector_all(None, "div").unwrap().len(), 1);
}

#[test]
fn test_parse_nested_paragraphs_are_siblings() {
    let doc = HtmlParser::new().parse("<p><p><p>text").unwrap();
    assert_eq!(doc.query_selector_all(None, "body > p").unwrap().len(), 3);
}

#[test]
fn test_parse_uppercase_tags_and_attributes() {
    let doc = HtmlParser::new().parse("<DIV ID=\"Main\" CLASS=\"A\">x</DIV>").unwrap();
    let div = doc.get_element_by_id("Main").unwrap();
    assert_eq!(doc.tree().tag_name(div), Some("div"));
    assert!(doc.has_class(div, "A"));
}

#[test]
fn test_parse_duplicate_attributes_keeps_first() {
    let doc = HtmlParser::new().parse("<p title=\"one\" title=\"two\">x</p>").unwrap();
    let p = doc.query_selector(None, "p").unwrap().unwrap();
    assert_eq!(doc.attribute(p, "title"), Some("one"));
}

// ============================================================================
// FRAGMENTS
// ============================================================================

#[test]
fn test_fragment_empty_markup() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div").unwrap();
    let appended = HtmlParser::new().parse_fragment_into(&mut tree, div, "").unwrap();
    assert_eq!(appended, 0);
    assert_eq!(tree.children(div).count(), 0);
}

#[test]
fn test_fragment_ignores_document_level_tags() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div").unwrap();
    HtmlParser::new()
        .parse_fragment_into(&mut tree, div, "<html><body><p>x</p></body></html>")
        .unwrap();
    assert_eq!(e_dom::inner_html(&tree, div), "<p>x</p>");
}

#[test]
fn test_fragment_into_text_node_fails() {
    let mut tree = DomTree::new();
    let text = tree.create_text("leaf");
    assert!(HtmlParser::new().parse_fragment_into(&mut tree, text, "<b>x</b>").is_err());
}

// ============================================================================
// STRESS
// ============================================================================

#[test]
fn test_parse_deep_nesting() {
    let depth = 500;
    let html = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
    let doc = HtmlParser::new().parse(&html).unwrap();
    assert_eq!(doc.query_selector_all(None, "div").unwrap().len(), depth);
}

#[test]
fn test_parse_many_siblings() {
    let html = "<li>item</li>".repeat(2000);
    let doc = HtmlParser::new().parse(&format!("<ul>{html}</ul>")).unwrap();
    assert_eq!(doc.query_selector_all(None, "ul > li").unwrap().len(), 2000);
}
