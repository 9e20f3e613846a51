//! Comprehensive tests for e-html
//!
//! Document parsing, fragment parsing and conversion into the arena tree.

use e_dom::{DomTree, NodeData};
use e_html::{HtmlConfig, HtmlParser};

#[test]
fn test_parse_full_document() {
    let html = r#"<!DOCTYPE html>
<html lang="en">
  <head><title> Hello </title></head>
  <body><main id="app"><h1>Title</h1><p class="lead">Body</p></main></body>
</html>"#;
    let doc = e_html::parse(html).unwrap();

    assert_eq!(doc.title(), "Hello");
    assert_eq!(doc.attribute(doc.document_element(), "lang"), Some("en"));
    let app = doc.get_element_by_id("app").unwrap();
    assert_eq!(doc.query_selector_all(Some(app), "*").unwrap().len(), 2);
    assert!(doc.has_class(doc.query_selector(None, "p").unwrap().unwrap(), "lead"));
}

#[test]
fn test_parse_with_url() {
    let doc = HtmlParser::new()
        .parse_with_url("<p>x</p>", "https://example.com/page")
        .unwrap();
    assert_eq!(doc.url(), "https://example.com/page");
}

#[test]
fn test_attributes_preserved_in_order() {
    let doc = e_html::parse(r#"<a href="/x" title="t" data-role="link">x</a>"#).unwrap();
    let a = doc.query_selector(None, "a").unwrap().unwrap();
    assert_eq!(
        doc.outer_html(a),
        r#"<a href="/x" title="t" data-role="link">x</a>"#
    );
}

#[test]
fn test_comments_are_kept() {
    let doc = e_html::parse("<div><!-- note --><p>x</p></div>").unwrap();
    let div = doc.query_selector(None, "div").unwrap().unwrap();
    let first = doc.tree().children(div).next().unwrap().1;
    assert!(matches!(&first.data, NodeData::Comment(c) if c == " note "));
    assert_eq!(doc.inner_html(div), "<!-- note --><p>x</p>");
}

#[test]
fn test_template_contents_are_converted() {
    let doc = e_html::parse("<template id=\"t\"><li>item</li></template>").unwrap();
    let template = doc.get_element_by_id("t").unwrap();
    assert_eq!(doc.inner_html(template), "<li>item</li>");
}

#[test]
fn test_fragment_appends_after_existing_children() {
    let mut tree = DomTree::new();
    let ul = tree.create_element("ul").unwrap();
    let first = tree.create_element("li").unwrap();
    tree.append_child(ul, first).unwrap();

    let appended = e_html::parse_fragment_into(&mut tree, ul, "<li>2</li><li>3</li>").unwrap();
    assert_eq!(appended, 2);
    assert_eq!(e_dom::inner_html(&tree, ul), "<li></li><li>2</li><li>3</li>");
}

#[test]
fn test_fragment_text_only() {
    let mut tree = DomTree::new();
    let p = tree.create_element("p").unwrap();
    let appended = e_html::parse_fragment_into(&mut tree, p, "just text &amp; more").unwrap();
    assert_eq!(appended, 1);
    assert_eq!(tree.text_content(p), "just text & more");
}

#[test]
fn test_fragment_keeps_scripts() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div").unwrap();
    e_html::parse_fragment_into(&mut tree, div, "<script>if (a < b) run()</script>").unwrap();
    assert_eq!(
        e_dom::inner_html(&tree, div),
        "<script>if (a < b) run()</script>"
    );
}

#[test]
fn test_whitespace_handling_by_config() {
    let html = "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>";

    let full = HtmlParser::new().parse(html).unwrap();
    let compact = HtmlParser::with_config(HtmlConfig::compact()).parse(html).unwrap();
    assert!(full.tree().len() > compact.tree().len());

    let ul = compact.query_selector(None, "ul").unwrap().unwrap();
    assert_eq!(compact.inner_html(ul), "<li>a</li><li>b</li>");
    assert!(!HtmlParser::with_config(HtmlConfig::compact()).config().keep_whitespace_text);
}

#[test]
fn test_noscript_depends_on_scripting() {
    let html = "<body><noscript><p>fallback</p></noscript></body>";

    let off = HtmlParser::new().parse(html).unwrap();
    assert_eq!(off.query_selector_all(None, "noscript p").unwrap().len(), 1);

    let config = HtmlConfig {
        scripting: true,
        ..HtmlConfig::default()
    };
    let on = HtmlParser::with_config(config).parse(html).unwrap();
    // With scripting enabled the content stays raw text
    assert!(on.query_selector_all(None, "noscript p").unwrap().is_empty());
}
