//! Example: Basic usage of e-query
//!
//! Run with `RUST_LOG=e_dom=debug,e_query=trace` to see layout and
//! collection events.

use e_query::{Collection, Page};
use tracing_subscriber::EnvFilter;

const MENU: &str = r#"
<nav id="menu" class="closed">
  <a href="/">Home</a>
  <a href="/docs" class="current">Docs</a>
  <a href="/about">About</a>
</nav>
"#;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let page = Page::parse(MENU)?;

    // Query and read
    let links = page.select("#menu a")?;
    println!("{} links, current: {:?}", links.len(), links.filter(".current")?.text());

    // Toggle menu state the way a click handler would
    let menu = page.select("#menu")?;
    menu.toggle_class("closed")?
        .toggle_attr("expanded", &["false", "true"], Some("menu"))?
        .css([("maxHeight", "240px")])?
        .repaint();
    println!("menu is now: {:?}", menu.attr("class", None));
    println!("expanded: {:?}", menu.attr("expanded", Some("menu")));

    // Build and insert new content
    Collection::new(&page, "<a>")?
        .set_attr("href", "/blog", None)?
        .set_text("Blog")?
        .append_to(&menu)?;

    let footer = page.select("<footer>")?;
    footer.set_html("<small>&copy; E</small>")?.append_to("body")?;

    // Copies are detached until inserted
    let copy = links.filter(0usize)?.deep_clone()?;
    copy.prepend_to(&footer)?;

    println!("{}", page.select("body")?.html().unwrap_or_default());
    println!("layout passes: {}", page.document().layout_passes());
    Ok(())
}
