//! E
//!
//! Tiny DOM manipulation helper with a familiar fluent API.
//!
//! A [`Collection`] wraps zero or more element handles and exposes
//! traversal (returns a new collection), mutation (acts on every held
//! element and returns the same collection) and accessors (read from the
//! first held element). Every method is safe on an empty collection.
//!
//! The DOM itself is a [`DomHost`]; [`Page`] binds the in-memory `e-dom`
//! document.
//!
//! # Example
//! ```rust
//! use e_query::{Collection, Page};
//!
//! let page = Page::default();
//! let div = Collection::new(&page, "<div>")?;
//! div.add_class("note")?.set_text("hi")?.append_to("body")?;
//!
//! assert_eq!(page.select(".note")?.text().as_deref(), Some("hi"));
//! # Ok::<(), e_query::PageError>(())
//! ```

mod collection;
mod host;
mod page;
mod target;

pub use collection::{Collection, FilterBy};
pub use host::DomHost;
pub use page::{Page, PageError};
pub use target::{Construction, Target};

// Re-export the host crates for callers that need the raw tree
pub use e_dom as dom;
pub use e_html as html;
