//! Parser configuration

/// Options for document and fragment parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlConfig {
    /// Keep whitespace-only text nodes. Dropping them shrinks the tree
    /// but changes what `innerHTML` reads back.
    pub keep_whitespace_text: bool,
    /// Parse as if scripting were enabled (affects `<noscript>`)
    pub scripting: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            keep_whitespace_text: true,
            scripting: false,
        }
    }
}

impl HtmlConfig {
    /// Configuration that drops whitespace-only text nodes
    pub fn compact() -> Self {
        Self {
            keep_whitespace_text: false,
            ..Self::default()
        }
    }
}
