//! Inline style declaration
//!
//! Mirrors `element.style`: properties are parsed from and written back to
//! the `style` attribute. Parsing goes through lightningcss.

use lightningcss::properties::Property;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleAttribute};

/// Ordered list of `property: value` declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    entries: Vec<(String, String)>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute value.
    ///
    /// Invalid declarations are dropped. Values come back in lightningcss's
    /// serialized form, so `url(a;b)` and quoted strings survive intact.
    pub fn parse(css: &str) -> Self {
        let mut decl = Self::new();
        if css.trim().is_empty() {
            return decl;
        }

        let options = ParserOptions {
            error_recovery: true,
            ..ParserOptions::default()
        };
        let attribute = match StyleAttribute::parse(css, options) {
            Ok(attribute) => attribute,
            Err(err) => {
                tracing::debug!("Ignoring unparsable style attribute: {}", err);
                return decl;
            }
        };

        let block = &attribute.declarations;
        let normal = block.declarations.iter().map(|p| (p, false));
        let important = block.important_declarations.iter().map(|p| (p, true));
        for (property, important) in normal.chain(important) {
            if let Some((name, value)) = serialize_property(property, important) {
                decl.set_property(&name, &value);
            }
        }
        decl
    }

    /// Set a property. Accepts `backgroundColor` or `background-color`.
    /// An empty value removes the property.
    pub fn set_property(&mut self, name: &str, value: &str) {
        let name = property_name(name);
        let value = value.trim();

        if value.is_empty() {
            self.entries.retain(|(n, _)| *n != name);
            return;
        }
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name, value.to_string())),
        }
    }

    /// Get a property value
    pub fn property(&self, name: &str) -> Option<&str> {
        let name = property_name(name);
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize back to attribute form
    pub fn css_text(&self) -> String {
        self.entries
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `(name, value)` of one parsed declaration, with the vendor prefix kept
/// on the name and `!important` kept on the value
fn serialize_property(property: &Property<'_>, important: bool) -> Option<(String, String)> {
    let full = property.to_css_string(false, PrinterOptions::default()).ok()?;
    let (name, _) = full.split_once(':')?;
    let mut value = property.value_to_css_string(PrinterOptions::default()).ok()?;
    if important {
        value.push_str(" !important");
    }
    Some((name.trim().to_string(), value.trim().to_string()))
}

/// Normalize a property name to its CSS (kebab-case) form
fn property_name(name: &str) -> String {
    let name = name.trim();
    if name == "cssFloat" {
        return "float".to_string();
    }
    // Custom properties are case-sensitive and already kebab-case
    if name.starts_with("--") {
        return name.to_string();
    }
    to_kebab_case(name)
}

/// Convert camelCase to kebab-case
fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);

    for c in s.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}
