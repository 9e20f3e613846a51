//! Element Attributes
//!
//! Ordered attribute storage keyed by interned name.

use crate::InternedString;

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: InternedString,
    pub value: String,
}

/// Attribute collection, kept in insertion order for serialization
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    attrs: Vec<Attr>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of attributes
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Get attribute value
    pub fn get(&self, name: InternedString) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set attribute, replacing the value in place if it already exists.
    /// Returns the previous value.
    pub fn set(&mut self, name: InternedString, value: String) -> Option<String> {
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
            return Some(std::mem::replace(&mut attr.value, value));
        }
        self.attrs.push(Attr { name, value });
        None
    }

    /// Remove attribute by name
    pub fn remove(&mut self, name: InternedString) -> Option<String> {
        let index = self.attrs.iter().position(|a| a.name == name)?;
        Some(self.attrs.remove(index).value)
    }

    /// Check if attribute exists
    pub fn has(&self, name: InternedString) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Iterate over attributes
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attrs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_attribute() {
        let mut attrs = Attributes::new();
        attrs.set(InternedString(1), "btn".to_string());
        attrs.set(InternedString(2), "submit".to_string());

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get(InternedString(1)), Some("btn"));
        assert_eq!(attrs.get(InternedString(2)), Some("submit"));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut attrs = Attributes::new();
        attrs.set(InternedString(1), "a".to_string());
        attrs.set(InternedString(2), "b".to_string());

        assert_eq!(attrs.set(InternedString(1), "c".to_string()), Some("a".to_string()));
        let order: Vec<_> = attrs.iter().map(|a| a.value.as_str()).collect();
        assert_eq!(order, vec!["c", "b"]);
    }

    #[test]
    fn test_remove_attribute() {
        let mut attrs = Attributes::new();
        attrs.set(InternedString(7), "bar".to_string());

        assert!(attrs.has(InternedString(7)));
        assert_eq!(attrs.remove(InternedString(7)), Some("bar".to_string()));
        assert!(!attrs.has(InternedString(7)));
    }
}
