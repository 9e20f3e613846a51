//! Construction input normalization
//!
//! A collection can be built from nothing, a string (tag or selector), a
//! sequence of handles or a single handle. [`Target`] carries the raw input
//! and [`Target::classify`] decides what to do with it.

use e_dom::NodeId;

use crate::{Collection, DomHost};

/// Raw input accepted by [`Collection::new`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target<'a, T> {
    /// Nothing: yields an empty collection
    None,
    /// `"<tag>"` or a selector
    Str(&'a str),
    /// Array-like input, kept in order (may be empty)
    Many(Vec<T>),
    /// A single handle
    One(T),
}

/// What construction will do with a [`Target`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construction<'a, T> {
    Empty,
    CreateTag(String),
    QuerySelector(&'a str),
    FromSequence(Vec<T>),
    FromSingle(T),
}

impl<'a, T> Target<'a, T> {
    /// Classify the input.
    ///
    /// An empty string counts as no input. A string wrapped in `<` and `>`
    /// names a tag with every angle bracket stripped; any other string is a
    /// selector. An empty sequence stays a sequence.
    pub fn classify(self) -> Construction<'a, T> {
        match self {
            Target::None => Construction::Empty,
            Target::Str("") => Construction::Empty,
            Target::Str(s) if s.starts_with('<') && s.ends_with('>') => {
                Construction::CreateTag(s.replace(['<', '>'], ""))
            }
            Target::Str(s) => Construction::QuerySelector(s),
            Target::Many(handles) => Construction::FromSequence(handles),
            Target::One(handle) => Construction::FromSingle(handle),
        }
    }
}

impl<'a, T> From<&'a str> for Target<'a, T> {
    fn from(s: &'a str) -> Self {
        Target::Str(s)
    }
}

impl<'a, T> From<&'a String> for Target<'a, T> {
    fn from(s: &'a String) -> Self {
        Target::Str(s)
    }
}

impl<T> From<Vec<T>> for Target<'_, T> {
    fn from(handles: Vec<T>) -> Self {
        Target::Many(handles)
    }
}

impl<'a, T: Copy> From<&'a [T]> for Target<'a, T> {
    fn from(handles: &'a [T]) -> Self {
        Target::Many(handles.to_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for Target<'_, T> {
    fn from(handles: [T; N]) -> Self {
        Target::Many(handles.into())
    }
}

impl<T> From<Option<T>> for Target<'_, T> {
    fn from(handle: Option<T>) -> Self {
        handle.map_or(Target::None, Target::One)
    }
}

impl From<NodeId> for Target<'_, NodeId> {
    fn from(handle: NodeId) -> Self {
        Target::One(handle)
    }
}

impl<'a, H: DomHost> From<&'a Collection<'_, H>> for Target<'a, H::Handle> {
    fn from(collection: &'a Collection<'_, H>) -> Self {
        Target::Many(collection.nodes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(target: impl Into<Target<'static, u32>>) -> Construction<'static, u32> {
        target.into().classify()
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(classify(Target::None), Construction::Empty);
        assert_eq!(classify(""), Construction::Empty);
        assert_eq!(classify(None::<u32>), Construction::Empty);
    }

    #[test]
    fn test_tag_strings() {
        assert_eq!(classify("<div>"), Construction::CreateTag("div".to_string()));
        assert_eq!(classify("<<p>>"), Construction::CreateTag("p".to_string()));
        assert_eq!(classify("<>"), Construction::CreateTag(String::new()));
    }

    #[test]
    fn test_selector_strings() {
        assert_eq!(classify(".item"), Construction::QuerySelector(".item"));
        assert_eq!(classify("<div"), Construction::QuerySelector("<div"));
        assert_eq!(classify("div>"), Construction::QuerySelector("div>"));
    }

    #[test]
    fn test_empty_sequence_is_not_single() {
        assert_eq!(classify(Vec::<u32>::new()), Construction::FromSequence(Vec::new()));
        assert_eq!(classify([1u32, 2]), Construction::FromSequence(vec![1, 2]));
        assert_eq!(classify(&[3u32][..]), Construction::FromSequence(vec![3]));
    }

    #[test]
    fn test_single_handle() {
        assert_eq!(classify(Some(7u32)), Construction::FromSingle(7));
        assert_eq!(
            Target::from(NodeId::ROOT).classify(),
            Construction::FromSingle(NodeId::ROOT)
        );
    }
}
