//! Selector parsing and matching
//!
//! querySelectorAll, matches and closest over the arena tree. Supports
//! selector lists, compound selectors (type, universal, id, class, attribute),
//! the four combinators and a handful of structural pseudo-classes.

use crate::node::{Node, NodeData};
use crate::{DomError, DomResult, DomTree, NodeId};

/// Parsed selector list (`a, b, c`)
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    selectors: Vec<Complex>,
}

/// Compound selectors joined by combinators, stored left to right
#[derive(Debug, Clone, PartialEq)]
struct Complex {
    compounds: Vec<Compound>,
    /// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`
    combinators: Vec<Combinator>,
}

/// Relationship between two compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// Sequence of simple selectors that all apply to one element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    /// Lowercased type selector; `None` is universal
    pub tag: Option<String>,
    pub simple: Vec<SimpleSelector>,
}

/// Single condition inside a compound selector
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    Id(String),
    Class(String),
    Attribute {
        name: String,
        matcher: Option<(AttrOp, String)>,
    },
    FirstChild,
    LastChild,
    OnlyChild,
    Empty,
    Not(Box<Compound>),
}

/// Attribute value operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    /// `=`
    Equals,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

impl AttrOp {
    fn test(self, actual: &str, expected: &str) -> bool {
        match self {
            Self::Equals => actual == expected,
            Self::Includes => {
                !expected.is_empty()
                    && !expected.contains(char::is_whitespace)
                    && actual.split_whitespace().any(|t| t == expected)
            }
            Self::DashMatch => {
                actual == expected
                    || actual
                        .strip_prefix(expected)
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            Self::Prefix => !expected.is_empty() && actual.starts_with(expected),
            Self::Suffix => !expected.is_empty() && actual.ends_with(expected),
            Self::Substring => !expected.is_empty() && actual.contains(expected),
        }
    }
}

impl SelectorList {
    /// Parse a selector list. Invalid input is a `Syntax` error.
    pub fn parse(input: &str) -> DomResult<Self> {
        let syntax = || DomError::Syntax(input.to_string());
        let mut parser = Parser {
            chars: input.chars().collect(),
            pos: 0,
        };

        let mut selectors = Vec::new();
        loop {
            parser.skip_ws();
            selectors.push(parser.complex().ok_or_else(syntax)?);
            parser.skip_ws();
            match parser.bump() {
                None => break,
                Some(',') => continue,
                Some(_) => return Err(syntax()),
            }
        }
        Ok(Self { selectors })
    }

    /// Whether `element` matches any selector in the list
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        tree.get(element).is_some_and(Node::is_element)
            && self.selectors.iter().any(|s| s.matches_at(tree, s.compounds.len() - 1, element))
    }

    /// All matching descendants of `scope`, in document order
    pub fn query_all(&self, tree: &DomTree, scope: NodeId) -> Vec<NodeId> {
        tree.descendants(scope)
            .into_iter()
            .filter(|&id| self.matches(tree, id))
            .collect()
    }

    /// First matching descendant of `scope`
    pub fn query_first(&self, tree: &DomTree, scope: NodeId) -> Option<NodeId> {
        tree.descendants(scope)
            .into_iter()
            .find(|&id| self.matches(tree, id))
    }

    /// Nearest inclusive ancestor of `element` that matches
    pub fn closest(&self, tree: &DomTree, element: NodeId) -> Option<NodeId> {
        std::iter::once(element)
            .chain(tree.ancestors(element))
            .find(|&id| self.matches(tree, id))
    }
}

impl Complex {
    fn matches_at(&self, tree: &DomTree, index: usize, element: NodeId) -> bool {
        if !self.compounds[index].matches(tree, element) {
            return false;
        }
        if index == 0 {
            return true;
        }

        let next = index - 1;
        match self.combinators[next] {
            Combinator::Child => tree
                .get(element)
                .and_then(|n| n.parent.some())
                .is_some_and(|parent| self.matches_at(tree, next, parent)),
            Combinator::Descendant => tree
                .ancestors(element)
                .any(|ancestor| self.matches_at(tree, next, ancestor)),
            Combinator::NextSibling => previous_element_sibling(tree, element)
                .is_some_and(|sibling| self.matches_at(tree, next, sibling)),
            Combinator::SubsequentSibling => {
                let mut current = previous_element_sibling(tree, element);
                while let Some(sibling) = current {
                    if self.matches_at(tree, next, sibling) {
                        return true;
                    }
                    current = previous_element_sibling(tree, sibling);
                }
                false
            }
        }
    }
}

impl Compound {
    /// Whether `element` satisfies every part of this compound
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        let Some(data) = tree.get(element).and_then(Node::as_element) else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if tree.resolve(data.name) != tag {
                return false;
            }
        }
        self.simple.iter().all(|s| s.matches(tree, element))
    }
}

impl SimpleSelector {
    fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        match self {
            Self::Id(id) => tree.attribute(element, "id") == Some(id.as_str()),
            Self::Class(class) => tree
                .attribute(element, "class")
                .is_some_and(|v| v.split_whitespace().any(|t| t == class)),
            Self::Attribute { name, matcher } => match (tree.attribute(element, name), matcher) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(actual), Some((op, expected))) => op.test(actual, expected),
            },
            Self::FirstChild => previous_element_sibling(tree, element).is_none(),
            Self::LastChild => next_element_sibling(tree, element).is_none(),
            Self::OnlyChild => {
                previous_element_sibling(tree, element).is_none()
                    && next_element_sibling(tree, element).is_none()
            }
            Self::Empty => tree.children(element).all(|(_, child)| match &child.data {
                NodeData::Comment(_) => true,
                NodeData::Text(t) => t.is_empty(),
                _ => false,
            }),
            Self::Not(inner) => !inner.matches(tree, element),
        }
    }
}

fn previous_element_sibling(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    let mut current = tree.get(id)?.prev_sibling;
    while let Some(sibling) = current.some() {
        let node = tree.get(sibling)?;
        if node.is_element() {
            return Some(sibling);
        }
        current = node.prev_sibling;
    }
    None
}

fn next_element_sibling(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    let mut current = tree.get(id)?.next_sibling;
    while let Some(sibling) = current.some() {
        let node = tree.get(sibling)?;
        if node.is_element() {
            return Some(sibling);
        }
        current = node.next_sibling;
    }
    None
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skip whitespace, returning whether any was skipped
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos != start
    }

    fn complex(&mut self) -> Option<Complex> {
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                None | Some(',') | Some(')') => break,
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                Some(_) if had_ws => Combinator::Descendant,
                Some(_) => return None,
            };
            if combinator != Combinator::Descendant {
                self.pos += 1;
                self.skip_ws();
            }
            combinators.push(combinator);
            compounds.push(self.compound()?);
        }

        Some(Complex { compounds, combinators })
    }

    fn compound(&mut self) -> Option<Compound> {
        let mut compound = Compound::default();
        let mut parsed_any = false;

        if self.eat('*') {
            parsed_any = true;
        } else if let Some(tag) = self.ident() {
            compound.tag = Some(tag.to_ascii_lowercase());
            parsed_any = true;
        }

        loop {
            let simple = match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    SimpleSelector::Id(self.ident()?)
                }
                Some('.') => {
                    self.pos += 1;
                    SimpleSelector::Class(self.ident()?)
                }
                Some('[') => {
                    self.pos += 1;
                    self.attribute()?
                }
                Some(':') => {
                    self.pos += 1;
                    self.pseudo()?
                }
                _ => break,
            };
            compound.simple.push(simple);
            parsed_any = true;
        }

        parsed_any.then_some(compound)
    }

    fn ident(&mut self) -> Option<String> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii())
        {
            self.pos += 1;
        }
        let ident: String = self.chars[start..self.pos].iter().collect();
        match ident.chars().next() {
            Some(c) if !c.is_ascii_digit() => Some(ident),
            _ => {
                self.pos = start;
                None
            }
        }
    }

    fn attribute(&mut self) -> Option<SimpleSelector> {
        self.skip_ws();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_ws();
        if self.eat(']') {
            return Some(SimpleSelector::Attribute { name, matcher: None });
        }

        let op = match self.bump()? {
            '=' => AttrOp::Equals,
            c => {
                let op = match c {
                    '~' => AttrOp::Includes,
                    '|' => AttrOp::DashMatch,
                    '^' => AttrOp::Prefix,
                    '$' => AttrOp::Suffix,
                    '*' => AttrOp::Substring,
                    _ => return None,
                };
                if !self.eat('=') {
                    return None;
                }
                op
            }
        };

        self.skip_ws();
        let value = match self.peek()? {
            quote @ ('"' | '\'') => {
                self.pos += 1;
                self.quoted(quote)?
            }
            _ => self.ident()?,
        };
        self.skip_ws();
        self.eat(']').then(|| SimpleSelector::Attribute {
            name,
            matcher: Some((op, value)),
        })
    }

    fn quoted(&mut self, quote: char) -> Option<String> {
        let mut value = String::new();
        loop {
            match self.bump()? {
                '\\' => value.push(self.bump()?),
                c if c == quote => return Some(value),
                c => value.push(c),
            }
        }
    }

    fn pseudo(&mut self) -> Option<SimpleSelector> {
        let name = self.ident()?.to_ascii_lowercase();
        match name.as_str() {
            "first-child" => Some(SimpleSelector::FirstChild),
            "last-child" => Some(SimpleSelector::LastChild),
            "only-child" => Some(SimpleSelector::OnlyChild),
            "empty" => Some(SimpleSelector::Empty),
            "not" => {
                if !self.eat('(') {
                    return None;
                }
                self.skip_ws();
                let inner = self.compound()?;
                self.skip_ws();
                self.eat(')')
                    .then(|| SimpleSelector::Not(Box::new(inner)))
            }
            _ => None,
        }
    }
}
