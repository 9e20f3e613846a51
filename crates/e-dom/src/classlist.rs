//! Class token list
//!
//! `classList` semantics over the `class` attribute string.

use crate::{DomError, DomResult};

/// Space-separated token list (e.g. the `class` attribute)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<String>,
}

impl TokenList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a space-separated string, dropping duplicates
    pub fn parse(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_whitespace() {
            if !list.contains(token) {
                list.tokens.push(token.to_string());
            }
        }
        list
    }

    /// Reject tokens a real `classList` would throw on
    pub fn validate(token: &str) -> DomResult<()> {
        if token.is_empty() {
            return Err(DomError::Syntax(token.to_string()));
        }
        if token.chars().any(char::is_whitespace) {
            return Err(DomError::InvalidCharacter(token.to_string()));
        }
        Ok(())
    }

    /// Get number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add a token. Returns true if the list changed.
    pub fn add(&mut self, token: &str) -> DomResult<bool> {
        Self::validate(token)?;
        if self.contains(token) {
            return Ok(false);
        }
        self.tokens.push(token.to_string());
        Ok(true)
    }

    /// Remove a token. Returns true if the list changed.
    pub fn remove(&mut self, token: &str) -> DomResult<bool> {
        Self::validate(token)?;
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        Ok(self.tokens.len() != before)
    }

    /// Toggle token, returns new state
    pub fn toggle(&mut self, token: &str) -> DomResult<bool> {
        if self.contains(token) {
            self.remove(token)?;
            Ok(false)
        } else {
            self.add(token)?;
            Ok(true)
        }
    }

    /// Get value as string
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Iterate over tokens
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }
}

impl std::fmt::Display for TokenList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value())
    }
}
