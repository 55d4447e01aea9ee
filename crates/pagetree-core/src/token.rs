//! Token types handed over by the markup tokenizer.
//!
//! Tokenizing markup text is the caller's job. This module only defines the
//! shape the tree builder expects: start tags with ordered attributes, end
//! tags, and text runs, in document order. It also carries [`VoidTags`],
//! the set of tag names that never take an end tag.

use std::collections::{BTreeMap, BTreeSet};

/// A single attribute as reported by the tokenizer.
///
/// Boolean attributes (`<input disabled>`) carry an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Attribute value (empty for boolean attributes).
    pub value: String,
}

impl Attribute {
    /// Create an attribute from a name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A markup token in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Token {
    /// An opening tag with its attributes in source order.
    StartTag {
        /// Tag name.
        name: String,
        /// Attributes, duplicates included.
        attributes: Vec<Attribute>,
    },
    /// A closing tag.
    EndTag {
        /// Tag name.
        name: String,
    },
    /// A raw text run.
    Text(String),
}

impl Token {
    /// Create a start tag token.
    ///
    /// ```rust
    /// use pagetree_core::Token;
    ///
    /// let token = Token::start("img", [("src", "a.png"), ("alt", "")]);
    /// assert_eq!(token.tag_name(), Some("img"));
    /// ```
    pub fn start<I, K, V>(name: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Token::StartTag {
            name: name.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| Attribute::new(k, v))
                .collect(),
        }
    }

    /// Create a start tag token without attributes.
    pub fn open(name: impl Into<String>) -> Self {
        Token::StartTag {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Create an end tag token.
    pub fn end(name: impl Into<String>) -> Self {
        Token::EndTag { name: name.into() }
    }

    /// Create a text token.
    pub fn text(content: impl Into<String>) -> Self {
        Token::Text(content.into())
    }

    /// The tag name of a start or end tag.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Token::StartTag { name, .. } | Token::EndTag { name } => Some(name),
            Token::Text(_) => None,
        }
    }
}

/// Tag names that never take an end tag.
///
/// Void tags are a value handed to the tree builder, never shared process
/// state. Build one from the standard HTML list, from any iterator of
/// names, or derive it from the token stream itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoidTags {
    names: BTreeSet<String>,
}

/// HTML elements whose end tag is forbidden.
const HTML_VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

impl VoidTags {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The void elements of HTML.
    pub fn html() -> Self {
        HTML_VOID_ELEMENTS.iter().copied().collect()
    }

    /// Derive the set from a token stream.
    ///
    /// A tag counts as void when it was started more often than it was
    /// ended: every end tag cancels one earlier start of the same name, and
    /// the names still outstanding at the end of the stream form the set.
    /// End tags without a preceding start are ignored.
    ///
    /// ```rust
    /// use pagetree_core::{Token, VoidTags};
    ///
    /// let tokens = [
    ///     Token::open("p"),
    ///     Token::start("img", [("src", "a.png")]),
    ///     Token::end("p"),
    /// ];
    /// let voids = VoidTags::from_tokens(&tokens);
    /// assert!(voids.contains("img"));
    /// assert!(!voids.contains("p"));
    /// ```
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut outstanding: BTreeMap<&str, usize> = BTreeMap::new();
        for token in tokens {
            match token {
                Token::StartTag { name, .. } => {
                    *outstanding.entry(name.as_str()).or_default() += 1;
                }
                Token::EndTag { name } => {
                    if let Some(count) = outstanding.get_mut(name.as_str()) {
                        *count = count.saturating_sub(1);
                    }
                }
                Token::Text(_) => {}
            }
        }
        outstanding
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .map(|(name, _)| name)
            .collect()
    }

    /// Add a tag name.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Check whether a tag name is void.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of names in the set.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over the names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for VoidTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for VoidTags {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}
