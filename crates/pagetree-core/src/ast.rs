//! Untyped parse tree produced by the tree builder.
//!
//! A [`ParseNode`] knows its tag name, attributes and children, but not
//! what kind of element it is; the materializer assigns that later. The
//! tree is designed to be:
//!
//! - **Zero-copy**: names and text borrow from the token stream via `Cow`
//! - **Span-tracked**: every node records the entry range it came from
//! - **Degradation-aware**: a run that could not be parsed structurally is
//!   kept as [`Content::Opaque`] instead of being dropped

use crate::span::Span;
use crate::stream::Entry;
use crate::token::Attribute;

/// Borrowed or owned string type for zero-copy parsing.
pub type CowStr<'a> = std::borrow::Cow<'a, str>;

/// Whether a node can hold children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NodeKind {
    /// A void element; never has children.
    Empty,
    /// An element with content.
    Container,
}

/// Ordered attribute mapping.
///
/// Keys are unique. Inserting a key that is already present replaces its
/// value but keeps the position of the first occurrence, so a tokenizer
/// reporting `a=1 b=2 a=3` yields `[(a, 3), (b, 2)]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attributes<'a> {
    entries: Vec<(CowStr<'a>, CowStr<'a>)>,
}

impl<'a> Attributes<'a> {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from tokenizer attributes, borrowing their text.
    pub fn from_slice(attributes: &'a [Attribute]) -> Self {
        let mut map = Self {
            entries: Vec::with_capacity(attributes.len()),
        };
        for attr in attributes {
            map.insert(attr.name.as_str(), attr.value.as_str());
        }
        map
    }

    /// Insert or overwrite a value, returning the previous one.
    pub fn insert(
        &mut self,
        name: impl Into<CowStr<'a>>,
        value: impl Into<CowStr<'a>>,
    ) -> Option<CowStr<'a>> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Look up a value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_ref())
    }

    /// Iterate over `(name, value)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    /// Number of distinct attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, K, V> FromIterator<(K, V)> for Attributes<'a>
where
    K: Into<CowStr<'a>>,
    V: Into<CowStr<'a>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// A child of a structurally parsed node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Child<'a> {
    /// A nested element.
    Node(ParseNode<'a>),
    /// Raw text content.
    Text(CowStr<'a>),
}

/// The content of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Content<'a> {
    /// Children parsed in document order.
    Children(Vec<Child<'a>>),
    /// Entries kept un-recursed because the run did not parse structurally.
    Opaque(Vec<Entry<'a>>),
}

impl<'a> Content<'a> {
    /// Check if there is nothing inside.
    pub fn is_empty(&self) -> bool {
        match self {
            Content::Children(children) => children.is_empty(),
            Content::Opaque(entries) => entries.is_empty(),
        }
    }
}

/// A node of the untyped parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseNode<'a> {
    /// Tag name, exactly as tokenized.
    pub name: CowStr<'a>,
    /// Attribute mapping.
    pub attributes: Attributes<'a>,
    /// Empty (void) or container.
    pub kind: NodeKind,
    /// Children or opaque entries. Always empty children for `Empty` nodes.
    pub content: Content<'a>,
    /// Whether the node's own end tag was part of its run.
    pub closed: bool,
    /// Stream entries this node was built from.
    pub span: Span,
}

impl<'a> ParseNode<'a> {
    /// Create a void node.
    pub fn empty(name: impl Into<CowStr<'a>>, attributes: Attributes<'a>, span: Span) -> Self {
        Self {
            name: name.into(),
            attributes,
            kind: NodeKind::Empty,
            content: Content::Children(Vec::new()),
            closed: false,
            span,
        }
    }

    /// Create a container node.
    pub fn container(
        name: impl Into<CowStr<'a>>,
        attributes: Attributes<'a>,
        content: Content<'a>,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            attributes,
            kind: NodeKind::Container,
            content,
            closed: false,
            span,
        }
    }

    /// Mark whether the node's end tag was consumed.
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Structured children, or `None` for opaque content.
    pub fn children(&self) -> Option<&[Child<'a>]> {
        match &self.content {
            Content::Children(children) => Some(children),
            Content::Opaque(_) => None,
        }
    }

    /// Check if this node's content was kept opaque.
    pub fn is_opaque(&self) -> bool {
        matches!(self.content, Content::Opaque(_))
    }

    /// Check if this node or any descendant was kept opaque.
    pub fn is_degraded(&self) -> bool {
        match &self.content {
            Content::Opaque(_) => true,
            Content::Children(children) => children.iter().any(|c| match c {
                Child::Node(node) => node.is_degraded(),
                Child::Text(_) => false,
            }),
        }
    }

    /// Count the stream entries represented by this subtree.
    ///
    /// Each node accounts for its name and attribute payload, its end tag
    /// when it was closed, and everything inside it. For a tree built
    /// without any fallback this equals the length of the input run.
    pub fn entry_count(&self) -> usize {
        let inner = match &self.content {
            Content::Opaque(entries) => entries.len(),
            Content::Children(children) => children
                .iter()
                .map(|c| match c {
                    Child::Node(node) => node.entry_count(),
                    Child::Text(_) => 1,
                })
                .sum(),
        };
        2 + inner + usize::from(self.closed)
    }
}
