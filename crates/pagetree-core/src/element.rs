//! Typed element catalog.
//!
//! The materializer maps every [`ParseNode`](crate::ast::ParseNode) onto one
//! variant of [`Element`]. The catalog is closed: tags without a dedicated
//! variant become [`Element::Generic`], which keeps the original tag name.

use crate::ast::{Attributes, CowStr, NodeKind};
use crate::stream::Entry;

/// An element or a run of raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Markup<'a> {
    /// A typed element.
    Element(Element<'a>),
    /// Raw text content.
    Text(CowStr<'a>),
}

impl<'a> Markup<'a> {
    /// The element, if this is not text.
    pub fn as_element(&self) -> Option<&Element<'a>> {
        match self {
            Markup::Element(element) => Some(element),
            Markup::Text(_) => None,
        }
    }

    /// The text, if this is not an element.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Markup::Text(text) => Some(text.as_ref()),
            Markup::Element(_) => None,
        }
    }
}

impl<'a> From<Element<'a>> for Markup<'a> {
    fn from(element: Element<'a>) -> Self {
        Markup::Element(element)
    }
}

/// Children of a container element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Children<'a> {
    /// Materialized children in document order.
    Markup(Vec<Markup<'a>>),
    /// Entries the tree builder could not parse, passed through untouched.
    Opaque(Vec<Entry<'a>>),
}

impl<'a> Children<'a> {
    /// No children at all.
    pub fn none() -> Self {
        Children::Markup(Vec::new())
    }

    /// Materialized children, or `None` for opaque content.
    pub fn markup(&self) -> Option<&[Markup<'a>]> {
        match self {
            Children::Markup(items) => Some(items),
            Children::Opaque(_) => None,
        }
    }

    /// Number of children (entries, for opaque content).
    pub fn len(&self) -> usize {
        match self {
            Children::Markup(items) => items.len(),
            Children::Opaque(entries) => entries.len(),
        }
    }

    /// Check if there are no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if the children were passed through unparsed.
    pub fn is_opaque(&self) -> bool {
        matches!(self, Children::Opaque(_))
    }
}

impl Default for Children<'_> {
    fn default() -> Self {
        Self::none()
    }
}

/// An element that holds children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Container<'a> {
    /// Attribute mapping.
    pub attributes: Attributes<'a>,
    /// Child content.
    pub children: Children<'a>,
}

/// An element that never holds children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Void<'a> {
    /// Attribute mapping.
    pub attributes: Attributes<'a>,
}

/// Section heading, `<h1>` through `<h6>`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Heading<'a> {
    /// Heading level (1-6).
    pub level: u8,
    /// Attribute mapping.
    pub attributes: Attributes<'a>,
    /// Child content.
    pub children: Children<'a>,
}

/// Any tag without a dedicated variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GenericTag<'a> {
    /// The original tag name.
    pub name: CowStr<'a>,
    /// Node kind reported by the tree builder.
    pub kind: NodeKind,
    /// Attribute mapping.
    pub attributes: Attributes<'a>,
    /// Child content (always empty for `Empty` nodes).
    pub children: Children<'a>,
}

/// Typed elements.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Element<'a> {
    /// `<p>`
    Paragraph(Container<'a>),
    /// `<head>`
    Head(Container<'a>),
    /// `<body>`
    Body(Container<'a>),
    /// `<title>`
    Title(Container<'a>),
    /// `<img>`
    Image(Void<'a>),
    /// `<b>`
    Bold(Container<'a>),
    /// `<br>`
    LineBreak(Void<'a>),
    /// `<h1>` through `<h6>`
    Heading(Heading<'a>),
    /// `<hr>`
    HorizontalRule(Void<'a>),
    /// Anything else.
    Generic(GenericTag<'a>),
}

impl<'a> Element<'a> {
    /// The tag name this element renders as.
    pub fn tag_name(&self) -> &str {
        match self {
            Element::Paragraph(_) => "p",
            Element::Head(_) => "head",
            Element::Body(_) => "body",
            Element::Title(_) => "title",
            Element::Image(_) => "img",
            Element::Bold(_) => "b",
            Element::LineBreak(_) => "br",
            Element::Heading(h) => match h.level {
                1 => "h1",
                2 => "h2",
                3 => "h3",
                4 => "h4",
                5 => "h5",
                _ => "h6",
            },
            Element::HorizontalRule(_) => "hr",
            Element::Generic(g) => g.name.as_ref(),
        }
    }

    /// Whether the element can hold children.
    pub fn kind(&self) -> NodeKind {
        match self {
            Element::Image(_) | Element::LineBreak(_) | Element::HorizontalRule(_) => {
                NodeKind::Empty
            }
            Element::Generic(g) => g.kind,
            _ => NodeKind::Container,
        }
    }

    /// The attribute mapping.
    pub fn attributes(&self) -> &Attributes<'a> {
        match self {
            Element::Paragraph(c)
            | Element::Head(c)
            | Element::Body(c)
            | Element::Title(c)
            | Element::Bold(c) => &c.attributes,
            Element::Image(v) | Element::LineBreak(v) | Element::HorizontalRule(v) => {
                &v.attributes
            }
            Element::Heading(h) => &h.attributes,
            Element::Generic(g) => &g.attributes,
        }
    }

    /// Mutable access to the attribute mapping.
    pub fn attributes_mut(&mut self) -> &mut Attributes<'a> {
        match self {
            Element::Paragraph(c)
            | Element::Head(c)
            | Element::Body(c)
            | Element::Title(c)
            | Element::Bold(c) => &mut c.attributes,
            Element::Image(v) | Element::LineBreak(v) | Element::HorizontalRule(v) => {
                &mut v.attributes
            }
            Element::Heading(h) => &mut h.attributes,
            Element::Generic(g) => &mut g.attributes,
        }
    }

    /// The children, or `None` for void elements.
    pub fn children(&self) -> Option<&Children<'a>> {
        match self {
            Element::Paragraph(c)
            | Element::Head(c)
            | Element::Body(c)
            | Element::Title(c)
            | Element::Bold(c) => Some(&c.children),
            Element::Heading(h) => Some(&h.children),
            Element::Generic(g) if g.kind == NodeKind::Container => Some(&g.children),
            _ => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut Children<'a>> {
        match self {
            Element::Paragraph(c)
            | Element::Head(c)
            | Element::Body(c)
            | Element::Title(c)
            | Element::Bold(c) => Some(&mut c.children),
            Element::Heading(h) => Some(&mut h.children),
            Element::Generic(g) if g.kind == NodeKind::Container => Some(&mut g.children),
            _ => None,
        }
    }

    /// Append a child.
    ///
    /// Returns `false` without changing anything when the element is void or
    /// its children are opaque.
    pub fn push_child(&mut self, child: impl Into<Markup<'a>>) -> bool {
        match self.children_mut() {
            Some(Children::Markup(items)) => {
                items.push(child.into());
                true
            }
            _ => false,
        }
    }
}

impl<'a> From<&'a str> for Markup<'a> {
    fn from(text: &'a str) -> Self {
        Markup::Text(CowStr::Borrowed(text))
    }
}

impl From<String> for Markup<'_> {
    fn from(text: String) -> Self {
        Markup::Text(CowStr::Owned(text))
    }
}
