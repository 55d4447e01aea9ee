//! Maps parse nodes onto the typed element catalog.
//!
//! Dispatch is an exact, case-sensitive match on the tag name. Children are
//! materialized depth-first in document order; opaque content is passed
//! through as [`Children::Opaque`] without being looked at.

use tracing::warn;

use crate::ast::{Child, Content, ParseNode};
use crate::element::{Children, Container, Element, GenericTag, Heading, Markup, Void};
use crate::error::{ParseError, ParseErrors};

/// Converts parse trees into typed elements, collecting diagnostics.
#[derive(Debug, Default)]
pub struct Materializer {
    errors: ParseErrors,
}

impl Materializer {
    /// Create a materializer with no recorded diagnostics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize a node and everything below it.
    pub fn materialize<'a>(&mut self, node: ParseNode<'a>) -> Element<'a> {
        let ParseNode {
            name,
            attributes,
            kind,
            content,
            span,
            ..
        } = node;

        let tag = Tag::classify(&name);
        if tag.is_void() {
            if !content.is_empty() {
                warn!(tag = %name, "discarding content attached to a void element");
                self.errors
                    .push(ParseError::unexpected_children(&name, span));
            }
            let void = Void { attributes };
            return match tag {
                Tag::Image => Element::Image(void),
                Tag::LineBreak => Element::LineBreak(void),
                _ => Element::HorizontalRule(void),
            };
        }

        let children = self.children(content);
        let container = Container {
            attributes,
            children,
        };
        match tag {
            Tag::Paragraph => Element::Paragraph(container),
            Tag::Head => Element::Head(container),
            Tag::Body => Element::Body(container),
            Tag::Title => Element::Title(container),
            Tag::Bold => Element::Bold(container),
            Tag::Heading(level) => Element::Heading(Heading {
                level,
                attributes: container.attributes,
                children: container.children,
            }),
            Tag::Image | Tag::LineBreak | Tag::HorizontalRule | Tag::Other => {
                Element::Generic(GenericTag {
                    name,
                    kind,
                    attributes: container.attributes,
                    children: container.children,
                })
            }
        }
    }

    /// Materialize a child: nodes become elements, text stays text.
    pub fn materialize_child<'a>(&mut self, child: Child<'a>) -> Markup<'a> {
        match child {
            Child::Node(node) => Markup::Element(self.materialize(node)),
            Child::Text(text) => Markup::Text(text),
        }
    }

    /// Diagnostics recorded so far.
    pub fn errors(&self) -> &ParseErrors {
        &self.errors
    }

    /// Take the recorded diagnostics.
    pub fn take_errors(&mut self) -> ParseErrors {
        std::mem::take(&mut self.errors)
    }

    fn children<'a>(&mut self, content: Content<'a>) -> Children<'a> {
        match content {
            Content::Children(children) => Children::Markup(
                children
                    .into_iter()
                    .map(|child| self.materialize_child(child))
                    .collect(),
            ),
            Content::Opaque(entries) => Children::Opaque(entries),
        }
    }
}

/// Catalog entry for a tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Paragraph,
    Head,
    Body,
    Title,
    Image,
    Bold,
    LineBreak,
    Heading(u8),
    HorizontalRule,
    Other,
}

impl Tag {
    fn classify(name: &str) -> Self {
        match name {
            "p" => Tag::Paragraph,
            "head" => Tag::Head,
            "body" => Tag::Body,
            "title" => Tag::Title,
            "img" => Tag::Image,
            "b" => Tag::Bold,
            "br" => Tag::LineBreak,
            "hr" => Tag::HorizontalRule,
            _ => match name.as_bytes() {
                [b'h', level @ b'1'..=b'6'] => Tag::Heading(level - b'0'),
                _ => Tag::Other,
            },
        }
    }

    fn is_void(self) -> bool {
        matches!(self, Tag::Image | Tag::LineBreak | Tag::HorizontalRule)
    }
}

/// Materialize a tree, discarding diagnostics.
///
/// # Example
///
/// ```rust
/// use pagetree_core::ast::{Attributes, Child, Content, ParseNode};
/// use pagetree_core::materialize::materialize;
/// use pagetree_core::span::Span;
/// use pagetree_core::Element;
///
/// let node = ParseNode::container(
///     "h2",
///     Attributes::new(),
///     Content::Children(vec![Child::Text("Intro".into())]),
///     Span::default(),
/// );
/// match materialize(node) {
///     Element::Heading(h) => assert_eq!(h.level, 2),
///     other => panic!("expected heading, got {:?}", other),
/// }
/// ```
pub fn materialize(node: ParseNode<'_>) -> Element<'_> {
    Materializer::new().materialize(node)
}

/// Materialize a child node or pass text through unchanged.
pub fn materialize_child(child: Child<'_>) -> Markup<'_> {
    Materializer::new().materialize_child(child)
}

impl<'a> From<ParseNode<'a>> for Element<'a> {
    fn from(node: ParseNode<'a>) -> Self {
        materialize(node)
    }
}
