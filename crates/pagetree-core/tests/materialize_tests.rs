//! Integration tests for the materializer

use pagetree_core::ast::{Attributes, Child, Content, NodeKind, ParseNode};
use pagetree_core::builder::build_tree;
use pagetree_core::element::{Children, Element, Markup};
use pagetree_core::materialize::{materialize, materialize_child, Materializer};
use pagetree_core::span::Span;
use pagetree_core::stream::{flatten, Entry};
use pagetree_core::{ParseErrorKind, Token, VoidTags};

fn styled() -> Attributes<'static> {
    Attributes::from_iter([("class", "lead"), ("id", "x")])
}

fn text_node(name: &str) -> ParseNode<'_> {
    ParseNode::container(
        name,
        styled(),
        Content::Children(vec![Child::Text("content".into())]),
        Span::default(),
    )
}

fn only_text<'e>(children: &'e Children<'_>) -> &'e str {
    let items = children.markup().expect("materialized children");
    assert_eq!(items.len(), 1);
    items[0].as_text().expect("text child")
}

// ============================================================================
// Catalog Coverage Tests
// ============================================================================

#[test]
fn test_container_tags_map_to_variants() {
    for name in ["p", "head", "body", "title", "b"] {
        let element = materialize(text_node(name));
        let matched = match (&element, name) {
            (Element::Paragraph(_), "p")
            | (Element::Head(_), "head")
            | (Element::Body(_), "body")
            | (Element::Title(_), "title")
            | (Element::Bold(_), "b") => true,
            _ => false,
        };
        assert!(matched, "<{}> became {:?}", name, element);
        assert_eq!(element.tag_name(), name);
        assert_eq!(element.kind(), NodeKind::Container);
        assert_eq!(element.attributes(), &styled());
        assert_eq!(only_text(element.children().unwrap()), "content");
    }
}

#[test]
fn test_heading_levels() {
    for level in 1..=6u8 {
        let name = format!("h{}", level);
        let element = materialize(text_node(&name));
        match &element {
            Element::Heading(h) => {
                assert_eq!(h.level, level);
                assert_eq!(h.attributes, styled());
                assert_eq!(only_text(&h.children), "content");
            }
            other => panic!("<{}> became {:?}", name, other),
        }
        assert_eq!(element.tag_name(), name);
    }
}

#[test]
fn test_void_tags_map_to_variants() {
    for name in ["img", "br", "hr"] {
        let node = ParseNode::empty(name, styled(), Span::new(0, 2));
        let element = materialize(node);
        let matched = match (&element, name) {
            (Element::Image(_), "img")
            | (Element::LineBreak(_), "br")
            | (Element::HorizontalRule(_), "hr") => true,
            _ => false,
        };
        assert!(matched, "<{}> became {:?}", name, element);
        assert_eq!(element.kind(), NodeKind::Empty);
        assert_eq!(element.attributes(), &styled());
        assert!(element.children().is_none());
    }
}

#[test]
fn test_unknown_tags_become_generic() {
    for name in ["div", "span", "h7", "h0", "H1", "P", "hgroup", "h12"] {
        let element = materialize(text_node(name));
        match &element {
            Element::Generic(g) => {
                assert_eq!(g.name, name);
                assert_eq!(g.kind, NodeKind::Container);
                assert_eq!(only_text(&g.children), "content");
            }
            other => panic!("<{}> became {:?}", name, other),
        }
        assert_eq!(element.tag_name(), name);
    }
}

#[test]
fn test_generic_void_keeps_kind() {
    let node = ParseNode::empty("input", Attributes::from_iter([("type", "text")]), Span::new(0, 2));
    let element = materialize(node);

    assert_eq!(element.kind(), NodeKind::Empty);
    assert_eq!(element.tag_name(), "input");
    assert_eq!(element.attributes().get("type"), Some("text"));
    assert!(element.children().is_none());
}

// ============================================================================
// Children Tests
// ============================================================================

#[test]
fn test_nested_children_materialize_recursively() {
    let tokens = [
        Token::open("p"),
        Token::open("b"),
        Token::text("Hi"),
        Token::end("b"),
        Token::end("p"),
    ];
    let entries = flatten(&tokens);
    let node = build_tree(&entries, &VoidTags::html()).unwrap();
    let element = materialize(node);

    let Element::Paragraph(p) = element else {
        panic!("expected paragraph");
    };
    let items = p.children.markup().unwrap();
    assert_eq!(items.len(), 1);
    match items[0].as_element() {
        Some(Element::Bold(b)) => assert_eq!(only_text(&b.children), "Hi"),
        other => panic!("expected bold, got {:?}", other),
    }
}

#[test]
fn test_opaque_children_pass_through() {
    let tokens = [
        Token::open("p"),
        Token::text("Hello "),
        Token::open("b"),
        Token::text("world"),
        Token::end("b"),
        Token::end("p"),
    ];
    let entries = flatten(&tokens);
    let node = build_tree(&entries, &VoidTags::html()).unwrap();
    let element = materialize(node);

    let children = element.children().unwrap();
    assert!(children.is_opaque());
    match children {
        Children::Opaque(raw) => {
            assert_eq!(raw.len(), 5);
            assert_eq!(raw[0], Entry::Text("Hello "));
        }
        Children::Markup(_) => panic!("expected opaque children"),
    }
}

#[test]
fn test_materialize_child_passes_text_unchanged() {
    let markup = materialize_child(Child::Text("plain".into()));
    assert_eq!(markup, Markup::Text("plain".into()));
}

#[test]
fn test_void_with_content_is_rejected() {
    let node = ParseNode::container(
        "br",
        Attributes::new(),
        Content::Opaque(vec![Entry::Text("stray")]),
        Span::new(4, 8),
    );
    let mut materializer = Materializer::new();
    let element = materializer.materialize(node);

    assert!(matches!(element, Element::LineBreak(_)));
    assert!(element.children().is_none());

    let errors = materializer.take_errors();
    assert_eq!(errors.len(), 1);
    let error = errors.iter().next().unwrap();
    assert_eq!(error.kind, ParseErrorKind::UnexpectedChildren);
    assert!(error.recoverable);
    assert_eq!(error.span, Some(Span::new(4, 8)));
}

#[test]
fn test_clean_tree_records_nothing() {
    let mut materializer = Materializer::new();
    let _ = materializer.materialize(text_node("p"));
    assert!(materializer.errors().is_empty());
}

// ============================================================================
// Element API Tests
// ============================================================================

#[test]
fn test_push_child() {
    let mut body = materialize(text_node("body"));
    assert!(body.push_child(materialize(text_node("p"))));
    assert!(body.push_child("tail"));

    let items = body.children().unwrap().markup().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[1].as_element().map(Element::tag_name), Some("p"));
    assert_eq!(items[2].as_text(), Some("tail"));
}

#[test]
fn test_push_child_rejected_for_void() {
    let mut img = materialize(ParseNode::empty("img", Attributes::new(), Span::default()));
    assert!(!img.push_child("nope"));
}

#[test]
fn test_push_child_rejected_for_opaque() {
    let node = ParseNode::container(
        "div",
        Attributes::new(),
        Content::Opaque(vec![Entry::Text("raw")]),
        Span::default(),
    );
    let mut div = materialize(node);
    assert!(!div.push_child("more"));
    assert_eq!(div.children().unwrap().len(), 1);
}

#[test]
fn test_attributes_mut() {
    let mut element = materialize(text_node("p"));
    element.attributes_mut().insert("class", "changed");

    let pairs: Vec<(&str, &str)> = element.attributes().iter().collect();
    assert_eq!(pairs, vec![("class", "changed"), ("id", "x")]);
}

#[test]
fn test_from_parse_node() {
    let element: Element<'_> = text_node("title").into();
    assert!(matches!(element, Element::Title(_)));
}
