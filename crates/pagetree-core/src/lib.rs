//! # pagetree core
//!
//! Turns a flat, already-tokenized markup stream into a nested tree, then
//! maps each node onto a small catalog of typed elements.
//!
//! ## Quick Start
//!
//! ```rust
//! use pagetree_core::{Element, Reader, Token};
//!
//! let tokens = vec![
//!     Token::open("html"),
//!     Token::open("head"),
//!     Token::open("title"),
//!     Token::text("Notes"),
//!     Token::end("title"),
//!     Token::end("head"),
//!     Token::open("body"),
//!     Token::open("h1"),
//!     Token::text("Hello"),
//!     Token::end("h1"),
//!     Token::end("body"),
//!     Token::end("html"),
//! ];
//!
//! let page = Reader::new().read(&tokens).unwrap();
//! assert!(matches!(page.body, Element::Body(_)));
//! ```
//!
//! ## Degraded Parses
//!
//! Malformed nesting never fails a read. A run that cannot be split into
//! nested tags is kept as opaque entries and reported as a diagnostic:
//!
//! ```rust
//! use pagetree_core::{Reader, Token};
//!
//! let tokens = vec![
//!     Token::open("html"),
//!     Token::open("head"),
//!     Token::open("title"),
//!     Token::text("Notes"),
//!     Token::end("title"),
//!     Token::end("head"),
//!     Token::open("body"),
//!     Token::text("loose text"),
//!     Token::open("p"),
//!     Token::end("p"),
//!     Token::end("body"),
//!     Token::end("html"),
//! ];
//!
//! let result = Reader::new().read_with_diagnostics(&tokens).unwrap();
//! assert!(result.page.body.children().unwrap().is_opaque());
//! assert_eq!(result.errors.len(), 1);
//! ```
//!
//! ## Pipeline
//!
//! - [`stream`]: flattening, envelope stripping and head/body segmentation
//! - [`builder`]: the recursive tree builder
//! - [`materialize`]: mapping parse nodes onto [`Element`] variants
//! - [`reader`]: the configurable driver over all stages

pub mod ast;
pub mod builder;
pub mod element;
pub mod error;
pub mod materialize;
pub mod reader;
pub mod span;
pub mod stream;
pub mod token;

pub use ast::{Attributes, Child, Content, NodeKind, ParseNode};
pub use builder::TreeBuilder;
pub use element::{Children, Element, Markup};
pub use error::{ParseError, ParseErrorKind, ParseErrors};
pub use materialize::Materializer;
pub use reader::{Page, ParseTree, ReadResult, Reader};
pub use stream::{Entry, Segmentation};
pub use token::{Attribute, Token, VoidTags};
