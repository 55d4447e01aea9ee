//! Document reader: normalize, segment, build and materialize.
//!
//! [`Reader`] runs the whole pipeline over one token sequence and hands
//! back either the typed [`Page`] or the untyped [`ParseTree`]. Fatal
//! structural problems come back as `Err`; everything the pipeline
//! recovered from is available through [`Reader::read_with_diagnostics`].

use tracing::debug;

use crate::ast::ParseNode;
use crate::builder::{TreeBuilder, DEFAULT_MAX_DEPTH};
use crate::element::Element;
use crate::error::{ParseError, ParseErrors};
use crate::materialize::Materializer;
use crate::stream::{normalize, Segmentation};
use crate::token::{Token, VoidTags};

/// The untyped head and body trees of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseTree<'a> {
    /// Tree built from the head segment.
    pub head: ParseNode<'a>,
    /// Tree built from the body segment.
    pub body: ParseNode<'a>,
}

/// A materialized document: one typed element per region.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Page<'a> {
    /// The head region.
    pub head: Element<'a>,
    /// The body region.
    pub body: Element<'a>,
}

/// A page together with the diagnostics recovered while reading it.
#[derive(Debug)]
pub struct ReadResult<'a> {
    /// The materialized page.
    pub page: Page<'a>,
    /// Recoverable diagnostics, in pipeline order.
    pub errors: ParseErrors,
}

impl<'a> ReadResult<'a> {
    /// Check if the document was read without any degradation.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configurable document reader.
///
/// # Example
///
/// ```rust
/// use pagetree_core::{Reader, Segmentation, Token, VoidTags};
///
/// let tokens = vec![
///     Token::open("html"),
///     Token::open("head"),
///     Token::open("title"),
///     Token::text("Home"),
///     Token::end("title"),
///     Token::end("head"),
///     Token::open("body"),
///     Token::open("p"),
///     Token::text("Welcome"),
///     Token::end("p"),
///     Token::end("body"),
///     Token::end("html"),
/// ];
///
/// let reader = Reader::new()
///     .with_void_tags(VoidTags::html())
///     .with_segmentation(Segmentation::Semantic);
/// let page = reader.read(&tokens).unwrap();
/// assert_eq!(page.head.tag_name(), "head");
/// assert_eq!(page.body.tag_name(), "body");
/// ```
#[derive(Debug, Clone)]
pub struct Reader {
    void_tags: Option<VoidTags>,
    segmentation: Segmentation,
    max_depth: usize,
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader {
    /// Create a reader with positional segmentation and void tags derived
    /// from each token sequence.
    pub fn new() -> Self {
        Self {
            void_tags: None,
            segmentation: Segmentation::Positional,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Use a fixed set of void tags instead of deriving one per document.
    pub fn with_void_tags(mut self, void_tags: VoidTags) -> Self {
        self.void_tags = Some(void_tags);
        self
    }

    /// Choose how the stream is split into head and body.
    pub fn with_segmentation(mut self, segmentation: Segmentation) -> Self {
        self.segmentation = segmentation;
        self
    }

    /// Set the nesting ceiling for the tree builder.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Read a document into a typed page.
    pub fn read<'a>(&self, tokens: &'a [Token]) -> Result<Page<'a>, ParseError> {
        self.read_with_diagnostics(tokens).map(|result| result.page)
    }

    /// Read a document into a typed page and report what was recovered.
    pub fn read_with_diagnostics<'a>(
        &self,
        tokens: &'a [Token],
    ) -> Result<ReadResult<'a>, ParseError> {
        let (tree, mut errors) = self.build(tokens)?;

        debug!("materializing parse trees");
        let mut materializer = Materializer::new();
        let page = Page {
            head: materializer.materialize(tree.head),
            body: materializer.materialize(tree.body),
        };
        errors.append(&mut materializer.take_errors());

        debug!(diagnostics = errors.len(), "document read");
        Ok(ReadResult { page, errors })
    }

    /// Build the untyped trees without materializing them.
    pub fn parse_tree<'a>(&self, tokens: &'a [Token]) -> Result<ParseTree<'a>, ParseError> {
        self.build(tokens).map(|(tree, _)| tree)
    }

    fn build<'a>(&self, tokens: &'a [Token]) -> Result<(ParseTree<'a>, ParseErrors), ParseError> {
        let derived;
        let void_tags = match &self.void_tags {
            Some(void_tags) => void_tags,
            None => {
                derived = VoidTags::from_tokens(tokens);
                &derived
            }
        };
        debug!(void_tags = void_tags.len(), "reading document");

        let stream = normalize(tokens)?;
        let (head, body) = self.segmentation.split(&stream, void_tags)?;

        let mut builder = TreeBuilder::new(void_tags).with_max_depth(self.max_depth);
        let head = builder.build(head)?;
        let body = builder.build(body)?;

        Ok((ParseTree { head, body }, builder.take_errors()))
    }
}
