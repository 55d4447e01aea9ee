//! Recursive tree builder.
//!
//! Consumes a run of stream entries and produces one [`ParseNode`]. The
//! run's first entry names the node and the second carries its attribute
//! payload; the rest is split into nested runs by a small state machine and
//! each nested run is built recursively.
//!
//! The builder never fails on malformed nesting. When a run cannot be split
//! into nested tags it is kept as [`Content::Opaque`] and a recoverable
//! diagnostic is recorded. Only structural problems (a run that does not
//! start with a tag, nesting past the depth ceiling) are returned as errors.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::ast::{Attributes, Child, Content, ParseNode};
use crate::error::{ParseError, ParseErrors};
use crate::span::Span;
use crate::stream::{Entry, Segment};
use crate::token::VoidTags;

/// Default ceiling on nesting depth.
///
/// Building and materializing recurse once per level. This ceiling keeps a
/// full read within a 2 MiB thread stack in unoptimized builds.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Scanner state while splitting a node's content into nested runs.
#[derive(Debug, Clone, Copy)]
enum ScanState<'a> {
    /// Between nested tags; the next entry must open one.
    ScanningForTag,
    /// Inside a nested tag that opened at `start`.
    AccumulatingNestedRun {
        start: usize,
        name: &'a str,
        void: bool,
    },
}

/// Tree builder bound to a set of void tags.
pub struct TreeBuilder<'v> {
    void_tags: &'v VoidTags,
    max_depth: usize,
    /// Diagnostics for runs that degraded to opaque content.
    errors: ParseErrors,
}

impl<'v> TreeBuilder<'v> {
    /// Create a builder that treats `void_tags` as never taking an end tag.
    #[inline]
    pub fn new(void_tags: &'v VoidTags) -> Self {
        Self {
            void_tags,
            max_depth: DEFAULT_MAX_DEPTH,
            errors: ParseErrors::new(),
        }
    }

    /// Set the nesting ceiling.
    ///
    /// A run nested deeper than this fails with `DepthLimitExceeded`
    /// instead of recursing further.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build the tree for one segment.
    pub fn build<'a>(&mut self, segment: Segment<'_, 'a>) -> Result<ParseNode<'a>, ParseError> {
        debug!(
            entries = segment.len(),
            offset = segment.offset(),
            "building parse tree"
        );
        self.build_run(segment.entries(), segment.offset(), 0)
    }

    /// Build the tree for a bare run of entries.
    pub fn build_entries<'a>(&mut self, run: &[Entry<'a>]) -> Result<ParseNode<'a>, ParseError> {
        self.build(Segment::new(run, 0))
    }

    /// Diagnostics recorded so far.
    pub fn errors(&self) -> &ParseErrors {
        &self.errors
    }

    /// Take the recorded diagnostics, leaving the builder's list empty.
    pub fn take_errors(&mut self) -> ParseErrors {
        std::mem::take(&mut self.errors)
    }

    fn build_run<'a>(
        &mut self,
        run: &[Entry<'a>],
        offset: usize,
        depth: usize,
    ) -> Result<ParseNode<'a>, ParseError> {
        let span = Span::at(offset, run.len());
        if depth > self.max_depth {
            return Err(ParseError::depth_limit(self.max_depth, span));
        }

        let name = run
            .first()
            .and_then(Entry::open_name)
            .ok_or_else(|| ParseError::missing_start_tag(span))?;

        let (attributes, header) = match run.get(1) {
            Some(&Entry::Attributes(attrs)) => (Attributes::from_slice(attrs), 2),
            _ => (Attributes::new(), 1),
        };

        if self.void_tags.contains(name) {
            trace!(tag = name, "void element");
            return Ok(ParseNode::empty(name, attributes, Span::at(offset, header)));
        }

        let mut content = &run[header..];
        let closed = content.last().is_some_and(|e| e.closes(name));
        if closed {
            content = &content[..content.len() - 1];
        }
        let base = offset + header;

        if let [Entry::Text(text)] = content {
            let children = vec![Child::Text(Cow::Borrowed(*text))];
            return Ok(
                ParseNode::container(name, attributes, Content::Children(children), span)
                    .with_closed(closed),
            );
        }

        let mut children = Vec::new();
        let mut state = ScanState::ScanningForTag;

        for (i, entry) in content.iter().enumerate() {
            state = match state {
                ScanState::ScanningForTag => match entry.open_name() {
                    Some(nested) => {
                        trace!(parent = name, tag = nested, index = base + i, "nested tag opens");
                        ScanState::AccumulatingNestedRun {
                            start: i,
                            name: nested,
                            void: self.void_tags.contains(nested),
                        }
                    }
                    None => {
                        debug!(tag = name, index = base + i, "expected a start tag, keeping run opaque");
                        return Ok(self.fallback(name, attributes, content, base, span, closed));
                    }
                },
                ScanState::AccumulatingNestedRun {
                    start,
                    name: nested,
                    void,
                } => {
                    let accumulated = i - start + 1;
                    if (void && accumulated == 2) || entry.closes(nested) {
                        let child =
                            self.build_run(&content[start..=i], base + start, depth + 1)?;
                        children.push(Child::Node(child));
                        ScanState::ScanningForTag
                    } else {
                        state
                    }
                }
            };
        }

        if let ScanState::AccumulatingNestedRun { name: nested, .. } = state {
            debug!(tag = name, unclosed = nested, "nested tag never closed, keeping run opaque");
            return Ok(self.fallback(name, attributes, content, base, span, closed));
        }

        Ok(
            ParseNode::container(name, attributes, Content::Children(children), span)
                .with_closed(closed),
        )
    }

    /// Keep `content` un-recursed and record the degradation.
    fn fallback<'a>(
        &mut self,
        name: &'a str,
        attributes: Attributes<'a>,
        content: &[Entry<'a>],
        base: usize,
        span: Span,
        closed: bool,
    ) -> ParseNode<'a> {
        self.errors
            .push(ParseError::malformed_nesting(name, Span::at(base, content.len())));
        ParseNode::container(name, attributes, Content::Opaque(content.to_vec()), span)
            .with_closed(closed)
    }
}

/// Build a single tree from a bare run with default limits.
///
/// Diagnostics are discarded; degraded runs are still visible as opaque
/// content in the returned tree.
///
/// # Example
///
/// ```rust
/// use pagetree_core::builder::build_tree;
/// use pagetree_core::stream::flatten;
/// use pagetree_core::{Token, VoidTags};
///
/// let tokens = [
///     Token::open("p"),
///     Token::open("b"),
///     Token::text("Hi"),
///     Token::end("b"),
///     Token::end("p"),
/// ];
/// let node = build_tree(&flatten(&tokens), &VoidTags::html()).unwrap();
/// assert_eq!(node.name, "p");
/// assert_eq!(node.children().map(<[_]>::len), Some(1));
/// ```
pub fn build_tree<'a>(run: &[Entry<'a>], void_tags: &VoidTags) -> Result<ParseNode<'a>, ParseError> {
    TreeBuilder::new(void_tags).build_entries(run)
}
