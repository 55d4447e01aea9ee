//! Stream normalization and head/body segmentation.
//!
//! The tree builder does not walk tokens directly. Each start tag is
//! flattened into two entries, the tag name followed by its attribute
//! payload, so that a node always reads its name from the first entry of a
//! run and its attributes from the second. All positional rules in this
//! crate (the two-plus-one envelope, the seven-entry head, void elements
//! closing after two entries) count entries.
//!
//! - Zero-copy: entries borrow names, text and attributes from the tokens
//! - Order-preserving: entries appear exactly in token order

use tracing::debug;

use crate::error::ParseError;
use crate::span::Span;
use crate::token::{Attribute, Token, VoidTags};

/// Entries stripped from the front of the stream (wrapper name and payload).
pub const ENVELOPE_LEADING: usize = 2;

/// Entries stripped from the back of the stream (wrapper end tag).
pub const ENVELOPE_TRAILING: usize = 1;

/// Length of the head segment under positional segmentation.
pub const HEAD_ENTRIES: usize = 7;

/// A single unit of the normalized stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Entry<'a> {
    /// Tag name slot of a start tag.
    Open(&'a str),
    /// Attribute payload slot following an `Open`.
    Attributes(&'a [Attribute]),
    /// Raw text.
    Text(&'a str),
    /// An end tag.
    Close(&'a str),
}

impl<'a> Entry<'a> {
    /// Tag name of an `Open` entry.
    #[inline]
    pub fn open_name(&self) -> Option<&'a str> {
        match *self {
            Entry::Open(name) => Some(name),
            _ => None,
        }
    }

    /// Check if this entry closes the named tag.
    #[inline]
    pub fn closes(&self, name: &str) -> bool {
        matches!(*self, Entry::Close(n) if n == name)
    }

    /// Text content of a `Text` entry.
    #[inline]
    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            Entry::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Flatten tokens into entries, in order.
pub fn flatten(tokens: &[Token]) -> Vec<Entry<'_>> {
    let mut entries = Vec::with_capacity(tokens.len() + tokens.len() / 2);
    for token in tokens {
        match token {
            Token::StartTag { name, attributes } => {
                entries.push(Entry::Open(name));
                entries.push(Entry::Attributes(attributes));
            }
            Token::EndTag { name } => entries.push(Entry::Close(name)),
            Token::Text(text) => entries.push(Entry::Text(text)),
        }
    }
    entries
}

/// A normalized entry stream with the document envelope removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stream<'a> {
    entries: Vec<Entry<'a>>,
}

impl<'a> Stream<'a> {
    /// The normalized entries.
    #[inline]
    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the stream is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The whole stream as one segment.
    pub fn as_segment(&self) -> Segment<'_, 'a> {
        Segment::new(&self.entries, 0)
    }
}

/// Normalize a token sequence.
///
/// Drops every text token that is exactly one newline, then strips the
/// first two entries and the last entry, which belong to the outer
/// document wrapper. Fails with `StructuralUnderflow` when fewer than three
/// entries remain after whitespace removal.
///
/// # Example
///
/// ```rust
/// use pagetree_core::stream::normalize;
/// use pagetree_core::Token;
///
/// let tokens = [
///     Token::open("html"),
///     Token::text("\n"),
///     Token::open("p"),
///     Token::end("p"),
///     Token::end("html"),
/// ];
/// let stream = normalize(&tokens).unwrap();
/// assert_eq!(stream.len(), 3);
/// ```
pub fn normalize(tokens: &[Token]) -> Result<Stream<'_>, ParseError> {
    let mut entries = flatten(tokens);
    entries.retain(|e| *e != Entry::Text("\n"));

    let needed = ENVELOPE_LEADING + ENVELOPE_TRAILING;
    if entries.len() < needed {
        return Err(ParseError::structural_underflow(needed, entries.len()));
    }

    if entries[0].open_name().is_none() || !matches!(entries[entries.len() - 1], Entry::Close(_)) {
        debug!(
            first = ?entries[0],
            last = ?entries[entries.len() - 1],
            "stripped envelope does not look like a document wrapper"
        );
    }

    entries.truncate(entries.len() - ENVELOPE_TRAILING);
    entries.drain(..ENVELOPE_LEADING);

    debug!(tokens = tokens.len(), entries = entries.len(), "normalized token stream");

    Ok(Stream { entries })
}

/// A contiguous run of stream entries with its position in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'s, 'a> {
    entries: &'s [Entry<'a>],
    offset: usize,
}

impl<'s, 'a> Segment<'s, 'a> {
    /// Create a segment starting at `offset` in its stream.
    #[inline]
    pub fn new(entries: &'s [Entry<'a>], offset: usize) -> Self {
        Self { entries, offset }
    }

    /// The entries of this segment.
    #[inline]
    pub fn entries(&self) -> &'s [Entry<'a>] {
        self.entries
    }

    /// Index of the first entry in the stream.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the segment is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stream range covered by this segment.
    #[inline]
    pub fn span(&self) -> Span {
        Span::at(self.offset, self.entries.len())
    }
}

/// How the normalized stream is split into head and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Segmentation {
    /// The first seven entries are the head, the rest is the body.
    ///
    /// Assumes the head region tokenizes to exactly `<head>`, its payload,
    /// `<title>`, its payload, the title text, `</title>` and `</head>`.
    /// Documents with any other head shape are split in the wrong place
    /// without an error.
    #[default]
    Positional,
    /// The head and body are the first top-level `head` and `body` regions.
    Semantic,
}

impl Segmentation {
    /// Split a stream into its head and body segments.
    pub fn split<'s, 'a>(
        self,
        stream: &'s Stream<'a>,
        void_tags: &VoidTags,
    ) -> Result<(Segment<'s, 'a>, Segment<'s, 'a>), ParseError> {
        let (head, body) = match self {
            Segmentation::Positional => split_positional(stream)?,
            Segmentation::Semantic => split_semantic(stream, void_tags)?,
        };
        debug!(
            mode = ?self,
            head = head.len(),
            body = body.len(),
            "segmented stream"
        );
        Ok((head, body))
    }
}

fn split_positional<'s, 'a>(
    stream: &'s Stream<'a>,
) -> Result<(Segment<'s, 'a>, Segment<'s, 'a>), ParseError> {
    let entries = stream.entries();
    if entries.len() <= HEAD_ENTRIES {
        return Err(ParseError::structural_underflow(
            HEAD_ENTRIES + 1,
            entries.len(),
        ));
    }
    let (head, body) = entries.split_at(HEAD_ENTRIES);
    Ok((Segment::new(head, 0), Segment::new(body, HEAD_ENTRIES)))
}

fn split_semantic<'s, 'a>(
    stream: &'s Stream<'a>,
    void_tags: &VoidTags,
) -> Result<(Segment<'s, 'a>, Segment<'s, 'a>), ParseError> {
    let entries = stream.entries();
    let mut head: Option<Segment<'s, 'a>> = None;
    let mut body: Option<Segment<'s, 'a>> = None;
    // (tag name, start index) of the top-level region being tracked
    let mut region: Option<(&str, usize)> = None;
    let mut depth = 0usize;

    for (i, entry) in entries.iter().enumerate() {
        match *entry {
            Entry::Open(name) => {
                if depth == 0 && region.is_none() {
                    let wanted = (name == "head" && head.is_none())
                        || (name == "body" && body.is_none());
                    if wanted {
                        region = Some((name, i));
                    }
                }
                if !void_tags.contains(name) {
                    depth += 1;
                }
            }
            Entry::Close(name) => {
                if !void_tags.contains(name) {
                    depth = depth.saturating_sub(1);
                }
                if depth == 0 {
                    if let Some((tag, start)) = region {
                        if tag == name {
                            let segment = Segment::new(&entries[start..=i], start);
                            if tag == "head" {
                                head = Some(segment);
                            } else {
                                body = Some(segment);
                            }
                            region = None;
                        }
                    }
                }
            }
            Entry::Attributes(_) | Entry::Text(_) => {}
        }
        if head.is_some() && body.is_some() {
            break;
        }
    }

    // an unclosed region runs to the end of the stream
    if let Some((tag, start)) = region {
        let segment = Segment::new(&entries[start..], start);
        if tag == "head" {
            head = Some(segment);
        } else {
            body = Some(segment);
        }
    }

    let head = head.ok_or_else(|| ParseError::missing_segment("head"))?;
    let body = body.ok_or_else(|| ParseError::missing_segment("body"))?;
    Ok((head, body))
}
