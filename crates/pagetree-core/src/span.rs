//! Stream location tracking for parse nodes.
//!
//! Tokens come from an external tokenizer and carry no byte offsets, so a
//! `Span` addresses entries of the normalized stream instead. Every
//! `ParseNode` records the entry range it was built from, which is enough
//! to point a diagnostic at the part of the document that degraded.

/// A range of entries in the normalized stream.
///
/// Spans are half-open: `[start, end)`.
///
/// # Example
///
/// ```rust
/// use pagetree_core::span::Span;
///
/// let span = Span::new(2, 9);
/// assert_eq!(span.len(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    /// First entry index (inclusive).
    pub start: u32,
    /// One past the last entry index (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a new span from entry indices.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a span covering `len` entries from `start`.
    ///
    /// Indices past `u32::MAX` saturate.
    #[inline]
    pub(crate) fn at(start: usize, len: usize) -> Self {
        let end = start.saturating_add(len);
        Self::new(
            u32::try_from(start).unwrap_or(u32::MAX),
            u32::try_from(end).unwrap_or(u32::MAX),
        )
    }

    /// Number of entries covered.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Check if this span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if this span contains an entry index.
    #[inline]
    pub const fn contains(&self, index: u32) -> bool {
        index >= self.start && index < self.end
    }
}
