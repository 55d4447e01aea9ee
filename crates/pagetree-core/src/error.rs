use crate::span::Span;

/// Error kinds for categorizing parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParseErrorKind {
    /// Too few entries left to strip the document envelope or split segments
    StructuralUnderflow,
    /// A head or body region could not be located
    MissingSegment,
    /// A run handed to the tree builder does not begin with a start tag
    MissingStartTag,
    /// Nesting went deeper than the configured ceiling
    DepthLimitExceeded,
    /// A run fell back to its opaque representation
    MalformedNesting,
    /// A void element arrived with content attached
    UnexpectedChildren,
}

/// A parse error with location and recovery information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}{}", describe_span(.span))]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,
    /// Stream location where the error occurred
    pub span: Option<Span>,
    /// Error categorization
    pub kind: ParseErrorKind,
    /// Whether parsing can continue after this error
    pub recoverable: bool,
}

fn describe_span(span: &Option<Span>) -> String {
    match span {
        Some(span) => format!(" at entries {}..{}", span.start, span.end),
        None => String::new(),
    }
}

impl ParseError {
    /// Create a new recoverable error.
    pub fn new(message: impl Into<String>, kind: ParseErrorKind, span: Option<Span>) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            recoverable: true,
        }
    }

    /// Create an error for input too short to carry the expected structure.
    pub fn structural_underflow(needed: usize, found: usize) -> Self {
        Self::new(
            format!("expected at least {} entries, found {}", needed, found),
            ParseErrorKind::StructuralUnderflow,
            None,
        )
        .non_recoverable()
    }

    /// Create an error for a region that is absent from the stream.
    pub fn missing_segment(tag: &str) -> Self {
        Self::new(
            format!("no top-level <{}> region", tag),
            ParseErrorKind::MissingSegment,
            None,
        )
        .non_recoverable()
    }

    /// Create an error for a run that does not open with a tag.
    pub fn missing_start_tag(span: Span) -> Self {
        Self::new(
            "run does not begin with a start tag",
            ParseErrorKind::MissingStartTag,
            Some(span),
        )
        .non_recoverable()
    }

    /// Create an error for nesting beyond the configured ceiling.
    pub fn depth_limit(limit: usize, span: Span) -> Self {
        Self::new(
            format!("nesting exceeds the limit of {} levels", limit),
            ParseErrorKind::DepthLimitExceeded,
            Some(span),
        )
        .non_recoverable()
    }

    /// Create a diagnostic for a run kept as opaque entries.
    pub fn malformed_nesting(tag: &str, span: Span) -> Self {
        Self::new(
            format!("content of <{}> kept unparsed", tag),
            ParseErrorKind::MalformedNesting,
            Some(span),
        )
    }

    /// Create a diagnostic for content dropped from a void element.
    pub fn unexpected_children(tag: &str, span: Span) -> Self {
        Self::new(
            format!("<{}> cannot have children; content discarded", tag),
            ParseErrorKind::UnexpectedChildren,
            Some(span),
        )
    }

    /// Mark this error as non-recoverable.
    pub fn non_recoverable(mut self) -> Self {
        self.recoverable = false;
        self
    }
}

/// A collection of recoverable diagnostics gathered while parsing.
#[derive(Debug, Clone, Default)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    /// Create an empty error collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Move every error out of `other` into this collection.
    pub fn append(&mut self, other: &mut ParseErrors) {
        self.errors.append(&mut other.errors);
    }

    /// Check if any errors were collected.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter()
    }

    /// Count errors of one kind.
    pub fn count(&self, kind: ParseErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }

    /// Check if any non-recoverable errors exist.
    pub fn has_fatal(&self) -> bool {
        self.errors.iter().any(|e| !e.recoverable)
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
