//! Byte ranges into the document text.
//!
//! The block tokenizer works line by line; each line remembers where it sits
//! in the input so that multi-line constructs (fenced code) can be captured
//! as one borrowed slice instead of being re-joined.

/// A byte range `[start, end)` in the source text.
///
/// ```rust
/// use docmark_core::span::Span;
///
/// let span = Span::new(4, 10);
/// assert_eq!(span.to(Span::new(12, 20)), Span::new(4, 20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: usize,
    /// Ending byte offset (exclusive).
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span running from the start of `self` to the end of `other`.
    ///
    /// Used to stretch a span over a run of consecutive lines.
    #[inline]
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end.max(self.start),
        }
    }
}
