//! Span tracking for source location information.
//!
//! A `Span` locates a rule inside the CODEOWNERS text so callers can navigate
//! back to the exact line and column it came from.

/// Represents a location span in the source file.
///
/// Line and column are 1-based for human-readable positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset from the start of the input (0-based).
    pub offset: usize,
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based).
    pub column: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Span {
    /// Creates a new span with the given position and length.
    pub fn new(offset: usize, line: usize, column: usize, length: usize) -> Self {
        Self {
            offset,
            line,
            column,
            length,
        }
    }

    /// Creates a zero-length span at the given position.
    pub fn point(offset: usize, line: usize, column: usize) -> Self {
        Self::new(offset, line, column, 0)
    }

    /// Returns the end offset of this span.
    pub fn end_offset(&self) -> usize {
        self.offset + self.length
    }

    /// Extends this span to include another span on the same line.
    pub fn extend(&self, other: &Span) -> Span {
        Span {
            offset: self.offset,
            line: self.line,
            column: self.column,
            length: other.end_offset().saturating_sub(self.offset),
        }
    }

    /// Returns the slice of `source` covered by this span, if in bounds.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.offset..self.end_offset())
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::new(0, 1, 1, 0)
    }
}
