//! Diagnostics and result types for CODEOWNERS parsing.
//!
//! Parsing never fails. Lines that cannot become records are dropped and
//! reported here as warnings so callers may surface them if they wish.

use super::ast::OwnershipRecord;
use super::span::Span;
use crate::ruleset::RuleSet;
use thiserror::Error;

/// A line that was skipped while parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseWarning {
    /// A pattern without owners confers no ownership and is ignored.
    #[error("line {line}: pattern '{pattern}' has no owners and was ignored")]
    MissingOwners {
        /// The line number (1-based).
        line: usize,
        /// The pattern text.
        pattern: String,
        /// Location of the pattern.
        span: Span,
    },
}

impl ParseWarning {
    /// Creates a missing owners warning.
    pub fn missing_owners(pattern: impl Into<String>, span: Span) -> Self {
        Self::MissingOwners {
            line: span.line,
            pattern: pattern.into(),
            span,
        }
    }

    /// Returns the span associated with this warning.
    pub fn span(&self) -> &Span {
        match self {
            ParseWarning::MissingOwners { span, .. } => span,
        }
    }

    /// Returns the line number of the skipped line.
    pub fn line(&self) -> usize {
        match self {
            ParseWarning::MissingOwners { line, .. } => *line,
        }
    }
}

/// The result of parsing a CODEOWNERS file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// Ownership records in file order.
    pub records: Vec<OwnershipRecord>,
    /// Lines that were skipped.
    pub warnings: Vec<ParseWarning>,
}

impl ParseResult {
    /// Creates a parse result.
    pub fn new(records: Vec<OwnershipRecord>, warnings: Vec<ParseWarning>) -> Self {
        Self { records, warnings }
    }

    /// Returns true if any line was skipped.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Converts the parsed records into a `RuleSet`, discarding warnings.
    pub fn into_ruleset(self) -> RuleSet {
        RuleSet::new(self.records)
    }
}
