//! Data structures for parsed CODEOWNERS content.

use super::lexer::{OwnerKind, classify_owner};
use super::span::Span;
use std::fmt::{self, Display};

/// One parsed rule line of a CODEOWNERS file.
///
/// The pattern is kept exactly as written (leading `/`, trailing `/` and glob
/// characters preserved). Owners keep their order and may repeat. A record
/// always has at least one owner: lines without owners never become records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipRecord {
    /// The raw pattern token (e.g., "*.rs", "/src/**", "docs/").
    pub pattern: String,
    /// Owner tokens in file order.
    pub owners: Vec<String>,
    /// Location of the rule text (pattern through last owner) in the source.
    pub span: Span,
}

impl OwnershipRecord {
    /// Creates a new record.
    pub fn new(pattern: impl Into<String>, owners: Vec<String>, span: Span) -> Self {
        debug_assert!(!owners.is_empty(), "records always carry owners");
        Self {
            pattern: pattern.into(),
            owners,
            span,
        }
    }

    /// Returns the 1-based line number the rule was read from.
    pub fn line(&self) -> usize {
        self.span.line
    }

    /// Returns true if `owner` appears in this record's owner list.
    pub fn has_owner(&self, owner: &str) -> bool {
        self.owners.iter().any(|o| o == owner)
    }

    /// Classifies each owner token.
    pub fn owner_kinds(&self) -> impl Iterator<Item = OwnerKind<'_>> {
        self.owners.iter().map(|o| classify_owner(o))
    }

    /// Owners joined the way they are shown to users ("@a, @b").
    pub fn owners_display(&self) -> String {
        self.owners.join(", ")
    }
}

impl Display for OwnershipRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)?;
        for owner in &self.owners {
            write!(f, " {}", owner)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_span() -> Span {
        Span::new(0, 3, 1, 10)
    }

    fn record(pattern: &str, owners: &[&str]) -> OwnershipRecord {
        OwnershipRecord::new(
            pattern,
            owners.iter().map(|o| o.to_string()).collect(),
            test_span(),
        )
    }

    #[test]
    fn record_line_comes_from_span() {
        assert_eq!(record("*.rs", &["@rust"]).line(), 3);
    }

    #[test]
    fn record_has_owner() {
        let r = record("/src/", &["@dev", "@org/core"]);
        assert!(r.has_owner("@org/core"));
        assert!(!r.has_owner("@org"));
    }

    #[test]
    fn record_owner_kinds() {
        let r = record("*", &["@dev", "@org/core", "dev@example.com"]);
        let labels: Vec<_> = r.owner_kinds().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["user", "team", "email"]);
    }

    #[test]
    fn record_display() {
        let r = record("*.rs", &["@alice", "@org/team"]);
        assert_eq!(r.to_string(), "*.rs @alice @org/team");
        assert_eq!(r.owners_display(), "@alice, @org/team");
    }
}
