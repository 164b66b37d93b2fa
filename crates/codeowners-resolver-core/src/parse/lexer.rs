//! Lexer and token parsers for CODEOWNERS files.
//!
//! This module contains nom-based parsers for the pieces of a single line:
//! comments, blank lines and whitespace-separated rule tokens.

use nom::{
    IResult, Parser,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::rest,
};

/// Byte order mark, treated as whitespace so an editor-saved file parses the
/// same as one without it.
const BOM: char = '\u{feff}';

/// Whitespace between tokens, including a byte order mark.
fn is_space(c: char) -> bool {
    c.is_whitespace() || c == BOM
}

/// Any non-whitespace character belongs to a token. There is no escaping and
/// no inline comment syntax, so `#` in the middle of a rule is an ordinary token.
fn is_token_char(c: char) -> bool {
    !is_space(c)
}

/// Consumes a (possibly empty) run of whitespace.
fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(is_space)(input)
}

/// Parses a complete comment line (optional whitespace + # + content).
pub fn parse_comment_line(input: &str) -> IResult<&str, &str> {
    (whitespace, char('#'), rest)
        .map(|(_, _, content)| content)
        .parse(input)
}

/// Checks if a line is blank (empty or only whitespace).
pub fn is_blank_line(input: &str) -> bool {
    input.trim_matches(is_space).is_empty()
}

/// Result of splitting a rule line into its tokens.
#[derive(Debug, Clone)]
pub struct RuleTokens<'a> {
    /// The pattern text.
    pub pattern: &'a str,
    /// Byte offset of pattern start within the line.
    pub pattern_offset: usize,
    /// List of owner texts.
    pub owners: Vec<&'a str>,
    /// Byte offsets of each owner start within the line.
    pub owner_offsets: Vec<usize>,
}

/// Result of parsing just a pattern (a line without owners).
#[derive(Debug, Clone)]
pub struct PatternOnly<'a> {
    /// The pattern text.
    pub pattern: &'a str,
    /// Byte offset of pattern start within the line.
    pub pattern_offset: usize,
}

/// Parses just a pattern from a line.
///
/// Used to locate pattern-only lines, which are skipped but reported.
pub fn parse_pattern_only(input: &str) -> IResult<&str, PatternOnly<'_>> {
    let (after_ws, leading_ws) = whitespace(input)?;
    let pattern_offset = leading_ws.len();

    let (rest, pattern) = take_while1(is_token_char)(after_ws)?;

    Ok((
        rest,
        PatternOnly {
            pattern,
            pattern_offset,
        },
    ))
}

/// Splits a rule line into pattern and owner tokens.
///
/// Fails when the line holds a pattern but no owners. Offsets are byte
/// offsets within `input` so the caller can build spans.
pub fn parse_rule_tokens(input: &str) -> IResult<&str, RuleTokens<'_>> {
    let (after_ws, leading_ws) = whitespace(input)?;
    let pattern_offset = leading_ws.len();

    let (after_pattern, pattern) = take_while1(is_token_char)(after_ws)?;

    let mut owners = Vec::new();
    let mut owner_offsets = Vec::new();
    let mut current = after_pattern;
    let mut current_offset = pattern_offset + pattern.len();

    loop {
        let (after_ws, ws) = whitespace(current)?;
        current_offset += ws.len();

        if after_ws.is_empty() {
            current = after_ws;
            break;
        }

        let (after_owner, owner) = take_while1(is_token_char)(after_ws)?;
        owner_offsets.push(current_offset);
        owners.push(owner);
        current_offset += owner.len();
        current = after_owner;
    }

    if owners.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Many1,
        )));
    }

    Ok((
        current,
        RuleTokens {
            pattern,
            pattern_offset,
            owners,
            owner_offsets,
        },
    ))
}

/// Classifies an owner string into its type.
///
/// Owner tokens are opaque to resolution; the classification is only used
/// for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind<'a> {
    /// A user handle (@username).
    User(&'a str),
    /// A team handle (@org/team).
    Team { org: &'a str, team: &'a str },
    /// An email address.
    Email(&'a str),
    /// Anything else.
    Unknown(&'a str),
}

impl OwnerKind<'_> {
    /// Short lowercase label for output.
    pub fn label(&self) -> &'static str {
        match self {
            OwnerKind::User(_) => "user",
            OwnerKind::Team { .. } => "team",
            OwnerKind::Email(_) => "email",
            OwnerKind::Unknown(_) => "unknown",
        }
    }
}

/// Classifies an owner text string into its type.
pub fn classify_owner(text: &str) -> OwnerKind<'_> {
    if let Some(stripped) = text.strip_prefix('@') {
        if let Some(slash_pos) = stripped.find('/') {
            let org = &stripped[..slash_pos];
            let team = &stripped[slash_pos + 1..];
            if !org.is_empty() && !team.is_empty() {
                return OwnerKind::Team { org, team };
            }
            return OwnerKind::Unknown(text);
        }
        if !stripped.is_empty() {
            return OwnerKind::User(stripped);
        }
        return OwnerKind::Unknown(text);
    } else if text.contains('@') {
        return OwnerKind::Email(text);
    }

    OwnerKind::Unknown(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_comment_line_with_leading_whitespace() {
        let (_rest, content) = parse_comment_line("   # comment").unwrap();
        assert_eq!(content, " comment");
    }

    #[test]
    fn byte_order_mark_is_whitespace() {
        assert!(parse_comment_line("\u{feff}# header").is_ok());
        assert!(is_blank_line("\u{feff}"));
        let (_, tokens) = parse_rule_tokens("\u{feff}* @default").unwrap();
        assert_eq!(tokens.pattern, "*");
        assert_eq!(tokens.pattern_offset, 3);
    }

    #[test]
    fn parse_comment_line_rejects_rule() {
        assert!(parse_comment_line("*.rs @owner # trailing").is_err());
    }

    #[test]
    fn is_blank_line_empty() {
        assert!(is_blank_line(""));
        assert!(is_blank_line("   "));
        assert!(is_blank_line("\t  \t"));
        assert!(!is_blank_line("*.rs @owner"));
        assert!(!is_blank_line("# comment"));
    }

    #[test]
    fn classify_owner_kinds() {
        assert_eq!(classify_owner("@octocat"), OwnerKind::User("octocat"));
        assert_eq!(
            classify_owner("@github/core"),
            OwnerKind::Team {
                org: "github",
                team: "core"
            }
        );
        assert_eq!(
            classify_owner("dev@example.com"),
            OwnerKind::Email("dev@example.com")
        );
        assert_eq!(classify_owner("noatsign"), OwnerKind::Unknown("noatsign"));
        assert_eq!(classify_owner("@"), OwnerKind::Unknown("@"));
        assert_eq!(classify_owner("@org/"), OwnerKind::Unknown("@org/"));
    }

    #[test]
    fn owner_kind_labels() {
        assert_eq!(classify_owner("@a").label(), "user");
        assert_eq!(classify_owner("@a/b").label(), "team");
        assert_eq!(classify_owner("a@b.c").label(), "email");
        assert_eq!(classify_owner("plain").label(), "unknown");
    }

    #[test]
    fn parse_rule_tokens_single_owner() {
        let (_rest, tokens) = parse_rule_tokens("*.rs @owner").unwrap();
        assert_eq!(tokens.pattern, "*.rs");
        assert_eq!(tokens.owners, vec!["@owner"]);
        assert_eq!(tokens.pattern_offset, 0);
        assert_eq!(tokens.owner_offsets, vec![5]);
    }

    #[test]
    fn parse_rule_tokens_tabs_and_runs_of_spaces() {
        let line = "  /src/\t@dev   @github/core  dev@example.com ";
        let (_rest, tokens) = parse_rule_tokens(line).unwrap();
        assert_eq!(tokens.pattern, "/src/");
        assert_eq!(tokens.pattern_offset, 2);
        assert_eq!(
            tokens.owners,
            vec!["@dev", "@github/core", "dev@example.com"]
        );
        assert_eq!(tokens.owner_offsets, vec![8, 15, 29]);
    }

    #[test]
    fn parse_rule_tokens_keeps_hash_tokens() {
        let (_rest, tokens) = parse_rule_tokens("*.js @frontend # note").unwrap();
        assert_eq!(tokens.owners, vec!["@frontend", "#", "note"]);
    }

    #[test]
    fn parse_rule_tokens_accepts_any_owner_text() {
        let (_rest, tokens) = parse_rule_tokens("docs owner-without-at").unwrap();
        assert_eq!(tokens.owners, vec!["owner-without-at"]);
    }

    #[test]
    fn parse_rule_tokens_no_owner_fails() {
        assert!(parse_rule_tokens("*.rs").is_err());
        assert!(parse_rule_tokens("*.rs   ").is_err());
    }

    #[test]
    fn parse_pattern_only_offsets() {
        let (_rest, only) = parse_pattern_only("   /lonely").unwrap();
        assert_eq!(only.pattern, "/lonely");
        assert_eq!(only.pattern_offset, 3);
    }
}
