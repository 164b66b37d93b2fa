//! Planning and applying ownership changes to CODEOWNERS text.
//!
//! Planning is pure: it looks only at the path, the new owner and the record
//! that currently wins for the path. Applying splices the planned line into
//! the file text and leaves every other line untouched.

use crate::matching::is_exact_match;
use crate::parse::OwnershipRecord;
use std::fmt;

/// A single change to a CODEOWNERS file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnershipEdit {
    /// Rewrite the rule on `line` (1-based) to `text`.
    ReplaceLine { line: usize, text: String },
    /// Add `text` as a new rule at the end of the file.
    AppendLine { text: String },
}

impl OwnershipEdit {
    /// The rule line this edit writes.
    pub fn text(&self) -> &str {
        match self {
            Self::ReplaceLine { text, .. } | Self::AppendLine { text } => text,
        }
    }

    /// Returns true if the edit rewrites an existing line.
    pub fn is_replace(&self) -> bool {
        matches!(self, Self::ReplaceLine { .. })
    }
}

impl fmt::Display for OwnershipEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReplaceLine { line, text } => write!(f, "replace line {}: {}", line, text),
            Self::AppendLine { text } => write!(f, "append: {}", text),
        }
    }
}

/// Decides how to make `new_owner` the sole owner of `path`.
///
/// If the rule currently winning for `path` names exactly that path, it is
/// rewritten in place. Otherwise a root-anchored rule for the path is
/// appended, which wins because later rules take precedence.
pub fn plan_ownership_change(
    path: &str,
    new_owner: &str,
    current: Option<&OwnershipRecord>,
) -> OwnershipEdit {
    match current {
        Some(record) if is_exact_match(&record.pattern, path) => {
            return OwnershipEdit::ReplaceLine {
                line: record.line(),
                text: format!("{} {}", record.pattern, new_owner),
            };
        }
        _ => {}
    }

    let anchored = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    OwnershipEdit::AppendLine {
        text: format!("{} {}", anchored, new_owner),
    }
}

/// Applies `edit` to `content` and returns the new file text.
///
/// A replacement whose line no longer exists is appended instead.
pub fn apply_edit(content: &str, edit: &OwnershipEdit) -> String {
    match edit {
        OwnershipEdit::ReplaceLine { line, text } => {
            replace_line(content, *line, text).unwrap_or_else(|| append_line(content, text))
        }
        OwnershipEdit::AppendLine { text } => append_line(content, text),
    }
}

/// Returns the text of line `line` (1-based) without its line ending.
pub fn line_at(content: &str, line: usize) -> Option<&str> {
    let index = line.checked_sub(1)?;
    content
        .split('\n')
        .nth(index)
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}

/// Suggested rule line giving `path` to `owner`, for the user to add by hand.
pub fn suggest_rule(path: &str, owner: &str) -> String {
    format!("{} {}", path, owner)
}

/// A one-line summary of what applying `edit` did.
pub fn describe_edit(
    edit: &OwnershipEdit,
    path: &str,
    new_owner: &str,
    current: Option<&OwnershipRecord>,
) -> String {
    match (edit, current) {
        (OwnershipEdit::ReplaceLine { .. }, Some(record)) => {
            format!("Updated ownership for {} to {}", record.pattern, new_owner)
        }
        (OwnershipEdit::ReplaceLine { line, .. }, None) => {
            format!("Updated ownership on line {} to {}", line, new_owner)
        }
        (OwnershipEdit::AppendLine { .. }, Some(record)) => {
            format!(
                "Added specific override for {} (was: {})",
                path, record.pattern
            )
        }
        (OwnershipEdit::AppendLine { .. }, None) => format!("Added ownership for {}", path),
    }
}

fn replace_line(content: &str, line: usize, text: &str) -> Option<String> {
    let index = line.checked_sub(1)?;
    let mut out = String::with_capacity(content.len() + text.len());
    let mut found = false;

    for (i, segment) in content.split_inclusive('\n').enumerate() {
        if i == index {
            let ending = line_ending_of(segment);
            out.push_str(text);
            out.push_str(ending);
            found = true;
        } else {
            out.push_str(segment);
        }
    }

    found.then_some(out)
}

fn append_line(content: &str, text: &str) -> String {
    let eol = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let last = content.rsplit('\n').next().unwrap_or_default();
    let last = last.strip_suffix('\r').unwrap_or(last);

    let mut out = String::with_capacity(content.len() + text.len() + 2 * eol.len());
    out.push_str(content);
    if !last.trim().is_empty() {
        out.push_str(eol);
        out.push_str(eol);
    } else if last.is_empty() {
        out.push_str(eol);
    }
    out.push_str(text);
    out
}

fn line_ending_of(segment: &str) -> &str {
    if segment.ends_with("\r\n") {
        "\r\n"
    } else if segment.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Span;
    use crate::ruleset::RuleSet;

    fn record_at(pattern: &str, owners: &[&str], line: usize) -> OwnershipRecord {
        OwnershipRecord::new(
            pattern,
            owners.iter().map(|o| o.to_string()).collect(),
            Span::new(0, line, 1, pattern.len()),
        )
    }

    #[test]
    fn exact_match_is_replaced_in_place() {
        let current = record_at("/src/file.ts", &["@old"], 3);
        let edit = plan_ownership_change("src/file.ts", "@new", Some(&current));
        assert_eq!(
            edit,
            OwnershipEdit::ReplaceLine {
                line: 3,
                text: "/src/file.ts @new".into()
            }
        );
    }

    #[test]
    fn glob_match_gets_an_override_appended() {
        let current = record_at("*.ts", &["@ts"], 1);
        let edit = plan_ownership_change("src/file.ts", "@new", Some(&current));
        assert_eq!(
            edit,
            OwnershipEdit::AppendLine {
                text: "/src/file.ts @new".into()
            }
        );
    }

    #[test]
    fn unowned_path_gets_a_rule_appended() {
        let edit = plan_ownership_change("docs/a.md", "@docs", None);
        assert_eq!(edit.text(), "/docs/a.md @docs");
        assert!(!edit.is_replace());
    }

    #[test]
    fn leading_slash_is_not_doubled() {
        let edit = plan_ownership_change("/docs/a.md", "@docs", None);
        assert_eq!(edit.text(), "/docs/a.md @docs");
    }

    #[test]
    fn replace_keeps_other_lines_and_endings() {
        let content = "* @default\r\n/src/file.ts @old\r\n*.md @docs\r\n";
        let edit = OwnershipEdit::ReplaceLine {
            line: 2,
            text: "/src/file.ts @new".into(),
        };
        assert_eq!(
            apply_edit(content, &edit),
            "* @default\r\n/src/file.ts @new\r\n*.md @docs\r\n"
        );
    }

    #[test]
    fn replace_last_line_without_newline() {
        let edit = OwnershipEdit::ReplaceLine {
            line: 2,
            text: "/b @new".into(),
        };
        assert_eq!(apply_edit("/a @x\n/b @old", &edit), "/a @x\n/b @new");
    }

    #[test]
    fn replace_out_of_range_appends() {
        let edit = OwnershipEdit::ReplaceLine {
            line: 10,
            text: "/b @new".into(),
        };
        assert_eq!(apply_edit("/a @x", &edit), "/a @x\n\n/b @new");
    }

    #[test]
    fn append_after_content_adds_blank_separator() {
        let edit = OwnershipEdit::AppendLine {
            text: "/b @new".into(),
        };
        assert_eq!(apply_edit("/a @x", &edit), "/a @x\n\n/b @new");
    }

    #[test]
    fn append_after_trailing_newline_adds_one_newline() {
        let edit = OwnershipEdit::AppendLine {
            text: "/b @new".into(),
        };
        assert_eq!(apply_edit("/a @x\n", &edit), "/a @x\n\n/b @new");
    }

    #[test]
    fn append_after_whitespace_only_line_inserts_directly() {
        let edit = OwnershipEdit::AppendLine {
            text: "/b @new".into(),
        };
        assert_eq!(apply_edit("/a @x\n  ", &edit), "/a @x\n  /b @new");
    }

    #[test]
    fn append_uses_crlf_when_file_does() {
        let edit = OwnershipEdit::AppendLine {
            text: "/b @new".into(),
        };
        assert_eq!(apply_edit("/a @x\r\n", &edit), "/a @x\r\n\r\n/b @new");
    }

    #[test]
    fn applied_override_becomes_the_winner() {
        let content = "* @default\n/src/ @dev\n";
        let ruleset = RuleSet::parse(content);
        let current = ruleset.resolve("src/lib.rs");
        let edit = plan_ownership_change("src/lib.rs", "@owner", current);

        let updated = RuleSet::parse(&apply_edit(content, &edit));
        let winner = updated.resolve("src/lib.rs").unwrap();
        assert_eq!(winner.pattern, "/src/lib.rs");
        assert_eq!(winner.owners, vec!["@owner"]);
        assert_eq!(winner.line(), 4);
    }

    #[test]
    fn applied_replacement_keeps_line_count() {
        let content = "* @default\n/src/lib.rs @old\n# end\n";
        let ruleset = RuleSet::parse(content);
        let edit = plan_ownership_change("src/lib.rs", "@new", ruleset.resolve("src/lib.rs"));
        let updated = apply_edit(content, &edit);

        assert_eq!(updated.lines().count(), content.lines().count());
        assert_eq!(line_at(&updated, 2), Some("/src/lib.rs @new"));
        assert_eq!(line_at(&updated, 3), Some("# end"));
    }

    #[test]
    fn line_at_bounds() {
        assert_eq!(line_at("a\r\nb", 1), Some("a"));
        assert_eq!(line_at("a\r\nb", 2), Some("b"));
        assert_eq!(line_at("a\r\nb", 3), None);
        assert_eq!(line_at("a", 0), None);
    }

    #[test]
    fn suggest_rule_uses_path_as_given() {
        assert_eq!(suggest_rule("src/a.rs", "@team"), "src/a.rs @team");
    }

    #[test]
    fn describe_each_outcome() {
        let exact = record_at("/src/a.rs", &["@old"], 2);
        let glob = record_at("*.rs", &["@old"], 1);

        let replace = plan_ownership_change("src/a.rs", "@new", Some(&exact));
        assert_eq!(
            describe_edit(&replace, "src/a.rs", "@new", Some(&exact)),
            "Updated ownership for /src/a.rs to @new"
        );

        let over = plan_ownership_change("src/a.rs", "@new", Some(&glob));
        assert_eq!(
            describe_edit(&over, "src/a.rs", "@new", Some(&glob)),
            "Added specific override for src/a.rs (was: *.rs)"
        );

        let added = plan_ownership_change("src/a.rs", "@new", None);
        assert_eq!(
            describe_edit(&added, "src/a.rs", "@new", None),
            "Added ownership for src/a.rs"
        );
    }

    #[test]
    fn display_names_the_action() {
        let edit = OwnershipEdit::ReplaceLine {
            line: 2,
            text: "/a @b".into(),
        };
        assert_eq!(edit.to_string(), "replace line 2: /a @b");
    }
}
