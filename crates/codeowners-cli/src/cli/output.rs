//! Output formatting for the CLI.
//!
//! This module provides human-readable and JSON output formatters for
//! ownership queries, team listings and edits.

use crate::cli::config::{TeamDirectory, TeamInfo};
use codeowners_resolver_core::{OwnershipEdit, OwnershipRecord, classify_owner};
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// The rule that owns a path, in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonRule {
    /// Pattern as written in the CODEOWNERS file.
    pub pattern: String,
    /// Owner tokens in file order.
    pub owners: Vec<String>,
    /// 1-based line number of the rule.
    pub line: usize,
}

impl From<&OwnershipRecord> for JsonRule {
    fn from(record: &OwnershipRecord) -> Self {
        Self {
            pattern: record.pattern.clone(),
            owners: record.owners.clone(),
            line: record.line(),
        }
    }
}

/// Ownership of one path, in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonOwnership {
    /// Repository-relative path.
    pub path: String,
    /// The winning rule, or `null` when the path is unowned.
    pub rule: Option<JsonRule>,
}

impl JsonOwnership {
    /// Creates an entry from a resolution result.
    pub fn new(path: impl Into<String>, record: Option<&OwnershipRecord>) -> Self {
        Self {
            path: path.into(),
            rule: record.map(JsonRule::from),
        }
    }
}

/// One owner token with its rule count, in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonTeam {
    /// Owner token.
    pub team: String,
    /// Owner kind: "user", "team", "email" or "unknown".
    pub kind: &'static str,
    /// How many rule slots name this owner.
    pub patterns: usize,
    /// Configured metadata, flattened into the entry.
    #[serde(flatten)]
    pub info: TeamInfo,
}

/// A planned or applied edit, in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonEdit {
    /// Repository-relative path whose ownership changes.
    pub path: String,
    /// The new owner.
    pub owner: String,
    /// `"replace"` or `"append"`.
    pub action: &'static str,
    /// Line being replaced, for replacements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// The rule line written.
    pub text: String,
    /// Whether the file was written.
    pub applied: bool,
    /// Summary of the change.
    pub message: String,
}

impl JsonEdit {
    /// Creates an entry from an edit.
    pub fn new(
        path: impl Into<String>,
        owner: impl Into<String>,
        edit: &OwnershipEdit,
        applied: bool,
        message: impl Into<String>,
    ) -> Self {
        let (action, line) = match edit {
            OwnershipEdit::ReplaceLine { line, .. } => ("replace", Some(*line)),
            OwnershipEdit::AppendLine { .. } => ("append", None),
        };
        Self {
            path: path.into(),
            owner: owner.into(),
            action,
            line,
            text: edit.text().to_string(),
            applied,
            message: message.into(),
        }
    }
}

/// A suggested rule, in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonSuggestion {
    /// Repository-relative path.
    pub path: String,
    /// Rule currently owning the path.
    pub current: Option<JsonRule>,
    /// Suggested rule line.
    pub suggestion: String,
}

/// Builds the team listing shared by both output formats.
pub fn team_entries(stats: &BTreeMap<String, usize>, directory: &TeamDirectory) -> Vec<JsonTeam> {
    stats
        .iter()
        .map(|(team, &patterns)| JsonTeam {
            team: team.clone(),
            kind: classify_owner(team).label(),
            patterns,
            info: directory.get(team).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Writes any serializable value as pretty JSON.
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    writeln!(writer, "{}", json)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// Output formatter for human-readable console output.
pub struct HumanOutput<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> HumanOutput<W> {
    /// Creates a new human output formatter.
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Writes a section header.
    pub fn write_header(&mut self, title: &str) -> std::io::Result<()> {
        let header = format!("==> {}", title);
        if self.use_colors {
            writeln!(self.writer, "{}", header.cyan().bold())
        } else {
            writeln!(self.writer, "{}", header)
        }
    }

    /// Writes the owners of `path`, with the rule that decided them.
    pub fn write_ownership(
        &mut self,
        path: &str,
        record: Option<&OwnershipRecord>,
    ) -> std::io::Result<()> {
        match record {
            Some(record) => {
                let owners = record.owners_display();
                let rule = format!("{} (line {})", record.pattern, record.line());
                if self.use_colors {
                    writeln!(
                        self.writer,
                        "{}: {} {}",
                        path.bold(),
                        owners.green(),
                        format!("[{}]", rule).dimmed()
                    )
                } else {
                    writeln!(self.writer, "{}: {} [{}]", path, owners, rule)
                }
            }
            None => {
                if self.use_colors {
                    writeln!(self.writer, "{}: {}", path.bold(), "unowned".yellow())
                } else {
                    writeln!(self.writer, "{}: unowned", path)
                }
            }
        }
    }

    /// Writes the team listing followed by a total.
    pub fn write_teams(&mut self, teams: &[JsonTeam]) -> std::io::Result<()> {
        if teams.is_empty() {
            return writeln!(self.writer, "No teams found in CODEOWNERS.");
        }

        self.write_header("Teams in CODEOWNERS")?;
        for entry in teams {
            let name = entry.info.display_name.as_deref().unwrap_or(&entry.team);
            let slack = entry
                .info
                .slack
                .as_deref()
                .map(|s| format!(" ({})", s))
                .unwrap_or_default();
            let count = plural(entry.patterns, "pattern");
            if self.use_colors {
                writeln!(
                    self.writer,
                    "  {}{}: {} {}",
                    name.bold(),
                    slack,
                    count,
                    format!("[{}]", entry.kind).dimmed()
                )?;
            } else {
                writeln!(self.writer, "  {}{}: {} [{}]", name, slack, count, entry.kind)?;
            }
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "Total: {}", plural(teams.len(), "team"))
    }

    /// Writes the preview of an edit before it is applied.
    pub fn write_edit_preview(
        &mut self,
        edit: &OwnershipEdit,
        old_line: Option<&str>,
        current: Option<&OwnershipRecord>,
    ) -> std::io::Result<()> {
        match edit {
            OwnershipEdit::ReplaceLine { line, text } => {
                self.write_header(&format!("Update existing rule (line {})", line))?;
                let old = old_line.unwrap_or_default();
                if self.use_colors {
                    writeln!(self.writer, "  Old: {}", old.red())?;
                    writeln!(self.writer, "  New: {}", text.green())
                } else {
                    writeln!(self.writer, "  Old: {}", old)?;
                    writeln!(self.writer, "  New: {}", text)
                }
            }
            OwnershipEdit::AppendLine { text } => {
                let action = match current {
                    Some(record) => format!("Override glob pattern ({})", record.pattern),
                    None => "Add new ownership rule".to_string(),
                };
                self.write_header(&action)?;
                if self.use_colors {
                    writeln!(self.writer, "  Add to CODEOWNERS: {}", text.green())
                } else {
                    writeln!(self.writer, "  Add to CODEOWNERS: {}", text)
                }
            }
        }
    }

    /// Writes a suggested rule for the user to add by hand.
    pub fn write_suggestion(
        &mut self,
        current: Option<&OwnershipRecord>,
        suggestion: &str,
    ) -> std::io::Result<()> {
        match current {
            Some(record) => writeln!(self.writer, "Current: {}", record.owners_display())?,
            None => writeln!(self.writer, "Currently unowned")?,
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "Suggested rule to add to CODEOWNERS:")?;
        if self.use_colors {
            writeln!(self.writer, "  {}", suggestion.green().bold())?;
        } else {
            writeln!(self.writer, "  {}", suggestion)?;
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "(Add this at the end of CODEOWNERS for highest precedence)"
        )
    }

    /// Writes a summary of a file listing.
    pub fn write_listing_summary(&mut self, total: usize, unowned: usize) -> std::io::Result<()> {
        writeln!(self.writer)?;
        let message = format!("{} scanned, {} unowned", plural(total, "file"), unowned);
        if !self.use_colors {
            return writeln!(self.writer, "{}", message);
        }
        if unowned == 0 {
            writeln!(self.writer, "{}", message.green().bold())
        } else {
            writeln!(self.writer, "{}", message.yellow().bold())
        }
    }

    /// Writes a success message.
    pub fn write_success(&mut self, message: &str) -> std::io::Result<()> {
        let message = format!("✓ {}", message);
        if self.use_colors {
            writeln!(self.writer, "{}", message.green().bold())
        } else {
            writeln!(self.writer, "{}", message)
        }
    }

    /// Writes a startup error.
    pub fn write_error(&mut self, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "{} {}", "Error:".red().bold(), message)
        } else {
            writeln!(self.writer, "Error: {}", message)
        }
    }
}
