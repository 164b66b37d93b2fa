//! Line and file-level parsers for CODEOWNERS files.
//!
//! This module combines the lexer components to turn the text of a
//! CODEOWNERS file into ordered ownership records.

use super::ast::OwnershipRecord;
use super::error::{ParseResult, ParseWarning};
use super::lexer::{is_blank_line, parse_comment_line, parse_pattern_only, parse_rule_tokens};
use super::span::Span;
use log::{debug, trace};

/// What a single line turned into.
enum ParsedLine {
    Skipped,
    Record(OwnershipRecord),
    Unowned(ParseWarning),
}

/// Parses a single line of a CODEOWNERS file.
fn parse_line(line_text: &str, line_num: usize, line_offset: usize) -> ParsedLine {
    if is_blank_line(line_text) || parse_comment_line(line_text).is_ok() {
        return ParsedLine::Skipped;
    }

    match parse_rule_tokens(line_text) {
        Ok((_remaining, tokens)) => {
            let pattern_span = Span::new(
                line_offset + tokens.pattern_offset,
                line_num,
                tokens.pattern_offset + 1,
                tokens.pattern.len(),
            );
            let rule_span = match (tokens.owners.last(), tokens.owner_offsets.last()) {
                (Some(owner), Some(&offset)) => pattern_span.extend(&Span::new(
                    line_offset + offset,
                    line_num,
                    offset + 1,
                    owner.len(),
                )),
                _ => pattern_span,
            };
            let owners = tokens.owners.iter().map(|o| o.to_string()).collect();
            ParsedLine::Record(OwnershipRecord::new(tokens.pattern, owners, rule_span))
        }
        Err(_) => match parse_pattern_only(line_text) {
            Ok((_, only)) => {
                let span = Span::new(
                    line_offset + only.pattern_offset,
                    line_num,
                    only.pattern_offset + 1,
                    only.pattern.len(),
                );
                ParsedLine::Unowned(ParseWarning::missing_owners(only.pattern, span))
            }
            Err(_) => ParsedLine::Skipped,
        },
    }
}

/// Parses CODEOWNERS text into ownership records.
///
/// Blank lines, comment lines and patterns without owners produce no record.
/// Line numbers count every line of `input`, so a record can be traced back to
/// its source line regardless of comments and blank lines before it. Both `\n`
/// and `\r\n` line endings are accepted.
pub fn parse_codeowners(input: &str) -> ParseResult {
    debug!("Parsing CODEOWNERS file ({} bytes)", input.len());
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut offset = 0;
    let mut remaining = input;

    for (line_idx, line_text) in input.lines().enumerate() {
        let line_num = line_idx + 1;

        match parse_line(line_text, line_num, offset) {
            ParsedLine::Record(record) => {
                trace!("Line {}: rule '{}'", line_num, record.pattern);
                records.push(record);
            }
            ParsedLine::Unowned(warning) => {
                debug!("{}", warning);
                warnings.push(warning);
            }
            ParsedLine::Skipped => {}
        }

        // Step over the line ending actually present in the input so offsets
        // stay correct for both LF and CRLF files.
        let after_content = &remaining[line_text.len()..];
        let line_with_ending_len = if after_content.starts_with("\r\n") {
            line_text.len() + 2
        } else if after_content.starts_with('\n') {
            line_text.len() + 1
        } else {
            line_text.len()
        };

        offset += line_with_ending_len;
        remaining = &remaining[line_with_ending_len..];
    }

    debug!(
        "Parsing complete: {} records, {} skipped pattern(s)",
        records.len(),
        warnings.len()
    );
    ParseResult::new(records, warnings)
}
