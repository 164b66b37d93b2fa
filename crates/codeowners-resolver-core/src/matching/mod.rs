//! Pattern matching for CODEOWNERS files.
//!
//! Patterns are evaluated against repository-relative paths using these rules,
//! checked in order:
//!
//! - `\` is treated as `/` in both pattern and path; a leading `./` on the
//!   pattern is dropped
//! - a trailing `/` means "everything beneath this directory" (the pattern
//!   gains a trailing `**`); the bare directory path is not matched
//! - a pattern without glob characters (`* ? [ ]`) is a literal path or
//!   directory prefix: `/src` matches `src` and `src/anything`, but never
//!   `src-other/...`
//! - a glob with a leading `/` is anchored to the repository root
//! - any other glob may match at any depth
//!
//! Inside globs `*` and `?` never cross `/`, `**` spans zero or more whole
//! segments, and dotfiles are matched like any other name.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::borrow::Cow;
use thiserror::Error;

/// Characters that turn a pattern into a glob.
const GLOB_CHARS: &[char] = &['*', '?', '[', ']'];

/// A pattern could not be compiled into a glob.
#[derive(Debug, Clone, Error)]
#[error("invalid pattern '{pattern}': {source}")]
pub struct PatternError {
    /// The pattern as written in the CODEOWNERS file.
    pub pattern: String,
    /// The underlying glob error.
    #[source]
    pub source: globset::Error,
}

/// Returns true if `text` contains any glob metacharacter.
pub fn has_glob_chars(text: &str) -> bool {
    text.contains(GLOB_CHARS)
}

/// Replaces Windows separators with `/`.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

/// Strips a single leading `/`.
fn strip_root(pattern: &str) -> &str {
    pattern.strip_prefix('/').unwrap_or(pattern)
}

#[derive(Debug, Clone)]
enum Matcher {
    /// Exact path or directory prefix, root-relative.
    Literal(String),
    /// Any of the compiled globs matches.
    Glob { set: GlobSet, anchored: bool },
}

/// A compiled CODEOWNERS pattern that can match file paths.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The original pattern string.
    original: String,
    /// Whether the pattern ended with `/`.
    directory: bool,
    matcher: Matcher,
}

impl CompiledPattern {
    /// Compiles a CODEOWNERS pattern for matching.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let normalized = pattern.replace('\\', "/");
        let mut normalized = match normalized.strip_prefix("./") {
            Some(stripped) => stripped.to_string(),
            None => normalized,
        };

        let directory = normalized.ends_with('/');
        if directory {
            normalized.push_str("**");
        }

        let matcher = if !has_glob_chars(&normalized) {
            Matcher::Literal(strip_root(&normalized).to_string())
        } else {
            let anchored = normalized.starts_with('/');
            let mut globs = vec![normalized.clone()];
            if !anchored {
                globs.push(format!("**/{}", normalized));
            }
            Matcher::Glob {
                set: build_glob_set(pattern, &globs)?,
                anchored,
            }
        };

        Ok(Self {
            original: pattern.to_string(),
            directory,
            matcher,
        })
    }

    /// Returns the original pattern string.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Returns true if this pattern is anchored to the repository root.
    pub fn is_anchored(&self) -> bool {
        match &self.matcher {
            Matcher::Literal(_) => true,
            Matcher::Glob { anchored, .. } => *anchored,
        }
    }

    /// Returns true if the pattern ends with `/`.
    pub fn is_directory(&self) -> bool {
        self.directory
    }

    /// Returns true if the pattern is a literal path rather than a glob.
    pub fn is_literal(&self) -> bool {
        matches!(self.matcher, Matcher::Literal(_))
    }

    /// Checks if this pattern matches the given repository-relative path.
    pub fn matches(&self, path: &str) -> bool {
        let normalized = normalize_path(path);
        let path: &str = &normalized;
        match &self.matcher {
            Matcher::Literal(literal) => {
                path == literal.as_str()
                    || path
                        .strip_prefix(literal.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            Matcher::Glob { set, anchored: true } => set.is_match(format!("/{}", path)),
            Matcher::Glob {
                set,
                anchored: false,
            } => set.is_match(path),
        }
    }
}

fn build_glob_set(pattern: &str, globs: &[String]) -> Result<GlobSet, PatternError> {
    let to_error = |source| PatternError {
        pattern: pattern.to_string(),
        source,
    };

    let mut builder = GlobSetBuilder::new();
    for glob in globs {
        // literal_separator keeps * and ? inside a single path segment
        let glob = GlobBuilder::new(glob)
            .literal_separator(true)
            .backslash_escape(false)
            .build()
            .map_err(to_error)?;
        builder.add(glob);
    }
    builder.build().map_err(to_error)
}

/// Checks whether `pattern` matches `path`.
///
/// A pattern that is not a valid glob matches nothing.
pub fn pattern_matches(pattern: &str, path: &str) -> bool {
    CompiledPattern::compile(pattern)
        .map(|compiled| compiled.matches(path))
        .unwrap_or(false)
}

/// Returns true if `pattern` names exactly `path` rather than a glob or a
/// directory containing it.
///
/// A leading `/` on the pattern is ignored.
pub fn is_exact_match(pattern: &str, path: &str) -> bool {
    !has_glob_chars(pattern) && strip_root(pattern) == path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_paths() {
        assert!(pattern_matches("/src/config.ts", "src/config.ts"));
        assert!(!pattern_matches("/src/config.ts", "src/other.ts"));
        assert!(!pattern_matches("/src/config.ts", "src/config"));
        assert!(pattern_matches("/README.md", "README.md"));
        assert!(!pattern_matches("/README.md", "docs/README.md"));
    }

    #[test]
    fn directory_with_trailing_slash() {
        assert!(pattern_matches("/src/", "src/file.ts"));
        assert!(pattern_matches("/src/", "src/nested/file.ts"));
        assert!(pattern_matches("/src/", "src/deeply/nested/file.ts"));
        assert!(!pattern_matches("/src/", "other/file.ts"));
        assert!(!pattern_matches("/docs/", "src/docs/README.md"));
    }

    #[test]
    fn directory_pattern_matches_contents_only() {
        assert!(!pattern_matches("/src/", "src"));
        assert!(!pattern_matches(".github/", ".github"));
        assert!(!pattern_matches("/src/", "srcs"));
        assert!(pattern_matches("/src/", "src/a"));
        // Without the slash the literal still covers the directory path.
        assert!(pattern_matches("/src", "src"));
    }

    #[test]
    fn directory_prefix_equivalence() {
        assert!(pattern_matches("/src/", "src/x/y.ts"));
        assert!(pattern_matches("/src", "src/x/y.ts"));
        assert!(!pattern_matches("/src/", "other/src/y.ts"));
    }

    #[test]
    fn literal_prefix_respects_segment_boundary() {
        assert!(pattern_matches("/scripts", "scripts/build.sh"));
        assert!(pattern_matches("/scripts", "scripts"));
        assert!(!pattern_matches("/scripts", "scripts-other/build.sh"));
        assert!(!pattern_matches("/scripts", "tools/scripts"));
    }

    #[test]
    fn literal_without_leading_slash_is_root_relative() {
        assert!(pattern_matches("docs", "docs/index.md"));
        assert!(!pattern_matches("docs", "site/docs/index.md"));
    }

    #[test]
    fn bare_star_matches_everything() {
        assert!(pattern_matches("*", "any-file.ts"));
        assert!(pattern_matches("*", "README.md"));
        assert!(pattern_matches("*", "nested/file.ts"));
        assert!(pattern_matches("*", "a/b/c/d.txt"));
        assert!(pattern_matches("*", ".gitignore"));
        assert!(pattern_matches("*", ".env"));
    }

    #[test]
    fn extension_patterns_match_at_any_depth() {
        assert!(pattern_matches("*.md", "README.md"));
        assert!(pattern_matches("*.md", "docs/guide.md"));
        assert!(pattern_matches("*.test.ts", "deep/nested/file.test.ts"));
        assert!(pattern_matches("*.config.js", "webpack.config.js"));
        assert!(!pattern_matches("*.md", "README.txt"));
        assert!(!pattern_matches("*.ts", "file.js"));
    }

    #[test]
    fn double_star_crosses_zero_or_more_segments() {
        assert!(pattern_matches("/src/**/*.ts", "src/file.ts"));
        assert!(pattern_matches("/src/**/*.ts", "src/nested/file.ts"));
        assert!(pattern_matches("/src/**/*.ts", "src/deeply/nested/file.ts"));
        assert!(!pattern_matches("/src/**/*.ts", "docs/file.ts"));
        assert!(!pattern_matches("/src/**/*.ts", "file.ts"));
        assert!(pattern_matches("/src/**", "src/file.ts"));
        assert!(pattern_matches("/src/**", "src/nested/file.ts"));
    }

    #[test]
    fn nested_double_star_segments() {
        let pattern = "/src/**/internal/**/*.ts";
        assert!(pattern_matches(pattern, "src/api/internal/utils.ts"));
        assert!(pattern_matches(
            pattern,
            "src/frontend/components/internal/deep/file.ts"
        ));
        assert!(!pattern_matches(pattern, "src/api/public/utils.ts"));
    }

    #[test]
    fn anchored_glob_does_not_match_deeper() {
        assert!(pattern_matches("/*.rs", "main.rs"));
        assert!(!pattern_matches("/*.rs", "src/main.rs"));
        assert!(pattern_matches("/docs/*.md", "docs/README.md"));
        assert!(!pattern_matches("/docs/*.md", "docs/api/index.md"));
        assert!(!pattern_matches("/docs/*.md", "other/docs/README.md"));
    }

    #[test]
    fn unanchored_glob_with_slash_matches_at_any_depth() {
        assert!(pattern_matches("docs/*.md", "docs/README.md"));
        assert!(pattern_matches("docs/*.md", "site/docs/README.md"));
        assert!(pattern_matches("src/", "src/file.ts"));
        assert!(pattern_matches("src/api/", "src/api/endpoint.ts"));
    }

    #[test]
    fn dot_directories_and_files() {
        assert!(pattern_matches(".github/", ".github/workflows/ci.yml"));
        assert!(pattern_matches(".vscode/", ".vscode/settings.json"));
        assert!(pattern_matches(".*.yml", ".eslintrc.yml"));
        assert!(pattern_matches("/**/*.json", ".vscode/settings.json"));
    }

    #[test]
    fn question_mark_and_classes() {
        assert!(pattern_matches("/file?.txt", "file1.txt"));
        assert!(!pattern_matches("/file?.txt", "file10.txt"));
        assert!(!pattern_matches("/a?b", "a/b"));
        assert!(pattern_matches("/v[0-9].md", "v2.md"));
        assert!(!pattern_matches("/v[0-9].md", "vx.md"));
    }

    #[test]
    fn star_does_not_cross_separator() {
        assert!(!pattern_matches("/src/*.ts", "src/nested/file.ts"));
    }

    #[test]
    fn backslashes_are_separators() {
        assert!(pattern_matches("/src/", "src\\file.ts"));
        assert!(pattern_matches("\\src\\", "src/file.ts"));
        assert!(pattern_matches("/src", "src\\nested\\file.ts"));
    }

    #[test]
    fn dot_slash_prefix_is_stripped() {
        assert!(pattern_matches("./docs/", "docs/guide.md"));
        assert!(pattern_matches("./Makefile", "Makefile"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!pattern_matches("/README.md", "readme.md"));
        assert!(!pattern_matches("*.MD", "guide.md"));
    }

    #[test]
    fn invalid_glob_matches_nothing() {
        assert!(CompiledPattern::compile("/src/[abc").is_err());
        assert!(!pattern_matches("/src/[abc", "src/[abc"));
        assert!(!pattern_matches("/src/[abc", "src/a"));
    }

    #[test]
    fn pattern_error_names_pattern() {
        let err = CompiledPattern::compile("[oops").unwrap_err();
        assert_eq!(err.pattern, "[oops");
        assert!(err.to_string().contains("[oops"));
    }

    #[test]
    fn compiled_pattern_flags() {
        let literal = CompiledPattern::compile("/src/main.rs").unwrap();
        assert!(literal.is_literal());
        assert!(literal.is_anchored());
        assert!(!literal.is_directory());

        let dir = CompiledPattern::compile("docs/").unwrap();
        assert!(!dir.is_literal());
        assert!(!dir.is_anchored());
        assert!(dir.is_directory());
        assert_eq!(dir.as_str(), "docs/");
    }

    #[test]
    fn more_specific_patterns_all_match() {
        let path = "src/api/auth/login.ts";
        for pattern in ["*", "/src/", "/src/api/", "/src/api/auth/"] {
            assert!(pattern_matches(pattern, path), "{pattern} should match");
        }
    }

    #[test]
    fn exact_match_classification() {
        assert!(is_exact_match("/src/config.ts", "src/config.ts"));
        assert!(is_exact_match("src/config.ts", "src/config.ts"));
        assert!(!is_exact_match("*.ts", "src/config.ts"));
        assert!(!is_exact_match("/src/*.ts", "src/config.ts"));
        assert!(!is_exact_match("/src/config?.ts", "src/config1.ts"));
        assert!(!is_exact_match("/src/[ab].ts", "src/a.ts"));
        assert!(!is_exact_match("/src/", "src/config.ts"));
        assert!(!is_exact_match("/src/config.ts", "src/other.ts"));
        assert!(!is_exact_match("/src/Config.ts", "src/config.ts"));
    }

    #[test]
    fn has_glob_chars_detects_metacharacters() {
        assert!(has_glob_chars("*.rs"));
        assert!(has_glob_chars("file?.txt"));
        assert!(has_glob_chars("[ab]"));
        assert!(has_glob_chars("a]"));
        assert!(!has_glob_chars("/src/main.rs"));
    }
}
