//! Repository file listing for the `ls` command.

use ignore::WalkBuilder;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace};

/// Configuration for file walking behavior.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Whether to include hidden files and directories (starting with `.`).
    pub include_hidden: bool,
    /// Whether to respect `.gitignore` rules.
    pub respect_gitignore: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            include_hidden: true,
            respect_gitignore: true,
        }
    }
}

impl WalkConfig {
    /// Creates a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to include hidden files.
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Sets whether to respect .gitignore rules.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }
}

/// Lists the files in a repository, sorted.
///
/// Returns paths relative to `repo_path` with forward slashes. The `.git`
/// directory is never entered. Walking stops early once `cancel` is set; the
/// caller decides what a partial listing means.
pub fn list_files(repo_path: &Path, config: &WalkConfig, cancel: &AtomicBool) -> Vec<String> {
    debug!(
        "Listing files in {:?} (hidden={}, gitignore={})",
        repo_path, config.include_hidden, config.respect_gitignore
    );

    let walker = WalkBuilder::new(repo_path)
        .hidden(!config.include_hidden)
        .ignore(false)
        .parents(false)
        .require_git(false)
        .git_ignore(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .follow_links(false)
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    let mut files = Vec::new();
    for entry in walker.filter_map(|e| e.ok()) {
        if cancel.load(Ordering::SeqCst) {
            debug!("File walk cancelled after {} entries", files.len());
            break;
        }

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        if let Ok(relative) = entry.path().strip_prefix(repo_path)
            && let Some(path_str) = relative.to_str()
        {
            files.push(path_str.replace('\\', "/"));
        }
    }

    files.sort();
    debug!("Found {} files", files.len());
    trace!("Files: {:?}", files);
    files
}
