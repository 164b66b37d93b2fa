//! Configuration handling for the CLI.
//!
//! This module turns CLI arguments into resolved paths, locates the CODEOWNERS
//! file and loads optional team metadata.

use crate::cli::Args;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// No CODEOWNERS file at any candidate location.
    #[error("CODEOWNERS file not found in repository '{repo}'. Searched in: {searched}")]
    CodeownersNotFound { repo: String, searched: String },

    /// Failed to read the CODEOWNERS file.
    #[error("failed to read CODEOWNERS file '{path}': {source}")]
    ReadCodeowners {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the CODEOWNERS file.
    #[error("failed to update CODEOWNERS file '{path}': {source}")]
    WriteCodeowners {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The team metadata file is unreadable or malformed.
    #[error("invalid team configuration '{path}': {reason}")]
    TeamsConfig { path: String, reason: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed successfully.
    Success = 0,
    /// Application startup failed (wrong configuration or internal error).
    StartupFailure = 1,
    /// Application terminated by signal (SIGINT/SIGTERM).
    Terminated = 2,
    /// A queried path has no owner (with `--fail-on-unowned`).
    QueryFailed = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Optional metadata for an owner token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    /// Friendly name shown instead of the raw token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Slack channel for the team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Team metadata keyed by owner token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TeamDirectory {
    teams: BTreeMap<String, TeamInfo>,
}

impl TeamDirectory {
    /// Loads a directory from a JSON file of the form
    /// `{ "@org/team": { "displayName": "...", "slack": "#chan" } }`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::TeamsConfig {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content).map_err(|e| ConfigError::TeamsConfig {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Parses a directory from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the metadata for `owner`, if configured.
    pub fn get(&self, owner: &str) -> Option<&TeamInfo> {
        self.teams.get(owner)
    }

    /// Returns the number of configured teams.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Returns true if no teams are configured.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Validated and processed configuration for running a command.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Canonical path to the repository root.
    pub repo_path: PathBuf,
    /// Path to the CODEOWNERS file.
    pub codeowners_path: PathBuf,
    /// Team metadata (empty when not configured).
    pub teams: TeamDirectory,
    /// Whether to output JSON.
    pub json_output: bool,
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let repo_path = args.repository_path.canonicalize().map_err(|e| {
            ConfigError::Invalid(format!(
                "repository path '{}' is invalid: {}",
                args.repository_path.display(),
                e
            ))
        })?;

        let codeowners_path = find_codeowners_file(&repo_path, &args.codeowners_path)?;

        let teams = match &args.teams_config {
            Some(path) => TeamDirectory::load(&repo_path.join(path))?,
            None => TeamDirectory::default(),
        };

        Ok(Self {
            repo_path,
            codeowners_path,
            teams,
            json_output: args.json,
        })
    }

    /// Reads the CODEOWNERS file.
    pub fn read_codeowners(&self) -> Result<String, ConfigError> {
        fs::read_to_string(&self.codeowners_path).map_err(|source| ConfigError::ReadCodeowners {
            path: self.codeowners_path.display().to_string(),
            source,
        })
    }

    /// Overwrites the CODEOWNERS file.
    pub fn write_codeowners(&self, content: &str) -> Result<(), ConfigError> {
        fs::write(&self.codeowners_path, content).map_err(|source| ConfigError::WriteCodeowners {
            path: self.codeowners_path.display().to_string(),
            source,
        })
    }

    /// Converts a user-supplied path into the repository-relative,
    /// `/`-separated form used for matching.
    pub fn relative_path(&self, path: &Path) -> String {
        relative_path(&self.repo_path, path)
    }
}

/// Finds the CODEOWNERS file in the repository.
///
/// Candidates are tried in order; the first that is a regular file wins.
pub fn find_codeowners_file(
    repo_path: &Path,
    candidates: &[PathBuf],
) -> Result<PathBuf, ConfigError> {
    candidates
        .iter()
        .map(|candidate| repo_path.join(candidate))
        .find(|path| path.is_file())
        .ok_or_else(|| ConfigError::CodeownersNotFound {
            repo: repo_path.display().to_string(),
            searched: candidates
                .iter()
                .map(|c| c.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Makes `path` relative to `repo_path` and normalizes separators.
///
/// Absolute paths outside the repository are returned unchanged apart from
/// separator normalization.
pub fn relative_path(repo_path: &Path, path: &Path) -> String {
    let relative = if path.is_absolute() {
        match path.strip_prefix(repo_path) {
            Ok(relative) => relative.to_path_buf(),
            // The repository root is canonical; the argument may not be.
            Err(_) => path
                .canonicalize()
                .ok()
                .and_then(|canonical| canonical.strip_prefix(repo_path).ok().map(Path::to_path_buf))
                .unwrap_or_else(|| path.to_path_buf()),
        }
    } else {
        path.to_path_buf()
    };

    let normalized = relative.to_string_lossy().replace('\\', "/");
    match normalized.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => normalized,
    }
}
