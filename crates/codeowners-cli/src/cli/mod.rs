//! CLI module for the CODEOWNERS resolver.
//!
//! This module provides command-line argument parsing using Clap with
//! environment variable support.

pub mod config;
pub mod output;
pub mod walk;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Locations searched for the CODEOWNERS file, relative to the repository
/// root. The first one that is a regular file is used.
pub const DEFAULT_CODEOWNERS_LOCATIONS: &[&str] = &[
    "CODEOWNERS",
    ".github/CODEOWNERS",
    "docs/CODEOWNERS",
    ".gitlab/CODEOWNERS",
];

/// CODEOWNERS resolver - answers "who owns this file?".
///
/// Reads the repository's CODEOWNERS file and resolves ownership using
/// last-match-wins semantics. Supports both human-readable and JSON output.
#[derive(Parser, Debug)]
#[command(name = "codeowners")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the repository root.
    #[arg(long, env = "REPOSITORY_PATH", default_value = ".", global = true)]
    pub repository_path: PathBuf,

    /// Comma-separated candidate locations of the CODEOWNERS file, relative
    /// to the repository root. The first existing file wins.
    #[arg(
        long,
        env = "CODEOWNERS_PATH",
        value_delimiter = ',',
        default_values = DEFAULT_CODEOWNERS_LOCATIONS,
        global = true
    )]
    pub codeowners_path: Vec<PathBuf>,

    /// JSON file with team metadata (display name, Slack channel, description).
    #[arg(long, env = "CODEOWNERS_TEAMS_CONFIG", global = true)]
    pub teams_config: Option<PathBuf>,

    /// Output results as JSON instead of human-readable format.
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the owners of one or more paths.
    Who {
        /// Paths to resolve (repository-relative or absolute).
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Exit with code 3 if any path has no owner.
        #[arg(long)]
        fail_on_unowned: bool,
    },

    /// List every owner named in the CODEOWNERS file.
    Teams,

    /// Walk the repository and show the owners of every file.
    Ls {
        /// Only list files without an owner.
        #[arg(long)]
        unowned: bool,
    },

    /// Make OWNER the owner of PATH by editing the CODEOWNERS file.
    Assign {
        /// Path whose ownership changes.
        path: PathBuf,

        /// New owner token (e.g. @org/team).
        owner: String,

        /// Show the change without writing it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print a rule line that would give PATH to OWNER.
    Suggest {
        /// Path to suggest a rule for.
        path: PathBuf,

        /// Owner token to suggest.
        owner: String,
    },
}

impl Command {
    /// Returns true if the command changes the CODEOWNERS file.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Assign { dry_run: false, .. })
    }
}
