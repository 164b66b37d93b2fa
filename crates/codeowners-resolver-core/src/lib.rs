//! CODEOWNERS Resolver Core
//!
//! A library for answering "who owns this file?" from a CODEOWNERS file.
//!
//! # Features
//!
//! - **Parser**: Turn CODEOWNERS text into ordered ownership records, each
//!   remembering the line it came from
//! - **Matching**: GitHub-style patterns (literal paths, directories, `*`,
//!   `?`, `**`) with root anchoring
//! - **Resolution**: Last matching rule wins
//! - **Store**: An owned rule set with a TTL result cache and atomic reload
//! - **Edits**: Plan and apply "make this team own this file" changes
//!
//! # Quick Start
//!
//! ```rust
//! use codeowners_resolver_core::{RuleSetStore, load};
//!
//! let input = r#"
//! # CODEOWNERS file
//! *       @default
//! /src/   @eng
//! *.md    @docs
//! "#;
//!
//! let ruleset = load(input);
//! let winner = ruleset.resolve("src/README.md").unwrap();
//! assert_eq!(winner.owners, vec!["@docs"]);
//! assert_eq!(winner.line(), 5);
//!
//! // The store caches results and can be reloaded when the file changes.
//! let mut store = RuleSetStore::new(ruleset);
//! assert_eq!(store.resolve("src/lib.rs").unwrap().pattern, "/src/");
//! store.reload("* @someone-else\n");
//! assert_eq!(store.resolve("src/lib.rs").unwrap().owners, vec!["@someone-else"]);
//! ```
//!
//! # Modules
//!
//! - [`parse`]: Parser for CODEOWNERS files
//! - [`matching`]: Pattern matching for CODEOWNERS files
//! - [`ruleset`]: Rule sets and last-match-wins resolution
//! - [`store`]: Cached, reloadable rule set
//! - [`edit`]: Ownership change planning and application
//! - [`service`]: The host-facing ownership interface

pub mod clock;
pub mod edit;
#[cfg(feature = "generate")]
pub mod generate;
pub mod matching;
pub mod parse;
pub mod ruleset;
pub mod service;
pub mod store;

// Re-export commonly used types at the crate root
pub use clock::{Clock, ManualClock, SystemClock};
pub use edit::{OwnershipEdit, apply_edit, describe_edit, plan_ownership_change, suggest_rule};
pub use matching::{PatternError, is_exact_match, pattern_matches};
pub use parse::{
    OwnerKind, OwnershipRecord, ParseResult, ParseWarning, classify_owner, parse_codeowners,
};
pub use ruleset::{RuleSet, extract_all_teams, load, resolve, team_stats};
pub use service::OwnershipService;
pub use store::{RuleSetStore, StoreConfig};
