//! Parser module for CODEOWNERS files.
//!
//! Turns CODEOWNERS text into ordered [`OwnershipRecord`]s that carry the
//! line they were read from.
//!
//! # Example
//!
//! ```rust
//! use codeowners_resolver_core::parse::parse_codeowners;
//!
//! let input = r#"
//! # CODEOWNERS file
//! *.rs @rustacean
//! /docs/ @docs-team
//! "#;
//!
//! let result = parse_codeowners(input);
//! for record in &result.records {
//!     println!("line {}: {}", record.line(), record);
//! }
//! ```

mod ast;
mod error;
mod lexer;
mod parser;
pub mod span;

// Re-export public types
pub use ast::OwnershipRecord;
pub use error::{ParseResult, ParseWarning};
pub use parser::parse_codeowners;
pub use span::Span;

// Re-export lexer utilities that may be useful for reporting
pub use lexer::{OwnerKind, classify_owner};
