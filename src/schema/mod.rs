//! Variable schema engine for prompt documents.
//!
//! This module tracks the variable contract of a prompt across versions:
//!
//! - **Extraction**: builds the canonical variable set of a document by
//!   merging author-declared variables with variables inferred from the
//!   user input template
//! - **Diffing**: compares two variable sets and classifies every
//!   difference by breaking-severity
//! - **Scoring**: collapses a change list into a 0-100 compatibility score
//! - **Stamping**: snapshots the canonical set (with version token and
//!   content checksum) onto the document for later comparison
//!
//! Schema incompatibility is never an error here. Every function returns
//! data; callers decide whether to block a save, warn, or proceed.

mod diff;
mod extract;
mod snapshot;
mod types;


pub use diff::{calculate_compatibility_score, detect_breaking_changes};
pub use extract::{checksum, extract_variables};
pub use snapshot::{
    generate_schema_version, update_prompt_schema, validate_prompt_against_schema,
    validate_schema_change,
};
pub use types::{
    BreakingChange, BreakingChangeKind, Impact, SchemaValidationResult, VariableSchema,
};
