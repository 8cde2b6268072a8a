//! Promptforge: minimal file-based workbench for structured prompt files.
//!
//! Prompts live as `*.prompt.json` documents. The core modules are pure
//! transforms over parsed documents: `template` extracts and substitutes
//! `{{variable}}` placeholders, `schema` tracks the variable contract
//! across versions, and `compiler` turns a document plus bindings into a
//! provider-agnostic message list. The `eval` module drives an external
//! model-invocation collaborator and renders session reports. All file I/O
//! lives in the CLI command layer.

pub mod cli;
pub mod commands;
pub mod compiler;
pub mod document;
pub mod error;
pub mod eval;
pub mod exit_codes;
pub mod fs;
pub mod scaffold;
pub mod schema;
pub mod template;

pub use compiler::CompiledPrompt;
pub use document::PromptDocument;
pub use error::{ForgeError, Result};
pub use schema::{SchemaValidationResult, VariableSchema};
