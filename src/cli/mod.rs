//! CLI argument parsing for promptforge.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::document::Category;
use crate::scaffold::Preset;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Promptforge: minimal file-based workbench for structured prompt files.
///
/// Prompts are expressed as `*.prompt.json` documents in your repository:
/// - A structured body (persona, instructions, examples, output format)
/// - A user input template with `{{variable}}` placeholders
/// - A stamped variable schema snapshot for breaking-change tracking
#[derive(Parser, Debug)]
#[command(name = "promptforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for promptforge.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new prompt file from a starter template.
    ///
    /// Writes `<slug>.prompt.json` with a category-specific persona and
    /// instruction set, ready to compile.
    New(NewArgs),

    /// Show a summary of a prompt file.
    ///
    /// Displays title, metadata, structure sections, and schema stamp.
    Show(ShowArgs),

    /// List the variables a prompt expects.
    ///
    /// Prints the canonical variable set: declared variables merged with
    /// variables auto-detected from the input template.
    Vars(VarsArgs),

    /// Compile a prompt into a provider-agnostic message list.
    ///
    /// Substitutes bindings from --set pairs and/or a named test case and
    /// prints the compiled prompt as JSON.
    Compile(CompileArgs),

    /// Validate a prompt's variable schema.
    ///
    /// Without --against, checks the document against its stamped schema.
    /// With --against, diffs another document's schema into this one and
    /// classifies every change by breaking-severity. Exits 2 when invalid;
    /// never modifies any file.
    Validate(ValidateArgs),

    /// Stamp a prompt with a fresh schema snapshot.
    ///
    /// Replaces `schema_version` and `variable_schema` wholesale, recording
    /// breaking changes against the previous snapshot. Saves atomically.
    Stamp(StampArgs),

    /// Validate every prompt file under a directory.
    ///
    /// Walks the tree for files matching the glob, validates each against
    /// its stamped schema, and summarizes. Exits 2 on any failure.
    Check(CheckArgs),

    /// Render an evaluation session as a markdown report.
    ///
    /// Reads the session JSON produced by a model-invocation run and
    /// formats one section per model result.
    Report(ReportArgs),
}

/// Arguments for the `new` command.
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Title for the new prompt.
    pub title: String,

    /// Description of what the prompt accomplishes.
    #[arg(short, long)]
    pub description: Option<String>,

    /// Prompt category; tunes the starter persona and instructions.
    #[arg(long, value_enum, default_value = "other")]
    pub category: Category,

    /// Structure preset to start from.
    #[arg(long, value_enum, default_value = "basic")]
    pub preset: Preset,

    /// Directory to create the prompt file in.
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Path to the prompt file.
    pub file: PathBuf,
}

/// Arguments for the `vars` command.
#[derive(Parser, Debug)]
pub struct VarsArgs {
    /// Path to the prompt file.
    pub file: PathBuf,
}

/// Arguments for the `compile` command.
#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Path to the prompt file.
    pub file: PathBuf,

    /// Variable bindings as NAME=VALUE pairs.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Take bindings from a named test case in the document.
    #[arg(long)]
    pub test_case: Option<String>,

    /// Write the compiled JSON to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the prompt file.
    pub file: PathBuf,

    /// Older version of the prompt to diff against.
    #[arg(long)]
    pub against: Option<PathBuf>,
}

/// Arguments for the `stamp` command.
#[derive(Parser, Debug)]
pub struct StampArgs {
    /// Path to the prompt file.
    pub file: PathBuf,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Directory to search for prompt files.
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Glob pattern selecting prompt files.
    #[arg(long, default_value = "**/*.prompt.json")]
    pub glob: String,
}

/// Arguments for the `report` command.
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Path to the evaluation session JSON.
    pub session: PathBuf,

    /// Write the markdown report to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
