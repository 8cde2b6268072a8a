//! Prompt document model for promptforge.
//!
//! A prompt document is the unit of persistence: a JSON file (conventionally
//! `*.prompt.json`) describing a structured prompt: persona, instructions,
//! user input template, declared variables, few-shot examples, and the most
//! recently stamped variable schema snapshot.
//!
//! The implementation supports:
//!
//! - Round-trip preservation of unknown JSON fields (forward compatibility)
//! - Structural validation before any compilation or schema diffing
//! - Lookup helpers for named test cases
//!
//! Documents are owned by the file layer. Every operation elsewhere in this
//! crate is a pure transform on a document snapshot; nothing retains a
//! document between calls.

use crate::schema::VariableSchema;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

mod io;
#[cfg(test)]
mod tests;

/// A structured prompt document.
///
/// Field names mirror the on-disk JSON keys; files authored by earlier
/// versions of the format must keep parsing unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDocument {
    /// Optional JSON Schema URL carried through for editor tooling.
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema_url: Option<String>,

    /// Document title (required, non-empty).
    pub title: String,

    /// Human description of what the prompt accomplishes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The structured prompt body.
    pub prompt: PromptStructure,

    /// Template for the final user turn; may contain `{{name}}` placeholders.
    pub user_input_template: String,

    /// Author-declared variable metadata. Template variables not declared
    /// here are auto-inferred during schema extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<VariableDefinition>>,

    /// Named binding sets for compiling and evaluating the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_cases: Option<Vec<TestCase>>,

    /// Model identifiers this prompt targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,

    /// Authoring metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PromptMetadata>,

    /// Version token of the most recently stamped schema snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,

    /// Most recently stamped schema snapshot. Replaced wholesale on stamp,
    /// never merged field-by-field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_schema: Option<VariableSchema>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The structured body of a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptStructure {
    /// Who the model should be.
    pub persona: Persona,

    /// Ordered instruction list, rendered as a numbered block.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,

    /// Ordered reasoning steps, rendered as a numbered "Thinking Process" block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_of_thought: Option<Vec<String>>,

    /// Demonstration input/output pairs injected before the real user turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub few_shot_examples: Option<Vec<FewShotExample>>,

    /// Output format requirements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,

    /// Hard constraints, rendered as a bulleted block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,
}

/// Persona section of a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Role statement (e.g., "You are a senior software engineer...").
    pub role: String,

    /// Desired tone of the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,

    /// Areas of expertise, comma-joined into the system message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expertise: Option<Vec<String>>,
}

/// A single few-shot demonstration pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FewShotExample {
    /// The example user turn.
    pub input: String,

    /// The example assistant turn.
    pub output: String,

    /// Author-facing note; never included in compiled output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Output format requirements for the model's response.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputFormat {
    /// Target format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormatKind>,

    /// Arbitrary structured schema, pretty-printed into the system message.
    /// Opaque to this crate; its shape is never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    /// Literal output template shown to the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Free-form description of the expected output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormatKind {
    Text,
    Json,
    Yaml,
    Markdown,
    Html,
    Xml,
}

impl std::fmt::Display for OutputFormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutputFormatKind::Text => "text",
            OutputFormatKind::Json => "json",
            OutputFormatKind::Yaml => "yaml",
            OutputFormatKind::Markdown => "markdown",
            OutputFormatKind::Html => "html",
            OutputFormatKind::Xml => "xml",
        };
        write!(f, "{}", s)
    }
}

/// A declared or inferred template variable.
///
/// Names are compared case-sensitively, exact match, and are unique within
/// a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDefinition {
    /// Variable name as it appears inside `{{...}}`.
    pub name: String,

    /// Value type expected by the template.
    #[serde(rename = "type")]
    pub kind: VariableType,

    /// Whether a binding must be provided. Omitted means optional.
    #[serde(default)]
    pub required: bool,

    /// Human description of the variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default value, carried as metadata only; never substituted implicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Variable value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    #[default]
    String,
    Number,
    Boolean,
    Array,
}

impl std::fmt::Display for VariableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VariableType::String => "string",
            VariableType::Number => "number",
            VariableType::Boolean => "boolean",
            VariableType::Array => "array",
        };
        write!(f, "{}", s)
    }
}

/// A named binding set used to compile and evaluate the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// Test case name, referenced by `compile --test-case`.
    pub name: String,

    /// What this case exercises.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Variable bindings for this case.
    #[serde(default)]
    pub inputs: BTreeMap<String, Value>,

    /// Expected response, for eyeball comparison in reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,

    /// Freeform tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Authoring metadata attached to a document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PromptMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Prompt categories used by scaffolding and metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    CodeReview,
    ContentGeneration,
    DataAnalysis,
    CustomerService,
    Documentation,
    Translation,
    Summarization,
    CreativeWriting,
    Other,
}

/// Author-facing difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl PromptDocument {
    /// Validate the document's structure.
    ///
    /// This is the malformed-document gate: it runs before any compilation
    /// or schema diffing is attempted, and there is no partial recovery.
    /// Parsing already guarantees `prompt` and `user_input_template` exist;
    /// this checks the constraints serde cannot express.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.title.trim().is_empty() {
            return Err(crate::error::ForgeError::Document(
                "'title' must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }

    /// Look up a test case by name.
    pub fn test_case(&self, name: &str) -> Option<&TestCase> {
        self.test_cases
            .as_deref()
            .and_then(|cases| cases.iter().find(|tc| tc.name == name))
    }
}
