//! Tests for prompt document parsing, validation, and round-tripping.

use super::*;
use tempfile::TempDir;

const MINIMAL_DOCUMENT: &str = r#"{
  "title": "Test Prompt",
  "prompt": {
    "persona": { "role": "assistant" },
    "instructions": ["Help the user"]
  },
  "user_input_template": "{{user_query}}"
}"#;

const FULL_DOCUMENT: &str = r#"{
  "$schema": "https://example.com/prompt.schema.json",
  "title": "Code Review Assistant",
  "description": "Reviews code for quality issues",
  "prompt": {
    "persona": {
      "role": "You are a senior software engineer.",
      "tone": "Concise and professional.",
      "expertise": ["rust", "security"]
    },
    "instructions": ["Review the code", "Provide feedback"],
    "chain_of_thought": ["Read the diff", "Check for bugs"],
    "few_shot_examples": [
      { "input": "1+1", "output": "2", "explanation": "arithmetic" }
    ],
    "output_format": {
      "format": "json",
      "schema": { "type": "object" },
      "template": "{\"verdict\": \"...\"}"
    },
    "constraints": ["Do not suggest rewrites"]
  },
  "user_input_template": "Review this {{language}} code:\n{{code}}",
  "variables": [
    { "name": "language", "type": "string", "required": true, "default": "rust" },
    { "name": "code", "type": "string", "required": true }
  ],
  "test_cases": [
    { "name": "basic", "inputs": { "language": "rust", "code": "fn main() {}" } }
  ],
  "models": ["gpt-4-turbo", "claude-3-sonnet"],
  "metadata": {
    "author": "reviewer-team",
    "created": "2026-01-10T09:00:00Z",
    "version": "1.0.0",
    "tags": ["review"],
    "category": "code-review",
    "difficulty": "intermediate"
  },
  "custom_field": { "nested": true }
}"#;

#[test]
fn parse_minimal_document() {
    let doc = PromptDocument::parse(MINIMAL_DOCUMENT).unwrap();

    assert_eq!(doc.title, "Test Prompt");
    assert_eq!(doc.prompt.persona.role, "assistant");
    assert_eq!(doc.prompt.instructions, vec!["Help the user"]);
    assert_eq!(doc.user_input_template, "{{user_query}}");
    assert!(doc.variables.is_none());
    assert!(doc.variable_schema.is_none());
}

#[test]
fn parse_full_document() {
    let doc = PromptDocument::parse(FULL_DOCUMENT).unwrap();

    assert_eq!(doc.title, "Code Review Assistant");
    assert_eq!(
        doc.prompt.persona.tone.as_deref(),
        Some("Concise and professional.")
    );
    assert_eq!(
        doc.prompt.output_format.as_ref().unwrap().format,
        Some(OutputFormatKind::Json)
    );

    let vars = doc.variables.as_deref().unwrap();
    assert_eq!(vars.len(), 2);
    assert_eq!(vars[0].name, "language");
    assert_eq!(vars[0].kind, VariableType::String);
    assert!(vars[0].required);

    let meta = doc.metadata.as_ref().unwrap();
    assert_eq!(meta.category, Some(Category::CodeReview));
    assert_eq!(meta.difficulty, Some(Difficulty::Intermediate));
}

#[test]
fn parse_rejects_missing_title() {
    let json = r#"{
      "prompt": { "persona": { "role": "a" }, "instructions": [] },
      "user_input_template": "{{q}}"
    }"#;

    let err = PromptDocument::parse(json).unwrap_err();
    assert!(err.to_string().contains("Invalid prompt document"));
}

#[test]
fn parse_rejects_missing_prompt_structure() {
    let json = r#"{ "title": "T", "user_input_template": "{{q}}" }"#;

    assert!(PromptDocument::parse(json).is_err());
}

#[test]
fn parse_rejects_missing_template() {
    let json = r#"{
      "title": "T",
      "prompt": { "persona": { "role": "a" }, "instructions": [] }
    }"#;

    assert!(PromptDocument::parse(json).is_err());
}

#[test]
fn parse_rejects_blank_title() {
    let json = r#"{
      "title": "   ",
      "prompt": { "persona": { "role": "a" }, "instructions": [] },
      "user_input_template": "{{q}}"
    }"#;

    let err = PromptDocument::parse(json).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn omitted_required_flag_means_optional() {
    let json = r#"{
      "title": "T",
      "prompt": { "persona": { "role": "a" }, "instructions": [] },
      "user_input_template": "{{q}}",
      "variables": [ { "name": "q", "type": "string" } ]
    }"#;

    let doc = PromptDocument::parse(json).unwrap();
    assert!(!doc.variables.as_deref().unwrap()[0].required);
}

#[test]
fn round_trip_preserves_unknown_fields() {
    let doc = PromptDocument::parse(FULL_DOCUMENT).unwrap();
    assert!(doc.extra.contains_key("custom_field"));

    let json = doc.to_json().unwrap();
    let reparsed = PromptDocument::parse(&json).unwrap();

    assert_eq!(
        reparsed.extra.get("custom_field"),
        doc.extra.get("custom_field")
    );
    assert_eq!(reparsed.title, doc.title);
    assert_eq!(reparsed.models, doc.models);
}

#[test]
fn round_trip_preserves_schema_snapshot() {
    let mut doc = PromptDocument::parse(MINIMAL_DOCUMENT).unwrap();
    let stamped = crate::schema::update_prompt_schema(doc.clone(), None);
    doc = stamped;

    let json = doc.to_json().unwrap();
    let reparsed = PromptDocument::parse(&json).unwrap();

    let original = doc.variable_schema.as_ref().unwrap();
    let restored = reparsed.variable_schema.as_ref().unwrap();
    assert_eq!(restored.version, original.version);
    assert_eq!(restored.checksum, original.checksum);
    assert_eq!(restored.variables, original.variables);
    assert_eq!(reparsed.schema_version, doc.schema_version);
}

#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.prompt.json");

    let doc = PromptDocument::parse(FULL_DOCUMENT).unwrap();
    doc.save(&path).unwrap();

    let loaded = PromptDocument::load(&path).unwrap();
    assert_eq!(loaded.title, doc.title);
    assert_eq!(loaded.user_input_template, doc.user_input_template);
}

#[test]
fn load_missing_file_is_user_error() {
    let err = PromptDocument::load("/nonexistent/missing.prompt.json").unwrap_err();
    assert!(err.to_string().contains("failed to read prompt file"));
}

#[test]
fn test_case_lookup_by_name() {
    let doc = PromptDocument::parse(FULL_DOCUMENT).unwrap();

    let tc = doc.test_case("basic").unwrap();
    assert_eq!(tc.inputs.get("language"), Some(&serde_json::json!("rust")));

    assert!(doc.test_case("missing").is_none());
}
