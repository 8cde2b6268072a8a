//! Starter document generation for `promptforge new`.
//!
//! Builds a complete, immediately compilable prompt document from a title,
//! a category, and a structure preset. Category tunes the persona and
//! instructions; the preset adds chain-of-thought steps, a few-shot
//! example, or a structured output section.

use crate::document::{
    Category, Difficulty, FewShotExample, OutputFormat, OutputFormatKind, Persona,
    PromptDocument, PromptMetadata, PromptStructure, TestCase, VariableDefinition, VariableType,
};
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;

/// Structure presets a new document can start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum Preset {
    /// Simple prompt with instructions only.
    #[default]
    Basic,
    /// Step-by-step reasoning template.
    ChainOfThought,
    /// Template with example inputs/outputs.
    FewShot,
    /// Template for JSON/structured responses.
    Structured,
}

/// Derive a filesystem-friendly slug from a document title.
///
/// Lowercases, strips everything but alphanumerics/spaces/hyphens, and
/// collapses runs of separators into single hyphens.
pub fn slug_from_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_was_hyphen = false;
        } else if (c == ' ' || c == '-') && !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}

/// Build a starter document.
pub fn starter_document(
    title: &str,
    description: Option<&str>,
    category: Category,
    preset: Preset,
) -> PromptDocument {
    let mut document = PromptDocument {
        schema_url: None,
        title: title.to_string(),
        description: description.map(|d| d.to_string()),
        prompt: PromptStructure {
            persona: Persona {
                role: "You are a helpful AI assistant.".to_string(),
                tone: None,
                expertise: None,
            },
            instructions: vec!["Please help with the following task.".to_string()],
            chain_of_thought: None,
            few_shot_examples: None,
            output_format: None,
            constraints: None,
        },
        user_input_template: "{{user_query}}".to_string(),
        variables: Some(vec![VariableDefinition {
            name: "user_query".to_string(),
            kind: VariableType::String,
            required: true,
            description: Some("The user's query or request".to_string()),
            default: None,
        }]),
        test_cases: Some(vec![TestCase {
            name: "Basic Test".to_string(),
            description: None,
            inputs: [("user_query".to_string(), json!("Hello, how are you?"))]
                .into_iter()
                .collect(),
            expected_output: None,
            tags: Vec::new(),
        }]),
        models: Some(vec!["gpt-4-turbo".to_string()]),
        metadata: Some(PromptMetadata {
            author: None,
            created: Some(Utc::now()),
            updated: None,
            version: Some("1.0.0".to_string()),
            tags: Vec::new(),
            category: Some(category),
            difficulty: Some(Difficulty::Beginner),
            extra: BTreeMap::new(),
        }),
        schema_version: None,
        variable_schema: None,
        extra: BTreeMap::new(),
    };

    apply_preset(&mut document, preset);
    apply_category(&mut document, category);
    document
}

fn apply_preset(document: &mut PromptDocument, preset: Preset) {
    match preset {
        Preset::Basic => {}
        Preset::ChainOfThought => {
            document.prompt.chain_of_thought = Some(vec![
                "First, understand the problem".to_string(),
                "Then, break it down into steps".to_string(),
                "Finally, provide a solution".to_string(),
            ]);
        }
        Preset::FewShot => {
            document.prompt.few_shot_examples = Some(vec![FewShotExample {
                input: "Example input".to_string(),
                output: "Example output".to_string(),
                explanation: Some("This shows how to handle this type of input".to_string()),
            }]);
        }
        Preset::Structured => {
            document.prompt.output_format = Some(OutputFormat {
                format: Some(OutputFormatKind::Json),
                schema: Some(json!({
                    "type": "object",
                    "properties": {
                        "result": {"type": "string"},
                        "confidence": {"type": "number"}
                    },
                    "required": ["result"]
                })),
                template: Some("{\"result\": \"your answer here\", \"confidence\": 0.95}".to_string()),
                description: None,
            });
        }
    }
}

fn apply_category(document: &mut PromptDocument, category: Category) {
    match category {
        Category::CodeReview => {
            document.prompt.persona.role =
                "You are a senior software engineer conducting a thorough code review."
                    .to_string();
            document.prompt.instructions = vec![
                "Review the provided code for quality, security, and best practices".to_string(),
                "Identify potential bugs or issues".to_string(),
                "Suggest improvements where applicable".to_string(),
                "Provide constructive feedback".to_string(),
            ];
            document.user_input_template =
                "Please review this code:\n\n```{{language}}\n{{code}}\n```".to_string();
            document.variables = Some(vec![
                VariableDefinition {
                    name: "language".to_string(),
                    kind: VariableType::String,
                    required: true,
                    description: Some("Programming language".to_string()),
                    default: Some(json!("javascript")),
                },
                VariableDefinition {
                    name: "code".to_string(),
                    kind: VariableType::String,
                    required: true,
                    description: Some("Code to review".to_string()),
                    default: None,
                },
            ]);
            document.test_cases = Some(vec![TestCase {
                name: "Basic Test".to_string(),
                description: None,
                inputs: [
                    ("language".to_string(), json!("javascript")),
                    (
                        "code".to_string(),
                        json!("function add(a, b) { return a + b; }"),
                    ),
                ]
                .into_iter()
                .collect(),
                expected_output: None,
                tags: Vec::new(),
            }]);
        }
        Category::ContentGeneration => {
            document.prompt.persona.role =
                "You are a skilled content writer and creative professional.".to_string();
            document.prompt.instructions = vec![
                "Create engaging and well-structured content".to_string(),
                "Match the specified tone and style".to_string(),
                "Ensure content is relevant to the target audience".to_string(),
            ];
        }
        Category::DataAnalysis => {
            document.prompt.persona.role =
                "You are a data analyst with expertise in interpreting data and generating insights."
                    .to_string();
            document.prompt.instructions = vec![
                "Analyze the provided data carefully".to_string(),
                "Identify key patterns and trends".to_string(),
                "Provide actionable insights".to_string(),
                "Support conclusions with evidence from the data".to_string(),
            ];
        }
        // Remaining categories keep the generic assistant persona.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_lowercases_and_hyphenates() {
        assert_eq!(slug_from_title("Code Review Assistant"), "code-review-assistant");
    }

    #[test]
    fn slug_strips_punctuation_and_collapses_separators() {
        assert_eq!(slug_from_title("What's   up -- Doc?!"), "whats-up-doc");
        assert_eq!(slug_from_title("--Trim Me--"), "trim-me");
    }

    #[test]
    fn basic_starter_is_valid_and_compilable() {
        let doc = starter_document("My Prompt", None, Category::Other, Preset::Basic);

        assert!(doc.validate().is_ok());
        assert_eq!(doc.user_input_template, "{{user_query}}");

        // The declared variable covers the template, so stamping then
        // validating is clean.
        let stamped = crate::schema::update_prompt_schema(doc, None);
        let result = crate::schema::validate_prompt_against_schema(&stamped);
        assert!(result.is_valid);
    }

    #[test]
    fn chain_of_thought_preset_adds_steps() {
        let doc = starter_document("T", None, Category::Other, Preset::ChainOfThought);
        assert_eq!(doc.prompt.chain_of_thought.as_deref().unwrap().len(), 3);
    }

    #[test]
    fn few_shot_preset_adds_example() {
        let doc = starter_document("T", None, Category::Other, Preset::FewShot);
        assert_eq!(doc.prompt.few_shot_examples.as_deref().unwrap().len(), 1);
    }

    #[test]
    fn structured_preset_sets_json_output() {
        let doc = starter_document("T", None, Category::Other, Preset::Structured);

        let output = doc.prompt.output_format.as_ref().unwrap();
        assert_eq!(output.format, Some(OutputFormatKind::Json));
        assert!(output.schema.is_some());
        assert!(output.template.is_some());
    }

    #[test]
    fn code_review_category_swaps_template_and_variables() {
        let doc = starter_document("Reviewer", None, Category::CodeReview, Preset::Basic);

        assert!(doc.user_input_template.contains("{{code}}"));
        let vars = doc.variables.as_deref().unwrap();
        assert_eq!(vars.len(), 2);
        assert!(vars.iter().any(|v| v.name == "language"));

        // Declared variables must cover the new template.
        let extracted = crate::schema::extract_variables(&doc);
        assert_eq!(extracted.len(), 2);
        assert!(
            extracted
                .iter()
                .all(|v| v.description.as_deref() != Some("Auto-detected from template"))
        );
    }

    #[test]
    fn category_and_preset_are_recorded_in_metadata() {
        let doc = starter_document(
            "T",
            Some("desc"),
            Category::DataAnalysis,
            Preset::Basic,
        );

        let meta = doc.metadata.as_ref().unwrap();
        assert_eq!(meta.category, Some(Category::DataAnalysis));
        assert_eq!(meta.difficulty, Some(Difficulty::Beginner));
        assert_eq!(doc.description.as_deref(), Some("desc"));
    }
}
