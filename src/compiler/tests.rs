//! Tests for prompt compilation.

use super::*;
use crate::document::{
    FewShotExample, OutputFormat, Persona, PromptDocument, PromptStructure,
};
use serde_json::json;

fn make_document(structure: PromptStructure, template: &str) -> PromptDocument {
    PromptDocument {
        schema_url: None,
        title: "Test Prompt".to_string(),
        description: None,
        prompt: structure,
        user_input_template: template.to_string(),
        variables: None,
        test_cases: None,
        models: None,
        metadata: None,
        schema_version: None,
        variable_schema: None,
        extra: BTreeMap::new(),
    }
}

fn structure(role: &str, instructions: &[&str]) -> PromptStructure {
    PromptStructure {
        persona: Persona {
            role: role.to_string(),
            tone: None,
            expertise: None,
        },
        instructions: instructions.iter().map(|s| s.to_string()).collect(),
        chain_of_thought: None,
        few_shot_examples: None,
        output_format: None,
        constraints: None,
    }
}

fn bindings<const N: usize>(pairs: [(&str, Value); N]) -> BTreeMap<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[test]
fn compiles_basic_prompt() {
    let doc = make_document(
        structure("You are a helpful assistant.", &["Answer the user query."]),
        "{{query}}",
    );

    let compiled = compile(&doc, &bindings([("query", json!("Hello, world!"))]));

    assert_eq!(
        compiled.messages,
        vec![
            Message::new(
                Role::System,
                "You are a helpful assistant.\n\nInstructions:\n1. Answer the user query."
            ),
            Message::new(Role::User, "Hello, world!"),
        ]
    );
    assert_eq!(compiled.provider, Provider::OpenAI);
    assert!(compiled.parameters.is_none());
}

#[test]
fn substitutes_multiple_variables() {
    let doc = make_document(structure("", &[]), "User: {{name}}, Age: {{age}}");

    let compiled = compile(
        &doc,
        &bindings([("name", json!("John Doe")), ("age", json!(30))]),
    );

    // No persona and no instructions: no system turn at all.
    assert_eq!(compiled.messages.len(), 1);
    assert_eq!(compiled.messages[0].role, Role::User);
    assert_eq!(compiled.messages[0].content, "User: John Doe, Age: 30");
}

#[test]
fn unbound_placeholder_survives_compilation() {
    let doc = make_document(structure("", &[]), "{{bound}} and {{missing}}");

    let compiled = compile(&doc, &bindings([("bound", json!("here"))]));

    assert_eq!(compiled.messages[0].content, "here and {{missing}}");
}

#[test]
fn few_shot_examples_precede_final_user_turn() {
    let mut s = structure("", &[]);
    s.few_shot_examples = Some(vec![
        FewShotExample {
            input: "1+1".to_string(),
            output: "2".to_string(),
            explanation: None,
        },
        FewShotExample {
            input: "2+2".to_string(),
            output: "4".to_string(),
            explanation: Some("never compiled".to_string()),
        },
    ]);
    let doc = make_document(s, "Calculate: {{math_problem}}");

    let compiled = compile(&doc, &bindings([("math_problem", json!("3+3"))]));

    assert_eq!(
        compiled.messages,
        vec![
            Message::new(Role::User, "1+1"),
            Message::new(Role::Assistant, "2"),
            Message::new(Role::User, "2+2"),
            Message::new(Role::Assistant, "4"),
            Message::new(Role::User, "Calculate: 3+3"),
        ]
    );
}

#[test]
fn json_output_format_sets_parameters() {
    let mut s = structure("", &[]);
    s.output_format = Some(OutputFormat {
        format: Some(OutputFormatKind::Json),
        schema: Some(json!({"type": "object", "properties": {"name": {"type": "string"}}})),
        template: None,
        description: None,
    });
    let doc = make_document(s, "Extract name: {{text}}");

    let compiled = compile(&doc, &bindings([("text", json!("My name is Jane."))]));

    let system = &compiled.messages[0];
    assert_eq!(system.role, Role::System);
    assert!(system.content.contains("Output Format: json"));
    assert!(system.content.contains("\"type\": \"object\""));

    let params = compiled.parameters.as_ref().unwrap();
    assert_eq!(params.get("temperature"), Some(&json!(0.1)));
    assert_eq!(
        params.get("response_format"),
        Some(&json!({"type": "json_object"}))
    );
}

#[test]
fn non_json_output_format_has_no_parameters() {
    let mut s = structure("Role.", &[]);
    s.output_format = Some(OutputFormat {
        format: Some(OutputFormatKind::Markdown),
        schema: None,
        template: None,
        description: None,
    });
    let doc = make_document(s, "{{q}}");

    let compiled = compile(&doc, &bindings([("q", json!("x"))]));

    assert!(compiled.parameters.is_none());
    assert!(
        compiled.messages[0]
            .content
            .contains("Output Format: markdown")
    );
}

#[test]
fn builds_comprehensive_system_message() {
    let mut s = structure(
        "You are an expert programmer.",
        &["Write clean code.", "Add comments."],
    );
    s.persona.tone = Some("Concise and professional.".to_string());
    s.chain_of_thought = Some(vec![
        "Understand requirement.".to_string(),
        "Implement solution.".to_string(),
    ]);
    s.constraints = Some(vec!["Do not use external libraries.".to_string()]);
    let doc = make_document(s, "{{request}}");

    let compiled = compile(
        &doc,
        &bindings([("request", json!("Write a Fibonacci function."))]),
    );

    let expected = [
        "You are an expert programmer.",
        "\nTone: Concise and professional.",
        "\nInstructions:",
        "1. Write clean code.",
        "2. Add comments.",
        "\nThinking Process:",
        "1. Understand requirement.",
        "2. Implement solution.",
        "\nConstraints:",
        "- Do not use external libraries.",
    ]
    .join("\n");

    assert_eq!(compiled.messages[0].content, expected);
}

#[test]
fn expertise_renders_comma_joined() {
    let mut s = structure("Role.", &[]);
    s.persona.expertise = Some(vec!["rust".to_string(), "security".to_string()]);
    let doc = make_document(s, "{{q}}");

    let compiled = compile(&doc, &bindings([("q", json!("x"))]));

    assert_eq!(
        compiled.messages[0].content,
        "Role.\n\nExpertise: rust, security"
    );
}

#[test]
fn output_template_block_is_included() {
    let mut s = structure("Role.", &[]);
    s.output_format = Some(OutputFormat {
        format: None,
        schema: None,
        template: Some("{\"result\": \"...\"}".to_string()),
        description: None,
    });
    let doc = make_document(s, "{{q}}");

    let compiled = compile(&doc, &bindings([("q", json!("x"))]));

    assert!(
        compiled.messages[0]
            .content
            .contains("Output Template:\n{\"result\": \"...\"}")
    );
}

#[test]
fn final_message_is_always_the_user_turn() {
    let mut s = structure("Role.", &["Instruction."]);
    s.few_shot_examples = Some(vec![FewShotExample {
        input: "in".to_string(),
        output: "out".to_string(),
        explanation: None,
    }]);
    let doc = make_document(s, "{{q}}");

    let compiled = compile(&doc, &bindings([("q", json!("final"))]));

    let last = compiled.messages.last().unwrap();
    assert_eq!(last.role, Role::User);
    assert_eq!(last.content, "final");
}

#[test]
fn empty_structure_emits_only_user_turn() {
    let doc = make_document(structure("", &[]), "plain input");

    let compiled = compile(&doc, &BTreeMap::new());

    assert_eq!(
        compiled.messages,
        vec![Message::new(Role::User, "plain input")]
    );
}

#[test]
fn compiled_prompt_serializes_with_lowercase_roles() {
    let doc = make_document(structure("Role.", &[]), "{{q}}");
    let compiled = compile(&doc, &bindings([("q", json!("x"))]));

    let json = serde_json::to_value(&compiled).unwrap();
    assert_eq!(json["provider"], "openai");
    assert_eq!(json["messages"][0]["role"], "system");
    assert_eq!(json["messages"][1]["role"], "user");
}

#[test]
fn compilation_is_deterministic() {
    let doc = make_document(
        structure("Role.", &["A.", "B."]),
        "{{a}} {{b}}",
    );
    let b = bindings([("a", json!("1")), ("b", json!("2"))]);

    let first = compile(&doc, &b);
    let second = compile(&doc, &b);

    assert_eq!(first.messages, second.messages);
    assert_eq!(first.parameters, second.parameters);
}
