//! Prompt compilation.
//!
//! Compiles a structured prompt document plus concrete variable bindings
//! into a provider-agnostic message list ready for a model API call:
//!
//! 1. Substitute bindings into the user input template
//! 2. Assemble a system message from persona, instructions, chain of
//!    thought, output format, and constraints
//! 3. Append few-shot examples as alternating user/assistant turns
//! 4. Append the substituted template as the final user turn
//! 5. Derive call parameters from the output format
//!
//! Compilation has no side effects and never fails on a well-formed
//! document. A template referencing unbound names degrades gracefully: the
//! placeholders pass through literally.

use crate::document::{OutputFormatKind, PromptDocument, PromptStructure};
use crate::template;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

#[cfg(test)]
mod tests;

/// Providers a compiled prompt can be adapted to.
///
/// The compiled structure itself is provider-agnostic; an external
/// invocation collaborator remaps roles as needed (e.g., folding the system
/// turn into a dedicated field). The default tag is the OpenAI-compatible
/// chat shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAI,
    Anthropic,
    Google,
}

/// Message roles in the compiled conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single turn in the compiled conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A compiled, ready-to-send prompt.
///
/// Ephemeral: produced per compile call and handed straight to an
/// invocation collaborator, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledPrompt {
    pub provider: Provider,

    /// Ordered conversation. The final message is always the user turn
    /// built from the input template.
    pub messages: Vec<Message>,

    /// Provider-call parameters derived from the output format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

/// Compile a document with the given variable bindings.
///
/// Missing bindings are not an error: their placeholders remain in the
/// output verbatim, which keeps the gap visible to whoever reads the
/// compiled prompt.
pub fn compile(document: &PromptDocument, bindings: &BTreeMap<String, Value>) -> CompiledPrompt {
    let user_input = template::substitute(&document.user_input_template, bindings);
    let system_message = build_system_message(&document.prompt);

    let mut messages = Vec::new();

    if !system_message.is_empty() {
        messages.push(Message::new(Role::System, system_message));
    }

    // Few-shot examples become alternating user/assistant turns, in document
    // order. Explanations are author-facing only and are dropped here.
    if let Some(examples) = &document.prompt.few_shot_examples {
        for example in examples {
            messages.push(Message::new(Role::User, example.input.clone()));
            messages.push(Message::new(Role::Assistant, example.output.clone()));
        }
    }

    // The real user turn is always last.
    messages.push(Message::new(Role::User, user_input));

    CompiledPrompt {
        provider: Provider::default(),
        messages,
        parameters: build_parameters(&document.prompt),
    }
}

/// Assemble the system message from the prompt structure.
///
/// Sections appear in fixed order and only when present; every section
/// after the first is preceded by a blank line. When every section is
/// absent the result is empty and no system turn is emitted.
fn build_system_message(prompt: &PromptStructure) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !prompt.persona.role.is_empty() {
        parts.push(prompt.persona.role.clone());
    }

    if let Some(tone) = &prompt.persona.tone
        && !tone.is_empty()
    {
        parts.push(format!("\nTone: {}", tone));
    }

    if let Some(expertise) = &prompt.persona.expertise
        && !expertise.is_empty()
    {
        parts.push(format!("\nExpertise: {}", expertise.join(", ")));
    }

    if !prompt.instructions.is_empty() {
        parts.push("\nInstructions:".to_string());
        for (index, instruction) in prompt.instructions.iter().enumerate() {
            parts.push(format!("{}. {}", index + 1, instruction));
        }
    }

    if let Some(steps) = &prompt.chain_of_thought
        && !steps.is_empty()
    {
        parts.push("\nThinking Process:".to_string());
        for (index, step) in steps.iter().enumerate() {
            parts.push(format!("{}. {}", index + 1, step));
        }
    }

    if let Some(output_format) = &prompt.output_format {
        if let Some(format) = output_format.format {
            parts.push(format!("\nOutput Format: {}", format));
        }

        if let Some(template) = &output_format.template
            && !template.is_empty()
        {
            parts.push(format!("\nOutput Template:\n{}", template));
        }

        if let Some(schema) = &output_format.schema
            && !schema.is_null()
        {
            let pretty =
                serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());
            parts.push(format!("\nOutput Schema:\n{}", pretty));
        }
    }

    if let Some(constraints) = &prompt.constraints
        && !constraints.is_empty()
    {
        parts.push("\nConstraints:".to_string());
        for constraint in constraints {
            parts.push(format!("- {}", constraint));
        }
    }

    parts.join("\n")
}

/// Derive provider-call parameters from the output format.
///
/// Structured JSON output gets a low temperature and a structured-output
/// marker; everything else gets no parameters at all.
fn build_parameters(prompt: &PromptStructure) -> Option<Map<String, Value>> {
    let format = prompt.output_format.as_ref()?.format?;

    if format != OutputFormatKind::Json {
        return None;
    }

    let mut params = Map::new();
    params.insert("temperature".to_string(), json!(0.1));
    params.insert("response_format".to_string(), json!({"type": "json_object"}));
    Some(params)
}
