//! Prompt evaluation harness.
//!
//! Model invocation is an external collaborator: this crate never speaks to
//! a provider itself. The [`ModelInvoker`] trait is the single narrow seam
//! (one model identifier and one compiled prompt in, one response or error
//! out), which keeps every vendor SDK outside this codebase.
//!
//! [`evaluate_prompt`] drives that seam across a document's model list and
//! collects one [`EvaluationResult`] per model, tagged with latency, token
//! count, and cost estimate. One model's failure never prevents the others
//! from completing: a failed call becomes a result entry carrying the error
//! string, and the loop continues.
//!
//! Cost estimation is a pluggable rate table ([`RateTable`]), not a
//! hardcoded constant set; the defaults are sample values that callers
//! override from a YAML file.

mod rates;
mod report;


pub use rates::RateTable;
pub use report::format_session;

use crate::compiler::{self, CompiledPrompt};
use crate::document::{PromptDocument, TestCase};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Models evaluated when a document declares none.
pub const DEFAULT_MODELS: [&str; 2] = ["gpt-4-turbo", "claude-3-sonnet"];

/// What a provider call returns on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    /// The model's textual response.
    pub content: String,

    /// Total tokens consumed, when the provider reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u32>,

    /// Provider-side cost estimate, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_estimate: Option<f64>,
}

/// The external model-invocation collaborator.
///
/// Implementations own credentials, transport, and provider-specific
/// message-role remapping. Errors are opaque to this crate, hence
/// `anyhow::Result`.
pub trait ModelInvoker {
    fn invoke(&self, model: &str, prompt: &CompiledPrompt) -> anyhow::Result<ModelResponse>;
}

/// Per-call metadata recorded alongside a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationMetadata {
    /// Wall-clock call duration in milliseconds.
    pub latency: u64,

    /// Tokens consumed; zero when the call failed or went unreported.
    pub tokens: u32,

    /// Estimated cost in dollars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_estimate: Option<f64>,

    /// Error string when the call failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One model's outcome within an evaluation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// The model identifier this result belongs to.
    pub model: String,

    /// The response content; empty when the call failed.
    pub response: String,

    pub metadata: EvaluationMetadata,

    pub timestamp: DateTime<Utc>,
}

/// A complete evaluation run: one test case fanned out across models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSession {
    /// Path of the evaluated prompt file.
    pub prompt_file: String,

    /// Name of the test case whose inputs were compiled.
    pub test_case: String,

    pub results: Vec<EvaluationResult>,

    pub started_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl EvaluationSession {
    /// Parse a session from JSON produced by an earlier run.
    pub fn parse(content: &str) -> crate::error::Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            crate::error::ForgeError::UserError(format!(
                "failed to parse evaluation session JSON: {}",
                e
            ))
        })
    }
}

/// The models a document should be evaluated against.
pub fn models_to_evaluate(document: &PromptDocument) -> Vec<String> {
    match &document.models {
        Some(models) if !models.is_empty() => models.clone(),
        _ => DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
    }
}

/// Evaluate one test case across the document's model list.
///
/// Compiles the prompt with the test case's inputs, then invokes each model
/// in turn. A failed invocation is captured as a result entry with an error
/// string and zero tokens; sibling models still run.
pub fn evaluate_prompt(
    document: &PromptDocument,
    test_case: &TestCase,
    prompt_file: &str,
    invoker: &dyn ModelInvoker,
    rates: &RateTable,
) -> EvaluationSession {
    let models = models_to_evaluate(document);
    let compiled = compiler::compile(document, &test_case.inputs);

    let started_at = Utc::now();
    let mut results = Vec::with_capacity(models.len());

    for model in &models {
        results.push(evaluate_with_model(model, &compiled, invoker, rates));
    }

    EvaluationSession {
        prompt_file: prompt_file.to_string(),
        test_case: test_case.name.clone(),
        results,
        started_at,
        completed_at: Some(Utc::now()),
    }
}

fn evaluate_with_model(
    model: &str,
    compiled: &CompiledPrompt,
    invoker: &dyn ModelInvoker,
    rates: &RateTable,
) -> EvaluationResult {
    let start = Instant::now();

    match invoker.invoke(model, compiled) {
        Ok(response) => {
            let latency = start.elapsed().as_millis() as u64;
            let tokens = response.tokens.unwrap_or(0);
            let cost_estimate = response
                .cost_estimate
                .or_else(|| rates.estimate(model, tokens));

            EvaluationResult {
                model: model.to_string(),
                response: response.content,
                metadata: EvaluationMetadata {
                    latency,
                    tokens,
                    cost_estimate,
                    error: None,
                },
                timestamp: Utc::now(),
            }
        }
        // A failed call carries only its error string; latency and tokens
        // are zeroed rather than reporting a partial measurement.
        Err(error) => EvaluationResult {
            model: model.to_string(),
            response: String::new(),
            metadata: EvaluationMetadata {
                latency: 0,
                tokens: 0,
                cost_estimate: None,
                error: Some(error.to_string()),
            },
            timestamp: Utc::now(),
        },
    }
}
