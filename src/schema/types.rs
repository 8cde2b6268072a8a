//! Schema snapshot and validation report types.

use crate::document::VariableDefinition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stamped snapshot of a document's variable contract.
///
/// Invariant: `variables` is sorted by name ascending before checksum
/// computation or comparison. Extraction produces sorted output, which makes
/// the checksum independent of declaration order and diffing symmetric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableSchema {
    /// Opaque version token; unique per stamp, no ordering semantics.
    pub version: String,

    /// The canonical variable set, sorted by name ascending.
    pub variables: Vec<VariableDefinition>,

    /// When this snapshot was stamped.
    pub created_at: DateTime<Utc>,

    /// Content checksum over the `(name, type, required)` triples.
    pub checksum: String,

    /// Changes detected against the previous snapshot at stamp time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaking_changes: Option<Vec<BreakingChange>>,
}

/// A single detected schema difference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakingChange {
    /// What kind of difference this is.
    #[serde(rename = "type")]
    pub kind: BreakingChangeKind,

    /// The affected variable's name.
    pub variable_name: String,

    /// Prior value (whole definition for removals, the changed attribute
    /// otherwise).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,

    /// New value (whole definition for additions, the changed attribute
    /// otherwise).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,

    /// Severity classification.
    pub impact: Impact,

    /// Actionable note for whoever maintains code bound to this prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_note: Option<String>,
}

/// Kinds of schema differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakingChangeKind {
    VariableAdded,
    VariableRemoved,
    /// No detection rule emits this today; the variant stays so persisted
    /// change lists that carry it keep deserializing.
    VariableRenamed,
    TypeChanged,
    RequiredChanged,
}

impl std::fmt::Display for BreakingChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BreakingChangeKind::VariableAdded => "variable_added",
            BreakingChangeKind::VariableRemoved => "variable_removed",
            BreakingChangeKind::VariableRenamed => "variable_renamed",
            BreakingChangeKind::TypeChanged => "type_changed",
            BreakingChangeKind::RequiredChanged => "required_changed",
        };
        write!(f, "{}", s)
    }
}

/// Severity of a schema difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// Likely to invalidate code depending on the prior contract.
    Breaking,
    /// May require attention but does not invalidate existing callers.
    Warning,
    /// Informational; existing callers are unaffected.
    Info,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Impact::Breaking => "breaking",
            Impact::Warning => "warning",
            Impact::Info => "info",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of a schema validation run.
///
/// This is a report, not a verdict enforced here: the caller decides
/// whether `is_valid == false` blocks anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaValidationResult {
    /// Whether the change set is free of breaking-impact changes.
    pub is_valid: bool,

    /// Every detected difference, removed-then-added-then-modified order.
    pub breaking_changes: Vec<BreakingChange>,

    /// Human-readable severity summaries.
    pub warnings: Vec<String>,

    /// True iff any change has breaking impact.
    pub migration_required: bool,

    /// 0-100 heuristic; 100 means no detected changes.
    pub compatibility_score: u32,
}
