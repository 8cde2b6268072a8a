//! Schema snapshot generation and document-level validation.

use super::diff::{calculate_compatibility_score, detect_breaking_changes, generate_warnings};
use super::extract::{checksum, extract_variables};
use super::types::{Impact, SchemaValidationResult, VariableSchema};
use crate::document::PromptDocument;
use chrono::Utc;
use uuid::Uuid;

/// Generate a fresh schema snapshot for a document.
///
/// The version token is opaque: timestamp-derived with a random suffix,
/// unique per call. Nothing orders or parses it.
pub fn generate_schema_version(document: &PromptDocument) -> VariableSchema {
    let variables = extract_variables(document);
    let checksum = checksum(&variables);

    VariableSchema {
        version: generate_version_token(),
        variables,
        created_at: Utc::now(),
        checksum,
        breaking_changes: None,
    }
}

fn generate_version_token() -> String {
    let millis = Utc::now().timestamp_millis();
    let random = Uuid::new_v4().simple().to_string();
    format!("v{}-{}", millis, &random[..6])
}

/// Validate the schema transition between two document versions.
///
/// `is_valid` means no breaking-impact change exists; warning- and
/// info-impact changes alone leave the transition valid.
pub fn validate_schema_change(
    old_document: &PromptDocument,
    new_document: &PromptDocument,
) -> SchemaValidationResult {
    let old_variables = extract_variables(old_document);
    let new_variables = extract_variables(new_document);

    let breaking_changes = detect_breaking_changes(&old_variables, &new_variables);
    let warnings = generate_warnings(&breaking_changes);
    let migration_required = breaking_changes
        .iter()
        .any(|c| c.impact == Impact::Breaking);
    let compatibility_score = calculate_compatibility_score(&breaking_changes);

    SchemaValidationResult {
        is_valid: !migration_required,
        breaking_changes,
        warnings,
        migration_required,
        compatibility_score,
    }
}

/// Re-stamp a document with a fresh schema snapshot.
///
/// When a previous snapshot is given, changes detected against it are
/// attached to the new snapshot (only when non-empty). `schema_version` and
/// `variable_schema` are replaced wholesale; every other field is untouched.
pub fn update_prompt_schema(
    mut document: PromptDocument,
    previous_schema: Option<&VariableSchema>,
) -> PromptDocument {
    let mut new_schema = generate_schema_version(&document);

    if let Some(previous) = previous_schema {
        let changes = detect_breaking_changes(&previous.variables, &new_schema.variables);
        if !changes.is_empty() {
            new_schema.breaking_changes = Some(changes);
        }
    }

    document.schema_version = Some(new_schema.version.clone());
    document.variable_schema = Some(new_schema);
    document
}

/// Validate a document against its own stamped schema.
///
/// A document without a stamped schema is trivially valid (with an
/// informational warning). Otherwise the stamped variable set is diffed
/// against the freshly extracted one; any difference at all makes the
/// result invalid, since the stamp no longer describes the document.
pub fn validate_prompt_against_schema(document: &PromptDocument) -> SchemaValidationResult {
    let Some(schema) = &document.variable_schema else {
        return SchemaValidationResult {
            is_valid: true,
            breaking_changes: Vec::new(),
            warnings: vec!["No schema defined - consider adding schema validation".to_string()],
            migration_required: false,
            compatibility_score: 100,
        };
    };

    let current_variables = extract_variables(document);
    let breaking_changes = detect_breaking_changes(&schema.variables, &current_variables);
    let migration_required = breaking_changes
        .iter()
        .any(|c| c.impact == Impact::Breaking);
    let compatibility_score = calculate_compatibility_score(&breaking_changes);

    let warnings = if breaking_changes.is_empty() {
        Vec::new()
    } else {
        vec!["Prompt does not match declared schema".to_string()]
    };

    SchemaValidationResult {
        is_valid: breaking_changes.is_empty(),
        breaking_changes,
        warnings,
        migration_required,
        compatibility_score,
    }
}
