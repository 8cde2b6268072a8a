//! Breaking-change detection and compatibility scoring.

use super::types::{BreakingChange, BreakingChangeKind, Impact};
use crate::document::VariableDefinition;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Compare two variable sets and classify every difference.
///
/// Emission order is part of the contract: removed variables first (in the
/// old list's order), then added variables (in the new list's order), then
/// modified variables (in the new list's order). A variable appears in at
/// most one removed or added entry, but can produce both a `type_changed`
/// and a `required_changed` entry when both attributes changed.
///
/// Severity rules:
///
/// - removal: `breaking` if the old definition was required, else `warning`
/// - addition: `breaking` if the new definition is required, else `info`
/// - type change: always `warning` (narrowing and widening are not
///   distinguished)
/// - required change: `breaking` only for optional→required; the reverse
///   transition is `info`
pub fn detect_breaking_changes(
    old_variables: &[VariableDefinition],
    new_variables: &[VariableDefinition],
) -> Vec<BreakingChange> {
    let old_by_name: BTreeMap<&str, &VariableDefinition> = old_variables
        .iter()
        .map(|v| (v.name.as_str(), v))
        .collect();
    let new_by_name: BTreeMap<&str, &VariableDefinition> = new_variables
        .iter()
        .map(|v| (v.name.as_str(), v))
        .collect();

    let mut changes = Vec::new();

    // Removed variables.
    for old_var in old_variables {
        if !new_by_name.contains_key(old_var.name.as_str()) {
            changes.push(BreakingChange {
                kind: BreakingChangeKind::VariableRemoved,
                variable_name: old_var.name.clone(),
                old_value: Some(definition_value(old_var)),
                new_value: None,
                impact: if old_var.required {
                    Impact::Breaking
                } else {
                    Impact::Warning
                },
                migration_note: Some(format!(
                    "Variable '{}' was removed. Update code to remove references.",
                    old_var.name
                )),
            });
        }
    }

    // Added variables.
    for new_var in new_variables {
        if !old_by_name.contains_key(new_var.name.as_str()) {
            let migration_note = if new_var.required {
                format!(
                    "New required variable '{}' added. Update code to provide this variable.",
                    new_var.name
                )
            } else {
                format!("New optional variable '{}' added.", new_var.name)
            };
            changes.push(BreakingChange {
                kind: BreakingChangeKind::VariableAdded,
                variable_name: new_var.name.clone(),
                old_value: None,
                new_value: Some(definition_value(new_var)),
                impact: if new_var.required {
                    Impact::Breaking
                } else {
                    Impact::Info
                },
                migration_note: Some(migration_note),
            });
        }
    }

    // Modified variables.
    for new_var in new_variables {
        let Some(old_var) = old_by_name.get(new_var.name.as_str()) else {
            continue;
        };

        if old_var.kind != new_var.kind {
            changes.push(BreakingChange {
                kind: BreakingChangeKind::TypeChanged,
                variable_name: new_var.name.clone(),
                old_value: Some(json!(old_var.kind.to_string())),
                new_value: Some(json!(new_var.kind.to_string())),
                impact: Impact::Warning,
                migration_note: Some(format!(
                    "Variable '{}' type changed from {} to {}.",
                    new_var.name, old_var.kind, new_var.kind
                )),
            });
        }

        if old_var.required != new_var.required {
            let migration_note = if new_var.required {
                format!("Variable '{}' is now required.", new_var.name)
            } else {
                format!("Variable '{}' is now optional.", new_var.name)
            };
            changes.push(BreakingChange {
                kind: BreakingChangeKind::RequiredChanged,
                variable_name: new_var.name.clone(),
                old_value: Some(json!(old_var.required)),
                new_value: Some(json!(new_var.required)),
                impact: if !old_var.required && new_var.required {
                    Impact::Breaking
                } else {
                    Impact::Info
                },
                migration_note: Some(migration_note),
            });
        }
    }

    changes
}

/// Collapse a change list into a 0-100 compatibility score.
///
/// Starts at 100; subtracts 25 per breaking change, 10 per warning, 2 per
/// info. Clamped at 0.
pub fn calculate_compatibility_score(changes: &[BreakingChange]) -> u32 {
    let mut score: i32 = 100;

    for change in changes {
        score -= match change.impact {
            Impact::Breaking => 25,
            Impact::Warning => 10,
            Impact::Info => 2,
        };
    }

    score.max(0) as u32
}

/// Severity summary strings for a change list.
pub(super) fn generate_warnings(changes: &[BreakingChange]) -> Vec<String> {
    let mut warnings = Vec::new();

    let breaking_count = changes
        .iter()
        .filter(|c| c.impact == Impact::Breaking)
        .count();
    let warning_count = changes
        .iter()
        .filter(|c| c.impact == Impact::Warning)
        .count();

    if breaking_count > 0 {
        warnings.push(format!(
            "{} breaking change(s) detected that may break existing code",
            breaking_count
        ));
    }

    if warning_count > 0 {
        warnings.push(format!(
            "{} warning(s) detected that may require attention",
            warning_count
        ));
    }

    warnings
}

/// A definition as an opaque JSON value for the change record.
fn definition_value(variable: &VariableDefinition) -> Value {
    serde_json::to_value(variable).unwrap_or(Value::Null)
}
