//! Canonical variable extraction and checksumming.

use crate::document::{PromptDocument, VariableDefinition, VariableType};
use crate::template;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Build the canonical variable set of a document.
///
/// Starts from the author-declared variables, then synthesizes a definition
/// for every template variable that was not declared: type `string`,
/// required, description "Auto-detected from template". Declared entries are
/// never overridden by auto-detected ones of the same name.
///
/// The result is sorted by name ascending. The function is idempotent, and
/// its output does not depend on the order of `variables` in the source
/// document; the checksum and the diffing logic rely on both properties.
pub fn extract_variables(document: &PromptDocument) -> Vec<VariableDefinition> {
    let mut merged: BTreeMap<String, VariableDefinition> = BTreeMap::new();

    // Declared variables first; on duplicate names the first declaration wins.
    if let Some(declared) = &document.variables {
        for variable in declared {
            merged
                .entry(variable.name.clone())
                .or_insert_with(|| variable.clone());
        }
    }

    // Template variables fill in anything not declared.
    for name in template::extract_variables(&document.user_input_template) {
        merged
            .entry(name.clone())
            .or_insert_with(|| auto_detected(name));
    }

    // BTreeMap iteration gives the name-ascending order the schema invariant
    // requires.
    merged.into_values().collect()
}

/// Definition synthesized for a template variable with no declaration.
fn auto_detected(name: String) -> VariableDefinition {
    VariableDefinition {
        name,
        kind: VariableType::String,
        required: true,
        description: Some("Auto-detected from template".to_string()),
        default: None,
    }
}

/// Content checksum of a variable set.
///
/// Computed over the sorted `name:type:required` triples only; description
/// and default are deliberately excluded so cosmetic edits do not change
/// the checksum. Deterministic and independent of input ordering.
pub fn checksum(variables: &[VariableDefinition]) -> String {
    let mut triples: Vec<String> = variables
        .iter()
        .map(|v| format!("{}:{}:{}", v.name, v.kind, v.required))
        .collect();
    triples.sort();

    let digest = Sha256::digest(triples.join("|").as_bytes());

    // First 8 bytes as lowercase hex: a 16-char content fingerprint.
    let mut out = String::with_capacity(16);
    for byte in digest.iter().take(8) {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}
