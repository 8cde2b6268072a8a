//! Implementation of the `promptforge validate` command.
//!
//! Prints a schema validation report and maps an invalid result to exit
//! code 2. The command only reports; it never rewrites the prompt file.

use crate::cli::ValidateArgs;
use crate::document::PromptDocument;
use crate::error::{ForgeError, Result};
use crate::schema::{self, SchemaValidationResult};

/// Execute the `promptforge validate` command.
pub fn cmd_validate(args: ValidateArgs) -> Result<()> {
    let document = PromptDocument::load(&args.file)?;

    let (result, failure_summary) = match &args.against {
        Some(old_path) => {
            let old_document = PromptDocument::load(old_path)?;
            let result = schema::validate_schema_change(&old_document, &document);
            (result, "schema change is not backward compatible")
        }
        None => {
            let result = schema::validate_prompt_against_schema(&document);
            (result, "prompt does not match its stamped schema")
        }
    };

    print_result(&result);

    if result.is_valid {
        Ok(())
    } else {
        Err(ForgeError::ValidationError(failure_summary.to_string()))
    }
}

fn print_result(result: &SchemaValidationResult) {
    println!(
        "Validation:          {}",
        if result.is_valid { "PASS" } else { "FAIL" }
    );
    println!("Compatibility score: {}/100", result.compatibility_score);
    println!(
        "Migration required:  {}",
        if result.migration_required { "yes" } else { "no" }
    );

    if !result.breaking_changes.is_empty() {
        println!();
        println!("Changes ({}):", result.breaking_changes.len());
        for change in &result.breaking_changes {
            let note = change.migration_note.as_deref().unwrap_or("");
            println!(
                "  [{}] {} '{}': {}",
                change.impact, change.kind, change.variable_name, note
            );
        }
    }

    if !result.warnings.is_empty() {
        println!();
        for warning in &result.warnings {
            println!("Warning: {}", warning);
        }
    }
}
