//! Implementation of the `promptforge vars` command.
//!
//! Lists the canonical variable set a prompt expects, so callers know what
//! bindings to provide before compiling.

use crate::cli::VarsArgs;
use crate::document::PromptDocument;
use crate::error::Result;
use crate::schema;

/// Execute the `promptforge vars` command.
pub fn cmd_vars(args: VarsArgs) -> Result<()> {
    let document = PromptDocument::load(&args.file)?;
    let variables = schema::extract_variables(&document);

    if variables.is_empty() {
        println!("No variables: the template has no placeholders and none are declared.");
        return Ok(());
    }

    println!(
        "{:<24} {:<8} {:<9} {}",
        "NAME", "TYPE", "REQUIRED", "DESCRIPTION"
    );
    for variable in &variables {
        println!(
            "{:<24} {:<8} {:<9} {}",
            variable.name,
            variable.kind.to_string(),
            if variable.required { "yes" } else { "no" },
            variable.description.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
