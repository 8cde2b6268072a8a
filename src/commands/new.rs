//! Implementation of the `promptforge new` command.
//!
//! Scaffolds a starter prompt file from a category and structure preset.

use crate::cli::NewArgs;
use crate::error::{ForgeError, Result};
use crate::scaffold::{slug_from_title, starter_document};

/// Execute the `promptforge new` command.
pub fn cmd_new(args: NewArgs) -> Result<()> {
    let slug = slug_from_title(&args.title);
    if slug.is_empty() {
        return Err(ForgeError::UserError(
            "title must contain at least one alphanumeric character".to_string(),
        ));
    }

    let path = args.dir.join(format!("{}.prompt.json", slug));
    if path.exists() {
        return Err(ForgeError::UserError(format!(
            "'{}' already exists.\n\n\
             Pick a different title or remove the existing file first.",
            path.display()
        )));
    }

    let document = starter_document(
        &args.title,
        args.description.as_deref(),
        args.category,
        args.preset,
    );
    document.save(&path)?;

    println!("Created prompt file: {}", path.display());
    println!();
    println!("Stamp its variable schema once you're done editing:");
    println!("  promptforge stamp {}", path.display());

    Ok(())
}
