//! Implementation of the `promptforge stamp` command.
//!
//! Re-stamps a prompt with a fresh schema snapshot and saves it atomically.
//! Changes against the previous snapshot are recorded inside the new one,
//! so the file itself carries its migration history forward.

use crate::cli::StampArgs;
use crate::document::PromptDocument;
use crate::error::Result;
use crate::schema;

/// Execute the `promptforge stamp` command.
pub fn cmd_stamp(args: StampArgs) -> Result<()> {
    let document = PromptDocument::load(&args.file)?;
    let previous = document.variable_schema.clone();

    let stamped = schema::update_prompt_schema(document, previous.as_ref());
    stamped.save(&args.file)?;

    println!("Stamped {}", args.file.display());

    if let Some(snapshot) = &stamped.variable_schema {
        println!("  Version:   {}", snapshot.version);
        println!("  Checksum:  {}", snapshot.checksum);
        println!("  Variables: {}", snapshot.variables.len());

        match &snapshot.breaking_changes {
            Some(changes) => {
                println!();
                println!("Changes since previous stamp ({}):", changes.len());
                for change in changes {
                    println!(
                        "  [{}] {} '{}'",
                        change.impact, change.kind, change.variable_name
                    );
                }
            }
            None if previous.is_some() => {
                println!("  No changes since previous stamp.");
            }
            None => {}
        }
    }

    Ok(())
}
