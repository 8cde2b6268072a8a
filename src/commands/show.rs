//! Implementation of the `promptforge show` command.
//!
//! Displays a summary of a prompt file's content and schema stamp.

use crate::cli::ShowArgs;
use crate::document::PromptDocument;
use crate::error::Result;
use crate::schema;

/// Execute the `promptforge show` command.
pub fn cmd_show(args: ShowArgs) -> Result<()> {
    let document = PromptDocument::load(&args.file)?;

    println!("================================================================================");
    println!("{}", document.title);
    println!("================================================================================");
    println!();

    if let Some(description) = &document.description {
        println!("Description: {}", description);
    }

    if let Some(metadata) = &document.metadata {
        if let Some(author) = &metadata.author {
            println!("Author:      {}", author);
        }
        if let Some(version) = &metadata.version {
            println!("Version:     {}", version);
        }
        if let Some(created) = metadata.created {
            println!("Created:     {}", created.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        if !metadata.tags.is_empty() {
            println!("Tags:        {}", metadata.tags.join(", "));
        }
    }

    if let Some(models) = &document.models
        && !models.is_empty()
    {
        println!("Models:      {}", models.join(", "));
    }

    println!();
    println!("Structure:");
    println!("  Persona:           {}", document.prompt.persona.role);
    println!("  Instructions:      {}", document.prompt.instructions.len());
    if let Some(steps) = &document.prompt.chain_of_thought {
        println!("  Thinking steps:    {}", steps.len());
    }
    if let Some(examples) = &document.prompt.few_shot_examples {
        println!("  Few-shot examples: {}", examples.len());
    }
    if let Some(output_format) = &document.prompt.output_format
        && let Some(format) = output_format.format
    {
        println!("  Output format:     {}", format);
    }
    if let Some(constraints) = &document.prompt.constraints {
        println!("  Constraints:       {}", constraints.len());
    }

    let variables = schema::extract_variables(&document);
    println!();
    println!("Variables ({}):", variables.len());
    for variable in &variables {
        let marker = if variable.required { "required" } else { "optional" };
        println!("  - {} ({}, {})", variable.name, variable.kind, marker);
    }

    if let Some(cases) = &document.test_cases
        && !cases.is_empty()
    {
        println!();
        println!("Test cases:");
        for case in cases {
            println!("  - {}", case.name);
        }
    }

    println!();
    match &document.variable_schema {
        Some(stamp) => {
            println!("Schema stamp:");
            println!("  Version:  {}", stamp.version);
            println!("  Checksum: {}", stamp.checksum);
            println!("  Stamped:  {}", stamp.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
            if let Some(changes) = &stamp.breaking_changes {
                println!("  Recorded changes: {}", changes.len());
            }
        }
        None => {
            println!("Schema stamp: none (run `promptforge stamp` to add one)");
        }
    }

    Ok(())
}
