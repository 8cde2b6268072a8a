//! Implementation of the `promptforge check` command.
//!
//! Walks a directory tree, validates every prompt file matching the glob
//! against its stamped schema, and summarizes the results.

use crate::cli::CheckArgs;
use crate::document::PromptDocument;
use crate::error::{ForgeError, Result};
use crate::schema;
use globset::Glob;
use std::path::{Path, PathBuf};

/// Execute the `promptforge check` command.
pub fn cmd_check(args: CheckArgs) -> Result<()> {
    let matcher = Glob::new(&args.glob)
        .map_err(|e| ForgeError::UserError(format!("invalid glob '{}': {}", args.glob, e)))?
        .compile_matcher();

    let mut files = Vec::new();
    collect_files(&args.dir, &mut files)?;
    files.sort();

    let mut checked = 0u32;
    let mut failures = 0u32;

    for path in &files {
        let relative = path.strip_prefix(&args.dir).unwrap_or(path);
        if !matcher.is_match(relative) {
            continue;
        }
        checked += 1;

        match PromptDocument::load(path) {
            Err(err) => {
                failures += 1;
                println!("FAIL {}: {}", path.display(), err);
            }
            Ok(document) => {
                let result = schema::validate_prompt_against_schema(&document);
                if result.is_valid {
                    println!("ok   {}", path.display());
                } else {
                    failures += 1;
                    println!(
                        "FAIL {}: {} schema change(s), compatibility score {}/100",
                        path.display(),
                        result.breaking_changes.len(),
                        result.compatibility_score
                    );
                }
            }
        }
    }

    println!();
    if checked == 0 {
        println!(
            "No prompt files matching '{}' under {}",
            args.glob,
            args.dir.display()
        );
        return Ok(());
    }

    println!("{} file(s) checked, {} failure(s)", checked, failures);

    if failures > 0 {
        Err(ForgeError::ValidationError(format!(
            "{} of {} prompt file(s) failed validation",
            failures, checked
        )))
    } else {
        Ok(())
    }
}

/// Recursively collect files under a directory, skipping dot-directories.
fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        ForgeError::UserError(format!("failed to read directory '{}': {}", dir.display(), e))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            ForgeError::UserError(format!(
                "failed to read directory entry under '{}': {}",
                dir.display(),
                e
            ))
        })?;
        let path = entry.path();

        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden {
            continue;
        }

        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }

    Ok(())
}
