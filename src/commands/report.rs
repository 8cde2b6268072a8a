//! Implementation of the `promptforge report` command.
//!
//! Renders an evaluation session JSON (produced by whatever host ran the
//! model calls) into a markdown report.

use crate::cli::ReportArgs;
use crate::error::{ForgeError, Result};
use crate::eval::{EvaluationSession, format_session};

/// Execute the `promptforge report` command.
pub fn cmd_report(args: ReportArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.session).map_err(|e| {
        ForgeError::UserError(format!(
            "failed to read session file '{}': {}",
            args.session.display(),
            e
        ))
    })?;

    let session = EvaluationSession::parse(&content)?;
    let markdown = format_session(&session);

    match &args.output {
        Some(path) => {
            crate::fs::atomic_write_file(path, &markdown)?;
            println!("Wrote report to {}", path.display());
        }
        None => println!("{}", markdown),
    }

    Ok(())
}
