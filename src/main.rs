//! Main entry point for the `promptforge` CLI.
//!
//! Parses arguments, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

use promptforge::cli::Cli;
use promptforge::{commands, exit_codes};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
