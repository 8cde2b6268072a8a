//! Command implementations for promptforge.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Commands own all file I/O and reporting; the core
//! modules they call (`template`, `schema`, `compiler`) are pure transforms.

mod check;
mod compile;
mod new;
mod report;
mod show;
mod stamp;
mod validate;
mod vars;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::New(args) => new::cmd_new(args),
        Command::Show(args) => show::cmd_show(args),
        Command::Vars(args) => vars::cmd_vars(args),
        Command::Compile(args) => compile::cmd_compile(args),
        Command::Validate(args) => validate::cmd_validate(args),
        Command::Stamp(args) => stamp::cmd_stamp(args),
        Command::Check(args) => check::cmd_check(args),
        Command::Report(args) => report::cmd_report(args),
    }
}
