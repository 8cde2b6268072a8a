//! Filesystem utilities for promptforge.
//!
//! Prompt documents are durable state; every save goes through an atomic
//! write so a crash mid-save never leaves a half-written `*.prompt.json`.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
