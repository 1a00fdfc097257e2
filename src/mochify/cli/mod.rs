//! # CLI Layer
//!
//! This module is **one possible client** for mochify. It is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Installs the log subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `setup`: clap definitions
//! - `commands`: `run()` and the per-command handlers
//! - `prompt`: the interactive folder prompt
//! - `print`: output formatting

mod commands;
mod print;
mod prompt;
mod setup;

pub use commands::run;
