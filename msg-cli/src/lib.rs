//! # msg-cli
//!
//! Command-line caller of the message service: argument parsing, config loading and
//! command execution. Output formatting lives here so it can be tested without a process.

pub mod cli;

pub use cli::{execute, load_config, Cli, Commands, Outcome};
