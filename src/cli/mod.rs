//! CLI module for radshield.
//!
//! All CLI logic lives here rather than in main.rs so the argument
//! parser and command handlers are testable. The entry point `run_cli`
//! is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::run_cli;
pub use output::{print_help, print_shielding_report, print_version};
