//! CLI module for ripplespread.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested. The
//! entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, OutputFormat};
pub use commands::{execute, inspect, run_cli, run_instance, validate_instance};
pub use output::{
    print_error, print_help, print_version, render_instance_summary, render_result,
    version_string,
};

#[cfg(test)]
mod tests;
