//! ripplespread CLI
//!
//! Command-line interface for the ripple-spreading path search.

use std::process::ExitCode;

use ripplespread::cli::{run_cli, Args};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    run_cli(Args::parse())
}
