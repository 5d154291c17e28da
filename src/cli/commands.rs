//! CLI command handlers.
//!
//! Each handler returns the process exit code; errors are printed with their
//! category and no result is produced.

use std::path::Path;
use std::process::ExitCode;

use tracing::debug;

use super::args::OutputFormat;
use super::output::{print_error, print_help, print_version, render_instance_summary, render_result};
use super::{Args, Command};
use crate::config::RunConfig;
use crate::engine::{RippleEngine, SpeedCalibration};
use crate::error::RippleResult;
use crate::graph::{GraphInstance, NodeId};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            instance_path,
            source,
            node,
            format,
            config_path,
        } => run_instance(&instance_path, source, node, format, config_path.as_deref()),
        Command::Validate { instance_path } => validate_instance(&instance_path),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Run the search on an instance file and print the result.
#[must_use]
pub fn run_instance(
    path: &Path,
    source: Option<NodeId>,
    node: Option<NodeId>,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> ExitCode {
    match execute(path, source, node, format, config_path) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_error(&e);
            ExitCode::from(1)
        }
    }
}

/// Load, run and render without printing.
///
/// # Errors
///
/// Returns the first loading, validation, guard or rendering error.
pub fn execute(
    path: &Path,
    source: Option<NodeId>,
    node: Option<NodeId>,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> RippleResult<String> {
    let config = config_path.map_or_else(|| Ok(RunConfig::default()), RunConfig::load)?;
    let mut instance = GraphInstance::from_yaml_file(path)?;
    if let Some(source) = source {
        instance.source = source;
    }
    debug!(instance = %instance.meta.id, source = instance.source, %format, "loaded instance");

    let graph = instance.to_graph()?;
    let result = RippleEngine::new(&graph, instance.source, &config)?.run()?;
    render_result(&result, node, format)
}

/// Validate an instance file and print its summary.
#[must_use]
pub fn validate_instance(path: &Path) -> ExitCode {
    match inspect(path) {
        Ok(summary) => {
            print!("{summary}");
            println!("\u{2713} Instance is valid");
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_error(&e);
            ExitCode::from(1)
        }
    }
}

/// Load, validate and calibrate an instance, returning its summary.
///
/// # Errors
///
/// Returns the first loading or malformed-graph error.
pub fn inspect(path: &Path) -> RippleResult<String> {
    let instance = GraphInstance::from_yaml_file(path)?;
    let graph = instance.to_graph()?;
    let calibration = SpeedCalibration::calibrate(&graph.neighbor_index())?;
    Ok(render_instance_summary(&instance, &graph, &calibration))
}
