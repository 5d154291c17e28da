//! CLI output formatting.
//!
//! Rendering returns strings so it can be tested; the command handlers print.

use std::fmt::Write as _;

use super::args::OutputFormat;
use crate::engine::SpeedCalibration;
use crate::error::{RippleError, RippleResult};
use crate::fuzzy::{ClosedFormMetric, FuzzyNumber};
use crate::graph::{Graph, GraphInstance, NodeId};
use crate::result::{PathRecord, RunResult};

/// Print version information.
pub fn print_version() {
    println!("{}", version_string());
}

/// Version line, with the git revision when it was available at build time.
#[must_use]
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("RIPPLESPREAD_GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("ripplespread {version} ({hash})"),
        _ => format!("ripplespread {version}"),
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"ripplespread - Fuzzy multi-objective Pareto paths by ripple spreading

USAGE:
    ripplespread <COMMAND> [OPTIONS]

COMMANDS:
    run <instance.yaml>         Run the search from the instance source
        --source <N>            Override the source node
        --node <N>              Only show paths to node N
        --format <F>            text (default), json or yaml
        --config <run.yaml>     Run configuration (duplicates, guard)

    validate <instance.yaml>    Check an instance without running it

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    ripplespread run instances/rsa_12_node.yaml
    ripplespread run instances/rsa_12_node.yaml --node 11 --format json
    ripplespread validate instances/rsa_12_node.yaml

Set RUST_LOG=debug to trace the simulation."
    );
}

/// Render a run result, optionally restricted to one node.
///
/// # Errors
///
/// Returns `NodeOutOfRange` for an unknown `node`, or a serialization error.
pub fn render_result(
    result: &RunResult,
    node: Option<NodeId>,
    format: OutputFormat,
) -> RippleResult<String> {
    if let Some(n) = node {
        if n >= result.node_count() {
            return Err(RippleError::NodeOutOfRange {
                node: n,
                node_count: result.node_count(),
            });
        }
    }

    match (format, node) {
        (OutputFormat::Json, None) => result.to_json(),
        (OutputFormat::Yaml, None) => result.to_yaml(),
        (OutputFormat::Json, Some(n)) => serde_json::to_string_pretty(result.for_node(n))
            .map_err(|e| RippleError::serialization(e.to_string())),
        (OutputFormat::Yaml, Some(n)) => Ok(serde_yaml::to_string(result.for_node(n))?),
        (OutputFormat::Text, _) => Ok(render_text(result, node)),
    }
}

fn render_text(result: &RunResult, node: Option<NodeId>) -> String {
    let metric = ClosedFormMetric::new();
    let mut out = String::new();

    let _ = writeln!(out, "Source: {}", result.source);
    let _ = writeln!(out, "Steps:  {}", result.steps);
    let _ = writeln!(out, "Paths:  {}", result.total_paths());

    let nodes: Vec<NodeId> = node.map_or_else(|| (0..result.node_count()).collect(), |n| vec![n]);
    for n in nodes {
        let records = result.for_node(n);
        let _ = writeln!(out, "\nNode {n}: {} path(s)", records.len());
        for record in records {
            let _ = writeln!(out, "  {}", render_record(record, &metric));
        }
    }
    out
}

fn render_record(record: &PathRecord, metric: &ClosedFormMetric) -> String {
    let path = record
        .path
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ");
    let crisp = format_values(&record.objective.crisp);
    let fuzzy = record
        .objective
        .fuzzy
        .iter()
        .map(FuzzyNumber::params)
        .map(format_values)
        .collect::<Vec<_>>()
        .join(" ");
    let graded = format_values(&record.defuzzified(metric));

    if fuzzy.is_empty() {
        format!("{path}  crisp {crisp}")
    } else {
        format!("{path}  crisp {crisp}  fuzzy {fuzzy}  graded {graded}")
    }
}

fn format_values(values: &[f64]) -> String {
    let inner = values
        .iter()
        .map(|v| format!("{v}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}

/// Render the summary printed by `validate`.
#[must_use]
pub fn render_instance_summary(
    instance: &GraphInstance,
    graph: &Graph,
    calibration: &SpeedCalibration,
) -> String {
    let layout = graph.layout();
    let mut out = String::new();
    let _ = writeln!(out, "Instance:  {}", instance.meta.id);
    if !instance.meta.description.is_empty() {
        let _ = writeln!(out, "           {}", instance.meta.description);
    }
    let _ = writeln!(out, "Nodes:     {}", graph.node_count());
    let _ = writeln!(out, "Edges:     {}", graph.edge_count());
    let _ = writeln!(out, "Source:    {}", instance.source);
    let _ = writeln!(
        out,
        "Layout:    {} crisp, {} fuzzy ({})",
        layout.crisp, layout.fuzzy, layout.shape
    );
    let _ = writeln!(
        out,
        "Spreading: dimension {} at speed {}",
        calibration.dimension(),
        calibration.speed()
    );
    let _ = writeln!(
        out,
        "Bound:     {} steps",
        calibration.step_bound(graph.node_count())
    );
    out
}

/// Print an error with its category.
pub fn print_error(error: &RippleError) {
    let kind = if error.is_malformed_graph() {
        "malformed graph"
    } else if error.is_guard_violation() {
        "guard violation"
    } else {
        "error"
    };
    eprintln!("Error ({kind}): {error}");
}
