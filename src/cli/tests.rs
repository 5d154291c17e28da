//! CLI module tests.

#![allow(clippy::unwrap_used, clippy::panic)]

use super::args::{Args, Command, OutputFormat};
use super::commands::{execute, inspect, run_cli};
use super::output::{render_result, version_string};
use crate::error::RippleError;
use crate::result::{PathRecord, RunResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const TRIANGLE: &str = r"
meta:
  id: RSA-CLI-TEST
  description: two routes to node 2
source: 0
nodes: 3
edges:
  - { from: 0, to: 1, crisp: [1, 4], fuzzy: [[1, 2, 3]] }
  - { from: 1, to: 2, crisp: [1, 4], fuzzy: [[1, 2, 3]] }
  - { from: 0, to: 2, crisp: [3, 1], fuzzy: [[2, 2, 2]] }
";

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn run_args(path: &Path) -> Vec<String> {
    vec![
        "ripplespread".to_string(),
        "run".to_string(),
        path.display().to_string(),
    ]
}

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_no_args_shows_help() {
    let args = Args::parse_from(["ripplespread"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_help_variants() {
    for flag in ["-h", "--help", "help"] {
        let args = Args::parse_from(["ripplespread", flag]);
        assert_eq!(args.command, Command::Help);
    }
}

#[test]
fn test_parse_version_variants() {
    for flag in ["-V", "--version", "version"] {
        let args = Args::parse_from(["ripplespread", flag]);
        assert_eq!(args.command, Command::Version);
    }
}

#[test]
fn test_parse_unknown_command() {
    let args = Args::parse_from(["ripplespread", "spread-harder"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_run_defaults() {
    let args = Args::parse_from(["ripplespread", "run", "net.yaml"]);
    assert_eq!(
        args.command,
        Command::Run {
            instance_path: PathBuf::from("net.yaml"),
            source: None,
            node: None,
            format: OutputFormat::Text,
            config_path: None,
        }
    );
}

#[test]
fn test_parse_run_all_options() {
    let args = Args::parse_from([
        "ripplespread",
        "run",
        "net.yaml",
        "--source",
        "3",
        "--node",
        "11",
        "--format",
        "json",
        "--config",
        "run.yaml",
    ]);
    assert_eq!(
        args.command,
        Command::Run {
            instance_path: PathBuf::from("net.yaml"),
            source: Some(3),
            node: Some(11),
            format: OutputFormat::Json,
            config_path: Some(PathBuf::from("run.yaml")),
        }
    );
}

#[test]
fn test_parse_run_ignores_invalid_values() {
    let args = Args::parse_from([
        "ripplespread",
        "run",
        "net.yaml",
        "--source",
        "zero",
        "--format",
        "xml",
        "--node",
    ]);
    match args.command {
        Command::Run {
            source,
            node,
            format,
            ..
        } => {
            assert_eq!(source, None);
            assert_eq!(node, None);
            assert_eq!(format, OutputFormat::Text);
        }
        other => panic!("expected run, got {other:?}"),
    }
}

#[test]
fn test_parse_run_missing_path() {
    let args = Args::parse_from(["ripplespread", "run"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_validate() {
    let args = Args::parse_from(["ripplespread", "validate", "net.yaml"]);
    assert_eq!(
        args.command,
        Command::Validate {
            instance_path: PathBuf::from("net.yaml"),
        }
    );
    let args = Args::parse_from(["ripplespread", "validate"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_output_format_parse_and_display() {
    for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Yaml] {
        assert_eq!(format.to_string().parse::<OutputFormat>(), Ok(format));
    }
    assert!("csv".parse::<OutputFormat>().is_err());
}

// ============================================================================
// Command tests
// ============================================================================

#[test]
fn test_execute_text() {
    let file = write_temp(TRIANGLE);
    let out = execute(file.path(), None, None, OutputFormat::Text, None).unwrap();
    assert!(out.contains("Source: 0"));
    assert!(out.contains("Node 2: 2 path(s)"));
    assert!(out.contains("0 -> 1 -> 2"));
    assert!(out.contains("graded"));
}

#[test]
fn test_execute_json_single_node() {
    let file = write_temp(TRIANGLE);
    let out = execute(file.path(), None, Some(2), OutputFormat::Json, None).unwrap();
    let records: Vec<PathRecord> = serde_json::from_str(&out).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.path.first() == Some(&0)));
    assert!(records.iter().all(|r| r.target() == Some(2)));
}

#[test]
fn test_execute_yaml_full_result() {
    let file = write_temp(TRIANGLE);
    let out = execute(file.path(), None, None, OutputFormat::Yaml, None).unwrap();
    let result: RunResult = serde_yaml::from_str(&out).unwrap();
    assert_eq!(result.node_count(), 3);
    assert_eq!(result.source, 0);
}

#[test]
fn test_execute_source_override() {
    let file = write_temp(TRIANGLE);
    let out = execute(file.path(), Some(1), None, OutputFormat::Json, None).unwrap();
    let result: RunResult = serde_json::from_str(&out).unwrap();
    assert_eq!(result.source, 1);
    assert!(result.for_node(0).is_empty());
    assert_eq!(result.for_node(2)[0].path, vec![1, 2]);
}

#[test]
fn test_execute_with_config() {
    let file = write_temp(TRIANGLE);
    let config = write_temp("guard:\n  max_steps: 1\n");
    let err = execute(
        file.path(),
        None,
        None,
        OutputFormat::Text,
        Some(config.path()),
    )
    .unwrap_err();
    assert!(err.is_guard_violation());
}

#[test]
fn test_execute_bad_config() {
    let file = write_temp(TRIANGLE);
    let config = write_temp("max_ripples: 3\n");
    let err = execute(
        file.path(),
        None,
        None,
        OutputFormat::Text,
        Some(config.path()),
    )
    .unwrap_err();
    assert!(matches!(err, RippleError::YamlParse(_)));
}

#[test]
fn test_execute_unknown_node() {
    let file = write_temp(TRIANGLE);
    let err = execute(file.path(), None, Some(7), OutputFormat::Text, None).unwrap_err();
    assert!(matches!(err, RippleError::NodeOutOfRange { node: 7, .. }));
}

#[test]
fn test_execute_malformed_graph() {
    let file = write_temp(
        "nodes: 2\nedges:\n  - { from: 0, to: 1, crisp: [-1] }\n",
    );
    let err = execute(file.path(), None, None, OutputFormat::Text, None).unwrap_err();
    assert!(err.is_malformed_graph());
}

#[test]
fn test_execute_missing_file() {
    let err = execute(
        Path::new("/nonexistent/instance.yaml"),
        None,
        None,
        OutputFormat::Text,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, RippleError::Io(_)));
}

#[test]
fn test_inspect_summary() {
    let file = write_temp(TRIANGLE);
    let summary = inspect(file.path()).unwrap();
    assert!(summary.contains("RSA-CLI-TEST"));
    assert!(summary.contains("Edges:     3"));
    assert!(summary.contains("2 crisp, 1 fuzzy (triangular)"));
    assert!(summary.contains("Spreading: dimension 0 at speed 1"));
}

#[test]
fn test_run_cli_exit_codes() {
    let good = write_temp(TRIANGLE);
    let bad = write_temp("nodes: 1\nsource: 4\n");

    assert_eq!(run_cli(Args::parse_from(run_args(good.path()))), ExitCode::SUCCESS);
    assert_eq!(run_cli(Args::parse_from(run_args(bad.path()))), ExitCode::from(1));
    assert_eq!(
        run_cli(Args::parse_from([
            "ripplespread".to_string(),
            "validate".to_string(),
            good.path().display().to_string(),
        ])),
        ExitCode::SUCCESS
    );
    assert_eq!(run_cli(Args::parse_from(["ripplespread", "help"])), ExitCode::SUCCESS);
    assert_eq!(run_cli(Args::parse_from(["ripplespread", "version"])), ExitCode::SUCCESS);
}

#[test]
fn test_render_result_empty_node_text() {
    let result = RunResult {
        source: 0,
        steps: 1,
        nodes: vec![Vec::new(), Vec::new()],
    };
    let out = render_result(&result, Some(1), OutputFormat::Text).unwrap();
    assert!(out.contains("Node 1: 0 path(s)"));
    assert!(!out.contains("Node 0:"));
}

#[test]
fn test_version_string() {
    let version = version_string();
    assert!(version.starts_with("ripplespread "));
    assert!(version.contains(env!("CARGO_PKG_VERSION")));
}
