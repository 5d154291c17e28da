//! CLI argument parsing.
//!
//! Hand-rolled parser over any iterator of strings so parsing can be tested
//! without touching `std::env`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::graph::NodeId;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Result rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table per node.
    #[default]
    Text,
    /// Pretty JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(format!("unknown format '{other}' (expected text, json or yaml)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Yaml => "yaml",
        };
        f.write_str(name)
    }
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the ripple-spreading search on a graph instance
    Run {
        /// Path to the instance YAML file.
        instance_path: PathBuf,
        /// Source override; the instance's source otherwise.
        source: Option<NodeId>,
        /// Restrict output to one node.
        node: Option<NodeId>,
        /// Output format.
        format: OutputFormat,
        /// Optional run configuration YAML.
        config_path: Option<PathBuf>,
    },
    /// Validate a graph instance without running it
    Validate {
        /// Path to the instance YAML file.
        instance_path: PathBuf,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(args),
            "validate" => Self::parse_validate_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    fn parse_run_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'run' command requires an instance path");
            return Command::Help;
        }

        let mut source = None;
        let mut node = None;
        let mut format = OutputFormat::default();
        let mut config_path = None;

        let mut i = 3;
        while i < args.len() {
            let value = args.get(i + 1);
            match (args[i].as_str(), value) {
                ("--source", Some(v)) => {
                    match v.parse() {
                        Ok(n) => source = Some(n),
                        Err(_) => eprintln!("Warning: ignoring invalid --source '{v}'"),
                    }
                    i += 2;
                }
                ("--node", Some(v)) => {
                    match v.parse() {
                        Ok(n) => node = Some(n),
                        Err(_) => eprintln!("Warning: ignoring invalid --node '{v}'"),
                    }
                    i += 2;
                }
                ("--format", Some(v)) => {
                    match v.parse() {
                        Ok(f) => format = f,
                        Err(e) => eprintln!("Warning: {e}"),
                    }
                    i += 2;
                }
                ("--config", Some(v)) => {
                    config_path = Some(PathBuf::from(v));
                    i += 2;
                }
                _ => i += 1,
            }
        }

        Command::Run {
            instance_path: PathBuf::from(&args[2]),
            source,
            node,
            format,
            config_path,
        }
    }

    fn parse_validate_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'validate' command requires an instance path");
            return Command::Help;
        }

        Command::Validate {
            instance_path: PathBuf::from(&args[2]),
        }
    }
}
