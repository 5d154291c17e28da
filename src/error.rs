//! Error types for ripplespread.
//!
//! Every fallible operation returns `Result<T, RippleError>` instead of
//! panicking. Graph errors are raised before the first simulation step;
//! the simulation loop itself only fails through guard violations.

use thiserror::Error;

use crate::fuzzy::FuzzyShape;

/// Result type alias for ripplespread operations.
pub type RippleResult<T> = Result<T, RippleError>;

/// Unified error type for all ripplespread operations.
#[derive(Debug, Error)]
pub enum RippleError {
    // ===== Malformed Graph =====
    /// Edge endpoint or source outside `[0, node_count)`.
    #[error("Graph: node {node} out of range (node count {node_count})")]
    NodeOutOfRange {
        /// Offending node id.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },

    /// Declared node count above the supported maximum.
    #[error("Graph: {nodes} nodes exceeds the limit of {limit}")]
    TooManyNodes {
        /// Declared node count.
        nodes: usize,
        /// Maximum node count.
        limit: usize,
    },

    /// A second edge between the same ordered node pair.
    #[error("Graph: parallel edge {from} -> {to}")]
    ParallelEdge {
        /// Tail node.
        from: usize,
        /// Head node.
        to: usize,
    },

    /// Crisp vector length differs from the graph layout.
    #[error("Graph: edge {from} -> {to} has {got} crisp weights, expected {expected}")]
    CrispLengthMismatch {
        /// Tail node.
        from: usize,
        /// Head node.
        to: usize,
        /// Layout crisp count.
        expected: usize,
        /// Observed crisp count.
        got: usize,
    },

    /// Fuzzy vector length differs from the graph layout.
    #[error("Graph: edge {from} -> {to} has {got} fuzzy weights, expected {expected}")]
    FuzzyLengthMismatch {
        /// Tail node.
        from: usize,
        /// Head node.
        to: usize,
        /// Layout fuzzy count.
        expected: usize,
        /// Observed fuzzy count.
        got: usize,
    },

    /// Fuzzy number shape differs from the graph layout.
    #[error("Graph: edge {from} -> {to} carries a {got} fuzzy weight, expected {expected}")]
    ShapeMismatch {
        /// Tail node.
        from: usize,
        /// Head node.
        to: usize,
        /// Layout shape.
        expected: FuzzyShape,
        /// Observed shape.
        got: FuzzyShape,
    },

    /// Negative crisp weight or fuzzy parameter.
    #[error("Graph: edge {from} -> {to} has negative weight {value}")]
    NegativeWeight {
        /// Tail node.
        from: usize,
        /// Head node.
        to: usize,
        /// Offending value.
        value: f64,
    },

    /// NaN or infinite crisp weight or fuzzy parameter.
    #[error("Graph: edge {from} -> {to} has non-finite weight")]
    NonFiniteWeight {
        /// Tail node.
        from: usize,
        /// Head node.
        to: usize,
    },

    /// Fuzzy parameters are not non-decreasing.
    #[error("Graph: edge {from} -> {to} fuzzy weight {index} has decreasing parameters")]
    NonMonotoneFuzzy {
        /// Tail node.
        from: usize,
        /// Head node.
        to: usize,
        /// Index of the fuzzy dimension.
        index: usize,
    },

    /// Layout declares no crisp dimension.
    #[error("Graph: at least one crisp dimension is required")]
    NoCrispDimension,

    /// Every crisp dimension contains a zero weight, so no speed can be calibrated.
    #[error("Graph: crisp dimension {dimension} contains a zero weight; cannot calibrate spread speed")]
    ZeroSpreadLength {
        /// Dimension that would have been chosen.
        dimension: usize,
    },

    /// Fuzzy number given with a parameter count other than 3 or 4.
    #[error("Fuzzy number must have 3 or 4 parameters, got {got}")]
    InvalidFuzzyArity {
        /// Observed parameter count.
        got: usize,
    },

    // ===== Guard Violations =====
    /// NaN or Inf appeared in ripple state.
    #[error("Guard: non-finite value detected at {location}")]
    NonFiniteValue {
        /// Where the value was found.
        location: String,
    },

    /// Simulation exceeded the configured step budget.
    #[error("Guard: step budget exhausted after {steps} steps (limit {limit})")]
    StepBudgetExceeded {
        /// Steps executed.
        steps: u64,
        /// Configured limit.
        limit: u64,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RippleError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error describes an unusable graph.
    #[must_use]
    pub const fn is_malformed_graph(&self) -> bool {
        matches!(
            self,
            Self::NodeOutOfRange { .. }
                | Self::TooManyNodes { .. }
                | Self::ParallelEdge { .. }
                | Self::CrispLengthMismatch { .. }
                | Self::FuzzyLengthMismatch { .. }
                | Self::ShapeMismatch { .. }
                | Self::NegativeWeight { .. }
                | Self::NonFiniteWeight { .. }
                | Self::NonMonotoneFuzzy { .. }
                | Self::NoCrispDimension
                | Self::ZeroSpreadLength { .. }
                | Self::InvalidFuzzyArity { .. }
        )
    }

    /// Check if this error was raised by the runtime guard.
    #[must_use]
    pub const fn is_guard_violation(&self) -> bool {
        matches!(
            self,
            Self::NonFiniteValue { .. } | Self::StepBudgetExceeded { .. }
        )
    }
}
