//! # ripplespread
//!
//! Fuzzy multi-objective Pareto path search by ripple spreading.
//!
//! A deterministic, discrete-time simulation over a directed graph whose
//! edges carry crisp and fuzzy costs:
//! - Ripples expand from the source at a calibrated speed
//! - A ripple crossing a node proposes a candidate path there
//! - Candidates survive only if no batch peer and no earlier ripple at the
//!   node dominates them
//!
//! Every ripple ever accepted at a node is part of the result, so each
//! node ends up with its set of non-dominated source paths.
//!
//! ## Example
//!
//! ```rust
//! use ripplespread::prelude::*;
//!
//! let mut graph = Graph::new(3, ObjectiveLayout::crisp_only(2)).unwrap();
//! graph.add_edge(0, 1, EdgeWeight::crisp(vec![1.0, 4.0])).unwrap();
//! graph.add_edge(1, 2, EdgeWeight::crisp(vec![1.0, 4.0])).unwrap();
//! graph.add_edge(0, 2, EdgeWeight::crisp(vec![3.0, 1.0])).unwrap();
//!
//! let result = ripplespread::run(&graph, 0).unwrap();
//! assert_eq!(result.for_node(2).len(), 2);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::imprecise_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
    clippy::needless_range_loop,
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod graph;
pub mod objective;
pub mod pareto;
pub mod result;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{RunConfig, RunConfigBuilder};
    pub use crate::engine::{RippleEngine, SpeedCalibration, StepReport};
    pub use crate::error::{RippleError, RippleResult};
    pub use crate::fuzzy::{ClosedFormMetric, FuzzyMetric, FuzzyNumber, FuzzyShape};
    pub use crate::graph::{Graph, GraphInstance, NodeId};
    pub use crate::objective::{EdgeWeight, ObjectiveLayout, ObjectiveVector};
    pub use crate::pareto::{DominanceComparator, DuplicatePolicy, ParetoFilter};
    pub use crate::result::{PathRecord, RunResult};
}

/// Re-export for public API
pub use engine::run;
pub use error::{RippleError, RippleResult};
