//! Ripple-spreading engine.
//!
//! Implements the discrete-time propagation loop with:
//! - Speed calibration on the least spread crisp dimension
//! - A ripple arena with per-node generation history (Omega)
//! - Arrival batching with deterministic first-arrival ordering
//! - Stop-on-error guards for non-finite values and step budgets
//!
//! Each step grows every active ripple by the calibrated speed. A ripple whose
//! wavefront crosses an unvisited neighbor during the step proposes a
//! candidate there; candidates reaching the same node are filtered together
//! and the survivors become new ripples.

pub mod arrivals;
pub mod calibrate;
pub mod clock;
pub mod guard;
pub mod state;

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

pub use arrivals::ArrivalBuffer;
pub use calibrate::SpeedCalibration;
pub use clock::StepClock;
pub use guard::{GuardConfig, RippleGuard};
pub use state::{Candidate, Ripple, RippleId, RippleRegistry};

use crate::config::RunConfig;
use crate::error::RippleResult;
use crate::fuzzy::{ClosedFormMetric, FuzzyMetric};
use crate::graph::{Graph, NeighborIndex, NodeId};
use crate::objective::ObjectiveVector;
use crate::pareto::{DominanceComparator, HasObjective, ParetoFilter};
use crate::result::RunResult;

/// Summary of one time step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Time after the step.
    pub time: u64,
    /// Ripples whose radius grew.
    pub advanced: usize,
    /// Candidates produced by wavefront crossings.
    pub candidates: usize,
    /// Candidates accepted as new ripples.
    pub accepted: usize,
    /// Ripples that became inactive.
    pub deactivated: usize,
}

/// Ripple-spreading engine over a borrowed graph.
///
/// Owns all ripple state for the duration of a run.
#[derive(Debug)]
pub struct RippleEngine<'g, M = ClosedFormMetric> {
    graph: &'g Graph,
    neighbors: NeighborIndex<'g>,
    source: NodeId,
    calibration: SpeedCalibration,
    filter: ParetoFilter<M>,
    registry: RippleRegistry,
    clock: StepClock,
    guard: RippleGuard,
}

impl<'g> RippleEngine<'g, ClosedFormMetric> {
    /// Create an engine using the closed-form fuzzy metric.
    ///
    /// # Errors
    ///
    /// Returns error if `source` is out of range or calibration fails.
    pub fn new(graph: &'g Graph, source: NodeId, config: &RunConfig) -> RippleResult<Self> {
        Self::with_metric(graph, source, config, ClosedFormMetric::new())
    }
}

impl<'g, M: FuzzyMetric> RippleEngine<'g, M> {
    /// Create an engine with a custom fuzzy metric.
    ///
    /// Seeds ripple 0 at `source` with radius 0 and a zero objective.
    ///
    /// # Errors
    ///
    /// Returns error if `source` is out of range or calibration fails.
    pub fn with_metric(
        graph: &'g Graph,
        source: NodeId,
        config: &RunConfig,
        metric: M,
    ) -> RippleResult<Self> {
        graph.check_node(source)?;
        let neighbors = graph.neighbor_index();
        let calibration = SpeedCalibration::calibrate(&neighbors)?;
        let guard = RippleGuard::new(config.guard.clone());
        let clock = guard.clock();

        let mut registry = RippleRegistry::new(graph.node_count());
        registry.spawn(
            source,
            Candidate {
                path: vec![source],
                objective: ObjectiveVector::zero(graph.layout()),
                radius: 0.0,
            },
        );

        Ok(Self {
            graph,
            neighbors,
            source,
            calibration,
            filter: ParetoFilter::new(DominanceComparator::new(metric), config.duplicates),
            registry,
            clock,
            guard,
        })
    }

    /// Perform one time step.
    ///
    /// Ripples spawned during the step are not advanced until the next one.
    ///
    /// # Errors
    ///
    /// Returns a guard violation if the step budget is exceeded or a new
    /// ripple would carry a non-finite value.
    pub fn step(&mut self) -> RippleResult<StepReport> {
        let time = self.clock.tick();
        self.guard.check_clock(&self.clock)?;

        let speed = self.calibration.speed();
        let advancing = self.registry.active().to_vec();
        let mut arrivals = ArrivalBuffer::new();
        let mut exhausted = Vec::new();

        for &id in &advancing {
            let Some(ripple) = self.registry.advance(id, speed) else {
                continue;
            };
            let epicenter = ripple.epicenter();
            let radius = ripple.radius();
            let mut spent = true;

            let lengths = self.calibration.spreads(epicenter);
            for (edge, &length) in self.neighbors.of(epicenter).iter().zip(lengths) {
                if ripple.visits(edge.to) {
                    continue;
                }
                if radius < length {
                    spent = false;
                } else if radius < length + speed {
                    arrivals.push(
                        edge.to,
                        Candidate {
                            path: ripple.extended_path(edge.to),
                            objective: ripple.objective().extended(&edge.weight),
                            radius: radius - length,
                        },
                    );
                }
            }

            if spent {
                exhausted.push(id);
            }
        }

        self.registry.retire(&exhausted);

        let candidates = arrivals.len();
        let mut accepted = 0;
        for (node, batch) in arrivals.into_batches() {
            let survivors = {
                let history = self.registry.history(node);
                self.filter.select(batch, &history)
            };
            for candidate in survivors {
                self.guard.check_candidate(node, &candidate)?;
                self.registry.spawn(node, candidate);
                accepted += 1;
            }
        }

        let report = StepReport {
            time,
            advanced: advancing.len(),
            candidates,
            accepted,
            deactivated: exhausted.len(),
        };
        trace!(
            time,
            advanced = report.advanced,
            candidates,
            accepted,
            deactivated = report.deactivated,
            active = self.registry.active().len(),
            "step"
        );
        Ok(report)
    }

    /// Step until no ripple is active, then aggregate the result.
    ///
    /// # Errors
    ///
    /// Returns the first guard violation raised by [`Self::step`].
    pub fn run(mut self) -> RippleResult<RunResult> {
        while !self.is_finished() {
            self.step()?;
        }
        info!(
            source = self.source,
            steps = self.time(),
            ripples = self.registry.len(),
            "ripple spreading finished"
        );
        Ok(self.into_result())
    }

    /// Aggregate the current Omega into a result.
    #[must_use]
    pub fn into_result(self) -> RunResult {
        RunResult::collect(&self.registry, self.source, self.clock.current())
    }

    /// True once the active set is empty.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.registry.active().is_empty()
    }

    /// Current time step.
    #[must_use]
    pub const fn time(&self) -> u64 {
        self.clock.current()
    }

    /// Number of active ripples.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.registry.active().len()
    }

    /// Ripple registry.
    #[must_use]
    pub const fn registry(&self) -> &RippleRegistry {
        &self.registry
    }

    /// Speed calibration in use.
    #[must_use]
    pub const fn calibration(&self) -> &SpeedCalibration {
        &self.calibration
    }

    /// Source node.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Graph being explored.
    #[must_use]
    pub const fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Neighbor index built at construction.
    #[must_use]
    pub const fn neighbors(&self) -> &NeighborIndex<'g> {
        &self.neighbors
    }
}

/// Run the ripple-spreading algorithm with the default configuration.
///
/// # Errors
///
/// Returns error if `source` is out of range or calibration fails.
pub fn run(graph: &Graph, source: NodeId) -> RippleResult<RunResult> {
    RippleEngine::new(graph, source, &RunConfig::default())?.run()
}
