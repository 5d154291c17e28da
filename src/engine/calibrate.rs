//! Spread-speed calibration.
//!
//! One crisp dimension drives ripple propagation. For each dimension `k` the
//! calibrator takes `min_k` and `max_k` over all edges and picks the dimension
//! with the smallest `max_k / min_k`; ties go to the lowest index. The
//! propagation speed is `min_k` of the chosen dimension and every edge's
//! spread length is its weight in that dimension.
//!
//! A dimension containing a zero weight has an unbounded ratio and is only
//! chosen when every dimension contains one, which is reported as
//! `ZeroSpreadLength`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{RippleError, RippleResult};
use crate::graph::{NeighborIndex, NodeId};

/// Outcome of speed calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedCalibration {
    /// Chosen crisp dimension.
    dimension: usize,
    /// Radius growth per time step.
    speed: f64,
    /// Spread length per edge, aligned with `NeighborIndex::of`.
    spreads: Vec<Vec<f64>>,
}

impl SpeedCalibration {
    /// Calibrate against every edge of the indexed graph.
    ///
    /// An edgeless graph gets unit speed; no ripple can ever cross an edge.
    ///
    /// # Errors
    ///
    /// Returns `ZeroSpreadLength` if every crisp dimension contains a zero weight.
    pub fn calibrate(neighbors: &NeighborIndex<'_>) -> RippleResult<Self> {
        let dims = neighbors.layout().crisp;
        if neighbors.edge_count() == 0 {
            return Ok(Self {
                dimension: 0,
                speed: 1.0,
                spreads: vec![Vec::new(); neighbors.len()],
            });
        }

        let mut min = vec![f64::INFINITY; dims];
        let mut max = vec![0.0_f64; dims];
        for edge in neighbors.edges() {
            for (k, &w) in edge.weight.crisp.iter().enumerate() {
                min[k] = min[k].min(w);
                max[k] = max[k].max(w);
            }
        }

        let mut dimension = 0;
        let mut best_ratio = f64::INFINITY;
        for k in 0..dims {
            let ratio = if min[k] > 0.0 {
                max[k] / min[k]
            } else {
                f64::INFINITY
            };
            if ratio < best_ratio {
                best_ratio = ratio;
                dimension = k;
            }
        }

        let speed = min[dimension];
        if speed <= 0.0 {
            return Err(RippleError::ZeroSpreadLength { dimension });
        }

        let spreads = (0..neighbors.len())
            .map(|node| {
                neighbors
                    .of(node)
                    .iter()
                    .map(|e| e.weight.crisp[dimension])
                    .collect()
            })
            .collect();

        info!(dimension, speed, ratio = best_ratio, "calibrated spread speed");

        Ok(Self {
            dimension,
            speed,
            spreads,
        })
    }

    /// Chosen crisp dimension.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Radius growth per time step.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Spread lengths of `node`'s outgoing edges, in `NeighborIndex::of` order.
    #[must_use]
    pub fn spreads(&self, node: NodeId) -> &[f64] {
        self.spreads.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Largest spread length of any edge (zero for an edgeless graph).
    #[must_use]
    pub fn max_spread(&self) -> f64 {
        self.spreads.iter().flatten().copied().fold(0.0, f64::max)
    }

    /// Upper bound on the number of time steps of a run over `node_count` nodes.
    ///
    /// A ripple stays active for at most `ceil(max_spread / speed)` steps and a
    /// simple path has fewer than `node_count` edges.
    #[must_use]
    pub fn step_bound(&self, node_count: usize) -> u64 {
        let per_ripple = (self.max_spread() / self.speed).ceil().max(1.0) as u64;
        (node_count.max(1) as u64).saturating_mul(per_ripple + 1)
    }
}
