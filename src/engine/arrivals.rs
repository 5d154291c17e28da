//! Per-step arrival buffer.
//!
//! Candidates produced during one step are grouped by arrival node. Nodes are
//! yielded in order of their first arrival and candidates in push order, so
//! ripple ids are assigned reproducibly.

use indexmap::IndexMap;

use crate::engine::state::Candidate;
use crate::graph::NodeId;

/// Candidates collected during a single time step.
#[derive(Debug, Default)]
pub struct ArrivalBuffer {
    by_node: IndexMap<NodeId, Vec<Candidate>>,
    count: usize,
}

impl ArrivalBuffer {
    /// Empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a candidate reaching `node`.
    pub fn push(&mut self, node: NodeId, candidate: Candidate) {
        self.by_node.entry(node).or_default().push(candidate);
        self.count += 1;
    }

    /// Total number of candidates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// True if nothing arrived.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of distinct arrival nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.by_node.len()
    }

    /// Consume into `(node, batch)` pairs in first-arrival order.
    pub fn into_batches(self) -> impl Iterator<Item = (NodeId, Vec<Candidate>)> {
        self.by_node.into_iter()
    }
}
