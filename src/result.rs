//! Run results.
//!
//! For every node, the `(path, objective)` pairs of all ripples ever generated
//! there, in creation order. Radius is internal to the simulation and not
//! part of the result.

use serde::{Deserialize, Serialize};

use crate::engine::state::RippleRegistry;
use crate::error::{RippleError, RippleResult};
use crate::fuzzy::FuzzyMetric;
use crate::graph::NodeId;
use crate::objective::ObjectiveVector;
use crate::pareto::HasObjective;

/// One non-dominated path to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    /// Nodes from the source to the target.
    pub path: Vec<NodeId>,
    /// Accumulated cost.
    pub objective: ObjectiveVector,
}

impl PathRecord {
    /// Crisp costs followed by the graded mean of each fuzzy cost.
    #[must_use]
    pub fn defuzzified<M: FuzzyMetric>(&self, metric: &M) -> Vec<f64> {
        self.objective.defuzzified(metric)
    }

    /// Target node (last node of the path).
    #[must_use]
    pub fn target(&self) -> Option<NodeId> {
        self.path.last().copied()
    }
}

impl HasObjective for PathRecord {
    fn objective(&self) -> &ObjectiveVector {
        &self.objective
    }
}

/// Result of a complete run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Source node.
    pub source: NodeId,
    /// Time steps executed.
    pub steps: u64,
    /// Records per node, indexed by node id.
    pub nodes: Vec<Vec<PathRecord>>,
}

impl RunResult {
    /// Aggregate the generation history of a finished registry.
    #[must_use]
    pub fn collect(registry: &RippleRegistry, source: NodeId, steps: u64) -> Self {
        let nodes = (0..registry.node_count())
            .map(|node| {
                registry
                    .generated_at(node)
                    .map(|ripple| PathRecord {
                        path: ripple.path().to_vec(),
                        objective: ripple.objective().clone(),
                    })
                    .collect()
            })
            .collect();
        Self {
            source,
            steps,
            nodes,
        }
    }

    /// Records for `node`; empty for unreachable or unknown nodes.
    #[must_use]
    pub fn for_node(&self, node: NodeId) -> &[PathRecord] {
        self.nodes.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of records over all nodes.
    #[must_use]
    pub fn total_paths(&self) -> usize {
        self.nodes.iter().map(Vec::len).sum()
    }

    /// Nodes with at least one record.
    #[must_use]
    pub fn reached(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, records)| !records.is_empty())
            .map(|(node, _)| node)
            .collect()
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_json(&self) -> RippleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RippleError::serialization(e.to_string()))
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if encoding fails.
    pub fn to_yaml(&self) -> RippleResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
