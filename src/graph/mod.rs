//! Directed weighted graphs with mixed crisp/fuzzy edge costs.
//!
//! Nodes are dense ids in `[0, n)`. Adjacency is stored as one vector per
//! node, in edge insertion order, and every edge is validated against the
//! graph's [`ObjectiveLayout`] when it is added. A constructed `Graph` is
//! therefore always well-formed.

pub mod instance;

use serde::{Deserialize, Serialize};

use crate::error::{RippleError, RippleResult};
use crate::objective::{EdgeWeight, ObjectiveLayout};

pub use instance::{GraphInstance, InstanceEdge, InstanceMeta};

/// Node identifier.
pub type NodeId = usize;

/// Largest node count a graph may declare.
pub const MAX_NODES: usize = 1 << 20;

/// Outgoing edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Head node.
    pub to: NodeId,
    /// Edge weight.
    pub weight: EdgeWeight,
}

/// Directed graph without parallel edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    layout: ObjectiveLayout,
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Create an edgeless graph with `node_count` nodes.
    ///
    /// # Errors
    ///
    /// Returns `NoCrispDimension` if the layout has no crisp dimension and
    /// `TooManyNodes` if `node_count` exceeds [`MAX_NODES`].
    pub fn new(node_count: usize, layout: ObjectiveLayout) -> RippleResult<Self> {
        layout.validate()?;
        if node_count > MAX_NODES {
            return Err(RippleError::TooManyNodes {
                nodes: node_count,
                limit: MAX_NODES,
            });
        }
        Ok(Self {
            layout,
            adjacency: vec![Vec::new(); node_count],
        })
    }

    /// Add a directed edge.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is out of range, the ordered pair
    /// already has an edge, or the weight does not fit the layout.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: EdgeWeight) -> RippleResult<()> {
        self.check_node(from)?;
        self.check_node(to)?;
        if self.adjacency[from].iter().any(|e| e.to == to) {
            return Err(RippleError::ParallelEdge { from, to });
        }
        weight.validate(&self.layout, from, to)?;
        self.adjacency[from].push(Edge { to, weight });
        Ok(())
    }

    /// Ensure `node` is a valid id.
    ///
    /// # Errors
    ///
    /// Returns `NodeOutOfRange` otherwise.
    pub fn check_node(&self, node: NodeId) -> RippleResult<()> {
        if node >= self.adjacency.len() {
            return Err(RippleError::NodeOutOfRange {
                node,
                node_count: self.adjacency.len(),
            });
        }
        Ok(())
    }

    /// Objective layout shared by all edges.
    #[must_use]
    pub const fn layout(&self) -> &ObjectiveLayout {
        &self.layout
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Outgoing edges of `node` in insertion order (empty for sinks and unknown ids).
    #[must_use]
    pub fn out_edges(&self, node: NodeId) -> &[Edge] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weight of edge `from -> to`, if present.
    #[must_use]
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<&EdgeWeight> {
        self.out_edges(from)
            .iter()
            .find(|e| e.to == to)
            .map(|e| &e.weight)
    }

    /// All edges as `(from, edge)` pairs, grouped by tail node.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, &Edge)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| edges.iter().map(move |e| (from, e)))
    }

    /// Out-neighbors of every node, borrowing the graph's edges.
    #[must_use]
    pub fn neighbor_index(&self) -> NeighborIndex<'_> {
        NeighborIndex::build(self)
    }
}

/// Out-neighbors of every node, in edge insertion order.
///
/// Built once per run. Speed calibration and the engine walk this index
/// rather than the graph, so spread lengths line up with [`NeighborIndex::of`].
#[derive(Debug, Clone)]
pub struct NeighborIndex<'g> {
    layout: ObjectiveLayout,
    neighbors: Vec<Vec<&'g Edge>>,
}

impl<'g> NeighborIndex<'g> {
    /// Derive the index from a graph.
    #[must_use]
    pub fn build(graph: &'g Graph) -> Self {
        Self {
            layout: graph.layout,
            neighbors: graph
                .adjacency
                .iter()
                .map(|edges| edges.iter().collect())
                .collect(),
        }
    }

    /// Outgoing edges of `node` (empty for sinks and unknown ids).
    #[must_use]
    pub fn of(&self, node: NodeId) -> &[&'g Edge] {
        self.neighbors.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Neighbor ids of `node`.
    pub fn targets(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.of(node).iter().map(|e| e.to)
    }

    /// Every indexed edge, grouped by tail node.
    pub fn edges(&self) -> impl Iterator<Item = &'g Edge> + '_ {
        self.neighbors.iter().flatten().copied()
    }

    /// Objective layout of the indexed graph.
    #[must_use]
    pub const fn layout(&self) -> &ObjectiveLayout {
        &self.layout
    }

    /// Number of indexed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum()
    }

    /// Number of nodes covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// True if the index covers no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}
