//! YAML graph instances.
//!
//! # Example YAML
//!
//! ```yaml
//! meta:
//!   id: "RSA-DEMO-003"
//!   description: "three nodes, one crisp and one fuzzy objective"
//! source: 0
//! nodes: 3
//! edges:
//!   - { from: 0, to: 1, crisp: [2], fuzzy: [[1, 2, 3]] }
//!   - { from: 1, to: 2, crisp: [3], fuzzy: [[2, 3, 4]] }
//!   - { from: 0, to: 2, crisp: [6], fuzzy: [[1, 1, 2]] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Graph, NodeId};
use crate::error::RippleResult;
use crate::fuzzy::FuzzyNumber;
use crate::objective::{EdgeWeight, ObjectiveLayout};

/// Descriptive metadata about an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceMeta {
    /// Instance identifier.
    pub id: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Where the data came from.
    #[serde(default)]
    pub source: String,
}

impl Default for InstanceMeta {
    fn default() -> Self {
        Self {
            id: "RSA-UNNAMED".to_string(),
            description: String::new(),
            source: String::new(),
        }
    }
}

/// One directed edge of an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceEdge {
    /// Tail node.
    pub from: NodeId,
    /// Head node.
    pub to: NodeId,
    /// Crisp costs.
    pub crisp: Vec<f64>,
    /// Fuzzy costs as 3- or 4-parameter lists.
    #[serde(default)]
    pub fuzzy: Vec<FuzzyNumber>,
}

impl InstanceEdge {
    fn weight(&self) -> EdgeWeight {
        EdgeWeight::new(self.crisp.clone(), self.fuzzy.clone())
    }
}

/// A complete graph instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphInstance {
    /// Instance metadata.
    #[serde(default)]
    pub meta: InstanceMeta,
    /// Source node for the run.
    #[serde(default)]
    pub source: NodeId,
    /// Number of nodes.
    pub nodes: usize,
    /// Objective layout; inferred from the first edge when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<ObjectiveLayout>,
    /// Directed edges.
    #[serde(default)]
    pub edges: Vec<InstanceEdge>,
}

impl GraphInstance {
    /// Parse an instance from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns `YamlParse` if the document is invalid.
    pub fn from_yaml(yaml: &str) -> RippleResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load an instance from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or the YAML is invalid.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> RippleResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> RippleResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Capture an existing graph as an instance.
    #[must_use]
    pub fn from_graph(graph: &Graph, source: NodeId) -> Self {
        Self {
            meta: InstanceMeta::default(),
            source,
            nodes: graph.node_count(),
            layout: Some(*graph.layout()),
            edges: graph
                .edges()
                .map(|(from, e)| InstanceEdge {
                    from,
                    to: e.to,
                    crisp: e.weight.crisp.clone(),
                    fuzzy: e.weight.fuzzy.clone(),
                })
                .collect(),
        }
    }

    /// Effective objective layout.
    ///
    /// An explicit layout wins; otherwise the first edge decides. An edgeless
    /// instance without a layout gets a single crisp dimension.
    #[must_use]
    pub fn effective_layout(&self) -> ObjectiveLayout {
        self.layout.unwrap_or_else(|| {
            self.edges
                .first()
                .map_or_else(|| ObjectiveLayout::crisp_only(1), |e| ObjectiveLayout::of(&e.weight()))
        })
    }

    /// Build and validate the graph.
    ///
    /// # Errors
    ///
    /// Returns the first malformed-graph error encountered, or
    /// `NodeOutOfRange` if `source` is not a node.
    pub fn to_graph(&self) -> RippleResult<Graph> {
        let mut graph = Graph::new(self.nodes, self.effective_layout())?;
        for edge in &self.edges {
            graph.add_edge(edge.from, edge.to, edge.weight())?;
        }
        graph.check_node(self.source)?;
        Ok(graph)
    }
}
