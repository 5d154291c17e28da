//! Ripple registry.
//!
//! The registry is an arena: it owns every ripple ever created, keyed by a
//! dense [`RippleId`]. Per-node generation history (Omega) and the active set
//! only hold ids into the arena. Ripples are never removed; only their
//! radius advances while they are active.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::graph::NodeId;
use crate::objective::ObjectiveVector;
use crate::pareto::HasObjective;

/// Stable ripple identifier, assigned in creation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct RippleId(usize);

impl RippleId {
    /// Id of the initial ripple at the source.
    pub const ORIGIN: Self = Self(0);

    /// Index into the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RippleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A path that reached a node during a step but is not yet a ripple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Simple path from the source to the arrival node.
    pub path: Vec<NodeId>,
    /// Accumulated cost of `path`.
    pub objective: ObjectiveVector,
    /// Residual travel past the crossing point.
    pub radius: f64,
}

impl HasObjective for Candidate {
    fn objective(&self) -> &ObjectiveVector {
        &self.objective
    }
}

/// A wavefront expanding from the last node of its path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ripple {
    id: RippleId,
    epicenter: NodeId,
    path: Vec<NodeId>,
    objective: ObjectiveVector,
    radius: f64,
    active: bool,
}

impl Ripple {
    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> RippleId {
        self.id
    }

    /// Node the ripple expands from.
    #[must_use]
    pub const fn epicenter(&self) -> NodeId {
        self.epicenter
    }

    /// Path from the source to the epicenter.
    #[must_use]
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Radius; frozen once inactive.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// True while the ripple can still reach a new node.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// True if `node` is already on the path.
    #[must_use]
    pub fn visits(&self, node: NodeId) -> bool {
        self.path.contains(&node)
    }

    /// Copy of the path with `node` appended.
    #[must_use]
    pub fn extended_path(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(node);
        path
    }
}

impl HasObjective for Ripple {
    fn objective(&self) -> &ObjectiveVector {
        &self.objective
    }
}

/// Arena of ripples plus Omega and the active set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RippleRegistry {
    ripples: Vec<Ripple>,
    omega: Vec<Vec<RippleId>>,
    active: Vec<RippleId>,
}

impl RippleRegistry {
    /// Empty registry for `node_count` nodes.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            ripples: Vec::new(),
            omega: vec![Vec::new(); node_count],
            active: Vec::new(),
        }
    }

    /// Create an active ripple at `epicenter` and record it in Omega.
    ///
    /// The caller guarantees `epicenter` is a node of the graph and the last
    /// entry of `candidate.path`.
    pub fn spawn(&mut self, epicenter: NodeId, candidate: Candidate) -> RippleId {
        let id = RippleId(self.ripples.len());
        self.ripples.push(Ripple {
            id,
            epicenter,
            path: candidate.path,
            objective: candidate.objective,
            radius: candidate.radius,
            active: true,
        });
        self.active.push(id);
        if let Some(history) = self.omega.get_mut(epicenter) {
            history.push(id);
        }
        id
    }

    /// Grow an active ripple's radius by `speed` and return it.
    pub fn advance(&mut self, id: RippleId, speed: f64) -> Option<&Ripple> {
        let ripple = self.ripples.get_mut(id.0)?;
        if ripple.active {
            ripple.radius += speed;
        }
        Some(ripple)
    }

    /// Permanently deactivate ripples; their radius is frozen.
    pub fn retire(&mut self, ids: &[RippleId]) {
        if ids.is_empty() {
            return;
        }
        for id in ids {
            if let Some(ripple) = self.ripples.get_mut(id.0) {
                ripple.active = false;
            }
        }
        let ripples = &self.ripples;
        self.active.retain(|id| ripples[id.0].active);
    }

    /// Ripple by id.
    #[must_use]
    pub fn get(&self, id: RippleId) -> Option<&Ripple> {
        self.ripples.get(id.0)
    }

    /// All ripples in creation order.
    #[must_use]
    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    /// Active ids in activation order.
    #[must_use]
    pub fn active(&self) -> &[RippleId] {
        &self.active
    }

    /// Ids generated at `node`, in creation order.
    #[must_use]
    pub fn omega(&self, node: NodeId) -> &[RippleId] {
        self.omega.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ripples generated at `node`, in creation order.
    pub fn generated_at(&self, node: NodeId) -> impl Iterator<Item = &Ripple> {
        self.omega(node).iter().filter_map(|id| self.get(*id))
    }

    /// Objectives of the ripples generated at `node`.
    #[must_use]
    pub fn history(&self, node: NodeId) -> Vec<&ObjectiveVector> {
        self.generated_at(node).map(|r| &r.objective).collect()
    }

    /// Number of nodes covered by Omega.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.omega.len()
    }

    /// Number of ripples ever created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    /// True if no ripple was ever created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }
}
