//! Pareto dominance over mixed crisp/fuzzy objective vectors.
//!
//! Lower is better in every dimension. A crisp dimension compares values
//! directly. A fuzzy dimension compares the distances of each operand to the
//! component-wise minimum of the two, so the number closer to the lower
//! envelope counts as smaller.
//!
//! Dominance is a partial order: two vectors may be mutually non-dominating.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::fuzzy::{ClosedFormMetric, FuzzyMetric};
use crate::objective::ObjectiveVector;

/// Anything carrying an objective vector.
pub trait HasObjective {
    /// The objective vector.
    fn objective(&self) -> &ObjectiveVector;
}

impl HasObjective for ObjectiveVector {
    fn objective(&self) -> &ObjectiveVector {
        self
    }
}

impl<T: HasObjective + ?Sized> HasObjective for &T {
    fn objective(&self) -> &ObjectiveVector {
        (**self).objective()
    }
}

/// Strict Pareto dominance using a fuzzy metric for fuzzy dimensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DominanceComparator<M = ClosedFormMetric> {
    metric: M,
}

impl<M: FuzzyMetric> DominanceComparator<M> {
    /// Create a comparator over `metric`.
    #[must_use]
    pub const fn new(metric: M) -> Self {
        Self { metric }
    }

    /// The fuzzy metric in use.
    #[must_use]
    pub const fn metric(&self) -> &M {
        &self.metric
    }

    /// True iff `a` strictly dominates `b`.
    ///
    /// `a` must be no worse than `b` in every dimension and strictly better in
    /// at least one. The scan stops at the first regressing dimension.
    #[must_use]
    pub fn dominates(&self, a: &ObjectiveVector, b: &ObjectiveVector) -> bool {
        let crisp = a.crisp.iter().zip(&b.crisp).map(|(x, y)| (*x, *y));
        let fuzzy = a.fuzzy.iter().zip(&b.fuzzy).map(|(x, y)| {
            let envelope = x.min(y);
            (
                self.metric.distance(&envelope, x),
                self.metric.distance(&envelope, y),
            )
        });

        let mut improved = false;
        for (x, y) in crisp.chain(fuzzy) {
            match x.partial_cmp(&y) {
                Some(Ordering::Less) => improved = true,
                Some(Ordering::Equal) => {}
                // Worse, or incomparable (NaN): no dominance.
                Some(Ordering::Greater) | None => return false,
            }
        }
        improved
    }
}

/// Handling of candidates whose objective equals one already kept at the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep equal-cost candidates (neither dominates the other).
    #[default]
    KeepAll,
    /// Keep only the first candidate per distinct objective vector.
    FirstOnly,
}

/// Two-stage non-domination filter applied to one node's arrivals.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParetoFilter<M = ClosedFormMetric> {
    comparator: DominanceComparator<M>,
    duplicates: DuplicatePolicy,
}

impl<M: FuzzyMetric> ParetoFilter<M> {
    /// Create a filter.
    #[must_use]
    pub const fn new(comparator: DominanceComparator<M>, duplicates: DuplicatePolicy) -> Self {
        Self {
            comparator,
            duplicates,
        }
    }

    /// The underlying comparator.
    #[must_use]
    pub const fn comparator(&self) -> &DominanceComparator<M> {
        &self.comparator
    }

    /// Stage 1: keep candidates not dominated by any other candidate of the batch.
    ///
    /// Every candidate is compared against the whole batch, including
    /// candidates that are themselves dominated. Order is preserved.
    #[must_use]
    pub fn mutual<T: HasObjective>(&self, candidates: Vec<T>) -> Vec<T> {
        let keep: Vec<bool> = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| {
                !candidates.iter().enumerate().any(|(j, other)| {
                    i != j && self.comparator.dominates(other.objective(), c.objective())
                })
            })
            .collect();

        let mut kept: Vec<T> = Vec::with_capacity(candidates.len());
        for (candidate, keep) in candidates.into_iter().zip(keep) {
            if keep && !self.is_duplicate(&candidate, kept.iter().map(HasObjective::objective)) {
                kept.push(candidate);
            }
        }
        kept
    }

    /// Stage 2: keep survivors not dominated by any historical objective.
    ///
    /// With an empty history the survivors pass through unchanged.
    #[must_use]
    pub fn against_history<T: HasObjective>(
        &self,
        survivors: Vec<T>,
        history: &[&ObjectiveVector],
    ) -> Vec<T> {
        if history.is_empty() {
            return survivors;
        }
        survivors
            .into_iter()
            .filter(|c| {
                !history
                    .iter()
                    .any(|past| self.comparator.dominates(past, c.objective()))
                    && !self.is_duplicate(c, history.iter().copied())
            })
            .collect()
    }

    /// Both stages: the candidates that become new ripples at the node.
    #[must_use]
    pub fn select<T: HasObjective>(&self, candidates: Vec<T>, history: &[&ObjectiveVector]) -> Vec<T> {
        let arrived = candidates.len();
        let survivors = self.mutual(candidates);
        let mutual = survivors.len();
        let accepted = self.against_history(survivors, history);
        debug!(
            arrived,
            mutual,
            accepted = accepted.len(),
            history = history.len(),
            "pareto filter"
        );
        accepted
    }

    fn is_duplicate<'a, T: HasObjective>(
        &self,
        candidate: &T,
        mut kept: impl Iterator<Item = &'a ObjectiveVector>,
    ) -> bool {
        match self.duplicates {
            DuplicatePolicy::KeepAll => false,
            DuplicatePolicy::FirstOnly => kept.any(|k| k == candidate.objective()),
        }
    }
}
