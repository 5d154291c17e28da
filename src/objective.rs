//! Edge weights and path objective vectors.
//!
//! An objective vector has `C` crisp entries followed by `F` fuzzy entries.
//! Extending a path never mutates the parent's vector: [`ObjectiveVector::extended`]
//! returns a fresh owned value.

use serde::{Deserialize, Serialize};

use crate::error::{RippleError, RippleResult};
use crate::fuzzy::{FuzzyMetric, FuzzyNumber, FuzzyShape};

/// Number and shape of objective dimensions shared by every edge of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveLayout {
    /// Number of crisp dimensions (`C >= 1`).
    pub crisp: usize,
    /// Number of fuzzy dimensions (`F >= 0`).
    pub fuzzy: usize,
    /// Shape shared by all fuzzy numbers.
    #[serde(default)]
    pub shape: FuzzyShape,
}

impl ObjectiveLayout {
    /// Create a layout.
    #[must_use]
    pub const fn new(crisp: usize, fuzzy: usize, shape: FuzzyShape) -> Self {
        Self {
            crisp,
            fuzzy,
            shape,
        }
    }

    /// Layout with crisp dimensions only.
    #[must_use]
    pub const fn crisp_only(crisp: usize) -> Self {
        Self::new(crisp, 0, FuzzyShape::Triangular)
    }

    /// Total number of objectives, `C + F`.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.crisp + self.fuzzy
    }

    /// True if there are no objectives at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Infer the layout of a weight.
    ///
    /// The shape comes from the first fuzzy entry, defaulting to triangular.
    #[must_use]
    pub fn of(weight: &EdgeWeight) -> Self {
        let shape = weight
            .fuzzy
            .first()
            .map_or(FuzzyShape::Triangular, FuzzyNumber::shape);
        Self::new(weight.crisp.len(), weight.fuzzy.len(), shape)
    }

    /// Check that this layout is usable for a graph.
    ///
    /// # Errors
    ///
    /// Returns `NoCrispDimension` if `crisp == 0`.
    pub fn validate(&self) -> RippleResult<()> {
        if self.crisp == 0 {
            return Err(RippleError::NoCrispDimension);
        }
        Ok(())
    }
}

/// Weight pair attached to a directed edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeWeight {
    /// Crisp costs.
    pub crisp: Vec<f64>,
    /// Fuzzy costs.
    #[serde(default)]
    pub fuzzy: Vec<FuzzyNumber>,
}

impl EdgeWeight {
    /// Create a weight.
    #[must_use]
    pub const fn new(crisp: Vec<f64>, fuzzy: Vec<FuzzyNumber>) -> Self {
        Self { crisp, fuzzy }
    }

    /// Crisp-only weight.
    #[must_use]
    pub const fn crisp(crisp: Vec<f64>) -> Self {
        Self::new(crisp, Vec::new())
    }

    /// Check this weight against a layout for edge `from -> to`.
    ///
    /// # Errors
    ///
    /// Returns the first malformed-graph error found: length mismatch, shape
    /// mismatch, non-finite or negative value, or decreasing fuzzy parameters.
    pub fn validate(&self, layout: &ObjectiveLayout, from: usize, to: usize) -> RippleResult<()> {
        if self.crisp.len() != layout.crisp {
            return Err(RippleError::CrispLengthMismatch {
                from,
                to,
                expected: layout.crisp,
                got: self.crisp.len(),
            });
        }
        if self.fuzzy.len() != layout.fuzzy {
            return Err(RippleError::FuzzyLengthMismatch {
                from,
                to,
                expected: layout.fuzzy,
                got: self.fuzzy.len(),
            });
        }

        let fuzzy_params = self.fuzzy.iter().flat_map(|f| f.params().iter());
        for &value in self.crisp.iter().chain(fuzzy_params) {
            if !value.is_finite() {
                return Err(RippleError::NonFiniteWeight { from, to });
            }
            if value < 0.0 {
                return Err(RippleError::NegativeWeight { from, to, value });
            }
        }

        for (index, number) in self.fuzzy.iter().enumerate() {
            if number.shape() != layout.shape {
                return Err(RippleError::ShapeMismatch {
                    from,
                    to,
                    expected: layout.shape,
                    got: number.shape(),
                });
            }
            if !number.is_monotone() {
                return Err(RippleError::NonMonotoneFuzzy { from, to, index });
            }
        }

        Ok(())
    }
}

/// Accumulated cost of a path: crisp sums followed by fuzzy sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveVector {
    /// Crisp sums.
    pub crisp: Vec<f64>,
    /// Component-wise fuzzy sums.
    pub fuzzy: Vec<FuzzyNumber>,
}

impl ObjectiveVector {
    /// Zero-cost vector for the empty path.
    #[must_use]
    pub fn zero(layout: &ObjectiveLayout) -> Self {
        Self {
            crisp: vec![0.0; layout.crisp],
            fuzzy: vec![FuzzyNumber::zero(layout.shape); layout.fuzzy],
        }
    }

    /// Cost after traversing one more edge.
    #[must_use]
    pub fn extended(&self, weight: &EdgeWeight) -> Self {
        Self {
            crisp: self
                .crisp
                .iter()
                .zip(&weight.crisp)
                .map(|(acc, w)| acc + w)
                .collect(),
            fuzzy: self
                .fuzzy
                .iter()
                .zip(&weight.fuzzy)
                .map(|(acc, w)| acc.add(w))
                .collect(),
        }
    }

    /// Total number of objectives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.crisp.len() + self.fuzzy.len()
    }

    /// True if the vector has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if every crisp value and fuzzy parameter is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.crisp.iter().all(|v| v.is_finite())
            && self
                .fuzzy
                .iter()
                .all(|f| f.params().iter().all(|v| v.is_finite()))
    }

    /// Crisp entries followed by the graded mean of each fuzzy entry.
    #[must_use]
    pub fn defuzzified<M: FuzzyMetric>(&self, metric: &M) -> Vec<f64> {
        self.crisp
            .iter()
            .copied()
            .chain(self.fuzzy.iter().map(|f| metric.graded_mean(f)))
            .collect()
    }
}
