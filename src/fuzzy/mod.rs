//! Fuzzy numbers and the closed-form fuzzy metric.
//!
//! A fuzzy weight is either triangular `(left, peak, right)` or trapezoidal
//! `(left, left_plateau, right_plateau, right)`. All fuzzy numbers in one
//! graph share a shape, so a metric is selected once per graph.
//!
//! # Distance
//!
//! With `d_i = a_i - b_i`:
//!
//! - triangular: `sqrt((d0² + d1² + 2·d2² + d0·d1 + d1·d2) / 6)`
//! - trapezoidal: `sqrt((d0² + d1² + d2² + d3² + d0·d1 + d2·d3) / 6)`
//!
//! # Graded mean
//!
//! - triangular: `(a0 + 4·a1 + a2) / 6`
//! - trapezoidal: `(a0 + 2·a1 + 2·a2 + a3) / 6`

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RippleError;

/// Shape of a fuzzy number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuzzyShape {
    /// Three parameters: left, peak, right.
    #[default]
    Triangular,
    /// Four parameters: left, left plateau, right plateau, right.
    Trapezoidal,
}

impl FuzzyShape {
    /// Number of parameters for this shape.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Triangular => 3,
            Self::Trapezoidal => 4,
        }
    }
}

impl fmt::Display for FuzzyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triangular => write!(f, "triangular"),
            Self::Trapezoidal => write!(f, "trapezoidal"),
        }
    }
}

/// A triangular or trapezoidal fuzzy number.
///
/// Serialized as its bare parameter list, e.g. `[4.0, 7.0, 15.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub enum FuzzyNumber {
    /// `(left, peak, right)`.
    Triangular([f64; 3]),
    /// `(left, left_plateau, right_plateau, right)`.
    Trapezoidal([f64; 4]),
}

impl FuzzyNumber {
    /// Triangular fuzzy number.
    #[must_use]
    pub const fn triangular(left: f64, peak: f64, right: f64) -> Self {
        Self::Triangular([left, peak, right])
    }

    /// Trapezoidal fuzzy number.
    #[must_use]
    pub const fn trapezoidal(left: f64, left_plateau: f64, right_plateau: f64, right: f64) -> Self {
        Self::Trapezoidal([left, left_plateau, right_plateau, right])
    }

    /// All-zero fuzzy number of the given shape.
    #[must_use]
    pub const fn zero(shape: FuzzyShape) -> Self {
        match shape {
            FuzzyShape::Triangular => Self::Triangular([0.0; 3]),
            FuzzyShape::Trapezoidal => Self::Trapezoidal([0.0; 4]),
        }
    }

    /// Shape of this number.
    #[must_use]
    pub const fn shape(&self) -> FuzzyShape {
        match self {
            Self::Triangular(_) => FuzzyShape::Triangular,
            Self::Trapezoidal(_) => FuzzyShape::Trapezoidal,
        }
    }

    /// Parameters in order.
    #[must_use]
    pub fn params(&self) -> &[f64] {
        match self {
            Self::Triangular(p) => p,
            Self::Trapezoidal(p) => p,
        }
    }

    /// Trapezoidal view; a triangle `(a, b, c)` is the trapezoid `(a, b, b, c)`.
    #[must_use]
    pub const fn as_trapezoid(&self) -> [f64; 4] {
        match *self {
            Self::Triangular([a, b, c]) => [a, b, b, c],
            Self::Trapezoidal(p) => p,
        }
    }

    /// True if parameters are non-decreasing.
    #[must_use]
    pub fn is_monotone(&self) -> bool {
        self.params().windows(2).all(|w| w[0] <= w[1])
    }

    /// Component-wise sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    /// Component-wise minimum (the lower envelope of the two numbers).
    #[must_use]
    pub fn min(&self, other: &Self) -> Self {
        self.zip_with(other, f64::min)
    }

    fn zip_with(&self, other: &Self, op: impl Fn(f64, f64) -> f64) -> Self {
        match (self, other) {
            (Self::Triangular(a), Self::Triangular(b)) => {
                Self::Triangular([op(a[0], b[0]), op(a[1], b[1]), op(a[2], b[2])])
            }
            _ => {
                let a = self.as_trapezoid();
                let b = other.as_trapezoid();
                Self::Trapezoidal([
                    op(a[0], b[0]),
                    op(a[1], b[1]),
                    op(a[2], b[2]),
                    op(a[3], b[3]),
                ])
            }
        }
    }
}

impl TryFrom<Vec<f64>> for FuzzyNumber {
    type Error = RippleError;

    fn try_from(params: Vec<f64>) -> Result<Self, Self::Error> {
        match params.as_slice() {
            &[a, b, c] => Ok(Self::Triangular([a, b, c])),
            &[a, b, c, d] => Ok(Self::Trapezoidal([a, b, c, d])),
            other => Err(RippleError::InvalidFuzzyArity { got: other.len() }),
        }
    }
}

impl From<FuzzyNumber> for Vec<f64> {
    fn from(value: FuzzyNumber) -> Self {
        value.params().to_vec()
    }
}

/// Scalar metrics over fuzzy numbers.
///
/// Implementations must be pure: the same inputs always yield the same output.
pub trait FuzzyMetric {
    /// Symmetric, non-negative dissimilarity between two fuzzy numbers.
    fn distance(&self, a: &FuzzyNumber, b: &FuzzyNumber) -> f64;

    /// Weighted-average defuzzification.
    fn graded_mean(&self, a: &FuzzyNumber) -> f64;
}

/// Closed-form distance and graded mean for triangular/trapezoidal numbers.
///
/// Mixed-shape pairs are compared in trapezoidal form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClosedFormMetric;

impl ClosedFormMetric {
    /// Create the metric.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FuzzyMetric for ClosedFormMetric {
    fn distance(&self, a: &FuzzyNumber, b: &FuzzyNumber) -> f64 {
        let sum = match (a, b) {
            (FuzzyNumber::Triangular(a), FuzzyNumber::Triangular(b)) => {
                let d = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
                d[0] * d[0] + d[1] * d[1] + 2.0 * d[2] * d[2] + d[0] * d[1] + d[1] * d[2]
            }
            _ => {
                let (a, b) = (a.as_trapezoid(), b.as_trapezoid());
                let d = [a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3]];
                d.iter().map(|x| x * x).sum::<f64>() + d[0] * d[1] + d[2] * d[3]
            }
        };
        // The quadratic forms are positive definite; clamp rounding noise.
        (sum.max(0.0) / 6.0).sqrt()
    }

    fn graded_mean(&self, a: &FuzzyNumber) -> f64 {
        match a {
            FuzzyNumber::Triangular(p) => (p[0] + 4.0 * p[1] + p[2]) / 6.0,
            FuzzyNumber::Trapezoidal(p) => (p[0] + 2.0 * p[1] + 2.0 * p[2] + p[3]) / 6.0,
        }
    }
}
