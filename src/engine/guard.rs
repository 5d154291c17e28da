//! Stop-on-error guard for the ripple simulation.
//!
//! The guard inspects every candidate before it becomes a ripple and the
//! clock after every tick. Any anomaly stops the run immediately with an
//! error instead of letting a corrupt ripple propagate.
//!
//! # Checks
//!
//! 1. **Non-finite values**: NaN or Inf in a radius or objective entry
//! 2. **Step budget**: the clock ran past `max_steps`

use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

use crate::engine::clock::StepClock;
use crate::engine::state::Candidate;
use crate::error::{RippleError, RippleResult};
use crate::graph::NodeId;

/// Guard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    /// NaN/Inf detection enabled.
    #[serde(default = "default_check_finite")]
    pub check_finite: bool,
    /// Maximum number of time steps; unlimited when absent.
    #[validate(range(min = 1))]
    #[serde(default)]
    pub max_steps: Option<u64>,
}

fn default_check_finite() -> bool {
    true
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            check_finite: default_check_finite(),
            max_steps: None,
        }
    }
}

/// Guard applied during a run.
#[derive(Debug, Clone, Default)]
pub struct RippleGuard {
    config: GuardConfig,
}

impl RippleGuard {
    /// Create a guard.
    #[must_use]
    pub const fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Check the clock against the step budget.
    ///
    /// # Errors
    ///
    /// Returns `StepBudgetExceeded` once the clock passes its limit.
    pub fn check_clock(&self, clock: &StepClock) -> RippleResult<()> {
        match clock.limit() {
            Some(limit) if clock.past_limit() => {
                warn!(steps = clock.current(), limit, "step budget exhausted");
                Err(RippleError::StepBudgetExceeded {
                    steps: clock.current(),
                    limit,
                })
            }
            _ => Ok(()),
        }
    }

    /// Clock honouring the configured step budget.
    #[must_use]
    pub const fn clock(&self) -> StepClock {
        StepClock::with_limit(self.config.max_steps)
    }

    /// Check a candidate about to become a ripple at `node`.
    ///
    /// # Errors
    ///
    /// Returns `NonFiniteValue` if its radius or objective is NaN or infinite.
    pub fn check_candidate(&self, node: NodeId, candidate: &Candidate) -> RippleResult<()> {
        if !self.config.check_finite {
            return Ok(());
        }
        let location = if candidate.radius.is_finite() {
            if candidate.objective.is_finite() {
                return Ok(());
            }
            format!("objective of candidate at node {node}")
        } else {
            format!("radius of candidate at node {node}")
        };
        warn!(node, %location, "non-finite ripple state");
        Err(RippleError::NonFiniteValue { location })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::objective::{ObjectiveLayout, ObjectiveVector};

    fn candidate(radius: f64, cost: f64) -> Candidate {
        let mut objective = ObjectiveVector::zero(&ObjectiveLayout::crisp_only(1));
        objective.crisp[0] = cost;
        Candidate {
            path: vec![0, 1],
            objective,
            radius,
        }
    }

    #[test]
    fn test_finite_candidate_passes() {
        let guard = RippleGuard::default();
        assert!(guard.check_candidate(1, &candidate(0.5, 3.0)).is_ok());
    }

    #[test]
    fn test_nan_radius_detected() {
        let guard = RippleGuard::default();
        let err = guard
            .check_candidate(1, &candidate(f64::NAN, 3.0))
            .unwrap_err();
        assert!(err.is_guard_violation());
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn test_infinite_objective_detected() {
        let guard = RippleGuard::default();
        let err = guard
            .check_candidate(4, &candidate(0.0, f64::INFINITY))
            .unwrap_err();
        assert!(err.to_string().contains("objective of candidate at node 4"));
    }

    #[test]
    fn test_finite_check_disabled() {
        let guard = RippleGuard::new(GuardConfig {
            check_finite: false,
            max_steps: None,
        });
        assert!(guard.check_candidate(1, &candidate(f64::NAN, 1.0)).is_ok());
    }

    #[test]
    fn test_step_budget() {
        let guard = RippleGuard::new(GuardConfig {
            check_finite: true,
            max_steps: Some(2),
        });
        let mut clock = guard.clock();
        assert_eq!(clock.limit(), Some(2));
        clock.tick();
        clock.tick();
        assert!(guard.check_clock(&clock).is_ok());
        clock.tick();
        assert!(matches!(
            guard.check_clock(&clock),
            Err(RippleError::StepBudgetExceeded { steps: 3, limit: 2 })
        ));
    }

    #[test]
    fn test_max_steps_validation() {
        let config = GuardConfig {
            check_finite: true,
            max_steps: Some(0),
        };
        assert!(config.validate().is_err());
        assert!(GuardConfig::default().validate().is_ok());
    }
}
