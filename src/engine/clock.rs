//! Integer step clock.
//!
//! Ripple time is a plain step counter: each tick grows every active radius
//! by one speed unit. An optional limit caps the number of ticks.

use serde::{Deserialize, Serialize};

/// Simulation clock counting time steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepClock {
    /// Steps taken so far (`t`).
    current: u64,
    /// Maximum number of steps (optional limit).
    limit: Option<u64>,
}

impl StepClock {
    /// Clock at `t = 0` without a limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: 0,
            limit: None,
        }
    }

    /// Clock at `t = 0` with an optional step limit.
    #[must_use]
    pub const fn with_limit(limit: Option<u64>) -> Self {
        Self { current: 0, limit }
    }

    /// Current time step.
    #[must_use]
    pub const fn current(&self) -> u64 {
        self.current
    }

    /// Configured limit.
    #[must_use]
    pub const fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Check if the clock has run past its limit.
    #[must_use]
    pub fn past_limit(&self) -> bool {
        self.limit.is_some_and(|max| self.current > max)
    }

    /// Advance by one step; returns the new time.
    #[allow(clippy::missing_const_for_fn)]
    pub fn tick(&mut self) -> u64 {
        self.current = self.current.saturating_add(1);
        self.current
    }
}
