//! Planner configuration.

use serde::{Deserialize, Serialize};

use super::OrderingPolicy;
use crate::error::{PlanError, Result};
use crate::models::MINUTES_PER_DAY;

/// Default spacing between candidate start times (minutes).
pub const DEFAULT_GRANULARITY_MINUTES: u32 = 30;

/// Tunables for a [`TermPlanner`](super::TermPlanner).
///
/// Set by the caller at construction; nothing is read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Step between candidate start times, in minutes.
    pub granularity_minutes: u32,
    /// Fixed shuffle seed. `None` draws a fresh seed from the OS per run.
    pub random_seed: Option<u64>,
    /// Order in which allocations compete for the grid.
    pub ordering: OrderingPolicy,
    /// Reject allocations addressed to another term.
    pub strict_term: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            random_seed: None,
            ordering: OrderingPolicy::default(),
            strict_term: false,
        }
    }
}

impl PlannerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start-time step.
    pub fn with_granularity(mut self, minutes: u32) -> Self {
        self.granularity_minutes = minutes;
        self
    }

    /// Fixes the shuffle seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the allocation ordering policy.
    pub fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    /// Enables or disables term checking.
    pub fn with_strict_term(mut self, strict: bool) -> Self {
        self.strict_term = strict;
        self
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.granularity_minutes == 0 || self.granularity_minutes > MINUTES_PER_DAY {
            return Err(PlanError::InvalidConfig(format!(
                "granularity must be within 1..={MINUTES_PER_DAY} minutes, got {}",
                self.granularity_minutes
            )));
        }
        Ok(())
    }
}
