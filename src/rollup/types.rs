//! Types produced by the aggregation pass

use serde::Serialize;
use std::collections::BTreeMap;

use crate::diagnostic::Diagnostic;
use crate::outline::{Priority, TargetId};

#[derive(Debug, Clone, Copy)]
pub struct RollupOptions {
    /// Lowest priority level counted in the team/initiative cross-tab
    pub priority_threshold: u8,
}

/// A dollar-denominated ask, kept apart from all headcount sums
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DollarAsk {
    pub target: TargetId,
    /// Team key without the monetary tag
    pub team: String,
    pub amount: f64,
}

/// Everything the aggregation pass derives besides the in-place project roll-ups
#[derive(Debug, Default)]
pub struct Rollup {
    /// Effective priority to targets of ordinary, non-strategic projects
    pub buckets: BTreeMap<Priority, Vec<TargetId>>,
    /// Team to initiative to headcount, at or above the threshold
    pub crosstab: BTreeMap<String, BTreeMap<String, f64>>,
    pub dollar_asks: Vec<DollarAsk>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Rollup {
    /// Cross-tab total for one team across initiatives
    pub fn team_ask(&self, team: &str) -> f64 {
        self.crosstab
            .get(team)
            .map(|by_initiative| by_initiative.values().sum())
            .unwrap_or(0.0)
    }
}

/// Lower bound for resource queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityFloor {
    /// No filtering at all
    All,
    /// Explicit levels above zero and at least this value
    AtLeast(u8),
}

impl PriorityFloor {
    pub fn admits(self, priority: Priority) -> bool {
        match self {
            PriorityFloor::All => true,
            PriorityFloor::AtLeast(floor) => priority
                .level()
                .is_some_and(|level| level > 0 && level >= floor),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamTotals {
    pub per_team: BTreeMap<String, f64>,
    pub total: f64,
}
