//! Aggregation over a parsed plan

mod engine;
mod types;

pub use engine::{aggregate, resources_at_or_above};
pub use types::{DollarAsk, PriorityFloor, Rollup, RollupOptions, TeamTotals};
