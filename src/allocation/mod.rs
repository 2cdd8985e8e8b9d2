//! Risk-adjusted allocation of a target volume across makers.

/// Proportional baseline used to benchmark the optimized allocation.
pub mod baseline;
/// Per-maker bounds and feasibility checks.
pub mod bounds;
pub mod error;
/// Pipeline entry points.
pub mod optimizer;
pub mod request;
pub mod result;
/// Exact greedy solver for the bounded allocation program.
pub mod solver;
/// Per-maker rate statistics and capacity estimation.
pub mod stats;
pub mod trade;

pub use baseline::{baseline_cost, baseline_volumes};
pub use bounds::{Bound, MIN_MAKERS, derive_bounds};
pub use error::AllocationError;
pub use optimizer::{compare_with_baseline, compute_allocation, compute_baseline_cost, optimize};
pub use request::{
    AllocationRequest, DEFAULT_CAPACITY_PERCENTILE, DEFAULT_RISK_AVERSION, FEASIBILITY_TOLERANCE,
    feasibility_tolerance,
};
pub use result::{AllocationReport, AllocationResult, MakerAllocation, SolveStatus};
pub use solver::solve;
pub use stats::{MakerStats, maker_stats};
pub use trade::{REQUIRED_FIELDS, RawTradeRecord, TradeRecord};
