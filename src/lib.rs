//! # Maker Allocation Optimizer
//!
//! Splits a large order across liquidity providers ("makers") so as to minimize
//! a risk-adjusted expected execution cost, without overconcentrating exposure
//! or exceeding any maker's realistic daily capacity.
//!
//! ## How It Works
//!
//! 1. **Maker statistics**: from the historical trades, each maker gets a mean
//!    rate, a sample standard deviation of the rate, a total volume, and a
//!    capacity estimate: a quantile (95% by default) of the volume it absorbed
//!    per trading day.
//!
//! 2. **Bounds**: every maker receives at least `min_share * target_volume` and
//!    at most `min(max_share * target_volume, capacity)`. The request is
//!    rejected up front when the floors exceed the target, when the caps cannot
//!    reach it, or when a single maker's capacity is below the floor.
//!
//! 3. **Solver**: the unit cost of a maker is
//!    `avg_rate + risk_aversion * std_rate`. The program
//!
//!    ```text
//!    minimize   Σ unit_cost_m * x_m
//!    subject to Σ x_m = target_volume
//!               lower_m <= x_m <= upper_m
//!    ```
//!
//!    is solved exactly: every maker starts at its floor and the rest of the
//!    target goes to the cheapest makers first, up to their caps. Ties in unit
//!    cost are broken by maker identifier, so results are reproducible.
//!
//! 4. **Baseline**: the cost of splitting the same target by each maker's
//!    historical share of volume, used to report savings.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use maker_allocation::prelude::*;
//!
//! let d1 = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
//! let d2 = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
//! let trades = vec![
//!     TradeRecord::new(d1, "BANK_A", 400.0, 1.0010),
//!     TradeRecord::new(d2, "BANK_A", 600.0, 1.0030),
//!     TradeRecord::new(d1, "BANK_B", 500.0, 1.0005),
//!     TradeRecord::new(d2, "BANK_B", 500.0, 1.0007),
//!     TradeRecord::new(d1, "BANK_C", 700.0, 1.0040),
//! ];
//!
//! let request = AllocationRequest::new(1_000.0, 0.1, 0.6).with_risk_aversion(1.0);
//! let report = compare_with_baseline(&trades, &request).unwrap();
//!
//! assert_eq!(report.result.status, SolveStatus::Optimal);
//! assert!((report.result.total_allocated() - 1_000.0).abs() < 1e-6);
//! assert!(report.savings >= 0.0);
//! ```
//!
//! ## Concurrency
//!
//! Every entry point is a pure, synchronous function of borrowed, immutable
//! inputs. There is no global state, so independent requests can run on any
//! number of threads without coordination.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` for stage summaries, `trace` for
//! each fill, `warn` for rejected requests) and never installs a subscriber.

pub mod allocation;

pub mod prelude;

pub use allocation::{
    AllocationError, AllocationReport, AllocationRequest, AllocationResult, Bound,
    DEFAULT_CAPACITY_PERCENTILE, DEFAULT_RISK_AVERSION, FEASIBILITY_TOLERANCE, MakerAllocation,
    MakerStats, RawTradeRecord, SolveStatus, TradeRecord, baseline_cost, compare_with_baseline,
    compute_allocation, compute_baseline_cost, derive_bounds, feasibility_tolerance, maker_stats,
    optimize, solve,
};
