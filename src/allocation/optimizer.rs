//! Entry points that run the whole pipeline on a trade history.
//!
//! Each call is a pure function of its arguments: statistics are derived,
//! bounds are checked, and the solver runs, with no state kept between calls.

use crate::allocation::baseline::baseline_cost;
use crate::allocation::bounds::derive_bounds;
use crate::allocation::error::AllocationError;
use crate::allocation::request::{
    AllocationRequest, DEFAULT_CAPACITY_PERCENTILE, validate_target_volume,
};
use crate::allocation::result::{AllocationReport, AllocationResult};
use crate::allocation::solver::solve;
use crate::allocation::stats::maker_stats;
use crate::allocation::trade::TradeRecord;
use tracing::debug;

/// Allocates `target_volume` across the makers found in `trades`.
///
/// # Arguments
///
/// * `trades` - Historical trade records
/// * `target_volume` - Volume to distribute, strictly positive
/// * `min_share` - Minimum fraction of the target per maker
/// * `max_share` - Maximum fraction of the target per maker
/// * `risk_aversion` - Weight on the rate standard deviation
/// * `capacity_percentile` - Quantile of daily volume used as capacity
///
/// # Errors
///
/// Any [`AllocationError`] except `Solver` indicates a rejected request or
/// malformed data. No partial allocation is ever returned.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use maker_allocation::{TradeRecord, compute_allocation};
///
/// let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
/// let trades = vec![
///     TradeRecord::new(day, "BANK_A", 800.0, 1.02),
///     TradeRecord::new(day, "BANK_B", 800.0, 1.01),
/// ];
///
/// let result = compute_allocation(&trades, 1000.0, 0.2, 0.8, 0.0, 0.95).unwrap();
/// assert_eq!(result.allocations[0].maker_bank, "BANK_B");
/// assert!((result.get("BANK_B").unwrap().alloc_volume - 800.0).abs() < 1e-9);
/// ```
pub fn compute_allocation(
    trades: &[TradeRecord],
    target_volume: f64,
    min_share: f64,
    max_share: f64,
    risk_aversion: f64,
    capacity_percentile: f64,
) -> Result<AllocationResult, AllocationError> {
    let request = AllocationRequest::new(target_volume, min_share, max_share)
        .with_risk_aversion(risk_aversion)
        .with_capacity_percentile(capacity_percentile);
    optimize(trades, &request)
}

/// Allocates according to an [`AllocationRequest`].
///
/// # Errors
///
/// See [`compute_allocation`].
pub fn optimize(
    trades: &[TradeRecord],
    request: &AllocationRequest,
) -> Result<AllocationResult, AllocationError> {
    request.validate()?;
    debug!(
        "optimizing {} over {} trades (shares {}..{}, risk aversion {})",
        request.target_volume,
        trades.len(),
        request.min_share,
        request.max_share,
        request.risk_aversion
    );

    let stats = maker_stats(trades, request.capacity_percentile)?;
    let bounds = derive_bounds(&stats, request)?;
    solve(&stats, &bounds, request)
}

/// Cost of allocating `target_volume` in proportion to each maker's share of
/// historical volume, priced at average rates.
///
/// Returns 0 when the history holds no volume.
///
/// # Errors
///
/// Returns `AllocationError::Validation` if `target_volume` is not a positive
/// finite number and `AllocationError::Data` if a record is malformed.
pub fn compute_baseline_cost(
    trades: &[TradeRecord],
    target_volume: f64,
) -> Result<f64, AllocationError> {
    validate_target_volume(target_volume)?;
    let stats = maker_stats(trades, DEFAULT_CAPACITY_PERCENTILE)?;
    Ok(baseline_cost(&stats, target_volume))
}

/// Runs the optimizer and prices the proportional baseline on the same
/// statistics.
///
/// # Errors
///
/// See [`compute_allocation`].
pub fn compare_with_baseline(
    trades: &[TradeRecord],
    request: &AllocationRequest,
) -> Result<AllocationReport, AllocationError> {
    request.validate()?;
    let stats = maker_stats(trades, request.capacity_percentile)?;
    let bounds = derive_bounds(&stats, request)?;
    let result = solve(&stats, &bounds, request)?;
    let baseline = baseline_cost(&stats, request.target_volume);

    let report = AllocationReport::new(result, baseline);
    debug!(
        "baseline cost {}, optimized cost {}, savings {}",
        report.baseline_cost, report.result.expected_cost, report.savings
    );
    Ok(report)
}
