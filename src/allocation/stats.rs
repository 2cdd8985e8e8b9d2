//! Per-maker rate statistics and daily capacity estimates.

use crate::allocation::error::AllocationError;
use crate::allocation::request::validate_capacity_percentile;
use crate::allocation::trade::TradeRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Statistics derived from one maker's trade history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakerStats {
    /// Mean execution rate
    pub avg_rate: f64,
    /// Sample standard deviation of the rate, 0 with fewer than two trades
    pub std_rate: f64,
    /// Total historical volume
    pub total_volume: f64,
    /// Quantile of the per-day volume series
    pub capacity: f64,
    /// Number of trades observed
    pub trade_count: usize,
    /// Number of distinct days the maker traded on
    pub trading_days: usize,
}

impl MakerStats {
    /// Risk-adjusted per-unit cost, `avg_rate + risk_aversion * std_rate`.
    #[must_use]
    #[inline]
    pub fn unit_cost(&self, risk_aversion: f64) -> f64 {
        self.avg_rate + risk_aversion * self.std_rate
    }
}

#[derive(Default)]
struct MakerAccumulator {
    rates: Vec<f64>,
    total_volume: f64,
    daily_volume: BTreeMap<NaiveDate, f64>,
}

/// Computes statistics for every maker present in `trades`.
///
/// Amounts are first summed per (date, maker); the capacity is the
/// `capacity_percentile` quantile of that daily series. The result is keyed
/// by maker identifier and iterates in lexicographic order.
///
/// # Errors
///
/// Returns `AllocationError::Validation` if `capacity_percentile` is outside
/// (0, 1), and `AllocationError::Data` if any record is malformed.
pub fn maker_stats(
    trades: &[TradeRecord],
    capacity_percentile: f64,
) -> Result<BTreeMap<String, MakerStats>, AllocationError> {
    validate_capacity_percentile(capacity_percentile)?;

    let mut accumulators: BTreeMap<&str, MakerAccumulator> = BTreeMap::new();
    for trade in trades {
        trade.validate()?;
        let acc = accumulators.entry(trade.maker_bank.as_str()).or_default();
        acc.rates.push(trade.rate);
        acc.total_volume += trade.amount;
        *acc.daily_volume.entry(trade.trade_date).or_insert(0.0) += trade.amount;
    }

    let stats: BTreeMap<String, MakerStats> = accumulators
        .into_iter()
        .map(|(maker, acc)| {
            let daily: Vec<f64> = acc.daily_volume.values().copied().collect();
            let stats = MakerStats {
                avg_rate: mean(&acc.rates),
                std_rate: sample_std(&acc.rates),
                total_volume: acc.total_volume,
                capacity: quantile(&daily, capacity_percentile),
                trade_count: acc.rates.len(),
                trading_days: daily.len(),
            };
            trace!(
                "maker {}: avg_rate {}, std_rate {}, capacity {} over {} days",
                maker, stats.avg_rate, stats.std_rate, stats.capacity, stats.trading_days
            );
            (maker.to_string(), stats)
        })
        .collect();

    debug!(
        "computed statistics for {} makers from {} trades",
        stats.len(),
        trades.len()
    );
    Ok(stats)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). Zero below two samples.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Quantile with linear interpolation between the closest ranks.
fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let position = q * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    let fraction = position - below as f64;
    sorted[below] + (sorted[above] - sorted[below]) * fraction
}
