//! Reference cost of a naive, historically proportional allocation.

use crate::allocation::stats::MakerStats;
use std::collections::BTreeMap;

/// Cost of splitting `target_volume` by each maker's share of historical
/// volume, priced at the maker's average rate.
///
/// Returns 0 when there is no historical volume to apportion by.
#[must_use]
pub fn baseline_cost(stats: &BTreeMap<String, MakerStats>, target_volume: f64) -> f64 {
    let total: f64 = stats.values().map(|s| s.total_volume).sum();
    if total <= 0.0 {
        return 0.0;
    }
    stats
        .values()
        .map(|s| (s.total_volume / total) * target_volume * s.avg_rate)
        .sum()
}

/// Volume each maker would receive under the proportional split.
#[must_use]
pub fn baseline_volumes(
    stats: &BTreeMap<String, MakerStats>,
    target_volume: f64,
) -> BTreeMap<String, f64> {
    let total: f64 = stats.values().map(|s| s.total_volume).sum();
    stats
        .iter()
        .map(|(maker, s)| {
            let volume = if total > 0.0 {
                s.total_volume / total * target_volume
            } else {
                0.0
            };
            (maker.clone(), volume)
        })
        .collect()
}
