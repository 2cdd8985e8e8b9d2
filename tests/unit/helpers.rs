//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use maker_allocation::{MakerStats, TradeRecord};
use std::collections::BTreeMap;

pub fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1)
        .and_then(|d| d.checked_add_days(Days::new(offset)))
        .expect("valid test date")
}

/// Trades from `(maker, day offset, amount, rate)` rows.
pub fn trades(rows: &[(&str, u64, f64, f64)]) -> Vec<TradeRecord> {
    rows.iter()
        .map(|(maker, offset, amount, rate)| TradeRecord::new(day(*offset), *maker, *amount, *rate))
        .collect()
}

/// Three makers A, B, C with average rates 1.01, 1.00, 1.02 and daily
/// capacities 600, 500, 400.
pub fn three_maker_history() -> Vec<TradeRecord> {
    trades(&[
        ("A", 0, 600.0, 1.01),
        ("B", 0, 500.0, 1.00),
        ("C", 0, 400.0, 1.02),
    ])
}

/// Statistics for makers named `M0`, `M1`, ... from `(avg_rate, std_rate, capacity)`.
pub fn stats_from(makers: &[(f64, f64, f64)]) -> BTreeMap<String, MakerStats> {
    makers
        .iter()
        .enumerate()
        .map(|(i, (avg_rate, std_rate, capacity))| {
            (
                format!("M{i}"),
                MakerStats {
                    avg_rate: *avg_rate,
                    std_rate: *std_rate,
                    total_volume: *capacity,
                    capacity: *capacity,
                    trade_count: 2,
                    trading_days: 1,
                },
            )
        })
        .collect()
}
