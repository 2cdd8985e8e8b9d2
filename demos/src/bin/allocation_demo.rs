// demos/src/bin/allocation_demo.rs
//
// This example splits a large order across five makers using a synthetic
// trade history, then compares the result with the naive allocation that
// follows each maker's historical share of volume.
//
// Functions demonstrated:
// - `maker_stats()`: per-maker rate statistics and daily capacity
// - `compare_with_baseline()`: optimized allocation plus baseline cost
// - `compute_allocation()`: the same run at increasing risk aversion
// - error reporting for infeasible requests
//
// Run this example with:
//   cargo run --bin allocation_demo
//   (from the demos directory)

use chrono::{Days, NaiveDate};
use maker_allocation::prelude::*;
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Maker Allocation Example");

    let history = build_history();
    info!("Synthetic history: {} trades", history.len());

    demo_maker_stats(&history)?;
    demo_optimized_vs_baseline(&history)?;
    demo_risk_aversion_sweep(&history)?;
    demo_infeasible_requests(&history);

    Ok(())
}

/// Five makers over twenty days, with different price levels, noise, and size.
fn build_history() -> Vec<TradeRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap_or_default();
    // (maker, base rate, rate noise, typical daily size)
    let makers = [
        ("BANK_ALPHA", 1.0850, 0.0004, 4_000_000.0),
        ("BANK_BRAVO", 1.0846, 0.0012, 2_500_000.0),
        ("BANK_CHARLIE", 1.0853, 0.0001, 6_000_000.0),
        ("BANK_DELTA", 1.0848, 0.0006, 1_500_000.0),
        ("BANK_ECHO", 1.0858, 0.0002, 3_000_000.0),
    ];

    let mut trades = Vec::new();
    for day in 0..20u64 {
        let Some(date) = start.checked_add_days(Days::new(day)) else {
            continue;
        };
        for (i, (maker, base, noise, size)) in makers.iter().enumerate() {
            // deterministic pseudo-noise in [-1, 1]
            let phase = ((day * 7 + i as u64 * 13) % 11) as f64 / 5.0 - 1.0;
            trades.push(TradeRecord::new(date, *maker, size * 0.6, base + noise * phase));
            trades.push(TradeRecord::new(
                date,
                *maker,
                size * (0.3 + 0.1 * phase.abs()),
                base - noise * phase,
            ));
        }
    }
    trades
}

fn demo_maker_stats(history: &[TradeRecord]) -> Result<(), AllocationError> {
    info!("\n=== Maker Statistics ===");
    let stats = maker_stats(history, 0.95)?;
    for (maker, s) in &stats {
        info!(
            "{:<13} avg {:.5}  std {:.5}  capacity {:>12.0}  volume {:>14.0}",
            maker, s.avg_rate, s.std_rate, s.capacity, s.total_volume
        );
    }
    Ok(())
}

fn demo_optimized_vs_baseline(history: &[TradeRecord]) -> Result<(), AllocationError> {
    info!("\n=== Optimized vs Baseline ===");
    let request = AllocationRequest::new(12_000_000.0, 0.05, 0.4).with_risk_aversion(1.0);
    let report = compare_with_baseline(history, &request)?;

    for row in &report.result.allocations {
        info!(
            "{:<13} {:>12.0} ({:>5.1}%)  bounds [{:.0}, {:.0}]  unit cost {:.5}",
            row.maker_bank,
            row.alloc_volume,
            row.alloc_pct * 100.0,
            row.lower_bound,
            row.upper_bound,
            row.unit_cost
        );
    }
    info!("Status:          {}", report.result.status);
    info!("Expected cost:   {:.2}", report.result.expected_cost);
    info!("Objective value: {:.2}", report.result.objective_value);
    info!("Baseline cost:   {:.2}", report.baseline_cost);
    info!(
        "Savings:         {:.2} ({:.3} bps)",
        report.savings,
        report.savings_bps()
    );

    match serde_json::to_string_pretty(&report.result) {
        Ok(json) => info!("Result as JSON for display:\n{json}"),
        Err(e) => warn!("Could not serialize result: {e}"),
    }
    Ok(())
}

fn demo_risk_aversion_sweep(history: &[TradeRecord]) -> Result<(), AllocationError> {
    info!("\n=== Risk Aversion Sweep ===");
    for risk_aversion in [0.0, 1.0, 5.0, 20.0] {
        let result = compute_allocation(history, 12_000_000.0, 0.05, 0.4, risk_aversion, 0.95)?;
        let split: Vec<String> = result
            .allocations
            .iter()
            .map(|a| format!("{} {:.1}%", a.maker_bank, a.alloc_pct * 100.0))
            .collect();
        info!("risk aversion {:>5.1}: {}", risk_aversion, split.join(", "));
    }
    Ok(())
}

fn demo_infeasible_requests(history: &[TradeRecord]) {
    info!("\n=== Infeasible Requests ===");
    let requests = [
        ("floors above target", AllocationRequest::new(12_000_000.0, 0.25, 0.4)),
        ("caps below target", AllocationRequest::new(60_000_000.0, 0.0, 1.0)),
        ("inverted shares", AllocationRequest::new(12_000_000.0, 0.5, 0.4)),
    ];
    for (label, request) in requests {
        match optimize(history, &request) {
            Ok(result) => info!("{label}: unexpectedly solved, status {}", result.status),
            Err(e) => warn!("{label}: {e}"),
        }
    }
}
