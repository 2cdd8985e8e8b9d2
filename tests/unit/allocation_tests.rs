//! End-to-end allocation scenarios driven from trade history.

use crate::helpers::{three_maker_history, trades};
use maker_allocation::{
    AllocationError, AllocationRequest, SolveStatus, compare_with_baseline, compute_allocation,
    compute_baseline_cost, optimize,
};

const TOL: f64 = 1e-6;

#[test]
fn test_three_maker_scenario() {
    let history = three_maker_history();

    let result = compute_allocation(&history, 1000.0, 0.1, 0.6, 0.0, 0.95)
        .expect("allocation should succeed");

    assert_eq!(result.status, SolveStatus::Optimal);
    assert_eq!(result.status.to_string(), "Optimal");
    assert_eq!(result.allocations[0].maker_bank, "B");

    let b = result.get("B").unwrap();
    let a = result.get("A").unwrap();
    let c = result.get("C").unwrap();
    assert!((b.alloc_volume - 500.0).abs() < TOL);
    assert!((b.upper_bound - 500.0).abs() < TOL);
    assert!((a.alloc_volume - 400.0).abs() < TOL);
    assert!((c.alloc_volume - 100.0).abs() < TOL);
    assert!((c.lower_bound - 100.0).abs() < TOL);
    assert!(b.alloc_volume > a.alloc_volume && b.alloc_volume > c.alloc_volume);

    let expected_cost = 500.0 * 1.00 + 400.0 * 1.01 + 100.0 * 1.02;
    assert!((result.expected_cost - expected_cost).abs() < TOL);
    // zero risk aversion makes both totals equal
    assert!((result.objective_value - result.expected_cost).abs() < TOL);
}

#[test]
fn test_single_maker_is_rejected() {
    let history = trades(&[("ONLY", 0, 1000.0, 1.0), ("ONLY", 1, 800.0, 1.1)]);

    let err = compute_allocation(&history, 500.0, 0.0, 1.0, 0.0, 0.95).unwrap_err();

    assert_eq!(err, AllocationError::InsufficientMakers { found: 1 });
}

#[test]
fn test_capacity_below_target_is_rejected() {
    let history = trades(&[
        ("A", 0, 300.0, 1.0),
        ("B", 0, 300.0, 1.0),
        ("C", 0, 300.0, 1.0),
    ]);

    let err = compute_allocation(&history, 1000.0, 0.0, 1.0, 0.0, 0.95).unwrap_err();

    match err {
        AllocationError::InfeasibleCapacity {
            total_upper,
            target_volume,
        } => {
            assert!((total_upper - 900.0).abs() < TOL);
            assert_eq!(target_volume, 1000.0);
        }
        other => panic!("expected InfeasibleCapacity, got {other:?}"),
    }
}

#[test]
fn test_feasibility_boundary_on_min_share() {
    let history = trades(&[
        ("A", 0, 5000.0, 1.00),
        ("B", 0, 5000.0, 1.01),
        ("C", 0, 5000.0, 1.02),
    ]);
    let eps = 1e-6;

    let over = compute_allocation(&history, 1000.0, 1.0 / 3.0 + eps, 0.9, 0.0, 0.95);
    assert!(matches!(
        over,
        Err(AllocationError::InfeasibleLowerBound { .. })
    ));

    let under = compute_allocation(&history, 1000.0, 1.0 / 3.0 - eps, 0.9, 0.0, 0.95)
        .expect("lowering min_share restores feasibility");
    assert!((under.total_allocated() - 1000.0).abs() < TOL);
}

#[test]
fn test_capacity_uses_daily_quantile() {
    // A trades 100 on nine days and 1000 on one; the 50th percentile ignores the spike
    let mut rows: Vec<(&str, u64, f64, f64)> = (0..9).map(|d| ("A", d, 100.0, 1.0)).collect();
    rows.push(("A", 9, 1000.0, 1.0));
    rows.push(("B", 0, 1000.0, 1.5));
    let history = trades(&rows);

    let result = compute_allocation(&history, 1000.0, 0.0, 1.0, 0.0, 0.5).unwrap();

    let a = result.get("A").unwrap();
    assert!((a.capacity - 100.0).abs() < TOL);
    assert!((a.alloc_volume - 100.0).abs() < TOL);
    assert!((result.get("B").unwrap().alloc_volume - 900.0).abs() < TOL);
}

#[test]
fn test_repeated_calls_are_bit_identical() {
    let history = trades(&[
        ("A", 0, 420.0, 1.0012),
        ("A", 1, 380.0, 1.0019),
        ("B", 0, 510.0, 1.0015),
        ("B", 2, 130.0, 1.0016),
        ("C", 1, 700.0, 1.0015),
        ("D", 1, 260.0, 1.0011),
        ("D", 2, 310.0, 1.0020),
    ]);
    let request = AllocationRequest::new(1200.0, 0.05, 0.5)
        .with_risk_aversion(0.8)
        .with_capacity_percentile(0.9);

    let first = optimize(&history, &request).unwrap();
    let second = optimize(&history, &request).unwrap();

    assert_eq!(first, second);
    for (x, y) in first.allocations.iter().zip(&second.allocations) {
        assert_eq!(x.alloc_volume.to_bits(), y.alloc_volume.to_bits());
    }
}

#[test]
fn test_rows_sorted_by_volume_descending() {
    let history = trades(&[
        ("A", 0, 600.0, 1.01),
        ("B", 0, 500.0, 1.00),
        ("C", 0, 400.0, 1.02),
        ("D", 0, 400.0, 1.03),
    ]);

    let result = compute_allocation(&history, 1000.0, 0.05, 0.6, 0.0, 0.95).unwrap();

    let volumes: Vec<f64> = result.allocations.iter().map(|a| a.alloc_volume).collect();
    assert!(volumes.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(result.allocations.len(), 4);
    assert_eq!(result.active_makers(), 4);
}

#[test]
fn test_baseline_cost_from_history() {
    let history = trades(&[
        ("A", 0, 250.0, 1.0),
        ("B", 0, 750.0, 2.0),
    ]);

    let cost = compute_baseline_cost(&history, 100.0).unwrap();

    assert!((cost - (25.0 * 1.0 + 75.0 * 2.0)).abs() < TOL);
}

#[test]
fn test_baseline_cost_without_volume_is_zero() {
    let history = trades(&[("A", 0, 0.0, 1.0), ("B", 0, 0.0, 2.0)]);

    assert_eq!(compute_baseline_cost(&history, 100.0).unwrap(), 0.0);
    assert_eq!(compute_baseline_cost(&[], 100.0).unwrap(), 0.0);
}

#[test]
fn test_report_savings_against_baseline() {
    let history = three_maker_history();
    let request = AllocationRequest::new(1000.0, 0.1, 0.6);

    let report = compare_with_baseline(&history, &request).unwrap();

    let baseline = compute_baseline_cost(&history, 1000.0).unwrap();
    assert!((report.baseline_cost - baseline).abs() < TOL);
    assert!((report.savings - (baseline - report.result.expected_cost)).abs() < TOL);
    // the cheapest maker gets more than its historical share
    assert!(report.savings > 0.0);
    assert!(report.savings_bps() > 0.0);
}

#[test]
fn test_result_serializes_for_display() {
    let result = compute_allocation(&three_maker_history(), 1000.0, 0.1, 0.6, 0.0, 0.95).unwrap();

    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["status"], "Optimal");
    assert_eq!(json["allocations"][0]["maker_bank"], "B");
    assert!(json["allocations"][0]["risk_adj_cost"].is_number());
}
