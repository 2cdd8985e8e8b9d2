//! Property tests for the solver: conservation, bounds, optimality,
//! monotonicity in risk aversion, determinism.

use crate::helpers::stats_from;
use maker_allocation::{
    AllocationRequest, AllocationResult, Bound, derive_bounds, feasibility_tolerance, solve,
};
use proptest::prelude::*;

const TOL: f64 = 1e-6;

type Makers = Vec<(f64, f64, f64)>;

fn maker_sets() -> impl Strategy<Value = Makers> {
    prop_oneof![
        prop::collection::vec((0.9f64..1.1, 0.0f64..0.05, 50.0f64..1000.0), 2..8),
        prop::collection::vec((0.9f64..1.1, 0.0f64..0.05, 1e8f64..1e9), 2..8),
    ]
}

fn request_params() -> impl Strategy<Value = AllocationRequest> {
    let target = prop_oneof![100.0f64..3000.0, 1e8f64..5e9];
    (target, 0.0f64..0.2, 0.2f64..1.0, 0.0f64..5.0).prop_map(
        |(target, min_share, max_share, risk)| {
            AllocationRequest::new(target, min_share, max_share).with_risk_aversion(risk)
        },
    )
}

/// Requests whose target equals the summed capacity, so every cap binds.
fn capacity_bound_requests() -> impl Strategy<Value = (Makers, AllocationRequest)> {
    maker_sets().prop_flat_map(|makers| {
        // same order as the maker map, so the sum matches the summed caps bit for bit
        let target: f64 = makers.iter().map(|(_, _, capacity)| capacity).sum();
        (Just(makers), 0.0f64..0.1, 0.0f64..5.0).prop_map(move |(makers, min_share, risk)| {
            let request = AllocationRequest::new(target, min_share, 1.0).with_risk_aversion(risk);
            (makers, request)
        })
    })
}

fn scenarios() -> impl Strategy<Value = (Makers, AllocationRequest)> {
    prop_oneof![(maker_sets(), request_params()), capacity_bound_requests()]
}

/// Slack for volume comparisons at the scale of `target`.
fn slack(target: f64) -> f64 {
    TOL.max(feasibility_tolerance(target))
}

/// Solves when the bounds are feasible, `None` otherwise.
fn try_solve(makers: &[(f64, f64, f64)], request: &AllocationRequest) -> Option<AllocationResult> {
    let stats = stats_from(makers);
    let bounds = derive_bounds(&stats, request).ok()?;
    Some(solve(&stats, &bounds, request).expect("feasible bounds must solve"))
}

proptest! {
    #[test]
    fn allocation_conserves_target_volume((makers, request) in scenarios()) {
        if let Some(result) = try_solve(&makers, &request) {
            let gap = (result.total_allocated() - request.target_volume).abs();
            prop_assert!(gap <= slack(request.target_volume), "off target by {}", gap);
            let pct: f64 = result.allocations.iter().map(|a| a.alloc_pct).sum();
            prop_assert!((pct - 1.0).abs() < TOL);
        }
    }

    #[test]
    fn allocation_respects_bounds((makers, request) in scenarios()) {
        if let Some(result) = try_solve(&makers, &request) {
            let tolerance = slack(request.target_volume);
            for row in &result.allocations {
                let bound = Bound { lower: row.lower_bound, upper: row.upper_bound };
                prop_assert!(
                    bound.contains(row.alloc_volume, tolerance),
                    "{} got {} outside [{}, {}]",
                    row.maker_bank, row.alloc_volume, bound.lower, bound.upper
                );
                prop_assert!(row.upper_bound <= row.capacity);
            }
        }
    }

    #[test]
    fn no_pairwise_transfer_lowers_the_objective((makers, request) in scenarios()) {
        if let Some(result) = try_solve(&makers, &request) {
            let min_transfer = slack(request.target_volume);
            for to in &result.allocations {
                for from in &result.allocations {
                    if to.maker_bank == from.maker_bank {
                        continue;
                    }
                    let headroom = to.upper_bound - to.alloc_volume;
                    let excess = from.alloc_volume - from.lower_bound;
                    let delta = headroom.min(excess);
                    if delta > min_transfer {
                        // moving delta from `from` to `to` changes the objective by this much
                        let change = delta * (to.unit_cost - from.unit_cost);
                        prop_assert!(
                            change >= -1e-9 * delta,
                            "moving {} from {} to {} lowers the objective by {}",
                            delta, from.maker_bank, to.maker_bank, -change
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn risk_free_maker_share_grows_with_risk_aversion(
        others in prop::collection::vec((0.9f64..1.1, 0.001f64..0.05, 50.0f64..1000.0), 1..6),
        safe_rate in 0.9f64..1.1,
        safe_capacity in 50.0f64..1000.0,
        target in 100.0f64..1500.0,
        low in 0.0f64..2.0,
        bump in 0.0f64..3.0,
    ) {
        let mut makers = vec![(safe_rate, 0.0, safe_capacity)];
        makers.extend(others);
        let calm = AllocationRequest::new(target, 0.0, 1.0).with_risk_aversion(low);
        let averse = calm.with_risk_aversion(low + bump);

        if let (Some(a), Some(b)) = (try_solve(&makers, &calm), try_solve(&makers, &averse)) {
            let before = a.get("M0").map_or(0.0, |r| r.alloc_volume);
            let after = b.get("M0").map_or(0.0, |r| r.alloc_volume);
            prop_assert!(after + TOL >= before, "share fell from {} to {}", before, after);
        }
    }

    #[test]
    fn solving_twice_is_bit_identical((makers, request) in scenarios()) {
        let first = try_solve(&makers, &request);
        let second = try_solve(&makers, &request);
        prop_assert_eq!(&first, &second);
        if let (Some(a), Some(b)) = (first, second) {
            prop_assert_eq!(a.objective_value.to_bits(), b.objective_value.to_bits());
        }
    }
}
