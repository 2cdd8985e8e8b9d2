//! Exact minimization of the risk-adjusted allocation cost.
//!
//! The problem is a linear program with a single pooled equality constraint
//! (`Σ x_m = target_volume`) and an independent box per maker. Its optimum
//! sits on a vertex where every maker is at a bound except at most one, so it
//! is found exactly by starting every maker at its floor and then filling the
//! cheapest makers first up to their caps.

use crate::allocation::bounds::Bound;
use crate::allocation::error::AllocationError;
use crate::allocation::request::{AllocationRequest, feasibility_tolerance};
use crate::allocation::result::{AllocationResult, MakerAllocation, SolveStatus};
use crate::allocation::stats::MakerStats;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Computes the cost-minimizing allocation within the given bounds.
///
/// Makers are filled in ascending order of unit cost, exact ties being broken
/// by maker identifier so that repeated calls produce identical output.
///
/// The bounds are expected to come from
/// [`derive_bounds`](crate::allocation::bounds::derive_bounds). Bounds built
/// by hand are checked again here, and any volume left over within
/// [`feasibility_tolerance`] is given to the last maker filled so the
/// allocations add up to the target.
///
/// # Errors
///
/// Returns `AllocationError::Validation` for a malformed request and
/// `AllocationError::Solver` if the makers in `stats` and `bounds` differ,
/// if the floors sum above the target, if a floor lies above its cap, or if
/// the target volume cannot be closed.
pub fn solve(
    stats: &BTreeMap<String, MakerStats>,
    bounds: &BTreeMap<String, Bound>,
    request: &AllocationRequest,
) -> Result<AllocationResult, AllocationError> {
    request.validate()?;

    if stats.len() != bounds.len() || stats.keys().any(|maker| !bounds.contains_key(maker)) {
        return Err(AllocationError::solver(format!(
            "statistics cover {} makers but bounds cover {}",
            stats.len(),
            bounds.len()
        )));
    }

    let target_volume = request.target_volume;
    let risk_aversion = request.risk_aversion;
    let tolerance = feasibility_tolerance(target_volume);

    if let Some((maker, bound)) = bounds.iter().find(|(_, b)| b.lower > b.upper + tolerance) {
        return Err(AllocationError::solver(format!(
            "bound of maker {maker} has floor {} above cap {}",
            bound.lower, bound.upper
        )));
    }

    let mut volumes: BTreeMap<&str, f64> = bounds
        .iter()
        .map(|(maker, bound)| (maker.as_str(), bound.lower))
        .collect();
    let total_lower: f64 = volumes.values().sum();
    if total_lower > target_volume + tolerance {
        return Err(AllocationError::solver(format!(
            "floors sum to {total_lower}, above target volume {target_volume}"
        )));
    }
    let mut remaining = (target_volume - total_lower).max(0.0);

    let mut order: Vec<(&str, f64)> = stats
        .iter()
        .map(|(maker, s)| (maker.as_str(), s.unit_cost(risk_aversion)))
        .collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    let mut last_filled = order.first().map(|(maker, _)| *maker);
    for (maker, unit_cost) in &order {
        if remaining <= tolerance {
            break;
        }
        let room = bounds.get(*maker).map_or(0.0, Bound::room);
        let added = room.min(remaining);
        if added > 0.0 {
            if let Some(volume) = volumes.get_mut(maker) {
                *volume += added;
            }
            last_filled = Some(*maker);
        }
        remaining -= added;
        trace!(
            "filled {} with {} at unit cost {}, {} left",
            maker, added, unit_cost, remaining
        );
    }

    if remaining > tolerance {
        return Err(AllocationError::solver(format!(
            "{remaining} of target volume {target_volume} left unallocated after exhausting all makers"
        )));
    }
    if let Some(volume) = last_filled
        .filter(|_| remaining > 0.0)
        .and_then(|maker| volumes.get_mut(maker))
    {
        trace!("adding rounding residual {} to the last maker filled", remaining);
        *volume += remaining;
    }

    let mut allocations = Vec::with_capacity(stats.len());
    let mut objective_value = 0.0;
    let mut expected_cost = 0.0;
    for (maker, s) in stats {
        let Some(bound) = bounds.get(maker).copied() else {
            return Err(AllocationError::solver(format!("no bound for maker {maker}")));
        };
        let alloc_volume = volumes.get(maker.as_str()).copied().unwrap_or(bound.lower);
        let unit_cost = s.unit_cost(risk_aversion);
        let cost = alloc_volume * s.avg_rate;
        let risk_adj_cost = alloc_volume * unit_cost;
        objective_value += risk_adj_cost;
        expected_cost += cost;

        allocations.push(MakerAllocation {
            maker_bank: maker.clone(),
            avg_rate: s.avg_rate,
            std_rate: s.std_rate,
            capacity: s.capacity,
            lower_bound: bound.lower,
            upper_bound: bound.upper,
            alloc_volume,
            alloc_pct: alloc_volume / target_volume,
            unit_cost,
            cost,
            risk_adj_cost,
        });
    }
    allocations.sort_by(by_volume_desc);

    debug!(
        "allocated {} across {} makers: objective {}, expected cost {}",
        target_volume,
        allocations.len(),
        objective_value,
        expected_cost
    );

    Ok(AllocationResult {
        allocations,
        target_volume,
        objective_value,
        expected_cost,
        status: SolveStatus::Optimal,
    })
}

fn by_volume_desc(a: &MakerAllocation, b: &MakerAllocation) -> Ordering {
    b.alloc_volume
        .total_cmp(&a.alloc_volume)
        .then_with(|| a.maker_bank.cmp(&b.maker_bank))
}
