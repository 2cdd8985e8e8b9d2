//! Per-maker allocation bounds and feasibility checks.

use crate::allocation::error::AllocationError;
use crate::allocation::request::{AllocationRequest, feasibility_tolerance};
use crate::allocation::stats::MakerStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Minimum number of makers an allocation can be spread over.
pub const MIN_MAKERS: usize = 2;

/// Box constraint on one maker's allocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    /// Minimum volume the maker must receive
    pub lower: f64,
    /// Maximum volume the maker may receive
    pub upper: f64,
}

impl Bound {
    /// Volume that can be added on top of the lower bound.
    #[must_use]
    #[inline]
    pub fn room(&self) -> f64 {
        (self.upper - self.lower).max(0.0)
    }

    /// Returns true if `volume` lies within the bound, allowing for `tolerance`.
    #[must_use]
    pub fn contains(&self, volume: f64, tolerance: f64) -> bool {
        volume >= self.lower - tolerance && volume <= self.upper + tolerance
    }
}

/// Derives the lower and upper bound of every maker and checks that the
/// feasible region is non-empty.
///
/// The lower bound is `min_share * target_volume` for every maker; the upper
/// bound is `min(max_share * target_volume, capacity)`. Sums are compared
/// with the slack given by [`feasibility_tolerance`].
///
/// # Errors
///
/// * `AllocationError::Validation` if the request is malformed.
/// * `AllocationError::InsufficientMakers` if fewer than two makers are present.
/// * `AllocationError::InfeasibleLowerBound` if the floors sum above the target.
/// * `AllocationError::InfeasibleCapacity` if the caps sum below the target.
/// * `AllocationError::InfeasibleMakerCapacity` if a maker's cap is below its floor.
pub fn derive_bounds(
    stats: &BTreeMap<String, MakerStats>,
    request: &AllocationRequest,
) -> Result<BTreeMap<String, Bound>, AllocationError> {
    request.validate()?;

    if stats.len() < MIN_MAKERS {
        warn!("rejecting allocation over {} maker(s)", stats.len());
        return Err(AllocationError::InsufficientMakers { found: stats.len() });
    }

    let target_volume = request.target_volume;
    let lower = request.min_volume();
    let share_cap = request.max_volume();

    let bounds: BTreeMap<String, Bound> = stats
        .iter()
        .map(|(maker, s)| {
            let bound = Bound {
                lower,
                upper: share_cap.min(s.capacity),
            };
            (maker.clone(), bound)
        })
        .collect();

    let tolerance = feasibility_tolerance(target_volume);
    let total_lower: f64 = bounds.values().map(|b| b.lower).sum();
    let total_upper: f64 = bounds.values().map(|b| b.upper).sum();
    debug!(
        "bounds for {} makers: total lower {}, total upper {}, target {}",
        bounds.len(),
        total_lower,
        total_upper,
        target_volume
    );

    if total_lower - tolerance > target_volume {
        warn!("floors {} exceed target {}", total_lower, target_volume);
        return Err(AllocationError::InfeasibleLowerBound {
            total_lower,
            target_volume,
        });
    }

    if total_upper + tolerance < target_volume {
        warn!("caps {} fall short of target {}", total_upper, target_volume);
        return Err(AllocationError::InfeasibleCapacity {
            total_upper,
            target_volume,
        });
    }

    if let Some((maker, bound)) = bounds
        .iter()
        .find(|(_, b)| b.upper + tolerance < b.lower)
    {
        warn!("maker {} cannot absorb its floor {}", maker, bound.lower);
        let capacity = stats.get(maker).map_or(bound.upper, |s| s.capacity);
        return Err(AllocationError::InfeasibleMakerCapacity {
            maker: maker.clone(),
            capacity,
            lower: bound.lower,
        });
    }

    Ok(bounds)
}
