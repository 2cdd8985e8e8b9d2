//! Allocation output handed back to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome status of a solve.
///
/// A solve that passed the feasibility checks is always optimal; anything
/// else surfaces as an error instead of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveStatus {
    /// The allocation minimizes the risk-adjusted cost
    Optimal,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
        }
    }
}

/// Allocation and cost breakdown for a single maker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakerAllocation {
    /// Maker identifier
    pub maker_bank: String,
    /// Mean historical rate
    pub avg_rate: f64,
    /// Sample standard deviation of the historical rate
    pub std_rate: f64,
    /// Estimated daily capacity
    pub capacity: f64,
    /// Minimum volume the maker had to receive
    pub lower_bound: f64,
    /// Maximum volume the maker could receive
    pub upper_bound: f64,
    /// Volume allocated to the maker
    pub alloc_volume: f64,
    /// Allocated fraction of the target volume
    pub alloc_pct: f64,
    /// Risk-adjusted per-unit cost
    pub unit_cost: f64,
    /// Nominal cost, `alloc_volume * avg_rate`
    pub cost: f64,
    /// Risk-adjusted cost, `alloc_volume * unit_cost`
    pub risk_adj_cost: f64,
}

/// Result of an allocation run.
///
/// Rows are ordered by allocated volume, largest first, with ties broken by
/// maker identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Per-maker breakdown
    pub allocations: Vec<MakerAllocation>,
    /// Volume that was distributed
    pub target_volume: f64,
    /// Total risk-adjusted cost
    pub objective_value: f64,
    /// Total nominal cost priced at average rates
    pub expected_cost: f64,
    /// Solve status
    pub status: SolveStatus,
}

impl AllocationResult {
    /// Looks up the row of a maker.
    #[must_use]
    pub fn get(&self, maker_bank: &str) -> Option<&MakerAllocation> {
        self.allocations.iter().find(|a| a.maker_bank == maker_bank)
    }

    /// Sum of allocated volumes.
    #[must_use]
    pub fn total_allocated(&self) -> f64 {
        self.allocations.iter().map(|a| a.alloc_volume).sum()
    }

    /// Number of makers that received a strictly positive volume.
    #[must_use]
    pub fn active_makers(&self) -> usize {
        self.allocations
            .iter()
            .filter(|a| a.alloc_volume > 0.0)
            .count()
    }

    /// Nominal cost difference against a reference cost; positive when the
    /// allocation is cheaper than the reference.
    #[must_use]
    pub fn savings_against(&self, reference_cost: f64) -> f64 {
        reference_cost - self.expected_cost
    }
}

/// Optimized allocation together with the naive proportional baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    /// Optimized allocation
    pub result: AllocationResult,
    /// Cost of splitting the target by historical volume share
    pub baseline_cost: f64,
    /// `baseline_cost - result.expected_cost`
    pub savings: f64,
}

impl AllocationReport {
    /// Builds a report from a result and its baseline cost.
    #[must_use]
    pub fn new(result: AllocationResult, baseline_cost: f64) -> Self {
        let savings = result.savings_against(baseline_cost);
        Self {
            result,
            baseline_cost,
            savings,
        }
    }

    /// Savings expressed in basis points of the baseline cost.
    ///
    /// Returns 0 when the baseline cost is 0.
    #[must_use]
    pub fn savings_bps(&self) -> f64 {
        if self.baseline_cost == 0.0 {
            return 0.0;
        }
        self.savings / self.baseline_cost.abs() * 10_000.0
    }
}
