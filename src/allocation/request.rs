//! Request parameters for one allocation run.

use crate::allocation::error::AllocationError;
use serde::{Deserialize, Serialize};

/// Quantile of the per-day volume series used as a maker's capacity.
pub const DEFAULT_CAPACITY_PERCENTILE: f64 = 0.95;

/// Weight on the rate standard deviation when none is given.
pub const DEFAULT_RISK_AVERSION: f64 = 0.0;

/// Relative tolerance used by the feasibility checks and the solver.
///
/// Scaled by the target volume through [`feasibility_tolerance`], so that
/// rounding in sums of large volumes is not mistaken for a shortfall.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-9;

/// Absolute slack allowed when comparing volumes against `target_volume`.
///
/// # Examples
///
/// ```
/// use maker_allocation::feasibility_tolerance;
///
/// assert_eq!(feasibility_tolerance(0.5), 1e-9);
/// assert!((feasibility_tolerance(1e9) - 1.0).abs() < 1e-12);
/// ```
#[must_use]
#[inline]
pub fn feasibility_tolerance(target_volume: f64) -> f64 {
    FEASIBILITY_TOLERANCE * target_volume.abs().max(1.0)
}

/// Parameters of an allocation request.
///
/// Share bounds apply uniformly to every maker relative to `target_volume`.
///
/// # Examples
///
/// ```
/// use maker_allocation::AllocationRequest;
///
/// let request = AllocationRequest::new(1_000_000.0, 0.05, 0.4)
///     .with_risk_aversion(2.0)
///     .with_capacity_percentile(0.9);
/// assert!(request.validate().is_ok());
/// assert_eq!(request.min_volume(), 50_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Total volume to distribute, strictly positive
    pub target_volume: f64,
    /// Uniform minimum fraction of the target per maker
    pub min_share: f64,
    /// Uniform maximum fraction of the target per maker
    pub max_share: f64,
    /// Weight on `std_rate` in the unit cost
    #[serde(default = "default_risk_aversion")]
    pub risk_aversion: f64,
    /// Quantile of daily volume used for capacity estimation
    #[serde(default = "default_capacity_percentile")]
    pub capacity_percentile: f64,
}

fn default_risk_aversion() -> f64 {
    DEFAULT_RISK_AVERSION
}

fn default_capacity_percentile() -> f64 {
    DEFAULT_CAPACITY_PERCENTILE
}

impl AllocationRequest {
    /// Creates a request with default risk aversion and capacity percentile.
    #[must_use]
    pub fn new(target_volume: f64, min_share: f64, max_share: f64) -> Self {
        Self {
            target_volume,
            min_share,
            max_share,
            risk_aversion: DEFAULT_RISK_AVERSION,
            capacity_percentile: DEFAULT_CAPACITY_PERCENTILE,
        }
    }

    /// Sets the weight applied to the rate standard deviation.
    #[must_use]
    pub fn with_risk_aversion(mut self, risk_aversion: f64) -> Self {
        self.risk_aversion = risk_aversion;
        self
    }

    /// Sets the quantile used for capacity estimation.
    #[must_use]
    pub fn with_capacity_percentile(mut self, capacity_percentile: f64) -> Self {
        self.capacity_percentile = capacity_percentile;
        self
    }

    /// Uniform lower bound applied to every maker.
    #[must_use]
    #[inline]
    pub fn min_volume(&self) -> f64 {
        self.min_share * self.target_volume
    }

    /// Uniform share cap applied to every maker before capacity is considered.
    #[must_use]
    #[inline]
    pub fn max_volume(&self) -> f64 {
        self.max_share * self.target_volume
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// Returns `AllocationError::Validation` if `target_volume` is not a
    /// positive finite number, if `0 <= min_share <= max_share <= 1` does not
    /// hold, if `risk_aversion` is negative or not finite, or if
    /// `capacity_percentile` lies outside the open interval (0, 1).
    pub fn validate(&self) -> Result<(), AllocationError> {
        validate_target_volume(self.target_volume)?;
        // NaN fails every comparison, so it is rejected here as well
        if !(0.0 <= self.min_share && self.min_share <= self.max_share && self.max_share <= 1.0) {
            return Err(AllocationError::validation(format!(
                "expected 0 <= min_share <= max_share <= 1, got min_share {} and max_share {}",
                self.min_share, self.max_share
            )));
        }
        if !self.risk_aversion.is_finite() || self.risk_aversion < 0.0 {
            return Err(AllocationError::validation(format!(
                "risk_aversion must be >= 0, got {}",
                self.risk_aversion
            )));
        }
        validate_capacity_percentile(self.capacity_percentile)
    }
}

/// Checks that a target volume is a positive finite number.
pub(crate) fn validate_target_volume(target_volume: f64) -> Result<(), AllocationError> {
    if target_volume.is_finite() && target_volume > 0.0 {
        Ok(())
    } else {
        Err(AllocationError::validation(format!(
            "target_volume must be > 0, got {target_volume}"
        )))
    }
}

/// Checks that a capacity quantile lies in the open interval (0, 1).
pub(crate) fn validate_capacity_percentile(capacity_percentile: f64) -> Result<(), AllocationError> {
    if capacity_percentile > 0.0 && capacity_percentile < 1.0 {
        Ok(())
    } else {
        Err(AllocationError::validation(format!(
            "capacity_percentile must be in (0, 1), got {capacity_percentile}"
        )))
    }
}
