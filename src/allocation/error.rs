//! Allocation error types

use thiserror::Error;

/// Errors that can occur while computing a maker allocation.
///
/// Every variant is a rejection of the request or of its input data; the
/// optimizer never returns a partial allocation alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AllocationError {
    /// Trade records are missing required fields or carry malformed values
    #[error("data error: {message}")]
    Data {
        /// Description of the offending field(s)
        message: String,
    },

    /// Request parameters are malformed
    #[error("validation error: {message}")]
    Validation {
        /// Description of the offending parameter
        message: String,
    },

    /// Fewer than two distinct makers are present in the dataset
    #[error("insufficient makers: at least 2 are required, found {found}")]
    InsufficientMakers {
        /// Number of distinct makers found
        found: usize,
    },

    /// The per-maker floors alone already exceed the target volume
    #[error(
        "infeasible lower bounds: sum of minimum allocations {total_lower} exceeds target volume {target_volume} (lower min_share)"
    )]
    InfeasibleLowerBound {
        /// Sum of every maker's lower bound
        total_lower: f64,
        /// Requested target volume
        target_volume: f64,
    },

    /// Filling every maker to its cap cannot reach the target volume
    #[error(
        "infeasible capacity: sum of maker caps {total_upper} is below target volume {target_volume} (raise max_share or lower the target)"
    )]
    InfeasibleCapacity {
        /// Sum of every maker's upper bound
        total_upper: f64,
        /// Requested target volume
        target_volume: f64,
    },

    /// A single maker cannot absorb even its uniform floor
    #[error(
        "infeasible capacity for maker {maker}: capacity {capacity} is below the minimum allocation {lower}"
    )]
    InfeasibleMakerCapacity {
        /// Maker whose capacity is below the floor
        maker: String,
        /// Estimated daily capacity of the maker
        capacity: f64,
        /// Uniform lower bound the maker cannot satisfy
        lower: f64,
    },

    /// Internal inconsistency in the solver after feasibility was validated
    #[error("solver error: {message}")]
    Solver {
        /// Description of the inconsistency
        message: String,
    },
}

impl AllocationError {
    /// Builds a [`AllocationError::Data`] from any displayable message.
    pub(crate) fn data(message: impl Into<String>) -> Self {
        AllocationError::Data {
            message: message.into(),
        }
    }

    /// Builds a [`AllocationError::Validation`] from any displayable message.
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        AllocationError::Validation {
            message: message.into(),
        }
    }

    /// Builds a [`AllocationError::Solver`] from any displayable message.
    pub(crate) fn solver(message: impl Into<String>) -> Self {
        AllocationError::Solver {
            message: message.into(),
        }
    }

    /// Returns true when the error describes an empty feasible region rather
    /// than malformed input.
    #[must_use]
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            AllocationError::InfeasibleLowerBound { .. }
                | AllocationError::InfeasibleCapacity { .. }
                | AllocationError::InfeasibleMakerCapacity { .. }
        )
    }
}
