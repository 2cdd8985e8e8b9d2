//! Prelude module that re-exports commonly used types and functions.
//!
//! ```rust
//! use maker_allocation::prelude::*;
//! ```

// Input records
pub use crate::allocation::trade::{RawTradeRecord, TradeRecord};

// Request parameters
pub use crate::allocation::request::AllocationRequest;

// Pipeline stages
pub use crate::allocation::bounds::{Bound, derive_bounds};
pub use crate::allocation::solver::solve;
pub use crate::allocation::stats::{MakerStats, maker_stats};

// Entry points
pub use crate::allocation::optimizer::{
    compare_with_baseline, compute_allocation, compute_baseline_cost, optimize,
};

// Results and errors
pub use crate::allocation::error::AllocationError;
pub use crate::allocation::result::{
    AllocationReport, AllocationResult, MakerAllocation, SolveStatus,
};
