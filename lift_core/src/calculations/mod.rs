//! # Estimation Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - validate, then compute
//!
//! ## Available Calculations
//!
//! - [`slab_lift`] - Polyfoam material and cost for lifting a settled slab

pub mod slab_lift;

// Re-export commonly used types
pub use slab_lift::{
    calculate, estimate, settlement_factor, EstimateInput, EstimateResult, SettledSides,
    FALLBACK_FACTOR,
};
