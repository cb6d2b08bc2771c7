//! # lift_core - Polyfoam Slab-Lifting Estimation Engine
//!
//! `lift_core` is the computational heart of Foamlift. It estimates the
//! polyurethane foam and material cost needed to lift a settled concrete
//! slab. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use lift_core::calculations::estimate;
//!
//! // 10 x 10 ft slab, 2 sides settled, 1 inch at the low point, $2/lb
//! let result = estimate(10.0, 10.0, 2, 1.0, 2.0);
//! assert_eq!(result.total_cost, 150.0);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Settlement factor lookup and the estimator
//! - [`form`] - Text-backed input form with the collector's validation
//! - [`report`] - Rounded, labelled display values
//! - [`config`] - Secrets file: display settings and warehouse credentials
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod errors;
pub mod form;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, estimate, settlement_factor, EstimateInput, EstimateResult, SettledSides};
pub use config::{AppConfig, DisplaySettings, WarehouseConfig};
pub use errors::{CalcError, CalcResult};
pub use form::InputForm;
pub use report::EstimateReport;
