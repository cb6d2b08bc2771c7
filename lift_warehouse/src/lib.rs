//! # lift_warehouse - Warehouse Connectivity Smoke Test
//!
//! Confirms that the credentials in the secrets file can reach Snowflake:
//! log in, run `SELECT CURRENT_VERSION()`, read a few rows of a demo
//! table, log out. Failures are reported per step and never affect the
//! estimator.
//!
//! ```rust,no_run
//! use lift_core::AppConfig;
//! use lift_warehouse::run_smoke_test;
//!
//! # async fn demo() {
//! let config = AppConfig::load(std::path::Path::new(".foamlift/secrets.toml")).unwrap();
//! let report = run_smoke_test(config).await;
//! for step in &report.steps {
//!     println!("{}", step);
//! }
//! # }
//! ```

pub mod client;
pub mod connection;
pub mod error;
pub mod smoke;
pub mod wire;

pub use client::{SnowflakeConnector, SnowflakeSession};
pub use connection::{Connector, LazyConnection, WarehouseSession};
pub use error::WarehouseError;
pub use smoke::{run_smoke_test, run_with, SmokeReport, SmokeStep, StepStatus};
pub use wire::QueryResult;
