//! UI module for the Foamlift GUI
//!
//! # Panel Structure
//! - `header` - Page title and introduction
//! - `input_panel` - Left sidebar: the five inputs and "Calculate Estimate"
//! - `results_panel` - Estimate metrics, hint text, sample expander
//! - `warehouse_panel` - Warehouse connection test and its step report
//! - `status_bar` - Bottom status messages

pub mod header;
pub mod input_panel;
pub mod results_panel;
pub mod status_bar;
pub mod warehouse_panel;

/// Secondary text color
pub(crate) const MUTED: [f32; 3] = [0.5, 0.5, 0.5];

/// Error text color
pub(crate) const ERROR: [f32; 3] = [0.8, 0.2, 0.2];

/// Success text color
pub(crate) const SUCCESS: [f32; 3] = [0.2, 0.6, 0.2];
