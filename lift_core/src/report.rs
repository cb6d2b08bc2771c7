//! # Estimate Report
//!
//! Turns an [`EstimateResult`] into labelled, formatted metrics for the
//! front ends. Numbers are rounded here and nowhere else.
//!
//! ```rust
//! use lift_core::calculations::estimate;
//! use lift_core::config::DisplaySettings;
//! use lift_core::report::EstimateReport;
//!
//! let result = estimate(10.0, 10.0, 2, 1.0, 2.0);
//! let report = EstimateReport::new(&result, &DisplaySettings::default());
//! assert_eq!(report.total_cost.value, "$150.00");
//! ```

use serde::Serialize;

use crate::calculations::EstimateResult;
use crate::config::DisplaySettings;

/// Closing disclaimer shown under every estimate
pub const DISCLAIMER: &str = "Note: This is an estimate. Consult a professional for accurate assessments.";

/// A single labelled value, e.g. "Slab Area" / "100.00 sq ft"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

impl Metric {
    fn new(label: &'static str, value: String) -> Self {
        Metric { label, value }
    }
}

/// Formatted view of an estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateReport {
    pub area: Metric,
    pub avg_settlement: Metric,
    pub volume: Metric,
    pub pounds: Metric,
    pub total_cost: Metric,
}

impl EstimateReport {
    pub fn new(result: &EstimateResult, settings: &DisplaySettings) -> Self {
        let d = settings.decimals;
        EstimateReport {
            area: Metric::new("Slab Area", format!("{:.*} sq ft", d, result.area_sqft)),
            avg_settlement: Metric::new(
                "Average Settlement Depth",
                format!("{:.*} inches (factor: {:?})", d, result.avg_settlement_in, result.factor),
            ),
            volume: Metric::new("Cubic Yards of Polyfoam Required", format!("{:.*}", d, result.volume_cuyd)),
            pounds: Metric::new("Pounds of Polyfoam Used", format!("{:.*}", d, result.pounds)),
            total_cost: Metric::new(
                "Estimated Material Cost",
                format!("{}{:.*}", settings.currency_symbol, d, result.total_cost),
            ),
        }
    }

    /// Metrics for the left results column
    pub fn left_column(&self) -> [&Metric; 2] {
        [&self.area, &self.avg_settlement]
    }

    /// Metrics for the right results column
    pub fn right_column(&self) -> [&Metric; 2] {
        [&self.volume, &self.pounds]
    }

    /// All metrics in display order
    pub fn metrics(&self) -> [&Metric; 5] {
        [&self.area, &self.avg_settlement, &self.volume, &self.pounds, &self.total_cost]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::estimate;

    #[test]
    fn test_default_formatting() {
        let result = estimate(10.0, 10.0, 2, 1.0, 2.0);
        let report = EstimateReport::new(&result, &DisplaySettings::default());

        assert_eq!(report.area.value, "100.00 sq ft");
        assert_eq!(report.avg_settlement.value, "0.75 inches (factor: 0.75)");
        assert_eq!(report.volume.value, "0.23");
        assert_eq!(report.pounds.value, "75.00");
        assert_eq!(report.total_cost.value, "$150.00");
    }

    #[test]
    fn test_factor_shown_unrounded() {
        let result = estimate(1.0, 1.0, 4, 1.0, 2.0);
        let report = EstimateReport::new(&result, &DisplaySettings::default());
        assert_eq!(report.avg_settlement.value, "1.00 inches (factor: 1.0)");
        assert_eq!(report.total_cost.value, "$2.00");
    }

    #[test]
    fn test_custom_settings() {
        let settings = DisplaySettings {
            decimals: 3,
            currency_symbol: "€".to_string(),
        };
        let result = estimate(20.0, 5.0, 1, 2.0, 1.5);
        let report = EstimateReport::new(&result, &settings);

        assert_eq!(report.volume.value, "0.309");
        assert_eq!(report.total_cost.value, "€150.000");
    }

    #[test]
    fn test_metric_order() {
        let result = estimate(10.0, 10.0, 2, 1.0, 2.0);
        let report = EstimateReport::new(&result, &DisplaySettings::default());
        let labels: Vec<_> = report.metrics().iter().map(|m| m.label).collect();
        assert_eq!(labels[0], "Slab Area");
        assert_eq!(labels[4], "Estimated Material Cost");
        assert_eq!(report.left_column()[1].label, "Average Settlement Depth");
        assert_eq!(report.right_column()[0].label, "Cubic Yards of Polyfoam Required");
    }
}
