//! # Slab-Lifting Polyfoam Estimate
//!
//! Estimates the polyurethane foam needed to raise a settled concrete slab
//! and the resulting material cost.
//!
//! ## Method
//!
//! - Area = width × length
//! - Average lift = max settlement × factor, where the factor depends on how
//!   many sides of the slab have settled (1 side: 0.50, 2 sides: 0.75,
//!   3 or 4 sides: 1.00)
//! - Void volume = area × average lift (converted to cubic yards)
//! - Material = 1 lb of foam per square foot per inch of average lift
//! - Cost = pounds × price per pound
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use lift_core::calculations::slab_lift::{calculate, EstimateInput};
//!
//! let input = EstimateInput {
//!     width_ft: 10.0,
//!     length_ft: 10.0,
//!     settled_sides: 2,
//!     settlement_in: 1.0,
//!     price_per_lb: 2.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.pounds, 75.0);
//! assert_eq!(result.total_cost, 150.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{CuFt, CuYd, Dollars, Feet, Inches, Pounds};

/// Factor returned for a settled-sides count outside 1..=4
pub const FALLBACK_FACTOR: f64 = 0.75;

/// Smallest slab width or length the form accepts (ft)
pub const MIN_DIMENSION_FT: f64 = 0.1;

/// Smallest settlement depth the form accepts (in)
pub const MIN_SETTLEMENT_IN: f64 = 0.1;

/// Smallest foam price the form accepts ($/lb)
pub const MIN_PRICE_PER_LB: f64 = 0.01;

/// Pounds of foam per square foot per inch of average lift
const POUNDS_PER_SQFT_INCH: f64 = 1.0;

/// Convert the maximum measured settlement into an average lift depth.
///
/// Out-of-range counts fall back to [`FALLBACK_FACTOR`] instead of failing;
/// front ends reject them earlier through [`EstimateInput::validate`].
///
/// ```rust
/// use lift_core::calculations::settlement_factor;
///
/// assert_eq!(settlement_factor(1), 0.5);
/// assert_eq!(settlement_factor(4), 1.0);
/// assert_eq!(settlement_factor(9), 0.75);
/// ```
pub fn settlement_factor(settled_sides: i64) -> f64 {
    match SettledSides::try_from(settled_sides) {
        Ok(sides) => sides.factor(),
        Err(_) => FALLBACK_FACTOR,
    }
}

/// Number of slab edges showing measurable settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum SettledSides {
    One,
    #[default]
    Two,
    Three,
    Four,
}

impl SettledSides {
    /// All options in display order (for pick lists)
    pub const ALL: [SettledSides; 4] = [
        SettledSides::One,
        SettledSides::Two,
        SettledSides::Three,
        SettledSides::Four,
    ];

    /// Number of settled edges
    pub fn count(self) -> i64 {
        match self {
            SettledSides::One => 1,
            SettledSides::Two => 2,
            SettledSides::Three => 3,
            SettledSides::Four => 4,
        }
    }

    /// Ratio of average lift to maximum measured settlement
    pub fn factor(self) -> f64 {
        match self {
            SettledSides::One => 0.5,
            SettledSides::Two => 0.75,
            // Three or four sides down is close to uniform settlement
            SettledSides::Three | SettledSides::Four => 1.0,
        }
    }
}

impl TryFrom<i64> for SettledSides {
    type Error = CalcError;

    fn try_from(count: i64) -> CalcResult<Self> {
        match count {
            1 => Ok(SettledSides::One),
            2 => Ok(SettledSides::Two),
            3 => Ok(SettledSides::Three),
            4 => Ok(SettledSides::Four),
            _ => Err(CalcError::invalid_input(
                "settled_sides",
                count.to_string(),
                "Settled sides must be 1, 2, 3, or 4",
            )),
        }
    }
}

impl From<SettledSides> for i64 {
    fn from(sides: SettledSides) -> i64 {
        sides.count()
    }
}

impl fmt::Display for SettledSides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Input parameters for a slab-lifting estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "width_ft": 10.0,
///   "length_ft": 10.0,
///   "settled_sides": 2,
///   "settlement_in": 1.0,
///   "price_per_lb": 2.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateInput {
    /// Slab width in feet
    pub width_ft: f64,

    /// Slab length in feet
    pub length_ft: f64,

    /// Number of settled sides, expected 1..=4
    pub settled_sides: i64,

    /// Settlement at the lowest point in inches
    pub settlement_in: f64,

    /// Price of polyfoam in dollars per pound
    pub price_per_lb: f64,
}

impl Default for EstimateInput {
    fn default() -> Self {
        EstimateInput {
            width_ft: 10.0,
            length_ft: 10.0,
            settled_sides: SettledSides::default().count(),
            settlement_in: 1.0,
            price_per_lb: 2.0,
        }
    }
}

impl EstimateInput {
    /// One-line description of [`EstimateInput::sample`]
    pub const SAMPLE_DESCRIPTION: &'static str =
        "Try This Sample (10x10 ft slab, 2 sides, 1 inch settlement, $2/lb)";

    /// Expected outcome of [`EstimateInput::sample`], rounded for display
    pub const SAMPLE_EXPECTATION: &'static str = "Expected: 0.23 cubic yards, 75 lbs, $150 cost.";

    /// The worked sample shown to new users (same values as the form defaults)
    pub fn sample() -> Self {
        EstimateInput::default()
    }

    /// Validate input parameters against the form's minimums.
    pub fn validate(&self) -> CalcResult<()> {
        check_minimum("width_ft", self.width_ft, MIN_DIMENSION_FT, "Width")?;
        check_minimum("length_ft", self.length_ft, MIN_DIMENSION_FT, "Length")?;
        SettledSides::try_from(self.settled_sides)?;
        check_minimum("settlement_in", self.settlement_in, MIN_SETTLEMENT_IN, "Settlement")?;
        check_minimum("price_per_lb", self.price_per_lb, MIN_PRICE_PER_LB, "Price per pound")?;
        Ok(())
    }

    /// Run the estimate without validation.
    pub fn estimate(&self) -> EstimateResult {
        estimate(
            self.width_ft,
            self.length_ft,
            self.settled_sides,
            self.settlement_in,
            self.price_per_lb,
        )
    }
}

fn check_minimum(field: &str, value: f64, minimum: f64, label: &str) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), format!("{label} must be a finite number")));
    }
    if value < minimum {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("{label} must be at least {minimum}"),
        ));
    }
    Ok(())
}

/// Results of a slab-lifting estimate.
///
/// Values are unrounded; rounding happens only when displayed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    /// Slab area in square feet
    pub area_sqft: f64,

    /// Settlement factor applied to the maximum settlement
    pub factor: f64,

    /// Estimated average lift in inches
    pub avg_settlement_in: f64,

    /// Expanded foam volume in cubic yards
    pub volume_cuyd: f64,

    /// Foam material in pounds
    pub pounds: f64,

    /// Material cost in dollars
    pub total_cost: f64,
}

/// Compute an estimate from raw inputs.
///
/// Never fails and never validates: non-positive or non-finite inputs give
/// meaningless numbers, and an out-of-range `settled_sides` uses the
/// fallback factor.
pub fn estimate(
    width_ft: f64,
    length_ft: f64,
    settled_sides: i64,
    settlement_in: f64,
    price_per_lb: f64,
) -> EstimateResult {
    let area = Feet(width_ft) * Feet(length_ft);
    let factor = settlement_factor(settled_sides);
    let avg_settlement = Inches(settlement_in) * factor;

    let volume_cuft: CuFt = area * Feet::from(avg_settlement);
    let volume = CuYd::from(volume_cuft);

    let pounds = Pounds(area.0 * avg_settlement.0 * POUNDS_PER_SQFT_INCH);
    let total_cost = Dollars(pounds.0 * price_per_lb);

    EstimateResult {
        area_sqft: area.value(),
        factor,
        avg_settlement_in: avg_settlement.value(),
        volume_cuyd: volume.value(),
        pounds: pounds.value(),
        total_cost: total_cost.value(),
    }
}

/// Validate the input, then compute the estimate.
pub fn calculate(input: &EstimateInput) -> CalcResult<EstimateResult> {
    input.validate()?;
    Ok(input.estimate())
}
