//! # Input Form
//!
//! Text-backed form state shared by the front ends. Fields hold exactly
//! what the user typed; [`InputForm::parse`] turns them into a validated
//! [`EstimateInput`].

use serde::{Deserialize, Serialize};

use crate::calculations::{EstimateInput, SettledSides};
use crate::errors::{CalcError, CalcResult};

/// Parse a user-entered number, naming `field` in the error.
pub fn parse_number(field: &str, text: &str) -> CalcResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalcError::missing_field(field));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| CalcError::invalid_input(field, trimmed, "Not a number"))
}

/// Parse a settled-sides count typed as text.
pub fn parse_sides(text: &str) -> CalcResult<SettledSides> {
    let trimmed = text.trim();
    let count: i64 = trimmed
        .parse()
        .map_err(|_| CalcError::invalid_input("settled_sides", trimmed, "Not a whole number"))?;
    SettledSides::try_from(count)
}

/// Raw form contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputForm {
    pub width_ft: String,
    pub length_ft: String,
    pub settled_sides: SettledSides,
    pub settlement_in: String,
    pub price_per_lb: String,
}

impl Default for InputForm {
    fn default() -> Self {
        InputForm::from_input(&EstimateInput::default())
    }
}

impl InputForm {
    /// Fill the form from existing values.
    pub fn from_input(input: &EstimateInput) -> Self {
        InputForm {
            width_ft: format!("{:.1}", input.width_ft),
            length_ft: format!("{:.1}", input.length_ft),
            settled_sides: SettledSides::try_from(input.settled_sides).unwrap_or_default(),
            settlement_in: format!("{:.1}", input.settlement_in),
            price_per_lb: format!("{:.2}", input.price_per_lb),
        }
    }

    /// Parse and validate every field.
    pub fn parse(&self) -> CalcResult<EstimateInput> {
        let input = EstimateInput {
            width_ft: parse_number("width_ft", &self.width_ft)?,
            length_ft: parse_number("length_ft", &self.length_ft)?,
            settled_sides: self.settled_sides.count(),
            settlement_in: parse_number("settlement_in", &self.settlement_in)?,
            price_per_lb: parse_number("price_per_lb", &self.price_per_lb)?,
        };
        input.validate()?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_parses_to_default_input() {
        let form = InputForm::default();
        assert_eq!(form.width_ft, "10.0");
        assert_eq!(form.price_per_lb, "2.00");
        assert_eq!(form.parse().unwrap(), EstimateInput::default());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("w", " 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_number("w", "").unwrap_err(), CalcError::missing_field("w"));
        assert_eq!(parse_number("w", "ten").unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_parse_sides() {
        assert_eq!(parse_sides("3").unwrap(), SettledSides::Three);
        assert!(parse_sides("2.5").is_err());
        assert!(parse_sides("0").is_err());
    }

    #[test]
    fn test_form_rejects_below_minimum() {
        let form = InputForm {
            settlement_in: "0.0".to_string(),
            ..InputForm::default()
        };
        assert_eq!(form.parse().unwrap_err().field(), Some("settlement_in"));
    }

    #[test]
    fn test_form_reports_first_bad_field() {
        let form = InputForm {
            width_ft: "abc".to_string(),
            price_per_lb: "".to_string(),
            ..InputForm::default()
        };
        assert_eq!(form.parse().unwrap_err().field(), Some("width_ft"));
    }
}
