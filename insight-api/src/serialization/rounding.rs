//! Decimal-precision rounding applied to numeric fields before they leave
//! the process.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Rounds numeric values to a fixed number of decimal places.
///
/// Rounding goes through the value's decimal-string representation rather
/// than binary floating-point arithmetic, so two logically equal values
/// always serialize to the same digits. Midpoints round away from zero.
/// Rounding an already-rounded value returns it unchanged.
#[derive(Debug, Clone, Copy)]
pub struct RoundingNormalizer {
    decimal_places: u32,
}

impl Default for RoundingNormalizer {
    fn default() -> Self {
        Self { decimal_places: 4 }
    }
}

impl RoundingNormalizer {
    pub fn new(decimal_places: u32) -> Self {
        Self { decimal_places }
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// Rounds a float through its shortest decimal representation.
    ///
    /// Non-finite values and values outside the decimal range pass through
    /// unchanged.
    pub fn round(&self, value: f64) -> f64 {
        let Ok(decimal) = Decimal::from_str(&value.to_string()) else {
            return value;
        };
        self.round_decimal(decimal).to_f64().unwrap_or(value)
    }

    /// Rounds a value when present; absence stays absent.
    pub fn round_opt(&self, value: Option<f64>) -> Option<f64> {
        value.map(|v| self.round(v))
    }

    /// Rounds an exact decimal.
    pub fn round_decimal(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointAwayFromZero)
    }
}
