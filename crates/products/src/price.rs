//! Exact fixed-point product price.

use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

use catalog_core::{ValidationError, ValueObject};

/// Fractional digits kept for every price.
pub const PRICE_SCALE: u32 = 2;

/// Total significant digits the store column holds (`NUMERIC(14,2)`).
pub const PRICE_PRECISION: u32 = 14;

/// Product price as an exact decimal.
///
/// Always normalized to [`PRICE_SCALE`] fractional digits, rounding half away
/// from zero, so `12.5`, `12.50` and `12.499999` all become `12.50`. Two
/// prices compare equal exactly when their stored text would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Price(Decimal);

impl ValueObject for Price {}

impl Price {
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        let mut normalized =
            value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        normalized.rescale(PRICE_SCALE);

        let limit = Decimal::from(10i64.pow(PRICE_PRECISION - PRICE_SCALE));
        if normalized.abs() >= limit {
            return Err(ValidationError::invalid_price(format!(
                "{value} exceeds {PRICE_PRECISION} digits with {PRICE_SCALE} decimals"
            )));
        }

        Ok(Self(normalized))
    }

    /// Build a price from an integer amount of the smallest unit (cents).
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        Self::new(Decimal::new(cents, PRICE_SCALE))
    }

    /// The price equal to `value` without rounding, if there is one.
    ///
    /// `12.5` and `12.500` give `12.50`; `12.499` has digits past
    /// [`PRICE_SCALE`] and gives `None`, as does anything out of range.
    pub fn exact(value: Decimal) -> Option<Self> {
        if value.round_dp(PRICE_SCALE) != value {
            return None;
        }
        Self::new(value).ok()
    }

    /// Parse decimal text without rounding it.
    ///
    /// Accepts plain or scientific notation. Surrounding whitespace and
    /// double quotes are stripped first, so `"\"12.50\" "` parses.
    pub fn parse_decimal(s: &str) -> Result<Decimal, ValidationError> {
        let text = s.trim_matches(|c: char| c == '"' || c.is_whitespace());
        let invalid = |reason: &dyn core::fmt::Display| ValidationError::invalid_price(format!("{s:?}: {reason}"));

        if let Ok(value) = Decimal::from_str(text) {
            return Ok(value);
        }

        let Some((mantissa, exponent)) = text.split_once(['e', 'E']) else {
            return Err(invalid(&"not a decimal number"));
        };
        let mantissa = Decimal::from_str(mantissa).map_err(|e| invalid(&e))?;
        let exponent = exponent.parse::<i64>().map_err(|e| invalid(&e))?;

        let scale = i64::from(mantissa.scale()) - exponent;
        if scale > i64::from(MAX_DECIMAL_SCALE) {
            return truncate_to_max_scale(mantissa, scale as u64).ok_or_else(|| invalid(&"out of range"));
        }
        Decimal::from_scientific(text).map_err(|e| invalid(&e))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl Default for Price {
    fn default() -> Self {
        Self(Decimal::new(0, PRICE_SCALE))
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl FromStr for Price {
    type Err = ValidationError;

    /// Parses with [`Price::parse_decimal`], then rounds to [`PRICE_SCALE`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(Self::parse_decimal(s)?)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// Largest scale a `Decimal` can carry.
const MAX_DECIMAL_SCALE: u32 = 28;

/// Scientific text whose exponent pushes the scale past what `Decimal` holds.
///
/// The mantissa is truncated to [`MAX_DECIMAL_SCALE`] places. When nonzero
/// digits are dropped and the last kept digit is zero, that digit is set to
/// one, so the result still rounds like the full value and still reads as
/// inexact at two places.
fn truncate_to_max_scale(mantissa: Decimal, scale: u64) -> Option<Decimal> {
    let dropped = scale - u64::from(MAX_DECIMAL_SCALE);
    let digits = mantissa.mantissa();
    let (kept, rest) = if dropped >= 30 {
        (0, digits)
    } else {
        let divisor = 10i128.pow(dropped as u32);
        (digits / divisor, digits % divisor)
    };
    let kept = if rest != 0 && kept % 10 == 0 {
        kept + digits.signum()
    } else {
        kept
    };
    Decimal::try_from_i128_with_scale(kept, MAX_DECIMAL_SCALE).ok()
}
