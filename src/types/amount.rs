use crate::error::{Error, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Strictly positive token quantity, fixed-point with 2 decimal places.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const MULTIPLIER: i64 = 100;
    /// Largest whole-unit quantity representable in hundredths.
    pub const MAX_CENTS: i64 = (i64::MAX / Self::MULTIPLIER) * Self::MULTIPLIER;

    /// Parse user-entered text as a positive decimal, rounded to 2 places.
    pub fn parse(input: &str) -> Result<Self> {
        parse_cents(input)
            .and_then(Self::from_cents)
            .ok_or_else(|| Error::InvalidAmount {
                input: input.to_string(),
            })
    }

    pub fn from_cents(cents: i64) -> Option<Self> {
        (cents > 0 && cents <= Self::MAX_CENTS).then_some(Amount(cents))
    }

    pub fn whole(units: i64) -> Option<Self> {
        units.checked_mul(Self::MULTIPLIER).and_then(Self::from_cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn is_whole(&self) -> bool {
        self.0 % Self::MULTIPLIER == 0
    }

    /// Next whole unit at or above this amount. Never exceeds `MAX_CENTS`.
    pub fn ceil_whole(&self) -> Amount {
        match self.0 % Self::MULTIPLIER {
            0 => *self,
            rem => Amount(self.0 - rem + Self::MULTIPLIER),
        }
    }

    /// Gap to the next whole unit, `None` when already whole.
    pub fn round_up_delta(&self) -> Option<Amount> {
        Self::from_cents(self.ceil_whole().0 - self.0)
    }
}

/// Decimal text to hundredths, rounding half away from zero.
pub(crate) fn parse_cents(input: &str) -> Option<i64> {
    let value = Decimal::from_str(input.trim()).ok()?;
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.checked_mul(Decimal::from(Amount::MULTIPLIER))?.to_i64()
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / Self::MULTIPLIER, self.0 % Self::MULTIPLIER)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_amounts() {
        assert_eq!(Amount::parse("4.30").unwrap().cents(), 430);
        assert_eq!(Amount::parse("  12 ").unwrap().cents(), 1200);
        assert_eq!(Amount::parse("0.5").unwrap().cents(), 50);
        assert_eq!(Amount::parse("1.005").unwrap().cents(), 101);
    }

    #[test]
    fn test_parse_rejects_invalid_input() {
        for input in [
            "abc",
            "-5",
            "0",
            "0.00",
            "",
            "   ",
            "0.001",
            "79228162514264337593543950335",
            "92233720368547758.01",
        ] {
            match Amount::parse(input) {
                Err(Error::InvalidAmount { input: echoed }) => assert_eq!(echoed, input),
                other => panic!("expected InvalidAmount for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_round_up_delta() {
        let amount = Amount::parse("4.30").unwrap();
        assert!(!amount.is_whole());
        assert_eq!(amount.ceil_whole(), Amount::whole(5).unwrap());
        assert_eq!(amount.round_up_delta().unwrap().to_string(), "0.70");

        let whole = Amount::whole(7).unwrap();
        assert!(whole.is_whole());
        assert_eq!(whole.ceil_whole(), whole);
        assert_eq!(whole.round_up_delta(), None);
    }

    #[test]
    fn test_largest_amount() {
        let max = Amount::parse("92233720368547758").unwrap();
        assert_eq!(max.cents(), Amount::MAX_CENTS);
        assert!(max.is_whole());
        assert_eq!(max.ceil_whole(), max);

        let near = Amount::from_cents(Amount::MAX_CENTS - 1).unwrap();
        assert_eq!(near.ceil_whole(), max);
        assert_eq!(near.round_up_delta().unwrap().cents(), 1);
        assert_eq!(Amount::from_cents(Amount::MAX_CENTS + 1), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from_cents(5).unwrap().to_string(), "0.05");
        assert_eq!(Amount::from_cents(20_200).unwrap().to_string(), "202.00");
        assert_eq!(Amount::from_cents(0), None);
    }
}
