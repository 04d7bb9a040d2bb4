use crate::types::amount::{parse_cents, Amount};
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

/// Signed balance in hundredths of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Balance(i64);

impl Balance {
    pub fn from_cents(value: i64) -> Self {
        Balance(value)
    }

    pub fn to_cents(&self) -> i64 {
        self.0
    }

    pub fn zero() -> Self {
        Balance(0)
    }

    pub fn parse(input: &str) -> Option<Self> {
        parse_cents(input).map(Balance)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn covers(&self, amount: Amount) -> bool {
        self.0 >= amount.cents()
    }

    /// `None` when the credit would overflow.
    pub fn checked_add(&self, amount: Amount) -> Option<Balance> {
        self.0.checked_add(amount.cents()).map(Balance)
    }

    pub fn checked_sub(&self, amount: Amount) -> Option<Balance> {
        self.0.checked_sub(amount.cents()).map(Balance)
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Balance(amount.cents())
    }
}

impl Add for Balance {
    type Output = Balance;
    fn add(self, other: Balance) -> Balance {
        Balance(self.0 + other.0)
    }
}

impl Sub for Balance {
    type Output = Balance;
    fn sub(self, other: Balance) -> Balance {
        Balance(self.0 - other.0)
    }
}

impl Neg for Balance {
    type Output = Balance;
    fn neg(self) -> Balance {
        Balance(-self.0)
    }
}

impl Sum for Balance {
    fn sum<I: Iterator<Item = Balance>>(iter: I) -> Self {
        iter.fold(Balance::zero(), |acc, x| acc + x)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let multiplier = Amount::MULTIPLIER as u64;
        write!(f, "{}{}.{:02}", sign, abs / multiplier, abs % multiplier)
    }
}

impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_two_decimals() {
        assert_eq!(Balance::from_cents(20_200).to_string(), "202.00");
        assert_eq!(Balance::from_cents(-70).to_string(), "-0.70");
        assert_eq!(Balance::zero().to_string(), "0.00");
        assert_eq!(Balance::parse("202.00"), Some(Balance::from_cents(20_200)));
        assert_eq!(Balance::parse("0"), Some(Balance::zero()));
        assert_eq!(Balance::parse("lots"), None);
    }

    #[test]
    fn test_amount_arithmetic() {
        let amount = Amount::parse("4.30").unwrap();
        let balance = Balance::from_cents(1_000);
        assert_eq!(balance.checked_sub(amount).unwrap().to_string(), "5.70");
        assert_eq!(balance.checked_add(amount).unwrap().to_string(), "14.30");
        assert!(balance.covers(amount));
        assert!(!Balance::from_cents(429).covers(amount));
        assert!(Balance::from_cents(430).covers(amount));
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let max = Amount::from_cents(Amount::MAX_CENTS).unwrap();
        assert_eq!(Balance::from_cents(20_200).checked_add(max), None);
        assert_eq!(Balance::zero().checked_add(max), Some(Balance::from(max)));
        assert_eq!(Balance::from_cents(i64::MIN).checked_sub(max), None);
        assert_eq!(Balance::parse("79228162514264337593543950335"), None);
    }
}
