//! Money type for representing currency amounts
//!
//! Amounts are stored in minor units (i64) so sums over a period never
//! accumulate floating-point error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Neg, Sub};

use crate::error::{PaydayError, PaydayResult};

/// A monetary amount in minor units (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount a single transaction, limit, or target may carry
    /// (999,999,999,999.99)
    pub const MAX_AMOUNT: Money = Money(99_999_999_999_999);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Sum of `amounts`, or a validation error when the total does not fit
    pub fn total<I>(amounts: I) -> PaydayResult<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, amount| acc.checked_add(amount))
            .ok_or_else(|| PaydayError::Validation("Total amount is too large".into()))
    }

    /// Check a stored amount: positive and at most [`Money::MAX_AMOUNT`]
    pub fn validate_amount(&self, what: &str) -> PaydayResult<()> {
        if !self.is_positive() {
            return Err(PaydayError::Validation(format!(
                "{} amount must be positive, got {}",
                what, self
            )));
        }
        if *self > Self::MAX_AMOUNT {
            return Err(PaydayError::Validation(format!(
                "{} amount must be at most {}, got {}",
                what,
                Self::MAX_AMOUNT,
                self
            )));
        }
        Ok(())
    }

    /// Amount as a floating-point value in major units, for percentages
    pub fn as_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// `self` as a percentage of `whole`; zero when `whole` is not positive
    pub fn percentage_of(&self, whole: Money) -> f64 {
        if !whole.is_positive() {
            return 0.0;
        }
        self.0 as f64 / whole.0 as f64 * 100.0
    }

    /// Parse a user-entered amount
    ///
    /// Accepts an optional leading `-`, an optional currency symbol made of
    /// non-digit characters, `,` thousands separators, and up to two
    /// decimal places: "10", "10.5", "$1,250.50", "-3.99".
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let digits = rest
            .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.')
            .replace(',', "");
        if digits.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits.as_str(), ""),
        };

        if fraction.len() > 2 || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol and thousands separators ("$1,250.50")
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let major = (self.0 / 100).unsigned_abs();
        let minor = (self.0 % 100).unsigned_abs();

        let digits = major.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        format!("{}{}{}.{:02}", sign, symbol, grouped, minor)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            (self.0 / 100).unsigned_abs(),
            (self.0 % 100).unsigned_abs()
        )
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$1,250.50").unwrap().cents(), 125050);
        assert_eq!(Money::parse("Rp 75,000").unwrap().cents(), 7_500_000);
        assert_eq!(Money::parse("-3.99").unwrap().cents(), -399);
        assert_eq!(Money::parse(".25").unwrap().cents(), 25);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(125050).format_with_symbol("$"), "$1,250.50");
        assert_eq!(Money::from_cents(99).format_with_symbol("$"), "$0.99");
        assert_eq!(
            Money::from_cents(-123456789).format_with_symbol("Rp"),
            "-Rp1,234,567.89"
        );
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);
        assert_eq!((a - b).cents(), 750);
        assert_eq!(a.checked_add(b), Some(Money::from_cents(1250)));
        assert_eq!((-a).cents(), -1000);

        let total = Money::total(vec![a, b, b]).unwrap();
        assert_eq!(total.cents(), 1500);
        assert_eq!(Money::total(Vec::new()).unwrap(), Money::zero());
    }

    #[test]
    fn test_total_overflow_is_error() {
        let huge = Money::parse("92,233,720,368,547,758.07").unwrap();
        let err = Money::total(vec![huge, huge]).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(huge.checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_validate_amount() {
        assert!(Money::from_cents(1).validate_amount("Limit").is_ok());
        assert!(Money::MAX_AMOUNT.validate_amount("Limit").is_ok());

        let err = Money::zero().validate_amount("Limit").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Limit amount must be positive, got 0.00"
        );

        let too_big = Money::from_cents(Money::MAX_AMOUNT.cents() + 1);
        assert!(too_big.validate_amount("Transaction").unwrap_err().is_validation());
    }

    #[test]
    fn test_percentage_of() {
        let spent = Money::from_cents(8000);
        assert_eq!(spent.percentage_of(Money::from_cents(10000)), 80.0);
        assert_eq!(spent.percentage_of(Money::zero()), 0.0);
    }
}
