//! Monetary amounts in minor units (öre).
//!
//! Amounts arrive as integers, floats or decimal strings and are converted
//! exactly with `rust_decimal`, so the only rounding step is the final
//! snap to whole öre.

use crate::error::{Result, SalaryFileError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// Minor units per major currency unit.
const MINOR_PER_MAJOR: i64 = 100;

/// A monetary amount as supplied by the caller, before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput {
    /// Whole kronor.
    Integer(i64),

    /// Floating point kronor; must be finite.
    Float(f64),

    /// Decimal text such as `"1500.50"` or `"1.5e3"`.
    Text(String),

    /// Already-parsed decimal kronor.
    Decimal(Decimal),
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        AmountInput::Integer(value)
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Float(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        AmountInput::Decimal(value)
    }
}

impl fmt::Display for AmountInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountInput::Integer(v) => write!(f, "{}", v),
            AmountInput::Float(v) => write!(f, "{}", v),
            AmountInput::Text(v) => write!(f, "{}", v),
            AmountInput::Decimal(v) => write!(f, "{}", v),
        }
    }
}

impl AmountInput {
    /// Interprets the input as an exact decimal number of kronor.
    fn to_decimal(&self) -> Result<Decimal> {
        match self {
            AmountInput::Integer(v) => Ok(Decimal::from(*v)),
            AmountInput::Float(v) => {
                if !v.is_finite() {
                    return Err(self.invalid("not a finite number"));
                }
                // Display yields the shortest text that round-trips, so 0.1 stays 0.1
                Decimal::from_str(&v.to_string()).map_err(|_| self.invalid("out of range"))
            }
            AmountInput::Text(s) => {
                let trimmed = s.trim();
                Decimal::from_str(trimmed)
                    .or_else(|_| Decimal::from_scientific(trimmed))
                    .map_err(|_| self.invalid("not a number"))
            }
            AmountInput::Decimal(d) => Ok(*d),
        }
    }

    fn invalid(&self, reason: &'static str) -> SalaryFileError {
        SalaryFileError::InvalidAmount {
            value: self.to_string(),
            reason,
        }
    }
}

/// A non-negative amount counted in öre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct MinorUnits(u64);

impl MinorUnits {
    /// Zero öre.
    pub const ZERO: Self = MinorUnits(0);

    /// Creates an amount from a raw öre count.
    pub fn new(ore: u64) -> Self {
        MinorUnits(ore)
    }

    /// Converts a kronor amount to öre.
    ///
    /// The amount is multiplied by 100 exactly and rounded half-to-even
    /// ("banker's rounding"), so `0.125` becomes 12 öre and `0.135`
    /// becomes 14. Negative and non-finite amounts are rejected.
    pub fn from_amount(amount: &AmountInput) -> Result<Self> {
        let value = amount.to_decimal()?;
        if value.is_zero() {
            return Ok(MinorUnits::ZERO);
        }
        if value.is_sign_negative() {
            return Err(amount.invalid("negative amounts are not allowed"));
        }

        let ore = value
            .checked_mul(Decimal::from(MINOR_PER_MAJOR))
            .ok_or_else(|| amount.invalid("out of range"))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);

        ore.to_u64()
            .map(MinorUnits)
            .ok_or_else(|| amount.invalid("out of range"))
    }

    /// Raw öre count.
    pub fn ore(self) -> u64 {
        self.0
    }

    /// The amount in kronor with two decimal places.
    pub fn to_decimal(self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), 2)
    }

    /// Adds two amounts, returning `None` on overflow.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(MinorUnits)
    }

    /// Exact sum of already-rounded amounts, `None` on overflow.
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = MinorUnits>,
    {
        amounts
            .into_iter()
            .try_fold(MinorUnits::ZERO, MinorUnits::checked_add)
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
