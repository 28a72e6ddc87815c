//! Fare amounts.
//!
//! Amounts are exact decimals. Sums never drift the way binary floats do
//! across many small additions, and rounding happens only when a value is
//! presented (see [`Fare::rounded`]).

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;

/// Decimal places used when presenting a fare.
const PRESENTATION_DP: u32 = 2;

/// Error returned when a fare amount is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fare: {reason}")]
pub struct InvalidFare {
    reason: &'static str,
}

/// A non-negative fare amount.
///
/// # Examples
///
/// ```
/// use fare_server::domain::Fare;
///
/// let a = Fare::parse("50.00").unwrap();
/// let b = Fare::parse("56").unwrap();
/// assert_eq!((a + b).to_string(), "106.00");
///
/// assert!(Fare::parse("-1").is_err());
/// assert!(Fare::parse("fifty").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fare(Decimal);

impl Fare {
    /// The zero fare.
    pub const ZERO: Fare = Fare(Decimal::ZERO);

    /// Create a fare from a decimal amount. Negative amounts are rejected.
    pub fn new(amount: Decimal) -> Result<Self, InvalidFare> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(InvalidFare {
                reason: "must not be negative",
            });
        }
        Ok(Fare(amount))
    }

    /// Parse a plain decimal amount such as `"106.00"`.
    pub fn parse(s: &str) -> Result<Self, InvalidFare> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| InvalidFare {
            reason: "not a decimal number",
        })?;
        Fare::new(amount)
    }

    /// Returns the exact amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a rate. Negative rates yield zero.
    pub fn scaled(&self, rate: Decimal) -> Fare {
        Fare((self.0 * rate).max(Decimal::ZERO))
    }

    /// The amount rounded to centavos for presentation.
    ///
    /// Halves round away from zero, the way a fare table or a cashier rounds
    /// (10.605 shows as 10.61), not to the nearest even digit.
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(PRESENTATION_DP, RoundingStrategy::MidpointAwayFromZero)
    }

    /// The rounded amount as a float, for JSON responses.
    pub fn to_f64(&self) -> f64 {
        self.rounded().to_f64().unwrap_or(0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Fare {
    type Output = Fare;

    fn add(self, rhs: Fare) -> Fare {
        Fare(self.0 + rhs.0)
    }
}

impl AddAssign for Fare {
    fn add_assign(&mut self, rhs: Fare) {
        self.0 += rhs.0;
    }
}

impl Sum for Fare {
    fn sum<I: Iterator<Item = Fare>>(iter: I) -> Fare {
        iter.fold(Fare::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Fare> for Fare {
    fn sum<I: Iterator<Item = &'a Fare>>(iter: I) -> Fare {
        iter.copied().sum()
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

impl FromStr for Fare {
    type Err = InvalidFare;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fare::parse(s)
    }
}
