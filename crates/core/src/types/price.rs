//! Type-safe price representation using decimal arithmetic.
//!
//! All store prices are in US dollars with two decimal places. The discount
//! badge shown on product cards is derived from the original and discounted
//! price with [`discount_percent`].

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number: {0}")]
    NotANumber(String),
}

/// A dollar amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Wrap a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Build a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Parse a price typed into a form field.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Empty`] for blank input and
    /// [`PriceError::NotANumber`] when the input is not a decimal.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }
        Decimal::from_str(trimmed)
            .map(Self)
            .map_err(|_| PriceError::NotANumber(trimmed.to_owned()))
    }

    /// The underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display, e.g. `$19.99`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Percentage saved when buying at `discount` instead of `original`.
///
/// Computed as `round((original - discount) / original * 100)` with halves
/// rounded upward. Returns `None` when `original` is not positive, since no
/// meaningful percentage exists.
///
/// ```
/// use tehtehair_core::{Price, discount_percent};
///
/// let pct = discount_percent(Price::from_cents(2000), Price::from_cents(1500));
/// assert_eq!(pct, Some(25));
/// ```
#[must_use]
pub fn discount_percent(original: Price, discount: Price) -> Option<i64> {
    if original.0 <= Decimal::ZERO {
        return None;
    }
    let ratio = (original.0 - discount.0) / original.0 * Decimal::ONE_HUNDRED;
    let rounded = (ratio + Decimal::new(5, 1)).floor();
    i64::try_from(rounded).ok()
}
