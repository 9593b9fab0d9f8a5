//! Menu item prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("Price is required.")]
    Empty,
    /// The input is not a number, or is negative.
    #[error("Price must be a valid positive number.")]
    Invalid,
    /// The price exceeds the maximum.
    #[error("Price must not exceed $9,999.99.")]
    TooLarge,
}

/// A menu item price in dollars.
///
/// Bounded to `0.00..=9999.99`, matching the `numeric(6,2)` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Maximum representable price.
    pub const MAX_DOLLARS: i64 = 9999;

    /// Parse a price from form input.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Empty`] for blank input, [`PriceError::Invalid`]
    /// for non-numeric or negative input, and [`PriceError::TooLarge`] above
    /// $9,999.99.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount: Decimal = trimmed.parse().map_err(|_| PriceError::Invalid)?;
        Self::try_from(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Format for display with two decimal places (e.g., `4.50`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        if amount.is_sign_negative() {
            return Err(PriceError::Invalid);
        }
        let max = Decimal::new(999_999, 2);
        if amount > max {
            return Err(PriceError::TooLarge);
        }
        Ok(Self(amount))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Price::parse("4.50").unwrap().display(), "4.50");
        assert_eq!(Price::parse("0").unwrap().display(), "0.00");
        assert_eq!(Price::parse(" 9999.99 ").unwrap().display(), "9999.99");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Price::parse("free"), Err(PriceError::Invalid));
        assert_eq!(Price::parse("-1.00"), Err(PriceError::Invalid));
    }

    #[test]
    fn test_parse_too_large() {
        assert_eq!(Price::parse("10000"), Err(PriceError::TooLarge));
        assert_eq!(Price::parse("10000.00"), Err(PriceError::TooLarge));
    }

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(format!("{}", Price::parse("3.5").unwrap()), "3.50");
    }
}
