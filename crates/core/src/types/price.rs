//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price must be a decimal number")]
    Invalid,
    /// The amount is zero or negative.
    #[error("price must be greater than zero")]
    NotPositive,
    /// The amount carries more fraction digits than the currency allows.
    #[error("price must have at most {max} decimal places")]
    TooPrecise {
        /// Maximum allowed fraction digits.
        max: u32,
    },
}

/// A product price in the site currency (USD).
///
/// Amounts are stored as [`Decimal`] in the currency's standard unit
/// (dollars, not cents) and map to `NUMERIC` in `PostgreSQL`.
///
/// ## Examples
///
/// ```
/// use bazaar_core::Price;
///
/// let price = Price::parse("19.99").unwrap();
/// assert_eq!(price.to_string(), "$19.99");
///
/// assert!(Price::parse("0").is_err());     // not positive
/// assert!(Price::parse("1.999").is_err()); // sub-cent precision
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Maximum fraction digits (cents).
    pub const MAX_SCALE: u32 = 2;

    /// Create a price from a raw decimal amount.
    ///
    /// Intended for values already validated elsewhere (e.g., read from
    /// the database). Use [`Price::parse`] for user input.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Parse a `Price` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal number, is zero or
    /// negative, or has more than two fraction digits.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount: Decimal = s.trim().parse().map_err(|_| PriceError::Invalid)?;

        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }

        if amount.scale() > Self::MAX_SCALE {
            return Err(PriceError::TooPrecise {
                max: Self::MAX_SCALE,
            });
        }

        Ok(Self(amount))
    }

    /// The raw decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The total for `quantity` units at this price.
    #[must_use]
    pub fn line_total(&self, quantity: i32) -> Decimal {
        self.0 * Decimal::from(quantity)
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

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_prices() {
        assert!(Price::parse("10").is_ok());
        assert!(Price::parse("10.5").is_ok());
        assert!(Price::parse("10.50").is_ok());
        assert!(Price::parse("0.01").is_ok());
        assert!(Price::parse("  19.99 ").is_ok());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(Price::parse("ten"), Err(PriceError::Invalid)));
        assert!(matches!(Price::parse(""), Err(PriceError::Invalid)));
        assert!(matches!(Price::parse("$10"), Err(PriceError::Invalid)));
    }

    #[test]
    fn test_parse_not_positive() {
        assert!(matches!(Price::parse("0"), Err(PriceError::NotPositive)));
        assert!(matches!(
            Price::parse("-1.50"),
            Err(PriceError::NotPositive)
        ));
    }

    #[test]
    fn test_parse_too_precise() {
        assert!(matches!(
            Price::parse("1.999"),
            Err(PriceError::TooPrecise { max: 2 })
        ));
    }

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(Price::parse("10").unwrap().to_string(), "$10.00");
        assert_eq!(Price::parse("10.5").unwrap().to_string(), "$10.50");
        assert_eq!(Price::parse("19.99").unwrap().to_string(), "$19.99");
    }

    #[test]
    fn test_line_total() {
        let price = Price::parse("10.00").unwrap();
        assert_eq!(price.line_total(2), Decimal::new(2000, 2));
        assert_eq!(price.line_total(1), price.amount());
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = Price::parse("19.99").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
