//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are persisted as plain JSON numbers (`"price": 9.99`) but held as
//! [`Decimal`] in memory, so line totals and cart totals are exact and do not
//! depend on summation order.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Quantity;

/// A price in the store's currency (US dollars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at the largest representable
    /// amount.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity.get())))
    }
}

impl fmt::Display for Price {
    /// Formats as dollars with two decimals (e.g., `$19.98`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(2))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

/// Saturates at the largest representable amount.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(999).to_string(), "$9.99");
        assert_eq!(Price::from_cents(1000).to_string(), "$10.00");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_times_quantity() {
        let price = Price::from_cents(999);
        let two = Quantity::ONE.incremented();
        assert_eq!(price.times(two), Price::from_cents(1998));
    }

    #[test]
    fn test_sum_is_exact() {
        let total: Price = [Price::from_cents(10), Price::from_cents(20)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(30));
    }

    #[test]
    fn test_deserialize_json_number() {
        let price: Price = serde_json::from_str("9.99").unwrap();
        assert_eq!(price, Price::from_cents(999));

        let whole: Price = serde_json::from_str("109").unwrap();
        assert_eq!(whole, Price::from_cents(10_900));
    }

    #[test]
    fn test_serialize_json_number() {
        let json = serde_json::to_string(&Price::from_cents(2295)).unwrap();
        assert_eq!(json, "22.95");
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge: Price = serde_json::from_str("50000000000000000000000000000").unwrap();
        let two = Quantity::ONE.incremented();

        assert_eq!(huge.times(two).amount(), Decimal::MAX);
        assert_eq!((huge + huge).amount(), Decimal::MAX);

        let total: Price = [huge.times(two), huge, Price::from_cents(1)]
            .into_iter()
            .sum();
        assert_eq!(total.amount(), Decimal::MAX);
    }
}
