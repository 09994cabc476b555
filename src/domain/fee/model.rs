//! Delivery fee value types

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;

/// Currency every fee is expressed in (ISO 4217)
pub const CURRENCY: &str = "EUR";

/// Non-negative monetary amount with exactly two fraction digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fee(Decimal);

impl Fee {
    pub const ZERO: Fee = Fee::from_cents(0);

    pub const fn from_cents(cents: u32) -> Self {
        Self(Decimal::from_parts(cents, 0, 0, false, 2))
    }
}

impl Default for Fee {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Fee {
    type Output = Fee;

    fn add(self, rhs: Fee) -> Fee {
        let mut sum = self.0 + rhs.0;
        sum.rescale(2);
        Fee(sum)
    }
}

impl Sum for Fee {
    fn sum<I: Iterator<Item = Fee>>(iter: I) -> Fee {
        iter.fold(Fee::ZERO, Add::add)
    }
}

impl std::fmt::Display for Fee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Components of a delivery fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeBreakdown {
    pub regional_base_fee: Fee,
    pub air_temperature_fee: Fee,
    pub wind_speed_fee: Fee,
    pub weather_phenomenon_fee: Fee,
}

impl FeeBreakdown {
    pub fn total(&self) -> Fee {
        [
            self.regional_base_fee,
            self.air_temperature_fee,
            self.wind_speed_fee,
            self.weather_phenomenon_fee,
        ]
        .into_iter()
        .sum()
    }

    /// Total with currency, e.g. `5.00 EUR`
    pub fn format_total(&self) -> String {
        format!("{} {}", self.total(), CURRENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn from_cents_keeps_two_fraction_digits() {
        assert_eq!(Fee::from_cents(400).to_string(), "4.00");
        assert_eq!(Fee::from_cents(50).to_string(), "0.50");
        assert_eq!(Fee::ZERO.to_string(), "0.00");
        assert_eq!(Fee::from_cents(350), Fee(Decimal::from_str("3.5").unwrap()));
    }

    #[test]
    fn addition_is_exact() {
        let total: Fee = std::iter::repeat(Fee::from_cents(10)).take(10).sum();
        assert_eq!(total, Fee::from_cents(100));
        assert_eq!(total.to_string(), "1.00");
    }

    #[test]
    fn breakdown_total_sums_components() {
        let breakdown = FeeBreakdown {
            regional_base_fee: Fee::from_cents(300),
            air_temperature_fee: Fee::from_cents(50),
            wind_speed_fee: Fee::from_cents(50),
            weather_phenomenon_fee: Fee::from_cents(100),
        };
        assert_eq!(breakdown.total(), Fee::from_cents(500));
        assert_eq!(breakdown.format_total(), "5.00 EUR");
    }
}
