//! Pricing
//!
//! Conversions between wire prices (decimal major units) and [`Money`]
//! amounts held in minor units, plus the line arithmetic the cart needs.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Minor units per major unit for every supported currency.
const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Decimal places used when rendering minor units back into major units.
const MINOR_UNIT_SCALE: u32 = 2;

/// Errors that can occur converting a decimal price into money.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The price is below zero.
    #[error("price {0} is negative")]
    Negative(Decimal),

    /// The price does not fit into minor units.
    #[error("price {0} is out of range")]
    OutOfRange(Decimal),
}

/// Converts a decimal amount in major units (e.g. `49.99`) into money.
///
/// Fractions of a minor unit are rounded half away from zero.
///
/// # Errors
///
/// - [`PriceError::Negative`]: the amount is below zero.
/// - [`PriceError::OutOfRange`]: the amount overflows minor units.
pub fn money_from_decimal<'a>(
    amount: Decimal,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PriceError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(amount));
    }

    let minor_units = amount
        .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
        .and_then(|value| {
            value
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .ok_or(PriceError::OutOfRange(amount))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Converts money back into a decimal amount in major units.
pub fn decimal_from_money(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), MINOR_UNIT_SCALE)
}

/// Calculates `unit_price × quantity`.
///
/// Saturates instead of overflowing so totals never fail.
pub fn line_total<'a>(unit_price: &Money<'a, Currency>, quantity: u32) -> Money<'a, Currency> {
    let minor_units = unit_price
        .to_minor_units()
        .saturating_mul(i64::from(quantity));

    Money::from_minor(minor_units, unit_price.currency())
}
