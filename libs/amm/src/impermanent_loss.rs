//! Impermanent loss of a 50/50 constant-product position
//!
//! `IL = 2·sqrt(r) / (1 + r) − 1` with `r = current_price / initial_price`, reported in
//! percent. The value is zero at `r = 1` and negative everywhere else.

use crate::error::{AmmError, AmmResult};
use crate::math::{decimal_sqrt, PERCENT};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

/// Impermanent loss in percent for a price ratio `r > 0`
pub fn impermanent_loss_from_ratio(price_ratio: Decimal) -> AmmResult<Decimal> {
    if price_ratio <= dec!(0) {
        return Err(AmmError::InvalidPrice { price: price_ratio });
    }

    let sqrt_ratio = decimal_sqrt(price_ratio)?;
    let denominator = dec!(1)
        .checked_add(price_ratio)
        .ok_or_else(|| AmmError::overflow("impermanent loss"))?;
    let lp_over_hold = (dec!(2) * sqrt_ratio)
        .checked_div(denominator)
        .ok_or_else(|| AmmError::overflow("impermanent loss"))?;

    // sqrt rounding can nudge the ratio a hair above 1; holding never underperforms
    Ok(((lp_over_hold - dec!(1)) * PERCENT).min(dec!(0)))
}

/// Impermanent loss in percent between two prices of the same asset pair
pub fn try_impermanent_loss(initial_price: Decimal, current_price: Decimal) -> AmmResult<Decimal> {
    if initial_price <= dec!(0) {
        return Err(AmmError::InvalidPrice {
            price: initial_price,
        });
    }
    if current_price <= dec!(0) {
        return Err(AmmError::InvalidPrice {
            price: current_price,
        });
    }

    let price_ratio = current_price
        .checked_div(initial_price)
        .ok_or_else(|| AmmError::overflow("price ratio"))?;
    impermanent_loss_from_ratio(price_ratio)
}

/// Total form of [`try_impermanent_loss`]: invalid prices report no loss
pub fn impermanent_loss(initial_price: Decimal, current_price: Decimal) -> Decimal {
    try_impermanent_loss(initial_price, current_price).unwrap_or_else(|e| {
        debug!(%initial_price, %current_price, "Impermanent loss undefined: {}", e);
        dec!(0)
    })
}
