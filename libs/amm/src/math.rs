//! Decimal helpers shared by the pricing and liquidity calculators
//!
//! Holds the square root used by bootstrap minting and impermanent loss, the checked
//! multiply-divide used by every pro-rata formula, and the rounding rules applied to
//! token-denominated results.

use crate::error::{AmmError, AmmResult};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Fractional digits kept on token-denominated results (18 decimals, WETH-style)
pub const TOKEN_DECIMALS: u32 = 18;

/// Basis-point denominator (10000 bps = 100%)
pub const BPS_DENOMINATOR: Decimal = dec!(10000);

/// Multiplier from a fraction to a percentage
pub const PERCENT: Decimal = dec!(100);

const MAX_SQRT_ITERATIONS: usize = 100;

/// Convert basis points to a fractional rate (30 bps = 0.003)
pub fn bps_to_rate(bps: u32) -> Decimal {
    Decimal::from(bps) / BPS_DENOMINATOR
}

/// Square root of a Decimal using Newton's method
///
/// The result is rounded to nearest at [`TOKEN_DECIMALS`] places, which makes perfect
/// squares come out exact (`sqrt(40000) == 200`).
pub fn decimal_sqrt(value: Decimal) -> AmmResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AmmError::NegativeAmount { amount: value });
    }
    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }

    // Any positive start converges; value/2 is closer for large inputs
    let mut x = if value > dec!(1) { value / dec!(2) } else { dec!(1) };
    let mut last_x = Decimal::ZERO;

    // Newton's method: x_new = (x + value/x) / 2
    for _ in 0..MAX_SQRT_ITERATIONS {
        let quotient = value
            .checked_div(x)
            .ok_or_else(|| AmmError::overflow("sqrt"))?;
        let next_x = x
            .checked_add(quotient)
            .ok_or_else(|| AmmError::overflow("sqrt"))?
            / dec!(2);

        // Fixed point reached, or oscillating between two neighbours in the last digit
        if next_x == x || next_x == last_x {
            x = next_x.min(x);
            break;
        }

        last_x = x;
        x = next_x;
    }

    Ok(x.round_dp_with_strategy(TOKEN_DECIMALS, RoundingStrategy::MidpointNearestEven))
}

/// `a * b / c` with overflow and zero-divisor checks
///
/// Falls back to dividing first when the intermediate product does not fit, trading a
/// little precision for range.
pub fn mul_div(a: Decimal, b: Decimal, c: Decimal, operation: &'static str) -> AmmResult<Decimal> {
    if c.is_zero() {
        return Err(AmmError::ZeroReserve { reserve: c });
    }
    match a.checked_mul(b) {
        Some(product) => product
            .checked_div(c)
            .ok_or_else(|| AmmError::overflow(operation)),
        None => a
            .checked_div(c)
            .and_then(|q| q.checked_mul(b))
            .ok_or_else(|| AmmError::overflow(operation)),
    }
}

/// Round toward zero at token precision (liquidity minted, amounts paid out)
pub fn floor_units(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(TOKEN_DECIMALS, RoundingStrategy::ToZero)
}

/// Round away from zero at token precision (amounts the caller must supply)
pub fn ceil_units(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(TOKEN_DECIMALS, RoundingStrategy::AwayFromZero)
}

/// Reject negative amounts
pub fn ensure_non_negative(amount: Decimal) -> AmmResult<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AmmError::NegativeAmount { amount });
    }
    Ok(())
}

/// Reject zero or negative reserves
pub fn ensure_reserve(reserve: Decimal) -> AmmResult<()> {
    if reserve <= Decimal::ZERO {
        return Err(AmmError::ZeroReserve { reserve });
    }
    Ok(())
}
