//! Liquidity-token minting and burning
//!
//! Rounding policy:
//! - minted liquidity: floor at token precision (never over-issue)
//! - burned amounts: floor at token precision (never over-pay)
//! - amounts consumed from a deposit: ceil at token precision, capped by the deposit
//!
//! A deposit that does not match the pool ratio mints against its scarcer side. The
//! unused part of the other side is reported back as a refund in [`MintQuote`] rather
//! than donated to the pool.

use crate::error::{AmmError, AmmResult};
use crate::math::{
    ceil_units, decimal_sqrt, ensure_non_negative, ensure_reserve, floor_units, mul_div, PERCENT,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

/// Breakdown of a deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintQuote {
    /// Liquidity tokens issued
    pub liquidity: Decimal,
    /// Token0 actually added to the pool
    pub used0: Decimal,
    /// Token1 actually added to the pool
    pub used1: Decimal,
    /// Token0 to hand back to the depositor
    pub refund0: Decimal,
    /// Token1 to hand back to the depositor
    pub refund1: Decimal,
    /// Depositor's share of the post-deposit supply, in percent
    pub pool_share_percent: Decimal,
}

impl MintQuote {
    /// Nothing minted; the whole deposit is refunded
    pub fn rejected(amount0: Decimal, amount1: Decimal) -> Self {
        Self {
            liquidity: dec!(0),
            used0: dec!(0),
            used1: dec!(0),
            refund0: amount0.max(dec!(0)),
            refund1: amount1.max(dec!(0)),
            pool_share_percent: dec!(0),
        }
    }

    pub fn has_refund(&self) -> bool {
        self.refund0 > dec!(0) || self.refund1 > dec!(0)
    }
}

/// Token amounts released by burning liquidity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BurnAmounts {
    pub amount0: Decimal,
    pub amount1: Decimal,
}

impl BurnAmounts {
    pub fn zero() -> Self {
        Self {
            amount0: dec!(0),
            amount1: dec!(0),
        }
    }
}

/// Liquidity tokens to mint for a deposit
///
/// First deposit (`total_liquidity == 0`) mints the geometric mean `sqrt(amount0 * amount1)`.
/// Later deposits mint `min(amount0 * S / reserve0, amount1 * S / reserve1)`.
pub fn try_mint_liquidity(
    amount0: Decimal,
    amount1: Decimal,
    reserve0: Decimal,
    reserve1: Decimal,
    total_liquidity: Decimal,
) -> AmmResult<Decimal> {
    ensure_non_negative(amount0)?;
    ensure_non_negative(amount1)?;
    ensure_non_negative(total_liquidity)?;

    let liquidity = if total_liquidity.is_zero() {
        if amount0.is_zero() || amount1.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        let product = amount0
            .checked_mul(amount1)
            .ok_or_else(|| AmmError::overflow("bootstrap mint"))?;
        floor_units(decimal_sqrt(product)?)
    } else {
        ensure_reserve(reserve0)?;
        ensure_reserve(reserve1)?;
        let liquidity0 = mul_div(amount0, total_liquidity, reserve0, "mint token0")?;
        let liquidity1 = mul_div(amount1, total_liquidity, reserve1, "mint token1")?;
        floor_units(liquidity0.min(liquidity1))
    };

    if liquidity.is_zero() {
        return Err(AmmError::InputTooSmall {
            amount: amount0.min(amount1),
        });
    }
    Ok(liquidity)
}

/// Total form of [`try_mint_liquidity`]: degenerate deposits mint nothing
pub fn mint_liquidity(
    amount0: Decimal,
    amount1: Decimal,
    reserve0: Decimal,
    reserve1: Decimal,
    total_liquidity: Decimal,
) -> Decimal {
    try_mint_liquidity(amount0, amount1, reserve0, reserve1, total_liquidity).unwrap_or_else(
        |e| {
            debug!(%amount0, %amount1, %total_liquidity, "Mint collapsed to zero: {}", e);
            dec!(0)
        },
    )
}

/// Mint with the amounts used and refunded on each side
pub fn try_quote_mint(
    amount0: Decimal,
    amount1: Decimal,
    reserve0: Decimal,
    reserve1: Decimal,
    total_liquidity: Decimal,
) -> AmmResult<MintQuote> {
    let liquidity = try_mint_liquidity(amount0, amount1, reserve0, reserve1, total_liquidity)?;

    if total_liquidity.is_zero() {
        // Bootstrap fixes the price at the depositor's ratio; everything is used
        return Ok(MintQuote {
            liquidity,
            used0: amount0,
            used1: amount1,
            refund0: dec!(0),
            refund1: dec!(0),
            pool_share_percent: dec!(100),
        });
    }

    let used0 = ceil_units(mul_div(liquidity, reserve0, total_liquidity, "mint used0")?)
        .min(amount0);
    let used1 = ceil_units(mul_div(liquidity, reserve1, total_liquidity, "mint used1")?)
        .min(amount1);

    Ok(MintQuote {
        liquidity,
        used0,
        used1,
        refund0: amount0 - used0,
        refund1: amount1 - used1,
        pool_share_percent: pool_share_after_mint(liquidity, total_liquidity),
    })
}

/// Total form of [`try_quote_mint`]: degenerate deposits are refunded in full
pub fn quote_mint(
    amount0: Decimal,
    amount1: Decimal,
    reserve0: Decimal,
    reserve1: Decimal,
    total_liquidity: Decimal,
) -> MintQuote {
    try_quote_mint(amount0, amount1, reserve0, reserve1, total_liquidity).unwrap_or_else(|e| {
        debug!(%amount0, %amount1, %total_liquidity, "Mint quote rejected: {}", e);
        MintQuote::rejected(amount0, amount1)
    })
}

/// Token amounts returned for burning `liquidity` of `total_liquidity`
///
/// `amountN = liquidity * reserveN / total_liquidity`, floored.
pub fn try_burn_liquidity(
    liquidity: Decimal,
    total_liquidity: Decimal,
    reserve0: Decimal,
    reserve1: Decimal,
) -> AmmResult<BurnAmounts> {
    ensure_non_negative(liquidity)?;
    ensure_non_negative(reserve0)?;
    ensure_non_negative(reserve1)?;
    if total_liquidity <= dec!(0) {
        return Err(AmmError::EmptySupply);
    }
    if liquidity.is_zero() {
        return Err(AmmError::ZeroAmount);
    }
    if liquidity > total_liquidity {
        return Err(AmmError::ExceedsSupply {
            requested: liquidity,
            available: total_liquidity,
        });
    }

    Ok(BurnAmounts {
        amount0: floor_units(mul_div(liquidity, reserve0, total_liquidity, "burn token0")?),
        amount1: floor_units(mul_div(liquidity, reserve1, total_liquidity, "burn token1")?),
    })
}

/// Total form of [`try_burn_liquidity`]: degenerate burns release nothing
pub fn burn_liquidity(
    liquidity: Decimal,
    total_liquidity: Decimal,
    reserve0: Decimal,
    reserve1: Decimal,
) -> BurnAmounts {
    try_burn_liquidity(liquidity, total_liquidity, reserve0, reserve1).unwrap_or_else(|e| {
        debug!(%liquidity, %total_liquidity, "Burn collapsed to zero: {}", e);
        BurnAmounts::zero()
    })
}

/// Burn `percent` (0, 100] of a position holding `position_liquidity`
pub fn burn_percentage(
    percent: Decimal,
    position_liquidity: Decimal,
    total_liquidity: Decimal,
    reserve0: Decimal,
    reserve1: Decimal,
) -> AmmResult<BurnAmounts> {
    if percent <= dec!(0) || percent > PERCENT {
        return Err(AmmError::InvalidPercentage { percent });
    }
    ensure_non_negative(position_liquidity)?;

    let liquidity =
        floor_units(mul_div(position_liquidity, percent, PERCENT, "burn percentage")?);
    try_burn_liquidity(liquidity, total_liquidity, reserve0, reserve1)
}

/// Token1 amount matching `amount0` at the current pool ratio
pub fn paired_deposit(
    amount0: Decimal,
    reserve0: Decimal,
    reserve1: Decimal,
) -> AmmResult<Decimal> {
    ensure_non_negative(amount0)?;
    ensure_reserve(reserve0)?;
    ensure_non_negative(reserve1)?;
    mul_div(amount0, reserve1, reserve0, "paired deposit")
}

/// Share of `total_liquidity` held by `liquidity`, in percent
pub fn pool_share_percent(liquidity: Decimal, total_liquidity: Decimal) -> Decimal {
    if total_liquidity <= dec!(0) || liquidity <= dec!(0) {
        return dec!(0);
    }
    mul_div(liquidity, PERCENT, total_liquidity, "pool share")
        .unwrap_or(dec!(0))
        .min(PERCENT)
}

fn pool_share_after_mint(minted: Decimal, total_before: Decimal) -> Decimal {
    match total_before.checked_add(minted) {
        Some(total_after) => pool_share_percent(minted, total_after),
        None => dec!(0),
    }
}
