//! Pool APR and liquidity-provider reward projections

use crate::error::{AmmError, AmmResult};
use crate::math::{ensure_non_negative, mul_div, PERCENT};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

pub const DAYS_PER_YEAR: Decimal = dec!(365);
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Annualized return in percent from one day of fees: `fees / tvl × 365 × 100`
pub fn try_pool_apr(fees_24h: Decimal, total_liquidity_usd: Decimal) -> AmmResult<Decimal> {
    ensure_non_negative(fees_24h)?;
    if total_liquidity_usd <= dec!(0) {
        return Err(AmmError::ZeroReserve {
            reserve: total_liquidity_usd,
        });
    }

    let daily_return = fees_24h
        .checked_div(total_liquidity_usd)
        .ok_or_else(|| AmmError::overflow("daily return"))?;
    daily_return
        .checked_mul(DAYS_PER_YEAR * PERCENT)
        .ok_or_else(|| AmmError::overflow("apr"))
}

/// Total form of [`try_pool_apr`]; an empty pool earns 0%
pub fn pool_apr(fees_24h: Decimal, total_liquidity_usd: Decimal) -> Decimal {
    try_pool_apr(fees_24h, total_liquidity_usd).unwrap_or(dec!(0))
}

/// APR after a staking boost multiplier
pub fn boosted_apr(apr_percent: Decimal, boost: Decimal) -> AmmResult<Decimal> {
    if boost < dec!(1) {
        return Err(AmmError::InvalidBoost { boost });
    }
    apr_percent
        .checked_mul(boost)
        .ok_or_else(|| AmmError::overflow("boosted apr"))
}

/// Expected rewards on a principal at a given APR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RewardProjection {
    pub daily: Decimal,
    pub monthly: Decimal,
    pub yearly: Decimal,
}

/// Project simple (non-compounding) rewards on `principal` at `apr_percent` with `boost`
pub fn project_rewards(
    principal: Decimal,
    apr_percent: Decimal,
    boost: Decimal,
) -> AmmResult<RewardProjection> {
    ensure_non_negative(principal)?;
    ensure_non_negative(apr_percent)?;
    let effective_apr = boosted_apr(apr_percent, boost)?;

    let yearly = mul_div(principal, effective_apr, PERCENT, "yearly rewards")?;
    Ok(RewardProjection {
        daily: yearly / DAYS_PER_YEAR,
        monthly: yearly / MONTHS_PER_YEAR,
        yearly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_apr() {
        assert_eq!(pool_apr(dec!(1000), dec!(2_000_000)), dec!(18.25));
    }

    #[test]
    fn test_empty_pool_apr_is_zero() {
        assert_eq!(pool_apr(dec!(1000), dec!(0)), dec!(0));
        assert!(matches!(
            try_pool_apr(dec!(1000), dec!(0)),
            Err(AmmError::ZeroReserve { .. })
        ));
        assert!(matches!(
            try_pool_apr(dec!(-1), dec!(10)),
            Err(AmmError::NegativeAmount { .. })
        ));
    }

    #[test]
    fn test_reward_projection() {
        let projection = project_rewards(dec!(1000), dec!(36.5), dec!(2)).unwrap();
        assert_eq!(projection.yearly, dec!(730));
        assert_eq!(projection.daily, dec!(2));
        assert!((projection.monthly - dec!(60.8333333333)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_boost_below_one_rejected() {
        assert_eq!(
            boosted_apr(dec!(45.5), dec!(0.5)).unwrap_err(),
            AmmError::InvalidBoost { boost: dec!(0.5) }
        );
        assert_eq!(boosted_apr(dec!(45.5), dec!(1.5)).unwrap(), dec!(68.25));
    }
}
