//! Dynamic trading fee
//!
//! Trade size relative to pool depth stands in for volatility: the larger the trade
//! against `reserve_in`, the more of the volatility surcharge is added on top of the
//! base fee. The blended rate is bounded by [`FeeConfig::cap_rate`].

use crate::config::FeeConfig;
use crate::error::{AmmError, AmmResult};
use crate::math::{ensure_non_negative, ensure_reserve};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Normalized volatility metric in `[0, 1]`
///
/// `clamp(input_amount / reserve_in * sensitivity, 0, 1)`
pub fn volatility_metric(
    reserve_in: Decimal,
    input_amount: Decimal,
    config: &FeeConfig,
) -> AmmResult<Decimal> {
    ensure_reserve(reserve_in)?;
    ensure_non_negative(input_amount)?;

    // Any trade at or beyond reserve_in / sensitivity saturates the metric
    let raw = match input_amount
        .checked_div(reserve_in)
        .and_then(|ratio| ratio.checked_mul(config.volatility_sensitivity))
    {
        Some(raw) => raw,
        None => return Ok(dec!(1)),
    };
    Ok(raw.max(Decimal::ZERO).min(dec!(1)))
}

/// Effective fee rate (as a fraction) for a trade of `input_amount` into `reserve_in`
///
/// `reserve_out` does not enter the formula; it is accepted so the signature mirrors the
/// swap quoter's pool arguments.
pub fn effective_fee_rate(
    reserve_in: Decimal,
    _reserve_out: Decimal,
    input_amount: Decimal,
    config: &FeeConfig,
) -> AmmResult<Decimal> {
    let metric = volatility_metric(reserve_in, input_amount, config)?;
    let rate = config.base_rate() + config.surcharge_rate() * metric;
    Ok(rate.min(config.cap_rate()))
}

/// Validate a caller-supplied fee rate
pub fn validate_fee_rate(rate: Decimal) -> AmmResult<Decimal> {
    if (rate.is_sign_negative() && !rate.is_zero()) || rate >= dec!(1) {
        return Err(AmmError::InvalidFeeRate { rate });
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_input_charges_base_fee() {
        let config = FeeConfig::default();
        let rate = effective_fee_rate(dec!(1000), dec!(1000), dec!(0), &config).unwrap();
        assert_eq!(rate, dec!(0.003));
    }

    #[test]
    fn test_fee_scales_with_trade_size() {
        let config = FeeConfig::default();

        // 1% of reserve -> metric 0.1 -> 0.3% + 0.2% * 0.1
        let rate = effective_fee_rate(dec!(1000), dec!(1000), dec!(10), &config).unwrap();
        assert_eq!(rate, dec!(0.0032));

        // 5% of reserve -> metric 0.5
        let rate = effective_fee_rate(dec!(1000), dec!(1000), dec!(50), &config).unwrap();
        assert_eq!(rate, dec!(0.004));
    }

    #[test]
    fn test_large_trade_saturates() {
        let config = FeeConfig::default();
        let rate = effective_fee_rate(dec!(1000), dec!(1000), dec!(100), &config).unwrap();
        assert_eq!(rate, dec!(0.005));

        let rate =
            effective_fee_rate(dec!(0.000001), dec!(1000), Decimal::MAX, &config).unwrap();
        assert_eq!(rate, dec!(0.005));
    }

    #[test]
    fn test_cap_applies() {
        let config = FeeConfig {
            base_fee_bps: 80,
            volatility_surcharge_bps: 50,
            ..FeeConfig::default()
        };
        let rate = effective_fee_rate(dec!(1000), dec!(1000), dec!(500), &config).unwrap();
        assert_eq!(rate, dec!(0.01));
    }

    #[test]
    fn test_zero_reserve_rejected() {
        let config = FeeConfig::default();
        assert_eq!(
            effective_fee_rate(dec!(0), dec!(1000), dec!(10), &config).unwrap_err(),
            AmmError::ZeroReserve { reserve: dec!(0) }
        );
        assert!(matches!(
            effective_fee_rate(dec!(1000), dec!(1000), dec!(-1), &config),
            Err(AmmError::NegativeAmount { .. })
        ));
    }

    #[test]
    fn test_validate_fee_rate() {
        assert_eq!(validate_fee_rate(dec!(0)).unwrap(), dec!(0));
        assert_eq!(validate_fee_rate(dec!(0.003)).unwrap(), dec!(0.003));
        assert!(validate_fee_rate(dec!(1)).is_err());
        assert!(validate_fee_rate(dec!(-0.01)).is_err());
    }
}
