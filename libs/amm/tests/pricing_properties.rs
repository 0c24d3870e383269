//! Pricing and Liquidity Property Tests
//!
//! Mathematical properties of the constant-product engine that must hold for every
//! well-formed pool snapshot, independent of concrete reserve sizes.

use amm_engine::liquidity::{try_burn_liquidity, try_mint_liquidity};
use amm_engine::swap::try_quote_swap;
use amm_engine::{
    effective_fee_rate, impermanent_loss, pool_apr, quote_swap, AmmEngine, EngineConfig,
    FeeConfig,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

prop_compose! {
    fn valid_reserve()
        (reserve in 1_000u64..10_000_000_000u64) -> Decimal {
        Decimal::from(reserve)
    }
}

prop_compose! {
    fn valid_amount()
        (amount in 1u64..1_000_000_000_000u64) -> Decimal {
        Decimal::from(amount)
    }
}

prop_compose! {
    /// Any sign, a range of scales
    fn arbitrary_decimal()
        (mantissa in any::<i64>(), scale in 0u32..20u32) -> Decimal {
        Decimal::new(mantissa, scale)
    }
}

proptest! {
    /// Property: Output is positive and strictly below the output reserve
    #[test]
    fn output_strictly_below_reserve(
        amount_in in valid_amount(),
        reserve_in in valid_reserve(),
        reserve_out in valid_reserve(),
    ) {
        let config = EngineConfig::default();
        let quote = try_quote_swap(amount_in, reserve_in, reserve_out, None, &config).unwrap();

        prop_assert!(quote.output_amount > Decimal::ZERO);
        prop_assert!(quote.output_amount < reserve_out,
                    "Output {} reached reserve {}", quote.output_amount, reserve_out);
        prop_assert!(quote.price_impact_percent > Decimal::ZERO);
        prop_assert!(quote.minimum_received < quote.output_amount);
    }

    /// Property: Larger inputs buy more output at a worse average rate
    #[test]
    fn output_increasing_rate_decreasing(
        amount in 1u64..1_000_000_000u64,
        step in 1u64..1_000_000_000u64,
        reserve_in in valid_reserve(),
        reserve_out in valid_reserve(),
    ) {
        let config = EngineConfig::default();
        let small = Decimal::from(amount);
        let large = Decimal::from(amount + step);

        let quote_small = try_quote_swap(small, reserve_in, reserve_out, None, &config).unwrap();
        let quote_large = try_quote_swap(large, reserve_in, reserve_out, None, &config).unwrap();

        prop_assert!(quote_large.output_amount > quote_small.output_amount);
        prop_assert!(
            quote_large.output_amount / large < quote_small.output_amount / small,
            "Average rate should fall as input grows"
        );
    }

    /// Property: Fee is bounded and non-decreasing in trade size
    #[test]
    fn fee_bounded_and_monotonic(
        amount in 0u64..1_000_000_000_000u64,
        step in 0u64..1_000_000_000u64,
        reserve_in in valid_reserve(),
    ) {
        let config = FeeConfig::default();
        let low = Decimal::from(amount);
        let high = Decimal::from(amount + step);
        let low = effective_fee_rate(reserve_in, reserve_in, low, &config).unwrap();
        let high = effective_fee_rate(reserve_in, reserve_in, high, &config).unwrap();

        prop_assert!(low >= config.base_rate());
        prop_assert!(high <= config.ceiling_rate());
        prop_assert!(high <= config.cap_rate());
        prop_assert!(low <= high);
    }

    /// Property: Minting for a ratio-matched deposit then burning it returns the deposit
    #[test]
    fn mint_burn_round_trip(
        reserve0 in valid_reserve(),
        reserve1 in valid_reserve(),
        per_mille in 1u32..1000u32,
    ) {
        let total = try_mint_liquidity(reserve0, reserve1, dec!(0), dec!(0), dec!(0)).unwrap();

        let fraction = Decimal::from(per_mille) / dec!(1000);
        let deposit0 = reserve0 * fraction;
        let deposit1 = reserve1 * fraction;

        let minted = try_mint_liquidity(deposit0, deposit1, reserve0, reserve1, total).unwrap();
        let returned = try_burn_liquidity(
            minted,
            total + minted,
            reserve0 + deposit0,
            reserve1 + deposit1,
        )
        .unwrap();

        let tolerance0 = deposit0 * dec!(0.000000000001);
        let tolerance1 = deposit1 * dec!(0.000000000001);
        prop_assert!((returned.amount0 - deposit0).abs() <= tolerance0,
                    "token0: deposited {}, returned {}", deposit0, returned.amount0);
        prop_assert!((returned.amount1 - deposit1).abs() <= tolerance1,
                    "token1: deposited {}, returned {}", deposit1, returned.amount1);
    }

    /// Property: Minted tokens never exceed what either side alone justifies
    #[test]
    fn mint_bounded_by_scarcer_side(
        reserve0 in valid_reserve(),
        reserve1 in valid_reserve(),
        amount0 in valid_amount(),
        amount1 in valid_amount(),
        total in valid_reserve(),
    ) {
        let minted = try_mint_liquidity(amount0, amount1, reserve0, reserve1, total);
        if let Ok(minted) = minted {
            prop_assert!(minted <= amount0 * total / reserve0);
            prop_assert!(minted <= amount1 * total / reserve1);
        }
    }

    /// Property: Providing liquidity never beats holding
    #[test]
    fn impermanent_loss_never_positive(
        initial in 1u64..1_000_000u64,
        current in 1u64..1_000_000u64,
    ) {
        let il = impermanent_loss(Decimal::from(initial), Decimal::from(current));
        prop_assert!(il <= Decimal::ZERO);
        prop_assert!(il > dec!(-100));
        if initial == current {
            prop_assert_eq!(il, Decimal::ZERO);
        }
    }

    /// Property: APR scales linearly with fees
    #[test]
    fn apr_linear_in_fees(
        fees in 0u64..1_000_000u64,
        liquidity in 1u64..1_000_000_000u64,
    ) {
        let fees = Decimal::from(fees);
        let liquidity = Decimal::from(liquidity);

        let single = pool_apr(fees, liquidity);
        let double = pool_apr(fees * dec!(2), liquidity);
        prop_assert!((double - single * dec!(2)).abs() < dec!(0.0000000001));
    }

    /// Property: The total quoting path never panics, whatever the input
    #[test]
    fn quote_is_total(
        amount in arbitrary_decimal(),
        reserve_in in arbitrary_decimal(),
        reserve_out in arbitrary_decimal(),
    ) {
        let engine = AmmEngine::default();
        let quote = quote_swap(amount, reserve_in, reserve_out, None, engine.config());

        prop_assert!(quote.output_amount >= Decimal::ZERO);
        if reserve_out > Decimal::ZERO {
            prop_assert!(quote.output_amount < reserve_out);
        }

        let _ = engine.mint_liquidity(amount, reserve_in, reserve_in, reserve_out, reserve_out);
        let _ = engine.burn_liquidity(amount, reserve_in, reserve_out, reserve_out);
        let _ = engine.impermanent_loss(reserve_in, reserve_out);
        let _ = engine.pool_apr(amount, reserve_in);
    }
}
