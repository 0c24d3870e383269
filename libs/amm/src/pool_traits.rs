//! Pool snapshot and the unified pool interface

use crate::engine::AmmEngine;
use crate::liquidity::{burn_liquidity, quote_mint, BurnAmounts, MintQuote};
use crate::swap::SwapQuote;
use crate::Decimal;
use rust_decimal_macros::dec;

/// Which reserve is sold into the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    /// Sell token0, receive token1
    ZeroForOne,
    /// Sell token1, receive token0
    OneForZero,
}

impl SwapDirection {
    pub fn reverse(self) -> Self {
        match self {
            Self::ZeroForOne => Self::OneForZero,
            Self::OneForZero => Self::ZeroForOne,
        }
    }
}

/// Reserves and liquidity-token supply as of one moment, supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub reserve0: Decimal,
    pub reserve1: Decimal,
    pub total_liquidity: Decimal,
}

impl PoolSnapshot {
    pub fn new(reserve0: Decimal, reserve1: Decimal, total_liquidity: Decimal) -> Self {
        Self {
            reserve0,
            reserve1,
            total_liquidity,
        }
    }

    /// Whether swaps and proportional mints are defined on this snapshot
    pub fn is_tradable(&self) -> bool {
        self.reserve0 > dec!(0) && self.reserve1 > dec!(0)
    }
}

/// Unified pool interface; quoting never mutates the pool
pub trait AmmPool {
    /// Current reserves `(reserve0, reserve1)`
    fn reserves(&self) -> (Decimal, Decimal);

    /// Outstanding liquidity-token supply
    fn total_liquidity(&self) -> Decimal;

    /// Reserves ordered `(reserve_in, reserve_out)` for a trade direction
    fn reserves_for(&self, direction: SwapDirection) -> (Decimal, Decimal) {
        let (reserve0, reserve1) = self.reserves();
        match direction {
            SwapDirection::ZeroForOne => (reserve0, reserve1),
            SwapDirection::OneForZero => (reserve1, reserve0),
        }
    }

    /// Output tokens per input token before any trade, `None` for an empty pool
    fn spot_price(&self, direction: SwapDirection) -> Option<Decimal> {
        let (reserve_in, reserve_out) = self.reserves_for(direction);
        if reserve_in <= dec!(0) {
            return None;
        }
        reserve_out.checked_div(reserve_in)
    }

    /// Quote selling `amount_in` into the pool
    fn quote(&self, amount_in: Decimal, direction: SwapDirection, engine: &AmmEngine) -> SwapQuote {
        let (reserve_in, reserve_out) = self.reserves_for(direction);
        engine.quote_swap(amount_in, reserve_in, reserve_out, None)
    }

    /// Quote a deposit of `(amount0, amount1)`
    fn quote_mint(&self, amount0: Decimal, amount1: Decimal) -> MintQuote {
        let (reserve0, reserve1) = self.reserves();
        quote_mint(amount0, amount1, reserve0, reserve1, self.total_liquidity())
    }

    /// Amounts released by burning `liquidity`
    fn burn(&self, liquidity: Decimal) -> BurnAmounts {
        let (reserve0, reserve1) = self.reserves();
        burn_liquidity(liquidity, self.total_liquidity(), reserve0, reserve1)
    }
}

impl AmmPool for PoolSnapshot {
    fn reserves(&self) -> (Decimal, Decimal) {
        (self.reserve0, self.reserve1)
    }

    fn total_liquidity(&self) -> Decimal {
        self.total_liquidity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_selects_reserves() {
        let pool = PoolSnapshot::new(dec!(1000), dec!(2000), dec!(1414));
        assert_eq!(pool.reserves_for(SwapDirection::ZeroForOne), (dec!(1000), dec!(2000)));
        assert_eq!(pool.reserves_for(SwapDirection::OneForZero), (dec!(2000), dec!(1000)));
        assert_eq!(SwapDirection::ZeroForOne.reverse(), SwapDirection::OneForZero);
    }

    #[test]
    fn test_spot_price() {
        let pool = PoolSnapshot::new(dec!(1000), dec!(2000), dec!(1414));
        assert_eq!(pool.spot_price(SwapDirection::ZeroForOne), Some(dec!(2)));
        assert_eq!(pool.spot_price(SwapDirection::OneForZero), Some(dec!(0.5)));

        let empty = PoolSnapshot::new(dec!(0), dec!(0), dec!(0));
        assert_eq!(empty.spot_price(SwapDirection::ZeroForOne), None);
        assert!(!empty.is_tradable());
    }

    #[test]
    fn test_quote_both_directions() {
        let engine = AmmEngine::default();
        let pool = PoolSnapshot::new(dec!(1000), dec!(2000), dec!(1414));

        let sell0 = pool.quote(dec!(10), SwapDirection::ZeroForOne, &engine);
        let sell1 = pool.quote(dec!(10), SwapDirection::OneForZero, &engine);
        assert!(sell0.output_amount > dec!(19) && sell0.output_amount < dec!(20));
        assert!(sell1.output_amount > dec!(4.9) && sell1.output_amount < dec!(5));
    }

    #[test]
    fn test_mint_and_burn_through_snapshot() {
        let pool = PoolSnapshot::new(dec!(1000), dec!(2000), dec!(500));
        let quote = pool.quote_mint(dec!(100), dec!(200));
        assert_eq!(quote.liquidity, dec!(50));

        let amounts = pool.burn(dec!(50));
        assert_eq!(amounts.amount0, dec!(100));
        assert_eq!(amounts.amount1, dec!(200));
    }
}
