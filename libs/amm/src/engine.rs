//! Configured entry point over every calculator
//!
//! [`AmmEngine`] owns a validated [`EngineConfig`] and forwards to the module-level
//! functions, so callers never depend on hidden default parameters. The engine is
//! immutable and cheap to clone; share it freely across threads.

use crate::apr::{self, RewardProjection};
use crate::config::EngineConfig;
use crate::error::AmmResult;
use crate::fee;
use crate::impermanent_loss;
use crate::liquidity::{self, BurnAmounts, MintQuote};
use crate::swap::{self, SwapQuote};
use crate::Decimal;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmmEngine {
    config: EngineConfig,
}

impl AmmEngine {
    pub fn new(config: EngineConfig) -> AmmResult<Self> {
        if let Err(e) = config.validate() {
            warn!("Rejected engine config: {}", e);
            return Err(e);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Dynamic fee rate as a fraction
    pub fn effective_fee_rate(
        &self,
        reserve_in: Decimal,
        reserve_out: Decimal,
        input_amount: Decimal,
    ) -> AmmResult<Decimal> {
        fee::effective_fee_rate(reserve_in, reserve_out, input_amount, &self.config.fee)
    }

    pub fn try_quote_swap(
        &self,
        amount_in: Decimal,
        reserve_in: Decimal,
        reserve_out: Decimal,
        fee_override: Option<Decimal>,
    ) -> AmmResult<SwapQuote> {
        swap::try_quote_swap(amount_in, reserve_in, reserve_out, fee_override, &self.config)
    }

    /// Swap quote; degenerate inputs give [`SwapQuote::no_liquidity`]
    pub fn quote_swap(
        &self,
        amount_in: Decimal,
        reserve_in: Decimal,
        reserve_out: Decimal,
        fee_override: Option<Decimal>,
    ) -> SwapQuote {
        swap::quote_swap(amount_in, reserve_in, reserve_out, fee_override, &self.config)
    }

    /// Input needed for `amount_out` under the dynamic fee, or at `fee_override`
    ///
    /// Quoting the returned input through [`AmmEngine::quote_swap`] with the same
    /// override yields at least `amount_out`.
    pub fn required_input(
        &self,
        amount_out: Decimal,
        reserve_in: Decimal,
        reserve_out: Decimal,
        fee_override: Option<Decimal>,
    ) -> AmmResult<Decimal> {
        match fee_override {
            Some(fee_rate) => swap::required_input(amount_out, reserve_in, reserve_out, fee_rate),
            None => {
                swap::required_input_dynamic(amount_out, reserve_in, reserve_out, &self.config.fee)
            }
        }
    }

    pub fn mint_liquidity(
        &self,
        amount0: Decimal,
        amount1: Decimal,
        reserve0: Decimal,
        reserve1: Decimal,
        total_liquidity: Decimal,
    ) -> Decimal {
        liquidity::mint_liquidity(amount0, amount1, reserve0, reserve1, total_liquidity)
    }

    pub fn quote_mint(
        &self,
        amount0: Decimal,
        amount1: Decimal,
        reserve0: Decimal,
        reserve1: Decimal,
        total_liquidity: Decimal,
    ) -> MintQuote {
        liquidity::quote_mint(amount0, amount1, reserve0, reserve1, total_liquidity)
    }

    pub fn burn_liquidity(
        &self,
        liquidity: Decimal,
        total_liquidity: Decimal,
        reserve0: Decimal,
        reserve1: Decimal,
    ) -> BurnAmounts {
        liquidity::burn_liquidity(liquidity, total_liquidity, reserve0, reserve1)
    }

    pub fn impermanent_loss(&self, initial_price: Decimal, current_price: Decimal) -> Decimal {
        impermanent_loss::impermanent_loss(initial_price, current_price)
    }

    pub fn pool_apr(&self, fees_24h: Decimal, total_liquidity_usd: Decimal) -> Decimal {
        apr::pool_apr(fees_24h, total_liquidity_usd)
    }

    pub fn project_rewards(
        &self,
        principal: Decimal,
        apr_percent: Decimal,
        boost: Decimal,
    ) -> AmmResult<RewardProjection> {
        apr::project_rewards(principal, apr_percent, boost)
    }
}
