//! Constant-product swap quotes with exact Decimal arithmetic
//!
//! Solves `(x + Δx_net)(y − Δy) = x·y` for `Δy`, where `Δx_net` is the input after the
//! dynamic fee. The quote also reports price impact against the pre-trade spot price and
//! an advisory minimum-received amount.

use crate::config::{EngineConfig, FeeConfig};
use crate::error::{AmmError, AmmResult};
use crate::fee::{effective_fee_rate, validate_fee_rate};
use crate::math::{ceil_units, ensure_reserve, mul_div, PERCENT};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

const MAX_BISECTIONS: usize = 128;
const TOKEN_UNIT: Decimal = dec!(0.000000000000000001);

/// How the trade is routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SwapRoute {
    /// Single hop through the quoted pool
    Direct,
    /// No executable route (degenerate pool or input)
    None,
}

/// Result of quoting a swap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapQuote {
    /// Output tokens received
    pub output_amount: Decimal,
    /// Execution price shortfall versus spot price, in percent
    pub price_impact_percent: Decimal,
    /// `output_amount` less the slippage tolerance; advisory, enforced by the caller
    pub minimum_received: Decimal,
    /// Fee charged, denominated in the input token
    pub fee_amount: Decimal,
    /// Fee rate applied, in percent (0.3 = 0.3%)
    pub effective_fee_rate_percent: Decimal,
    pub route: SwapRoute,
}

impl SwapQuote {
    /// Neutral quote returned for degenerate pools or non-positive input
    pub fn no_liquidity() -> Self {
        Self {
            output_amount: dec!(0),
            price_impact_percent: dec!(0),
            minimum_received: dec!(0),
            fee_amount: dec!(0),
            effective_fee_rate_percent: dec!(0),
            route: SwapRoute::None,
        }
    }

    pub fn is_executable(&self) -> bool {
        self.route == SwapRoute::Direct && self.output_amount > dec!(0)
    }

    /// Average price paid (output per unit of input)
    pub fn execution_price(&self, input_amount: Decimal) -> Decimal {
        if input_amount <= dec!(0) {
            return dec!(0);
        }
        self.output_amount
            .checked_div(input_amount)
            .unwrap_or(dec!(0))
    }
}

/// Exact output amount for a constant-product pool at a fixed fee rate
///
/// # Arguments
/// * `amount_in` - Input token amount
/// * `reserve_in` - Input token reserve
/// * `reserve_out` - Output token reserve
/// * `fee_rate` - Fee as a fraction (0.003 = 0.3%)
///
/// # Returns
/// Output amount, always strictly below `reserve_out`
pub fn calculate_output_amount(
    amount_in: Decimal,
    reserve_in: Decimal,
    reserve_out: Decimal,
    fee_rate: Decimal,
) -> AmmResult<Decimal> {
    if amount_in <= dec!(0) {
        return Err(non_positive(amount_in));
    }
    ensure_reserve(reserve_in)?;
    ensure_reserve(reserve_out)?;
    let fee_rate = validate_fee_rate(fee_rate)?;

    // amount_in_after_fee = amount_in * (1 - fee)
    let amount_in_after_fee = amount_in
        .checked_mul(dec!(1) - fee_rate)
        .ok_or_else(|| AmmError::overflow("swap fee"))?;

    // output = (amount_in_after_fee * reserve_out) / (reserve_in + amount_in_after_fee)
    let denominator = reserve_in
        .checked_add(amount_in_after_fee)
        .ok_or_else(|| AmmError::overflow("swap denominator"))?;
    let output = mul_div(amount_in_after_fee, reserve_out, denominator, "swap output")?;

    if output >= reserve_out {
        return Err(AmmError::ReserveExhausted {
            output,
            reserve: reserve_out,
        });
    }
    if output <= dec!(0) {
        return Err(AmmError::InputTooSmall { amount: amount_in });
    }

    Ok(output)
}

/// Input required to receive `amount_out` at a fixed fee rate (reverse calculation)
///
/// Rounded up at token precision so the returned input always suffices.
pub fn required_input(
    amount_out: Decimal,
    reserve_in: Decimal,
    reserve_out: Decimal,
    fee_rate: Decimal,
) -> AmmResult<Decimal> {
    if amount_out <= dec!(0) {
        return Err(non_positive(amount_out));
    }
    ensure_reserve(reserve_in)?;
    ensure_reserve(reserve_out)?;
    let fee_rate = validate_fee_rate(fee_rate)?;

    if amount_out >= reserve_out {
        return Err(AmmError::ReserveExhausted {
            output: amount_out,
            reserve: reserve_out,
        });
    }

    // input = reserve_in * amount_out / ((reserve_out - amount_out) * (1 - fee))
    let denominator = (reserve_out - amount_out)
        .checked_mul(dec!(1) - fee_rate)
        .ok_or_else(|| AmmError::overflow("reverse quote denominator"))?;
    let input = mul_div(reserve_in, amount_out, denominator, "reverse quote")?;

    Ok(ceil_units(input))
}

/// Input needed for `amount_out` when the fee depends on the input itself
///
/// The dynamic fee never leaves `[base, ceiling]`, so the answer is bracketed by the
/// reverse quotes at those two rates. Bisection keeps the upper end sufficient under
/// the dynamic fee and stops once the bracket is one token unit wide.
pub fn required_input_dynamic(
    amount_out: Decimal,
    reserve_in: Decimal,
    reserve_out: Decimal,
    fee: &FeeConfig,
) -> AmmResult<Decimal> {
    let mut low = required_input(amount_out, reserve_in, reserve_out, fee.base_rate())?;
    let mut high = required_input(amount_out, reserve_in, reserve_out, fee.ceiling_rate())?;

    let covers = |input: Decimal| -> AmmResult<bool> {
        let rate = effective_fee_rate(reserve_in, reserve_out, input, fee)?;
        Ok(calculate_output_amount(input, reserve_in, reserve_out, rate)
            .map_or(false, |output| output >= amount_out))
    };

    for _ in 0..MAX_BISECTIONS {
        if high - low <= TOKEN_UNIT {
            break;
        }
        let mid = (low + high) / dec!(2);
        if mid == low || mid == high {
            break;
        }
        if covers(mid)? {
            high = mid;
        } else {
            low = mid;
        }
    }

    Ok(ceil_units(high))
}

/// Price impact in percent: `(spot − execution) / spot × 100`
pub fn price_impact_percent(
    amount_in: Decimal,
    amount_out: Decimal,
    reserve_in: Decimal,
    reserve_out: Decimal,
) -> AmmResult<Decimal> {
    if amount_in <= dec!(0) {
        return Err(non_positive(amount_in));
    }
    ensure_reserve(reserve_in)?;
    ensure_reserve(reserve_out)?;

    let spot_price = reserve_out
        .checked_div(reserve_in)
        .ok_or_else(|| AmmError::overflow("spot price"))?;
    if spot_price.is_zero() {
        return Err(AmmError::overflow("spot price"));
    }
    let execution_price = amount_out
        .checked_div(amount_in)
        .ok_or_else(|| AmmError::overflow("execution price"))?;

    let impact = (spot_price - execution_price)
        .checked_div(spot_price)
        .ok_or_else(|| AmmError::overflow("price impact"))?;
    Ok(impact * PERCENT)
}

/// Quote a swap, returning an error for degenerate pools or inputs
///
/// Uses the dynamic fee unless `fee_override` supplies a fixed rate.
pub fn try_quote_swap(
    amount_in: Decimal,
    reserve_in: Decimal,
    reserve_out: Decimal,
    fee_override: Option<Decimal>,
    config: &EngineConfig,
) -> AmmResult<SwapQuote> {
    if amount_in <= dec!(0) {
        return Err(non_positive(amount_in));
    }
    ensure_reserve(reserve_in)?;
    ensure_reserve(reserve_out)?;

    let fee_rate = match fee_override {
        Some(rate) => validate_fee_rate(rate)?,
        None => effective_fee_rate(reserve_in, reserve_out, amount_in, &config.fee)?,
    };

    let output_amount = calculate_output_amount(amount_in, reserve_in, reserve_out, fee_rate)?;
    let price_impact_percent =
        price_impact_percent(amount_in, output_amount, reserve_in, reserve_out)?;

    let minimum_received = output_amount * (dec!(1) - config.slippage_rate());
    let fee_amount = amount_in
        .checked_mul(fee_rate)
        .ok_or_else(|| AmmError::overflow("fee amount"))?;

    Ok(SwapQuote {
        output_amount,
        price_impact_percent,
        minimum_received,
        fee_amount,
        effective_fee_rate_percent: fee_rate * PERCENT,
        route: SwapRoute::Direct,
    })
}

/// Quote a swap; degenerate pools and inputs yield [`SwapQuote::no_liquidity`]
pub fn quote_swap(
    amount_in: Decimal,
    reserve_in: Decimal,
    reserve_out: Decimal,
    fee_override: Option<Decimal>,
    config: &EngineConfig,
) -> SwapQuote {
    match try_quote_swap(amount_in, reserve_in, reserve_out, fee_override, config) {
        Ok(quote) => quote,
        Err(e) => {
            debug!(
                %amount_in,
                %reserve_in,
                %reserve_out,
                "Swap quote collapsed to no-liquidity: {}",
                e
            );
            SwapQuote::no_liquidity()
        }
    }
}

fn non_positive(amount: Decimal) -> AmmError {
    if amount.is_zero() {
        AmmError::ZeroAmount
    } else {
        AmmError::NegativeAmount { amount }
    }
}
