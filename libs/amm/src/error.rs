//! Error types for AMM calculations
//!
//! Every checked (`try_*`) operation in this crate reports degenerate pool snapshots and
//! invalid caller input through [`AmmError`]. The total counterparts map these errors to
//! neutral results instead of propagating them.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while quoting swaps, fees, or liquidity operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmmError {
    /// A pool reserve is zero or negative where a division by it is required
    #[error("Reserve must be positive, got {reserve}")]
    ZeroReserve { reserve: Decimal },

    /// Trade or deposit amount is zero where a positive amount is required
    #[error("Amount must be positive")]
    ZeroAmount,

    /// Amount is positive but too small to produce a representable result
    #[error("Amount {amount} is too small to produce a non-zero result")]
    InputTooSmall { amount: Decimal },

    /// Amount is negative where a non-negative value is required
    #[error("Amount cannot be negative: {amount}")]
    NegativeAmount { amount: Decimal },

    /// Liquidity-token supply is zero where a pro-rata share is required
    #[error("Liquidity token supply is empty")]
    EmptySupply,

    /// Burn request exceeds outstanding liquidity-token supply
    #[error("Cannot burn {requested} liquidity tokens, only {available} outstanding")]
    ExceedsSupply {
        requested: Decimal,
        available: Decimal,
    },

    /// Requested or computed output would drain the output reserve
    #[error("Insufficient liquidity: output {output} would exhaust reserve {reserve}")]
    ReserveExhausted { output: Decimal, reserve: Decimal },

    /// Fee rate outside `[0, 1)`
    #[error("Fee rate {rate} is outside [0, 1)")]
    InvalidFeeRate { rate: Decimal },

    /// Price is zero or negative
    #[error("Price must be positive, got {price}")]
    InvalidPrice { price: Decimal },

    /// Percentage outside `(0, 100]`
    #[error("Percentage {percent} is outside (0, 100]")]
    InvalidPercentage { percent: Decimal },

    /// Reward boost below 1x
    #[error("Reward boost {boost} must be at least 1")]
    InvalidBoost { boost: Decimal },

    /// Decimal arithmetic exceeded the representable range
    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: &'static str },

    /// Engine configuration rejected by validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result alias for AMM calculations
pub type AmmResult<T> = Result<T, AmmError>;

impl AmmError {
    /// Overflow error tagged with the operation that failed
    pub(crate) fn overflow(operation: &'static str) -> Self {
        Self::Overflow { operation }
    }

    /// Whether the error describes a degenerate pool rather than bad caller input
    pub fn is_degenerate_pool(&self) -> bool {
        matches!(
            self,
            Self::ZeroReserve { .. } | Self::EmptySupply | Self::ReserveExhausted { .. }
        )
    }
}
