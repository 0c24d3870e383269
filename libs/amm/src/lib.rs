//! # AMM Engine - Constant-Product Pricing and Liquidity Mathematics
//!
//! ## Purpose
//!
//! Pure calculation library for constant-product (`x·y = k`) Automated Market Makers:
//! swap quotes with a volatility-scaled dynamic fee, liquidity-token minting and burning,
//! impermanent loss, and pool APR. Every function is a deterministic function of its
//! arguments; the engine never stores reserves and performs no I/O while quoting.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pool snapshots (`reserve0`, `reserve1`, liquidity supply) from the
//!   caller's pool-state holder, user-entered amounts from a UI or service layer
//! - **Output Destinations**: Quote displays, transaction builders, history recorders
//! - **Precision**: `rust_decimal::Decimal` throughout, 18-decimal token rounding
//! - **Validation**: Checked `try_*` functions return [`AmmError`]; their total
//!   counterparts return neutral results for degenerate snapshots
//!
//! ## Rounding Policy
//!
//! | Operation | Rule |
//! |---|---|
//! | Square root | nearest, 18 dp |
//! | Liquidity minted | toward zero, 18 dp |
//! | Amounts released on burn | toward zero, 18 dp |
//! | Reverse-quote input | away from zero, 18 dp |
//! | Swap output, impact, fees | full Decimal precision |
//!
//! ## Example
//!
//! ```rust
//! use amm_engine::{dec, AmmEngine};
//!
//! let engine = AmmEngine::default();
//! let quote = engine.quote_swap(dec!(100), dec!(1000), dec!(1000), None);
//! assert!(quote.output_amount > dec!(89) && quote.output_amount < dec!(91));
//!
//! let minted = engine.mint_liquidity(dec!(100), dec!(400), dec!(0), dec!(0), dec!(0));
//! assert_eq!(minted, dec!(200));
//! ```

pub mod apr;
pub mod config;
pub mod engine;
pub mod error;
pub mod fee;
pub mod impermanent_loss;
pub mod liquidity;
pub mod math;
pub mod pool_traits;
pub mod swap;

pub use apr::{pool_apr, project_rewards, RewardProjection};
pub use config::{EngineConfig, FeeConfig};
pub use engine::AmmEngine;
pub use error::{AmmError, AmmResult};
pub use fee::effective_fee_rate;
pub use impermanent_loss::impermanent_loss;
pub use liquidity::{burn_liquidity, mint_liquidity, quote_mint, BurnAmounts, MintQuote};
pub use pool_traits::{AmmPool, PoolSnapshot, SwapDirection};
pub use swap::{quote_swap, SwapQuote, SwapRoute};

/// Common types for AMM calculations
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
