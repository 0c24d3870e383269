//! Engine configuration
//!
//! Fee and slippage parameters are passed explicitly instead of living in global
//! defaults. Configurations can be built in code, parsed from a TOML string, or loaded
//! from a file with `AMM_` environment-variable overrides.

use crate::error::{AmmError, AmmResult};
use crate::math::{bps_to_rate, BPS_DENOMINATOR};
use anyhow::{Context, Result};
use config_rs::{Config, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Dynamic fee parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Fee charged on every trade, in basis points (30 = 0.3%)
    pub base_fee_bps: u32,
    /// Extra fee at full volatility, in basis points (20 = 0.2%)
    pub volatility_surcharge_bps: u32,
    /// Hard cap on the blended fee, in basis points (100 = 1%)
    pub max_fee_bps: u32,
    /// Multiplier turning `input / reserve_in` into the volatility metric
    pub volatility_sensitivity: Decimal,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            base_fee_bps: 30,
            volatility_surcharge_bps: 20,
            max_fee_bps: 100,
            volatility_sensitivity: dec!(10),
        }
    }
}

impl FeeConfig {
    /// Base fee as a fraction
    pub fn base_rate(&self) -> Decimal {
        bps_to_rate(self.base_fee_bps)
    }

    /// Full-volatility surcharge as a fraction
    pub fn surcharge_rate(&self) -> Decimal {
        bps_to_rate(self.volatility_surcharge_bps)
    }

    /// Fee cap as a fraction
    pub fn cap_rate(&self) -> Decimal {
        bps_to_rate(self.max_fee_bps)
    }

    /// Highest rate the calculator can produce
    pub fn ceiling_rate(&self) -> Decimal {
        (self.base_rate() + self.surcharge_rate()).min(self.cap_rate())
    }

    pub fn validate(&self) -> AmmResult<()> {
        if Decimal::from(self.max_fee_bps) >= BPS_DENOMINATOR {
            return Err(invalid(format!(
                "max_fee_bps {} must be below 10000",
                self.max_fee_bps
            )));
        }
        if self.base_fee_bps > self.max_fee_bps {
            return Err(invalid(format!(
                "base_fee_bps {} exceeds max_fee_bps {}",
                self.base_fee_bps, self.max_fee_bps
            )));
        }
        if self.volatility_sensitivity.is_sign_negative() {
            return Err(invalid(format!(
                "volatility_sensitivity {} cannot be negative",
                self.volatility_sensitivity
            )));
        }
        Ok(())
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fee: FeeConfig,
    /// Advisory slippage applied to `minimum_received`, in basis points (50 = 0.5%)
    pub slippage_tolerance_bps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fee: FeeConfig::default(),
            slippage_tolerance_bps: 50,
        }
    }
}

impl EngineConfig {
    /// Slippage tolerance as a fraction
    pub fn slippage_rate(&self) -> Decimal {
        bps_to_rate(self.slippage_tolerance_bps)
    }

    pub fn validate(&self) -> AmmResult<()> {
        self.fee.validate()?;
        if Decimal::from(self.slippage_tolerance_bps) >= BPS_DENOMINATOR {
            return Err(invalid(format!(
                "slippage_tolerance_bps {} must be below 10000",
                self.slippage_tolerance_bps
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document; missing keys take their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).context("Failed to parse engine config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file, then apply `AMM_` environment overrides
    ///
    /// Nested keys use a double underscore: `AMM_FEE__BASE_FEE_BPS=25`.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading engine config: {:?}", path);

        let config = Config::builder()
            .add_source(File::from(path).required(true))
            .add_source(
                Environment::with_prefix("AMM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build engine config")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize engine config")?;

        if let Err(e) = config.validate() {
            warn!("Rejected engine config {:?}: {}", path, e);
            return Err(e.into());
        }
        Ok(config)
    }
}

fn invalid(message: String) -> AmmError {
    AmmError::InvalidConfig { message }
}
