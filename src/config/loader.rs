//! Configuration Loader
//!
//! Loads and validates launchpad settings from TOML, with environment
//! variable overrides for the values that differ per deployment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub solana: SolanaSection,
    #[serde(default)]
    pub launchpads: LaunchpadsSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Solana RPC configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct SolanaSection {
    /// RPC endpoint (use a private RPC for production)
    pub rpc_url: String,
    /// Commitment level: "processed", "confirmed", "finalized"
    pub commitment: String,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for SolanaSection {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            commitment: "confirmed".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl SolanaSection {
    /// RPC URL with `SOLANA_RPC_URL` environment override.
    pub fn get_rpc_url(&self) -> String {
        std::env::var("SOLANA_RPC_URL").unwrap_or_else(|_| self.rpc_url.clone())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Launchpad configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LaunchpadsSection {
    /// Pump.fun program id
    pub pump_fun_program_id: String,
    /// Bonk.fun (Raydium LaunchLab) program id
    pub bonk_fun_program_id: String,
    /// Slippage tolerance applied when the caller supplies none, in [0, 1]
    pub default_slippage: Decimal,
}

impl Default for LaunchpadsSection {
    fn default() -> Self {
        Self {
            pump_fun_program_id: "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P".to_string(),
            bonk_fun_program_id: "LanMV9sAd7wArD4vJFi2qDdfnVhFxYSUg6eADduJ3uj".to_string(),
            default_slippage: dec!(0.05),
        }
    }
}

impl LaunchpadsSection {
    /// Pump.fun program id with `PUMP_FUN_PROGRAM_ID` environment override.
    pub fn get_pump_fun_program_id(&self) -> String {
        std::env::var("PUMP_FUN_PROGRAM_ID").unwrap_or_else(|_| self.pump_fun_program_id.clone())
    }

    /// Bonk.fun program id with `BONK_FUN_PROGRAM_ID` environment override.
    pub fn get_bonk_fun_program_id(&self) -> String {
        std::env::var("BONK_FUN_PROGRAM_ID").unwrap_or_else(|_| self.bonk_fun_program_id.clone())
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("validation failed: {0}")]
    ValidationError(String),
}

/// Load settings from a TOML file, apply `.env` overrides, validate.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    settings.validate()?;
    Ok(settings)
}

impl Settings {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.solana.rpc_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "rpc_url cannot be empty".to_string(),
            ));
        }

        match self.solana.commitment.as_str() {
            "processed" | "confirmed" | "finalized" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "commitment must be processed/confirmed/finalized, got {}",
                    other
                )));
            }
        }

        if self.solana.request_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_ms must be > 0".to_string(),
            ));
        }

        for (name, value) in [
            ("pump_fun_program_id", &self.launchpads.pump_fun_program_id),
            ("bonk_fun_program_id", &self.launchpads.bonk_fun_program_id),
        ] {
            Pubkey::from_str(value).map_err(|e| {
                ConfigError::ValidationError(format!("{} is not a valid pubkey: {}", name, e))
            })?;
        }

        if self.launchpads.default_slippage < Decimal::ZERO
            || self.launchpads.default_slippage > Decimal::ONE
        {
            return Err(ConfigError::ValidationError(format!(
                "default_slippage must be within [0, 1], got {}",
                self.launchpads.default_slippage
            )));
        }

        Ok(())
    }
}
