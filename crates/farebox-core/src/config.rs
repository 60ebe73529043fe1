//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files. It only
//! covers ambient settings; pricing policy graphs are always assembled in code.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use tracing::debug;

use crate::models::rate::DEFAULT_NIGHT_START_HOUR;
use crate::{FeeError, FeeResult};

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Pricing configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PricingConfig {
    /// Hour (0..=23) at or after which a nightly policy charges its night rate
    #[serde(default = "default_night_start_hour")]
    pub night_start_hour: u32,
}

fn default_night_start_hour() -> u32 {
    DEFAULT_NIGHT_START_HOUR
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            night_start_hour: default_night_start_hour(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config files
    pub fn load() -> FeeResult<Self> {
        dotenvy::dotenv().ok();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("logging.level", default_log_level())?
            .set_default("logging.json", false)?
            .set_default("pricing.night_start_hour", i64::from(DEFAULT_NIGHT_START_HOUR))?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with FAREBOX_ prefix
            .add_source(
                Environment::with_prefix("FAREBOX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;

        debug!(run_mode = %run_mode, "Configuration loaded");
        Ok(app_config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> FeeResult<Self> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("FAREBOX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject values that no pricing policy could be built from
    pub fn validate(&self) -> FeeResult<()> {
        if self.pricing.night_start_hour > 23 {
            return Err(FeeError::InvalidNightHour(self.pricing.night_start_hour));
        }
        Ok(())
    }
}
