//! Unified error handling for Farebox
//!
//! Every failure in the core is a local precondition violation surfaced
//! synchronously to the immediate caller. Nothing here is retried or logged.

use thiserror::Error;

/// Main pricing error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeError {
    // ==================== Construction Errors ====================
    #[error("Unsupported operation `{operation}` for variant {variant}")]
    UnsupportedVariant {
        operation: &'static str,
        variant: &'static str,
    },

    #[error("Malformed interval: end {end} is before start {start}")]
    MalformedInterval { start: String, end: String },

    #[error("Invalid rate unit: {0}")]
    InvalidRateUnit(String),

    #[error("Invalid night start hour: {0} (expected 0..=23)")]
    InvalidNightHour(u32),

    #[error("Invalid quantity: {0} (at least one is required)")]
    InvalidQuantity(u32),

    // ==================== Internal Errors ====================
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FeeError {
    /// Shorthand for an operation invoked on the wrong variant
    pub fn unsupported(operation: &'static str, variant: &'static str) -> Self {
        FeeError::UnsupportedVariant { operation, variant }
    }

    /// Returns a stable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            FeeError::UnsupportedVariant { .. } => "unsupported_variant",
            FeeError::MalformedInterval { .. } => "malformed_interval",
            FeeError::InvalidRateUnit(_) => "invalid_rate_unit",
            FeeError::InvalidNightHour(_) => "invalid_night_hour",
            FeeError::InvalidQuantity(_) => "invalid_quantity",
            FeeError::Config(_) => "config_error",
        }
    }
}

// ==================== From implementations ====================

impl From<config::ConfigError> for FeeError {
    fn from(err: config::ConfigError) -> Self {
        FeeError::Config(err.to_string())
    }
}
