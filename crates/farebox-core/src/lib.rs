//! Farebox Core Library
//!
//! This crate provides the foundational pricing types for the Farebox
//! fee-computation engine. It includes:
//!
//! - An exact decimal `Money` value type
//! - Discount conditions and discount policies for scheduled screenings
//! - Usage records and the composable rate policy chain
//! - Unified error handling and application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::FeeError;
pub use models::Money;

/// Result type alias using FeeError
pub type FeeResult<T> = Result<T, FeeError>;
