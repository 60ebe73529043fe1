//! Common traits for priced entities and fee calculators

use crate::models::{Money, UsageRecord};

/// Anything that exposes a computed fee
pub trait Priced {
    fn fee(&self) -> Money;
}

/// Computes a fee from an ordered ledger of usage records
///
/// Implementations are pure: the same records always produce the same fee.
pub trait FeeCalculator {
    fn calculate_fee(&self, records: &[UsageRecord]) -> Money;
}
