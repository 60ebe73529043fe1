//! Usage ledger manager
//!
//! Owns the ordered list of usage records and the rate policy currently used
//! to price them:
//! - Records are appended, never removed
//! - The policy may be replaced between computations without touching records
//! - Fee queries are read-only

use farebox_core::{
    models::{RatePolicy, UsageRecord},
    traits::FeeCalculator,
    Money,
};
use tracing::{debug, info, instrument};

/// Ledger manager
#[derive(Debug, Clone)]
pub struct LedgerManager {
    records: Vec<UsageRecord>,
    policy: RatePolicy,
}

impl LedgerManager {
    /// Create an empty ledger priced by `policy`
    pub fn new(policy: RatePolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
        }
    }

    pub fn add_usage_record(&mut self, record: UsageRecord) {
        debug!(
            start = %record.start(),
            seconds = record.duration().num_seconds(),
            "Appending usage record"
        );
        self.records.push(record);
    }

    /// Records in insertion order
    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn rate_policy(&self) -> &RatePolicy {
        &self.policy
    }

    /// Replace the active policy, returning the previous one
    pub fn set_rate_policy(&mut self, policy: RatePolicy) -> RatePolicy {
        info!(from = %self.policy, to = %policy, "Swapping rate policy");
        std::mem::replace(&mut self.policy, policy)
    }

    /// Price every record with the active policy
    #[instrument(skip(self), fields(policy = %self.policy, records = self.records.len()))]
    pub fn calculate_fee(&self) -> Money {
        let fee = self.policy.calculate_fee(&self.records);
        debug!("Calculated ledger fee: {}", fee);
        fee
    }
}
