//! Rate policy chain
//!
//! A base rate policy prices every usage record in a ledger. Additional rate
//! policies wrap another policy, let it compute first, then adjust its
//! result. Wrapping order is evaluation order: the innermost policy runs
//! first and no policy reorders itself.

use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::money::Money;
use super::usage::UsageRecord;
use crate::traits::FeeCalculator;
use crate::{FeeError, FeeResult};

/// Hour at or after which a nightly policy charges its night rate
pub const DEFAULT_NIGHT_START_HOUR: u32 = 22;

/// Per-record rate computation
///
/// Build through the checked constructors; deserialization runs the same
/// checks. A zero `unit` would divide by zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", try_from = "RawBaseRatePolicy")]
pub enum BaseRatePolicy {
    /// `rate` charged per `unit` of usage
    Flat { rate: Money, unit: Duration },

    /// `night_rate` for records starting at or after `night_start_hour`,
    /// `day_rate` otherwise
    NightlyDiscount {
        night_rate: Money,
        day_rate: Money,
        unit: Duration,
        night_start_hour: u32,
    },
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawBaseRatePolicy {
    Flat {
        rate: Money,
        unit: Duration,
    },
    NightlyDiscount {
        night_rate: Money,
        day_rate: Money,
        unit: Duration,
        night_start_hour: u32,
    },
}

impl TryFrom<RawBaseRatePolicy> for BaseRatePolicy {
    type Error = FeeError;

    fn try_from(raw: RawBaseRatePolicy) -> FeeResult<Self> {
        match raw {
            RawBaseRatePolicy::Flat { rate, unit } => BaseRatePolicy::flat(rate, unit),
            RawBaseRatePolicy::NightlyDiscount {
                night_rate,
                day_rate,
                unit,
                night_start_hour,
            } => BaseRatePolicy::nightly_discount_from(night_rate, day_rate, unit, night_start_hour),
        }
    }
}

impl BaseRatePolicy {
    pub fn flat(rate: Money, unit: Duration) -> FeeResult<Self> {
        check_unit(unit)?;
        Ok(BaseRatePolicy::Flat { rate, unit })
    }

    pub fn nightly_discount(night_rate: Money, day_rate: Money, unit: Duration) -> FeeResult<Self> {
        Self::nightly_discount_from(night_rate, day_rate, unit, DEFAULT_NIGHT_START_HOUR)
    }

    /// Nightly policy with an explicit night start hour (0..=23)
    pub fn nightly_discount_from(
        night_rate: Money,
        day_rate: Money,
        unit: Duration,
        night_start_hour: u32,
    ) -> FeeResult<Self> {
        check_unit(unit)?;
        if night_start_hour > 23 {
            return Err(FeeError::InvalidNightHour(night_start_hour));
        }
        Ok(BaseRatePolicy::NightlyDiscount {
            night_rate,
            day_rate,
            unit,
            night_start_hour,
        })
    }

    pub fn unit(&self) -> Duration {
        match self {
            BaseRatePolicy::Flat { unit, .. } | BaseRatePolicy::NightlyDiscount { unit, .. } => {
                *unit
            }
        }
    }

    /// Rate that applies to a record starting at `start`
    pub fn rate_at(&self, start: NaiveDateTime) -> Money {
        match self {
            BaseRatePolicy::Flat { rate, .. } => *rate,
            BaseRatePolicy::NightlyDiscount {
                night_rate,
                day_rate,
                night_start_hour,
                ..
            } => {
                if start.hour() >= *night_start_hour {
                    *night_rate
                } else {
                    *day_rate
                }
            }
        }
    }

    /// Fee for a single record: `rate * (duration / unit)`
    pub fn record_fee(&self, record: &UsageRecord) -> Money {
        let rate = self.rate_at(record.start());
        let elapsed = Decimal::from(record.duration().num_milliseconds());
        rate.times(elapsed / unit_millis(self.unit()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            BaseRatePolicy::Flat { .. } => "flat",
            BaseRatePolicy::NightlyDiscount { .. } => "nightly_discount",
        }
    }
}

impl FeeCalculator for BaseRatePolicy {
    fn calculate_fee(&self, records: &[UsageRecord]) -> Money {
        records.iter().map(|record| self.record_fee(record)).sum()
    }
}

fn unit_millis(unit: Duration) -> Decimal {
    Decimal::from(unit.as_secs()) * Decimal::from(1000) + Decimal::from(unit.subsec_millis())
}

fn check_unit(unit: Duration) -> FeeResult<()> {
    if unit.as_millis() == 0 {
        return Err(FeeError::InvalidRateUnit(format!(
            "unit must be at least one millisecond, got {:?}",
            unit
        )));
    }
    Ok(())
}

/// Transform applied by an additional rate policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RateAdjustment {
    /// `fee + fee * rate`
    Tax { rate: Decimal },

    /// `fee - amount`, not clamped at zero
    FlatDiscount { amount: Money },
}

impl RateAdjustment {
    #[inline]
    pub fn apply(&self, fee: Money) -> Money {
        match self {
            RateAdjustment::Tax { rate } => fee.plus(fee.times(*rate)),
            RateAdjustment::FlatDiscount { amount } => fee.minus(*amount),
        }
    }

    pub fn tax_rate(&self) -> FeeResult<Decimal> {
        match self {
            RateAdjustment::Tax { rate } => Ok(*rate),
            other => Err(FeeError::unsupported("tax_rate", other.label())),
        }
    }

    pub fn discount_amount(&self) -> FeeResult<Money> {
        match self {
            RateAdjustment::FlatDiscount { amount } => Ok(*amount),
            other => Err(FeeError::unsupported("discount_amount", other.label())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RateAdjustment::Tax { .. } => "tax",
            RateAdjustment::FlatDiscount { .. } => "flat_discount",
        }
    }
}

/// Wrapper owning exactly one inner policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalRatePolicy {
    next: Box<RatePolicy>,
    adjustment: RateAdjustment,
}

impl AdditionalRatePolicy {
    pub fn new(next: RatePolicy, adjustment: RateAdjustment) -> Self {
        Self {
            next: Box::new(next),
            adjustment,
        }
    }

    pub fn next(&self) -> &RatePolicy {
        &self.next
    }

    pub fn adjustment(&self) -> &RateAdjustment {
        &self.adjustment
    }
}

/// A base policy, possibly wrapped by a chain of adjustments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RatePolicy {
    Base(BaseRatePolicy),
    Additional(AdditionalRatePolicy),
}

impl RatePolicy {
    pub fn flat(rate: Money, unit: Duration) -> FeeResult<Self> {
        BaseRatePolicy::flat(rate, unit).map(RatePolicy::Base)
    }

    pub fn nightly_discount(night_rate: Money, day_rate: Money, unit: Duration) -> FeeResult<Self> {
        BaseRatePolicy::nightly_discount(night_rate, day_rate, unit).map(RatePolicy::Base)
    }

    /// Wrap this policy with an adjustment that runs after it
    pub fn wrap(self, adjustment: RateAdjustment) -> Self {
        RatePolicy::Additional(AdditionalRatePolicy::new(self, adjustment))
    }

    /// Add `fee * rate` to whatever this policy computes
    pub fn with_tax(self, rate: Decimal) -> Self {
        self.wrap(RateAdjustment::Tax { rate })
    }

    /// Subtract `amount` from whatever this policy computes
    pub fn with_flat_discount(self, amount: Money) -> Self {
        self.wrap(RateAdjustment::FlatDiscount { amount })
    }

    /// The innermost base policy
    pub fn base(&self) -> &BaseRatePolicy {
        let mut current = self;
        loop {
            match current {
                RatePolicy::Base(base) => return base,
                RatePolicy::Additional(additional) => current = &additional.next,
            }
        }
    }

    /// Adjustments from the outermost wrapper inwards
    pub fn adjustments(&self) -> Vec<&RateAdjustment> {
        let mut adjustments = Vec::new();
        let mut current = self;
        while let RatePolicy::Additional(additional) = current {
            adjustments.push(&additional.adjustment);
            current = &additional.next;
        }
        adjustments
    }
}

impl From<BaseRatePolicy> for RatePolicy {
    fn from(base: BaseRatePolicy) -> Self {
        RatePolicy::Base(base)
    }
}

impl FeeCalculator for RatePolicy {
    /// Innermost first: the base policy prices the records, then each
    /// wrapper transforms the already-computed inner result.
    fn calculate_fee(&self, records: &[UsageRecord]) -> Money {
        self.adjustments()
            .into_iter()
            .rev()
            .fold(self.base().calculate_fee(records), |fee, adjustment| {
                adjustment.apply(fee)
            })
    }
}

impl fmt::Display for RatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for adjustment in self.adjustments() {
            write!(f, "{}(", adjustment.label())?;
        }
        write!(f, "{}", self.base().label())?;
        for _ in self.adjustments() {
            write!(f, ")")?;
        }
        Ok(())
    }
}
