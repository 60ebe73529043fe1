//! Discount policies
//!
//! A discount policy owns a set of conditions combined by OR and one of a
//! closed set of discount strategies. Resolution is a pure function of the
//! base fee and the screening event.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::condition::{Condition, ScreeningEvent};
use super::money::Money;
use crate::{FeeError, FeeResult};

/// Discount strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Subtract a fixed amount. The result is not clamped at zero.
    AmountOff { amount: Money },

    /// Subtract a fraction of the base fee. The fraction is not range-checked.
    PercentOff { fraction: Decimal },

    /// Never discount
    None,
}

impl DiscountKind {
    pub fn label(&self) -> &'static str {
        match self {
            DiscountKind::AmountOff { .. } => "amount_off",
            DiscountKind::PercentOff { .. } => "percent_off",
            DiscountKind::None => "none",
        }
    }
}

/// Discount policy entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountPolicy {
    kind: DiscountKind,
    conditions: Vec<Condition>,
}

impl DiscountPolicy {
    /// Fixed-amount discount gated by any of `conditions`
    pub fn amount_off(amount: Money, conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self {
            kind: DiscountKind::AmountOff { amount },
            conditions: conditions.into_iter().collect(),
        }
    }

    /// Percentage discount gated by any of `conditions`
    pub fn percent_off(fraction: Decimal, conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self {
            kind: DiscountKind::PercentOff { fraction },
            conditions: conditions.into_iter().collect(),
        }
    }

    /// Policy that leaves every fee unchanged
    pub fn none() -> Self {
        Self {
            kind: DiscountKind::None,
            conditions: Vec::new(),
        }
    }

    pub fn kind(&self) -> &DiscountKind {
        &self.kind
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// True iff any owned condition is satisfied
    pub fn is_applicable(&self, event: &ScreeningEvent) -> bool {
        self.conditions
            .iter()
            .any(|condition| condition.is_satisfied_by(event))
    }

    /// Variant-specific transform, ignoring conditions
    pub fn apply(&self, base_fee: Money) -> Money {
        match &self.kind {
            DiscountKind::AmountOff { amount } => base_fee.minus(*amount),
            DiscountKind::PercentOff { fraction } => base_fee.minus(base_fee.times(*fraction)),
            DiscountKind::None => base_fee,
        }
    }

    /// Resolve the fee for one screening
    ///
    /// Returns `base_fee` unchanged unless a condition holds for `event`.
    pub fn calculate_fee(&self, base_fee: Money, event: &ScreeningEvent) -> Money {
        if !self.is_applicable(event) {
            return base_fee;
        }
        self.apply(base_fee)
    }

    // ==================== Variant-restricted operations ====================

    pub fn discount_amount(&self) -> FeeResult<Money> {
        match &self.kind {
            DiscountKind::AmountOff { amount } => Ok(*amount),
            other => Err(FeeError::unsupported("discount_amount", other.label())),
        }
    }

    pub fn discount_percent(&self) -> FeeResult<Decimal> {
        match &self.kind {
            DiscountKind::PercentOff { fraction } => Ok(*fraction),
            other => Err(FeeError::unsupported("discount_percent", other.label())),
        }
    }

    pub fn amount_discounted_fee(&self, base_fee: Money) -> FeeResult<Money> {
        Ok(base_fee.minus(self.discount_amount()?))
    }

    pub fn percent_discounted_fee(&self, base_fee: Money) -> FeeResult<Money> {
        let fraction = self.discount_percent()?;
        Ok(base_fee.minus(base_fee.times(fraction)))
    }

    pub fn none_discounted_fee(&self, base_fee: Money) -> FeeResult<Money> {
        match &self.kind {
            DiscountKind::None => Ok(base_fee),
            other => Err(FeeError::unsupported("none_discounted_fee", other.label())),
        }
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for DiscountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiscountKind::AmountOff { amount } => write!(f, "{} off", amount)?,
            DiscountKind::PercentOff { fraction } => {
                write!(f, "{}% off", (*fraction * Decimal::ONE_HUNDRED).normalize())?
            }
            DiscountKind::None => return write!(f, "no discount"),
        }
        if self.conditions.is_empty() {
            return write!(f, " never");
        }
        for (i, condition) in self.conditions.iter().enumerate() {
            let sep = if i == 0 { " when" } else { " or" };
            write!(f, "{} {}", sep, condition)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn at(d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .unwrap()
    }

    fn avatar_policy() -> DiscountPolicy {
        DiscountPolicy::amount_off(
            Money::wons(1000),
            [
                Condition::sequence(1),
                Condition::sequence(10),
                Condition::period(
                    Weekday::Mon,
                    NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(11, 59, 0).unwrap(),
                ),
            ],
        )
    }

    #[test]
    fn test_amount_off_applies_on_sequence() {
        let policy = avatar_policy();
        let base = Money::wons(10000);

        let first = ScreeningEvent::new(1, at(1, 10, 0));
        let second = ScreeningEvent::new(2, at(1, 11, 0));

        assert_eq!(policy.calculate_fee(base, &first), Money::wons(9000));
        assert_eq!(policy.calculate_fee(base, &second), Money::wons(10000));
    }

    #[test]
    fn test_any_condition_is_enough() {
        let policy = avatar_policy();
        // 2020-01-06 is a Monday; sequence 7 matches no sequence condition
        let event = ScreeningEvent::new(7, at(6, 10, 30));

        assert!(policy.is_applicable(&event));
        assert_eq!(policy.calculate_fee(Money::wons(10000), &event), Money::wons(9000));
    }

    #[test]
    fn test_percent_off() {
        let policy = DiscountPolicy::percent_off(
            dec!(0.1),
            [Condition::period(
                Weekday::Thu,
                NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(11, 59, 0).unwrap(),
            )],
        );
        let base = Money::wons(5000);

        // Thursday morning vs Friday morning
        assert_eq!(
            policy.calculate_fee(base, &ScreeningEvent::new(1, at(2, 10, 0))),
            Money::wons(4500)
        );
        assert_eq!(
            policy.calculate_fee(base, &ScreeningEvent::new(2, at(3, 11, 0))),
            Money::wons(5000)
        );
    }

    #[test]
    fn test_amount_off_is_not_clamped() {
        let policy = DiscountPolicy::amount_off(Money::wons(1000), [Condition::sequence(1)]);
        let event = ScreeningEvent::new(1, at(1, 10, 0));

        assert_eq!(policy.calculate_fee(Money::wons(400), &event), Money::wons(-600));
    }

    #[test]
    fn test_none_policy_never_changes_fee() {
        let policy = DiscountPolicy::none();
        let event = ScreeningEvent::new(1, at(1, 10, 0));

        assert!(!policy.is_applicable(&event));
        assert_eq!(policy.apply(Money::wons(777)), Money::wons(777));
        assert_eq!(policy.calculate_fee(Money::wons(777), &event), Money::wons(777));
    }

    #[test]
    fn test_policy_without_conditions_is_never_applicable() {
        let policy = DiscountPolicy::amount_off(Money::wons(1000), Vec::new());
        let event = ScreeningEvent::new(1, at(1, 10, 0));

        assert_eq!(policy.calculate_fee(Money::wons(10000), &event), Money::wons(10000));
    }

    #[test]
    fn test_variant_restricted_operations() {
        let amount = avatar_policy();
        let percent = DiscountPolicy::percent_off(dec!(0.25), [Condition::sequence(3)]);
        let none = DiscountPolicy::none();
        let base = Money::wons(10000);

        assert_eq!(amount.amount_discounted_fee(base), Ok(Money::wons(9000)));
        assert_eq!(
            amount.percent_discounted_fee(base),
            Err(FeeError::unsupported("discount_percent", "amount_off"))
        );
        assert_eq!(
            amount.none_discounted_fee(base),
            Err(FeeError::unsupported("none_discounted_fee", "amount_off"))
        );

        assert_eq!(percent.percent_discounted_fee(base), Ok(Money::wons(7500)));
        assert_eq!(percent.discount_percent(), Ok(dec!(0.25)));
        assert_eq!(
            percent.discount_amount(),
            Err(FeeError::unsupported("discount_amount", "percent_off"))
        );

        assert_eq!(none.none_discounted_fee(base), Ok(base));
        assert!(none.amount_discounted_fee(base).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            avatar_policy().to_string(),
            "1000원 off when sequence #1 or sequence #10 or Mon 10:00-11:59"
        );
        assert_eq!(
            DiscountPolicy::percent_off(dec!(0.1), [Condition::sequence(1)]).to_string(),
            "10% off when sequence #1"
        );
        assert_eq!(
            DiscountPolicy::amount_off(Money::wons(500), Vec::new()).to_string(),
            "500원 off never"
        );
        assert_eq!(DiscountPolicy::none().to_string(), "no discount");
    }

    proptest! {
        #[test]
        fn prop_inapplicable_policy_is_identity(fee in -1_000_000i64..1_000_000, seq in 2u32..500) {
            let policy = DiscountPolicy::amount_off(Money::wons(1000), [Condition::sequence(1)]);
            let event = ScreeningEvent::new(seq, at(1, 10, 0));
            let fee = Money::wons(fee);
            prop_assert_eq!(policy.calculate_fee(fee, &event), fee);
        }

        #[test]
        fn prop_percent_off_matches_definition(fee in 0i64..10_000_000, pct in 0u32..=100) {
            let fraction = Decimal::new(i64::from(pct), 2);
            let policy = DiscountPolicy::percent_off(fraction, [Condition::sequence(1)]);
            let event = ScreeningEvent::new(1, at(1, 10, 0));
            let fee = Money::wons(fee);

            let expected = fee.minus(fee.times(fraction));
            prop_assert_eq!(policy.calculate_fee(fee, &event), expected);
            if pct == 0 {
                prop_assert_eq!(policy.calculate_fee(fee, &event), fee);
            }
        }
    }
}
