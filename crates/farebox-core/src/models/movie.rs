//! Movie and screening models
//!
//! A movie binds a base price to one discount policy. A screening prices
//! itself once, at construction, and keeps that fee for its lifetime.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::condition::ScreeningEvent;
use super::discount::DiscountPolicy;
use super::money::Money;
use crate::traits::Priced;

/// Priced item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Display title
    pub title: String,

    /// Running time
    pub running_time: Duration,

    /// Base price before any discount
    base_fee: Money,

    /// Discount policy gating the base price
    discount_policy: DiscountPolicy,
}

impl Movie {
    pub fn new(
        title: impl Into<String>,
        running_time: Duration,
        base_fee: Money,
        discount_policy: DiscountPolicy,
    ) -> Self {
        Self {
            title: title.into(),
            running_time,
            base_fee,
            discount_policy,
        }
    }

    pub fn base_fee(&self) -> Money {
        self.base_fee
    }

    pub fn discount_policy(&self) -> &DiscountPolicy {
        &self.discount_policy
    }

    /// Fee for a screening with the given sequence and start time
    pub fn fee(&self, sequence: u32, when: NaiveDateTime) -> Money {
        self.discount_policy
            .calculate_fee(self.base_fee, &ScreeningEvent::new(sequence, when))
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} min, {}, {})",
            self.title,
            self.running_time.as_secs() / 60,
            self.base_fee,
            self.discount_policy
        )
    }
}

/// Scheduled showing of a movie
///
/// Rescheduling is not supported; build a new screening instead.
#[derive(Debug, Clone)]
pub struct Screening {
    movie: Arc<Movie>,
    sequence: u32,
    when_screened: NaiveDateTime,
    fee: Money,
}

impl Screening {
    pub fn new(movie: Arc<Movie>, sequence: u32, when_screened: NaiveDateTime) -> Self {
        let fee = movie.fee(sequence, when_screened);
        Self {
            movie,
            sequence,
            when_screened,
            fee,
        }
    }

    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn when_screened(&self) -> NaiveDateTime {
        self.when_screened
    }

    /// The fee computed when this screening was created
    pub fn fee(&self) -> Money {
        self.fee
    }
}

impl Priced for Screening {
    fn fee(&self) -> Money {
        self.fee
    }
}

impl fmt::Display for Screening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} at {} for {}",
            self.movie.title, self.sequence, self.when_screened, self.fee
        )
    }
}
