//! Domain models for Farebox
//!
//! Value types for pricing screenings and metered usage.

pub mod condition;
pub mod discount;
pub mod money;
pub mod movie;
pub mod rate;
pub mod reservation;
pub mod usage;

pub use condition::{Condition, ScreeningEvent};
pub use discount::{DiscountKind, DiscountPolicy};
pub use money::Money;
pub use movie::{Movie, Screening};
pub use rate::{AdditionalRatePolicy, BaseRatePolicy, RateAdjustment, RatePolicy};
pub use reservation::{Customer, Reservation};
pub use usage::UsageRecord;
