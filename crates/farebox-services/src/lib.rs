//! Pricing services for Farebox
//!
//! This crate contains the stateful orchestration that sits on top of the
//! pure value types in `farebox-core`.
//!
//! # Services
//!
//! - `LedgerManager` - Append-only usage ledger with a swappable rate policy
//! - `ReservationAgency` - Schedules screenings and books reservations
//!
//! Policies and screenings are immutable and may be shared freely. A
//! `LedgerManager` is the one mutable entity; callers serialize access to it.

pub mod agency;
pub mod ledger;

pub use agency::ReservationAgency;
pub use ledger::LedgerManager;
