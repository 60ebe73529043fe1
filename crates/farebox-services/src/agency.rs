//! Reservation agency
//!
//! Front door for booking: schedules screenings (which price themselves on
//! creation) and turns them into reservations for a customer.

use chrono::NaiveDateTime;
use farebox_core::{
    models::{Customer, Movie, Reservation, Screening},
    FeeResult,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Reservation agency
#[derive(Debug, Default, Clone, Copy)]
pub struct ReservationAgency;

impl ReservationAgency {
    pub fn new() -> Self {
        Self
    }

    /// Schedule a screening of `movie`, pricing it once
    #[instrument(skip(self, movie), fields(title = %movie.title))]
    pub fn screen(&self, movie: Arc<Movie>, sequence: u32, when: NaiveDateTime) -> Arc<Screening> {
        let screening = Screening::new(movie, sequence, when);
        if screening.fee().is_negative() {
            // Amount-off discounts are not clamped
            warn!("Screening priced below zero at {}", screening.fee());
        } else {
            debug!("Screening priced at {}", screening.fee());
        }
        Arc::new(screening)
    }

    /// Book `audience_count` seats on `screening` for `customer`
    ///
    /// # Errors
    ///
    /// Returns `FeeError::InvalidQuantity` when `audience_count` is zero.
    #[instrument(skip(self, customer, screening), fields(customer = %customer.id, sequence = screening.sequence()))]
    pub fn reserve(
        &self,
        customer: Customer,
        screening: Arc<Screening>,
        audience_count: u32,
    ) -> FeeResult<Reservation> {
        let reservation = Reservation::new(customer, screening, audience_count)?;

        info!(
            "Reservation {} created: {} seats, total {}",
            reservation.id,
            reservation.audience_count(),
            reservation.fee()
        );

        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Weekday};
    use farebox_core::models::{Condition, DiscountPolicy};
    use farebox_core::{FeeError, Money};
    use std::time::Duration;

    fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, m, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .unwrap()
    }

    fn avatar() -> Arc<Movie> {
        Arc::new(Movie::new(
            "Avatar",
            Duration::from_secs(120 * 60),
            Money::wons(10000),
            DiscountPolicy::amount_off(
                Money::wons(1000),
                [
                    Condition::sequence(1),
                    Condition::sequence(10),
                    Condition::period(
                        Weekday::Thu,
                        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                        NaiveTime::from_hms_opt(20, 59, 0).unwrap(),
                    ),
                ],
            ),
        ))
    }

    #[test]
    fn test_reserve() {
        let agency = ReservationAgency::new();
        // 2020-10-01 is a Thursday
        let screening = agency.screen(avatar(), 2, at(10, 1, 10));
        let reservation = agency
            .reserve(Customer::new("kim", "7777-7777"), screening, 2)
            .unwrap();

        assert_eq!(reservation.unit_fee(), Money::wons(9000));
        assert_eq!(reservation.fee(), Money::wons(18000));
    }

    #[test]
    fn test_reserve_rejects_empty_booking() {
        let agency = ReservationAgency::new();
        let screening = agency.screen(avatar(), 2, at(10, 2, 10));

        let result = agency.reserve(Customer::new("kim", "7777-7777"), screening, 0);
        assert_eq!(result.unwrap_err(), FeeError::InvalidQuantity(0));
    }

    #[test]
    fn test_discount_larger_than_base_fee_is_kept() {
        let agency = ReservationAgency::new();
        let matinee = Arc::new(Movie::new(
            "Matinee",
            Duration::from_secs(90 * 60),
            Money::wons(500),
            DiscountPolicy::amount_off(Money::wons(1000), vec![Condition::sequence(1)]),
        ));

        let screening = agency.screen(matinee, 1, at(10, 2, 10));
        assert_eq!(screening.fee(), Money::wons(-500));
        assert!(screening.fee().is_negative());

        let reservation = agency
            .reserve(Customer::new("kim", "7777-7777"), screening, 2)
            .unwrap();
        assert_eq!(reservation.fee(), Money::wons(-1000));
    }

    #[test]
    fn test_screening_shared_between_reservations() {
        let agency = ReservationAgency::new();
        // Friday, sequence 3: no condition matches
        let screening = agency.screen(avatar(), 3, at(10, 2, 10));

        let a = agency
            .reserve(Customer::new("a", "1"), screening.clone(), 1)
            .unwrap();
        let b = agency
            .reserve(Customer::new("b", "2"), screening, 4)
            .unwrap();

        assert_eq!(a.fee(), Money::wons(10000));
        assert_eq!(b.fee(), Money::wons(40000));
    }
}
