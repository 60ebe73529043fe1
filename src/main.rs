//! Farebox demonstration binary
//!
//! Assembles a few pricing graphs in memory and logs the computed fees.
//! All pricing logic lives in `farebox-core` and `farebox-services`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use farebox_core::config::LoggingConfig;
use farebox_core::models::{
    BaseRatePolicy, Condition, Customer, DiscountPolicy, Movie, RatePolicy, UsageRecord,
};
use farebox_core::{AppConfig, Money};
use farebox_services::{LedgerManager, ReservationAgency};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing(logging: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "farebox={},farebox_core={},farebox_services={}",
            logging.level, logging.level, logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);
    if logging.json {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> anyhow::Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, s))
        .ok_or_else(|| anyhow::anyhow!("invalid timestamp {y}-{m}-{d} {h}:{min}:{s}"))
}

fn time(h: u32, m: u32) -> anyhow::Result<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0).ok_or_else(|| anyhow::anyhow!("invalid time {h}:{m}"))
}

/// Screening and reservation pricing
fn run_screenings() -> anyhow::Result<()> {
    let avatar = Arc::new(Movie::new(
        "Avatar",
        Duration::from_secs(120 * 60),
        Money::wons(10000),
        DiscountPolicy::amount_off(
            Money::wons(1000),
            [
                Condition::sequence(1),
                Condition::sequence(10),
                Condition::period(Weekday::Mon, time(10, 0)?, time(11, 59)?),
            ],
        ),
    ));
    let titanic = Arc::new(Movie::new(
        "Titanic",
        Duration::from_secs(100 * 60),
        Money::wons(5000),
        DiscountPolicy::percent_off(
            dec!(0.1),
            [Condition::period(Weekday::Thu, time(10, 0)?, time(11, 59)?)],
        ),
    ));

    let agency = ReservationAgency::new();
    let screenings = [
        agency.screen(avatar.clone(), 1, at(2020, 1, 1, 10, 0, 0)?),
        agency.screen(avatar, 2, at(2020, 1, 1, 11, 0, 0)?),
        agency.screen(titanic.clone(), 1, at(2020, 1, 2, 10, 0, 0)?),
        agency.screen(titanic, 2, at(2020, 1, 3, 11, 0, 0)?),
    ];
    for screening in &screenings {
        info!("Screening: {}", screening);
    }

    let reservation = agency.reserve(
        Customer::new("kim", "7777-7777"),
        screenings[1].clone(),
        2,
    )?;
    info!("Reservation: {}", reservation);

    Ok(())
}

/// Usage ledger pricing under successive rate policies
fn run_ledger(config: &AppConfig) -> anyhow::Result<()> {
    let regular = || RatePolicy::flat(Money::wons(10), Duration::from_secs(10));

    let mut ledger = LedgerManager::new(regular()?);
    ledger.add_usage_record(UsageRecord::new(at(2020, 1, 1, 10, 0, 0)?, at(2020, 1, 1, 10, 0, 10)?)?);
    ledger.add_usage_record(UsageRecord::new(at(2020, 1, 1, 10, 0, 0)?, at(2020, 1, 1, 10, 0, 20)?)?);
    ledger.add_usage_record(UsageRecord::new(at(2020, 1, 1, 10, 0, 0)?, at(2020, 1, 1, 10, 0, 30)?)?);
    ledger.add_usage_record(UsageRecord::new(at(2020, 1, 1, 22, 0, 0)?, at(2020, 1, 1, 23, 0, 40)?)?);
    info!("Regular: {}", ledger.calculate_fee());

    let nightly = BaseRatePolicy::nightly_discount_from(
        Money::wons(5),
        Money::wons(10),
        Duration::from_secs(10),
        config.pricing.night_start_hour,
    )?;
    ledger.set_rate_policy(nightly.into());
    info!("Nightly discount: {}", ledger.calculate_fee());

    ledger.set_rate_policy(regular()?.with_tax(dec!(0.1)));
    info!("Taxed: {}", ledger.calculate_fee());

    ledger.set_rate_policy(regular()?.with_tax(dec!(0.1)).with_flat_discount(Money::wons(5)));
    info!("Taxed then discounted: {}", ledger.calculate_fee());

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = match std::env::var("FAREBOX_CONFIG") {
        Ok(path) => AppConfig::from_file(&path)?,
        Err(_) => AppConfig::load()?,
    };

    init_tracing(&config.logging);

    info!("Starting Farebox v{}", env!("CARGO_PKG_VERSION"));

    run_screenings()?;
    run_ledger(&config)?;

    Ok(())
}
