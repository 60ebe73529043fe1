//! Discount conditions
//!
//! A condition decides whether a discount may apply to one specific
//! screening, identified by its sequence number and start time.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{FeeError, FeeResult};

/// The event a condition is tested against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningEvent {
    /// Position of the screening within its day (1-based)
    pub sequence: u32,

    /// When the screening starts
    pub when: NaiveDateTime,
}

impl ScreeningEvent {
    pub fn new(sequence: u32, when: NaiveDateTime) -> Self {
        Self { sequence, when }
    }
}

/// Discount condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Satisfied by exactly one sequence number
    Sequence { sequence: u32 },

    /// Satisfied on a weekday within `[start_time, end_time]`, both inclusive
    Period {
        day_of_week: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
    },
}

impl Condition {
    pub fn sequence(sequence: u32) -> Self {
        Condition::Sequence { sequence }
    }

    pub fn period(day_of_week: Weekday, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Condition::Period {
            day_of_week,
            start_time,
            end_time,
        }
    }

    /// Check whether this condition holds for a screening
    pub fn is_satisfied_by(&self, event: &ScreeningEvent) -> bool {
        match self {
            Condition::Sequence { sequence } => *sequence == event.sequence,
            Condition::Period {
                day_of_week,
                start_time,
                end_time,
            } => {
                let time = event.when.time();
                event.when.weekday() == *day_of_week && *start_time <= time && time <= *end_time
            }
        }
    }

    /// The sequence number of a `Sequence` condition
    pub fn sequence_number(&self) -> FeeResult<u32> {
        match self {
            Condition::Sequence { sequence } => Ok(*sequence),
            Condition::Period { .. } => Err(FeeError::unsupported("sequence_number", self.kind())),
        }
    }

    /// The `(day, start, end)` window of a `Period` condition
    pub fn window(&self) -> FeeResult<(Weekday, NaiveTime, NaiveTime)> {
        match self {
            Condition::Period {
                day_of_week,
                start_time,
                end_time,
            } => Ok((*day_of_week, *start_time, *end_time)),
            Condition::Sequence { .. } => Err(FeeError::unsupported("window", self.kind())),
        }
    }

    /// Variant label
    pub fn kind(&self) -> &'static str {
        match self {
            Condition::Sequence { .. } => "sequence",
            Condition::Period { .. } => "period",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Sequence { sequence } => write!(f, "sequence #{}", sequence),
            Condition::Period {
                day_of_week,
                start_time,
                end_time,
            } => write!(
                f,
                "{} {:02}:{:02}-{:02}:{:02}",
                day_of_week,
                start_time.hour(),
                start_time.minute(),
                end_time.hour(),
                end_time.minute()
            ),
        }
    }
}
