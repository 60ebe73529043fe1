//! Usage record model
//!
//! One timed usage interval (a phone call, a metered session).

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{FeeError, FeeResult};

/// Immutable `[start, end]` interval with a non-negative duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawUsageRecord")]
pub struct UsageRecord {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
struct RawUsageRecord {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RawUsageRecord> for UsageRecord {
    type Error = FeeError;

    fn try_from(raw: RawUsageRecord) -> FeeResult<Self> {
        UsageRecord::new(raw.start, raw.end)
    }
}

impl UsageRecord {
    /// Create a record; `end` before `start` is rejected
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> FeeResult<Self> {
        if end < start {
            return Err(FeeError::MalformedInterval {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .and_then(|date| date.and_hms_opt(h, m, s))
            .unwrap()
    }

    #[test]
    fn test_duration() {
        let record = UsageRecord::new(at(22, 0, 0), at(23, 0, 40)).unwrap();
        assert_eq!(record.duration(), Duration::seconds(3640));
        assert_eq!(record.start(), at(22, 0, 0));
        assert_eq!(record.end(), at(23, 0, 40));
    }

    #[test]
    fn test_zero_length_interval_is_allowed() {
        let record = UsageRecord::new(at(10, 0, 0), at(10, 0, 0)).unwrap();
        assert_eq!(record.duration(), Duration::zero());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let err = UsageRecord::new(at(10, 0, 10), at(10, 0, 0)).unwrap_err();
        assert_eq!(err.error_code(), "malformed_interval");
    }

    #[test]
    fn test_deserialize_validates_interval() {
        let ok: UsageRecord = serde_json::from_str(
            r#"{"start":"2020-01-01T10:00:00","end":"2020-01-01T10:00:10"}"#,
        )
        .unwrap();
        assert_eq!(ok.duration(), Duration::seconds(10));

        let bad = serde_json::from_str::<UsageRecord>(
            r#"{"start":"2020-01-01T10:00:10","end":"2020-01-01T10:00:00"}"#,
        );
        assert!(bad.is_err());
    }
}
