//! Wake-up record types and boundary parsers.
//!
//! One record exists per calendar day; the day is the primary key and is
//! immutable once created. Times are naive local clock values with minute
//! precision and travel as `HH:MM` strings on the wire.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const DAY_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// One wake-up entry for a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeRecord {
    /// Calendar date, unique identifier.
    pub day: NaiveDate,
    /// Time of waking, minute precision.
    #[serde(with = "hhmm")]
    pub wake_time: NaiveTime,
    /// Time of falling asleep the night before, if recorded.
    #[serde(with = "hhmm_opt", default)]
    pub sleep_time: Option<NaiveTime>,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
    /// Creation timestamp. Informational only; the streak engine never
    /// reads it.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a record.
#[derive(Debug, Clone)]
pub struct NewWakeRecord {
    pub day: NaiveDate,
    pub wake_time: NaiveTime,
    pub sleep_time: Option<NaiveTime>,
    pub note: Option<String>,
}

/// Partial update of a record. The outer `Option` is "leave unchanged",
/// the inner `Option` is "clear". `day` is never updatable.
#[derive(Debug, Clone, Default)]
pub struct WakeRecordPatch {
    pub wake_time: Option<NaiveTime>,
    pub sleep_time: Option<Option<NaiveTime>>,
    pub note: Option<Option<String>>,
}

impl WakeRecordPatch {
    /// True when no field is set. Callers must reject empty patches.
    pub fn is_empty(&self) -> bool {
        self.wake_time.is_none() && self.sleep_time.is_none() && self.note.is_none()
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_day(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, DAY_FORMAT).map_err(|_| ValidationError::MalformedDay {
        value: value.to_string(),
    })
}

/// Parse an `HH:MM` time of day. `field` names the offending field in the
/// error message.
pub fn parse_hhmm(field: &'static str, value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| ValidationError::MalformedTime {
        field,
        value: value.to_string(),
    })
}

/// Parse a signed integer minute tolerance.
pub fn parse_tolerance(value: &str) -> Result<i32, ValidationError> {
    value
        .parse::<i32>()
        .map_err(|_| ValidationError::MalformedTolerance {
            value: value.to_string(),
        })
}

/// Format a day as `YYYY-MM-DD`.
pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Format a time of day as `HH:MM`.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Serde adapter for `HH:MM` times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&value, super::TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional `HH:MM` times.
pub mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_some(&super::format_hhmm(*t)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(value) => NaiveTime::parse_from_str(&value, super::TIME_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
