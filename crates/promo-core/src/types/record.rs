//! Input records
//!
//! Users, activity logs and click labels as supplied by ingestion code.
//! Logs keep their raw timestamp strings; parsing (and dropping of malformed
//! rows) happens in the runtime.

use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize};

/// User identifier, shared by users, logs and labels
pub type UserId = i64;

/// A user profile row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub past_purchase_amt: f64,
    pub badge: String,
}

impl UserRecord {
    pub fn new(id: UserId, past_purchase_amt: f64, badge: impl Into<String>) -> Self {
        Self {
            id,
            past_purchase_amt,
            badge: badge.into(),
        }
    }
}

/// Hour-of-day signal attached to a log row
///
/// Either a bare hour (`8`) or text holding a timestamp or clock time
/// (`"2024-01-01T08:00"`, `"08:00"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeSignal {
    Hour(i64),
    Text(String),
}

impl From<&str> for TimeSignal {
    fn from(value: &str) -> Self {
        TimeSignal::Text(value.to_string())
    }
}

impl From<String> for TimeSignal {
    fn from(value: String) -> Self {
        TimeSignal::Text(value)
    }
}

impl From<i64> for TimeSignal {
    fn from(value: i64) -> Self {
        TimeSignal::Hour(value)
    }
}

/// An activity log row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// User the activity belongs to
    pub id: UserId,

    /// Visit timestamp, possibly malformed
    pub date: String,

    /// Visit duration in seconds
    pub duration: f64,

    /// Optional hour-of-day signal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeSignal>,
}

impl LogRecord {
    pub fn new(id: UserId, date: impl Into<String>, duration: f64) -> Self {
        Self {
            id,
            date: date.into(),
            duration,
            time: None,
        }
    }

    /// Attach an hour-of-day signal
    pub fn with_time(mut self, time: impl Into<TimeSignal>) -> Self {
        self.time = Some(time.into());
        self
    }
}

/// Click outcome for one training user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: UserId,

    /// Accepts `true`/`false` as well as `1`/`0`
    #[serde(deserialize_with = "deserialize_flag")]
    pub clicked: bool,
}

impl Label {
    pub fn new(id: UserId, clicked: bool) -> Self {
        Self { id, clicked }
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Float(f64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Float(f) if f == 0.0 => Ok(false),
        Flag::Float(f) if f == 1.0 => Ok(true),
        Flag::Int(n) => Err(serde::de::Error::custom(CoreError::InvalidValue(format!(
            "clicked must be 0 or 1, got {}",
            n
        )))),
        Flag::Float(f) => Err(serde::de::Error::custom(CoreError::InvalidValue(format!(
            "clicked must be 0 or 1, got {}",
            f
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_record_from_json_with_text_time() {
        let log: LogRecord = serde_json::from_str(
            r#"{"id": 1, "date": "2024-01-01", "duration": 120, "time": "2024-01-01T08:00"}"#,
        )
        .unwrap();

        assert_eq!(log.id, 1);
        assert_eq!(log.duration, 120.0);
        assert_eq!(log.time, Some(TimeSignal::Text("2024-01-01T08:00".to_string())));
    }

    #[test]
    fn test_log_record_from_json_with_hour_time() {
        let log: LogRecord =
            serde_json::from_str(r#"{"id": 2, "date": "2024-01-01", "duration": 60, "time": 14}"#)
                .unwrap();
        assert_eq!(log.time, Some(TimeSignal::Hour(14)));
    }

    #[test]
    fn test_log_record_without_time() {
        let log: LogRecord =
            serde_json::from_str(r#"{"id": 3, "date": "not a date", "duration": 5.5}"#).unwrap();
        assert!(log.time.is_none());
        assert_eq!(log.date, "not a date");
    }

    #[test]
    fn test_label_accepts_integer_and_bool() {
        let a: Label = serde_json::from_str(r#"{"id": 1, "clicked": 1}"#).unwrap();
        let b: Label = serde_json::from_str(r#"{"id": 2, "clicked": false}"#).unwrap();
        let c: Label = serde_json::from_str(r#"{"id": 3, "clicked": 0.0}"#).unwrap();

        assert!(a.clicked);
        assert!(!b.clicked);
        assert!(!c.clicked);
    }

    #[test]
    fn test_label_rejects_other_numbers() {
        let result: Result<Label, _> = serde_json::from_str(r#"{"id": 1, "clicked": 2}"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Invalid value: clicked must be 0 or 1, got 2"));
    }

    #[test]
    fn test_user_record_round_trip_fields() -> anyhow::Result<()> {
        let user: UserRecord =
            serde_json::from_str(r#"{"id": 7, "past_purchase_amt": 10.5, "badge": "gold"}"#)?;
        assert_eq!(user, UserRecord::new(7, 10.5, "gold"));
        Ok(())
    }
}
