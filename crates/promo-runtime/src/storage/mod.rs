//! Activity log storage
//!
//! Parses raw log rows once and indexes the valid ones by user, so feature
//! derivation can run one aggregation pass per user.

pub mod parse;

use chrono::NaiveDateTime;
use promo_core::{LogRecord, UserId};
use std::collections::HashMap;

pub use parse::{parse_hour, parse_timestamp};

/// A log row whose timestamp parsed
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEvent {
    pub user_id: UserId,
    pub timestamp: NaiveDateTime,
    pub minutes: f64,
    /// Hour of day from the row's time signal, when it had a usable one
    pub hour: Option<u32>,
}

/// Valid activity events grouped by user
#[derive(Debug, Clone, Default)]
pub struct ActivityIndex {
    events: HashMap<UserId, Vec<ActivityEvent>>,
    latest: Option<NaiveDateTime>,
    has_time_signal: bool,
    total: usize,
    dropped: usize,
}

impl ActivityIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from raw log rows, dropping rows with malformed dates
    pub fn from_logs(logs: &[LogRecord]) -> Self {
        let mut index = Self::new();
        index.add_logs(logs);
        index
    }

    /// Add a single raw log row. Returns false when the row was dropped.
    pub fn add_log(&mut self, log: &LogRecord) -> bool {
        let Some(timestamp) = parse_timestamp(&log.date) else {
            self.dropped += 1;
            return false;
        };

        if log.time.is_some() {
            self.has_time_signal = true;
        }

        let event = ActivityEvent {
            user_id: log.id,
            timestamp,
            minutes: log.duration / 60.0,
            hour: log.time.as_ref().and_then(parse_hour),
        };

        self.latest = Some(match self.latest {
            Some(latest) if latest >= timestamp => latest,
            _ => timestamp,
        });
        self.events.entry(log.id).or_default().push(event);
        self.total += 1;
        true
    }

    /// Add multiple raw log rows
    pub fn add_logs(&mut self, logs: &[LogRecord]) {
        for log in logs {
            self.add_log(log);
        }
    }

    /// Valid events of one user, in input order
    pub fn events_for(&self, user_id: UserId) -> &[ActivityEvent] {
        self.events
            .get(&user_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Most recent timestamp across all users
    pub fn latest(&self) -> Option<NaiveDateTime> {
        self.latest
    }

    /// Whether any valid row carried an hour-of-day signal
    pub fn has_time_signal(&self) -> bool {
        self.has_time_signal
    }

    /// Number of valid rows
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of rows dropped for malformed dates
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Number of distinct users with at least one valid row
    pub fn user_count(&self) -> usize {
        self.events.len()
    }
}
