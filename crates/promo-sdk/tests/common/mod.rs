//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use promo_sdk::{Label, LogRecord, UserRecord};

/// Users, logs and labels for one fit or predict call
pub struct Tables {
    pub users: Vec<UserRecord>,
    pub logs: Vec<LogRecord>,
    pub labels: Vec<Label>,
}

impl Tables {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            logs: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Add a user together with its click label
    pub fn user(mut self, id: i64, past_purchase_amt: f64, badge: &str, clicked: bool) -> Self {
        self.users.push(UserRecord::new(id, past_purchase_amt, badge));
        self.labels.push(Label::new(id, clicked));
        self
    }

    /// Add a log row with a time signal
    pub fn visit(mut self, id: i64, date: &str, seconds: f64, time: &str) -> Self {
        self.logs.push(LogRecord::new(id, date, seconds).with_time(time));
        self
    }

    /// Add a log row without a time signal
    pub fn bare_visit(mut self, id: i64, date: &str, seconds: f64) -> Self {
        self.logs.push(LogRecord::new(id, date, seconds));
        self
    }
}

/// Heavy morning visitors click, light night visitors don't
pub fn training_tables() -> Tables {
    Tables::new()
        .user(1, 120.0, "gold", true)
        .user(2, 5.0, "bronze", false)
        .user(3, 90.0, "gold", true)
        .user(4, 2.0, "silver", false)
        .visit(1, "2024-03-01", 1800.0, "2024-03-01T09:00")
        .visit(1, "2024-03-02", 1200.0, "2024-03-02T10:00")
        .visit(2, "2024-02-01", 60.0, "2024-02-01T23:00")
        .visit(3, "2024-03-02", 2400.0, "2024-03-02T08:30")
        .visit(4, "2024-01-15", 30.0, "2024-01-15T02:00")
}
