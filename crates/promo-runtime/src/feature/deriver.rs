//! Feature deriver
//!
//! Derives behavioral features for each user from their activity logs and
//! attaches them to the user rows.

use crate::storage::{ActivityEvent, ActivityIndex};
use chrono::NaiveDateTime;
use promo_core::{AugmentedUser, DerivedFeatures, LogRecord, PartOfDay, UserRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How `avg_session_duration` is aggregated over a user's rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAverage {
    /// Mean over rows of `row_minutes / session_count`
    #[default]
    PerRowMean,

    /// `total_minutes / session_count`
    TotalPerSession,
}

/// Feature deriver for user activity features
#[derive(Debug, Clone, Default)]
pub struct FeatureDeriver {
    session_average: SessionAverage,
}

impl FeatureDeriver {
    /// Create a new feature deriver
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session-average aggregation
    pub fn with_session_average(mut self, session_average: SessionAverage) -> Self {
        self.session_average = session_average;
        self
    }

    /// Derive features for every user, in input order
    ///
    /// Log rows with malformed dates are dropped; users without valid logs get
    /// zeroed numeric features and `Unknown` part of day.
    pub fn derive(&self, users: &[UserRecord], logs: &[LogRecord]) -> Vec<AugmentedUser> {
        let index = ActivityIndex::from_logs(logs);
        if index.dropped() > 0 {
            tracing::debug!(
                "Dropped {} of {} log rows with malformed dates",
                index.dropped(),
                logs.len()
            );
        }

        self.derive_from_index(users, &index)
    }

    /// Derive features against an already built activity index
    pub fn derive_from_index(
        &self,
        users: &[UserRecord],
        index: &ActivityIndex,
    ) -> Vec<AugmentedUser> {
        let augmented: Vec<AugmentedUser> = users
            .iter()
            .map(|user| {
                let features = self.compute_features(index.events_for(user.id), index);
                AugmentedUser::new(user.clone(), features)
            })
            .collect();

        tracing::debug!(
            "Derived features for {} users from {} valid log rows ({} users with activity)",
            augmented.len(),
            index.len(),
            index.user_count()
        );

        augmented
    }

    /// Compute the features of one user from their events
    pub fn compute_features(
        &self,
        events: &[ActivityEvent],
        index: &ActivityIndex,
    ) -> DerivedFeatures {
        if events.is_empty() {
            return DerivedFeatures::default();
        }

        DerivedFeatures {
            total_minutes: self.compute_total_minutes(events),
            avg_session_duration: self.compute_avg_session_duration(events),
            days_since_last_visit: self.compute_days_since_last_visit(events, index.latest()),
            part_of_day: if index.has_time_signal() {
                self.compute_part_of_day(events)
            } else {
                PartOfDay::Unknown
            },
        }
    }

    // Computation methods

    fn compute_total_minutes(&self, events: &[ActivityEvent]) -> f64 {
        events.iter().map(|e| e.minutes).sum()
    }

    fn compute_session_count(&self, events: &[ActivityEvent]) -> usize {
        events
            .iter()
            .map(|e| e.timestamp.date())
            .collect::<HashSet<_>>()
            .len()
    }

    fn compute_avg_session_duration(&self, events: &[ActivityEvent]) -> f64 {
        let sessions = self.compute_session_count(events);
        if sessions == 0 {
            return 0.0;
        }
        let sessions = sessions as f64;

        match self.session_average {
            SessionAverage::PerRowMean => {
                let sum: f64 = events.iter().map(|e| e.minutes / sessions).sum();
                sum / events.len() as f64
            }
            SessionAverage::TotalPerSession => self.compute_total_minutes(events) / sessions,
        }
    }

    fn compute_days_since_last_visit(
        &self,
        events: &[ActivityEvent],
        latest: Option<NaiveDateTime>,
    ) -> f64 {
        let last_visit = events.iter().map(|e| e.timestamp).max();

        match (latest, last_visit) {
            (Some(latest), Some(last)) => (latest - last).num_days().max(0) as f64,
            _ => 0.0,
        }
    }

    /// Most frequent bucket; ties go to the earliest bucket in category order
    fn compute_part_of_day(&self, events: &[ActivityEvent]) -> PartOfDay {
        let mut counts = [0usize; 4];

        for hour in events.iter().filter_map(|e| e.hour) {
            if let Some(bucket) = PartOfDay::from_hour(hour) {
                counts[bucket.index()] += 1;
            }
        }

        let mut best: Option<(PartOfDay, usize)> = None;
        for bucket in PartOfDay::BUCKETS {
            let count = counts[bucket.index()];
            if count == 0 {
                continue;
            }
            match best {
                Some((_, best_count)) if best_count >= count => {}
                _ => best = Some((bucket, count)),
            }
        }

        best.map(|(bucket, _)| bucket).unwrap_or(PartOfDay::Unknown)
    }
}
