//! Derived behavioral features

use super::part_of_day::PartOfDay;
use super::record::{UserId, UserRecord};
use serde::{Deserialize, Serialize};

/// Behavioral features computed from a user's activity logs
///
/// The `Default` value is what a user without any valid log receives.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedFeatures {
    pub total_minutes: f64,
    pub avg_session_duration: f64,
    pub days_since_last_visit: f64,
    pub part_of_day: PartOfDay,
}

/// A user row extended with its derived features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedUser {
    #[serde(flatten)]
    pub user: UserRecord,

    #[serde(flatten)]
    pub features: DerivedFeatures,
}

impl AugmentedUser {
    pub fn new(user: UserRecord, features: DerivedFeatures) -> Self {
        Self { user, features }
    }

    pub fn id(&self) -> UserId {
        self.user.id
    }

    /// Numeric part of the model's feature view, in model column order
    pub fn numeric_view(&self) -> [f64; 4] {
        [
            self.user.past_purchase_amt,
            self.features.total_minutes,
            self.features.avg_session_duration,
            self.features.days_since_last_visit,
        ]
    }

    /// Categorical part of the model's feature view, in model column order
    pub fn categorical_view(&self) -> [&str; 2] {
        [self.user.badge.as_str(), self.features.part_of_day.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_features_are_zero_and_unknown() {
        let features = DerivedFeatures::default();
        assert_eq!(features.total_minutes, 0.0);
        assert_eq!(features.avg_session_duration, 0.0);
        assert_eq!(features.days_since_last_visit, 0.0);
        assert_eq!(features.part_of_day, PartOfDay::Unknown);
    }

    #[test]
    fn test_views_follow_column_order() {
        let user = AugmentedUser::new(
            UserRecord::new(1, 10.0, "gold"),
            DerivedFeatures {
                total_minutes: 2.0,
                avg_session_duration: 1.0,
                days_since_last_visit: 3.0,
                part_of_day: PartOfDay::Morning,
            },
        );

        assert_eq!(user.id(), 1);
        assert_eq!(user.numeric_view(), [10.0, 2.0, 1.0, 3.0]);
        assert_eq!(user.categorical_view(), ["gold", "Morning"]);
    }

    #[test]
    fn test_flattened_serialization() {
        let user = AugmentedUser::new(UserRecord::new(4, 1.5, "silver"), DerivedFeatures::default());
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["id"], 4);
        assert_eq!(json["badge"], "silver");
        assert_eq!(json["part_of_day"], "Unknown");
        assert_eq!(json["total_minutes"], 0.0);
    }
}
