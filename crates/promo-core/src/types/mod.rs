//! Type system for the promo click predictor
//!
//! This module contains the typed tables the predictor works on:
//! - Input records (users, activity logs, labels)
//! - The part-of-day category domain
//! - Derived per-user features

pub mod features;
pub mod part_of_day;
pub mod record;

pub use features::{AugmentedUser, DerivedFeatures};
pub use part_of_day::PartOfDay;
pub use record::{Label, LogRecord, TimeSignal, UserId, UserRecord};
