//! Promo Core - Core record types for the promo click predictor
//!
//! This crate provides the fundamental types shared by the runtime and SDK:
//! - User, activity log and label records
//! - The part-of-day category domain
//! - Derived behavioral features and augmented users
//! - Error types

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use types::{
    AugmentedUser, DerivedFeatures, Label, LogRecord, PartOfDay, TimeSignal, UserId, UserRecord,
};
