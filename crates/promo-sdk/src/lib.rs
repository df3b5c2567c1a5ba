//! Promo click predictor SDK
//!
//! High-level fit/predict API over feature derivation and the L1 logistic
//! regression model.

pub mod builder;
pub mod config;
pub mod error;
pub mod estimator;
pub mod predictor;

// Re-export main types
pub use builder::EstimatorBuilder;
pub use config::EstimatorConfig;
pub use error::{Result, SdkError};
pub use estimator::{ClickEstimator, FittedModel};
pub use predictor::{PredictorState, UserPredictor};

// Re-export commonly used types from dependencies
pub use promo_core::{
    AugmentedUser, DerivedFeatures, Label, LogRecord, PartOfDay, TimeSignal, UserId, UserRecord,
};
pub use promo_runtime::{HandleUnknown, SessionAverage};
