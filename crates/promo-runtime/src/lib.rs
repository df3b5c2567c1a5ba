//! Promo Runtime - Feature derivation and model fitting
//!
//! This crate provides the computational pieces of the click predictor:
//! activity log indexing, per-user feature derivation, preprocessing
//! transformers and the L1-regularized logistic regression solver.

pub mod error;
pub mod feature;
pub mod model;
pub mod preprocess;
pub mod storage;

// Re-export main types
pub use error::{Result, RuntimeError};
pub use feature::{FeatureDeriver, SessionAverage};
pub use model::{Classifier, FittedClassifier, FittedLogisticRegression, LogisticRegression};
pub use preprocess::{
    Chain, ColumnTransformer, FeatureFrame, FittedChain, FittedColumnTransformer,
    FittedInteractionFeatures, FittedOneHotEncoder, FittedStandardScaler, FittedTransformer,
    HandleUnknown, InteractionFeatures, OneHotEncoder, StandardScaler, Transformer,
};
pub use storage::{ActivityEvent, ActivityIndex};
