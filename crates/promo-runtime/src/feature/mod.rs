//! Feature derivation module
//!
//! Computes per-user behavioral features from activity logs.

pub mod deriver;

// Re-export for convenience
pub use deriver::{FeatureDeriver, SessionAverage};
