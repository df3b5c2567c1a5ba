//! Configuration types for UserPredictor

use crate::error::{Result, SdkError};
use promo_runtime::{HandleUnknown, LogisticRegression, SessionAverage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Estimator configuration
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// regularization: 0.5
/// unknown_category: error
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Inverse L1 regularization strength (C)
    pub regularization: f64,

    /// Solver stopping tolerance on the largest weight change per sweep
    pub tolerance: f64,

    /// Maximum solver sweeps
    pub max_iter: usize,

    /// Probability above which a user is predicted to click
    pub decision_threshold: f64,

    /// Aggregation used for `avg_session_duration`
    pub session_average: SessionAverage,

    /// Policy for badges or parts of day not seen during fit
    pub unknown_category: HandleUnknown,
}

impl EstimatorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML configuration and validate it
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: EstimatorConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file and validate it
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded estimator config from {:?}", path);
        Self::from_yaml_str(&content)
    }

    /// Apply the keys of a YAML mapping on top of this configuration
    ///
    /// Keys absent from `content` keep their current values. An empty
    /// document changes nothing.
    pub fn merge_yaml_str(&self, content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(self.clone());
        }

        let mut merged = serde_yaml::to_value(self)?;
        match serde_yaml::from_str::<serde_yaml::Value>(content)? {
            serde_yaml::Value::Null => {}
            serde_yaml::Value::Mapping(overlay) => {
                if let serde_yaml::Value::Mapping(base) = &mut merged {
                    base.extend(overlay);
                }
            }
            _ => {
                return Err(SdkError::ConfigError(
                    "estimator config must be a YAML mapping".to_string(),
                ))
            }
        }

        let config: EstimatorConfig = serde_yaml::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply a YAML configuration file on top of this configuration
    pub fn merge_file(&self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Merging estimator config from {:?}", path);
        self.merge_yaml_str(&content)
    }

    /// Set regularization strength
    pub fn with_regularization(mut self, c: f64) -> Self {
        self.regularization = c;
        self
    }

    /// Set solver tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set maximum solver sweeps
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set decision threshold
    pub fn with_decision_threshold(mut self, threshold: f64) -> Self {
        self.decision_threshold = threshold;
        self
    }

    /// Set session-average aggregation
    pub fn with_session_average(mut self, session_average: SessionAverage) -> Self {
        self.session_average = session_average;
        self
    }

    /// Set unknown-category policy
    pub fn with_unknown_category(mut self, policy: HandleUnknown) -> Self {
        self.unknown_category = policy;
        self
    }

    /// Solver configuration derived from this config
    pub fn classifier(&self) -> LogisticRegression {
        LogisticRegression::new()
            .with_c(self.regularization)
            .with_tolerance(self.tolerance)
            .with_max_iter(self.max_iter)
            .with_decision_threshold(self.decision_threshold)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        self.classifier()
            .validate()
            .map_err(|e| SdkError::ConfigError(e.to_string()))
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        let solver = LogisticRegression::default();
        Self {
            regularization: solver.c,
            tolerance: solver.tolerance,
            max_iter: solver.max_iter,
            decision_threshold: solver.decision_threshold,
            session_average: SessionAverage::default(),
            unknown_category: HandleUnknown::default(),
        }
    }
}
