//! Builder pattern for UserPredictor

use crate::config::EstimatorConfig;
use crate::error::Result;
use crate::predictor::UserPredictor;
use promo_runtime::{HandleUnknown, SessionAverage};
use std::path::PathBuf;

/// Builder for UserPredictor
///
/// # Example
///
/// ```rust,ignore
/// use promo_sdk::EstimatorBuilder;
///
/// // Defaults
/// let predictor = EstimatorBuilder::new().build()?;
///
/// // From a YAML file, with an override
/// let predictor = EstimatorBuilder::new()
///     .with_config_file("estimator.yaml")
///     .regularization(0.5)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct EstimatorBuilder {
    config: EstimatorConfig,
    config_file: Option<PathBuf>,
    overrides: Vec<Override>,
}

/// Settings applied on top of a config file
#[derive(Debug, Clone)]
enum Override {
    Regularization(f64),
    Tolerance(f64),
    MaxIter(usize),
    DecisionThreshold(f64),
    SessionAverage(SessionAverage),
    UnknownCategory(HandleUnknown),
}

impl EstimatorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an explicit configuration
    pub fn with_config(mut self, config: EstimatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Read a YAML file at build time
    ///
    /// Keys in the file are applied on top of the configuration given to
    /// [`with_config`](Self::with_config) (or the defaults); per-field setters
    /// on this builder are applied last.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Set regularization strength (C)
    pub fn regularization(mut self, c: f64) -> Self {
        self.overrides.push(Override::Regularization(c));
        self
    }

    /// Set solver tolerance
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.overrides.push(Override::Tolerance(tolerance));
        self
    }

    /// Set maximum solver sweeps
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.overrides.push(Override::MaxIter(max_iter));
        self
    }

    /// Set decision threshold
    pub fn decision_threshold(mut self, threshold: f64) -> Self {
        self.overrides.push(Override::DecisionThreshold(threshold));
        self
    }

    /// Set session-average aggregation
    pub fn session_average(mut self, session_average: SessionAverage) -> Self {
        self.overrides.push(Override::SessionAverage(session_average));
        self
    }

    /// Set unknown-category policy
    pub fn unknown_category(mut self, policy: HandleUnknown) -> Self {
        self.overrides.push(Override::UnknownCategory(policy));
        self
    }

    /// Build an unfitted predictor
    pub fn build(self) -> Result<UserPredictor> {
        let mut config = match &self.config_file {
            Some(path) => self.config.merge_file(path)?,
            None => self.config,
        };

        for o in self.overrides {
            config = match o {
                Override::Regularization(c) => config.with_regularization(c),
                Override::Tolerance(t) => config.with_tolerance(t),
                Override::MaxIter(n) => config.with_max_iter(n),
                Override::DecisionThreshold(t) => config.with_decision_threshold(t),
                Override::SessionAverage(s) => config.with_session_average(s),
                Override::UnknownCategory(p) => config.with_unknown_category(p),
            };
        }

        tracing::debug!("Building UserPredictor with {:?}", config);
        UserPredictor::with_config(config)
    }
}
