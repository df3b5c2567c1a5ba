//! UserPredictor - stateful fit/predict facade
//!
//! Holds a [`ClickEstimator`] and, once `fit` has run, the [`FittedModel`]
//! it produced. Refitting replaces the previous model.

use crate::config::EstimatorConfig;
use crate::error::{Result, SdkError};
use crate::estimator::{ClickEstimator, FittedModel};
use promo_core::{AugmentedUser, Label, LogRecord, UserRecord};

/// Lifecycle of a predictor
#[derive(Debug, Clone, Default)]
pub enum PredictorState {
    #[default]
    Unfitted,
    Fitted(Box<FittedModel>),
}

/// Predicts whether users click a promotional offer
#[derive(Debug, Clone, Default)]
pub struct UserPredictor {
    estimator: ClickEstimator,
    state: PredictorState,
}

impl UserPredictor {
    /// Create an unfitted predictor with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unfitted predictor from a configuration
    pub fn with_config(config: EstimatorConfig) -> Result<Self> {
        Ok(Self {
            estimator: ClickEstimator::new(config)?,
            state: PredictorState::Unfitted,
        })
    }

    pub fn config(&self) -> &EstimatorConfig {
        self.estimator.config()
    }

    pub fn state(&self) -> &PredictorState {
        &self.state
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, PredictorState::Fitted(_))
    }

    /// Fitted model, or `NotFitted`
    pub fn model(&self) -> Result<&FittedModel> {
        match &self.state {
            PredictorState::Fitted(model) => Ok(&**model),
            PredictorState::Unfitted => Err(SdkError::NotFitted),
        }
    }

    /// Train on users, their logs and one click label per user
    ///
    /// On error the previous state is kept.
    pub fn fit(
        &mut self,
        users: &[UserRecord],
        logs: &[LogRecord],
        labels: &[Label],
    ) -> Result<()> {
        let model = self.estimator.fit(users, logs, labels)?;
        self.state = PredictorState::Fitted(Box::new(model));
        Ok(())
    }

    /// One click prediction per user, in input order
    pub fn predict(&self, users: &[UserRecord], logs: &[LogRecord]) -> Result<Vec<bool>> {
        self.model()?.predict(users, logs)
    }

    /// One click probability per user, in input order
    pub fn predict_proba(&self, users: &[UserRecord], logs: &[LogRecord]) -> Result<Vec<f64>> {
        self.model()?.predict_proba(users, logs)
    }

    /// Derived features for a user table; available before fit
    pub fn derive_features(
        &self,
        users: &[UserRecord],
        logs: &[LogRecord],
    ) -> Vec<AugmentedUser> {
        match &self.state {
            PredictorState::Fitted(model) => model.derive_features(users, logs),
            PredictorState::Unfitted => promo_runtime::FeatureDeriver::new()
                .with_session_average(self.config().session_average)
                .derive(users, logs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_predictor_is_unfitted() {
        let predictor = UserPredictor::new();
        assert!(!predictor.is_fitted());
        assert!(matches!(predictor.state(), PredictorState::Unfitted));
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let predictor = UserPredictor::new();
        let users = vec![UserRecord::new(1, 10.0, "gold")];

        let result = predictor.predict(&users, &[]);
        assert!(matches!(result, Err(SdkError::NotFitted)));
        assert!(matches!(
            predictor.predict_proba(&users, &[]),
            Err(SdkError::NotFitted)
        ));
    }

    #[test]
    fn test_fit_transitions_to_fitted() {
        let mut predictor = UserPredictor::new();
        let users = vec![UserRecord::new(1, 10.0, "gold")];
        let logs = vec![LogRecord::new(1, "2024-01-01", 120.0)];

        predictor.fit(&users, &logs, &[Label::new(1, true)]).unwrap();

        assert!(predictor.is_fitted());
        assert!(predictor.model().is_ok());
    }

    #[test]
    fn test_failed_fit_keeps_unfitted_state() {
        let mut predictor = UserPredictor::new();
        let users = vec![UserRecord::new(1, 10.0, "gold")];

        let result = predictor.fit(&users, &[], &[]);
        assert!(matches!(result, Err(SdkError::MissingLabel(1))));
        assert!(!predictor.is_fitted());
    }

    #[test]
    fn test_derive_features_before_fit() {
        let predictor = UserPredictor::new();
        let users = vec![UserRecord::new(1, 10.0, "gold")];
        let logs = vec![LogRecord::new(1, "2024-01-01", 90.0)];

        let augmented = predictor.derive_features(&users, &logs);
        assert_eq!(augmented[0].features.total_minutes, 1.5);
    }

    #[test]
    fn test_predictor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UserPredictor>();
    }

    #[test]
    fn test_with_invalid_config() {
        let config = EstimatorConfig::default().with_max_iter(0);
        assert!(matches!(
            UserPredictor::with_config(config),
            Err(SdkError::ConfigError(_))
        ));
    }
}
