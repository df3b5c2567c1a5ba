//! Click estimator
//!
//! [`ClickEstimator`] is the unfitted pipeline: feature derivation, the
//! six-column view, preprocessing and the classifier. `fit` returns a
//! [`FittedModel`] that owns every learned parameter and only predicts.

use crate::config::EstimatorConfig;
use crate::error::{Result, SdkError};
use ndarray::Array2;
use promo_core::{AugmentedUser, Label, LogRecord, UserId, UserRecord};
use promo_runtime::{
    Chain, Classifier, ColumnTransformer, FeatureDeriver, FeatureFrame, FittedClassifier,
    FittedLogisticRegression, FittedTransformer, InteractionFeatures, OneHotEncoder,
    StandardScaler, Transformer,
};
use std::collections::HashMap;

/// Numeric block: standardize, then pairwise interactions
type NumericPipeline = Chain<StandardScaler, InteractionFeatures>;

type Preprocessor = ColumnTransformer<NumericPipeline, OneHotEncoder>;

type FittedPreprocessor = <Preprocessor as Transformer>::Fitted;

/// Unfitted click estimator
#[derive(Debug, Clone, Default)]
pub struct ClickEstimator {
    config: EstimatorConfig,
}

impl ClickEstimator {
    /// Create an estimator from a configuration, validating it
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    fn deriver(&self) -> FeatureDeriver {
        FeatureDeriver::new().with_session_average(self.config.session_average)
    }

    fn preprocessor(&self) -> Preprocessor {
        ColumnTransformer::new(
            Chain::new(StandardScaler::new(), InteractionFeatures::new()),
            OneHotEncoder::new().with_handle_unknown(self.config.unknown_category),
        )
    }

    /// Derive features, fit preprocessing and train the classifier
    pub fn fit(
        &self,
        users: &[UserRecord],
        logs: &[LogRecord],
        labels: &[Label],
    ) -> Result<FittedModel> {
        if users.is_empty() {
            return Err(SdkError::EmptyTrainingSet);
        }

        let deriver = self.deriver();
        let augmented = deriver.derive(users, logs);
        let targets = align_labels(&augmented, labels)?;

        let frame = FeatureFrame::from_users(&augmented);
        let preprocessor = self.preprocessor().fit(&frame)?;
        let design = preprocessor.transform(&frame)?;

        let classifier = self.config.classifier().fit(&design, &targets)?;

        tracing::info!(
            "Fitted click model: {} users, {} features, {} nonzero weights, {} iterations (converged: {})",
            design.nrows(),
            design.ncols(),
            classifier.nonzero_weights(),
            classifier.iterations(),
            classifier.converged()
        );

        Ok(FittedModel {
            deriver,
            preprocessor,
            classifier,
        })
    }
}

/// Click labels in user order
///
/// Every user needs exactly one label row; labels for ids outside the user
/// table are ignored.
fn align_labels(users: &[AugmentedUser], labels: &[Label]) -> Result<Vec<bool>> {
    let mut by_id: HashMap<UserId, bool> = HashMap::with_capacity(labels.len());
    for label in labels {
        if by_id.insert(label.id, label.clicked).is_some() {
            return Err(SdkError::DuplicateLabel(label.id));
        }
    }

    users
        .iter()
        .map(|u| {
            by_id
                .get(&u.id())
                .copied()
                .ok_or(SdkError::MissingLabel(u.id()))
        })
        .collect()
}

/// Trained pipeline
#[derive(Debug, Clone)]
pub struct FittedModel {
    deriver: FeatureDeriver,
    preprocessor: FittedPreprocessor,
    classifier: FittedLogisticRegression,
}

impl FittedModel {
    /// Derive the augmented user table the model would see
    pub fn derive_features(
        &self,
        users: &[UserRecord],
        logs: &[LogRecord],
    ) -> Vec<AugmentedUser> {
        self.deriver.derive(users, logs)
    }

    /// Preprocessed design matrix for a user table
    pub fn transform(&self, users: &[UserRecord], logs: &[LogRecord]) -> Result<Array2<f64>> {
        let augmented = self.derive_features(users, logs);
        let frame = FeatureFrame::from_users(&augmented);
        Ok(self.preprocessor.transform(&frame)?)
    }

    /// Click prediction per user, in input order
    pub fn predict(&self, users: &[UserRecord], logs: &[LogRecord]) -> Result<Vec<bool>> {
        let design = self.transform(users, logs)?;
        Ok(self.classifier.predict(&design)?)
    }

    /// Click probability per user, in input order
    pub fn predict_proba(&self, users: &[UserRecord], logs: &[LogRecord]) -> Result<Vec<f64>> {
        let design = self.transform(users, logs)?;
        Ok(self.classifier.predict_proba(&design)?)
    }

    /// Names of the design-matrix columns
    pub fn feature_names(&self) -> Vec<String> {
        self.preprocessor.output_names()
    }

    /// Learned weight per design-matrix column
    pub fn coefficients(&self) -> Vec<(String, f64)> {
        self.feature_names()
            .into_iter()
            .zip(self.classifier.weights().iter().copied())
            .collect()
    }

    pub fn intercept(&self) -> f64 {
        self.classifier.intercept()
    }

    /// Number of weights the L1 penalty left nonzero
    pub fn nonzero_weights(&self) -> usize {
        self.classifier.nonzero_weights()
    }

    pub fn classifier(&self) -> &FittedLogisticRegression {
        &self.classifier
    }
}
