//! Classification models
//!
//! Models follow the same fit-then-apply split as the preprocessing steps:
//! a [`Classifier`] is configuration, `fit` returns a [`FittedClassifier`].

pub mod logistic;

use crate::error::Result;
use ndarray::Array2;

pub use logistic::{FittedLogisticRegression, LogisticRegression};

/// An unfitted binary classifier
pub trait Classifier {
    type Fitted: FittedClassifier;

    /// Train on a design matrix and one boolean target per row
    fn fit(&self, x: &Array2<f64>, y: &[bool]) -> Result<Self::Fitted>;
}

/// A trained binary classifier
pub trait FittedClassifier {
    /// Positive-class probability per row
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>>;

    /// Class decision per row
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<bool>>;
}
