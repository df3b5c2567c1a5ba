//! Preprocessing transformers
//!
//! Every step follows the same two-phase contract: a [`Transformer`] holds
//! configuration and learns parameters in `fit`, producing a
//! [`FittedTransformer`] that only applies them. Fitted steps never change
//! after fit, so the same instance serves both training and prediction.

pub mod column;
pub mod interaction;
pub mod one_hot;
pub mod scaler;

use crate::error::{Result, RuntimeError};
use ndarray::Array2;

pub use column::{
    ColumnTransformer, FeatureFrame, FittedColumnTransformer, CATEGORICAL_COLUMNS,
    NUMERIC_COLUMNS,
};
pub use interaction::{FittedInteractionFeatures, InteractionFeatures};
pub use one_hot::{FittedOneHotEncoder, HandleUnknown, OneHotEncoder};
pub use scaler::{FittedStandardScaler, StandardScaler};

/// An unfitted preprocessing step
pub trait Transformer {
    /// Data the step consumes
    type Input: ?Sized;

    /// The step with learned parameters
    type Fitted: FittedTransformer<Input = Self::Input>;

    /// Learn parameters from training data
    fn fit(&self, input: &Self::Input) -> Result<Self::Fitted>;
}

/// A preprocessing step with learned parameters
pub trait FittedTransformer {
    type Input: ?Sized;

    /// Apply the learned transformation
    fn transform(&self, input: &Self::Input) -> Result<Array2<f64>>;

    /// Number of output columns
    fn output_width(&self) -> usize;

    /// Output column names given the input column names
    fn feature_names(&self, input_names: &[String]) -> Vec<String>;
}

/// Two numeric steps applied in sequence
#[derive(Debug, Clone, Default)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

/// Fitted form of [`Chain`]
#[derive(Debug, Clone)]
pub struct FittedChain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Transformer for Chain<A, B>
where
    A: Transformer<Input = Array2<f64>>,
    B: Transformer<Input = Array2<f64>>,
{
    type Input = Array2<f64>;
    type Fitted = FittedChain<A::Fitted, B::Fitted>;

    fn fit(&self, input: &Array2<f64>) -> Result<Self::Fitted> {
        let first = self.first.fit(input)?;
        let intermediate = first.transform(input)?;
        let second = self.second.fit(&intermediate)?;
        Ok(FittedChain { first, second })
    }
}

impl<A, B> FittedTransformer for FittedChain<A, B>
where
    A: FittedTransformer<Input = Array2<f64>>,
    B: FittedTransformer<Input = Array2<f64>>,
{
    type Input = Array2<f64>;

    fn transform(&self, input: &Array2<f64>) -> Result<Array2<f64>> {
        let intermediate = self.first.transform(input)?;
        self.second.transform(&intermediate)
    }

    fn output_width(&self) -> usize {
        self.second.output_width()
    }

    fn feature_names(&self, input_names: &[String]) -> Vec<String> {
        let intermediate = self.first.feature_names(input_names);
        self.second.feature_names(&intermediate)
    }
}

/// Error unless `actual` matches the width a step was fitted on
pub(crate) fn check_width(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(RuntimeError::ShapeMismatch { expected, actual });
    }
    Ok(())
}

/// Error on the first NaN or infinite entry
pub(crate) fn check_finite(input: &Array2<f64>) -> Result<()> {
    match input.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, column), _)) => Err(RuntimeError::NonFiniteValue { row, column }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_chain_scales_then_expands() {
        let x = array![[1.0, 10.0], [3.0, 30.0]];
        let chain = Chain::new(StandardScaler::new(), InteractionFeatures::new());

        let fitted = chain.fit(&x).unwrap();
        let out = fitted.transform(&x).unwrap();

        assert_eq!(fitted.output_width(), 3);
        assert_eq!(out, array![[-1.0, -1.0, 1.0], [1.0, 1.0, 1.0]]);
    }

    #[test]
    fn test_chain_feature_names() {
        let x = array![[1.0, 2.0], [2.0, 1.0]];
        let fitted = Chain::new(StandardScaler::new(), InteractionFeatures::new())
            .fit(&x)
            .unwrap();

        let names = fitted.feature_names(&["a".to_string(), "b".to_string()]);
        assert_eq!(names, vec!["a", "b", "a b"]);
    }

    #[test]
    fn test_check_finite_reports_position() {
        assert!(check_finite(&array![[1.0, 2.0], [3.0, 4.0]]).is_ok());
        assert_eq!(
            check_finite(&array![[1.0, 2.0], [f64::INFINITY, 4.0]]).unwrap_err(),
            RuntimeError::NonFiniteValue { row: 1, column: 0 }
        );
    }

    #[test]
    fn test_check_width() {
        assert!(check_width(3, 3).is_ok());
        assert!(check_width(3, 2).is_err());
    }
}
