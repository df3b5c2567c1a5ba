//! Standard scaler
//!
//! Centers each column on its training mean and divides by its training
//! (population) standard deviation. Constant columns keep a scale of 1; a
//! column counts as constant when its variance is within rounding error of
//! its mean.

use super::{check_finite, check_width, FittedTransformer, Transformer};
use crate::error::{Result, RuntimeError};
use ndarray::{Array1, Array2, Axis};

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScaler;

impl StandardScaler {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FittedStandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl FittedStandardScaler {
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn scale(&self) -> &Array1<f64> {
        &self.scale
    }
}

impl Transformer for StandardScaler {
    type Input = Array2<f64>;
    type Fitted = FittedStandardScaler;

    fn fit(&self, input: &Array2<f64>) -> Result<FittedStandardScaler> {
        check_finite(input)?;
        let mean = input.mean_axis(Axis(0)).ok_or_else(|| {
            RuntimeError::EmptyInput("standard scaler needs at least one row".to_string())
        })?;

        let n = input.nrows() as f64;
        let variance = input.var_axis(Axis(0), 0.0);
        let scale = variance
            .iter()
            .zip(mean.iter())
            .map(|(&var, &m)| {
                let bound = n * f64::EPSILON * var + (n * m * f64::EPSILON).powi(2);
                if var > bound {
                    var.sqrt()
                } else {
                    1.0
                }
            })
            .collect::<Array1<f64>>();

        Ok(FittedStandardScaler { mean, scale })
    }
}

impl FittedTransformer for FittedStandardScaler {
    type Input = Array2<f64>;

    fn transform(&self, input: &Array2<f64>) -> Result<Array2<f64>> {
        check_width(self.mean.len(), input.ncols())?;
        check_finite(input)?;
        Ok((input - &self.mean) / &self.scale)
    }

    fn output_width(&self) -> usize {
        self.mean.len()
    }

    fn feature_names(&self, input_names: &[String]) -> Vec<String> {
        input_names.to_vec()
    }
}
