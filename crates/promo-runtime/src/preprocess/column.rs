//! Column transformer over the model's feature view
//!
//! Routes the numeric block and the categorical block of a [`FeatureFrame`]
//! through their own steps and concatenates the results, numeric first.

use super::{FittedTransformer, Transformer};
use crate::error::{Result, RuntimeError};
use ndarray::{concatenate, Array2, Axis};
use promo_core::AugmentedUser;

/// Numeric columns of the feature view, in order
pub const NUMERIC_COLUMNS: [&str; 4] = [
    "past_purchase_amt",
    "total_minutes",
    "avg_session_duration",
    "days_since_last_visit",
];

/// Categorical columns of the feature view, in order
pub const CATEGORICAL_COLUMNS: [&str; 2] = ["badge", "part_of_day"];

/// Typed feature view: one numeric and one categorical block, same rows
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    pub numeric: Array2<f64>,
    pub categorical: Array2<String>,
}

impl FeatureFrame {
    pub fn new(numeric: Array2<f64>, categorical: Array2<String>) -> Result<Self> {
        if numeric.nrows() != categorical.nrows() {
            return Err(RuntimeError::RowCountMismatch {
                features: numeric.nrows(),
                targets: categorical.nrows(),
            });
        }
        Ok(Self {
            numeric,
            categorical,
        })
    }

    /// Select the six-column view from augmented users, preserving row order
    pub fn from_users(users: &[AugmentedUser]) -> Self {
        let mut numeric = Array2::zeros((users.len(), NUMERIC_COLUMNS.len()));
        let mut categorical =
            Array2::from_elem((users.len(), CATEGORICAL_COLUMNS.len()), String::new());

        for (i, user) in users.iter().enumerate() {
            for (j, value) in user.numeric_view().into_iter().enumerate() {
                numeric[[i, j]] = value;
            }
            for (j, value) in user.categorical_view().into_iter().enumerate() {
                categorical[[i, j]] = value.to_string();
            }
        }

        Self {
            numeric,
            categorical,
        }
    }

    pub fn nrows(&self) -> usize {
        self.numeric.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.nrows() == 0
    }
}

/// Applies a numeric step and a categorical step side by side
#[derive(Debug, Clone)]
pub struct ColumnTransformer<N, C> {
    numeric: N,
    categorical: C,
}

impl<N, C> ColumnTransformer<N, C> {
    pub fn new(numeric: N, categorical: C) -> Self {
        Self {
            numeric,
            categorical,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FittedColumnTransformer<N, C> {
    numeric: N,
    categorical: C,
}

impl<N, C> FittedColumnTransformer<N, C>
where
    N: FittedTransformer<Input = Array2<f64>>,
    C: FittedTransformer<Input = Array2<String>>,
{
    pub fn numeric(&self) -> &N {
        &self.numeric
    }

    pub fn categorical(&self) -> &C {
        &self.categorical
    }

    /// Output column names, prefixed `num__` / `cat__` by block
    pub fn output_names(&self) -> Vec<String> {
        let numeric: Vec<String> = NUMERIC_COLUMNS.iter().map(|s| s.to_string()).collect();
        let categorical: Vec<String> =
            CATEGORICAL_COLUMNS.iter().map(|s| s.to_string()).collect();
        self.feature_names(&[numeric, categorical].concat())
    }
}

impl<N, C> Transformer for ColumnTransformer<N, C>
where
    N: Transformer<Input = Array2<f64>>,
    C: Transformer<Input = Array2<String>>,
{
    type Input = FeatureFrame;
    type Fitted = FittedColumnTransformer<N::Fitted, C::Fitted>;

    fn fit(&self, input: &FeatureFrame) -> Result<Self::Fitted> {
        Ok(FittedColumnTransformer {
            numeric: self.numeric.fit(&input.numeric)?,
            categorical: self.categorical.fit(&input.categorical)?,
        })
    }
}

impl<N, C> FittedTransformer for FittedColumnTransformer<N, C>
where
    N: FittedTransformer<Input = Array2<f64>>,
    C: FittedTransformer<Input = Array2<String>>,
{
    type Input = FeatureFrame;

    fn transform(&self, input: &FeatureFrame) -> Result<Array2<f64>> {
        let numeric = self.numeric.transform(&input.numeric)?;
        let categorical = self.categorical.transform(&input.categorical)?;

        concatenate(Axis(1), &[numeric.view(), categorical.view()]).map_err(|_| {
            RuntimeError::RowCountMismatch {
                features: numeric.nrows(),
                targets: categorical.nrows(),
            }
        })
    }

    fn output_width(&self) -> usize {
        self.numeric.output_width() + self.categorical.output_width()
    }

    /// `input_names` lists the numeric names followed by the categorical names
    fn feature_names(&self, input_names: &[String]) -> Vec<String> {
        let split = input_names.len().min(NUMERIC_COLUMNS.len());
        let (numeric, categorical) = input_names.split_at(split);

        let mut names: Vec<String> = self
            .numeric
            .feature_names(numeric)
            .into_iter()
            .map(|name| format!("num__{}", name))
            .collect();
        names.extend(
            self.categorical
                .feature_names(categorical)
                .into_iter()
                .map(|name| format!("cat__{}", name)),
        );
        names
    }
}
