//! One-hot encoder for string columns
//!
//! Each column's vocabulary is the sorted set of values seen at fit time.
//! Values outside the vocabulary are handled per [`HandleUnknown`].

use super::{check_width, FittedTransformer, Transformer};
use crate::error::{Result, RuntimeError};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Policy for categories not seen at fit time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    /// Encode as an all-zero indicator block
    #[default]
    Ignore,

    /// Fail the transform
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct OneHotEncoder {
    handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handle_unknown(mut self, handle_unknown: HandleUnknown) -> Self {
        self.handle_unknown = handle_unknown;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FittedOneHotEncoder {
    categories: Vec<Vec<String>>,
    handle_unknown: HandleUnknown,
}

impl FittedOneHotEncoder {
    /// Sorted vocabulary of each input column
    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories
    }
}

impl Transformer for OneHotEncoder {
    type Input = Array2<String>;
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, input: &Array2<String>) -> Result<FittedOneHotEncoder> {
        if input.nrows() == 0 {
            return Err(RuntimeError::EmptyInput(
                "one-hot encoder needs at least one row".to_string(),
            ));
        }

        let categories: Vec<Vec<String>> = input
            .columns()
            .into_iter()
            .map(|column| {
                column
                    .iter()
                    .cloned()
                    .collect::<BTreeSet<String>>()
                    .into_iter()
                    .collect()
            })
            .collect();

        Ok(FittedOneHotEncoder {
            categories,
            handle_unknown: self.handle_unknown,
        })
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Input = Array2<String>;

    fn transform(&self, input: &Array2<String>) -> Result<Array2<f64>> {
        check_width(self.categories.len(), input.ncols())?;

        let mut output = Array2::zeros((input.nrows(), self.output_width()));

        for (row_idx, row) in input.rows().into_iter().enumerate() {
            let mut offset = 0;
            for (col_idx, value) in row.iter().enumerate() {
                let vocabulary = &self.categories[col_idx];
                match vocabulary.binary_search(value) {
                    Ok(pos) => output[[row_idx, offset + pos]] = 1.0,
                    Err(_) if self.handle_unknown == HandleUnknown::Error => {
                        return Err(RuntimeError::UnknownCategory {
                            column: col_idx,
                            value: value.clone(),
                        });
                    }
                    Err(_) => {}
                }
                offset += vocabulary.len();
            }
        }

        Ok(output)
    }

    fn output_width(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    fn feature_names(&self, input_names: &[String]) -> Vec<String> {
        self.categories
            .iter()
            .zip(input_names)
            .flat_map(|(vocabulary, name)| {
                vocabulary
                    .iter()
                    .map(move |category| format!("{}_{}", name, category))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn frame(rows: &[[&str; 2]]) -> Array2<String> {
        let flat: Vec<String> = rows
            .iter()
            .flat_map(|r| r.iter().map(|s| s.to_string()))
            .collect();
        Array2::from_shape_vec((rows.len(), 2), flat).unwrap()
    }

    #[test]
    fn test_fit_learns_sorted_vocabulary() {
        let x = frame(&[["silver", "Night"], ["gold", "Morning"], ["silver", "Night"]]);
        let fitted = OneHotEncoder::new().fit(&x).unwrap();

        assert_eq!(fitted.categories()[0], vec!["gold", "silver"]);
        assert_eq!(fitted.categories()[1], vec!["Morning", "Night"]);
        assert_eq!(fitted.output_width(), 4);
    }

    #[test]
    fn test_transform_sets_indicators() {
        let x = frame(&[["silver", "Night"], ["gold", "Morning"]]);
        let fitted = OneHotEncoder::new().fit(&x).unwrap();
        let out = fitted.transform(&x).unwrap();

        assert_eq!(out.row(0).to_vec(), vec![0.0, 1.0, 0.0, 1.0]);
        assert_eq!(out.row(1).to_vec(), vec![1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unknown_category_is_all_zero_when_ignored() {
        let fitted = OneHotEncoder::new()
            .fit(&frame(&[["gold", "Night"], ["silver", "Morning"]]))
            .unwrap();
        let out = fitted.transform(&frame(&[["platinum", "Night"]])).unwrap();

        assert_eq!(out.row(0).to_vec(), vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unknown_category_errors_under_error_policy() {
        let fitted = OneHotEncoder::new()
            .with_handle_unknown(HandleUnknown::Error)
            .fit(&frame(&[["gold", "Night"]]))
            .unwrap();
        let result = fitted.transform(&frame(&[["gold", "Evening"]]));

        assert_eq!(
            result.unwrap_err(),
            RuntimeError::UnknownCategory {
                column: 1,
                value: "Evening".to_string()
            }
        );
    }

    #[test]
    fn test_feature_names() {
        let fitted = OneHotEncoder::new()
            .fit(&frame(&[["gold", "Night"], ["red", "Night"]]))
            .unwrap();
        let names = fitted.feature_names(&["badge".to_string(), "part_of_day".to_string()]);

        assert_eq!(names, vec!["badge_gold", "badge_red", "part_of_day_Night"]);
    }

    #[test]
    fn test_fit_empty_fails() {
        let x = Array2::<String>::from_shape_vec((0, 2), vec![]).unwrap();
        assert!(OneHotEncoder::new().fit(&x).is_err());
    }
}
