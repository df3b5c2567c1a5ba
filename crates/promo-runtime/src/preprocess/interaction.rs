//! Degree-2 interaction features
//!
//! Keeps the input columns and appends the product of every column pair
//! (`i < j`). No squared terms and no bias column.

use super::{check_width, FittedTransformer, Transformer};
use crate::error::{Result, RuntimeError};
use ndarray::{s, Array2};

#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionFeatures;

impl InteractionFeatures {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FittedInteractionFeatures {
    input_width: usize,
}

impl FittedInteractionFeatures {
    /// Column pairs in output order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.input_width)
            .flat_map(move |i| ((i + 1)..self.input_width).map(move |j| (i, j)))
    }
}

impl Transformer for InteractionFeatures {
    type Input = Array2<f64>;
    type Fitted = FittedInteractionFeatures;

    fn fit(&self, input: &Array2<f64>) -> Result<FittedInteractionFeatures> {
        if input.ncols() == 0 {
            return Err(RuntimeError::EmptyInput(
                "interaction features need at least one column".to_string(),
            ));
        }
        Ok(FittedInteractionFeatures {
            input_width: input.ncols(),
        })
    }
}

impl FittedTransformer for FittedInteractionFeatures {
    type Input = Array2<f64>;

    fn transform(&self, input: &Array2<f64>) -> Result<Array2<f64>> {
        check_width(self.input_width, input.ncols())?;

        let n = self.input_width;
        let mut output = Array2::zeros((input.nrows(), self.output_width()));
        output.slice_mut(s![.., ..n]).assign(input);

        for (k, (i, j)) in self.pairs().enumerate() {
            let product = &input.column(i) * &input.column(j);
            output.column_mut(n + k).assign(&product);
        }

        Ok(output)
    }

    fn output_width(&self) -> usize {
        let n = self.input_width;
        n + n * n.saturating_sub(1) / 2
    }

    fn feature_names(&self, input_names: &[String]) -> Vec<String> {
        let mut names = input_names.to_vec();
        names.extend(
            self.pairs()
                .map(|(i, j)| format!("{} {}", input_names[i], input_names[j])),
        );
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_four_columns_expand_to_ten() {
        let x = array![[1.0, 2.0, 3.0, 4.0]];
        let fitted = InteractionFeatures::new().fit(&x).unwrap();
        let out = fitted.transform(&x).unwrap();

        assert_eq!(fitted.output_width(), 10);
        assert_eq!(
            out,
            array![[1.0, 2.0, 3.0, 4.0, 2.0, 3.0, 4.0, 6.0, 8.0, 12.0]]
        );
    }

    #[test]
    fn test_single_column_has_no_products() {
        let x = array![[5.0], [6.0]];
        let fitted = InteractionFeatures::new().fit(&x).unwrap();
        assert_eq!(fitted.transform(&x).unwrap(), x);
    }

    #[test]
    fn test_feature_names_order() {
        let fitted = InteractionFeatures::new()
            .fit(&array![[1.0, 2.0, 3.0]])
            .unwrap();
        let names: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();

        assert_eq!(
            fitted.feature_names(&names),
            vec!["a", "b", "c", "a b", "a c", "b c"]
        );
    }

    #[test]
    fn test_zero_columns_fails() {
        let x = Array2::<f64>::zeros((2, 0));
        assert!(InteractionFeatures::new().fit(&x).is_err());
    }
}
