//! L1-regularized logistic regression
//!
//! Minimizes `||w||_1 + C * sum_i log(1 + exp(-y_i * w^T x_i))` with
//! `y_i` in {-1, +1}. The intercept is an extra constant-one feature and is
//! penalized like any other weight.
//!
//! Solved by cyclic coordinate descent: each coordinate takes a
//! one-dimensional Newton step on the smooth loss with the L1 term handled in
//! closed form, followed by an Armijo backtracking line search. Weights whose
//! subgradient contains zero are set to exactly zero.

use super::{Classifier, FittedClassifier};
use crate::error::{Result, RuntimeError};
use crate::preprocess::check_finite;
use ndarray::{concatenate, Array1, Array2, Axis};

/// Sufficient-decrease constant of the line search
const ARMIJO_SIGMA: f64 = 0.01;

/// Maximum halvings per line search
const MAX_LINE_SEARCH_STEPS: usize = 30;

/// Keeps the coordinate Hessian positive
const HESSIAN_FLOOR: f64 = 1e-12;

/// Logistic regression configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    /// Inverse regularization strength
    pub c: f64,

    /// Stop when no weight moved more than this in a full sweep
    pub tolerance: f64,

    /// Maximum number of full coordinate sweeps
    pub max_iter: usize,

    /// Rows with probability strictly above this are positive
    pub decision_threshold: f64,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            c: 1.0,
            tolerance: 1e-4,
            max_iter: 1000,
            decision_threshold: 0.5,
        }
    }
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_decision_threshold(mut self, threshold: f64) -> Self {
        self.decision_threshold = threshold;
        self
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(RuntimeError::InvalidParameter(format!(
                "C must be positive, got {}",
                self.c
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(RuntimeError::InvalidParameter(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iter == 0 {
            return Err(RuntimeError::InvalidParameter(
                "max_iter must be at least 1".to_string(),
            ));
        }
        if !(self.decision_threshold > 0.0 && self.decision_threshold < 1.0) {
            return Err(RuntimeError::InvalidParameter(format!(
                "decision threshold must be in (0, 1), got {}",
                self.decision_threshold
            )));
        }
        Ok(())
    }
}

/// Trained logistic regression
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLogisticRegression {
    weights: Array1<f64>,
    intercept: f64,
    decision_threshold: f64,
    iterations: usize,
    converged: bool,
}

impl FittedLogisticRegression {
    /// Feature weights, one per design-matrix column
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of feature weights that are not exactly zero
    pub fn nonzero_weights(&self) -> usize {
        self.weights.iter().filter(|w| **w != 0.0).count()
    }

    /// Coordinate sweeps the solver ran
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Linear score `w^T x + b` per row
    pub fn decision_function(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.weights.len() {
            return Err(RuntimeError::ShapeMismatch {
                expected: self.weights.len(),
                actual: x.ncols(),
            });
        }
        check_finite(x)?;
        Ok(x.dot(&self.weights) + self.intercept)
    }
}

impl FittedClassifier for FittedLogisticRegression {
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        Ok(self.decision_function(x)?.iter().map(|&s| sigmoid(s)).collect())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<bool>> {
        Ok(self
            .predict_proba(x)?
            .into_iter()
            .map(|p| p > self.decision_threshold)
            .collect())
    }
}

impl Classifier for LogisticRegression {
    type Fitted = FittedLogisticRegression;

    fn fit(&self, x: &Array2<f64>, y: &[bool]) -> Result<FittedLogisticRegression> {
        self.validate()?;

        let (n_samples, n_features) = x.dim();
        if n_samples == 0 {
            return Err(RuntimeError::EmptyInput(
                "logistic regression needs at least one training row".to_string(),
            ));
        }
        if n_samples != y.len() {
            return Err(RuntimeError::RowCountMismatch {
                features: n_samples,
                targets: y.len(),
            });
        }
        check_finite(x)?;

        let positives = y.iter().filter(|v| **v).count();
        if positives == 0 || positives == n_samples {
            tracing::warn!(
                "Training labels contain a single class ({} rows, {} positive)",
                n_samples,
                positives
            );
        }

        // Intercept is the last column
        let ones = Array2::<f64>::ones((n_samples, 1));
        let design = concatenate(Axis(1), &[x.view(), ones.view()]).map_err(|_| {
            RuntimeError::ShapeMismatch {
                expected: n_samples,
                actual: x.nrows(),
            }
        })?;

        let signs: Vec<f64> = y.iter().map(|&v| if v { 1.0 } else { -1.0 }).collect();
        let mut w = vec![0.0; n_features + 1];
        let mut scores = vec![0.0; n_samples];

        let mut iterations = 0;
        let mut converged = false;

        for sweep in 0..self.max_iter {
            iterations = sweep + 1;
            let mut max_step = 0.0_f64;
            let mut stalled = false;

            for (j, wj) in w.iter_mut().enumerate() {
                let column = design.column(j);

                let mut gradient = 0.0;
                let mut hessian = 0.0;
                for ((&xij, &yi), &score) in column.iter().zip(&signs).zip(&scores) {
                    if xij == 0.0 {
                        continue;
                    }
                    let s = sigmoid(yi * score);
                    gradient += (s - 1.0) * yi * xij;
                    hessian += s * (1.0 - s) * xij * xij;
                }
                gradient *= self.c;
                hessian = self.c * hessian + HESSIAN_FLOOR;

                let direction = l1_newton_direction(*wj, gradient, hessian);
                if direction == 0.0 {
                    continue;
                }

                let current_loss: f64 = signs
                    .iter()
                    .zip(&scores)
                    .map(|(&yi, &score)| log_loss(yi * score))
                    .sum();
                let expected_decrease = gradient * direction + (*wj + direction).abs() - wj.abs();

                let mut step = 1.0;
                let mut accepted = false;
                for _ in 0..MAX_LINE_SEARCH_STEPS {
                    let trial_loss: f64 = column
                        .iter()
                        .zip(&signs)
                        .zip(&scores)
                        .map(|((&xij, &yi), &score)| {
                            log_loss(yi * (score + step * direction * xij))
                        })
                        .sum();
                    let change = self.c * (trial_loss - current_loss)
                        + (*wj + step * direction).abs()
                        - wj.abs();

                    if change <= ARMIJO_SIGMA * step * expected_decrease {
                        accepted = true;
                        break;
                    }
                    step *= 0.5;
                }

                if !accepted {
                    // A rejected step that would have moved the weight blocks convergence
                    if direction.abs() >= self.tolerance {
                        stalled = true;
                    }
                    continue;
                }

                let delta = step * direction;
                *wj += delta;
                for (score, &xij) in scores.iter_mut().zip(column.iter()) {
                    *score += delta * xij;
                }
                max_step = max_step.max(delta.abs());
            }

            if max_step < self.tolerance && !stalled {
                converged = true;
                break;
            }
        }

        if !converged {
            tracing::warn!(
                "Coordinate descent did not converge within {} iterations",
                self.max_iter
            );
        }

        let intercept = w[n_features];
        w.truncate(n_features);

        Ok(FittedLogisticRegression {
            weights: Array1::from(w),
            intercept,
            decision_threshold: self.decision_threshold,
            iterations,
            converged,
        })
    }
}

/// Minimizer of the quadratic model `g*d + h*d^2/2 + |w + d|` over `d`
fn l1_newton_direction(w: f64, gradient: f64, hessian: f64) -> f64 {
    if gradient + 1.0 <= hessian * w {
        -(gradient + 1.0) / hessian
    } else if gradient - 1.0 >= hessian * w {
        -(gradient - 1.0) / hessian
    } else {
        -w
    }
}

fn sigmoid(t: f64) -> f64 {
    if t >= 0.0 {
        1.0 / (1.0 + (-t).exp())
    } else {
        let e = t.exp();
        e / (1.0 + e)
    }
}

/// `log(1 + exp(-margin))` without overflow
fn log_loss(margin: f64) -> f64 {
    if margin > 0.0 {
        (-margin).exp().ln_1p()
    } else {
        -margin + margin.exp().ln_1p()
    }
}
