//! Ordinary least-squares yield regression.
//!
//! Maps crude properties (API gravity, sulfur, ...) to a product yield with
//! a linear model solved through the normal equations.

use nalgebra::{DMatrix, DVector};
use uo_core::{EvalError, EvalResult};

#[derive(Debug, Clone)]
pub struct LinearRegression {
    pub intercept: f64,
    /// One coefficient per feature
    pub coefficients: Vec<f64>,
    /// R^2 on the training samples
    pub r_squared: f64,
    /// Mean absolute error on the training samples
    pub mae: f64,
}

impl LinearRegression {
    pub fn fit(features: &[Vec<f64>], targets: &[f64]) -> EvalResult<Self> {
        let n = features.len();
        if n != targets.len() {
            return Err(EvalError::domain("feature and target lengths differ"));
        }
        if n == 0 {
            return Err(EvalError::domain("regression needs at least one sample"));
        }
        let p = features[0].len();
        if p == 0 {
            return Err(EvalError::domain("regression needs at least one feature"));
        }
        if features.iter().any(|row| row.len() != p) {
            return Err(EvalError::domain("feature rows have inconsistent widths"));
        }
        if n < p + 1 {
            return Err(EvalError::numerical(format!(
                "underdetermined system: {n} samples for {p} features"
            )));
        }

        // Design matrix with a leading intercept column.
        let x = DMatrix::from_fn(n, p + 1, |i, j| {
            if j == 0 { 1.0 } else { features[i][j - 1] }
        });
        let y = DVector::from_column_slice(targets);

        let xtx = x.transpose() * &x;
        let xty = x.transpose() * &y;
        let beta = xtx.lu().solve(&xty).ok_or_else(|| {
            EvalError::numerical("normal equations are singular, features are collinear")
        })?;

        let predictions = &x * &beta;
        let y_mean = y.mean();
        let ss_res: f64 = (&y - &predictions).norm_squared();
        let ss_tot: f64 = y.iter().map(|v| (v - y_mean).powi(2)).sum();
        let r_squared = if ss_tot < 1e-30 {
            1.0
        } else {
            1.0 - ss_res / ss_tot
        };
        let mae = (&y - &predictions).abs().sum() / n as f64;

        Ok(Self {
            intercept: beta[0],
            coefficients: beta.as_slice()[1..].to_vec(),
            r_squared,
            mae,
        })
    }

    pub fn predict(&self, features: &[f64]) -> EvalResult<f64> {
        if features.len() != self.coefficients.len() {
            return Err(EvalError::domain(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, f)| c * f)
                .sum::<f64>())
    }
}
