//! Column-wise z-score scaling with an explicit fit/transform split.

use uo_core::{EvalError, EvalResult};

/// Per-column mean and standard deviation learned from a training batch.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(data: &[Vec<f64>]) -> EvalResult<Self> {
        if data.is_empty() {
            return Err(EvalError::domain("scaler needs at least one row"));
        }
        let width = data[0].len();
        if width == 0 {
            return Err(EvalError::domain("scaler needs at least one column"));
        }
        if data.iter().any(|row| row.len() != width) {
            return Err(EvalError::domain("rows have inconsistent widths"));
        }

        let n = data.len() as f64;
        let mut means = vec![0.0; width];
        for row in data {
            for (m, v) in means.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        let mut stds = vec![0.0; width];
        for row in data {
            for ((s, v), m) in stds.iter_mut().zip(row).zip(&means) {
                *s += (v - m) * (v - m);
            }
        }
        for s in &mut stds {
            *s = (*s / n).sqrt();
            // Constant columns scale to zero rather than dividing by zero.
            if *s < 1e-12 {
                *s = 1.0;
            }
        }

        Ok(Self { means, stds })
    }

    pub fn transform(&self, data: &[Vec<f64>]) -> EvalResult<Vec<Vec<f64>>> {
        data.iter().map(|row| self.transform_row(row)).collect()
    }

    pub fn transform_row(&self, row: &[f64]) -> EvalResult<Vec<f64>> {
        if row.len() != self.means.len() {
            return Err(EvalError::domain(format!(
                "expected {} columns, got {}",
                self.means.len(),
                row.len()
            )));
        }
        Ok(row
            .iter()
            .zip(&self.means)
            .zip(&self.stds)
            .map(|((v, m), s)| (v - m) / s)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scaled_training_data_has_zero_mean_unit_std() {
        let data = vec![
            vec![1.0, 100.0],
            vec![2.0, 200.0],
            vec![3.0, 300.0],
            vec![4.0, 400.0],
        ];
        let scaler = StandardScaler::fit(&data).unwrap();
        let scaled = scaler.transform(&data).unwrap();
        for col in 0..2 {
            let mean: f64 = scaled.iter().map(|r| r[col]).sum::<f64>() / 4.0;
            let var: f64 = scaled.iter().map(|r| r[col] * r[col]).sum::<f64>() / 4.0;
            assert_relative_eq!(mean, 0.0, epsilon = 1e-12);
            assert_relative_eq!(var, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn constant_column_maps_to_zero() {
        let data = vec![vec![5.0], vec![5.0], vec![5.0]];
        let scaler = StandardScaler::fit(&data).unwrap();
        let scaled = scaler.transform(&data).unwrap();
        assert!(scaled.iter().all(|r| r[0] == 0.0));
    }

    #[test]
    fn ragged_rows_rejected() {
        let data = vec![vec![1.0, 2.0], vec![1.0]];
        assert!(StandardScaler::fit(&data).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fitted_data_is_centered(
                values in proptest::collection::vec(-1e3f64..1e3, 4..50),
            ) {
                let data: Vec<Vec<f64>> = values.iter().map(|&v| vec![v]).collect();
                let scaler = StandardScaler::fit(&data).unwrap();
                let scaled = scaler.transform(&data).unwrap();
                let mean: f64 =
                    scaled.iter().map(|r| r[0]).sum::<f64>() / scaled.len() as f64;
                prop_assert!(mean.abs() < 1e-6);
            }
        }
    }
}
