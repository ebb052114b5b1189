//! Catalyst deactivation fit.
//!
//! Fits A(t) = A0 * exp(-k t) to observed activity samples by linear least
//! squares on ln A, then projects the time at which activity crosses a
//! replacement threshold.

use uo_core::{EvalError, EvalResult};

#[derive(Debug, Clone, Copy)]
pub struct CatalystDecayFit {
    /// Fitted initial activity A0
    pub a0: f64,
    /// Fitted decay constant k, 1/time
    pub k: f64,
    /// Coefficient of determination on ln A
    pub r_squared: f64,
}

impl CatalystDecayFit {
    pub fn fit(times: &[f64], activities: &[f64]) -> EvalResult<Self> {
        if times.len() != activities.len() {
            return Err(EvalError::domain("time and activity lengths differ"));
        }
        if times.len() < 2 {
            return Err(EvalError::domain("fit needs at least 2 samples"));
        }
        if activities.iter().any(|&a| !(a > 0.0)) {
            return Err(EvalError::numerical(
                "activities must be positive for a log-linear fit",
            ));
        }

        let n = times.len() as f64;
        let logs: Vec<f64> = activities.iter().map(|a| a.ln()).collect();
        let t_mean = times.iter().sum::<f64>() / n;
        let y_mean = logs.iter().sum::<f64>() / n;

        let mut s_tt = 0.0;
        let mut s_ty = 0.0;
        let mut s_yy = 0.0;
        for (&t, &y) in times.iter().zip(&logs) {
            let dt = t - t_mean;
            let dy = y - y_mean;
            s_tt += dt * dt;
            s_ty += dt * dy;
            s_yy += dy * dy;
        }
        if s_tt < 1e-12 {
            return Err(EvalError::numerical(
                "time grid is degenerate, all samples coincide",
            ));
        }

        let slope = s_ty / s_tt;
        let intercept = y_mean - slope * t_mean;
        let r_squared = if s_yy < 1e-30 {
            1.0
        } else {
            (s_ty * s_ty) / (s_tt * s_yy)
        };

        Ok(Self {
            a0: intercept.exp(),
            k: -slope,
            r_squared,
        })
    }

    /// Activity predicted at time `t`.
    pub fn activity_at(&self, t: f64) -> f64 {
        self.a0 * (-self.k * t).exp()
    }

    /// Time at which activity decays to `threshold`.
    pub fn replacement_time(&self, threshold: f64) -> EvalResult<f64> {
        if !(threshold > 0.0) || threshold >= self.a0 {
            return Err(EvalError::domain(format!(
                "threshold must be within (0, A0 = {})",
                self.a0
            )));
        }
        if self.k <= 0.0 {
            return Err(EvalError::numerical(
                "fitted activity is not decaying, no replacement time",
            ));
        }
        Ok(-(threshold / self.a0).ln() / self.k)
    }
}
