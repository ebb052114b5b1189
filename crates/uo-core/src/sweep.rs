//! Response-curve generation by sweeping one input across a range.
//!
//! Every tool reuses the same shape: re-evaluate the formula at N evenly
//! spaced points of one input while holding the others fixed. Points where
//! the formula reports a domain or numerical error become NaN gaps rather
//! than aborting the whole sweep; renderers and exporters must tolerate
//! missing points.

use crate::error::{EvalError, EvalResult};
use std::fmt;

/// Default number of sweep points when the caller does not specify one.
pub const DEFAULT_SWEEP_POINTS: usize = 100;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Definition of a single parameter sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSpec {
    /// Start value (inclusive)
    pub start: f64,
    /// End value (inclusive); must exceed `start`
    pub end: f64,
    /// Number of points to generate
    pub num_points: usize,
    /// Spacing type
    pub spacing: Spacing,
}

impl SweepSpec {
    pub fn linear(start: f64, end: f64, num_points: usize) -> EvalResult<Self> {
        Self::validated(start, end, num_points, Spacing::Linear)
    }

    pub fn logarithmic(start: f64, end: f64, num_points: usize) -> EvalResult<Self> {
        Self::validated(start, end, num_points, Spacing::Logarithmic)
    }

    fn validated(start: f64, end: f64, num_points: usize, spacing: Spacing) -> EvalResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(EvalError::domain("sweep bounds must be finite"));
        }
        if num_points < 2 {
            return Err(EvalError::domain("sweep must have at least 2 points"));
        }
        if end <= start {
            return Err(EvalError::domain(
                "sweep end must be greater than sweep start",
            ));
        }
        if spacing == Spacing::Logarithmic && start <= 0.0 {
            return Err(EvalError::domain(
                "log sweep requires a positive start value",
            ));
        }
        Ok(Self {
            start,
            end,
            num_points,
            spacing,
        })
    }

    /// Generate all points in the sweep, ascending, with exact endpoints.
    pub fn points(&self) -> Vec<f64> {
        match self.spacing {
            Spacing::Linear => self.generate_linear(),
            Spacing::Logarithmic => self.generate_logarithmic(),
        }
    }

    fn generate_linear(&self) -> Vec<f64> {
        let mut points = Vec::with_capacity(self.num_points);
        let delta = (self.end - self.start) / (self.num_points - 1) as f64;
        for i in 0..self.num_points {
            points.push(self.start + i as f64 * delta);
        }
        // Ensure exact endpoint
        points[self.num_points - 1] = self.end;
        points
    }

    fn generate_logarithmic(&self) -> Vec<f64> {
        // validated() guarantees 0 < start < end here
        let mut points = Vec::with_capacity(self.num_points);
        let log_start = self.start.ln();
        let log_end = self.end.ln();
        let log_delta = (log_end - log_start) / (self.num_points - 1) as f64;
        for i in 0..self.num_points {
            points.push((log_start + i as f64 * log_delta).exp());
        }
        // Ensure exact endpoints
        points[0] = self.start;
        points[self.num_points - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spacing = match self.spacing {
            Spacing::Linear => "linear",
            Spacing::Logarithmic => "log",
        };
        write!(
            f,
            "sweep {} .. {} ({} points, {spacing})",
            self.start, self.end, self.num_points
        )
    }
}

/// An ordered (x, y) curve produced by one sweep. Gaps are NaN y-values.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseCurve {
    pub x_name: String,
    pub y_name: String,
    pub points: Vec<(f64, f64)>,
}

impl ResponseCurve {
    /// Iterate over points whose y-value is usable.
    pub fn valid_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().copied().filter(|(_, y)| y.is_finite())
    }

    /// Number of gap points (failed evaluations) in the curve.
    pub fn num_gaps(&self) -> usize {
        self.points.iter().filter(|(_, y)| !y.is_finite()).count()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Evaluate `f` at every sweep point.
///
/// Per-point failures (domain violations, numerical failures, non-finite
/// outputs) are carried as NaN gaps; the sweep itself never fails once the
/// spec is valid.
pub fn sweep_curve<F>(
    x_name: impl Into<String>,
    y_name: impl Into<String>,
    spec: &SweepSpec,
    f: F,
) -> ResponseCurve
where
    F: Fn(f64) -> EvalResult<f64>,
{
    let points = spec
        .points()
        .into_iter()
        .map(|x| {
            let y = match f(x) {
                Ok(y) if y.is_finite() => y,
                _ => f64::NAN,
            };
            (x, y)
        })
        .collect();

    ResponseCurve {
        x_name: x_name.into(),
        y_name: y_name.into(),
        points,
    }
}
