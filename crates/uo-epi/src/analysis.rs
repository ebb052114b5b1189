//! Derived epidemiological quantities: R0, healthcare load, sensitivity.

use crate::model::{BetaSchedule, SeirParams};
use crate::simulate::{SeirSeries, SimSpec, simulate};
use serde::{Deserialize, Serialize};
use uo_core::numeric::ensure_positive;
use uo_core::{EvalError, EvalResult, FormulaResult};

/// Basic reproduction number R0 = β/γ.
pub fn basic_r0(beta: f64, gamma: f64) -> EvalResult<f64> {
    ensure_positive(beta, "transmission rate beta")?;
    ensure_positive(gamma, "recovery rate gamma")?;
    Ok(beta / gamma)
}

/// Effective reproduction number over a run: R_t = R0 · S(t)/N.
pub fn effective_r(series: &SeirSeries, params: &SeirParams) -> EvalResult<Vec<f64>> {
    let r0 = basic_r0(params.beta.base(), params.gamma)?;
    Ok(series
        .susceptible
        .iter()
        .map(|s| r0 * s / params.population)
        .collect())
}

/// Hospital and ICU load derived from the infected curve.
#[derive(Debug, Clone, Copy)]
pub struct HealthcareForecast {
    /// Fraction of infections needing a hospital bed
    pub hospital_rate: f64,
    /// Fraction of infections needing an ICU bed
    pub icu_rate: f64,
    /// Available hospital beds
    pub hospital_beds: f64,
    /// Available ICU beds
    pub icu_beds: f64,
}

impl HealthcareForecast {
    pub fn evaluate(&self, series: &SeirSeries) -> EvalResult<FormulaResult> {
        for (name, rate) in [
            ("hospitalization rate", self.hospital_rate),
            ("ICU rate", self.icu_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(EvalError::domain(format!("{name} must be within [0, 1]")));
            }
        }
        if series.is_empty() {
            return Err(EvalError::domain("series must not be empty"));
        }

        let (peak_infected, peak_day) = series.peak_infected();
        let peak_hospital = peak_infected * self.hospital_rate;
        let peak_icu = peak_infected * self.icu_rate;

        Ok(FormulaResult::new()
            .with("Peak Infected", peak_infected, "people")
            .with("Peak Day", peak_day, "day")
            .with("Peak Hospitalized", peak_hospital, "people")
            .with("Peak ICU", peak_icu, "people")
            .with(
                "Hospital Overload",
                (peak_hospital - self.hospital_beds).max(0.0),
                "people",
            )
            .with("ICU Overload", (peak_icu - self.icu_beds).max(0.0), "people"))
    }
}

/// One sensitivity sample: outcome metrics at a given β.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub beta: f64,
    pub peak_infected: f64,
    pub final_recovered: f64,
}

/// Re-run the simulation across a β range and collect outcome metrics.
///
/// Failed runs (e.g. conservation breakdown for extreme rates) are skipped,
/// mirroring the gap behavior of response-curve sweeps.
pub fn beta_sensitivity(
    params: &SeirParams,
    spec: &SimSpec,
    beta_range: (f64, f64),
    samples: usize,
) -> EvalResult<Vec<SensitivityPoint>> {
    if samples < 2 {
        return Err(EvalError::domain("sensitivity needs at least 2 samples"));
    }
    let (start, end) = beta_range;
    if end <= start {
        return Err(EvalError::domain("beta range must be ascending"));
    }
    ensure_positive(start, "beta range start")?;

    let step = (end - start) / (samples - 1) as f64;
    let mut points = Vec::with_capacity(samples);
    for idx in 0..samples {
        let beta = start + idx as f64 * step;
        let run_params = SeirParams {
            beta: BetaSchedule::Constant(beta),
            ..*params
        };
        if let Ok(series) = simulate(&run_params, spec) {
            points.push(SensitivityPoint {
                beta,
                peak_infected: series.peak_infected().0,
                final_recovered: *series.recovered.last().unwrap_or(&0.0),
            });
        }
    }
    Ok(points)
}
