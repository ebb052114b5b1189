//! Emission series over an operating history.
//!
//! Applies the point emission factors to paired fuel-flow and excess-air
//! samples and reports per-sample and mean rates.

use serde::{Deserialize, Serialize};
use uo_core::{EvalError, EvalResult};
use uo_thermo::emissions::{CO2_FACTOR, NOX_FACTOR, SOX_FACTOR};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmissionSeries {
    /// kg/h per sample
    pub co2: Vec<f64>,
    pub nox: Vec<f64>,
    pub sox: Vec<f64>,
}

impl EmissionSeries {
    /// Per-sample rates from fuel flow (kg/h) and excess air (%) histories.
    pub fn from_history(fuel_flow: &[f64], excess_air: &[f64]) -> EvalResult<Self> {
        if fuel_flow.len() != excess_air.len() {
            return Err(EvalError::domain(
                "fuel flow and excess air series lengths differ",
            ));
        }
        if fuel_flow.is_empty() {
            return Err(EvalError::domain("emission series must not be empty"));
        }
        let mut co2 = Vec::with_capacity(fuel_flow.len());
        let mut nox = Vec::with_capacity(fuel_flow.len());
        let mut sox = Vec::with_capacity(fuel_flow.len());
        for (idx, (&flow, &excess)) in fuel_flow.iter().zip(excess_air).enumerate() {
            if !(flow >= 0.0) {
                return Err(EvalError::domain(format!(
                    "fuel flow sample {idx} is negative"
                )));
            }
            if !(excess >= 0.0) {
                return Err(EvalError::domain(format!(
                    "excess air sample {idx} is negative"
                )));
            }
            co2.push(flow * CO2_FACTOR);
            nox.push(flow * NOX_FACTOR * (1.0 + excess / 100.0));
            sox.push(flow * SOX_FACTOR);
        }
        Ok(Self { co2, nox, sox })
    }

    pub fn len(&self) -> usize {
        self.co2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.co2.is_empty()
    }

    pub fn mean_co2(&self) -> f64 {
        mean(&self.co2)
    }

    pub fn mean_nox(&self) -> f64 {
        mean(&self.nox)
    }

    pub fn mean_sox(&self) -> f64 {
        mean(&self.sox)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
