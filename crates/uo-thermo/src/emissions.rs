//! Furnace emission estimates from fuel flow and excess air.

use uo_core::numeric::{ensure_non_negative, ensure_positive};
use uo_core::{EvalResult, FormulaResult};

/// Emission factors, kg pollutant per kg fuel.
pub const CO2_FACTOR: f64 = 3.14;
pub const NOX_FACTOR: f64 = 0.0008;
pub const SOX_FACTOR: f64 = 0.0015;

/// Point emission estimate for one operating condition.
///
/// NOx scales with excess air: more air, more thermal NOx.
#[derive(Debug, Clone, Copy)]
pub struct FuelEmissions {
    /// Fuel flow, kg/h
    pub fuel_flow: f64,
    /// Excess air, %
    pub excess_air: f64,
}

impl FuelEmissions {
    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        ensure_positive(self.fuel_flow, "fuel flow")?;
        ensure_non_negative(self.excess_air, "excess air")?;
        Ok(FormulaResult::new()
            .with("CO2 Rate", self.fuel_flow * CO2_FACTOR, "kg/h")
            .with(
                "NOx Rate",
                self.fuel_flow * NOX_FACTOR * (1.0 + self.excess_air / 100.0),
                "kg/h",
            )
            .with("SOx Rate", self.fuel_flow * SOX_FACTOR, "kg/h"))
    }
}
