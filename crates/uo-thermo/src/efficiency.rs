//! First-law energy efficiency of a single unit.

use uo_core::numeric::ensure_positive;
use uo_core::{EvalError, EvalResult, FormulaResult};

/// η = 100·E_out/E_in; losses are the complement.
#[derive(Debug, Clone, Copy)]
pub struct EnergyEfficiency {
    /// Total energy input, MJ
    pub input_energy: f64,
    /// Useful energy output, MJ
    pub output_energy: f64,
}

impl EnergyEfficiency {
    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        ensure_positive(self.input_energy, "energy input")?;
        if self.output_energy < 0.0 {
            return Err(EvalError::domain("energy output must be non-negative"));
        }
        if self.output_energy > self.input_energy {
            return Err(EvalError::domain(
                "useful output cannot exceed energy input",
            ));
        }
        let efficiency = 100.0 * self.output_energy / self.input_energy;
        Ok(FormulaResult::new()
            .with("Efficiency", efficiency, "%")
            .with("Loss", 100.0 - efficiency, "%"))
    }
}
