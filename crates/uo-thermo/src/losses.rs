//! Plant-wide energy-loss accounting across process units.

use uo_core::{EvalError, EvalResult, FormulaResult};

/// Named per-unit energy losses, summed and expressed as shares.
#[derive(Debug, Clone)]
pub struct UnitLosses {
    /// (unit name, loss) pairs; units with zero loss are skipped
    pub losses: Vec<(String, f64)>,
}

impl UnitLosses {
    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        let active: Vec<_> = self
            .losses
            .iter()
            .filter(|(_, loss)| *loss > 0.0)
            .collect();
        if active.is_empty() {
            return Err(EvalError::domain("no unit reported a positive loss"));
        }
        for (name, loss) in &self.losses {
            if !loss.is_finite() || *loss < 0.0 {
                return Err(EvalError::domain(format!(
                    "loss for unit '{name}' must be a non-negative finite value"
                )));
            }
        }

        let total: f64 = active.iter().map(|(_, loss)| loss).sum();
        let mut result = FormulaResult::new().with("Total Loss", total, "MJ");
        for (name, loss) in active {
            result.push(format!("{name} Share"), 100.0 * loss / total, "%");
        }
        Ok(result)
    }
}
