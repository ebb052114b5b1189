//! Batch drying time: constant-rate plus falling-rate periods.

use uo_core::numeric::ensure_positive;
use uo_core::{EvalError, EvalResult, FormulaResult};

/// Drying from an initial moisture to a final target through a critical
/// moisture content.
///
/// Constant-rate period removes M0 − Mc at rate Rc; the falling-rate period
/// removes Mc − X at the average rate Rc/2 under a linear-falling-rate
/// approximation. All moistures are dry-basis fractions.
#[derive(Debug, Clone, Copy)]
pub struct DryingTime {
    /// Initial moisture content M0
    pub initial_moisture: f64,
    /// Critical moisture content Mc
    pub critical_moisture: f64,
    /// Final target moisture X
    pub final_moisture: f64,
    /// Constant drying rate Rc, moisture fraction per hour
    pub constant_rate: f64,
}

impl DryingTime {
    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        ensure_positive(self.initial_moisture, "initial moisture")?;
        ensure_positive(self.constant_rate, "constant drying rate")?;
        if self.final_moisture < 0.0 {
            return Err(EvalError::domain("final moisture must be non-negative"));
        }
        if self.final_moisture >= self.initial_moisture {
            return Err(EvalError::domain(
                "final moisture must be below initial moisture",
            ));
        }

        // Clamp the critical point into [final, initial]; outside that span
        // one of the two periods simply vanishes.
        let mc = self
            .critical_moisture
            .clamp(self.final_moisture, self.initial_moisture);

        let constant_period = (self.initial_moisture - mc) / self.constant_rate;
        let falling_removed = mc - self.final_moisture;
        let falling_period = if falling_removed > 0.0 {
            falling_removed / (self.constant_rate / 2.0)
        } else {
            0.0
        };

        Ok(FormulaResult::new()
            .with("Constant-Rate Time", constant_period, "h")
            .with("Falling-Rate Time", falling_period, "h")
            .with("Total Drying Time", constant_period + falling_period, "h"))
    }
}
