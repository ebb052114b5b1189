//! Lumped-capacitance transient heating (first-order response).

use uo_core::numeric::ensure_positive;
use uo_core::{EvalError, EvalResult, FormulaResult};

/// Time for a lumped body to reach a target temperature in a constant
/// environment.
///
/// τ = m·Cp/(h·A), t = −τ·ln((T_target − T_env)/(T_0 − T_env)). A rough
/// Biot estimate from m, A and Cp is reported alongside; Bi > 0.1 marks the
/// lumped assumption as questionable but is reported, not rejected.
#[derive(Debug, Clone, Copy)]
pub struct LumpedHeating {
    /// Body mass, kg
    pub mass: f64,
    /// Specific heat, J/(kg·K)
    pub cp: f64,
    /// Convective coefficient, W/(m²·K)
    pub h: f64,
    /// Exposed surface area, m²
    pub area: f64,
    /// Initial body temperature, °C
    pub t_initial: f64,
    /// Environment temperature, °C
    pub t_env: f64,
    /// Target body temperature, °C
    pub t_target: f64,
}

impl LumpedHeating {
    /// Thermal time constant τ, s.
    pub fn time_constant(&self) -> EvalResult<f64> {
        ensure_positive(self.mass, "mass")?;
        ensure_positive(self.cp, "specific heat")?;
        ensure_positive(self.h, "convective coefficient")?;
        ensure_positive(self.area, "surface area")?;
        Ok(self.mass * self.cp / (self.h * self.area))
    }

    /// Time to reach the target temperature, s.
    pub fn time_to_target(&self) -> EvalResult<f64> {
        let tau = self.time_constant()?;
        let ratio = (self.t_target - self.t_env) / (self.t_initial - self.t_env);
        if !(0.0..1.0).contains(&ratio) {
            return Err(EvalError::domain(
                "target temperature must lie strictly between initial and environment temperatures",
            ));
        }
        Ok(-tau * ratio.ln())
    }

    /// Body temperature at time t, °C.
    pub fn temperature_at(&self, t: f64) -> EvalResult<f64> {
        let tau = self.time_constant()?;
        if t < 0.0 {
            return Err(EvalError::domain("time must be non-negative"));
        }
        Ok(self.t_env + (self.t_initial - self.t_env) * (-t / tau).exp())
    }

    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        let tau = self.time_constant()?;
        let t = self.time_to_target()?;
        // Rough characteristic length from the bulk properties.
        let biot = self.h * (self.mass / (self.area * self.cp)).cbrt();
        Ok(FormulaResult::new()
            .with("Time Constant", tau, "s")
            .with("Time to Target", t, "s")
            .with("Biot Estimate", biot, "-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cooking_case() -> LumpedHeating {
        LumpedHeating {
            mass: 0.5,
            cp: 3700.0,
            h: 100.0,
            area: 0.03,
            t_initial: 25.0,
            t_env: 100.0,
            t_target: 70.0,
        }
    }

    #[test]
    fn time_matches_analytic_inverse() {
        let case = cooking_case();
        let tau = case.time_constant().unwrap();
        assert_relative_eq!(tau, 0.5 * 3700.0 / (100.0 * 0.03), epsilon = 1e-12);

        let t = case.time_to_target().unwrap();
        let expected = -tau * ((70.0 - 100.0) / (25.0 - 100.0) as f64).ln();
        assert_relative_eq!(t, expected, epsilon = 1e-9);

        // The response curve passes through the target at that time.
        let temp = case.temperature_at(t).unwrap();
        assert_relative_eq!(temp, 70.0, epsilon = 1e-9);
    }

    #[test]
    fn unreachable_target_is_a_domain_error() {
        let mut case = cooking_case();
        case.t_target = 150.0; // above the environment, never reached
        assert!(matches!(
            case.time_to_target(),
            Err(EvalError::Domain { .. })
        ));
    }
}
