//! Packed-tower gas absorber sizing by the HTU/NTU method.

use uo_core::numeric::ensure_positive;
use uo_core::{EvalError, EvalResult, FormulaResult};

/// Counter-current absorber stripping a solute from gas into a clean
/// solvent (x2 = 0), linear equilibrium y* = m x.
///
/// The absorption factor here is A = L / (m G). Transfer units follow the
/// Colburn relation and ideal stages the Kremser relation; both share the
/// same feasibility limit, so an operating line that pinches against the
/// equilibrium line before reaching the outlet spec is reported as
/// infeasible rather than as a NaN height.
#[derive(Debug, Clone, Copy)]
pub struct PackedAbsorber {
    /// Liquid molar flow L
    pub liquid_flow: f64,
    /// Gas molar flow G
    pub gas_flow: f64,
    /// Inlet gas mole fraction y1
    pub y_in: f64,
    /// Outlet gas mole fraction y2
    pub y_out: f64,
    /// Equilibrium line slope m
    pub slope: f64,
    /// Height of a transfer unit, m
    pub htu: f64,
}

/// Below this |A - 1| the A = 1 limiting forms are used.
const UNIT_FACTOR_TOL: f64 = 1e-9;

impl PackedAbsorber {
    pub fn absorption_factor(&self) -> f64 {
        self.liquid_flow / (self.slope * self.gas_flow)
    }

    fn validate(&self) -> EvalResult<()> {
        ensure_positive(self.liquid_flow, "liquid flow")?;
        ensure_positive(self.gas_flow, "gas flow")?;
        ensure_positive(self.slope, "equilibrium slope")?;
        ensure_positive(self.htu, "HTU")?;
        ensure_positive(self.y_out, "outlet gas mole fraction")?;
        if self.y_in >= 1.0 {
            return Err(EvalError::domain("inlet mole fraction must be below 1"));
        }
        if self.y_out >= self.y_in {
            return Err(EvalError::domain(
                "outlet mole fraction must be below the inlet mole fraction",
            ));
        }
        Ok(())
    }

    /// Argument of the Colburn/Kremser logarithm; non-positive means the
    /// outlet spec lies beyond the pinch for this solvent rate.
    fn log_argument(&self) -> EvalResult<f64> {
        let a = self.absorption_factor();
        let ratio = self.y_in / self.y_out;
        let arg = (1.0 - 1.0 / a) * ratio + 1.0 / a;
        if arg <= 0.0 {
            return Err(EvalError::infeasible(format!(
                "solvent rate too low: absorption factor {a:.3} pinches above the outlet spec"
            )));
        }
        Ok(arg)
    }

    /// Number of overall gas-phase transfer units.
    pub fn transfer_units(&self) -> EvalResult<f64> {
        self.validate()?;
        let a = self.absorption_factor();
        if (a - 1.0).abs() < UNIT_FACTOR_TOL {
            return Ok(self.y_in / self.y_out - 1.0);
        }
        Ok(self.log_argument()?.ln() / (1.0 - 1.0 / a))
    }

    /// Equivalent number of ideal equilibrium stages.
    pub fn ideal_stages(&self) -> EvalResult<f64> {
        self.validate()?;
        let a = self.absorption_factor();
        if (a - 1.0).abs() < UNIT_FACTOR_TOL {
            return Ok(self.y_in / self.y_out - 1.0);
        }
        Ok(self.log_argument()?.ln() / a.ln())
    }

    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        let ntu = self.transfer_units()?;
        let stages = self.ideal_stages()?;
        Ok(FormulaResult::new()
            .with("Absorption Factor", self.absorption_factor(), "-")
            .with("NTU", ntu, "-")
            .with("Packed Height", self.htu * ntu, "m")
            .with("Ideal Stages", stages, "-"))
    }
}
