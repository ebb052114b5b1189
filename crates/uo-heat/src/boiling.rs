//! Nucleate pool boiling: wall superheat and coefficient from heat flux.

use uo_core::numeric::ensure_positive;
use uo_core::units::constants::G0_MPS2;
use uo_core::{EvalError, EvalResult, FormulaResult};

/// Rohsenow-form superheat estimate for nucleate boiling.
///
/// Solves the correlation for ΔT at a given imposed heat flux, then reports
/// h = q″/ΔT.
#[derive(Debug, Clone, Copy)]
pub struct NucleateBoiling {
    /// Imposed heat flux q″, W/m²
    pub heat_flux: f64,
    /// Latent heat h_fg, J/kg
    pub h_fg: f64,
    /// Liquid specific heat c_pl, J/(kg·K)
    pub cp_liquid: f64,
    /// Liquid viscosity μ_l, Pa·s
    pub mu_liquid: f64,
    /// Surface tension σ, N/m
    pub surface_tension: f64,
    /// Liquid density ρ_l, kg/m³
    pub rho_liquid: f64,
    /// Vapor density ρ_v, kg/m³
    pub rho_vapor: f64,
    /// Surface-fluid constant C_sf
    pub c_sf: f64,
    /// Correlation exponent n
    pub exponent: f64,
}

impl NucleateBoiling {
    /// Wall superheat ΔT, K.
    pub fn superheat(&self) -> EvalResult<f64> {
        ensure_positive(self.heat_flux, "heat flux")?;
        ensure_positive(self.h_fg, "latent heat")?;
        ensure_positive(self.cp_liquid, "liquid specific heat")?;
        ensure_positive(self.mu_liquid, "liquid viscosity")?;
        ensure_positive(self.surface_tension, "surface tension")?;
        ensure_positive(self.c_sf, "surface-fluid constant")?;
        ensure_positive(self.exponent, "correlation exponent")?;
        if self.rho_liquid <= self.rho_vapor {
            return Err(EvalError::domain(
                "liquid density must exceed vapor density",
            ));
        }

        let n = self.exponent;
        let buoyancy = self.surface_tension / (G0_MPS2 * (self.rho_liquid - self.rho_vapor));
        let delta_t = ((self.heat_flux / (self.c_sf * self.mu_liquid.powf(n) * self.cp_liquid.powf(n)))
            * buoyancy.sqrt()
            * self.h_fg.powf(-(2.0 + n)))
        .powf(1.0 / (3.0 + n));

        if !delta_t.is_finite() || delta_t <= 0.0 {
            return Err(EvalError::numerical(
                "boiling superheat did not evaluate to a positive finite value",
            ));
        }
        Ok(delta_t)
    }

    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        let delta_t = self.superheat()?;
        let h = self.heat_flux / delta_t;
        Ok(FormulaResult::new()
            .with("Wall Superheat", delta_t, "K")
            .with("Boiling Coefficient", h, "W/(m2*K)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water_case() -> NucleateBoiling {
        NucleateBoiling {
            heat_flux: 1e5,
            h_fg: 2.26e6,
            cp_liquid: 4180.0,
            mu_liquid: 0.001,
            surface_tension: 0.072,
            rho_liquid: 997.0,
            rho_vapor: 0.6,
            c_sf: 0.013,
            exponent: 1.7,
        }
    }

    #[test]
    fn superheat_is_positive_and_consistent() {
        let case = water_case();
        let result = case.evaluate().unwrap();
        let dt = result.get("Wall Superheat").unwrap();
        let h = result.get("Boiling Coefficient").unwrap();
        assert!(dt > 0.0);
        assert!((h - case.heat_flux / dt).abs() < 1e-9);
    }

    #[test]
    fn higher_flux_means_higher_superheat() {
        let low = water_case();
        let mut high = water_case();
        high.heat_flux = 5e5;
        assert!(high.superheat().unwrap() > low.superheat().unwrap());
    }

    #[test]
    fn rejects_vapor_denser_than_liquid() {
        let mut case = water_case();
        case.rho_vapor = 2000.0;
        assert!(matches!(case.evaluate(), Err(EvalError::Domain { .. })));
    }
}
