//! Filmwise condensation on a vertical plate (Nusselt's equation).

use uo_core::numeric::ensure_positive;
use uo_core::units::{Temperature, constants::G0_MPS2};
use uo_core::{EvalError, EvalResult, FormulaResult};

/// Laminar film condensation coefficient estimate.
///
/// h = 0.943 · (k_l³ ρ_l² g h_fg / (μ_l L ΔT))^0.25 with ΔT = T_sat − T_s.
/// Assumes constant properties, laminar film, no vapor shear.
#[derive(Debug, Clone, Copy)]
pub struct FilmCondensation {
    /// Plate height, m
    pub height: f64,
    /// Liquid density, kg/m³
    pub rho_liquid: f64,
    /// Liquid viscosity, Pa·s
    pub mu_liquid: f64,
    /// Liquid thermal conductivity, W/(m·K)
    pub k_liquid: f64,
    /// Latent heat of vaporization, J/kg
    pub h_fg: f64,
    /// Surface temperature
    pub t_surface: Temperature,
    /// Saturation temperature
    pub t_saturation: Temperature,
}

impl FilmCondensation {
    /// Film ΔT driving the condensation, K. Must be strictly positive.
    pub fn delta_t(&self) -> EvalResult<f64> {
        let dt = self.t_saturation.value - self.t_surface.value;
        if dt <= 0.0 {
            return Err(EvalError::domain(
                "saturation temperature must exceed surface temperature",
            ));
        }
        Ok(dt)
    }

    /// Coefficient at a caller-supplied ΔT, used by response-curve sweeps.
    pub fn coefficient_at(&self, delta_t: f64) -> EvalResult<f64> {
        ensure_positive(self.height, "plate height")?;
        ensure_positive(self.rho_liquid, "liquid density")?;
        ensure_positive(self.mu_liquid, "liquid viscosity")?;
        ensure_positive(self.k_liquid, "liquid conductivity")?;
        ensure_positive(self.h_fg, "latent heat")?;
        ensure_positive(delta_t, "film temperature difference")?;

        let numerator = self.k_liquid.powi(3) * self.rho_liquid.powi(2) * G0_MPS2 * self.h_fg;
        let denominator = self.mu_liquid * self.height * delta_t;
        Ok(0.943 * (numerator / denominator).powf(0.25))
    }

    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        let dt = self.delta_t()?;
        let h = self.coefficient_at(dt)?;
        Ok(FormulaResult::new()
            .with("Film dT", dt, "K")
            .with("Condensation Coefficient", h, "W/(m2*K)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use uo_core::units::celsius;

    fn water_case() -> FilmCondensation {
        FilmCondensation {
            height: 0.5,
            rho_liquid: 1000.0,
            mu_liquid: 0.001,
            k_liquid: 0.6,
            h_fg: 2.25e6,
            t_surface: celsius(30.0),
            t_saturation: celsius(100.0),
        }
    }

    #[test]
    fn coefficient_matches_direct_formula() {
        let case = water_case();
        let dt = case.delta_t().unwrap();
        assert_relative_eq!(dt, 70.0, epsilon = 1e-9);

        let expected = 0.943
            * ((0.6f64.powi(3) * 1000.0f64.powi(2) * G0_MPS2 * 2.25e6)
                / (0.001 * 0.5 * 70.0))
                .powf(0.25);
        let result = case.evaluate().unwrap();
        assert_relative_eq!(
            result.get("Condensation Coefficient").unwrap(),
            expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn coefficient_decreases_with_delta_t() {
        // h is proportional to dT^(-1/4): thicker film, lower coefficient.
        let case = water_case();
        let h_low = case.coefficient_at(10.0).unwrap();
        let h_high = case.coefficient_at(60.0).unwrap();
        assert!(h_low > h_high);
    }

    #[test]
    fn rejects_inverted_temperatures() {
        let mut case = water_case();
        case.t_surface = celsius(100.0);
        case.t_saturation = celsius(30.0);
        assert!(matches!(case.evaluate(), Err(EvalError::Domain { .. })));

        // Equal temperatures are also invalid: zero film dT.
        case.t_saturation = celsius(100.0);
        assert!(case.evaluate().is_err());
    }
}
