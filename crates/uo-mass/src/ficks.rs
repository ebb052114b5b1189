//! Steady diffusion: Fick's first law and leak-loss estimates.

use uo_core::numeric::ensure_positive;
use uo_core::{EvalResult, FormulaResult};

/// Fick's-law flux across a linear concentration gradient.
///
/// J = −D·(C2 − C1)/L; positive flux points from high to low concentration.
#[derive(Debug, Clone, Copy)]
pub struct FicksFlux {
    /// Diffusivity D, m²/s
    pub diffusivity: f64,
    /// Concentration at x = 0, mol/m³
    pub c1: f64,
    /// Concentration at x = L, mol/m³
    pub c2: f64,
    /// Diffusion length L, m
    pub length: f64,
    /// Cross-sectional area, m²
    pub area: f64,
}

impl FicksFlux {
    /// Molar flux, mol/(m²·s).
    pub fn flux(&self) -> EvalResult<f64> {
        ensure_positive(self.diffusivity, "diffusivity")?;
        ensure_positive(self.length, "diffusion length")?;
        Ok(-self.diffusivity * (self.c2 - self.c1) / self.length)
    }

    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        ensure_positive(self.area, "area")?;
        let j = self.flux()?;
        Ok(FormulaResult::new()
            .with("Molar Flux", j, "mol/(m2*s)")
            .with("Total Transfer Rate", j * self.area, "mol/s"))
    }
}

/// Gas lost through a leak path over time.
///
/// J = D·C1/L, n = J·A·t, mass = n·M.
#[derive(Debug, Clone, Copy)]
pub struct GasDiffusionLoss {
    /// Diffusivity, m²/s
    pub diffusivity: f64,
    /// Source-side concentration, mol/m³
    pub concentration: f64,
    /// Leak path length, m
    pub path_length: f64,
    /// Leak area, m²
    pub area: f64,
    /// Elapsed time, s
    pub duration: f64,
    /// Gas molar mass, g/mol
    pub molar_mass: f64,
}

impl GasDiffusionLoss {
    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        ensure_positive(self.diffusivity, "diffusivity")?;
        ensure_positive(self.concentration, "concentration")?;
        ensure_positive(self.path_length, "leak path length")?;
        ensure_positive(self.area, "leak area")?;
        ensure_positive(self.duration, "duration")?;
        ensure_positive(self.molar_mass, "molar mass")?;

        let flux = self.diffusivity * self.concentration / self.path_length;
        let moles_lost = flux * self.area * self.duration;
        let mass_lost_g = moles_lost * self.molar_mass;

        Ok(FormulaResult::new()
            .with("Molar Flux", flux, "mol/(m2*s)")
            .with("Moles Lost", moles_lost, "mol")
            .with("Mass Lost", mass_lost_g, "g"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn flux_points_down_the_gradient() {
        let case = FicksFlux {
            diffusivity: 1e-9,
            c1: 5.0,
            c2: 0.0,
            length: 0.1,
            area: 1.0,
        };
        let j = case.flux().unwrap();
        assert_relative_eq!(j, 1e-9 * 5.0 / 0.1, epsilon = 1e-15);
        assert!(j > 0.0);

        // Reversed gradient gives negative flux, not an error.
        let reversed = FicksFlux { c1: 0.0, c2: 5.0, ..case };
        assert!(reversed.flux().unwrap() < 0.0);
    }

    #[test]
    fn leak_loss_accumulates_linearly_in_time() {
        let base = GasDiffusionLoss {
            diffusivity: 0.24e-4,
            concentration: 50.0,
            path_length: 0.1,
            area: 10.0e-4,
            duration: 3600.0,
            molar_mass: 16.04,
        };
        let one_hour = base.evaluate().unwrap().get("Mass Lost").unwrap();
        let two_hours = GasDiffusionLoss {
            duration: 7200.0,
            ..base
        }
        .evaluate()
        .unwrap()
        .get("Mass Lost")
        .unwrap();
        assert_relative_eq!(two_hours, 2.0 * one_hour, epsilon = 1e-9);
    }

    #[test]
    fn zero_length_rejected() {
        let case = FicksFlux {
            diffusivity: 1e-9,
            c1: 5.0,
            c2: 0.0,
            length: 0.0,
            area: 1.0,
        };
        assert!(case.flux().is_err());
    }
}
