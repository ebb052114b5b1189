//! Convective mass-transfer coefficients from Sherwood correlations.

use uo_core::numeric::ensure_positive;
use uo_core::{EvalResult, FormulaResult};

/// Sherwood-number correlation selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SherwoodCorrelation {
    /// Sh = 0.023·Re^0.83·Sc^0.44 (turbulent pipe flow)
    DittusBoelter,
    /// Sh = 0.027·Re^0.8·Sc^0.33 (viscous flow)
    SiederTate,
}

impl SherwoodCorrelation {
    pub fn sherwood(&self, reynolds: f64, schmidt: f64) -> f64 {
        match self {
            SherwoodCorrelation::DittusBoelter => 0.023 * reynolds.powf(0.83) * schmidt.powf(0.44),
            SherwoodCorrelation::SiederTate => 0.027 * reynolds.powf(0.8) * schmidt.powf(0.33),
        }
    }
}

/// Convective mass-transfer coefficient k_c = Sh·D/d.
#[derive(Debug, Clone, Copy)]
pub struct MassTransferCoefficient {
    pub correlation: SherwoodCorrelation,
    /// Diffusivity, m²/s
    pub diffusivity: f64,
    /// Characteristic length, m
    pub length: f64,
    /// Bulk velocity, m/s
    pub velocity: f64,
    /// Fluid density, kg/m³
    pub density: f64,
    /// Fluid viscosity, Pa·s
    pub viscosity: f64,
}

impl MassTransferCoefficient {
    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        ensure_positive(self.diffusivity, "diffusivity")?;
        ensure_positive(self.length, "characteristic length")?;
        ensure_positive(self.velocity, "velocity")?;
        ensure_positive(self.density, "density")?;
        ensure_positive(self.viscosity, "viscosity")?;

        let reynolds = self.density * self.velocity * self.length / self.viscosity;
        let schmidt = self.viscosity / (self.density * self.diffusivity);
        let sherwood = self.correlation.sherwood(reynolds, schmidt);
        let k_c = sherwood * self.diffusivity / self.length;

        Ok(FormulaResult::new()
            .with("Reynolds", reynolds, "-")
            .with("Schmidt", schmidt, "-")
            .with("Sherwood", sherwood, "-")
            .with("Mass Transfer Coefficient", k_c, "m/s"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn water_case(correlation: SherwoodCorrelation) -> MassTransferCoefficient {
        MassTransferCoefficient {
            correlation,
            diffusivity: 1e-9,
            length: 0.01,
            velocity: 0.2,
            density: 1000.0,
            viscosity: 0.001,
        }
    }

    #[test]
    fn dimensionless_groups_match_definitions() {
        let result = water_case(SherwoodCorrelation::DittusBoelter)
            .evaluate()
            .unwrap();
        assert_relative_eq!(result.get("Reynolds").unwrap(), 2000.0, epsilon = 1e-9);
        assert_relative_eq!(result.get("Schmidt").unwrap(), 1000.0, epsilon = 1e-9);

        let sh = 0.023 * 2000.0f64.powf(0.83) * 1000.0f64.powf(0.44);
        assert_relative_eq!(result.get("Sherwood").unwrap(), sh, epsilon = 1e-9);
        assert_relative_eq!(
            result.get("Mass Transfer Coefficient").unwrap(),
            sh * 1e-9 / 0.01,
            epsilon = 1e-12
        );
    }

    #[test]
    fn correlations_differ() {
        let a = water_case(SherwoodCorrelation::DittusBoelter)
            .evaluate()
            .unwrap()
            .get("Sherwood")
            .unwrap();
        let b = water_case(SherwoodCorrelation::SiederTate)
            .evaluate()
            .unwrap()
            .get("Sherwood")
            .unwrap();
        assert!((a - b).abs() > 1e-6);
    }
}
