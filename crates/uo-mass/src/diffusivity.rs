//! Binary diffusivity estimation correlations.
//!
//! Wilke–Chang for dilute liquids, Fuller for low-pressure gases. Both
//! correlations are evaluated in their customary CGS-flavored units and
//! converted to m²/s at the end.

use uo_core::numeric::ensure_positive;
use uo_core::{EvalResult, FormulaResult};

/// Wilke–Chang liquid-phase diffusivity.
///
/// D_AB = 7.4e-8 · sqrt(φ·M_B) · T / (μ · V_A^0.6)   [cm²/s]
///
/// `temperature` in K, `viscosity` in cP, `molar_volume` in cm³/mol.
pub fn wilke_chang_diffusivity(
    association_factor: f64,
    solvent_molar_mass: f64,
    temperature: f64,
    viscosity: f64,
    solute_molar_volume: f64,
) -> EvalResult<f64> {
    ensure_positive(association_factor, "association factor")?;
    ensure_positive(solvent_molar_mass, "solvent molar mass")?;
    ensure_positive(temperature, "temperature")?;
    ensure_positive(viscosity, "viscosity")?;
    ensure_positive(solute_molar_volume, "solute molar volume")?;

    let d_cm2_s = 7.4e-8 * (association_factor * solvent_molar_mass).sqrt() * temperature
        / (viscosity * solute_molar_volume.powf(0.6));
    Ok(d_cm2_s * 1e-4)
}

/// Fuller gas-phase diffusivity.
///
/// D_AB = 0.00143 · T^1.75 · sqrt(1/M_A + 1/M_B) / (P · (Σv_A^⅓ + Σv_B^⅓)²)   [cm²/s]
///
/// `temperature` in K, `pressure` in atm, diffusion volumes in cm³/mol.
pub fn fuller_gas_diffusivity(
    molar_mass_a: f64,
    molar_mass_b: f64,
    temperature: f64,
    pressure: f64,
    diffusion_volume_a: f64,
    diffusion_volume_b: f64,
) -> EvalResult<f64> {
    ensure_positive(molar_mass_a, "molar mass A")?;
    ensure_positive(molar_mass_b, "molar mass B")?;
    ensure_positive(temperature, "temperature")?;
    ensure_positive(pressure, "pressure")?;
    ensure_positive(diffusion_volume_a, "diffusion volume A")?;
    ensure_positive(diffusion_volume_b, "diffusion volume B")?;

    let d_cm2_s = 0.00143 * temperature.powf(1.75) * (1.0 / molar_mass_a + 1.0 / molar_mass_b).sqrt()
        / (pressure * (diffusion_volume_a.powf(1.0 / 3.0) + diffusion_volume_b.powf(1.0 / 3.0)).powi(2));
    Ok(d_cm2_s * 1e-4)
}

/// Convenience wrapper reporting both the CGS and SI values.
pub fn wilke_chang_result(
    association_factor: f64,
    solvent_molar_mass: f64,
    temperature: f64,
    viscosity: f64,
    solute_molar_volume: f64,
) -> EvalResult<FormulaResult> {
    let d = wilke_chang_diffusivity(
        association_factor,
        solvent_molar_mass,
        temperature,
        viscosity,
        solute_molar_volume,
    )?;
    Ok(FormulaResult::new()
        .with("Diffusivity", d, "m2/s")
        .with("Diffusivity (CGS)", d * 1e4, "cm2/s"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wilke_chang_reference_value() {
        // Water solvent (phi = 2.6, M_B = 18), 298 K, 0.89 cP, V_A = 75.
        let d = wilke_chang_diffusivity(2.6, 18.0, 298.0, 0.89, 75.0).unwrap();
        let expected_cgs = 7.4e-8 * (2.6f64 * 18.0).sqrt() * 298.0 / (0.89 * 75.0f64.powf(0.6));
        assert_relative_eq!(d, expected_cgs * 1e-4, epsilon = 1e-15);
        // Typical small-solute liquid diffusivity is ~1e-9 m2/s.
        assert!(d > 1e-10 && d < 1e-8);
    }

    #[test]
    fn fuller_scales_with_temperature() {
        let cold = fuller_gas_diffusivity(28.0, 32.0, 273.0, 1.0, 17.9, 16.6).unwrap();
        let hot = fuller_gas_diffusivity(28.0, 32.0, 373.0, 1.0, 17.9, 16.6).unwrap();
        assert!(hot > cold);
        assert_relative_eq!(
            hot / cold,
            (373.0f64 / 273.0).powf(1.75),
            epsilon = 1e-12
        );
    }

    #[test]
    fn nonpositive_pressure_rejected() {
        assert!(fuller_gas_diffusivity(28.0, 32.0, 300.0, 0.0, 17.9, 16.6).is_err());
    }
}
