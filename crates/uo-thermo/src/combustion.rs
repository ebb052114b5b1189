//! Combustion efficiency vs air-fuel ratio.

use uo_core::numeric::ensure_positive;
use uo_core::{EvalResult, FormulaResult};

/// Common fuels with their stoichiometric air-fuel ratios (mass basis).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fuel {
    Methane,
    Propane,
    Octane,
    Hydrogen,
    CarbonMonoxide,
}

impl Fuel {
    /// Selector order used by the tool catalog's `fuel` index parameter.
    pub const ALL: [Fuel; 5] = [
        Fuel::Methane,
        Fuel::Propane,
        Fuel::Octane,
        Fuel::Hydrogen,
        Fuel::CarbonMonoxide,
    ];

    pub fn from_index(index: usize) -> Option<Fuel> {
        Self::ALL.get(index).copied()
    }

    pub fn stoichiometric_afr(&self) -> f64 {
        match self {
            Fuel::Methane => 17.2,
            Fuel::Propane => 15.6,
            Fuel::Octane => 15.1,
            Fuel::Hydrogen => 34.3,
            Fuel::CarbonMonoxide => 2.5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Fuel::Methane => "methane",
            Fuel::Propane => "propane",
            Fuel::Octane => "octane",
            Fuel::Hydrogen => "hydrogen",
            Fuel::CarbonMonoxide => "carbon monoxide",
        }
    }
}

/// Efficiency model: Gaussian about the stoichiometric ratio with a spread
/// of 20% of AFR_st.
#[derive(Debug, Clone, Copy)]
pub struct CombustionEfficiency {
    /// Stoichiometric air-fuel ratio for the burned fuel
    pub stoich_afr: f64,
    /// Operating air-fuel ratio
    pub afr: f64,
}

impl CombustionEfficiency {
    pub fn for_fuel(fuel: Fuel, afr: f64) -> Self {
        Self {
            stoich_afr: fuel.stoichiometric_afr(),
            afr,
        }
    }

    /// Efficiency in percent at the configured AFR.
    pub fn efficiency(&self) -> EvalResult<f64> {
        ensure_positive(self.stoich_afr, "stoichiometric AFR")?;
        ensure_positive(self.afr, "air-fuel ratio")?;
        Ok(self.efficiency_at(self.afr))
    }

    /// Efficiency at an arbitrary AFR, used by sweeps. Inputs must already
    /// be validated.
    pub fn efficiency_at(&self, afr: f64) -> f64 {
        let sigma = 0.2 * self.stoich_afr;
        let deviation = afr - self.stoich_afr;
        (-(deviation * deviation) / (2.0 * sigma * sigma)).exp() * 100.0
    }

    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        let eff = self.efficiency()?;
        Ok(FormulaResult::new()
            .with("Combustion Efficiency", eff, "%")
            .with("AFR Deviation", self.afr - self.stoich_afr, "-"))
    }
}
