//! Conduction through walls and resistance networks.

use uo_core::numeric::ensure_positive;
use uo_core::units::{Area, TempInterval};
use uo_core::{EvalError, EvalResult, FormulaResult};

/// One wall layer described by thickness and conductivity.
#[derive(Debug, Clone, Copy)]
pub struct Layer {
    /// Thickness, m
    pub thickness: f64,
    /// Thermal conductivity, W/(m·K)
    pub conductivity: f64,
}

impl Layer {
    /// Conductive resistance of the layer per unit area, (m²·K)/W.
    pub fn resistance(&self) -> EvalResult<f64> {
        ensure_positive(self.thickness, "layer thickness")?;
        ensure_positive(self.conductivity, "layer conductivity")?;
        Ok(self.thickness / self.conductivity)
    }
}

/// Heat loss through a multi-layer plane wall.
///
/// Layer resistances act in series: R_tot = Σ L_i/k_i, q = ΔT/R_tot,
/// Q = q·A.
#[derive(Debug, Clone)]
pub struct CompositeWall {
    pub layers: Vec<Layer>,
    /// Inside minus outside temperature
    pub delta_t: TempInterval,
    pub area: Area,
}

impl CompositeWall {
    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        if self.layers.is_empty() {
            return Err(EvalError::domain("wall must have at least one layer"));
        }
        ensure_positive(self.area.value, "wall area")?;

        let mut total_resistance = 0.0;
        for layer in &self.layers {
            total_resistance += layer.resistance()?;
        }

        let heat_flux = self.delta_t.value / total_resistance;
        let total_loss = heat_flux * self.area.value;

        Ok(FormulaResult::new()
            .with("Total Resistance", total_resistance, "m2*K/W")
            .with("Heat Loss per Area", heat_flux, "W/m2")
            .with("Total Heat Loss", total_loss, "W"))
    }
}

/// Series or parallel combination of discrete thermal resistances.
#[derive(Debug, Clone)]
pub enum ResistanceNetwork {
    Series(Vec<f64>),
    Parallel(Vec<f64>),
}

impl ResistanceNetwork {
    /// Total resistance of the network, K/W.
    pub fn total(&self) -> EvalResult<f64> {
        let (resistances, parallel) = match self {
            ResistanceNetwork::Series(r) => (r, false),
            ResistanceNetwork::Parallel(r) => (r, true),
        };
        if resistances.is_empty() {
            return Err(EvalError::domain("network must have at least one element"));
        }
        for &r in resistances {
            ensure_positive(r, "thermal resistance")?;
        }
        if parallel {
            Ok(1.0 / resistances.iter().map(|r| 1.0 / r).sum::<f64>())
        } else {
            Ok(resistances.iter().sum())
        }
    }

    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        let total = self.total()?;
        let kind = match self {
            ResistanceNetwork::Series(_) => "series",
            ResistanceNetwork::Parallel(_) => "parallel",
        };
        Ok(FormulaResult::new()
            .with(format!("Total Resistance ({kind})"), total, "K/W"))
    }
}

/// Overall heat-transfer coefficient from series resistances.
///
/// U = 1/ΣR_i; also reports per-kelvin duty U·A.
pub fn overall_coefficient(resistances: &[f64], area: f64) -> EvalResult<FormulaResult> {
    ensure_positive(area, "heat transfer area")?;
    let total = ResistanceNetwork::Series(resistances.to_vec()).total()?;
    let u = 1.0 / total;
    Ok(FormulaResult::new()
        .with("Total Resistance", total, "m2*K/W")
        .with("Overall Coefficient U", u, "W/(m2*K)")
        .with("Duty per Kelvin", u * area, "W/K"))
}

/// Steady conduction through a single slab: q = k·A·ΔT/d.
#[derive(Debug, Clone, Copy)]
pub struct SlabConduction {
    /// Conductivity, W/(m·K)
    pub conductivity: f64,
    pub area: Area,
    /// Slab thickness
    pub thickness: f64,
    /// Hot side minus cold side
    pub delta_t: TempInterval,
}

impl SlabConduction {
    pub fn evaluate(&self) -> EvalResult<FormulaResult> {
        ensure_positive(self.conductivity, "thermal conductivity")?;
        ensure_positive(self.area.value, "area")?;
        ensure_positive(self.thickness, "thickness")?;
        let q = self.conductivity * self.area.value * self.delta_t.value / self.thickness;
        Ok(FormulaResult::new().with("Heat Transfer Rate", q, "W"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use uo_core::units::{dt_kelvin, square_meters};

    #[test]
    fn composite_wall_matches_hand_calculation() {
        // Two layers of 0.1 and 0.2 m2*K/W in series, dT = 70 K over 10 m2.
        let wall = CompositeWall {
            layers: vec![
                Layer {
                    thickness: 0.1,
                    conductivity: 1.0,
                },
                Layer {
                    thickness: 0.2,
                    conductivity: 1.0,
                },
            ],
            delta_t: dt_kelvin(70.0),
            area: square_meters(10.0),
        };
        let result = wall.evaluate().unwrap();
        assert_relative_eq!(result.get("Total Resistance").unwrap(), 0.3, epsilon = 1e-12);
        assert_relative_eq!(
            result.get("Heat Loss per Area").unwrap(),
            70.0 / 0.3,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            result.get("Total Heat Loss").unwrap(),
            700.0 / 0.3,
            epsilon = 1e-9
        );
    }

    #[test]
    fn zero_conductivity_is_a_domain_error() {
        let wall = CompositeWall {
            layers: vec![Layer {
                thickness: 0.1,
                conductivity: 0.0,
            }],
            delta_t: dt_kelvin(70.0),
            area: square_meters(10.0),
        };
        assert!(matches!(
            wall.evaluate(),
            Err(EvalError::Domain { .. })
        ));
    }

    #[test]
    fn parallel_network_total() {
        let network = ResistanceNetwork::Parallel(vec![0.5, 0.5]);
        assert_relative_eq!(network.total().unwrap(), 0.25, epsilon = 1e-12);

        let series = ResistanceNetwork::Series(vec![0.5, 0.5, 1.0]);
        assert_relative_eq!(series.total().unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn overall_coefficient_inverts_resistance_sum() {
        let result = overall_coefficient(&[0.1, 0.1, 0.05], 2.0).unwrap();
        assert_relative_eq!(
            result.get("Overall Coefficient U").unwrap(),
            4.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(result.get("Duty per Kelvin").unwrap(), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn slab_conduction_rate() {
        let slab = SlabConduction {
            conductivity: 0.6,
            area: square_meters(1.0),
            thickness: 0.01,
            delta_t: dt_kelvin(75.0),
        };
        let q = slab.evaluate().unwrap().get("Heat Transfer Rate").unwrap();
        assert_relative_eq!(q, 0.6 * 75.0 / 0.01, epsilon = 1e-9);
    }
}
