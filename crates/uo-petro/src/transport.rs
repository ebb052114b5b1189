//! Well-to-refinery transport optimization.
//!
//! Minimizes total shipping cost from wells to refineries with shipments as
//! the decision variables. Distances come from lat/lon coordinates at a flat
//! 111 km per degree.

use crate::simplex::{LpConstraint, LpProblem, Relation, solve_lp};
use serde::{Deserialize, Serialize};
use uo_core::{EvalError, EvalResult};

const KM_PER_DEGREE: f64 = 111.0;

/// A site with a location and a capacity figure (supply for wells, demand
/// for refineries), in the same volume unit throughout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: f64,
}

#[derive(Debug, Clone)]
pub struct TransportProblem {
    pub wells: Vec<Site>,
    pub refineries: Vec<Site>,
    /// $/km per unit shipped
    pub cost_per_km: f64,
}

#[derive(Debug, Clone)]
pub struct TransportSolution {
    /// shipments[i][j]: volume from well i to refinery j
    pub shipments: Vec<Vec<f64>>,
    pub total_cost: f64,
}

impl TransportProblem {
    /// Straight-line distance between two sites in km.
    fn distance_km(a: &Site, b: &Site) -> f64 {
        let dlat = a.latitude - b.latitude;
        let dlon = a.longitude - b.longitude;
        (dlat * dlat + dlon * dlon).sqrt() * KM_PER_DEGREE
    }

    pub fn solve(&self) -> EvalResult<TransportSolution> {
        if self.wells.is_empty() || self.refineries.is_empty() {
            return Err(EvalError::domain(
                "transport needs at least one well and one refinery",
            ));
        }
        if !(self.cost_per_km > 0.0) {
            return Err(EvalError::domain("cost per km must be positive"));
        }
        for site in self.wells.iter().chain(&self.refineries) {
            if !(site.capacity >= 0.0) {
                return Err(EvalError::domain(format!(
                    "site '{}' has negative capacity",
                    site.name
                )));
            }
        }

        let nw = self.wells.len();
        let nr = self.refineries.len();

        // x is row-major: x[i * nr + j] ships well i -> refinery j.
        let mut objective = Vec::with_capacity(nw * nr);
        for well in &self.wells {
            for refinery in &self.refineries {
                objective.push(Self::distance_km(well, refinery) * self.cost_per_km);
            }
        }

        let mut constraints = Vec::with_capacity(nw + nr);
        for (i, well) in self.wells.iter().enumerate() {
            let mut coeffs = vec![0.0; nw * nr];
            for j in 0..nr {
                coeffs[i * nr + j] = 1.0;
            }
            constraints.push(LpConstraint::new(coeffs, Relation::Le, well.capacity));
        }
        for (j, refinery) in self.refineries.iter().enumerate() {
            let mut coeffs = vec![0.0; nw * nr];
            for i in 0..nw {
                coeffs[i * nr + j] = 1.0;
            }
            constraints.push(LpConstraint::new(coeffs, Relation::Ge, refinery.capacity));
        }

        let sol = solve_lp(&LpProblem {
            objective,
            constraints,
        })?;

        let shipments = (0..nw)
            .map(|i| sol.x[i * nr..(i + 1) * nr].to_vec())
            .collect();
        Ok(TransportSolution {
            shipments,
            total_cost: sol.objective,
        })
    }
}
