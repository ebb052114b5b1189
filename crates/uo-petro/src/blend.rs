//! Crude blend optimization.
//!
//! Picks the blend fractions of the available crudes that minimize a chosen
//! property while keeping the blended sulfur and viscosity under refinery
//! caps. Blend properties mix linearly in the fractions.

use crate::simplex::{LpConstraint, LpProblem, Relation, solve_lp};
use serde::{Deserialize, Serialize};
use uo_core::{EvalError, EvalResult, FormulaResult};

/// One available crude stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crude {
    pub name: String,
    /// $/bbl
    pub cost: f64,
    /// wt %
    pub sulfur: f64,
    /// cSt
    pub viscosity: f64,
}

/// Which blend property to minimize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendObjective {
    Cost,
    Sulfur,
    Viscosity,
}

#[derive(Debug, Clone)]
pub struct BlendProblem {
    pub crudes: Vec<Crude>,
    pub objective: BlendObjective,
    /// Blend sulfur cap, wt %
    pub max_sulfur: Option<f64>,
    /// Blend viscosity cap, cSt
    pub max_viscosity: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct BlendSolution {
    /// Fraction of each crude, same order as the input, sums to 1
    pub fractions: Vec<f64>,
    /// Minimized objective value
    pub objective: f64,
    pub blend_cost: f64,
    pub blend_sulfur: f64,
    pub blend_viscosity: f64,
}

impl BlendProblem {
    pub fn solve(&self) -> EvalResult<BlendSolution> {
        if self.crudes.is_empty() {
            return Err(EvalError::domain("blend needs at least one crude"));
        }
        for crude in &self.crudes {
            for (what, v) in [
                ("cost", crude.cost),
                ("sulfur", crude.sulfur),
                ("viscosity", crude.viscosity),
            ] {
                if !v.is_finite() || v < 0.0 {
                    return Err(EvalError::domain(format!(
                        "crude '{}' has invalid {what} {v}",
                        crude.name
                    )));
                }
            }
        }

        let n = self.crudes.len();
        let property = |pick: fn(&Crude) -> f64| -> Vec<f64> {
            self.crudes.iter().map(pick).collect()
        };
        let costs = property(|c| c.cost);
        let sulfurs = property(|c| c.sulfur);
        let viscosities = property(|c| c.viscosity);

        let objective = match self.objective {
            BlendObjective::Cost => costs.clone(),
            BlendObjective::Sulfur => sulfurs.clone(),
            BlendObjective::Viscosity => viscosities.clone(),
        };

        let mut constraints = vec![LpConstraint::new(vec![1.0; n], Relation::Eq, 1.0)];
        if let Some(cap) = self.max_sulfur {
            constraints.push(LpConstraint::new(sulfurs.clone(), Relation::Le, cap));
        }
        if let Some(cap) = self.max_viscosity {
            constraints.push(LpConstraint::new(viscosities.clone(), Relation::Le, cap));
        }

        let lp = LpProblem {
            objective,
            constraints,
        };
        let sol = solve_lp(&lp)?;

        let mix = |props: &[f64]| -> f64 {
            props.iter().zip(&sol.x).map(|(p, x)| p * x).sum()
        };

        Ok(BlendSolution {
            blend_cost: mix(&costs),
            blend_sulfur: mix(&sulfurs),
            blend_viscosity: mix(&viscosities),
            fractions: sol.x,
            objective: sol.objective,
        })
    }
}

impl BlendSolution {
    pub fn to_result(&self) -> FormulaResult {
        FormulaResult::new()
            .with("Objective", self.objective, "")
            .with("Blend Cost", self.blend_cost, "$/bbl")
            .with("Blend Sulfur", self.blend_sulfur, "wt %")
            .with("Blend Viscosity", self.blend_viscosity, "cSt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn crude(name: &str, cost: f64, sulfur: f64, viscosity: f64) -> Crude {
        Crude {
            name: name.to_string(),
            cost,
            sulfur,
            viscosity,
        }
    }

    #[test]
    fn unconstrained_picks_cheapest() {
        let problem = BlendProblem {
            crudes: vec![
                crude("Brent", 80.0, 0.4, 5.0),
                crude("WTI", 75.0, 0.3, 4.0),
            ],
            objective: BlendObjective::Cost,
            max_sulfur: None,
            max_viscosity: None,
        };
        let sol = problem.solve().unwrap();
        assert_relative_eq!(sol.fractions[1], 1.0, epsilon = 1e-8);
        assert_relative_eq!(sol.objective, 75.0, epsilon = 1e-8);
    }

    #[test]
    fn sulfur_cap_forces_a_mix() {
        // Cheap crude is sour; the cap forces sweet crude into the blend.
        let problem = BlendProblem {
            crudes: vec![
                crude("Sour", 60.0, 3.0, 10.0),
                crude("Sweet", 90.0, 0.5, 4.0),
            ],
            objective: BlendObjective::Cost,
            max_sulfur: Some(1.5),
            max_viscosity: None,
        };
        let sol = problem.solve().unwrap();
        assert_relative_eq!(
            sol.fractions.iter().sum::<f64>(),
            1.0,
            epsilon = 1e-8
        );
        assert!(sol.blend_sulfur <= 1.5 + 1e-8);
        // Active cap: 3.0 a + 0.5 (1-a) = 1.5 -> a = 0.4
        assert_relative_eq!(sol.fractions[0], 0.4, epsilon = 1e-6);
    }

    #[test]
    fn impossible_cap_is_infeasible() {
        let problem = BlendProblem {
            crudes: vec![crude("Sour", 60.0, 3.0, 10.0)],
            objective: BlendObjective::Cost,
            max_sulfur: Some(1.0),
            max_viscosity: None,
        };
        assert!(matches!(
            problem.solve(),
            Err(EvalError::Infeasible { .. })
        ));
    }

    #[test]
    fn identical_crudes_share_one_objective() {
        // Degenerate program: every feasible blend has the same cost.
        let problem = BlendProblem {
            crudes: vec![
                crude("A", 70.0, 1.0, 6.0),
                crude("B", 70.0, 1.0, 6.0),
                crude("C", 70.0, 1.0, 6.0),
            ],
            objective: BlendObjective::Cost,
            max_sulfur: Some(2.0),
            max_viscosity: Some(8.0),
        };
        let sol = problem.solve().unwrap();
        assert_relative_eq!(sol.objective, 70.0, epsilon = 1e-8);
        assert_relative_eq!(
            sol.fractions.iter().sum::<f64>(),
            1.0,
            epsilon = 1e-8
        );
    }

    #[test]
    fn minimize_sulfur_objective() {
        let problem = BlendProblem {
            crudes: vec![
                crude("Sour", 60.0, 3.0, 10.0),
                crude("Sweet", 90.0, 0.5, 4.0),
            ],
            objective: BlendObjective::Sulfur,
            max_sulfur: None,
            max_viscosity: None,
        };
        let sol = problem.solve().unwrap();
        assert_relative_eq!(sol.objective, 0.5, epsilon = 1e-8);
        assert_relative_eq!(sol.fractions[1], 1.0, epsilon = 1e-8);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn unconstrained_cost_blend_is_a_valid_mix(
                c1 in 20.0f64..120.0,
                c2 in 20.0f64..120.0,
                c3 in 20.0f64..120.0,
            ) {
                let problem = BlendProblem {
                    crudes: vec![
                        crude("A", c1, 1.0, 5.0),
                        crude("B", c2, 1.0, 5.0),
                        crude("C", c3, 1.0, 5.0),
                    ],
                    objective: BlendObjective::Cost,
                    max_sulfur: None,
                    max_viscosity: None,
                };
                let sol = problem.solve().unwrap();
                let total: f64 = sol.fractions.iter().sum();
                prop_assert!((total - 1.0).abs() < 1e-6);
                for &f in &sol.fractions {
                    prop_assert!(f >= -1e-9);
                }
                let cheapest = c1.min(c2).min(c3);
                prop_assert!((sol.blend_cost - cheapest).abs() < 1e-6);
            }
        }
    }
}
