//! Dense two-phase simplex for small linear programs.
//!
//! Minimizes `c . x` over `x >= 0` subject to a mix of `<=`, `>=`, and `=`
//! rows. Bland's rule keeps the pivot sequence cycle-free, which matters for
//! the degenerate blend programs where several crudes share identical
//! properties.

use nalgebra::DMatrix;
use uo_core::{EvalError, EvalResult};

/// Feasibility and optimality tolerance on reduced costs and pivots.
const LP_TOL: f64 = 1e-9;
/// Iteration cap across both phases.
const MAX_PIVOTS: usize = 10_000;

/// Constraint row sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Le,
    Ge,
}

/// One constraint row `coeffs . x  (op)  rhs`.
#[derive(Debug, Clone)]
pub struct LpConstraint {
    pub coeffs: Vec<f64>,
    pub op: Relation,
    pub rhs: f64,
}

impl LpConstraint {
    pub fn new(coeffs: Vec<f64>, op: Relation, rhs: f64) -> Self {
        Self { coeffs, op, rhs }
    }
}

/// Minimization program over non-negative variables.
#[derive(Debug, Clone)]
pub struct LpProblem {
    /// Objective coefficients, one per structural variable
    pub objective: Vec<f64>,
    pub constraints: Vec<LpConstraint>,
}

/// Optimal basic feasible solution.
#[derive(Debug, Clone)]
pub struct LpSolution {
    /// Structural variable values
    pub x: Vec<f64>,
    /// Objective value at `x`
    pub objective: f64,
    /// Total pivots across both phases
    pub iterations: usize,
}

/// Solve `min c . x` s.t. the constraint rows, `x >= 0`.
pub fn solve_lp(problem: &LpProblem) -> EvalResult<LpSolution> {
    let n = problem.objective.len();
    if n == 0 {
        return Err(EvalError::domain("program has no variables"));
    }
    for (row, c) in problem.constraints.iter().enumerate() {
        if c.coeffs.len() != n {
            return Err(EvalError::domain(format!(
                "constraint {row} has {} coefficients, expected {n}",
                c.coeffs.len()
            )));
        }
        if !c.rhs.is_finite() || c.coeffs.iter().any(|v| !v.is_finite()) {
            return Err(EvalError::numerical(format!(
                "constraint {row} contains a non-finite value"
            )));
        }
    }

    let mut tableau = Tableau::build(problem, n);
    let mut iterations = 0;

    // Phase 1: minimize the sum of artificials.
    if !tableau.artificial_cols.is_empty() {
        let mut phase1_cost = vec![0.0; tableau.num_cols];
        for &j in &tableau.artificial_cols {
            phase1_cost[j] = 1.0;
        }
        tableau.run(&phase1_cost, false, &mut iterations)?;
        let infeas = tableau.objective_value(&phase1_cost);
        if infeas > 1e-7 {
            return Err(EvalError::infeasible(format!(
                "no feasible point (phase-1 residual {infeas:.3e})"
            )));
        }
        tableau.drive_out_artificials(&mut iterations);
    }

    // Phase 2: original objective, artificials locked out.
    let mut cost = vec![0.0; tableau.num_cols];
    cost[..n].copy_from_slice(&problem.objective);
    tableau.run(&cost, true, &mut iterations)?;

    let mut x = vec![0.0; n];
    for (row, &col) in tableau.basis.iter().enumerate() {
        if col < n {
            x[col] = tableau.rhs(row).max(0.0);
        }
    }
    let objective = problem
        .objective
        .iter()
        .zip(&x)
        .map(|(c, v)| c * v)
        .sum();

    Ok(LpSolution {
        x,
        objective,
        iterations,
    })
}

struct Tableau {
    /// Rows are constraints; last column is the rhs.
    t: DMatrix<f64>,
    basis: Vec<usize>,
    artificial_cols: Vec<usize>,
    num_cols: usize,
}

impl Tableau {
    fn build(problem: &LpProblem, n: usize) -> Self {
        let m = problem.constraints.len();

        // Normalized rows with rhs >= 0.
        let mut rows: Vec<(Vec<f64>, Relation, f64)> = problem
            .constraints
            .iter()
            .map(|c| (c.coeffs.clone(), c.op, c.rhs))
            .collect();
        for (coeffs, op, rhs) in &mut rows {
            if *rhs < 0.0 {
                for v in coeffs.iter_mut() {
                    *v = -*v;
                }
                *rhs = -*rhs;
                *op = match *op {
                    Relation::Le => Relation::Ge,
                    Relation::Ge => Relation::Le,
                    Relation::Eq => Relation::Eq,
                };
            }
        }

        let num_slacks = rows
            .iter()
            .filter(|(_, op, _)| *op != Relation::Eq)
            .count();
        let num_artificials = rows
            .iter()
            .filter(|(_, op, _)| *op != Relation::Le)
            .count();
        let num_cols = n + num_slacks + num_artificials;

        let mut t = DMatrix::zeros(m, num_cols + 1);
        let mut basis = vec![0; m];
        let mut artificial_cols = Vec::with_capacity(num_artificials);
        let mut slack = n;
        let mut artificial = n + num_slacks;

        for (i, (coeffs, op, rhs)) in rows.iter().enumerate() {
            for (j, &v) in coeffs.iter().enumerate() {
                t[(i, j)] = v;
            }
            t[(i, num_cols)] = *rhs;
            match op {
                Relation::Le => {
                    t[(i, slack)] = 1.0;
                    basis[i] = slack;
                    slack += 1;
                }
                Relation::Ge => {
                    t[(i, slack)] = -1.0;
                    slack += 1;
                    t[(i, artificial)] = 1.0;
                    basis[i] = artificial;
                    artificial_cols.push(artificial);
                    artificial += 1;
                }
                Relation::Eq => {
                    t[(i, artificial)] = 1.0;
                    basis[i] = artificial;
                    artificial_cols.push(artificial);
                    artificial += 1;
                }
            }
        }

        Self {
            t,
            basis,
            artificial_cols,
            num_cols,
        }
    }

    /// Remove artificials that are still basic at zero level after phase 1.
    ///
    /// Phase 2 excludes artificial columns from entering, but a degenerate
    /// basic artificial left behind could still be pushed positive by later
    /// pivots, which would relax its constraint row. Pivot each one out on
    /// any non-artificial column with a nonzero entry; a row with no such
    /// entry is redundant and is dropped.
    fn drive_out_artificials(&mut self, iterations: &mut usize) {
        let mut row = 0;
        while row < self.basis.len() {
            if !self.artificial_cols.contains(&self.basis[row]) {
                row += 1;
                continue;
            }
            let replacement = (0..self.num_cols)
                .find(|j| !self.artificial_cols.contains(j) && self.t[(row, *j)].abs() > LP_TOL);
            match replacement {
                Some(col) => {
                    self.pivot(row, col);
                    *iterations += 1;
                    row += 1;
                }
                None => {
                    self.t = self.t.clone().remove_row(row);
                    self.basis.remove(row);
                }
            }
        }
    }

    fn rhs(&self, row: usize) -> f64 {
        self.t[(row, self.num_cols)]
    }

    fn objective_value(&self, cost: &[f64]) -> f64 {
        self.basis
            .iter()
            .enumerate()
            .map(|(row, &col)| cost[col] * self.rhs(row))
            .sum()
    }

    /// Reduced cost of column `j` under the given cost vector.
    fn reduced_cost(&self, cost: &[f64], j: usize) -> f64 {
        let mut z = 0.0;
        for (row, &col) in self.basis.iter().enumerate() {
            z += cost[col] * self.t[(row, j)];
        }
        cost[j] - z
    }

    /// Run Bland-rule simplex to optimality under `cost`.
    fn run(
        &mut self,
        cost: &[f64],
        exclude_artificials: bool,
        iterations: &mut usize,
    ) -> EvalResult<()> {
        loop {
            // Entering column: smallest index with negative reduced cost.
            let entering = (0..self.num_cols).find(|&j| {
                if exclude_artificials && self.artificial_cols.contains(&j) {
                    return false;
                }
                self.reduced_cost(cost, j) < -LP_TOL
            });
            let Some(enter) = entering else {
                return Ok(());
            };

            // Leaving row: min ratio, ties to the smallest basis index.
            let mut leave: Option<usize> = None;
            let mut best_ratio = f64::INFINITY;
            for row in 0..self.basis.len() {
                let a = self.t[(row, enter)];
                if a > LP_TOL {
                    let ratio = self.rhs(row) / a;
                    let better = ratio < best_ratio - LP_TOL
                        || (ratio < best_ratio + LP_TOL
                            && leave.is_some_and(|r| self.basis[row] < self.basis[r]));
                    if better {
                        best_ratio = ratio;
                        leave = Some(row);
                    }
                }
            }
            let Some(leave) = leave else {
                return Err(EvalError::numerical(
                    "objective is unbounded below on the feasible set",
                ));
            };

            self.pivot(leave, enter);
            *iterations += 1;
            if *iterations > MAX_PIVOTS {
                return Err(EvalError::numerical("pivot limit exceeded"));
            }
        }
    }

    fn pivot(&mut self, row: usize, col: usize) {
        let p = self.t[(row, col)];
        for j in 0..=self.num_cols {
            self.t[(row, j)] /= p;
        }
        for i in 0..self.basis.len() {
            if i == row {
                continue;
            }
            let factor = self.t[(i, col)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..=self.num_cols {
                let delta = factor * self.t[(row, j)];
                self.t[(i, j)] -= delta;
            }
        }
        self.basis[row] = col;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn simple_minimization() {
        // min x + 2y  s.t.  x + y >= 3,  x <= 2
        let problem = LpProblem {
            objective: vec![1.0, 2.0],
            constraints: vec![
                LpConstraint::new(vec![1.0, 1.0], Relation::Ge, 3.0),
                LpConstraint::new(vec![1.0, 0.0], Relation::Le, 2.0),
            ],
        };
        let sol = solve_lp(&problem).unwrap();
        assert_relative_eq!(sol.x[0], 2.0, epsilon = 1e-8);
        assert_relative_eq!(sol.x[1], 1.0, epsilon = 1e-8);
        assert_relative_eq!(sol.objective, 4.0, epsilon = 1e-8);
    }

    #[test]
    fn equality_row() {
        // min x + y  s.t.  x + y = 5,  x >= 1
        let problem = LpProblem {
            objective: vec![1.0, 1.0],
            constraints: vec![
                LpConstraint::new(vec![1.0, 1.0], Relation::Eq, 5.0),
                LpConstraint::new(vec![1.0, 0.0], Relation::Ge, 1.0),
            ],
        };
        let sol = solve_lp(&problem).unwrap();
        assert_relative_eq!(sol.objective, 5.0, epsilon = 1e-8);
        assert_relative_eq!(sol.x[0] + sol.x[1], 5.0, epsilon = 1e-8);
        assert!(sol.x[0] >= 1.0 - 1e-8);
    }

    #[test]
    fn infeasible_program() {
        // x <= 1 and x >= 2 cannot both hold
        let problem = LpProblem {
            objective: vec![1.0],
            constraints: vec![
                LpConstraint::new(vec![1.0], Relation::Le, 1.0),
                LpConstraint::new(vec![1.0], Relation::Ge, 2.0),
            ],
        };
        assert!(matches!(
            solve_lp(&problem),
            Err(EvalError::Infeasible { .. })
        ));
    }

    #[test]
    fn unbounded_program() {
        // min -x  with only x >= 0
        let problem = LpProblem {
            objective: vec![-1.0],
            constraints: vec![LpConstraint::new(vec![1.0], Relation::Ge, 0.0)],
        };
        assert!(matches!(
            solve_lp(&problem),
            Err(EvalError::Numerical { .. })
        ));
    }

    #[test]
    fn negative_rhs_normalized() {
        // -x <= -2  is  x >= 2
        let problem = LpProblem {
            objective: vec![1.0],
            constraints: vec![LpConstraint::new(vec![-1.0], Relation::Le, -2.0)],
        };
        let sol = solve_lp(&problem).unwrap();
        assert_relative_eq!(sol.x[0], 2.0, epsilon = 1e-8);
    }

    #[test]
    fn degenerate_equalities_pin_unique_point() {
        // x1 + x2 = 1 together with x1 = 1 leave (1, 0) as the only
        // feasible point, so min -x2 must report objective 0 there even
        // though phase 1 ends with a zero-level artificial still basic.
        let problem = LpProblem {
            objective: vec![0.0, -1.0],
            constraints: vec![
                LpConstraint::new(vec![1.0, 1.0], Relation::Eq, 1.0),
                LpConstraint::new(vec![1.0, 0.0], Relation::Eq, 1.0),
            ],
        };
        let sol = solve_lp(&problem).unwrap();
        assert_relative_eq!(sol.x[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(sol.x[1], 0.0, epsilon = 1e-8);
        assert_relative_eq!(sol.objective, 0.0, epsilon = 1e-8);
        for c in &problem.constraints {
            let lhs: f64 = c.coeffs.iter().zip(&sol.x).map(|(a, v)| a * v).sum();
            assert_relative_eq!(lhs, c.rhs, epsilon = 1e-8);
        }
    }

    #[test]
    fn redundant_equality_row_is_dropped() {
        // Second row is twice the first; the solver must not choke on the
        // dependent system and the answer must satisfy both rows.
        let problem = LpProblem {
            objective: vec![1.0, 2.0],
            constraints: vec![
                LpConstraint::new(vec![1.0, 1.0], Relation::Eq, 2.0),
                LpConstraint::new(vec![2.0, 2.0], Relation::Eq, 4.0),
            ],
        };
        let sol = solve_lp(&problem).unwrap();
        assert_relative_eq!(sol.x[0] + sol.x[1], 2.0, epsilon = 1e-8);
        assert_relative_eq!(sol.objective, 2.0, epsilon = 1e-8);
    }

    #[test]
    fn solution_respects_non_negativity() {
        let problem = LpProblem {
            objective: vec![2.0, 3.0, 1.0],
            constraints: vec![
                LpConstraint::new(vec![1.0, 1.0, 1.0], Relation::Eq, 1.0),
                LpConstraint::new(vec![1.0, 0.0, 2.0], Relation::Le, 0.8),
            ],
        };
        let sol = solve_lp(&problem).unwrap();
        for v in &sol.x {
            assert!(*v >= -1e-9);
        }
        assert_relative_eq!(sol.x.iter().sum::<f64>(), 1.0, epsilon = 1e-8);
    }
}
