//! The SEIR compartment system.

use crate::integrator::OdeModel;
use uo_core::numeric::ensure_positive;
use uo_core::{EvalError, EvalResult};

/// Compartment sizes [S, E, I, R].
pub type SeirState = [f64; 4];

/// Transmission-rate schedule: β as a pure function of simulation time.
///
/// Containment policies change β without introducing hidden state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BetaSchedule {
    /// No intervention
    Constant(f64),
    /// Uniform reduction for the whole run (masks, distancing, lockdown)
    Scaled { base: f64, factor: f64 },
    /// Intervention starting at a given day (late lockdown)
    Step {
        base: f64,
        start_day: f64,
        factor: f64,
    },
}

impl BetaSchedule {
    /// β at simulation time t (days).
    pub fn at(&self, t: f64) -> f64 {
        match *self {
            BetaSchedule::Constant(beta) => beta,
            BetaSchedule::Scaled { base, factor } => base * factor,
            BetaSchedule::Step {
                base,
                start_day,
                factor,
            } => {
                if t < start_day {
                    base
                } else {
                    base * factor
                }
            }
        }
    }

    /// The pre-intervention transmission rate.
    pub fn base(&self) -> f64 {
        match *self {
            BetaSchedule::Constant(beta) => beta,
            BetaSchedule::Scaled { base, .. } | BetaSchedule::Step { base, .. } => base,
        }
    }

    fn validate(&self) -> EvalResult<()> {
        ensure_positive(self.base(), "transmission rate beta")?;
        let factor = match *self {
            BetaSchedule::Constant(_) => 1.0,
            BetaSchedule::Scaled { factor, .. } | BetaSchedule::Step { factor, .. } => factor,
        };
        if !(0.0..=1.0).contains(&factor) {
            return Err(EvalError::domain(
                "policy reduction factor must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Rate constants and population for one SEIR run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeirParams {
    /// Total population N
    pub population: f64,
    /// Transmission schedule β(t), 1/day
    pub beta: BetaSchedule,
    /// Incubation rate σ, 1/day
    pub sigma: f64,
    /// Recovery rate γ, 1/day
    pub gamma: f64,
}

impl SeirParams {
    pub fn validate(&self) -> EvalResult<()> {
        ensure_positive(self.population, "population")?;
        self.beta.validate()?;
        ensure_positive(self.sigma, "incubation rate sigma")?;
        ensure_positive(self.gamma, "recovery rate gamma")?;
        Ok(())
    }
}

/// SEIR right-hand side:
///
///   dS = −β·S·I/N,  dE = β·S·I/N − σ·E,  dI = σ·E − γ·I,  dR = γ·I
#[derive(Debug, Clone, Copy)]
pub struct SeirModel {
    pub params: SeirParams,
}

impl OdeModel for SeirModel {
    type State = SeirState;

    fn rhs(&self, t: f64, x: &SeirState) -> EvalResult<SeirState> {
        let [s, e, i, _r] = *x;
        let n = self.params.population;
        let beta = self.params.beta.at(t);
        let infection = beta * s * i / n;
        let incubation = self.params.sigma * e;
        let recovery = self.params.gamma * i;
        Ok([
            -infection,
            infection - incubation,
            incubation - recovery,
            recovery,
        ])
    }

    fn add(&self, a: &SeirState, b: &SeirState) -> SeirState {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]]
    }

    fn scale(&self, x: &SeirState, k: f64) -> SeirState {
        [x[0] * k, x[1] * k, x[2] * k, x[3] * k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(beta: BetaSchedule) -> SeirParams {
        SeirParams {
            population: 10_000.0,
            beta,
            sigma: 0.2,
            gamma: 0.1,
        }
    }

    #[test]
    fn rhs_conserves_population_exactly() {
        let model = SeirModel {
            params: params(BetaSchedule::Constant(0.3)),
        };
        let derivative = model.rhs(0.0, &[9000.0, 500.0, 400.0, 100.0]).unwrap();
        let sum: f64 = derivative.iter().sum();
        assert!(sum.abs() < 1e-9, "compartment derivatives must cancel");
    }

    #[test]
    fn step_schedule_switches_at_start_day() {
        let schedule = BetaSchedule::Step {
            base: 0.4,
            start_day: 50.0,
            factor: 0.4,
        };
        assert_eq!(schedule.at(49.9), 0.4);
        assert!((schedule.at(50.0) - 0.16).abs() < 1e-12);
        assert!((schedule.at(200.0) - 0.16).abs() < 1e-12);
    }

    #[test]
    fn invalid_policy_factor_rejected() {
        let bad = params(BetaSchedule::Scaled {
            base: 0.4,
            factor: 1.5,
        });
        assert!(bad.validate().is_err());
    }
}
