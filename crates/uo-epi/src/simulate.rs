//! SEIR simulation driver: daily series with a conservation check.

use crate::integrator::{Integrator, Rk4};
use crate::model::{SeirModel, SeirParams, SeirState};
use serde::{Deserialize, Serialize};
use uo_core::{EvalError, EvalResult};

/// Internal RK4 substeps per simulated day.
const SUBSTEPS_PER_DAY: usize = 4;

/// Relative conservation tolerance on S+E+I+R = N.
const CONSERVATION_RTOL: f64 = 1e-3;

/// Initial compartment sizes and run length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimSpec {
    pub initial_exposed: f64,
    pub initial_infected: f64,
    pub initial_recovered: f64,
    pub days: usize,
}

impl SimSpec {
    fn initial_state(&self, population: f64) -> EvalResult<SeirState> {
        for (name, v) in [
            ("initial exposed", self.initial_exposed),
            ("initial infected", self.initial_infected),
            ("initial recovered", self.initial_recovered),
        ] {
            if v < 0.0 || !v.is_finite() {
                return Err(EvalError::domain(format!("{name} must be non-negative")));
            }
        }
        let seeded = self.initial_exposed + self.initial_infected + self.initial_recovered;
        if seeded > population {
            return Err(EvalError::domain(
                "initial compartments exceed the total population",
            ));
        }
        Ok([
            population - seeded,
            self.initial_exposed,
            self.initial_infected,
            self.initial_recovered,
        ])
    }
}

/// One sample per simulated day, compartment-per-column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeirSeries {
    /// Day axis, 0..=days
    pub t: Vec<f64>,
    pub susceptible: Vec<f64>,
    pub exposed: Vec<f64>,
    pub infected: Vec<f64>,
    pub recovered: Vec<f64>,
}

impl SeirSeries {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Peak infected count and the day it occurs.
    pub fn peak_infected(&self) -> (f64, f64) {
        let mut peak = (0.0, 0.0);
        for (&t, &i) in self.t.iter().zip(&self.infected) {
            if i > peak.0 {
                peak = (i, t);
            }
        }
        (peak.0, peak.1)
    }

    /// Compartments at the last emitted sample, or `None` for an empty series.
    pub fn final_state(&self) -> Option<SeirState> {
        let last = self.t.len().checked_sub(1)?;
        Some([
            self.susceptible[last],
            self.exposed[last],
            self.infected[last],
            self.recovered[last],
        ])
    }
}

/// Integrate the SEIR system for `spec.days` days.
///
/// The output axis is one sample per day; integration uses fixed RK4
/// substeps internally. Conservation S+E+I+R = N is checked at every
/// emitted sample and a violation is a numerical error, not a silent drift.
pub fn simulate(params: &SeirParams, spec: &SimSpec) -> EvalResult<SeirSeries> {
    params.validate()?;
    if spec.days == 0 {
        return Err(EvalError::domain("simulation must cover at least one day"));
    }

    let model = SeirModel { params: *params };
    let integrator = Rk4;
    let n = params.population;
    let dt = 1.0 / SUBSTEPS_PER_DAY as f64;

    let mut state = spec.initial_state(n)?;
    let mut series = SeirSeries {
        t: Vec::with_capacity(spec.days + 1),
        susceptible: Vec::with_capacity(spec.days + 1),
        exposed: Vec::with_capacity(spec.days + 1),
        infected: Vec::with_capacity(spec.days + 1),
        recovered: Vec::with_capacity(spec.days + 1),
    };

    push_sample(&mut series, 0.0, &state);
    for day in 0..spec.days {
        for sub in 0..SUBSTEPS_PER_DAY {
            let t = day as f64 + sub as f64 * dt;
            state = integrator.step(&model, t, &state, dt)?;
            // RK4 cannot make a compartment negative unless the step is far
            // too coarse; clamp tiny undershoots from floating-point noise.
            for v in &mut state {
                if *v < 0.0 && *v > -1e-9 * n {
                    *v = 0.0;
                }
            }
        }
        let total: f64 = state.iter().sum();
        if (total - n).abs() > CONSERVATION_RTOL * n {
            return Err(EvalError::numerical(format!(
                "population conservation violated at day {}: {total} vs {n}",
                day + 1
            )));
        }
        push_sample(&mut series, (day + 1) as f64, &state);
    }

    Ok(series)
}

fn push_sample(series: &mut SeirSeries, t: f64, state: &SeirState) {
    series.t.push(t);
    series.susceptible.push(state[0]);
    series.exposed.push(state[1]);
    series.infected.push(state[2]);
    series.recovered.push(state[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BetaSchedule;

    fn baseline() -> (SeirParams, SimSpec) {
        (
            SeirParams {
                population: 10_000.0,
                beta: BetaSchedule::Constant(0.3),
                sigma: 0.2,
                gamma: 0.1,
            },
            SimSpec {
                initial_exposed: 0.0,
                initial_infected: 1.0,
                initial_recovered: 0.0,
                days: 160,
            },
        )
    }

    #[test]
    fn conserves_population_every_day() {
        let (params, spec) = baseline();
        let series = simulate(&params, &spec).unwrap();
        assert_eq!(series.len(), 161);
        for idx in 0..series.len() {
            let total = series.susceptible[idx]
                + series.exposed[idx]
                + series.infected[idx]
                + series.recovered[idx];
            assert!(
                (total - 10_000.0).abs() / 10_000.0 < 1e-3,
                "day {idx}: total {total}"
            );
        }
    }

    #[test]
    fn compartments_stay_non_negative_and_time_is_monotonic() {
        let (params, spec) = baseline();
        let series = simulate(&params, &spec).unwrap();
        for idx in 0..series.len() {
            assert!(series.susceptible[idx] >= 0.0);
            assert!(series.exposed[idx] >= 0.0);
            assert!(series.infected[idx] >= 0.0);
            assert!(series.recovered[idx] >= 0.0);
        }
        for w in series.t.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn epidemic_grows_then_declines() {
        let (params, spec) = baseline();
        let series = simulate(&params, &spec).unwrap();
        let (peak, peak_day) = series.peak_infected();
        assert!(peak > 1.0);
        assert!(peak_day > 0.0 && peak_day < 160.0);
        // Recovered is monotone non-decreasing.
        for w in series.recovered.windows(2) {
            assert!(w[1] >= w[0] - 1e-9);
        }
    }

    #[test]
    fn lockdown_lowers_the_peak() {
        let (mut params, spec) = baseline();
        let open = simulate(&params, &spec).unwrap();
        params.beta = BetaSchedule::Scaled {
            base: 0.3,
            factor: 0.5,
        };
        let locked = simulate(&params, &spec).unwrap();
        assert!(locked.peak_infected().0 < open.peak_infected().0);
    }

    #[test]
    fn final_state_handles_empty_series() {
        let empty = SeirSeries {
            t: vec![],
            susceptible: vec![],
            exposed: vec![],
            infected: vec![],
            recovered: vec![],
        };
        assert_eq!(empty.final_state(), None);

        let (params, spec) = baseline();
        let series = simulate(&params, &spec).unwrap();
        let last = series.final_state().unwrap();
        assert_eq!(last[2], series.infected[series.len() - 1]);
    }

    #[test]
    fn overseeded_population_rejected() {
        let (params, mut spec) = baseline();
        spec.initial_infected = 20_000.0;
        assert!(matches!(
            simulate(&params, &spec),
            Err(EvalError::Domain { .. })
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn compartments_stay_non_negative_and_conserved(
                beta in 0.05f64..0.6,
                sigma in 0.1f64..0.5,
                gamma in 0.05f64..0.4,
                seed_infected in 1.0f64..100.0,
            ) {
                let params = SeirParams {
                    population: 10_000.0,
                    beta: BetaSchedule::Constant(beta),
                    sigma,
                    gamma,
                };
                let spec = SimSpec {
                    initial_exposed: 0.0,
                    initial_infected: seed_infected,
                    initial_recovered: 0.0,
                    days: 60,
                };
                let series = simulate(&params, &spec).unwrap();
                for i in 0..series.t.len() {
                    prop_assert!(series.susceptible[i] >= -1e-6);
                    prop_assert!(series.exposed[i] >= -1e-6);
                    prop_assert!(series.infected[i] >= -1e-6);
                    prop_assert!(series.recovered[i] >= -1e-6);
                    let total = series.susceptible[i]
                        + series.exposed[i]
                        + series.infected[i]
                        + series.recovered[i];
                    prop_assert!((total - 10_000.0).abs() / 10_000.0 < 1e-3);
                }
            }
        }
    }
}
