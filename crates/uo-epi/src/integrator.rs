//! Fixed-step integrators for compartment models.

use uo_core::EvalResult;

/// A pure ODE right-hand side with state combinators.
pub trait OdeModel {
    type State: Clone;

    /// Time derivative of the state at (t, x).
    fn rhs(&self, t: f64, x: &Self::State) -> EvalResult<Self::State>;

    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;
    fn scale(&self, x: &Self::State, k: f64) -> Self::State;
}

pub trait Integrator {
    /// Advance the state from t to t + dt.
    fn step<M: OdeModel>(&self, model: &M, t: f64, x: &M::State, dt: f64)
    -> EvalResult<M::State>;
}

/// Classical fourth-order Runge-Kutta.
#[derive(Clone, Debug, Default)]
pub struct Rk4;

impl Integrator for Rk4 {
    fn step<M: OdeModel>(
        &self,
        model: &M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> EvalResult<M::State> {
        let k1 = model.rhs(t, x)?;

        let x2 = model.add(x, &model.scale(&k1, 0.5 * dt));
        let k2 = model.rhs(t + 0.5 * dt, &x2)?;

        let x3 = model.add(x, &model.scale(&k2, 0.5 * dt));
        let k3 = model.rhs(t + 0.5 * dt, &x3)?;

        let x4 = model.add(x, &model.scale(&k3, dt));
        let k4 = model.rhs(t + dt, &x4)?;

        // x_new = x + (dt/6)(k1 + 2 k2 + 2 k3 + k4)
        let k_sum = model.add(
            &model.add(&k1, &model.scale(&k2, 2.0)),
            &model.add(&model.scale(&k3, 2.0), &k4),
        );

        Ok(model.add(x, &model.scale(&k_sum, dt / 6.0)))
    }
}

/// Explicit Euler, mostly useful as an accuracy baseline in tests.
#[derive(Clone, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: OdeModel>(
        &self,
        model: &M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> EvalResult<M::State> {
        let xdot = model.rhs(t, x)?;
        Ok(model.add(x, &model.scale(&xdot, dt)))
    }
}
