//! Explicit finite-difference transient conduction in a 1-D slab.

use uo_core::numeric::ensure_positive;
use uo_core::{EvalError, EvalResult};

/// 1-D slab with fixed boundary temperatures, marched explicitly.
#[derive(Debug, Clone, Copy)]
pub struct TransientSlab {
    /// Slab length, m
    pub length: f64,
    /// Spatial step, m
    pub dx: f64,
    /// Time step, s
    pub dt: f64,
    /// Total simulated time, s
    pub total_time: f64,
    /// Thermal diffusivity α, m²/s
    pub alpha: f64,
    /// Initial interior temperature, °C
    pub t_initial: f64,
    /// Left boundary temperature, °C
    pub t_left: f64,
    /// Right boundary temperature, °C
    pub t_right: f64,
}

/// Temperature field history: one profile per time step.
#[derive(Debug, Clone)]
pub struct SlabHistory {
    /// Node positions, m
    pub x: Vec<f64>,
    /// Sample times, s
    pub t: Vec<f64>,
    /// profiles[i] is the temperature profile at t[i]
    pub profiles: Vec<Vec<f64>>,
    /// Stability number r = α·Δt/Δx²
    pub fourier_number: f64,
}

impl TransientSlab {
    /// Mesh Fourier number r = α·Δt/Δx². Explicit stability needs r ≤ 0.5.
    pub fn fourier_number(&self) -> EvalResult<f64> {
        ensure_positive(self.length, "slab length")?;
        ensure_positive(self.dx, "spatial step")?;
        ensure_positive(self.dt, "time step")?;
        ensure_positive(self.total_time, "total time")?;
        ensure_positive(self.alpha, "thermal diffusivity")?;
        if self.dx >= self.length {
            return Err(EvalError::domain("spatial step must be smaller than slab length"));
        }
        Ok(self.alpha * self.dt / (self.dx * self.dx))
    }

    /// March the explicit scheme: T_i += r·(T_{i+1} − 2T_i + T_{i−1}).
    pub fn simulate(&self) -> EvalResult<SlabHistory> {
        let r = self.fourier_number()?;
        if r > 0.5 {
            return Err(EvalError::domain(format!(
                "explicit scheme unstable: alpha*dt/dx^2 = {r:.4} > 0.5"
            )));
        }

        let nx = (self.length / self.dx) as usize + 1;
        let nt = (self.total_time / self.dt) as usize + 1;

        let x = (0..nx).map(|i| i as f64 * self.dx).collect::<Vec<_>>();
        let mut profile = vec![self.t_initial; nx];
        profile[0] = self.t_left;
        profile[nx - 1] = self.t_right;

        let mut t = Vec::with_capacity(nt);
        let mut profiles = Vec::with_capacity(nt);
        t.push(0.0);
        profiles.push(profile.clone());

        for step in 1..nt {
            let mut next = profile.clone();
            for i in 1..nx - 1 {
                next[i] = profile[i] + r * (profile[i + 1] - 2.0 * profile[i] + profile[i - 1]);
            }
            next[0] = self.t_left;
            next[nx - 1] = self.t_right;
            profile = next;
            t.push(step as f64 * self.dt);
            profiles.push(profile.clone());
        }

        Ok(SlabHistory {
            x,
            t,
            profiles,
            fourier_number: r,
        })
    }
}
