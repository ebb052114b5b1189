//! uo-epi: SEIR compartment modeling and derived forecasts.

pub mod analysis;
pub mod integrator;
pub mod model;
pub mod simulate;

pub use analysis::{HealthcareForecast, SensitivityPoint, basic_r0, beta_sensitivity, effective_r};
pub use integrator::{ForwardEuler, Integrator, OdeModel, Rk4};
pub use model::{BetaSchedule, SeirModel, SeirParams, SeirState};
pub use simulate::{SeirSeries, SimSpec, simulate};
