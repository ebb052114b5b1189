//! uo-mass: mass-transfer formula evaluators.

pub mod absorber;
pub mod coefficient;
pub mod diffusivity;
pub mod drying;
pub mod ficks;

pub use absorber::PackedAbsorber;
pub use coefficient::{MassTransferCoefficient, SherwoodCorrelation};
pub use diffusivity::{fuller_gas_diffusivity, wilke_chang_diffusivity, wilke_chang_result};
pub use drying::DryingTime;
pub use ficks::{FicksFlux, GasDiffusionLoss};
