//! uo-thermo: thermodynamics and plant-energy evaluators.

pub mod combustion;
pub mod efficiency;
pub mod emissions;
pub mod losses;

pub use combustion::{CombustionEfficiency, Fuel};
pub use efficiency::EnergyEfficiency;
pub use emissions::FuelEmissions;
pub use losses::UnitLosses;
