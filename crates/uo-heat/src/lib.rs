//! uo-heat: heat-transfer formula evaluators.
//!
//! Every evaluator is a pure function of its inputs: validate, compute,
//! return a [`uo_core::FormulaResult`]. Presentation, persistence, and
//! sweeping live elsewhere.

pub mod boiling;
pub mod condensation;
pub mod exchanger;
pub mod lumped;
pub mod transient;
pub mod wall;

pub use boiling::NucleateBoiling;
pub use condensation::FilmCondensation;
pub use exchanger::{FlowArrangement, Lmtd, NtuEffectiveness};
pub use lumped::LumpedHeating;
pub use transient::TransientSlab;
pub use wall::{CompositeWall, ResistanceNetwork, SlabConduction, overall_coefficient};
