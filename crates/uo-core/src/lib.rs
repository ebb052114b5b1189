//! uo-core: stable foundation for unitops.
//!
//! Contains:
//! - param (input specs, input maps, named formula results)
//! - sweep (response-curve generation over one input)
//! - numeric (float precondition helpers)
//! - units (uom SI types + constructors)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod param;
pub mod sweep;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{EvalError, EvalResult};
pub use numeric::*;
pub use param::{FormulaResult, Inputs, ParamSpec, ResultValue};
pub use sweep::{ResponseCurve, Spacing, SweepSpec, sweep_curve};
