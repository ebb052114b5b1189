//! Petroleum operations analytics: blend and transport optimization on a
//! dense two-phase simplex core, catalyst decay fitting, yield regression,
//! and emission series.

pub mod blend;
pub mod emissions;
pub mod fit;
pub mod regress;
pub mod simplex;
pub mod transport;

pub use blend::{BlendObjective, BlendProblem, BlendSolution, Crude};
pub use emissions::EmissionSeries;
pub use fit::CatalystDecayFit;
pub use regress::LinearRegression;
pub use simplex::{LpConstraint, LpProblem, LpSolution, Relation, solve_lp};
pub use transport::{Site, TransportProblem, TransportSolution};
