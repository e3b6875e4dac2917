//! Building scale calculation
//!
//! Data flows one way: site inputs resolve to an applied FAR, the solver
//! iterates the floor-area/unit/parking cycle to a fixed point, and the
//! frozen result yields floor counts, height and schedule.

pub mod facility;
pub mod far;
pub mod inputs;
pub mod metrics;
pub mod parking;
pub mod result;
pub mod review;
pub mod shared_space;
pub mod solver;

pub use facility::FacilityState;
pub use far::resolve_far;
pub use inputs::{SiteInputs, UnitSizes, ZoningSelection};
pub use metrics::DerivedMetrics;
pub use parking::ParkingSplit;
pub use result::{FacilityTotals, SolverResult};
pub use review::{review, sweep, ScaleReview};
pub use shared_space::SharedSpace;
pub use solver::{solve, SolveContext, SolverState};
