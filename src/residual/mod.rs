//! residual — the geometric error model over the unknown transform.
//!
//! Purpose
//! -------
//! Define what "fit" means for this system: the angular disagreement between
//! a transformed target point and the ray expected to observe it, and the
//! sum-of-squared-residuals objective the optimizer minimizes over
//! `[tx, ty, tz, yaw]`.
//!
//! Key behaviors
//! -------------
//! - [`model::Correspondences`] validates the index-aligned point/ray arrays
//!   once at construction (equal lengths, nonzero directions).
//! - [`model::bearing_residual`] measures a single correspondence; zero
//!   exactly on the ray, invariant to direction magnitude.
//! - [`model::aggregate_objective`] sums squared residuals; the empty set is
//!   exactly 0, a trivially converged state.
//! - [`model::BearingObjective`] plugs the model into the optimizer through
//!   the [`crate::optimization::pose_optimizer::traits::Objective`] seam.
//!
//! Conventions
//! -----------
//! - Errors are reported as [`errors::ResidualError`] via
//!   [`errors::ResidualResult`]; geometry-level failures are converted, so
//!   callers see a single error surface per layer.
//! - This module performs no I/O and holds no state across evaluations.

pub mod errors;
pub mod model;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{ResidualError, ResidualResult};
pub use self::model::{BearingObjective, Correspondences, aggregate_objective, bearing_residual};

pub mod prelude {
    pub use super::errors::{ResidualError, ResidualResult};
    pub use super::model::{
        BearingObjective, Correspondences, aggregate_objective, bearing_residual,
    };
}
