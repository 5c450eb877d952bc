//! optimization — pose estimation stack and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for bearing-based localization,
//! combining an Argmin-backed pose optimizer with a single error/result
//! surface. Callers supply a correspondence set, a seed transform, and a
//! stop strategy, and obtain a yaw-plus-translation estimate and
//! diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **minimizing the sum of squared bearing
//!   residuals** (`pose_optimizer`), including configuration of solvers and
//!   stopping criteria.
//! - Normalize configuration issues, numerical failures, geometry/residual
//!   errors, and backend solver errors into a single enum
//!   (`errors::RellocError`) with a common result alias (`RellocResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers operate on the unconstrained unknown vector
//!   `x = [tx, ty, tz, yaw]` and assume inputs are finite once validation
//!   has passed; invalid states are reported as `RellocError`, not panics.
//! - Objective implementations treat domain violations (zero-length
//!   directions, degenerate bearings) as recoverable errors surfaced
//!   through the optimization layer.
//!
//! Conventions
//! -----------
//! - All solvers minimize the objective directly; there are no internal
//!   sign flips anywhere in this layer.
//! - Unknowns and gradients are represented using `ndarray`-based aliases
//!   (`Unknowns`, `Grad`); the mapping between the flat vector and the
//!   structured [`Transform`](crate::geometry::transform::Transform) lives
//!   at the API boundary.
//! - Public optimization entrypoints that can fail return
//!   `RellocResult<T>`; callers never see raw Argmin errors.
//! - This module and its submodules avoid I/O; the estimation engine is
//!   responsible for reporting progress and diagnostics.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns: solver wiring
//!   and threshold handling, adapter gradient behavior, and validation
//!   rejection paths.
//! - Higher-level integration tests exercise end-to-end estimation
//!   workflows with known ground truth.

pub mod errors;
pub mod pose_optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_relloc::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{RellocError, RellocResult};
    pub use super::pose_optimizer::prelude::*;
}
