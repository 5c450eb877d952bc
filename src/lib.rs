//! rust_relloc — bearing-based relative localization.
//!
//! Purpose
//! -------
//! Estimate the rigid transform (3-DOF translation plus yaw) that best maps
//! points expressed in one frame onto bearing rays observed in another
//! frame, by minimizing the sum of squared angular residuals between each
//! ray and the direction to its transformed point.
//!
//! Key behaviors
//! -------------
//! - Model the unknown as a yaw-plus-translation [`Transform`]
//!   (`geometry`): roll and pitch are structurally impossible.
//! - Score a candidate transform against a validated set of
//!   point/ray correspondences (`residual`): the per-pair residual is the
//!   angle between the ray direction and the vector from the ray origin to
//!   the transformed point.
//! - Minimize the aggregate objective with L-BFGS over
//!   `x = [tx, ty, tz, yaw]` (`optimization`), with configurable line
//!   search, stop strategy, and a finite-difference gradient fallback.
//! - Drive repeated estimations through a stateful, observable
//!   [`RelativeLocalizationEngine`] (`engine`) that retains its last result,
//!   seeds the next call from it, and multicasts results to subscribers on
//!   a replay-latest bus.
//!
//! Invariants & assumptions
//! ------------------------
//! - Correspondence arrays (points, ray origins, ray directions) always
//!   have equal lengths and contain no zero-length directions; violations
//!   are rejected on construction.
//! - All fallible library paths return `Result` values with module-specific
//!   error enums; the library never intentionally panics.
//! - Hitting an iteration cap is normal termination, reported via
//!   `converged == false`, never an error.
//!
//! Conventions
//! -----------
//! - Geometry uses `nalgebra` (`Point3<f64>`, `Vector3<f64>`); the
//!   optimizer's flat unknown vector uses `ndarray::Array1<f64>`.
//! - Angles are radians; yaw rotates about the Z axis.
//! - Engine-level diagnostics go through `tracing`; per-iteration solver
//!   output is available behind the `obs_slog` feature.
//!
//! Downstream usage
//! ----------------
//! - One-shot callers use
//!   [`estimate_pose`](optimization::pose_optimizer::estimate_pose) with a
//!   [`Correspondences`](residual::model::Correspondences) set, a seed
//!   [`Transform`], and [`EstimateOptions`](optimization::pose_optimizer::EstimateOptions).
//! - Long-running callers hold a [`RelativeLocalizationEngine`], feed it
//!   correspondence sets as they arrive, and consume results either from
//!   the returned values or through [`engine::Subscription`] handles.
//! - The `prelude` re-exports the main surface in one line.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module; integration tests under `tests/`
//!   drive the full pipeline on synthetic scenes with known ground truth.
//!
//! [`Transform`]: geometry::transform::Transform
//! [`RelativeLocalizationEngine`]: engine::RelativeLocalizationEngine

pub mod engine;
pub mod geometry;
pub mod optimization;
pub mod residual;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_relloc::prelude::*;
//
// to import the main crate surface in a single line.

pub mod prelude {
    pub use crate::engine::prelude::*;
    pub use crate::geometry::prelude::*;
    pub use crate::optimization::prelude::*;
    pub use crate::residual::prelude::*;
}
