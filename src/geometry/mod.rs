//! geometry — vector-angle and rigid-transform primitives.
//!
//! Purpose
//! -------
//! Provide the leaf numerical operations the residual model and optimizer
//! are built on: the unsigned angle between two vectors, application of a
//! yaw-plus-translation transform to points, and the flattening of that
//! transform into the optimizer's four-scalar unknown vector.
//!
//! Key behaviors
//! -------------
//! - [`ops::angle_between`] computes `acos(clamp(dot/(|a||b|), -1, 1))`,
//!   guarding the `acos` domain against floating-point rounding.
//! - [`ops::transform_points`] applies a [`transform::Transform`] to a batch
//!   of points; pure, order-preserving, identity is a no-op.
//! - [`transform::Transform`] carries a full 3D translation and a yaw angle
//!   only; roll and pitch cannot be represented.
//!
//! Invariants & assumptions
//! ------------------------
//! - Direction vectors passed to `angle_between` are never zero; violations
//!   surface as [`errors::GeometryError::ZeroLengthVector`], never NaN.
//! - All angle results lie in `[0, π]` and are invariant to input magnitude.
//! - The unknown-vector layout is fixed at `[tx, ty, tz, yaw]`
//!   ([`transform::UNKNOWN_DIM`] = 4).
//!
//! Conventions
//! -----------
//! - Points and vectors use `nalgebra` (`Point3<f64>`, `Vector3<f64>`);
//!   flattened unknowns use `ndarray::Array1<f64>` to match the optimizer.
//! - Fallible operations return [`errors::GeomResult`]; this module never
//!   panics or performs I/O.

pub mod errors;
pub mod ops;
pub mod transform;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{GeomResult, GeometryError};
pub use self::ops::{angle_between, transform_points};
pub use self::transform::{Transform, UNKNOWN_DIM};

pub mod prelude {
    pub use super::errors::{GeomResult, GeometryError};
    pub use super::ops::{angle_between, transform_points};
    pub use super::transform::{Transform, UNKNOWN_DIM};
}
