//! pose_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and solver aliases used by the pose
//! optimizer. The rest of the optimization code stays agnostic to `ndarray`
//! and Argmin generics, and the backend could evolve behind these names.
//!
//! Conventions
//! -----------
//! - The unknown vector and its gradient are `ndarray` containers over
//!   `f64`, always of length [`UNKNOWN_DIM`] (`[tx, ty, tz, yaw]`).
//! - `Cost` is the scalar sum-of-squared-bearing-residuals objective; this
//!   is a direct minimization, no sign flips anywhere.
//! - The line-search aliases assume Argmin's three-parameter forms
//!   `(Param, Gradient, Float)` as of the pinned Argmin version.
//! - `DEFAULT_LBFGS_MEM` is generous for a four-dimensional problem;
//!   callers may override it via per-run options.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;
use std::collections::HashMap;

pub use crate::geometry::transform::UNKNOWN_DIM;

/// The flattened unknown vector `x = [tx, ty, tz, yaw]`.
///
/// Alias for `ndarray::Array1<f64>`, owned exclusively by one optimization
/// run.
pub type Unknowns = Array1<f64>;

/// Gradient of the objective with respect to the unknowns.
///
/// Alias for `ndarray::Array1<f64>`, matching the shape of `Unknowns`.
pub type Grad = Array1<f64>;

/// Scalar objective value: the sum of squared bearing residuals.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate's numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Unknowns, Grad, Cost>;

/// More–Thuente line search specialized to this crate's numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Unknowns, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Unknowns, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Unknowns, Grad, Cost>;
