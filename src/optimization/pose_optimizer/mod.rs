//! pose_optimizer — argmin-powered estimator for bearing-based localization.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **minimizing
//! the sum of squared bearing residuals** `f(x)` over the unknown vector
//! `x = [tx, ty, tz, yaw]`. Callers implement a single trait, [`Objective`]
//! (the bearing model already does), and invoke [`estimate_pose`] to run
//! L-BFGS with a configurable line search, stop strategy, and
//! finite-difference gradient fallback.
//!
//! Key behaviors
//! -------------
//! - Bridge [`Objective`] implementations into Argmin-compatible problems
//!   via [`adapter::ArgminAdapter`]; this is a direct minimization with no
//!   sign flips.
//! - Expose a single, user-facing entrypoint [`estimate_pose`] that:
//!   - validates the seed with [`Objective::check`],
//!   - short-circuits the empty correspondence set into a trivially
//!     converged result,
//!   - selects an L-BFGS solver via [`builders`] based on
//!     [`traits::LineSearcher`],
//!   - executes the solver via [`run::run_lbfgs`], and
//!   - normalizes results into an [`EstimationResult`].
//! - Fall back to robust finite differences inside the adapter whenever an
//!   objective does not implement an analytic gradient, with post-hoc
//!   validation and error capture.
//! - Centralize termination policy ([`StopStrategy`]), solver configuration
//!   ([`EstimateOptions`]), and validation logic ([`validation`]) so
//!   downstream code can assume sane, finite inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always minimizes** the objective directly; there is no
//!   internal negation of values or gradients.
//! - [`Objective::value`] and [`Objective::grad`] must treat invalid inputs
//!   as recoverable [`RellocError`] values, not panics.
//! - Vectors use the canonical aliases [`Unknowns`] and [`Grad`], always of
//!   length four; all are assumed finite whenever optimization proceeds.
//! - Configuration types ([`StopStrategy`], [`EstimateOptions`]) are
//!   validated on construction and treated as internally consistent by the
//!   solver layer.
//! - Hitting the iteration cap is normal (if suboptimal) termination; it is
//!   reported via `converged == false`, never as an error.
//!
//! Conventions
//! -----------
//! - Unknowns live in an unconstrained optimizer space as [`Unknowns`]
//!   (`Array1<f64>`); the mapping to and from [`Transform`](crate::geometry::transform::Transform)
//!   happens at the API boundary.
//! - Errors bubble up as [`RellocResult<T>`] / [`RellocError`]; this module
//!   and its children never intentionally panic or use `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - The estimation engine calls [`estimate_pose`] with a correspondence
//!   set, a seed transform, and an [`EstimateOptions`] configuration.
//! - Callers with custom objectives implement [`Objective`] and reuse
//!   [`adapter`], [`builders`], and [`run::run_lbfgs`] directly.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover:
//!   - gradient handling and the finite-difference fallback in [`adapter`],
//!   - solver construction and threshold wiring in [`builders`],
//!   - rejection paths of every helper in [`validation`],
//!   - end-to-end behavior of [`estimate_pose`] on synthetic scenes in
//!     [`api`].
//! - Integration tests exercise the estimation engine on multi-ray scenes
//!   with known ground truth.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::estimate_pose;
pub use self::traits::{
    EstimateOptions, EstimationResult, LineSearcher, Objective, StopStrategy,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, UNKNOWN_DIM, Unknowns};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_relloc::optimization::pose_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::estimate_pose;
    pub use super::traits::{
        EstimateOptions, EstimationResult, LineSearcher, Objective, StopStrategy,
    };
    pub use super::types::{Cost, Grad, Unknowns};
}
