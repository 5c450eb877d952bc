//! High-level entry point for estimating a yaw-plus-translation transform
//! from bearing observations.
//!
//! This selects an L-BFGS solver with either Hager–Zhang or More–Thuente
//! line search, wraps the bearing objective in an `ArgminAdapter`, and
//! delegates the run to `run_lbfgs`.
use crate::geometry::transform::Transform;
use crate::optimization::{
    errors::RellocResult,
    pose_optimizer::{
        adapter::ArgminAdapter,
        builders::{build_solver_hager_zhang, build_solver_more_thuente},
        run::run_lbfgs,
        traits::{EstimateOptions, EstimationResult, LineSearcher, Objective},
    },
};
use crate::residual::model::{BearingObjective, Correspondences};

/// Estimate the transform minimizing the sum of squared bearing residuals.
///
/// # Behavior
/// - Flattens `initial_guess` into the unknown vector `[tx, ty, tz, yaw]`
///   and validates it via `BearingObjective::check` (dimension, finiteness).
/// - If `correspondences` is empty, returns the seed untouched as a
///   trivially converged result with residual exactly zero; the solver never
///   runs.
/// - Otherwise builds an L-BFGS solver with either **Hager–Zhang** or
///   **More–Thuente** line search based on `opts.line_searcher` and calls
///   `run_lbfgs`, which configures the executor (initial unknowns, iteration
///   cap, optional observers) and returns an [`EstimationResult`].
///
/// The correspondence set is read-only throughout; two calls with the same
/// inputs produce the same estimate.
///
/// # Parameters
/// - `correspondences`: Validated point/ray pairs in the two frames.
/// - `initial_guess`: Seed transform for the iteration.
/// - `opts`: Estimation options (stop strategy, line search, verbosity).
///
/// # Errors
/// - Propagates seed-validation errors from `BearingObjective::check`.
/// - Propagates builder errors from `build_solver_*`.
/// - Propagates runtime errors from `run_lbfgs` (e.g., line-search
///   failures).
///
/// # Example
/// ```ignore
/// let correspondences = Correspondences::new(points, origins, directions)?;
/// let result = estimate_pose(
///     &correspondences,
///     &Transform::identity(),
///     &EstimateOptions::default(),
/// )?;
/// println!("estimate: {:?}, residual: {}", result.transform, result.residual);
/// ```
pub fn estimate_pose(
    correspondences: &Correspondences, initial_guess: &Transform, opts: &EstimateOptions,
) -> RellocResult<EstimationResult> {
    let x0 = initial_guess.to_unknowns();
    let objective = BearingObjective;
    objective.check(&x0, correspondences)?;
    if correspondences.is_empty() {
        return Ok(EstimationResult::trivially_converged(*initial_guess));
    }
    let problem = ArgminAdapter::new(&objective, correspondences);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_solver_more_thuente(opts)?;
            run_lbfgs(x0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_solver_hager_zhang(opts)?;
            run_lbfgs(x0, opts, problem, solver)
        }
    }
}
