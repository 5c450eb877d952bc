//! pose_optimizer::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the L-BFGS solvers used by the pose
//! optimizer. These hide Argmin's generic wiring and apply the configured
//! stop strategy, so higher-level code can request a configured solver
//! without touching Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - Construct L-BFGS solvers with either Hager–Zhang or More–Thuente line
//!   search using the crate's canonical aliases.
//! - Wire the [`StopStrategy`] threshold into the solver: the gradient-norm
//!   threshold via `with_tolerance_grad`, the objective-delta threshold via
//!   `with_tolerance_cost`. The tolerance not selected keeps Argmin's
//!   default, which is tighter than any practical threshold and therefore
//!   does not mask the chosen strategy.
//! - Leave the initial unknowns and the iteration cap to the runner layer,
//!   keeping these builders side-effect free.
//!
//! Conventions
//! -----------
//! - Errors are always reported via [`RellocResult`]; underlying
//!   `argmin::core::Error` values never leak across module boundaries.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::RellocResult,
    pose_optimizer::{
        traits::{EstimateOptions, StopStrategy},
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Unknowns,
        },
    },
};

/// Construct L-BFGS with the Hager–Zhang line search.
///
/// Consults `opts.lbfgs_mem` (falling back to [`DEFAULT_LBFGS_MEM`]) and
/// wires the stop strategy's threshold via [`configure_lbfgs`]. Does not set
/// the initial unknowns or the iteration cap; those are runtime concerns
/// applied by the runner.
///
/// # Errors
/// Propagates Argmin configuration errors (e.g., a rejected tolerance) as
/// `RellocError`.
pub fn build_solver_hager_zhang(opts: &EstimateOptions) -> RellocResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with the More–Thuente line search.
///
/// Same contract as [`build_solver_hager_zhang`], with the More–Thuente
/// line-search strategy.
///
/// # Errors
/// Propagates Argmin configuration errors as `RellocError`.
pub fn build_solver_more_thuente(opts: &EstimateOptions) -> RellocResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply the configured stop strategy's threshold to an L-BFGS solver.
///
/// Generic over the line-search type so both builders share one wiring
/// function. `GradientNorm.min_norm` maps to `with_tolerance_grad`;
/// `ObjectiveDelta.min_delta` maps to `with_tolerance_cost`. Iteration caps
/// are handled by the executor, not here.
///
/// # Errors
/// Propagates Argmin's rejection of a tolerance as `RellocError`.
pub fn configure_lbfgs<L>(
    solver: LBFGS<L, Unknowns, Grad, Cost>, opts: &EstimateOptions,
) -> RellocResult<LBFGS<L, Unknowns, Grad, Cost>> {
    let solver = match opts.stop {
        StopStrategy::GradientNorm { min_norm, .. } => solver.with_tolerance_grad(min_norm)?,
        StopStrategy::ObjectiveDelta { min_delta, .. } => solver.with_tolerance_cost(min_delta)?,
    };
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::pose_optimizer::traits::LineSearcher;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic construction of L-BFGS solvers with both line searches.
    // - Propagation of `lbfgs_mem` (Some vs None) into the builder paths.
    // - Threshold wiring for both stop strategies via `configure_lbfgs`.
    //
    // They intentionally DO NOT cover end-to-end executor behavior
    // (`run_lbfgs`), which is tested in the runner and API layers.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure that `build_solver_hager_zhang` succeeds with the default
    // L-BFGS memory when `opts.lbfgs_mem` is `None`.
    //
    // Given
    // -----
    // - Default options with `line_searcher = HagerZhang`.
    //
    // Expect
    // ------
    // - `build_solver_hager_zhang` returns `Ok(_)`.
    fn build_solver_hager_zhang_uses_default_memory_when_none() {
        // Arrange
        let stop = StopStrategy::gradient_norm(1e-5, 100).expect("stop strategy should be valid");
        let opts = EstimateOptions::new(stop, LineSearcher::HagerZhang, false, None)
            .expect("EstimateOptions should be valid");

        // Act
        let solver = build_solver_hager_zhang(&opts);

        // Assert
        assert!(
            solver.is_ok(),
            "Builder should succeed when lbfgs_mem is None and the stop strategy is valid"
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that an explicit L-BFGS memory value is accepted.
    //
    // Given
    // -----
    // - Options with `lbfgs_mem = Some(11)`.
    //
    // Expect
    // ------
    // - `build_solver_hager_zhang` returns `Ok(_)`.
    fn build_solver_hager_zhang_respects_explicit_memory() {
        // Arrange
        let stop = StopStrategy::gradient_norm(1e-5, 25).expect("stop strategy should be valid");
        let opts = EstimateOptions::new(stop, LineSearcher::HagerZhang, false, Some(11))
            .expect("EstimateOptions should be valid");

        // Act
        let solver = build_solver_hager_zhang(&opts);

        // Assert
        assert!(solver.is_ok(), "Builder should succeed when lbfgs_mem is explicitly provided");
    }

    #[test]
    // Purpose
    // -------
    // Ensure that `build_solver_more_thuente` succeeds for both stop
    // strategies.
    //
    // Given
    // -----
    // - A gradient-norm strategy and an objective-delta strategy.
    //
    // Expect
    // ------
    // - `build_solver_more_thuente` returns `Ok(_)` for both.
    fn build_solver_more_thuente_accepts_both_stop_strategies() {
        // Arrange
        let grad_stop =
            StopStrategy::gradient_norm(1e-5, 50).expect("stop strategy should be valid");
        let delta_stop =
            StopStrategy::objective_delta(1e-9, 0).expect("stop strategy should be valid");

        for stop in [grad_stop, delta_stop] {
            let opts = EstimateOptions::new(stop, LineSearcher::MoreThuente, false, None)
                .expect("EstimateOptions should be valid");

            // Act
            let solver = build_solver_more_thuente(&opts);

            // Assert
            assert!(solver.is_ok(), "Builder should succeed for stop strategy {stop:?}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Confirm that `configure_lbfgs` applies the threshold for either
    // strategy without error.
    //
    // Given
    // -----
    // - Raw L-BFGS solvers and options with each strategy in turn.
    //
    // Expect
    // ------
    // - `configure_lbfgs` returns `Ok(_)` in both cases.
    fn configure_lbfgs_applies_either_threshold() {
        // Arrange
        let grad_stop =
            StopStrategy::gradient_norm(1e-6, 100).expect("stop strategy should be valid");
        let delta_stop =
            StopStrategy::objective_delta(1e-8, 200).expect("stop strategy should be valid");

        for stop in [grad_stop, delta_stop] {
            let raw = LBFGS::new(HagerZhangLS::new(), DEFAULT_LBFGS_MEM);
            let opts = EstimateOptions::new(stop, LineSearcher::HagerZhang, false, None)
                .expect("EstimateOptions should be valid");

            // Act
            let configured = configure_lbfgs(raw, &opts);

            // Assert
            assert!(configured.is_ok(), "configure_lbfgs should succeed for {stop:?}");
        }
    }
}
