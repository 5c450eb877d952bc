//! Execution helper that runs an `argmin` solver on a bearing-residual
//! problem and returns a crate-friendly [`EstimationResult`].
use crate::optimization::{
    errors::RellocResult,
    pose_optimizer::{
        adapter::ArgminAdapter,
        traits::{EstimateOptions, EstimationResult, Objective},
        types::{Grad, Unknowns},
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Run an `argmin` optimization for a pose-estimation problem.
///
/// This is the shared runner used by both line-search variants. It wires up:
/// - the objective via [`ArgminAdapter`],
/// - the chosen `Solver` (L-BFGS with Hager–Zhang or More–Thuente),
/// - the initial unknown vector `x0`,
/// - optional observers (behind the `obs_slog` feature),
/// - the iteration cap dictated by the stop strategy,
///   then executes the solver and converts the result into
///   [`EstimationResult`].
///
/// # Type Parameters
/// - `F`: The objective type implementing [`Objective`].
/// - `S`: Any `argmin` solver whose `Problem` is `ArgminAdapter<'a, F>` and
///   whose `IterState` matches the aliases `Unknowns` (parameters), `Grad`
///   (gradient), and `f64` as the float type.
///
/// # Arguments
/// - `x0`: Initial unknown vector. It is **consumed** and set on the
///   optimizer state via `state.param(x0)`.
/// - `opts`: Estimation options (stop strategy, verbosity, etc.).
/// - `problem`: An [`ArgminAdapter`] wrapping the objective and its data.
/// - `solver`: A fully constructed solver, typically from
///   [`build_solver_hager_zhang`](crate::optimization::pose_optimizer::builders::build_solver_hager_zhang)
///   or
///   [`build_solver_more_thuente`](crate::optimization::pose_optimizer::builders::build_solver_more_thuente).
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `opts.verbose == true`, a
/// terminal slog observer is attached with `ObserverMode::Always` and a
/// one-time pre-iteration line logs f(x₀) and, if available, ||grad||.
///
/// # Errors
/// - Propagates any `argmin` runtime error (observer failures, solver
///   errors, line-search failures) via the crate's
///   `From<argmin::core::Error>` conversion.
/// - Propagates any validation errors encountered when constructing
///   [`EstimationResult`].
pub fn run_lbfgs<'a, F, S>(
    x0: Unknowns, opts: &EstimateOptions, problem: ArgminAdapter<'a, F>, solver: S,
) -> RellocResult<EstimationResult>
where
    F: Objective,
    S: argmin::core::Solver<
            ArgminAdapter<'a, F>,
            argmin::core::IterState<Unknowns, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&x0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(x0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.stop.iteration_cap() {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    EstimationResult::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(x0: &Unknowns, problem: &ArgminAdapter<'_, F>) -> RellocResult<()>
where
    F: Objective,
{
    let f0 = problem.cost(x0)?;
    let g0n = problem.gradient(x0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: f(x0) = {:.6}{}",
        f0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
