//! Public API surface for pose estimation.
//!
//! - [`Objective`]: the pluggable-minimizer seam; the residual model
//!   implements it, and any conforming quasi-Newton backend can consume it.
//! - [`StopStrategy`] and [`EstimateOptions`]: termination policy and solver
//!   configuration.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`EstimationResult`]: normalized result returned by `estimate_pose`.
use crate::geometry::transform::Transform;
use crate::optimization::{
    errors::{RellocError, RellocResult},
    pose_optimizer::{
        types::{Cost, FnEvalMap, Grad, Unknowns},
        validation::{validate_estimate, validate_min_delta, validate_min_norm, validate_residual},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// The objective interface consumed by the optimizer.
///
/// The optimizer minimizes `value` directly. If `grad` is implemented it
/// must be the gradient of `value`; when it is not, the adapter falls back
/// to robust finite differences automatically.
///
/// - `type Data`: per-problem payload carried into `value`/`grad`/`check`
///   (for the bearing model, the correspondence set).
///
/// Required:
/// - `value(&Unknowns, &Data) -> RellocResult<Cost>`: evaluate the objective.
/// - `check(&Unknowns, &Data) -> RellocResult<()>`: reject obviously invalid
///   seeds before any iteration (called once, up front).
pub trait Objective {
    type Data: 'static;

    // Required methods
    fn value(&self, x: &Unknowns, data: &Self::Data) -> RellocResult<Cost>;
    fn check(&self, x: &Unknowns, data: &Self::Data) -> RellocResult<()>;

    // Optional methods
    fn grad(&self, _x: &Unknowns, _data: &Self::Data) -> RellocResult<Grad> {
        Err(RellocError::GradientNotImplemented)
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Parsing: implements `FromStr`, case-insensitive (`"MoreThuente"`,
/// `"HagerZhang"`). Unknown names return [`RellocError::InvalidLineSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = RellocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(RellocError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Termination policy for the minimization loop, checked once per completed
/// iteration.
///
/// Variants:
/// - `GradientNorm`: stop when the Euclidean norm of the gradient estimate
///   drops to `min_norm`, or after `max_iterations` iterations, whichever
///   comes first. `max_iterations` must be at least 1.
/// - `ObjectiveDelta`: stop when the absolute change in objective value
///   between consecutive iterations drops to `min_delta`, or after
///   `max_iterations` iterations; `max_iterations == 0` means unbounded.
///
/// Hitting the iteration cap is normal (if suboptimal) termination, never an
/// error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopStrategy {
    GradientNorm { min_norm: f64, max_iterations: usize },
    ObjectiveDelta { min_delta: f64, max_iterations: usize },
}

impl StopStrategy {
    /// Construct a validated gradient-norm stop strategy.
    ///
    /// # Errors
    /// - [`RellocError::InvalidMinNorm`] for a non-finite or non-positive
    ///   threshold.
    /// - [`RellocError::InvalidMaxIterations`] for a zero iteration cap.
    pub fn gradient_norm(min_norm: f64, max_iterations: usize) -> RellocResult<Self> {
        validate_min_norm(min_norm)?;
        if max_iterations == 0 {
            return Err(RellocError::InvalidMaxIterations {
                max_iterations,
                reason: "Gradient-norm stopping requires at least one iteration.",
            });
        }
        Ok(StopStrategy::GradientNorm { min_norm, max_iterations })
    }

    /// Construct a validated objective-delta stop strategy.
    ///
    /// `max_iterations == 0` leaves the iteration count unbounded.
    ///
    /// # Errors
    /// - [`RellocError::InvalidMinDelta`] for a non-finite or non-positive
    ///   threshold.
    pub fn objective_delta(min_delta: f64, max_iterations: usize) -> RellocResult<Self> {
        validate_min_delta(min_delta)?;
        Ok(StopStrategy::ObjectiveDelta { min_delta, max_iterations })
    }

    /// The iteration cap to hand to the executor, `None` when unbounded.
    pub(crate) fn iteration_cap(&self) -> Option<u64> {
        match *self {
            StopStrategy::GradientNorm { max_iterations, .. } => Some(max_iterations as u64),
            StopStrategy::ObjectiveDelta { max_iterations, .. } => {
                (max_iterations > 0).then_some(max_iterations as u64)
            }
        }
    }
}

impl Default for StopStrategy {
    /// Gradient norm 1e-5, capped at 100 iterations.
    fn default() -> Self {
        StopStrategy::GradientNorm { min_norm: 1e-5, max_iterations: 100 }
    }
}

/// Solver-level configuration for a single estimation run.
///
/// Fields:
/// - `stop: StopStrategy` — termination policy.
/// - `line_searcher: LineSearcher` — line search used by L-BFGS.
/// - `verbose: bool` — if `true`, attaches a per-iteration observer (behind
///   the `obs_slog` feature). Verbosity has zero effect on the numerics.
/// - `lbfgs_mem: Option<usize>` — L-BFGS history size; `None` uses the
///   crate default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateOptions {
    pub stop: StopStrategy,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl EstimateOptions {
    /// Create a new set of options.
    ///
    /// Stop-strategy thresholds are validated by the [`StopStrategy`]
    /// constructors; this only checks the L-BFGS memory.
    pub fn new(
        stop: StopStrategy, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> RellocResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(RellocError::InvalidLbfgsMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { stop, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for EstimateOptions {
    fn default() -> Self {
        Self {
            stop: StopStrategy::default(),
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Canonical result of a completed estimation run. Immutable once produced.
///
/// - `transform`: best yaw-plus-translation estimate found.
/// - `residual`: objective value at `transform` (sum of squared bearing
///   residuals).
/// - `converged`: `true` if the solver met its stop threshold (or the input
///   was trivially converged); `false` when only the iteration cap fired.
/// - `status`: human-readable termination status.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by the solver.
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResult {
    pub transform: Transform,
    pub residual: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl EstimationResult {
    /// Build a validated [`EstimationResult`] from raw solver state.
    ///
    /// Performs:
    /// - estimate check via `validate_estimate` (present, right dimension,
    ///   all finite) and conversion back into a [`Transform`],
    /// - `residual` finiteness check,
    /// - mapping of the termination status into `(converged, status)` —
    ///   only the iteration cap counts as non-convergence,
    /// - gradient-norm computation if a gradient was available.
    ///
    /// # Errors
    /// Propagates validation errors for the estimate or residual.
    pub fn new(
        estimate: Option<Unknowns>, residual: f64, termination: TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> RellocResult<Self> {
        let x = validate_estimate(estimate)?;
        validate_residual(residual)?;
        let transform = Transform::from_unknowns(&x)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = !matches!(reason, TerminationReason::MaxItersReached);
                (converged, format!("{reason:?}"))
            }
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { transform, residual, converged, status, iterations, fn_evals, grad_norm })
    }

    /// Result for a degenerate (empty) correspondence set: the seed is the
    /// estimate, the residual is exactly zero, and the optimizer never ran.
    pub fn trivially_converged(transform: Transform) -> Self {
        Self {
            transform,
            residual: 0.0,
            converged: true,
            status: "Empty correspondence set".to_string(),
            iterations: 0,
            fn_evals: FnEvalMap::new(),
            grad_norm: None,
        }
    }
}
