//! Adapter that exposes an [`Objective`] as an `argmin` problem.
//!
//! This is a direct minimization: cost and objective are the same quantity.
//! If the objective provides an analytic gradient it is validated and used;
//! otherwise the gradient is obtained by finite-differencing the cost.
use std::cell::RefCell;

use crate::optimization::{
    errors::RellocError,
    pose_optimizer::{
        traits::Objective,
        types::{Cost, Grad, Unknowns},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges an [`Objective`] to `argmin`'s `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns the objective value, checked finite.
/// - `Gradient::gradient` returns the analytic gradient when implemented,
///   or a finite-difference gradient of the cost otherwise.
#[derive(Debug, Clone)]
pub struct ArgminAdapter<'a, F: Objective> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: Objective> CostFunction for ArgminAdapter<'a, F> {
    type Param = Unknowns;
    type Output = Cost;

    /// Evaluate the objective at `x`.
    ///
    /// Returns `Error(NonFiniteObjective)` if the value is not finite.
    ///
    /// # Errors
    /// Propagates any `RellocError` from the objective's `value` via `?`.
    fn cost(&self, x: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(x, self.data)?;
        if !output.is_finite() {
            return Err((RellocError::NonFiniteObjective { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, F: Objective> Gradient for ArgminAdapter<'a, F> {
    type Param = Unknowns;
    type Gradient = Grad;

    /// Evaluate the gradient of the objective at `x`.
    ///
    /// Behavior:
    /// - If the objective implements `grad`, validate and return it.
    /// - Otherwise finite-difference the cost:
    ///   - Try *central* differences first.
    ///   - If any cost evaluation inside the closure failed (captured via
    ///     `closure_err`), retry with *forward* differences.
    ///   - Validate the FD gradient; on failure (e.g., non-finite entries)
    ///     retry once with forward differences and validate again.
    ///
    /// Implementation note: the FD closure must return `f64`, so `?` cannot
    /// be used inside it; the first error is captured in `closure_err` and
    /// the closure returns NaN, which is turned back into a real error
    /// afterwards.
    ///
    /// # Errors
    /// - Propagates objective errors from `grad` (other than
    ///   `GradientNotImplemented`).
    /// - Propagates any error raised by cost evaluations during FD.
    /// - Returns validation errors for wrong-dimension or non-finite
    ///   gradients.
    fn gradient(&self, x: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = x.len();
        match self.f.grad(x, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(g)
            }
            Err(e) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                match e {
                    RellocError::GradientNotImplemented => {
                        let cost_func = |x: &Unknowns| -> f64 {
                            match self.cost(x) {
                                Ok(val) => val,
                                Err(e) => {
                                    let mut slot = closure_err.borrow_mut();
                                    if slot.is_none() {
                                        *slot = Some(e);
                                    }
                                    f64::NAN
                                }
                            }
                        };
                        let mut fd_grad = x.central_diff(&cost_func);
                        if closure_err.borrow().is_some() {
                            fd_grad = run_fd_diff(x, &cost_func, &closure_err)?;
                            return Ok(fd_grad);
                        }
                        match validate_grad(&fd_grad, dim) {
                            Ok(()) => Ok(fd_grad),
                            Err(_) => {
                                fd_grad = run_fd_diff(x, &cost_func, &closure_err)?;
                                Ok(fd_grad)
                            }
                        }
                    }
                    _ => Err(e.into()),
                }
            }
        }
    }
}

impl<'a, F: Objective> ArgminAdapter<'a, F> {
    /// Construct a new adapter over an objective and its problem data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

/// Compute a forward-difference gradient of `func` at `x`, with error capture.
///
/// Clears `closure_err`, runs `forward_diff`, surfaces any captured error,
/// then validates the resulting gradient.
///
/// # Errors
/// Returns any error captured during evaluation of `func` inside the FD
/// routine or raised by validation of the resulting gradient.
fn run_fd_diff<G: Fn(&Unknowns) -> f64>(
    x: &Unknowns, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = x.forward_diff(func);
    let dim = x.len();
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::RellocResult;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Cost evaluation and the non-finite guard.
    // - The finite-difference fallback when no analytic gradient exists.
    // - Use and validation of a provided analytic gradient.
    // -------------------------------------------------------------------------

    /// Quadratic bowl `|x|²` with an optional analytic gradient.
    struct Quadratic {
        analytic: bool,
    }

    impl Objective for Quadratic {
        type Data = ();

        fn value(&self, x: &Unknowns, _data: &()) -> RellocResult<Cost> {
            Ok(x.iter().map(|v| v * v).sum())
        }

        fn check(&self, _x: &Unknowns, _data: &()) -> RellocResult<()> {
            Ok(())
        }

        fn grad(&self, x: &Unknowns, _data: &()) -> RellocResult<Grad> {
            if self.analytic {
                Ok(x.mapv(|v| 2.0 * v))
            } else {
                Err(RellocError::GradientNotImplemented)
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // The adapter forwards cost evaluations unchanged.
    //
    // Given
    // -----
    // - The quadratic objective at `[1, 2, 3, 4]`.
    //
    // Expect
    // ------
    // - Cost 30.
    fn cost_is_forwarded() {
        let f = Quadratic { analytic: false };
        let adapter = ArgminAdapter::new(&f, &());
        let cost = adapter.cost(&array![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_relative_eq!(cost, 30.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Without an analytic gradient, finite differences approximate the true
    // gradient closely.
    //
    // Given
    // -----
    // - The quadratic objective at `[1, -2, 0.5, 3]` with FD fallback.
    //
    // Expect
    // ------
    // - Gradient ≈ `2x` componentwise within 1e-5.
    fn finite_difference_fallback_matches_analytic() {
        let x = array![1.0, -2.0, 0.5, 3.0];
        let f = Quadratic { analytic: false };
        let adapter = ArgminAdapter::new(&f, &());
        let g = adapter.gradient(&x).unwrap();
        for (gi, xi) in g.iter().zip(x.iter()) {
            assert_relative_eq!(*gi, 2.0 * xi, epsilon = 1e-5);
        }
    }

    #[test]
    // Purpose
    // -------
    // A provided analytic gradient is used as-is.
    //
    // Given
    // -----
    // - The quadratic objective with `analytic = true`.
    //
    // Expect
    // ------
    // - Gradient exactly `2x`.
    fn analytic_gradient_is_used() {
        let x = array![1.0, -2.0, 0.5, 3.0];
        let f = Quadratic { analytic: true };
        let adapter = ArgminAdapter::new(&f, &());
        let g = adapter.gradient(&x).unwrap();
        for (gi, xi) in g.iter().zip(x.iter()) {
            assert_relative_eq!(*gi, 2.0 * xi, epsilon = 1e-12);
        }
    }
}
