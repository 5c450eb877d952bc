//! Validation helpers for the pose optimizer.
//!
//! This module centralizes the consistency checks used across the optimizer
//! interface:
//!
//! - **Stop thresholds**: [`validate_min_norm`], [`validate_min_delta`]
//!   ensure thresholds are finite and strictly positive.
//! - **Seeds**: [`validate_seed`] enforces the four-scalar layout with
//!   finite entries before any numerical work begins.
//! - **Gradients**: [`validate_grad`] enforces correct dimension and finite
//!   entries.
//! - **Estimates / residuals**: [`validate_estimate`] and
//!   [`validate_residual`] check solver output before it is handed back to
//!   callers.
//!
//! All helpers report domain-specific [`RellocError`] variants, keeping
//! higher-level code uniform.
use crate::optimization::{
    errors::{RellocError, RellocResult},
    pose_optimizer::types::{Grad, UNKNOWN_DIM, Unknowns},
};

/// Validate the gradient-norm stop threshold.
///
/// # Errors
/// Returns [`RellocError::InvalidMinNorm`] if the value is non-finite or ≤ 0.
pub fn validate_min_norm(min_norm: f64) -> RellocResult<()> {
    if !min_norm.is_finite() {
        return Err(RellocError::InvalidMinNorm {
            min_norm,
            reason: "Threshold must be finite.",
        });
    }
    if min_norm <= 0.0 {
        return Err(RellocError::InvalidMinNorm {
            min_norm,
            reason: "Threshold must be positive.",
        });
    }
    Ok(())
}

/// Validate the objective-delta stop threshold.
///
/// # Errors
/// Returns [`RellocError::InvalidMinDelta`] if the value is non-finite or ≤ 0.
pub fn validate_min_delta(min_delta: f64) -> RellocResult<()> {
    if !min_delta.is_finite() {
        return Err(RellocError::InvalidMinDelta {
            min_delta,
            reason: "Threshold must be finite.",
        });
    }
    if min_delta <= 0.0 {
        return Err(RellocError::InvalidMinDelta {
            min_delta,
            reason: "Threshold must be positive.",
        });
    }
    Ok(())
}

/// Validate an initial guess: four components, all finite.
///
/// # Errors
/// - [`RellocError::UnknownVectorDim`] for a wrong-length seed.
/// - [`RellocError::NonFiniteSeed`] for the first NaN/Inf entry.
pub fn validate_seed(seed: &Unknowns) -> RellocResult<()> {
    if seed.len() != UNKNOWN_DIM {
        return Err(RellocError::UnknownVectorDim { expected: UNKNOWN_DIM, found: seed.len() });
    }
    for (index, &value) in seed.iter().enumerate() {
        if !value.is_finite() {
            return Err(RellocError::NonFiniteSeed { index, value });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`RellocError::GradientDimMismatch`] if length does not match `dim`.
/// - [`RellocError::InvalidGradient`] with the index/value of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> RellocResult<()> {
    if grad.len() != dim {
        return Err(RellocError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(RellocError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap the estimated unknown vector.
///
/// Accepts only a present, four-dimensional vector with finite entries.
///
/// # Errors
/// - [`RellocError::MissingEstimate`] if no vector was produced.
/// - [`RellocError::UnknownVectorDim`] for a wrong-length vector.
/// - [`RellocError::InvalidEstimate`] if any element is non-finite.
pub fn validate_estimate(estimate: Option<Unknowns>) -> RellocResult<Unknowns> {
    match estimate {
        Some(x) => {
            if x.len() != UNKNOWN_DIM {
                return Err(RellocError::UnknownVectorDim {
                    expected: UNKNOWN_DIM,
                    found: x.len(),
                });
            }
            for (index, &value) in x.iter().enumerate() {
                if !value.is_finite() {
                    return Err(RellocError::InvalidEstimate {
                        index,
                        value,
                        reason: "Estimated unknowns must be finite.",
                    });
                }
            }
            Ok(x)
        }
        None => Err(RellocError::MissingEstimate),
    }
}

/// Validate that a residual value is finite.
///
/// # Errors
/// Returns [`RellocError::NonFiniteObjective`] for NaN or ±∞.
pub fn validate_residual(residual: f64) -> RellocResult<()> {
    if !residual.is_finite() {
        return Err(RellocError::NonFiniteObjective { value: residual });
    }
    Ok(())
}
