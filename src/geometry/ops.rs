//! Angle-between-vectors and batch point transformation primitives.
//!
//! These are the two leaf operations everything else is built on: the
//! bearing residual is an [`angle_between`] of a ray direction and an
//! offset vector, and the objective evaluates [`transform_points`] once per
//! candidate transform. Both are pure.
use nalgebra::{Point3, Vector3};

use crate::geometry::{
    errors::{GeomResult, GeometryError},
    transform::Transform,
};

/// Unsigned angle in `[0, π]` between two vectors.
///
/// Computed as `acos(clamp(dot(a, b) / (|a| |b|), -1, 1))`. The clamp is
/// mandatory: rounding can push the quotient just outside `[-1, 1]`, and an
/// unguarded `acos` would return NaN. The result is invariant to the
/// magnitudes of both inputs.
///
/// # Errors
/// Returns [`GeometryError::ZeroLengthVector`] if either input has zero
/// norm; that case is undefined and must stay distinct from a valid 0 or π.
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> GeomResult<f64> {
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(GeometryError::ZeroLengthVector { norm_a, norm_b });
    }
    let cos = (a.dot(b) / (norm_a * norm_b)).clamp(-1.0, 1.0);
    Ok(cos.acos())
}

/// Apply `transform` to every point, preserving order.
///
/// Pure: the input slice is untouched and the identity transform is a no-op
/// to within floating-point epsilon.
pub fn transform_points(points: &[Point3<f64>], transform: &Transform) -> Vec<Point3<f64>> {
    let rotation = transform.rotation();
    points.iter().map(|p| rotation * p + transform.translation).collect()
}
