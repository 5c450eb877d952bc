//! Bearing residual model: per-correspondence angular error and the
//! aggregate objective the optimizer minimizes.
//!
//! The residual between a point and the ray expected to observe it is the
//! angle between the ray's direction and the vector from the ray origin to
//! the transformed point. It is zero exactly when the transformed point lies
//! on the ray, and it penalizes bearing error only — range error is
//! invisible to it, which is the intended behavior for direction-only
//! observations. The aggregate objective is the sum of squared residuals
//! over the whole correspondence set, as a function of the flattened unknown
//! vector `[tx, ty, tz, yaw]`.
use nalgebra::{Point3, Vector3};
use ndarray::Array1;

use crate::geometry::{
    errors::GeomResult,
    ops::{angle_between, transform_points},
    transform::Transform,
};
use crate::optimization::{
    errors::RellocResult,
    pose_optimizer::{
        traits::Objective,
        types::{Cost, Unknowns},
        validation::validate_seed,
    },
};
use crate::residual::errors::{ResidualError, ResidualResult};

/// An index-aligned set of point/ray correspondences.
///
/// `points[i]` is the 3D location of target `i` in the observed agent's
/// frame; `ray_origins[i]` and `ray_directions[i]` describe the bearing-only
/// observation of the same physical target in the observing agent's frame.
/// Which point matches which ray is assumed established by the caller.
///
/// Construction validates the invariants once, so evaluation code can assume
/// equal lengths and nonzero directions. Direction vectors need not be unit
/// length; every formula downstream is invariant to their magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct Correspondences {
    points: Vec<Point3<f64>>,
    ray_origins: Vec<Point3<f64>>,
    ray_directions: Vec<Vector3<f64>>,
}

impl Correspondences {
    /// Build a validated correspondence set.
    ///
    /// # Errors
    /// - [`ResidualError::LengthMismatch`] if the three arrays differ in length.
    /// - [`ResidualError::ZeroDirection`] for the first zero-length direction.
    pub fn new(
        points: Vec<Point3<f64>>, ray_origins: Vec<Point3<f64>>,
        ray_directions: Vec<Vector3<f64>>,
    ) -> ResidualResult<Self> {
        if points.len() != ray_origins.len() || points.len() != ray_directions.len() {
            return Err(ResidualError::LengthMismatch {
                points: points.len(),
                ray_origins: ray_origins.len(),
                ray_directions: ray_directions.len(),
            });
        }
        for (index, direction) in ray_directions.iter().enumerate() {
            if direction.norm() == 0.0 {
                return Err(ResidualError::ZeroDirection { index });
            }
        }
        Ok(Self { points, ray_origins, ray_directions })
    }

    /// An empty correspondence set: trivially converged, objective 0.
    pub fn empty() -> Self {
        Self { points: Vec::new(), ray_origins: Vec::new(), ray_directions: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn ray_origins(&self) -> &[Point3<f64>] {
        &self.ray_origins
    }

    pub fn ray_directions(&self) -> &[Vector3<f64>] {
        &self.ray_directions
    }
}

/// Angular residual for a single correspondence under a candidate transform.
///
/// Transforms `point`, forms the vector from `ray_origin` to the transformed
/// point, and returns its angle to `ray_direction`. Zero exactly when the
/// transformed point lies along the ray.
///
/// # Errors
/// Propagates [`crate::geometry::GeometryError::ZeroLengthVector`] when the
/// transformed point coincides with the ray origin (or the direction is
/// zero), since the bearing is undefined there.
pub fn bearing_residual(
    point: &Point3<f64>, ray_origin: &Point3<f64>, ray_direction: &Vector3<f64>,
    transform: &Transform,
) -> GeomResult<f64> {
    let transformed = transform.apply(point);
    angle_between(ray_direction, &(transformed - ray_origin))
}

/// Sum of squared bearing residuals over the whole correspondence set.
///
/// This is the objective minimized over the unknown vector
/// `x = [tx, ty, tz, yaw]`. An empty set yields exactly `0.0` — a trivially
/// converged state — with no division by the correspondence count.
///
/// # Errors
/// - [`ResidualError::UnknownVectorDim`] if `x` is not four-dimensional.
/// - [`ResidualError::UndefinedBearing`] if any bearing degenerates.
pub fn aggregate_objective(
    correspondences: &Correspondences, x: &Array1<f64>,
) -> ResidualResult<f64> {
    let transform = Transform::from_unknowns(x)?;
    let transformed = transform_points(correspondences.points(), &transform);
    let mut sum = 0.0;
    for ((point, origin), direction) in transformed
        .iter()
        .zip(correspondences.ray_origins())
        .zip(correspondences.ray_directions())
    {
        let residual = angle_between(direction, &(point - origin))?;
        sum += residual * residual;
    }
    Ok(sum)
}

/// The bearing-fit objective as seen by the optimizer.
///
/// Implements [`Objective`] over a [`Correspondences`] payload. No analytic
/// gradient is provided; the adapter falls back to finite differences.
#[derive(Debug, Clone, Copy)]
pub struct BearingObjective;

impl Objective for BearingObjective {
    type Data = Correspondences;

    fn value(&self, x: &Unknowns, data: &Self::Data) -> RellocResult<Cost> {
        Ok(aggregate_objective(data, x)?)
    }

    fn check(&self, x: &Unknowns, _data: &Self::Data) -> RellocResult<()> {
        validate_seed(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::RellocError;
    use approx::assert_relative_eq;
    use ndarray::array;
    use std::f64::consts::PI;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Correspondence validation: length mismatch and zero directions.
    // - Zero-residual configurations of the bearing residual, including the
    //   scale invariance of the direction vector.
    // - Aggregate objective on empty and consistent sets, and the seed
    //   checks of `BearingObjective`.
    //
    // Optimizer convergence on these scenes is exercised by the
    // pose-optimizer API tests and the integration suite.
    // -------------------------------------------------------------------------

    fn single(
        point: [f64; 3], origin: [f64; 3], direction: [f64; 3],
    ) -> Correspondences {
        Correspondences::new(
            vec![Point3::new(point[0], point[1], point[2])],
            vec![Point3::new(origin[0], origin[1], origin[2])],
            vec![Vector3::new(direction[0], direction[1], direction[2])],
        )
        .expect("single correspondence should validate")
    }

    #[test]
    // Purpose
    // -------
    // Mismatched array lengths are rejected before any computation.
    //
    // Given
    // -----
    // - Two points but one ray.
    //
    // Expect
    // ------
    // - `ResidualError::LengthMismatch` reporting all three lengths.
    fn mismatched_lengths_are_rejected() {
        let err = Correspondences::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
            vec![Point3::origin()],
            vec![Vector3::x()],
        )
        .unwrap_err();
        assert_eq!(err, ResidualError::LengthMismatch {
            points: 2,
            ray_origins: 1,
            ray_directions: 1
        });
    }

    #[test]
    // Purpose
    // -------
    // A zero direction vector is rejected at construction with its index.
    //
    // Given
    // -----
    // - Two correspondences, the second with a zero direction.
    //
    // Expect
    // ------
    // - `ResidualError::ZeroDirection { index: 1 }`.
    fn zero_direction_is_rejected() {
        let err = Correspondences::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
            vec![Point3::origin(), Point3::origin()],
            vec![Vector3::x(), Vector3::zeros()],
        )
        .unwrap_err();
        assert_eq!(err, ResidualError::ZeroDirection { index: 1 });
    }

    #[test]
    // Purpose
    // -------
    // Known consistent scenes evaluate to a zero residual.
    //
    // Given
    // -----
    // - Three scenes where the transformed point lies exactly on the ray:
    //   shared frame, π yaw with forward offset, and -π/2 yaw with offset.
    //
    // Expect
    // ------
    // - Residual 0 within 1e-2 for each.
    fn residual_is_zero_on_the_ray() {
        let cases = [
            ([2.0, 0.0, 0.0], Transform::identity()),
            ([1.0, 0.0, 0.0], Transform::new(Vector3::new(3.0, 0.0, 0.0), PI)),
            ([0.0, -1.0, 0.0], Transform::new(Vector3::new(3.0, 0.0, 0.0), -PI / 2.0)),
        ];
        for (point, transform) in cases {
            let r = bearing_residual(
                &Point3::new(point[0], point[1], point[2]),
                &Point3::new(0.0, 0.0, 2.0),
                &Vector3::new(2.0, 0.0, -2.0),
                &transform,
            )
            .unwrap();
            assert_relative_eq!(r, 0.0, epsilon = 1e-2);
        }
    }

    #[test]
    // Purpose
    // -------
    // The residual depends only on the ray's direction, not its magnitude.
    //
    // Given
    // -----
    // - The same scene with the direction scaled by 1000.
    //
    // Expect
    // ------
    // - Identical residuals within 1e-12.
    fn residual_is_scale_invariant_in_direction() {
        let point = Point3::new(1.0, 1.0, 0.0);
        let origin = Point3::new(0.0, 0.0, 2.0);
        let direction = Vector3::new(2.0, 0.0, -2.0);
        let tf = Transform::new(Vector3::new(0.5, -0.5, 0.0), 0.3);
        let r1 = bearing_residual(&point, &origin, &direction, &tf).unwrap();
        let r2 = bearing_residual(&point, &origin, &(direction * 1000.0), &tf).unwrap();
        assert_relative_eq!(r1, r2, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The empty correspondence set yields an objective of exactly 0.
    //
    // Given
    // -----
    // - `Correspondences::empty()` and an arbitrary unknown vector.
    //
    // Expect
    // ------
    // - `aggregate_objective` returns exactly `0.0`, no error, no division
    //   by the count.
    fn empty_set_yields_zero_objective() {
        let x = array![1.0, -2.0, 0.5, 0.9];
        let value = aggregate_objective(&Correspondences::empty(), &x).unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    // Purpose
    // -------
    // The aggregate objective is zero at a transform consistent with the
    // scene, and positive away from it.
    //
    // Given
    // -----
    // - The worked single-correspondence scene: point `[0, -1, 0]`, origin
    //   `[0, 0, 2]`, direction `[2, 0, -2]`, solution `[3, 0, 0, -π/2]`.
    //
    // Expect
    // ------
    // - Objective ≈ 0 at the solution, strictly greater at the identity.
    fn aggregate_objective_vanishes_at_solution() {
        let scene = single([0.0, -1.0, 0.0], [0.0, 0.0, 2.0], [2.0, 0.0, -2.0]);
        let at_solution =
            aggregate_objective(&scene, &array![3.0, 0.0, 0.0, -PI / 2.0]).unwrap();
        let at_identity = aggregate_objective(&scene, &array![0.0, 0.0, 0.0, 0.0]).unwrap();
        assert_relative_eq!(at_solution, 0.0, epsilon = 1e-4);
        assert!(at_identity > at_solution);
    }

    #[test]
    // Purpose
    // -------
    // The objective's seed check rejects NaN and wrong dimensions.
    //
    // Given
    // -----
    // - A NaN-bearing seed and a three-element seed.
    //
    // Expect
    // ------
    // - `NonFiniteSeed` and `UnknownVectorDim` respectively.
    fn seed_check_rejects_invalid_unknowns() {
        let scene = single([0.0, -1.0, 0.0], [0.0, 0.0, 2.0], [2.0, 0.0, -2.0]);
        let objective = BearingObjective;

        let err = objective.check(&array![0.0, f64::NAN, 0.0, 0.0], &scene).unwrap_err();
        assert!(matches!(err, RellocError::NonFiniteSeed { index: 1, .. }));

        let err = objective.check(&array![0.0, 0.0, 0.0], &scene).unwrap_err();
        assert!(matches!(err, RellocError::UnknownVectorDim { expected: 4, found: 3 }));
    }
}
