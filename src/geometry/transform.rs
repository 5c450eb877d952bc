//! Yaw-plus-translation rigid transform.
//!
//! The relative pose between the two agents is a full 3D translation plus a
//! single rotation about the Z axis. Roll and pitch are structurally absent:
//! [`Transform`] cannot represent them, so no caller can smuggle them into an
//! estimate. The optimizer works on a flattened four-scalar vector
//! `[tx, ty, tz, yaw]`; [`Transform::to_unknowns`] and
//! [`Transform::from_unknowns`] convert between the two representations.
use nalgebra::{Point3, Rotation3, Vector3};
use ndarray::{Array1, array};

use crate::geometry::errors::{GeomResult, GeometryError};

/// Dimension of the flattened unknown vector `[tx, ty, tz, yaw]`.
pub const UNKNOWN_DIM: usize = 4;

/// Rigid transform with full 3D translation and a yaw-only rotation.
///
/// Applying the transform rotates a point about the Z axis by `yaw` radians
/// and then translates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f64>,
    pub yaw: f64,
}

impl Transform {
    /// Build a transform from a translation vector and a yaw angle in radians.
    pub fn new(translation: Vector3<f64>, yaw: f64) -> Self {
        Self { translation, yaw }
    }

    /// The identity transform: zero translation, zero yaw.
    pub fn identity() -> Self {
        Self { translation: Vector3::zeros(), yaw: 0.0 }
    }

    /// The yaw rotation as a full rotation matrix about the Z axis.
    pub fn rotation(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), self.yaw)
    }

    /// Apply the transform to a single point: rotate about Z, then translate.
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        self.rotation() * point + self.translation
    }

    /// Flatten into the optimizer's unknown vector `[tx, ty, tz, yaw]`.
    pub fn to_unknowns(&self) -> Array1<f64> {
        array![self.translation.x, self.translation.y, self.translation.z, self.yaw]
    }

    /// Rebuild a transform from a flattened unknown vector.
    ///
    /// # Errors
    /// Returns [`GeometryError::UnknownVectorDim`] if `x` does not have
    /// exactly [`UNKNOWN_DIM`] components.
    pub fn from_unknowns(x: &Array1<f64>) -> GeomResult<Self> {
        if x.len() != UNKNOWN_DIM {
            return Err(GeometryError::UnknownVectorDim { expected: UNKNOWN_DIM, found: x.len() });
        }
        Ok(Self { translation: Vector3::new(x[0], x[1], x[2]), yaw: x[3] })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
