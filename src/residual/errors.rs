use crate::geometry::errors::GeometryError;

/// Result alias for residual-model operations.
pub type ResidualResult<T> = Result<T, ResidualError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ResidualError {
    /// The three correspondence arrays must have equal lengths.
    LengthMismatch {
        points: usize,
        ray_origins: usize,
        ray_directions: usize,
    },

    /// Ray directions must be nonzero; the bearing toward a target is
    /// undefined otherwise.
    ZeroDirection {
        index: usize,
    },

    /// A bearing became undefined during evaluation (a transformed point
    /// coincided with its ray origin, or a direction degenerated).
    UndefinedBearing {
        norm_a: f64,
        norm_b: f64,
    },

    /// The unknown vector handed to the objective had the wrong dimension.
    UnknownVectorDim {
        expected: usize,
        found: usize,
    },
}

impl std::error::Error for ResidualError {}

impl std::fmt::Display for ResidualError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResidualError::LengthMismatch { points, ray_origins, ray_directions } => {
                write!(
                    f,
                    "Correspondence length mismatch: {points} points, {ray_origins} ray origins, \
                     {ray_directions} ray directions"
                )
            }
            ResidualError::ZeroDirection { index } => {
                write!(f, "Ray direction at index {index} has zero length")
            }
            ResidualError::UndefinedBearing { norm_a, norm_b } => {
                write!(f, "Undefined bearing: vector norms {norm_a} and {norm_b}")
            }
            ResidualError::UnknownVectorDim { expected, found } => {
                write!(f, "Unknown vector dimension mismatch: expected {expected}, found {found}")
            }
        }
    }
}

impl From<GeometryError> for ResidualError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::ZeroLengthVector { norm_a, norm_b } => {
                ResidualError::UndefinedBearing { norm_a, norm_b }
            }
            GeometryError::UnknownVectorDim { expected, found } => {
                ResidualError::UnknownVectorDim { expected, found }
            }
        }
    }
}
