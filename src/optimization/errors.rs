use argmin::core::{ArgminError, Error};

use crate::geometry::errors::GeometryError;
use crate::residual::errors::ResidualError;

/// Crate-wide result alias for estimation operations.
pub type RellocResult<T> = Result<T, RellocError>;

#[derive(Debug, Clone, PartialEq)]
pub enum RellocError {
    // ---- Gradient ----
    /// Implies that finite differences should be used.
    GradientNotImplemented,

    /// Gradient dimensions do not match the unknown vector dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite.
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Stop strategy / options ----
    /// Gradient-norm threshold needs to be positive and finite.
    InvalidMinNorm {
        min_norm: f64,
        reason: &'static str,
    },
    /// Objective-delta threshold needs to be positive and finite.
    InvalidMinDelta {
        min_delta: f64,
        reason: &'static str,
    },
    /// Iteration cap is invalid for the chosen stop strategy.
    InvalidMaxIterations {
        max_iterations: usize,
        reason: &'static str,
    },
    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },
    /// lbfgs_mem needs to be at least 1.
    InvalidLbfgsMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Objective ----
    /// Objective returned a non-finite value.
    NonFiniteObjective {
        value: f64,
    },

    // ---- Seed / estimate ----
    /// Initial guess must contain only finite values.
    NonFiniteSeed {
        index: usize,
        value: f64,
    },

    /// The unknown vector had the wrong dimension.
    UnknownVectorDim {
        expected: usize,
        found: usize,
    },

    /// Estimated unknowns must be finite.
    InvalidEstimate {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// The solver produced no best parameter vector.
    MissingEstimate,

    // ---- Correspondences ----
    /// The three correspondence arrays must have equal lengths.
    LengthMismatch {
        points: usize,
        ray_origins: usize,
        ray_directions: usize,
    },

    /// Ray directions must be nonzero.
    ZeroDirection {
        index: usize,
    },

    /// A bearing became undefined during evaluation.
    UndefinedBearing {
        norm_a: f64,
        norm_b: f64,
    },

    // ---- Argmin ----
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckpointNotFound
    CheckpointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for RellocError {}

impl std::fmt::Display for RellocError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            RellocError::GradientNotImplemented => {
                write!(f, "Analytic gradient not implemented")
            }
            RellocError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            RellocError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- Stop strategy / options ----
            RellocError::InvalidMinNorm { min_norm, reason } => {
                write!(f, "Invalid gradient-norm threshold {min_norm}: {reason}")
            }
            RellocError::InvalidMinDelta { min_delta, reason } => {
                write!(f, "Invalid objective-delta threshold {min_delta}: {reason}")
            }
            RellocError::InvalidMaxIterations { max_iterations, reason } => {
                write!(f, "Invalid maximum iterations {max_iterations}: {reason}")
            }
            RellocError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            RellocError::InvalidLbfgsMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Objective ----
            RellocError::NonFiniteObjective { value } => {
                write!(f, "Non-finite objective value: {value}")
            }

            // ---- Seed / estimate ----
            RellocError::NonFiniteSeed { index, value } => {
                write!(f, "Non-finite initial guess at index {index}: {value}")
            }
            RellocError::UnknownVectorDim { expected, found } => {
                write!(f, "Unknown vector dimension mismatch: expected {expected}, found {found}")
            }
            RellocError::InvalidEstimate { index, value, reason } => {
                write!(f, "Invalid estimate at index {index}: {value}: {reason}")
            }
            RellocError::MissingEstimate => {
                write!(f, "Missing estimated unknowns")
            }

            // ---- Correspondences ----
            RellocError::LengthMismatch { points, ray_origins, ray_directions } => {
                write!(
                    f,
                    "Correspondence length mismatch: {points} points, {ray_origins} ray origins, \
                     {ray_directions} ray directions"
                )
            }
            RellocError::ZeroDirection { index } => {
                write!(f, "Ray direction at index {index} has zero length")
            }
            RellocError::UndefinedBearing { norm_a, norm_b } => {
                write!(f, "Undefined bearing: vector norms {norm_a} and {norm_b}")
            }

            // ---- Argmin ----
            RellocError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            RellocError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            RellocError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            RellocError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            RellocError::CheckpointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            RellocError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            RellocError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            RellocError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            RellocError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for RellocError {
    fn from(original_err: Error) -> Self {
        // Domain errors raised inside the adapter travel through argmin as
        // opaque backend errors; recover them intact before falling back to
        // the argmin-error mapping.
        let original_err = match original_err.downcast::<RellocError>() {
            Ok(domain_err) => return domain_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => RellocError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => RellocError::NotImplemented { text },
                ArgminError::NotInitialized { text } => RellocError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => RellocError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => {
                    RellocError::CheckpointNotFound { text }
                }
                ArgminError::PotentialBug { text } => RellocError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => RellocError::ImpossibleError { text },
                _ => RellocError::UnknownError,
            },
            Err(err) => RellocError::BackendError { text: err.to_string() },
        }
    }
}

impl From<ResidualError> for RellocError {
    fn from(err: ResidualError) -> Self {
        match err {
            ResidualError::LengthMismatch { points, ray_origins, ray_directions } => {
                RellocError::LengthMismatch { points, ray_origins, ray_directions }
            }
            ResidualError::ZeroDirection { index } => RellocError::ZeroDirection { index },
            ResidualError::UndefinedBearing { norm_a, norm_b } => {
                RellocError::UndefinedBearing { norm_a, norm_b }
            }
            ResidualError::UnknownVectorDim { expected, found } => {
                RellocError::UnknownVectorDim { expected, found }
            }
        }
    }
}

impl From<GeometryError> for RellocError {
    fn from(err: GeometryError) -> Self {
        RellocError::from(ResidualError::from(err))
    }
}
