/// Result alias for geometric primitives.
pub type GeomResult<T> = Result<T, GeometryError>;

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The angle between two vectors is undefined when either has zero length.
    ZeroLengthVector {
        norm_a: f64,
        norm_b: f64,
    },

    /// A flattened unknown vector must have exactly four components.
    UnknownVectorDim {
        expected: usize,
        found: usize,
    },
}

impl std::error::Error for GeometryError {}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::ZeroLengthVector { norm_a, norm_b } => {
                write!(
                    f,
                    "Angle undefined for zero-length vector: |a| = {norm_a}, |b| = {norm_b}"
                )
            }
            GeometryError::UnknownVectorDim { expected, found } => {
                write!(f, "Unknown vector dimension mismatch: expected {expected}, found {found}")
            }
        }
    }
}
