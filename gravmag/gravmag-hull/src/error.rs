//! Error types for hull construction.

use thiserror::Error;

/// Result type alias for hull operations.
pub type HullResult<T> = Result<T, HullError>;

/// Errors that can occur while triangulating a point cloud.
#[derive(Debug, Error)]
pub enum HullError {
    /// Fewer points than a 3-D hull requires.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum number of points required.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// The cloud spans no 3-D volume (coincident, collinear or coplanar).
    #[error("degenerate geometry: {details}")]
    DegenerateGeometry {
        /// Description of the degeneracy.
        details: String,
    },

    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate at point {index}")]
    NonFiniteCoordinate {
        /// Index of the offending point in the input cloud.
        index: usize,
    },
}

impl HullError {
    /// Create a degenerate geometry error.
    #[must_use]
    pub fn degenerate(details: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            details: details.into(),
        }
    }
}
