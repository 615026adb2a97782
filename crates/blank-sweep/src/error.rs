//! Error types for sweep sampling.

use blank_geom::GeomError;
use blank_types::DecompositionError;
use thiserror::Error;

/// Errors that can occur during direction selection and sweep sampling.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Step size must be positive.
    #[error("sweep step must be positive, got {0}")]
    InvalidStep(f64),

    /// The region has no usable extent (zero-volume bounding frame or zero
    /// extent along the requested direction).
    #[error("region is degenerate (zero extent)")]
    DegenerateRegion,

    /// Slicing kept failing after every angular-tolerance retry.
    #[error("slicing failed at distance {distance:.4} after {attempts} attempts")]
    SliceFailure {
        /// Station distance that could not be sliced.
        distance: f64,
        /// Number of attempts made (initial + retries).
        attempts: usize,
    },

    /// An underlying geometric primitive failed.
    #[error(transparent)]
    Geometry(#[from] GeomError),

    /// Sampled sections violated the ordering invariant.
    #[error(transparent)]
    Ordering(#[from] DecompositionError),
}

/// Result type for sweep operations.
pub type SweepResult<T> = std::result::Result<T, SweepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SweepError::InvalidStep(-0.5);
        assert!(format!("{err}").contains("-0.5"));

        let err = SweepError::SliceFailure {
            distance: 2.5,
            attempts: 5,
        };
        let text = format!("{err}");
        assert!(text.contains("2.5") && text.contains('5'));
    }
}
