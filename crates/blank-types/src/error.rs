//! Error types for the core data model.

use thiserror::Error;

/// Errors raised when constructing ordered decompositions.
#[derive(Debug, Clone, Error)]
pub enum DecompositionError {
    /// Section distances must strictly increase.
    #[error("cross-section {index} does not strictly increase in distance")]
    NonMonotonic {
        /// Index of the offending section.
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DecompositionError::NonMonotonic { index: 3 };
        assert!(format!("{err}").contains('3'));
    }
}
