//! Error types for blank construction.

use blank_forge::ForgeError;
use blank_geom::GeomError;
use blank_sweep::SweepError;
use blank_types::{BlankKind, DecompositionError};
use thiserror::Error;

/// Errors that can occur while building a blank.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// The region has no volume; rejected before any geometric work.
    #[error("region is degenerate (no enclosed volume)")]
    DegenerateRegion,

    /// The requested kind has no stock estimator.
    #[error("{} has no stock estimator; compose it from member blanks", .0.as_str())]
    UnsupportedKind(BlankKind),

    /// A builder referenced a candidate direction that does not exist.
    #[error("no candidate direction at index {0}")]
    UnknownDirection(usize),

    /// An underlying geometric primitive failed.
    #[error(transparent)]
    Geometry(#[from] GeomError),

    /// Direction selection or sweep sampling failed.
    #[error(transparent)]
    Sweep(#[from] SweepError),

    /// The forging solver failed for every direction.
    #[error(transparent)]
    Forge(#[from] ForgeError),

    /// Cross-sections violated the ordering invariant.
    #[error(transparent)]
    Ordering(#[from] DecompositionError),
}

/// Result type for blank construction.
pub type ShapeResult<T> = std::result::Result<T, ShapeError>;
