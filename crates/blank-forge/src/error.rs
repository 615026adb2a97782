//! Error types for the forging solver.

use blank_geom::GeomError;
use blank_sweep::SweepError;
use blank_types::DecompositionError;
use thiserror::Error;

/// Errors that can occur while estimating a forging stock shape.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The part is too short along this axis to forge between covers.
    #[error("extent {extent:.3} along the axis is below twice the top cover {top_cover:.3}")]
    ExtentBelowCover {
        /// Part extent along the candidate axis.
        extent: f64,
        /// Configured top cover distance.
        top_cover: f64,
    },

    /// Too few usable sections survived the cover offsets.
    #[error("only {count} usable cross-sections along the axis")]
    InsufficientSections {
        /// Number of surviving sections.
        count: usize,
    },

    /// Assembled stations went backwards, which indicates an algorithmic
    /// or input-geometry failure.
    #[error("assembled station {index} steps backwards by {delta:.4}")]
    NonMonotonicStations {
        /// Index of the offending station.
        index: usize,
        /// The negative distance step observed.
        delta: f64,
    },

    /// Every candidate direction was rejected.
    #[error("no candidate direction produced a viable forging")]
    NoViableDirection,

    /// Sweep sampling failed for this direction.
    #[error(transparent)]
    Sweep(#[from] SweepError),

    /// An underlying geometric primitive failed.
    #[error(transparent)]
    Geometry(#[from] GeomError),

    /// Assembled sections violated the ordering invariant.
    #[error(transparent)]
    Ordering(#[from] DecompositionError),
}

/// Result type for forging operations.
pub type ForgeResult<T> = std::result::Result<T, ForgeError>;
