//! Error types for geometric primitives.

use thiserror::Error;

/// Errors that can occur in geometric primitive operations.
///
/// `Clone` is derived so results can be cached and handed out to multiple
/// readers.
#[derive(Debug, Clone, Error)]
pub enum GeomError {
    /// Mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// Direction vector has (near) zero length.
    #[error("direction has near-zero length")]
    DegenerateDirection,

    /// A section contour could not be closed into a ring.
    #[error("section contour at distance {distance:.4} does not close")]
    OpenContour {
        /// Distance of the cutting plane along the sweep direction.
        distance: f64,
    },

    /// An offset operation collapsed the outline entirely.
    #[error("offset by {distance:.4} collapsed the outline")]
    OffsetCollapse {
        /// The offset distance that caused the collapse.
        distance: f64,
    },

    /// An outline was empty where geometry was required.
    #[error("outline is empty")]
    EmptyOutline,

    /// An extrusion slab's upper station is not above its lower station.
    #[error("slab from {lower:.4} to {upper:.4} is inverted")]
    InvertedSlab {
        /// Lower station distance.
        lower: f64,
        /// Upper station distance.
        upper: f64,
    },
}

/// Result type for geometric primitive operations.
pub type GeomResult<T> = std::result::Result<T, GeomError>;
