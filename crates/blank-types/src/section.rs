//! Planar cross-sections and ordered sweep decompositions.

use crate::error::DecompositionError;
use geo::{Area, EuclideanLength, MultiPolygon};
use nalgebra::Vector3;

/// One planar slice of a mesh: a polygon-with-holes set plus its scalar
/// distance along the sweep direction.
///
/// Coordinates are 2-D, expressed in the orthonormal plane basis derived
/// from the sweep direction; `distance` is the scalar projection of the
/// cutting plane onto that direction.
#[derive(Debug, Clone)]
pub struct CrossSection {
    /// The section outline(s), holes as interior rings.
    pub shape: MultiPolygon<f64>,
    /// Distance of the cutting plane along the sweep direction.
    pub distance: f64,
}

impl CrossSection {
    /// Create a cross-section.
    #[must_use]
    pub const fn new(shape: MultiPolygon<f64>, distance: f64) -> Self {
        Self { shape, distance }
    }

    /// Create an empty cross-section at `distance`.
    #[must_use]
    pub const fn empty(distance: f64) -> Self {
        Self {
            shape: MultiPolygon(Vec::new()),
            distance,
        }
    }

    /// Net enclosed area (exterior minus holes).
    #[must_use]
    pub fn area(&self) -> f64 {
        self.shape.unsigned_area()
    }

    /// Total contour length, holes included.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.shape
            .iter()
            .map(|poly| {
                poly.exterior().euclidean_length()
                    + poly
                        .interiors()
                        .iter()
                        .map(EuclideanLength::euclidean_length)
                        .sum::<f64>()
            })
            .sum()
    }

    /// Check whether the section has no outline.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shape.0.is_empty()
    }

    /// Number of hole loops across all polygons.
    #[must_use]
    pub fn hole_count(&self) -> usize {
        self.shape.iter().map(|p| p.interiors().len()).sum()
    }
}

/// An ordered sequence of cross-sections along a fixed sweep direction.
///
/// Distances **strictly increase**; the ordering is semantically
/// significant (volume reconstruction integrates consecutive pairs) and is
/// enforced at construction.
#[derive(Debug, Clone)]
pub struct Decomposition {
    direction: Vector3<f64>,
    sections: Vec<CrossSection>,
}

impl Decomposition {
    /// Create a decomposition, validating the distance ordering.
    ///
    /// # Errors
    ///
    /// [`DecompositionError::NonMonotonic`] if any section's distance is not
    /// strictly greater than its predecessor's.
    pub fn new(
        direction: Vector3<f64>,
        sections: Vec<CrossSection>,
    ) -> Result<Self, DecompositionError> {
        for (index, pair) in sections.windows(2).enumerate() {
            if pair[1].distance <= pair[0].distance {
                return Err(DecompositionError::NonMonotonic { index: index + 1 });
            }
        }
        Ok(Self {
            direction: direction.normalize(),
            sections,
        })
    }

    /// The (normalized) sweep direction.
    #[must_use]
    pub const fn direction(&self) -> Vector3<f64> {
        self.direction
    }

    /// The ordered sections.
    #[must_use]
    pub fn sections(&self) -> &[CrossSection] {
        &self.sections
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check whether the decomposition holds no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Distance from the first to the last section.
    #[must_use]
    pub fn span(&self) -> f64 {
        match (self.sections.first(), self.sections.last()) {
            (Some(first), Some(last)) => last.distance - first.distance,
            _ => 0.0,
        }
    }
}

/// A station of a drafted-union sweep walk.
///
/// Records the merged cavity outline at one station together with whether
/// this station's source section actually enlarged the running union. The
/// last contributing station on each side of a forging bounds the parting
/// line.
#[derive(Debug, Clone)]
pub struct ForgingSection {
    /// Station distance along the sweep direction.
    pub distance: f64,
    /// Merged cavity outline at this station.
    pub shape: MultiPolygon<f64>,
    /// Net area of `shape`, computed at construction.
    pub area: f64,
    /// Whether the source section enlarged the running union here.
    pub contributing: bool,
}

impl ForgingSection {
    /// Create a station record; the area is computed eagerly.
    #[must_use]
    pub fn new(distance: f64, shape: MultiPolygon<f64>, contributing: bool) -> Self {
        let area = shape.unsigned_area();
        Self {
            distance,
            shape,
            area,
            contributing,
        }
    }
}
