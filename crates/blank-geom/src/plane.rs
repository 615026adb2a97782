//! Orthonormal plane basis for a sweep direction.

use crate::error::{GeomError, GeomResult};
use geo::Coord;
use nalgebra::{Point3, Vector3};

/// An orthonormal 2-D basis on the plane perpendicular to a direction.
///
/// The basis is deterministic for a given direction, so 2-D coordinates
/// produced anywhere in the pipeline can always be lifted back to 3-D from
/// the direction alone. The scalar plane coordinate of a 3-D point is its
/// projection onto `normal`.
#[derive(Debug, Clone, Copy)]
pub struct PlaneBasis {
    /// First in-plane axis.
    pub u: Vector3<f64>,
    /// Second in-plane axis (`normal x u`).
    pub v: Vector3<f64>,
    /// Plane normal (the sweep direction, normalized).
    pub normal: Vector3<f64>,
}

impl PlaneBasis {
    /// Build the basis for a sweep direction.
    ///
    /// # Errors
    ///
    /// [`GeomError::DegenerateDirection`] if the direction has near-zero
    /// length.
    pub fn from_direction(direction: &Vector3<f64>) -> GeomResult<Self> {
        let norm = direction.norm();
        if norm < 1e-12 {
            return Err(GeomError::DegenerateDirection);
        }
        let normal = direction / norm;

        // Pick the world axis least aligned with the normal to seed u
        let u = if normal.x.abs() < 0.9 {
            Vector3::x().cross(&normal).normalize()
        } else {
            Vector3::y().cross(&normal).normalize()
        };
        let v = normal.cross(&u);

        Ok(Self { u, v, normal })
    }

    /// Project a 3-D point into plane coordinates.
    #[must_use]
    pub fn project(&self, point: &Point3<f64>) -> Coord<f64> {
        Coord {
            x: point.coords.dot(&self.u),
            y: point.coords.dot(&self.v),
        }
    }

    /// Scalar distance of a point along the plane normal.
    #[must_use]
    pub fn distance(&self, point: &Point3<f64>) -> f64 {
        point.coords.dot(&self.normal)
    }

    /// Lift plane coordinates back to 3-D at the given normal distance.
    #[must_use]
    pub fn lift(&self, coord: Coord<f64>, distance: f64) -> Point3<f64> {
        Point3::from(self.u * coord.x + self.v * coord.y + self.normal * distance)
    }
}
