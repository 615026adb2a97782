//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

/// An axis-aligned bounding box in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create an empty bounding box (inverted bounds).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Build the bounding box of a set of points.
    ///
    /// Returns [`Aabb::empty`] for an empty iterator.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut aabb = Self::empty();
        for p in points {
            aabb.grow(p);
        }
        aabb
    }

    /// Expand the box to contain `point`.
    pub fn grow(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Check whether the box contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Full extents (max - min) along each axis.
    #[must_use]
    pub fn extents(&self) -> Vector3<f64> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    /// Volume of the box; zero when empty or degenerate.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let e = self.extents();
        e.x * e.y * e.z
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_box_has_no_volume() {
        let aabb = Aabb::empty();
        assert!(aabb.is_empty());
        assert!(aabb.volume().abs() < f64::EPSILON);
        assert_eq!(aabb.extents(), Vector3::zeros());
    }

    #[test]
    fn from_points_spans_input() {
        let points = [
            Point3::new(-1.0, 2.0, 0.5),
            Point3::new(3.0, -4.0, 0.0),
            Point3::new(0.0, 0.0, 2.0),
        ];
        let aabb = Aabb::from_points(points.iter());

        assert!((aabb.min.x - (-1.0)).abs() < f64::EPSILON);
        assert!((aabb.max.x - 3.0).abs() < f64::EPSILON);
        assert!((aabb.min.y - (-4.0)).abs() < f64::EPSILON);
        assert!((aabb.max.y - 2.0).abs() < f64::EPSILON);
        assert!((aabb.max.z - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn center_and_volume() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 6.0)];
        let aabb = Aabb::from_points(points.iter());

        assert_eq!(aabb.center(), Point3::new(1.0, 2.0, 3.0));
        assert!((aabb.volume() - 48.0).abs() < 1e-12);
    }
}
