//! Minimum enclosing and maximum inscribed circles.

use crate::error::{GeomError, GeomResult};
use geo::{Contains, ConvexHull, Coord, EuclideanDistance, MultiPolygon, Point, Polygon};

/// A circle in plane coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Circle {
    /// Circle center.
    pub center: Point<f64>,
    /// Circle radius.
    pub radius: f64,
}

impl Circle {
    /// Circle diameter.
    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    fn contains(&self, c: Coord<f64>) -> bool {
        let dx = c.x - self.center.x();
        let dy = c.y - self.center.y();
        dx.hypot(dy) <= self.radius.mul_add(1.0 + 1e-10, 1e-12)
    }
}

/// Smallest circle enclosing every point of the outline.
///
/// Works on the convex hull, growing the circle incrementally with one or
/// two boundary points pinned — hull vertex counts are small enough that
/// the cubic worst case is irrelevant.
///
/// # Errors
///
/// [`GeomError::EmptyOutline`] when the outline has no points.
pub fn min_enclosing_circle(shape: &MultiPolygon<f64>) -> GeomResult<Circle> {
    let hull = shape.convex_hull();
    let mut points: Vec<Coord<f64>> = hull.exterior().0.clone();
    if points.len() > 1 {
        points.pop(); // closing duplicate
    }
    if points.is_empty() {
        return Err(GeomError::EmptyOutline);
    }
    if points.len() == 1 {
        return Ok(Circle {
            center: Point::new(points[0].x, points[0].y),
            radius: 0.0,
        });
    }

    let mut circle = circle_from_two(points[0], points[1]);
    for i in 2..points.len() {
        if !circle.contains(points[i]) {
            circle = circle_with_one_pinned(&points[..i], points[i]);
        }
    }
    Ok(circle)
}

fn circle_with_one_pinned(points: &[Coord<f64>], p: Coord<f64>) -> Circle {
    let mut circle = circle_from_two(points[0], p);
    for j in 1..points.len() {
        if !circle.contains(points[j]) {
            circle = circle_with_two_pinned(&points[..j], points[j], p);
        }
    }
    circle
}

fn circle_with_two_pinned(points: &[Coord<f64>], q: Coord<f64>, p: Coord<f64>) -> Circle {
    let mut circle = circle_from_two(q, p);
    for &r in points {
        if !circle.contains(r) {
            circle = circumcircle(r, q, p).unwrap_or(circle);
        }
    }
    circle
}

fn circle_from_two(a: Coord<f64>, b: Coord<f64>) -> Circle {
    let center = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
    let radius = (a.x - b.x).hypot(a.y - b.y) / 2.0;
    Circle { center, radius }
}

fn circumcircle(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> Option<Circle> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-12 {
        return None; // collinear
    }
    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    let radius = (a.x - ux).hypot(a.y - uy);
    Some(Circle {
        center: Point::new(ux, uy),
        radius,
    })
}

/// Largest circle that fits inside the polygon (holes respected).
///
/// Grid-seeded hill climb on the distance-to-boundary field: coarse seed
/// over the bounding box, then a shrinking 3x3 neighborhood walk around the
/// best candidate.
///
/// # Errors
///
/// [`GeomError::EmptyOutline`] when the polygon encloses no area.
pub fn max_inscribed_circle(region: &Polygon<f64>) -> GeomResult<Circle> {
    let exterior = region.exterior();
    if exterior.0.len() < 4 {
        return Err(GeomError::EmptyOutline);
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for c in &exterior.0 {
        min_x = min_x.min(c.x);
        min_y = min_y.min(c.y);
        max_x = max_x.max(c.x);
        max_y = max_y.max(c.y);
    }
    let width = max_x - min_x;
    let height = max_y - min_y;
    if width <= 0.0 || height <= 0.0 {
        return Err(GeomError::EmptyOutline);
    }

    let clearance = |p: Point<f64>| -> f64 {
        if !region.contains(&p) {
            return f64::NEG_INFINITY;
        }
        let mut d = p.euclidean_distance(region.exterior());
        for hole in region.interiors() {
            d = d.min(p.euclidean_distance(hole));
        }
        d
    };

    // Coarse seed
    const SEED: usize = 24;
    let mut best_point = Point::new(min_x + width / 2.0, min_y + height / 2.0);
    let mut best = clearance(best_point);
    for iy in 0..SEED {
        for ix in 0..SEED {
            #[allow(clippy::cast_precision_loss)]
            let p = Point::new(
                min_x + width * (ix as f64 + 0.5) / SEED as f64,
                min_y + height * (iy as f64 + 0.5) / SEED as f64,
            );
            let d = clearance(p);
            if d > best {
                best = d;
                best_point = p;
            }
        }
    }
    if !best.is_finite() || best <= 0.0 {
        return Err(GeomError::EmptyOutline);
    }

    // Shrinking neighborhood walk
    #[allow(clippy::cast_precision_loss)]
    let mut step = width.max(height) / SEED as f64;
    while step > width.max(height) * 1e-7 {
        let mut improved = false;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let p = Point::new(
                    f64::from(dx).mul_add(step, best_point.x()),
                    f64::from(dy).mul_add(step, best_point.y()),
                );
                let d = clearance(p);
                if d > best {
                    best = d;
                    best_point = p;
                    improved = true;
                }
            }
        }
        if !improved {
            step /= 2.0;
        }
    }

    Ok(Circle {
        center: best_point,
        radius: best,
    })
}
