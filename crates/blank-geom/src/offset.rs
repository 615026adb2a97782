//! Polygon offsetting and union helpers.
//!
//! Two offset flavors are provided:
//!
//! - [`offset_round`] buffers through `geo_buf`; corners follow the
//!   buffering library's join treatment. Collapse produces an empty result.
//! - [`offset_miter`] offsets each ring with miter joins and a miter limit,
//!   which preserves straight walls exactly — this is the draft operator
//!   used by the forging solver.

use crate::error::{GeomError, GeomResult};
use geo::orient::Direction;
use geo::{BooleanOps, Coord, LineString, MultiPolygon, Orient, Polygon};
use geo_buf::buffer_multi_polygon;
use tracing::debug;

/// Maximum miter distance as a multiple of the offset distance. Sharper
/// corners get a bevel (two points) instead of a divergent spike.
const MITER_LIMIT: f64 = 4.0;

/// Round-offset a polygon set by `distance` (positive grows, negative
/// shrinks).
///
/// Collapse under a negative offset yields an empty set rather than an
/// error; callers treat emptiness as "the feature closed".
#[must_use]
pub fn offset_round(shape: &MultiPolygon<f64>, distance: f64) -> MultiPolygon<f64> {
    if shape.0.is_empty() || distance.abs() < 1e-12 {
        return shape.clone();
    }
    buffer_multi_polygon(shape, distance)
}

/// Miter-offset a polygon set by `distance` (positive grows, negative
/// shrinks).
///
/// Holes move opposite to exteriors: growing the material shrinks its
/// holes, and a hole that collapses is dropped (closed). A polygon whose
/// exterior collapses under a negative offset is dropped.
///
/// # Errors
///
/// [`GeomError::OffsetCollapse`] when a **positive** offset degenerates an
/// exterior ring — growth must never lose material, so that is reported
/// rather than swallowed.
pub fn offset_miter(shape: &MultiPolygon<f64>, distance: f64) -> GeomResult<MultiPolygon<f64>> {
    if distance.abs() < 1e-12 {
        return Ok(shape.clone());
    }

    let mut polygons = Vec::with_capacity(shape.0.len());
    for poly in &shape.0 {
        let Some(exterior) = offset_ring(poly.exterior(), distance) else {
            if distance < 0.0 {
                // Eroded away entirely
                continue;
            }
            return Err(GeomError::OffsetCollapse { distance });
        };

        let mut holes = Vec::new();
        for hole in poly.interiors() {
            if let Some(ring) = offset_ring(hole, -distance) {
                holes.push(ring);
            } else {
                debug!(distance, "hole collapsed during miter offset");
            }
        }
        polygons.push(Polygon::new(exterior, holes));
    }

    if polygons.is_empty() {
        if distance < 0.0 {
            return Ok(MultiPolygon(Vec::new()));
        }
        return Err(GeomError::OffsetCollapse { distance });
    }

    Ok(MultiPolygon(polygons).orient(Direction::Default))
}

/// Union an arbitrary number of polygon sets into one.
///
/// Uses a balanced merge so unioning `n` triangle projections costs
/// `O(n log n)` boolean operations instead of a linear accumulator chain.
#[must_use]
pub fn union_all(mut shapes: Vec<MultiPolygon<f64>>) -> MultiPolygon<f64> {
    shapes.retain(|s| !s.0.is_empty());

    while shapes.len() > 1 {
        let mut merged = Vec::with_capacity(shapes.len() / 2 + 1);
        let mut iter = shapes.into_iter();
        while let Some(a) = iter.next() {
            match iter.next() {
                Some(b) => merged.push(a.union(&b)),
                None => merged.push(a),
            }
        }
        shapes = merged;
    }

    match shapes.pop() {
        Some(shape) => shape,
        None => MultiPolygon(Vec::new()),
    }
}

/// Offset a single ring by `distance`, positive meaning outward from the
/// enclosed region. Returns `None` when the ring collapses.
fn offset_ring(ring: &LineString<f64>, distance: f64) -> Option<LineString<f64>> {
    let mut points: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
    for &c in &ring.0 {
        if points
            .last()
            .is_none_or(|&p| (c.x - p.x).hypot(c.y - p.y) > 1e-12)
        {
            points.push(c);
        }
    }
    // Drop the closing duplicate if present
    if points.len() >= 2 {
        let (first, last) = (points[0], points[points.len() - 1]);
        if (first.x - last.x).hypot(first.y - last.y) <= 1e-12 {
            points.pop();
        }
    }
    if points.len() < 3 {
        return None;
    }

    let original_area = shoelace(&points);
    let was_clockwise = original_area < 0.0;
    if was_clockwise {
        points.reverse();
    }

    let n = points.len();
    let mut offset: Vec<Coord<f64>> = Vec::with_capacity(n + 4);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];

        let Some(n1) = outward_normal(prev, cur) else {
            continue;
        };
        let Some(n2) = outward_normal(cur, next) else {
            continue;
        };

        let mx = n1.x + n2.x;
        let my = n1.y + n2.y;
        let m_len = mx.hypot(my);
        if m_len < 1e-9 {
            // Near-reversal: flat cap with both edge offsets
            offset.push(Coord {
                x: cur.x + n1.x * distance,
                y: cur.y + n1.y * distance,
            });
            offset.push(Coord {
                x: cur.x + n2.x * distance,
                y: cur.y + n2.y * distance,
            });
            continue;
        }

        let m = Coord {
            x: mx / m_len,
            y: my / m_len,
        };
        let cos_half = m.x * n1.x + m.y * n1.y;
        let miter = distance / cos_half;
        if miter.abs() > MITER_LIMIT * distance.abs() {
            // Bevel instead of a long spike
            offset.push(Coord {
                x: cur.x + n1.x * distance,
                y: cur.y + n1.y * distance,
            });
            offset.push(Coord {
                x: cur.x + n2.x * distance,
                y: cur.y + n2.y * distance,
            });
        } else {
            offset.push(Coord {
                x: cur.x + m.x * miter,
                y: cur.y + m.y * miter,
            });
        }
    }

    if offset.len() < 3 {
        return None;
    }

    let new_area = shoelace(&offset);
    // A shrink that inverts or empties the ring collapsed; a grow that
    // loses area self-intersected badly enough to be unusable.
    if new_area <= 1e-12 {
        return None;
    }
    if distance < 0.0 && new_area >= original_area.abs() {
        return None;
    }

    if was_clockwise {
        offset.reverse();
    }
    offset.push(offset[0]);
    Some(LineString::new(offset))
}

/// Unit normal pointing to the right of the edge `a -> b` (outward for a
/// counter-clockwise ring). `None` for a degenerate edge.
fn outward_normal(a: Coord<f64>, b: Coord<f64>) -> Option<Coord<f64>> {
    let ex = b.x - a.x;
    let ey = b.y - a.y;
    let len = ex.hypot(ey);
    if len < 1e-12 {
        return None;
    }
    Some(Coord {
        x: ey / len,
        y: -ex / len,
    })
}

fn shoelace(points: &[Coord<f64>]) -> f64 {
    let n = points.len();
    let mut twice_area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        twice_area += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    twice_area / 2.0
}
