//! Full-outline projection of a mesh along a direction.

use crate::error::{GeomError, GeomResult};
use crate::offset::union_all;
use crate::plane::PlaneBasis;
use blank_types::TriMesh;
use geo::orient::Direction;
use geo::{LineString, MultiPolygon, Orient, Polygon};

/// Project every triangle of `mesh` onto the plane of `basis` and union the
/// projections into the mesh's silhouette outline.
///
/// Holes in the part (through-bores along the view direction) appear as
/// interior rings of the result. Edge-on triangles project to zero area and
/// are skipped.
///
/// # Errors
///
/// - [`GeomError::EmptyMesh`] when the mesh has no faces.
/// - [`GeomError::EmptyOutline`] when every projection is degenerate (the
///   mesh is flat along the view plane).
pub fn silhouette(mesh: &TriMesh, basis: &PlaneBasis) -> GeomResult<MultiPolygon<f64>> {
    if mesh.is_empty() {
        return Err(GeomError::EmptyMesh);
    }

    let diag = mesh.bounds().extents().norm();
    let degenerate_area = (diag * diag).mul_add(1e-12, 1e-300);

    let mut pieces = Vec::with_capacity(mesh.face_count());
    for tri in mesh.triangles() {
        let a = basis.project(&tri.a);
        let b = basis.project(&tri.b);
        let c = basis.project(&tri.c);

        let twice_area = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y);
        if twice_area.abs() / 2.0 < degenerate_area {
            continue;
        }

        // Wind counter-clockwise regardless of which side faces the viewer
        let ring = if twice_area > 0.0 {
            vec![a, b, c, a]
        } else {
            vec![a, c, b, a]
        };
        pieces.push(MultiPolygon(vec![Polygon::new(
            LineString::new(ring),
            Vec::new(),
        )]));
    }

    if pieces.is_empty() {
        return Err(GeomError::EmptyOutline);
    }

    Ok(union_all(pieces).orient(Direction::Default))
}
