//! Extrusion of cross-section outlines back to triangle meshes.
//!
//! Used for the lazy stock-solid realization: visualization and volume
//! cross-checks, not further geometric processing. Stacks are realized
//! slab-wise (each slab a closed prism of its lower section), so the solid
//! volume matches the Riemann sum of the section areas.

use crate::error::{GeomError, GeomResult};
use crate::plane::PlaneBasis;
use blank_types::{CrossSection, TriMesh};
use geo::{Coord, MultiPolygon, Polygon, TriangulateEarcut};

/// Extrude a polygon set into a closed prism between two stations along
/// the basis normal.
///
/// # Errors
///
/// - [`GeomError::EmptyOutline`] when the shape encloses no area.
/// - [`GeomError::InvertedSlab`] when `upper <= lower`.
pub fn extrude_prism(
    shape: &MultiPolygon<f64>,
    basis: &PlaneBasis,
    lower: f64,
    upper: f64,
) -> GeomResult<TriMesh> {
    if shape.0.is_empty() {
        return Err(GeomError::EmptyOutline);
    }
    if upper <= lower {
        return Err(GeomError::InvertedSlab { lower, upper });
    }

    let mut mesh = TriMesh::new();
    for poly in &shape.0 {
        add_caps(&mut mesh, poly, basis, lower, upper);
        add_walls(&mut mesh, poly.exterior().0.as_slice(), basis, lower, upper);
        for hole in poly.interiors() {
            add_walls(&mut mesh, hole.0.as_slice(), basis, lower, upper);
        }
    }

    if mesh.is_empty() {
        return Err(GeomError::EmptyOutline);
    }
    Ok(mesh)
}

/// Realize an ordered cross-section stack as a solid, slab by slab.
///
/// # Errors
///
/// - [`GeomError::EmptyOutline`] when fewer than two sections are given or
///   every slab is empty.
/// - [`GeomError::InvertedSlab`] when consecutive stations are not
///   strictly increasing.
pub fn extrude_stack(sections: &[CrossSection], basis: &PlaneBasis) -> GeomResult<TriMesh> {
    if sections.len() < 2 {
        return Err(GeomError::EmptyOutline);
    }

    let mut solid = TriMesh::new();
    for pair in sections.windows(2) {
        let (below, above) = (&pair[0], &pair[1]);
        if above.distance <= below.distance {
            return Err(GeomError::InvertedSlab {
                lower: below.distance,
                upper: above.distance,
            });
        }
        if below.is_empty() {
            continue;
        }
        let slab = extrude_prism(&below.shape, basis, below.distance, above.distance)?;
        solid.merge(&slab);
    }

    if solid.is_empty() {
        return Err(GeomError::EmptyOutline);
    }
    Ok(solid)
}

#[allow(clippy::cast_possible_truncation)] // u32 indices cap vertex counts by design
fn add_caps(mesh: &mut TriMesh, poly: &Polygon<f64>, basis: &PlaneBasis, lower: f64, upper: f64) {
    for tri in poly.earcut_triangles() {
        let (a, b, c) = (tri.0, tri.1, tri.2);
        let ccw = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y) > 0.0;
        // Top cap faces +normal, bottom cap faces -normal
        let (top, bottom) = if ccw { ((a, b, c), (a, c, b)) } else { ((a, c, b), (a, b, c)) };

        let base = mesh.positions.len() as u32;
        mesh.positions.push(basis.lift(top.0, upper));
        mesh.positions.push(basis.lift(top.1, upper));
        mesh.positions.push(basis.lift(top.2, upper));
        mesh.faces.push([base, base + 1, base + 2]);

        let base = mesh.positions.len() as u32;
        mesh.positions.push(basis.lift(bottom.0, lower));
        mesh.positions.push(basis.lift(bottom.1, lower));
        mesh.positions.push(basis.lift(bottom.2, lower));
        mesh.faces.push([base, base + 1, base + 2]);
    }
}

#[allow(clippy::cast_possible_truncation)] // u32 indices cap vertex counts by design
fn add_walls(mesh: &mut TriMesh, ring: &[Coord<f64>], basis: &PlaneBasis, lower: f64, upper: f64) {
    if ring.len() < 2 {
        return;
    }
    // Rings close with a duplicate point; walk the unique span
    let span = if ring.first() == ring.last() {
        &ring[..ring.len() - 1]
    } else {
        ring
    };
    let n = span.len();
    for i in 0..n {
        let p = span[i];
        let q = span[(i + 1) % n];

        let base = mesh.positions.len() as u32;
        mesh.positions.push(basis.lift(p, lower));
        mesh.positions.push(basis.lift(q, lower));
        mesh.positions.push(basis.lift(q, upper));
        mesh.positions.push(basis.lift(p, upper));
        // Outward for CCW exteriors; hole rings wind CW so the same
        // ordering faces into the bore, which is outward for the solid
        mesh.faces.push([base, base + 1, base + 2]);
        mesh.faces.push([base, base + 2, base + 3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{polygon, LineString};
    use nalgebra::Vector3;

    fn unit_square() -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ]])
    }

    #[test]
    fn prism_volume_matches_area_times_height() {
        let basis = PlaneBasis::from_direction(&Vector3::z()).unwrap();
        let prism = extrude_prism(&unit_square(), &basis, 0.0, 2.0).unwrap();
        assert_relative_eq!(prism.volume(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn prism_with_hole() {
        let exterior = LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let hole = LineString::from(vec![(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]);
        let shape = MultiPolygon(vec![Polygon::new(exterior, vec![hole])]);

        let basis = PlaneBasis::from_direction(&Vector3::z()).unwrap();
        let prism = extrude_prism(&shape, &basis, 0.0, 1.0).unwrap();
        // 16 - 4 = 12 through area
        assert_relative_eq!(prism.volume(), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn inverted_slab_fails() {
        let basis = PlaneBasis::from_direction(&Vector3::z()).unwrap();
        let err = extrude_prism(&unit_square(), &basis, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, GeomError::InvertedSlab { .. }));
    }

    #[test]
    fn stack_accumulates_slabs() {
        let basis = PlaneBasis::from_direction(&Vector3::z()).unwrap();
        let sections = vec![
            CrossSection::new(unit_square(), 0.0),
            CrossSection::new(unit_square(), 1.0),
            CrossSection::new(unit_square(), 3.0),
        ];
        let solid = extrude_stack(&sections, &basis).unwrap();
        assert_relative_eq!(solid.volume(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn stack_needs_two_sections() {
        let basis = PlaneBasis::from_direction(&Vector3::z()).unwrap();
        let sections = vec![CrossSection::new(unit_square(), 0.0)];
        assert!(extrude_stack(&sections, &basis).is_err());
    }
}
