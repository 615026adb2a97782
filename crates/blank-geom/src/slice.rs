//! Plane/mesh sectioning into polygons-with-holes.

use crate::error::{GeomError, GeomResult};
use crate::plane::PlaneBasis;
use blank_types::TriMesh;
use geo::orient::Direction;
use geo::{Contains, Coord, LineString, MultiPolygon, Orient, Point, Polygon};

/// Section a mesh with the plane at `distance` along the basis normal.
///
/// Edge/plane intersection segments are chained into closed rings, then
/// assembled into polygons by containment parity: rings nested at even
/// depth become exteriors, odd depth become holes of their enclosing
/// exterior.
///
/// An empty result (the plane misses the mesh) is `Ok`.
///
/// # Errors
///
/// - [`GeomError::EmptyMesh`] when the mesh has no faces.
/// - [`GeomError::OpenContour`] when a chained contour cannot be closed,
///   which happens when the plane grazes degenerate faces. Callers retry
///   with a tilted plane before giving up.
pub fn section_polygons(
    mesh: &TriMesh,
    basis: &PlaneBasis,
    distance: f64,
) -> GeomResult<MultiPolygon<f64>> {
    if mesh.is_empty() {
        return Err(GeomError::EmptyMesh);
    }

    let diag = mesh.bounds().extents().norm();
    let eps = diag.mul_add(1e-9, 1e-12);

    let mut segments: Vec<(Coord<f64>, Coord<f64>)> = Vec::new();
    for tri in mesh.triangles() {
        let mut hits: Vec<Coord<f64>> = Vec::with_capacity(2);
        for (a, b) in [(tri.a, tri.b), (tri.b, tri.c), (tri.c, tri.a)] {
            let da = basis.distance(&a) - distance;
            let db = basis.distance(&b) - distance;
            if da * db > 0.0 || (da - db).abs() < 1e-12 {
                continue;
            }
            let t = da / (da - db);
            let p = a + (b - a) * t;
            hits.push(basis.project(&p));
        }
        if hits.len() == 2 {
            let len = (hits[0].x - hits[1].x).hypot(hits[0].y - hits[1].y);
            if len > eps {
                segments.push((hits[0], hits[1]));
            }
        }
    }

    if segments.is_empty() {
        return Ok(MultiPolygon(Vec::new()));
    }

    let rings = chain_into_rings(&segments, eps, distance)?;
    Ok(assemble_rings(rings, diag))
}

/// Chain unordered segments into closed rings by matching endpoints.
fn chain_into_rings(
    segments: &[(Coord<f64>, Coord<f64>)],
    eps: f64,
    distance: f64,
) -> GeomResult<Vec<Vec<Coord<f64>>>> {
    let close = |a: &Coord<f64>, b: &Coord<f64>| (a.x - b.x).hypot(a.y - b.y) < eps;

    let mut remaining: Vec<(Coord<f64>, Coord<f64>)> = segments.to_vec();
    let mut rings = Vec::new();

    while let Some(first) = remaining.pop() {
        let mut contour = vec![first.0, first.1];

        let mut changed = true;
        while changed {
            changed = false;
            let start = contour[0];
            let end = contour[contour.len() - 1];

            for i in (0..remaining.len()).rev() {
                let seg = remaining[i];
                if close(&seg.0, &end) {
                    contour.push(seg.1);
                } else if close(&seg.1, &end) {
                    contour.push(seg.0);
                } else if close(&seg.0, &start) {
                    contour.insert(0, seg.1);
                } else if close(&seg.1, &start) {
                    contour.insert(0, seg.0);
                } else {
                    continue;
                }
                remaining.remove(i);
                changed = true;
                break;
            }
        }

        // The walk must come back to where it started
        let start = contour[0];
        let end = contour[contour.len() - 1];
        if !close(&start, &end) {
            return Err(GeomError::OpenContour { distance });
        }
        contour.pop();

        if contour.len() >= 3 {
            rings.push(contour);
        }
    }

    Ok(rings)
}

/// Assign rings to polygons by containment parity (even depth = exterior,
/// odd depth = hole of the innermost enclosing exterior).
fn assemble_rings(rings: Vec<Vec<Coord<f64>>>, diag: f64) -> MultiPolygon<f64> {
    let min_area = (diag * diag).mul_add(1e-12, 1e-300);

    struct Ring {
        coords: Vec<Coord<f64>>,
        area: f64,
        poly: Polygon<f64>,
    }

    let mut measured: Vec<Ring> = rings
        .into_iter()
        .filter_map(|coords| {
            let area = ring_area(&coords).abs();
            if area < min_area {
                return None;
            }
            let mut closed = coords.clone();
            closed.push(closed[0]);
            Some(Ring {
                coords,
                area,
                poly: Polygon::new(LineString::new(closed), Vec::new()),
            })
        })
        .collect();

    // Largest first so parents precede their children
    measured.sort_by(|a, b| b.area.total_cmp(&a.area));

    let mut depth = vec![0usize; measured.len()];
    let mut parent = vec![usize::MAX; measured.len()];
    for i in 0..measured.len() {
        let probe = Point::new(measured[i].coords[0].x, measured[i].coords[0].y);
        for j in 0..i {
            if measured[j].area > measured[i].area && measured[j].poly.contains(&probe) {
                depth[i] += 1;
                // Containers are visited largest-to-smallest, so the last
                // match is the innermost
                parent[i] = j;
            }
        }
    }

    let mut shells: Vec<(usize, Polygon<f64>)> = Vec::new();
    let mut shell_index = vec![usize::MAX; measured.len()];
    for (i, ring) in measured.iter().enumerate() {
        if depth[i] % 2 == 0 {
            let mut closed = ring.coords.clone();
            closed.push(closed[0]);
            shell_index[i] = shells.len();
            shells.push((i, Polygon::new(LineString::new(closed), Vec::new())));
        }
    }
    for (i, ring) in measured.iter().enumerate() {
        if depth[i] % 2 == 1 {
            let owner = shell_index[parent[i]];
            if owner != usize::MAX {
                let mut closed = ring.coords.clone();
                closed.push(closed[0]);
                shells[owner].1.interiors_push(LineString::new(closed));
            }
        }
    }

    MultiPolygon(shells.into_iter().map(|(_, p)| p).collect()).orient(Direction::Default)
}

fn ring_area(coords: &[Coord<f64>]) -> f64 {
    let n = coords.len();
    let mut twice = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        twice += coords[i].x * coords[j].y - coords[j].x * coords[i].y;
    }
    twice / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use blank_types::{cuboid, unit_cube, uv_sphere, TriMesh};
    use geo::Area;
    use nalgebra::Vector3;

    #[test]
    fn cube_mid_section_is_unit_square() {
        let cube = unit_cube();
        let basis = PlaneBasis::from_direction(&Vector3::z()).unwrap();
        let section = section_polygons(&cube, &basis, 0.5).unwrap();

        assert_eq!(section.0.len(), 1);
        assert_relative_eq!(section.unsigned_area(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn section_outside_mesh_is_empty() {
        let cube = unit_cube();
        let basis = PlaneBasis::from_direction(&Vector3::z()).unwrap();
        let section = section_polygons(&cube, &basis, 5.0).unwrap();
        assert!(section.0.is_empty());
    }

    #[test]
    fn sphere_section_area_matches_circle() {
        let sphere = uv_sphere(5.0, 24, 48);
        let basis = PlaneBasis::from_direction(&Vector3::z()).unwrap();
        let section = section_polygons(&sphere, &basis, 0.0).unwrap();

        let analytic = std::f64::consts::PI * 25.0;
        let area = section.unsigned_area();
        assert!(area < analytic);
        assert!(area > analytic * 0.97, "equator area too low: {area}");
    }

    #[test]
    fn off_center_sphere_section_shrinks() {
        let sphere = uv_sphere(5.0, 24, 48);
        let basis = PlaneBasis::from_direction(&Vector3::z()).unwrap();
        let equator = section_polygons(&sphere, &basis, 0.0).unwrap();
        let high = section_polygons(&sphere, &basis, 4.0).unwrap();
        assert!(high.unsigned_area() < equator.unsigned_area() / 2.0);
    }

    #[test]
    fn nested_box_section_has_hole() {
        // A 4x4x4 box with a 2x2x2 inward-facing cavity shell: a mid
        // section sees an outer square with a square hole.
        let mut outer = cuboid(4.0, 4.0, 4.0);
        let mut inner = cuboid(2.0, 2.0, 2.0);
        inner.translate(Vector3::new(1.0, 1.0, 1.0));
        // Flip the cavity faces inward
        for face in &mut inner.faces {
            face.swap(1, 2);
        }
        outer.merge(&inner);

        let basis = PlaneBasis::from_direction(&Vector3::z()).unwrap();
        let section = section_polygons(&outer, &basis, 2.0).unwrap();

        assert_eq!(section.0.len(), 1);
        let holes: usize = section.0.iter().map(|p| p.interiors().len()).sum();
        assert_eq!(holes, 1);
        assert_relative_eq!(section.unsigned_area(), 16.0 - 4.0, epsilon = 1e-9);
    }

    #[test]
    fn diagonal_section_of_cube() {
        let cube = unit_cube();
        let dir = Vector3::new(1.0, 1.0, 1.0);
        let basis = PlaneBasis::from_direction(&dir).unwrap();
        // Mid-plane along the body diagonal: a hexagonal section
        let mid = 3.0_f64.sqrt() / 2.0;
        let section = section_polygons(&cube, &basis, mid).unwrap();
        assert!(section.unsigned_area() > 0.5);
    }

    #[test]
    fn empty_mesh_fails() {
        let basis = PlaneBasis::from_direction(&Vector3::z()).unwrap();
        let err = section_polygons(&TriMesh::new(), &basis, 0.0).unwrap_err();
        assert!(matches!(err, GeomError::EmptyMesh));
    }
}
