//! Hollow tube builder.

use crate::bar::circle_outline;
use crate::dispatch::{assemble_blank, BlankParts};
use crate::error::ShapeResult;
use crate::region::SubVolume;
use blank_geom::{max_inscribed_circle, min_enclosing_circle};
use blank_types::{Blank, BlankKind, CrossSection, Decomposition, MultiPolygon, TubeConfig};
use geo::orient::Direction;
use geo::{Area, LineString, Orient, Polygon};
use tracing::debug;

/// Hollow tube: the outer diameter encloses the silhouette, the bore is
/// the largest circle inscribed in the silhouette's through-void, both
/// opened up by the radial machining allowance.
///
/// Parts without a through-void, tubes that collapse solid under the
/// offsets, and diameter or wall-ratio violations are infeasible — the
/// blank still carries a pessimistic solid-cylinder estimate so downstream
/// consumers can keep going.
pub(crate) fn build(region: &SubVolume, config: &TubeConfig) -> ShapeResult<Blank> {
    let (index, candidate) = region.longest_candidate();
    let sil = region.silhouette_along(index)?;
    let depth = sil.depth();

    let outer = min_enclosing_circle(&sil.outline)?;
    let bore_radius = largest_void(&sil.outline).map_or(0.0, |void| {
        max_inscribed_circle(&void).map_or(0.0, |c| c.radius)
    });

    let outer_radius = outer.radius + config.radial_offset;
    let inner_radius = bore_radius - config.radial_offset;

    let mut is_feasible = true;
    if inner_radius <= 0.0 {
        debug!("bore collapsed to a solid cylinder");
        is_feasible = false;
    }

    let outer_diameter = 2.0 * outer_radius;
    if outer_diameter < config.min_outer_diameter || outer_diameter > config.max_outer_diameter {
        debug!(
            outer_diameter,
            "outer diameter outside the stocked range"
        );
        is_feasible = false;
    }

    let wall = outer_radius - inner_radius.max(0.0);
    if wall <= 0.0 || outer_diameter / wall > config.max_diameter_wall_ratio {
        debug!(wall, "tube wall too thin for the diameter");
        is_feasible = false;
    }

    let bore = inner_radius.max(0.0);
    let section_area = std::f64::consts::PI * (outer_radius * outer_radius - bore * bore);
    let stock_volume = section_area * depth;

    let cross_sections = Decomposition::new(
        candidate.direction,
        vec![CrossSection::new(
            annulus_outline(&outer, outer_radius, bore),
            sil.min,
        )],
    )?;

    Ok(assemble_blank(
        region,
        BlankParts {
            kind: BlankKind::HollowTube,
            stock_volume,
            is_feasible,
            cross_sections,
            build_direction: candidate.direction,
            build_distance: depth,
            area_on_cutting_plane: section_area,
            perimeter_on_plane: std::f64::consts::TAU * (outer_radius + bore),
        },
    ))
}

/// The largest through-void of a silhouette as a standalone polygon.
fn largest_void(outline: &MultiPolygon<f64>) -> Option<Polygon<f64>> {
    let mut best: Option<Polygon<f64>> = None;
    for poly in &outline.0 {
        for ring in poly.interiors() {
            let void =
                Polygon::new(ring.clone(), Vec::new()).orient(Direction::Default);
            if best
                .as_ref()
                .is_none_or(|b| void.unsigned_area() > b.unsigned_area())
            {
                best = Some(void);
            }
        }
    }
    best
}

/// Annular cross-section outline; solid disk when the bore is zero.
fn annulus_outline(
    outer: &blank_geom::Circle,
    outer_radius: f64,
    bore_radius: f64,
) -> MultiPolygon<f64> {
    let outer_ring = circle_outline(outer.center.x(), outer.center.y(), outer_radius);
    if bore_radius <= 0.0 {
        return outer_ring;
    }
    let bore_ring = circle_outline(outer.center.x(), outer.center.y(), bore_radius);
    let exterior = outer_ring.0.into_iter().next().map_or_else(
        || LineString::new(Vec::new()),
        |p| p.exterior().clone(),
    );
    let hole = bore_ring.0.into_iter().next().map_or_else(
        || LineString::new(Vec::new()),
        |p| p.exterior().clone(),
    );
    MultiPolygon(vec![
        Polygon::new(exterior, vec![hole]).orient(Direction::Default)
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use blank_types::{uv_sphere, TriMesh};
    use nalgebra::Point3;

    /// A square tube: outer 20x20, bore 10x10, length 50 along Z.
    fn square_tube() -> TriMesh {
        let mut mesh = TriMesh::new();
        let ring = |half: f64, z: f64| {
            [
                Point3::new(-half, -half, z),
                Point3::new(half, -half, z),
                Point3::new(half, half, z),
                Point3::new(-half, half, z),
            ]
        };
        for z in [0.0, 50.0] {
            for p in ring(10.0, z) {
                mesh.positions.push(p);
            }
            for p in ring(5.0, z) {
                mesh.positions.push(p);
            }
        }
        // Index layout: 0-3 outer bottom, 4-7 inner bottom,
        //               8-11 outer top, 12-15 inner top
        let quad = |mesh: &mut TriMesh, a: u32, b: u32, c: u32, d: u32| {
            mesh.faces.push([a, b, c]);
            mesh.faces.push([a, c, d]);
        };
        for i in 0..4u32 {
            let j = (i + 1) % 4;
            // Outer walls, outward
            quad(&mut mesh, i, j, 8 + j, 8 + i);
            // Inner walls, facing the bore
            quad(&mut mesh, 4 + j, 4 + i, 12 + i, 12 + j);
            // Bottom annulus ring, facing -Z
            quad(&mut mesh, j, i, 4 + i, 4 + j);
            // Top annulus ring, facing +Z
            quad(&mut mesh, 8 + i, 8 + j, 12 + j, 12 + i);
        }
        mesh
    }

    #[test]
    fn square_tube_mesh_is_sane() {
        let tube = square_tube();
        // (400 - 100) * 50
        assert_relative_eq!(tube.volume(), 15_000.0, epsilon = 1.0);
    }

    #[test]
    fn tube_part_gets_matching_diameters() {
        let region = SubVolume::analyze(square_tube(), None).unwrap();
        let config = TubeConfig::default().with_radial_offset(0.0);
        let blank = build(&region, &config).unwrap();

        assert!(blank.is_feasible);
        // Outer circle encloses the 20x20 square: radius 10*sqrt(2);
        // the bore's inscribed circle fills the 10x10 void: radius 5
        let outer = 10.0 * 2.0_f64.sqrt();
        let expected = std::f64::consts::PI * (outer * outer - 25.0) * 50.0;
        assert_relative_eq!(blank.stock_volume, expected, epsilon = expected * 0.01);
        assert!(blank.stock_volume >= blank.finish_volume);
    }

    #[test]
    fn radial_offset_opens_the_bore() {
        let region = SubVolume::analyze(square_tube(), None).unwrap();
        let with_offset = build(&region, &TubeConfig::default().with_radial_offset(1.0)).unwrap();
        let without = build(&region, &TubeConfig::default().with_radial_offset(0.0)).unwrap();
        assert!(with_offset.stock_volume > without.stock_volume);
    }

    #[test]
    fn solid_sphere_is_infeasible() {
        let region = SubVolume::analyze(uv_sphere(5.0, 16, 32), None).unwrap();
        let config = TubeConfig::default()
            .with_radial_offset(0.0)
            .with_max_diameter_wall_ratio(f64::INFINITY)
            .with_diameter_range(0.0, f64::INFINITY);
        let blank = build(&region, &config).unwrap();

        // No through-void: the inscribed bore collapses below threshold
        assert!(!blank.is_feasible);
        // The pessimistic estimate is the solid cylinder
        assert!(blank.stock_volume >= blank.finish_volume);
    }

    #[test]
    fn excessive_offset_collapses_tube() {
        let region = SubVolume::analyze(square_tube(), None).unwrap();
        // A 6mm radial cut eats the whole 5mm bore
        let blank = build(&region, &TubeConfig::default().with_radial_offset(6.0)).unwrap();
        assert!(!blank.is_feasible);
    }
}
