//! Sawn bar stock builders.

use crate::dispatch::{assemble_blank, BlankParts};
use crate::error::ShapeResult;
use crate::region::SubVolume;
use blank_geom::{min_enclosing_circle, offset_miter, GeomError};
use blank_types::{
    BarStockConfig, Blank, BlankKind, CrossSection, Decomposition, MultiPolygon,
};
use geo::{Coord, LineString, MinimumRotatedRect, Polygon};

/// Rectangular bar: the tightest rotated bounding rectangle of the
/// silhouette along the longest axis, a machining allowance on every face.
pub(crate) fn build_rectangular(
    region: &SubVolume,
    config: &BarStockConfig,
) -> ShapeResult<Blank> {
    let (index, candidate) = region.longest_candidate();
    let sil = region.silhouette_along(index)?;

    let rect = MinimumRotatedRect::minimum_rotated_rect(&sil.outline)
        .ok_or(GeomError::EmptyOutline)?;
    let (length, width) = rect_sides(&rect).ok_or(GeomError::EmptyOutline)?;

    let offset = config.machining_offset;
    let depth = sil.depth() + 2.0 * offset;
    let section_length = length + 2.0 * offset;
    let section_width = width + 2.0 * offset;
    let stock_volume = section_length * section_width * depth;

    // The stock outline is the rectangle grown by the allowance; miter
    // offsetting a convex outline is exact
    let outline = MultiPolygon(vec![rect]);
    let stock_outline = if offset > 0.0 {
        offset_miter(&outline, offset)?
    } else {
        outline
    };

    let cross_sections = Decomposition::new(
        candidate.direction,
        vec![CrossSection::new(stock_outline, sil.min - offset)],
    )?;

    Ok(assemble_blank(
        region,
        BlankParts {
            kind: BlankKind::BarStockRectangular,
            stock_volume,
            is_feasible: true,
            cross_sections,
            build_direction: candidate.direction,
            build_distance: depth,
            area_on_cutting_plane: section_length * section_width,
            perimeter_on_plane: 2.0 * (section_length + section_width),
        },
    ))
}

/// Circular bar: the minimum enclosing circle of the silhouette along the
/// longest axis, a machining allowance on radius and ends.
pub(crate) fn build_circular(region: &SubVolume, config: &BarStockConfig) -> ShapeResult<Blank> {
    let (index, candidate) = region.longest_candidate();
    let sil = region.silhouette_along(index)?;

    let circle = min_enclosing_circle(&sil.outline)?;
    let offset = config.machining_offset;
    let radius = circle.radius + offset;
    let depth = sil.depth() + 2.0 * offset;

    let section_area = std::f64::consts::PI * radius * radius;
    let stock_volume = section_area * depth;

    let cross_sections = Decomposition::new(
        candidate.direction,
        vec![CrossSection::new(
            circle_outline(circle.center.x(), circle.center.y(), radius),
            sil.min - offset,
        )],
    )?;

    Ok(assemble_blank(
        region,
        BlankParts {
            kind: BlankKind::BarStockCircular,
            stock_volume,
            is_feasible: true,
            cross_sections,
            build_direction: candidate.direction,
            build_distance: depth,
            area_on_cutting_plane: section_area,
            perimeter_on_plane: std::f64::consts::TAU * radius,
        },
    ))
}

/// Side lengths of a minimum rotated rectangle polygon.
fn rect_sides(rect: &Polygon<f64>) -> Option<(f64, f64)> {
    let ring = &rect.exterior().0;
    if ring.len() < 4 {
        return None;
    }
    let side = |a: Coord<f64>, b: Coord<f64>| (b.x - a.x).hypot(b.y - a.y);
    Some((side(ring[0], ring[1]), side(ring[1], ring[2])))
}

/// A polygonal circle outline for the stored cross-section.
pub(crate) fn circle_outline(cx: f64, cy: f64, radius: f64) -> MultiPolygon<f64> {
    const SEGMENTS: usize = 64;
    let ring: Vec<Coord<f64>> = (0..=SEGMENTS)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let theta = std::f64::consts::TAU * (i % SEGMENTS) as f64 / SEGMENTS as f64;
            Coord {
                x: radius.mul_add(theta.cos(), cx),
                y: radius.mul_add(theta.sin(), cy),
            }
        })
        .collect();
    MultiPolygon(vec![Polygon::new(LineString::new(ring), Vec::new())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use blank_types::{cuboid, unit_cube};

    #[test]
    fn rectangular_bar_on_unit_cube_is_exact() {
        let region = SubVolume::analyze(unit_cube(), None).unwrap();
        let config = BarStockConfig::default().with_machining_offset(0.0);
        let blank = build_rectangular(&region, &config).unwrap();

        assert_relative_eq!(blank.stock_volume, 1.0, epsilon = 1e-6);
        assert_relative_eq!(blank.waste_volume, 0.0, epsilon = 1e-6);
        assert_relative_eq!(blank.build_distance, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn machining_offset_grows_every_face() {
        let region = SubVolume::analyze(cuboid(10.0, 20.0, 30.0), None).unwrap();
        let config = BarStockConfig::default().with_machining_offset(1.0);
        let blank = build_rectangular(&region, &config).unwrap();

        // Longest axis is Z (30): silhouette is the 10x20 face
        assert_relative_eq!(blank.stock_volume, 12.0 * 22.0 * 32.0, epsilon = 1e-3);
        assert_relative_eq!(blank.build_distance, 32.0, epsilon = 1e-6);
    }

    #[test]
    fn circular_bar_encloses_the_silhouette() {
        let region = SubVolume::analyze(cuboid(6.0, 8.0, 20.0), None).unwrap();
        let config = BarStockConfig::default().with_machining_offset(0.0);
        let blank = build_circular(&region, &config).unwrap();

        // Enclosing circle of the 6x8 face has radius 5
        let expected_area = std::f64::consts::PI * 25.0;
        assert_relative_eq!(blank.area_on_cutting_plane, expected_area, epsilon = 1e-3);
        assert_relative_eq!(blank.stock_volume, expected_area * 20.0, epsilon = 1e-2);
        assert!(blank.stock_volume >= blank.finish_volume);
    }

    #[test]
    fn circle_outline_area_approximates_circle() {
        let outline = circle_outline(0.0, 0.0, 10.0);
        let section = CrossSection::new(outline, 0.0);
        let analytic = std::f64::consts::PI * 100.0;
        assert!((section.area() - analytic).abs() < analytic * 0.01);
    }
}
