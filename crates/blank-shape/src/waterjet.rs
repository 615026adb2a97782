//! Waterjet plate builder.

use crate::dispatch::{assemble_blank, BlankParts};
use crate::error::ShapeResult;
use crate::region::SubVolume;
use blank_geom::{offset_round, GeomError};
use blank_sweep::DirectionRationale;
use blank_types::{Blank, BlankKind, CrossSection, Decomposition, MultiPolygon, WaterjetConfig};
use geo::orient::Direction;
use geo::{Orient, Polygon};
use tracing::debug;

/// The directions a plate may lie along: through the fixed cutting plane
/// or across either in-plane rectangle axis. Seed regions without a plane
/// fall back to the thinnest direction overall.
const PLATE_RATIONALES: [DirectionRationale; 3] = [
    DirectionRationale::PlaneNormal,
    DirectionRationale::InPlaneRectMajor,
    DirectionRationale::InPlaneRectMinor,
];

/// Waterjet plate: the part lies flat along its thinnest plate direction
/// and the jet cuts the offset silhouette outline out of plate stock.
pub(crate) fn build(region: &SubVolume, config: &WaterjetConfig) -> ShapeResult<Blank> {
    let (index, candidate) = region.thinnest_candidate(&PLATE_RATIONALES);
    let sil = region.silhouette_along(index)?;
    let thickness = sil.depth();

    let cut = cut_shape(&sil.outline, config)?;
    let section = CrossSection::new(cut, sil.min);
    let area = section.area();
    let perimeter = section.perimeter();
    let stock_volume = area * thickness;

    let is_feasible = thickness < config.max_plate_thickness;
    if !is_feasible {
        debug!(
            thickness,
            limit = config.max_plate_thickness,
            "plate too thick for the waterjet"
        );
    }

    let cross_sections = Decomposition::new(candidate.direction, vec![section])?;

    Ok(assemble_blank(
        region,
        BlankParts {
            kind: BlankKind::WaterjetPlate,
            stock_volume,
            is_feasible,
            cross_sections,
            build_direction: candidate.direction,
            build_distance: thickness,
            area_on_cutting_plane: area,
            perimeter_on_plane: perimeter,
        },
    ))
}

/// Build the cut outline from a part silhouette.
///
/// The outline grows outward by the cutting offset. Every hole then takes
/// a round trip through the minimum-internal-feature offset — shrunk
/// inward, regrown outward — so features the jet cannot actually cut
/// close up instead of surviving as impossible geometry. Orientation is
/// repaired on the reassembled set.
///
/// # Errors
///
/// [`GeomError::EmptyOutline`] when the grown outline vanishes, which
/// only happens on degenerate input silhouettes.
pub fn cut_shape(
    outline: &MultiPolygon<f64>,
    config: &WaterjetConfig,
) -> ShapeResult<MultiPolygon<f64>> {
    let grown = offset_round(outline, config.cutting_offset);
    if grown.0.is_empty() {
        return Err(GeomError::EmptyOutline.into());
    }

    let mut repaired = Vec::with_capacity(grown.0.len());
    for poly in &grown.0 {
        let mut holes = Vec::new();
        for ring in poly.interiors() {
            let hole = MultiPolygon(vec![
                Polygon::new(ring.clone(), Vec::new()).orient(Direction::Default)
            ]);
            let shrunk = offset_round(&hole, -config.min_feature_radius);
            if shrunk.0.is_empty() {
                debug!("hole below the minimum feature radius closed up");
                continue;
            }
            let regrown = offset_round(&shrunk, config.min_feature_radius);
            for piece in regrown.0 {
                holes.push(piece.exterior().clone());
            }
        }
        repaired.push(Polygon::new(poly.exterior().clone(), holes));
    }

    Ok(MultiPolygon(repaired).orient(Direction::Default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use blank_types::cuboid;
    use geo::{Area, Coord, LineString};

    fn plate_with_hole(hole_radius: f64) -> MultiPolygon<f64> {
        let exterior = LineString::from(vec![
            (0.0, 0.0),
            (40.0, 0.0),
            (40.0, 40.0),
            (0.0, 40.0),
        ]);
        let hole: Vec<Coord<f64>> = (0..=32)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let theta = -std::f64::consts::TAU * (i % 32) as f64 / 32.0;
                Coord {
                    x: hole_radius.mul_add(theta.cos(), 20.0),
                    y: hole_radius.mul_add(theta.sin(), 20.0),
                }
            })
            .collect();
        MultiPolygon(vec![Polygon::new(exterior, vec![LineString::new(hole)])])
    }

    fn hole_count(shape: &MultiPolygon<f64>) -> usize {
        shape.0.iter().map(|p| p.interiors().len()).sum()
    }

    #[test]
    fn large_hole_survives_the_feature_round_trip() {
        let config = WaterjetConfig::default()
            .with_cutting_offset(0.0)
            .with_min_feature_radius(2.0);
        let plate = plate_with_hole(5.0);
        let original_hole_area = 1600.0 - plate.unsigned_area();

        let cut = cut_shape(&plate, &config).unwrap();
        assert_eq!(hole_count(&cut), 1);

        let hole_area = 1600.0 - cut.unsigned_area();
        assert_relative_eq!(
            hole_area,
            original_hole_area,
            epsilon = original_hole_area * 0.02
        );
    }

    #[test]
    fn small_hole_closes() {
        let config = WaterjetConfig::default()
            .with_cutting_offset(0.0)
            .with_min_feature_radius(2.0);
        let plate = plate_with_hole(1.5);

        let cut = cut_shape(&plate, &config).unwrap();
        assert_eq!(hole_count(&cut), 0);
        assert_relative_eq!(cut.unsigned_area(), 1600.0, epsilon = 1.0);
    }

    #[test]
    fn cutting_offset_grows_the_outline() {
        let config = WaterjetConfig::default()
            .with_cutting_offset(1.0)
            .with_min_feature_radius(2.0);
        let plate = plate_with_hole(5.0);
        let cut = cut_shape(&plate, &config).unwrap();
        assert!(cut.unsigned_area() > plate.unsigned_area());
    }

    #[test]
    fn thin_plate_is_feasible() {
        let region = SubVolume::analyze(cuboid(60.0, 40.0, 10.0), None).unwrap();
        let blank = build(&region, &WaterjetConfig::default()).unwrap();

        assert!(blank.is_feasible);
        assert_relative_eq!(blank.build_distance, 10.0, epsilon = 1e-6);
        assert!(blank.stock_volume >= blank.finish_volume);
    }

    #[test]
    fn overthick_plate_is_infeasible() {
        // 120mm thinnest dimension exceeds the 4 inch (101.6mm) rule
        let region = SubVolume::analyze(cuboid(200.0, 150.0, 120.0), None).unwrap();
        let blank = build(&region, &WaterjetConfig::default()).unwrap();

        assert!(!blank.is_feasible);
        // An infeasible blank still carries a usable pessimistic estimate
        assert!(blank.stock_volume >= blank.finish_volume);
    }
}
