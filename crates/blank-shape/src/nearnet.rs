//! Near-net wire deposition builder.

use crate::dispatch::{assemble_blank, BlankParts};
use crate::error::ShapeResult;
use crate::region::SubVolume;
use blank_geom::{offset_round, GeomError};
use blank_types::{Blank, BlankKind, CrossSection, Decomposition, NearNetConfig};

/// Near-net deposition: the part is built up along its thinnest direction
/// inside an outline grown by the wire placement tolerance, on top of a
/// substrate plate of the same outline. The substrate is machined away, so
/// waste covers deposit and substrate beyond the finish volume.
pub(crate) fn build(region: &SubVolume, config: &NearNetConfig) -> ShapeResult<Blank> {
    let (index, candidate) = region.thinnest_candidate(&[]);
    let sil = region.silhouette_along(index)?;
    let depth = sil.depth();

    let outline = offset_round(&sil.outline, config.wire_tolerance);
    if outline.0.is_empty() {
        return Err(GeomError::EmptyOutline.into());
    }

    let section = CrossSection::new(outline, sil.min);
    let area = section.area();
    let perimeter = section.perimeter();

    let deposit_volume = area * depth;
    let substrate_volume = area * config.substrate_thickness;
    let stock_volume = deposit_volume + substrate_volume;

    let cross_sections = Decomposition::new(candidate.direction, vec![section])?;

    Ok(assemble_blank(
        region,
        BlankParts {
            kind: BlankKind::NearNetAdditive,
            stock_volume,
            is_feasible: true,
            cross_sections,
            build_direction: candidate.direction,
            build_distance: depth,
            area_on_cutting_plane: area,
            perimeter_on_plane: perimeter,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use blank_types::cuboid;

    #[test]
    fn waste_includes_the_substrate() {
        let region = SubVolume::analyze(cuboid(30.0, 20.0, 8.0), None).unwrap();
        let config = NearNetConfig::default()
            .with_wire_tolerance(0.0)
            .with_substrate_thickness(10.0);
        let blank = build(&region, &config).unwrap();

        // Deposit equals the part; waste is exactly the substrate plate
        assert_relative_eq!(blank.waste_volume, 600.0 * 10.0, epsilon = 10.0);
        assert_relative_eq!(blank.build_distance, 8.0, epsilon = 1e-6);
    }

    #[test]
    fn wire_tolerance_grows_the_outline() {
        let region = SubVolume::analyze(cuboid(30.0, 20.0, 8.0), None).unwrap();
        let tight = build(&region, &NearNetConfig::default().with_wire_tolerance(0.1)).unwrap();
        let loose = build(&region, &NearNetConfig::default().with_wire_tolerance(2.0)).unwrap();
        assert!(loose.stock_volume > tight.stock_volume);
        assert!(loose.area_on_cutting_plane > tight.area_on_cutting_plane);
    }

    #[test]
    fn stock_always_covers_finish() {
        let region = SubVolume::analyze(cuboid(15.0, 15.0, 5.0), None).unwrap();
        let blank = build(&region, &NearNetConfig::default()).unwrap();
        assert!(blank.stock_volume >= blank.finish_volume);
        assert!(blank.is_feasible);
    }
}
