//! Blank dispatch and volume-invariant enforcement.

use crate::error::{ShapeError, ShapeResult};
use crate::region::SubVolume;
use crate::{bar, nearnet, tube, waterjet};
use blank_forge::solve_forging;
use blank_types::{Blank, BlankConfig, BlankKind, Decomposition};
use nalgebra::Vector3;
use tracing::{debug, info, warn};

/// Deficits up to this fraction of the finish volume are treated as
/// numerical noise and clamped quietly; anything larger is an anomaly.
const VOLUME_TOLERANCE: f64 = 0.05;

/// Build the stock blank estimate for a region and process kind.
///
/// Dispatches on the closed [`BlankKind`] enum — adding a process without
/// a builder arm is a compile error. Infeasible results come back as
/// blanks with `is_feasible = false`; only structural failures (degenerate
/// geometry, exhausted retries) surface as errors.
///
/// # Errors
///
/// - [`ShapeError::UnsupportedKind`] for [`BlankKind::Assembly`], which is
///   composed from member blanks by the caller.
/// - Geometry/sweep/forge errors when the underlying primitives fail for
///   the region.
pub fn build_blank(
    region: &SubVolume,
    kind: BlankKind,
    config: &BlankConfig,
) -> ShapeResult<Blank> {
    let blank = match kind {
        BlankKind::BarStockRectangular => bar::build_rectangular(region, &config.bar)?,
        BlankKind::BarStockCircular => bar::build_circular(region, &config.bar)?,
        BlankKind::WaterjetPlate => waterjet::build(region, &config.waterjet)?,
        BlankKind::HollowTube => tube::build(region, &config.tube)?,
        BlankKind::NearNetAdditive => nearnet::build(region, &config.near_net)?,
        BlankKind::ClosedDieForging => build_forging(region, config)?,
        BlankKind::Assembly => return Err(ShapeError::UnsupportedKind(kind)),
    };

    info!(
        kind = kind.as_str(),
        stock = format!("{:.1}", blank.stock_volume),
        waste = format!("{:.1}", blank.waste_volume),
        feasible = blank.is_feasible,
        "blank estimated"
    );
    Ok(blank)
}

fn build_forging(region: &SubVolume, config: &BlankConfig) -> ShapeResult<Blank> {
    let estimate = solve_forging(region.mesh(), region.candidates(), &config.forging)?;
    let is_feasible =
        estimate.stock_volume <= config.forging.max_volume_ratio * region.finish_volume();
    if !is_feasible {
        debug!(
            ratio = format!("{:.1}", estimate.stock_volume / region.finish_volume()),
            "forging volume exceeds the feasibility cutoff"
        );
    }

    let cross_sections = estimate.decomposition()?;
    Ok(assemble_blank(
        region,
        BlankParts {
            kind: BlankKind::ClosedDieForging,
            stock_volume: estimate.stock_volume,
            is_feasible,
            build_direction: estimate.direction,
            build_distance: estimate.build_distance(),
            area_on_cutting_plane: estimate.parting_area,
            perimeter_on_plane: estimate.parting_perimeter,
            cross_sections,
        },
    ))
}

/// Everything a builder determines about a blank before the shared
/// volume-invariant bookkeeping fills in the rest.
pub(crate) struct BlankParts {
    pub kind: BlankKind,
    pub stock_volume: f64,
    pub is_feasible: bool,
    pub cross_sections: Decomposition,
    pub build_direction: Vector3<f64>,
    pub build_distance: f64,
    pub area_on_cutting_plane: f64,
    pub perimeter_on_plane: f64,
}

/// Assemble the final record, enforcing `stock_volume >= finish_volume`.
///
/// A deficit within the tolerance band is clamped quietly; beyond it the
/// clamp is logged and flagged on the blank so the anomaly stays
/// observable downstream.
pub(crate) fn assemble_blank(region: &SubVolume, parts: BlankParts) -> Blank {
    let finish_volume = region.finish_volume();
    let (stock_volume, volume_clamped) = if parts.stock_volume >= finish_volume {
        (parts.stock_volume, false)
    } else {
        let deficit = (finish_volume - parts.stock_volume) / finish_volume;
        if deficit <= VOLUME_TOLERANCE {
            debug!(
                kind = parts.kind.as_str(),
                deficit = format!("{:.4}", deficit),
                "stock volume clamped to finish volume within tolerance"
            );
            (finish_volume, false)
        } else {
            warn!(
                kind = parts.kind.as_str(),
                stock = format!("{:.1}", parts.stock_volume),
                finish = format!("{:.1}", finish_volume),
                "stock volume fell below finish volume beyond tolerance; \
                 likely geometry or algorithm anomaly"
            );
            (finish_volume, true)
        }
    };

    Blank {
        kind: parts.kind,
        stock_volume,
        finish_volume,
        waste_volume: stock_volume - finish_volume,
        finish_surface_area: region.finish_surface_area(),
        is_feasible: parts.is_feasible,
        volume_clamped,
        cross_sections: parts.cross_sections,
        build_direction: parts.build_direction,
        build_distance: parts.build_distance,
        area_on_cutting_plane: parts.area_on_cutting_plane,
        perimeter_on_plane: parts.perimeter_on_plane,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use blank_types::{cuboid, unit_cube, BarStockConfig};

    fn zero_offset_config() -> BlankConfig {
        BlankConfig {
            bar: BarStockConfig::default().with_machining_offset(0.0),
            ..BlankConfig::default()
        }
    }

    #[test]
    fn unit_cube_bar_stock_has_no_waste() {
        let region = SubVolume::analyze(unit_cube(), None).unwrap();
        let blank = build_blank(
            &region,
            BlankKind::BarStockRectangular,
            &zero_offset_config(),
        )
        .unwrap();

        assert_relative_eq!(blank.stock_volume, 1.0, epsilon = 1e-6);
        assert_relative_eq!(blank.waste_volume, 0.0, epsilon = 1e-6);
        assert!(blank.is_feasible);
        assert!(!blank.volume_clamped);
    }

    #[test]
    fn assembly_is_rejected() {
        let region = SubVolume::analyze(unit_cube(), None).unwrap();
        let err = build_blank(&region, BlankKind::Assembly, &BlankConfig::default()).unwrap_err();
        assert!(matches!(err, ShapeError::UnsupportedKind(BlankKind::Assembly)));
    }

    #[test]
    fn every_estimator_kind_upholds_the_volume_invariant() {
        let region = SubVolume::analyze(cuboid(40.0, 25.0, 12.0), None).unwrap();
        let config = BlankConfig::default();

        for kind in [
            BlankKind::BarStockRectangular,
            BlankKind::BarStockCircular,
            BlankKind::WaterjetPlate,
            BlankKind::HollowTube,
            BlankKind::ClosedDieForging,
            BlankKind::NearNetAdditive,
        ] {
            let blank = build_blank(&region, kind, &config).unwrap();
            assert!(
                blank.stock_volume >= blank.finish_volume,
                "{} violated the invariant",
                kind.as_str()
            );
            assert!(blank.waste_volume >= 0.0);
        }
    }

    #[test]
    fn clamp_flags_large_deficits() {
        let region = SubVolume::analyze(unit_cube(), None).unwrap();
        let decomp = Decomposition::new(nalgebra::Vector3::z(), Vec::new()).unwrap();
        let blank = assemble_blank(
            &region,
            BlankParts {
                kind: BlankKind::BarStockRectangular,
                stock_volume: 0.5, // far below the finish volume of 1.0
                is_feasible: true,
                cross_sections: decomp,
                build_direction: nalgebra::Vector3::z(),
                build_distance: 1.0,
                area_on_cutting_plane: 1.0,
                perimeter_on_plane: 4.0,
            },
        );

        assert!(blank.volume_clamped);
        assert_relative_eq!(blank.stock_volume, 1.0);
        assert_relative_eq!(blank.waste_volume, 0.0);
    }

    #[test]
    fn clamp_is_quiet_within_tolerance() {
        let region = SubVolume::analyze(unit_cube(), None).unwrap();
        let decomp = Decomposition::new(nalgebra::Vector3::z(), Vec::new()).unwrap();
        let blank = assemble_blank(
            &region,
            BlankParts {
                kind: BlankKind::BarStockRectangular,
                stock_volume: 0.97,
                is_feasible: true,
                cross_sections: decomp,
                build_direction: nalgebra::Vector3::z(),
                build_distance: 1.0,
                area_on_cutting_plane: 1.0,
                perimeter_on_plane: 4.0,
            },
        );

        assert!(!blank.volume_clamped);
        assert_relative_eq!(blank.stock_volume, 1.0);
    }
}
