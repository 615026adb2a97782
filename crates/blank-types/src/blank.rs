//! The stock blank estimate produced per manufacturing process.

use crate::section::Decomposition;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Manufacturing process family a blank is estimated for.
///
/// This is a closed enum: adding or removing a process is a compile-time
/// checked change everywhere a blank is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlankKind {
    /// Sawn rectangular bar stock.
    BarStockRectangular,
    /// Sawn round bar stock.
    BarStockCircular,
    /// Plate cut on a waterjet table.
    WaterjetPlate,
    /// Hollow tube / pipe stock.
    HollowTube,
    /// Closed-die forging.
    ClosedDieForging,
    /// Near-net wire deposition on a substrate plate.
    NearNetAdditive,
    /// Multi-part assembly; composed from member blanks, never estimated
    /// directly.
    Assembly,
}

impl BlankKind {
    /// Human-readable process name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BarStockRectangular => "rectangular bar stock",
            Self::BarStockCircular => "circular bar stock",
            Self::WaterjetPlate => "waterjet plate",
            Self::HollowTube => "hollow tube",
            Self::ClosedDieForging => "closed-die forging",
            Self::NearNetAdditive => "near-net additive",
            Self::Assembly => "assembly",
        }
    }

    /// Whether this kind has a stock estimator of its own.
    #[must_use]
    pub const fn has_estimator(&self) -> bool {
        !matches!(self, Self::Assembly)
    }
}

/// A completed stock-shape estimate for one (mesh region, process) pair.
///
/// Immutable after construction. The invariant `stock_volume >=
/// finish_volume` always holds on the stored values: estimates that came in
/// below the finish volume are clamped, and clamps beyond the 5% tolerance
/// band are surfaced through [`Blank::volume_clamped`] (and a `warn!` log at
/// the point of clamping) rather than silently corrected.
///
/// An infeasible blank (`is_feasible == false`) is a first-class result,
/// not an error: downstream cost evaluation skips it.
#[derive(Debug, Clone)]
pub struct Blank {
    /// Process family this estimate is for.
    pub kind: BlankKind,
    /// Raw stock volume.
    pub stock_volume: f64,
    /// Exact volume of the finished part (mesh volume).
    pub finish_volume: f64,
    /// `stock_volume - finish_volume`.
    pub waste_volume: f64,
    /// Surface area of the finished part, consumed by downstream cost
    /// models alongside the volumes.
    pub finish_surface_area: f64,
    /// Whether the process can actually produce this part.
    pub is_feasible: bool,
    /// Set when the stock volume had to be clamped to the finish volume
    /// beyond the tolerance band (likely geometry or algorithm anomaly).
    pub volume_clamped: bool,
    /// The stock outline(s) along the build direction.
    pub cross_sections: Decomposition,
    /// Direction the stock is built / cut / forged along.
    pub build_direction: Vector3<f64>,
    /// Stock depth along the build direction.
    pub build_distance: f64,
    /// Net outline area on the primary cutting plane.
    pub area_on_cutting_plane: f64,
    /// Outline perimeter on the primary cutting plane.
    pub perimeter_on_plane: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(BlankKind::WaterjetPlate.as_str(), "waterjet plate");
        assert_eq!(BlankKind::ClosedDieForging.as_str(), "closed-die forging");
    }

    #[test]
    fn assembly_has_no_estimator() {
        assert!(!BlankKind::Assembly.has_estimator());
        assert!(BlankKind::BarStockCircular.has_estimator());
        assert!(BlankKind::NearNetAdditive.has_estimator());
    }

    #[test]
    fn kind_equality_and_hash() {
        use std::collections::HashSet;
        let kinds: HashSet<BlankKind> = [
            BlankKind::BarStockRectangular,
            BlankKind::BarStockCircular,
            BlankKind::WaterjetPlate,
            BlankKind::HollowTube,
            BlankKind::ClosedDieForging,
            BlankKind::NearNetAdditive,
            BlankKind::Assembly,
        ]
        .into_iter()
        .collect();
        assert_eq!(kinds.len(), 7);
    }
}
