//! Per-process configuration.
//!
//! All tunables and business-rule thresholds live here as immutable
//! structs passed into every builder call. Defaults assume millimeters.

use serde::{Deserialize, Serialize};

/// One inch in millimeters, used by imperial business-rule defaults.
pub(crate) const INCH: f64 = 25.4;

/// Parameters for sawn bar stock (rectangular and circular).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarStockConfig {
    /// Machining allowance added to every face of the stock, in mm.
    pub machining_offset: f64,
}

impl Default for BarStockConfig {
    fn default() -> Self {
        Self {
            machining_offset: 1.5,
        }
    }
}

impl BarStockConfig {
    /// Set the per-face machining allowance.
    #[must_use]
    pub const fn with_machining_offset(mut self, offset: f64) -> Self {
        self.machining_offset = offset;
        self
    }
}

/// Parameters for waterjet-cut plate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterjetConfig {
    /// Outward offset applied to the cut outline for the jet kerf and
    /// finishing allowance, in mm.
    pub cutting_offset: f64,
    /// Smallest internal feature radius the jet can cut, in mm. Holes
    /// narrower than this close up in the stock outline.
    pub min_feature_radius: f64,
    /// Maximum plate thickness the process can cut, in mm.
    /// Business rule: 4 inches.
    pub max_plate_thickness: f64,
}

impl Default for WaterjetConfig {
    fn default() -> Self {
        Self {
            cutting_offset: 1.0,
            min_feature_radius: 2.0,
            max_plate_thickness: 4.0 * INCH,
        }
    }
}

impl WaterjetConfig {
    /// Set the outline cutting offset.
    #[must_use]
    pub const fn with_cutting_offset(mut self, offset: f64) -> Self {
        self.cutting_offset = offset;
        self
    }

    /// Set the minimum internal feature radius.
    #[must_use]
    pub const fn with_min_feature_radius(mut self, radius: f64) -> Self {
        self.min_feature_radius = radius;
        self
    }

    /// Set the maximum cuttable plate thickness.
    #[must_use]
    pub const fn with_max_plate_thickness(mut self, thickness: f64) -> Self {
        self.max_plate_thickness = thickness;
        self
    }
}

/// Parameters for hollow tube stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TubeConfig {
    /// Radial machining allowance applied outward to the outer diameter
    /// and inward to the bore, in mm.
    pub radial_offset: f64,
    /// Smallest stocked outer diameter, in mm.
    pub min_outer_diameter: f64,
    /// Largest stocked outer diameter, in mm.
    pub max_outer_diameter: f64,
    /// Maximum outer-diameter to wall-thickness ratio before the tube is
    /// too thin-walled to stock.
    pub max_diameter_wall_ratio: f64,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            radial_offset: 1.5,
            min_outer_diameter: 10.0,
            max_outer_diameter: 500.0,
            max_diameter_wall_ratio: 50.0,
        }
    }
}

impl TubeConfig {
    /// Set the radial machining allowance.
    #[must_use]
    pub const fn with_radial_offset(mut self, offset: f64) -> Self {
        self.radial_offset = offset;
        self
    }

    /// Set the stocked outer diameter range.
    #[must_use]
    pub const fn with_diameter_range(mut self, min: f64, max: f64) -> Self {
        self.min_outer_diameter = min;
        self.max_outer_diameter = max;
        self
    }

    /// Set the maximum diameter to wall ratio.
    #[must_use]
    pub const fn with_max_diameter_wall_ratio(mut self, ratio: f64) -> Self {
        self.max_diameter_wall_ratio = ratio;
        self
    }
}

/// Parameters for near-net wire deposition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearNetConfig {
    /// Outward outline offset covering wire placement accuracy, in mm.
    pub wire_tolerance: f64,
    /// Thickness of the substrate plate the part is deposited onto, in mm.
    pub substrate_thickness: f64,
}

impl Default for NearNetConfig {
    fn default() -> Self {
        Self {
            wire_tolerance: 1.2,
            substrate_thickness: 12.0,
        }
    }
}

impl NearNetConfig {
    /// Set the wire placement tolerance.
    #[must_use]
    pub const fn with_wire_tolerance(mut self, tolerance: f64) -> Self {
        self.wire_tolerance = tolerance;
        self
    }

    /// Set the substrate plate thickness.
    #[must_use]
    pub const fn with_substrate_thickness(mut self, thickness: f64) -> Self {
        self.substrate_thickness = thickness;
        self
    }
}

/// Parameters for closed-die forging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgingConfig {
    /// Die wall draft angle in degrees.
    pub draft_angle_deg: f64,
    /// Cover material added beyond the part along the die closing axis
    /// (per side), in mm.
    pub top_cover: f64,
    /// Cover material added around each cross-section, in mm.
    pub side_cover: f64,
    /// Minimum number of sweep intervals per candidate direction.
    pub min_slices: usize,
    /// Flash/gutter clearance as a fraction of the part depth along the
    /// forging direction.
    pub gutter_fraction: f64,
    /// Stock volumes above this multiple of the finish volume mark the
    /// forging infeasible. Business rule: 100x.
    pub max_volume_ratio: f64,
    /// How many length-ranked candidate directions to evaluate (1-3).
    pub directions_to_try: usize,
}

impl Default for ForgingConfig {
    fn default() -> Self {
        Self {
            draft_angle_deg: 7.0,
            top_cover: 2.5,
            side_cover: 3.0,
            min_slices: 8,
            gutter_fraction: 0.04,
            max_volume_ratio: 100.0,
            directions_to_try: 2,
        }
    }
}

impl ForgingConfig {
    /// Set the die draft angle in degrees.
    #[must_use]
    pub const fn with_draft_angle_deg(mut self, angle: f64) -> Self {
        self.draft_angle_deg = angle;
        self
    }

    /// Set the axial and radial cover distances.
    #[must_use]
    pub const fn with_covers(mut self, top: f64, side: f64) -> Self {
        self.top_cover = top;
        self.side_cover = side;
        self
    }

    /// Set the minimum sweep interval count.
    #[must_use]
    pub const fn with_min_slices(mut self, slices: usize) -> Self {
        self.min_slices = slices;
        self
    }

    /// Set the gutter clearance fraction.
    #[must_use]
    pub const fn with_gutter_fraction(mut self, fraction: f64) -> Self {
        self.gutter_fraction = fraction;
        self
    }

    /// Set the number of candidate directions to evaluate (clamped to 1-3
    /// by the solver).
    #[must_use]
    pub const fn with_directions_to_try(mut self, count: usize) -> Self {
        self.directions_to_try = count;
        self
    }
}

/// Aggregate configuration passed into the blank dispatcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlankConfig {
    /// Bar stock parameters.
    pub bar: BarStockConfig,
    /// Waterjet plate parameters.
    pub waterjet: WaterjetConfig,
    /// Hollow tube parameters.
    pub tube: TubeConfig,
    /// Near-net deposition parameters.
    pub near_net: NearNetConfig,
    /// Closed-die forging parameters.
    pub forging: ForgingConfig,
}
