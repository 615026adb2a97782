//! Minimum-web and gutter clearance formulas.
//!
//! The web thickness curve is an externally sourced empirical fit from die
//! design references (cubic in the parting-line area, millimeters). The
//! coefficients are data, not derived behavior: revise them against the
//! source tables, do not "improve" the shape of the curve here.

/// Cubic fit coefficients for the minimum web thickness (mm) as a function
/// of the parting-line area (mm^2): `w = c0 + c1*A + c2*A^2 + c3*A^3`.
pub const MIN_WEB_COEFFS: [f64; 4] = [1.13, 8.9e-3, -1.4e-6, 1.1e-10];

/// Half of the minimum web thickness for a parting-line area.
///
/// The web is the thinnest material the dies may leave at the parting
/// plane; stations are kept half a web away on either side of it.
#[must_use]
pub fn min_web_half_thickness(area: f64) -> f64 {
    let a = area.max(0.0);
    let web = MIN_WEB_COEFFS[3]
        .mul_add(a, MIN_WEB_COEFFS[2])
        .mul_add(a, MIN_WEB_COEFFS[1])
        .mul_add(a, MIN_WEB_COEFFS[0]);
    web.max(0.0) / 2.0
}

/// Flash/gutter clearance around the parting line, a configured fraction
/// of the part depth along the forging axis.
#[must_use]
pub fn gutter_clearance(depth: f64, fraction: f64) -> f64 {
    (depth * fraction).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn half_web_at_zero_area_is_half_intercept() {
        assert_relative_eq!(min_web_half_thickness(0.0), MIN_WEB_COEFFS[0] / 2.0);
    }

    #[test]
    fn web_grows_with_small_areas() {
        let small = min_web_half_thickness(100.0);
        let large = min_web_half_thickness(2_000.0);
        assert!(large > small);
    }

    #[test]
    fn web_is_never_negative() {
        for area in [0.0, 1.0, 500.0, 5_000.0, 50_000.0, 5e6] {
            assert!(min_web_half_thickness(area) >= 0.0, "area {area}");
        }
    }

    #[test]
    fn negative_area_is_clamped() {
        assert_relative_eq!(min_web_half_thickness(-10.0), MIN_WEB_COEFFS[0] / 2.0);
    }

    #[test]
    fn gutter_scales_with_depth() {
        assert_relative_eq!(gutter_clearance(50.0, 0.04), 2.0);
        assert_relative_eq!(gutter_clearance(-1.0, 0.04), 0.0);
    }
}
