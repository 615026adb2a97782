//! Parting-line location and forging volume reconstruction.

use crate::error::{ForgeError, ForgeResult};
use crate::flash::{gutter_clearance, min_web_half_thickness};
use crate::search::golden_section_min;
use blank_geom::{offset_miter, offset_round};
use blank_sweep::{sample_sweep, DirectionCandidate};
use blank_types::{CrossSection, Decomposition, ForgingConfig, ForgingSection, TriMesh};
use geo::{Area, BooleanOps, MultiPolygon};
use nalgebra::Vector3;
use tracing::{debug, info};

/// Relative tolerance of the parting-line search bracket.
const SEARCH_TOL: f64 = 1e-4;

/// Iteration cap for the parting-line search; the tolerance terminates far
/// earlier on realistic brackets.
const SEARCH_MAX_ITER: usize = 64;

/// The winning forging estimate for one mesh region.
#[derive(Debug, Clone)]
pub struct ForgingEstimate {
    /// Die closing axis the estimate was built along.
    pub direction: Vector3<f64>,
    /// Assembled stock stations, ascending in distance.
    pub stations: Vec<ForgingSection>,
    /// Reconstructed stock volume.
    pub stock_volume: f64,
    /// Parting-line distance along the axis.
    pub parting_distance: f64,
    /// Net area of the parting-line outline.
    pub parting_area: f64,
    /// Perimeter of the parting-line outline.
    pub parting_perimeter: f64,
}

impl ForgingEstimate {
    /// The assembled stations as an ordered decomposition.
    ///
    /// # Errors
    ///
    /// Propagates the ordering error if station distances collided, which
    /// the assembly pass prevents.
    pub fn decomposition(&self) -> ForgeResult<Decomposition> {
        let sections = self
            .stations
            .iter()
            .map(|s| CrossSection::new(s.shape.clone(), s.distance))
            .collect();
        Ok(Decomposition::new(self.direction, sections)?)
    }

    /// Distance from the first to the last station.
    #[must_use]
    pub fn build_distance(&self) -> f64 {
        match (self.stations.first(), self.stations.last()) {
            (Some(first), Some(last)) => last.distance - first.distance,
            _ => 0.0,
        }
    }
}

/// Estimate the forging stock for a region, trying the ranked candidate
/// directions and keeping the smallest reconstructed volume.
///
/// Candidates are ranked by ascending extent; the configured number of
/// directions (clamped to 1-3) is evaluated. A direction that fails is
/// logged and skipped — sibling directions still get their chance.
///
/// # Errors
///
/// [`ForgeError::NoViableDirection`] when every evaluated direction was
/// rejected.
pub fn solve_forging(
    mesh: &TriMesh,
    candidates: &[DirectionCandidate],
    config: &ForgingConfig,
) -> ForgeResult<ForgingEstimate> {
    let mut ranked: Vec<DirectionCandidate> = candidates.to_vec();
    ranked.sort_by(|a, b| a.extent.total_cmp(&b.extent));
    let tries = config.directions_to_try.clamp(1, 3).min(ranked.len());

    let mut best: Option<ForgingEstimate> = None;
    for candidate in &ranked[..tries] {
        match estimate_direction(mesh, candidate, config) {
            Ok(estimate) => {
                debug!(
                    volume = format!("{:.1}", estimate.stock_volume),
                    rationale = ?candidate.rationale,
                    "forging direction evaluated"
                );
                if best
                    .as_ref()
                    .is_none_or(|b| estimate.stock_volume < b.stock_volume)
                {
                    best = Some(estimate);
                }
            }
            Err(err) => {
                debug!(%err, rationale = ?candidate.rationale, "forging direction rejected");
            }
        }
    }

    let estimate = best.ok_or(ForgeError::NoViableDirection)?;
    info!(
        volume = format!("{:.1}", estimate.stock_volume),
        parting = format!("{:.2}", estimate.parting_distance),
        stations = estimate.stations.len(),
        "forging estimate selected"
    );
    Ok(estimate)
}

/// Run the full parting-line pipeline along one candidate direction.
fn estimate_direction(
    mesh: &TriMesh,
    candidate: &DirectionCandidate,
    config: &ForgingConfig,
) -> ForgeResult<ForgingEstimate> {
    let extent = candidate.extent;
    if extent < 2.0 * config.top_cover {
        return Err(ForgeError::ExtentBelowCover {
            extent,
            top_cover: config.top_cover,
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let step = extent / (config.min_slices.max(2) as f64);
    let decomp = sample_sweep(mesh, &candidate.direction, step)?;

    // Cover-offset decompositions: forward shifts the sections toward the
    // bottom die, reverse toward the top die, both grown radially.
    let mut forward: Vec<(f64, MultiPolygon<f64>)> = Vec::with_capacity(decomp.len());
    for section in decomp.sections() {
        if section.is_empty() {
            continue;
        }
        let grown = offset_round(&section.shape, config.side_cover);
        if grown.0.is_empty() {
            debug!(
                distance = section.distance,
                "side cover offset dropped a section"
            );
            continue;
        }
        forward.push((section.distance - config.top_cover, grown));
    }
    if forward.len() < 2 {
        return Err(ForgeError::InsufficientSections {
            count: forward.len(),
        });
    }
    let reverse: Vec<(f64, MultiPolygon<f64>)> = forward
        .iter()
        .rev()
        .map(|(d, shape)| (d + 2.0 * config.top_cover, shape.clone()))
        .collect();

    let tan_draft = config.draft_angle_deg.to_radians().tan();
    let forward_walk = drafted_union_walk(&forward, tan_draft);
    let reverse_walk = drafted_union_walk(&reverse, tan_draft);

    let (left_x, forward_shape) = last_contributing(&forward_walk);
    let (right_x, reverse_shape) = last_contributing(&reverse_walk);

    // Balance the two growth fronts between the last-growth bounds.
    let (lo, hi) = if left_x <= right_x {
        (left_x, right_x)
    } else {
        (right_x, left_x)
    };
    let tiny = extent * 1e-9;
    let parting_distance = if hi - lo <= tiny {
        lo
    } else {
        golden_section_min(
            |x| {
                let fwd = drafted_area(forward_shape, tan_draft * (x - left_x).max(0.0));
                let rev = drafted_area(reverse_shape, tan_draft * (right_x - x).max(0.0));
                (rev - fwd).abs()
            },
            lo,
            hi,
            SEARCH_TOL,
            SEARCH_MAX_ITER,
        )
    };

    let forward_at_parting = draft_shape(
        forward_shape,
        tan_draft * (parting_distance - left_x).max(0.0),
    );
    let reverse_at_parting = draft_shape(
        reverse_shape,
        tan_draft * (right_x - parting_distance).max(0.0),
    );
    let parting_raw = forward_at_parting.union(&reverse_at_parting);

    let half_web = min_web_half_thickness(parting_raw.unsigned_area()).min(extent * 0.25);
    let clearance = gutter_clearance(extent, config.gutter_fraction);
    let parting = smooth_parting(&parting_raw, clearance);

    let stations = assemble_stations(
        &forward_walk,
        &reverse_walk,
        parting_distance,
        half_web,
        parting,
        tan_draft,
    );

    let stock_volume = trapezoid_volume(&stations)?;

    let parting_section = CrossSection::new(
        stations
            .iter()
            .min_by(|a, b| {
                (a.distance - parting_distance)
                    .abs()
                    .total_cmp(&(b.distance - parting_distance).abs())
            })
            .map(|s| s.shape.clone())
            .unwrap_or_else(|| MultiPolygon(Vec::new())),
        parting_distance,
    );

    Ok(ForgingEstimate {
        direction: candidate.direction,
        parting_area: parting_section.area(),
        parting_perimeter: parting_section.perimeter(),
        stations,
        stock_volume,
        parting_distance,
    })
}

/// Walk a decomposition maintaining the running drafted union.
///
/// Before each new section merges in, the accumulated shape grows by the
/// draft operator (miter offset by `tan(draft) x Δdistance`) so the walls
/// it implies stay releasable from the die. A failed draft offset keeps
/// the undrafted shape — the contribution is degraded, not fatal.
fn drafted_union_walk(
    sections: &[(f64, MultiPolygon<f64>)],
    tan_draft: f64,
) -> Vec<ForgingSection> {
    let mut stations = Vec::with_capacity(sections.len());
    let mut merged: Option<MultiPolygon<f64>> = None;
    let mut previous_distance = 0.0;

    for (distance, shape) in sections {
        let (next, contributing) = match merged.take() {
            None => (shape.clone(), true),
            Some(accumulated) => {
                let delta = (distance - previous_distance).abs();
                let drafted = match offset_miter(&accumulated, tan_draft * delta) {
                    Ok(shape) => shape,
                    Err(err) => {
                        debug!(%err, distance, "draft offset failed; continuing undrafted");
                        accumulated
                    }
                };
                let area_before = drafted.unsigned_area();
                let union = drafted.union(shape);
                let grew = union.unsigned_area() > area_before.mul_add(1.0 + 1e-9, 1e-12);
                (union, grew)
            }
        };

        stations.push(ForgingSection::new(*distance, next.clone(), contributing));
        merged = Some(next);
        previous_distance = *distance;
    }

    stations
}

/// The distance and merged shape of the last station that grew the union.
fn last_contributing(walk: &[ForgingSection]) -> (f64, &MultiPolygon<f64>) {
    let mut pick = 0;
    for (i, station) in walk.iter().enumerate() {
        if station.contributing {
            pick = i;
        }
    }
    (walk[pick].distance, &walk[pick].shape)
}

fn drafted_area(shape: &MultiPolygon<f64>, distance: f64) -> f64 {
    if distance <= 0.0 {
        return shape.unsigned_area();
    }
    offset_miter(shape, distance).map_or_else(|_| shape.unsigned_area(), |s| s.unsigned_area())
}

fn draft_shape(shape: &MultiPolygon<f64>, distance: f64) -> MultiPolygon<f64> {
    if distance <= 0.0 {
        return shape.clone();
    }
    match offset_miter(shape, distance) {
        Ok(drafted) => drafted,
        Err(err) => {
            debug!(%err, "draft to parting failed; using undrafted shape");
            shape.clone()
        }
    }
}

/// Smooth local concavities of the parting outline with a miter round-trip
/// (grow then shrink by the gutter clearance).
fn smooth_parting(raw: &MultiPolygon<f64>, clearance: f64) -> MultiPolygon<f64> {
    if clearance <= 0.0 {
        return raw.clone();
    }
    match offset_miter(raw, clearance).and_then(|grown| offset_miter(&grown, -clearance)) {
        Ok(smoothed) if !smoothed.0.is_empty() => smoothed,
        Ok(_) | Err(_) => {
            debug!(clearance, "gutter smoothing degenerated; keeping raw parting outline");
            raw.clone()
        }
    }
}

/// Assemble the final station list: forward stations below the web, the
/// web and parting stations, then reverse stations above the web.
fn assemble_stations(
    forward_walk: &[ForgingSection],
    reverse_walk: &[ForgingSection],
    parting_distance: f64,
    half_web: f64,
    parting: MultiPolygon<f64>,
    tan_draft: f64,
) -> Vec<ForgingSection> {
    let station_min = forward_walk.first().map_or(0.0, |s| s.distance);
    let station_max = reverse_walk.first().map_or(0.0, |s| s.distance);
    let web_lo = (parting_distance - half_web).clamp(station_min, parting_distance);
    let web_hi = (parting_distance + half_web).clamp(parting_distance, station_max);

    let span = (station_max - station_min).abs();
    let merge_eps = span * 1e-9;

    let mut stations: Vec<ForgingSection> = Vec::new();

    // Bottom-die stations strictly below the web
    let mut anchor_low: Option<&ForgingSection> = None;
    for station in forward_walk {
        if station.distance <= web_lo + merge_eps {
            anchor_low = Some(station);
        }
        if station.distance < web_lo - merge_eps {
            stations.push(station.clone());
        }
    }
    let web_lo_shape = anchor_low.map_or_else(
        || parting.clone(),
        |anchor| draft_shape(&anchor.shape, tan_draft * (web_lo - anchor.distance).max(0.0)),
    );
    stations.push(ForgingSection::new(web_lo, web_lo_shape, false));

    stations.push(ForgingSection::new(parting_distance, parting, false));

    // Top-die anchor: the lowest reverse station at or above the web
    let mut anchor_high: Option<&ForgingSection> = None;
    for station in reverse_walk {
        if station.distance >= web_hi - merge_eps {
            anchor_high = Some(station);
        }
    }
    let web_hi_shape = anchor_high.map_or_else(
        || stations[stations.len() - 1].shape.clone(),
        |anchor| draft_shape(&anchor.shape, tan_draft * (anchor.distance - web_hi).max(0.0)),
    );
    stations.push(ForgingSection::new(web_hi, web_hi_shape, false));

    // Top-die stations strictly above the web, ascending
    let mut upper: Vec<ForgingSection> = reverse_walk
        .iter()
        .filter(|s| s.distance > web_hi + merge_eps)
        .cloned()
        .collect();
    upper.reverse();
    stations.extend(upper);

    // Collapse stations that landed on the same distance; keep the first
    let mut deduped: Vec<ForgingSection> = Vec::with_capacity(stations.len());
    for station in stations {
        match deduped.last() {
            Some(last) if station.distance <= last.distance + merge_eps => {}
            _ => deduped.push(station),
        }
    }
    deduped
}

/// Trapezoidal volume over unequally spaced stations.
fn trapezoid_volume(stations: &[ForgingSection]) -> ForgeResult<f64> {
    let mut volume = 0.0;
    for (index, pair) in stations.windows(2).enumerate() {
        let delta = pair[1].distance - pair[0].distance;
        if delta < 0.0 {
            return Err(ForgeError::NonMonotonicStations {
                index: index + 1,
                delta,
            });
        }
        volume += delta * (pair[0].area + pair[1].area) / 2.0;
    }
    Ok(volume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use blank_sweep::candidate_directions;
    use blank_types::{cuboid, uv_sphere};
    use geo::polygon;

    fn square_at(side: f64, distance: f64) -> (f64, MultiPolygon<f64>) {
        (
            distance,
            MultiPolygon(vec![polygon![
                (x: 0.0, y: 0.0),
                (x: side, y: 0.0),
                (x: side, y: side),
                (x: 0.0, y: side),
            ]]),
        )
    }

    #[test]
    fn walk_marks_growth() {
        let sections = vec![square_at(1.0, 0.0), square_at(1.0, 1.0), square_at(3.0, 2.0)];
        let walk = drafted_union_walk(&sections, 0.0);

        assert!(walk[0].contributing);
        assert!(!walk[1].contributing);
        assert!(walk[2].contributing);
        assert_relative_eq!(walk[2].area, 9.0, epsilon = 1e-9);
    }

    #[test]
    fn walk_applies_draft_growth() {
        // 45 degree draft over a unit step grows the square by 1 per side
        let sections = vec![square_at(2.0, 0.0), square_at(2.0, 1.0)];
        let walk = drafted_union_walk(&sections, 1.0);

        assert_relative_eq!(walk[1].area, 16.0, epsilon = 1e-9);
        // The drafted union swallowed the repeated section
        assert!(!walk[1].contributing);
    }

    #[test]
    fn last_contributing_finds_growth_front() {
        let sections = vec![square_at(2.0, 0.0), square_at(1.0, 1.0), square_at(1.0, 2.0)];
        let walk = drafted_union_walk(&sections, 0.0);
        let (distance, shape) = last_contributing(&walk);
        assert_relative_eq!(distance, 0.0);
        assert_relative_eq!(shape.unsigned_area(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_forging_of_cube_matches_volume() {
        // Flat-sided part, no draft, no covers: the stock is the part
        let cube = cuboid(2.0, 2.0, 2.0);
        let candidates = candidate_directions(&cube, None).unwrap();
        let config = ForgingConfig::default()
            .with_draft_angle_deg(0.0)
            .with_covers(0.0, 0.0)
            .with_min_slices(4)
            .with_gutter_fraction(0.0);

        let estimate = solve_forging(&cube, &candidates, &config).unwrap();
        assert_relative_eq!(estimate.stock_volume, 8.0, epsilon = 8.0 * 0.05);
    }

    #[test]
    fn covers_and_draft_grow_the_stock() {
        let cube = cuboid(20.0, 20.0, 20.0);
        let candidates = candidate_directions(&cube, None).unwrap();
        let config = ForgingConfig::default();

        let estimate = solve_forging(&cube, &candidates, &config).unwrap();
        assert!(estimate.stock_volume > cube.volume());
    }

    #[test]
    fn sphere_parting_line_sits_at_equator() {
        let sphere = uv_sphere(10.0, 16, 32);
        let candidates = candidate_directions(&sphere, None).unwrap();
        let config = ForgingConfig::default()
            .with_covers(1.0, 1.0)
            .with_min_slices(12);

        let estimate = solve_forging(&sphere, &candidates, &config).unwrap();
        // Symmetric part: the balanced parting line is near the center
        assert!(estimate.parting_distance.abs() < 2.0);
        assert!(estimate.stock_volume > sphere.volume());
    }

    #[test]
    fn short_axis_is_rejected() {
        let thin = cuboid(50.0, 50.0, 1.0);
        let candidates = candidate_directions(&thin, None).unwrap();
        // Top cover of 2.5 on a 1mm extent rejects the thin axis, and with a
        // single direction to try there is nothing left
        let config = ForgingConfig::default().with_directions_to_try(1);
        let result = solve_forging(&thin, &candidates, &config);
        assert!(matches!(result, Err(ForgeError::NoViableDirection)));
    }

    #[test]
    fn stations_are_ordered() {
        let cube = cuboid(10.0, 12.0, 14.0);
        let candidates = candidate_directions(&cube, None).unwrap();
        let estimate = solve_forging(&cube, &candidates, &ForgingConfig::default()).unwrap();
        for pair in estimate.stations.windows(2) {
            assert!(pair[1].distance > pair[0].distance);
        }
        // And the assembled stations form a valid decomposition
        assert!(estimate.decomposition().is_ok());
    }

    #[test]
    fn trapezoid_rejects_backwards_stations() {
        let stations = vec![
            ForgingSection::new(0.0, square_at(1.0, 0.0).1, true),
            ForgingSection::new(-1.0, square_at(1.0, 0.0).1, false),
        ];
        assert!(matches!(
            trapezoid_volume(&stations),
            Err(ForgeError::NonMonotonicStations { .. })
        ));
    }
}
