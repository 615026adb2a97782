//! Cross-section sweep sampling.

use crate::error::{SweepError, SweepResult};
use blank_geom::{section_polygons, silhouette, GeomError, PlaneBasis};
use blank_types::{CrossSection, Decomposition, TriMesh};
use geo::MultiPolygon;
use nalgebra::{Rotation3, Unit, Vector3};
use tracing::{debug, info};

/// How far the terminal stations are pulled inside the extent, relative to
/// the extent itself. Keeps the cutting planes off the tangent faces.
const END_NUDGE: f64 = 1e-6;

/// How many slicing attempts are made per station: the direct cut plus
/// retries with the plane tilted by 1, 2, 3 and 4 degrees.
const SLICE_ATTEMPTS: usize = 5;

/// Slice a mesh into uniformly spaced cross-sections along a direction.
///
/// Stations are laid fence-post over `ceil(extent / step)` intervals, so
/// any region with positive extent yields at least two sections, and the
/// sampled span covers the whole extent (terminal stations are nudged a
/// relative epsilon inward so tangent planes are never cut).
///
/// A station whose plane cannot be resolved is retried up to four times
/// with the plane normal tilted by a widening angular tolerance (1-4
/// degrees); the recovered section keeps its original station distance.
///
/// # Errors
///
/// - [`SweepError::InvalidStep`] for a non-positive step.
/// - [`SweepError::DegenerateRegion`] for zero extent along `direction`.
/// - [`SweepError::SliceFailure`] when a station fails all retries.
pub fn sample_sweep(
    mesh: &TriMesh,
    direction: &Vector3<f64>,
    step: f64,
) -> SweepResult<Decomposition> {
    if step <= 0.0 || !step.is_finite() {
        return Err(SweepError::InvalidStep(step));
    }
    let basis = PlaneBasis::from_direction(direction)?;
    let (min, max) = mesh
        .extent_along(direction)
        .ok_or(GeomError::EmptyMesh)?;
    let extent = max - min;
    if extent <= 0.0 {
        return Err(SweepError::DegenerateRegion);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let intervals = ((extent / step).ceil() as usize).max(1);
    let nudge = extent * END_NUDGE;

    let mut sections = Vec::with_capacity(intervals + 1);
    let mut previous = f64::NEG_INFINITY;
    for i in 0..=intervals {
        #[allow(clippy::cast_precision_loss)]
        let mut distance = (i as f64).mul_add(step, min).min(max);
        if i == 0 {
            distance = min + nudge;
        } else if i == intervals {
            distance = max - nudge;
        }
        if distance <= previous {
            continue; // a short final interval can land on the nudged end
        }
        previous = distance;

        let shape = section_with_retry(mesh, &basis, distance)?;
        sections.push(CrossSection::new(shape, distance));
    }

    info!(
        sections = sections.len(),
        extent = format!("{extent:.3}"),
        "sampled sweep decomposition"
    );

    Ok(Decomposition::new(*direction, sections)?)
}

/// Produce the single-section silhouette decomposition for processes that
/// only need the full 2-D outline along the direction.
///
/// The section sits at the mid-extent station; callers derive depth from
/// the region extent.
///
/// # Errors
///
/// Propagates [`SweepError::Geometry`] when the projection fails and
/// [`SweepError::DegenerateRegion`] for zero extent.
pub fn sample_silhouette(mesh: &TriMesh, direction: &Vector3<f64>) -> SweepResult<Decomposition> {
    let basis = PlaneBasis::from_direction(direction)?;
    let (min, max) = mesh
        .extent_along(direction)
        .ok_or(GeomError::EmptyMesh)?;
    if max - min <= 0.0 {
        return Err(SweepError::DegenerateRegion);
    }

    let outline = silhouette(mesh, &basis)?;
    let mid = (min + max) / 2.0;
    Ok(Decomposition::new(
        *direction,
        vec![CrossSection::new(outline, mid)],
    )?)
}

/// Section a station, retrying with a tilted plane when the direct cut
/// cannot close its contours.
fn section_with_retry(
    mesh: &TriMesh,
    basis: &PlaneBasis,
    distance: f64,
) -> SweepResult<MultiPolygon<f64>> {
    for attempt in 0..SLICE_ATTEMPTS {
        #[allow(clippy::cast_precision_loss)]
        let tilt_deg = attempt as f64;
        let (tilted_basis, tilted_distance) = if attempt == 0 {
            (*basis, distance)
        } else {
            let rotation =
                Rotation3::from_axis_angle(&Unit::new_normalize(basis.u), tilt_deg.to_radians());
            let tilted_normal = rotation * basis.normal;
            let tilted = PlaneBasis::from_direction(&tilted_normal)?;
            // Keep the plane anchored at the original station point
            (tilted, distance * basis.normal.dot(&tilted.normal))
        };

        match section_polygons(mesh, &tilted_basis, tilted_distance) {
            Ok(shape) => {
                if attempt > 0 {
                    debug!(distance, tilt_deg, "section recovered with tilted plane");
                }
                return Ok(shape);
            }
            Err(GeomError::OpenContour { .. }) => {}
            Err(err) => return Err(err.into()),
        }
    }

    Err(SweepError::SliceFailure {
        distance,
        attempts: SLICE_ATTEMPTS,
    })
}
