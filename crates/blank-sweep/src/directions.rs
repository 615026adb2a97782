//! Candidate sweep direction selection.

use crate::error::{SweepError, SweepResult};
use blank_geom::{pca_obb, silhouette, PlaneBasis};
use blank_types::TriMesh;
use geo::MinimumRotatedRect;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Why a candidate direction was proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectionRationale {
    /// Thinnest axis of the oriented bounding frame.
    ObbSmallest,
    /// Middle axis of the oriented bounding frame.
    ObbMiddle,
    /// Longest axis of the oriented bounding frame.
    ObbLargest,
    /// The fixed cutting-plane normal of the region.
    PlaneNormal,
    /// Long axis of the in-plane minimum bounding rectangle.
    InPlaneRectMajor,
    /// Short axis of the in-plane minimum bounding rectangle.
    InPlaneRectMinor,
}

/// A candidate sweep direction with its physical rationale.
#[derive(Debug, Clone, Copy)]
pub struct DirectionCandidate {
    /// Unit direction.
    pub direction: Vector3<f64>,
    /// Why this direction was proposed.
    pub rationale: DirectionRationale,
    /// Mesh extent along the direction.
    pub extent: f64,
}

/// Derive 3-6 candidate sweep directions for a mesh region.
///
/// The fixed plane normal (absent only for the seed region) leads the
/// list, followed by the bounding-frame axes and, when a normal is given,
/// the two in-plane bounding-rectangle axes. Near-parallel duplicates keep
/// only their first (highest-priority) rationale.
///
/// Pure function of the mesh's bounding geometry.
///
/// # Errors
///
/// [`SweepError::DegenerateRegion`] when the bounding frame has zero
/// volume.
pub fn candidate_directions(
    mesh: &TriMesh,
    plane_normal: Option<&Vector3<f64>>,
) -> SweepResult<Vec<DirectionCandidate>> {
    let obb = pca_obb(mesh)?;
    if obb.extents[2] <= 0.0 || obb.extents[0] < obb.extents[2] * 1e-9 {
        return Err(SweepError::DegenerateRegion);
    }

    let mut raw: Vec<(Vector3<f64>, DirectionRationale)> = Vec::with_capacity(6);

    if let Some(normal) = plane_normal {
        let norm = normal.norm();
        if norm < 1e-12 {
            return Err(SweepError::DegenerateRegion);
        }
        raw.push((normal / norm, DirectionRationale::PlaneNormal));
    }

    raw.push((obb.smallest_axis(), DirectionRationale::ObbSmallest));
    raw.push((obb.middle_axis(), DirectionRationale::ObbMiddle));
    raw.push((obb.largest_axis(), DirectionRationale::ObbLargest));

    if let Some(normal) = plane_normal {
        match in_plane_rect_axes(mesh, normal) {
            Ok(Some((major, minor))) => {
                raw.push((major, DirectionRationale::InPlaneRectMajor));
                raw.push((minor, DirectionRationale::InPlaneRectMinor));
            }
            Ok(None) => {}
            Err(err) => debug!(%err, "in-plane rectangle axes unavailable"),
        }
    }

    let mut candidates: Vec<DirectionCandidate> = Vec::with_capacity(raw.len());
    for (direction, rationale) in raw {
        let duplicate = candidates
            .iter()
            .any(|c| c.direction.dot(&direction).abs() > 1.0 - 1e-6);
        if duplicate {
            continue;
        }
        let extent = mesh
            .extent_along(&direction)
            .map_or(0.0, |(min, max)| max - min);
        candidates.push(DirectionCandidate {
            direction,
            rationale,
            extent,
        });
    }

    Ok(candidates)
}

/// Axes of the minimum bounding rectangle of the silhouette on the cutting
/// plane, lifted back to 3-D. `None` when the rectangle is degenerate.
fn in_plane_rect_axes(
    mesh: &TriMesh,
    normal: &Vector3<f64>,
) -> SweepResult<Option<(Vector3<f64>, Vector3<f64>)>> {
    let basis = PlaneBasis::from_direction(normal)?;
    let outline = silhouette(mesh, &basis)?;

    let Some(rect) = MinimumRotatedRect::minimum_rotated_rect(&outline) else {
        return Ok(None);
    };

    let ring = &rect.exterior().0;
    if ring.len() < 4 {
        return Ok(None);
    }
    let e0 = (ring[1].x - ring[0].x, ring[1].y - ring[0].y);
    let e1 = (ring[2].x - ring[1].x, ring[2].y - ring[1].y);
    let l0 = e0.0.hypot(e0.1);
    let l1 = e1.0.hypot(e1.1);
    if l0 < 1e-12 || l1 < 1e-12 {
        return Ok(None);
    }

    let lift = |e: (f64, f64), len: f64| (basis.u * e.0 + basis.v * e.1) / len;
    let (major, minor) = if l0 >= l1 {
        (lift(e0, l0), lift(e1, l1))
    } else {
        (lift(e1, l1), lift(e0, l0))
    };
    Ok(Some((major, minor)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blank_types::{cuboid, TriMesh};

    #[test]
    fn seed_region_gets_frame_axes() {
        let block = cuboid(4.0, 1.0, 2.5);
        let candidates = candidate_directions(&block, None).unwrap();

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].rationale, DirectionRationale::ObbSmallest);
        assert_eq!(candidates[2].rationale, DirectionRationale::ObbLargest);
        assert!(candidates[0].extent <= candidates[2].extent);
    }

    #[test]
    fn plane_normal_leads_and_deduplicates() {
        let block = cuboid(4.0, 1.0, 2.5);
        let normal = Vector3::y();
        let candidates = candidate_directions(&block, Some(&normal)).unwrap();

        assert_eq!(candidates[0].rationale, DirectionRationale::PlaneNormal);
        // The smallest frame axis is parallel to the plane normal and the
        // in-plane rectangle axes coincide with the remaining frame axes
        assert!(candidates
            .iter()
            .all(|c| c.rationale != DirectionRationale::ObbSmallest));
        assert!(candidates.len() >= 3 && candidates.len() <= 6);
    }

    #[test]
    fn candidate_count_bounds() {
        let block = cuboid(3.0, 2.0, 1.0);
        let diagonal = Vector3::new(1.0, 1.0, 1.0);
        let candidates = candidate_directions(&block, Some(&diagonal)).unwrap();
        assert!(candidates.len() >= 3 && candidates.len() <= 6);
    }

    #[test]
    fn directions_are_unit_length() {
        let block = cuboid(3.0, 2.0, 1.0);
        let candidates = candidate_directions(&block, None).unwrap();
        for c in candidates {
            assert!((c.direction.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_mesh_fails() {
        assert!(candidate_directions(&TriMesh::new(), None).is_err());
    }

    #[test]
    fn flat_region_is_degenerate() {
        // A single triangle has a zero-volume bounding frame
        let mesh = TriMesh::from_parts(
            vec![
                nalgebra::Point3::new(0.0, 0.0, 0.0),
                nalgebra::Point3::new(1.0, 0.0, 0.0),
                nalgebra::Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let err = candidate_directions(&mesh, None).unwrap_err();
        assert!(matches!(err, SweepError::DegenerateRegion));
    }
}
