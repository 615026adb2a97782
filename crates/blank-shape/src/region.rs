//! Analyzed mesh region with compute-once geometric attributes.

use crate::error::{ShapeError, ShapeResult};
use blank_geom::{pca_obb, silhouette, GeomError, ObbFrame, PlaneBasis};
use blank_sweep::{candidate_directions, DirectionCandidate, DirectionRationale};
use blank_types::{Aabb, MultiPolygon, TriMesh};
use nalgebra::Vector3;
use std::sync::OnceLock;

/// A cached silhouette projection along one candidate direction.
#[derive(Debug, Clone)]
pub struct SilhouetteData {
    /// The projected outline, holes included.
    pub outline: MultiPolygon<f64>,
    /// Plane basis the outline coordinates live in.
    pub basis: PlaneBasis,
    /// Minimum scalar extent of the region along the direction.
    pub min: f64,
    /// Maximum scalar extent of the region along the direction.
    pub max: f64,
}

impl SilhouetteData {
    /// Region depth along the silhouette direction.
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.max - self.min
    }
}

/// A mesh region with its geometric attributes computed up front.
///
/// Construction via [`SubVolume::analyze`] does all the eager work once:
/// bounds, bounding frame, candidate directions, finish volume and surface
/// area. Per-direction silhouettes are the expensive queries only some
/// builders need, so they are computed on first use and cached in
/// `OnceLock`s — concurrent first readers block on one computation instead
/// of racing.
///
/// One `SubVolume` / [`BlankKind`](blank_types::BlankKind) pair is
/// independent of all others, which makes the region the natural
/// parallelisation boundary for callers evaluating many regions.
#[derive(Debug)]
pub struct SubVolume {
    mesh: TriMesh,
    bounds: Aabb,
    obb: ObbFrame,
    candidates: Vec<DirectionCandidate>,
    finish_volume: f64,
    finish_surface_area: f64,
    silhouettes: Vec<OnceLock<Result<SilhouetteData, GeomError>>>,
}

impl SubVolume {
    /// Analyze a mesh region, computing every eager attribute.
    ///
    /// `plane_normal` is the fixed cutting-plane normal of the region,
    /// absent only for the initial/seed region.
    ///
    /// # Errors
    ///
    /// [`ShapeError::DegenerateRegion`] for an empty mesh or one without
    /// enclosed volume — rejected before any further geometric work.
    pub fn analyze(mesh: TriMesh, plane_normal: Option<Vector3<f64>>) -> ShapeResult<Self> {
        if mesh.is_empty() {
            return Err(ShapeError::DegenerateRegion);
        }
        let bounds = mesh.bounds();
        let finish_volume = mesh.volume();
        if bounds.volume() <= 0.0 || finish_volume <= 0.0 {
            return Err(ShapeError::DegenerateRegion);
        }

        let obb = pca_obb(&mesh)?;
        let candidates = candidate_directions(&mesh, plane_normal.as_ref())?;
        let finish_surface_area = mesh.surface_area();
        let silhouettes = (0..candidates.len()).map(|_| OnceLock::new()).collect();

        Ok(Self {
            mesh,
            bounds,
            obb,
            candidates,
            finish_volume,
            finish_surface_area,
            silhouettes,
        })
    }

    /// The region's mesh, read-only.
    #[must_use]
    pub const fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    /// Axis-aligned bounds.
    #[must_use]
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Oriented bounding frame.
    #[must_use]
    pub const fn obb(&self) -> &ObbFrame {
        &self.obb
    }

    /// Candidate sweep directions with rationale tags.
    #[must_use]
    pub fn candidates(&self) -> &[DirectionCandidate] {
        &self.candidates
    }

    /// Exact volume of the finished part.
    #[must_use]
    pub const fn finish_volume(&self) -> f64 {
        self.finish_volume
    }

    /// Surface area of the finished part.
    #[must_use]
    pub const fn finish_surface_area(&self) -> f64 {
        self.finish_surface_area
    }

    /// Index and candidate with the greatest extent (bar and tube axes).
    #[must_use]
    pub fn longest_candidate(&self) -> (usize, &DirectionCandidate) {
        let mut pick = 0;
        for (i, c) in self.candidates.iter().enumerate() {
            if c.extent > self.candidates[pick].extent {
                pick = i;
            }
        }
        (pick, &self.candidates[pick])
    }

    /// Index and candidate with the smallest extent, optionally restricted
    /// to a set of rationales (the waterjet plate picks the thinnest of
    /// the plane-bound directions).
    #[must_use]
    pub fn thinnest_candidate(
        &self,
        restrict_to: &[DirectionRationale],
    ) -> (usize, &DirectionCandidate) {
        let mut pick: Option<usize> = None;
        for (i, c) in self.candidates.iter().enumerate() {
            if !restrict_to.is_empty() && !restrict_to.contains(&c.rationale) {
                continue;
            }
            if pick.is_none_or(|p| c.extent < self.candidates[p].extent) {
                pick = Some(i);
            }
        }
        // Fall back to the unrestricted minimum for seed regions
        let pick = pick.unwrap_or_else(|| self.thinnest_unrestricted());
        (pick, &self.candidates[pick])
    }

    fn thinnest_unrestricted(&self) -> usize {
        let mut pick = 0;
        for (i, c) in self.candidates.iter().enumerate() {
            if c.extent < self.candidates[pick].extent {
                pick = i;
            }
        }
        pick
    }

    /// The silhouette along candidate `index`, computed on first access.
    ///
    /// # Errors
    ///
    /// - [`ShapeError::UnknownDirection`] for an out-of-range index.
    /// - [`ShapeError::Geometry`] when the projection failed (the failure
    ///   is cached too — retrying cannot succeed on identical inputs).
    pub fn silhouette_along(&self, index: usize) -> ShapeResult<&SilhouetteData> {
        let candidate = self
            .candidates
            .get(index)
            .ok_or(ShapeError::UnknownDirection(index))?;
        let cached = self.silhouettes[index]
            .get_or_init(|| compute_silhouette(&self.mesh, &candidate.direction));
        cached.as_ref().map_err(|err| err.clone().into())
    }
}

fn compute_silhouette(
    mesh: &TriMesh,
    direction: &Vector3<f64>,
) -> Result<SilhouetteData, GeomError> {
    let basis = PlaneBasis::from_direction(direction)?;
    let outline = silhouette(mesh, &basis)?;
    let (min, max) = mesh.extent_along(direction).ok_or(GeomError::EmptyMesh)?;
    Ok(SilhouetteData {
        outline,
        basis,
        min,
        max,
    })
}
