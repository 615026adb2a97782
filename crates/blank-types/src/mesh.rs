//! Indexed triangle mesh.

use crate::Aabb;
use nalgebra::{Point3, Vector3};

/// A concrete triangle with vertex positions.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex.
    pub a: Point3<f64>,
    /// Second vertex.
    pub b: Point3<f64>,
    /// Third vertex.
    pub c: Point3<f64>,
}

impl Triangle {
    /// Unnormalized face normal (cross product of the edge vectors).
    ///
    /// Its length is twice the triangle area.
    #[must_use]
    pub fn scaled_normal(&self) -> Vector3<f64> {
        (self.b - self.a).cross(&(self.c - self.a))
    }

    /// Triangle area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.scaled_normal().norm() / 2.0
    }
}

/// An indexed triangle mesh.
///
/// The stock estimation core consumes meshes **read-only**; the mutating
/// helpers exist for constructing test and demo geometry.
///
/// # Winding Order
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside,
/// so [`TriMesh::signed_volume`] is positive for a well-formed closed solid.
///
/// # Example
///
/// ```
/// use blank_types::{TriMesh, Point3};
///
/// let mut mesh = TriMesh::new();
/// mesh.positions.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.positions.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.positions.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,
    /// Triangle faces as indices into `positions`, CCW from outside.
    pub faces: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from vertex positions and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(positions: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self { positions, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangle faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check whether the mesh has no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Iterate over concrete triangles.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(|&[i0, i1, i2]| Triangle {
            a: self.positions[i0 as usize],
            b: self.positions[i1 as usize],
            c: self.positions[i2 as usize],
        })
    }

    /// Axis-aligned bounding box of all vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter())
    }

    /// Minimum and maximum scalar projection of the vertices onto `direction`.
    ///
    /// Returns `None` for a mesh without vertices. The direction does not
    /// need to be normalized; projections are taken against the unit vector.
    #[must_use]
    pub fn extent_along(&self, direction: &Vector3<f64>) -> Option<(f64, f64)> {
        if self.positions.is_empty() {
            return None;
        }
        let dir = direction.normalize();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in &self.positions {
            let d = p.coords.dot(&dir);
            min = min.min(d);
            max = max.max(d);
        }
        Some((min, max))
    }

    /// Signed volume via the divergence theorem.
    ///
    /// Sums the signed tetrahedra spanned by each face and the origin.
    /// Positive for a closed mesh with outward CCW winding; not meaningful
    /// for open meshes.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let mut six_volume = 0.0;
        for &[i0, i1, i2] in &self.faces {
            let a = self.positions[i0 as usize].coords;
            let b = self.positions[i1 as usize].coords;
            let c = self.positions[i2 as usize].coords;
            six_volume += a.dot(&b.cross(&c));
        }
        six_volume / 6.0
    }

    /// Absolute mesh volume.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|t| t.area()).sum()
    }

    /// Translate all vertices by `offset`.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Scale all vertices uniformly around the origin.
    pub fn scale(&mut self, factor: f64) {
        for p in &mut self.positions {
            p.coords *= factor;
        }
    }

    /// Merge another mesh into this one, offsetting its face indices.
    #[allow(clippy::cast_possible_truncation)] // u32 indices cap vertex counts by design
    pub fn merge(&mut self, other: &Self) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        for &[i0, i1, i2] in &other.faces {
            self.faces.push([i0 + offset, i1 + offset, i2 + offset]);
        }
    }
}

/// A unit cube from (0,0,0) to (1,1,1) with outward-facing normals.
#[must_use]
pub fn unit_cube() -> TriMesh {
    cuboid(1.0, 1.0, 1.0)
}

/// An axis-aligned box from the origin with the given side lengths.
///
/// # Example
///
/// ```
/// use blank_types::cuboid;
///
/// let block = cuboid(2.0, 3.0, 4.0);
/// assert!((block.volume() - 24.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn cuboid(width: f64, depth: f64, height: f64) -> TriMesh {
    let positions = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(width, 0.0, 0.0),
        Point3::new(width, depth, 0.0),
        Point3::new(0.0, depth, 0.0),
        Point3::new(0.0, 0.0, height),
        Point3::new(width, 0.0, height),
        Point3::new(width, depth, height),
        Point3::new(0.0, depth, height),
    ];

    // 2 triangles per face, CCW viewed from outside
    let faces = vec![
        [0, 2, 1],
        [0, 3, 2], // bottom (-Z)
        [4, 5, 6],
        [4, 6, 7], // top (+Z)
        [0, 1, 5],
        [0, 5, 4], // front (-Y)
        [3, 7, 6],
        [3, 6, 2], // back (+Y)
        [0, 4, 7],
        [0, 7, 3], // left (-X)
        [1, 2, 6],
        [1, 6, 5], // right (+X)
    ];

    TriMesh::from_parts(positions, faces)
}

/// A UV sphere centered at the origin.
///
/// `rings` is the number of latitude bands (>= 2), `segments` the number of
/// longitude steps (>= 3). The tessellated volume approaches `4/3 pi r^3`
/// from below as the resolution increases.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // u32 indices cap vertex counts by design
pub fn uv_sphere(radius: f64, rings: u32, segments: u32) -> TriMesh {
    let rings = rings.max(2);
    let segments = segments.max(3);

    let mut mesh = TriMesh::new();
    mesh.positions.push(Point3::new(0.0, 0.0, radius)); // north pole

    for ring in 1..rings {
        let phi = std::f64::consts::PI * f64::from(ring) / f64::from(rings);
        let z = radius * phi.cos();
        let ring_r = radius * phi.sin();
        for seg in 0..segments {
            let theta = std::f64::consts::TAU * f64::from(seg) / f64::from(segments);
            mesh.positions
                .push(Point3::new(ring_r * theta.cos(), ring_r * theta.sin(), z));
        }
    }
    mesh.positions.push(Point3::new(0.0, 0.0, -radius)); // south pole

    let ring_start = |ring: u32| 1 + (ring - 1) * segments;

    // Pole caps
    for seg in 0..segments {
        let next = (seg + 1) % segments;
        mesh.faces
            .push([0, ring_start(1) + seg, ring_start(1) + next]);
    }
    let south = mesh.positions.len() as u32 - 1;
    for seg in 0..segments {
        let next = (seg + 1) % segments;
        mesh.faces
            .push([south, ring_start(rings - 1) + next, ring_start(rings - 1) + seg]);
    }

    // Quad strips between consecutive rings
    for ring in 1..rings - 1 {
        let upper = ring_start(ring);
        let lower = ring_start(ring + 1);
        for seg in 0..segments {
            let next = (seg + 1) % segments;
            mesh.faces.push([upper + seg, lower + seg, lower + next]);
            mesh.faces.push([upper + seg, lower + next, upper + next]);
        }
    }

    mesh
}
