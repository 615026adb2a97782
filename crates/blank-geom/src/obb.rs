//! Oriented bounding frame via principal component analysis.

use crate::error::{GeomError, GeomResult};
use blank_types::TriMesh;
use nalgebra::{Matrix3, Point3, Vector3};

/// An oriented bounding frame with extent-sorted axes.
///
/// The axes are the mesh's principal directions; `extents[k]` is the full
/// width of the mesh along `axes[k]`, sorted ascending so `axes[0]` is the
/// thinnest direction and `axes[2]` the longest.
#[derive(Debug, Clone)]
pub struct ObbFrame {
    /// Center of the frame.
    pub center: Point3<f64>,
    /// Principal axes, unit length, sorted by ascending extent.
    pub axes: [Vector3<f64>; 3],
    /// Full extents along each axis, sorted ascending.
    pub extents: [f64; 3],
}

impl ObbFrame {
    /// Volume of the bounding frame.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.extents[0] * self.extents[1] * self.extents[2]
    }

    /// The thinnest principal direction.
    #[must_use]
    pub const fn smallest_axis(&self) -> Vector3<f64> {
        self.axes[0]
    }

    /// The middle principal direction.
    #[must_use]
    pub const fn middle_axis(&self) -> Vector3<f64> {
        self.axes[1]
    }

    /// The longest principal direction.
    #[must_use]
    pub const fn largest_axis(&self) -> Vector3<f64> {
        self.axes[2]
    }
}

/// Compute the PCA oriented bounding frame of a mesh.
///
/// Principal axes come from the eigenvectors of the vertex covariance
/// matrix; extents are measured by projecting every vertex onto each axis.
///
/// # Errors
///
/// [`GeomError::EmptyMesh`] when the mesh has no vertices.
pub fn pca_obb(mesh: &TriMesh) -> GeomResult<ObbFrame> {
    if mesh.positions.is_empty() {
        return Err(GeomError::EmptyMesh);
    }

    let centroid = compute_centroid(mesh);
    let cov = compute_covariance(mesh, &centroid);
    let eigen = cov.symmetric_eigen();

    let mut measured: Vec<(f64, Vector3<f64>, f64)> = Vec::with_capacity(3);
    for k in 0..3 {
        let axis_col = eigen.eigenvectors.column(k);
        let axis = Vector3::new(axis_col[0], axis_col[1], axis_col[2]).normalize();

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in &mesh.positions {
            let d = p.coords.dot(&axis);
            min = min.min(d);
            max = max.max(d);
        }
        measured.push((max - min, axis, (min + max) / 2.0));
    }

    measured.sort_by(|a, b| a.0.total_cmp(&b.0));

    let center = Point3::from(
        measured[0].1 * measured[0].2 + measured[1].1 * measured[1].2 + measured[2].1 * measured[2].2,
    );

    Ok(ObbFrame {
        center,
        axes: [measured[0].1, measured[1].1, measured[2].1],
        extents: [measured[0].0, measured[1].0, measured[2].0],
    })
}

fn compute_centroid(mesh: &TriMesh) -> Point3<f64> {
    #[allow(clippy::cast_precision_loss)]
    let n = mesh.positions.len() as f64;
    let sum: Vector3<f64> = mesh.positions.iter().map(|p| p.coords).sum();
    Point3::from(sum / n)
}

fn compute_covariance(mesh: &TriMesh, centroid: &Point3<f64>) -> Matrix3<f64> {
    let mut cov = Matrix3::zeros();
    for p in &mesh.positions {
        let d = p - centroid;
        cov += d * d.transpose();
    }
    #[allow(clippy::cast_precision_loss)]
    let n = mesh.positions.len() as f64;
    cov / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use blank_types::{cuboid, unit_cube};

    #[test]
    fn unit_cube_frame() {
        let cube = unit_cube();
        let obb = pca_obb(&cube).unwrap();
        assert_relative_eq!(obb.volume(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn axes_sorted_by_extent() {
        let block = cuboid(4.0, 1.0, 2.5);
        let obb = pca_obb(&block).unwrap();

        assert!(obb.extents[0] <= obb.extents[1]);
        assert!(obb.extents[1] <= obb.extents[2]);
        assert_relative_eq!(obb.extents[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(obb.extents[2], 4.0, epsilon = 1e-9);

        // The smallest axis must align with Y, the largest with X
        assert_relative_eq!(obb.smallest_axis().y.abs(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(obb.largest_axis().x.abs(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn axes_are_orthonormal() {
        let block = cuboid(3.0, 2.0, 1.0);
        let obb = pca_obb(&block).unwrap();

        for axis in &obb.axes {
            assert_relative_eq!(axis.norm(), 1.0, epsilon = 1e-12);
        }
        assert_relative_eq!(obb.axes[0].dot(&obb.axes[1]), 0.0, epsilon = 1e-9);
        assert_relative_eq!(obb.axes[1].dot(&obb.axes[2]), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn center_is_geometric_middle() {
        let block = cuboid(2.0, 2.0, 2.0);
        let obb = pca_obb(&block).unwrap();
        assert_relative_eq!(obb.center.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(obb.center.y, 1.0, epsilon = 1e-9);
        assert_relative_eq!(obb.center.z, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_mesh_fails() {
        let err = pca_obb(&TriMesh::new()).unwrap_err();
        assert!(matches!(err, GeomError::EmptyMesh));
    }
}
