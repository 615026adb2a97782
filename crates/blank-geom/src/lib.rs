//! Geometric primitives consumed by the stock blank estimation core.
//!
//! This crate provides the side-effect-free geometry services the blank
//! builders and the forging solver are written against:
//!
//! - **Plane basis**: orthonormal in-plane axes for a sweep direction with
//!   an invertible project/lift transform
//! - **Silhouette**: full-outline projection of a mesh along a direction
//! - **Plane sections**: mesh/plane intersection as polygons-with-holes
//! - **Oriented bounding frame**: PCA box with extent-sorted axes
//! - **Circles**: minimum enclosing and maximum inscribed circles
//! - **Offsets**: round (buffered) and miter polygon offsetting
//! - **Extrusion**: cross-section stacks back to triangle meshes
//!
//! All operations are pure functions of their inputs. Failure modes are
//! documented per function and surface as [`GeomError`]; callers that can
//! tolerate a dropped contribution (the forging union walk) catch and skip
//! rather than abort.
//!
//! # Example
//!
//! ```
//! use blank_types::unit_cube;
//! use blank_geom::{silhouette, PlaneBasis};
//! use nalgebra::Vector3;
//! use geo::Area;
//!
//! let cube = unit_cube();
//! let basis = PlaneBasis::from_direction(&Vector3::z()).unwrap();
//! let outline = silhouette(&cube, &basis).unwrap();
//! assert!((outline.unsigned_area() - 1.0).abs() < 1e-6);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod circle;
mod error;
mod extrude;
mod obb;
mod offset;
mod plane;
mod silhouette;
mod slice;

pub use circle::{max_inscribed_circle, min_enclosing_circle, Circle};
pub use error::{GeomError, GeomResult};
pub use extrude::{extrude_prism, extrude_stack};
pub use obb::{pca_obb, ObbFrame};
pub use offset::{offset_miter, offset_round, union_all};
pub use plane::PlaneBasis;
pub use silhouette::silhouette;
pub use slice::section_polygons;

// Re-export the math types used in the public API
pub use nalgebra::{Point3, Vector3};
