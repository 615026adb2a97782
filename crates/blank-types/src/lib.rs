//! Core data model for stock blank estimation.
//!
//! This crate provides the foundational types shared by the blank-* crates:
//!
//! - [`TriMesh`] - An indexed triangle mesh, consumed read-only by the core
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`CrossSection`] / [`Decomposition`] - Planar slices of a mesh ordered
//!   along a sweep direction
//! - [`Blank`] / [`BlankKind`] - The resulting stock-shape estimate per
//!   manufacturing process
//! - [`BlankConfig`] - Immutable per-process configuration
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`. The default
//! configuration constants assume millimeters.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**:
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down)
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use blank_types::{TriMesh, unit_cube};
//!
//! let cube = unit_cube();
//! assert!((cube.volume() - 1.0).abs() < 1e-10);
//! assert_eq!(cube.face_count(), 12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod blank;
mod bounds;
mod config;
mod error;
mod mesh;
mod section;

pub use blank::{Blank, BlankKind};
pub use bounds::Aabb;
pub use config::{
    BarStockConfig, BlankConfig, ForgingConfig, NearNetConfig, TubeConfig, WaterjetConfig,
};
pub use error::DecompositionError;
pub use mesh::{cuboid, unit_cube, uv_sphere, TriMesh, Triangle};
pub use section::{CrossSection, Decomposition, ForgingSection};

// Re-export the math/polygon types used throughout the public API
pub use geo::MultiPolygon;
pub use nalgebra::{Point3, Vector3};
