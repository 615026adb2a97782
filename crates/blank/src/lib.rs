//! Stock blank geometry estimation for manufacturing cost models.
//!
//! Given a solid triangle mesh and a manufacturing process, this workspace
//! estimates the raw stock shape the part would be made from — sawn bar,
//! waterjet plate, hollow tube, near-net deposition, or a closed-die
//! forging derived by sweeping drafted cross-sections and balancing a
//! parting line. The resulting [`Blank`](types::Blank) record (stock,
//! finish and waste volumes, cross-sections, feasibility) feeds downstream
//! process-cost formulas; no cost arithmetic lives here.
//!
//! # Quick Start
//!
//! ```
//! use blank::prelude::*;
//!
//! // Analyze the part region once
//! let part = blank::types::cuboid(60.0, 40.0, 20.0);
//! let region = SubVolume::analyze(part, None).unwrap();
//!
//! // Estimate stock for a process
//! let config = BlankConfig::default();
//! let forged = build_blank(&region, BlankKind::ClosedDieForging, &config).unwrap();
//! assert!(forged.stock_volume >= forged.finish_volume);
//!
//! // Solid realization is explicit and lazy
//! let stock_mesh = realize_stock(&forged).unwrap();
//! assert!(stock_mesh.volume() > 0.0);
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data model: `TriMesh`, `CrossSection`,
//!   `Decomposition`, `Blank`, `BlankKind`, configuration
//! - [`geom`] - Geometric primitives: silhouettes, plane sections,
//!   bounding frames, circles, offsets, extrusion
//! - [`sweep`] - Candidate directions and cross-section sampling
//! - [`forge`] - Closed-die forging parting-line solver
//! - [`shape`] - Per-process builders and the blank dispatcher

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

/// Core data model: meshes, cross-sections, blanks, configuration.
pub use blank_types as types;

/// Geometric primitives consumed by the estimation core.
pub use blank_geom as geom;

/// Candidate directions and cross-section sampling.
pub use blank_sweep as sweep;

/// Closed-die forging parting-line solver.
pub use blank_forge as forge;

/// Per-process builders and the blank dispatcher.
pub use blank_shape as shape;

/// Common imports for blank estimation.
///
/// # Usage
///
/// ```
/// use blank::prelude::*;
/// ```
pub mod prelude {
    pub use blank_shape::{build_blank, realize_stock, SubVolume};
    pub use blank_types::{
        Blank, BlankConfig, BlankKind, CrossSection, Decomposition, TriMesh,
    };
}
