//! Sweep direction selection and cross-section sampling.
//!
//! This crate turns a mesh region into the inputs the blank builders
//! consume:
//!
//! - **Direction selection**: 3-6 candidate sweep directions per region,
//!   each tagged with its physical rationale (bounding-frame axes, the
//!   fixed cutting-plane normal, the in-plane bounding-rectangle axes)
//! - **Sweep sampling**: uniformly spaced cross-sections along a direction,
//!   with slice retry under a widening angular tolerance
//! - **Silhouette sampling**: a single full-outline "section" for processes
//!   that only need the 2-D projection (bar stock, waterjet)
//!
//! # Guarantees
//!
//! Every [`Decomposition`](blank_types::Decomposition) produced here has
//! strictly increasing distances and at least two sections for any region
//! with positive extent along the direction.
//!
//! # Example
//!
//! ```
//! use blank_types::unit_cube;
//! use blank_sweep::sample_sweep;
//! use nalgebra::Vector3;
//!
//! let cube = unit_cube();
//! let decomp = sample_sweep(&cube, &Vector3::z(), 0.25).unwrap();
//! assert!(decomp.len() >= 2);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod directions;
mod error;
mod sampler;

pub use directions::{candidate_directions, DirectionCandidate, DirectionRationale};
pub use error::{SweepError, SweepResult};
pub use sampler::{sample_silhouette, sample_sweep};
