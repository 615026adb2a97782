//! Per-process stock shape builders and the blank dispatcher.
//!
//! This crate turns an analyzed mesh region into a [`Blank`] for a chosen
//! manufacturing process:
//!
//! - [`SubVolume::analyze`] computes the region's geometric attributes
//!   exactly once (bounding frame, candidate directions, finish volume);
//!   per-direction silhouettes are cached behind `OnceLock` so concurrent
//!   first readers race safely.
//! - [`build_blank`] dispatches on the closed [`BlankKind`] enum to one
//!   builder per process: bar stock fits, waterjet plate outlines with
//!   internal-feature protection, hollow tube circle pairs, near-net
//!   deposition outlines, and the closed-die forging solver.
//! - [`realize_stock`] lazily turns a finished blank's cross-sections into
//!   a solid mesh for visualization and volume cross-checks.
//!
//! Every builder maintains `stock_volume >= finish_volume`: estimates that
//! come in below the finish volume are clamped, quietly within a 5%
//! tolerance band, logged and flagged beyond it.
//!
//! An infeasible process (tube with no bore, over-thick waterjet plate,
//! forging above the volume cutoff) produces `is_feasible = false`, not an
//! error.
//!
//! # Example
//!
//! ```
//! use blank_types::{cuboid, BlankConfig, BlankKind};
//! use blank_shape::{build_blank, SubVolume};
//!
//! let region = SubVolume::analyze(cuboid(40.0, 20.0, 10.0), None).unwrap();
//! let blank = build_blank(&region, BlankKind::BarStockRectangular, &BlankConfig::default()).unwrap();
//! assert!(blank.stock_volume >= blank.finish_volume);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bar;
mod dispatch;
mod error;
mod nearnet;
mod realize;
mod region;
mod tube;
mod waterjet;

pub use dispatch::build_blank;
pub use error::{ShapeError, ShapeResult};
pub use realize::realize_stock;
pub use region::{SilhouetteData, SubVolume};
pub use waterjet::cut_shape;

// The blank record itself lives in blank-types
pub use blank_types::{Blank, BlankConfig, BlankKind};
