//! Closed-die forging stock estimation.
//!
//! The forging stock shape is not a fixed primitive: it is derived by
//! sweeping cover-offset cross-sections from both ends of a candidate die
//! axis, merging them under the die draft, and balancing the two growth
//! fronts at an optimal parting line.
//!
//! Per candidate direction the solver:
//!
//! 1. rejects axes shorter than twice the top cover,
//! 2. builds forward and reverse cover-offset decompositions,
//! 3. walks each under the draft operator (`tan(draft) x Δdistance` miter
//!    growth), tracking where the running union last grew,
//! 4. locates the parting line between those bounds by golden-section
//!    search on the forward/reverse drafted-area imbalance,
//! 5. inserts the minimum-web and gutter-smoothed parting stations,
//! 6. reconstructs the stock volume with the unequal-spacing trapezoidal
//!    rule.
//!
//! The smallest volume over the ranked candidate directions wins.
//!
//! # Example
//!
//! ```
//! use blank_types::{cuboid, ForgingConfig};
//! use blank_sweep::candidate_directions;
//! use blank_forge::solve_forging;
//!
//! let part = cuboid(40.0, 30.0, 20.0);
//! let candidates = candidate_directions(&part, None).unwrap();
//! let config = ForgingConfig::default();
//! let estimate = solve_forging(&part, &candidates, &config).unwrap();
//! assert!(estimate.stock_volume > part.volume());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod flash;
mod search;
mod solver;

pub use error::{ForgeError, ForgeResult};
pub use flash::{gutter_clearance, min_web_half_thickness, MIN_WEB_COEFFS};
pub use search::golden_section_min;
pub use solver::{solve_forging, ForgingEstimate};
