//! Lazy stock-solid realization.

use crate::error::{ShapeError, ShapeResult};
use blank_geom::{extrude_prism, extrude_stack, GeomError, PlaneBasis};
use blank_types::{Blank, TriMesh};

/// Realize a blank's stock shape as a solid mesh.
///
/// Kept separate from [`build_blank`](crate::build_blank) so only
/// visualization and volume cross-check callers pay for it. Single-outline
/// blanks (bar, plate, tube, deposition) extrude their outline over the
/// build distance; forging stacks are lofted slab by slab, so the solid's
/// volume matches the Riemann sum of the station areas rather than the
/// trapezoidal estimate.
///
/// # Errors
///
/// Propagates extrusion failures; [`ShapeError::Geometry`] with an empty
/// outline for a blank without cross-sections.
pub fn realize_stock(blank: &Blank) -> ShapeResult<TriMesh> {
    let basis = PlaneBasis::from_direction(&blank.build_direction)?;
    let sections = blank.cross_sections.sections();

    match sections {
        [] => Err(ShapeError::Geometry(GeomError::EmptyOutline)),
        [only] => {
            let lower = only.distance;
            Ok(extrude_prism(
                &only.shape,
                &basis,
                lower,
                lower + blank.build_distance,
            )?)
        }
        stack => Ok(extrude_stack(stack, &basis)?),
    }
}
