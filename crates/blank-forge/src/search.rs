//! Bounded golden-section minimisation.

/// The golden-section interior ratio, `(sqrt(5) - 1) / 2`.
const GOLDEN: f64 = 0.618_033_988_749_894_9;

/// Minimise a unimodal function on `[lo, hi]` by golden-section search.
///
/// The bracket shrinks by the golden ratio each iteration until its width
/// falls below `rel_tol` times the mean endpoint magnitude (floored at 1 so
/// brackets straddling zero still terminate), or `max_iter` iterations
/// elapse. Returns the midpoint of the final bracket.
pub fn golden_section_min<F>(mut f: F, mut lo: f64, mut hi: f64, rel_tol: f64, max_iter: usize) -> f64
where
    F: FnMut(f64) -> f64,
{
    if hi < lo {
        std::mem::swap(&mut lo, &mut hi);
    }

    let mut x1 = hi - GOLDEN * (hi - lo);
    let mut x2 = lo + GOLDEN * (hi - lo);
    let mut f1 = f(x1);
    let mut f2 = f(x2);

    for _ in 0..max_iter {
        let scale = ((lo.abs() + hi.abs()) / 2.0).max(1.0);
        if hi - lo <= rel_tol * scale {
            break;
        }
        if f1 <= f2 {
            hi = x2;
            x2 = x1;
            f2 = f1;
            x1 = hi - GOLDEN * (hi - lo);
            f1 = f(x1);
        } else {
            lo = x1;
            x1 = x2;
            f1 = f2;
            x2 = lo + GOLDEN * (hi - lo);
            f2 = f(x2);
        }
    }

    (lo + hi) / 2.0
}
