/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Relative difference `|a - b| / |reference|`, or infinity for a zero reference.
pub fn relative_difference(a: Real, b: Real, reference: Real) -> Real {
    if reference == 0.0 {
        return Real::INFINITY;
    }
    (a - b).abs() / reference.abs()
}

/// Format with a fixed number of decimals, the way sizing diagnostics print values.
pub fn round_sig_digits(v: Real, digits: usize) -> String {
    format!("{v:.digits$}")
}
