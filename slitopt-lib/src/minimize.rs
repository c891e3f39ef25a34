//! Bounded scalar minimisation.
//!
//! Brent's method restricted to an interval: parabolic interpolation steps
//! with a golden-section fallback, the algorithm behind
//! `scipy.optimize.minimize_scalar(method = "bounded")`.

use crate::error::{Error, Result};

/// Options for bounded scalar minimisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeOptions {
    /// Absolute tolerance on the location of the minimum
    pub xatol: f64,
    /// Maximum number of function evaluations
    pub max_evaluations: usize,
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            xatol: 1e-8,
            max_evaluations: 500,
        }
    }
}

/// Result from a bounded minimisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeResult {
    /// The minimum point found
    pub x: f64,
    /// Function value at the minimum
    pub f_min: f64,
    /// Number of function evaluations used
    pub evaluations: usize,
}

/// Minimise `f` on `[lower, upper]`.
pub fn minimize_bounded<F>(f: F, bounds: (f64, f64), options: MinimizeOptions) -> Result<MinimizeResult>
where
    F: FnMut(f64) -> f64,
{
    minimize_bounded_observed(f, bounds, options, |_, _| {})
}

/// Minimise `f` on `[lower, upper]`, reporting every evaluation `(x, f(x))`
/// to `observe`.
pub fn minimize_bounded_observed<F, O>(
    mut f: F,
    bounds: (f64, f64),
    options: MinimizeOptions,
    mut observe: O,
) -> Result<MinimizeResult>
where
    F: FnMut(f64) -> f64,
    O: FnMut(f64, f64),
{
    let (lower, upper) = bounds;
    if !(lower.is_finite() && upper.is_finite()) || lower > upper {
        return Err(Error::InvalidInput(format!(
            "invalid bounds [{lower}, {upper}]"
        )));
    }
    if options.max_evaluations == 0 {
        return Err(Error::InvalidInput(
            "max_evaluations must be > 0".to_string(),
        ));
    }

    let mut eval = |x: f64| {
        let fx = f(x);
        observe(x, fx);
        log::trace!("minimize_bounded: f({x}) = {fx}");
        fx
    };

    let sqrt_eps = f64::EPSILON.sqrt();
    let golden_mean = 0.5 * (3.0 - 5.0_f64.sqrt());

    let (mut a, mut b) = (lower, upper);
    // `xf` is the best point so far, `nfc` the second best and `fulc` the
    // previous value of `nfc`.
    let mut fulc = a + golden_mean * (b - a);
    let mut nfc = fulc;
    let mut xf = fulc;
    let mut rat = 0.0_f64;
    let mut e = 0.0_f64;

    let mut fx = eval(xf);
    let mut evaluations = 1;
    let mut fu = f64::INFINITY;
    let mut ffulc = fx;
    let mut fnfc = fx;

    let mut xm = 0.5 * (a + b);
    let mut tol1 = sqrt_eps * xf.abs() + options.xatol / 3.0;
    let mut tol2 = 2.0 * tol1;
    let mut exhausted = false;

    while (xf - xm).abs() > tol2 - 0.5 * (b - a) {
        let mut golden = true;

        if e.abs() > tol1 {
            golden = false;
            let mut r = (xf - nfc) * (fx - ffulc);
            let mut q = (xf - fulc) * (fx - fnfc);
            let mut p = (xf - fulc) * q - (xf - nfc) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            r = e;
            e = rat;

            if p.abs() < (0.5 * q * r).abs() && p > q * (a - xf) && p < q * (b - xf) {
                rat = p / q;
                let x = xf + rat;
                if (x - a) < tol2 || (b - x) < tol2 {
                    rat = tol1 * sign_or_one(xm - xf);
                }
            } else {
                golden = true;
            }
        }

        if golden {
            e = if xf >= xm { a - xf } else { b - xf };
            rat = golden_mean * e;
        }

        let x = xf + sign_or_one(rat) * rat.abs().max(tol1);
        fu = eval(x);
        evaluations += 1;

        if fu <= fx {
            if x >= xf {
                a = xf;
            } else {
                b = xf;
            }
            fulc = nfc;
            ffulc = fnfc;
            nfc = xf;
            fnfc = fx;
            xf = x;
            fx = fu;
        } else {
            if x < xf {
                a = x;
            } else {
                b = x;
            }
            if fu <= fnfc || nfc == xf {
                fulc = nfc;
                ffulc = fnfc;
                nfc = x;
                fnfc = fu;
            } else if fu <= ffulc || fulc == xf || fulc == nfc {
                fulc = x;
                ffulc = fu;
            }
        }

        xm = 0.5 * (a + b);
        tol1 = sqrt_eps * xf.abs() + options.xatol / 3.0;
        tol2 = 2.0 * tol1;

        if evaluations >= options.max_evaluations {
            // converging on the last allowed evaluation still counts
            exhausted = (xf - xm).abs() > tol2 - 0.5 * (b - a);
            break;
        }
    }

    if xf.is_nan() || fx.is_nan() || fu.is_nan() {
        return Err(Error::Optimization(format!(
            "objective returned NaN after {evaluations} evaluations"
        )));
    }
    if exhausted {
        return Err(Error::Optimization(format!(
            "no convergence within {} evaluations (x = {xf})",
            options.max_evaluations
        )));
    }

    Ok(MinimizeResult {
        x: xf,
        f_min: fx,
        evaluations,
    })
}

/// `sign(v)`, with zero mapped to +1.
fn sign_or_one(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}
