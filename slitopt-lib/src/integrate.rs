/// Composite Simpson integral of tabulated `y(x)`.
///
/// `x` may be unevenly spaced; each pair of intervals is integrated with the
/// three-point Simpson formula for non-uniform spacing. An odd number of
/// intervals closes with the matching correction for the last interval
/// (the same scheme as `scipy.integrate.simpson`).
pub fn simpson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    match n {
        0 | 1 => return 0.0,
        2 => return 0.5 * (x[1] - x[0]) * (y[0] + y[1]),
        _ => {}
    }

    let intervals = n - 1;
    let even_end = intervals - intervals % 2;
    let mut total = 0.0;
    for i in (0..even_end).step_by(2) {
        total += simpson_pair(&x[i..i + 3], &y[i..i + 3]);
    }

    if intervals % 2 == 1 {
        // last interval, using the quadratic through the final three points
        let h0 = x[n - 2] - x[n - 3];
        let h1 = x[n - 1] - x[n - 2];
        let alpha = (2.0 * h1 * h1 + 3.0 * h0 * h1) / (6.0 * (h0 + h1));
        let beta = (h1 * h1 + 3.0 * h0 * h1) / (6.0 * h0);
        let eta = h1 * h1 * h1 / (6.0 * h0 * (h0 + h1));
        total += alpha * y[n - 1] + beta * y[n - 2] - eta * y[n - 3];
    }

    total
}

fn simpson_pair(x: &[f64], y: &[f64]) -> f64 {
    let h0 = x[1] - x[0];
    let h1 = x[2] - x[1];
    let hsum = h0 + h1;
    hsum / 6.0
        * (y[0] * (2.0 - h1 / h0) + y[1] * hsum * hsum / (h0 * h1) + y[2] * (2.0 - h0 / h1))
}
