/// Linear interpolation of a single value (equivalent to `numpy.interp`).
///
/// Values outside the tabulated range are clamped to the boundary values.
pub fn interp_one(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[xp.len() - 1] {
        return fp[fp.len() - 1];
    }

    let idx = xp.partition_point(|&v| v < x);
    if xp[idx] == x {
        return fp[idx];
    }

    let lo = idx - 1;
    let t = (x - xp[lo]) / (xp[idx] - xp[lo]);
    fp[lo] + t * (fp[idx] - fp[lo])
}
