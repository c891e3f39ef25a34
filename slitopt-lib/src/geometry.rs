//! Beam envelope of a two-slit collimator.
//!
//! Lengths are in any consistent unit (mm throughout this crate); angles
//! are in degrees.

use crate::constants::DIVERGENCE_FWHM_FACTOR;
use crate::error::{Error, Result};

/// Total width of the beam a given distance away from a collimation slit.
///
/// A non-negative `distance` is measured downstream of the second slit, a
/// negative one upstream of the first slit.
///
/// # Arguments
/// * `d1` - Opening of the first collimation slit
/// * `d2` - Opening of the second collimation slit
/// * `l12` - Distance between the two slits
/// * `distance` - Distance from the last (or first) slit
pub fn beam_height_after_distance(d1: f64, d2: f64, l12: f64, distance: f64) -> f64 {
    let dtheta = (d1 + d2) / 2.0 / l12;
    if distance >= 0.0 {
        d2 + 2.0 * dtheta * distance
    } else {
        d1 + 2.0 * dtheta * distance.abs()
    }
}

/// Length of sample illuminated by the beam at a given incidence angle.
///
/// # Arguments
/// * `l2s` - Distance from the second slit to the sample
/// * `angle_deg` - Angle of incidence in degrees
pub fn actual_footprint(d1: f64, d2: f64, l12: f64, l2s: f64, angle_deg: f64) -> Result<f64> {
    let theta = nonzero_radians(angle_deg)?;
    Ok(beam_height_after_distance(d1, d2, l12, l2s) / theta)
}

/// Fractional angular resolution (dθ/θ, FWHM) for a set of collimation
/// conditions.
pub fn angular_divergence(d1: f64, d2: f64, angle_deg: f64, l12: f64) -> Result<f64> {
    let theta = nonzero_radians(angle_deg)?;
    Ok(DIVERGENCE_FWHM_FACTOR * d1.hypot(d2) / l12 / theta)
}

fn nonzero_radians(angle_deg: f64) -> Result<f64> {
    if angle_deg == 0.0 || !angle_deg.is_finite() {
        return Err(Error::InvalidInput(format!(
            "angle of incidence must be non-zero, got {angle_deg}"
        )));
    }
    Ok(angle_deg.to_radians())
}
