//! Fraction of the incident beam intercepted by a tilted sample.

use statrs::function::erf::erf;
use std::f64::consts::SQRT_2;

use crate::constants::FWHM_TO_SIGMA;
use crate::error::{Error, Result, ensure_positive};
use crate::integrate::simpson;
use crate::interp::interp_one;

/// Cumulative distribution function of the standard normal distribution.
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

/// Height of the beam seen by a sample of a given length at an angle.
fn projected_height(sample_length: f64, angle_deg: f64) -> Result<f64> {
    if !(sample_length >= 0.0 && sample_length.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "sample length must be >= 0, got {sample_length}"
        )));
    }
    Ok((sample_length * angle_deg.to_radians().sin()).abs())
}

/// Fraction of a Gaussian beam of a given FWHM that hits the sample.
///
/// # Arguments
/// * `fwhm` - Full width at half maximum of the beam profile (mm)
/// * `sample_length` - Length of the sample along the beam (mm)
/// * `angle_deg` - Angle of incidence in degrees
pub fn beam_fraction_gaussian(fwhm: f64, sample_length: f64, angle_deg: f64) -> Result<f64> {
    ensure_positive("FWHM", fwhm)?;
    let height = projected_height(sample_length, angle_deg)?;
    let sigma = fwhm * FWHM_TO_SIGMA;
    let fraction = 2.0 * (normal_cdf(height / 2.0 / sigma) - 0.5);
    Ok(fraction.clamp(0.0, 1.0))
}

/// Fraction of an arbitrary beam profile that hits the sample.
///
/// The profile is given as intensity samples at strictly increasing
/// positions, centred on the beam axis. Both the illuminated part and the
/// whole profile are integrated with the composite Simpson rule.
///
/// # Arguments
/// * `positions` - Sample positions across the beam (mm)
/// * `intensities` - Beam intensity at each position
/// * `sample_length` - Length of the sample along the beam (mm)
/// * `angle_deg` - Angle of incidence in degrees
pub fn beam_fraction_kernel(
    positions: &[f64],
    intensities: &[f64],
    sample_length: f64,
    angle_deg: f64,
) -> Result<f64> {
    if positions.len() != intensities.len() {
        return Err(Error::InvalidInput(format!(
            "positions ({}) and intensities ({}) lengths must match",
            positions.len(),
            intensities.len()
        )));
    }
    if positions.len() < 3 {
        return Err(Error::InvalidInput(
            "beam profile needs at least 3 samples".to_string(),
        ));
    }
    if positions.windows(2).any(|w| w[1] <= w[0]) {
        return Err(Error::InvalidInput(
            "beam profile positions must be strictly increasing".to_string(),
        ));
    }

    let half = projected_height(sample_length, angle_deg)? / 2.0;
    let (lo, hi) = (positions[0], positions[positions.len() - 1]);
    if -half < lo || half > hi {
        return Err(Error::InvalidInput(format!(
            "illuminated half height {half} lies outside the profile [{lo}, {hi}]"
        )));
    }

    let total = simpson(positions, intensities);
    if total <= 0.0 || !total.is_finite() {
        return Err(Error::InvalidInput(
            "beam profile must have a positive integral".to_string(),
        ));
    }
    if half == 0.0 {
        return Ok(0.0);
    }

    // Clip the profile to [-half, half], interpolating the end points.
    // Samples hugging an end point are dropped so no Simpson panel becomes
    // degenerate.
    let min_spacing = positions
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f64::INFINITY, f64::min);
    let gap = 1e-3 * min_spacing;
    let mut x = vec![-half];
    let mut y = vec![interp_one(-half, positions, intensities)];
    for (&p, &i) in positions.iter().zip(intensities) {
        if p > -half + gap && p < half - gap {
            x.push(p);
            y.push(i);
        }
    }
    x.push(half);
    y.push(interp_one(half, positions, intensities));

    Ok((simpson(&x, &y) / total).clamp(0.0, 1.0))
}
