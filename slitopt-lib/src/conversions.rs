//! Momentum transfer, angle and neutron wavelength conversions.
//!
//! Wavelengths are in Å, Q in Å⁻¹, angles of incidence in degrees.

use std::f64::consts::PI;

use crate::constants::{H_OVER_MN, NEUTRON_E_LAMBDA2};
use crate::error::{Error, Result, ensure_positive};

/// Momentum transfer `Q = 4π sin(θ) / λ`.
pub fn q_from_angle_wavelength(angle_deg: f64, wavelength: f64) -> Result<f64> {
    ensure_positive("wavelength", wavelength)?;
    Ok(4.0 * PI * angle_deg.to_radians().sin() / wavelength)
}

/// Wavelength at which an angle of incidence reaches a given Q.
pub fn wavelength_from_q_angle(q: f64, angle_deg: f64) -> Result<f64> {
    if q == 0.0 {
        return Err(Error::Domain(
            "cannot invert Q = 0 to a wavelength".to_string(),
        ));
    }
    Ok(4.0 * PI * angle_deg.to_radians().sin() / q)
}

/// Angle of incidence (degrees) at which a wavelength reaches a given Q.
pub fn angle_from_q_wavelength(q: f64, wavelength: f64) -> Result<f64> {
    let arg = q * wavelength / (4.0 * PI);
    if !(-1.0..=1.0).contains(&arg) {
        return Err(Error::Domain(format!(
            "Q = {q} is unreachable at wavelength {wavelength} (sin θ = {arg})"
        )));
    }
    Ok(arg.asin().to_degrees())
}

/// Neutron kinetic energy (meV) for a wavelength (Å).
pub fn energy_from_wavelength(wavelength: f64) -> Result<f64> {
    ensure_positive("wavelength", wavelength)?;
    Ok(NEUTRON_E_LAMBDA2 / (wavelength * wavelength))
}

/// Neutron wavelength (Å) for a kinetic energy (meV).
pub fn wavelength_from_energy(energy: f64) -> Result<f64> {
    ensure_positive("energy", energy)?;
    Ok((NEUTRON_E_LAMBDA2 / energy).sqrt())
}

/// Neutron velocity (m/s) for a wavelength (Å).
pub fn velocity_from_wavelength(wavelength: f64) -> Result<f64> {
    ensure_positive("wavelength", wavelength)?;
    Ok(H_OVER_MN / wavelength)
}

/// Neutron wavelength (Å) from a time of flight (µs) over a flight path (mm).
pub fn wavelength_from_tof(tof_us: f64, flight_length_mm: f64) -> Result<f64> {
    ensure_positive("time of flight", tof_us)?;
    ensure_positive("flight length", flight_length_mm)?;
    // µs / mm is s / km, hence the 1e-3
    Ok(H_OVER_MN * tof_us / flight_length_mm * 1e-3)
}
