//! Total external reflection edge.
//!
//! Scattering length densities are in units of 10⁻⁶ Å⁻² (silicon is 2.07),
//! Q is returned in Å⁻¹.

#[cfg(feature = "complex")]
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::constants::SLD_UNIT;

/// Critical momentum transfer for a beam travelling through the
/// superphase and reflecting from the subphase.
///
/// Returns `NaN` when the subphase SLD is below the superphase SLD: there is
/// no total reflection edge in that case.
pub fn critical_q(sld_superphase: f64, sld_subphase: f64) -> f64 {
    let radicand = 16.0 * PI * (sld_subphase - sld_superphase) * SLD_UNIT;
    if radicand < 0.0 {
        return f64::NAN;
    }
    radicand.sqrt()
}

/// Critical momentum transfer as a complex number.
///
/// Purely imaginary when the subphase SLD is below the superphase SLD.
#[cfg(feature = "complex")]
pub fn critical_q_complex(sld_superphase: f64, sld_subphase: f64) -> Complex64 {
    Complex64::new(16.0 * PI * (sld_subphase - sld_superphase) * SLD_UNIT, 0.0).sqrt()
}

/// True when the pair of SLDs produces a total reflection edge.
pub fn has_critical_edge(sld_superphase: f64, sld_subphase: f64) -> bool {
    critical_q(sld_superphase, sld_subphase).is_finite()
}
