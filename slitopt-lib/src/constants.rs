/// Divergence-to-resolution factor: converts the slit-geometry divergence
/// into a FWHM fractional resolution for a trapezoidal beam profile.
pub const DIVERGENCE_FWHM_FACTOR: f64 = 0.68;

/// Scattering length densities are entered in units of 10⁻⁶ Å⁻².
pub const SLD_UNIT: f64 = 1e-6;

/// Neutron energy times wavelength squared (meV·Å²)
pub const NEUTRON_E_LAMBDA2: f64 = 81.8042;

/// Planck's constant divided by the neutron mass (Å·m/s)
pub const H_OVER_MN: f64 = 3956.034;

/// Sigma of a Gaussian per unit FWHM, 1 / (2 √(2 ln 2)).
pub const FWHM_TO_SIGMA: f64 = 0.424_660_900_144_009_5;
