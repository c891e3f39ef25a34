pub mod angulator;
pub mod beam_fraction;
pub mod constants;
pub mod conversions;
pub mod error;
pub mod form;
pub mod geometry;
pub mod instrument;
pub mod integrate;
pub mod interp;
pub mod minimize;
pub mod optimizer;
pub mod reflection;

pub use angulator::{
    AngleSet, AngleSetting, AngulatorRequest, AngulatorResult, HeightSeries, SlitOpening,
    angulator,
};
pub use beam_fraction::{beam_fraction_gaussian, beam_fraction_kernel};
pub use conversions::{
    angle_from_q_wavelength, energy_from_wavelength, q_from_angle_wavelength,
    velocity_from_wavelength, wavelength_from_energy, wavelength_from_q_angle,
    wavelength_from_tof,
};
pub use error::{Error, Result};
pub use form::{FieldSource, parse_angulator};
pub use geometry::{actual_footprint, angular_divergence, beam_height_after_distance};
pub use instrument::{DownstreamPosition, InstrumentGeometry};
pub use optimizer::{
    BeamHeight, OptimizationObserver, OptimizationRequest, SlitPair, SlitReport, optimize,
    optimize_slits, optimize_with_observer,
};
#[cfg(feature = "complex")]
pub use reflection::critical_q_complex;
pub use reflection::{critical_q, has_critical_edge};
