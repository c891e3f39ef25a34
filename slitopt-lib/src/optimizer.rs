//! Collimation slit optimiser.
//!
//! For a given angle and angular resolution, find the slit openings that
//! maximise the footprint (and so the intensity) on the sample without
//! exceeding the requested footprint. See equations 11-14 in:
//!
//! de Haan, V.-O. et al., ROG, the neutron reflectometer at IRI Delft,
//! Nuclear Instruments and Methods in Physics Research A 362 (1995) 434-453.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;

use crate::constants::DIVERGENCE_FWHM_FACTOR;
use crate::error::{Result, ensure_positive};
use crate::geometry::{actual_footprint, angular_divergence, beam_height_after_distance};
use crate::instrument::InstrumentGeometry;
use crate::minimize::{MinimizeOptions, minimize_bounded_observed};

/// Openings of the two collimation slits (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlitPair {
    pub d1: f64,
    pub d2: f64,
}

/// Footprint and resolution targets for one angle of incidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    /// Maximum footprint on the sample (mm)
    pub footprint: f64,
    /// Fractional dθ/θ resolution (FWHM)
    pub resolution: f64,
    /// Angle of incidence (degrees)
    pub angle_deg: f64,
    pub geometry: InstrumentGeometry,
}

impl OptimizationRequest {
    pub fn new(
        footprint: f64,
        resolution: f64,
        angle_deg: f64,
        geometry: InstrumentGeometry,
    ) -> Result<Self> {
        let request = Self {
            footprint,
            resolution,
            angle_deg,
            geometry,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("footprint", self.footprint)?;
        ensure_positive("resolution", self.resolution)?;
        ensure_positive("angle", self.angle_deg)?;
        self.geometry.validate()
    }
}

/// Beam height at a named downstream position (mm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamHeight {
    pub name: String,
    pub height: f64,
}

/// Everything the optimiser found out about a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlitReport {
    pub slits: SlitPair,
    /// Normalised opening of slit 1 at the optimum
    pub d1_star: f64,
    /// Normalised opening of slit 2 at the optimum
    pub d2_star: f64,
    /// d2 / d1
    pub multfactor: f64,
    /// The optimum was unphysical and both slits were set equal
    pub equal_slits: bool,
    /// Illuminated sample length (mm)
    pub footprint: f64,
    /// Fractional angular resolution actually delivered
    pub divergence: f64,
    pub beam_heights: Vec<BeamHeight>,
    /// A coarser resolution that would still fit in the requested
    /// footprint. Only set when the slits were set equal.
    pub suggested_resolution: Option<f64>,
    /// Objective value at the optimum
    pub objective: f64,
    /// Objective evaluations used by the minimiser
    pub evaluations: usize,
}

/// Hook for watching the optimiser at work.
///
/// Both methods default to doing nothing.
pub trait OptimizationObserver {
    /// Called for every objective evaluation of the normalised slit 2
    /// opening.
    fn on_evaluation(&mut self, _d2_star: f64, _objective: f64) {}

    /// Called once with the finished report.
    fn on_report(&mut self, _report: &SlitReport) {}
}

impl OptimizationObserver for () {}

/// Normalised slit openings lie on the unit circle.
fn normalised_d1(d2_star: f64) -> f64 {
    (1.0 - d2_star * d2_star).max(0.0).sqrt()
}

struct Solution {
    slits: SlitPair,
    d1_star: f64,
    d2_star: f64,
    multfactor: f64,
    equal_slits: bool,
    objective: f64,
    evaluations: usize,
}

fn solve<O>(
    footprint: f64,
    resolution: f64,
    angle_deg: f64,
    l12: f64,
    l2s: f64,
    observer: &mut O,
) -> Result<Solution>
where
    O: OptimizationObserver + ?Sized,
{
    let l1_star = DIVERGENCE_FWHM_FACTOR * footprint / l12 / resolution;
    let ratio = l2s / l12;
    let objective = |d2: f64| (d2 + ratio * (d2 + normalised_d1(d2)) - l1_star).powi(2);

    let min = minimize_bounded_observed(
        objective,
        (0.0, 1.0),
        MinimizeOptions::default(),
        |x, fx| observer.on_evaluation(x, fx),
    )?;

    let mut d2_star = min.x;
    let mut d1_star = normalised_d1(d2_star);
    let equal_slits = d2_star > d1_star;
    let multfactor = if equal_slits {
        log::debug!(
            "optimum d2* = {d2_star} exceeds d1* = {d1_star}; using equal slit openings"
        );
        d2_star = FRAC_1_SQRT_2;
        d1_star = FRAC_1_SQRT_2;
        1.0
    } else {
        d2_star / d1_star
    };

    let d1 = d1_star * resolution / DIVERGENCE_FWHM_FACTOR * angle_deg.to_radians() * l12;
    let d2 = d1 * multfactor;
    log::debug!(
        "optimised slits d1 = {d1} mm, d2 = {d2} mm after {} evaluations",
        min.evaluations
    );

    Ok(Solution {
        slits: SlitPair { d1, d2 },
        d1_star,
        d2_star,
        multfactor,
        equal_slits,
        objective: min.f_min,
        evaluations: min.evaluations,
    })
}

/// Optimise slit openings for a footprint and resolution at one angle.
///
/// # Arguments
/// * `footprint` - Maximum footprint onto the sample (mm)
/// * `resolution` - Fractional dθ/θ resolution (FWHM)
/// * `angle_deg` - Angle of incidence in degrees
/// * `l12` - Slit 1 to slit 2 distance (mm)
/// * `l2s` - Slit 2 to sample distance (mm)
pub fn optimize_slits(
    footprint: f64,
    resolution: f64,
    angle_deg: f64,
    l12: f64,
    l2s: f64,
) -> Result<SlitPair> {
    ensure_positive("footprint", footprint)?;
    ensure_positive("resolution", resolution)?;
    ensure_positive("angle", angle_deg)?;
    ensure_positive("slit1-slit2 distance", l12)?;
    ensure_positive("slit2-sample distance", l2s)?;
    Ok(solve(footprint, resolution, angle_deg, l12, l2s, &mut ())?.slits)
}

/// Optimise a request and report the resulting beam geometry.
pub fn optimize(request: &OptimizationRequest) -> Result<SlitReport> {
    optimize_with_observer(request, &mut ())
}

/// Like [`optimize`], reporting progress to `observer`.
pub fn optimize_with_observer<O>(request: &OptimizationRequest, observer: &mut O) -> Result<SlitReport>
where
    O: OptimizationObserver + ?Sized,
{
    request.validate()?;
    let geometry = &request.geometry;
    let (l12, l2s) = (geometry.slit1_slit2, geometry.slit2_sample);

    let solution = solve(
        request.footprint,
        request.resolution,
        request.angle_deg,
        l12,
        l2s,
        observer,
    )?;
    let SlitPair { d1, d2 } = solution.slits;

    let footprint = actual_footprint(d1, d2, l12, l2s, request.angle_deg)?;
    let divergence = angular_divergence(d1, d2, request.angle_deg, l12)?;
    let beam_heights = geometry
        .downstream
        .iter()
        .map(|position| BeamHeight {
            name: position.name.clone(),
            height: beam_height_after_distance(d1, d2, l12, geometry.distance_after_slit2(position)),
        })
        .collect();

    let suggested_resolution = if solution.equal_slits {
        let suggested = request.resolution * request.footprint / footprint;
        log::warn!(
            "resolution {} gives a {footprint:.2} mm footprint, smaller than the {} mm \
             the sample supports; {suggested:.4} keeps the footprint with more flux",
            request.resolution,
            request.footprint
        );
        Some(suggested)
    } else {
        None
    };

    let report = SlitReport {
        slits: solution.slits,
        d1_star: solution.d1_star,
        d2_star: solution.d2_star,
        multfactor: solution.multfactor,
        equal_slits: solution.equal_slits,
        footprint,
        divergence,
        beam_heights,
        suggested_resolution,
        objective: solution.objective,
        evaluations: solution.evaluations,
    };
    observer.on_report(&report);
    Ok(report)
}
