//! Per-angle beam geometry for a measurement plan.
//!
//! The slits are optimised once at a reference angle; at every other angle
//! the openings scale linearly with the angle of incidence so that the
//! footprint and the fractional resolution stay constant.

use serde::{Deserialize, Serialize};

use crate::conversions::q_from_angle_wavelength;
use crate::error::{Error, Result, ensure_positive};
use crate::geometry::{actual_footprint, angular_divergence, beam_height_after_distance};
use crate::instrument::InstrumentGeometry;
use crate::optimizer::{OptimizationRequest, SlitReport, optimize};
use crate::reflection::critical_q;

/// How a slit opening is chosen at one angle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum SlitOpening {
    /// Reference opening multiplied by the angle of incidence
    #[default]
    Scaled,
    /// Fixed opening (mm), independent of the optimiser
    Literal(f64),
}

impl SlitOpening {
    fn resolve(self, reference: f64, angle_deg: f64) -> f64 {
        match self {
            Self::Scaled => reference * angle_deg,
            Self::Literal(opening) => opening,
        }
    }
}

/// One angle of a measurement plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSetting {
    pub angle_deg: f64,
    #[serde(default)]
    pub slit1: SlitOpening,
    #[serde(default)]
    pub slit2: SlitOpening,
}

impl AngleSetting {
    pub fn scaled(angle_deg: f64) -> Self {
        Self {
            angle_deg,
            slit1: SlitOpening::Scaled,
            slit2: SlitOpening::Scaled,
        }
    }
}

/// Ordered angles of incidence.
pub type AngleSet = Vec<AngleSetting>;

/// Inputs of the angle calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngulatorRequest {
    /// Maximum footprint on the sample (mm)
    pub footprint: f64,
    /// Fractional dθ/θ resolution (FWHM)
    pub resolution: f64,
    /// Angle at which the reference slit pair is optimised (degrees)
    pub reference_angle_deg: f64,
    pub geometry: InstrumentGeometry,
    /// Shortest wavelength used (Å)
    pub wavelength_min: f64,
    /// Longest wavelength used (Å)
    pub wavelength_max: f64,
    /// Superphase SLD (10⁻⁶ Å⁻²)
    pub sld_superphase: f64,
    /// Subphase SLD (10⁻⁶ Å⁻²)
    pub sld_subphase: f64,
    pub angles: AngleSet,
}

impl AngulatorRequest {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("shortest wavelength", self.wavelength_min)?;
        ensure_positive("longest wavelength", self.wavelength_max)?;
        if self.wavelength_min > self.wavelength_max {
            return Err(Error::InvalidInput(format!(
                "wavelength range [{}, {}] is reversed",
                self.wavelength_min, self.wavelength_max
            )));
        }
        for (name, sld) in [
            ("superphase SLD", self.sld_superphase),
            ("subphase SLD", self.sld_subphase),
        ] {
            if !sld.is_finite() {
                return Err(Error::InvalidInput(format!("{name} must be finite, got {sld}")));
            }
        }
        if self.angles.is_empty() {
            return Err(Error::InvalidInput("no angles of incidence given".to_string()));
        }
        for setting in &self.angles {
            ensure_positive("angle", setting.angle_deg)?;
            for opening in [setting.slit1, setting.slit2] {
                if let SlitOpening::Literal(v) = opening
                    && !(v >= 0.0 && v.is_finite())
                {
                    return Err(Error::InvalidInput(format!(
                        "slit opening must be >= 0, got {v}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Beam heights at one downstream position, one per angle (mm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightSeries {
    pub name: String,
    pub heights: Vec<f64>,
}

/// Per-angle results, in the order the angles were given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngulatorResult {
    pub angles: Vec<f64>,
    pub min_q: Vec<f64>,
    pub max_q: Vec<f64>,
    pub slit1: Vec<f64>,
    pub slit2: Vec<f64>,
    pub footprint: Vec<f64>,
    pub divergence: Vec<f64>,
    pub beam_heights: Vec<HeightSeries>,
    /// Superphase SLD the critical Q was computed from (10⁻⁶ Å⁻²)
    pub sld_superphase: f64,
    /// Subphase SLD the critical Q was computed from (10⁻⁶ Å⁻²)
    pub sld_subphase: f64,
    /// `NaN` when the SLDs give no total reflection edge
    pub critical_q: f64,
    /// Optimiser report at the reference angle
    pub reference: SlitReport,
}

/// Compute slit openings, Q range and beam geometry for every angle.
pub fn angulator(request: &AngulatorRequest) -> Result<AngulatorResult> {
    request.validate()?;
    let geometry = &request.geometry;
    let (l12, l2s) = (geometry.slit1_slit2, geometry.slit2_sample);

    let reference = optimize(&OptimizationRequest::new(
        request.footprint,
        request.resolution,
        request.reference_angle_deg,
        geometry.clone(),
    )?)?;
    // openings per degree of incidence
    let d1_ref = reference.slits.d1 / request.reference_angle_deg;
    let d2_ref = reference.slits.d2 / request.reference_angle_deg;

    let n = request.angles.len();
    let mut result = AngulatorResult {
        angles: Vec::with_capacity(n),
        min_q: Vec::with_capacity(n),
        max_q: Vec::with_capacity(n),
        slit1: Vec::with_capacity(n),
        slit2: Vec::with_capacity(n),
        footprint: Vec::with_capacity(n),
        divergence: Vec::with_capacity(n),
        beam_heights: geometry
            .downstream
            .iter()
            .map(|position| HeightSeries {
                name: position.name.clone(),
                heights: Vec::with_capacity(n),
            })
            .collect(),
        sld_superphase: request.sld_superphase,
        sld_subphase: request.sld_subphase,
        critical_q: critical_q(request.sld_superphase, request.sld_subphase),
        reference,
    };

    for setting in &request.angles {
        let angle = setting.angle_deg;
        let s1 = setting.slit1.resolve(d1_ref, angle);
        let s2 = setting.slit2.resolve(d2_ref, angle);

        result.angles.push(angle);
        result
            .min_q
            .push(q_from_angle_wavelength(angle, request.wavelength_max)?);
        result
            .max_q
            .push(q_from_angle_wavelength(angle, request.wavelength_min)?);
        result.slit1.push(s1);
        result.slit2.push(s2);
        result
            .footprint
            .push(actual_footprint(s1, s2, l12, l2s, angle)?);
        result
            .divergence
            .push(angular_divergence(s1, s2, angle, l12)?);
        for (series, position) in result.beam_heights.iter_mut().zip(&geometry.downstream) {
            series.heights.push(beam_height_after_distance(
                s1,
                s2,
                l12,
                geometry.distance_after_slit2(position),
            ));
        }
    }

    log::debug!("angulator: evaluated {n} angles, Qc = {}", result.critical_q);
    Ok(result)
}
