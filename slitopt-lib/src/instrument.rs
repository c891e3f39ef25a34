use serde::{Deserialize, Serialize};

use crate::error::{Result, ensure_positive};

/// A named position downstream of the sample where the beam height is
/// reported (a slit, a monitor, the detector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownstreamPosition {
    pub name: String,
    /// Distance from the sample (mm)
    pub distance_from_sample: f64,
}

impl DownstreamPosition {
    pub fn new(name: impl Into<String>, distance_from_sample: f64) -> Self {
        Self {
            name: name.into(),
            distance_from_sample,
        }
    }
}

/// Distances between the optical elements of a reflectometer (mm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentGeometry {
    /// Slit 1 to slit 2
    pub slit1_slit2: f64,
    /// Slit 2 to sample
    pub slit2_sample: f64,
    #[serde(default)]
    pub downstream: Vec<DownstreamPosition>,
}

impl InstrumentGeometry {
    /// Build a validated geometry without downstream positions.
    pub fn new(slit1_slit2: f64, slit2_sample: f64) -> Result<Self> {
        let geometry = Self {
            slit1_slit2,
            slit2_sample,
            downstream: Vec::new(),
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Add a downstream position.
    pub fn with_position(mut self, name: impl Into<String>, distance_from_sample: f64) -> Result<Self> {
        let position = DownstreamPosition::new(name, distance_from_sample);
        ensure_positive(&position.name, distance_from_sample)?;
        self.downstream.push(position);
        Ok(self)
    }

    /// The Platypus reflectometer (ANSTO): slit 4 and detector after the
    /// sample.
    pub fn platypus() -> Self {
        Self {
            slit1_slit2: 2859.5,
            slit2_sample: 276.0,
            downstream: vec![
                DownstreamPosition::new("slit4", 290.5),
                DownstreamPosition::new("detector", 2500.0),
            ],
        }
    }

    /// Check that every distance is a positive length.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("slit1-slit2 distance", self.slit1_slit2)?;
        ensure_positive("slit2-sample distance", self.slit2_sample)?;
        for position in &self.downstream {
            ensure_positive(&position.name, position.distance_from_sample)?;
        }
        Ok(())
    }

    /// Distance from slit 2 to a downstream position.
    pub fn distance_after_slit2(&self, position: &DownstreamPosition) -> f64 {
        self.slit2_sample + position.distance_from_sample
    }
}
