//! Keyed form fields in, keyed result arrays out.
//!
//! Web and command line front ends hand over the calculator inputs as a
//! mapping of field names to text. Every value is parsed as `f64`.

use std::collections::{BTreeMap, HashMap};

use crate::angulator::{AngleSetting, AngulatorRequest, AngulatorResult, SlitOpening};
use crate::error::{Error, Result};
use crate::instrument::InstrumentGeometry;

/// Read access to keyed text fields.
pub trait FieldSource {
    fn field(&self, key: &str) -> Option<&str>;
}

impl<S: AsRef<str>> FieldSource for HashMap<String, S> {
    fn field(&self, key: &str) -> Option<&str> {
        self.get(key).map(AsRef::as_ref)
    }
}

impl<S: AsRef<str>> FieldSource for BTreeMap<String, S> {
    fn field(&self, key: &str) -> Option<&str> {
        self.get(key).map(AsRef::as_ref)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FieldSource for [(K, V)] {
    fn field(&self, key: &str) -> Option<&str> {
        // later entries win, like repeated query parameters
        self.iter()
            .rev()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

/// Parse an optional numeric field. Blank values count as missing.
pub fn optional_f64<F: FieldSource + ?Sized>(fields: &F, key: &str) -> Result<Option<f64>> {
    match fields.field(key).map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => match text.parse::<f64>() {
            // "NaN" and "inf" parse, but are not numbers a form can mean
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(Error::InvalidNumber {
                field: key.to_string(),
                value: text.to_string(),
            }),
        },
    }
}

/// Parse a required numeric field.
pub fn required_f64<F: FieldSource + ?Sized>(fields: &F, key: &str) -> Result<f64> {
    optional_f64(fields, key)?.ok_or_else(|| Error::MissingField(key.to_string()))
}

/// Field names understood by [`parse_angulator`].
pub mod keys {
    pub const L12: &str = "L12";
    pub const L2S: &str = "L2S";
    pub const LS4: &str = "LS4";
    pub const LSD: &str = "LSD";
    pub const FOOTPRINT: &str = "footprint";
    pub const RESOLUTION: &str = "resolution";
    pub const ANGLE: &str = "angle";
    pub const LAMBDA_MIN: &str = "lambdamin";
    pub const LAMBDA_MAX: &str = "lambdamax";
    pub const SLD_SUPER: &str = "sld1";
    pub const SLD_SUB: &str = "sld2";
}

/// Silicon, the usual substrate.
const DEFAULT_SLD_SUB: f64 = 2.07;

/// Build an [`AngulatorRequest`] from form fields.
///
/// Angles are read from `a1`, `a2`, ... until the first missing key.
/// `s1_aN` / `s2_aN` fix the slit 1 / slit 2 opening at angle `N` instead
/// of scaling the optimised one. `LS4` and `LSD` add the slit 4 and
/// detector positions.
pub fn parse_angulator<F: FieldSource + ?Sized>(fields: &F) -> Result<AngulatorRequest> {
    let mut geometry = InstrumentGeometry::new(
        required_f64(fields, keys::L12)?,
        required_f64(fields, keys::L2S)?,
    )?;
    if let Some(ls4) = optional_f64(fields, keys::LS4)? {
        geometry = geometry.with_position("slit4", ls4)?;
    }
    if let Some(lsd) = optional_f64(fields, keys::LSD)? {
        geometry = geometry.with_position("detector", lsd)?;
    }

    let mut angles = Vec::new();
    for index in 1.. {
        let Some(angle_deg) = optional_f64(fields, &format!("a{index}"))? else {
            break;
        };
        let literal = |slit: u8| -> Result<SlitOpening> {
            Ok(optional_f64(fields, &format!("s{slit}_a{index}"))?
                .map_or(SlitOpening::Scaled, SlitOpening::Literal))
        };
        angles.push(AngleSetting {
            angle_deg,
            slit1: literal(1)?,
            slit2: literal(2)?,
        });
    }
    if angles.is_empty() {
        return Err(Error::MissingField("a1".to_string()));
    }

    let request = AngulatorRequest {
        footprint: required_f64(fields, keys::FOOTPRINT)?,
        resolution: required_f64(fields, keys::RESOLUTION)?,
        reference_angle_deg: optional_f64(fields, keys::ANGLE)?.unwrap_or(1.0),
        geometry,
        wavelength_min: required_f64(fields, keys::LAMBDA_MIN)?,
        wavelength_max: required_f64(fields, keys::LAMBDA_MAX)?,
        sld_superphase: optional_f64(fields, keys::SLD_SUPER)?.unwrap_or(0.0),
        sld_subphase: optional_f64(fields, keys::SLD_SUB)?.unwrap_or(DEFAULT_SLD_SUB),
        angles,
    };
    request.validate()?;
    Ok(request)
}

/// The calculator page's initial form.
pub fn default_fields() -> BTreeMap<String, String> {
    [
        (keys::L12, "2859.5"),
        (keys::L2S, "276"),
        (keys::RESOLUTION, "0.05"),
        (keys::FOOTPRINT, "50"),
        (keys::LAMBDA_MIN, "2.8"),
        (keys::LAMBDA_MAX, "18.5"),
        ("a1", "0.5"),
        ("a2", "2"),
        ("a3", "6"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl AngulatorResult {
    /// Flatten into named arrays: `minqvals`, `maxqvals`, `slit1`, `slit2`,
    /// `footprint`, `divergence`, `height_<position>` and the one-element
    /// `qc`.
    pub fn to_fields(&self) -> BTreeMap<String, Vec<f64>> {
        let mut out = BTreeMap::new();
        out.insert("angles".to_string(), self.angles.clone());
        out.insert("minqvals".to_string(), self.min_q.clone());
        out.insert("maxqvals".to_string(), self.max_q.clone());
        out.insert("slit1".to_string(), self.slit1.clone());
        out.insert("slit2".to_string(), self.slit2.clone());
        out.insert("footprint".to_string(), self.footprint.clone());
        out.insert("divergence".to_string(), self.divergence.clone());
        for series in &self.beam_heights {
            out.insert(format!("height_{}", series.name), series.heights.clone());
        }
        out.insert("qc".to_string(), vec![self.critical_q]);
        out
    }
}
