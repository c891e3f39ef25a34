//! WASM bindings for the slit optimiser.
//!
//! Build with:
//! ```sh
//! wasm-pack build -p slitopt-wasm
//! ```

use std::collections::BTreeMap;

use js_sys::{Array, Float64Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use slitopt::form::{self, parse_angulator};

fn to_js(e: slitopt::Error) -> JsError {
    JsError::new(&e.to_string())
}

/// Read a plain JS object of form fields. Values may be strings or numbers.
fn read_fields(fields: &Object) -> Result<BTreeMap<String, String>, JsError> {
    let mut out = BTreeMap::new();
    for entry in Object::entries(fields).iter() {
        let pair = Array::from(&entry);
        let key = pair
            .get(0)
            .as_string()
            .ok_or_else(|| JsError::new("form field names must be strings"))?;
        let value = pair.get(1);
        let text = match (value.as_string(), value.as_f64()) {
            (Some(s), _) => s,
            (None, Some(v)) => v.to_string(),
            // null / undefined count as an empty field
            (None, None) => String::new(),
        };
        out.insert(key, text);
    }
    Ok(out)
}

fn write_fields(fields: &BTreeMap<String, Vec<f64>>) -> Result<Object, JsError> {
    let out = Object::new();
    for (key, values) in fields {
        let array = Float64Array::from(values.as_slice());
        Reflect::set(&out, &JsValue::from_str(key), &array)
            .map_err(|_| JsError::new(&format!("cannot set result field '{key}'")))?;
    }
    Ok(out)
}

// ── Slit optimisation ──

/// Returns [d1, d2], the optimised slit openings in mm.
#[wasm_bindgen]
pub fn optimize_slits(
    footprint: f64,
    resolution: f64,
    angle: f64,
    l12: f64,
    l2s: f64,
) -> Result<Vec<f64>, JsError> {
    let slits = slitopt::optimize_slits(footprint, resolution, angle, l12, l2s).map_err(to_js)?;
    Ok(vec![slits.d1, slits.d2])
}

/// Runs the angle calculator on a form object.
///
/// Recognised fields: `L12`, `L2S`, `LS4`, `LSD`, `footprint`,
/// `resolution`, `angle`, `lambdamin`, `lambdamax`, `sld1`, `sld2`, `a1`,
/// `a2`, ... and `s1_aN` / `s2_aN` overrides. The result maps `minqvals`,
/// `maxqvals`, `slit1`, `slit2`, `footprint`, `divergence`,
/// `height_<position>` and `qc` to `Float64Array`s.
#[wasm_bindgen]
pub fn angulator(fields: &Object) -> Result<Object, JsError> {
    let fields = read_fields(fields)?;
    let request = parse_angulator(&fields).map_err(to_js)?;
    let result = slitopt::angulator(&request).map_err(to_js)?;
    write_fields(&result.to_fields())
}

/// Returns the calculator's initial form.
#[wasm_bindgen]
pub fn default_fields() -> Result<Object, JsError> {
    let out = Object::new();
    for (key, value) in form::default_fields() {
        Reflect::set(&out, &JsValue::from_str(&key), &JsValue::from_str(&value))
            .map_err(|_| JsError::new(&format!("cannot set form field '{key}'")))?;
    }
    Ok(out)
}

// ── Beam geometry ──

/// Returns the illuminated sample length (mm).
#[wasm_bindgen]
pub fn actual_footprint(d1: f64, d2: f64, l12: f64, l2s: f64, angle: f64) -> Result<f64, JsError> {
    slitopt::actual_footprint(d1, d2, l12, l2s, angle).map_err(to_js)
}

/// Returns the fractional angular resolution dθ/θ (FWHM).
#[wasm_bindgen]
pub fn angular_divergence(d1: f64, d2: f64, angle: f64, l12: f64) -> Result<f64, JsError> {
    slitopt::angular_divergence(d1, d2, angle, l12).map_err(to_js)
}

/// Returns the beam height a distance after slit 2 (or before slit 1 when
/// negative).
#[wasm_bindgen]
pub fn beam_height_after_distance(d1: f64, d2: f64, l12: f64, distance: f64) -> f64 {
    slitopt::beam_height_after_distance(d1, d2, l12, distance)
}

/// Returns the fraction of a Gaussian beam intercepted by the sample.
#[wasm_bindgen]
pub fn beam_fraction_gaussian(fwhm: f64, sample_length: f64, angle: f64) -> Result<f64, JsError> {
    slitopt::beam_fraction_gaussian(fwhm, sample_length, angle).map_err(to_js)
}

// ── Q and wavelength ──

/// Returns Q (Å⁻¹) for an angle (degrees) and wavelength (Å).
#[wasm_bindgen]
pub fn q_from_angle_wavelength(angle: f64, wavelength: f64) -> Result<f64, JsError> {
    slitopt::q_from_angle_wavelength(angle, wavelength).map_err(to_js)
}

/// Returns the angle (degrees) reaching Q at a wavelength.
#[wasm_bindgen]
pub fn angle_from_q_wavelength(q: f64, wavelength: f64) -> Result<f64, JsError> {
    slitopt::angle_from_q_wavelength(q, wavelength).map_err(to_js)
}

/// Returns the wavelength (Å) reaching Q at an angle.
#[wasm_bindgen]
pub fn wavelength_from_q_angle(q: f64, angle: f64) -> Result<f64, JsError> {
    slitopt::wavelength_from_q_angle(q, angle).map_err(to_js)
}

/// Returns the critical Q (Å⁻¹) for SLDs in 10⁻⁶ Å⁻², `NaN` when there is
/// no total reflection edge.
#[wasm_bindgen]
pub fn critical_q(sld_superphase: f64, sld_subphase: f64) -> f64 {
    slitopt::critical_q(sld_superphase, sld_subphase)
}
