//! Plain text rendering of optimiser and calculator results.

use std::fmt;

use slitopt::{AngulatorResult, OptimizationRequest, SlitReport, has_critical_edge};

const RULE: &str = "_____________________________________________";

/// Input and output of one slit optimisation.
pub struct Optimisation<'a> {
    pub request: &'a OptimizationRequest,
    pub report: &'a SlitReport,
}

impl fmt::Display for Optimisation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { request, report } = self;
        writeln!(f, "{RULE}")?;
        writeln!(f, "INPUT")?;
        writeln!(f, "footprint: {} mm", request.footprint)?;
        writeln!(f, "fractional angular resolution (FWHM): {}", request.resolution)?;
        writeln!(f, "theta: {} degrees", request.angle_deg)?;
        writeln!(f, "OUTPUT")?;
        if let Some(suggested) = report.suggested_resolution {
            writeln!(
                f,
                "Your desired resolution results in a smaller footprint than the sample supports."
            )?;
            writeln!(
                f,
                "You can increase flux using a resolution of {suggested:.5} and still keep the same footprint."
            )?;
        }
        writeln!(f, "d1: {:.4} mm", report.slits.d1)?;
        writeln!(f, "d2: {:.4} mm", report.slits.d2)?;
        writeln!(f, "footprint: {:.3} mm", report.footprint)?;
        for height in &report.beam_heights {
            writeln!(f, "height at {}: {:.4} mm", height.name, height.height)?;
        }
        writeln!(f, "[d2star {:.6}]", report.d2_star)?;
        writeln!(f, "{RULE}")
    }
}

/// Per-angle table of the angle calculator.
pub struct AngleTable<'a>(pub &'a AngulatorResult);

impl fmt::Display for AngleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        write!(
            f,
            "{:>8} {:>10} {:>10} {:>9} {:>9} {:>10} {:>8}",
            "angle", "min Q", "max Q", "slit1", "slit2", "footprint", "dθ/θ"
        )?;
        for series in &result.beam_heights {
            write!(f, " {:>10}", series.name)?;
        }
        writeln!(f)?;

        for i in 0..result.angles.len() {
            write!(
                f,
                "{:>8.3} {:>10.5} {:>10.5} {:>9.4} {:>9.4} {:>10.3} {:>8.4}",
                result.angles[i],
                result.min_q[i],
                result.max_q[i],
                result.slit1[i],
                result.slit2[i],
                result.footprint[i],
                result.divergence[i]
            )?;
            for series in &result.beam_heights {
                write!(f, " {:>10.4}", series.heights[i])?;
            }
            writeln!(f)?;
        }

        if has_critical_edge(result.sld_superphase, result.sld_subphase) {
            writeln!(f, "Qc: {:.5} Å⁻¹", result.critical_q)
        } else {
            writeln!(f, "Qc: no total reflection edge")
        }
    }
}
