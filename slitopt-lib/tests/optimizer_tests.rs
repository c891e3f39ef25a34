use approx::assert_relative_eq;
use slitopt::{
    InstrumentGeometry, OptimizationObserver, OptimizationRequest, SlitReport,
    actual_footprint, angular_divergence, optimize, optimize_slits, optimize_with_observer,
};

const L12: f64 = 2859.5;
const L2S: f64 = 276.0;

#[test]
fn test_platypus_50mm_5_percent() {
    let slits = optimize_slits(50.0, 0.05, 1.0, L12, L2S).unwrap();
    assert_relative_eq!(slits.d1, 3.638_739_41, epsilon = 1e-6);
    assert_relative_eq!(slits.d2, 0.475_551_71, epsilon = 1e-6);
    assert!(slits.d2 < slits.d1);
}

#[test]
fn test_solution_meets_both_targets() {
    for &(footprint, resolution, angle) in &[(50.0, 0.05, 1.0), (50.0, 0.04, 2.0), (100.0, 0.033, 0.8)] {
        let s = optimize_slits(footprint, resolution, angle, L12, L2S).unwrap();
        let fp = actual_footprint(s.d1, s.d2, L12, L2S, angle).unwrap();
        let div = angular_divergence(s.d1, s.d2, angle, L12).unwrap();
        assert_relative_eq!(fp, footprint, max_relative = 1e-6);
        assert_relative_eq!(div, resolution, max_relative = 1e-9);
    }
}

#[test]
fn test_second_slit_never_larger() {
    for &footprint in &[5.0, 20.0, 50.0, 120.0, 400.0] {
        for &resolution in &[0.01, 0.02, 0.033, 0.05, 0.08] {
            for &angle in &[0.3, 1.0, 4.0] {
                let s = optimize_slits(footprint, resolution, angle, L12, L2S).unwrap();
                assert!(
                    s.d2 <= s.d1,
                    "footprint {footprint}, resolution {resolution}, angle {angle}: {s:?}"
                );
                assert!(s.d1 >= 0.0 && s.d2 >= 0.0);
            }
        }
    }
}

#[test]
fn test_equal_slit_branch() {
    // a long sample at fine resolution cannot be filled
    let request =
        OptimizationRequest::new(200.0, 0.01, 1.0, InstrumentGeometry::platypus()).unwrap();
    let report = optimize(&request).unwrap();

    assert!(report.equal_slits);
    assert_eq!(report.multfactor, 1.0);
    assert_eq!(report.slits.d1, report.slits.d2);
    assert_relative_eq!(report.slits.d1, 0.518_971_56, epsilon = 1e-6);
    assert_relative_eq!(report.footprint, 35.474_923, epsilon = 1e-5);

    let suggested = report.suggested_resolution.unwrap();
    assert_relative_eq!(suggested, 0.056_377_85, epsilon = 1e-7);
    assert!(suggested > request.resolution);
}

#[test]
fn test_report_heights() {
    let request =
        OptimizationRequest::new(50.0, 0.05, 1.0, InstrumentGeometry::platypus()).unwrap();
    let report = optimize(&request).unwrap();

    assert!(!report.equal_slits);
    assert!(report.suggested_resolution.is_none());
    assert_relative_eq!(report.d2_star, 0.129_589_31, epsilon = 1e-6);
    assert_relative_eq!(report.multfactor, 0.130_691_34, epsilon = 1e-6);
    assert_relative_eq!(report.divergence, 0.05, epsilon = 1e-9);

    let names: Vec<&str> = report.beam_heights.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, ["slit4", "detector"]);
    assert_relative_eq!(report.beam_heights[0].height, 1.290_640_34, epsilon = 1e-6);
    assert_relative_eq!(report.beam_heights[1].height, 4.469_701_80, epsilon = 1e-6);
}

#[test]
fn test_scales_linearly_with_angle() {
    let at_one = optimize_slits(50.0, 0.05, 1.0, L12, L2S).unwrap();
    let at_three = optimize_slits(50.0, 0.05, 3.0, L12, L2S).unwrap();
    assert_relative_eq!(at_three.d1, 3.0 * at_one.d1, max_relative = 1e-12);
    assert_relative_eq!(at_three.d2, 3.0 * at_one.d2, max_relative = 1e-12);
}

#[test]
fn test_invalid_request() {
    let err = OptimizationRequest::new(50.0, 0.0, 1.0, InstrumentGeometry::platypus()).unwrap_err();
    assert!(err.is_validation());
    let mut geometry = InstrumentGeometry::platypus();
    geometry.slit2_sample = -5.0;
    let request = OptimizationRequest {
        footprint: 50.0,
        resolution: 0.05,
        angle_deg: 1.0,
        geometry,
    };
    assert!(optimize(&request).is_err());
}

#[derive(Default)]
struct Recorder {
    evaluations: Vec<(f64, f64)>,
    reports: usize,
}

impl OptimizationObserver for Recorder {
    fn on_evaluation(&mut self, d2_star: f64, objective: f64) {
        self.evaluations.push((d2_star, objective));
    }

    fn on_report(&mut self, _report: &SlitReport) {
        self.reports += 1;
    }
}

#[test]
fn test_observer_hook() {
    let request =
        OptimizationRequest::new(50.0, 0.05, 1.0, InstrumentGeometry::platypus()).unwrap();
    let mut recorder = Recorder::default();
    let report = optimize_with_observer(&request, &mut recorder).unwrap();

    assert_eq!(recorder.reports, 1);
    assert_eq!(recorder.evaluations.len(), report.evaluations);
    assert!(recorder.evaluations.iter().all(|&(x, _)| (0.0..=1.0).contains(&x)));
    let best = recorder
        .evaluations
        .iter()
        .map(|&(_, f)| f)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(best, report.objective);
}
