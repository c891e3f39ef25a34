use approx::assert_relative_eq;
use slitopt::{Error, beam_fraction_gaussian, beam_fraction_kernel, critical_q};

#[test]
fn test_gaussian_fraction_bounds() {
    for &fwhm in &[0.1, 1.0, 5.0] {
        for &length in &[0.0, 1.0, 10.0, 50.0, 1000.0] {
            for &angle in &[0.2, 1.0, 3.0, 10.0] {
                let f = beam_fraction_gaussian(fwhm, length, angle).unwrap();
                assert!((0.0..=1.0).contains(&f), "fraction {f}");
            }
        }
    }
}

#[test]
fn test_gaussian_fraction_limits() {
    assert_eq!(beam_fraction_gaussian(1.0, 0.0, 1.0).unwrap(), 0.0);
    let long = beam_fraction_gaussian(1.0, 1e5, 1.0).unwrap();
    assert_relative_eq!(long, 1.0, epsilon = 1e-12);

    let mut last = 0.0;
    for i in 1..50 {
        let f = beam_fraction_gaussian(2.0, i as f64 * 10.0, 1.0).unwrap();
        assert!(f >= last);
        last = f;
    }
}

#[test]
fn test_gaussian_fraction_rejects_bad_input() {
    assert!(beam_fraction_gaussian(0.0, 10.0, 1.0).is_err());
    assert!(beam_fraction_gaussian(1.0, -10.0, 1.0).is_err());
}

/// Gaussian profile sampled on [-10, 10] mm.
fn gaussian_profile(fwhm: f64) -> (Vec<f64>, Vec<f64>) {
    let sigma = fwhm / (2.0 * (2.0 * 2.0_f64.ln()).sqrt());
    let x: Vec<f64> = (0..=2000).map(|i| -10.0 + i as f64 * 0.01).collect();
    let y = x.iter().map(|v| (-v * v / (2.0 * sigma * sigma)).exp()).collect();
    (x, y)
}

#[test]
fn test_kernel_matches_gaussian() {
    let (x, y) = gaussian_profile(2.0);
    for &length in &[20.0, 57.3, 100.0, 300.0] {
        let kernel = beam_fraction_kernel(&x, &y, length, 1.0).unwrap();
        let exact = beam_fraction_gaussian(2.0, length, 1.0).unwrap();
        assert_relative_eq!(kernel, exact, epsilon = 1e-6);
    }
}

#[test]
fn test_kernel_uniform_beam() {
    // flat 4 mm beam; a sample projecting to 1 mm sees a quarter of it
    let x: Vec<f64> = (0..=40).map(|i| -2.0 + i as f64 * 0.1).collect();
    let y = vec![1.0; x.len()];
    let length = 1.0 / 2.0_f64.to_radians().sin();
    let f = beam_fraction_kernel(&x, &y, length, 2.0).unwrap();
    assert_relative_eq!(f, 0.25, epsilon = 1e-12);
    assert_eq!(beam_fraction_kernel(&x, &y, 0.0, 2.0).unwrap(), 0.0);
}

#[test]
fn test_kernel_out_of_range() {
    let (x, y) = gaussian_profile(2.0);
    // projected height of 35 mm exceeds the sampled 20 mm
    let err = beam_fraction_kernel(&x, &y, 1000.0, 2.0).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_kernel_rejects_unsorted_positions() {
    let x = [0.0, 2.0, 1.0, 3.0];
    let y = [1.0, 1.0, 1.0, 1.0];
    assert!(beam_fraction_kernel(&x, &y, 1.0, 1.0).is_err());
}

#[test]
fn test_critical_q_unit_convention() {
    // SLDs are in 10⁻⁶ Å⁻²
    let expected = (16.0 * std::f64::consts::PI * 2.07e-6 * 1e-6).sqrt();
    assert_relative_eq!(critical_q(0.0, 2.07e-6), expected, max_relative = 1e-12);
    assert_relative_eq!(critical_q(0.0, 2.07), 0.010_200_468_06, max_relative = 1e-9);
    assert!(critical_q(2.07, 0.0).is_nan());
}

#[cfg(feature = "complex")]
#[test]
fn test_critical_q_complex() {
    use slitopt::critical_q_complex;

    let real = critical_q_complex(0.0, 2.07);
    assert_relative_eq!(real.re, critical_q(0.0, 2.07), max_relative = 1e-12);
    assert_eq!(real.im, 0.0);

    let imaginary = critical_q_complex(2.07, 0.0);
    assert!(imaginary.re.abs() < 1e-15);
    assert_relative_eq!(imaginary.im, 0.010_200_468_06, max_relative = 1e-9);
}
