use criterion::{Criterion, black_box, criterion_group, criterion_main};
use slitopt::form::{default_fields, parse_angulator};
use slitopt::{angulator, beam_fraction_kernel, optimize_slits};

fn bench_optimize_slits(c: &mut Criterion) {
    c.bench_function("optimize_slits_platypus", |b| {
        b.iter(|| {
            black_box(
                optimize_slits(
                    black_box(50.0),
                    black_box(0.05),
                    black_box(1.0),
                    black_box(2859.5),
                    black_box(276.0),
                )
                .unwrap(),
            );
        });
    });
}

fn bench_angulator(c: &mut Criterion) {
    let request = parse_angulator(&default_fields()).unwrap();

    c.bench_function("angulator_default_form", |b| {
        b.iter(|| {
            black_box(angulator(black_box(&request)).unwrap());
        });
    });
}

fn bench_beam_fraction_kernel(c: &mut Criterion) {
    let x: Vec<f64> = (0..=2000).map(|i| -10.0 + i as f64 * 0.01).collect();
    let y: Vec<f64> = x.iter().map(|v| (-v * v / 1.44).exp()).collect();

    c.bench_function("beam_fraction_kernel_2001_samples", |b| {
        b.iter(|| {
            black_box(
                beam_fraction_kernel(black_box(&x), black_box(&y), black_box(100.0), 1.0)
                    .unwrap(),
            );
        });
    });
}

criterion_group!(
    benches,
    bench_optimize_slits,
    bench_angulator,
    bench_beam_fraction_kernel
);
criterion_main!(benches);
