//! Benchmarks for posterior inference and fusion.

use bayesfuse::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn space_with_modalities(n_modalities: usize) -> (ProbabilitySpace, Evidence) {
    let mut space = ProbabilitySpace::new();
    space.set_priors([("UP", 0.5), ("DOWN", 0.5)]).unwrap();
    let mut evidence = Evidence::new();
    for m in 0..n_modalities {
        let name = format!("m{m}");
        let shift = m as f64 * 0.1;
        space.register_likelihood(name.clone(), move |x, h| {
            let mean = if h == "UP" { shift } else { -shift };
            gaussian_likelihood(x.as_scalar().unwrap_or(f64::NAN), mean, 1.0).unwrap_or(0.0)
        });
        evidence.insert(name, 0.2);
    }
    (space, evidence)
}

fn bench_posterior(c: &mut Criterion) {
    let mut group = c.benchmark_group("posterior");

    for n_modalities in [1, 4, 16, 64].iter() {
        let (space, evidence) = space_with_modalities(*n_modalities);
        group.bench_with_input(
            BenchmarkId::from_parameter(n_modalities),
            n_modalities,
            |b, _| b.iter(|| space.posterior(black_box(&evidence)).unwrap()),
        );
    }

    group.finish();
}

fn bench_forecast(c: &mut Criterion) {
    let mut group = c.benchmark_group("forecast");

    let samples: Vec<f64> = (0..200).map(|i| (i as f64 * 0.37).sin()).collect();
    let labels: Vec<&str> = samples
        .iter()
        .map(|&s| if s > 0.0 { "UP" } else { "DOWN" })
        .collect();
    let mut pipeline = ForecastPipeline::new(ForecastConfig::default()).unwrap();
    pipeline
        .fit_labeled_modality("trajectory", ModalitySamples::Scalar(samples), &labels)
        .unwrap();
    let evidence = Evidence::new().with("trajectory", 0.3);

    for sample_count in [10, 50, 200].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(sample_count),
            sample_count,
            |b, &n| b.iter(|| pipeline.forecast(black_box(&evidence), n).unwrap()),
        );
    }

    group.finish();
}

fn bench_fusion(c: &mut Criterion) {
    let mut group = c.benchmark_group("fusion");

    for size in [2, 16, 128].iter() {
        let gaussians: Vec<Gaussian> = (0..*size)
            .map(|i| Gaussian::new(i as f64, 1.0 + i as f64 * 0.01).unwrap())
            .collect();
        group.bench_with_input(BenchmarkId::new("gaussians", size), size, |b, _| {
            b.iter(|| fuse_gaussians(black_box(&gaussians)).unwrap());
        });

        let alphas: Vec<Vec<f64>> = (0..*size).map(|i| vec![1.0 + i as f64, 2.0, 0.5]).collect();
        group.bench_with_input(BenchmarkId::new("concentrations", size), size, |b, _| {
            b.iter(|| fuse_concentrations(black_box(&alphas)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_posterior, bench_forecast, bench_fusion);
criterion_main!(benches);
