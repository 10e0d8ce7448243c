//! Labelling and comparison throughput
//!
//! Measures batch labelling of 256×256 grayscale masks in sequential and
//! parallel mode, plus a single metric comparison.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench labeling_throughput
//! ```

use corrosion_severity::comparison::{compare, ComparisonConfig};
use corrosion_severity::config::LabelingConfig;
use corrosion_severity::labeling::generate_labels;
use corrosion_severity::mask::{compute_percentage, Cutoff, Mask};
use corrosion_severity::severity::SeverityScheme;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const SIDE: usize = 256;

/// Mask whose corroded share depends on `seed`
fn synthetic_mask(seed: usize) -> Mask<u8> {
    let pixels = (0..SIDE * SIDE)
        .map(|i| if (i * 31 + seed * 17) % 100 < seed % 40 { 255 } else { 0 })
        .collect();
    Mask::from_flat(SIDE, SIDE, pixels).unwrap()
}

fn bench_compute_percentage(c: &mut Criterion) {
    let mask = synthetic_mask(13);
    c.bench_function("compute_percentage_256x256", |b| {
        b.iter(|| compute_percentage(black_box(&mask), &Cutoff::grayscale()))
    });
}

fn bench_generate_labels(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_labels");
    let scheme = SeverityScheme::three_level(8.0, 11.0).unwrap();

    for size in [16usize, 128, 512] {
        let entries: Vec<(String, Mask<u8>)> = (0..size)
            .map(|i| (format!("img_{}", i), synthetic_mask(i)))
            .collect();

        let sequential = LabelingConfig::new(scheme.clone()).with_parallel_threshold(usize::MAX);
        let parallel = LabelingConfig::new(scheme.clone()).with_parallel_threshold(0);

        group.bench_with_input(BenchmarkId::new("sequential", size), &entries, |b, e| {
            b.iter(|| generate_labels(black_box(e), &sequential, &Cutoff::grayscale()))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &entries, |b, e| {
            b.iter(|| generate_labels(black_box(e), &parallel, &Cutoff::grayscale()))
        });
    }

    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let baseline: Vec<f64> = (0..200).map(|i| 0.6 + (i % 17) as f64 * 0.005).collect();
    let candidate: Vec<f64> = (0..200).map(|i| 0.65 + (i % 13) as f64 * 0.006).collect();
    let config = ComparisonConfig::default();

    c.bench_function("compare_200_samples", |b| {
        b.iter(|| compare("iou", black_box(&baseline), black_box(&candidate), &config))
    });
}

criterion_group!(
    benches,
    bench_compute_percentage,
    bench_generate_labels,
    bench_compare
);
criterion_main!(benches);
