//! Benchmarks for dataset build and forest fitting.
//!
//! Run with: cargo bench --bench training_benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use exotriage::{infer, ExoplanetRecord, PipelineConfig, TrainedModel, TrainingDataset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn synthetic_records(n: usize) -> Vec<ExoplanetRecord> {
    let mut rng = StdRng::seed_from_u64(9);
    (0..n)
        .map(|_| {
            let mut record = ExoplanetRecord::builder()
                .esi(rng.gen_range(0.0..1.0))
                .mass(rng.gen_range(0.05..5.0))
                .radius(rng.gen_range(0.1..3.0))
                .magnitude(rng.gen_range(5.0..30.0))
                .distance(rng.gen_range(1.0..1000.0))
                .incline_angle(rng.gen_range(0.0..90.0))
                .build();
            if rng.gen_bool(0.1) {
                record.distance = None;
            }
            record
        })
        .collect()
}

fn bench_dataset_build(c: &mut Criterion) {
    let records = synthetic_records(2000);
    let config = PipelineConfig::default();
    c.bench_function("dataset_build_2k_rows", |b| {
        b.iter(|| TrainingDataset::build(black_box(&records), &config).unwrap());
    });
}

fn bench_forest_fit(c: &mut Criterion) {
    let records = synthetic_records(2000);
    let config = PipelineConfig::default();
    let dataset = TrainingDataset::build(&records, &config).unwrap();
    c.bench_function("forest_fit_2k_rows_100_trees", |b| {
        b.iter(|| TrainedModel::train(black_box(&dataset), &config.forest).unwrap());
    });
}

fn bench_batch_inference(c: &mut Criterion) {
    let records = synthetic_records(2000);
    let config = PipelineConfig::default();
    let dataset = TrainingDataset::build(&records, &config).unwrap();
    let model = TrainedModel::train(&dataset, &config.forest).unwrap();
    let batch = synthetic_records(500);
    c.bench_function("predict_500_records", |b| {
        b.iter(|| infer::predict(black_box(&model), black_box(&batch)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_dataset_build,
    bench_forest_fit,
    bench_batch_inference
);
criterion_main!(benches);
