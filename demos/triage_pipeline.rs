//! Complete triage pipeline: dataset build → training → evaluation →
//! persistence → reload → inference.
//!
//! Run with: cargo run --example triage_pipeline

use anyhow::Result;
use exotriage::{
    infer, ExoplanetRecord, LabelPolicy, PipelineConfig, TrainedModel, TrainingDataset,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Exoplanet Exploration Triage ===\n");

    // Step 1: candidate records (stands in for a Parquet catalog)
    let records = synthetic_catalog(1500);
    println!("Step 1: loaded {} candidate records", records.len());

    // Step 2: label + impute + split
    let config = PipelineConfig {
        label: LabelPolicy::default_multi_criterion(),
        ..PipelineConfig::default()
    };
    config.validate()?;
    let dataset = TrainingDataset::build(&records, &config)?;
    println!(
        "Step 2: dataset partitioned ({} train / {} test rows)",
        dataset.train_len(),
        dataset.test_len()
    );

    // Step 3: fit and evaluate
    let model = TrainedModel::train(&dataset, &config.forest)?;
    let accuracy = model.evaluate(&dataset)?;
    println!(
        "Step 3: {}-tree forest fitted, held-out accuracy {:.2}%",
        model.forest().tree_count(),
        accuracy * 100.0
    );

    println!("\nFeature importance:");
    for (name, importance) in model.ranked_importance() {
        println!("  {name:<13} {importance:.4}");
    }

    // Step 4: persist and reload
    let artifact = std::env::temp_dir().join("exotriage_demo_model.mpk");
    exotriage::store::save(&model, &artifact)?;
    let reloaded = exotriage::store::load(&artifact)?;
    println!("\nStep 4: artifact round-tripped via {}", artifact.display());

    // Step 5: score fresh candidates (one with a missing magnitude, which
    // imputes from the stored training means)
    let candidates = vec![
        ExoplanetRecord::builder()
            .esi(0.96)
            .mass(0.2)
            .radius(0.65)
            .magnitude(11.0)
            .distance(30.0)
            .incline_angle(87.0)
            .build(),
        ExoplanetRecord::builder()
            .esi(0.95)
            .mass(0.3)
            .radius(0.7)
            .distance(45.0)
            .incline_angle(89.0)
            .build(),
        ExoplanetRecord::builder()
            .esi(0.41)
            .mass(2.3)
            .radius(1.8)
            .magnitude(22.0)
            .distance(640.0)
            .incline_angle(12.0)
            .build(),
    ];
    println!("\nStep 5: scoring {} fresh candidates", candidates.len());
    for (i, decision) in infer::predict(&reloaded, &candidates)?.iter().enumerate() {
        println!("  Candidate {}: {decision}", i + 1);
    }

    std::fs::remove_file(&artifact).ok();
    Ok(())
}

/// Two candidate populations with some sensor dropout in the Distance and
/// Magnitude columns.
fn synthetic_catalog(n: usize) -> Vec<ExoplanetRecord> {
    let mut rng = StdRng::seed_from_u64(2024);
    (0..n)
        .map(|_| {
            let habitable = rng.gen_bool(0.3);
            let mut record = if habitable {
                ExoplanetRecord::builder()
                    .esi(rng.gen_range(0.9..1.0))
                    .mass(rng.gen_range(0.1..0.5))
                    .radius(rng.gen_range(0.5..0.8))
                    .magnitude(rng.gen_range(10.0..15.0))
                    .distance(rng.gen_range(5.0..200.0))
                    .incline_angle(rng.gen_range(85.0..90.0))
                    .build()
            } else {
                ExoplanetRecord::builder()
                    .esi(rng.gen_range(0.0..0.9))
                    .mass(rng.gen_range(0.5..8.0))
                    .radius(rng.gen_range(0.8..4.0))
                    .magnitude(rng.gen_range(14.0..30.0))
                    .distance(rng.gen_range(50.0..2000.0))
                    .incline_angle(rng.gen_range(0.0..90.0))
                    .build()
            };
            if rng.gen_bool(0.05) {
                record.distance = None;
            }
            if rng.gen_bool(0.05) {
                record.magnitude = None;
            }
            record
        })
        .collect()
}
