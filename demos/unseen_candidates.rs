//! Score a small batch of unseen candidates against a freshly trained
//! model, printing a status line per record.
//!
//! Run with: cargo run --example unseen_candidates

use anyhow::Result;
use exotriage::{infer, ExoplanetRecord, PipelineConfig, TrainedModel, TrainingDataset};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Train against the default single-threshold rule (ESI >= 0.9)
    let catalog: Vec<ExoplanetRecord> = (0..400)
        .map(|i| {
            let t = f64::from(i) / 400.0;
            ExoplanetRecord::builder()
                .esi(t)
                .mass(0.1 + 2.0 * t)
                .radius(0.4 + 1.5 * t)
                .magnitude(8.0 + 20.0 * t)
                .distance(5.0 + 900.0 * t)
                .incline_angle(90.0 * t)
                .build()
        })
        .collect();

    let config = PipelineConfig::default();
    let dataset = TrainingDataset::build(&catalog, &config)?;
    let model = TrainedModel::train(&dataset, &config.forest)?;
    println!(
        "Trained on {} rows, held-out accuracy {:.2}%\n",
        dataset.train_len(),
        model.evaluate(&dataset)? * 100.0
    );

    // Unseen data: same feature columns the model was trained on
    let unseen = vec![
        ExoplanetRecord::builder()
            .esi(1.0)
            .mass(0.12)
            .radius(0.42)
            .magnitude(8.2)
            .distance(9.0)
            .incline_angle(89.0)
            .build(),
        ExoplanetRecord::builder()
            .esi(0.65)
            .mass(1.4)
            .radius(1.4)
            .magnitude(21.0)
            .distance(590.0)
            .incline_angle(58.0)
            .build(),
        ExoplanetRecord::builder()
            .esi(0.90)
            .mass(0.28)
            .radius(0.74)
            .magnitude(12.5)
            .distance(207.0)
            .incline_angle(81.0)
            .build(),
    ];

    for (i, decision) in infer::predict(&model, &unseen)?.iter().enumerate() {
        println!("Exoplanet {}: {decision}", i + 1);
    }
    Ok(())
}
