//! Feature dataset builder: labels raw records, imputes missing values, and
//! partitions rows into deterministic train/test sets.
//!
//! The split is a seeded shuffle: the same seed, test fraction, and row
//! order always reproduce the identical partition. Imputation means are
//! computed once here and travel with the trained model, so inference reuses
//! them instead of recomputing from new data.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::config::{ImputationStrategy, PipelineConfig, SplitConfig};
use crate::schema::{ExoplanetRecord, Feature, FEATURE_COUNT};
use crate::{Error, Result};

/// Labeled, imputed, partitioned training data.
///
/// Owns the feature matrices, the parallel label vectors, and the fixed
/// per-feature imputation means. Immutable after the split; lives for one
/// training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingDataset {
    train_features: Vec<[f64; FEATURE_COUNT]>,
    train_labels: Vec<bool>,
    test_features: Vec<[f64; FEATURE_COUNT]>,
    test_labels: Vec<bool>,
    imputation: [f64; FEATURE_COUNT],
}

impl TrainingDataset {
    /// Build a dataset from raw records.
    ///
    /// 1. Apply the label policy to every record.
    /// 2. Shuffle row indices with the configured seed and hold out
    ///    `ceil(n * test_fraction)` rows (capped so at least one training
    ///    row remains).
    /// 3. Compute per-feature means over the configured imputation scope.
    /// 4. Materialize imputed feature matrices for both partitions.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] if the configuration fails validation
    /// - [`Error::EmptyDataset`] if `records` is empty
    /// - [`Error::AllMissingFeature`] if a feature has no observed value in
    ///   the imputation scope
    pub fn build(records: &[ExoplanetRecord], config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        if records.is_empty() {
            return Err(Error::EmptyDataset(
                "no input records to build a dataset from".to_string(),
            ));
        }

        let labels: Vec<bool> = records.iter().map(|r| config.label.decide(r)).collect();
        let (train_idx, test_idx) = split_indices(records.len(), &config.split);

        let scope: Vec<usize> = match config.imputation {
            ImputationStrategy::FullDataset => (0..records.len()).collect(),
            ImputationStrategy::TrainOnly => train_idx.clone(),
        };
        let imputation = feature_means(records, &scope)?;

        let materialize = |idx: &[usize]| -> (Vec<[f64; FEATURE_COUNT]>, Vec<bool>) {
            idx.iter()
                .map(|&i| (records[i].to_vector_imputed(&imputation), labels[i]))
                .unzip()
        };
        let (train_features, train_labels) = materialize(&train_idx);
        let (test_features, test_labels) = materialize(&test_idx);

        debug!(
            rows = records.len(),
            train = train_features.len(),
            test = test_features.len(),
            explore = labels.iter().filter(|&&l| l).count(),
            "dataset partitioned"
        );

        Ok(Self {
            train_features,
            train_labels,
            test_features,
            test_labels,
            imputation,
        })
    }

    /// Training-partition feature matrix.
    #[must_use]
    pub fn train_features(&self) -> &[[f64; FEATURE_COUNT]] {
        &self.train_features
    }

    /// Training-partition ground-truth labels.
    #[must_use]
    pub fn train_labels(&self) -> &[bool] {
        &self.train_labels
    }

    /// Held-out feature matrix.
    #[must_use]
    pub fn test_features(&self) -> &[[f64; FEATURE_COUNT]] {
        &self.test_features
    }

    /// Held-out ground-truth labels.
    #[must_use]
    pub fn test_labels(&self) -> &[bool] {
        &self.test_labels
    }

    /// Number of training rows.
    #[must_use]
    pub fn train_len(&self) -> usize {
        self.train_features.len()
    }

    /// Number of held-out rows.
    #[must_use]
    pub fn test_len(&self) -> usize {
        self.test_features.len()
    }

    /// Per-feature imputation means in canonical feature order.
    #[must_use]
    pub const fn imputation(&self) -> &[f64; FEATURE_COUNT] {
        &self.imputation
    }
}

/// Seeded shuffle split. Returns `(train, test)` index lists.
fn split_indices(n: usize, split: &SplitConfig) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(split.seed);
    indices.shuffle(&mut rng);

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut test_len = ((n as f64) * split.test_fraction).ceil() as usize;
    // Keep at least one training row; a single-row set trains on that row.
    if test_len >= n {
        test_len = n - 1;
    }

    let test = indices[..test_len].to_vec();
    let train = indices[test_len..].to_vec();
    (train, test)
}

/// Mean of each feature over the non-missing values of the scoped rows.
fn feature_means(
    records: &[ExoplanetRecord],
    scope: &[usize],
) -> Result<[f64; FEATURE_COUNT]> {
    let mut means = [0.0; FEATURE_COUNT];
    for feature in Feature::ALL {
        let mut sum = 0.0;
        let mut count = 0usize;
        for &i in scope {
            if let Some(value) = records[i].value(feature) {
                sum += value;
                count += 1;
            }
        }
        if count == 0 {
            return Err(Error::AllMissingFeature(feature.name().to_string()));
        }
        #[allow(clippy::cast_precision_loss)]
        {
            means[feature.index()] = sum / count as f64;
        }
    }
    Ok(means)
}
