//! Pipeline configuration: one explicit structure with named, typed fields
//! and documented defaults, validated once up front.
//!
//! Replaces ad-hoc loose dictionaries: every threshold, seed, and fraction
//! the pipeline reads lives here, and `validate()` rejects unusable values
//! before any data is touched.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::label::LabelPolicy;
use crate::{Error, Result};

/// Complete pipeline configuration.
///
/// `Default` yields the stock pipeline: single-threshold labeling at ESI
/// 0.9, seed-42 split holding out 20%, a 100-tree forest, full-dataset
/// imputation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Ground-truth labeling rule
    pub label: LabelPolicy,
    /// Train/test partitioning
    pub split: SplitConfig,
    /// Classifier ensemble
    pub forest: ForestConfig,
    /// Scope of the imputation statistics
    pub imputation: ImputationStrategy,
}

impl PipelineConfig {
    /// Validate every section at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first rejected field.
    pub fn validate(&self) -> Result<()> {
        self.label.validate()?;
        self.split.validate()?;
        self.forest.validate()?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// Absent fields take their documented defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read,
    /// [`Error::InvalidConfig`] if it cannot be parsed or fails validation.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| Error::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

/// Deterministic train/test partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Seed for the shuffle assigning rows to partitions
    pub seed: u64,
    /// Fraction of rows held out for evaluation, in (0, 1)
    pub test_fraction: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            test_fraction: 0.2,
        }
    }
}

impl SplitConfig {
    fn validate(&self) -> Result<()> {
        if !self.test_fraction.is_finite()
            || self.test_fraction <= 0.0
            || self.test_fraction >= 1.0
        {
            return Err(Error::InvalidConfig(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        Ok(())
    }
}

/// Bagged-forest hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of independently bootstrap-trained trees
    pub trees: usize,
    /// Master seed; tree `i` derives its own RNG from `seed + i`
    pub seed: u64,
    /// Maximum tree depth
    pub max_depth: usize,
    /// Minimum samples required to attempt a split
    pub min_samples_split: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            trees: 100,
            seed: 42,
            max_depth: 16,
            min_samples_split: 2,
        }
    }
}

impl ForestConfig {
    fn validate(&self) -> Result<()> {
        if self.trees == 0 {
            return Err(Error::InvalidConfig(
                "forest must contain at least one tree".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(Error::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(Error::InvalidConfig(
                "min_samples_split must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}

/// Scope of the per-feature imputation means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImputationStrategy {
    /// Means over the entire raw set before splitting.
    ///
    /// Matches the observed behavior of the original pipeline; lets
    /// test-partition values influence imputation of training rows.
    #[default]
    FullDataset,
    /// Means over the training partition only, applied unchanged to the
    /// test partition and to future inference.
    TrainOnly,
}
