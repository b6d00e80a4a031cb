//! Model trainer: fits the bagged classifier, evaluates it against the
//! held-out partition, and exposes feature-importance diagnostics.
//!
//! A [`TrainedModel`] owns everything inference needs: the fitted forest,
//! the ordered feature-name list it was trained on, the per-feature
//! imputation means, and the importance scores. Reloaded copies are
//! independent values; nothing is shared with the training run.

mod forest;
mod tree;

pub use forest::Forest;
pub use tree::DecisionTree;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ForestConfig;
use crate::dataset::TrainingDataset;
use crate::schema::{self, FEATURE_COUNT};
use crate::{Error, Result};

/// A fitted classifier with its feature contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    forest: Forest,
    feature_names: Vec<String>,
    imputation: Vec<f64>,
    importance: Vec<f64>,
    trained_at: DateTime<Utc>,
}

impl TrainedModel {
    /// Fit a forest on the training partition.
    ///
    /// Deterministic for a fixed dataset and forest seed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDataset`] if the training partition is empty.
    pub fn train(dataset: &TrainingDataset, config: &ForestConfig) -> Result<Self> {
        if dataset.train_len() == 0 {
            return Err(Error::EmptyDataset(
                "training partition is empty".to_string(),
            ));
        }
        info!(
            trees = config.trees,
            rows = dataset.train_len(),
            "fitting bagged forest"
        );
        let (forest, importance) =
            Forest::fit(dataset.train_features(), dataset.train_labels(), config);
        Ok(Self {
            forest,
            feature_names: schema::feature_names(),
            imputation: dataset.imputation().to_vec(),
            importance: importance.to_vec(),
            trained_at: Utc::now(),
        })
    }

    /// Accuracy on the held-out partition: the fraction of test predictions
    /// equal to the test ground truth, in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDataset`] if the test partition is empty.
    pub fn evaluate(&self, dataset: &TrainingDataset) -> Result<f64> {
        if dataset.test_len() == 0 {
            return Err(Error::EmptyDataset("test partition is empty".to_string()));
        }
        let correct = dataset
            .test_features()
            .iter()
            .zip(dataset.test_labels())
            .filter(|(x, &truth)| self.forest.predict(x) == truth)
            .count();
        #[allow(clippy::cast_precision_loss)]
        let accuracy = correct as f64 / dataset.test_len() as f64;
        info!(accuracy, tested = dataset.test_len(), "model evaluated");
        Ok(accuracy)
    }

    /// Feature importances paired with names, sorted descending.
    #[must_use]
    pub fn ranked_importance(&self) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = self
            .feature_names
            .iter()
            .cloned()
            .zip(self.importance.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// The fitted ensemble.
    #[must_use]
    pub const fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Ordered feature-name list the model was trained on.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Per-feature imputation means, in the model's feature order.
    #[must_use]
    pub fn imputation(&self) -> &[f64] {
        &self.imputation
    }

    /// Normalized per-feature importance scores, in the model's feature
    /// order.
    #[must_use]
    pub fn importance(&self) -> &[f64] {
        &self.importance
    }

    /// When the model was fitted.
    #[must_use]
    pub const fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    /// Imputation means as the fixed-size array inference vectorizes with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleSchema`] if the stored vector does not
    /// have one mean per schema feature.
    pub(crate) fn imputation_array(&self) -> Result<[f64; FEATURE_COUNT]> {
        let slice: &[f64] = &self.imputation;
        slice.try_into().map_err(|_| {
            Error::IncompatibleSchema(format!(
                "model stores {} imputation means, schema has {FEATURE_COUNT} features",
                self.imputation.len()
            ))
        })
    }

    /// Assemble a model from stored parts (artifact loading and tests).
    pub(crate) fn from_parts(
        forest: Forest,
        feature_names: Vec<String>,
        imputation: Vec<f64>,
        importance: Vec<f64>,
        trained_at: DateTime<Utc>,
    ) -> Self {
        Self {
            forest,
            feature_names,
            imputation,
            importance,
            trained_at,
        }
    }
}
