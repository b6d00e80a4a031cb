//! Bagged ensemble of decision trees with majority-vote prediction.
//!
//! Each tree is fit on its own bootstrap sample, drawn from a per-tree RNG
//! seeded as `master seed + tree index`. That makes the whole fit
//! deterministic for a fixed seed and dataset, with or without the rayon
//! fan-out.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tree::{DecisionTree, GrowParams};
use crate::config::ForestConfig;
use crate::schema::FEATURE_COUNT;

/// Candidate features inspected per split: `floor(sqrt(FEATURE_COUNT))`.
const MAX_SPLIT_FEATURES: usize = 2;

/// A fitted bagged forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forest {
    trees: Vec<DecisionTree>,
}

impl Forest {
    /// Fit `config.trees` bootstrap-trained trees.
    ///
    /// Returns the forest and the normalized per-feature importance vector
    /// (per-tree normalized impurity decreases, averaged, renormalized to
    /// sum 1; all zeros when no tree ever split).
    pub(crate) fn fit(
        features: &[[f64; FEATURE_COUNT]],
        labels: &[bool],
        config: &ForestConfig,
    ) -> (Self, [f64; FEATURE_COUNT]) {
        let params = GrowParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            max_features: MAX_SPLIT_FEATURES,
        };
        let n = features.len();
        let seed = config.seed;

        let fit_one = |tree_index: usize| -> (DecisionTree, [f64; FEATURE_COUNT]) {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(tree_index as u64));
            let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let mut importance = [0.0; FEATURE_COUNT];
            let tree =
                DecisionTree::fit(features, labels, &sample, &params, &mut rng, &mut importance);
            normalize(&mut importance);
            (tree, importance)
        };

        #[cfg(feature = "rayon")]
        let fitted: Vec<_> = (0..config.trees).into_par_iter().map(fit_one).collect();
        #[cfg(not(feature = "rayon"))]
        let fitted: Vec<_> = (0..config.trees).map(fit_one).collect();

        let mut trees = Vec::with_capacity(fitted.len());
        let mut importance = [0.0; FEATURE_COUNT];
        for (tree, tree_importance) in fitted {
            trees.push(tree);
            for (total, part) in importance.iter_mut().zip(tree_importance) {
                *total += part;
            }
        }
        normalize(&mut importance);

        debug!(trees = trees.len(), rows = n, "forest fitted");
        (Self { trees }, importance)
    }

    /// Majority vote over all trees; an exact tie is Not Explore.
    #[must_use]
    pub fn predict(&self, x: &[f64; FEATURE_COUNT]) -> bool {
        let votes = self.trees.iter().filter(|tree| tree.predict(x)).count();
        votes * 2 > self.trees.len()
    }

    /// Number of trees in the ensemble.
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

/// Scale a vector to sum 1, leaving an all-zero vector untouched.
fn normalize(values: &mut [f64; FEATURE_COUNT]) {
    let sum: f64 = values.iter().sum();
    if sum > 0.0 {
        for value in values.iter_mut() {
            *value /= sum;
        }
    }
}
