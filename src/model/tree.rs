//! CART decision tree: Gini impurity, midpoint thresholds, per-split
//! feature subsampling.
//!
//! Trees are grown greedily; the split search inspects a random subset of
//! features at every node and keeps the candidate with the largest weighted
//! impurity decrease. Each accepted split adds its decrease to the caller's
//! importance accumulator, weighted by the fraction of the bootstrap sample
//! reaching the node.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::schema::FEATURE_COUNT;

/// Stopping and sampling parameters for a single tree fit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GrowParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub max_features: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        explore: bool,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// One fitted classification tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Node,
}

impl DecisionTree {
    /// Fit a tree on the rows selected by `sample` (bootstrap indices into
    /// `features`/`labels`), accumulating weighted impurity decreases into
    /// `importance`.
    pub(crate) fn fit(
        features: &[[f64; FEATURE_COUNT]],
        labels: &[bool],
        sample: &[usize],
        params: &GrowParams,
        rng: &mut StdRng,
        importance: &mut [f64; FEATURE_COUNT],
    ) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let sample_total = sample.len() as f64;
        let mut grower = Grower {
            features,
            labels,
            params,
            sample_total,
            importance,
            rng,
        };
        let root = grower.grow(sample.to_vec(), 0);
        Self { root }
    }

    /// Predict the label for one feature vector.
    #[must_use]
    pub fn predict(&self, x: &[f64; FEATURE_COUNT]) -> bool {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { explore } => return *explore,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }
}

struct Grower<'a> {
    features: &'a [[f64; FEATURE_COUNT]],
    labels: &'a [bool],
    params: &'a GrowParams,
    sample_total: f64,
    importance: &'a mut [f64; FEATURE_COUNT],
    rng: &'a mut StdRng,
}

impl Grower<'_> {
    fn grow(&mut self, idx: Vec<usize>, depth: usize) -> Node {
        let positives = idx.iter().filter(|&&i| self.labels[i]).count();
        let pure = positives == 0 || positives == idx.len();
        if pure || depth >= self.params.max_depth || idx.len() < self.params.min_samples_split {
            return Node::Leaf {
                explore: majority(positives, idx.len()),
            };
        }

        let Some((feature, threshold, decrease)) = self.best_split(&idx, positives) else {
            return Node::Leaf {
                explore: majority(positives, idx.len()),
            };
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = idx
            .into_iter()
            .partition(|&i| self.features[i][feature] <= threshold);
        // Midpoint rounding can collapse one side when adjacent float values
        // straddle the threshold; fall back to a leaf rather than recurse.
        if left_idx.is_empty() || right_idx.is_empty() {
            let n = left_idx.len() + right_idx.len();
            return Node::Leaf {
                explore: majority(positives, n),
            };
        }

        #[allow(clippy::cast_precision_loss)]
        let node_weight = (left_idx.len() + right_idx.len()) as f64 / self.sample_total;
        self.importance[feature] += decrease * node_weight;

        Node::Split {
            feature,
            threshold,
            left: Box::new(self.grow(left_idx, depth + 1)),
            right: Box::new(self.grow(right_idx, depth + 1)),
        }
    }

    /// Best `(feature, threshold, impurity decrease)` over a random feature
    /// subset, or `None` when no candidate improves on the parent.
    ///
    /// Features are visited in a random order; a column that is constant
    /// across the node does not count toward `max_features`, so a split is
    /// found whenever any feature still varies.
    fn best_split(&mut self, idx: &[usize], positives: usize) -> Option<(usize, f64, f64)> {
        let parent = gini(positives, idx.len());
        let order = rand::seq::index::sample(self.rng, FEATURE_COUNT, FEATURE_COUNT);

        let mut best: Option<(usize, f64, f64)> = None;
        let mut inspected = 0usize;
        for feature in order {
            if inspected >= self.params.max_features {
                break;
            }
            let mut column: Vec<(f64, bool)> = idx
                .iter()
                .map(|&i| (self.features[i][feature], self.labels[i]))
                .collect();
            column.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut varies = false;
            let mut left_n = 0usize;
            let mut left_pos = 0usize;
            for w in 0..column.len() - 1 {
                left_n += 1;
                if column[w].1 {
                    left_pos += 1;
                }
                if column[w].0 == column[w + 1].0 {
                    continue;
                }
                varies = true;
                let right_n = column.len() - left_n;
                let right_pos = positives - left_pos;
                #[allow(clippy::cast_precision_loss)]
                let weighted = (left_n as f64 * gini(left_pos, left_n)
                    + right_n as f64 * gini(right_pos, right_n))
                    / column.len() as f64;
                let decrease = parent - weighted;
                if decrease > best.map_or(0.0, |(_, _, d)| d) {
                    let threshold = (column[w].0 + column[w + 1].0) / 2.0;
                    best = Some((feature, threshold, decrease));
                }
            }
            if varies {
                inspected += 1;
            }
        }
        best
    }
}

/// Majority label; an exact tie is Not Explore.
const fn majority(positives: usize, total: usize) -> bool {
    positives * 2 > total
}

/// Gini impurity of a binary node: `2 * p * (1 - p)`.
#[allow(clippy::cast_precision_loss)]
fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    2.0 * p * (1.0 - p)
}
