//! Decision tree and random forest classifiers.
//!
//! This module implements:
//! - CART (Classification and Regression Trees) using Gini impurity
//! - Random Forest ensemble classifier with bootstrap samples and
//!   `sqrt(n_features)` candidate features per split
//!
//! # Example
//!
//! ```
//! use bbob_ela::prelude::*;
//! use bbob_ela::tree::DecisionTreeClassifier;
//!
//! // Training data (simple 2D binary classification)
//! let x = Matrix::from_vec(4, 2, vec![
//!     0.0, 0.0,  // class 0
//!     0.0, 1.0,  // class 0
//!     1.0, 0.0,  // class 1
//!     1.0, 1.0,  // class 1
//! ]).expect("valid shape");
//! let y = vec![0, 0, 1, 1];
//!
//! let mut tree = DecisionTreeClassifier::new().with_max_depth(3);
//! tree.fit(&x, &y).expect("fit should succeed");
//! assert_eq!(tree.predict(&x), y);
//! ```

use crate::error::{ElaError, Result};
use crate::primitives::Matrix;
use crate::traits::Classifier;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Internal node in a decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Samples with `feature <= threshold` go left
    pub threshold: f64,
    pub left: Box<TreeNode>,
    pub right: Box<TreeNode>,
}

/// Leaf node in a decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    /// Predicted class label for this leaf
    pub class_label: usize,
    /// Number of training samples in this leaf
    pub n_samples: usize,
}

/// A node in a decision tree (either internal node or leaf).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Node(Node),
    Leaf(Leaf),
}

impl TreeNode {
    /// Returns the depth of the tree rooted at this node.
    ///
    /// Leaf nodes have depth 0, internal nodes have depth 1 + max(left, right).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Node(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }
}

/// Decision tree classifier using the CART algorithm.
///
/// Uses Gini impurity for splitting criterion and builds trees recursively.
/// With [`DecisionTreeClassifier::with_max_features`] each split only looks
/// at a random subset of the features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    tree: Option<TreeNode>,
    max_depth: Option<usize>,
    max_features: Option<usize>,
    random_state: Option<u64>,
    n_features: Option<usize>,
}

impl DecisionTreeClassifier {
    /// Creates a new decision tree classifier with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: None,
            max_depth: None,
            max_features: None,
            random_state: None,
            n_features: None,
        }
    }

    /// Sets the maximum depth of the tree (root has depth 0).
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Number of candidate features drawn per split.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features.max(1));
        self
    }

    /// Seed for the per-split feature draws.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Root of the fitted tree.
    #[must_use]
    pub fn root(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }

    /// Fits the tree on the rows of `x` listed in `indices`.
    fn fit_indices(&mut self, x: &Matrix<f64>, y: &[usize], indices: Vec<usize>) {
        let n_features = x.n_cols();
        let rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut builder = TreeBuilder {
            x,
            y,
            n_classes: y.iter().max().map_or(1, |m| m + 1),
            max_depth: self.max_depth,
            max_features: self.max_features.unwrap_or(n_features).min(n_features),
            rng,
        };
        self.n_features = Some(n_features);
        self.tree = Some(builder.build(indices, 0));
    }

    /// Predicts the class label for a single sample.
    ///
    /// An unfitted tree predicts class 0.
    fn predict_one(&self, sample: &[f64]) -> usize {
        let Some(mut node) = self.tree.as_ref() else {
            return 0;
        };
        loop {
            match node {
                TreeNode::Leaf(leaf) => return leaf.class_label,
                TreeNode::Node(internal) => {
                    node = if sample[internal.feature_idx] <= internal.threshold {
                        &internal.left
                    } else {
                        &internal.right
                    };
                }
            }
        }
    }
}

impl Default for DecisionTreeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_training_data(x: &Matrix<f64>, y: &[usize]) -> Result<()> {
    let n_rows = x.n_rows();
    if n_rows != y.len() {
        return Err(ElaError::dimension_mismatch("labels", n_rows, y.len()));
    }
    if n_rows == 0 {
        return Err("Cannot fit with zero samples".into());
    }
    if x.n_cols() == 0 {
        return Err("Cannot fit without features".into());
    }
    Ok(())
}

impl Classifier for DecisionTreeClassifier {
    fn fit(&mut self, x: &Matrix<f64>, y: &[usize]) -> Result<()> {
        validate_training_data(x, y)?;
        self.fit_indices(x, y, (0..x.n_rows()).collect());
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if `x` has fewer columns than the training data.
    fn predict(&self, x: &Matrix<f64>) -> Vec<usize> {
        if let Some(expected) = self.n_features {
            assert!(
                x.n_cols() >= expected,
                "Feature count mismatch: model was trained with {expected} features but input has {} features",
                x.n_cols()
            );
        }
        x.rows().map(|row| self.predict_one(row)).collect()
    }
}

/// Gini impurity from class counts: `1 - Σ p_i²`.
fn gini_impurity(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

/// Most frequent class; ties go to the smallest label.
fn majority_class(labels: impl IntoIterator<Item = usize>) -> usize {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0usize) += 1;
    }
    counts
        .into_iter()
        .fold(
            (0, 0),
            |best, (label, count)| {
                if count > best.1 {
                    (label, count)
                } else {
                    best
                }
            },
        )
        .0
}

struct Split {
    feature_idx: usize,
    threshold: f64,
    impurity: f64,
}

struct TreeBuilder<'a> {
    x: &'a Matrix<f64>,
    y: &'a [usize],
    n_classes: usize,
    max_depth: Option<usize>,
    max_features: usize,
    rng: StdRng,
}

impl TreeBuilder<'_> {
    fn leaf(&self, indices: &[usize]) -> TreeNode {
        TreeNode::Leaf(Leaf {
            class_label: majority_class(indices.iter().map(|&i| self.y[i])),
            n_samples: indices.len(),
        })
    }

    fn build(&mut self, indices: Vec<usize>, depth: usize) -> TreeNode {
        let first = self.y[indices[0]];
        let pure = indices.iter().all(|&i| self.y[i] == first);
        if pure || indices.len() < 2 || self.max_depth.is_some_and(|d| depth >= d) {
            return self.leaf(&indices);
        }

        let Some(split) = self.best_split(&indices) else {
            return self.leaf(&indices);
        };

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| self.x.get(i, split.feature_idx) <= split.threshold);
        if left.is_empty() || right.is_empty() {
            return self.leaf(&indices);
        }

        let left = self.build(left, depth + 1);
        let right = self.build(right, depth + 1);
        TreeNode::Node(Node {
            feature_idx: split.feature_idx,
            threshold: split.threshold,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Searches a random feature order, stopping after `max_features`
    /// non-constant features have been evaluated.
    fn best_split(&mut self, indices: &[usize]) -> Option<Split> {
        let n = indices.len();
        let mut parent = vec![0usize; self.n_classes];
        for &i in indices {
            parent[self.y[i]] += 1;
        }
        let parent_impurity = gini_impurity(&parent, n);

        let mut features: Vec<usize> = (0..self.x.n_cols()).collect();
        features.shuffle(&mut self.rng);

        let mut best: Option<Split> = None;
        let mut visited = 0;
        let mut order = indices.to_vec();
        for feature_idx in features {
            if visited >= self.max_features {
                break;
            }
            order.sort_by(|&a, &b| {
                self.x
                    .get(a, feature_idx)
                    .total_cmp(&self.x.get(b, feature_idx))
            });
            let lo = self.x.get(order[0], feature_idx);
            let hi = self.x.get(order[n - 1], feature_idx);
            if lo >= hi {
                continue;
            }
            visited += 1;

            let mut left = vec![0usize; self.n_classes];
            let mut right = parent.clone();
            for k in 0..n - 1 {
                let label = self.y[order[k]];
                left[label] += 1;
                right[label] -= 1;
                let v = self.x.get(order[k], feature_idx);
                let next = self.x.get(order[k + 1], feature_idx);
                if v >= next {
                    continue;
                }
                let n_left = k + 1;
                let n_right = n - n_left;
                let impurity = (n_left as f64 * gini_impurity(&left, n_left)
                    + n_right as f64 * gini_impurity(&right, n_right))
                    / n as f64;
                if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                    let mut threshold = (v + next) / 2.0;
                    // midpoint can round up to `next` for adjacent floats
                    if threshold >= next {
                        threshold = v;
                    }
                    best = Some(Split {
                        feature_idx,
                        threshold,
                        impurity,
                    });
                }
            }
        }

        best.filter(|s| s.impurity < parent_impurity)
    }
}

/// Random Forest classifier - an ensemble of decision trees.
///
/// Combines multiple decision trees trained on bootstrap samples
/// with random feature selection to reduce overfitting and improve accuracy.
/// Tree `i` draws its bootstrap sample and feature subsets from seed
/// `random_state + i`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    trees: Vec<DecisionTreeClassifier>,
    n_estimators: usize,
    max_depth: Option<usize>,
    random_state: Option<u64>,
}

impl RandomForestClassifier {
    /// Creates a new Random Forest classifier with `n_estimators` trees.
    #[must_use]
    pub fn new(n_estimators: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators,
            max_depth: None,
            random_state: None,
        }
    }

    /// Sets the maximum depth for each tree.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets the random state for reproducibility.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    #[must_use]
    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    /// Fitted trees.
    #[must_use]
    pub fn trees(&self) -> &[DecisionTreeClassifier] {
        &self.trees
    }

    fn fit_tree(&self, x: &Matrix<f64>, y: &[usize], i: usize) -> DecisionTreeClassifier {
        let seed = self.random_state.map(|s| s.wrapping_add(i as u64));
        let max_features = ((x.n_cols() as f64).sqrt() as usize).max(1);
        let mut tree = DecisionTreeClassifier::new().with_max_features(max_features);
        if let Some(depth) = self.max_depth {
            tree = tree.with_max_depth(depth);
        }
        if let Some(seed) = seed {
            tree = tree.with_random_state(seed);
        }
        tree.fit_indices(x, y, bootstrap_sample(x.n_rows(), seed));
        tree
    }
}

impl Classifier for RandomForestClassifier {
    fn fit(&mut self, x: &Matrix<f64>, y: &[usize]) -> Result<()> {
        validate_training_data(x, y)?;
        if self.n_estimators == 0 {
            return Err(ElaError::InvalidHyperparameter {
                param: "n_estimators".to_string(),
                value: "0".to_string(),
                constraint: "at least one tree".to_string(),
            });
        }

        #[cfg(feature = "parallel")]
        let trees = (0..self.n_estimators)
            .into_par_iter()
            .map(|i| self.fit_tree(x, y, i))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let trees = (0..self.n_estimators)
            .map(|i| self.fit_tree(x, y, i))
            .collect();

        self.trees = trees;
        Ok(())
    }

    /// Majority vote over the trees; ties go to the smallest class index.
    fn predict(&self, x: &Matrix<f64>) -> Vec<usize> {
        let per_tree: Vec<Vec<usize>> = self.trees.iter().map(|t| t.predict(x)).collect();
        (0..x.n_rows())
            .map(|row| majority_class(per_tree.iter().map(|p| p[row])))
            .collect()
    }
}

/// Creates a bootstrap sample (random sample with replacement).
///
/// Returns indices of samples to include in the bootstrap sample.
fn bootstrap_sample(n_samples: usize, random_state: Option<u64>) -> Vec<usize> {
    use rand::distributions::{Distribution, Uniform};

    let dist = Uniform::from(0..n_samples);
    let mut rng = match random_state {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..n_samples).map(|_| dist.sample(&mut rng)).collect()
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
