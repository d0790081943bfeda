//! Ranking-weighted dimensionality reduction.
//!
//! Before projecting, every centered point is scaled by a weight that
//! decreases with the rank of its objective value, so the principal
//! directions follow the good region of the sample rather than the
//! uniform design.

mod pca;

pub use pca::PCA;

use crate::error::{ElaError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Reduction applied before computing a feature class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reduction {
    /// Features are computed on the raw points.
    #[default]
    None,
    /// Weighted PCA down to `components` dimensions.
    WeightedPca {
        /// Target dimension.
        components: usize,
    },
}

impl Reduction {
    /// Number of target components, if any.
    #[must_use]
    pub fn components(self) -> Option<usize> {
        match self {
            Reduction::None => None,
            Reduction::WeightedPca { components } => Some(components),
        }
    }
}

/// Average ranks (1-based); tied values share the mean of their ranks.
#[must_use]
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end hold ranks start+1..=end
        let shared = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = shared;
        }
        start = end;
    }
    ranks
}

/// Rank-based point weights `w_i = ln N - ln rank_i`, normalized to sum to 1.
///
/// The best point gets the largest weight and the worst a weight of zero.
#[must_use]
pub fn rank_weights(y: &[f64]) -> Vec<f64> {
    let n = y.len() as f64;
    let mut weights: Vec<f64> = average_ranks(y).iter().map(|r| n.ln() - r.ln()).collect();
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in &mut weights {
            *w /= total;
        }
    }
    weights
}

/// Centers the columns of `x` and multiplies every row by its rank weight.
///
/// # Errors
///
/// Returns a dimension mismatch if `y` has a different length than `x` has
/// rows.
pub fn weighted_scale(x: &Matrix<f64>, y: &[f64]) -> Result<Matrix<f64>> {
    if x.n_rows() != y.len() {
        return Err(ElaError::dimension_mismatch(
            "objective values",
            x.n_rows(),
            y.len(),
        ));
    }
    let weights = rank_weights(y);
    let mut scaled = x.centered();
    for (i, w) in weights.iter().enumerate() {
        for j in 0..scaled.n_cols() {
            scaled.set(i, j, scaled.get(i, j) * w);
        }
    }
    Ok(scaled)
}

/// Weighted-PCA projection of `x` to `components` dimensions.
///
/// Returns `Ok(None)` when the points already have `components` or fewer
/// dimensions; callers skip the computation in that case.
///
/// # Errors
///
/// Propagates dimension mismatches and PCA fitting errors.
pub fn reduce(x: &Matrix<f64>, y: &[f64], components: usize) -> Result<Option<Matrix<f64>>> {
    if x.n_cols() <= components {
        return Ok(None);
    }
    let scaled = weighted_scale(x, y)?;
    let mut pca = PCA::new(components);
    let projected = pca.fit_transform(&scaled)?;
    trace!(
        components,
        explained_variance = ?pca.explained_variance(),
        "weighted pca fitted"
    );
    Ok(Some(projected))
}

/// Per-column min-max scaling into `[0, 1]`.
///
/// Constant columns map to 0.5.
#[must_use]
pub fn min_max_normalize(x: &Matrix<f64>) -> Matrix<f64> {
    let ranges = x.column_ranges();
    let mut out = x.clone();
    for i in 0..x.n_rows() {
        for (j, &(lo, hi)) in ranges.iter().enumerate() {
            let span = hi - lo;
            let v = if span > 0.0 {
                (x.get(i, j) - lo) / span
            } else {
                0.5
            };
            out.set(i, j, v);
        }
    }
    out
}

#[cfg(test)]
#[path = "decomposition_tests.rs"]
mod tests;
