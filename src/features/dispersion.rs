//! Dispersion features: are the best points closer together than the
//! sample as a whole?

use super::stats::{distance, mean, median, quantile};
use super::{FeatureListing, FeatureObject};
use crate::primitives::Matrix;

const QUANTILES: [(f64, &str); 4] = [(0.02, "02"), (0.05, "05"), (0.10, "10"), (0.25, "25")];

fn pairwise(x: &Matrix<f64>, idx: &[usize]) -> Vec<f64> {
    let mut out = Vec::with_capacity(idx.len() * idx.len().saturating_sub(1) / 2);
    for (a, &i) in idx.iter().enumerate() {
        for &j in &idx[a + 1..] {
            out.push(distance(x.row(i), x.row(j)));
        }
    }
    out
}

pub(crate) fn compute(obj: &FeatureObject, out: &mut FeatureListing) {
    let y = obj.oriented_y();
    let all: Vec<usize> = (0..obj.n_obs()).collect();
    let all_dists = pairwise(obj.x(), &all);
    let (all_mean, all_median) = (mean(&all_dists), median(&all_dists));

    let mut stats = Vec::with_capacity(QUANTILES.len());
    for (q, tag) in QUANTILES {
        let threshold = quantile(&y, q);
        let best: Vec<usize> = all.iter().copied().filter(|&i| y[i] <= threshold).collect();
        let dists = pairwise(obj.x(), &best);
        stats.push((tag, mean(&dists), median(&dists)));
    }

    for (tag, m, _) in &stats {
        out.push(format!("disp.ratio_mean_{tag}"), m / all_mean);
    }
    for (tag, _, md) in &stats {
        out.push(format!("disp.ratio_median_{tag}"), md / all_median);
    }
    for (tag, m, _) in &stats {
        out.push(format!("disp.diff_mean_{tag}"), m - all_mean);
    }
    for (tag, _, md) in &stats {
        out.push(format!("disp.diff_median_{tag}"), md - all_median);
    }
}
