//! Information content along a nearest-neighbour tour.
//!
//! The sample is ordered by a greedy nearest-neighbour walk. Consecutive
//! slopes are mapped to symbols `{-1, 0, 1}` for every epsilon on a
//! logarithmic grid, and the entropy of changing symbol pairs (`H`) and the
//! partial information content (`M`) are summarised.

use super::stats::distance;
use super::{FeatureListing, FeatureObject};
use crate::primitives::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const GRID_POINTS: usize = 1000;
const SETTLING_THRESHOLD: f64 = 0.05;
const PARTIAL_RATIO: f64 = 0.5;
const TOUR_SEED: u64 = 0;

/// `{0} ∪ 10^linspace(-5, 15, 1000)`.
fn epsilon_grid() -> Vec<f64> {
    let mut eps = Vec::with_capacity(GRID_POINTS + 1);
    eps.push(0.0);
    let step = 20.0 / (GRID_POINTS - 1) as f64;
    eps.extend((0..GRID_POINTS).map(|k| 10f64.powf(-5.0 + k as f64 * step)));
    eps
}

/// Greedy nearest-neighbour tour from a seeded random start.
fn tour(x: &Matrix<f64>) -> Vec<usize> {
    let n = x.n_rows();
    let mut visited = vec![false; n];
    let mut current = StdRng::seed_from_u64(TOUR_SEED).gen_range(0..n);
    let mut order = Vec::with_capacity(n);
    for _ in 0..n {
        visited[current] = true;
        order.push(current);
        let next = (0..n)
            .filter(|&j| !visited[j])
            .map(|j| (j, distance(x.row(current), x.row(j))))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        match next {
            Some((j, _)) => current = j,
            None => break,
        }
    }
    order
}

fn symbols(slopes: &[f64], eps: f64) -> Vec<i8> {
    slopes
        .iter()
        .map(|&s| {
            if s > eps {
                1
            } else if s < -eps {
                -1
            } else {
                0
            }
        })
        .collect()
}

/// Entropy of the changing consecutive symbol pairs, base 6.
fn entropy(sym: &[i8]) -> f64 {
    if sym.len() < 2 {
        return 0.0;
    }
    let pairs = (sym.len() - 1) as f64;
    let mut counts = [[0usize; 3]; 3];
    for w in sym.windows(2) {
        counts[(w[0] + 1) as usize][(w[1] + 1) as usize] += 1;
    }
    let mut h = 0.0;
    for (p, row) in counts.iter().enumerate() {
        for (q, &c) in row.iter().enumerate() {
            if p != q && c > 0 {
                let prob = c as f64 / pairs;
                h -= prob * prob.log(6.0);
            }
        }
    }
    h
}

/// Partial information content: length of the alternating non-zero
/// subsequence relative to the sequence length.
fn partial_information(sym: &[i8]) -> f64 {
    if sym.is_empty() {
        return 0.0;
    }
    let mut last = 0;
    let mut count = 0;
    for &s in sym {
        if s != 0 && s != last {
            count += 1;
            last = s;
        }
    }
    count as f64 / sym.len() as f64
}

pub(crate) fn compute(obj: &FeatureObject, out: &mut FeatureListing) {
    let x = obj.x();
    let y = obj.oriented_y();
    let order = tour(x);

    let slopes: Vec<f64> = order
        .windows(2)
        .map(|w| (y[w[1]] - y[w[0]]) / distance(x.row(w[0]), x.row(w[1])))
        .collect();

    let grid = epsilon_grid();
    let mut h = Vec::with_capacity(grid.len());
    let mut m = Vec::with_capacity(grid.len());
    for &eps in &grid {
        let sym = symbols(&slopes, eps);
        h.push(entropy(&sym));
        m.push(partial_information(&sym));
    }

    let h_max = h.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let at_max: Vec<f64> = grid
        .iter()
        .zip(&h)
        .filter(|(_, v)| **v == h_max)
        .map(|(e, _)| *e)
        .collect();
    let eps_max = super::stats::median(&at_max);
    let eps_s = grid
        .iter()
        .zip(&h)
        .find(|(_, v)| **v < SETTLING_THRESHOLD)
        .map_or(f64::NAN, |(e, _)| *e);
    let m0 = m[0];
    let eps_ratio = grid
        .iter()
        .zip(&m)
        .find(|(_, v)| **v <= PARTIAL_RATIO * m0)
        .map_or(f64::NAN, |(e, _)| *e);

    out.push("ic.h.max", h_max);
    out.push("ic.eps.s", eps_s.log10());
    out.push("ic.eps.max", eps_max.log10());
    out.push("ic.eps.ratio", eps_ratio.log10());
    out.push("ic.m0", m0);
}
