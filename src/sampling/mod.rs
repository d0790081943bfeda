//! Design-of-experiments sampling over box-constrained domains.
//!
//! Points are first drawn in the unit hypercube by one of three
//! [`SamplingMethod`]s and then mapped affinely onto the problem bounds.
//!
//! # Example
//!
//! ```
//! use bbob_ela::sampling::{unit_sample, SamplingMethod};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let method: SamplingMethod = "lhs".parse().expect("known method");
//! let points = unit_sample(method, 20, 3, &mut rng);
//! assert_eq!(points.shape(), (20, 3));
//! assert!(points.as_slice().iter().all(|&u| (0.0..=1.0).contains(&u)));
//! ```

mod sample;
mod sampler;

pub use sample::{create_sample, read_sample, Sample};
pub use sampler::Sampler;

use crate::error::{ElaError, Result};
use crate::primitives::Matrix;
use rand::distributions::{Distribution, Uniform};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Design used to place sample points in the unit hypercube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMethod {
    /// Maximin-improved Latin hypercube: the most spread out of
    /// [`ILHS_CANDIDATES`] jittered designs.
    Ilhs,
    /// Independent uniform draws.
    Random,
    /// Latin hypercube placing each point at the centre of its stratum.
    Lhs,
}

impl SamplingMethod {
    /// Name used in configuration and sample-set names.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ilhs => "ilhs",
            Self::Random => "random",
            Self::Lhs => "lhs",
        }
    }
}

impl fmt::Display for SamplingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SamplingMethod {
    type Err = ElaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ilhs" => Ok(Self::Ilhs),
            "random" => Ok(Self::Random),
            "lhs" => Ok(Self::Lhs),
            other => Err(ElaError::UnsupportedSamplingMethod(other.to_string())),
        }
    }
}

/// Number of jittered Latin hypercubes drawn by [`SamplingMethod::Ilhs`].
pub const ILHS_CANDIDATES: usize = 5;

/// Draws `n` points in `[0, 1]^dim`.
pub fn unit_sample<R: Rng + ?Sized>(
    method: SamplingMethod,
    n: usize,
    dim: usize,
    rng: &mut R,
) -> Matrix<f64> {
    match method {
        SamplingMethod::Random => {
            let mut out = Matrix::zeros(n, dim);
            let uniform = Uniform::new(0.0, 1.0);
            for i in 0..n {
                for j in 0..dim {
                    out.set(i, j, uniform.sample(rng));
                }
            }
            out
        }
        SamplingMethod::Lhs => latin_hypercube(n, dim, false, rng),
        SamplingMethod::Ilhs => {
            let mut best = latin_hypercube(n, dim, true, rng);
            let mut best_spread = min_pairwise_distance(&best);
            for _ in 1..ILHS_CANDIDATES {
                let candidate = latin_hypercube(n, dim, true, rng);
                let spread = min_pairwise_distance(&candidate);
                if spread > best_spread {
                    best = candidate;
                    best_spread = spread;
                }
            }
            best
        }
    }
}

/// One point per stratum in every column, at the stratum centre or
/// uniformly jittered inside it.
fn latin_hypercube<R: Rng + ?Sized>(
    n: usize,
    dim: usize,
    jitter: bool,
    rng: &mut R,
) -> Matrix<f64> {
    let mut out = Matrix::zeros(n, dim);
    let width = 1.0 / n.max(1) as f64;
    let mut strata: Vec<usize> = (0..n).collect();
    for j in 0..dim {
        strata.shuffle(rng);
        for (i, &stratum) in strata.iter().enumerate() {
            let offset = if jitter { rng.gen::<f64>() } else { 0.5 };
            out.set(i, j, (stratum as f64 + offset) * width);
        }
    }
    out
}

/// Smallest squared Euclidean distance between two rows; infinite below
/// two rows.
fn min_pairwise_distance(points: &Matrix<f64>) -> f64 {
    let (n, d) = points.shape();
    let mut min = f64::INFINITY;
    for a in 0..n {
        for b in (a + 1)..n {
            let dist: f64 = (0..d)
                .map(|j| {
                    let diff = points.get(a, j) - points.get(b, j);
                    diff * diff
                })
                .sum();
            min = min.min(dist);
        }
    }
    min
}

/// Maps unit-cube points onto `[lower, upper]` coordinate-wise.
///
/// # Errors
///
/// Returns a dimension mismatch if the bound vectors do not match the
/// number of columns.
pub fn rescale(unit: &Matrix<f64>, lower: &[f64], upper: &[f64]) -> Result<Matrix<f64>> {
    check_bounds(unit, lower, upper)?;
    let (n, d) = unit.shape();
    let mut out = Matrix::zeros(n, d);
    for i in 0..n {
        for j in 0..d {
            out.set(i, j, lower[j] + (upper[j] - lower[j]) * unit.get(i, j));
        }
    }
    Ok(out)
}

/// Inverse of [`rescale`].
///
/// # Errors
///
/// Returns a dimension mismatch if the bound vectors do not match the
/// number of columns.
pub fn inverse_rescale(points: &Matrix<f64>, lower: &[f64], upper: &[f64]) -> Result<Matrix<f64>> {
    check_bounds(points, lower, upper)?;
    let (n, d) = points.shape();
    let mut out = Matrix::zeros(n, d);
    for i in 0..n {
        for j in 0..d {
            out.set(i, j, (points.get(i, j) - lower[j]) / (upper[j] - lower[j]));
        }
    }
    Ok(out)
}

fn check_bounds(m: &Matrix<f64>, lower: &[f64], upper: &[f64]) -> Result<()> {
    if lower.len() != m.n_cols() {
        return Err(ElaError::dimension_mismatch(
            "lower bound",
            m.n_cols(),
            lower.len(),
        ));
    }
    if upper.len() != m.n_cols() {
        return Err(ElaError::dimension_mismatch(
            "upper bound",
            m.n_cols(),
            upper.len(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "sampling_tests.rs"]
mod tests;
