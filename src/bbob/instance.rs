//! Deterministic instance data (optimum location, optimal value, rotations).

use super::transform::{lambda, Rotation};
use super::Suite;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Largest rotation block used by the large-scale suite.
pub(crate) const LARGE_SCALE_BLOCK: usize = 40;

/// Optimum component used by the Schwefel function.
pub(crate) const SCHWEFEL_OPT: f64 = 4.209_687_462_275_036;

/// Location shift of the first Lunacek funnel.
pub(crate) const LUNACEK_MU0: f64 = 2.5;

/// Gallagher peak landscape.
#[derive(Debug, Clone)]
pub(crate) struct Peaks {
    /// Peak locations, already mapped through `R`.
    pub rotated_locations: Vec<Vec<f64>>,
    /// Peak heights `w_i`.
    pub weights: Vec<f64>,
    /// Diagonal of `C_i` per peak.
    pub scales: Vec<Vec<f64>>,
    /// Unrotated location of the highest peak.
    pub optimum: Vec<f64>,
}

/// Everything a function needs besides the point itself.
#[derive(Debug, Clone)]
pub(crate) struct InstanceData {
    pub xopt: Vec<f64>,
    pub fopt: f64,
    pub r: Rotation,
    pub q: Rotation,
    /// Random signs `1±` (Schwefel, Lunacek).
    pub signs: Vec<f64>,
    pub peaks: Option<Peaks>,
}

impl InstanceData {
    pub(crate) fn generate(suite: Suite, function: u8, dim: usize, instance: u32) -> Self {
        let seed = u64::from(function) + 10_000 * u64::from(instance);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut xopt: Vec<f64> = (0..dim)
            .map(|_| {
                let v: f64 = rng.gen_range(-4.0..4.0);
                let v = (v * 1e4).round() / 1e4;
                if v == 0.0 {
                    -1e-5
                } else {
                    v
                }
            })
            .collect();
        let fopt = draw_fopt(&mut rng);
        let signs: Vec<f64> = (0..dim)
            .map(|_| if rng.gen_bool(0.5) { 1.0 } else { -1.0 })
            .collect();

        let (r, q) = match suite {
            Suite::Bbob => (
                Rotation::dense(dim, &mut rng),
                Rotation::dense(dim, &mut rng),
            ),
            Suite::BbobLargeScale => (
                Rotation::block_diagonal(dim, LARGE_SCALE_BLOCK, &mut rng),
                Rotation::block_diagonal(dim, LARGE_SCALE_BLOCK, &mut rng),
            ),
        };

        match function {
            4 => {
                for v in xopt.iter_mut().step_by(2) {
                    *v = v.abs();
                }
            }
            5 => {
                for v in &mut xopt {
                    *v = 5.0 * v.signum();
                }
            }
            8 => {
                for v in &mut xopt {
                    *v *= 0.75;
                }
            }
            9 | 19 => {
                // rotated Rosenbrock variants are not shifted; z = 1 at R^T (1 / 2c)
                let c = rosenbrock_scale(dim);
                xopt = inverse_rotated(&r, &vec![0.5 / c; dim]);
            }
            20 => {
                xopt = signs.iter().map(|s| 0.5 * SCHWEFEL_OPT * s).collect();
            }
            24 => {
                xopt = signs.iter().map(|s| 0.5 * LUNACEK_MU0 * s).collect();
            }
            _ => {}
        }

        let peaks = match function {
            21 => Some(gallagher_peaks(&mut rng, &r, dim, 101, 1000.0, 4.0, 5.0)),
            22 => Some(gallagher_peaks(
                &mut rng,
                &r,
                dim,
                21,
                1000.0 * 1000.0,
                3.92,
                4.9,
            )),
            _ => None,
        };
        if let Some(p) = &peaks {
            xopt.clone_from(&p.optimum);
        }

        Self {
            xopt,
            fopt,
            r,
            q,
            signs,
            peaks,
        }
    }
}

/// `max(1, sqrt(d) / 8)`, the Rosenbrock argument scaling.
pub(crate) fn rosenbrock_scale(dim: usize) -> f64 {
    ((dim as f64).sqrt() / 8.0).max(1.0)
}

/// Optimal value: a rounded Cauchy-like draw clamped to `[-1000, 1000]`.
fn draw_fopt<R: Rng>(rng: &mut R) -> f64 {
    let g1: f64 = rng.sample(StandardNormal);
    let mut g2: f64 = rng.sample(StandardNormal);
    if g2 == 0.0 {
        g2 = f64::EPSILON;
    }
    let v = (100.0 * 100.0 * g1 / g2).round() / 100.0;
    v.clamp(-1000.0, 1000.0)
}

/// `R^T y` for an orthogonal `R`, computed column by column.
fn inverse_rotated(r: &Rotation, y: &[f64]) -> Vec<f64> {
    let dim = r.dim();
    let mut unit = vec![0.0; dim];
    (0..dim)
        .map(|j| {
            unit[j] = 1.0;
            let column = r.apply(&unit);
            unit[j] = 0.0;
            column.iter().zip(y).map(|(a, b)| a * b).sum()
        })
        .collect()
}

fn gallagher_peaks<R: Rng>(
    rng: &mut R,
    r: &Rotation,
    dim: usize,
    n_peaks: usize,
    first_condition: f64,
    first_range: f64,
    range: f64,
) -> Peaks {
    let others = (n_peaks - 1) as f64;

    let mut conditions: Vec<f64> = (0..n_peaks - 1)
        .map(|j| 1000f64.powf(2.0 * j as f64 / (others - 1.0).max(1.0)))
        .collect();
    conditions.shuffle(rng);
    conditions.insert(0, first_condition);

    let mut weights = Vec::with_capacity(n_peaks);
    let mut scales = Vec::with_capacity(n_peaks);
    let mut rotated_locations = Vec::with_capacity(n_peaks);
    let mut optimum = Vec::new();

    for (i, &alpha) in conditions.iter().enumerate() {
        let weight = if i == 0 {
            10.0
        } else {
            1.1 + 8.0 * (i - 1) as f64 / (others - 1.0).max(1.0)
        };
        weights.push(weight);

        let mut diag = lambda(alpha, dim);
        diag.shuffle(rng);
        let norm = alpha.powf(0.25);
        scales.push(diag.iter().map(|v| v / norm).collect());

        let bound = if i == 0 { first_range } else { range };
        let location: Vec<f64> = (0..dim).map(|_| rng.gen_range(-bound..bound)).collect();
        rotated_locations.push(r.apply(&location));
        if i == 0 {
            optimum = location;
        }
    }

    Peaks {
        rotated_locations,
        weights,
        scales,
        optimum,
    }
}
