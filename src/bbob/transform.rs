//! Search-space transformations shared by the BBOB functions.
//!
//! Index conventions are zero-based: the BBOB papers' `(i-1)/(D-1)` is
//! [`ratio`]`(i, d)` here.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::StandardNormal;

/// `i / (d - 1)`, zero for one-dimensional problems.
#[inline]
pub(crate) fn ratio(i: usize, d: usize) -> f64 {
    if d > 1 {
        i as f64 / (d - 1) as f64
    } else {
        0.0
    }
}

/// Oscillation transformation `T_osz` for a scalar.
#[inline]
pub(crate) fn tosz(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    let xhat = x.abs().ln();
    let (c1, c2) = if x > 0.0 { (10.0, 7.9) } else { (5.5, 3.1) };
    x.signum() * (xhat + 0.049 * ((c1 * xhat).sin() + (c2 * xhat).sin())).exp()
}

/// Applies [`tosz`] element-wise.
pub(crate) fn tosz_in_place(x: &mut [f64]) {
    for v in x.iter_mut() {
        *v = tosz(*v);
    }
}

/// Asymmetry transformation `T_asy^beta`.
pub(crate) fn tasy_in_place(x: &mut [f64], beta: f64) {
    let d = x.len();
    for (i, v) in x.iter_mut().enumerate() {
        if *v > 0.0 {
            *v = v.powf(1.0 + beta * ratio(i, d) * v.sqrt());
        }
    }
}

/// Diagonal of the ill-conditioning matrix `Λ^alpha`.
pub(crate) fn lambda(alpha: f64, d: usize) -> Vec<f64> {
    (0..d).map(|i| alpha.powf(0.5 * ratio(i, d))).collect()
}

/// Multiplies `x` element-wise by `diag`.
pub(crate) fn scale_in_place(x: &mut [f64], diag: &[f64]) {
    for (v, s) in x.iter_mut().zip(diag) {
        *v *= s;
    }
}

/// Boundary penalty `f_pen`.
pub(crate) fn fpen(x: &[f64]) -> f64 {
    x.iter()
        .map(|v| {
            let excess = (v.abs() - 5.0).max(0.0);
            excess * excess
        })
        .sum()
}

/// `x - shift` as a new vector.
pub(crate) fn shifted(x: &[f64], shift: &[f64]) -> Vec<f64> {
    x.iter().zip(shift).map(|(a, b)| a - b).collect()
}

/// An orthogonal linear map `P_out · B · P_in` where `B` is block diagonal.
///
/// A single full block with identity permutations is the classic dense
/// BBOB rotation. The large-scale suite uses blocks of at most 40 variables
/// so a rotation costs `O(d · block)` instead of `O(d²)`.
#[derive(Debug, Clone)]
pub struct Rotation {
    dim: usize,
    block_sizes: Vec<usize>,
    blocks: Vec<Vec<f64>>,
    perm_in: Vec<usize>,
    perm_out: Vec<usize>,
}

impl Rotation {
    /// The identity map.
    #[must_use]
    pub fn identity(dim: usize) -> Self {
        Self {
            dim,
            block_sizes: vec![1; dim],
            blocks: vec![vec![1.0]; dim],
            perm_in: (0..dim).collect(),
            perm_out: (0..dim).collect(),
        }
    }

    /// A dense random orthogonal matrix.
    pub fn dense<R: Rng>(dim: usize, rng: &mut R) -> Self {
        Self {
            dim,
            block_sizes: vec![dim],
            blocks: vec![orthogonal_block(dim, rng)],
            perm_in: (0..dim).collect(),
            perm_out: (0..dim).collect(),
        }
    }

    /// Permuted block-diagonal orthogonal matrix with blocks of at most
    /// `max_block` variables.
    pub fn block_diagonal<R: Rng>(dim: usize, max_block: usize, rng: &mut R) -> Self {
        let max_block = max_block.max(1);
        let mut block_sizes = Vec::new();
        let mut remaining = dim;
        while remaining > 0 {
            let size = remaining.min(max_block);
            block_sizes.push(size);
            remaining -= size;
        }
        let blocks = block_sizes
            .iter()
            .map(|&s| orthogonal_block(s, rng))
            .collect();

        let mut perm_in: Vec<usize> = (0..dim).collect();
        perm_in.shuffle(rng);
        let mut perm_out: Vec<usize> = (0..dim).collect();
        perm_out.shuffle(rng);

        Self {
            dim,
            block_sizes,
            blocks,
            perm_in,
            perm_out,
        }
    }

    /// Dimension of the map.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Applies the map to `x`.
    #[must_use]
    pub fn apply(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.dim);
        let permuted: Vec<f64> = self.perm_in.iter().map(|&j| x[j]).collect();

        let mut mixed = vec![0.0; self.dim];
        let mut offset = 0;
        for (block, &size) in self.blocks.iter().zip(&self.block_sizes) {
            for r in 0..size {
                let row = &block[r * size..(r + 1) * size];
                mixed[offset + r] = row
                    .iter()
                    .zip(&permuted[offset..offset + size])
                    .map(|(a, b)| a * b)
                    .sum();
            }
            offset += size;
        }

        self.perm_out.iter().map(|&j| mixed[j]).collect()
    }
}

/// Gram-Schmidt orthonormalisation of a standard normal `n × n` matrix.
fn orthogonal_block<R: Rng>(n: usize, rng: &mut R) -> Vec<f64> {
    let mut m: Vec<f64> = (0..n * n).map(|_| rng.sample(StandardNormal)).collect();
    for i in 0..n {
        for j in 0..i {
            let dot: f64 = (0..n).map(|k| m[i * n + k] * m[j * n + k]).sum();
            for k in 0..n {
                m[i * n + k] -= dot * m[j * n + k];
            }
        }
        let norm: f64 = (0..n)
            .map(|k| m[i * n + k] * m[i * n + k])
            .sum::<f64>()
            .sqrt();
        if norm > 0.0 {
            for k in 0..n {
                m[i * n + k] /= norm;
            }
        }
    }
    m
}
