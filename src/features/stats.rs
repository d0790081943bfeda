//! Small statistics kernels shared by the feature classes.
//!
//! Conventions follow R: sample variance uses `n - 1`, quantiles are type 7
//! and moments use the `e1071` type 3 estimators.

use nalgebra::{DMatrix, DVector};

pub(crate) fn mean(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    x.iter().sum::<f64>() / x.len() as f64
}

pub(crate) fn variance(x: &[f64]) -> f64 {
    if x.len() < 2 {
        return f64::NAN;
    }
    let m = mean(x);
    x.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (x.len() - 1) as f64
}

pub(crate) fn sd(x: &[f64]) -> f64 {
    variance(x).sqrt()
}

fn sorted(x: &[f64]) -> Vec<f64> {
    let mut s = x.to_vec();
    s.sort_by(f64::total_cmp);
    s
}

/// Type 7 quantile (linear interpolation between order statistics).
pub(crate) fn quantile(x: &[f64], p: f64) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    quantile_sorted(&sorted(x), p)
}

pub(crate) fn quantile_sorted(s: &[f64], p: f64) -> f64 {
    let h = (s.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    s[lo] + (h - lo as f64) * (s[hi] - s[lo])
}

pub(crate) fn median(x: &[f64]) -> f64 {
    quantile(x, 0.5)
}

/// Central moments `m2`, `m3`, `m4` with an `n` denominator.
fn central_moments(x: &[f64]) -> (f64, f64, f64) {
    let n = x.len() as f64;
    let m = mean(x);
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for v in x {
        let d = v - m;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    (m2 / n, m3 / n, m4 / n)
}

pub(crate) fn skewness(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    let (m2, m3, _) = central_moments(x);
    let g1 = m3 / m2.powf(1.5);
    g1 * ((n - 1.0) / n).powf(1.5)
}

pub(crate) fn kurtosis(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    let (m2, _, m4) = central_moments(x);
    let g2 = m4 / (m2 * m2) - 3.0;
    (g2 + 3.0) * (1.0 - 1.0 / n).powi(2) - 3.0
}

/// Pearson correlation; NaN when either side is constant.
pub(crate) fn correlation(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return f64::NAN;
    }
    let (ma, mb) = (mean(a), mean(b));
    let mut cov = 0.0;
    let mut va = 0.0;
    let mut vb = 0.0;
    for (x, y) in a.iter().zip(b) {
        cov += (x - ma) * (y - mb);
        va += (x - ma) * (x - ma);
        vb += (y - mb) * (y - mb);
    }
    cov / (va * vb).sqrt()
}

pub(crate) fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Ordinary least squares fit of `y` on `design` (intercept column included
/// by the caller).
///
/// Returns the coefficients and the coefficient of determination, or `None`
/// if the system has fewer rows than columns.
pub(crate) fn least_squares(design: &DMatrix<f64>, y: &[f64]) -> Option<(Vec<f64>, f64)> {
    let (n, p) = design.shape();
    if n < p || n != y.len() {
        return None;
    }
    let target = DVector::from_column_slice(y);
    let svd = design.clone().svd(true, true);
    let coefs = svd.solve(&target, 1e-12).ok()?;
    let fitted = design * &coefs;

    let m = mean(y);
    let ss_tot: f64 = y.iter().map(|v| (v - m) * (v - m)).sum();
    let ss_res: f64 = y
        .iter()
        .zip(fitted.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum();
    let r2 = if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else {
        f64::NAN
    };
    Some((coefs.iter().copied().collect(), r2))
}

/// `1 - (1 - r2) (n - 1) / (n - p - 1)` for `p` predictors; NaN when the
/// model leaves no residual degrees of freedom.
pub(crate) fn adjusted_r2(r2: f64, n: usize, predictors: usize) -> f64 {
    if n <= predictors + 1 {
        return f64::NAN;
    }
    1.0 - (1.0 - r2) * (n - 1) as f64 / (n - predictors - 1) as f64
}

/// Eigenvalues of a symmetric matrix in descending order; `None` if the
/// matrix contains non-finite entries.
pub(crate) fn sorted_eigenvalues(m: DMatrix<f64>) -> Option<Vec<f64>> {
    if m.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let mut values: Vec<f64> = nalgebra::SymmetricEigen::new(m)
        .eigenvalues
        .iter()
        .copied()
        .collect();
    values.sort_by(|a, b| b.total_cmp(a));
    Some(values)
}
