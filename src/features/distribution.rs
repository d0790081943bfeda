//! y-distribution features: skewness, kurtosis and the number of density
//! peaks.

use super::stats::{kurtosis, quantile, sd, skewness};
use super::{FeatureListing, FeatureObject};
use std::f64::consts::PI;

/// Grid size of the kernel density estimate.
const DENSITY_POINTS: usize = 512;
/// Minimum probability mass for a density bump to count as a peak.
const MODE_MASS_THRESHOLD: f64 = 0.01;

pub(crate) fn compute(obj: &FeatureObject, out: &mut FeatureListing) {
    let y = obj.y();
    out.push("ela_distr.skewness", skewness(y));
    out.push("ela_distr.kurtosis", kurtosis(y));
    out.push("ela_distr.number_of_peaks", number_of_peaks(y));
}

/// Silverman's rule of thumb (`bw.nrd0`).
fn bandwidth(y: &[f64]) -> f64 {
    let spread = sd(y);
    let iqr = quantile(y, 0.75) - quantile(y, 0.25);
    let mut lo = spread.min(iqr / 1.34);
    if !(lo > 0.0) {
        lo = if spread > 0.0 {
            spread
        } else if y[0] != 0.0 {
            y[0].abs()
        } else {
            1.0
        };
    }
    0.9 * lo * (y.len() as f64).powf(-0.2)
}

fn number_of_peaks(y: &[f64]) -> f64 {
    if y.len() < 2 {
        return f64::NAN;
    }
    let h = bandwidth(y);
    let lo = y.iter().copied().fold(f64::INFINITY, f64::min) - 3.0 * h;
    let hi = y.iter().copied().fold(f64::NEG_INFINITY, f64::max) + 3.0 * h;
    let step = (hi - lo) / (DENSITY_POINTS - 1) as f64;
    let norm = 1.0 / (y.len() as f64 * h * (2.0 * PI).sqrt());

    let density: Vec<f64> = (0..DENSITY_POINTS)
        .map(|k| {
            let t = lo + k as f64 * step;
            norm * y
                .iter()
                .map(|v| {
                    let u = (t - v) / h;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
        })
        .collect();

    // split the grid at local minima and count bumps with enough mass
    let mut cuts = vec![0];
    for k in 1..DENSITY_POINTS - 1 {
        if density[k] < density[k - 1] && density[k] <= density[k + 1] {
            cuts.push(k);
        }
    }
    cuts.push(DENSITY_POINTS - 1);

    let peaks = cuts
        .windows(2)
        .filter(|w| density[w[0]..=w[1]].iter().sum::<f64>() * step > MODE_MASS_THRESHOLD)
        .count();
    peaks as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unimodal_has_one_peak() {
        let y: Vec<f64> = (0..200)
            .map(|i| (f64::from(i) / 199.0 - 0.5).powi(3))
            .collect();
        assert_eq!(number_of_peaks(&y), 1.0);
    }

    #[test]
    fn test_bimodal_has_two_peaks() {
        let mut y: Vec<f64> = (0..100).map(|i| f64::from(i) * 0.01).collect();
        y.extend((0..100).map(|i| 50.0 + f64::from(i) * 0.01));
        assert_eq!(number_of_peaks(&y), 2.0);
    }
}
