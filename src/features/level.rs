//! Level-set features: how well discriminant analysis separates the points
//! below a y-quantile from the rest.

use super::stats::quantile;
use super::{FeatureListing, FeatureObject};
use crate::primitives::Matrix;
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const QUANTILES: [(f64, &str); 3] = [(0.10, "10"), (0.25, "25"), (0.50, "50")];
const FOLDS: usize = 10;
const FOLD_SEED: u64 = 0;
/// Relative ridge added to covariance diagonals.
const RIDGE: f64 = 1e-8;

pub(crate) fn compute(obj: &FeatureObject, out: &mut FeatureListing) {
    let y = obj.oriented_y();
    let x = obj.x();
    let folds = fold_assignment(obj.n_obs());

    let mut lda = Vec::with_capacity(QUANTILES.len());
    let mut qda = Vec::with_capacity(QUANTILES.len());
    for (q, _) in QUANTILES {
        let threshold = quantile(&y, q);
        let labels: Vec<bool> = y.iter().map(|&v| v <= threshold).collect();
        lda.push(cross_validated_error(
            x,
            &labels,
            &folds,
            Discriminant::Linear,
        ));
        qda.push(cross_validated_error(
            x,
            &labels,
            &folds,
            Discriminant::Quadratic,
        ));
    }

    for ((_, tag), e) in QUANTILES.iter().zip(&lda) {
        out.push(format!("ela_level.mmce_lda_{tag}"), *e);
    }
    for ((_, tag), e) in QUANTILES.iter().zip(&qda) {
        out.push(format!("ela_level.mmce_qda_{tag}"), *e);
    }
    for ((_, tag), (l, q)) in QUANTILES.iter().zip(lda.iter().zip(&qda)) {
        out.push(format!("ela_level.lda_qda_{tag}"), l / q);
    }
}

fn fold_assignment(n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut StdRng::seed_from_u64(FOLD_SEED));
    let mut folds = vec![0; n];
    for (pos, &idx) in order.iter().enumerate() {
        folds[idx] = pos % FOLDS;
    }
    folds
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Discriminant {
    Linear,
    Quadratic,
}

/// Gaussian class model: mean, inverse covariance and log normalizer.
struct ClassModel {
    mean: Vec<f64>,
    precision: DMatrix<f64>,
    log_norm: f64,
}

impl ClassModel {
    fn score(&self, row: &[f64]) -> f64 {
        let diff =
            DVector::from_iterator(row.len(), row.iter().zip(&self.mean).map(|(a, b)| a - b));
        let quad = diff.dot(&(&self.precision * &diff));
        self.log_norm - 0.5 * quad
    }
}

fn covariance(rows: &[&[f64]], means: &[f64]) -> DMatrix<f64> {
    let d = means.len();
    let mut cov = DMatrix::zeros(d, d);
    for row in rows {
        for i in 0..d {
            let di = row[i] - means[i];
            for j in 0..d {
                cov[(i, j)] += di * (row[j] - means[j]);
            }
        }
    }
    cov
}

/// Inverse and log-determinant of `cov + ridge`.
fn regularized_inverse(mut cov: DMatrix<f64>) -> Option<(DMatrix<f64>, f64)> {
    let d = cov.nrows();
    let scale = (cov.trace() / d as f64).abs().max(1e-12);
    for i in 0..d {
        cov[(i, i)] += RIDGE * scale;
    }
    let chol = cov.cholesky()?;
    let log_det = 2.0 * chol.l().diagonal().iter().map(|v| v.ln()).sum::<f64>();
    Some((chol.inverse(), log_det))
}

fn fit_models(
    x: &Matrix<f64>,
    labels: &[bool],
    train: &[usize],
    kind: Discriminant,
) -> Option<Vec<(bool, ClassModel)>> {
    let d = x.n_cols();
    let mut groups: Vec<(bool, Vec<&[f64]>)> = vec![(false, Vec::new()), (true, Vec::new())];
    for &i in train {
        groups[usize::from(labels[i])].1.push(x.row(i));
    }
    groups.retain(|(_, rows)| !rows.is_empty());

    let means: Vec<Vec<f64>> = groups
        .iter()
        .map(|(_, rows)| {
            let mut m = vec![0.0; d];
            for row in rows {
                for (a, b) in m.iter_mut().zip(row.iter()) {
                    *a += b;
                }
            }
            m.iter().map(|v| v / rows.len() as f64).collect()
        })
        .collect();

    let pooled = if kind == Discriminant::Linear {
        let mut total = DMatrix::zeros(d, d);
        for ((_, rows), m) in groups.iter().zip(&means) {
            total += covariance(rows, m);
        }
        let dof = (train.len().saturating_sub(groups.len())).max(1) as f64;
        Some(regularized_inverse(total / dof)?)
    } else {
        None
    };

    let n_train = train.len() as f64;
    let mut models = Vec::with_capacity(groups.len());
    for ((label, rows), mean) in groups.iter().zip(means) {
        let prior = (rows.len() as f64 / n_train).ln();
        let (precision, log_det) = match &pooled {
            Some((inv, _)) => (inv.clone(), 0.0),
            None => {
                let dof = (rows.len().saturating_sub(1)).max(1) as f64;
                regularized_inverse(covariance(rows, &mean) / dof)?
            }
        };
        models.push((
            *label,
            ClassModel {
                mean,
                precision,
                log_norm: prior - 0.5 * log_det,
            },
        ));
    }
    Some(models)
}

/// Mean misclassification error over the folds.
fn cross_validated_error(
    x: &Matrix<f64>,
    labels: &[bool],
    folds: &[usize],
    kind: Discriminant,
) -> f64 {
    let mut errors = Vec::with_capacity(FOLDS);
    for fold in 0..FOLDS {
        let (test, train): (Vec<usize>, Vec<usize>) =
            (0..labels.len()).partition(|&i| folds[i] == fold);
        if test.is_empty() || train.is_empty() {
            continue;
        }
        let Some(models) = fit_models(x, labels, &train, kind) else {
            return f64::NAN;
        };
        let wrong = test
            .iter()
            .filter(|&&i| {
                let predicted = models
                    .iter()
                    .map(|(label, m)| (*label, m.score(x.row(i))))
                    .fold((false, f64::NEG_INFINITY), |best, cur| {
                        if cur.1 > best.1 {
                            cur
                        } else {
                            best
                        }
                    })
                    .0;
                predicted != labels[i]
            })
            .count();
        errors.push(wrong as f64 / test.len() as f64);
    }
    if errors.is_empty() {
        return f64::NAN;
    }
    errors.iter().sum::<f64>() / errors.len() as f64
}
