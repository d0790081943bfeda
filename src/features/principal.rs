//! Principal-component features of the decision space and of the joint
//! (decision, objective) space.

use super::stats::sorted_eigenvalues;
use super::{FeatureListing, FeatureObject};
use crate::primitives::Matrix;
use nalgebra::DMatrix;

const EXPLAINED_THRESHOLD: f64 = 0.9;

pub(crate) fn compute(obj: &FeatureObject, out: &mut FeatureListing) {
    let x = obj.x();
    let joint = x.with_column(obj.y());

    let mut share = Vec::with_capacity(4);
    let mut first = Vec::with_capacity(4);
    let variants: [(&str, Option<&Matrix<f64>>, bool); 4] = [
        ("cov_x", Some(x), false),
        ("cor_x", Some(x), true),
        ("cov_init", joint.as_ref().ok(), false),
        ("cor_init", joint.as_ref().ok(), true),
    ];
    for (tag, data, use_correlation) in variants {
        let (s, p) = data.map_or((f64::NAN, f64::NAN), |m| explained(m, use_correlation));
        share.push((tag, s));
        first.push((tag, p));
    }

    for (tag, s) in share {
        out.push(format!("pca.expl_var.{tag}"), s);
    }
    for (tag, p) in first {
        out.push(format!("pca.expl_var_PC1.{tag}"), p);
    }
}

/// Share of components needed for 90% of the variance, and the share of
/// variance on the first component.
fn explained(m: &Matrix<f64>, use_correlation: bool) -> (f64, f64) {
    let d = m.n_cols();
    let cov = m.covariance();
    let mut matrix = DMatrix::from_row_slice(d, d, cov.as_slice());
    if use_correlation {
        let sds: Vec<f64> = (0..d).map(|i| matrix[(i, i)].sqrt()).collect();
        for i in 0..d {
            for j in 0..d {
                matrix[(i, j)] /= sds[i] * sds[j];
            }
        }
    }
    let Some(values) = sorted_eigenvalues(matrix) else {
        return (f64::NAN, f64::NAN);
    };
    let total: f64 = values.iter().sum();
    if !(total > 0.0) {
        return (f64::NAN, f64::NAN);
    }
    let mut cumulative = 0.0;
    let mut needed = d;
    for (k, v) in values.iter().enumerate() {
        cumulative += v / total;
        if cumulative >= EXPLAINED_THRESHOLD {
            needed = k + 1;
            break;
        }
    }
    (needed as f64 / d as f64, values[0] / total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collinear_points_need_one_component() {
        let data: Vec<f64> = (0..20)
            .flat_map(|i| [f64::from(i), 2.0 * f64::from(i)])
            .collect();
        let x = Matrix::from_vec(20, 2, data).expect("valid");
        let (share, first) = explained(&x, false);
        assert_eq!(share, 0.5);
        assert!((first - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_feature_names() {
        let data: Vec<f64> = (0..30)
            .flat_map(|i| [f64::from(i % 7), f64::from(i % 5)])
            .collect();
        let x = Matrix::from_vec(30, 2, data).expect("valid");
        let y: Vec<f64> = (0..30).map(f64::from).collect();
        let obj = FeatureObject::new(x, y, -5.0, 10.0).expect("valid");
        let mut out = FeatureListing::new();
        compute(&obj, &mut out);
        let names: Vec<&str> = out.names().collect();
        assert_eq!(names[0], "pca.expl_var.cov_x");
        assert_eq!(names[7], "pca.expl_var_PC1.cor_init");
        let v = out.value("pca.expl_var_PC1.cor_x").expect("present");
        assert!((0.5..=1.0).contains(&v));
    }
}
