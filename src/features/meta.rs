//! Meta-model features: fit quality of linear and quadratic surrogates.

use super::stats::{adjusted_r2, least_squares};
use super::{FeatureListing, FeatureObject};
use nalgebra::DMatrix;

#[derive(Clone, Copy)]
struct Terms {
    interactions: bool,
    squares: bool,
}

impl Terms {
    fn n_columns(self, d: usize) -> usize {
        let mut p = 1 + d;
        if self.interactions {
            p += d * d.saturating_sub(1) / 2;
        }
        if self.squares {
            p += d;
        }
        p
    }

    /// Design matrix with intercept, linear, interaction and square columns
    /// in that order.
    fn design(self, obj: &FeatureObject) -> DMatrix<f64> {
        let d = obj.dim();
        let p = self.n_columns(d);
        let mut data = Vec::with_capacity(obj.n_obs() * p);
        for row in obj.x().rows() {
            data.push(1.0);
            data.extend_from_slice(row);
            if self.interactions {
                for j in 0..d {
                    for k in j + 1..d {
                        data.push(row[j] * row[k]);
                    }
                }
            }
            if self.squares {
                data.extend(row.iter().map(|v| v * v));
            }
        }
        DMatrix::from_row_slice(obj.n_obs(), p, &data)
    }
}

/// Fits the model; `None` when it has more coefficients than observations.
fn fit(obj: &FeatureObject, terms: Terms) -> Option<(Vec<f64>, f64)> {
    if terms.n_columns(obj.dim()) > obj.n_obs() {
        return None;
    }
    let (coefs, r2) = least_squares(&terms.design(obj), obj.y())?;
    let adj = adjusted_r2(r2, obj.n_obs(), coefs.len() - 1);
    Some((coefs, adj))
}

fn abs_min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v.abs()), hi.max(v.abs()))
        })
}

pub(crate) fn compute(obj: &FeatureObject, out: &mut FeatureListing) {
    let d = obj.dim();
    let nan = f64::NAN;

    let linear = fit(
        obj,
        Terms {
            interactions: false,
            squares: false,
        },
    );
    match &linear {
        Some((coefs, adj)) => {
            let (lo, hi) = abs_min_max(&coefs[1..]);
            out.push("ela_meta.lin_simple.adj_r2", *adj);
            out.push("ela_meta.lin_simple.intercept", coefs[0]);
            out.push("ela_meta.lin_simple.coef.min", lo);
            out.push("ela_meta.lin_simple.coef.max", hi);
            out.push("ela_meta.lin_simple.coef.max_by_min", hi / lo);
        }
        None => {
            for name in [
                "adj_r2",
                "intercept",
                "coef.min",
                "coef.max",
                "coef.max_by_min",
            ] {
                out.push(format!("ela_meta.lin_simple.{name}"), nan);
            }
        }
    }

    let interact = fit(
        obj,
        Terms {
            interactions: true,
            squares: false,
        },
    );
    out.push(
        "ela_meta.lin_w_interact.adj_r2",
        interact.map_or(nan, |(_, adj)| adj),
    );

    match fit(
        obj,
        Terms {
            interactions: false,
            squares: true,
        },
    ) {
        Some((coefs, adj)) => {
            let (lo, hi) = abs_min_max(&coefs[1 + d..]);
            out.push("ela_meta.quad_simple.adj_r2", adj);
            out.push("ela_meta.quad_simple.cond", hi / lo);
        }
        None => {
            out.push("ela_meta.quad_simple.adj_r2", nan);
            out.push("ela_meta.quad_simple.cond", nan);
        }
    }

    let full = fit(
        obj,
        Terms {
            interactions: true,
            squares: true,
        },
    );
    out.push(
        "ela_meta.quad_w_interact.adj_r2",
        full.map_or(nan, |(_, adj)| adj),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Matrix;

    fn object(f: impl Fn(f64, f64) -> f64) -> FeatureObject {
        let mut data = Vec::new();
        let mut y = Vec::new();
        for i in 0..8 {
            for j in 0..8 {
                let (a, b) = (f64::from(i) - 3.5, f64::from(j) * 0.5 - 2.0);
                data.extend([a, b]);
                y.push(f(a, b));
            }
        }
        FeatureObject::new(Matrix::from_vec(64, 2, data).expect("valid"), y, -5.0, 5.0)
            .expect("valid")
    }

    #[test]
    fn test_linear_function_fits_perfectly() {
        let obj = object(|a, b| 3.0 + 2.0 * a - 0.5 * b);
        let mut out = FeatureListing::new();
        compute(&obj, &mut out);
        let adj = out.value("ela_meta.lin_simple.adj_r2").expect("present");
        assert!((adj - 1.0).abs() < 1e-9);
        assert!((out.value("ela_meta.lin_simple.intercept").expect("present") - 3.0).abs() < 1e-9);
        assert!(
            (out.value("ela_meta.lin_simple.coef.max_by_min")
                .expect("present")
                - 4.0)
                .abs()
                < 1e-9
        );
        assert_eq!(out.len(), 9);
    }

    #[test]
    fn test_quadratic_condition() {
        let obj = object(|a, b| a * a + 10.0 * b * b);
        let mut out = FeatureListing::new();
        compute(&obj, &mut out);
        assert!((out.value("ela_meta.quad_simple.adj_r2").expect("present") - 1.0).abs() < 1e-9);
        assert!((out.value("ela_meta.quad_simple.cond").expect("present") - 10.0).abs() < 1e-6);
        assert!(out.value("ela_meta.lin_simple.adj_r2").expect("present") < 0.9);
    }

    #[test]
    fn test_underdetermined_models_are_nan() {
        let x = Matrix::from_vec(3, 2, vec![0.0, 1.0, 1.0, 0.0, 2.0, 2.0]).expect("valid");
        let obj = FeatureObject::new(x, vec![1.0, 2.0, 3.0], -5.0, 5.0).expect("valid");
        let mut out = FeatureListing::new();
        compute(&obj, &mut out);
        assert!(out
            .value("ela_meta.quad_w_interact.adj_r2")
            .expect("present")
            .is_nan());
        assert!(out
            .value("ela_meta.lin_simple.adj_r2")
            .expect("present")
            .is_nan());
    }
}
