//! Cell-based features: local linear models and cell-mapping angle,
//! gradient homogeneity and convexity.
//!
//! All four classes work on the grid defined by the feature object's
//! blocks; empty cells are ignored.

use super::stats::{correlation, distance, least_squares, mean, sd};
use super::{FeatureListing, FeatureObject};
use nalgebra::DMatrix;
use std::collections::BTreeMap;

/// Gradient coefficients of a linear model fitted in every cell with enough
/// points.
fn cell_gradients(obj: &FeatureObject) -> Vec<Vec<f64>> {
    let d = obj.dim();
    let x = obj.x();
    let y = obj.y();
    obj.cells()
        .values()
        .filter(|rows| rows.len() > d)
        .filter_map(|rows| {
            let mut data = Vec::with_capacity(rows.len() * (d + 1));
            for &i in rows {
                data.push(1.0);
                data.extend_from_slice(x.row(i));
            }
            let design = DMatrix::from_row_slice(rows.len(), d + 1, &data);
            let target: Vec<f64> = rows.iter().map(|&i| y[i]).collect();
            least_squares(&design, &target).map(|(coefs, _)| coefs[1..].to_vec())
        })
        .collect()
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|a| a * a).sum::<f64>().sqrt()
}

/// Mean pairwise correlation between the columns of `rows` (one row per cell).
fn mean_column_correlation(rows: &[Vec<f64>]) -> f64 {
    let d = rows.first().map_or(0, Vec::len);
    let columns: Vec<Vec<f64>> = (0..d)
        .map(|j| rows.iter().map(|r| r[j]).collect())
        .collect();
    let mut cors = Vec::new();
    for a in 0..d {
        for b in a + 1..d {
            cors.push(correlation(&columns[a], &columns[b]));
        }
    }
    mean(&cors)
}

/// Ratio of the largest to the smallest per-dimension standard deviation,
/// and their mean.
fn sd_summary(rows: &[Vec<f64>]) -> (f64, f64) {
    let d = rows.first().map_or(0, Vec::len);
    let sds: Vec<f64> = (0..d)
        .map(|j| sd(&rows.iter().map(|r| r[j]).collect::<Vec<_>>()))
        .collect();
    let hi = sds.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lo = sds.iter().copied().fold(f64::INFINITY, f64::min);
    (hi / lo, mean(&sds))
}

pub(crate) fn compute_limo(obj: &FeatureObject, out: &mut FeatureListing) {
    let raw = cell_gradients(obj);
    let normalized: Vec<Vec<f64>> = raw
        .iter()
        .map(|g| {
            let n = norm(g);
            g.iter().map(|v| v / n).collect()
        })
        .collect();

    let average = |rows: &[Vec<f64>]| -> f64 {
        if rows.is_empty() {
            return f64::NAN;
        }
        let d = rows[0].len();
        let avg: Vec<f64> = (0..d)
            .map(|j| rows.iter().map(|r| r[j]).sum::<f64>() / rows.len() as f64)
            .collect();
        norm(&avg)
    };
    let lengths: Vec<f64> = raw.iter().map(|g| norm(g)).collect();
    let ratios: Vec<f64> = raw
        .iter()
        .map(|g| {
            let hi = g.iter().map(|v| v.abs()).fold(f64::NEG_INFINITY, f64::max);
            let lo = g.iter().map(|v| v.abs()).fold(f64::INFINITY, f64::min);
            hi / lo
        })
        .collect();
    let (sd_ratio_reg, sd_mean_reg) = sd_summary(&raw);
    let (sd_ratio_norm, sd_mean_norm) = sd_summary(&normalized);

    out.push("limo.avg_length.reg", average(&raw));
    out.push("limo.avg_length.norm", average(&normalized));
    out.push("limo.length.mean", mean(&lengths));
    out.push("limo.length.sd", sd(&lengths));
    out.push("limo.cor.reg", mean_column_correlation(&raw));
    out.push("limo.cor.norm", mean_column_correlation(&normalized));
    out.push("limo.ratio.mean", mean(&ratios));
    out.push("limo.ratio.sd", sd(&ratios));
    out.push("limo.sd_ratio.reg", sd_ratio_reg);
    out.push("limo.sd_ratio.norm", sd_ratio_norm);
    out.push("limo.sd_mean.reg", sd_mean_reg);
    out.push("limo.sd_mean.norm", sd_mean_norm);
}

/// Best and worst row index of each non-empty cell.
fn cell_extremes(obj: &FeatureObject, y: &[f64]) -> Vec<(Vec<usize>, usize, usize)> {
    obj.cells()
        .iter()
        .map(|(key, rows)| {
            let best = rows
                .iter()
                .copied()
                .min_by(|&a, &b| y[a].total_cmp(&y[b]))
                .unwrap_or(rows[0]);
            let worst = rows
                .iter()
                .copied()
                .max_by(|&a, &b| y[a].total_cmp(&y[b]))
                .unwrap_or(rows[0]);
            (key.clone(), best, worst)
        })
        .collect()
}

pub(crate) fn compute_angle(obj: &FeatureObject, out: &mut FeatureListing) {
    let x = obj.x();
    let y = obj.oriented_y();
    let y_span = y.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        - y.iter().copied().fold(f64::INFINITY, f64::min);

    let mut to_best = Vec::new();
    let mut to_worst = Vec::new();
    let mut angles = Vec::new();
    let mut y_ratios = Vec::new();
    for (key, best, worst) in cell_extremes(obj, &y) {
        let center = obj.cell_center(&key);
        let vb: Vec<f64> = x
            .row(best)
            .iter()
            .zip(&center)
            .map(|(a, c)| a - c)
            .collect();
        let vw: Vec<f64> = x
            .row(worst)
            .iter()
            .zip(&center)
            .map(|(a, c)| a - c)
            .collect();
        let (nb, nw) = (norm(&vb), norm(&vw));
        to_best.push(nb);
        to_worst.push(nw);
        if nb > 0.0 && nw > 0.0 {
            let cos = vb.iter().zip(&vw).map(|(a, b)| a * b).sum::<f64>() / (nb * nw);
            angles.push(cos.clamp(-1.0, 1.0).acos().to_degrees());
        }
        y_ratios.push((y[worst] - y[best]) / y_span);
    }

    out.push("cm_angle.dist_ctr2best.mean", mean(&to_best));
    out.push("cm_angle.dist_ctr2best.sd", sd(&to_best));
    out.push("cm_angle.dist_ctr2worst.mean", mean(&to_worst));
    out.push("cm_angle.dist_ctr2worst.sd", sd(&to_worst));
    out.push("cm_angle.angle.mean", mean(&angles));
    out.push("cm_angle.angle.sd", sd(&angles));
    out.push("cm_angle.y_ratio_best2worst.mean", mean(&y_ratios));
    out.push("cm_angle.y_ratio_best2worst.sd", sd(&y_ratios));
}

/// Length of the mean unit vector pointing from each point towards its
/// better nearest neighbour inside the cell.
fn gradient_homogeneity(obj: &FeatureObject, rows: &[usize], y: &[f64]) -> Option<f64> {
    if rows.len() < 2 {
        return None;
    }
    let x = obj.x();
    let mut sum = vec![0.0; obj.dim()];
    for &i in rows {
        let (j, dist) = rows
            .iter()
            .copied()
            .filter(|&j| j != i)
            .map(|j| (j, distance(x.row(i), x.row(j))))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        if dist == 0.0 {
            continue;
        }
        let (from, to) = if y[j] < y[i] { (i, j) } else { (j, i) };
        for (s, (a, b)) in sum.iter_mut().zip(x.row(to).iter().zip(x.row(from))) {
            *s += (a - b) / dist;
        }
    }
    Some(norm(&sum) / rows.len() as f64)
}

pub(crate) fn compute_grad(obj: &FeatureObject, out: &mut FeatureListing) {
    let y = obj.oriented_y();
    let values: Vec<f64> = obj
        .cells()
        .values()
        .filter_map(|rows| gradient_homogeneity(obj, rows, &y))
        .collect();
    out.push("cm_grad.mean", mean(&values));
    out.push("cm_grad.sd", sd(&values));
}

pub(crate) fn compute_conv(obj: &FeatureObject, out: &mut FeatureListing) {
    let x = obj.x();
    let y = obj.oriented_y();

    // representative of a cell: its point closest to the cell center
    let representatives: BTreeMap<&Vec<usize>, usize> = obj
        .cells()
        .iter()
        .filter_map(|(key, rows)| {
            let center = obj.cell_center(key);
            rows.iter()
                .copied()
                .min_by(|&a, &b| {
                    distance(x.row(a), &center).total_cmp(&distance(x.row(b), &center))
                })
                .map(|r| (key, r))
        })
        .collect();

    let (mut convex_hard, mut concave_hard, mut convex_soft, mut concave_soft) = (0, 0, 0, 0);
    let mut triples = 0;
    for (key, &mid) in &representatives {
        for axis in 0..key.len() {
            if key[axis] == 0 {
                continue;
            }
            let mut lo_key = (*key).clone();
            lo_key[axis] -= 1;
            let mut hi_key = (*key).clone();
            hi_key[axis] += 1;
            let (Some(&lo), Some(&hi)) =
                (representatives.get(&lo_key), representatives.get(&hi_key))
            else {
                continue;
            };
            triples += 1;

            let d_lo = distance(x.row(lo), x.row(mid));
            let d_hi = distance(x.row(mid), x.row(hi));
            let t = if d_lo + d_hi > 0.0 {
                d_lo / (d_lo + d_hi)
            } else {
                0.5
            };
            let interpolated = y[lo] + t * (y[hi] - y[lo]);
            if y[mid] < interpolated {
                convex_soft += 1;
            } else if y[mid] > interpolated {
                concave_soft += 1;
            }
            if y[mid] < y[lo].min(y[hi]) {
                convex_hard += 1;
            } else if y[mid] > y[lo].max(y[hi]) {
                concave_hard += 1;
            }
        }
    }

    let share = |count: usize| {
        if triples == 0 {
            f64::NAN
        } else {
            count as f64 / triples as f64
        }
    };
    out.push("cm_conv.convex.hard", share(convex_hard));
    out.push("cm_conv.concave.hard", share(concave_hard));
    out.push("cm_conv.convex.soft", share(convex_soft));
    out.push("cm_conv.concave.soft", share(concave_soft));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Matrix;

    fn grid_object(f: impl Fn(f64, f64) -> f64) -> FeatureObject {
        let mut data = Vec::new();
        let mut y = Vec::new();
        for i in 0..15 {
            for j in 0..15 {
                let (a, b) = (
                    f64::from(i) * 10.0 / 15.0 - 4.8,
                    f64::from(j) * 10.0 / 15.0 - 4.8,
                );
                data.extend([a, b]);
                y.push(f(a, b));
            }
        }
        FeatureObject::new(Matrix::from_vec(225, 2, data).expect("valid"), y, -5.0, 5.0)
            .expect("valid")
            .with_blocks(3)
            .expect("blocks")
    }

    #[test]
    fn test_limo_on_plane() {
        let obj = grid_object(|a, b| 2.0 * a + b);
        let mut out = FeatureListing::new();
        compute_limo(&obj, &mut out);
        assert_eq!(out.len(), 12);
        let avg = out.value("limo.avg_length.reg").expect("present");
        assert!((avg - 5f64.sqrt()).abs() < 1e-8);
        assert!((out.value("limo.ratio.mean").expect("present") - 2.0).abs() < 1e-8);
    }

    #[test]
    fn test_conv_on_sphere_is_convex() {
        let obj = grid_object(|a, b| a * a + b * b);
        let mut out = FeatureListing::new();
        compute_conv(&obj, &mut out);
        assert_eq!(out.value("cm_conv.convex.soft"), Some(1.0));
        assert_eq!(out.value("cm_conv.concave.hard"), Some(0.0));
    }

    #[test]
    fn test_grad_homogeneity_on_plane() {
        let obj = grid_object(|a, _| a);
        let mut out = FeatureListing::new();
        compute_grad(&obj, &mut out);
        let mean = out.value("cm_grad.mean").expect("present");
        assert!(mean > 0.0 && mean <= 1.0);
    }

    #[test]
    fn test_angle_features() {
        let obj = grid_object(|a, b| a + b);
        let mut out = FeatureListing::new();
        compute_angle(&obj, &mut out);
        assert_eq!(out.len(), 8);
        let angle = out.value("cm_angle.angle.mean").expect("present");
        assert!(angle > 90.0);
    }
}
