//! Nearest-better clustering features.
//!
//! Compares each point's distance to its nearest neighbour with its
//! distance to the nearest point with a strictly better objective value.

use super::stats::{correlation, distance, mean, sd};
use super::{FeatureListing, FeatureObject};

pub(crate) fn compute(obj: &FeatureObject, out: &mut FeatureListing) {
    let x = obj.x();
    let y = obj.oriented_y();
    let n = obj.n_obs();

    let mut nn_dist = vec![f64::INFINITY; n];
    let mut nb: Vec<Option<(usize, f64)>> = vec![None; n];
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let dist = distance(x.row(i), x.row(j));
            if dist < nn_dist[i] {
                nn_dist[i] = dist;
            }
            if y[j] < y[i] && nb[i].map_or(true, |(_, best)| dist < best) {
                nb[i] = Some((j, dist));
            }
        }
    }

    // points without a better neighbour (the global best) are left out
    let mut nn = Vec::with_capacity(n);
    let mut nbd = Vec::with_capacity(n);
    let mut indegree = vec![0.0; n];
    for i in 0..n {
        if let Some((j, dist)) = nb[i] {
            nn.push(nn_dist[i]);
            nbd.push(dist);
            indegree[j] += 1.0;
        }
    }
    let ratio: Vec<f64> = nn.iter().zip(&nbd).map(|(a, b)| a / b).collect();

    out.push("nbc.nn_nb.sd_ratio", sd(&nn) / sd(&nbd));
    out.push("nbc.nn_nb.mean_ratio", mean(&nn) / mean(&nbd));
    out.push("nbc.nn_nb.cor", correlation(&nn, &nbd));
    out.push("nbc.dist_ratio.coeff_var", sd(&ratio) / mean(&ratio));
    out.push("nbc.nb_fitness.cor", correlation(&indegree, &y));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Matrix;

    #[test]
    fn test_monotone_line() {
        // on a monotone line every nearest better point is also the nearest neighbour
        let x = Matrix::from_vec(10, 1, (0..10).map(f64::from).collect()).expect("valid");
        let y: Vec<f64> = (0..10).map(f64::from).collect();
        let obj = FeatureObject::new(x, y, -5.0, 10.0).expect("valid");
        let mut out = FeatureListing::new();
        compute(&obj, &mut out);
        assert_eq!(out.value("nbc.nn_nb.mean_ratio"), Some(1.0));
        assert_eq!(out.len(), 5);
        // every point but the worst is somebody's nearest better
        assert!(out.value("nbc.nb_fitness.cor").expect("present") < 0.0);
    }
}
