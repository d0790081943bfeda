//! The 24 noiseless BBOB functions.
//!
//! Reference: Hansen et al. (2009) "Real-Parameter Black-Box Optimization
//! Benchmarking 2009: Noiseless Functions Definitions".
//!
//! Every function takes the raw point and the instance data and returns the
//! objective value including `f_opt`.

use super::instance::{rosenbrock_scale, InstanceData, LUNACEK_MU0};
use super::transform::{
    fpen, lambda, ratio, scale_in_place, shifted, tasy_in_place, tosz, tosz_in_place,
};
use std::f64::consts::PI;

pub(crate) type Objective = fn(&[f64], &InstanceData) -> f64;

/// Function table indexed by `function_id - 1`.
pub(crate) const FUNCTIONS: [Objective; 24] = [
    sphere,
    ellipsoid_separable,
    rastrigin_separable,
    buche_rastrigin,
    linear_slope,
    attractive_sector,
    step_ellipsoid,
    rosenbrock,
    rosenbrock_rotated,
    ellipsoid,
    discus,
    bent_cigar,
    sharp_ridge,
    different_powers,
    rastrigin,
    weierstrass,
    schaffers_f7,
    schaffers_f7_ill_conditioned,
    griewank_rosenbrock,
    schwefel,
    gallagher,
    gallagher,
    katsuura,
    lunacek_bi_rastrigin,
];

fn sum_sq(z: &[f64]) -> f64 {
    z.iter().map(|v| v * v).sum()
}

fn rastrigin_core(z: &[f64]) -> f64 {
    let d = z.len() as f64;
    10.0 * (d - z.iter().map(|v| (2.0 * PI * v).cos()).sum::<f64>()) + sum_sq(z)
}

fn conditioned_sum(z: &[f64], exponent: f64) -> f64 {
    let d = z.len();
    z.iter()
        .enumerate()
        .map(|(i, v)| 10f64.powf(exponent * ratio(i, d)) * v * v)
        .sum()
}

/// `Λ^alpha` applied to a fresh copy.
fn conditioned(mut z: Vec<f64>, alpha: f64) -> Vec<f64> {
    let diag = lambda(alpha, z.len());
    scale_in_place(&mut z, &diag);
    z
}

/// f1: separable, unimodal, perfectly conditioned.
fn sphere(x: &[f64], inst: &InstanceData) -> f64 {
    sum_sq(&shifted(x, &inst.xopt)) + inst.fopt
}

/// f2: separable ellipsoid, condition 1e6.
fn ellipsoid_separable(x: &[f64], inst: &InstanceData) -> f64 {
    let mut z = shifted(x, &inst.xopt);
    tosz_in_place(&mut z);
    conditioned_sum(&z, 6.0) + inst.fopt
}

fn rastrigin_separable(x: &[f64], inst: &InstanceData) -> f64 {
    let mut z = shifted(x, &inst.xopt);
    tosz_in_place(&mut z);
    tasy_in_place(&mut z, 0.2);
    let z = conditioned(z, 10.0);
    rastrigin_core(&z) + inst.fopt
}

fn buche_rastrigin(x: &[f64], inst: &InstanceData) -> f64 {
    let d = x.len();
    let z: Vec<f64> = shifted(x, &inst.xopt)
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let v = tosz(v);
            let s = 10f64.powf(0.5 * ratio(i, d));
            if v > 0.0 && i % 2 == 0 {
                10.0 * s * v
            } else {
                s * v
            }
        })
        .collect();
    rastrigin_core(&z) + 100.0 * fpen(x) + inst.fopt
}

fn linear_slope(x: &[f64], inst: &InstanceData) -> f64 {
    let d = x.len();
    let mut total = 0.0;
    for (i, (&xi, &oi)) in x.iter().zip(&inst.xopt).enumerate() {
        let s = oi.signum() * 10f64.powf(ratio(i, d));
        let z = if oi * xi < 25.0 { xi } else { oi };
        total += 5.0 * s.abs() - s * z;
    }
    total + inst.fopt
}

fn attractive_sector(x: &[f64], inst: &InstanceData) -> f64 {
    let z = inst
        .q
        .apply(&conditioned(inst.r.apply(&shifted(x, &inst.xopt)), 10.0));
    let total: f64 = z
        .iter()
        .zip(&inst.xopt)
        .map(|(zi, oi)| {
            let s = if zi * oi > 0.0 { 100.0 } else { 1.0 };
            (s * zi) * (s * zi)
        })
        .sum();
    tosz(total).powf(0.9) + inst.fopt
}

fn step_ellipsoid(x: &[f64], inst: &InstanceData) -> f64 {
    let zhat = conditioned(inst.r.apply(&shifted(x, &inst.xopt)), 10.0);
    let ztilde: Vec<f64> = zhat
        .iter()
        .map(|&v| {
            if v.abs() > 0.5 {
                (0.5 + v).floor()
            } else {
                (0.5 + 10.0 * v).floor() / 10.0
            }
        })
        .collect();
    let z = inst.q.apply(&ztilde);
    let core = conditioned_sum(&z, 2.0).max(zhat[0].abs() / 1e4);
    0.1 * core + fpen(x) + inst.fopt
}

fn rosenbrock_core(z: &[f64]) -> f64 {
    z.windows(2)
        .map(|w| {
            let a = w[0] * w[0] - w[1];
            let b = w[0] - 1.0;
            100.0 * a * a + b * b
        })
        .sum()
}

fn rosenbrock(x: &[f64], inst: &InstanceData) -> f64 {
    let c = rosenbrock_scale(x.len());
    let z: Vec<f64> = shifted(x, &inst.xopt).iter().map(|v| c * v + 1.0).collect();
    rosenbrock_core(&z) + inst.fopt
}

fn rosenbrock_rotated(x: &[f64], inst: &InstanceData) -> f64 {
    let c = rosenbrock_scale(x.len());
    let z: Vec<f64> = inst.r.apply(x).iter().map(|v| c * v + 0.5).collect();
    rosenbrock_core(&z) + inst.fopt
}

fn ellipsoid(x: &[f64], inst: &InstanceData) -> f64 {
    let mut z = inst.r.apply(&shifted(x, &inst.xopt));
    tosz_in_place(&mut z);
    conditioned_sum(&z, 6.0) + inst.fopt
}

fn discus(x: &[f64], inst: &InstanceData) -> f64 {
    let mut z = inst.r.apply(&shifted(x, &inst.xopt));
    tosz_in_place(&mut z);
    1e6 * z[0] * z[0] + sum_sq(&z[1..]) + inst.fopt
}

fn bent_cigar(x: &[f64], inst: &InstanceData) -> f64 {
    let mut z = inst.r.apply(&shifted(x, &inst.xopt));
    tasy_in_place(&mut z, 0.5);
    let z = inst.r.apply(&z);
    z[0] * z[0] + 1e6 * sum_sq(&z[1..]) + inst.fopt
}

fn sharp_ridge(x: &[f64], inst: &InstanceData) -> f64 {
    let z = inst
        .q
        .apply(&conditioned(inst.r.apply(&shifted(x, &inst.xopt)), 10.0));
    z[0] * z[0] + 100.0 * sum_sq(&z[1..]).sqrt() + inst.fopt
}

fn different_powers(x: &[f64], inst: &InstanceData) -> f64 {
    let z = inst.r.apply(&shifted(x, &inst.xopt));
    let d = z.len();
    z.iter()
        .enumerate()
        .map(|(i, v)| v.abs().powf(2.0 + 4.0 * ratio(i, d)))
        .sum::<f64>()
        .sqrt()
        + inst.fopt
}

fn rastrigin(x: &[f64], inst: &InstanceData) -> f64 {
    let mut z = inst.r.apply(&shifted(x, &inst.xopt));
    tosz_in_place(&mut z);
    tasy_in_place(&mut z, 0.2);
    let z = inst.r.apply(&conditioned(inst.q.apply(&z), 10.0));
    rastrigin_core(&z) + inst.fopt
}

const WEIERSTRASS_TERMS: i32 = 12;

fn weierstrass(x: &[f64], inst: &InstanceData) -> f64 {
    let d = x.len() as f64;
    let mut z = inst.r.apply(&shifted(x, &inst.xopt));
    tosz_in_place(&mut z);
    let z = inst.r.apply(&conditioned(inst.q.apply(&z), 0.01));

    let f0: f64 = (0..WEIERSTRASS_TERMS)
        .map(|k| 0.5f64.powi(k) * (PI * 3f64.powi(k)).cos())
        .sum();
    let total: f64 = z
        .iter()
        .map(|zi| {
            (0..WEIERSTRASS_TERMS)
                .map(|k| 0.5f64.powi(k) * (2.0 * PI * 3f64.powi(k) * (zi + 0.5)).cos())
                .sum::<f64>()
        })
        .sum();
    10.0 * (total / d - f0).powi(3) + 10.0 / d * fpen(x) + inst.fopt
}

fn schaffers_core(x: &[f64], inst: &InstanceData, alpha: f64) -> f64 {
    let mut z = inst.r.apply(&shifted(x, &inst.xopt));
    tasy_in_place(&mut z, 0.5);
    let z = conditioned(inst.q.apply(&z), alpha);
    let pairs = (z.len() - 1).max(1) as f64;
    let total: f64 = z
        .windows(2)
        .map(|w| {
            let s = (w[0] * w[0] + w[1] * w[1]).sqrt();
            let root = s.sqrt();
            root + root * (50.0 * s.powf(0.2)).sin().powi(2)
        })
        .sum();
    (total / pairs).powi(2) + 10.0 * fpen(x) + inst.fopt
}

fn schaffers_f7(x: &[f64], inst: &InstanceData) -> f64 {
    schaffers_core(x, inst, 10.0)
}

fn schaffers_f7_ill_conditioned(x: &[f64], inst: &InstanceData) -> f64 {
    schaffers_core(x, inst, 1000.0)
}

fn griewank_rosenbrock(x: &[f64], inst: &InstanceData) -> f64 {
    let c = rosenbrock_scale(x.len());
    let z: Vec<f64> = inst.r.apply(x).iter().map(|v| c * v + 0.5).collect();
    let pairs = (z.len() - 1).max(1) as f64;
    let total: f64 = z
        .windows(2)
        .map(|w| {
            let a = w[0] * w[0] - w[1];
            let b = w[0] - 1.0;
            let s = 100.0 * a * a + b * b;
            s / 4000.0 - s.cos()
        })
        .sum();
    10.0 * total / pairs + 10.0 + inst.fopt
}

fn schwefel(x: &[f64], inst: &InstanceData) -> f64 {
    let d = x.len();
    let xhat: Vec<f64> = x
        .iter()
        .zip(&inst.signs)
        .map(|(v, s)| 2.0 * s * v)
        .collect();
    let two_abs_opt: Vec<f64> = inst.xopt.iter().map(|v| 2.0 * v.abs()).collect();

    let mut zhat = vec![0.0; d];
    zhat[0] = xhat[0];
    for i in 1..d {
        zhat[i] = xhat[i] + 0.25 * (xhat[i - 1] - two_abs_opt[i - 1]);
    }
    let diag = lambda(10.0, d);
    let z: Vec<f64> = zhat
        .iter()
        .zip(&two_abs_opt)
        .zip(&diag)
        .map(|((zh, o), l)| 100.0 * (l * (zh - o) + o))
        .collect();

    let penalty_arg: Vec<f64> = z.iter().map(|v| v / 100.0).collect();
    let total: f64 = z.iter().map(|v| v * v.abs().sqrt().sin()).sum();
    -total / (100.0 * d as f64) + 4.189_828_872_724_339 + 100.0 * fpen(&penalty_arg) + inst.fopt
}

fn gallagher(x: &[f64], inst: &InstanceData) -> f64 {
    let Some(peaks) = &inst.peaks else {
        return f64::NAN;
    };
    let d = x.len() as f64;
    let rx = inst.r.apply(x);
    let best = peaks
        .rotated_locations
        .iter()
        .zip(&peaks.weights)
        .zip(&peaks.scales)
        .map(|((loc, w), scale)| {
            let quad: f64 = rx
                .iter()
                .zip(loc)
                .zip(scale)
                .map(|((a, b), c)| c * (a - b) * (a - b))
                .sum();
            w * (-quad / (2.0 * d)).exp()
        })
        .fold(f64::NEG_INFINITY, f64::max);
    tosz(10.0 - best).powi(2) + fpen(x) + inst.fopt
}

fn katsuura(x: &[f64], inst: &InstanceData) -> f64 {
    let d = x.len() as f64;
    let z = inst
        .q
        .apply(&conditioned(inst.r.apply(&shifted(x, &inst.xopt)), 100.0));
    let exponent = 10.0 / d.powf(1.2);
    let product: f64 = z
        .iter()
        .enumerate()
        .map(|(i, zi)| {
            let inner: f64 = (1..=32)
                .map(|j| {
                    let p = 2f64.powi(j);
                    (p * zi - (p * zi + 0.5).floor()).abs() / p
                })
                .sum();
            (1.0 + (i + 1) as f64 * inner).powf(exponent)
        })
        .product();
    let scale = 10.0 / (d * d);
    scale * product - scale + fpen(x) + inst.fopt
}

fn lunacek_bi_rastrigin(x: &[f64], inst: &InstanceData) -> f64 {
    let d = x.len() as f64;
    let s = 1.0 - 1.0 / (2.0 * (d + 20.0).sqrt() - 8.2);
    let mu1 = -((LUNACEK_MU0 * LUNACEK_MU0 - 1.0) / s).sqrt();

    let xhat: Vec<f64> = x
        .iter()
        .zip(&inst.signs)
        .map(|(v, sg)| 2.0 * sg * v)
        .collect();
    let first: f64 = xhat.iter().map(|v| (v - LUNACEK_MU0).powi(2)).sum();
    let second: f64 = d + s * xhat.iter().map(|v| (v - mu1).powi(2)).sum::<f64>();

    let centred: Vec<f64> = xhat.iter().map(|v| v - LUNACEK_MU0).collect();
    let z = inst.q.apply(&conditioned(inst.r.apply(&centred), 100.0));
    let cosines: f64 = z.iter().map(|v| (2.0 * PI * v).cos()).sum();

    first.min(second) + 10.0 * (d - cosines) + 1e4 * fpen(x) + inst.fopt
}
