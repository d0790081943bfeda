//! Basic sample descriptors.

use super::{FeatureListing, FeatureObject};

fn bool_value(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

pub(crate) fn compute(obj: &FeatureObject, out: &mut FeatureListing) {
    let fold_min = |v: &[f64]| v.iter().copied().fold(f64::INFINITY, f64::min);
    let fold_max = |v: &[f64]| v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let blocks: Vec<f64> = obj.blocks().iter().map(|&b| b as f64).collect();

    out.push("basic.dim", obj.dim() as f64);
    out.push("basic.observations", obj.n_obs() as f64);
    out.push("basic.lower_min", fold_min(obj.lower()));
    out.push("basic.lower_max", fold_max(obj.lower()));
    out.push("basic.upper_min", fold_min(obj.upper()));
    out.push("basic.upper_max", fold_max(obj.upper()));
    out.push("basic.objective_min", fold_min(obj.y()));
    out.push("basic.objective_max", fold_max(obj.y()));
    out.push("basic.blocks_min", fold_min(&blocks));
    out.push("basic.blocks_max", fold_max(&blocks));
    out.push("basic.cells_total", obj.cells_total());
    out.push("basic.cells_filled", obj.cells().len() as f64);
    out.push("basic.allows_cm", bool_value(obj.allows_cell_mapping()));
    out.push("basic.minimize_fun", bool_value(obj.minimize()));
}
