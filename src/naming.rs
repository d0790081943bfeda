//! File naming conventions shared by all stages.
//!
//! Stages coordinate only through the filesystem, so every artifact name is
//! a pure function of the parameters that produced it. The patterns match
//! the ones used by existing sample and feature archives.

use crate::bbob::Suite;

/// Number of BBOB functions per dimension.
pub const N_FUNCTIONS: u8 = 24;

/// Number of instances sampled per (function, dimension).
pub const N_INSTANCES: u32 = 15;

/// Function ids `1..=24`.
pub fn function_ids() -> impl Iterator<Item = u8> + Clone {
    1..=N_FUNCTIONS
}

/// Instance ids `1..=15`.
pub fn instance_ids() -> impl Iterator<Item = u32> + Clone {
    1..=N_INSTANCES
}

/// Name of a sample set, e.g. `lhs_multiplier50_sid0`.
#[must_use]
pub fn sample_set_name(method: &str, multiplier: usize, sample_id: u32) -> String {
    format!("{method}_multiplier{multiplier}_sid{sample_id}")
}

/// Sample file: `x_f_data_{suite}_f{fun}_DIM{dim}_i{instance}.csv`.
#[must_use]
pub fn sample_file_name(suite: Suite, fun: u8, dim: usize, instance: u32) -> String {
    format!("x_f_data_{}_f{fun}_DIM{dim}_i{instance}.csv", suite.name())
}

/// Prefix marking feature listings computed on reduced coordinates.
#[must_use]
pub fn reduction_prefix(components: usize) -> String {
    format!("tpca{components}_")
}

/// Feature listing file: `{class}_{suite}_f{fun}_DIM{dim}_i{instance}.csv`.
///
/// `class` is the table-level class name and already carries the
/// `tpca{K}_` prefix for reduced classes.
#[must_use]
pub fn feature_file_name(class: &str, suite: Suite, fun: u8, dim: usize, instance: u32) -> String {
    format!("{class}_{}_f{fun}_DIM{dim}_i{instance}.csv", suite.name())
}

/// Aggregated table: `{sample_set}_{classes}_dims{dims}.csv`.
#[must_use]
pub fn table_file_name(sample_set: &str, classes: &[String], dims: &[usize]) -> String {
    format!("{}.csv", table_stem(sample_set, classes, dims))
}

/// Aggregated table name without extension; also names the results directory.
#[must_use]
pub fn table_stem(sample_set: &str, classes: &[String], dims: &[usize]) -> String {
    let dims_str = dims
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("_");
    format!("{sample_set}_{}_dims{dims_str}", classes.join("_"))
}

/// Accuracy file: `accuracy_{label}_f{fun}_DIM{dim}.csv`.
#[must_use]
pub fn accuracy_file_name(label: &str, fun: u8, dim: usize) -> String {
    format!("accuracy_{label}_f{fun}_DIM{dim}.csv")
}
