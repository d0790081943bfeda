//! Features command

use crate::error::{CliError, Result};
use bbob_ela::config::ExperimentConfig;
use bbob_ela::features::{FeatureClass, SweepSummary};

fn print_summary(summary: &SweepSummary) {
    println!(
        "written={} skipped={} failed={}",
        summary.written, summary.skipped, summary.failed
    );
}

/// One (class, dimension, function) job over its 15 instances.
pub(crate) fn run_job(
    config: &ExperimentConfig,
    class: FeatureClass,
    dim: usize,
    fun: u8,
) -> Result<()> {
    if !(1..=24).contains(&fun) {
        return Err(CliError::InvalidArgument(format!(
            "function id must be in 1..=24, got {fun}"
        )));
    }
    let summary = config.feature_computer().run_job(class, dim, fun)?;
    print_summary(&summary);
    Ok(())
}

/// Every configured class over `dims` (the configured feature dimensions
/// when `None`).
pub(crate) fn run_all(config: &ExperimentConfig, dims: Option<&[usize]>) -> Result<()> {
    let dims = dims.unwrap_or(config.features.dims.as_slice());
    let summary = config
        .feature_computer()
        .run_all(&config.features.classes, dims)?;
    print_summary(&summary);
    Ok(())
}
