//! Classify command

use crate::error::{CliError, Result};
use bbob_ela::config::ExperimentConfig;

/// Trains on every function except `fun` and scores on `fun`.
pub(crate) fn run_job(config: &ExperimentConfig, label: &str, dim: usize, fun: u8) -> Result<()> {
    if !config.classification.labels.iter().any(|l| l == label) {
        return Err(CliError::InvalidArgument(format!(
            "unknown label '{label}'"
        )));
    }
    let accuracy = config.lopo_cv().run_job(label, dim, fun)?;
    println!("label={label} dim={dim} fun={fun} accuracy={accuracy}");
    Ok(())
}

/// Every label, dimension and held-out function in sequence.
pub(crate) fn run_all(config: &ExperimentConfig) -> Result<()> {
    let lopo = config.lopo_cv();
    let written = lopo.run_all(&config.classification.dims, &config.classification.labels)?;
    println!(
        "{written} accuracy file(s) written to {}",
        lopo.results_dir().display()
    );
    Ok(())
}
