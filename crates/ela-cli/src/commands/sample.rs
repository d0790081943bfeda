//! Sample command

use crate::error::Result;
use bbob_ela::bbob::Suite;
use bbob_ela::config::ExperimentConfig;

/// Samples `suite` (both when `None`) in `dims`, defaulting to the feature
/// dimensions of the configuration.
pub(crate) fn run(
    config: &ExperimentConfig,
    suite: Option<Suite>,
    dims: Option<&[usize]>,
) -> Result<()> {
    let sampler = config.sampler();
    let dims = dims.unwrap_or(config.features.dims.as_slice());
    let suites = match suite {
        Some(suite) => vec![suite],
        None => Suite::ALL.to_vec(),
    };

    let mut total = 0;
    for suite in suites {
        total += sampler.sample_suite_dims(suite, dims)?.len();
    }
    println!(
        "{total} sample file(s) written to {}",
        sampler.output_dir().display()
    );
    Ok(())
}
