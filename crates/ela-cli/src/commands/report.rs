//! Report command

use crate::error::Result;
use bbob_ela::config::ExperimentConfig;
use bbob_ela::report::AccuracyReport;

pub(crate) fn run(config: &ExperimentConfig) -> Result<()> {
    let report = AccuracyReport::collect(
        &config.results_dir(),
        &config.classification.report_labels,
        &config.classification.dims,
    )?;
    print!("{report}");
    Ok(())
}
