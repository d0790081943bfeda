//! Dispatch command

use crate::error::{CliError, Result};
use bbob_ela::config::ExperimentConfig;
use bbob_ela::jobs::{classification_jobs, dispatch, feature_jobs, Job};

fn submit(config: &ExperimentConfig, jobs: &[Job], dry_run: bool) -> Result<()> {
    if dry_run {
        for job in jobs {
            println!("{}", job.command_line(&config.queue).join(" "));
        }
    }
    let summary = dispatch(jobs, &config.queue, dry_run)?;
    println!(
        "submitted={} rejected={}",
        summary.submitted, summary.rejected
    );
    if summary.rejected > 0 {
        return Err(CliError::JobsRejected(summary.rejected));
    }
    Ok(())
}

pub(crate) fn features(config: &ExperimentConfig, dry_run: bool) -> Result<()> {
    submit(config, &feature_jobs(config), dry_run)
}

pub(crate) fn classify(config: &ExperimentConfig, dry_run: bool) -> Result<()> {
    submit(config, &classification_jobs(config), dry_run)
}
