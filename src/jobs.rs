//! Batch-queue submission of feature and classification jobs.
//!
//! Each job runs one (class, dimension, function) feature computation or
//! one (label, dimension, held-out function) classification on a cluster.
//! The three job parameters travel as `arg1`, `arg2` and `arg3` queue
//! variables.

use crate::config::{ExperimentConfig, QueueConfig};
use crate::error::Result;
use crate::naming::function_ids;
use std::path::PathBuf;
use std::process::Command;
use tracing::{info, warn};

/// One queue submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub script: PathBuf,
    pub args: [String; 3],
}

impl Job {
    #[must_use]
    pub fn new(
        script: impl Into<PathBuf>,
        arg1: impl ToString,
        arg2: impl ToString,
        arg3: impl ToString,
    ) -> Self {
        Self {
            script: script.into(),
            args: [arg1.to_string(), arg2.to_string(), arg3.to_string()],
        }
    }

    /// Queue variable list, e.g. `arg1=basic,arg2=2,arg3=1`.
    #[must_use]
    pub fn variables(&self) -> String {
        self.args
            .iter()
            .enumerate()
            .map(|(i, a)| format!("arg{}={a}", i + 1))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Program and arguments of the submission.
    #[must_use]
    pub fn command_line(&self, queue: &QueueConfig) -> Vec<String> {
        vec![
            queue.command.clone(),
            "-l".to_string(),
            format!("walltime={}", queue.walltime),
            "-v".to_string(),
            self.variables(),
            self.script.display().to_string(),
        ]
    }

    #[must_use]
    pub fn command(&self, queue: &QueueConfig) -> Command {
        let mut cmd = Command::new(&queue.command);
        cmd.arg("-l")
            .arg(format!("walltime={}", queue.walltime))
            .arg("-v")
            .arg(self.variables())
            .arg(&self.script);
        cmd
    }
}

/// Feature jobs: classes × feature dimensions × 24 functions.
#[must_use]
pub fn feature_jobs(config: &ExperimentConfig) -> Vec<Job> {
    let mut jobs = Vec::new();
    for class in &config.features.classes {
        for &dim in &config.features.dims {
            for fun in function_ids() {
                jobs.push(Job::new(&config.queue.feature_script, class, dim, fun));
            }
        }
    }
    jobs
}

/// Classification jobs: report labels × table dimensions × 24 functions.
#[must_use]
pub fn classification_jobs(config: &ExperimentConfig) -> Vec<Job> {
    let mut jobs = Vec::new();
    for label in &config.classification.report_labels {
        for &dim in &config.classification.dims {
            for fun in function_ids() {
                jobs.push(Job::new(
                    &config.queue.classification_script,
                    label,
                    dim,
                    fun,
                ));
            }
        }
    }
    jobs
}

/// Counts of a dispatch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub submitted: usize,
    pub rejected: usize,
}

/// Submits `jobs`, or only logs their command lines when `dry_run` is set.
///
/// A submission whose queue command exits unsuccessfully is logged and
/// counted as rejected.
///
/// # Errors
///
/// Returns [`crate::error::ElaError::Io`] if the queue command cannot be
/// started.
pub fn dispatch(jobs: &[Job], queue: &QueueConfig, dry_run: bool) -> Result<DispatchSummary> {
    let mut summary = DispatchSummary::default();
    for job in jobs {
        if dry_run {
            info!(command = %job.command_line(queue).join(" "), "dry run");
            summary.submitted += 1;
            continue;
        }
        let status = job.command(queue).status()?;
        if status.success() {
            summary.submitted += 1;
        } else {
            warn!(job = %job.variables(), %status, "submission rejected");
            summary.rejected += 1;
        }
    }
    info!(
        submitted = summary.submitted,
        rejected = summary.rejected,
        dry_run,
        "jobs dispatched"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureClass;

    #[test]
    fn test_command_line() {
        let job = Job::new("job_fc.sh", FeatureClass::Basic, 2, 1);
        assert_eq!(job.variables(), "arg1=basic,arg2=2,arg3=1");
        assert_eq!(
            job.command_line(&QueueConfig::default()).join(" "),
            "qsub -l walltime=72:00:00 -v arg1=basic,arg2=2,arg3=1 job_fc.sh"
        );
    }

    #[test]
    fn test_job_counts() {
        let config = ExperimentConfig::default();
        let features = feature_jobs(&config);
        assert_eq!(features.len(), 9 * 10 * 24);
        assert_eq!(features[0].args, ["basic", "2", "1"]);
        assert_eq!(
            features.last().map(|j| j.args[0].as_str()),
            Some("ela_meta")
        );

        let classification = classification_jobs(&config);
        assert_eq!(classification.len(), 7 * 9 * 24);
        assert!(classification
            .iter()
            .all(|j| j.script == PathBuf::from("job_hpc.sh")));
        assert!(classification.iter().all(|j| j.args[0] != "fungroup"));
    }

    #[test]
    fn test_dry_run_submits_nothing() {
        let queue = QueueConfig {
            command: "definitely-not-a-queue-command".to_string(),
            ..QueueConfig::default()
        };
        let jobs = vec![Job::new("a.sh", "x", 1, 2), Job::new("a.sh", "y", 1, 2)];
        let summary = dispatch(&jobs, &queue, true).expect("dry run never spawns");
        assert_eq!(summary.submitted, 2);
        assert!(dispatch(&jobs, &queue, false).is_err());
    }
}
