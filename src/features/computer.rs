//! File-level feature computation and its sweeps.

use super::{calculate_feature_set, FeatureClass, FeatureObject};
use crate::bbob::{Suite, LOWER_BOUND, UPPER_BOUND};
use crate::decomposition::{min_max_normalize, reduce, Reduction};
use crate::error::Result;
use crate::naming::{
    feature_file_name, function_ids, instance_ids, reduction_prefix, sample_file_name,
};
use crate::sampling::read_sample;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Blocks per dimension for cell-based classes.
pub const CELL_BLOCKS: usize = 3;

/// Result of computing one feature file.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureOutcome {
    /// The listing was written to this path.
    Written(PathBuf),
    /// The reduction cannot lower the dimension; nothing was written.
    Skipped,
    /// The feature routine failed; nothing was written.
    Failed(String),
}

impl FeatureOutcome {
    #[must_use]
    pub fn is_written(&self) -> bool {
        matches!(self, FeatureOutcome::Written(_))
    }
}

/// Tally of a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SweepSummary {
    fn record(&mut self, outcome: &FeatureOutcome) {
        match outcome {
            FeatureOutcome::Written(_) => self.written += 1,
            FeatureOutcome::Skipped => self.skipped += 1,
            FeatureOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Reads sample files and writes feature listings for one sample set.
#[derive(Debug, Clone)]
pub struct FeatureComputer {
    sample_dir: PathBuf,
    feature_dir: PathBuf,
    reduced: Vec<FeatureClass>,
    components: usize,
}

impl FeatureComputer {
    /// Creates a computer reading from `sample_dir` and writing to
    /// `feature_dir`, without any reduction.
    pub fn new(sample_dir: impl Into<PathBuf>, feature_dir: impl Into<PathBuf>) -> Self {
        Self {
            sample_dir: sample_dir.into(),
            feature_dir: feature_dir.into(),
            reduced: Vec::new(),
            components: 2,
        }
    }

    /// Computes `classes` on weighted-PCA coordinates with `components`
    /// dimensions.
    #[must_use]
    pub fn with_reduction(mut self, classes: &[FeatureClass], components: usize) -> Self {
        self.reduced = classes.to_vec();
        self.components = components;
        self
    }

    /// Reduction used for `class`.
    #[must_use]
    pub fn reduction_for(&self, class: FeatureClass) -> Reduction {
        if self.reduced.contains(&class) {
            Reduction::WeightedPca {
                components: self.components,
            }
        } else {
            Reduction::None
        }
    }

    /// Class label as it appears in file names and tables, e.g.
    /// `tpca2_ela_meta`.
    #[must_use]
    pub fn class_label(&self, class: FeatureClass) -> String {
        match self.reduction_for(class) {
            Reduction::None => class.name().to_string(),
            Reduction::WeightedPca { components } => {
                format!("{}{}", reduction_prefix(components), class.name())
            }
        }
    }

    #[must_use]
    pub fn sample_path(&self, dim: usize, fun: u8, instance: u32) -> PathBuf {
        self.sample_dir.join(sample_file_name(
            Suite::for_dimension(dim),
            fun,
            dim,
            instance,
        ))
    }

    #[must_use]
    pub fn feature_path(&self, class: FeatureClass, dim: usize, fun: u8, instance: u32) -> PathBuf {
        self.feature_dir.join(feature_file_name(
            &self.class_label(class),
            Suite::for_dimension(dim),
            fun,
            dim,
            instance,
        ))
    }

    /// Computes `class` on one sample file and writes the listing.
    ///
    /// Failures of the feature routine are logged and reported as
    /// [`FeatureOutcome::Failed`]; they do not abort the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample cannot be read or the listing cannot
    /// be written.
    pub fn compute_features(
        class: FeatureClass,
        sample_path: &Path,
        feature_path: &Path,
        reduction: Reduction,
    ) -> Result<FeatureOutcome> {
        let sample = read_sample(sample_path)?;
        let (mut x, y) = (sample.x, sample.y);
        let (mut lower, mut upper) = (LOWER_BOUND, UPPER_BOUND);

        if let Reduction::WeightedPca { components } = reduction {
            match reduce(&x, &y, components) {
                Ok(Some(reduced)) => x = reduced,
                Ok(None) => {
                    warn!(
                        dim = x.n_cols(),
                        components,
                        sample = %sample_path.display(),
                        "cannot reduce to an equal or higher dimension, skipped"
                    );
                    return Ok(FeatureOutcome::Skipped);
                }
                Err(e) => {
                    error!(class = %class, sample = %sample_path.display(), error = %e, "reduction failed");
                    return Ok(FeatureOutcome::Failed(e.to_string()));
                }
            }
            if class.requires_cells() {
                x = min_max_normalize(&x);
                lower = 0.0;
                upper = 1.0;
            }
        }

        let listing = FeatureObject::new(x, y, lower, upper)
            .and_then(|obj| {
                if class.requires_cells() {
                    obj.with_blocks(CELL_BLOCKS)
                } else {
                    Ok(obj)
                }
            })
            .and_then(|obj| calculate_feature_set(&obj, class));

        match listing {
            Ok(listing) => {
                listing.write_csv(feature_path)?;
                Ok(FeatureOutcome::Written(feature_path.to_path_buf()))
            }
            Err(e) => {
                error!(class = %class, sample = %sample_path.display(), error = %e, "feature computation failed");
                Ok(FeatureOutcome::Failed(e.to_string()))
            }
        }
    }

    /// Computes one (class, dimension, function) job over all 15 instances.
    ///
    /// # Errors
    ///
    /// Returns the first sample read or listing write error.
    pub fn run_job(&self, class: FeatureClass, dim: usize, fun: u8) -> Result<SweepSummary> {
        fs::create_dir_all(&self.feature_dir)?;
        let reduction = self.reduction_for(class);
        let mut summary = SweepSummary::default();
        for instance in instance_ids() {
            let outcome = Self::compute_features(
                class,
                &self.sample_path(dim, fun, instance),
                &self.feature_path(class, dim, fun, instance),
                reduction,
            )?;
            summary.record(&outcome);
            info!(feature = %class, dim, fun, instance, "done");
        }
        Ok(summary)
    }

    /// Sequential sweep over classes × dimensions × functions × instances.
    ///
    /// # Errors
    ///
    /// See [`FeatureComputer::run_job`].
    pub fn run_all(&self, classes: &[FeatureClass], dims: &[usize]) -> Result<SweepSummary> {
        let mut total = SweepSummary::default();
        for &class in classes {
            for &dim in dims {
                for fun in function_ids() {
                    let s = self.run_job(class, dim, fun)?;
                    total.written += s.written;
                    total.skipped += s.skipped;
                    total.failed += s.failed;
                }
            }
        }
        info!(
            written = total.written,
            skipped = total.skipped,
            failed = total.failed,
            "feature sweep finished"
        );
        Ok(total)
    }
}
