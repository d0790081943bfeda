//! Suite-wide sampling driver.

use super::{create_sample, SamplingMethod};
use crate::bbob::{parse_function_id, Suite};
use crate::error::Result;
use crate::naming::{sample_file_name, sample_set_name, N_INSTANCES};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes one sample file per problem of a suite.
///
/// Sample size is `multiplier × dimension`. Files land in
/// `{root}/{method}_multiplier{m}_sid{id}/`.
#[derive(Debug, Clone)]
pub struct Sampler {
    root: PathBuf,
    method: SamplingMethod,
    multiplier: usize,
    sample_id: u32,
    seed: Option<u64>,
}

impl Sampler {
    /// Creates a sampler writing below `root` with the default design
    /// (`lhs`, multiplier 50, sample id 0).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            method: SamplingMethod::Lhs,
            multiplier: 50,
            sample_id: 0,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: SamplingMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_multiplier(mut self, multiplier: usize) -> Self {
        self.multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_sample_id(mut self, sample_id: u32) -> Self {
        self.sample_id = sample_id;
        self
    }

    /// Fixes the RNG seed; unseeded samplers draw from OS entropy.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Directory receiving the sample files.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(sample_set_name(
            self.method.name(),
            self.multiplier,
            self.sample_id,
        ))
    }

    /// Samples every problem of `suite` and returns the written paths.
    ///
    /// Instances are numbered sequentially per (function, dimension) and the
    /// counter wraps after 15. Dimensions of 20 and above are skipped for
    /// the classic suite.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory or a sample file cannot be
    /// written.
    pub fn sample_suite(&self, suite: Suite) -> Result<Vec<PathBuf>> {
        self.sample_suite_dims(suite, suite.dimensions())
    }

    /// Same as [`Sampler::sample_suite`], restricted to `dims`.
    ///
    /// # Errors
    ///
    /// See [`Sampler::sample_suite`].
    pub fn sample_suite_dims(&self, suite: Suite, dims: &[usize]) -> Result<Vec<PathBuf>> {
        let out_dir = self.output_dir();
        fs::create_dir_all(&out_dir)?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut written = Vec::new();
        let mut instance = 0u32;
        let selected = suite
            .problems()
            .filter(|problem| dims.contains(&problem.dim()))
            .filter(|problem| !(suite == Suite::Bbob && problem.dim() >= 20));
        for problem in selected {
            let id = problem.id();
            let fun = parse_function_id(&id)?;
            let dim = problem.dim();
            instance = instance % N_INSTANCES + 1;
            let sample = create_sample(&problem, self.method, self.multiplier * dim, &mut rng)?;
            let path = out_dir.join(sample_file_name(suite, fun, dim, instance));
            sample.write_csv(&path)?;
            debug!(problem = %id, path = %path.display(), "sample written");
            written.push(path);
        }

        info!(
            suite = %suite,
            files = written.len(),
            dir = %out_dir.display(),
            "suite sampled"
        );
        Ok(written)
    }

    /// Sampling root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}
