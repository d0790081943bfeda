//! Experiment configuration.
//!
//! One [`ExperimentConfig`] describes where every stage reads and writes and
//! which sample set, feature classes, dimensions and labels it works on.
//! The defaults reproduce the published experiment.
//!
//! # Examples
//!
//! ```
//! use bbob_ela::config::ExperimentConfig;
//! use bbob_ela::sampling::SamplingMethod;
//!
//! let config = ExperimentConfig::new()
//!     .with_sampling_method(SamplingMethod::Ilhs)
//!     .with_multiplier(20)
//!     .with_seed(Some(7));
//!
//! assert_eq!(config.sample_set_name(), "ilhs_multiplier20_sid0");
//! assert!(config.aggregated_classes().contains(&"tpca2_ela_meta".to_string()));
//! ```

use crate::error::{ElaError, Result};
use crate::features::{FeatureClass, FeatureComputer};
use crate::model_selection::LopoCv;
use crate::naming::{reduction_prefix, sample_set_name, table_file_name, table_stem};
use crate::sampling::{Sampler, SamplingMethod};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Sample-set parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub method: SamplingMethod,
    /// Sample size per dimension.
    pub multiplier: usize,
    pub sample_id: u32,
    /// RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            method: SamplingMethod::Lhs,
            multiplier: 50,
            sample_id: 0,
            seed: None,
        }
    }
}

/// Directory and file roots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub sample_root: PathBuf,
    pub feature_root: PathBuf,
    pub table_root: PathBuf,
    pub results_root: PathBuf,
    pub label_table: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            sample_root: PathBuf::from("./sample_data"),
            feature_root: PathBuf::from("./ela_feature_dataset"),
            table_root: PathBuf::from("./feature_table_data"),
            results_root: PathBuf::from("./classification_results"),
            label_table: PathBuf::from("./high_level_fun_prop.csv"),
        }
    }
}

/// Feature computation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub classes: Vec<FeatureClass>,
    /// Classes computed on weighted-PCA coordinates.
    pub reduced_classes: Vec<FeatureClass>,
    pub components: usize,
    /// Dimensions features are computed for.
    pub dims: Vec<usize>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            classes: vec![
                FeatureClass::Basic,
                FeatureClass::ElaDistr,
                FeatureClass::Pca,
                FeatureClass::Limo,
                FeatureClass::Ic,
                FeatureClass::Disp,
                FeatureClass::Nbc,
                FeatureClass::ElaLevel,
                FeatureClass::ElaMeta,
            ],
            reduced_classes: vec![FeatureClass::ElaLevel, FeatureClass::ElaMeta],
            components: 2,
            dims: vec![2, 3, 5, 10, 20, 40, 80, 160, 320, 640],
        }
    }
}

/// Aggregation and classification parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Dimensions in the aggregated table and the LOPO-CV sweep.
    pub dims: Vec<usize>,
    /// Every property label column of the table.
    pub labels: Vec<String>,
    /// Labels classified by the job dispatcher and summarised by the report.
    pub report_labels: Vec<String>,
    pub n_trees: usize,
    pub random_state: u64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        let labels: Vec<String> = [
            "multimodality",
            "globalstructure",
            "separability",
            "variablescaling",
            "homogeneity",
            "basinsizes",
            "glcontrast",
            "fungroup",
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        Self {
            dims: vec![3, 5, 10, 20, 40, 80, 160, 320, 640],
            report_labels: labels[..7].to_vec(),
            labels,
            n_trees: 1000,
            random_state: 0,
        }
    }
}

/// Batch-queue submission parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    pub command: String,
    pub walltime: String,
    pub feature_script: PathBuf,
    pub classification_script: PathBuf,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            command: "qsub".to_string(),
            walltime: "72:00:00".to_string(),
            feature_script: PathBuf::from("job_fc.sh"),
            classification_script: PathBuf::from("job_hpc.sh"),
        }
    }
}

/// Configuration shared by every pipeline stage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub sampling: SamplingConfig,
    pub paths: PathConfig,
    pub features: FeatureConfig,
    pub classification: ClassificationConfig,
    pub queue: QueueConfig,
}

impl ExperimentConfig {
    /// Create a configuration with the default experiment settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON configuration; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ElaError::MissingInput`] if the file does not exist,
    /// [`ElaError::Serialization`] for malformed JSON, and the errors of
    /// [`ExperimentConfig::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ElaError::from_io_at(e, path))?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ElaError::InvalidHyperparameter`] naming the first
    /// violated constraint.
    pub fn validate(&self) -> Result<()> {
        let invalid =
            |param: &str, value: String, constraint: &str| ElaError::InvalidHyperparameter {
                param: param.to_string(),
                value,
                constraint: constraint.to_string(),
            };

        if self.sampling.multiplier == 0 {
            return Err(invalid("sampling.multiplier", "0".into(), "> 0"));
        }
        if self.features.components == 0 {
            return Err(invalid("features.components", "0".into(), "> 0"));
        }
        if self.features.classes.is_empty() {
            return Err(invalid(
                "features.classes",
                "[]".into(),
                "at least one class",
            ));
        }
        if let Some(c) = self
            .features
            .reduced_classes
            .iter()
            .find(|c| !self.features.classes.contains(c))
        {
            return Err(invalid(
                "features.reduced_classes",
                c.to_string(),
                "a member of features.classes",
            ));
        }
        if self.classification.dims.is_empty() {
            return Err(invalid(
                "classification.dims",
                "[]".into(),
                "at least one dimension",
            ));
        }
        if self.classification.n_trees == 0 {
            return Err(invalid("classification.n_trees", "0".into(), "> 0"));
        }
        if let Some(l) = self
            .classification
            .report_labels
            .iter()
            .find(|l| !self.classification.labels.contains(l))
        {
            return Err(invalid(
                "classification.report_labels",
                l.clone(),
                "a member of classification.labels",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_sampling_method(mut self, method: SamplingMethod) -> Self {
        self.sampling.method = method;
        self
    }

    #[must_use]
    pub fn with_multiplier(mut self, multiplier: usize) -> Self {
        self.sampling.multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_sample_id(mut self, sample_id: u32) -> Self {
        self.sampling.sample_id = sample_id;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.sampling.seed = seed;
        self
    }

    /// Places every root directory and the label table under `root`.
    #[must_use]
    pub fn with_root(mut self, root: &Path) -> Self {
        self.paths = PathConfig {
            sample_root: root.join("sample_data"),
            feature_root: root.join("ela_feature_dataset"),
            table_root: root.join("feature_table_data"),
            results_root: root.join("classification_results"),
            label_table: root.join("high_level_fun_prop.csv"),
        };
        self
    }

    #[must_use]
    pub fn with_feature_classes(mut self, classes: &[FeatureClass]) -> Self {
        self.features.classes = classes.to_vec();
        self.features
            .reduced_classes
            .retain(|c| classes.contains(c));
        self
    }

    #[must_use]
    pub fn with_reduction(mut self, classes: &[FeatureClass], components: usize) -> Self {
        self.features.reduced_classes = classes.to_vec();
        self.features.components = components;
        self
    }

    #[must_use]
    pub fn with_feature_dims(mut self, dims: &[usize]) -> Self {
        self.features.dims = dims.to_vec();
        self
    }

    #[must_use]
    pub fn with_table_dims(mut self, dims: &[usize]) -> Self {
        self.classification.dims = dims.to_vec();
        self
    }

    #[must_use]
    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.classification.n_trees = n_trees;
        self
    }

    /// Name of the sample set, e.g. `lhs_multiplier50_sid0`.
    #[must_use]
    pub fn sample_set_name(&self) -> String {
        sample_set_name(
            self.sampling.method.name(),
            self.sampling.multiplier,
            self.sampling.sample_id,
        )
    }

    #[must_use]
    pub fn sample_dir(&self) -> PathBuf {
        self.paths.sample_root.join(self.sample_set_name())
    }

    #[must_use]
    pub fn feature_dir(&self) -> PathBuf {
        self.paths.feature_root.join(self.sample_set_name())
    }

    /// Table-level class names, with the `tpca{K}_` prefix on reduced
    /// classes.
    #[must_use]
    pub fn aggregated_classes(&self) -> Vec<String> {
        self.features
            .classes
            .iter()
            .map(|c| {
                if self.features.reduced_classes.contains(c) {
                    format!("{}{c}", reduction_prefix(self.features.components))
                } else {
                    c.to_string()
                }
            })
            .collect()
    }

    #[must_use]
    pub fn table_path(&self) -> PathBuf {
        self.paths.table_root.join(table_file_name(
            &self.sample_set_name(),
            &self.aggregated_classes(),
            &self.classification.dims,
        ))
    }

    /// Directory of the accuracy files, named after the table.
    #[must_use]
    pub fn results_dir(&self) -> PathBuf {
        self.paths.results_root.join(table_stem(
            &self.sample_set_name(),
            &self.aggregated_classes(),
            &self.classification.dims,
        ))
    }

    #[must_use]
    pub fn sampler(&self) -> Sampler {
        Sampler::new(&self.paths.sample_root)
            .with_method(self.sampling.method)
            .with_multiplier(self.sampling.multiplier)
            .with_sample_id(self.sampling.sample_id)
            .with_seed(self.sampling.seed)
    }

    #[must_use]
    pub fn feature_computer(&self) -> FeatureComputer {
        FeatureComputer::new(self.sample_dir(), self.feature_dir())
            .with_reduction(&self.features.reduced_classes, self.features.components)
    }

    #[must_use]
    pub fn lopo_cv(&self) -> LopoCv {
        LopoCv::new(
            self.table_path(),
            self.results_dir(),
            &self.classification.labels,
        )
        .with_n_trees(self.classification.n_trees)
        .with_random_state(self.classification.random_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let config = ExperimentConfig::default();
        assert_eq!(config.sample_set_name(), "lhs_multiplier50_sid0");
        assert_eq!(
            config.aggregated_classes(),
            vec![
                "basic",
                "ela_distr",
                "pca",
                "limo",
                "ic",
                "disp",
                "nbc",
                "tpca2_ela_level",
                "tpca2_ela_meta"
            ]
        );
        assert_eq!(
            config.table_path(),
            Path::new("./feature_table_data/lhs_multiplier50_sid0_basic_ela_distr_pca_limo_ic_disp_nbc_tpca2_ela_level_tpca2_ela_meta_dims3_5_10_20_40_80_160_320_640.csv")
        );
        assert_eq!(
            config.results_dir(),
            Path::new("./classification_results/lhs_multiplier50_sid0_basic_ela_distr_pca_limo_ic_disp_nbc_tpca2_ela_level_tpca2_ela_meta_dims3_5_10_20_40_80_160_320_640")
        );
        assert_eq!(config.classification.report_labels.len(), 7);
        assert!(!config
            .classification
            .report_labels
            .contains(&"fungroup".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_feature_computer_uses_reduction() {
        let computer = ExperimentConfig::default().feature_computer();
        assert_eq!(
            computer.class_label(FeatureClass::ElaLevel),
            "tpca2_ela_level"
        );
        assert_eq!(computer.class_label(FeatureClass::Pca), "pca");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"sampling": {"method": "ilhs", "seed": 3}}"#).expect("written");
        let config = ExperimentConfig::load(&path).expect("valid");
        assert_eq!(config.sampling.method, SamplingMethod::Ilhs);
        assert_eq!(config.sampling.seed, Some(3));
        assert_eq!(config.sampling.multiplier, 50);
        assert_eq!(config.classification.n_trees, 1000);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        let config = ExperimentConfig::new()
            .with_root(dir.path())
            .with_feature_classes(&[FeatureClass::Basic, FeatureClass::ElaMeta])
            .with_table_dims(&[3, 5]);
        config.save(&path).expect("written");
        assert_eq!(ExperimentConfig::load(&path).expect("valid"), config);
    }

    #[test]
    fn test_invalid_configs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = ExperimentConfig::load(dir.path().join("none.json")).unwrap_err();
        assert!(matches!(missing, ElaError::MissingInput { .. }));

        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"sampling": {"method": "sobol"}}"#).expect("written");
        assert!(matches!(
            ExperimentConfig::load(&path).unwrap_err(),
            ElaError::Serialization(_)
        ));

        let config = ExperimentConfig::new().with_multiplier(0);
        assert!(config.validate().is_err());

        let config = ExperimentConfig::new().with_reduction(&[FeatureClass::CmAngle], 2);
        assert!(config.validate().is_err());
    }
}
