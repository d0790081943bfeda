//! Leave-one-problem-out cross-validation of property classifiers.
//!
//! For a dimension `d` and a held-out function `f`, the classifier is
//! trained on the other 23 functions of the aggregated table and tested on
//! the 15 instances of `f`.

use crate::aggregate::ID_COLUMNS;
use crate::data::DataFrame;
use crate::error::{ElaError, Result};
use crate::metrics::accuracy;
use crate::naming::{accuracy_file_name, function_ids};
use crate::primitives::Matrix;
use crate::traits::Classifier;
use crate::tree::RandomForestClassifier;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A table after the cleaning steps, with what was removed.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub frame: DataFrame,
    /// Columns holding NaN or infinite values.
    pub dropped_missing: Vec<String>,
    /// Feature columns with a single distinct value.
    pub dropped_constant: Vec<String>,
}

/// Replaces infinities with NaN, drops every column holding a NaN, then
/// drops constant columns after the first `n_prefix` columns.
#[must_use]
pub fn clean_table(mut frame: DataFrame, n_prefix: usize) -> CleanedTable {
    frame.replace_infinite();
    let dropped_missing = frame.drop_missing_columns();
    let dropped_constant = frame.drop_constant_columns(n_prefix);
    CleanedTable {
        frame,
        dropped_missing,
        dropped_constant,
    }
}

/// Train and test partitions for one held-out function.
#[derive(Debug, Clone)]
pub struct LopoSplit {
    pub x_train: Matrix<f64>,
    pub y_train: Vec<usize>,
    pub x_test: Matrix<f64>,
    pub y_test: Vec<usize>,
    /// Sorted label values; targets index into this list.
    pub classes: Vec<String>,
    pub feature_names: Vec<String>,
}

/// Splits `frame` into rows of function `fun` (test) and all other rows
/// (train), with `label` as the target.
///
/// Identifier and label columns are excluded from the feature matrices.
///
/// # Errors
///
/// Returns an error if a column is missing or either partition is empty.
pub fn split_by_function(
    frame: &DataFrame,
    fun: u8,
    label: &str,
    labels: &[String],
) -> Result<LopoSplit> {
    let funs = frame.numeric("fun")?;
    let targets = frame.text(label)?;

    let mut classes: Vec<String> = targets.to_vec();
    classes.sort_unstable();
    classes.dedup();
    let encoded: Vec<usize> = targets
        .iter()
        .map(|t| classes.binary_search(t).unwrap_or(0))
        .collect();

    let feature_names: Vec<String> = frame
        .column_names()
        .into_iter()
        .filter(|name| !ID_COLUMNS.contains(name) && !labels.iter().any(|l| l == name))
        .map(str::to_string)
        .collect();
    let name_refs: Vec<&str> = feature_names.iter().map(String::as_str).collect();
    let features = frame.to_matrix(&name_refs)?;

    let is_test: Vec<bool> = funs.iter().map(|&f| f == f64::from(fun)).collect();
    let test_rows: Vec<usize> = (0..frame.n_rows()).filter(|&i| is_test[i]).collect();
    let train_rows: Vec<usize> = (0..frame.n_rows()).filter(|&i| !is_test[i]).collect();
    if test_rows.is_empty() || train_rows.is_empty() {
        return Err(ElaError::Other(format!(
            "empty partition for held-out function f{fun}: {} train rows, {} test rows",
            train_rows.len(),
            test_rows.len()
        )));
    }

    Ok(LopoSplit {
        x_train: features.select_rows(&train_rows),
        y_train: train_rows.iter().map(|&i| encoded[i]).collect(),
        x_test: features.select_rows(&test_rows),
        y_test: test_rows.iter().map(|&i| encoded[i]).collect(),
        classes,
        feature_names,
    })
}

/// Runs LOPO-CV over an aggregated feature table and writes one accuracy
/// file per (label, dimension, held-out function).
#[derive(Debug, Clone)]
pub struct LopoCv {
    table_path: PathBuf,
    results_dir: PathBuf,
    labels: Vec<String>,
    n_trees: usize,
    random_state: u64,
}

impl LopoCv {
    /// Creates a runner with a 1000-tree forest and random state 0.
    pub fn new(
        table_path: impl Into<PathBuf>,
        results_dir: impl Into<PathBuf>,
        labels: &[String],
    ) -> Self {
        Self {
            table_path: table_path.into(),
            results_dir: results_dir.into(),
            labels: labels.to_vec(),
            n_trees: 1000,
            random_state: 0,
        }
    }

    #[must_use]
    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = random_state;
        self
    }

    #[must_use]
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Path of the accuracy file for one job.
    #[must_use]
    pub fn accuracy_path(&self, label: &str, dim: usize, fun: u8) -> PathBuf {
        self.results_dir.join(accuracy_file_name(label, fun, dim))
    }

    /// Reads the aggregated table with the label columns as text.
    ///
    /// # Errors
    ///
    /// Returns [`ElaError::MissingInput`] if the table does not exist.
    pub fn load_table(&self) -> Result<DataFrame> {
        let text: Vec<&str> = self.labels.iter().map(String::as_str).collect();
        DataFrame::read_csv(&self.table_path, &text)
    }

    /// Rows of dimension `dim`, cleaned.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has no rows for `dim`.
    pub fn dimension_table(&self, table: &DataFrame, dim: usize) -> Result<DataFrame> {
        let mask: Vec<bool> = table
            .numeric("dim")?
            .iter()
            .map(|&d| d == dim as f64)
            .collect();
        let filtered = table.filter_rows(&mask)?;
        if filtered.n_rows() == 0 {
            return Err(ElaError::Other(format!(
                "no rows for dimension {dim} in {}",
                self.table_path.display()
            )));
        }
        let cleaned = clean_table(filtered, ID_COLUMNS.len() + self.labels.len());
        debug!(
            dim,
            missing = ?cleaned.dropped_missing,
            constant = ?cleaned.dropped_constant,
            "columns dropped"
        );
        Ok(cleaned.frame)
    }

    /// Trains on all functions but `fun` and returns the test accuracy.
    ///
    /// # Errors
    ///
    /// Returns an error if `label` is not a table column or a partition is
    /// empty.
    pub fn evaluate(&self, dim_table: &DataFrame, fun: u8, label: &str) -> Result<f64> {
        if !self.labels.iter().any(|l| l == label) {
            return Err(ElaError::InvalidHyperparameter {
                param: "label".to_string(),
                value: label.to_string(),
                constraint: format!("one of {}", self.labels.join(", ")),
            });
        }
        let split = split_by_function(dim_table, fun, label, &self.labels)?;
        let mut forest =
            RandomForestClassifier::new(self.n_trees).with_random_state(self.random_state);
        forest.fit(&split.x_train, &split.y_train)?;
        Ok(accuracy(&forest.predict(&split.x_test), &split.y_test))
    }

    fn write_accuracy(&self, label: &str, dim: usize, fun: u8, score: f64) -> Result<PathBuf> {
        fs::create_dir_all(&self.results_dir)?;
        let path = self.accuracy_path(label, dim, fun);
        fs::write(&path, score.to_string())?;
        info!(label, dim, fun, accuracy = score, path = %path.display(), "accuracy written");
        Ok(path)
    }

    /// Single (label, dimension, held-out function) job.
    ///
    /// # Errors
    ///
    /// Returns [`ElaError::MissingInput`] if the table is absent, and the
    /// errors of [`LopoCv::evaluate`].
    pub fn run_job(&self, label: &str, dim: usize, fun: u8) -> Result<f64> {
        let table = self.load_table()?;
        let dim_table = self.dimension_table(&table, dim)?;
        let score = self.evaluate(&dim_table, fun, label)?;
        self.write_accuracy(label, dim, fun, score)?;
        Ok(score)
    }

    /// Sequential sweep over dimensions × 24 held-out functions × `labels`.
    ///
    /// Returns the number of accuracy files written.
    ///
    /// # Errors
    ///
    /// Stops at the first failing job.
    pub fn run_all(&self, dims: &[usize], labels: &[String]) -> Result<usize> {
        let table = self.load_table()?;
        let mut written = 0;
        for &dim in dims {
            let dim_table = self.dimension_table(&table, dim)?;
            for fun in function_ids() {
                for label in labels {
                    let score = self.evaluate(&dim_table, fun, label)?;
                    self.write_accuracy(label, dim, fun, score)?;
                    written += 1;
                }
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
#[path = "model_selection_tests.rs"]
mod tests;
