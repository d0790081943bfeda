//! Summaries of the LOPO-CV accuracy files.

use crate::error::{ElaError, Result};
use crate::naming::{accuracy_file_name, function_ids};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Mean accuracy over the 24 held-out functions for `label` in dimension
/// `dim`.
///
/// # Errors
///
/// Returns [`ElaError::MissingInput`] if an accuracy file is absent and
/// [`ElaError::Parse`] if one does not hold a number.
pub fn avg_accuracy(dir: &Path, label: &str, dim: usize) -> Result<f64> {
    let mut total = 0.0;
    let mut count = 0usize;
    for fun in function_ids() {
        let path = dir.join(accuracy_file_name(label, fun, dim));
        let text = fs::read_to_string(&path).map_err(|e| ElaError::from_io_at(e, &path))?;
        let score: f64 = text.trim().parse().map_err(|_| ElaError::Parse {
            path: path.clone(),
            line: 1,
            message: format!("invalid accuracy '{}'", text.trim()),
        })?;
        total += score;
        count += 1;
    }
    Ok(total / count as f64)
}

/// Mean accuracy of one label across dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelAccuracy {
    pub label: String,
    /// `(dimension, mean accuracy)` in request order.
    pub by_dimension: Vec<(usize, f64)>,
}

/// Mean accuracies for labels × dimensions.
///
/// `Display` renders the console layout: a 60-dash rule and a header per
/// label, then one line per dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    pub labels: Vec<LabelAccuracy>,
}

impl AccuracyReport {
    /// Collects [`avg_accuracy`] for every label and dimension.
    ///
    /// # Errors
    ///
    /// See [`avg_accuracy`].
    pub fn collect(dir: &Path, labels: &[String], dims: &[usize]) -> Result<Self> {
        let labels = labels
            .iter()
            .map(|label| {
                let by_dimension = dims
                    .iter()
                    .map(|&dim| Ok((dim, avg_accuracy(dir, label, dim)?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(LabelAccuracy {
                    label: label.clone(),
                    by_dimension,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { labels })
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.labels {
            writeln!(f, "{}", "-".repeat(60))?;
            writeln!(f, "High level classification property={}", entry.label)?;
            for (dim, acc) in &entry.by_dimension {
                writeln!(f, "Dimension={dim}, accuracy={acc:?}")?;
            }
        }
        Ok(())
    }
}
