//! Aggregation of per-instance feature listings into one table.
//!
//! The table has one row per (dimension, function, instance) with the
//! columns `dim, fun, instance`, the high-level property labels of the
//! function, and every feature of every requested class.

use crate::bbob::Suite;
use crate::error::{ElaError, Result};
use crate::features::FeatureListing;
use crate::naming::{feature_file_name, function_ids, instance_ids, N_FUNCTIONS};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Identifier columns leading every table row.
pub const ID_COLUMNS: [&str; 3] = ["dim", "fun", "instance"];

/// High-level properties of the 24 functions, as text labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTable {
    labels: Vec<String>,
    // rows[fun - 1][label index]
    rows: Vec<Vec<String>>,
}

impl LabelTable {
    /// Reads the label columns named in `labels` from a CSV file with a
    /// header row, one row per function in order.
    ///
    /// # Errors
    ///
    /// Returns [`ElaError::MissingInput`] if the file does not exist,
    /// [`ElaError::SchemaMismatch`] if a label column is absent and
    /// [`ElaError::Parse`] if fewer than 24 rows are present.
    pub fn load<P: AsRef<Path>>(path: P, labels: &[String]) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ElaError::from_io_at(e, path))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        let indices = labels
            .iter()
            .map(|label| {
                headers
                    .iter()
                    .position(|h| h.trim() == label)
                    .ok_or_else(|| ElaError::SchemaMismatch {
                        path: path.to_path_buf(),
                        message: format!("label column {label} not found"),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut rows = Vec::with_capacity(usize::from(N_FUNCTIONS));
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let row = indices
                .iter()
                .map(|&i| {
                    record
                        .get(i)
                        .map(|v| v.trim().to_string())
                        .ok_or_else(|| ElaError::Parse {
                            path: path.to_path_buf(),
                            line: idx + 2,
                            message: format!("missing field {}", i + 1),
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }

        if rows.len() < usize::from(N_FUNCTIONS) {
            return Err(ElaError::Parse {
                path: path.to_path_buf(),
                line: rows.len() + 1,
                message: format!("expected {N_FUNCTIONS} function rows, found {}", rows.len()),
            });
        }

        Ok(Self {
            labels: labels.to_vec(),
            rows,
        })
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label values of function `fun`, in label order.
    #[must_use]
    pub fn row(&self, fun: u8) -> Option<&[String]> {
        self.rows
            .get(usize::from(fun).checked_sub(1)?)
            .map(Vec::as_slice)
    }
}

/// Shape of a written table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: usize,
}

fn read_listing(
    feature_dir: &Path,
    class: &str,
    dim: usize,
    fun: u8,
    instance: u32,
) -> Result<(PathBuf, FeatureListing)> {
    let path = feature_dir.join(feature_file_name(
        class,
        Suite::for_dimension(dim),
        fun,
        dim,
        instance,
    ));
    let listing = FeatureListing::read_csv(&path)?;
    Ok((path, listing))
}

/// Joins the feature listings of `classes` over `dims` × 24 functions × 15
/// instances into the table at `table_path`.
///
/// The feature columns of each class are taken from its listing for
/// `(dims[0], f1, i1)`; every other listing must carry exactly the same
/// names in the same order.
///
/// # Errors
///
/// Returns [`ElaError::MissingInput`] for any absent listing,
/// [`ElaError::SchemaMismatch`] for a listing that differs from the schema,
/// and [`ElaError::InvalidHyperparameter`] if `dims` or `classes` is empty.
pub fn create_feature_table(
    table_path: &Path,
    feature_dir: &Path,
    classes: &[String],
    dims: &[usize],
    labels: &LabelTable,
) -> Result<TableSummary> {
    let Some(&first_dim) = dims.first() else {
        return Err(ElaError::InvalidHyperparameter {
            param: "dims".to_string(),
            value: "[]".to_string(),
            constraint: "at least one dimension".to_string(),
        });
    };
    if classes.is_empty() {
        return Err(ElaError::InvalidHyperparameter {
            param: "classes".to_string(),
            value: "[]".to_string(),
            constraint: "at least one feature class".to_string(),
        });
    }

    let mut schema: Vec<Vec<String>> = Vec::with_capacity(classes.len());
    for class in classes {
        let (_, listing) = read_listing(feature_dir, class, first_dim, 1, 1)?;
        schema.push(listing.names().map(str::to_string).collect());
    }

    let mut header: Vec<String> = ID_COLUMNS.iter().map(ToString::to_string).collect();
    header.extend(labels.labels().iter().cloned());
    header.extend(schema.iter().flatten().cloned());

    if let Some(parent) = table_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(table_path)?;
    writer.write_record(&header)?;

    let mut rows = 0;
    for &dim in dims {
        for fun in function_ids() {
            let label_row = labels
                .row(fun)
                .ok_or_else(|| ElaError::Other(format!("no property labels for function {fun}")))?;
            for instance in instance_ids() {
                let mut record: Vec<String> = Vec::with_capacity(header.len());
                record.push(dim.to_string());
                record.push(fun.to_string());
                record.push(instance.to_string());
                record.extend(label_row.iter().cloned());

                for (class, names) in classes.iter().zip(&schema) {
                    let (path, listing) = read_listing(feature_dir, class, dim, fun, instance)?;
                    if !listing.names().eq(names.iter().map(String::as_str)) {
                        return Err(ElaError::SchemaMismatch {
                            path,
                            message: format!(
                                "expected {} {class} features, found {}",
                                names.len(),
                                listing.len()
                            ),
                        });
                    }
                    record.extend(listing.entries().iter().map(|(_, v)| v.clone()));
                }
                writer.write_record(&record)?;
                rows += 1;
            }
            debug!(dim, fun, "function aggregated");
        }
    }
    writer.flush()?;

    info!(
        table = %table_path.display(),
        rows,
        columns = header.len(),
        "feature table written"
    );
    Ok(TableSummary {
        rows,
        columns: header.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    const LABELS: [&str; 2] = ["multimodality", "fungroup"];

    fn write_labels(path: &Path) {
        let mut text = String::from("fun,multimodality,extra,fungroup\n");
        for fun in 1..=24 {
            let _ = writeln!(
                text,
                "f{fun},{},x,{}",
                if fun % 2 == 0 { "high" } else { "none" },
                fun / 5 + 1
            );
        }
        fs::write(path, text).expect("written");
    }

    fn labels() -> Vec<String> {
        LABELS.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_label_table_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("props.csv");
        write_labels(&path);
        let table = LabelTable::load(&path, &labels()).expect("readable");
        assert_eq!(table.row(2).expect("present"), ["high", "1"]);
        assert_eq!(table.row(24).expect("present"), ["high", "5"]);
        assert!(table.row(0).is_none());
        assert!(table.row(25).is_none());
    }

    #[test]
    fn test_label_table_missing_column() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("props.csv");
        write_labels(&path);
        let err = LabelTable::load(&path, &["separability".to_string()]).unwrap_err();
        assert!(matches!(err, ElaError::SchemaMismatch { .. }));

        let err = LabelTable::load(dir.path().join("none.csv"), &labels()).unwrap_err();
        assert!(matches!(err, ElaError::MissingInput { .. }));
    }

    #[test]
    fn test_label_table_too_short() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("props.csv");
        fs::write(&path, "multimodality,fungroup\nnone,1\n").expect("written");
        assert!(matches!(
            LabelTable::load(&path, &labels()).unwrap_err(),
            ElaError::Parse { .. }
        ));
    }

    #[test]
    fn test_empty_dims_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("props.csv");
        write_labels(&path);
        let table = LabelTable::load(&path, &labels()).expect("readable");
        let err = create_feature_table(
            &dir.path().join("t.csv"),
            dir.path(),
            &["basic".to_string()],
            &[],
            &table,
        )
        .unwrap_err();
        assert!(matches!(err, ElaError::InvalidHyperparameter { .. }));
    }

    #[test]
    fn test_missing_listing_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("props.csv");
        write_labels(&path);
        let table = LabelTable::load(&path, &labels()).expect("readable");
        let err = create_feature_table(
            &dir.path().join("t.csv"),
            dir.path(),
            &["basic".to_string()],
            &[3],
            &table,
        )
        .unwrap_err();
        match err {
            ElaError::MissingInput { path } => {
                assert!(path.ends_with("basic_bbob_f1_DIM3_i1.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
