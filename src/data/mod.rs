//! `DataFrame` module for named column containers.
//!
//! A minimal frame for the aggregated feature tables: numeric feature
//! columns next to a few text label columns, with the cleaning steps the
//! classifier needs before training.

use crate::error::{ElaError, Result};
use crate::primitives::Matrix;
use std::cmp::Ordering;
use std::fs::File;
use std::path::Path;

/// A single named column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct values.
    #[must_use]
    pub fn n_unique(&self) -> usize {
        match self {
            Column::Numeric(v) => {
                let mut sorted = v.clone();
                sorted.sort_by(f64::total_cmp);
                sorted.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);
                sorted.len()
            }
            Column::Text(v) => {
                let mut sorted: Vec<&str> = v.iter().map(String::as_str).collect();
                sorted.sort_unstable();
                sorted.dedup();
                sorted.len()
            }
        }
    }

    fn has_missing(&self) -> bool {
        match self {
            Column::Numeric(v) => v.iter().any(|x| x.is_nan()),
            Column::Text(_) => false,
        }
    }

    fn select(&self, indices: &[usize]) -> Self {
        match self {
            Column::Numeric(v) => Column::Numeric(indices.iter().map(|&i| v[i]).collect()),
            Column::Text(v) => Column::Text(indices.iter().map(|&i| v[i].clone()).collect()),
        }
    }

    fn cell(&self, row: usize) -> String {
        match self {
            Column::Numeric(v) => v[row].to_string(),
            Column::Text(v) => v[row].clone(),
        }
    }
}

/// Parses a numeric table cell.
///
/// Empty cells and the `NA`/`nan`/`None` spellings become NaN; `inf`
/// spellings become infinities.
///
/// # Examples
///
/// ```
/// use bbob_ela::data::parse_cell;
///
/// assert!(parse_cell("NA").expect("missing").is_nan());
/// assert_eq!(parse_cell("-inf"), Some(f64::NEG_INFINITY));
/// assert_eq!(parse_cell("2.5"), Some(2.5));
/// assert_eq!(parse_cell("abc"), None);
/// ```
#[must_use]
pub fn parse_cell(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    match cell {
        "" | "NA" | "NaN" | "nan" | "None" | "null" => Some(f64::NAN),
        "inf" | "Inf" | "+inf" | "infinity" | "Infinity" => Some(f64::INFINITY),
        "-inf" | "-Inf" | "-infinity" | "-Infinity" => Some(f64::NEG_INFINITY),
        _ => cell.parse().ok(),
    }
}

/// A minimal `DataFrame` with named columns.
///
/// # Examples
///
/// ```
/// use bbob_ela::data::{Column, DataFrame};
///
/// let df = DataFrame::new(vec![
///     ("fun".to_string(), Column::Numeric(vec![1.0, 2.0, 3.0])),
///     ("label".to_string(), Column::Text(vec!["a".into(), "b".into(), "a".into()])),
/// ])
/// .expect("valid columns");
/// assert_eq!(df.shape(), (3, 2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    columns: Vec<(String, Column)>,
    n_rows: usize,
}

impl DataFrame {
    /// Creates a new `DataFrame` from named columns.
    ///
    /// # Errors
    ///
    /// Returns an error if columns have different lengths, a name is empty
    /// or duplicated, or no column is given.
    pub fn new(columns: Vec<(String, Column)>) -> Result<Self> {
        if columns.is_empty() {
            return Err("DataFrame must have at least one column".into());
        }

        let n_rows = columns[0].1.len();
        for (name, col) in &columns {
            if col.len() != n_rows {
                return Err("All columns must have the same length".into());
            }
            if name.is_empty() {
                return Err("Column names cannot be empty".into());
            }
        }

        let mut names: Vec<&str> = columns.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        if names.windows(2).any(|w| w[0] == w[1]) {
            return Err("Duplicate column names not allowed".into());
        }

        Ok(Self { columns, n_rows })
    }

    /// Returns the shape as (`n_rows`, `n_cols`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns a reference to a column by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the column doesn't exist.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| ElaError::Other(format!("Column {name} not found")))
    }

    /// Numeric values of a column.
    ///
    /// # Errors
    ///
    /// Returns an error if the column doesn't exist or holds text.
    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        match self.column(name)? {
            Column::Numeric(v) => Ok(v),
            Column::Text(_) => Err(ElaError::Other(format!("Column {name} is not numeric"))),
        }
    }

    /// Text values of a column.
    ///
    /// # Errors
    ///
    /// Returns an error if the column doesn't exist or is numeric.
    pub fn text(&self, name: &str) -> Result<&[String]> {
        match self.column(name)? {
            Column::Text(v) => Ok(v),
            Column::Numeric(_) => Err(ElaError::Other(format!("Column {name} is not text"))),
        }
    }

    /// Keeps the rows where `mask` is true.
    ///
    /// # Errors
    ///
    /// Returns an error if the mask length differs from the row count.
    pub fn filter_rows(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.n_rows {
            return Err(ElaError::dimension_mismatch(
                "row mask",
                self.n_rows,
                mask.len(),
            ));
        }
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();
        Ok(Self {
            columns: self
                .columns
                .iter()
                .map(|(n, c)| (n.clone(), c.select(&indices)))
                .collect(),
            n_rows: indices.len(),
        })
    }

    /// Removes the named columns; unknown names are ignored.
    #[must_use]
    pub fn drop_columns(&self, names: &[&str]) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .filter(|(n, _)| !names.contains(&n.as_str()))
                .cloned()
                .collect(),
            n_rows: self.n_rows,
        }
    }

    /// Replaces positive and negative infinities with NaN.
    pub fn replace_infinite(&mut self) {
        for (_, col) in &mut self.columns {
            if let Column::Numeric(v) = col {
                for x in v.iter_mut().filter(|x| x.is_infinite()) {
                    *x = f64::NAN;
                }
            }
        }
    }

    /// Drops every numeric column holding at least one NaN and returns the
    /// dropped names.
    pub fn drop_missing_columns(&mut self) -> Vec<String> {
        self.retain_columns(|_, col| !col.has_missing())
    }

    /// Drops columns after the first `skip` with a single distinct value and
    /// returns the dropped names.
    pub fn drop_constant_columns(&mut self, skip: usize) -> Vec<String> {
        self.retain_columns(|idx, col| idx < skip || col.n_unique() > 1)
    }

    fn retain_columns(&mut self, keep: impl Fn(usize, &Column) -> bool) -> Vec<String> {
        let mut dropped = Vec::new();
        let mut kept = Vec::with_capacity(self.columns.len());
        for (idx, (name, col)) in std::mem::take(&mut self.columns).into_iter().enumerate() {
            if keep(idx, &col) {
                kept.push((name, col));
            } else {
                dropped.push(name);
            }
        }
        self.columns = kept;
        dropped
    }

    /// Number of distinct values in a column.
    ///
    /// # Errors
    ///
    /// Returns an error if the column doesn't exist.
    pub fn n_unique(&self, name: &str) -> Result<usize> {
        Ok(self.column(name)?.n_unique())
    }

    /// Stacks the named numeric columns into a row-major matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if a column doesn't exist or holds text.
    pub fn to_matrix(&self, names: &[&str]) -> Result<Matrix<f64>> {
        let columns = names
            .iter()
            .map(|name| self.numeric(name))
            .collect::<Result<Vec<_>>>()?;
        let mut data = Vec::with_capacity(self.n_rows * columns.len());
        for row in 0..self.n_rows {
            data.extend(columns.iter().map(|c| c[row]));
        }
        Ok(Matrix::from_vec(self.n_rows, columns.len(), data)?)
    }

    /// Reads a CSV file with a header row.
    ///
    /// Columns named in `text_columns` are kept as text; every other cell is
    /// parsed with [`parse_cell`].
    ///
    /// # Errors
    ///
    /// Returns [`ElaError::MissingInput`] if the file does not exist and
    /// [`ElaError::Parse`] for ragged rows or unparseable numeric cells.
    pub fn read_csv<P: AsRef<Path>>(path: P, text_columns: &[&str]) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ElaError::from_io_at(e, path))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut columns: Vec<Column> = headers
            .iter()
            .map(|h| {
                if text_columns.contains(&h.as_str()) {
                    Column::Text(Vec::new())
                } else {
                    Column::Numeric(Vec::new())
                }
            })
            .collect();

        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            // header is line 1
            let line = idx + 2;
            if record.len() != headers.len() {
                return Err(ElaError::Parse {
                    path: path.to_path_buf(),
                    line,
                    message: format!("expected {} fields, found {}", headers.len(), record.len()),
                });
            }
            for ((col, cell), name) in columns.iter_mut().zip(record.iter()).zip(&headers) {
                match col {
                    Column::Text(v) => v.push(cell.to_string()),
                    Column::Numeric(v) => {
                        let value = parse_cell(cell).ok_or_else(|| ElaError::Parse {
                            path: path.to_path_buf(),
                            line,
                            message: format!("column {name}: invalid number '{cell}'"),
                        })?;
                        v.push(value);
                    }
                }
            }
        }

        Self::new(headers.into_iter().zip(columns).collect())
    }

    /// Writes the frame as CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(self.column_names())?;
        for row in 0..self.n_rows {
            writer.write_record(self.columns.iter().map(|(_, c)| c.cell(row)))?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
