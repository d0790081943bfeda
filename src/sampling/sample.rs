//! Evaluated sample records and their CSV persistence.

use super::{rescale, unit_sample, SamplingMethod};
use crate::bbob::Problem;
use crate::error::{ElaError, Result};
use crate::primitives::Matrix;
use rand::Rng;
use std::fs::File;
use std::path::Path;

/// Objective values and the points they were measured at.
///
/// Row `i` of `x` produced `y[i]`. On disk every row is written as the
/// objective value followed by the coordinates, without a header.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Objective values.
    pub y: Vec<f64>,
    /// Sample points, one per row.
    pub x: Matrix<f64>,
}

impl Sample {
    /// Creates a sample, checking that `x` and `y` have one entry per row.
    ///
    /// # Errors
    ///
    /// Returns a dimension mismatch if the row counts differ.
    pub fn new(x: Matrix<f64>, y: Vec<f64>) -> Result<Self> {
        if x.n_rows() != y.len() {
            return Err(ElaError::dimension_mismatch(
                "sample rows",
                x.n_rows(),
                y.len(),
            ));
        }
        Ok(Self { y, x })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.x.n_cols()
    }

    /// Writes the sample as header-less CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        let mut record = Vec::with_capacity(self.dim() + 1);
        for (y, row) in self.y.iter().zip(self.x.rows()) {
            record.clear();
            record.push(y.to_string());
            record.extend(row.iter().map(ToString::to_string));
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Loads a sample written by [`Sample::write_csv`].
///
/// # Errors
///
/// Returns [`ElaError::MissingInput`] if the file does not exist and
/// [`ElaError::Parse`] for ragged rows or non-numeric cells.
pub fn read_sample<P: AsRef<Path>>(path: P) -> Result<Sample> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ElaError::from_io_at(e, path))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut y = Vec::new();
    let mut data = Vec::new();
    let mut width = None;
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let parse_err = |message: String| ElaError::Parse {
            path: path.to_path_buf(),
            line: line + 1,
            message,
        };
        if *width.get_or_insert(record.len()) != record.len() {
            return Err(parse_err(format!("expected {} fields", width.unwrap_or(0))));
        }
        for (j, field) in record.iter().enumerate() {
            let value: f64 = field
                .trim()
                .parse()
                .map_err(|_| parse_err(format!("invalid number '{field}'")))?;
            if j == 0 {
                y.push(value);
            } else {
                data.push(value);
            }
        }
    }

    let dim = width.map_or(0, |w| w.saturating_sub(1));
    let x = Matrix::from_vec(y.len(), dim, data)?;
    Sample::new(x, y)
}

/// Samples `n` points of `problem` with `method` and evaluates them in order.
///
/// # Errors
///
/// Propagates bound mismatches from rescaling.
pub fn create_sample<R: Rng + ?Sized>(
    problem: &Problem,
    method: SamplingMethod,
    n: usize,
    rng: &mut R,
) -> Result<Sample> {
    let unit = unit_sample(method, n, problem.dim(), rng);
    let (lower, upper) = problem.bounds();
    let x = rescale(&unit, &lower, &upper)?;
    let y = x.rows().map(|row| problem.evaluate(row)).collect();
    Sample::new(x, y)
}
