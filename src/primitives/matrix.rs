//! Matrix type for 2D numeric data.

use serde::{Deserialize, Serialize};

/// A 2D matrix of values (row-major storage).
///
/// # Examples
///
/// ```
/// use bbob_ela::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("data length matches rows * cols");
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a vector of data.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, &'static str> {
        if data.len() != rows * cols {
            return Err("Data length must equal rows * cols");
        }
        Ok(Self { data, rows, cols })
    }

    /// Builds a matrix from equally sized rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows have different lengths.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, &'static str> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err("All rows must have the same length");
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns a row as a slice.
    #[must_use]
    pub fn row(&self, row_idx: usize) -> &[T] {
        let start = row_idx * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterates over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on zero, and a zero-column matrix has no data anyway
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Returns a column as an owned vector.
    #[must_use]
    pub fn column(&self, col_idx: usize) -> Vec<T> {
        (0..self.rows)
            .map(|row| self.data[row * self.cols + col_idx])
            .collect()
    }

    /// Returns a new matrix containing only the given rows, in order.
    #[must_use]
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &idx in indices {
            data.extend_from_slice(self.row(idx));
        }
        Self {
            data,
            rows: indices.len(),
            cols: self.cols,
        }
    }

    /// Returns a new matrix containing only the given columns, in order.
    #[must_use]
    pub fn select_columns(&self, indices: &[usize]) -> Self {
        let mut data = Vec::with_capacity(self.rows * indices.len());
        for row in self.rows() {
            data.extend(indices.iter().map(|&j| row[j]));
        }
        Self {
            data,
            rows: self.rows,
            cols: indices.len(),
        }
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the matrix and returns its row-major data.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl Matrix<f64> {
    /// Creates a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Mean of each column.
    #[must_use]
    pub fn column_means(&self) -> Vec<f64> {
        let mut means = vec![0.0; self.cols];
        if self.rows == 0 {
            return means;
        }
        for row in self.rows() {
            for (m, &v) in means.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= self.rows as f64;
        }
        means
    }

    /// Per-column minimum and maximum.
    #[must_use]
    pub fn column_ranges(&self) -> Vec<(f64, f64)> {
        let mut ranges = vec![(f64::INFINITY, f64::NEG_INFINITY); self.cols];
        for row in self.rows() {
            for (r, &v) in ranges.iter_mut().zip(row) {
                r.0 = r.0.min(v);
                r.1 = r.1.max(v);
            }
        }
        ranges
    }

    /// Subtracts the column means from every row.
    #[must_use]
    pub fn centered(&self) -> Self {
        let means = self.column_means();
        let mut data = self.data.clone();
        if self.cols > 0 {
            for row in data.chunks_exact_mut(self.cols) {
                for (v, m) in row.iter_mut().zip(&means) {
                    *v -= m;
                }
            }
        }
        Self {
            data,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Sample covariance matrix (n - 1 denominator) of the columns.
    #[must_use]
    pub fn covariance(&self) -> Self {
        let centered = self.centered();
        let n = self.cols;
        let mut cov = vec![0.0; n * n];
        for row in centered.rows() {
            for i in 0..n {
                let ri = row[i];
                for j in i..n {
                    cov[i * n + j] += ri * row[j];
                }
            }
        }
        let denom = (self.rows.max(2) - 1) as f64;
        for i in 0..n {
            for j in i..n {
                let v = cov[i * n + j] / denom;
                cov[i * n + j] = v;
                cov[j * n + i] = v;
            }
        }
        Self {
            data: cov,
            rows: n,
            cols: n,
        }
    }

    /// Appends a column to the right.
    ///
    /// # Errors
    ///
    /// Returns an error if the column length doesn't match the row count.
    pub fn with_column(&self, column: &[f64]) -> Result<Self, &'static str> {
        if column.len() != self.rows {
            return Err("Column length must match the number of rows");
        }
        let cols = self.cols + 1;
        let mut data = Vec::with_capacity(self.rows * cols);
        for (row, &v) in self.rows().zip(column) {
            data.extend_from_slice(row);
            data.push(v);
        }
        Ok(Self {
            data,
            rows: self.rows,
            cols,
        })
    }

    /// Converts to a nalgebra matrix for decompositions.
    #[must_use]
    pub fn to_dmatrix(&self) -> nalgebra::DMatrix<f64> {
        nalgebra::DMatrix::from_row_slice(self.rows, self.cols, &self.data)
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
