//! The sample wrapper every feature class works on.

use crate::error::{ElaError, Result};
use crate::primitives::Matrix;
use std::collections::BTreeMap;

/// Sample points, objective values and the domain they were drawn from.
///
/// When `blocks` is set the domain is split into a regular grid of cells,
/// `blocks[j]` cells along dimension `j`; otherwise the whole domain is a
/// single cell.
#[derive(Debug, Clone)]
pub struct FeatureObject {
    x: Matrix<f64>,
    y: Vec<f64>,
    minimize: bool,
    lower: Vec<f64>,
    upper: Vec<f64>,
    blocks: Vec<usize>,
    cells: BTreeMap<Vec<usize>, Vec<usize>>,
}

impl FeatureObject {
    /// Creates a feature object with scalar bounds on every coordinate.
    ///
    /// # Errors
    ///
    /// Returns an error if `y` does not have one value per row, the sample
    /// is empty, or `lower >= upper`.
    pub fn new(x: Matrix<f64>, y: Vec<f64>, lower: f64, upper: f64) -> Result<Self> {
        if x.n_rows() != y.len() {
            return Err(ElaError::dimension_mismatch(
                "objective values",
                x.n_rows(),
                y.len(),
            ));
        }
        if x.n_rows() == 0 || x.n_cols() == 0 {
            return Err("Feature object requires a non-empty sample".into());
        }
        if lower >= upper {
            return Err(ElaError::InvalidHyperparameter {
                param: "bounds".to_string(),
                value: format!("[{lower}, {upper}]"),
                constraint: "lower < upper".to_string(),
            });
        }
        let d = x.n_cols();
        let mut object = Self {
            x,
            y,
            minimize: true,
            lower: vec![lower; d],
            upper: vec![upper; d],
            blocks: vec![1; d],
            cells: BTreeMap::new(),
        };
        object.assign_cells();
        Ok(object)
    }

    /// Splits every dimension into `blocks` cells.
    ///
    /// # Errors
    ///
    /// Returns an error if `blocks` is zero.
    pub fn with_blocks(mut self, blocks: usize) -> Result<Self> {
        if blocks == 0 {
            return Err(ElaError::InvalidHyperparameter {
                param: "blocks".to_string(),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }
        self.blocks = vec![blocks; self.dim()];
        self.assign_cells();
        Ok(self)
    }

    #[must_use]
    pub fn with_minimize(mut self, minimize: bool) -> Self {
        self.minimize = minimize;
        self
    }

    fn assign_cells(&mut self) {
        let mut cells: BTreeMap<Vec<usize>, Vec<usize>> = BTreeMap::new();
        for (i, row) in self.x.rows().enumerate() {
            let key = row
                .iter()
                .enumerate()
                .map(|(j, &v)| {
                    let width = (self.upper[j] - self.lower[j]) / self.blocks[j] as f64;
                    let idx = ((v - self.lower[j]) / width).floor();
                    (idx.max(0.0) as usize).min(self.blocks[j] - 1)
                })
                .collect();
            cells.entry(key).or_default().push(i);
        }
        self.cells = cells;
    }

    pub fn x(&self) -> &Matrix<f64> {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn dim(&self) -> usize {
        self.x.n_cols()
    }

    pub fn n_obs(&self) -> usize {
        self.y.len()
    }

    pub fn minimize(&self) -> bool {
        self.minimize
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    pub fn blocks(&self) -> &[usize] {
        &self.blocks
    }

    /// Whether every dimension has at least three cells.
    pub fn allows_cell_mapping(&self) -> bool {
        self.blocks.iter().all(|&b| b >= 3)
    }

    /// Total number of grid cells (may exceed `usize`).
    pub fn cells_total(&self) -> f64 {
        self.blocks.iter().map(|&b| b as f64).product()
    }

    /// Non-empty cells keyed by their grid coordinates, with row indices.
    pub fn cells(&self) -> &BTreeMap<Vec<usize>, Vec<usize>> {
        &self.cells
    }

    /// Center point of the cell at grid coordinates `key`.
    pub fn cell_center(&self, key: &[usize]) -> Vec<f64> {
        key.iter()
            .enumerate()
            .map(|(j, &idx)| {
                let width = (self.upper[j] - self.lower[j]) / self.blocks[j] as f64;
                self.lower[j] + (idx as f64 + 0.5) * width
            })
            .collect()
    }

    /// Objective values oriented so that smaller is better.
    pub fn oriented_y(&self) -> Vec<f64> {
        if self.minimize {
            self.y.clone()
        } else {
            self.y.iter().map(|v| -v).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_assignment() {
        let x =
            Matrix::from_vec(4, 2, vec![-4.9, -4.9, 4.9, 4.9, 0.0, 0.0, 5.0, -5.0]).expect("valid");
        let obj = FeatureObject::new(x, vec![1.0, 2.0, 3.0, 4.0], -5.0, 5.0)
            .expect("valid")
            .with_blocks(3)
            .expect("blocks");
        assert_eq!(obj.cells().len(), 4);
        assert_eq!(obj.cells()[&vec![2, 0]], vec![3]);
        assert!(obj.cell_center(&[1, 1]).iter().all(|c| c.abs() < 1e-12));
        assert_eq!(obj.cells_total(), 9.0);
        assert!(obj.allows_cell_mapping());
    }

    #[test]
    fn test_single_cell_default() {
        let x = Matrix::from_vec(2, 1, vec![-1.0, 1.0]).expect("valid");
        let obj = FeatureObject::new(x, vec![0.0, 1.0], -5.0, 5.0).expect("valid");
        assert_eq!(obj.cells().len(), 1);
        assert!(!obj.allows_cell_mapping());
    }

    #[test]
    fn test_rejects_bad_input() {
        let x = Matrix::from_vec(2, 1, vec![-1.0, 1.0]).expect("valid");
        assert!(FeatureObject::new(x.clone(), vec![0.0], -5.0, 5.0).is_err());
        assert!(FeatureObject::new(x, vec![0.0, 1.0], 1.0, 1.0).is_err());
    }
}
