//! Principal component analysis.

use crate::error::{ElaError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;

/// Principal Component Analysis (PCA).
///
/// Projects data onto the eigenvectors of its sample covariance matrix with
/// the largest eigenvalues. Component signs are fixed so that the
/// largest-magnitude loading of every component is positive, which makes
/// the projection reproducible across eigen solvers.
///
/// # Examples
///
/// ```
/// use bbob_ela::decomposition::PCA;
/// use bbob_ela::prelude::*;
///
/// let x = Matrix::from_vec(4, 2, vec![1.0, 2.0, 2.0, 4.1, 3.0, 5.9, 4.0, 8.0]).expect("valid");
/// let mut pca = PCA::new(1);
/// let projected = pca.fit_transform(&x).expect("fit succeeds");
/// assert_eq!(projected.shape(), (4, 1));
/// assert!(pca.explained_variance_ratio().expect("fitted")[0] > 0.99);
/// ```
#[derive(Debug, Clone)]
pub struct PCA {
    n_components: usize,
    mean: Option<Vec<f64>>,
    components: Option<Matrix<f64>>,
    explained_variance: Option<Vec<f64>>,
    explained_variance_ratio: Option<Vec<f64>>,
}

impl PCA {
    /// Creates a new PCA transformer keeping `n_components` components.
    #[must_use]
    pub fn new(n_components: usize) -> Self {
        Self {
            n_components,
            mean: None,
            components: None,
            explained_variance: None,
            explained_variance_ratio: None,
        }
    }

    /// Variance explained by each kept component.
    #[must_use]
    pub fn explained_variance(&self) -> Option<&[f64]> {
        self.explained_variance.as_deref()
    }

    /// Share of the total variance explained by each kept component.
    #[must_use]
    pub fn explained_variance_ratio(&self) -> Option<&[f64]> {
        self.explained_variance_ratio.as_deref()
    }

    /// Components as rows (`n_components × n_features`).
    #[must_use]
    pub fn components(&self) -> Option<&Matrix<f64>> {
        self.components.as_ref()
    }
}

impl Transformer for PCA {
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        use nalgebra::SymmetricEigen;

        let (n_samples, n_features) = x.shape();
        if self.n_components == 0 || self.n_components > n_features {
            return Err(ElaError::InvalidHyperparameter {
                param: "n_components".to_string(),
                value: self.n_components.to_string(),
                constraint: format!("1..={n_features}"),
            });
        }
        if n_samples < 2 {
            return Err("PCA requires at least two samples".into());
        }

        let cov = x.covariance();
        let eigen = SymmetricEigen::new(cov.to_dmatrix());
        let eigenvalues = eigen.eigenvalues;
        let eigenvectors = eigen.eigenvectors;

        let mut indices: Vec<usize> = (0..n_features).collect();
        indices.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));

        let mut components_data = Vec::with_capacity(self.n_components * n_features);
        let mut explained_variance = Vec::with_capacity(self.n_components);
        for &idx in indices.iter().take(self.n_components) {
            explained_variance.push(eigenvalues[idx].max(0.0));
            let column: Vec<f64> = (0..n_features).map(|j| eigenvectors[(j, idx)]).collect();
            let pivot =
                column
                    .iter()
                    .copied()
                    .fold(0.0_f64, |acc, v| if v.abs() > acc.abs() { v } else { acc });
            let sign = if pivot < 0.0 { -1.0 } else { 1.0 };
            components_data.extend(column.iter().map(|v| sign * v));
        }

        let total_variance: f64 = eigenvalues.iter().map(|v| v.max(0.0)).sum();
        let explained_variance_ratio = explained_variance
            .iter()
            .map(|&v| {
                if total_variance > 0.0 {
                    v / total_variance
                } else {
                    0.0
                }
            })
            .collect();

        self.mean = Some(x.column_means());
        self.components = Some(Matrix::from_vec(
            self.n_components,
            n_features,
            components_data,
        )?);
        self.explained_variance = Some(explained_variance);
        self.explained_variance_ratio = Some(explained_variance_ratio);
        Ok(())
    }

    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let components = self
            .components
            .as_ref()
            .ok_or_else(|| ElaError::from("PCA not fitted"))?;
        let mean = self
            .mean
            .as_ref()
            .ok_or_else(|| ElaError::from("PCA not fitted"))?;

        let (n_samples, n_features) = x.shape();
        if n_features != mean.len() {
            return Err(ElaError::dimension_mismatch(
                "features",
                mean.len(),
                n_features,
            ));
        }

        // X_pca = (X - mean) @ components^T
        let mut result = Vec::with_capacity(n_samples * self.n_components);
        for row in x.rows() {
            for k in 0..self.n_components {
                let loading = components.row(k);
                let value: f64 = row
                    .iter()
                    .zip(mean)
                    .zip(loading)
                    .map(|((v, m), c)| (v - m) * c)
                    .sum();
                result.push(value);
            }
        }
        Ok(Matrix::from_vec(n_samples, self.n_components, result)?)
    }
}
