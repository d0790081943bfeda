//! Core traits for transformers and classifiers.
//!
//! These traits define the API contracts the pipeline's models share.

use crate::error::Result;
use crate::primitives::Matrix;

/// Supervised classifier over integer-encoded labels.
///
/// # Examples
///
/// ```
/// use bbob_ela::prelude::*;
///
/// let x = Matrix::from_vec(4, 1, vec![0.0, 1.0, 10.0, 11.0]).expect("valid shape");
/// let y = vec![0, 0, 1, 1];
///
/// let mut forest = RandomForestClassifier::new(10).with_random_state(0);
/// forest.fit(&x, &y).expect("fit succeeds");
/// assert_eq!(forest.score(&x, &y), 1.0);
/// ```
pub trait Classifier {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (empty data, dimension mismatch, ...).
    fn fit(&mut self, x: &Matrix<f64>, y: &[usize]) -> Result<()>;

    /// Predicts class indices for input data.
    fn predict(&self, x: &Matrix<f64>) -> Vec<usize>;

    /// Fraction of rows whose prediction equals `y`.
    fn score(&self, x: &Matrix<f64>, y: &[usize]) -> f64 {
        crate::metrics::accuracy(&self.predict(x), y)
    }
}

/// Trait for data transformers (projections, scalers).
pub trait Transformer {
    /// Fits the transformer to data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()>;

    /// Transforms data using fitted parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if transformer is not fitted.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>>;

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit_transform(&mut self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}
