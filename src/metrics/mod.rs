//! Evaluation metrics for the property classifiers.

/// Classification accuracy: fraction of predictions equal to the truth.
///
/// # Examples
///
/// ```
/// use bbob_ela::metrics::accuracy;
///
/// assert_eq!(accuracy(&[0, 1, 1, 0], &[0, 1, 0, 0]), 0.75);
/// ```
///
/// # Panics
///
/// Panics if the slices have different lengths or are empty.
#[must_use]
pub fn accuracy(y_pred: &[usize], y_true: &[usize]) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();

    correct as f64 / y_true.len() as f64
}
