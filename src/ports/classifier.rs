//! Classifier port: Trait for the pre-trained model's inference entry point.
//!
//! This trait abstracts the serialized model format from the application logic.

/// Errors raised by a classifier on a single row.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("Model was fit on {expected} features, got {got}")]
    FeatureCountMismatch { expected: usize, got: usize },

    #[error("Feature column {column:?} does not match the model's order")]
    ColumnOrderMismatch { column: String },

    #[error("Feature {index} is not a finite number")]
    NonFiniteInput { index: usize },

    #[error("Model emitted class index {index}, decoder knows {n_classes} classes")]
    UnknownClassIndex { index: usize, n_classes: usize },
}

/// Trait for single-row classification.
///
/// Implementations must be immutable after load: `predict_row` takes `&self`
/// and the same row always yields the same index.
pub trait Classifier: Send + Sync {
    /// Number of features the model was fit on.
    fn n_features(&self) -> usize;

    /// Number of classes the model can emit.
    fn n_classes(&self) -> usize;

    /// Predict the class index for one row.
    ///
    /// # Errors
    /// Returns `InferenceError::FeatureCountMismatch` if `row.len()` differs
    /// from [`Classifier::n_features`].
    fn predict_row(&self, row: &[f64]) -> Result<usize, InferenceError>;
}

/// Shape and value checks shared by classifier implementations.
///
/// # Errors
/// Returns `FeatureCountMismatch` or `NonFiniteInput`.
pub fn check_row(expected: usize, row: &[f64]) -> Result<(), InferenceError> {
    if row.len() != expected {
        return Err(InferenceError::FeatureCountMismatch {
            expected,
            got: row.len(),
        });
    }
    if let Some(index) = row.iter().position(|v| !v.is_finite()) {
        return Err(InferenceError::NonFiniteInput { index });
    }
    Ok(())
}
