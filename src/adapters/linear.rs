//! Multinomial linear classifier.
//!
//! One weight vector and intercept per class; the predicted class is the
//! argmax of the decision scores.

use serde::{Deserialize, Serialize};

use crate::ports::{check_row, Classifier, InferenceError};

/// Linear model parameters exported by the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub n_features: usize,
    /// `coefficients[class][feature]`
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LinearModel {
    /// Structural sanity checks run once at load.
    ///
    /// # Errors
    /// Returns a description of the first inconsistency found.
    pub fn validate(&self) -> Result<(), String> {
        if self.n_features == 0 {
            return Err("linear model has zero features".into());
        }
        if self.coefficients.len() < 2 {
            return Err(format!(
                "linear model needs at least 2 classes, got {}",
                self.coefficients.len()
            ));
        }
        if self.intercepts.len() != self.coefficients.len() {
            return Err(format!(
                "linear model has {} coefficient rows but {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            ));
        }
        for (class, row) in self.coefficients.iter().enumerate() {
            if row.len() != self.n_features {
                return Err(format!(
                    "coefficient row {class} has {} entries, expected {}",
                    row.len(),
                    self.n_features
                ));
            }
            if row.iter().any(|w| !w.is_finite()) {
                return Err(format!("coefficient row {class} is not finite"));
            }
        }
        if self.intercepts.iter().any(|b| !b.is_finite()) {
            return Err("intercepts are not finite".into());
        }
        Ok(())
    }

    /// Decision score per class.
    #[must_use]
    pub fn scores(&self, row: &[f64]) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(w, b)| w.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect()
    }
}

impl Classifier for LinearModel {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_row(&self, row: &[f64]) -> Result<usize, InferenceError> {
        check_row(self.n_features, row)?;

        // Strict `>` keeps the lowest index on ties.
        let mut best = 0;
        let scores = self.scores(row);
        for (class, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = class;
            }
        }
        Ok(best)
    }
}
