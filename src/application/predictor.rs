//! Prediction service: Runs the end-to-end questionnaire pipeline.
//!
//! This service coordinates:
//! - Answer parsing
//! - Feature encoding
//! - Single-row inference
//! - Class index decoding
//!
//! It owns no mutable state after construction and can be shared across
//! threads behind an `Arc`.

use std::sync::Arc;

use super::encoder::FeatureEncoder;
use crate::adapters::{ArtifactSet, ModelArtifact};
use crate::domain::{
    ExtraColumnPolicy, FeatureVector, FormSubmission, LabelDecoder, NumericScaling,
    PredictedClass, Prediction, RawAnswer,
};
use crate::ports::{Classifier, InferenceError};
use crate::{PredictorError, Result};

/// Service for predicting an obesity category from questionnaire answers.
pub struct PredictionService<C>
where
    C: Classifier,
{
    encoder: FeatureEncoder,
    classifier: Arc<C>,
    decoder: Arc<LabelDecoder>,
}

impl<C> PredictionService<C>
where
    C: Classifier,
{
    /// Create a new prediction service.
    pub fn new(encoder: FeatureEncoder, classifier: Arc<C>, decoder: Arc<LabelDecoder>) -> Self {
        Self {
            encoder,
            classifier,
            decoder,
        }
    }

    #[must_use]
    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    /// Predict the category for an already-encoded row.
    ///
    /// # Errors
    /// Returns `Inference` if the row does not match the model's shape or
    /// column order, or the model emits an index the decoder does not know.
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictedClass> {
        self.predict_indexed(features).map(|(class, _)| class)
    }

    fn predict_indexed(&self, features: &FeatureVector) -> Result<(PredictedClass, usize)> {
        let order = self.encoder.feature_order();
        if features.len() == order.len() {
            if let Some((column, _)) = features
                .columns()
                .iter()
                .zip(order.columns())
                .find(|(got, want)| got != want)
            {
                return Err(InferenceError::ColumnOrderMismatch {
                    column: column.clone(),
                }
                .into());
            }
        }

        let index = self.classifier.predict_row(features.values())?;
        let class = self
            .decoder
            .decode(index)
            .ok_or(InferenceError::UnknownClassIndex {
                index,
                n_classes: self.decoder.n_classes(),
            })?;

        Ok((class, index))
    }

    /// Encode typed answers and predict.
    ///
    /// # Errors
    /// Returns `Encoding` or `Inference` on failure; no label is produced.
    pub fn predict_answers(&self, raw: &RawAnswer) -> Result<Prediction> {
        tracing::debug!("Encoding answers...");
        let features = self.encoder.encode(raw)?;

        tracing::debug!("Running {}-feature inference...", features.len());
        let (class, index) = self.predict_indexed(&features)?;

        tracing::info!("Prediction complete: class={}, index={}", class, index);
        Ok(Prediction::new(class, index, features))
    }

    /// Parse, encode and predict one form submission.
    ///
    /// # Errors
    /// Returns `Encoding` for an unknown categorical value, plus everything
    /// [`PredictionService::predict_answers`] returns.
    pub fn predict_submission(&self, form: &FormSubmission) -> Result<Prediction> {
        let raw = RawAnswer::try_from(form)?;
        self.predict_answers(&raw)
    }
}

impl PredictionService<ModelArtifact> {
    /// Build the service from a loaded artifact set.
    ///
    /// # Errors
    /// Returns `Encoding` if the feature order cannot be resolved, or
    /// `Config` if scaling is enabled without a fitted scaler.
    pub fn from_artifacts(artifacts: ArtifactSet, extra_columns: ExtraColumnPolicy) -> Result<Self> {
        let ArtifactSet {
            model,
            decoder,
            feature_order,
            scaler,
            scaling,
            ..
        } = artifacts;

        let encoder = match (scaling, scaler) {
            (NumericScaling::Enabled, Some(scaler)) => {
                FeatureEncoder::with_scaler(feature_order, scaler, extra_columns)?
            }
            (NumericScaling::Enabled, None) => {
                return Err(PredictorError::Config(
                    "numeric scaling is enabled but no scaler was loaded".into(),
                ));
            }
            (NumericScaling::Disabled, _) => FeatureEncoder::new(feature_order, extra_columns)?,
        };

        tracing::info!(
            "Prediction service ready ({} model, numeric scaling {})",
            model.kind(),
            encoder.scaling()
        );

        Ok(Self::new(encoder, Arc::new(model), Arc::new(decoder)))
    }
}
