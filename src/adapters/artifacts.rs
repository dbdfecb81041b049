//! Artifact loader: reads the pre-trained model, target decoder, feature
//! order and optional scaler from one directory.
//!
//! # Lifecycle
//!
//! Artifacts are loaded once at startup and never mutated afterwards. Each
//! file is opened, parsed and closed inside a single call; a failure on any
//! required file aborts the whole load, so nothing half-loaded escapes.
//!
//! # Layout
//!
//! ```text
//! <dir>/model.json          classifier, tagged by "kind" (linear | forest)
//! <dir>/label_encoder.json  class index -> category label
//! <dir>/features.json       feature_order column names
//! <dir>/scaler.json         fitted scaler (required only when scaling is enabled)
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::forest::ForestModel;
use super::linear::LinearModel;
use crate::domain::{ExportedScaler, FeatureOrder, LabelDecoder, NumericScaling, StandardScaler};
use crate::ports::{Classifier, InferenceError};

pub const MODEL_FILE: &str = "model.json";
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";
pub const FEATURES_FILE: &str = "features.json";
pub const SCALER_FILE: &str = "scaler.json";

/// Errors raised while loading artifacts. All of them are startup-fatal.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Missing artifact {artifact} at {path:?}: {reason}")]
    MissingArtifact {
        artifact: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("Artifacts are inconsistent: {0}")]
    Inconsistent(String),

    #[error("Numeric scaling is {configured} but the model was trained with scaling {trained}")]
    ScalingModeMismatch {
        configured: NumericScaling,
        trained: NumericScaling,
    },
}

/// The classifier families the training pipeline can export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    Linear(LinearModel),
    Forest(ForestModel),
}

/// Contents of `model.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(flatten)]
    pub model: ModelKind,

    /// Whether the model was fit on scaled numeric inputs, when the
    /// pipeline recorded it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_scaling: Option<bool>,
}

impl ModelArtifact {
    fn validate(&self) -> Result<(), String> {
        match &self.model {
            ModelKind::Linear(m) => m.validate(),
            ModelKind::Forest(m) => m.validate(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self.model {
            ModelKind::Linear(_) => "linear",
            ModelKind::Forest(_) => "forest",
        }
    }

    fn inner(&self) -> &dyn Classifier {
        match &self.model {
            ModelKind::Linear(m) => m as &dyn Classifier,
            ModelKind::Forest(m) => m as &dyn Classifier,
        }
    }
}

impl Classifier for ModelArtifact {
    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn n_classes(&self) -> usize {
        self.inner().n_classes()
    }

    fn predict_row(&self, row: &[f64]) -> Result<usize, InferenceError> {
        self.inner().predict_row(row)
    }
}

/// Everything the predictor needs, loaded from one directory.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub dir: PathBuf,
    pub model: ModelArtifact,
    pub decoder: LabelDecoder,
    pub feature_order: FeatureOrder,
    pub scaler: Option<StandardScaler>,
    pub scaling: NumericScaling,
}

fn missing(artifact: &'static str, path: &Path, reason: impl ToString) -> ArtifactError {
    ArtifactError::MissingArtifact {
        artifact,
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Open, parse and close one JSON artifact.
fn read_json<T: DeserializeOwned>(artifact: &'static str, path: &Path) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(|e| missing(artifact, path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| missing(artifact, path, e))
}

impl ArtifactSet {
    /// Load all artifacts from `dir` for the given scaling mode.
    ///
    /// # Errors
    /// - `MissingArtifact` if a required file is absent, unreadable or malformed.
    /// - `ScalingModeMismatch` if the model records a different scaling mode.
    /// - `Inconsistent` if decoder, feature order and model disagree on the
    ///   class or feature count.
    pub fn load(dir: &Path, scaling: NumericScaling) -> Result<Self, ArtifactError> {
        tracing::info!("Loading artifacts from {:?} (numeric scaling {})", dir, scaling);

        let model_path = dir.join(MODEL_FILE);
        let model: ModelArtifact = read_json("model", &model_path)?;
        model
            .validate()
            .map_err(|e| missing("model", &model_path, e))?;

        if let Some(trained) = model.numeric_scaling {
            let trained = if trained {
                NumericScaling::Enabled
            } else {
                NumericScaling::Disabled
            };
            if trained != scaling {
                return Err(ArtifactError::ScalingModeMismatch {
                    configured: scaling,
                    trained,
                });
            }
        }

        let decoder_path = dir.join(LABEL_ENCODER_FILE);
        let labels: Vec<String> = read_json("label_encoder", &decoder_path)?;
        let decoder =
            LabelDecoder::from_labels(labels.as_slice()).map_err(|e| missing("label_encoder", &decoder_path, e))?;

        if decoder.n_classes() != model.n_classes() {
            return Err(ArtifactError::Inconsistent(format!(
                "label encoder has {} classes, model emits {}",
                decoder.n_classes(),
                model.n_classes()
            )));
        }

        let features_path = dir.join(FEATURES_FILE);
        let feature_order: FeatureOrder = read_json("features", &features_path)?;

        if feature_order.len() != model.n_features() {
            return Err(ArtifactError::Inconsistent(format!(
                "feature order lists {} columns, model was fit on {}",
                feature_order.len(),
                model.n_features()
            )));
        }

        let scaler_path = dir.join(SCALER_FILE);
        let scaler = match scaling {
            NumericScaling::Enabled => {
                let exported: ExportedScaler = read_json("scaler", &scaler_path)?;
                Some(
                    StandardScaler::from_exported(exported)
                        .map_err(|e| missing("scaler", &scaler_path, e))?,
                )
            }
            NumericScaling::Disabled => {
                if scaler_path.exists() {
                    tracing::info!("Ignoring {:?}: numeric scaling is disabled", scaler_path);
                }
                None
            }
        };

        tracing::info!(
            "Loaded {} model (n_features={}, n_classes={}, feature_order={})",
            model.kind(),
            model.n_features(),
            model.n_classes(),
            feature_order.len()
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            model,
            decoder,
            feature_order,
            scaler,
            scaling,
        })
    }
}
