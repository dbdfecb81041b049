//! # Obesity Predictor
//!
//! Inference core for an obesity-level questionnaire.
//!
//! This crate provides:
//! - Deterministic encoding of sixteen questionnaire answers into the
//!   feature row a pre-trained classifier was fit on
//! - Pure-Rust linear and random-forest classifiers loaded from JSON artifacts
//! - Descriptive summaries of the reference survey dataset
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (answers, encoding table, feature rows, categories)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (artifact loader, classifiers, CSV reader)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use application::{AnalyticsService, FeatureEncoder, PredictionService, ReferenceSummary};
pub use config::PredictorConfig;
pub use domain::{FeatureVector, FormSubmission, ObesityLevel, PredictedClass, Prediction, RawAnswer};

/// Result type for predictor operations
pub type Result<T> = std::result::Result<T, PredictorError>;

/// Main error type for the predictor
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("Artifact error: {0}")]
    Artifact(#[from] adapters::ArtifactError),

    #[error("Encoding failed: {0}")]
    Encoding(#[from] domain::EncodingError),

    #[error("Inference failed: {0}")]
    Inference(#[from] ports::InferenceError),

    #[error("Reference dataset error: {0}")]
    Dataset(#[from] adapters::DatasetError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PredictorError {
    /// Whether the error prevents the predictor from starting at all.
    #[must_use]
    pub fn is_startup_fatal(&self) -> bool {
        matches!(self, Self::Artifact(_) | Self::Config(_))
    }
}
