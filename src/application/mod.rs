//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

pub mod analytics;
mod encoder;
mod predictor;

pub use analytics::{AnalyticsService, ReferenceSummary};
pub use encoder::FeatureEncoder;
pub use predictor::PredictionService;
