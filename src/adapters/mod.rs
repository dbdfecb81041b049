//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with artifact formats and
//! external data:
//! - `artifacts`: JSON artifact loading (model, decoder, feature order, scaler)
//! - `linear`, `forest`: classifier families behind the `Classifier` port
//! - `dataset`: CSV reader for the reference dataset
//! - `sanitize`: answer-value filtering for logs

pub mod artifacts;
pub mod dataset;
pub mod forest;
pub mod linear;
pub mod sanitize;

pub use artifacts::{ArtifactError, ArtifactSet, ModelArtifact, ModelKind};
pub use dataset::{DatasetError, ReferenceRecord};
