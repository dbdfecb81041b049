//! Domain layer: Core types and the encoding table.
//!
//! This module contains pure Rust types with no I/O.
//! Every categorical answer is a closed enum with a total integer mapping.

mod answers;
mod encoding;
mod features;
mod field;
mod prediction;
mod scaling;

pub use answers::{FormSubmission, RawAnswer};
pub use encoding::{
    ActivityFrequency, Categorical, EncodingError, Frequency, Gender, Transport, VegetableIntake,
    YesNo,
};
pub use features::{ExtraColumnPolicy, FeatureOrder, FeatureVector};
pub use field::{Field, FieldKind};
pub use prediction::{LabelDecoder, ObesityLevel, PredictedClass, Prediction};
pub use scaling::{ExportedScaler, NumericScaling, StandardScaler};
