//! Reference dataset reader.
//!
//! Loads the static survey dataset (`Obesity.csv`) the descriptive summaries
//! are computed over. Column names follow the published dataset codes.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::ObesityLevel;

/// Errors that can occur while reading the reference dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("Failed to open dataset: {0}")]
    OpenFailed(String),

    #[error("Invalid dataset row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("Dataset is empty")]
    Empty,
}

/// One surveyed person from the reference dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Height")]
    pub height: f64,
    #[serde(rename = "Weight")]
    pub weight: f64,
    #[serde(alias = "family_history_with_overweight")]
    pub family_history: String,
    #[serde(rename = "FAVC")]
    pub favc: String,
    #[serde(rename = "FCVC")]
    pub fcvc: f64,
    #[serde(rename = "NCP")]
    pub ncp: f64,
    #[serde(rename = "CAEC")]
    pub caec: String,
    #[serde(rename = "SMOKE")]
    pub smoke: String,
    #[serde(rename = "CH2O")]
    pub ch2o: f64,
    #[serde(rename = "SCC")]
    pub scc: String,
    #[serde(rename = "FAF")]
    pub faf: f64,
    #[serde(rename = "TUE")]
    pub tue: f64,
    #[serde(rename = "CALC")]
    pub calc: String,
    #[serde(rename = "MTRANS")]
    pub mtrans: String,
    #[serde(rename = "Obesity", alias = "NObeyesdad")]
    pub obesity: ObesityLevel,
}

/// Read every record from a CSV file with a header row.
///
/// # Errors
/// Returns `NotFound`, `OpenFailed`, `InvalidRow` or `Empty`.
pub fn read_reference_csv(path: &Path) -> Result<Vec<ReferenceRecord>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.display().to_string()));
    }
    let file = File::open(path).map_err(|e| DatasetError::OpenFailed(e.to_string()))?;
    let records = parse_reference_csv(BufReader::new(file))?;

    tracing::info!("Loaded {} reference records from {:?}", records.len(), path);
    Ok(records)
}

/// Parse records from any reader.
///
/// # Errors
/// Returns `InvalidRow` (1-based, header excluded) or `Empty`.
pub fn parse_reference_csv<R: Read>(reader: R) -> Result<Vec<ReferenceRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<ReferenceRecord>().enumerate() {
        let record = result.map_err(|e| DatasetError::InvalidRow {
            row: i + 1,
            reason: e.to_string(),
        })?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(records)
}
