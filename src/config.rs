//! Runtime configuration read from `OBESITY_*` environment variables.

use std::path::{Path, PathBuf};

use crate::domain::{ExtraColumnPolicy, NumericScaling};
use crate::{PredictorError, Result};

pub const ARTIFACT_DIR_ENV: &str = "OBESITY_ARTIFACT_DIR";
pub const NUMERIC_SCALING_ENV: &str = "OBESITY_NUMERIC_SCALING";
pub const EXTRA_COLUMNS_ENV: &str = "OBESITY_EXTRA_COLUMNS";
pub const DATASET_PATH_ENV: &str = "OBESITY_DATASET_PATH";

const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorConfig {
    /// Directory holding `model.json`, `label_encoder.json`, `features.json`
    /// and optionally `scaler.json`.
    pub artifact_dir: PathBuf,
    pub numeric_scaling: NumericScaling,
    pub extra_columns: ExtraColumnPolicy,
    /// Reference CSV for descriptive summaries.
    pub dataset_path: Option<PathBuf>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            numeric_scaling: NumericScaling::Disabled,
            extra_columns: ExtraColumnPolicy::Drop,
            dataset_path: None,
        }
    }
}

impl PredictorConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns `Config` if a variable is set to an unrecognized value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    /// Returns `Config` if a variable is set to an unrecognized value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(ARTIFACT_DIR_ENV) {
            config.artifact_dir = PathBuf::from(dir);
        }
        if let Some(raw) = get(NUMERIC_SCALING_ENV) {
            config.numeric_scaling = parse_scaling(&raw)?;
        }
        if let Some(raw) = get(EXTRA_COLUMNS_ENV) {
            config.extra_columns = parse_extra_columns(&raw)?;
        }
        config.dataset_path = get(DATASET_PATH_ENV).map(PathBuf::from);

        Ok(config)
    }

    #[must_use]
    pub fn with_artifact_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.artifact_dir = dir.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn with_numeric_scaling(mut self, scaling: NumericScaling) -> Self {
        self.numeric_scaling = scaling;
        self
    }

    #[must_use]
    pub fn with_extra_columns(mut self, policy: ExtraColumnPolicy) -> Self {
        self.extra_columns = policy;
        self
    }

    #[must_use]
    pub fn with_dataset_path(mut self, path: impl AsRef<Path>) -> Self {
        self.dataset_path = Some(path.as_ref().to_path_buf());
        self
    }
}

fn parse_scaling(raw: &str) -> Result<NumericScaling> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "enabled" | "true" | "1" | "yes" => Ok(NumericScaling::Enabled),
        "disabled" | "false" | "0" | "no" => Ok(NumericScaling::Disabled),
        other => Err(PredictorError::Config(format!(
            "{NUMERIC_SCALING_ENV}={other:?} is not one of enabled|disabled"
        ))),
    }
}

fn parse_extra_columns(raw: &str) -> Result<ExtraColumnPolicy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "drop" => Ok(ExtraColumnPolicy::Drop),
        "reject" => Ok(ExtraColumnPolicy::Reject),
        other => Err(PredictorError::Config(format!(
            "{EXTRA_COLUMNS_ENV}={other:?} is not one of drop|reject"
        ))),
    }
}
