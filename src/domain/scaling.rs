//! Numeric scaling fitted at training time.

use serde::{Deserialize, Serialize};

use super::field::Field;

/// Whether the paired model was trained on scaled numeric inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericScaling {
    /// Numeric answers pass through unchanged.
    #[default]
    Disabled,
    /// Numeric answers go through the fitted [`StandardScaler`].
    Enabled,
}

impl NumericScaling {
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

impl std::fmt::Display for NumericScaling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::Enabled => write!(f, "enabled"),
        }
    }
}

/// Serialized form of a fitted zero-mean/unit-variance scaler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedScaler {
    pub columns: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// A fitted `(x - mean) / scale` transform over a subset of numeric fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    params: Vec<(Field, f64, f64)>,
}

impl StandardScaler {
    /// Validate an exported scaler.
    ///
    /// A zero scale is treated as 1, matching how such scalers are fit on
    /// constant columns.
    ///
    /// # Errors
    /// Returns error on length mismatches, unknown or non-numeric columns,
    /// duplicates, or non-finite parameters.
    pub fn from_exported(exported: ExportedScaler) -> Result<Self, String> {
        let n = exported.columns.len();
        if n == 0 {
            return Err("scaler has no columns".into());
        }
        if exported.mean.len() != n || exported.scale.len() != n {
            return Err(format!(
                "scaler lengths differ: {} columns, {} means, {} scales",
                n,
                exported.mean.len(),
                exported.scale.len()
            ));
        }

        let mut params = Vec::with_capacity(n);
        for ((name, mean), scale) in exported.columns.iter().zip(exported.mean).zip(exported.scale) {
            let field = Field::from_column_name(name)
                .ok_or_else(|| format!("scaler column {name:?} is not a known field"))?;
            if !field.is_numeric() {
                return Err(format!("scaler column {name:?} is not numeric"));
            }
            if params.iter().any(|(f, _, _)| *f == field) {
                return Err(format!("scaler column {name:?} is listed more than once"));
            }
            if !mean.is_finite() || !scale.is_finite() {
                return Err(format!("scaler parameters for {name:?} are not finite"));
            }
            let scale = if scale == 0.0 { 1.0 } else { scale };
            params.push((field, mean, scale));
        }

        Ok(Self { params })
    }

    /// Fields this scaler transforms.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.params.iter().map(|(f, _, _)| *f)
    }

    /// Scale `value` if `field` is covered, otherwise return it unchanged.
    #[must_use]
    pub fn transform(&self, field: Field, value: f64) -> f64 {
        match self.params.iter().find(|(f, _, _)| *f == field) {
            Some((_, mean, scale)) => (value - mean) / scale,
            None => value,
        }
    }
}
