//! Prediction result types.
//!
//! Represents the output of the obesity-level classifier.

use serde::{Deserialize, Serialize};

use super::features::FeatureVector;

/// The seven ordered obesity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObesityLevel {
    #[serde(rename = "Insufficient_Weight")]
    InsufficientWeight,
    #[serde(rename = "Normal_Weight")]
    NormalWeight,
    #[serde(rename = "Overweight_Level_I")]
    OverweightLevelI,
    #[serde(rename = "Overweight_Level_II")]
    OverweightLevelII,
    #[serde(rename = "Obesity_Type_I")]
    ObesityTypeI,
    #[serde(rename = "Obesity_Type_II")]
    ObesityTypeII,
    #[serde(rename = "Obesity_Type_III")]
    ObesityTypeIII,
}

/// One label drawn from [`ObesityLevel`], as handed to the presentation layer.
pub type PredictedClass = ObesityLevel;

impl ObesityLevel {
    /// All categories from lightest to heaviest.
    pub const ALL: [ObesityLevel; 7] = [
        Self::InsufficientWeight,
        Self::NormalWeight,
        Self::OverweightLevelI,
        Self::OverweightLevelII,
        Self::ObesityTypeI,
        Self::ObesityTypeII,
        Self::ObesityTypeIII,
    ];

    /// Canonical label as used by the training data.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InsufficientWeight => "Insufficient_Weight",
            Self::NormalWeight => "Normal_Weight",
            Self::OverweightLevelI => "Overweight_Level_I",
            Self::OverweightLevelII => "Overweight_Level_II",
            Self::ObesityTypeI => "Obesity_Type_I",
            Self::ObesityTypeII => "Obesity_Type_II",
            Self::ObesityTypeIII => "Obesity_Type_III",
        }
    }

    /// Display label in Brazilian Portuguese.
    #[must_use]
    pub fn label_pt(self) -> &'static str {
        match self {
            Self::InsufficientWeight => "Abaixo do Peso",
            Self::NormalWeight => "Peso Normal",
            Self::OverweightLevelI => "Sobrepeso I",
            Self::OverweightLevelII => "Sobrepeso II",
            Self::ObesityTypeI => "Obesidade I",
            Self::ObesityTypeII => "Obesidade II",
            Self::ObesityTypeIII => "Obesidade III",
        }
    }

    /// Position on the scale, 0 (insufficient) to 6 (type III).
    #[must_use]
    pub fn ordinal(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ObesityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObesityLevel {
    type Err = String;

    /// Accepts the canonical label (any case, spaces for underscores) or the
    /// Portuguese display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(' ', "_");
        Self::ALL
            .into_iter()
            .find(|level| {
                level.as_str().eq_ignore_ascii_case(&wanted) || level.label_pt() == s.trim()
            })
            .ok_or_else(|| format!("Unknown obesity level: {s:?}"))
    }
}

/// Inverse of the target encoder fitted at training time: class index to
/// category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDecoder {
    classes: Vec<ObesityLevel>,
}

impl LabelDecoder {
    /// `classes[i]` is the category the model means by index `i`.
    ///
    /// # Errors
    /// Returns error if the list is empty or names a category twice.
    pub fn new(classes: Vec<ObesityLevel>) -> Result<Self, String> {
        if classes.is_empty() {
            return Err("label decoder has no classes".into());
        }
        for (i, class) in classes.iter().enumerate() {
            if classes[..i].contains(class) {
                return Err(format!("label decoder lists {class} more than once"));
            }
        }
        Ok(Self { classes })
    }

    /// Parse the fitted encoder's class strings.
    ///
    /// # Errors
    /// Returns error on an unknown label or an invalid list.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, String> {
        let classes = labels
            .iter()
            .map(|l| l.as_ref().parse())
            .collect::<Result<Vec<ObesityLevel>, _>>()?;
        Self::new(classes)
    }

    #[must_use]
    pub fn decode(&self, index: usize) -> Option<ObesityLevel> {
        self.classes.get(index).copied()
    }

    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn classes(&self) -> &[ObesityLevel] {
        &self.classes
    }
}

/// Complete prediction record for one submission. Not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// The decoded category
    pub class: PredictedClass,

    /// Index emitted by the classifier
    pub class_index: usize,

    /// The row the classifier saw, in feature order
    pub features: FeatureVector,

    /// Timestamp of prediction
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Prediction {
    #[must_use]
    pub fn new(class: PredictedClass, class_index: usize, features: FeatureVector) -> Self {
        Self {
            class,
            class_index,
            features,
            created_at: chrono::Utc::now(),
        }
    }
}
