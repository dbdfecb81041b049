//! The encoding table: one closed enum per categorical answer.
//!
//! Each enum carries a total mapping to the integer code the trained model
//! expects. The codes are part of the model contract: changing one silently
//! corrupts every prediction, so they are pinned by tests below.

use serde::{Deserialize, Serialize};

use super::field::Field;

/// Errors raised while turning answers into a feature row.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodingError {
    #[error("Unknown value {value:?} for field {field}")]
    UnknownCategoryValue { field: Field, value: String },

    #[error("Feature column {0:?} is not produced by the encoder")]
    MissingFeatureColumn(String),

    #[error("Encoder produced column {0:?} which the feature order does not list")]
    UnexpectedFeatureColumn(String),

    #[error("Feature column {0:?} is listed more than once")]
    DuplicateFeatureColumn(String),

    #[error("Feature order is empty")]
    EmptyFeatureOrder,
}

/// A categorical answer with a fixed integer code.
pub trait Categorical: Sized + Copy + 'static {
    /// Every member of the domain, in code order.
    const ALL: &'static [Self];

    /// Integer code fed to the model.
    fn code(self) -> u8;

    /// Canonical English label.
    fn as_str(self) -> &'static str;

    /// Accepted spellings besides the canonical label, already normalized
    /// (lowercase, single spaces, no underscores).
    fn aliases(self) -> &'static [&'static str];

    /// Parse a raw form value for `field`.
    ///
    /// # Errors
    /// Returns `UnknownCategoryValue` when the value is outside the domain.
    fn parse_for(field: Field, raw: &str) -> Result<Self, EncodingError> {
        let wanted = normalize(raw);
        Self::ALL
            .iter()
            .copied()
            .find(|v| normalize(v.as_str()) == wanted || v.aliases().contains(&wanted.as_str()))
            .ok_or_else(|| EncodingError::UnknownCategoryValue {
                field,
                value: raw.to_string(),
            })
    }
}

fn normalize(raw: &str) -> String {
    raw.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Categorical for Gender {
    const ALL: &'static [Self] = &[Self::Female, Self::Male];

    fn code(self) -> u8 {
        match self {
            Self::Female => 0,
            Self::Male => 1,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Female => &["feminino"],
            Self::Male => &["masculino"],
        }
    }
}

/// Shared by family history, high-calorie food, smoking and calorie monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    No,
    Yes,
}

impl Categorical for YesNo {
    const ALL: &'static [Self] = &[Self::No, Self::Yes];

    fn code(self) -> u8 {
        match self {
            Self::No => 0,
            Self::Yes => 1,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::No => &["não", "nao"],
            Self::Yes => &["sim"],
        }
    }
}

/// How often vegetables are eaten with meals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VegetableIntake {
    Never,
    Sometimes,
    Always,
}

impl Categorical for VegetableIntake {
    const ALL: &'static [Self] = &[Self::Never, Self::Sometimes, Self::Always];

    fn code(self) -> u8 {
        match self {
            Self::Never => 0,
            Self::Sometimes => 1,
            Self::Always => 2,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::Sometimes => "Sometimes",
            Self::Always => "Always",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Never => &["rarely", "never or rarely", "nunca", "nunca ou raramente"],
            Self::Sometimes => &["às vezes", "as vezes"],
            Self::Always => &["sempre"],
        }
    }
}

/// Eating between main meals. The same scale is used for alcohol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    No,
    Sometimes,
    Frequently,
    Always,
}

impl Categorical for Frequency {
    const ALL: &'static [Self] = &[Self::No, Self::Sometimes, Self::Frequently, Self::Always];

    fn code(self) -> u8 {
        match self {
            Self::No => 0,
            Self::Sometimes => 1,
            Self::Frequently => 2,
            Self::Always => 3,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Sometimes => "Sometimes",
            Self::Frequently => "Frequently",
            Self::Always => "Always",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::No => &["não", "nao", "never", "não aplicável", "nao aplicavel"],
            Self::Sometimes => &["às vezes", "as vezes"],
            Self::Frequently => &["frequent", "frequente"],
            Self::Always => &["sempre"],
        }
    }
}

/// Physical activity frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityFrequency {
    Never,
    Rare,
    Moderate,
    Frequent,
}

impl Categorical for ActivityFrequency {
    const ALL: &'static [Self] = &[Self::Never, Self::Rare, Self::Moderate, Self::Frequent];

    fn code(self) -> u8 {
        match self {
            Self::Never => 0,
            Self::Rare => 1,
            Self::Moderate => 2,
            Self::Frequent => 3,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::Rare => "Rare",
            Self::Moderate => "Moderate",
            Self::Frequent => "Frequent",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Never => &["nunca"],
            Self::Rare => &["rarely", "pouquíssima", "pouquissima"],
            Self::Moderate => &["moderately", "moderada"],
            Self::Frequent => &["frequently", "frequente"],
        }
    }
}

/// Usual means of transport. The assignment is arbitrary but fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transport {
    Walking,
    Bike,
    #[serde(rename = "Public Transport")]
    PublicTransport,
    Automobile,
    Motorbike,
}

impl Categorical for Transport {
    const ALL: &'static [Self] = &[
        Self::Walking,
        Self::Bike,
        Self::PublicTransport,
        Self::Automobile,
        Self::Motorbike,
    ];

    fn code(self) -> u8 {
        match self {
            Self::Walking => 0,
            Self::Bike => 1,
            Self::PublicTransport => 2,
            Self::Automobile => 3,
            Self::Motorbike => 4,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Walking => "Walking",
            Self::Bike => "Bike",
            Self::PublicTransport => "Public Transport",
            Self::Automobile => "Automobile",
            Self::Motorbike => "Motorbike",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Walking => &["caminhada"],
            Self::Bike => &["bicycle", "bicicleta"],
            Self::PublicTransport => &[
                "public transportation",
                "transporte público",
                "transporte publico",
            ],
            Self::Automobile => &["car", "automóvel", "automovel"],
            Self::Motorbike => &["motorcycle", "moto"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes<T: Categorical>() -> Vec<(&'static str, u8)> {
        T::ALL.iter().map(|v| (v.as_str(), v.code())).collect()
    }

    #[test]
    fn test_documented_codes() {
        assert_eq!(codes::<Gender>(), vec![("Female", 0), ("Male", 1)]);
        assert_eq!(codes::<YesNo>(), vec![("No", 0), ("Yes", 1)]);
        assert_eq!(
            codes::<VegetableIntake>(),
            vec![("Never", 0), ("Sometimes", 1), ("Always", 2)]
        );
        assert_eq!(
            codes::<Frequency>(),
            vec![("No", 0), ("Sometimes", 1), ("Frequently", 2), ("Always", 3)]
        );
        assert_eq!(
            codes::<ActivityFrequency>(),
            vec![("Never", 0), ("Rare", 1), ("Moderate", 2), ("Frequent", 3)]
        );
        assert_eq!(
            codes::<Transport>(),
            vec![
                ("Walking", 0),
                ("Bike", 1),
                ("Public Transport", 2),
                ("Automobile", 3),
                ("Motorbike", 4)
            ]
        );
    }

    #[test]
    fn test_every_label_parses_to_itself() {
        fn check<T: Categorical + PartialEq + std::fmt::Debug>(field: Field) {
            for v in T::ALL {
                assert_eq!(T::parse_for(field, v.as_str()).unwrap(), *v);
                for alias in v.aliases() {
                    assert_eq!(T::parse_for(field, alias).unwrap(), *v, "alias {alias}");
                }
            }
        }
        check::<Gender>(Field::Gender);
        check::<YesNo>(Field::Smokes);
        check::<VegetableIntake>(Field::Vegetables);
        check::<Frequency>(Field::Snacking);
        check::<ActivityFrequency>(Field::Activity);
        check::<Transport>(Field::Transport);
    }

    #[test]
    fn test_parse_is_lenient_on_spelling() {
        assert_eq!(
            Transport::parse_for(Field::Transport, "Public_Transportation").unwrap(),
            Transport::PublicTransport
        );
        assert_eq!(
            Transport::parse_for(Field::Transport, "  public   transport ").unwrap(),
            Transport::PublicTransport
        );
        assert_eq!(YesNo::parse_for(Field::Smokes, "yes").unwrap(), YesNo::Yes);
        assert_eq!(YesNo::parse_for(Field::Smokes, "Não").unwrap(), YesNo::No);
        assert_eq!(
            Frequency::parse_for(Field::Alcohol, "Não Aplicável").unwrap(),
            Frequency::No
        );
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        let err = Gender::parse_for(Field::Gender, "Other").unwrap_err();
        assert_eq!(
            err,
            EncodingError::UnknownCategoryValue {
                field: Field::Gender,
                value: "Other".to_string()
            }
        );
        assert!(ActivityFrequency::parse_for(Field::Activity, "").is_err());
        assert!(Transport::parse_for(Field::Transport, "Skateboard").is_err());
    }
}
