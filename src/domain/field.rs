//! Canonical questionnaire field schema.
//!
//! Every artifact and form layer talks about the same sixteen answers under
//! different names. Internally only [`Field`] is used; column names coming
//! from artifacts are resolved through [`Field::from_column_name`].

use serde::{Deserialize, Serialize};

/// How a field is turned into a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Passed through as-is (or through the fitted scaler).
    Numeric,
    /// Two-valued answer mapped to {0, 1}.
    Binary,
    /// Ordered scale mapped to {0..N-1}.
    Ordinal,
    /// Unordered set with a fixed integer assignment.
    Nominal,
}

/// One questionnaire item, in the reference dataset's column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Gender,
    Age,
    Height,
    Weight,
    FamilyHistory,
    HighCalorieFood,
    Vegetables,
    Meals,
    Snacking,
    Smokes,
    Water,
    MonitorsCalories,
    Activity,
    DeviceTime,
    Alcohol,
    Transport,
}

impl Field {
    /// All fields in canonical order.
    pub const ALL: [Field; 16] = [
        Field::Gender,
        Field::Age,
        Field::Height,
        Field::Weight,
        Field::FamilyHistory,
        Field::HighCalorieFood,
        Field::Vegetables,
        Field::Meals,
        Field::Snacking,
        Field::Smokes,
        Field::Water,
        Field::MonitorsCalories,
        Field::Activity,
        Field::DeviceTime,
        Field::Alcohol,
        Field::Transport,
    ];

    /// Canonical column name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Height => "height",
            Self::Weight => "weight",
            Self::FamilyHistory => "family_history",
            Self::HighCalorieFood => "high_calorie_food",
            Self::Vegetables => "vegetables",
            Self::Meals => "meals",
            Self::Snacking => "snacking",
            Self::Smokes => "smokes",
            Self::Water => "water",
            Self::MonitorsCalories => "monitors_calories",
            Self::Activity => "activity",
            Self::DeviceTime => "device_time",
            Self::Alcohol => "alcohol",
            Self::Transport => "transport",
        }
    }

    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Age | Self::Height | Self::Weight | Self::Meals | Self::Water | Self::DeviceTime => {
                FieldKind::Numeric
            }
            Self::Gender
            | Self::FamilyHistory
            | Self::HighCalorieFood
            | Self::Smokes
            | Self::MonitorsCalories => FieldKind::Binary,
            Self::Vegetables | Self::Snacking | Self::Activity | Self::Alcohol => FieldKind::Ordinal,
            Self::Transport => FieldKind::Nominal,
        }
    }

    #[must_use]
    pub fn is_numeric(self) -> bool {
        self.kind() == FieldKind::Numeric
    }

    /// Other names the same column has carried: the reference dataset's
    /// column codes and the Portuguese names used by the training pipeline.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Gender => &["Gender", "genero"],
            Self::Age => &["Age", "idade"],
            Self::Height => &["Height", "altura"],
            Self::Weight => &["Weight", "peso"],
            Self::FamilyHistory => &[
                "family_history_with_overweight",
                "historico_familiar",
            ],
            Self::HighCalorieFood => &["FAVC", "consome_alta_calorias_frequente"],
            Self::Vegetables => &["FCVC", "consumo_vegetais"],
            Self::Meals => &["NCP", "qtde_refeicoes_principais"],
            Self::Snacking => &["CAEC", "alimentacao_entre_refeicoes"],
            Self::Smokes => &["SMOKE", "fuma"],
            Self::Water => &["CH2O", "qtde_agua_diaria"],
            Self::MonitorsCalories => &["SCC", "monitora_calorias"],
            Self::Activity => &["FAF", "freq_atividade_fisica"],
            Self::DeviceTime => &["TUE", "tempo_uso_dispositivos"],
            Self::Alcohol => &["CALC", "freq_consumo_alcool"],
            Self::Transport => &["MTRANS", "meio_transporte_contumaz"],
        }
    }

    /// Resolve an artifact column name to a field.
    ///
    /// Canonical names match exactly; aliases match ignoring ASCII case.
    #[must_use]
    pub fn from_column_name(name: &str) -> Option<Field> {
        let name = name.trim();
        Self::ALL.into_iter().find(|field| {
            field.name() == name
                || field
                    .aliases()
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(name))
        })
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
