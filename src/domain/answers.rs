//! Questionnaire answers.
//!
//! [`FormSubmission`] is what the form layer hands over: categorical answers
//! as free strings. [`RawAnswer`] is the typed record after every string has
//! been matched against its encoding table.

use serde::{Deserialize, Serialize};

use super::encoding::{
    ActivityFrequency, Categorical, EncodingError, Frequency, Gender, Transport, VegetableIntake,
    YesNo,
};
use super::field::Field;

/// Answers exactly as submitted by the form layer.
///
/// Field names accept the dataset codes and Portuguese names as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    #[serde(alias = "Gender", alias = "genero")]
    pub gender: String,
    #[serde(alias = "Age", alias = "idade")]
    pub age: f64,
    #[serde(alias = "Height", alias = "altura")]
    pub height: f64,
    #[serde(alias = "Weight", alias = "peso")]
    pub weight: f64,
    #[serde(alias = "family_history_with_overweight", alias = "historico_familiar")]
    pub family_history: String,
    #[serde(alias = "FAVC", alias = "consome_alta_calorias_frequente")]
    pub high_calorie_food: String,
    #[serde(alias = "FCVC", alias = "consumo_vegetais")]
    pub vegetables: String,
    #[serde(alias = "NCP", alias = "qtde_refeicoes_principais")]
    pub meals: u8,
    #[serde(alias = "CAEC", alias = "alimentacao_entre_refeicoes")]
    pub snacking: String,
    #[serde(alias = "SMOKE", alias = "fuma")]
    pub smokes: String,
    #[serde(alias = "CH2O", alias = "qtde_agua_diaria")]
    pub water: f64,
    #[serde(alias = "SCC", alias = "monitora_calorias")]
    pub monitors_calories: String,
    #[serde(alias = "FAF", alias = "freq_atividade_fisica")]
    pub activity: String,
    #[serde(alias = "TUE", alias = "tempo_uso_dispositivos")]
    pub device_time: f64,
    #[serde(alias = "CALC", alias = "freq_consumo_alcool")]
    pub alcohol: String,
    #[serde(alias = "MTRANS", alias = "meio_transporte_contumaz")]
    pub transport: String,
}

/// Typed questionnaire answers. Created per submission and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawAnswer {
    pub gender: Gender,
    /// Years, 10-100 on the form.
    pub age: f64,
    /// Metres, 1.20-2.30 on the form.
    pub height: f64,
    /// Kilograms, 30-200 on the form.
    pub weight: f64,
    pub family_history: YesNo,
    pub high_calorie_food: YesNo,
    pub vegetables: VegetableIntake,
    /// Main meals per day, 1-4.
    pub meals: u8,
    pub snacking: Frequency,
    pub smokes: YesNo,
    /// Litres per day, 0-5.
    pub water: f64,
    pub monitors_calories: YesNo,
    pub activity: ActivityFrequency,
    /// Hours per day, 0-16.
    pub device_time: f64,
    pub alcohol: Frequency,
    pub transport: Transport,
}

impl TryFrom<&FormSubmission> for RawAnswer {
    type Error = EncodingError;

    fn try_from(form: &FormSubmission) -> Result<Self, Self::Error> {
        Ok(Self {
            gender: Gender::parse_for(Field::Gender, &form.gender)?,
            age: form.age,
            height: form.height,
            weight: form.weight,
            family_history: YesNo::parse_for(Field::FamilyHistory, &form.family_history)?,
            high_calorie_food: YesNo::parse_for(Field::HighCalorieFood, &form.high_calorie_food)?,
            vegetables: VegetableIntake::parse_for(Field::Vegetables, &form.vegetables)?,
            meals: form.meals,
            snacking: Frequency::parse_for(Field::Snacking, &form.snacking)?,
            smokes: YesNo::parse_for(Field::Smokes, &form.smokes)?,
            water: form.water,
            monitors_calories: YesNo::parse_for(Field::MonitorsCalories, &form.monitors_calories)?,
            activity: ActivityFrequency::parse_for(Field::Activity, &form.activity)?,
            device_time: form.device_time,
            alcohol: Frequency::parse_for(Field::Alcohol, &form.alcohol)?,
            transport: Transport::parse_for(Field::Transport, &form.transport)?,
        })
    }
}

impl RawAnswer {
    /// Numeric value of `field`: the code for categorical answers, the raw
    /// number otherwise.
    #[must_use]
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Gender => f64::from(self.gender.code()),
            Field::Age => self.age,
            Field::Height => self.height,
            Field::Weight => self.weight,
            Field::FamilyHistory => f64::from(self.family_history.code()),
            Field::HighCalorieFood => f64::from(self.high_calorie_food.code()),
            Field::Vegetables => f64::from(self.vegetables.code()),
            Field::Meals => f64::from(self.meals),
            Field::Snacking => f64::from(self.snacking.code()),
            Field::Smokes => f64::from(self.smokes.code()),
            Field::Water => self.water,
            Field::MonitorsCalories => f64::from(self.monitors_calories.code()),
            Field::Activity => f64::from(self.activity.code()),
            Field::DeviceTime => self.device_time,
            Field::Alcohol => f64::from(self.alcohol.code()),
            Field::Transport => f64::from(self.transport.code()),
        }
    }

    /// Numeric answers outside the ranges the form allows.
    ///
    /// The form layer owns these bounds; the encoder only reports them.
    #[must_use]
    pub fn range_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !(10.0..=100.0).contains(&self.age) {
            warnings.push(format!("age {} out of range [10, 100]", self.age));
        }
        if !(1.20..=2.30).contains(&self.height) {
            warnings.push(format!("height {} out of range [1.20, 2.30]", self.height));
        }
        if !(30.0..=200.0).contains(&self.weight) {
            warnings.push(format!("weight {} out of range [30, 200]", self.weight));
        }
        if !(1..=4).contains(&self.meals) {
            warnings.push(format!("meals {} out of range [1, 4]", self.meals));
        }
        if !(0.0..=5.0).contains(&self.water) {
            warnings.push(format!("water {} out of range [0, 5]", self.water));
        }
        if !(0.0..=16.0).contains(&self.device_time) {
            warnings.push(format!("device_time {} out of range [0, 16]", self.device_time));
        }

        warnings
    }
}
