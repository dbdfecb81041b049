//! Shared fixtures for unit tests.

use std::path::Path;

use crate::domain::{FormSubmission, RawAnswer};
use crate::ports::{check_row, Classifier, InferenceError};

/// Male, 30, 1.70 m, 70 kg, family history, no high-calorie food, moderate
/// activity, walks.
pub(crate) fn sample_form() -> FormSubmission {
    FormSubmission {
        gender: "Male".into(),
        age: 30.0,
        height: 1.70,
        weight: 70.0,
        family_history: "Yes".into(),
        high_calorie_food: "No".into(),
        vegetables: "Sometimes".into(),
        meals: 3,
        snacking: "Sometimes".into(),
        smokes: "No".into(),
        water: 1.5,
        monitors_calories: "No".into(),
        activity: "Moderate".into(),
        device_time: 4.0,
        alcohol: "Sometimes".into(),
        transport: "Walking".into(),
    }
}

pub(crate) fn sample_answer() -> RawAnswer {
    RawAnswer::try_from(&sample_form()).expect("sample form is valid")
}

/// Target classes as a fitted label encoder stores them (sorted).
pub(crate) const ALPHABETICAL_LABELS: [&str; 7] = [
    "Insufficient_Weight",
    "Normal_Weight",
    "Obesity_Type_I",
    "Obesity_Type_II",
    "Obesity_Type_III",
    "Overweight_Level_I",
    "Overweight_Level_II",
];

/// Column names of the Portuguese training pipeline, in dataset order.
pub(crate) const PORTUGUESE_FEATURES: [&str; 16] = [
    "genero",
    "idade",
    "altura",
    "peso",
    "historico_familiar",
    "consome_alta_calorias_frequente",
    "consumo_vegetais",
    "qtde_refeicoes_principais",
    "alimentacao_entre_refeicoes",
    "fuma",
    "qtde_agua_diaria",
    "monitora_calorias",
    "freq_atividade_fisica",
    "tempo_uso_dispositivos",
    "freq_consumo_alcool",
    "meio_transporte_contumaz",
];

/// Classifier that always answers `index`.
pub(crate) struct StubClassifier {
    pub n_features: usize,
    pub index: usize,
}

impl Classifier for StubClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        ALPHABETICAL_LABELS.len()
    }

    fn predict_row(&self, row: &[f64]) -> Result<usize, InferenceError> {
        check_row(self.n_features, row)?;
        Ok(self.index)
    }
}

/// Knobs for [`write_artifacts`].
pub(crate) struct ArtifactFixture {
    pub features: Vec<String>,
    /// Class index the linear model always picks.
    pub favored_class: usize,
    pub numeric_scaling: Option<bool>,
    pub with_scaler: bool,
}

impl Default for ArtifactFixture {
    fn default() -> Self {
        Self {
            features: PORTUGUESE_FEATURES.iter().map(|s| s.to_string()).collect(),
            favored_class: 1,
            numeric_scaling: None,
            with_scaler: false,
        }
    }
}

pub(crate) fn write_json(path: &Path, value: &serde_json::Value) {
    let bytes = serde_json::to_vec_pretty(value).expect("serialize fixture");
    std::fs::write(path, bytes).expect("write fixture");
}

/// Write a complete artifact directory: a linear model with zero weights
/// whose intercepts make `favored_class` win for every row.
pub(crate) fn write_artifacts(dir: &Path, fixture: &ArtifactFixture) {
    let n_features = fixture.features.len();
    let n_classes = ALPHABETICAL_LABELS.len();

    let coefficients = vec![vec![0.0; n_features]; n_classes];
    let intercepts: Vec<f64> = (0..n_classes)
        .map(|c| if c == fixture.favored_class { 1.0 } else { 0.0 })
        .collect();

    let mut model = serde_json::json!({
        "kind": "linear",
        "n_features": n_features,
        "coefficients": coefficients,
        "intercepts": intercepts,
    });
    if let Some(scaled) = fixture.numeric_scaling {
        model["numeric_scaling"] = serde_json::Value::Bool(scaled);
    }

    write_json(&dir.join("model.json"), &model);
    write_json(&dir.join("label_encoder.json"), &serde_json::json!(ALPHABETICAL_LABELS));
    write_json(&dir.join("features.json"), &serde_json::json!(fixture.features));

    if fixture.with_scaler {
        write_json(
            &dir.join("scaler.json"),
            &serde_json::json!({
                "columns": ["idade", "altura", "peso", "qtde_refeicoes_principais", "qtde_agua_diaria", "tempo_uso_dispositivos"],
                "mean": [24.3, 1.70, 86.6, 2.7, 2.0, 0.66],
                "scale": [6.3, 0.09, 26.2, 0.78, 0.61, 0.61],
            }),
        );
    }
}

/// Six rows in the published dataset's format.
pub(crate) const REFERENCE_CSV: &str = "\
Gender,Age,Height,Weight,family_history,FAVC,FCVC,NCP,CAEC,SMOKE,CH2O,SCC,FAF,TUE,CALC,MTRANS,Obesity
Female,21,1.62,64,yes,no,2,3,Sometimes,no,2,no,0,1,no,Public_Transportation,Normal_Weight
Female,21,1.52,56,yes,no,3,3,Sometimes,yes,3,yes,3,0,Sometimes,Public_Transportation,Normal_Weight
Male,23,1.80,77,yes,no,2,3,Sometimes,no,2,no,2,1,Frequently,Public_Transportation,Normal_Weight
Male,27,1.80,87,no,no,3,3,Sometimes,no,2,no,2,0,Frequently,Walking,Overweight_Level_I
Male,22,1.78,89.8,no,no,2,1,Sometimes,no,2,no,0,0,Sometimes,Public_Transportation,Overweight_Level_II
Male,29,1.62,53,no,yes,2,3,Sometimes,no,2,no,0,0,Sometimes,Automobile,Normal_Weight
";
