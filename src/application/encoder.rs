//! Feature encoder: turns typed answers into the row the model was fit on.
//!
//! Encoding is pure: the same answer always yields the same row. The full
//! canonical record is assembled first, numeric fields are optionally
//! standardized, then the row is reordered to the training feature order.

use crate::domain::{
    EncodingError, ExtraColumnPolicy, FeatureOrder, FeatureVector, Field, FormSubmission,
    NumericScaling, RawAnswer, StandardScaler,
};

/// Encoder bound to one feature order and scaling mode.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    order: FeatureOrder,
    scaler: Option<StandardScaler>,
    extra_columns: ExtraColumnPolicy,
}

impl FeatureEncoder {
    /// Encoder feeding raw numeric values through unchanged.
    ///
    /// # Errors
    /// Returns `MissingFeatureColumn` or `DuplicateFeatureColumn` when the
    /// order cannot be resolved against the field table.
    pub fn new(order: FeatureOrder, extra_columns: ExtraColumnPolicy) -> Result<Self, EncodingError> {
        order.resolve()?;
        Ok(Self {
            order,
            scaler: None,
            extra_columns,
        })
    }

    /// Encoder standardizing the numeric fields `scaler` covers.
    ///
    /// # Errors
    /// Same as [`FeatureEncoder::new`].
    pub fn with_scaler(
        order: FeatureOrder,
        scaler: StandardScaler,
        extra_columns: ExtraColumnPolicy,
    ) -> Result<Self, EncodingError> {
        let mut encoder = Self::new(order, extra_columns)?;
        for field in Field::ALL.iter().filter(|f| f.is_numeric()) {
            if !scaler.fields().any(|f| f == *field) {
                tracing::debug!("Scaler does not cover {field}; passing raw values");
            }
        }
        encoder.scaler = Some(scaler);
        Ok(encoder)
    }

    #[must_use]
    pub fn feature_order(&self) -> &FeatureOrder {
        &self.order
    }

    #[must_use]
    pub fn scaling(&self) -> NumericScaling {
        if self.scaler.is_some() {
            NumericScaling::Enabled
        } else {
            NumericScaling::Disabled
        }
    }

    /// All sixteen columns in canonical order, before selection.
    #[must_use]
    pub fn assemble(&self, raw: &RawAnswer) -> FeatureVector {
        FeatureVector::from_pairs(Field::ALL.iter().map(|&field| {
            let value = raw.value(field);
            let value = match &self.scaler {
                Some(scaler) => scaler.transform(field, value),
                None => value,
            };
            (field.name(), value)
        }))
    }

    /// Encode one answer into a row in feature order.
    ///
    /// Out-of-range numeric answers are logged as warnings and encoded as
    /// given.
    ///
    /// # Errors
    /// Returns `MissingFeatureColumn` or `UnexpectedFeatureColumn` when the
    /// assembled row cannot be matched to the feature order.
    pub fn encode(&self, raw: &RawAnswer) -> Result<FeatureVector, EncodingError> {
        for warning in raw.range_warnings() {
            tracing::warn!("{warning}");
        }
        self.assemble(raw).select(&self.order, self.extra_columns)
    }

    /// Parse and encode an untyped submission.
    ///
    /// # Errors
    /// Returns `UnknownCategoryValue` for an answer outside its domain, plus
    /// everything [`FeatureEncoder::encode`] returns.
    pub fn encode_submission(&self, form: &FormSubmission) -> Result<FeatureVector, EncodingError> {
        let raw = RawAnswer::try_from(form)?;
        self.encode(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ActivityFrequency, Categorical, ExportedScaler, Frequency, Gender, Transport,
        VegetableIntake, YesNo,
    };
    use crate::testing::{sample_answer, sample_form, PORTUGUESE_FEATURES};

    fn portuguese_order() -> FeatureOrder {
        FeatureOrder::new(PORTUGUESE_FEATURES.iter().map(|s| s.to_string()).collect())
            .expect("valid order")
    }

    fn encoder() -> FeatureEncoder {
        FeatureEncoder::new(portuguese_order(), ExtraColumnPolicy::Drop).expect("encoder")
    }

    fn codes<T: Categorical>() -> Vec<u8> {
        T::ALL.iter().map(|v| v.code()).collect()
    }

    #[test]
    fn test_encoding_is_deterministic_across_domains() {
        let enc = encoder();
        let mut raw = sample_answer();
        let mut rows = 0usize;

        for &gender in Gender::ALL {
            for &family in YesNo::ALL {
                for &favc in YesNo::ALL {
                    for &vegetables in VegetableIntake::ALL {
                        for &snacking in Frequency::ALL {
                            for &activity in ActivityFrequency::ALL {
                                for &alcohol in Frequency::ALL {
                                    for &transport in Transport::ALL {
                                        raw.gender = gender;
                                        raw.family_history = family;
                                        raw.high_calorie_food = favc;
                                        raw.vegetables = vegetables;
                                        raw.snacking = snacking;
                                        raw.activity = activity;
                                        raw.alcohol = alcohol;
                                        raw.transport = transport;

                                        let first = enc.encode(&raw).expect("encode");
                                        let second = enc.encode(&raw).expect("encode");
                                        assert_eq!(first, second);
                                        assert_eq!(first.columns(), portuguese_order().columns());
                                        rows += 1;
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        assert_eq!(rows, 2 * 2 * 2 * 3 * 4 * 4 * 4 * 5);
    }

    #[test]
    fn test_row_is_complete_and_ordered() {
        let row = encoder().encode(&sample_answer()).expect("encode");
        assert_eq!(row.len(), 16);
        assert_eq!(row.columns()[0], "genero");
        assert_eq!(row.columns()[15], "meio_transporte_contumaz");
        assert!(row.values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_each_field_covers_its_code_range() {
        assert_eq!(codes::<Gender>(), vec![0, 1]);
        assert_eq!(codes::<YesNo>(), vec![0, 1]);
        assert_eq!(codes::<VegetableIntake>(), vec![0, 1, 2]);
        assert_eq!(codes::<Frequency>(), vec![0, 1, 2, 3]);
        assert_eq!(codes::<ActivityFrequency>(), vec![0, 1, 2, 3]);
        assert_eq!(codes::<Transport>(), vec![0, 1, 2, 3, 4]);

        let enc = encoder();
        let mut raw = sample_answer();
        for &transport in Transport::ALL {
            raw.transport = transport;
            let row = enc.encode(&raw).expect("encode");
            assert_eq!(
                row.get("meio_transporte_contumaz"),
                Some(f64::from(transport.code()))
            );
        }
    }

    #[test]
    fn test_sample_submission_row() {
        let row = encoder().encode_submission(&sample_form()).expect("encode");

        // gender, family history, FAVC, CAEC, SMOKE, SCC
        let binary: Vec<f64> = [
            "genero",
            "historico_familiar",
            "consome_alta_calorias_frequente",
            "alimentacao_entre_refeicoes",
            "fuma",
            "monitora_calorias",
        ]
        .iter()
        .map(|c| row.get(c).expect("column"))
        .collect();
        assert_eq!(binary, vec![1.0, 1.0, 0.0, 1.0, 0.0, 0.0]);

        // vegetables, activity, alcohol
        let ordinal: Vec<f64> = ["consumo_vegetais", "freq_atividade_fisica", "freq_consumo_alcool"]
            .iter()
            .map(|c| row.get(c).expect("column"))
            .collect();
        assert_eq!(ordinal, vec![1.0, 2.0, 1.0]);

        assert_eq!(row.get("meio_transporte_contumaz"), Some(0.0));
        assert_eq!(row.get("idade"), Some(30.0));
        assert_eq!(row.get("peso"), Some(70.0));
        assert_eq!(row.get("qtde_refeicoes_principais"), Some(3.0));
    }

    #[test]
    fn test_boundary_values_encode_unchanged() {
        let enc = encoder();
        let mut raw = sample_answer();

        raw.age = 10.0;
        raw.height = 1.20;
        raw.weight = 30.0;
        raw.meals = 1;
        raw.water = 0.0;
        raw.device_time = 0.0;
        assert!(raw.range_warnings().is_empty());
        let low = enc.encode(&raw).expect("encode");
        assert_eq!(low.get("idade"), Some(10.0));
        assert_eq!(low.get("qtde_agua_diaria"), Some(0.0));

        raw.age = 100.0;
        raw.height = 2.30;
        raw.weight = 200.0;
        raw.meals = 4;
        raw.water = 5.0;
        raw.device_time = 16.0;
        assert!(raw.range_warnings().is_empty());
        let high = enc.encode(&raw).expect("encode");
        assert_eq!(high.get("peso"), Some(200.0));
        assert_eq!(high.get("tempo_uso_dispositivos"), Some(16.0));
    }

    #[test]
    fn test_out_of_range_is_encoded_with_warning() {
        let mut raw = sample_answer();
        raw.age = 9.0;
        assert_eq!(raw.range_warnings().len(), 1);
        let row = encoder().encode(&raw).expect("encode");
        assert_eq!(row.get("idade"), Some(9.0));
    }

    fn assert_rejected(form: &FormSubmission, field: Field) {
        match encoder().encode_submission(form) {
            Err(EncodingError::UnknownCategoryValue { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected UnknownCategoryValue for {field}, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        let mut form = sample_form();
        form.gender = "Other".into();
        assert_rejected(&form, Field::Gender);

        let mut form = sample_form();
        form.transport = "Teleport".into();
        assert_rejected(&form, Field::Transport);

        let mut form = sample_form();
        form.alcohol = "Daily".into();
        assert_rejected(&form, Field::Alcohol);

        let mut form = sample_form();
        form.vegetables = "Frequently".into();
        assert_rejected(&form, Field::Vegetables);
    }

    #[test]
    fn test_unresolvable_order_is_rejected() {
        let order = FeatureOrder::new(vec!["bmi".into()]).expect("order");
        assert_eq!(
            FeatureEncoder::new(order, ExtraColumnPolicy::Drop).unwrap_err(),
            EncodingError::MissingFeatureColumn("bmi".into())
        );
    }

    #[test]
    fn test_partial_order_with_reject_policy() {
        let order = FeatureOrder::new(vec!["Gender".into(), "Age".into()]).expect("order");

        let dropping = FeatureEncoder::new(order.clone(), ExtraColumnPolicy::Drop).expect("encoder");
        assert_eq!(dropping.encode(&sample_answer()).expect("encode").len(), 2);

        let rejecting = FeatureEncoder::new(order, ExtraColumnPolicy::Reject).expect("encoder");
        assert!(matches!(
            rejecting.encode(&sample_answer()),
            Err(EncodingError::UnexpectedFeatureColumn(_))
        ));
    }

    #[test]
    fn test_scaler_standardizes_numeric_fields_only() {
        let scaler = StandardScaler::from_exported(ExportedScaler {
            columns: vec!["Age".into(), "Weight".into()],
            mean: vec![20.0, 60.0],
            scale: vec![5.0, 10.0],
        })
        .expect("scaler");
        let enc = FeatureEncoder::with_scaler(portuguese_order(), scaler, ExtraColumnPolicy::Drop)
            .expect("encoder");
        assert_eq!(enc.scaling(), NumericScaling::Enabled);

        let row = enc.encode(&sample_answer()).expect("encode");
        assert_eq!(row.get("idade"), Some(2.0));
        assert_eq!(row.get("peso"), Some(1.0));
        // not covered by the scaler
        assert_eq!(row.get("qtde_refeicoes_principais"), Some(3.0));
        assert_eq!(row.get("genero"), Some(1.0));
    }
}
