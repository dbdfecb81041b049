//! Feature rows and the column order fixed at training time.

use serde::{Deserialize, Serialize};

use super::encoding::EncodingError;
use super::field::Field;

/// What to do with assembled columns that `feature_order` does not list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraColumnPolicy {
    /// Drop them from the row.
    #[default]
    Drop,
    /// Fail with `UnexpectedFeatureColumn`.
    Reject,
}

/// The column-name sequence the model was fit on.
///
/// Names are kept exactly as the artifact spells them; each must resolve to
/// a [`Field`] through the alias table before a row can be selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureOrder {
    columns: Vec<String>,
}

impl FeatureOrder {
    /// # Errors
    /// Returns `EmptyFeatureOrder` or `DuplicateFeatureColumn`.
    pub fn new(columns: Vec<String>) -> Result<Self, EncodingError> {
        if columns.is_empty() {
            return Err(EncodingError::EmptyFeatureOrder);
        }
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(EncodingError::DuplicateFeatureColumn(name.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// The canonical order, using canonical names.
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            columns: Field::ALL.iter().map(|f| f.name().to_string()).collect(),
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Resolve every column to its field.
    ///
    /// Two names resolving to the same field (e.g. `Age` and `idade`) are
    /// rejected as duplicates.
    ///
    /// # Errors
    /// Returns `MissingFeatureColumn` for a name no field answers to.
    pub fn resolve(&self) -> Result<Vec<Field>, EncodingError> {
        let mut fields = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let field = Field::from_column_name(name)
                .ok_or_else(|| EncodingError::MissingFeatureColumn(name.clone()))?;
            if fields.contains(&field) {
                return Err(EncodingError::DuplicateFeatureColumn(name.clone()));
            }
            fields.push(field);
        }
        Ok(fields)
    }
}

impl TryFrom<Vec<String>> for FeatureOrder {
    type Error = EncodingError;

    fn try_from(columns: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<FeatureOrder> for Vec<String> {
    fn from(order: FeatureOrder) -> Self {
        order.columns
    }
}

/// One numeric row with named columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Build a row from `(column, value)` pairs.
    #[must_use]
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (columns, values) = pairs.into_iter().map(|(c, v)| (c.into(), v)).unzip();
        Self { columns, values }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the column named `name`, resolving aliases.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        let wanted = Field::from_column_name(name);
        self.columns
            .iter()
            .position(|c| c == name || (wanted.is_some() && Field::from_column_name(c) == wanted))
            .map(|i| self.values[i])
    }

    /// Reorder and select columns to match `order`.
    ///
    /// Each name in `order` is resolved through the alias table against this
    /// row's columns; the output uses the names from `order`.
    ///
    /// # Errors
    /// - `MissingFeatureColumn` if a listed column is not in this row.
    /// - `UnexpectedFeatureColumn` if this row carries a column the order does
    ///   not list and `policy` is `Reject`.
    pub fn select(
        &self,
        order: &FeatureOrder,
        policy: ExtraColumnPolicy,
    ) -> Result<FeatureVector, EncodingError> {
        let row_fields: Vec<Option<Field>> =
            self.columns.iter().map(|c| Field::from_column_name(c)).collect();

        let mut used = vec![false; self.columns.len()];
        let mut columns = Vec::with_capacity(order.len());
        let mut values = Vec::with_capacity(order.len());

        for name in order.columns() {
            let wanted = Field::from_column_name(name);
            let idx = self
                .columns
                .iter()
                .zip(&row_fields)
                .position(|(c, f)| c == name || (wanted.is_some() && *f == wanted))
                .ok_or_else(|| EncodingError::MissingFeatureColumn(name.clone()))?;
            used[idx] = true;
            columns.push(name.clone());
            values.push(self.values[idx]);
        }

        for (column, _) in self.columns.iter().zip(&used).filter(|(_, used)| !**used) {
            match policy {
                ExtraColumnPolicy::Reject => {
                    return Err(EncodingError::UnexpectedFeatureColumn(column.clone()));
                }
                ExtraColumnPolicy::Drop => {
                    tracing::debug!("Dropping column {column} not listed in feature order");
                }
            }
        }

        Ok(FeatureVector { columns, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn row() -> FeatureVector {
        FeatureVector::from_pairs([("gender", 1.0), ("age", 30.0), ("transport", 2.0)])
    }

    #[test]
    fn test_order_rejects_duplicates_and_empty() {
        assert_eq!(
            FeatureOrder::new(names(&["age", "age"])),
            Err(EncodingError::DuplicateFeatureColumn("age".into()))
        );
        assert_eq!(FeatureOrder::new(vec![]), Err(EncodingError::EmptyFeatureOrder));
    }

    #[test]
    fn test_resolve_detects_alias_duplicates() {
        let order = FeatureOrder::new(names(&["Age", "idade"])).unwrap();
        assert_eq!(
            order.resolve(),
            Err(EncodingError::DuplicateFeatureColumn("idade".into()))
        );
    }

    #[test]
    fn test_resolve_unknown_name() {
        let order = FeatureOrder::new(names(&["age", "bmi"])).unwrap();
        assert_eq!(
            order.resolve(),
            Err(EncodingError::MissingFeatureColumn("bmi".into()))
        );
    }

    #[test]
    fn test_select_reorders_and_renames() {
        let order = FeatureOrder::new(names(&["MTRANS", "Gender", "idade"])).unwrap();
        let selected = row().select(&order, ExtraColumnPolicy::Reject).unwrap();
        assert_eq!(selected.columns(), order.columns());
        assert_eq!(selected.values(), &[2.0, 1.0, 30.0]);
    }

    #[test]
    fn test_select_missing_column() {
        let order = FeatureOrder::new(names(&["gender", "weight"])).unwrap();
        assert_eq!(
            row().select(&order, ExtraColumnPolicy::Drop),
            Err(EncodingError::MissingFeatureColumn("weight".into()))
        );
    }

    #[test]
    fn test_select_extra_column_policy() {
        let order = FeatureOrder::new(names(&["gender", "age"])).unwrap();

        let dropped = row().select(&order, ExtraColumnPolicy::Drop).unwrap();
        assert_eq!(dropped.len(), 2);

        assert_eq!(
            row().select(&order, ExtraColumnPolicy::Reject),
            Err(EncodingError::UnexpectedFeatureColumn("transport".into()))
        );
    }

    #[test]
    fn test_get_resolves_aliases() {
        let row = row();
        assert_eq!(row.get("Age"), Some(30.0));
        assert_eq!(row.get("transport"), Some(2.0));
        assert_eq!(row.get("weight"), None);
    }

    #[test]
    fn test_feature_order_json() {
        let order: FeatureOrder = serde_json::from_str(r#"["Gender","Age"]"#).unwrap();
        assert_eq!(order.len(), 2);
        assert!(serde_json::from_str::<FeatureOrder>("[]").is_err());
    }
}
