//! Analytics service: Descriptive statistics over the reference dataset.
//!
//! Computes the data behind the dashboard charts: class distribution,
//! histograms of body measurements, category-by-class counts and box-plot
//! summaries. Rendering is left to the caller.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::adapters::dataset::read_reference_csv;
use crate::adapters::{DatasetError, ReferenceRecord};
use crate::domain::ObesityLevel;
use crate::Result;

/// Bin count the dashboard uses for its histograms.
pub const DEFAULT_BINS: usize = 20;

/// Numeric columns of the reference dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum NumericColumn {
    Age,
    Height,
    Weight,
    #[serde(rename = "FCVC")]
    Fcvc,
    #[serde(rename = "NCP")]
    Ncp,
    #[serde(rename = "CH2O")]
    Ch2o,
    #[serde(rename = "FAF")]
    Faf,
    #[serde(rename = "TUE")]
    Tue,
}

impl NumericColumn {
    fn value(self, record: &ReferenceRecord) -> f64 {
        match self {
            Self::Age => record.age,
            Self::Height => record.height,
            Self::Weight => record.weight,
            Self::Fcvc => record.fcvc,
            Self::Ncp => record.ncp,
            Self::Ch2o => record.ch2o,
            Self::Faf => record.faf,
            Self::Tue => record.tue,
        }
    }
}

/// Categorical columns of the reference dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CategoryColumn {
    Gender,
    #[serde(rename = "family_history")]
    FamilyHistory,
    #[serde(rename = "FAVC")]
    Favc,
    #[serde(rename = "CAEC")]
    Caec,
    #[serde(rename = "SMOKE")]
    Smoke,
    #[serde(rename = "SCC")]
    Scc,
    #[serde(rename = "CALC")]
    Calc,
    #[serde(rename = "MTRANS")]
    Mtrans,
}

impl CategoryColumn {
    pub const ALL: [CategoryColumn; 8] = [
        Self::Gender,
        Self::FamilyHistory,
        Self::Favc,
        Self::Caec,
        Self::Smoke,
        Self::Scc,
        Self::Calc,
        Self::Mtrans,
    ];

    fn value(self, record: &ReferenceRecord) -> &str {
        match self {
            Self::Gender => &record.gender,
            Self::FamilyHistory => &record.family_history,
            Self::Favc => &record.favc,
            Self::Caec => &record.caec,
            Self::Smoke => &record.smoke,
            Self::Scc => &record.scc,
            Self::Calc => &record.calc,
            Self::Mtrans => &record.mtrans,
        }
    }
}

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

/// Box-plot statistics with linearly interpolated quartiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// `None` for an empty sample.
    #[must_use]
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);
        Some(Self {
            min: values[0],
            q1: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            q3: quantile(&values, 0.75),
            max: values[values.len() - 1],
        })
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Counts per category value, one slot per [`ObesityLevel`] in canonical order.
pub type Crosstab = BTreeMap<String, [usize; 7]>;

/// Everything the dashboard draws, in one serializable record.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceSummary {
    pub records: usize,
    pub class_distribution: Vec<(ObesityLevel, usize)>,
    pub histograms: BTreeMap<NumericColumn, Histogram>,
    pub crosstabs: BTreeMap<CategoryColumn, Crosstab>,
    pub box_plots: BTreeMap<NumericColumn, Vec<(ObesityLevel, Option<FiveNumberSummary>)>>,
}

/// Service for reference-dataset statistics.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    records: Vec<ReferenceRecord>,
}

impl AnalyticsService {
    /// # Errors
    /// Returns `Dataset(Empty)` for an empty record list.
    pub fn new(records: Vec<ReferenceRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(DatasetError::Empty.into());
        }
        Ok(Self { records })
    }

    /// Load the reference CSV at `path`.
    ///
    /// # Errors
    /// Returns `Dataset` if the file is missing, unreadable or malformed.
    pub fn from_csv(path: &Path) -> Result<Self> {
        Self::new(read_reference_csv(path)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record count per category, in canonical order.
    #[must_use]
    pub fn class_distribution(&self) -> Vec<(ObesityLevel, usize)> {
        ObesityLevel::ALL
            .iter()
            .map(|&level| {
                let count = self.records.iter().filter(|r| r.obesity == level).count();
                (level, count)
            })
            .collect()
    }

    /// Equal-width histogram of `column`. A `bins` of zero is treated as one;
    /// a constant column puts every record in the first bin.
    #[must_use]
    pub fn histogram(&self, column: NumericColumn, bins: usize) -> Histogram {
        let bins = bins.max(1);
        let values: Vec<f64> = self.records.iter().map(|r| column.value(r)).collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let bin_width = (max - min) / bins as f64;

        let mut counts = vec![0usize; bins];
        for v in values {
            let idx = if bin_width > 0.0 {
                (((v - min) / bin_width) as usize).min(bins - 1)
            } else {
                0
            };
            counts[idx] += 1;
        }

        Histogram {
            min,
            max,
            bin_width,
            counts,
        }
    }

    /// Records per (category value, class).
    #[must_use]
    pub fn crosstab(&self, column: CategoryColumn) -> Crosstab {
        let mut table = Crosstab::new();
        for record in &self.records {
            let row = table
                .entry(column.value(record).to_string())
                .or_insert([0; 7]);
            row[record.obesity.ordinal()] += 1;
        }
        table
    }

    /// Five-number summary of `column` for each class, in canonical order.
    /// Classes with no records get `None`.
    #[must_use]
    pub fn five_number_summary(
        &self,
        column: NumericColumn,
    ) -> Vec<(ObesityLevel, Option<FiveNumberSummary>)> {
        ObesityLevel::ALL
            .iter()
            .map(|&level| {
                let values = self
                    .records
                    .iter()
                    .filter(|r| r.obesity == level)
                    .map(|r| column.value(r))
                    .collect();
                (level, FiveNumberSummary::from_values(values))
            })
            .collect()
    }

    /// The full dashboard data set.
    #[must_use]
    pub fn summary(&self) -> ReferenceSummary {
        tracing::debug!("Summarizing {} reference records", self.records.len());

        let histograms = [NumericColumn::Height, NumericColumn::Weight, NumericColumn::Age]
            .into_iter()
            .map(|c| (c, self.histogram(c, DEFAULT_BINS)))
            .collect();
        let crosstabs = CategoryColumn::ALL
            .into_iter()
            .map(|c| (c, self.crosstab(c)))
            .collect();
        let box_plots = [NumericColumn::Fcvc, NumericColumn::Faf, NumericColumn::Ch2o]
            .into_iter()
            .map(|c| (c, self.five_number_summary(c)))
            .collect();

        ReferenceSummary {
            records: self.records.len(),
            class_distribution: self.class_distribution(),
            histograms,
            crosstabs,
            box_plots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::dataset::parse_reference_csv;
    use crate::testing::REFERENCE_CSV;
    use crate::PredictorError;
    use tempfile::tempdir;

    fn service() -> AnalyticsService {
        AnalyticsService::new(parse_reference_csv(REFERENCE_CSV.as_bytes()).expect("parse"))
            .expect("service")
    }

    fn count(dist: &[(ObesityLevel, usize)], level: ObesityLevel) -> usize {
        dist.iter().find(|(l, _)| *l == level).map_or(0, |(_, c)| *c)
    }

    #[test]
    fn test_class_distribution() {
        let dist = service().class_distribution();
        assert_eq!(dist.len(), 7);
        assert_eq!(dist[0].0, ObesityLevel::InsufficientWeight);
        assert_eq!(count(&dist, ObesityLevel::NormalWeight), 4);
        assert_eq!(count(&dist, ObesityLevel::OverweightLevelI), 1);
        assert_eq!(count(&dist, ObesityLevel::OverweightLevelII), 1);
        assert_eq!(dist.iter().map(|(_, c)| c).sum::<usize>(), 6);
    }

    #[test]
    fn test_histogram_bins() {
        // ages 21, 21, 23, 27, 22, 29
        let hist = service().histogram(NumericColumn::Age, 4);
        assert_eq!(hist.min, 21.0);
        assert_eq!(hist.max, 29.0);
        assert_eq!(hist.bin_width, 2.0);
        assert_eq!(hist.counts, vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_histogram_constant_column() {
        // every NCP except one is 3; restrict to a constant subset
        let records: Vec<ReferenceRecord> = parse_reference_csv(REFERENCE_CSV.as_bytes())
            .expect("parse")
            .into_iter()
            .filter(|r| r.ncp == 3.0)
            .collect();
        let hist = AnalyticsService::new(records)
            .expect("service")
            .histogram(NumericColumn::Ncp, 0);
        assert_eq!(hist.counts, vec![5]);
        assert_eq!(hist.bin_width, 0.0);
    }

    #[test]
    fn test_crosstab_gender() {
        let table = service().crosstab(CategoryColumn::Gender);
        let normal = ObesityLevel::NormalWeight.ordinal();
        assert_eq!(table["Female"][normal], 2);
        assert_eq!(table["Male"][normal], 2);
        assert_eq!(table["Male"].iter().sum::<usize>(), 4);
    }

    #[test]
    fn test_five_number_summary() {
        let summaries = service().five_number_summary(NumericColumn::Fcvc);
        let normal = summaries
            .iter()
            .find(|(l, _)| *l == ObesityLevel::NormalWeight)
            .and_then(|(_, s)| *s)
            .expect("summary");
        // values 2, 3, 2, 2
        assert_eq!(normal.min, 2.0);
        assert_eq!(normal.q1, 2.0);
        assert_eq!(normal.median, 2.0);
        assert!((normal.q3 - 2.25).abs() < 1e-12);
        assert_eq!(normal.max, 3.0);

        let insufficient = summaries
            .iter()
            .find(|(l, _)| *l == ObesityLevel::InsufficientWeight)
            .map(|(_, s)| *s);
        assert_eq!(insufficient, Some(None));
    }

    #[test]
    fn test_summary_serializes() {
        let summary = service().summary();
        assert_eq!(summary.records, 6);
        assert_eq!(summary.histograms.len(), 3);
        assert_eq!(summary.crosstabs.len(), 8);
        assert_eq!(summary.box_plots.len(), 3);
        assert_eq!(summary.histograms[&NumericColumn::Age].counts.len(), DEFAULT_BINS);

        let json = serde_json::to_value(&summary).expect("serialize");
        assert!(json["crosstabs"]["MTRANS"]["Walking"].is_array());
        assert!(json["histograms"]["Weight"].is_object());
    }

    #[test]
    fn test_from_csv_missing_file() {
        let temp = tempdir().expect("tempdir");
        let err = AnalyticsService::from_csv(&temp.path().join("Obesity.csv")).unwrap_err();
        assert!(matches!(err, PredictorError::Dataset(DatasetError::NotFound(_))));
    }
}
