//! Crop dataset loading
//!
//! Reads the crop recommendation CSV (columns
//! `N,P,K,temperature,humidity,ph,rainfall,label`) into an in-memory table.
//! Fetching the file from its remote archive is handled outside this crate;
//! here a missing file is a fatal precondition failure.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dataset::features::{FeatureRow, Sample};
use crate::dataset::vocabulary::LabelVocabulary;
use crate::utils::error::{GardenError, Result};

/// One row of the crop dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecord {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
    /// Crop name; only required for classifier training
    #[serde(default)]
    pub label: Option<String>,
}

impl CropRecord {
    /// The seven model features of this row
    pub fn sample(&self) -> Sample {
        Sample {
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            temperature: self.temperature,
            humidity: self.humidity,
            ph: self.ph,
            rainfall: self.rainfall,
        }
    }
}

/// Row-oriented crop table
#[derive(Debug, Clone, Default)]
pub struct CropTable {
    pub records: Vec<CropRecord>,
}

impl CropTable {
    pub fn new(records: Vec<CropRecord>) -> Self {
        Self { records }
    }

    /// Load the table from a CSV file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GardenError::DatasetUnavailable(path.to_path_buf()));
        }

        let reader = csv::Reader::from_path(path)?;
        let table = Self::from_csv(reader)?;
        info!("Loaded {} rows from {:?}", table.len(), path);
        Ok(table)
    }

    /// Load the table from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let records = reader
            .deserialize::<CropRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!("Parsed {} crop records", records.len());
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Feature rows in `FEATURE_NAMES` order
    pub fn feature_rows(&self) -> Vec<FeatureRow> {
        self.records.iter().map(|r| r.sample().to_row()).collect()
    }

    /// Synthetic growth label of every row
    pub fn growth_targets(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.sample().growth_target()).collect()
    }

    /// Crop labels of every row; fails on the first unlabeled row
    pub fn labels(&self) -> Result<Vec<&str>> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                r.label.as_deref().ok_or_else(|| {
                    GardenError::Dataset(format!("row {} has no crop label", i + 1))
                })
            })
            .collect()
    }

    /// Encode every row's label against `vocabulary`
    pub fn encoded_labels(&self, vocabulary: &LabelVocabulary) -> Result<Vec<usize>> {
        self.labels()?
            .into_iter()
            .map(|label| {
                vocabulary.encode(label).ok_or_else(|| {
                    GardenError::Dataset(format!("label '{}' is not in the vocabulary", label))
                })
            })
            .collect()
    }

    /// Summary statistics for logging
    pub fn stats(&self) -> DatasetStats {
        let mut label_counts = BTreeMap::new();
        for label in self.records.iter().filter_map(|r| r.label.as_deref()) {
            *label_counts.entry(label.to_string()).or_insert(0) += 1;
        }
        DatasetStats {
            total_rows: self.len(),
            label_counts,
        }
    }
}

/// Row and label counts of a loaded table
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatasetStats {
    pub total_rows: usize,
    pub label_counts: BTreeMap<String, usize>,
}

impl DatasetStats {
    pub fn num_labels(&self) -> usize {
        self.label_counts.len()
    }

    /// Log the statistics
    pub fn log(&self) {
        info!(
            "Dataset: {} rows, {} distinct crop labels",
            self.total_rows,
            self.num_labels()
        );
        for (label, count) in &self.label_counts {
            debug!("  {:<14} {}", label, count);
        }
    }
}

/// Return the dataset path if the local copy exists
pub fn ensure_dataset(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(GardenError::DatasetUnavailable(path.to_path_buf()))
    }
}

/// Ensure the dataset exists and load it
pub fn load_dataset(path: impl AsRef<Path>) -> Result<CropTable> {
    let path = ensure_dataset(path)?;
    CropTable::from_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "N,P,K,temperature,humidity,ph,rainfall,label
90,42,43,20.87974371,82.00274423,6.502985292,202.9355362,rice
85,58,41,21.77046169,80.31964408,7.038096361,226.6555374,rice
71,54,16,22.61359953,63.69070564,5.749914421,87.75953857,maize
40,72,77,17.02498456,16.98861173,7.485996067,88.55123143,chickpea
";

    #[test]
    fn test_from_reader_parses_rows() {
        let table = CropTable::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.records[0].nitrogen, 90.0);
        assert_eq!(table.records[3].label.as_deref(), Some("chickpea"));
    }

    #[test]
    fn test_feature_rows_order() {
        let table = CropTable::from_reader(CSV.as_bytes()).unwrap();
        let rows = table.feature_rows();
        assert_eq!(rows[2][0], 71.0);
        assert_eq!(rows[2][2], 16.0);
        assert_eq!(rows[2][5], 5.749914421);
    }

    #[test]
    fn test_encoded_labels_follow_sorted_vocabulary() {
        let table = CropTable::from_reader(CSV.as_bytes()).unwrap();
        let vocab = LabelVocabulary::fit(table.labels().unwrap()).unwrap();
        assert_eq!(vocab.classes(), &["chickpea", "maize", "rice"]);
        assert_eq!(table.encoded_labels(&vocab).unwrap(), vec![2, 2, 1, 0]);
    }

    #[test]
    fn test_unlabeled_table_supports_growth_only() {
        let csv = "N,P,K,temperature,humidity,ph,rainfall\n140,145,205,45,100,6.5,100\n";
        let table = CropTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.growth_targets(), vec![1.0]);
        assert!(table.labels().is_err());
    }

    #[test]
    fn test_malformed_row_is_csv_error() {
        let csv = "N,P,K,temperature,humidity,ph,rainfall,label\n90,abc,43,20,82,6.5,202,rice\n";
        let err = CropTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, GardenError::Csv(_)));
    }

    #[test]
    fn test_missing_dataset_is_unavailable() {
        let err = load_dataset("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, GardenError::DatasetUnavailable(_)));
    }

    #[test]
    fn test_stats_counts_labels() {
        let table = CropTable::from_reader(CSV.as_bytes()).unwrap();
        let stats = table.stats();
        assert_eq!(stats.total_rows, 4);
        assert_eq!(stats.num_labels(), 3);
        assert_eq!(stats.label_counts["rice"], 2);
    }
}
