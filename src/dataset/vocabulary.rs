//! Crop label vocabulary
//!
//! The classifier's output index space. Labels are de-duplicated and sorted
//! alphabetically when fitted, so index order never depends on row order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::utils::error::{GardenError, Result};

/// Ordered list of crop names; index `i` is classifier output `i`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelVocabulary {
    classes: Vec<String>,
}

impl LabelVocabulary {
    /// Collect the distinct labels in sorted order
    pub fn fit<'a, I>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: Vec<String> = labels
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        if classes.is_empty() {
            return Err(GardenError::Dataset(
                "no crop labels found to build a vocabulary".to_string(),
            ));
        }

        Ok(Self { classes })
    }

    /// Rebuild from a persisted list, which must already be sorted and unique
    pub fn from_classes(classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            return Err(GardenError::Model("crop vocabulary is empty".to_string()));
        }
        if classes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(GardenError::Model(
                "crop vocabulary must be sorted and free of duplicates".to_string(),
            ));
        }
        Ok(Self { classes })
    }

    /// Index of a label
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes.binary_search_by(|c| c.as_str().cmp(label)).ok()
    }

    /// Label at an index
    pub fn decode(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    /// Number of classes; the classifier's output width
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}
