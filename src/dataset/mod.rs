//! Dataset module for the crop recommendation table
//!
//! This module provides:
//! - Loading the crop CSV from disk into a row table
//! - The seven-feature pipeline and the synthetic growth target
//! - The standard scaler fitted on training features
//! - The sorted crop label vocabulary used by the classifier

pub mod features;
pub mod loader;
pub mod scaler;
pub mod vocabulary;

// Re-export main types for convenience
pub use features::{growth_target, FeatureRow, Sample, FEATURE_COUNT, FEATURE_NAMES};
pub use loader::{ensure_dataset, load_dataset, CropRecord, CropTable, DatasetStats};
pub use scaler::StandardScaler;
pub use vocabulary::LabelVocabulary;

/// File name of the local dataset copy
pub const DATASET_FILE_NAME: &str = "Crop_recommendation.csv";
