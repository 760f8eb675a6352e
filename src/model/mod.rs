//! Model module for the two feed-forward networks built with Burn
//!
//! This module provides:
//! - `GrowthRegressor`: seven features to a growth increment in (0, 1)
//! - `CropClassifier`: seven features to one logit per vocabulary crop

pub mod crop;
pub mod growth;

// Re-export main types for convenience
pub use crop::{CropClassifier, CropClassifierConfig};
pub use growth::{GrowthRegressor, GrowthRegressorConfig};

