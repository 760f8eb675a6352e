//! Inference module for growth prediction and crop recommendation
//!
//! Both entry points are pure given a loaded artifact.

pub mod predictor;

// Re-export main types for convenience
pub use predictor::{predict_growth, recommend_crops, CropRecommendation};

/// Number of crops returned when the caller does not ask for a count
pub const DEFAULT_TOP_K: usize = 8;
