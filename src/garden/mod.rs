//! Garden simulation rules driven by the two models
//!
//! This module provides:
//! - Plant state, care actions and the growth tick
//! - Weather readings and their default
//! - The crop emoji table
//! - Crop recommendation requests built from soil and weather readings

pub mod emoji;
pub mod grid;
pub mod plant;
pub mod weather;

// Re-export main types for convenience
pub use emoji::{crop_emoji, FALLBACK_EMOJI};
pub use grid::{update_growth, Garden};
pub use plant::{apply_growth_tick, environmental_sample, PlantAction, PlantState, GRID_SIZE};
pub use weather::WeatherReading;

use burn::tensor::backend::Backend;
use serde::{Deserialize, Serialize};

use crate::artifact::{CropArtifact, GrowthArtifact};
use crate::dataset::Sample;
use crate::inference::{predict_growth, recommend_crops};
use crate::utils::error::Result;

/// Anything that maps an environmental sample to a growth increment in (0, 1)
pub trait GrowthModel {
    fn predict_growth(&self, sample: &Sample) -> Result<f64>;
}

impl<B: Backend> GrowthModel for GrowthArtifact<B> {
    fn predict_growth(&self, sample: &Sample) -> Result<f64> {
        predict_growth(self, sample)
    }
}

fn default_nutrient() -> f64 {
    50.0
}

fn default_ph() -> f64 {
    6.5
}

/// Conditions for which crops are recommended
///
/// Soil readings are optional and default to mid-range values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendationRequest {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    #[serde(default = "default_nutrient")]
    pub soil_n: f64,
    #[serde(default = "default_nutrient")]
    pub soil_p: f64,
    #[serde(default = "default_nutrient")]
    pub soil_k: f64,
    #[serde(default = "default_ph")]
    pub soil_ph: f64,
}

impl CropRecommendationRequest {
    /// Request with default soil readings
    pub fn new(temperature: f64, humidity: f64, rainfall: f64) -> Self {
        Self {
            temperature,
            humidity,
            rainfall,
            soil_n: default_nutrient(),
            soil_p: default_nutrient(),
            soil_k: default_nutrient(),
            soil_ph: default_ph(),
        }
    }

    pub fn to_sample(&self) -> Sample {
        Sample {
            nitrogen: self.soil_n,
            phosphorus: self.soil_p,
            potassium: self.soil_k,
            temperature: self.temperature,
            humidity: self.humidity,
            ph: self.soil_ph,
            rainfall: self.rainfall,
        }
    }
}

/// A recommendation decorated for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropSuggestion {
    pub crop: String,
    pub suitability: f64,
    pub emoji: String,
}

/// Ranked crops for a request, each with its emoji
pub fn suggest_crops<B: Backend>(
    artifact: &CropArtifact<B>,
    request: &CropRecommendationRequest,
    top_k: usize,
) -> Result<Vec<CropSuggestion>> {
    let recommendations = recommend_crops(artifact, &request.to_sample(), top_k)?;
    Ok(recommendations
        .into_iter()
        .map(|rec| CropSuggestion {
            emoji: crop_emoji(&rec.crop).to_string(),
            crop: rec.crop,
            suitability: rec.suitability,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{LabelVocabulary, StandardScaler};
    use crate::model::{CropClassifier, CropClassifierConfig};
    use burn_ndarray::NdArray;

    #[test]
    fn test_request_defaults_from_json() {
        let json = r#"{"temperature": 22.0, "humidity": 75.0, "rainfall": 180.0}"#;
        let request: CropRecommendationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request, CropRecommendationRequest::new(22.0, 75.0, 180.0));
        assert_eq!(request.to_sample().to_row(), [50.0, 50.0, 50.0, 22.0, 75.0, 6.5, 180.0]);
    }

    #[test]
    fn test_suggestions_carry_emoji() {
        let device = Default::default();
        let vocabulary = LabelVocabulary::fit(["maize", "rice", "tomato"]).unwrap();
        let artifact = CropArtifact::<NdArray> {
            model: CropClassifier::new(&CropClassifierConfig::new(3), &device),
            scaler: StandardScaler {
                mean: [0.0; 7],
                std: [1.0; 7],
            },
            vocabulary,
        };

        let suggestions =
            suggest_crops(&artifact, &CropRecommendationRequest::new(25.0, 60.0, 100.0), 8).unwrap();
        assert_eq!(suggestions.len(), 3);
        for s in &suggestions {
            assert_eq!(s.emoji, crop_emoji(&s.crop));
        }
    }
}
