//! Inference Predictor Module
//!
//! Runs the loaded artifacts on single samples. Artifacts hold their models
//! on a plain (non-autodiff) backend, so dropout is inactive and batch norm
//! uses its running statistics.

use std::cmp::Ordering;

use burn::tensor::backend::Backend;
use serde::{Deserialize, Serialize};

use crate::artifact::{CropArtifact, GrowthArtifact};
use crate::dataset::features::rows_to_tensor;
use crate::dataset::{FeatureRow, Sample, StandardScaler};
use crate::utils::error::{GardenError, Result};

/// Largest f64 strictly below 1.0
const ONE_BELOW: f64 = 1.0 - f64::EPSILON / 2.0;

/// One ranked crop suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendation {
    /// Crop name from the label vocabulary
    pub crop: String,

    /// Softmax probability scaled to a percentage
    pub suitability: f64,
}

/// Predict the growth increment for one sample
///
/// Returns a value strictly inside (0, 1). The sigmoid is evaluated in f64
/// on the network's raw output.
pub fn predict_growth<B: Backend>(artifact: &GrowthArtifact<B>, sample: &Sample) -> Result<f64> {
    let row = scaled_row(&artifact.scaler, sample)?;
    let device = artifact.model.fc1.weight.device();

    let input = rows_to_tensor::<B>(&[row], &device);
    let logit = artifact
        .model
        .forward_logit(input)
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| GardenError::Inference(format!("Failed to read growth output: {:?}", e)))?;

    let z = logit
        .first()
        .copied()
        .ok_or_else(|| GardenError::Inference("growth model returned no output".to_string()))?
        as f64;

    Ok(sigmoid(z))
}

/// Rank the vocabulary crops for one sample
///
/// Returns `min(top_k, C)` recommendations ordered by non-increasing
/// suitability. Equal probabilities keep vocabulary order.
pub fn recommend_crops<B: Backend>(
    artifact: &CropArtifact<B>,
    sample: &Sample,
    top_k: usize,
) -> Result<Vec<CropRecommendation>> {
    let row = scaled_row(&artifact.scaler, sample)?;
    let device = artifact.model.fc1.weight.device();

    let input = rows_to_tensor::<B>(&[row], &device);
    let probabilities = artifact
        .model
        .forward_softmax(input)
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| GardenError::Inference(format!("Failed to read crop output: {:?}", e)))?;

    if probabilities.len() != artifact.vocabulary.len() {
        return Err(GardenError::Inference(format!(
            "crop model returned {} scores for {} classes",
            probabilities.len(),
            artifact.vocabulary.len()
        )));
    }

    let ranked = rank_descending(&probabilities);

    ranked
        .into_iter()
        .take(top_k)
        .map(|index| {
            let crop = artifact.vocabulary.decode(index).ok_or_else(|| {
                GardenError::Inference(format!("class index {} outside the vocabulary", index))
            })?;
            Ok(CropRecommendation {
                crop: crop.to_string(),
                suitability: probabilities[index] as f64 * 100.0,
            })
        })
        .collect()
}

fn scaled_row(scaler: &StandardScaler, sample: &Sample) -> Result<FeatureRow> {
    sample.validate()?;
    Ok(scaler.transform(&sample.to_row()))
}

fn sigmoid(z: f64) -> f64 {
    (1.0 / (1.0 + (-z).exp())).clamp(f64::MIN_POSITIVE, ONE_BELOW)
}

/// Indices sorted by descending score; the sort is stable
fn rank_descending(scores: &[f32]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));
    indices
}
