//! Feature pipeline
//!
//! Selects the seven numeric columns shared by both models, derives the
//! synthetic growth target and converts feature rows into Burn tensors.

use burn::tensor::{backend::Backend, Tensor, TensorData};
use serde::{Deserialize, Serialize};

use crate::utils::error::{GardenError, Result};

/// Number of model input features
pub const FEATURE_COUNT: usize = 7;

/// Column names, in model input order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// One row of model features, in `FEATURE_NAMES` order
pub type FeatureRow = [f64; FEATURE_COUNT];

/// Soil and weather readings fed to both models
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl Sample {
    /// Build a sample from values in `FEATURE_NAMES` order
    ///
    /// Fails when the slice does not hold exactly seven values or any value
    /// is not finite. Values are never clamped or imputed.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != FEATURE_COUNT {
            return Err(GardenError::InvalidInput(format!(
                "expected {} features ({}), got {}",
                FEATURE_COUNT,
                FEATURE_NAMES.join(", "),
                values.len()
            )));
        }

        let sample = Self {
            nitrogen: values[0],
            phosphorus: values[1],
            potassium: values[2],
            temperature: values[3],
            humidity: values[4],
            ph: values[5],
            rainfall: values[6],
        };
        sample.validate()?;
        Ok(sample)
    }

    /// Features in model input order
    pub fn to_row(&self) -> FeatureRow {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    /// Reject NaN and infinite readings
    pub fn validate(&self) -> Result<()> {
        for (name, value) in FEATURE_NAMES.iter().zip(self.to_row()) {
            if !value.is_finite() {
                return Err(GardenError::InvalidInput(format!(
                    "feature '{}' must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Synthetic growth label for this sample, see [`growth_target`]
    pub fn growth_target(&self) -> f64 {
        growth_target(self)
    }
}

/// Weighted growth label derived from N, P, K, humidity and temperature.
///
/// Each term reaches 0.2 at the top of the dataset's natural range, so the
/// result is 1.0 for N=140, P=145, K=205, humidity=100, temperature=45. The
/// value is not bounded; readings outside those ranges leave [0, 1].
pub fn growth_target(sample: &Sample) -> f64 {
    (sample.nitrogen / 140.0) * 0.2
        + (sample.phosphorus / 145.0) * 0.2
        + (sample.potassium / 205.0) * 0.2
        + (sample.humidity / 100.0) * 0.2
        + ((sample.temperature - 10.0) / 35.0) * 0.2
}

/// Stack feature rows into a `[rows, FEATURE_COUNT]` float tensor
pub fn rows_to_tensor<B: Backend>(rows: &[FeatureRow], device: &B::Device) -> Tensor<B, 2> {
    let data: Vec<f32> = rows
        .iter()
        .flat_map(|row| row.iter().map(|&v| v as f32))
        .collect();

    Tensor::<B, 2>::from_floats(TensorData::new(data, [rows.len(), FEATURE_COUNT]), device)
}

/// Column vector `[rows, 1]` of regression targets
pub fn targets_to_tensor<B: Backend>(targets: &[f64], device: &B::Device) -> Tensor<B, 2> {
    let data: Vec<f32> = targets.iter().map(|&v| v as f32).collect();
    Tensor::<B, 2>::from_floats(TensorData::new(data, [targets.len(), 1]), device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray;

    fn sample(n: f64, p: f64, k: f64, temperature: f64, humidity: f64) -> Sample {
        Sample {
            nitrogen: n,
            phosphorus: p,
            potassium: k,
            temperature,
            humidity,
            ph: 6.5,
            rainfall: 100.0,
        }
    }

    #[test]
    fn test_growth_target_maxes_at_one() {
        let s = sample(140.0, 145.0, 205.0, 45.0, 100.0);
        assert_eq!(growth_target(&s), 1.0);
    }

    #[test]
    fn test_growth_target_zero_point() {
        let s = sample(0.0, 0.0, 0.0, 10.0, 0.0);
        assert_eq!(growth_target(&s), 0.0);
    }

    #[test]
    fn test_growth_target_is_unbounded() {
        assert!(sample(280.0, 145.0, 205.0, 45.0, 100.0).growth_target() > 1.0);
        assert!(sample(0.0, 0.0, 0.0, -20.0, 0.0).growth_target() < 0.0);
    }

    #[test]
    fn test_growth_target_ignores_ph_and_rainfall() {
        let mut a = sample(50.0, 50.0, 50.0, 25.0, 60.0);
        let b = a;
        a.ph = 3.0;
        a.rainfall = 900.0;
        assert_eq!(a.growth_target(), b.growth_target());
    }

    #[test]
    fn test_from_slice_order() {
        let s = Sample::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
        assert_eq!(s.nitrogen, 1.0);
        assert_eq!(s.temperature, 4.0);
        assert_eq!(s.rainfall, 7.0);
        assert_eq!(s.to_row(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_from_slice_rejects_missing_feature() {
        let err = Sample::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap_err();
        assert!(matches!(err, GardenError::InvalidInput(_)));
    }

    #[test]
    fn test_from_slice_rejects_non_finite() {
        assert!(Sample::from_slice(&[1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0, 7.0]).is_err());
        assert!(Sample::from_slice(&[1.0, 2.0, 3.0, f64::INFINITY, 5.0, 6.0, 7.0]).is_err());
    }

    #[test]
    fn test_rows_to_tensor_shape() {
        let device = Default::default();
        let rows = vec![[0.0; FEATURE_COUNT], [1.0; FEATURE_COUNT], [2.0; FEATURE_COUNT]];
        let tensor = rows_to_tensor::<TestBackend>(&rows, &device);
        assert_eq!(tensor.dims(), [3, FEATURE_COUNT]);

        let targets = targets_to_tensor::<TestBackend>(&[0.1, 0.2, 0.3], &device);
        assert_eq!(targets.dims(), [3, 1]);
    }
}
