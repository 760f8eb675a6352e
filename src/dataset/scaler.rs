//! Standard scaler fitted on the training features
//!
//! Stores per-feature mean and population standard deviation. The same
//! fitted instance is persisted next to the model weights and reused for
//! every inference against that model.

use serde::{Deserialize, Serialize};

use crate::dataset::features::{FeatureRow, FEATURE_COUNT};
use crate::utils::error::{GardenError, Result};

/// Per-feature affine transform `(x - mean) / std`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: [f64; FEATURE_COUNT],
    pub std: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// Fit mean and standard deviation over the training rows
    ///
    /// Columns with zero variance get a unit scale so they map to zero
    /// instead of dividing by zero.
    pub fn fit(rows: &[FeatureRow]) -> Result<Self> {
        if rows.is_empty() {
            return Err(GardenError::Dataset(
                "cannot fit a scaler on an empty feature matrix".to_string(),
            ));
        }

        let n = rows.len() as f64;
        let mut mean = [0.0; FEATURE_COUNT];
        for row in rows {
            for (acc, value) in mean.iter_mut().zip(row) {
                *acc += value;
            }
        }
        for m in mean.iter_mut() {
            *m /= n;
        }

        let mut std = [0.0; FEATURE_COUNT];
        for row in rows {
            for ((acc, value), m) in std.iter_mut().zip(row).zip(&mean) {
                *acc += (value - m).powi(2);
            }
        }
        for s in std.iter_mut() {
            *s = (*s / n).sqrt();
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        Ok(Self { mean, std })
    }

    /// Scale a single row
    pub fn transform(&self, row: &FeatureRow) -> FeatureRow {
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            out[i] = (row[i] - self.mean[i]) / self.std[i];
        }
        out
    }

    /// Scale every row
    pub fn transform_all(&self, rows: &[FeatureRow]) -> Vec<FeatureRow> {
        rows.iter().map(|row| self.transform(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<FeatureRow> {
        vec![
            [90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9],
            [85.0, 58.0, 41.0, 21.7, 80.3, 7.0, 226.6],
            [60.0, 55.0, 44.0, 23.0, 82.3, 7.8, 263.9],
            [74.0, 35.0, 40.0, 26.4, 80.1, 6.9, 242.8],
        ]
    }

    #[test]
    fn test_mean_maps_to_zero() {
        let scaler = StandardScaler::fit(&rows()).unwrap();
        let scaled = scaler.transform(&scaler.mean);
        assert!(scaled.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_scaled_columns_are_standardized() {
        let data = rows();
        let scaler = StandardScaler::fit(&data).unwrap();
        let scaled = scaler.transform_all(&data);

        for col in 0..FEATURE_COUNT {
            let mean: f64 = scaled.iter().map(|r| r[col]).sum::<f64>() / data.len() as f64;
            let var: f64 =
                scaled.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / data.len() as f64;
            assert!(mean.abs() < 1e-9, "column {} mean {}", col, mean);
            assert!((var - 1.0).abs() < 1e-9, "column {} var {}", col, var);
        }
    }

    #[test]
    fn test_constant_column_maps_to_zero() {
        let data = vec![[1.0; FEATURE_COUNT], [1.0; FEATURE_COUNT]];
        let scaler = StandardScaler::fit(&data).unwrap();
        assert_eq!(scaler.std, [1.0; FEATURE_COUNT]);
        assert_eq!(scaler.transform(&[1.0; FEATURE_COUNT]), [0.0; FEATURE_COUNT]);
    }

    #[test]
    fn test_fit_rejects_empty() {
        assert!(StandardScaler::fit(&[]).is_err());
    }

    #[test]
    fn test_json_persistence_preserves_values() {
        let scaler = StandardScaler::fit(&rows()).unwrap();
        let json = serde_json::to_string(&scaler).unwrap();
        let restored: StandardScaler = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, scaler);
    }
}
