//! Configuration Module
//!
//! Directory layout and training hyperparameters. Stored as JSON so a
//! deployment can pin its settings next to the model artifacts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dataset::DATASET_FILE_NAME;
use crate::inference::DEFAULT_TOP_K;
use crate::utils::error::{GardenError, Result};

/// Hyperparameters of one fixed-length, full-batch training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training epochs; training always runs all of them
    pub epochs: usize,

    /// Adam learning rate
    pub learning_rate: f64,

    /// Log the loss every N epochs
    pub log_interval: usize,

    /// Seed for weight initialization and dropout masks
    pub seed: u64,
}

impl TrainingConfig {
    /// Settings for the growth regressor
    pub fn growth() -> Self {
        Self {
            epochs: 100,
            learning_rate: 0.001,
            log_interval: 20,
            seed: 42,
        }
    }

    /// Settings for the crop classifier
    pub fn crop() -> Self {
        Self {
            epochs: 150,
            learning_rate: 0.001,
            log_interval: 30,
            seed: 42,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(GardenError::Config("epochs must be greater than 0".to_string()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(GardenError::Config(
                "learning_rate must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenConfig {
    /// Directory holding the local dataset copy
    pub data_dir: PathBuf,

    /// Dataset file name inside `data_dir`
    pub dataset_file: String,

    /// Directory holding the five model artifacts
    pub models_dir: PathBuf,

    /// Growth regressor training settings
    pub growth: TrainingConfig,

    /// Crop classifier training settings
    pub crop: TrainingConfig,

    /// Number of crops returned by a recommendation request
    pub default_top_k: usize,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            dataset_file: DATASET_FILE_NAME.to_string(),
            models_dir: PathBuf::from("models"),
            growth: TrainingConfig::growth(),
            crop: TrainingConfig::crop(),
            default_top_k: DEFAULT_TOP_K,
        }
    }
}

impl GardenConfig {
    /// Full path of the dataset CSV
    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join(&self.dataset_file)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.growth.validate()?;
        self.crop.validate()?;
        if self.default_top_k == 0 {
            return Err(GardenError::Config(
                "default_top_k must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_presets() {
        let growth = TrainingConfig::growth();
        assert_eq!(growth.epochs, 100);
        assert_eq!(growth.learning_rate, 0.001);

        let crop = TrainingConfig::crop();
        assert_eq!(crop.epochs, 150);
        assert_eq!(crop.log_interval, 30);
    }

    #[test]
    fn test_default_config() {
        let config = GardenConfig::default();
        assert_eq!(config.dataset_path(), PathBuf::from("data/Crop_recommendation.csv"));
        assert_eq!(config.default_top_k, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut config = GardenConfig::default();
        config.growth.epochs = 0;
        assert!(config.validate().is_err());

        let mut config = GardenConfig::default();
        config.crop.learning_rate = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = GardenConfig::default();
        config.default_top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gardensim.json");

        let mut config = GardenConfig::default();
        config.models_dir = PathBuf::from("/srv/gardensim/models");
        config.save(&path).unwrap();

        let loaded = GardenConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
