//! Loaded model state owned by the caller
//!
//! Holds at most one growth and one crop artifact. Nothing here is global:
//! whoever serves predictions creates a context at start-up and passes it
//! to the code that needs it.

use burn::tensor::backend::Backend;
use tracing::{info, warn};

use crate::artifact::{ArtifactStore, CropArtifact, GrowthArtifact};
use crate::backend::{default_device, DefaultBackend, TrainingBackend};
use crate::config::GardenConfig;
use crate::dataset::{load_dataset, Sample};
use crate::inference::{predict_growth, recommend_crops, CropRecommendation};
use crate::training::{train_crop, train_growth};
use crate::utils::error::{GardenError, Result};

/// The two artifacts a running service predicts with
#[derive(Debug, Clone)]
pub struct ModelContext<B: Backend> {
    growth: Option<GrowthArtifact<B>>,
    crop: Option<CropArtifact<B>>,
}

impl<B: Backend> Default for ModelContext<B> {
    fn default() -> Self {
        Self {
            growth: None,
            crop: None,
        }
    }
}

impl<B: Backend> ModelContext<B> {
    /// Empty context; every lookup fails until artifacts are set
    pub fn new() -> Self {
        Self::default()
    }

    /// Context holding the given artifacts
    pub fn with_artifacts(growth: GrowthArtifact<B>, crop: CropArtifact<B>) -> Self {
        Self {
            growth: Some(growth),
            crop: Some(crop),
        }
    }

    /// Load both artifacts from the store
    pub fn load(store: &ArtifactStore, device: &B::Device) -> Result<Self> {
        let growth = store.load_growth_artifact(device)?;
        let crop = store.load_crop_artifact(device)?;
        Ok(Self::with_artifacts(growth, crop))
    }

    pub fn growth(&self) -> Result<&GrowthArtifact<B>> {
        self.growth.as_ref().ok_or(GardenError::ModelNotLoaded("growth"))
    }

    pub fn crop(&self) -> Result<&CropArtifact<B>> {
        self.crop.as_ref().ok_or(GardenError::ModelNotLoaded("crop"))
    }

    pub fn set_growth(&mut self, artifact: GrowthArtifact<B>) {
        self.growth = Some(artifact);
    }

    pub fn set_crop(&mut self, artifact: CropArtifact<B>) {
        self.crop = Some(artifact);
    }

    /// Whether both artifacts are present
    pub fn is_ready(&self) -> bool {
        self.growth.is_some() && self.crop.is_some()
    }

    /// Growth increment in (0, 1) from the loaded regressor
    pub fn predict_growth(&self, sample: &Sample) -> Result<f64> {
        predict_growth(self.growth()?, sample)
    }

    /// Ranked crops from the loaded classifier
    pub fn recommend_crops(&self, sample: &Sample, top_k: usize) -> Result<Vec<CropRecommendation>> {
        recommend_crops(self.crop()?, sample, top_k)
    }
}

impl ModelContext<DefaultBackend> {
    /// Start-up sequence of a prediction service
    ///
    /// Trains both models when either weights file is missing, then loads
    /// both from disk. A missing dataset is only an error when training is
    /// needed.
    pub fn bootstrap(config: &GardenConfig) -> Result<Self> {
        config.validate()?;
        let store = ArtifactStore::new(&config.models_dir);
        let device = default_device();

        if !(store.growth_exists() && store.crop_exists()) {
            warn!("Model artifacts missing in {:?}, training from scratch", store.models_dir());
            let table = load_dataset(config.dataset_path())?;
            table.stats().log();

            train_growth::<TrainingBackend>(&table, &config.growth, &store, &device)?;
            train_crop::<TrainingBackend>(&table, &config.crop, &store, &device)?;
        }

        let context = Self::load(&store, &device)?;
        info!("Models loaded successfully");
        Ok(context)
    }
}
