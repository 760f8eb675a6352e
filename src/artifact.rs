//! Model artifacts and their on-disk store
//!
//! An artifact is everything needed to reproduce training-time
//! normalization at inference time:
//! - growth: regressor weights + feature scaler
//! - crop: classifier weights + feature scaler + label vocabulary
//!
//! The five files live side by side in one models directory and are always
//! written as a set. Every file of an artifact is first written under a
//! staging name; only when all of them succeed are they renamed into place,
//! weights last. A failed save leaves the previous artifact untouched, and a
//! present weights file implies a complete artifact.

use std::fs;
use std::path::{Path, PathBuf};

use burn::{
    module::Module,
    record::CompactRecorder,
    tensor::backend::Backend,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::dataset::{LabelVocabulary, StandardScaler};
use crate::model::{CropClassifier, CropClassifierConfig, GrowthRegressor, GrowthRegressorConfig};
use crate::utils::error::{GardenError, Result};

/// Weights file stem of the growth regressor (the recorder adds the extension)
pub const GROWTH_MODEL_FILE: &str = "growth_model";
/// Scaler fitted for the growth regressor
pub const GROWTH_SCALER_FILE: &str = "growth_scaler.json";
/// Weights file stem of the crop classifier (the recorder adds the extension)
pub const CROP_MODEL_FILE: &str = "crop_model";
/// Scaler fitted for the crop classifier
pub const CROP_SCALER_FILE: &str = "crop_scaler.json";
/// Ordered crop label vocabulary
pub const CROP_CLASSES_FILE: &str = "crop_classes.json";

/// Extension `CompactRecorder` appends to weight files
pub const MODEL_EXTENSION: &str = "mpk";

/// Prefix of files written during a save, before they are renamed into place
const STAGING_PREFIX: &str = "staging-";

/// Trained growth regressor with its scaler
#[derive(Debug, Clone)]
pub struct GrowthArtifact<B: Backend> {
    pub model: GrowthRegressor<B>,
    pub scaler: StandardScaler,
}

/// Trained crop classifier with its scaler and vocabulary
#[derive(Debug, Clone)]
pub struct CropArtifact<B: Backend> {
    pub model: CropClassifier<B>,
    pub scaler: StandardScaler,
    pub vocabulary: LabelVocabulary,
}

impl<B: Backend> CropArtifact<B> {
    /// Output width of the classifier, always the vocabulary length
    pub fn num_classes(&self) -> usize {
        self.vocabulary.len()
    }
}

/// File layout of the artifacts inside a models directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    models_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Path of the growth weights, including the recorder extension
    pub fn growth_model_path(&self) -> PathBuf {
        self.weights_path(GROWTH_MODEL_FILE)
    }

    pub fn growth_scaler_path(&self) -> PathBuf {
        self.models_dir.join(GROWTH_SCALER_FILE)
    }

    /// Path of the crop weights, including the recorder extension
    pub fn crop_model_path(&self) -> PathBuf {
        self.weights_path(CROP_MODEL_FILE)
    }

    pub fn crop_scaler_path(&self) -> PathBuf {
        self.models_dir.join(CROP_SCALER_FILE)
    }

    pub fn crop_classes_path(&self) -> PathBuf {
        self.models_dir.join(CROP_CLASSES_FILE)
    }

    /// Whether the growth weights have been written
    pub fn growth_exists(&self) -> bool {
        self.growth_model_path().is_file()
    }

    /// Whether the crop weights have been written
    pub fn crop_exists(&self) -> bool {
        self.crop_model_path().is_file()
    }

    /// Persist a growth artifact, replacing any previous one
    pub fn save_growth<B: Backend>(&self, artifact: &GrowthArtifact<B>) -> Result<()> {
        fs::create_dir_all(&self.models_dir)?;

        let files = [self.growth_scaler_path(), self.growth_model_path()];
        let stem = self.staged_weights_stem(GROWTH_MODEL_FILE);
        let written = write_json(&staged(&files[0]), &artifact.scaler)
            .and_then(|_| save_weights::<B, _>(&artifact.model, &stem, "growth"));
        commit(written, &files)?;

        info!("Growth model saved to {:?}", self.growth_model_path());
        Ok(())
    }

    /// Persist a crop artifact, replacing any previous one
    pub fn save_crop<B: Backend>(&self, artifact: &CropArtifact<B>) -> Result<()> {
        if artifact.model.num_classes() != artifact.vocabulary.len() {
            return Err(GardenError::Model(format!(
                "classifier has {} outputs but the vocabulary has {} labels",
                artifact.model.num_classes(),
                artifact.vocabulary.len()
            )));
        }

        fs::create_dir_all(&self.models_dir)?;

        let files = [
            self.crop_classes_path(),
            self.crop_scaler_path(),
            self.crop_model_path(),
        ];
        let stem = self.staged_weights_stem(CROP_MODEL_FILE);
        let written = write_json(&staged(&files[0]), &artifact.vocabulary)
            .and_then(|_| write_json(&staged(&files[1]), &artifact.scaler))
            .and_then(|_| save_weights::<B, _>(&artifact.model, &stem, "crop"));
        commit(written, &files)?;

        info!(
            "Crop recommendation model saved to {:?} ({} classes)",
            self.crop_model_path(),
            artifact.vocabulary.len()
        );
        Ok(())
    }

    /// Load the growth regressor and its scaler
    pub fn load_growth_artifact<B: Backend>(&self, device: &B::Device) -> Result<GrowthArtifact<B>> {
        require(&self.growth_model_path())?;
        let scaler: StandardScaler = read_json(&self.growth_scaler_path())?;

        let recorder = CompactRecorder::new();
        let model = GrowthRegressor::<B>::new(&GrowthRegressorConfig::new(), device)
            .load_file(self.models_dir.join(GROWTH_MODEL_FILE), &recorder, device)
            .map_err(|e| GardenError::Model(format!("Failed to load growth model: {:?}", e)))?;

        info!("Growth model loaded from {:?}", self.growth_model_path());
        Ok(GrowthArtifact { model, scaler })
    }

    /// Load the crop classifier, its scaler and vocabulary
    ///
    /// The classifier's output width comes only from the persisted vocabulary.
    pub fn load_crop_artifact<B: Backend>(&self, device: &B::Device) -> Result<CropArtifact<B>> {
        require(&self.crop_model_path())?;
        let classes: Vec<String> = read_json(&self.crop_classes_path())?;
        let vocabulary = LabelVocabulary::from_classes(classes)?;
        let scaler: StandardScaler = read_json(&self.crop_scaler_path())?;

        let recorder = CompactRecorder::new();
        let config = CropClassifierConfig::new(vocabulary.len());
        let model = CropClassifier::<B>::new(&config, device)
            .load_file(self.models_dir.join(CROP_MODEL_FILE), &recorder, device)
            .map_err(|e| GardenError::Model(format!("Failed to load crop model: {:?}", e)))?;

        info!(
            "Crop recommendation model loaded from {:?} ({} classes)",
            self.crop_model_path(),
            vocabulary.len()
        );
        Ok(CropArtifact {
            model,
            scaler,
            vocabulary,
        })
    }

    fn weights_path(&self, stem: &str) -> PathBuf {
        self.models_dir.join(format!("{}.{}", stem, MODEL_EXTENSION))
    }

    /// Stem handed to the recorder; it lands on `staged(weights_path(stem))`
    fn staged_weights_stem(&self, stem: &str) -> PathBuf {
        self.models_dir.join(format!("{}{}", STAGING_PREFIX, stem))
    }
}

/// Staging name of a final artifact file, in the same directory
fn staged(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}{}", STAGING_PREFIX, name))
}

/// Move staged files into place, or discard them if writing failed
///
/// `files` are final paths in rename order; the weights file comes last.
fn commit(written: Result<()>, files: &[PathBuf]) -> Result<()> {
    if let Err(err) = written {
        for file in files {
            let _ = fs::remove_file(staged(file));
        }
        return Err(err);
    }
    for file in files {
        fs::rename(staged(file), file)?;
    }
    Ok(())
}

fn save_weights<B: Backend, M: Module<B>>(model: &M, stem: &Path, kind: &str) -> Result<()> {
    model
        .clone()
        .save_file(stem.to_path_buf(), &CompactRecorder::new())
        .map_err(|e| GardenError::Model(format!("Failed to save {} model: {:?}", kind, e)))
}

fn require(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(GardenError::ArtifactMissing(path.to_path_buf()))
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    require(path)?;
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
