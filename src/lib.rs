//! # GardenSim
//!
//! Machine-learning core of a garden simulation, built with the Burn framework.
//!
//! ## Features
//!
//! - **Growth regressor** mapping soil and weather readings to a growth increment in (0, 1)
//! - **Crop classifier** ranking crops by suitability for the same readings
//! - **Artifact store** persisting weights, scalers and the label vocabulary as a set
//! - **Garden rules** for plant care actions and the model-driven growth tick
//!
//! ## Modules
//!
//! - `dataset`: CSV loading, the seven-feature pipeline, scaler and vocabulary
//! - `model`: the two feed-forward networks
//! - `training`: full-batch training loops
//! - `artifact`: on-disk model artifacts
//! - `inference`: growth prediction and top-k crop recommendation
//! - `context`: the loaded models a service predicts with
//! - `garden`: plant state, care actions, weather and recommendations
//! - `utils`: errors, logging and formatting helpers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gardensim::{GardenConfig, ModelContext, Sample};
//!
//! let context = ModelContext::bootstrap(&GardenConfig::default())?;
//! let sample = Sample::from_slice(&[90.0, 42.0, 43.0, 20.9, 82.0, 6.5, 202.9])?;
//!
//! let growth = context.predict_growth(&sample)?;
//! let crops = context.recommend_crops(&sample, 5)?;
//! ```

pub mod artifact;
pub mod backend;
pub mod config;
pub mod context;
pub mod dataset;
pub mod garden;
pub mod inference;
pub mod model;
pub mod training;
pub mod utils;

// Re-export commonly used items for convenience
pub use artifact::{ArtifactStore, CropArtifact, GrowthArtifact};
pub use config::{GardenConfig, TrainingConfig};
pub use context::ModelContext;
pub use dataset::{CropTable, LabelVocabulary, Sample, StandardScaler};
pub use garden::{CropRecommendationRequest, Garden, GrowthModel, PlantAction, PlantState, WeatherReading};
pub use inference::{predict_growth, recommend_crops, CropRecommendation};
pub use model::{CropClassifier, GrowthRegressor};
pub use training::{train_crop, train_growth};
pub use utils::error::{GardenError, Result};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
