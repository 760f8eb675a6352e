//! Error Handling Module
//!
//! Defines the error type shared by the dataset, training, artifact and
//! inference layers. Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for GardenSim operations
#[derive(Error, Debug)]
pub enum GardenError {
    /// The crop dataset is not present locally; training cannot proceed
    #[error("Dataset unavailable at '{0}'")]
    DatasetUnavailable(PathBuf),

    /// Error with dataset contents
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A persisted artifact file is missing
    #[error("Artifact missing: {0}")]
    ArtifactMissing(PathBuf),

    /// Error with model operations (record loading, shapes)
    #[error("Model error: {0}")]
    Model(String),

    /// Error with training
    #[error("Training error: {0}")]
    Training(String),

    /// Error with inference
    #[error("Inference error: {0}")]
    Inference(String),

    /// A model was requested from the context before it was loaded
    #[error("Model not loaded: {0}")]
    ModelNotLoaded(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for GardenError {
    fn from(err: serde_json::Error) -> Self {
        GardenError::Serialization(err.to_string())
    }
}

/// Convenience Result type for GardenSim operations
pub type Result<T> = std::result::Result<T, GardenError>;
