//! Training module
//!
//! Full-batch, fixed-length training loops for the two networks. Each loop
//! fits its scaler on the whole table, trains with Adam for the configured
//! number of epochs and persists the resulting artifact through the
//! `ArtifactStore` before returning it in evaluation form.

pub mod crop;
pub mod growth;

pub use crop::train_crop;
pub use growth::train_growth;

use burn::optim::AdamConfig;

/// Adam settings shared by both loops
pub(crate) fn adam_config() -> AdamConfig {
    AdamConfig::new().with_epsilon(1e-8)
}
