//! Backend abstraction
//!
//! Training and inference run on the NdArray (CPU) backend; the seven-feature
//! networks are far too small to benefit from a GPU.

use burn::backend::Autodiff;

#[cfg(any(feature = "ndarray", feature = "cpu"))]
pub type DefaultBackend = burn_ndarray::NdArray;

#[cfg(not(any(feature = "ndarray", feature = "cpu")))]
compile_error!("At least one backend (ndarray or cpu) must be enabled!");

/// The default autodiff backend for training
pub type TrainingBackend = Autodiff<DefaultBackend>;

/// Get the default device
pub fn default_device() -> <DefaultBackend as burn::tensor::backend::Backend>::Device {
    <DefaultBackend as burn::tensor::backend::Backend>::Device::default()
}

/// Get a human-readable name for the current backend
pub fn backend_name() -> &'static str {
    "NdArray (CPU)"
}
