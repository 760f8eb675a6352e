//! Crop classifier
//!
//! Scores every crop in the label vocabulary from the seven scaled features.
//! The output width is fixed by the vocabulary resolved at training time.

use burn::{
    config::Config,
    module::Module,
    nn::{BatchNorm, BatchNormConfig, Dropout, DropoutConfig, Linear, LinearConfig, Relu},
    tensor::{backend::Backend, Tensor},
};

/// Configuration for the CropClassifier
#[derive(Config, Debug)]
pub struct CropClassifierConfig {
    /// Number of output classes (length of the label vocabulary)
    pub num_classes: usize,

    /// Number of input features
    #[config(default = "7")]
    pub input_size: usize,

    /// Width of the first hidden layer
    #[config(default = "128")]
    pub hidden_size: usize,

    /// Dropout after the first two hidden layers
    #[config(default = "0.3")]
    pub dropout_rate: f64,
}

/// Feed-forward classifier
///
/// Architecture: 7 -> 128 -> 64 -> 32 -> num_classes
/// - ReLU, BatchNorm and Dropout after the first two layers
/// - ReLU after the third
/// - Raw logits out; softmax is applied at inference time
#[derive(Module, Debug)]
pub struct CropClassifier<B: Backend> {
    pub fc1: Linear<B>,
    pub bn1: BatchNorm<B, 0>,
    pub dropout1: Dropout,
    pub fc2: Linear<B>,
    pub bn2: BatchNorm<B, 0>,
    pub dropout2: Dropout,
    pub fc3: Linear<B>,
    pub fc4: Linear<B>,
    relu: Relu,

    num_classes: usize,
}

impl<B: Backend> CropClassifier<B> {
    /// Create a new classifier from configuration
    pub fn new(config: &CropClassifierConfig, device: &B::Device) -> Self {
        Self {
            fc1: LinearConfig::new(config.input_size, config.hidden_size).init(device),
            bn1: BatchNormConfig::new(config.hidden_size).init(device),
            dropout1: DropoutConfig::new(config.dropout_rate).init(),
            fc2: LinearConfig::new(config.hidden_size, 64).init(device),
            bn2: BatchNormConfig::new(64).init(device),
            dropout2: DropoutConfig::new(config.dropout_rate).init(),
            fc3: LinearConfig::new(64, 32).init(device),
            fc4: LinearConfig::new(32, config.num_classes).init(device),
            relu: Relu::new(),
            num_classes: config.num_classes,
        }
    }

    /// Forward pass through the network
    ///
    /// # Arguments
    /// * `x` - Scaled features of shape [batch_size, 7]
    ///
    /// # Returns
    /// * Logits tensor of shape [batch_size, num_classes]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.fc1.forward(x);
        let x = self.relu.forward(x);
        let x = self.bn1.forward(x);
        let x = self.dropout1.forward(x);

        let x = self.fc2.forward(x);
        let x = self.relu.forward(x);
        let x = self.bn2.forward(x);
        let x = self.dropout2.forward(x);

        let x = self.fc3.forward(x);
        let x = self.relu.forward(x);

        self.fc4.forward(x)
    }

    /// Forward pass with softmax for inference
    pub fn forward_softmax(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let logits = self.forward(x);
        burn::tensor::activation::softmax(logits, 1)
    }

    /// Get the number of output classes
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }
}
