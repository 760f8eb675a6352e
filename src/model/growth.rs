//! Growth regressor
//!
//! Maps the seven scaled features to a single growth increment in (0, 1).

use burn::{
    config::Config,
    module::Module,
    nn::{Dropout, DropoutConfig, Linear, LinearConfig, Relu},
    tensor::{activation::sigmoid, backend::Backend, Tensor},
};

/// Configuration for the GrowthRegressor
#[derive(Config, Debug)]
pub struct GrowthRegressorConfig {
    /// Number of input features
    #[config(default = "7")]
    pub input_size: usize,

    /// Width of the first hidden layer
    #[config(default = "64")]
    pub hidden_size: usize,

    /// Dropout after the first two hidden layers
    #[config(default = "0.2")]
    pub dropout_rate: f64,
}

impl Default for GrowthRegressorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Feed-forward regressor
///
/// Architecture: 7 -> 64 -> 32 -> 16 -> 1
/// - ReLU after the three hidden layers
/// - Dropout after the first two
/// - Sigmoid on the output
#[derive(Module, Debug)]
pub struct GrowthRegressor<B: Backend> {
    pub fc1: Linear<B>,
    pub dropout1: Dropout,
    pub fc2: Linear<B>,
    pub dropout2: Dropout,
    pub fc3: Linear<B>,
    pub fc4: Linear<B>,
    relu: Relu,
}

impl<B: Backend> GrowthRegressor<B> {
    /// Create a new regressor from configuration
    pub fn new(config: &GrowthRegressorConfig, device: &B::Device) -> Self {
        Self {
            fc1: LinearConfig::new(config.input_size, config.hidden_size).init(device),
            dropout1: DropoutConfig::new(config.dropout_rate).init(),
            fc2: LinearConfig::new(config.hidden_size, 32).init(device),
            dropout2: DropoutConfig::new(config.dropout_rate).init(),
            fc3: LinearConfig::new(32, 16).init(device),
            fc4: LinearConfig::new(16, 1).init(device),
            relu: Relu::new(),
        }
    }

    /// Raw output before the sigmoid
    ///
    /// # Arguments
    /// * `x` - Scaled features of shape [batch_size, 7]
    ///
    /// # Returns
    /// * Tensor of shape [batch_size, 1]
    pub fn forward_logit(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.fc1.forward(x);
        let x = self.relu.forward(x);
        let x = self.dropout1.forward(x);

        let x = self.fc2.forward(x);
        let x = self.relu.forward(x);
        let x = self.dropout2.forward(x);

        let x = self.fc3.forward(x);
        let x = self.relu.forward(x);

        self.fc4.forward(x)
    }

    /// Forward pass; growth increment in (0, 1) of shape [batch_size, 1]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        sigmoid(self.forward_logit(x))
    }
}
