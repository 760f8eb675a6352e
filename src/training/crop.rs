//! Crop classifier training

use burn::{
    module::AutodiffModule,
    nn::loss::CrossEntropyLossConfig,
    optim::{GradientsParams, Optimizer},
    tensor::{
        backend::{AutodiffBackend, Backend},
        ElementConversion, Int, Tensor, TensorData,
    },
};
use tracing::info;

use crate::artifact::{ArtifactStore, CropArtifact};
use crate::config::TrainingConfig;
use crate::dataset::features::rows_to_tensor;
use crate::dataset::{CropTable, LabelVocabulary, StandardScaler};
use crate::model::{CropClassifier, CropClassifierConfig};
use crate::utils::error::{GardenError, Result};
use crate::utils::logging::TrainingLogger;

/// Train the crop classifier on the labeled table
///
/// The label vocabulary is resolved here, once, and fixes the classifier's
/// output width. Training runs every epoch on the full table with
/// cross-entropy loss.
pub fn train_crop<B>(
    table: &CropTable,
    config: &TrainingConfig,
    store: &ArtifactStore,
    device: &B::Device,
) -> Result<CropArtifact<B::InnerBackend>>
where
    B: AutodiffBackend,
{
    if table.is_empty() {
        return Err(GardenError::Dataset(
            "cannot train the crop model on an empty table".to_string(),
        ));
    }
    if table.len() < 2 {
        return Err(GardenError::Training(
            "batch normalization needs at least two rows per training batch".to_string(),
        ));
    }
    config.validate()?;
    B::seed(config.seed);

    let vocabulary = LabelVocabulary::fit(table.labels()?)?;
    let encoded = table.encoded_labels(&vocabulary)?;

    info!(
        "Training crop recommendation model on {} samples, {} classes ({} epochs, lr {})",
        table.len(),
        vocabulary.len(),
        config.epochs,
        config.learning_rate
    );

    let rows = table.feature_rows();
    let scaler = StandardScaler::fit(&rows)?;
    let inputs = rows_to_tensor::<B>(&scaler.transform_all(&rows), device);
    let targets = labels_to_tensor::<B>(&encoded, device);

    let model_config = CropClassifierConfig::new(vocabulary.len());
    let mut model = CropClassifier::<B>::new(&model_config, device);
    let mut optimizer = super::adam_config().init();
    let loss_fn = CrossEntropyLossConfig::new().init(device);

    let logger = TrainingLogger::new("Crop Model", config.epochs, config.log_interval);
    let mut final_loss = 0.0f64;

    for epoch in 0..config.epochs {
        let output = model.forward(inputs.clone());
        let loss = loss_fn.forward(output, targets.clone());

        final_loss = loss.clone().into_scalar().elem();

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &model);
        model = optimizer.step(config.learning_rate, model, grads);

        logger.end_epoch(epoch, final_loss);
    }
    logger.log_complete(final_loss);

    let model = model.valid();
    let accuracy = training_accuracy(
        &model,
        rows_to_tensor::<B::InnerBackend>(&scaler.transform_all(&rows), device),
        &encoded,
    );
    info!("Crop model training accuracy: {:.2}%", accuracy);

    let artifact = CropArtifact {
        model,
        scaler,
        vocabulary,
    };
    store.save_crop(&artifact)?;

    Ok(artifact)
}

/// Class indices as an integer target tensor
fn labels_to_tensor<B: Backend>(labels: &[usize], device: &B::Device) -> Tensor<B, 1, Int> {
    let data: Vec<i64> = labels.iter().map(|&label| label as i64).collect();
    Tensor::<B, 1, Int>::from_data(TensorData::new(data, [labels.len()]), device)
}

/// Percentage of rows whose highest-scoring class matches the label
fn training_accuracy<B: Backend>(
    model: &CropClassifier<B>,
    inputs: Tensor<B, 2>,
    labels: &[usize],
) -> f64 {
    let targets = labels_to_tensor::<B>(labels, &inputs.device());
    let predictions = model.forward(inputs).argmax(1).squeeze::<1>(1);
    let correct: i64 = predictions.equal(targets).int().sum().into_scalar().elem();

    100.0 * correct as f64 / labels.len().max(1) as f64
}
