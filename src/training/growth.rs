//! Growth regressor training

use burn::{
    module::AutodiffModule,
    nn::loss::{MseLoss, Reduction},
    optim::{GradientsParams, Optimizer},
    tensor::{backend::AutodiffBackend, ElementConversion},
};
use tracing::info;

use crate::artifact::{ArtifactStore, GrowthArtifact};
use crate::config::TrainingConfig;
use crate::dataset::features::{rows_to_tensor, targets_to_tensor};
use crate::dataset::{CropTable, StandardScaler};
use crate::model::{GrowthRegressor, GrowthRegressorConfig};
use crate::utils::error::{GardenError, Result};
use crate::utils::logging::TrainingLogger;

/// Train the growth regressor on the synthetic growth target
///
/// The target is derived from each row's features, so the label column is
/// not needed. Training runs every epoch on the full table with MSE loss.
///
/// # Type Parameters
/// * `B` - The autodiff backend to train on (e.g., `Autodiff<NdArray>`)
///
/// # Returns
/// The persisted artifact with its model in evaluation form.
pub fn train_growth<B>(
    table: &CropTable,
    config: &TrainingConfig,
    store: &ArtifactStore,
    device: &B::Device,
) -> Result<GrowthArtifact<B::InnerBackend>>
where
    B: AutodiffBackend,
{
    if table.is_empty() {
        return Err(GardenError::Dataset(
            "cannot train the growth model on an empty table".to_string(),
        ));
    }
    config.validate()?;
    B::seed(config.seed);

    info!(
        "Training growth model on {} samples ({} epochs, lr {})",
        table.len(),
        config.epochs,
        config.learning_rate
    );

    let rows = table.feature_rows();
    let scaler = StandardScaler::fit(&rows)?;
    let inputs = rows_to_tensor::<B>(&scaler.transform_all(&rows), device);
    let targets = targets_to_tensor::<B>(&table.growth_targets(), device);

    let mut model = GrowthRegressor::<B>::new(&GrowthRegressorConfig::new(), device);
    let mut optimizer = super::adam_config().init();
    let loss_fn = MseLoss::new();

    let logger = TrainingLogger::new("Growth Model", config.epochs, config.log_interval);
    let mut final_loss = 0.0f64;

    for epoch in 0..config.epochs {
        let output = model.forward(inputs.clone());
        let loss = loss_fn.forward(output, targets.clone(), Reduction::Mean);

        final_loss = loss.clone().into_scalar().elem();

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &model);
        model = optimizer.step(config.learning_rate, model, grads);

        logger.end_epoch(epoch, final_loss);
    }
    logger.log_complete(final_loss);

    let artifact = GrowthArtifact {
        model: model.valid(),
        scaler,
    };
    store.save_growth(&artifact)?;

    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CropRecord;
    use burn::backend::Autodiff;
    use burn_ndarray::NdArray;

    type TrainBackend = Autodiff<NdArray>;

    fn record(n: f64, temperature: f64, humidity: f64, label: &str) -> CropRecord {
        CropRecord {
            nitrogen: n,
            phosphorus: 40.0,
            potassium: 40.0,
            temperature,
            humidity,
            ph: 6.5,
            rainfall: 100.0,
            label: Some(label.to_string()),
        }
    }

    fn small_config() -> TrainingConfig {
        TrainingConfig {
            epochs: 5,
            ..TrainingConfig::growth()
        }
    }

    #[test]
    fn test_train_growth_persists_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let device = Default::default();

        let table = CropTable::new(vec![
            record(90.0, 21.0, 82.0, "rice"),
            record(20.0, 30.0, 40.0, "mango"),
            record(60.0, 25.0, 60.0, "maize"),
            record(120.0, 35.0, 90.0, "banana"),
        ]);

        let artifact = train_growth::<TrainBackend>(&table, &small_config(), &store, &device).unwrap();

        assert!(store.growth_exists());
        assert!(store.growth_scaler_path().is_file());

        let loaded = store.load_growth_artifact::<NdArray>(&device).unwrap();
        assert_eq!(loaded.scaler, artifact.scaler);
    }

    #[test]
    fn test_train_growth_works_without_labels() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let device = Default::default();

        let mut a = record(50.0, 20.0, 50.0, "x");
        let mut b = record(70.0, 30.0, 70.0, "x");
        a.label = None;
        b.label = None;

        let result = train_growth::<TrainBackend>(&CropTable::new(vec![a, b]), &small_config(), &store, &device);
        assert!(result.is_ok());
    }

    #[test]
    fn test_train_growth_rejects_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let device = Default::default();

        let result = train_growth::<TrainBackend>(&CropTable::new(Vec::new()), &small_config(), &store, &device);
        assert!(matches!(result, Err(GardenError::Dataset(_))));
        assert!(!store.growth_exists());
    }
}
