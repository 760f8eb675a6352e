//! In-memory 3x3 garden

use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use super::plant::{apply_growth_tick, environmental_sample, PlantAction, PlantState, GRID_SIZE};
use super::weather::WeatherReading;
use super::GrowthModel;
use crate::utils::error::{GardenError, Result};

/// Plants keyed by plot; at most one plant per plot
#[derive(Debug, Clone, Default)]
pub struct Garden {
    plots: [Option<PlantState>; GRID_SIZE],
}

impl Garden {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plant a seed; fails if the plot is taken or outside the grid
    pub fn plant(&mut self, position: usize, plant_type: &str) -> Result<&PlantState> {
        let plant = PlantState::new(position, plant_type)?;
        let plot = &mut self.plots[position];
        if plot.is_some() {
            return Err(GardenError::InvalidInput(format!(
                "position {} is already occupied",
                position
            )));
        }
        debug!("Planted {} at position {}", plant.plant_type, position);
        Ok(&*plot.insert(plant))
    }

    pub fn get(&self, id: Uuid) -> Option<&PlantState> {
        self.plants().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut PlantState> {
        self.plots.iter_mut().flatten().find(|p| p.id == id)
    }

    /// Remove a plant, freeing its plot
    pub fn remove(&mut self, id: Uuid) -> Option<PlantState> {
        self.plots
            .iter_mut()
            .find(|plot| matches!(plot, Some(p) if p.id == id))
            .and_then(Option::take)
    }

    /// Plants in plot order
    pub fn plants(&self) -> impl Iterator<Item = &PlantState> {
        self.plots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.plants().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply a care action to one plant
    pub fn apply_action<R: Rng + ?Sized>(
        &mut self,
        id: Uuid,
        action: PlantAction,
        rng: &mut R,
    ) -> Result<&PlantState> {
        let plant = self.require_mut(id)?;
        action.apply(plant, rng);
        Ok(&*plant)
    }

    /// Run one growth tick on one plant
    pub fn update_growth<M: GrowthModel + ?Sized>(
        &mut self,
        id: Uuid,
        model: &M,
        weather: &WeatherReading,
    ) -> Result<&PlantState> {
        let plant = self.require_mut(id)?;
        update_growth(plant, model, weather)?;
        Ok(&*plant)
    }

    fn require_mut(&mut self, id: Uuid) -> Result<&mut PlantState> {
        self.get_mut(id)
            .ok_or_else(|| GardenError::InvalidInput(format!("plant {} not found", id)))
    }
}

/// Predict the plant's growth increment and apply one tick
///
/// Returns the increment applied after condition penalties.
pub fn update_growth<M: GrowthModel + ?Sized>(
    plant: &mut PlantState,
    model: &M,
    weather: &WeatherReading,
) -> Result<f64> {
    let sample = environmental_sample(plant, weather);
    let increment = model.predict_growth(&sample)? * 100.0;
    Ok(apply_growth_tick(plant, increment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Sample;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct FixedGrowth(f64);

    impl GrowthModel for FixedGrowth {
        fn predict_growth(&self, _sample: &Sample) -> Result<f64> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_plant_and_occupancy() {
        let mut garden = Garden::new();
        garden.plant(0, "rice").unwrap();
        garden.plant(8, "mango").unwrap();
        assert_eq!(garden.len(), 2);

        assert!(garden.plant(0, "maize").is_err());
        assert!(garden.plant(9, "maize").is_err());
        assert_eq!(garden.len(), 2);
    }

    #[test]
    fn test_remove_frees_plot() {
        let mut garden = Garden::new();
        let id = garden.plant(3, "jute").unwrap().id;

        let removed = garden.remove(id).unwrap();
        assert_eq!(removed.position, 3);
        assert!(garden.is_empty());
        assert!(garden.remove(id).is_none());
        assert!(garden.plant(3, "cotton").is_ok());
    }

    #[test]
    fn test_actions_and_growth_by_id() {
        let mut garden = Garden::new();
        let id = garden.plant(1, "banana").unwrap().id;
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let plant = garden
            .apply_action(id, PlantAction::Water { amount: Some(10.0) }, &mut rng)
            .unwrap();
        assert_eq!(plant.water_level, 60.0);

        let plant = garden
            .update_growth(id, &FixedGrowth(0.25), &WeatherReading::default())
            .unwrap();
        assert_eq!(plant.growth_stage, 25.0);
        assert_eq!(plant.water_level, 58.0);

        let missing = Uuid::new_v4();
        assert!(garden.apply_action(missing, PlantAction::Treat, &mut rng).is_err());
    }

    #[test]
    fn test_update_growth_scales_prediction() {
        let mut plant = PlantState::new(0, "rice").unwrap();
        plant.has_pests = true;

        let applied = update_growth(&mut plant, &FixedGrowth(0.5), &WeatherReading::default()).unwrap();
        assert!((applied - 30.0).abs() < 1e-12);
        assert!((plant.growth_stage - 30.0).abs() < 1e-12);
    }
}
