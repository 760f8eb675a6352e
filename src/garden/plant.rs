//! Plant state and the rules that change it
//!
//! Care actions adjust water, fertilizer, health and the pest flags. The
//! growth tick turns a predicted growth increment into progress, reduced by
//! poor conditions, and consumes some water and fertilizer.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::emoji::crop_emoji;
use super::weather::WeatherReading;
use crate::dataset::Sample;
use crate::utils::error::{GardenError, Result};

/// Number of plots in the 3x3 garden grid
pub const GRID_SIZE: usize = 9;

/// Upper bound of every 0-100 gauge
const GAUGE_MAX: f64 = 100.0;

const DEFAULT_WATER_AMOUNT: f64 = 20.0;
const DEFAULT_FERTILIZER_AMOUNT: f64 = 10.0;
const OVERWATER_LEVEL: f64 = 90.0;
const DRY_LEVEL: f64 = 20.0;

const PEST_CHANCE: f64 = 0.15;
const DISEASE_CHANCE: f64 = 0.10;

/// One plant in the garden grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantState {
    pub id: Uuid,
    /// Plot index, 0-8, row-major in the 3x3 grid
    pub position: usize,
    pub plant_type: String,
    pub emoji: String,
    pub water_level: f64,
    pub fertilizer_n: f64,
    pub fertilizer_p: f64,
    pub fertilizer_k: f64,
    pub health: f64,
    pub growth_stage: f64,
    pub soil_ph: f64,
    pub has_pests: bool,
    pub has_disease: bool,
    pub planted_date: DateTime<Utc>,
    pub last_watered: Option<DateTime<Utc>>,
    pub last_fertilized: Option<DateTime<Utc>>,
}

impl PlantState {
    /// Plant a fresh seed at `position`
    pub fn new(position: usize, plant_type: impl Into<String>) -> Result<Self> {
        if position >= GRID_SIZE {
            return Err(GardenError::InvalidInput(format!(
                "position {} is outside the {}-plot grid",
                position, GRID_SIZE
            )));
        }

        let plant_type = plant_type.into();
        Ok(Self {
            id: Uuid::new_v4(),
            position,
            emoji: crop_emoji(&plant_type).to_string(),
            plant_type,
            water_level: 50.0,
            fertilizer_n: 50.0,
            fertilizer_p: 50.0,
            fertilizer_k: 50.0,
            health: 100.0,
            growth_stage: 0.0,
            soil_ph: 6.5,
            has_pests: false,
            has_disease: false,
            planted_date: Utc::now(),
            last_watered: None,
            last_fertilized: None,
        })
    }

    pub fn is_fully_grown(&self) -> bool {
        self.growth_stage >= GAUGE_MAX
    }
}

/// Care action applied to a plant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlantAction {
    /// Add water; `None` or zero means the default 20
    Water { amount: Option<f64> },
    /// Add the same amount to N, P and K; `None` or zero means the default 10
    Fertilize { amount: Option<f64> },
    /// Roll for pests and disease
    CheckPests,
    /// Clear pests and disease
    Treat,
}

impl PlantAction {
    /// Apply the action; `rng` is only drawn from by `CheckPests`
    pub fn apply<R: Rng + ?Sized>(&self, plant: &mut PlantState, rng: &mut R) {
        match *self {
            PlantAction::Water { amount } => {
                let amount = amount_or(amount, DEFAULT_WATER_AMOUNT);
                plant.water_level = (plant.water_level + amount).min(GAUGE_MAX);
                plant.last_watered = Some(Utc::now());

                if plant.water_level > OVERWATER_LEVEL {
                    plant.health = (plant.health - 5.0).max(0.0);
                }
            }
            PlantAction::Fertilize { amount } => {
                let amount = amount_or(amount, DEFAULT_FERTILIZER_AMOUNT);
                plant.fertilizer_n = (plant.fertilizer_n + amount).min(GAUGE_MAX);
                plant.fertilizer_p = (plant.fertilizer_p + amount).min(GAUGE_MAX);
                plant.fertilizer_k = (plant.fertilizer_k + amount).min(GAUGE_MAX);
                plant.last_fertilized = Some(Utc::now());
            }
            PlantAction::CheckPests => {
                let has_pests = rng.gen::<f64>() < PEST_CHANCE;
                let has_disease = rng.gen::<f64>() < DISEASE_CHANCE;
                let health_before = plant.health;

                plant.has_pests = has_pests;
                plant.has_disease = has_disease;

                // Both penalties start from the health before the check; disease wins.
                if has_pests {
                    plant.health = (health_before - 10.0).max(0.0);
                }
                if has_disease {
                    plant.health = (health_before - 15.0).max(0.0);
                }
            }
            PlantAction::Treat => {
                plant.has_pests = false;
                plant.has_disease = false;
                plant.health = (plant.health + 20.0).min(GAUGE_MAX);
            }
        }
    }
}

fn amount_or(amount: Option<f64>, default: f64) -> f64 {
    match amount {
        Some(value) if value != 0.0 => value,
        _ => default,
    }
}

/// Model input for a plant under the given weather
///
/// Soil nutrients and pH come from the plant; temperature, humidity and
/// precipitation (as rainfall) come from the weather.
pub fn environmental_sample(plant: &PlantState, weather: &WeatherReading) -> Sample {
    Sample {
        nitrogen: plant.fertilizer_n,
        phosphorus: plant.fertilizer_p,
        potassium: plant.fertilizer_k,
        temperature: weather.temperature,
        humidity: weather.humidity,
        ph: plant.soil_ph,
        rainfall: weather.precipitation,
    }
}

/// Advance growth by `increment_percent` after condition penalties
///
/// Returns the increment actually applied before the 100 cap.
pub fn apply_growth_tick(plant: &mut PlantState, increment_percent: f64) -> f64 {
    let mut increment = increment_percent;

    if plant.water_level < DRY_LEVEL {
        increment *= 0.5;
    }
    if plant.water_level > OVERWATER_LEVEL {
        increment *= 0.7;
    }
    if plant.has_pests {
        increment *= 0.6;
    }
    if plant.has_disease {
        increment *= 0.5;
    }

    plant.growth_stage = (plant.growth_stage + increment).min(GAUGE_MAX);
    plant.water_level = (plant.water_level - 2.0).max(0.0);
    plant.fertilizer_n = (plant.fertilizer_n - 1.0).max(0.0);
    plant.fertilizer_p = (plant.fertilizer_p - 1.0).max(0.0);
    plant.fertilizer_k = (plant.fertilizer_k - 1.0).max(0.0);

    increment
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn plant() -> PlantState {
        PlantState::new(4, "Rice").unwrap()
    }

    #[test]
    fn test_new_plant_defaults() {
        let p = plant();
        assert_eq!(p.emoji, "🌾");
        assert_eq!(p.water_level, 50.0);
        assert_eq!(p.fertilizer_k, 50.0);
        assert_eq!(p.health, 100.0);
        assert_eq!(p.growth_stage, 0.0);
        assert_eq!(p.soil_ph, 6.5);
        assert!(!p.has_pests && !p.has_disease);
        assert!(p.last_watered.is_none());
    }

    #[test]
    fn test_position_outside_grid() {
        assert!(matches!(
            PlantState::new(GRID_SIZE, "rice"),
            Err(GardenError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_water_caps_and_overwatering() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut p = plant();

        PlantAction::Water { amount: None }.apply(&mut p, &mut rng);
        assert_eq!(p.water_level, 70.0);
        assert_eq!(p.health, 100.0);
        assert!(p.last_watered.is_some());

        PlantAction::Water { amount: Some(50.0) }.apply(&mut p, &mut rng);
        assert_eq!(p.water_level, 100.0);
        assert_eq!(p.health, 95.0);
    }

    #[test]
    fn test_zero_amount_uses_default() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut p = plant();

        PlantAction::Fertilize { amount: Some(0.0) }.apply(&mut p, &mut rng);
        assert_eq!(p.fertilizer_n, 60.0);
        assert_eq!(p.fertilizer_p, 60.0);
        assert_eq!(p.fertilizer_k, 60.0);
    }

    #[test]
    fn test_fertilize_caps_at_100() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut p = plant();
        p.fertilizer_p = 95.0;

        PlantAction::Fertilize { amount: Some(30.0) }.apply(&mut p, &mut rng);
        assert_eq!(p.fertilizer_n, 80.0);
        assert_eq!(p.fertilizer_p, 100.0);
        assert!(p.last_fertilized.is_some());
    }

    #[test]
    fn test_check_pests_penalties_follow_flags() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..200 {
            let mut p = plant();
            p.health = 50.0;
            PlantAction::CheckPests.apply(&mut p, &mut rng);

            let expected = match (p.has_pests, p.has_disease) {
                (_, true) => 35.0,
                (true, false) => 40.0,
                (false, false) => 50.0,
            };
            assert_eq!(p.health, expected);
        }
    }

    #[test]
    fn test_check_pests_is_reproducible_with_seed() {
        let mut a = plant();
        let mut b = a.clone();
        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99);

        for _ in 0..20 {
            PlantAction::CheckPests.apply(&mut a, &mut rng_a);
            PlantAction::CheckPests.apply(&mut b, &mut rng_b);
            assert_eq!(a.has_pests, b.has_pests);
            assert_eq!(a.has_disease, b.has_disease);
        }
    }

    #[test]
    fn test_treat_clears_flags() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut p = plant();
        p.has_pests = true;
        p.has_disease = true;
        p.health = 90.0;

        PlantAction::Treat.apply(&mut p, &mut rng);
        assert!(!p.has_pests && !p.has_disease);
        assert_eq!(p.health, 100.0);
    }

    #[test]
    fn test_action_json_shape() {
        let action: PlantAction = serde_json::from_str(r#"{"action":"water","amount":15.0}"#).unwrap();
        assert_eq!(action, PlantAction::Water { amount: Some(15.0) });

        let action: PlantAction = serde_json::from_str(r#"{"action":"check_pests"}"#).unwrap();
        assert_eq!(action, PlantAction::CheckPests);
    }

    #[test]
    fn test_environmental_sample() {
        let mut p = plant();
        p.fertilizer_n = 30.0;
        p.soil_ph = 7.1;
        let weather = WeatherReading::with_conditions(18.0, 40.0, 3.5);

        let sample = environmental_sample(&p, &weather);
        assert_eq!(sample.to_row(), [30.0, 50.0, 50.0, 18.0, 40.0, 7.1, 3.5]);
    }

    #[test]
    fn test_growth_tick_without_penalties() {
        let mut p = plant();
        let applied = apply_growth_tick(&mut p, 40.0);

        assert_eq!(applied, 40.0);
        assert_eq!(p.growth_stage, 40.0);
        assert_eq!(p.water_level, 48.0);
        assert_eq!(p.fertilizer_n, 49.0);
    }

    #[test]
    fn test_growth_tick_penalties_stack() {
        let mut p = plant();
        p.water_level = 10.0;
        p.has_pests = true;
        p.has_disease = true;

        let applied = apply_growth_tick(&mut p, 40.0);
        assert!((applied - 40.0 * 0.5 * 0.6 * 0.5).abs() < 1e-12);
        assert_eq!(p.water_level, 8.0);

        let mut p = plant();
        p.water_level = 95.0;
        let applied = apply_growth_tick(&mut p, 10.0);
        assert!((applied - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_growth_tick_caps_and_floors() {
        let mut p = plant();
        p.growth_stage = 90.0;
        p.water_level = 1.0;
        p.fertilizer_n = 0.5;

        apply_growth_tick(&mut p, 50.0);
        assert_eq!(p.growth_stage, 100.0);
        assert!(p.is_fully_grown());
        assert_eq!(p.water_level, 0.0);
        assert_eq!(p.fertilizer_n, 0.0);
    }
}
