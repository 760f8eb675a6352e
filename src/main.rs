//! GardenSim CLI
//!
//! Trains the growth and crop models, and runs predictions, recommendations
//! and growth ticks against the stored artifacts.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use gardensim::backend::{backend_name, default_device, DefaultBackend, TrainingBackend};
use gardensim::dataset::load_dataset;
use gardensim::garden::{crop_emoji, suggest_crops, Garden, PlantAction, WeatherReading};
use gardensim::utils::logging::{init_logging, LogConfig, LogLevel};
use gardensim::utils::{format_duration, format_percent_bar};
use gardensim::{
    predict_growth, train_crop, train_growth, ArtifactStore, CropRecommendationRequest,
    GardenConfig, Sample,
};

/// GardenSim growth prediction and crop recommendation
#[derive(Parser, Debug)]
#[command(name = "gardensim")]
#[command(version)]
#[command(about = "Growth prediction and crop recommendation models with Burn", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// JSON configuration file
    #[arg(long, env = "GARDENSIM_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding Crop_recommendation.csv
    #[arg(long, env = "GARDENSIM_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory holding the model artifacts
    #[arg(long, env = "GARDENSIM_MODELS_DIR")]
    models_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Train the models from the dataset and store the artifacts
    Train {
        /// Train only one of the two models
        #[arg(long, value_enum)]
        only: Option<ModelKind>,

        /// Override the number of training epochs
        #[arg(short, long)]
        epochs: Option<usize>,
    },

    /// Predict the growth increment for N P K temperature humidity ph rainfall
    PredictGrowth {
        #[arg(num_args = 7, allow_negative_numbers = true, value_names = ["N", "P", "K", "TEMPERATURE", "HUMIDITY", "PH", "RAINFALL"])]
        values: Vec<f64>,
    },

    /// Rank crops for N P K temperature humidity ph rainfall
    Recommend {
        #[arg(num_args = 7, allow_negative_numbers = true, value_names = ["N", "P", "K", "TEMPERATURE", "HUMIDITY", "PH", "RAINFALL"])]
        values: Vec<f64>,

        /// Number of crops to show
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Plant a seed and run growth ticks under the given weather
    Tick {
        /// Crop to plant
        #[arg(long, default_value = "rice")]
        plant_type: String,

        /// Plot in the 3x3 grid (0-8)
        #[arg(long, default_value = "4")]
        position: usize,

        /// Starting water level
        #[arg(long)]
        water: Option<f64>,

        /// Starting fertilizer level for N, P and K
        #[arg(long)]
        fertilizer: Option<f64>,

        /// Soil pH
        #[arg(long)]
        soil_ph: Option<f64>,

        /// Air temperature in degrees Celsius
        #[arg(long)]
        temperature: Option<f64>,

        /// Relative humidity in percent
        #[arg(long)]
        humidity: Option<f64>,

        /// Precipitation in millimetres
        #[arg(long)]
        precipitation: Option<f64>,

        /// Care action applied before the first tick
        #[arg(long, value_enum)]
        action: Option<ActionKind>,

        /// Amount for water or fertilize
        #[arg(long)]
        amount: Option<f64>,

        /// Number of ticks to run
        #[arg(short, long, default_value = "1")]
        ticks: usize,

        /// Seed for the pest check
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Show configuration and artifact status
    Info,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ModelKind {
    Growth,
    Crop,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ActionKind {
    Water,
    Fertilize,
    CheckPests,
    Treat,
}

impl ActionKind {
    fn to_action(self, amount: Option<f64>) -> PlantAction {
        match self {
            ActionKind::Water => PlantAction::Water { amount },
            ActionKind::Fertilize => PlantAction::Fertilize { amount },
            ActionKind::CheckPests => PlantAction::CheckPests,
            ActionKind::Treat => PlantAction::Treat,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig {
            level: LogLevel::parse(&cli.log_level),
            ..LogConfig::default()
        }
    };

    let _ = init_logging(&log_config);

    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Train { only, epochs } => cmd_train(config, only, epochs)?,
        Commands::PredictGrowth { values } => cmd_predict_growth(&config, &values)?,
        Commands::Recommend { values, top_k } => {
            let top_k = top_k.unwrap_or(config.default_top_k);
            cmd_recommend(&config, &values, top_k)?;
        }
        Commands::Tick {
            plant_type,
            position,
            water,
            fertilizer,
            soil_ph,
            temperature,
            humidity,
            precipitation,
            action,
            amount,
            ticks,
            seed,
        } => {
            let defaults = WeatherReading::default();
            let weather = WeatherReading::with_conditions(
                temperature.unwrap_or(defaults.temperature),
                humidity.unwrap_or(defaults.humidity),
                precipitation.unwrap_or(defaults.precipitation),
            );
            let setup = TickSetup {
                plant_type,
                position,
                water,
                fertilizer,
                soil_ph,
                action: action.map(|kind| kind.to_action(amount)),
                ticks,
                seed,
            };
            cmd_tick(&config, setup, &weather)?;
        }
        Commands::Info => cmd_info(&config)?,
    }

    Ok(())
}

/// Config file first, then directory overrides from flags or environment
fn resolve_config(cli: &Cli) -> Result<GardenConfig> {
    let mut config = match &cli.config {
        Some(path) => GardenConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?,
        None => GardenConfig::default(),
    };

    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(dir) = &cli.models_dir {
        config.models_dir = dir.clone();
    }

    Ok(config)
}

fn cmd_train(mut config: GardenConfig, only: Option<ModelKind>, epochs: Option<usize>) -> Result<()> {
    if let Some(epochs) = epochs {
        config.growth.epochs = epochs;
        config.crop.epochs = epochs;
    }
    config.validate()?;

    println!("{}", "Loading Dataset...".cyan());
    let table = load_dataset(config.dataset_path())?;
    let stats = table.stats();
    stats.log();
    println!("  📊 Rows:   {}", stats.total_rows);
    println!("  🏷️  Crops:  {}", stats.num_labels());
    println!();

    let store = ArtifactStore::new(&config.models_dir);
    let device = default_device();

    if only != Some(ModelKind::Crop) {
        println!("{}", "Training Growth Model...".green().bold());
        let start = Instant::now();
        train_growth::<TrainingBackend>(&table, &config.growth, &store, &device)?;
        println!(
            "  💾 Saved to {:?} in {}",
            store.growth_model_path(),
            format_duration(start.elapsed().as_secs_f64())
        );
        println!();
    }

    if only != Some(ModelKind::Growth) {
        println!("{}", "Training Crop Recommendation Model...".green().bold());
        let start = Instant::now();
        let artifact = train_crop::<TrainingBackend>(&table, &config.crop, &store, &device)?;
        println!(
            "  💾 Saved to {:?} in {} ({} crops)",
            store.crop_model_path(),
            format_duration(start.elapsed().as_secs_f64()),
            artifact.num_classes()
        );
        println!();
    }

    println!("{}", "Training Complete!".green().bold());
    Ok(())
}

fn cmd_predict_growth(config: &GardenConfig, values: &[f64]) -> Result<()> {
    let sample = Sample::from_slice(values)?;
    let store = ArtifactStore::new(&config.models_dir);
    let artifact = store.load_growth_artifact::<DefaultBackend>(&default_device())?;

    let increment = predict_growth(&artifact, &sample)?;
    info!("Growth prediction: {:.6}", increment);

    println!("{}", "Growth Prediction:".cyan().bold());
    println!(
        "  🌱 Increment: {:.4} {}",
        increment,
        format_percent_bar(increment * 100.0, 20)
    );
    println!("  📈 Per tick:  {:.2}% growth before penalties", increment * 100.0);
    Ok(())
}

fn cmd_recommend(config: &GardenConfig, values: &[f64], top_k: usize) -> Result<()> {
    let sample = Sample::from_slice(values)?;
    let request = CropRecommendationRequest {
        temperature: sample.temperature,
        humidity: sample.humidity,
        rainfall: sample.rainfall,
        soil_n: sample.nitrogen,
        soil_p: sample.phosphorus,
        soil_k: sample.potassium,
        soil_ph: sample.ph,
    };

    let store = ArtifactStore::new(&config.models_dir);
    let artifact = store.load_crop_artifact::<DefaultBackend>(&default_device())?;
    let suggestions = suggest_crops(&artifact, &request, top_k)?;

    println!("{}", "Crop Recommendations:".cyan().bold());
    for (rank, suggestion) in suggestions.iter().enumerate() {
        println!(
            "  {:>2}. {} {:<14} {} {:>6.2}%",
            rank + 1,
            suggestion.emoji,
            suggestion.crop,
            format_percent_bar(suggestion.suitability, 20),
            suggestion.suitability
        );
    }
    Ok(())
}

struct TickSetup {
    plant_type: String,
    position: usize,
    water: Option<f64>,
    fertilizer: Option<f64>,
    soil_ph: Option<f64>,
    action: Option<PlantAction>,
    ticks: usize,
    seed: u64,
}

fn cmd_tick(config: &GardenConfig, setup: TickSetup, weather: &WeatherReading) -> Result<()> {
    let store = ArtifactStore::new(&config.models_dir);
    let model = store.load_growth_artifact::<DefaultBackend>(&default_device())?;

    let mut garden = Garden::new();
    let id = garden.plant(setup.position, &setup.plant_type)?.id;
    if let Some(plant) = garden.get_mut(id) {
        if let Some(water) = setup.water {
            plant.water_level = water;
        }
        if let Some(level) = setup.fertilizer {
            plant.fertilizer_n = level;
            plant.fertilizer_p = level;
            plant.fertilizer_k = level;
        }
        if let Some(ph) = setup.soil_ph {
            plant.soil_ph = ph;
        }
    }

    if let Some(action) = setup.action {
        let mut rng = ChaCha8Rng::seed_from_u64(setup.seed);
        garden.apply_action(id, action, &mut rng)?;
        println!("{} {:?}", "Applied:".yellow(), action);
    }

    println!(
        "{} {:.1}°C, {:.0}% humidity, {:.1} mm",
        "Weather:".cyan(),
        weather.temperature,
        weather.humidity,
        weather.precipitation
    );

    for tick in 0..setup.ticks {
        let plant = garden.update_growth(id, &model, weather)?;
        println!(
            "  Tick {:>3}: growth {} {:>6.2}% | water {:>5.1} | health {:>5.1}",
            tick + 1,
            format_percent_bar(plant.growth_stage, 20),
            plant.growth_stage,
            plant.water_level,
            plant.health
        );
        if plant.is_fully_grown() {
            println!("{}", "Fully grown!".green().bold());
            break;
        }
    }

    let plant = garden.get(id).context("plant disappeared from the garden")?;
    println!();
    println!("{} {} {}", "Plant:".cyan().bold(), crop_emoji(&plant.plant_type), plant.plant_type);
    println!("  {}", serde_json::to_string_pretty(plant)?);
    Ok(())
}

fn cmd_info(config: &GardenConfig) -> Result<()> {
    let store = ArtifactStore::new(&config.models_dir);

    println!("{}", "GardenSim".green().bold());
    println!("  Version:  {}", gardensim::VERSION);
    println!("  Backend:  {}", backend_name());
    println!("  Dataset:  {:?}", config.dataset_path());
    println!("  Models:   {:?}", config.models_dir);
    println!();

    println!("{}", "Artifacts:".cyan().bold());
    println!("  Growth model: {}", status(store.growth_exists()));
    println!("  Crop model:   {}", status(store.crop_exists()));

    if store.crop_exists() {
        let artifact = store.load_crop_artifact::<DefaultBackend>(&default_device())?;
        let crops: Vec<String> = artifact
            .vocabulary
            .classes()
            .iter()
            .map(|crop| format!("{} {}", crop_emoji(crop), crop))
            .collect();
        println!("  Crops ({}): {}", crops.len(), crops.join(", "));
    }
    Ok(())
}

fn status(present: bool) -> colored::ColoredString {
    if present {
        "present".green()
    } else {
        "missing (run `gardensim train`)".yellow()
    }
}
