//! Logging Module
//!
//! Provides structured logging utilities using the `tracing` crate.
//! Supports various output formats and log levels for debugging and normal use.

use std::time::Instant;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level to display
    pub level: LogLevel,
    /// Whether to include target (module path)
    pub include_target: bool,
    /// Whether to include thread IDs
    pub include_thread_ids: bool,
    /// Whether to use ANSI colors
    pub ansi_colors: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            include_target: false,
            include_thread_ids: false,
            ansi_colors: true,
        }
    }
}

impl LogConfig {
    /// Create a verbose logging config for debugging
    pub fn verbose() -> Self {
        Self {
            level: LogLevel::Debug,
            include_target: true,
            include_thread_ids: true,
            ansi_colors: true,
        }
    }
}

/// Log level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert to tracing Level
    pub fn to_tracing_level(&self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    /// Parse a level name, falling back to `Info`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Initialize logging with the given configuration
///
/// # Returns
/// * `Result<(), String>` - Ok if logging was initialized, Err with message otherwise
pub fn init_logging(config: &LogConfig) -> Result<(), String> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.level.to_tracing_level())
        .with_ansi(config.ansi_colors)
        .with_target(config.include_target)
        .with_thread_ids(config.include_thread_ids)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Epoch progress logger for the fixed-length training loops
///
/// Emits one line every `log_interval` epochs and a completion line.
pub struct TrainingLogger {
    model_name: &'static str,
    total_epochs: usize,
    log_interval: usize,
    training_start: Instant,
}

impl TrainingLogger {
    /// Create a new training logger
    pub fn new(model_name: &'static str, total_epochs: usize, log_interval: usize) -> Self {
        Self {
            model_name,
            total_epochs,
            log_interval: log_interval.max(1),
            training_start: Instant::now(),
        }
    }

    /// Whether `epoch` (zero based) falls on a logging boundary
    pub fn should_log(&self, epoch: usize) -> bool {
        (epoch + 1) % self.log_interval == 0
    }

    /// Log the loss at the end of an epoch if it falls on the interval
    pub fn end_epoch(&self, epoch: usize, loss: f64) {
        if self.should_log(epoch) {
            tracing::info!(
                "{} - Epoch [{}/{}], Loss: {:.4}",
                self.model_name,
                epoch + 1,
                self.total_epochs,
                loss
            );
        }
    }

    /// Log training completion
    pub fn log_complete(&self, final_loss: f64) {
        let total_time = self.training_start.elapsed();

        tracing::info!(
            "{} training complete: {} epochs in {:.1}s | Final loss: {:.4}",
            self.model_name,
            self.total_epochs,
            total_time.as_secs_f64(),
            final_loss
        );
    }
}
