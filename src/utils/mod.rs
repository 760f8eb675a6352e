//! Utilities module for logging, error handling and formatting helpers

pub mod error;
pub mod logging;

// Re-export main types for convenience
pub use error::{GardenError, Result};
pub use logging::{init_logging, LogConfig, LogLevel, TrainingLogger};

/// Format a duration in a human-readable way
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else if seconds < 3600.0 {
        let minutes = (seconds / 60.0).floor();
        let secs = seconds % 60.0;
        format!("{}m {:.0}s", minutes as u32, secs)
    } else {
        let hours = (seconds / 3600.0).floor();
        let minutes = ((seconds % 3600.0) / 60.0).floor();
        format!("{}h {}m", hours as u32, minutes as u32)
    }
}

/// Render a 0-100 value as a fixed-width bar, e.g. `[#####-----]`
pub fn format_percent_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30.5), "30.5s");
        assert_eq!(format_duration(90.0), "1m 30s");
        assert_eq!(format_duration(3720.0), "1h 2m");
    }

    #[test]
    fn test_format_percent_bar() {
        assert_eq!(format_percent_bar(50.0, 10), "[#####-----]");
        assert_eq!(format_percent_bar(0.0, 4), "[----]");
        assert_eq!(format_percent_bar(150.0, 4), "[####]");
    }
}
