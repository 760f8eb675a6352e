//! Weather readings consumed by the growth tick

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions at the garden's location
///
/// Fetching readings is left to the caller; when no reading is available
/// the default stands in for it. Fields absent from a serialized reading
/// take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherReading {
    /// Air temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Precipitation in millimetres, used as the rainfall feature
    pub precipitation: f64,
    pub condition: String,
    pub location: String,
    pub region: String,
    pub country: String,
    pub timestamp: DateTime<Utc>,
}

impl Default for WeatherReading {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            humidity: 60.0,
            precipitation: 0.0,
            condition: "Unknown".to_string(),
            location: "Unknown".to_string(),
            region: String::new(),
            country: String::new(),
            timestamp: Utc::now(),
        }
    }
}

impl WeatherReading {
    /// Default reading with the given numeric values
    pub fn with_conditions(temperature: f64, humidity: f64, precipitation: f64) -> Self {
        Self {
            temperature,
            humidity,
            precipitation,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reading() {
        let reading = WeatherReading::default();
        assert_eq!(reading.temperature, 25.0);
        assert_eq!(reading.humidity, 60.0);
        assert_eq!(reading.precipitation, 0.0);
        assert_eq!(reading.condition, "Unknown");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"temperature": 30.0, "location": "Ghent"}"#;
        let reading: WeatherReading = serde_json::from_str(json).unwrap();

        assert_eq!(reading.temperature, 30.0);
        assert_eq!(reading.humidity, 60.0);
        assert_eq!(reading.precipitation, 0.0);
        assert_eq!(reading.condition, "Unknown");
        assert_eq!(reading.location, "Ghent");
    }

    #[test]
    fn test_empty_json_is_default_reading() {
        let reading: WeatherReading = serde_json::from_str("{}").unwrap();
        assert_eq!(reading.temperature, 25.0);
        assert_eq!(reading.humidity, 60.0);
        assert_eq!(reading.precipitation, 0.0);
    }
}
