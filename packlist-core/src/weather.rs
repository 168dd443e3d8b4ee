//! Climate inference from a current-weather reading.
//!
//! Fetching the reading is the caller's concern; this module only maps it
//! onto the closed [`Climate`] set a [`TripProfile`](crate::TripProfile) uses.
use serde::{Deserialize, Serialize};

use crate::constants::{COLD_THRESHOLD_C, HOT_THRESHOLD_C};
use crate::profile::Climate;

/// Coarse weather condition, as reported by common weather APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    #[default]
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
}

impl WeatherCondition {
    pub const ALL: [Self; 7] = [
        Self::Clear,
        Self::Clouds,
        Self::Rain,
        Self::Drizzle,
        Self::Thunderstorm,
        Self::Snow,
        Self::Mist,
    ];

    /// Precipitation that calls for rain gear.
    #[must_use]
    pub const fn is_wet(self) -> bool {
        matches!(self, Self::Rain | Self::Drizzle | Self::Thunderstorm)
    }

    /// Parse an API condition label such as `"Rain"` or `"Haze"`.
    /// Atmospheric labels (haze, fog, smoke, dust) read as mist.
    #[must_use]
    pub fn from_api_label(label: &str) -> Option<Self> {
        let condition = match label.trim().to_ascii_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" | "cloudy" => Self::Clouds,
            "rain" => Self::Rain,
            "drizzle" => Self::Drizzle,
            "thunderstorm" => Self::Thunderstorm,
            "snow" => Self::Snow,
            "mist" | "haze" | "fog" | "smoke" | "dust" => Self::Mist,
            _ => return None,
        };
        Some(condition)
    }
}

/// One observation: temperature in degrees Celsius plus a condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_c: f32,
    pub condition: WeatherCondition,
}

impl WeatherReading {
    #[must_use]
    pub const fn new(temperature_c: f32, condition: WeatherCondition) -> Self {
        Self {
            temperature_c,
            condition,
        }
    }

    #[must_use]
    pub fn climate(&self) -> Climate {
        infer_climate(self)
    }
}

/// Wet conditions win over temperature; snow or cold air reads as cold.
#[must_use]
pub fn infer_climate(reading: &WeatherReading) -> Climate {
    if reading.condition.is_wet() {
        Climate::Rainy
    } else if reading.condition == WeatherCondition::Snow
        || reading.temperature_c < COLD_THRESHOLD_C
    {
        Climate::Cold
    } else if reading.temperature_c >= HOT_THRESHOLD_C {
        Climate::Hot
    } else {
        Climate::Moderate
    }
}
