//! Trip profile: the input to list generation.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::MAX_TRIP_DAYS;

/// Kind of trip being planned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    #[default]
    Leisure,
    Business,
    Adventure,
    Beach,
    Mountain,
    City,
}

impl TripType {
    pub const ALL: [Self; 6] = [
        Self::Leisure,
        Self::Business,
        Self::Adventure,
        Self::Beach,
        Self::Mountain,
        Self::City,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leisure => "leisure",
            Self::Business => "business",
            Self::Adventure => "adventure",
            Self::Beach => "beach",
            Self::Mountain => "mountain",
            Self::City => "city",
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripType {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| ProfileError::UnknownTripType(s.to_string()))
    }
}

/// Expected weather at the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Climate {
    Hot,
    Cold,
    Moderate,
    Rainy,
}

impl Climate {
    pub const ALL: [Self; 4] = [Self::Hot, Self::Cold, Self::Moderate, Self::Rainy];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Cold => "cold",
            Self::Moderate => "moderate",
            Self::Rainy => "rainy",
        }
    }
}

impl fmt::Display for Climate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Climate {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|climate| climate.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| ProfileError::UnknownClimate(s.to_string()))
    }
}

/// Reasons a caller-supplied profile is rejected before generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("destination must not be empty")]
    EmptyDestination,
    #[error("trip duration must be at least one day")]
    ZeroDuration,
    #[error("trip duration of {0} days exceeds the {max} day limit", max = MAX_TRIP_DAYS)]
    DurationTooLong(u32),
    #[error("at least one traveler is required")]
    ZeroTravelers,
    #[error("unknown trip type: {0}")]
    UnknownTripType(String),
    #[error("unknown climate: {0}")]
    UnknownClimate(String),
}

/// Parameters of one trip. Immutable for the duration of a generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripProfile {
    pub destination: String,
    pub trip_type: TripType,
    /// Length of the trip in days.
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climate: Option<Climate>,
    pub travelers: u32,
    /// Free-text annotation; never consulted by the rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
}

impl TripProfile {
    #[must_use]
    pub fn new(
        destination: impl Into<String>,
        trip_type: TripType,
        duration: u32,
        travelers: u32,
    ) -> Self {
        Self {
            destination: destination.into(),
            trip_type,
            duration,
            climate: None,
            travelers,
            occasion: None,
        }
    }

    #[must_use]
    pub const fn with_climate(mut self, climate: Climate) -> Self {
        self.climate = Some(climate);
        self
    }

    #[must_use]
    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = Some(occasion.into());
        self
    }

    /// Check the profile the way an input form would before generating.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProfileError`] the profile violates.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.destination.trim().is_empty() {
            return Err(ProfileError::EmptyDestination);
        }
        if self.duration == 0 {
            return Err(ProfileError::ZeroDuration);
        }
        if self.duration > MAX_TRIP_DAYS {
            return Err(ProfileError::DurationTooLong(self.duration));
        }
        if self.travelers == 0 {
            return Err(ProfileError::ZeroTravelers);
        }
        Ok(())
    }
}
