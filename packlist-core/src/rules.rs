//! Rule tables mapping destination, trip type and climate to essentials.
//!
//! Destinations form an open set keyed by normalized name with an explicit
//! default record. Trip types and climates are closed enums, but a rule book
//! loaded from JSON may still omit entries; every lookup therefore resolves
//! through a `resolve_*` function that falls back to the book's default.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::constants::DEFAULT_ITEM_CATEGORY;
use crate::data::{DEFAULT_RULES_DATA, DataError, parse_embedded, parse_json};
use crate::profile::{Climate, TripProfile, TripType};

/// Destination-specific essentials and category filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LocationRule {
    /// Typical climate; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climate: Option<Climate>,
    #[serde(default)]
    pub essentials: Vec<String>,
    /// Product categories that suit the destination.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Product categories never matched for the destination.
    #[serde(default)]
    pub avoid: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TripTypeRule {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub essentials: Vec<String>,
}

/// Climate essentials. Materials, colors and avoid lists are descriptive
/// metadata and take no part in product filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClimateRule {
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub avoid: Vec<String>,
    #[serde(default)]
    pub essentials: Vec<String>,
}

/// Complete rule configuration for list generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RuleBook {
    #[serde(default)]
    pub locations: BTreeMap<String, LocationRule>,
    #[serde(default)]
    pub default_location: LocationRule,
    #[serde(default)]
    pub trip_types: BTreeMap<TripType, TripTypeRule>,
    #[serde(default)]
    pub default_trip_type: TripTypeRule,
    #[serde(default)]
    pub climates: BTreeMap<Climate, ClimateRule>,
    /// Used when the profile has no climate or the book has no entry for it.
    #[serde(default)]
    pub default_climate: ClimateRule,
    /// Lowercase item name to display category.
    #[serde(default)]
    pub item_categories: BTreeMap<String, String>,
    /// Lowercase item name to description template.
    #[serde(default)]
    pub descriptions: BTreeMap<String, String>,
}

/// The three rule records that apply to one profile.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRules<'a> {
    pub location: &'a LocationRule,
    pub trip_type: &'a TripTypeRule,
    pub climate: &'a ClimateRule,
    pub location_matched: bool,
}

impl<'a> ResolvedRules<'a> {
    /// Essential item names in rule order: location, trip type, climate.
    /// Names listed by more than one source appear more than once.
    pub fn essentials(self) -> impl Iterator<Item = &'a str> {
        self.location
            .essentials
            .iter()
            .chain(&self.trip_type.essentials)
            .chain(&self.climate.essentials)
            .map(String::as_str)
    }

    /// Allowed product categories: location first, then trip type.
    pub fn allowed_categories(self) -> impl Iterator<Item = &'a str> {
        self.location
            .categories
            .iter()
            .chain(&self.trip_type.categories)
            .map(String::as_str)
    }
}

impl RuleBook {
    /// Load a rule book from JSON, normalizing destination and item keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or two destinations
    /// collide after normalization.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let book: Self = parse_json(json)?;
        book.normalized()
    }

    fn normalized(self) -> Result<Self, DataError> {
        let mut locations = BTreeMap::new();
        for (name, rule) in self.locations {
            let key = normalize_key(&name);
            if key.is_empty() {
                return Err(DataError::invalid("rules", "empty destination key"));
            }
            if locations.insert(key.clone(), rule).is_some() {
                return Err(DataError::invalid(
                    "rules",
                    format!("destination {key} defined more than once"),
                ));
            }
        }
        let item_categories = self
            .item_categories
            .into_iter()
            .map(|(item, category)| (normalize_key(&item), category))
            .collect();
        let descriptions = self
            .descriptions
            .into_iter()
            .map(|(item, template)| (normalize_key(&item), template))
            .collect();
        Ok(Self {
            locations,
            item_categories,
            descriptions,
            ..self
        })
    }

    /// The rule book embedded in the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        let book: Self = parse_embedded("rules", DEFAULT_RULES_DATA);
        book.normalized().unwrap_or_else(|err| {
            log::warn!("embedded rules failed validation: {err}");
            Self::default()
        })
    }

    /// Rule book with no entries and empty defaults.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rule for `destination`, matched case-insensitively, else the default.
    #[must_use]
    pub fn resolve_location(&self, destination: &str) -> (&LocationRule, bool) {
        self.locations
            .get(&normalize_key(destination))
            .map_or((&self.default_location, false), |rule| (rule, true))
    }

    #[must_use]
    pub fn resolve_trip_type(&self, trip_type: TripType) -> &TripTypeRule {
        self.trip_types
            .get(&trip_type)
            .unwrap_or(&self.default_trip_type)
    }

    #[must_use]
    pub fn resolve_climate(&self, climate: Option<Climate>) -> &ClimateRule {
        climate
            .and_then(|climate| self.climates.get(&climate))
            .unwrap_or(&self.default_climate)
    }

    #[must_use]
    pub fn resolve(&self, profile: &TripProfile) -> ResolvedRules<'_> {
        let (location, location_matched) = self.resolve_location(&profile.destination);
        ResolvedRules {
            location,
            trip_type: self.resolve_trip_type(profile.trip_type),
            climate: self.resolve_climate(profile.climate),
            location_matched,
        }
    }

    /// Display category for an item name, defaulting to accessories.
    #[must_use]
    pub fn category_for_item(&self, item: &str) -> &str {
        self.item_categories
            .get(&normalize_key(item))
            .map_or(DEFAULT_ITEM_CATEGORY, String::as_str)
    }

    #[must_use]
    pub fn description_template(&self, item: &str) -> Option<&str> {
        self.descriptions
            .get(&normalize_key(item))
            .map(String::as_str)
    }

    /// Known destination keys in sorted order.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Shared handle to the embedded rule book.
#[must_use]
pub fn builtin_rules() -> &'static RuleBook {
    static RULES: OnceLock<RuleBook> = OnceLock::new();
    RULES.get_or_init(RuleBook::load_from_static)
}

/// Substitute `{destination}`, `{duration}`, `{trip_type}` and `{travelers}`.
#[must_use]
pub fn fill_template(template: &str, profile: &TripProfile) -> String {
    template
        .replace("{destination}", &profile.destination)
        .replace("{duration}", &profile.duration.to_string())
        .replace("{trip_type}", profile.trip_type.as_str())
        .replace("{travelers}", &profile.travelers.to_string())
}
