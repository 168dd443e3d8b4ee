//! Centralized tuning constants for packing-list generation.
//!
//! Quantity scaling, tier sizes and the generic fallback set are fixed here so
//! that list shape only changes through reviewed code, while the rule tables
//! themselves stay in the JSON assets.

// Quantity scaling ---------------------------------------------------------
/// Clothing quantities never plan for more than a week of outfits.
pub const CLOTHING_DAY_CAP: u32 = 7;
/// One consumable unit lasts this many days.
pub const CONSUMABLE_DAYS_PER_UNIT: u32 = 3;

pub(crate) const CLOTHING_KEYWORDS: [&str; 3] = ["clothes", "shirt", "dress"];
pub(crate) const CONSUMABLE_KEYWORDS: [&str; 2] = ["sunscreen", "toiletries"];
pub(crate) const FOOTWEAR_KEYWORDS: [&str; 2] = ["shoes", "boots"];

// Tier sizes ---------------------------------------------------------------
pub const RECOMMENDED_MIN: usize = 3;
pub const RECOMMENDED_MAX: usize = 5;
pub const OPTIONAL_MIN: usize = 2;
pub const OPTIONAL_MAX: usize = 3;

/// Categories optional picks are drawn from, independent of any rule table.
pub const LUXURY_CATEGORIES: [&str; 4] = ["Accessories", "Beauty", "Bags", "Jewelry"];

// Item naming --------------------------------------------------------------
pub const DEFAULT_ITEM_CATEGORY: &str = "Accessories";

pub(crate) const ESSENTIAL_ID_PREFIX: &str = "item";
pub(crate) const RECOMMENDED_ID_PREFIX: &str = "rec";
pub(crate) const OPTIONAL_ID_PREFIX: &str = "opt";
pub(crate) const FALLBACK_ID_PREFIX: &str = "fallback";
pub(crate) const LIST_ID_PREFIX: &str = "list";

/// Generic essentials emitted when no rule or catalog entry produced an item.
pub const FALLBACK_ITEMS: [&str; 5] = [
    "comfortable clothes",
    "comfortable shoes",
    "toiletries",
    "phone charger",
    "travel documents",
];
pub(crate) const FALLBACK_DESCRIPTION: &str = "Essential item for your trip to {destination}";
pub(crate) const FALLBACK_REASON: &str = "Basic travel essential";

pub(crate) const GENERIC_DESCRIPTION: &str =
    "Recommended for your {trip_type} trip to {destination}";
pub(crate) const ESSENTIAL_REASONS: [&str; 5] = [
    "Essential for {destination} climate",
    "Recommended for {trip_type} activities",
    "Perfect for {duration} day trip",
    "Ideal for {travelers} travelers",
    "Weather-appropriate for {destination}",
];
pub(crate) const RECOMMENDED_DESCRIPTION: &str = "Great addition for your {trip_type} trip";
pub(crate) const RECOMMENDED_REASON: &str = "Popular choice for {destination} trips";
pub(crate) const OPTIONAL_DESCRIPTION: &str = "Nice to have for your trip";
pub(crate) const OPTIONAL_REASON: &str = "Luxury item for {destination}";

// Profile validation -------------------------------------------------------
pub const MAX_TRIP_DAYS: u32 = 365;

// Climate inference --------------------------------------------------------
/// At or above this temperature a destination reads as hot.
pub const HOT_THRESHOLD_C: f32 = 28.0;
/// Below this temperature a destination reads as cold.
pub const COLD_THRESHOLD_C: f32 = 12.0;
