//! Loose product matching and quantity scaling for packing items.
use smallvec::SmallVec;

use crate::catalog::Product;
use crate::constants::{
    CLOTHING_DAY_CAP, CLOTHING_KEYWORDS, CONSUMABLE_DAYS_PER_UNIT, CONSUMABLE_KEYWORDS,
    FOOTWEAR_KEYWORDS,
};
use crate::profile::TripProfile;
use crate::rules::ResolvedRules;

/// Lowercased category filters built once per generation call.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    allowed: SmallVec<[String; 8]>,
    avoid: SmallVec<[String; 4]>,
}

impl CategoryFilter {
    #[must_use]
    pub fn new<'a>(
        allowed: impl IntoIterator<Item = &'a str>,
        avoid: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            allowed: allowed.into_iter().map(str::to_lowercase).collect(),
            avoid: avoid.into_iter().map(str::to_lowercase).collect(),
        }
    }

    /// Allowed categories from location and trip type; avoid list from location.
    #[must_use]
    pub fn from_rules(rules: &ResolvedRules<'_>) -> Self {
        Self::new(
            rules.allowed_categories(),
            rules.location.avoid.iter().map(String::as_str),
        )
    }

    /// Category overlaps an allowed category, as a substring either way.
    #[must_use]
    pub fn allows(&self, product: &Product) -> bool {
        let category = product.category.to_lowercase();
        self.allowed
            .iter()
            .any(|allowed| category.contains(allowed.as_str()) || allowed.contains(&category))
    }

    /// Category contains one of the excluded categories.
    #[must_use]
    pub fn excludes(&self, product: &Product) -> bool {
        let category = product.category.to_lowercase();
        self.avoid
            .iter()
            .any(|avoid| category.contains(avoid.as_str()))
    }
}

/// Whether a product's text mentions the item, or the item names the category.
#[must_use]
pub fn mentions_item(product: &Product, item: &str) -> bool {
    let item = item.to_lowercase();
    let category = product.category.to_lowercase();
    product.title.to_lowercase().contains(&item)
        || product.description.to_lowercase().contains(&item)
        || category.contains(&item)
        || item.contains(&category)
        || product.brand.to_lowercase().contains(&item)
}

/// Catalog entries eligible to back an essential item.
///
/// Matching is deliberately permissive: short item names can pull in
/// unrelated products that happen to share a substring.
#[must_use]
pub fn find_matching_products<'c>(
    item: &str,
    products: &'c [Product],
    filter: &CategoryFilter,
) -> Vec<&'c Product> {
    products
        .iter()
        .filter(|product| {
            filter.allows(product) && !filter.excludes(product) && mentions_item(product, item)
        })
        .collect()
}

/// How an item's quantity scales with the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityRule {
    /// One per day per traveler, capped at a week.
    Clothing,
    /// One per few days per traveler.
    Consumable,
    /// One pair per traveler.
    Footwear,
    /// One per traveler.
    PerTraveler,
}

impl QuantityRule {
    /// Classify an item name by keyword; earlier rules win.
    #[must_use]
    pub fn for_item(item: &str) -> Self {
        let item = item.to_lowercase();
        let has_any = |keywords: &[&str]| keywords.iter().any(|kw| item.contains(kw));
        if has_any(&CLOTHING_KEYWORDS) {
            Self::Clothing
        } else if has_any(&CONSUMABLE_KEYWORDS) {
            Self::Consumable
        } else if has_any(&FOOTWEAR_KEYWORDS) {
            Self::Footwear
        } else {
            Self::PerTraveler
        }
    }

    /// Quantity for `profile`; never below one.
    #[must_use]
    pub fn quantity(self, profile: &TripProfile) -> u32 {
        let travelers = profile.travelers;
        let qty = match self {
            Self::Clothing => profile.duration.min(CLOTHING_DAY_CAP).saturating_mul(travelers),
            Self::Consumable => profile
                .duration
                .div_ceil(CONSUMABLE_DAYS_PER_UNIT)
                .saturating_mul(travelers),
            Self::Footwear | Self::PerTraveler => travelers,
        };
        qty.max(1)
    }
}

/// Quantity to pack of `item` for `profile`.
#[must_use]
pub fn calculate_quantity(item: &str, profile: &TripProfile) -> u32 {
    QuantityRule::for_item(item).quantity(profile)
}
