//! Packing-list generation.
//!
//! Generation never fails: every rule lookup resolves to a default record,
//! unmatched items simply carry no product, and an empty result is replaced
//! by a fixed generic set.
use chrono::{DateTime, Utc};
use rand::{Rng, RngCore};

use crate::catalog::{Product, products_in_category};
use crate::constants::{
    DEFAULT_ITEM_CATEGORY, ESSENTIAL_ID_PREFIX, ESSENTIAL_REASONS, FALLBACK_DESCRIPTION,
    FALLBACK_ID_PREFIX, FALLBACK_ITEMS, FALLBACK_REASON, GENERIC_DESCRIPTION, LIST_ID_PREFIX,
    LUXURY_CATEGORIES, OPTIONAL_DESCRIPTION, OPTIONAL_ID_PREFIX, OPTIONAL_MAX, OPTIONAL_MIN,
    OPTIONAL_REASON, RECOMMENDED_DESCRIPTION, RECOMMENDED_ID_PREFIX, RECOMMENDED_MAX,
    RECOMMENDED_MIN, RECOMMENDED_REASON,
};
use crate::matching::{CategoryFilter, calculate_quantity, find_matching_products};
use crate::packing::{PackingItem, PackingList, Priority};
use crate::profile::TripProfile;
use crate::rng::PackingRngs;
use crate::rules::{ResolvedRules, RuleBook, builtin_rules, fill_template};

/// Uniform pick from a slice; `None` when empty.
fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.gen_range(0..items.len()))
}

/// Generates packing lists against one rule book.
#[derive(Debug, Clone, Copy)]
pub struct PackingEngine<'r> {
    rules: &'r RuleBook,
}

impl PackingEngine<'static> {
    /// Engine over the embedded rule book.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin_rules())
    }
}

impl<'r> PackingEngine<'r> {
    #[must_use]
    pub const fn new(rules: &'r RuleBook) -> Self {
        Self { rules }
    }

    #[must_use]
    pub const fn rules(&self) -> &'r RuleBook {
        self.rules
    }

    /// Generate a list seeded by `seed`, stamped with the current time.
    #[must_use]
    pub fn generate(&self, profile: &TripProfile, catalog: &[Product], seed: u64) -> PackingList {
        let rngs = PackingRngs::from_user_seed(seed);
        self.generate_with(profile, catalog, &rngs, Utc::now())
    }

    /// Generate a list with randomness and clock supplied by the caller.
    #[must_use]
    pub fn generate_with(
        &self,
        profile: &TripProfile,
        catalog: &[Product],
        rngs: &PackingRngs,
        generated_at: DateTime<Utc>,
    ) -> PackingList {
        let resolved = self.rules.resolve(profile);
        if !resolved.location_matched {
            log::debug!(
                "no rules for destination {:?}; using default location",
                profile.destination
            );
        }

        let mut items = self.essential_items(profile, &resolved, catalog, rngs);
        let essential_count = items.len();
        items.extend(recommended_items(profile, &resolved, catalog, rngs));
        let recommended_count = items.len() - essential_count;
        items.extend(optional_items(profile, catalog, rngs));
        let optional_count = items.len() - essential_count - recommended_count;
        log::debug!(
            "generated {essential_count} essential, {recommended_count} recommended, \
             {optional_count} optional items"
        );

        if items.is_empty() {
            log::warn!(
                "no items generated for {:?}; emitting generic essentials",
                profile.destination
            );
            items = fallback_items(profile);
        }

        let id = format!("{LIST_ID_PREFIX}-{:016x}", rngs.identity().next_u64());
        PackingList::new(id, profile.clone(), items, generated_at)
    }

    fn essential_items(
        &self,
        profile: &TripProfile,
        resolved: &ResolvedRules<'_>,
        catalog: &[Product],
        rngs: &PackingRngs,
    ) -> Vec<PackingItem> {
        let filter = CategoryFilter::from_rules(resolved);
        resolved
            .essentials()
            .enumerate()
            .map(|(index, name)| {
                let matches = find_matching_products(name, catalog, &filter);
                let product = pick(&mut *rngs.matching(), &matches).map(|p| (*p).clone());
                log::debug!("{name}: {} catalog matches", matches.len());
                let description = fill_template(
                    self.rules
                        .description_template(name)
                        .unwrap_or(GENERIC_DESCRIPTION),
                    profile,
                );
                let reason = pick(&mut *rngs.copy(), &ESSENTIAL_REASONS)
                    .map(|template| fill_template(template, profile))
                    .unwrap_or_default();
                PackingItem {
                    id: format!("{ESSENTIAL_ID_PREFIX}-{}", index + 1),
                    category: self.rules.category_for_item(name).to_string(),
                    name: name.to_string(),
                    description,
                    quantity: calculate_quantity(name, profile),
                    priority: Priority::Essential,
                    product,
                    is_selected: true,
                    reason,
                }
            })
            .collect()
    }
}

/// Settings for a supplementary tier drawn from catalog categories.
struct Tier<'a> {
    priority: Priority,
    id_prefix: &'static str,
    description: &'static str,
    reason: &'static str,
    categories: &'a [&'a str],
}

fn tier_items(
    tier: &Tier<'_>,
    count: usize,
    profile: &TripProfile,
    catalog: &[Product],
    rng: &mut impl RngCore,
) -> Vec<PackingItem> {
    let mut items = Vec::with_capacity(count);
    for index in 0..count {
        let Some(category) = pick(rng, tier.categories) else {
            break;
        };
        let in_category: Vec<&Product> = products_in_category(catalog, category).collect();
        let Some(product) = pick(rng, &in_category) else {
            continue;
        };
        items.push(PackingItem {
            id: format!("{}-{}", tier.id_prefix, index + 1),
            category: (*category).to_string(),
            name: product.title.clone(),
            description: fill_template(tier.description, profile),
            quantity: 1,
            priority: tier.priority,
            product: Some((*product).clone()),
            is_selected: false,
            reason: fill_template(tier.reason, profile),
        });
    }
    items
}

fn recommended_items(
    profile: &TripProfile,
    resolved: &ResolvedRules<'_>,
    catalog: &[Product],
    rngs: &PackingRngs,
) -> Vec<PackingItem> {
    let categories: Vec<&str> = resolved
        .location
        .categories
        .iter()
        .map(String::as_str)
        .collect();
    let tier = Tier {
        priority: Priority::Recommended,
        id_prefix: RECOMMENDED_ID_PREFIX,
        description: RECOMMENDED_DESCRIPTION,
        reason: RECOMMENDED_REASON,
        categories: &categories,
    };
    let mut rng = rngs.recommend();
    let count = rng.gen_range(RECOMMENDED_MIN..=RECOMMENDED_MAX);
    tier_items(&tier, count, profile, catalog, &mut *rng)
}

fn optional_items(
    profile: &TripProfile,
    catalog: &[Product],
    rngs: &PackingRngs,
) -> Vec<PackingItem> {
    let tier = Tier {
        priority: Priority::Optional,
        id_prefix: OPTIONAL_ID_PREFIX,
        description: OPTIONAL_DESCRIPTION,
        reason: OPTIONAL_REASON,
        categories: &LUXURY_CATEGORIES,
    };
    let mut rng = rngs.optional();
    let count = rng.gen_range(OPTIONAL_MIN..=OPTIONAL_MAX);
    tier_items(&tier, count, profile, catalog, &mut *rng)
}

fn fallback_items(profile: &TripProfile) -> Vec<PackingItem> {
    FALLBACK_ITEMS
        .iter()
        .enumerate()
        .map(|(index, name)| PackingItem {
            id: format!("{FALLBACK_ID_PREFIX}-{}", index + 1),
            category: DEFAULT_ITEM_CATEGORY.to_string(),
            name: (*name).to_string(),
            description: fill_template(FALLBACK_DESCRIPTION, profile),
            quantity: 1,
            priority: Priority::Essential,
            product: None,
            is_selected: true,
            reason: FALLBACK_REASON.to_string(),
        })
        .collect()
}

/// Generate with the embedded rules and a pinned seed.
#[must_use]
pub fn generate_seeded(profile: &TripProfile, catalog: &[Product], seed: u64) -> PackingList {
    PackingEngine::builtin().generate(profile, catalog, seed)
}

/// Wait out a presentation delay, then generate.
#[cfg(feature = "async")]
pub async fn generate_after(
    delay: std::time::Duration,
    engine: PackingEngine<'_>,
    profile: &TripProfile,
    catalog: &[Product],
    seed: u64,
) -> PackingList {
    tokio::time::sleep(delay).await;
    engine.generate(profile, catalog, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_catalog;
    use crate::profile::{Climate, TripType};
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn goa_beach() -> TripProfile {
        TripProfile::new("goa", TripType::Beach, 3, 2).with_climate(Climate::Hot)
    }

    #[test]
    fn same_seed_and_clock_reproduce_the_list() {
        let engine = PackingEngine::builtin();
        let catalog = sample_catalog().as_slice();
        let generate = || {
            let rngs = PackingRngs::from_user_seed(5);
            engine.generate_with(&goa_beach(), catalog, &rngs, fixed_time())
        };
        let a = generate();
        let b = generate();
        assert_eq!(a, b);
        assert!(a.id().starts_with("list-"));
        assert_eq!(a.id().len(), "list-".len() + 16);
    }

    #[test]
    fn tiers_are_ordered_and_sized() {
        let catalog = sample_catalog().as_slice();
        for seed in 0..40 {
            let list = generate_seeded(&goa_beach(), catalog, seed);
            let priorities: Vec<_> = list.items().iter().map(|i| i.priority).collect();
            let mut sorted = priorities.clone();
            sorted.sort();
            assert_eq!(priorities, sorted, "seed {seed}");
            assert!(list.items_with_priority(Priority::Recommended).count() <= RECOMMENDED_MAX);
            assert!(list.items_with_priority(Priority::Optional).count() <= OPTIONAL_MAX);
            assert_eq!(list.items_with_priority(Priority::Essential).count(), 13);
        }
    }

    #[test]
    fn stocked_categories_fill_tiers_to_their_minimum() {
        let (goa, _) = builtin_rules().resolve_location("goa");
        let catalog: Vec<Product> = goa
            .categories
            .iter()
            .map(String::as_str)
            .chain(LUXURY_CATEGORIES)
            .enumerate()
            .map(|(index, category)| {
                Product::new(format!("stock-{index}"), format!("{category} pick"), category, 500)
            })
            .collect();
        for seed in 0..60 {
            let list = generate_seeded(&goa_beach(), &catalog, seed);
            for (priority, prefix, range) in [
                (Priority::Recommended, RECOMMENDED_ID_PREFIX, RECOMMENDED_MIN..=RECOMMENDED_MAX),
                (Priority::Optional, OPTIONAL_ID_PREFIX, OPTIONAL_MIN..=OPTIONAL_MAX),
            ] {
                let ids: Vec<_> = list
                    .items_with_priority(priority)
                    .map(|item| item.id.clone())
                    .collect();
                assert!(range.contains(&ids.len()), "seed {seed}: {ids:?}");
                let expected: Vec<_> = (1..=ids.len()).map(|n| format!("{prefix}-{n}")).collect();
                assert_eq!(ids, expected, "seed {seed}");
            }
        }
    }

    #[test]
    fn essential_ids_number_rule_order_including_duplicates() {
        let list = generate_seeded(&goa_beach(), &[], 1);
        let essentials: Vec<_> = list.items_with_priority(Priority::Essential).collect();
        assert_eq!(essentials[0].id, "item-1");
        assert_eq!(essentials[0].name, "swimwear");
        assert_eq!(essentials.last().map(|i| i.id.as_str()), Some("item-13"));
        let swimwear = essentials.iter().filter(|i| i.name == "swimwear").count();
        assert_eq!(swimwear, 2);
    }

    #[test]
    fn empty_catalog_yields_only_unmatched_essentials() {
        let list = generate_seeded(&goa_beach(), &[], 9);
        assert!(list.items().iter().all(|i| i.priority == Priority::Essential));
        assert!(list.items().iter().all(|i| i.product.is_none()));
        assert_eq!(list.selected_count(), list.total_items());
    }

    #[test]
    fn empty_rule_book_falls_back_to_generic_set() {
        let rules = RuleBook::empty();
        let engine = PackingEngine::new(&rules);
        let profile = TripProfile::new("nowhere", TripType::Leisure, 1, 1);
        let list = engine.generate(&profile, &[], 3);
        let names: Vec<_> = list.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, FALLBACK_ITEMS.to_vec());
        assert!(list.items().iter().all(|i| i.id.starts_with("fallback-")));
        assert_eq!(
            list.items()[0].description,
            "Essential item for your trip to nowhere"
        );
    }

    #[test]
    fn recommended_items_come_from_location_categories() {
        let catalog = sample_catalog().as_slice();
        let (goa, _) = builtin_rules().resolve_location("goa");
        for seed in 0..30 {
            let list = generate_seeded(&goa_beach(), catalog, seed);
            for item in list.items_with_priority(Priority::Recommended) {
                assert!(goa.categories.contains(&item.category), "{}", item.category);
                let product = item.product.as_ref().unwrap();
                assert_eq!(product.title, item.name);
                assert_eq!(item.quantity, 1);
                assert!(!item.is_selected);
            }
            for item in list.items_with_priority(Priority::Optional) {
                assert!(LUXURY_CATEGORIES.contains(&item.category.as_str()));
            }
        }
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn generate_after_matches_immediate_generation() {
        let engine = PackingEngine::builtin();
        let catalog = sample_catalog().as_slice();
        let delayed = generate_after(
            std::time::Duration::from_millis(1),
            engine,
            &goa_beach(),
            catalog,
            21,
        )
        .await;
        let immediate = engine.generate(&goa_beach(), catalog, 21);
        assert_eq!(delayed.items(), immediate.items());
        assert_eq!(delayed.id(), immediate.id());
    }

    #[test]
    fn reason_templates_are_filled() {
        let list = generate_seeded(&goa_beach(), &[], 11);
        for item in list.items() {
            assert!(!item.reason.contains('{'), "{}", item.reason);
            assert!(!item.description.contains('{'), "{}", item.description);
        }
        assert_eq!(list.items()[0].description, "Essential for goa beach activities");
    }
}
