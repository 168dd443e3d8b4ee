use std::hash::Hasher;

use chrono::{TimeZone, Utc};
use packlist_core::{
    Catalog, Climate, GuideBook, PackingEngine, PackingList, PackingRngs, RuleBook, TripProfile,
    TripType, builtin_rules, guide_book, sample_catalog,
};
use serde_json::{Map, Value};
use twox_hash::XxHash64;

#[test]
fn rule_book_snapshot_survives_round_trip() {
    let rules = builtin_rules();
    let before = canonical_digest(&serde_json::to_value(rules).unwrap());

    let json = serde_json::to_string(rules).unwrap();
    let reloaded = RuleBook::from_json(&json).unwrap();
    let after = canonical_digest(&serde_json::to_value(&reloaded).unwrap());

    assert_eq!(before, after, "rule book changed across a JSON round trip");
    assert_eq!(&reloaded, rules);
}

#[test]
fn rule_book_serializes_closed_keys_in_lowercase() {
    let value = serde_json::to_value(builtin_rules()).unwrap();
    let trip_types: Vec<_> = value["trip_types"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    for trip_type in TripType::ALL {
        assert!(trip_types.contains(&trip_type.to_string()), "{trip_type}");
    }
    let climates = value["climates"].as_object().unwrap();
    for climate in Climate::ALL {
        assert!(climates.contains_key(climate.as_str()), "{climate}");
    }
}

#[test]
fn catalog_and_guides_round_trip() {
    let catalog = sample_catalog();
    let reloaded = Catalog::from_json(&serde_json::to_string(catalog).unwrap()).unwrap();
    assert_eq!(&reloaded, catalog);

    let guides = guide_book();
    let reloaded = GuideBook::from_json(&serde_json::to_string(guides).unwrap()).unwrap();
    assert_eq!(&reloaded, guides);
}

#[test]
fn packing_list_serialization_preserves_items_and_counts() {
    let profile = TripProfile::new("goa", TripType::Beach, 5, 3)
        .with_climate(Climate::Hot)
        .with_occasion("anniversary");
    let mut list = PackingEngine::builtin().generate_with(
        &profile,
        sample_catalog().as_slice(),
        &PackingRngs::from_user_seed(0x00C0_FFEE),
        Utc.with_ymd_and_hms(2026, 5, 4, 10, 30, 0).unwrap(),
    );
    let first_optional = list
        .items()
        .iter()
        .find(|item| !item.is_essential())
        .map(|item| item.id.clone());
    if let Some(id) = first_optional {
        assert!(list.set_item_selected(&id, true));
    }

    let saved = serde_json::to_string(&list).unwrap();
    let restored: PackingList = serde_json::from_str(&saved).unwrap();

    assert_eq!(restored, list, "round-trip mismatch");
    assert_eq!(
        canonical_digest(&serde_json::to_value(&restored).unwrap()),
        canonical_digest(&serde_json::to_value(&list).unwrap())
    );
    let value = serde_json::to_value(&list).unwrap();
    assert_eq!(value["trip_profile"]["occasion"], "anniversary");
    assert_eq!(value["items"][0]["priority"], "essential");
    assert_eq!(
        value["selected_items"].as_u64(),
        u64::try_from(list.selected_count()).ok()
    );
}

fn canonical_digest(value: &Value) -> u64 {
    let canonical = serde_json::to_string_pretty(&canonicalize_value(value.clone())).unwrap();
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(canonical.as_bytes());
    hasher.finish()
}

fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize_value).collect()),
        Value::Object(map) => {
            let mut result = Map::with_capacity(map.len());
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, value) in entries {
                result.insert(key, canonicalize_value(value));
            }
            Value::Object(result)
        }
        other => other,
    }
}
