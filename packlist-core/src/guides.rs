//! Curated destination guides shown alongside generated lists.
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::data::{DEFAULT_GUIDES_DATA, DataError, parse_embedded, parse_json};

/// Named group of checklist entries, e.g. "Beachwear".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistGroup {
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Editorial product pick; not tied to catalog identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideProduct {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub image: String,
    pub price: u64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationGuide {
    /// Lowercase lookup key.
    pub key: String,
    pub name: String,
    /// Kind of destination, e.g. "Beach & Leisure".
    pub kind: String,
    /// Climate summary for display.
    pub climate: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub packing_list: Vec<ChecklistGroup>,
    #[serde(default)]
    pub recommended_products: Vec<GuideProduct>,
}

impl DestinationGuide {
    /// Total checklist entries across all groups.
    #[must_use]
    pub fn checklist_len(&self) -> usize {
        self.packing_list.iter().map(|group| group.items.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GuideBook {
    #[serde(default)]
    pub destinations: Vec<DestinationGuide>,
}

impl GuideBook {
    /// Load guides from JSON, normalizing keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or a key repeats.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let book: Self = parse_json(json)?;
        book.normalized()
    }

    fn normalized(mut self) -> Result<Self, DataError> {
        for guide in &mut self.destinations {
            guide.key = guide.key.trim().to_lowercase();
        }
        for (index, guide) in self.destinations.iter().enumerate() {
            if guide.key.is_empty() {
                return Err(DataError::invalid("guides", "empty destination key"));
            }
            if self.destinations[..index]
                .iter()
                .any(|earlier| earlier.key == guide.key)
            {
                return Err(DataError::invalid(
                    "guides",
                    format!("destination {} listed twice", guide.key),
                ));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        let book: Self = parse_embedded("guides", DEFAULT_GUIDES_DATA);
        book.normalized().unwrap_or_else(|err| {
            log::warn!("embedded guides failed validation: {err}");
            Self::default()
        })
    }

    /// Guide for `destination`, matched case-insensitively.
    #[must_use]
    pub fn lookup(&self, destination: &str) -> Option<&DestinationGuide> {
        let key = destination.trim().to_lowercase();
        self.destinations.iter().find(|guide| guide.key == key)
    }

    /// Guides in file order.
    pub fn iter(&self) -> impl Iterator<Item = &DestinationGuide> {
        self.destinations.iter()
    }
}

/// Shared handle to the embedded guides.
#[must_use]
pub fn guide_book() -> &'static GuideBook {
    static GUIDES: OnceLock<GuideBook> = OnceLock::new();
    GUIDES.get_or_init(GuideBook::load_from_static)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_guides_list_in_stable_order() {
        let keys: Vec<_> = guide_book().iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["goa", "mumbai", "darjeeling"]);
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let guide = guide_book().lookup(" Darjeeling ").unwrap();
        assert_eq!(guide.name, "Darjeeling");
        assert_eq!(guide.packing_list.len(), 4);
        assert_eq!(guide.recommended_products.len(), 4);
        assert!(guide.checklist_len() > guide.packing_list.len());
        assert!(guide_book().lookup("kerala").is_none());
    }

    #[test]
    fn from_json_rejects_repeated_keys() {
        let json = r#"{"destinations": [
            {"key": "Goa", "name": "Goa", "kind": "Beach", "climate": "Hot"},
            {"key": "goa", "name": "Goa again", "kind": "Beach", "climate": "Hot"}
        ]}"#;
        assert!(GuideBook::from_json(json).is_err());
    }
}
