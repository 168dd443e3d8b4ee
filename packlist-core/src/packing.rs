//! Packing list model and the selection commands the presentation layer issues.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::numbers::ratio;
use crate::profile::TripProfile;

/// Tier of a packing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Essential,
    Recommended,
    Optional,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::Essential, Self::Recommended, Self::Optional];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Recommended => "recommended",
            Self::Optional => "optional",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingItem {
    /// Unique within its list only.
    pub id: String,
    pub category: String,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub priority: Priority,
    /// Snapshot of the matched catalog entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    pub is_selected: bool,
    pub reason: String,
}

impl PackingItem {
    #[must_use]
    pub const fn is_essential(&self) -> bool {
        matches!(self.priority, Priority::Essential)
    }
}

/// Generated list with counts kept in sync with item selection.
///
/// Fields are private so that `selected_items` can only change through the
/// commands below. Deserialization recomputes both counts from the items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PackingListRecord")]
pub struct PackingList {
    id: String,
    trip_profile: TripProfile,
    items: Vec<PackingItem>,
    generated_at: DateTime<Utc>,
    total_items: usize,
    selected_items: usize,
}

#[derive(Deserialize)]
struct PackingListRecord {
    id: String,
    trip_profile: TripProfile,
    items: Vec<PackingItem>,
    generated_at: DateTime<Utc>,
}

impl From<PackingListRecord> for PackingList {
    fn from(record: PackingListRecord) -> Self {
        Self::new(
            record.id,
            record.trip_profile,
            record.items,
            record.generated_at,
        )
    }
}

impl PackingList {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        trip_profile: TripProfile,
        items: Vec<PackingItem>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let mut list = Self {
            id: id.into(),
            trip_profile,
            items,
            generated_at,
            total_items: 0,
            selected_items: 0,
        };
        list.recount();
        list
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn trip_profile(&self) -> &TripProfile {
        &self.trip_profile
    }

    #[must_use]
    pub fn items(&self) -> &[PackingItem] {
        &self.items
    }

    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    #[must_use]
    pub const fn selected_count(&self) -> usize {
        self.selected_items
    }

    #[must_use]
    pub fn item(&self, id: &str) -> Option<&PackingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Recompute both counts from the item sequence.
    pub fn recount(&mut self) {
        self.total_items = self.items.len();
        self.selected_items = self.items.iter().filter(|item| item.is_selected).count();
    }

    /// Set one item's selection. Returns `false` if no item has `id`.
    pub fn set_item_selected(&mut self, id: &str, selected: bool) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        if item.is_selected != selected {
            item.is_selected = selected;
            if selected {
                self.selected_items += 1;
            } else {
                self.selected_items = self.selected_items.saturating_sub(1);
            }
        }
        true
    }

    /// Flip one item's selection, returning its new state.
    pub fn toggle_item(&mut self, id: &str) -> Option<bool> {
        let current = self.item(id)?.is_selected;
        self.set_item_selected(id, !current);
        Some(!current)
    }

    pub fn select_all(&mut self) {
        for item in &mut self.items {
            item.is_selected = true;
        }
        self.recount();
    }

    /// Deselect every non-essential item.
    pub fn clear_selection(&mut self) {
        for item in self.items.iter_mut().filter(|item| !item.is_essential()) {
            item.is_selected = false;
        }
        self.recount();
    }

    pub fn items_with_priority(&self, priority: Priority) -> impl Iterator<Item = &PackingItem> {
        self.items.iter().filter(move |item| item.priority == priority)
    }

    pub fn selected_items(&self) -> impl Iterator<Item = &PackingItem> {
        self.items.iter().filter(|item| item.is_selected)
    }

    /// Fraction of items selected, in `0.0..=1.0`.
    #[must_use]
    pub fn progress_ratio(&self) -> f64 {
        ratio(self.selected_items, self.total_items)
    }
}
