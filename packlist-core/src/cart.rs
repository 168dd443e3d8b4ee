//! Shopping cart filled from packing-list items.
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::numbers::qty_to_u64;
use crate::packing::{PackingItem, PackingList};

/// A line item in the shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(qty_to_u64(self.quantity))
    }

    #[must_use]
    pub fn line_savings(&self) -> u64 {
        self.product.savings().saturating_mul(qty_to_u64(self.quantity))
    }
}

/// Shopping cart state. Lines are unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn find_line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    fn find_line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
    }

    /// Add `quantity` of `product`, merging with an existing line.
    /// Returns the line's new quantity.
    pub fn add_product(&mut self, product: &Product, quantity: u32) -> u32 {
        if quantity == 0 {
            return self.quantity_of(&product.id);
        }
        if let Some(line) = self.find_line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            line.quantity
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity,
            });
            quantity
        }
    }

    /// Add an item's matched product at the item's quantity.
    /// Returns `false` for items without a product.
    pub fn add_packing_item(&mut self, item: &PackingItem) -> bool {
        let Some(product) = &item.product else {
            return false;
        };
        self.add_product(product, item.quantity);
        true
    }

    /// Add every selected item that has a product. Returns how many were added.
    pub fn add_selected(&mut self, list: &PackingList) -> usize {
        list.selected_items()
            .filter(|item| self.add_packing_item(item))
            .count()
    }

    /// Set a line's quantity; zero or less removes the line.
    /// Returns `false` if the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        let Some(line) = self.find_line_mut(product_id) else {
            return false;
        };
        line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        true
    }

    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != product_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.find_line(product_id).map_or(0, |line| line.quantity)
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| qty_to_u64(line.quantity))
            .sum()
    }

    #[must_use]
    pub fn total_price(&self) -> u64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Savings versus list price across all lines.
    #[must_use]
    pub fn savings(&self) -> u64 {
        self.lines.iter().map(CartLine::line_savings).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
