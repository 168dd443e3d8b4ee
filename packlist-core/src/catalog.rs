//! Product catalog supplied by the shop front.
//!
//! The engine only reads catalog entries; it never mutates or owns them.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::data::{DEFAULT_CATALOG_DATA, DataError, parse_embedded, parse_json};

/// One purchasable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub sku: String,
    pub title: String,
    #[serde(default)]
    pub brand: String,
    pub category: String,
    /// Price in whole rupees.
    pub price: u64,
    /// List price before discount, when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl Product {
    /// Minimal product carrying only the fields the matcher reads.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        price: u64,
    ) -> Self {
        Self {
            id: id.into(),
            sku: String::new(),
            title: title.into(),
            brand: String::new(),
            category: category.into(),
            price,
            original_price: None,
            images: Vec::new(),
            description: String::new(),
            rating: 0.0,
            reviews: 0,
            sizes: Vec::new(),
            colors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_original_price(mut self, original_price: u64) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Discount versus the list price, zero when not on sale.
    #[must_use]
    pub fn savings(&self) -> u64 {
        self.original_price
            .map_or(0, |original| original.saturating_sub(self.price))
    }
}

/// Ordered collection of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    #[must_use]
    pub const fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load a catalog from a JSON document of the form `{"products": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or two products share an id.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let catalog: Self = parse_json(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), DataError> {
        let mut seen = BTreeSet::new();
        for product in &self.products {
            if product.id.trim().is_empty() {
                return Err(DataError::invalid("catalog", "product with empty id"));
            }
            if !seen.insert(product.id.as_str()) {
                return Err(DataError::invalid(
                    "catalog",
                    format!("duplicate product id {}", product.id),
                ));
            }
        }
        Ok(())
    }

    /// The sample catalog embedded in the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        parse_embedded("catalog", DEFAULT_CATALOG_DATA)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Distinct categories in sorted order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.products
            .iter()
            .map(|product| product.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Products whose category equals `category` exactly.
pub fn products_in_category<'a>(
    products: &'a [Product],
    category: &'a str,
) -> impl Iterator<Item = &'a Product> {
    products
        .iter()
        .filter(move |product| product.category == category)
}

/// Shared handle to the embedded sample catalog.
#[must_use]
pub fn sample_catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(Catalog::load_from_static)
}
