//! Packlist Engine
//!
//! Platform-agnostic packing-list generation for family trips.
//! This crate turns a trip profile and a product catalog into a tiered packing
//! list without UI, network or storage dependencies.

pub mod cart;
pub mod catalog;
pub mod codes;
pub mod constants;
pub mod data;
pub mod engine;
pub mod guides;
pub mod matching;
pub mod numbers;
pub mod packing;
pub mod profile;
pub mod rng;
pub mod rules;
pub mod weather;

// Re-export commonly used types
pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, Product, products_in_category, sample_catalog};
pub use codes::{code_from_entropy, decode_list_code, encode_list_code};
pub use data::DataError;
#[cfg(feature = "async")]
pub use engine::generate_after;
pub use engine::{PackingEngine, generate_seeded};
pub use guides::{ChecklistGroup, DestinationGuide, GuideBook, GuideProduct, guide_book};
pub use matching::{CategoryFilter, QuantityRule, calculate_quantity, find_matching_products};
pub use packing::{PackingItem, PackingList, Priority};
pub use profile::{Climate, ProfileError, TripProfile, TripType};
pub use rng::{PackingRngs, StreamDraws};
pub use rules::{
    ClimateRule, LocationRule, ResolvedRules, RuleBook, TripTypeRule, builtin_rules,
    fill_template,
};
pub use weather::{WeatherCondition, WeatherReading, infer_climate};

use std::convert::Infallible;
use thiserror::Error;

/// Trait for abstracting where rules and products come from.
/// Hosts provide this to plug in their own catalog.
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;

    /// Load the rule book.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules cannot be loaded or parsed.
    fn load_rules(&self) -> Result<RuleBook, Self::Error>;
}

/// Source backed by the assets compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl CatalogSource for EmbeddedSource {
    type Error = Infallible;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Ok(sample_catalog().clone())
    }

    fn load_rules(&self) -> Result<RuleBook, Self::Error> {
        Ok(builtin_rules().clone())
    }
}

/// Reasons [`TripPlanner::plan`] produced no list.
#[derive(Debug, Error)]
pub enum PlanError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("failed to load trip data: {0}")]
    Source(#[source] E),
}

/// Validates profiles and generates lists against a [`CatalogSource`].
pub struct TripPlanner<S>
where
    S: CatalogSource,
{
    source: S,
}

impl<S> TripPlanner<S>
where
    S: CatalogSource,
{
    /// Create a planner over the provided source
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Validate `profile`, load data, and generate a list seeded by `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is invalid or the source fails.
    pub fn plan(
        &self,
        profile: &TripProfile,
        seed: u64,
    ) -> Result<PackingList, PlanError<S::Error>> {
        profile.validate()?;
        let rules = self.source.load_rules().map_err(PlanError::Source)?;
        let catalog = self.source.load_catalog().map_err(PlanError::Source)?;
        log::debug!(
            "planning {} with {} products, seed {seed}",
            profile.destination,
            catalog.len()
        );
        Ok(PackingEngine::new(&rules).generate(profile, catalog.as_slice(), seed))
    }
}
