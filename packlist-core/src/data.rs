//! Embedded data assets and the error type for loading them.
use serde::de::DeserializeOwned;
use thiserror::Error;

pub(crate) const DEFAULT_RULES_DATA: &str = include_str!("../assets/data/rules.json");
pub(crate) const DEFAULT_CATALOG_DATA: &str = include_str!("../assets/data/catalog.json");
pub(crate) const DEFAULT_GUIDES_DATA: &str = include_str!("../assets/data/guides.json");

/// Failure to turn a JSON document into one of the data tables.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {table} data: {reason}")]
    Invalid { table: &'static str, reason: String },
}

impl DataError {
    pub(crate) fn invalid(table: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            table,
            reason: reason.into(),
        }
    }
}

/// Parse a JSON document into `T`.
///
/// # Errors
///
/// Returns [`DataError::Parse`] when the document is not valid for `T`.
pub fn parse_json<T: DeserializeOwned>(json: &str) -> Result<T, DataError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse an embedded asset, logging and falling back to `T::default()` on failure.
pub(crate) fn parse_embedded<T>(table: &'static str, json: &str) -> T
where
    T: DeserializeOwned + Default,
{
    parse_json(json).unwrap_or_else(|err| {
        log::warn!("embedded {table} asset failed to parse, using empty table: {err}");
        T::default()
    })
}
