use packlist_core::{Catalog, CatalogSource, DataError, RuleBook, builtin_rules, sample_catalog};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Data {
        path: PathBuf,
        #[source]
        source: DataError,
    },
}

/// Rules and catalog read from disk, falling back to the embedded assets.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    pub rules_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
}

impl FileSource {
    pub const fn new(rules_path: Option<PathBuf>, catalog_path: Option<PathBuf>) -> Self {
        Self {
            rules_path,
            catalog_path,
        }
    }
}

fn read_table<T>(
    path: &Path,
    parse: impl FnOnce(&str) -> Result<T, DataError>,
) -> Result<T, SourceError> {
    let json = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {} bytes from {}", json.len(), path.display());
    parse(&json).map_err(|source| SourceError::Data {
        path: path.to_path_buf(),
        source,
    })
}

impl CatalogSource for FileSource {
    type Error = SourceError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        self.catalog_path.as_deref().map_or_else(
            || Ok(sample_catalog().clone()),
            |path| read_table(path, Catalog::from_json),
        )
    }

    fn load_rules(&self) -> Result<RuleBook, Self::Error> {
        self.rules_path.as_deref().map_or_else(
            || Ok(builtin_rules().clone()),
            |path| read_table(path, RuleBook::from_json),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_embedded_assets() {
        let source = FileSource::default();
        assert_eq!(source.load_catalog().unwrap().len(), sample_catalog().len());
        assert_eq!(&source.load_rules().unwrap(), builtin_rules());
    }

    #[test]
    fn missing_file_names_the_path() {
        let source = FileSource::new(Some(PathBuf::from("/definitely/not/here.json")), None);
        let err = source.load_rules().unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
