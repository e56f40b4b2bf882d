//! TOML mapping-file metadata source.
//!
//! Entities are declared in a single file and re-read on every call:
//!
//! ```toml
//! [[entities]]
//! name = "App\\Entity\\User"
//! table = "user_table"
//! comment = "Users"
//! identifier = ["id"]
//!
//! [[entities.fields]]
//! name = "id"
//! type = "integer"
//!
//! [[entities.fields]]
//! name = "createdAt"
//! type = "datetime"
//! nullable = true
//!
//! [[entities.associations]]
//! name = "orders"
//! kind = "one_to_many"
//! target_entity = "App\\Entity\\Order"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::class_metadata::ClassMetadata;
use super::error::{SourceError, SourceResult};
use super::naming::{DefaultNamingStrategy, NamingStrategy};
use super::source::MetadataSource;

/// Entities stay untyped until each is converted on its own, so one
/// malformed entry cannot fail the whole file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    entities: Vec<toml::Value>,
}

/// Metadata source reading a TOML mapping file.
pub struct CatalogSource {
    path: PathBuf,
    naming: Box<dyn NamingStrategy>,
}

impl CatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            naming: Box::new(DefaultNamingStrategy),
        }
    }

    pub fn with_naming_strategy(mut self, naming: Box<dyn NamingStrategy>) -> Self {
        self.naming = naming;
        self
    }

    /// Path of the mapping file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse mapping file content.
    ///
    /// Fails only when the file itself is not valid TOML. An entity entry
    /// that does not match the mapping shape is skipped with a warning.
    pub fn parse(content: &str) -> SourceResult<Vec<ClassMetadata>> {
        let file: CatalogFile = toml::from_str(content)?;

        let entities = file
            .entities
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let name = entry
                    .get("name")
                    .and_then(toml::Value::as_str)
                    .unwrap_or("<unnamed>")
                    .to_string();

                match entry.try_into::<ClassMetadata>() {
                    Ok(meta) => Some(meta),
                    Err(err) => {
                        warn!(
                            index,
                            entity = %name,
                            error = %err,
                            "skipping malformed catalog entity"
                        );
                        None
                    }
                }
            })
            .collect();

        Ok(entities)
    }
}

impl MetadataSource for CatalogSource {
    fn all_metadata(&self) -> SourceResult<Vec<ClassMetadata>> {
        let content = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        Self::parse(&content)
    }

    fn naming_strategy(&self) -> &dyn NamingStrategy {
        self.naming.as_ref()
    }
}
