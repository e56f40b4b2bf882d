//! MetadataSource trait definition.
//!
//! A metadata source owns the entity-to-table and field-to-column mapping
//! knowledge. The reader consumes exactly two capabilities from it: the
//! list of all entity mappings, and the naming strategy used to derive
//! column names that the mappings leave implicit.

use super::class_metadata::ClassMetadata;
use super::error::SourceResult;
use super::naming::{DefaultNamingStrategy, NamingStrategy};

/// Read-only access to entity mapping metadata.
///
/// Implementations must not cache: every call reflects the current state
/// of the underlying mappings.
pub trait MetadataSource: Send + Sync {
    /// All entity mappings, in the source's enumeration order.
    fn all_metadata(&self) -> SourceResult<Vec<ClassMetadata>>;

    /// Strategy for fields without an explicit column name.
    fn naming_strategy(&self) -> &dyn NamingStrategy;
}

/// A metadata source backed by a fixed list of mappings.
pub struct InMemorySource {
    entities: Vec<ClassMetadata>,
    naming: Box<dyn NamingStrategy>,
}

impl InMemorySource {
    /// Create a source with the default (identity) naming strategy.
    pub fn new(entities: Vec<ClassMetadata>) -> Self {
        Self {
            entities,
            naming: Box::new(DefaultNamingStrategy),
        }
    }

    /// Replace the naming strategy.
    pub fn with_naming_strategy(mut self, naming: impl NamingStrategy + 'static) -> Self {
        self.naming = Box::new(naming);
        self
    }

    /// A source with no entities.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl MetadataSource for InMemorySource {
    fn all_metadata(&self) -> SourceResult<Vec<ClassMetadata>> {
        Ok(self.entities.clone())
    }

    fn naming_strategy(&self) -> &dyn NamingStrategy {
        self.naming.as_ref()
    }
}
