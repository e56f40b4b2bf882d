//! Metadata source module.
//!
//! This module defines the narrow capability the rest of the crate reads
//! entity mappings through, plus the sources that implement it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       MetadataSource                            │
//! │  - all_metadata()      -> Vec<ClassMetadata>                    │
//! │  - naming_strategy()   -> &dyn NamingStrategy                   │
//! └─────────────────────────────────────────────────────────────────┘
//!        │                        │                        │
//!        ▼                        ▼                        ▼
//!  InMemorySource           CatalogSource            SqliteSource
//!  (fixed mappings)      (TOML mapping file)      (database catalog)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use entity_desc::metadata::{ClassMetadata, FieldMapping, InMemorySource};
//!
//! let source = InMemorySource::new(vec![
//!     ClassMetadata::new("App\\Entity\\User", "user_table")
//!         .id_field(FieldMapping::new("id", "integer"))
//!         .field(FieldMapping::new("name", "string").length(255)),
//! ]);
//! ```

mod catalog_source;
mod class_metadata;
mod error;
mod naming;
mod source;
mod sqlite_source;

pub use catalog_source::CatalogSource;
pub use class_metadata::{AssociationMapping, ClassMetadata, FieldMapping, RelationKind};
pub use error::{SourceError, SourceResult};
pub use naming::{
    DefaultNamingStrategy, NamingStrategy, NamingStrategyKind, UnderscoreNamingStrategy,
};
pub use source::{InMemorySource, MetadataSource};
pub use sqlite_source::{entity_name_for, SqliteSource};
