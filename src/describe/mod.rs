//! Entity description: reading mappings into descriptors.
//!
//! [`MetadataReader`] is the entry point. It turns the raw mappings of a
//! [`MetadataSource`](crate::metadata::MetadataSource) into
//! [`EntityDescriptor`] values, skipping entities whose mappings cannot
//! be read.

mod reader;
mod types;

pub use reader::{LookupError, LookupResult, MetadataReader};
pub use types::{AssociationDescriptor, ColumnDescriptor, EntityDescriptor};
