//! MetadataReader: entity lookup over a metadata source.
//!
//! Every operation re-reads the source. An entity whose mapping cannot be
//! read is skipped with a warning; it never fails the whole operation.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use super::types::{AssociationDescriptor, ColumnDescriptor, EntityDescriptor};
use crate::metadata::{ClassMetadata, MetadataSource, NamingStrategy, SourceError, SourceResult};

/// Result type for lookups.
pub type LookupResult<T> = Result<T, LookupError>;

/// The only failure callers of the reader observe.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No readable entity matches the requested key.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Translates a metadata source into entity descriptors.
#[derive(Clone)]
pub struct MetadataReader {
    source: Arc<dyn MetadataSource>,
}

impl MetadataReader {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self { source }
    }

    /// Wrap an owned source.
    pub fn from_source(source: impl MetadataSource + 'static) -> Self {
        Self::new(Arc::new(source))
    }

    /// Find the entity stored in `table_name` (exact, case-sensitive).
    ///
    /// The first entity mapped to the table decides the result: if its
    /// mapping cannot be read the lookup is `NotFound`, even when a later
    /// entity maps to the same table.
    pub fn find_by_table_name(&self, table_name: &str) -> LookupResult<EntityDescriptor> {
        debug!(table = table_name, "looking up entity by table name");
        self.find_first(table_name, |meta| meta.table_name() == table_name)
    }

    /// Find an entity by its logical name.
    pub fn find_by_entity_name(&self, entity_name: &str) -> LookupResult<EntityDescriptor> {
        debug!(entity = entity_name, "looking up entity by name");
        self.find_first(entity_name, |meta| meta.name == entity_name)
    }

    /// Descriptors for every readable entity, in source order.
    pub fn all_entities(&self) -> Vec<EntityDescriptor> {
        let snapshot = self.snapshot();
        let naming = self.source.naming_strategy();

        snapshot
            .iter()
            .filter_map(|meta| match read_entity(meta, &snapshot, naming) {
                Ok(descriptor) => Some(descriptor),
                Err(err) => {
                    log_skipped(meta, &err);
                    None
                }
            })
            .collect()
    }

    /// Table names of every entity, in source order. Field mappings are
    /// not read.
    pub fn table_names(&self) -> Vec<String> {
        self.snapshot()
            .into_iter()
            .map(|meta| meta.table)
            .collect()
    }

    fn find_first(
        &self,
        key: &str,
        matches: impl Fn(&ClassMetadata) -> bool,
    ) -> LookupResult<EntityDescriptor> {
        let snapshot = self.snapshot();
        let meta = snapshot
            .iter()
            .find(|meta| matches(*meta))
            .ok_or_else(|| LookupError::NotFound(key.to_string()))?;

        read_entity(meta, &snapshot, self.source.naming_strategy()).map_err(|err| {
            log_skipped(meta, &err);
            LookupError::NotFound(key.to_string())
        })
    }

    /// Current mappings; a source that cannot be read at all counts as empty.
    fn snapshot(&self) -> Vec<ClassMetadata> {
        match self.source.all_metadata() {
            Ok(entities) => entities,
            Err(err) => {
                warn!(error = %err, "metadata source could not be read");
                Vec::new()
            }
        }
    }
}

fn log_skipped(meta: &ClassMetadata, err: &SourceError) {
    warn!(
        entity = %meta.name,
        table = %meta.table,
        error = %err,
        "skipping entity whose mapping cannot be read"
    );
}

/// Build the descriptor of one entity.
///
/// `snapshot` is the full mapping list the entity came from; association
/// targets are resolved against it.
fn read_entity(
    meta: &ClassMetadata,
    snapshot: &[ClassMetadata],
    naming: &dyn NamingStrategy,
) -> SourceResult<EntityDescriptor> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(meta.fields.len());

    for field in meta.field_names() {
        if !seen.insert(field) {
            return Err(SourceError::invalid(
                &meta.name,
                format!("field '{field}' is declared twice"),
            ));
        }

        let mapping = meta.field_mapping(field)?;
        columns.push(ColumnDescriptor {
            field: field.to_string(),
            column_name: mapping
                .column
                .clone()
                .unwrap_or_else(|| naming.property_to_column_name(field)),
            type_name: mapping.type_name.clone(),
            length: mapping.length,
            nullable: mapping.nullable.unwrap_or(false),
            is_primary_key: meta.is_identifier(field),
            default: mapping.default.clone(),
            comment: mapping.comment.clone(),
        });
    }

    if let Some(missing) = meta.identifier.iter().find(|id| !seen.contains(id.as_str())) {
        return Err(SourceError::invalid(
            &meta.name,
            format!("identifier '{missing}' is not a mapped field"),
        ));
    }

    let associations = meta
        .associations
        .iter()
        .map(|assoc| {
            let target_table = match &assoc.target_table {
                Some(table) => table.clone(),
                None => snapshot
                    .iter()
                    .find(|m| m.name == assoc.target_entity)
                    .map(|target| target.table.clone())
                    .ok_or_else(|| SourceError::UnknownEntity(assoc.target_entity.clone()))?,
            };

            Ok(AssociationDescriptor {
                name: assoc.name.clone(),
                relation_kind: assoc.kind,
                target_entity: assoc.target_entity.clone(),
                target_table,
            })
        })
        .collect::<SourceResult<Vec<_>>>()?;

    Ok(EntityDescriptor {
        table_name: meta.table.clone(),
        entity_name: meta.name.clone(),
        comment: meta.comment.clone(),
        columns,
        associations,
    })
}
