//! Descriptor types produced by the reader.
//!
//! Descriptors are transient: they are rebuilt from the metadata source on
//! every call and never mutated afterwards.

use serde::Serialize;

use crate::metadata::RelationKind;

/// Description of one entity and the table it is stored in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDescriptor {
    /// Physical table name.
    pub table_name: String,
    /// Logical entity name.
    pub entity_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDescriptor>,
    /// Associations in declaration order.
    pub associations: Vec<AssociationDescriptor>,
}

impl EntityDescriptor {
    /// Look up a column by field name.
    pub fn column(&self, field: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Look up an association by name.
    pub fn association(&self, name: &str) -> Option<&AssociationDescriptor> {
        self.associations.iter().find(|a| a.name == name)
    }
}

/// Description of one mapped column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    /// Logical property name.
    pub field: String,
    /// Physical column name.
    pub column_name: String,
    /// Logical type tag.
    #[serde(rename = "type")]
    pub type_name: String,
    pub length: Option<u32>,
    pub nullable: bool,
    pub is_primary_key: bool,
    pub default: Option<serde_json::Value>,
    pub comment: Option<String>,
}

/// Description of one association.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationDescriptor {
    /// Association name.
    pub name: String,
    pub relation_kind: RelationKind,
    pub target_entity: String,
    pub target_table: String,
}
