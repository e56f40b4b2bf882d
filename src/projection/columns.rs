//! JSON column-list projection.

use serde::Serialize;

use crate::describe::EntityDescriptor;

/// One entry of the JSON column description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub field: String,
    /// Logical type tag, unchanged.
    #[serde(rename = "type")]
    pub type_name: String,
    /// `null` when the column has no length.
    pub length: Option<u32>,
    pub nullable: bool,
}

/// The body of a successful `/entity/desc/{table}` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDescription {
    pub table: String,
    pub columns: Vec<ColumnSummary>,
}

impl TableDescription {
    pub fn from_entity(entity: &EntityDescriptor) -> Self {
        Self {
            table: entity.table_name.clone(),
            columns: to_column_list(entity),
        }
    }
}

/// Flatten an entity's columns, preserving column order.
pub fn to_column_list(entity: &EntityDescriptor) -> Vec<ColumnSummary> {
    entity
        .columns
        .iter()
        .map(|column| ColumnSummary {
            field: column.field.clone(),
            type_name: column.type_name.clone(),
            length: column.length,
            nullable: column.nullable,
        })
        .collect()
}
