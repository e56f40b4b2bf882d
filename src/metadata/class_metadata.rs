//! Raw mapping model as exposed by a metadata source.
//!
//! `ClassMetadata` is the source-side view of one entity: what the mapping
//! declares, before any naming strategy or association resolution has been
//! applied. The reader turns it into an [`EntityDescriptor`].
//!
//! [`EntityDescriptor`]: crate::describe::EntityDescriptor

use serde::{Deserialize, Serialize};

use super::error::{SourceError, SourceResult};

/// Mapping metadata for one entity.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClassMetadata {
    /// Logical entity name (fully qualified type name in the source system).
    pub name: String,

    /// Physical table name.
    pub table: String,

    /// Table comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Field names that make up the primary key.
    #[serde(default)]
    pub identifier: Vec<String>,

    /// Field mappings in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldMapping>,

    /// Association mappings in declaration order.
    #[serde(default)]
    pub associations: Vec<AssociationMapping>,
}

impl ClassMetadata {
    /// Create an empty mapping for `name` stored in `table`.
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            comment: None,
            identifier: Vec::new(),
            fields: Vec::new(),
            associations: Vec::new(),
        }
    }

    /// Set the table comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Append a field mapping.
    pub fn field(mut self, field: FieldMapping) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a field mapping and mark it as part of the primary key.
    pub fn id_field(mut self, field: FieldMapping) -> Self {
        self.identifier.push(field.name.clone());
        self.fields.push(field);
        self
    }

    /// Append an association mapping.
    pub fn association(mut self, association: AssociationMapping) -> Self {
        self.associations.push(association);
        self
    }

    /// Physical table name.
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Declared field names, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Look up the mapping of a declared field.
    pub fn field_mapping(&self, field: &str) -> SourceResult<&FieldMapping> {
        let mapping = self
            .fields
            .iter()
            .find(|f| f.name == field)
            .ok_or_else(|| SourceError::MappingNotFound {
                entity: self.name.clone(),
                field: field.to_string(),
            })?;

        if mapping.type_name.trim().is_empty() {
            return Err(SourceError::invalid(
                &self.name,
                format!("field '{field}' has no type"),
            ));
        }

        Ok(mapping)
    }

    /// Whether `field` is part of the primary key.
    pub fn is_identifier(&self, field: &str) -> bool {
        self.identifier.iter().any(|id| id == field)
    }
}

/// Mapping of one scalar field onto a column.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FieldMapping {
    /// Logical property name.
    pub name: String,

    /// Explicit column name. When absent the naming strategy decides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    /// Logical type tag (`string`, `integer`, `datetime`, ...). Left empty
    /// when the mapping omits it; reading such a field fails.
    #[serde(rename = "type", default)]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    /// Unset means not nullable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl FieldMapping {
    /// Create a field mapping with only a name and a logical type.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: None,
            type_name: type_name.into(),
            length: None,
            nullable: None,
            default: None,
            comment: None,
        }
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Mapping of one association onto another entity.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AssociationMapping {
    /// Association (property) name.
    pub name: String,

    /// Cardinality. Missing or unrecognized values become `Unknown`.
    #[serde(default)]
    pub kind: RelationKind,

    /// Logical name of the target entity.
    pub target_entity: String,

    /// Physical table of the target, when the source already knows it.
    /// Otherwise the target entity is looked up to find its table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_table: Option<String>,
}

impl AssociationMapping {
    pub fn new(
        name: impl Into<String>,
        kind: RelationKind,
        target_entity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            target_entity: target_entity.into(),
            target_table: None,
        }
    }

    pub fn target_table(mut self, table: impl Into<String>) -> Self {
        self.target_table = Some(table.into());
        self
    }
}

/// Cardinality classification of an association.
///
/// Conversion from any raw value is total: anything unrecognized is
/// `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(from = "RawRelationKind", into = "&'static str")]
pub enum RelationKind {
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
    #[default]
    Unknown,
}

impl RelationKind {
    /// Map a Doctrine-style association code (1, 2, 4, 8).
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::OneToOne,
            2 => Self::ManyToOne,
            4 => Self::OneToMany,
            8 => Self::ManyToMany,
            _ => Self::Unknown,
        }
    }

    /// Parse a kind name; case, `_`, `-` and spaces are ignored.
    pub fn parse(s: &str) -> Self {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "onetoone" => Self::OneToOne,
            "manytoone" => Self::ManyToOne,
            "onetomany" => Self::OneToMany,
            "manytomany" => Self::ManyToMany,
            _ => Self::Unknown,
        }
    }

    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "one_to_one",
            Self::ManyToOne => "many_to_one",
            Self::OneToMany => "one_to_many",
            Self::ManyToMany => "many_to_many",
            Self::Unknown => "unknown",
        }
    }
}

impl From<RelationKind> for &'static str {
    fn from(kind: RelationKind) -> Self {
        kind.as_str()
    }
}

/// Accepted spellings of a relation kind in mapping files.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRelationKind {
    Code(i64),
    Name(String),
}

impl From<RawRelationKind> for RelationKind {
    fn from(raw: RawRelationKind) -> Self {
        match raw {
            RawRelationKind::Code(code) => Self::from_code(code),
            RawRelationKind::Name(name) => Self::parse(&name),
        }
    }
}
