//! SQLite catalog metadata source.
//!
//! Treats every user table of a SQLite database as an entity. The database
//! is opened read-only on every call, so the result always reflects the
//! current schema.
//!
//! | SQLite                | Mapping                                          |
//! |-----------------------|--------------------------------------------------|
//! | table `order_items`   | entity `OrderItem`                               |
//! | column `created_at`   | field `createdAt`, explicit column `created_at`  |
//! | `VARCHAR(255)`        | type `string`, length 255                        |
//! | `pk > 0`              | identifier                                       |
//! | foreign key `user_id` | many-to-one association `user`                   |
//!
//! Entity names are unique within one database. When two tables singularize
//! to the same name (`user`, `users`), the later table keeps its plural
//! form (`Users`).

use inflector::cases::camelcase::to_camel_case;
use inflector::cases::classcase::to_class_case;
use inflector::cases::pascalcase::to_pascal_case;
use regex::Regex;
use rusqlite::{Connection, OpenFlags};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::warn;

use super::class_metadata::{AssociationMapping, ClassMetadata, FieldMapping, RelationKind};
use super::error::SourceResult;
use super::naming::{DefaultNamingStrategy, NamingStrategy};
use super::source::MetadataSource;

static DECLARED_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_ ]*?)\s*(?:\(\s*(\d+)\s*(?:,\s*\d+\s*)?\))?\s*$").unwrap()
});

/// Metadata source introspecting a SQLite database file.
pub struct SqliteSource {
    path: PathBuf,
    naming: Box<dyn NamingStrategy>,
}

impl SqliteSource {
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

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> SourceResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Ok(Connection::open_with_flags(&self.path, flags)?)
    }
}

impl MetadataSource for SqliteSource {
    fn all_metadata(&self) -> SourceResult<Vec<ClassMetadata>> {
        let conn = self.open()?;
        let tables = list_tables(&conn)?;
        let names = assign_entity_names(&tables);

        let entities = tables
            .iter()
            .filter_map(|table| match introspect_table(&conn, table, &names) {
                Ok(meta) => Some(meta),
                Err(err) => {
                    warn!(
                        table = %table,
                        error = %err,
                        "skipping table that cannot be introspected"
                    );
                    None
                }
            })
            .collect();

        Ok(entities)
    }

    fn naming_strategy(&self) -> &dyn NamingStrategy {
        self.naming.as_ref()
    }
}

/// Entity name derived from a table name (`order_items` -> `OrderItem`).
pub fn entity_name_for(table: &str) -> String {
    to_class_case(table)
}

/// Entity names keyed by table, unique across `tables`.
///
/// Tables are named in order. A singular name already taken falls back to
/// the plural form, then to a numeric suffix.
fn assign_entity_names(tables: &[String]) -> HashMap<String, String> {
    let mut taken = HashSet::new();
    let mut names = HashMap::with_capacity(tables.len());

    for table in tables {
        let mut name = entity_name_for(table);
        if taken.contains(&name) {
            name = to_pascal_case(table);
        }

        let base = name.clone();
        let mut suffix = 2;
        while !taken.insert(name.clone()) {
            name = format!("{base}{suffix}");
            suffix += 1;
        }

        names.insert(table.clone(), name);
    }

    names
}

/// Entity name of `table`, falling back to the derived name for tables
/// outside the database (dangling foreign keys).
fn entity_name_in(names: &HashMap<String, String>, table: &str) -> String {
    names
        .get(table)
        .or_else(|| {
            names
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(table))
                .map(|(_, name)| name)
        })
        .cloned()
        .unwrap_or_else(|| entity_name_for(table))
}

/// Declared spelling of `table`; SQLite matches table names case-insensitively.
fn canonical_table(names: &HashMap<String, String>, table: &str) -> String {
    names
        .keys()
        .find(|known| known.eq_ignore_ascii_case(table))
        .cloned()
        .unwrap_or_else(|| table.to_string())
}

struct ColumnRow {
    name: String,
    declared_type: String,
    not_null: bool,
    default: Option<String>,
    pk: i64,
}

fn list_tables(conn: &Connection) -> SourceResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
         ORDER BY rowid",
    )?;
    let tables = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tables)
}

fn introspect_table(
    conn: &Connection,
    table: &str,
    names: &HashMap<String, String>,
) -> SourceResult<ClassMetadata> {
    let mut stmt = conn.prepare(
        "SELECT name, type, \"notnull\", dflt_value, pk \
         FROM pragma_table_info(?1) ORDER BY cid",
    )?;
    let columns = stmt
        .query_map([table], |row| {
            Ok(ColumnRow {
                name: row.get(0)?,
                declared_type: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                not_null: row.get::<_, i64>(2)? != 0,
                default: row.get(3)?,
                pk: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut meta = ClassMetadata::new(entity_name_in(names, table), table);

    let mut keys: Vec<(i64, String)> = Vec::new();
    for column in &columns {
        let field_name = to_camel_case(&column.name);
        let (type_name, length) = logical_type(&column.declared_type);

        let mut field = FieldMapping::new(&field_name, type_name)
            .column(&column.name)
            .nullable(!column.not_null && column.pk == 0);
        field.length = length;
        field.default = column.default.as_deref().and_then(parse_default);

        if column.pk > 0 {
            keys.push((column.pk, field_name));
        }
        meta.fields.push(field);
    }
    keys.sort_by_key(|(position, _)| *position);
    meta.identifier = keys.into_iter().map(|(_, name)| name).collect();

    let mut stmt = conn.prepare(
        "SELECT \"table\", \"from\" FROM pragma_foreign_key_list(?1) \
         WHERE seq = 0 ORDER BY id",
    )?;
    let foreign_keys = stmt
        .query_map([table], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    for (target_table, from_column) in foreign_keys {
        let base = from_column
            .strip_suffix("_id")
            .filter(|s| !s.is_empty())
            .unwrap_or(&from_column);
        meta.associations.push(
            AssociationMapping::new(
                to_camel_case(base),
                RelationKind::ManyToOne,
                entity_name_in(names, &target_table),
            )
            .target_table(canonical_table(names, &target_table)),
        );
    }

    Ok(meta)
}

/// Map a declared SQLite column type onto a logical type tag and, for
/// bounded strings, a length.
fn logical_type(declared: &str) -> (String, Option<u32>) {
    // No declared type means BLOB affinity.
    if declared.trim().is_empty() {
        return ("blob".to_string(), None);
    }

    let Some(caps) = DECLARED_TYPE.captures(declared) else {
        return (declared.trim().to_lowercase(), None);
    };

    let base = caps
        .get(1)
        .map(|m| m.as_str().to_uppercase())
        .unwrap_or_default();
    let size = caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok());

    let logical = if base.contains("BLOB") {
        "blob"
    } else if base.contains("BOOL") {
        "boolean"
    } else if base.contains("BIGINT") {
        "bigint"
    } else if base.contains("SMALLINT") || base.contains("TINYINT") {
        "smallint"
    } else if base.contains("INT") {
        "integer"
    } else if base.contains("CHAR") {
        return ("string".to_string(), size);
    } else if base.contains("CLOB") || base.contains("TEXT") {
        "text"
    } else if base == "DATETIME" || base == "TIMESTAMP" {
        "datetime"
    } else if base == "DATE" {
        "date"
    } else if base == "TIME" {
        "time"
    } else if base == "JSON" {
        "json"
    } else if base.contains("REAL") || base.contains("FLOA") || base.contains("DOUB") {
        "float"
    } else if base == "DECIMAL" || base == "NUMERIC" {
        "decimal"
    } else {
        return (base.to_lowercase(), None);
    };

    (logical.to_string(), None)
}

/// Interpret a column default written as an SQL literal.
fn parse_default(raw: &str) -> Option<serde_json::Value> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("NULL") {
        return None;
    }

    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        let inner = &raw[1..raw.len() - 1];
        return Some(serde_json::Value::String(inner.replace("''", "'")));
    }

    if let Ok(int) = raw.parse::<i64>() {
        return Some(int.into());
    }

    if let Some(number) = raw
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
    {
        return Some(serde_json::Value::Number(number));
    }

    Some(serde_json::Value::String(raw.to_string()))
}
