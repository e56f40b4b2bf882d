//! Markdown documentation projection.
//!
//! Produces two documents from entity descriptors:
//!
//! - a table list: one row per table with its comment
//! - a full dictionary: per entity, a column table and an association table

use serde_json::Value;

use super::locale::Locale;
use crate::describe::{ColumnDescriptor, EntityDescriptor};
use crate::metadata::RelationKind;

/// Physical type tag for a logical type. Unrecognized tags pass through.
pub fn physical_type(logical: &str) -> &str {
    match logical {
        "string" => "varchar",
        "integer" => "int",
        "json" => "json",
        other => other,
    }
}

/// Renders descriptors as Markdown in a given locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Projector {
    locale: Locale,
}

impl Projector {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Label for a relation kind in this projector's locale.
    pub fn relation_label(&self, kind: RelationKind) -> &'static str {
        self.locale.relation_label(kind)
    }

    /// Heading, then one row per table.
    pub fn to_markdown_table_list(&self, entities: &[EntityDescriptor]) -> String {
        let mut out = format!("# {}\n\n", self.locale.table_list_heading());
        push_header(&mut out, &self.locale.table_list_headers());

        for entity in entities {
            push_row(
                &mut out,
                &[
                    escape_cell(&entity.table_name),
                    escape_cell(entity.comment.as_deref().unwrap_or_default()),
                ],
            );
        }

        out
    }

    /// One section per entity, in the given order.
    pub fn to_markdown_full(&self, entities: &[EntityDescriptor]) -> String {
        entities
            .iter()
            .map(|entity| self.entity_section(entity))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The full dictionary under its document heading.
    pub fn to_document(&self, entities: &[EntityDescriptor]) -> String {
        format!(
            "# {}\n\n{}",
            self.locale.dictionary_heading(),
            self.to_markdown_full(entities)
        )
    }

    fn entity_section(&self, entity: &EntityDescriptor) -> String {
        let mut out = match entity.comment.as_deref().filter(|c| !c.is_empty()) {
            Some(comment) => format!(
                "## {} {}\n\n",
                escape_cell(&entity.table_name),
                single_line(comment)
            ),
            None => format!("## {}\n\n", escape_cell(&entity.table_name)),
        };

        out.push_str(&format!(
            "{}: {}\n\n",
            self.locale.entity_label(),
            code_cell(&entity.entity_name)
        ));

        push_header(&mut out, &self.locale.column_headers());
        for column in &entity.columns {
            push_row(&mut out, &self.column_cells(column));
        }

        if !entity.associations.is_empty() {
            out.push_str(&format!("\n### {}\n\n", self.locale.association_heading()));
            push_header(&mut out, &self.locale.association_headers());

            for assoc in &entity.associations {
                push_row(
                    &mut out,
                    &[
                        escape_cell(&assoc.name),
                        self.relation_label(assoc.relation_kind).to_string(),
                        code_cell(&assoc.target_entity),
                        escape_cell(&assoc.target_table),
                    ],
                );
            }
        }

        out
    }

    fn column_cells(&self, column: &ColumnDescriptor) -> [String; 8] {
        [
            escape_cell(&column.field),
            escape_cell(&column.column_name),
            escape_cell(physical_type(&column.type_name)),
            column.length.map(|l| l.to_string()).unwrap_or_default(),
            self.locale.yes_no(column.nullable).to_string(),
            column
                .default
                .as_ref()
                .map(|v| escape_cell(&render_default(v)))
                .unwrap_or_default(),
            if column.is_primary_key {
                self.locale.yes_no(true).to_string()
            } else {
                String::new()
            },
            escape_cell(column.comment.as_deref().unwrap_or_default()),
        ]
    }
}

fn push_header(out: &mut String, headers: &[&str]) {
    out.push_str(&format!("| {} |\n", headers.join(" | ")));
    out.push_str(&format!("|{}\n", " --- |".repeat(headers.len())));
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S]) {
    let cells: Vec<&str> = cells.iter().map(AsRef::as_ref).collect();
    out.push_str(&format!("| {} |\n", cells.join(" | ")));
}

fn render_default(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "NULL".to_string(),
        other => other.to_string(),
    }
}

fn single_line(text: &str) -> String {
    text.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}

/// Make text safe inside a Markdown table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

/// Inline code span safe inside a table cell. Text holding backticks gets
/// a double-backtick fence.
fn code_cell(text: &str) -> String {
    let text = escape_cell(text);
    if text.contains('`') {
        format!("`` {text} ``")
    } else {
        format!("`{text}`")
    }
}
