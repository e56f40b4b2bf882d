#[path = "../common/fixtures.rs"]
mod fixtures;

use entity_desc::projection::{to_column_list, ColumnSummary, TableDescription};
use serde_json::json;

use fixtures::{reader, shop};

#[test]
fn test_user_table_columns() {
    let entity = reader(shop()).find_by_table_name("user_table").unwrap();

    assert_eq!(
        to_column_list(&entity),
        vec![
            ColumnSummary {
                field: "id".to_string(),
                type_name: "integer".to_string(),
                length: None,
                nullable: false,
            },
            ColumnSummary {
                field: "name".to_string(),
                type_name: "string".to_string(),
                length: Some(255),
                nullable: false,
            },
            ColumnSummary {
                field: "created_at".to_string(),
                type_name: "datetime".to_string(),
                length: None,
                nullable: true,
            },
        ]
    );
}

#[test]
fn test_projection_is_pure() {
    let entity = reader(shop()).find_by_table_name("order_table").unwrap();
    let before = entity.clone();

    let first = to_column_list(&entity);
    let second = to_column_list(&entity);

    assert_eq!(first, second);
    assert_eq!(entity, before);
}

#[test]
fn test_logical_types_are_not_translated() {
    let entity = reader(shop()).find_by_table_name("order_table").unwrap();
    let types: Vec<_> = to_column_list(&entity)
        .into_iter()
        .map(|c| c.type_name)
        .collect();

    assert_eq!(types, vec!["integer", "string", "json"]);
}

#[test]
fn test_description_json_shape() {
    let entity = reader(shop()).find_by_table_name("user_table").unwrap();
    let value = serde_json::to_value(TableDescription::from_entity(&entity)).unwrap();

    assert_eq!(
        value,
        json!({
            "table": "user_table",
            "columns": [
                {"field": "id", "type": "integer", "length": null, "nullable": false},
                {"field": "name", "type": "string", "length": 255, "nullable": false},
                {"field": "created_at", "type": "datetime", "length": null, "nullable": true}
            ]
        })
    );
}
