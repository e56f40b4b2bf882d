#[path = "../common/fixtures.rs"]
mod fixtures;

use entity_desc::metadata::{
    ClassMetadata, DefaultNamingStrategy, FieldMapping, MetadataSource, NamingStrategy,
    SourceError, SourceResult,
};
use entity_desc::{LookupError, MetadataReader};
use std::sync::{Arc, Mutex};

use fixtures::{broken, order, order_item, reader, shop, user};

/// A source whose mappings can be swapped between calls.
struct MutableSource {
    entities: Mutex<Vec<ClassMetadata>>,
    naming: DefaultNamingStrategy,
}

impl MetadataSource for MutableSource {
    fn all_metadata(&self) -> SourceResult<Vec<ClassMetadata>> {
        Ok(self.entities.lock().unwrap().clone())
    }

    fn naming_strategy(&self) -> &dyn NamingStrategy {
        &self.naming
    }
}

/// A source that cannot be read at all.
struct FailingSource;

impl MetadataSource for FailingSource {
    fn all_metadata(&self) -> SourceResult<Vec<ClassMetadata>> {
        Err(SourceError::UnknownEntity("catalog".to_string()))
    }

    fn naming_strategy(&self) -> &dyn NamingStrategy {
        &DefaultNamingStrategy
    }
}

#[test]
fn test_unknown_table_is_not_found() {
    let reader = reader(shop());

    assert_eq!(
        reader.find_by_table_name("nonexistent_table"),
        Err(LookupError::NotFound("nonexistent_table".to_string()))
    );
}

#[test]
fn test_table_lookup_is_case_sensitive() {
    let reader = reader(shop());

    assert!(reader.find_by_table_name("USER_TABLE").is_err());
    assert!(reader.find_by_table_name("user_table").is_ok());
}

#[test]
fn test_columns_follow_declaration_order() {
    let reader = reader(shop());

    let entity = reader.find_by_table_name("user_table").unwrap();
    let fields: Vec<_> = entity.columns.iter().map(|c| c.field.as_str()).collect();

    assert_eq!(entity.entity_name, "App\\Entity\\User");
    assert_eq!(entity.comment.as_deref(), Some("用户表"));
    assert_eq!(fields, vec!["id", "name", "created_at"]);
}

#[test]
fn test_nullable_defaults_to_false() {
    let entity = reader(shop()).find_by_table_name("order_item").unwrap();

    assert!(entity.columns.iter().all(|c| !c.nullable));
    assert_eq!(entity.column("quantity").unwrap().length, None);
}

#[test]
fn test_find_by_entity_name() {
    let reader = reader(shop());

    let entity = reader.find_by_entity_name("App\\Entity\\Order").unwrap();
    assert_eq!(entity.table_name, "order_table");
    assert_eq!(entity.associations.len(), 2);
    assert_eq!(entity.association("items").unwrap().target_table, "order_item");

    assert!(reader.find_by_entity_name("NonExistentEntity").is_err());
}

#[test]
fn test_all_entities_in_source_order() {
    let entities = reader(shop()).all_entities();
    let tables: Vec<_> = entities.iter().map(|e| e.table_name.as_str()).collect();

    assert_eq!(tables, vec!["user_table", "order_table", "order_item"]);
}

#[test]
fn test_broken_entity_is_isolated() {
    let reader = reader(vec![user(), broken("broken_table"), order(), order_item()]);

    let entities = reader.all_entities();
    let tables: Vec<_> = entities.iter().map(|e| e.table_name.as_str()).collect();
    assert_eq!(tables, vec!["user_table", "order_table", "order_item"]);

    assert!(reader.find_by_table_name("user_table").is_ok());
    assert!(reader.find_by_table_name("broken_table").is_err());
}

#[test]
fn test_unresolvable_association_skips_entity() {
    // order() points at OrderItem, which is missing here.
    let reader = reader(vec![user(), order()]);

    assert!(reader.find_by_table_name("order_table").is_err());
    assert_eq!(reader.all_entities().len(), 1);
}

#[test]
fn test_duplicate_table_first_match_wins() {
    let shadow = ClassMetadata::new("App\\Entity\\Shadow", "user_table")
        .field(FieldMapping::new("only", "string"));
    let reader = reader(vec![user(), shadow]);

    let entity = reader.find_by_table_name("user_table").unwrap();
    assert_eq!(entity.entity_name, "App\\Entity\\User");
}

#[test]
fn test_broken_first_match_is_not_found() {
    let reader = reader(vec![broken("user_table"), user()]);

    assert_eq!(
        reader.find_by_table_name("user_table"),
        Err(LookupError::NotFound("user_table".to_string()))
    );
}

#[test]
fn test_unreadable_source_behaves_as_empty() {
    let reader = MetadataReader::from_source(FailingSource);

    assert!(reader.all_entities().is_empty());
    assert!(reader.table_names().is_empty());
    assert!(reader.find_by_table_name("user_table").is_err());
}

#[test]
fn test_every_call_rereads_the_source() {
    let source = Arc::new(MutableSource {
        entities: Mutex::new(vec![user()]),
        naming: DefaultNamingStrategy,
    });
    let reader = MetadataReader::new(source.clone());

    assert!(reader.find_by_table_name("order_item").is_err());

    source.entities.lock().unwrap().push(order_item());

    assert!(reader.find_by_table_name("order_item").is_ok());
    assert_eq!(reader.all_entities().len(), 2);
}
