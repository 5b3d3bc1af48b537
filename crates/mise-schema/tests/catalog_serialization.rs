use mise_schema::{Catalog, restaurant_catalog};

#[test]
fn catalog_survives_json_round_trip() {
    let catalog = restaurant_catalog();
    let json = serde_json::to_string(&catalog).expect("catalog serializes");
    let restored: Catalog = serde_json::from_str(&json).expect("catalog deserializes");

    let names = |c: &Catalog| c.tables.iter().map(|t| t.name.clone()).collect::<Vec<_>>();
    assert_eq!(names(&restored), names(&catalog));
    assert_eq!(restored.indexes.len(), catalog.indexes.len());
    assert_eq!(restored.legacy_tables, catalog.legacy_tables);

    let orders = restored.table("Orders").expect("orders table restored");
    assert_eq!(orders.columns.len(), 7);
    assert!(orders.foreign_keys().any(|fk| fk.referenced_table == "Customers"));
}

#[test]
fn constraints_serialize_with_kind_tags() {
    let catalog = restaurant_catalog();
    let json = serde_json::to_string(&catalog).expect("catalog serializes");

    assert!(json.contains("\"kind\":\"primary_key\""));
    assert!(json.contains("\"kind\":\"foreign_key\""));
    assert!(json.contains("\"rule\":\"one_of\""));
    assert!(json.contains("\"on_delete\":\"cascade\""));
}
