use std::path::PathBuf;

use mise_generate::{Engine, EngineOptions, Population, restaurant_profile};
use mise_schema::restaurant_catalog;
use mise_sqlite::{SinkOptions, SqliteSink};

fn temp_db(label: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("mise_{label}_{}.db", uuid::Uuid::new_v4()));
    path
}

fn small_population(seed: u64) -> Population {
    let mut profile = restaurant_profile();
    for (table, rows) in [
        ("Customers", 60),
        ("Menu_Items", 15),
        ("Orders", 40),
        ("Order_Details", 90),
        ("Employees", 8),
        ("Tables", 6),
        ("Suppliers", 5),
        ("Inventory", 12),
        ("Feedback", 25),
        ("Menu_Supplier", 20),
    ] {
        assert!(profile.set_rows(table, rows));
    }

    let engine = Engine::new(EngineOptions {
        seed: Some(seed),
        ..EngineOptions::default()
    });
    engine
        .run(&restaurant_catalog(), &profile)
        .expect("population succeeds")
}

async fn seed_database(path: &PathBuf, seed: u64) -> SqliteSink {
    let catalog = restaurant_catalog();
    let population = small_population(seed);

    let sink = SqliteSink::connect(&SinkOptions::new(path))
        .await
        .expect("open database");
    sink.apply_schema(&catalog).await.expect("apply schema");
    sink.load(&catalog, &population).await.expect("load dataset");
    sink.create_indexes(&catalog).await.expect("create indexes");
    sink
}

#[tokio::test]
async fn roundtrip_loads_all_tables() {
    let path = temp_db("roundtrip");
    let sink = seed_database(&path, 42).await;

    assert_eq!(sink.table_count("Customers").await.unwrap(), 60);
    assert_eq!(sink.table_count("Orders").await.unwrap(), 40);
    assert_eq!(sink.table_count("Menu_Supplier").await.unwrap(), 20);
    assert_eq!(sink.foreign_key_violations().await.unwrap(), 0);

    let tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
    )
    .fetch_one(sink.pool())
    .await
    .unwrap();
    assert_eq!(tables, 10);

    let indexes: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%'",
    )
    .fetch_one(sink.pool())
    .await
    .unwrap();
    assert_eq!(indexes, 5);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn fresh_targets_seed_independently() {
    // Two runs with different seeds against fresh files both come out
    // structurally valid.
    let first_path = temp_db("fresh_a");
    let second_path = temp_db("fresh_b");

    let first = seed_database(&first_path, 1).await;
    let second = seed_database(&second_path, 2).await;

    for sink in [&first, &second] {
        assert_eq!(sink.table_count("Customers").await.unwrap(), 60);
        assert_eq!(sink.foreign_key_violations().await.unwrap(), 0);
    }

    let _ = std::fs::remove_file(&first_path);
    let _ = std::fs::remove_file(&second_path);
}

#[tokio::test]
async fn reseeding_same_file_replaces_data() {
    let path = temp_db("reseed");
    let _ = seed_database(&path, 3).await;
    let sink = seed_database(&path, 4).await;

    // Clean slate drops and recreates, so counts match the new run exactly.
    assert_eq!(sink.table_count("Orders").await.unwrap(), 40);
    assert_eq!(sink.foreign_key_violations().await.unwrap(), 0);

    let _ = std::fs::remove_file(&path);
}
