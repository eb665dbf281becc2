use ihub_database::{Database, DatabaseError, SliceSchema};

#[tokio::test]
async fn connects_to_memory_engine() {
    let db = Database::builder()
        .url("mem://")
        .session("ihub", "integration")
        .init()
        .await
        .unwrap();

    assert_eq!(db.namespace(), "ihub");
    assert_eq!(db.database(), "integration");
    assert!(db.health().await.is_ok());
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let result = Database::builder().session("ihub", "integration").init().await;
    assert!(matches!(result, Err(DatabaseError::Validation { .. })));

    let result = Database::builder().url("mem://").init().await;
    assert!(matches!(result, Err(DatabaseError::Validation { .. })));
}

#[tokio::test]
async fn applies_idempotent_schema() {
    let db = Database::builder()
        .url("mem://")
        .session("ihub", "schema_test")
        .init()
        .await
        .unwrap();

    let schema = SliceSchema::new(
        "widgets",
        r"
        DEFINE TABLE OVERWRITE widget SCHEMALESS;
        DEFINE INDEX OVERWRITE widget_name ON TABLE widget COLUMNS name;
        ",
    );

    db.apply_schema(&schema).await.unwrap();
    // safe to re-apply
    db.apply_schema(&schema).await.unwrap();
}

#[tokio::test]
async fn rejects_empty_schema_script() {
    let db = Database::builder()
        .url("mem://")
        .session("ihub", "schema_test")
        .init()
        .await
        .unwrap();

    let result = db.apply_schema(&SliceSchema::new("empty", "   ")).await;
    assert!(matches!(result, Err(DatabaseError::Schema { .. })));
}

#[tokio::test]
async fn reports_broken_schema_statement() {
    let db = Database::builder()
        .url("mem://")
        .session("ihub", "schema_test")
        .init()
        .await
        .unwrap();

    let result = db
        .apply_schema(&SliceSchema::new("broken", "DEFINE TABEL nope;"))
        .await;
    assert!(result.is_err());
}
