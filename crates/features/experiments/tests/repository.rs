use ihub_database::{Database, SliceSchema};
use ihub_experiments::{CreateExperiment, ExperimentsError, ExperimentsRepository, UpdateExperiment};

async fn test_repo() -> ExperimentsRepository {
    let db = Database::builder()
        .url("mem://")
        .session("ihub", "experiments_test")
        .init()
        .await
        .unwrap();
    db.apply_schema(&SliceSchema::new(
        "experiments",
        "DEFINE TABLE OVERWRITE experiment SCHEMALESS;",
    ))
    .await
    .unwrap();
    ExperimentsRepository::new(db)
}

fn payload(name: &str) -> CreateExperiment {
    CreateExperiment {
        name: name.to_owned(),
        description: Some("cover art test".to_owned()),
        variants: vec!["control".to_owned(), "treatment".to_owned()],
        active: true,
    }
}

#[tokio::test]
async fn create_and_fetch_by_name() {
    let repo = test_repo().await;
    let created = repo.create(payload("cover-test")).await.unwrap();
    assert!(created.active);

    let found = repo.find_by_name("cover-test").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.variants.len(), 2);
}

#[tokio::test]
async fn duplicate_name_is_a_conflict() {
    let repo = test_repo().await;
    repo.create(payload("cover-test")).await.unwrap();

    let err = repo.create(payload("cover-test")).await.unwrap_err();
    assert!(matches!(err, ExperimentsError::Conflict { .. }));
}

#[tokio::test]
async fn update_replaces_only_given_fields() {
    let repo = test_repo().await;
    let created = repo.create(payload("cover-test")).await.unwrap();

    let updated = repo
        .update(
            &created.id,
            UpdateExperiment { description: None, variants: None, active: Some(false) },
        )
        .await
        .unwrap();

    assert!(!updated.active);
    assert_eq!(updated.variants, created.variants);
    assert_eq!(updated.description, created.description);
}

#[tokio::test]
async fn delete_removes_the_experiment() {
    let repo = test_repo().await;
    let created = repo.create(payload("cover-test")).await.unwrap();

    repo.delete(&created.id).await.unwrap();
    assert!(repo.get(&created.id).await.unwrap().is_none());
    assert!(repo.find_by_name("cover-test").await.unwrap().is_none());
}

#[tokio::test]
async fn listing_returns_everything() {
    let repo = test_repo().await;
    repo.create(payload("one")).await.unwrap();
    repo.create(payload("two")).await.unwrap();

    assert_eq!(repo.list_all().await.unwrap().len(), 2);
}
