use ihub_database::{Database, SliceSchema};
use ihub_domains::{
    DomainsError, DomainsRepository, ProvisioningSteps, RegistrationStatus,
};

async fn test_repo() -> DomainsRepository {
    let db = Database::builder()
        .url("mem://")
        .session("ihub", "domains_test")
        .init()
        .await
        .unwrap();
    db.apply_schema(&SliceSchema::new(
        "domains",
        "DEFINE TABLE OVERWRITE domain_registration SCHEMALESS;",
    ))
    .await
    .unwrap();
    DomainsRepository::new(db)
}

#[tokio::test]
async fn new_registrations_start_pending() {
    let repo = test_repo().await;
    let registration = repo.create("owner@example.com", "example.com").await.unwrap();

    assert_eq!(registration.status, RegistrationStatus::Pending);
    assert_eq!(registration.steps, ProvisioningSteps::default());
    assert!(registration.name_servers.is_empty());
    assert!(registration.last_error.is_none());
}

#[tokio::test]
async fn duplicate_domain_is_a_conflict() {
    let repo = test_repo().await;
    repo.create("owner@example.com", "example.com").await.unwrap();

    let err = repo.create("other@example.com", "example.com").await.unwrap_err();
    assert!(matches!(err, DomainsError::Conflict { .. }));
}

#[tokio::test]
async fn progress_is_persisted() {
    let repo = test_repo().await;
    let registration = repo.create("owner@example.com", "example.com").await.unwrap();

    let steps = ProvisioningSteps { registered: true, zone_created: true, ..Default::default() };
    let updated = repo
        .record_progress(
            &registration.id,
            steps,
            RegistrationStatus::InProgress,
            vec!["ns1.example.net".to_owned()],
            Some("Name-server update failed".to_owned()),
        )
        .await
        .unwrap();

    assert_eq!(updated.status, RegistrationStatus::InProgress);
    assert_eq!(updated.steps, steps);
    assert_eq!(updated.name_servers, vec!["ns1.example.net".to_owned()]);
    assert_eq!(updated.last_error.as_deref(), Some("Name-server update failed"));
    assert!(updated.updated_at >= registration.updated_at);
}

#[tokio::test]
async fn listing_is_scoped_by_upn() {
    let repo = test_repo().await;
    repo.create("a@example.com", "a.com").await.unwrap();
    repo.create("b@example.com", "b.com").await.unwrap();

    assert_eq!(repo.list_for("a@example.com").await.unwrap().len(), 1);
    assert_eq!(repo.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn lookup_by_domain() {
    let repo = test_repo().await;
    let created = repo.create("owner@example.com", "example.com").await.unwrap();

    let found = repo.find_by_domain("example.com").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert!(repo.find_by_domain("missing.com").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_removes_the_registration() {
    let repo = test_repo().await;
    let created = repo.create("owner@example.com", "example.com").await.unwrap();

    repo.delete(&created.id).await.unwrap();
    assert!(repo.get(&created.id).await.unwrap().is_none());
}
