use ihub_database::{Database, SliceSchema};
use ihub_leads::{CaptureLead, LeadsRepository};

async fn test_repo() -> LeadsRepository {
    let db = Database::builder()
        .url("mem://")
        .session("ihub", "leads_test")
        .init()
        .await
        .unwrap();
    db.apply_schema(&SliceSchema::new("leads", "DEFINE TABLE OVERWRITE lead SCHEMALESS;"))
        .await
        .unwrap();
    LeadsRepository::new(db)
}

#[tokio::test]
async fn capture_and_list() {
    let repo = test_repo().await;

    let lead = repo
        .create(CaptureLead {
            email: "reader@example.com".to_owned(),
            name: Some("A Reader".to_owned()),
            source: Some("landing-page".to_owned()),
        })
        .await
        .unwrap();

    assert_eq!(lead.email, "reader@example.com");

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].source.as_deref(), Some("landing-page"));
}

#[tokio::test]
async fn delete_removes_lead() {
    let repo = test_repo().await;
    let lead = repo
        .create(CaptureLead {
            email: "reader@example.com".to_owned(),
            name: None,
            source: None,
        })
        .await
        .unwrap();

    repo.delete(&lead.id).await.unwrap();
    assert!(repo.get(&lead.id).await.unwrap().is_none());
}
