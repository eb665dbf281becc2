use ihub_authors::{AuthorsRepository, CreateAuthor, UpdateAuthor};
use ihub_database::{Database, SliceSchema};

async fn test_repo() -> AuthorsRepository {
    let db = Database::builder()
        .url("mem://")
        .session("ihub", "authors_test")
        .init()
        .await
        .unwrap();
    db.apply_schema(&SliceSchema::new(
        "authors",
        "DEFINE TABLE OVERWRITE author SCHEMALESS;",
    ))
    .await
    .unwrap();
    AuthorsRepository::new(db)
}

fn payload(pen_name: &str) -> CreateAuthor {
    CreateAuthor {
        pen_name: pen_name.to_owned(),
        bio: Some("Writes space operas".to_owned()),
        website: None,
        genres: vec!["sci-fi".to_owned()],
    }
}

#[tokio::test]
async fn create_and_fetch_roundtrip() {
    let repo = test_repo().await;

    let created = repo.create("writer@example.com", payload("K. Vonnegut")).await.unwrap();
    assert_eq!(created.id.len(), 12);
    assert_eq!(created.upn, "writer@example.com");
    assert_eq!(created.pen_name, "K. Vonnegut");
    assert_eq!(created.created_at, created.updated_at);

    let fetched = repo.get(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched.pen_name, "K. Vonnegut");
    assert_eq!(fetched.genres, vec!["sci-fi"]);
}

#[tokio::test]
async fn listing_is_scoped_by_upn() {
    let repo = test_repo().await;

    repo.create("a@example.com", payload("Author A")).await.unwrap();
    repo.create("b@example.com", payload("Author B")).await.unwrap();

    let mine = repo.list_for("a@example.com").await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].pen_name, "Author A");

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let repo = test_repo().await;
    let created = repo.create("a@example.com", payload("Before")).await.unwrap();

    let updated = repo
        .update(
            &created.id,
            UpdateAuthor {
                pen_name: Some("After".to_owned()),
                bio: None,
                website: None,
                genres: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.pen_name, "After");
    assert_eq!(updated.bio.as_deref(), Some("Writes space operas"));
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn delete_removes_record() {
    let repo = test_repo().await;
    let created = repo.create("a@example.com", payload("Gone")).await.unwrap();

    repo.delete(&created.id).await.unwrap();
    assert!(repo.get(&created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn missing_author_is_none() {
    let repo = test_repo().await;
    assert!(repo.get("zzzzzzzzzzzz").await.unwrap().is_none());
}
