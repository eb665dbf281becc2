use ihub_database::{Database, SliceSchema};
use ihub_testimonials::{CreateTestimonial, TestimonialsRepository, UpdateTestimonial};

async fn test_repo() -> TestimonialsRepository {
    let db = Database::builder()
        .url("mem://")
        .session("ihub", "testimonials_test")
        .init()
        .await
        .unwrap();
    db.apply_schema(&SliceSchema::new(
        "testimonials",
        "DEFINE TABLE OVERWRITE testimonial SCHEMALESS;",
    ))
    .await
    .unwrap();
    TestimonialsRepository::new(db)
}

fn payload(quote: &str) -> CreateTestimonial {
    CreateTestimonial {
        author_name: "A Reader".to_owned(),
        quote: quote.to_owned(),
        source: Some("newsletter".to_owned()),
    }
}

#[tokio::test]
async fn new_testimonials_start_unapproved() {
    let repo = test_repo().await;
    let created = repo.create("writer@example.com", payload("Loved it")).await.unwrap();
    assert!(!created.approved);
}

#[tokio::test]
async fn approval_flips_the_flag() {
    let repo = test_repo().await;
    let created = repo.create("writer@example.com", payload("Loved it")).await.unwrap();

    let approved = repo.approve(&created.id).await.unwrap();
    assert!(approved.approved);
}

#[tokio::test]
async fn update_cannot_touch_approval() {
    let repo = test_repo().await;
    let created = repo.create("writer@example.com", payload("Original")).await.unwrap();
    repo.approve(&created.id).await.unwrap();

    let updated = repo
        .update(
            &created.id,
            UpdateTestimonial {
                author_name: None,
                quote: Some("Edited".to_owned()),
                source: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.quote, "Edited");
    assert!(updated.approved, "editing must not reset approval");
}

#[tokio::test]
async fn listing_is_scoped_by_upn() {
    let repo = test_repo().await;
    repo.create("a@example.com", payload("From A")).await.unwrap();
    repo.create("b@example.com", payload("From B")).await.unwrap();

    assert_eq!(repo.list_for("a@example.com").await.unwrap().len(), 1);
    assert_eq!(repo.list_all().await.unwrap().len(), 2);
}
