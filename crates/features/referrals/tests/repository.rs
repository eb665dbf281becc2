use ihub_database::{Database, SliceSchema};
use ihub_referrals::{ReferralsError, ReferralsRepository};

async fn test_repo() -> ReferralsRepository {
    let db = Database::builder()
        .url("mem://")
        .session("ihub", "referrals_test")
        .init()
        .await
        .unwrap();
    db.apply_schema(&SliceSchema::new(
        "referrals",
        "DEFINE TABLE OVERWRITE referral SCHEMALESS;",
    ))
    .await
    .unwrap();
    ReferralsRepository::new(db)
}

#[tokio::test]
async fn minted_codes_start_at_zero_claims() {
    let repo = test_repo().await;
    let referral = repo.create("owner@example.com").await.unwrap();

    assert_eq!(referral.claims, 0);
    assert_eq!(referral.code.len(), 8);
}

#[tokio::test]
async fn claims_increment() {
    let repo = test_repo().await;
    let referral = repo.create("owner@example.com").await.unwrap();

    let after = repo.claim(&referral.code, "friend@example.com").await.unwrap();
    assert_eq!(after.claims, 1);

    let after = repo.claim(&referral.code, "another@example.com").await.unwrap();
    assert_eq!(after.claims, 2);
}

#[tokio::test]
async fn claiming_own_code_is_a_conflict() {
    let repo = test_repo().await;
    let referral = repo.create("owner@example.com").await.unwrap();

    let err = repo.claim(&referral.code, "owner@example.com").await.unwrap_err();
    assert!(matches!(err, ReferralsError::Conflict { .. }));
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let repo = test_repo().await;
    let err = repo.claim("nope1234", "friend@example.com").await.unwrap_err();
    assert!(matches!(err, ReferralsError::NotFound { .. }));
}

#[tokio::test]
async fn listing_is_scoped_by_upn() {
    let repo = test_repo().await;
    repo.create("a@example.com").await.unwrap();
    repo.create("b@example.com").await.unwrap();

    assert_eq!(repo.list_for("a@example.com").await.unwrap().len(), 1);
    assert_eq!(repo.list_all().await.unwrap().len(), 2);
}
