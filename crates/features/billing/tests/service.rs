use httpmock::prelude::*;
use ihub_billing::BillingService;
use ihub_domain::config::StripeConfig;
use ihub_gateway::{StripeClient, build_client};
use serde_json::json;

fn service(server: &MockServer) -> BillingService {
    let http = build_client().unwrap();
    let client = StripeClient::new(http, &server.base_url(), "sk_test_123").unwrap();
    let config = StripeConfig {
        url: server.base_url(),
        secret_key: "sk_test_123".to_owned(),
        price_id: "price_platform_monthly".to_owned(),
        success_url: "https://inkhub.example/billing/success".to_owned(),
        cancel_url: "https://inkhub.example/billing/cancel".to_owned(),
    };
    BillingService::new(client, config)
}

#[tokio::test]
async fn first_contact_creates_the_customer() {
    let server = MockServer::start_async().await;
    let find = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/customers").query_param("email", "writer@example.com");
            then.status(200).json_body(json!({ "data": [] }));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/customers")
                .body_contains("email=writer%40example.com");
            then.status(200)
                .json_body(json!({ "id": "cus_new", "email": "writer@example.com" }));
        })
        .await;

    let customer = service(&server).customer_for("writer@example.com").await.unwrap();

    assert_eq!(customer.id, "cus_new");
    assert_eq!(customer.email, "writer@example.com");
    find.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn repeat_lookups_are_served_from_cache() {
    let server = MockServer::start_async().await;
    let find = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/customers");
            then.status(200)
                .json_body(json!({ "data": [{ "id": "cus_known", "email": "writer@example.com" }] }));
        })
        .await;

    let service = service(&server);
    let first = service.customer_for("writer@example.com").await.unwrap();
    let second = service.customer_for("writer@example.com").await.unwrap();

    assert_eq!(first.id, "cus_known");
    assert_eq!(second.id, "cus_known");
    find.assert_async().await;
}

#[tokio::test]
async fn checkout_binds_the_resolved_customer() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/customers");
            then.status(200)
                .json_body(json!({ "data": [{ "id": "cus_9", "email": "writer@example.com" }] }));
        })
        .await;
    let session = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/checkout/sessions")
                .body_contains("customer=cus_9")
                .body_contains("mode=subscription");
            then.status(200).json_body(json!({
                "id": "cs_test_42",
                "url": "https://checkout.stripe.com/c/pay/cs_test_42",
            }));
        })
        .await;

    let checkout = service(&server).checkout_for("writer@example.com").await.unwrap();

    assert_eq!(checkout.id, "cs_test_42");
    assert!(checkout.url.is_some());
    session.assert_async().await;
}

#[tokio::test]
async fn stripe_outage_surfaces_as_a_gateway_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/customers");
            then.status(500).body("stripe is down");
        })
        .await;

    let err = service(&server).customer_for("writer@example.com").await.unwrap_err();
    assert!(matches!(err, ihub_billing::BillingError::Gateway { .. }));
}
