use httpmock::prelude::*;
use ihub_gateway::{
    AmazonBooksClient, BookSource, DnsZoneClient, FrontDoorClient, GatewayError,
    GoogleDomainsClient, PrhClient, StripeClient, WhmcsClient, WikipediaClient, build_client,
};
use serde_json::json;

#[tokio::test]
async fn whmcs_registers_domain() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/includes/api.php")
                .body_contains("action=DomainRegister")
                .body_contains("domain=example.com")
                .body_contains("identifier=ident")
                .body_contains("secret=shh");
            then.status(200)
                .json_body(json!({ "result": "success", "orderid": 42 }));
        })
        .await;

    let client = WhmcsClient::new(build_client().unwrap(), &server.base_url(), "ident", "shh")
        .unwrap();
    let order = client.register_domain("example.com", 1).await.unwrap();

    mock.assert_async().await;
    assert_eq!(order.domain, "example.com");
    assert_eq!(order.order_id, Some(42));
}

#[tokio::test]
async fn whmcs_business_error_is_upstream() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/includes/api.php");
            then.status(200)
                .json_body(json!({ "result": "error", "message": "Domain taken" }));
        })
        .await;

    let client = WhmcsClient::new(build_client().unwrap(), &server.base_url(), "ident", "shh")
        .unwrap();
    let err = client.register_domain("example.com", 1).await.unwrap_err();

    match err {
        GatewayError::Upstream { service, message, .. } => {
            assert_eq!(service, "whmcs");
            assert_eq!(message, "Domain taken");
        }
        other => panic!("expected upstream error, got {other}"),
    }
}

#[tokio::test]
async fn whmcs_updates_up_to_five_nameservers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/includes/api.php")
                .body_contains("action=DomainUpdateNameservers")
                .body_contains("ns1=a.ns.example")
                .body_contains("ns2=b.ns.example");
            then.status(200).json_body(json!({ "result": "success" }));
        })
        .await;

    let client = WhmcsClient::new(build_client().unwrap(), &server.base_url(), "ident", "shh")
        .unwrap();
    client
        .update_nameservers(
            "example.com",
            &["a.ns.example".to_owned(), "b.ns.example".to_owned()],
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn dns_zone_returns_nameservers() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/zones/example.com");
            then.status(201).json_body(json!({
                "name": "example.com",
                "nameServers": ["a.ns.example", "b.ns.example"],
            }));
        })
        .await;

    let client = DnsZoneClient::new(build_client().unwrap(), &server.base_url(), "token")
        .unwrap();
    let zone = client.create_zone("example.com").await.unwrap();

    assert_eq!(zone.name, "example.com");
    assert_eq!(zone.name_servers.len(), 2);
}

#[tokio::test]
async fn front_door_binds_domain() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/customDomains/example.com")
                .json_body(json!({ "hostName": "example.com" }));
            then.status(200).json_body(json!({
                "hostName": "example.com",
                "provisioningState": "Succeeded",
            }));
        })
        .await;

    let client = FrontDoorClient::new(build_client().unwrap(), &server.base_url(), "token")
        .unwrap();
    let binding = client.bind_domain("example.com").await.unwrap();

    assert_eq!(binding.host_name, "example.com");
    assert_eq!(binding.provisioning_state.as_deref(), Some("Succeeded"));
}

#[tokio::test]
async fn google_domains_reports_availability() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/domains:search")
                .query_param("query", "example.com");
            then.status(200).json_body(json!({
                "domainName": "example.com",
                "available": true,
                "priceUsd": 12.0,
            }));
        })
        .await;

    let client =
        GoogleDomainsClient::new(build_client().unwrap(), &server.base_url(), "key").unwrap();
    let availability = client.check_availability("example.com").await.unwrap();

    assert!(availability.available);
    assert_eq!(availability.price_usd, Some(12.0));
}

#[tokio::test]
async fn stripe_finds_then_creates_customer() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/customers")
                .query_param("email", "writer@example.com");
            then.status(200).json_body(json!({ "data": [] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/customers")
                .body_contains("email=writer%40example.com");
            then.status(200)
                .json_body(json!({ "id": "cus_123", "email": "writer@example.com" }));
        })
        .await;

    let client = StripeClient::new(build_client().unwrap(), &server.base_url(), "sk_test")
        .unwrap();

    let found = client.find_customer("writer@example.com").await.unwrap();
    assert!(found.is_none());

    let created = client.create_customer("writer@example.com").await.unwrap();
    assert_eq!(created.id, "cus_123");
}

#[tokio::test]
async fn stripe_creates_checkout_session() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/checkout/sessions")
                .body_contains("customer=cus_123")
                .body_contains("mode=subscription");
            then.status(200).json_body(json!({
                "id": "cs_test_1",
                "url": "https://checkout.stripe.com/c/pay/cs_test_1",
            }));
        })
        .await;

    let client = StripeClient::new(build_client().unwrap(), &server.base_url(), "sk_test")
        .unwrap();
    let session = client
        .create_checkout_session("cus_123", "price_1", "https://app/success", "https://app/cancel")
        .await
        .unwrap();

    assert_eq!(session.id, "cs_test_1");
    assert!(session.url.is_some());
}

#[tokio::test]
async fn amazon_search_normalizes_hits() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/paapi5/searchitems");
            then.status(200).json_body(json!({
                "SearchResult": {
                    "Items": [{
                        "ASIN": "B000000001",
                        "ItemInfo": {
                            "Title": { "DisplayValue": "The Dispossessed" },
                            "ByLineInfo": {
                                "Contributors": [{ "Name": "Ursula K. Le Guin" }]
                            }
                        }
                    }]
                }
            }));
        })
        .await;

    let client = AmazonBooksClient::new(build_client().unwrap(), &server.base_url(), "tag-20")
        .unwrap();
    let hits = client.search("dispossessed").await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "The Dispossessed");
    assert_eq!(hits[0].author.as_deref(), Some("Ursula K. Le Guin"));
    assert_eq!(hits[0].source, BookSource::Amazon);
}

#[tokio::test]
async fn prh_search_normalizes_hits() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/titles")
                .query_param("search", "earthsea");
            then.status(200).json_body(json!({
                "data": {
                    "titles": [{
                        "isbn": "9780547773742",
                        "title": "A Wizard of Earthsea",
                        "author": "Ursula K. Le Guin"
                    }]
                }
            }));
        })
        .await;

    let client = PrhClient::new(build_client().unwrap(), &server.base_url(), "key").unwrap();
    let hits = client.search("earthsea").await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].source, BookSource::PenguinRandomHouse);
}

#[tokio::test]
async fn wikipedia_slugifies_titles() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/page/summary/Ursula_K._Le_Guin");
            then.status(200).json_body(json!({
                "title": "Ursula K. Le Guin",
                "description": "American writer",
                "extract": "Ursula Kroeber Le Guin was an American author.",
            }));
        })
        .await;

    let client = WikipediaClient::new(build_client().unwrap(), &server.base_url()).unwrap();
    let summary = client.summary("Ursula K. Le Guin").await.unwrap();

    mock.assert_async().await;
    assert_eq!(summary.title, "Ursula K. Le Guin");
}

#[tokio::test]
async fn non_success_status_maps_to_upstream() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/page/summary/Missing");
            then.status(500).body("backend exploded");
        })
        .await;

    let client = WikipediaClient::new(build_client().unwrap(), &server.base_url()).unwrap();
    let err = client.summary("Missing").await.unwrap_err();

    match err {
        GatewayError::Upstream { status, message, .. } => {
            assert_eq!(status, 500);
            assert_eq!(message, "backend exploded");
        }
        other => panic!("expected upstream error, got {other}"),
    }
}
