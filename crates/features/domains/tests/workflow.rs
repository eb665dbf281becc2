use httpmock::prelude::*;
use ihub_database::{Database, SliceSchema};
use ihub_domains::{DomainProvisioner, DomainsRepository, RegistrationStatus};
use ihub_gateway::{DnsZoneClient, FrontDoorClient, WhmcsClient, build_client};
use serde_json::json;

async fn test_repo() -> DomainsRepository {
    let db = Database::builder()
        .url("mem://")
        .session("ihub", "workflow_test")
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

fn provisioner(repo: DomainsRepository, server: &MockServer) -> DomainProvisioner {
    let http = build_client().unwrap();
    let whmcs = WhmcsClient::new(http.clone(), &server.base_url(), "ident", "secret").unwrap();
    let dns = DnsZoneClient::new(http.clone(), &server.base_url(), "dns-token").unwrap();
    let front_door = FrontDoorClient::new(http, &server.base_url(), "edge-token").unwrap();
    DomainProvisioner::new(repo, whmcs, dns, front_door, 1)
}

#[tokio::test]
async fn happy_path_completes_every_step() {
    let server = MockServer::start_async().await;
    let register = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/includes/api.php")
                .body_contains("action=DomainRegister");
            then.status(200).json_body(json!({ "result": "success", "orderid": 77 }));
        })
        .await;
    let zone = server
        .mock_async(|when, then| {
            when.method(PUT).path("/zones/example.com");
            then.status(200).json_body(json!({
                "name": "example.com",
                "nameServers": ["ns1.zones.example", "ns2.zones.example"],
            }));
        })
        .await;
    let nameservers = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/includes/api.php")
                .body_contains("action=DomainUpdateNameservers")
                .body_contains("ns1=ns1.zones.example");
            then.status(200).json_body(json!({ "result": "success" }));
        })
        .await;
    let edge = server
        .mock_async(|when, then| {
            when.method(PUT).path("/customDomains/example.com");
            then.status(200).json_body(json!({
                "hostName": "example.com",
                "provisioningState": "Succeeded",
            }));
        })
        .await;

    let repo = test_repo().await;
    let registration = repo.create("owner@example.com", "example.com").await.unwrap();

    let result = provisioner(repo, &server).run(&registration.id).await.unwrap();

    assert_eq!(result.status, RegistrationStatus::Completed);
    assert!(result.steps.is_complete());
    assert_eq!(result.name_servers.len(), 2);
    assert!(result.last_error.is_none());
    register.assert_async().await;
    zone.assert_async().await;
    nameservers.assert_async().await;
    edge.assert_async().await;
}

#[tokio::test]
async fn registrar_rejection_short_circuits_the_run() {
    let server = MockServer::start_async().await;
    let register = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/includes/api.php")
                .body_contains("action=DomainRegister");
            then.status(200)
                .json_body(json!({ "result": "error", "message": "Domain not available" }));
        })
        .await;
    let zone = server
        .mock_async(|when, then| {
            when.method(PUT).path_contains("/zones/");
            then.status(200).json_body(json!({ "name": "example.com" }));
        })
        .await;

    let repo = test_repo().await;
    let registration = repo.create("owner@example.com", "example.com").await.unwrap();

    let result = provisioner(repo, &server).run(&registration.id).await.unwrap();

    assert_eq!(result.status, RegistrationStatus::InProgress);
    assert!(!result.steps.registered);
    assert!(!result.steps.zone_created);
    assert!(!result.steps.edge_bound);
    assert!(result.last_error.as_deref().unwrap_or_default().contains("Domain not available"));
    register.assert_async().await;
    zone.assert_hits_async(0).await;
}

#[tokio::test]
async fn zone_failure_still_attempts_the_edge_binding() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/includes/api.php")
                .body_contains("action=DomainRegister");
            then.status(200).json_body(json!({ "result": "success", "orderid": 5 }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/zones/example.com");
            then.status(500).body("zone backend down");
        })
        .await;
    let edge = server
        .mock_async(|when, then| {
            when.method(PUT).path("/customDomains/example.com");
            then.status(200).json_body(json!({ "hostName": "example.com" }));
        })
        .await;

    let repo = test_repo().await;
    let registration = repo.create("owner@example.com", "example.com").await.unwrap();

    let result = provisioner(repo, &server).run(&registration.id).await.unwrap();

    assert_eq!(result.status, RegistrationStatus::InProgress);
    assert!(result.steps.registered);
    assert!(!result.steps.zone_created);
    // no delegated name servers to push yet
    assert!(!result.steps.nameservers_updated);
    assert!(result.steps.edge_bound);
    assert!(result.last_error.is_some());
    edge.assert_async().await;
}

#[tokio::test]
async fn rerun_skips_steps_that_already_succeeded() {
    let server = MockServer::start_async().await;
    let register = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/includes/api.php")
                .body_contains("action=DomainRegister");
            then.status(200).json_body(json!({ "result": "success", "orderid": 9 }));
        })
        .await;
    // zone backend fails on the first run, recovers afterwards
    let broken_zone = server
        .mock_async(|when, then| {
            when.method(PUT).path("/zones/example.com");
            then.status(502).body("upstream spasm");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/includes/api.php")
                .body_contains("action=DomainUpdateNameservers");
            then.status(200).json_body(json!({ "result": "success" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/customDomains/example.com");
            then.status(200).json_body(json!({ "hostName": "example.com" }));
        })
        .await;

    let repo = test_repo().await;
    let registration = repo.create("owner@example.com", "example.com").await.unwrap();
    let provisioner = provisioner(repo, &server);

    let first = provisioner.run(&registration.id).await.unwrap();
    assert!(first.steps.registered);
    assert!(!first.steps.zone_created);
    assert_eq!(first.status, RegistrationStatus::InProgress);

    broken_zone.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/zones/example.com");
            then.status(200).json_body(json!({
                "name": "example.com",
                "nameServers": ["ns1.zones.example"],
            }));
        })
        .await;

    let second = provisioner.run(&registration.id).await.unwrap();
    assert_eq!(second.status, RegistrationStatus::Completed);
    assert!(second.steps.is_complete());
    // the registrar order from the first run is never repeated
    register.assert_async().await;

    let third = provisioner.run(&registration.id).await.unwrap();
    assert_eq!(third.status, RegistrationStatus::Completed);
    register.assert_async().await;
}
