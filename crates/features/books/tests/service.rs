use httpmock::prelude::*;
use ihub_books::{BooksError, BooksService};
use ihub_gateway::{AmazonBooksClient, PrhClient, WikipediaClient, build_client};
use serde_json::json;

fn service(server: &MockServer) -> BooksService {
    let http = build_client().unwrap();
    let amazon = AmazonBooksClient::new(http.clone(), &server.base_url(), "inkhub-20").unwrap();
    let penguin = PrhClient::new(http.clone(), &server.base_url(), "prh-key").unwrap();
    let wikipedia = WikipediaClient::new(http, &server.base_url()).unwrap();
    BooksService::new(amazon, penguin, wikipedia)
}

fn amazon_body() -> serde_json::Value {
    json!({
        "SearchResult": {
            "Items": [{
                "ASIN": "B000FC0SIS",
                "ItemInfo": {
                    "Title": { "DisplayValue": "The Left Hand of Darkness" },
                    "ByLineInfo": { "Contributors": [{ "Name": "Ursula K. Le Guin" }] },
                },
            }],
        },
    })
}

fn penguin_body() -> serde_json::Value {
    json!({
        "data": {
            "titles": [{
                "isbn": "9780441478125",
                "title": "The Left Hand of Darkness",
                "author": "Ursula K. Le Guin",
            }],
        },
    })
}

#[tokio::test]
async fn merges_hits_from_both_catalogues() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/paapi5/searchitems");
            then.status(200).json_body(amazon_body());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/titles").query_param("search", "left hand");
            then.status(200).json_body(penguin_body());
        })
        .await;

    let results = service(&server).search("left hand").await.unwrap();

    assert_eq!(results.hits.len(), 2);
    assert!(results.skipped_sources.is_empty());
    assert_eq!(results.hits[0].source, "amazon");
    assert_eq!(results.hits[1].source, "penguin_random_house");
}

#[tokio::test]
async fn one_failing_catalogue_is_skipped() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/paapi5/searchitems");
            then.status(503).body("throttled");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/titles");
            then.status(200).json_body(penguin_body());
        })
        .await;

    let results = service(&server).search("left hand").await.unwrap();

    assert_eq!(results.hits.len(), 1);
    assert_eq!(results.skipped_sources, vec!["amazon".to_owned()]);
}

#[tokio::test]
async fn all_catalogues_failing_is_an_upstream_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/paapi5/searchitems");
            then.status(503).body("throttled");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/titles");
            then.status(500).body("broken");
        })
        .await;

    let err = service(&server).search("left hand").await.unwrap_err();
    assert!(matches!(err, BooksError::Upstream { .. }));
}

#[tokio::test]
async fn wiki_summary_folds_spaces_into_the_slug() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/page/summary/Ursula_K._Le_Guin");
            then.status(200).json_body(json!({
                "title": "Ursula K. Le Guin",
                "description": "American author",
                "extract": "Ursula Kroeber Le Guin was an American author.",
            }));
        })
        .await;

    let page = service(&server).wiki_summary("Ursula K. Le Guin").await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.title, "Ursula K. Le Guin");
    assert_eq!(page.description.as_deref(), Some("American author"));
}

#[tokio::test]
async fn missing_wiki_page_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/page/summary/");
            then.status(404).body("no such page");
        })
        .await;

    let err = service(&server).wiki_summary("Nonexistent Author").await.unwrap_err();
    assert!(matches!(err, BooksError::NotFound { .. }));
}
