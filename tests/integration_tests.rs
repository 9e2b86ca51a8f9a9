//! Integration tests for Lantern Search
//!
//! These tests run the HTTP providers and the full search pipeline against
//! local mock catalog servers.

use lantern_search::config::Config;
use lantern_search::models::{SearchRequest, SortDirection, SortField};
use lantern_search::search::{fetch_or_empty, CatalogSearch};
use lantern_search::sources::{CatalogSource, MediaFormats, Source, SourceError};
use lantern_search::utils::HttpClient;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

const SEARCH_PATH: &str = "/api/films/search";

fn endpoint(server: &ServerGuard) -> String {
    format!("{}{}", server.url(), SEARCH_PATH)
}

fn vhs_source(server: &ServerGuard) -> CatalogSource {
    CatalogSource::new(
        "vhs",
        "VHS",
        MediaFormats::VHS,
        &endpoint(server),
        HttpClient::new().unwrap(),
    )
    .unwrap()
}

fn config_for(vhs: &ServerGuard, dvd: &ServerGuard, projector: &ServerGuard) -> Config {
    let mut config = Config::default();
    config.providers.vhs.endpoint = endpoint(vhs);
    config.providers.dvd.endpoint = endpoint(dvd);
    config.providers.projector.endpoint = endpoint(projector);
    config.http.timeout_seconds = 5;
    config
}

fn films(items: serde_json::Value) -> String {
    items.to_string()
}

#[tokio::test]
async fn test_catalog_source_decodes_provider_response() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", SEARCH_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(films(json!([
            {"title": "Movie A", "releaseYear": 2022, "numberOfCopiesAvailable": 3, "director": "Director", "distributor": "Distributor A"},
            {"title": "Movie B", "releaseYear": 2021, "numberOfCopiesAvailable": 2, "director": "Director", "distributor": "Distributor B"}
        ])))
        .create_async()
        .await;

    let source = vhs_source(&server);
    let items = source
        .fetch(&SearchRequest::default().provider_query())
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Movie A");
    assert_eq!(items[0].copies_available, 3);
    assert_eq!(items[1].distributor, "Distributor B");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_catalog_source_posts_query_as_json() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", SEARCH_PATH)
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "currentPage": 2,
            "pageSize": 5,
            "sortField": "releaseYear",
            "sortDirection": "DESC",
            "search": {"title": "Matrix", "releaseYear": 1999}
        })))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let request = SearchRequest::from_json(
        r#"{"currentPage": 2, "pageSize": 5, "sortField": "releaseYear",
            "sortDirection": "DESC", "search": {"title": "Matrix", "releaseYear": 1999}}"#,
    )
    .unwrap();

    let items = vhs_source(&server)
        .fetch(&request.provider_query())
        .await
        .unwrap();

    assert!(items.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_catalog_source_labels_records_without_distributor() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", SEARCH_PATH)
        .with_status(200)
        .with_body(films(json!([
            {"title": "Heat", "releaseYear": 1995, "numberOfCopiesAvailable": 1, "director": "Mann"}
        ])))
        .create_async()
        .await;

    let items = vhs_source(&server)
        .fetch(&SearchRequest::default().provider_query())
        .await
        .unwrap();

    assert_eq!(items[0].distributor, "VHS");
}

#[tokio::test]
async fn test_server_error_is_provider_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", SEARCH_PATH)
        .with_status(500)
        .with_body("{}")
        .create_async()
        .await;

    let source = vhs_source(&server);
    let query = SearchRequest::default().provider_query();

    let result = source.fetch(&query).await;
    assert!(matches!(result, Err(SourceError::Api(_))));

    let items = fetch_or_empty(&source, &query, None).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_provider_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", SEARCH_PATH)
        .with_status(200)
        .with_body(r#"{"films": "not a list"}"#)
        .create_async()
        .await;

    let result = vhs_source(&server)
        .fetch(&SearchRequest::default().provider_query())
        .await;

    assert!(matches!(result, Err(SourceError::Parse(_))));
}

#[tokio::test]
async fn test_unreachable_provider_is_provider_failure() {
    let source = CatalogSource::new(
        "dvd",
        "DVD",
        MediaFormats::DVD,
        "http://127.0.0.1:1/api/films/search",
        HttpClient::new().unwrap(),
    )
    .unwrap();
    let query = SearchRequest::default().provider_query();

    assert!(matches!(
        source.fetch(&query).await,
        Err(SourceError::Network(_))
    ));
    assert!(fetch_or_empty(&source, &query, None).await.is_empty());
}

#[tokio::test]
async fn test_search_merges_across_providers() {
    let mut vhs = Server::new_async().await;
    let mut dvd = Server::new_async().await;
    let mut projector = Server::new_async().await;

    let _vhs_mock = vhs
        .mock("POST", SEARCH_PATH)
        .with_status(200)
        .with_body(films(json!([
            {"title": "Matrix", "releaseYear": 1999, "numberOfCopiesAvailable": 3, "director": "Wachowskis", "distributor": "WarnerBros"}
        ])))
        .create_async()
        .await;
    let _dvd_mock = dvd
        .mock("POST", SEARCH_PATH)
        .with_status(200)
        .with_body(films(json!([
            {"title": "Matrix", "releaseYear": 1999, "numberOfCopiesAvailable": 2, "director": "Wachowskis", "distributor": "Sony"}
        ])))
        .create_async()
        .await;
    let _projector_mock = projector
        .mock("POST", SEARCH_PATH)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let search = CatalogSearch::from_config(&config_for(&vhs, &dvd, &projector)).unwrap();
    let request = SearchRequest::from_json(
        r#"{"currentPage": 1, "pageSize": 2, "sortField": "title", "sortDirection": "ASC",
            "search": {"title": "Matrix"}}"#,
    )
    .unwrap();

    let response = search.search(&request).await.unwrap();

    assert_eq!(response.total_results, 1);
    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(
        body,
        json!({
            "currentPage": 1,
            "pageSize": 2,
            "totalResults": 1,
            "results": [{
                "title": "Matrix",
                "releaseYear": 1999,
                "totalCopiesAvailable": 5,
                "director": "Wachowskis",
                "distributors": "WarnerBros, Sony"
            }]
        })
    );
}

#[tokio::test]
async fn test_one_provider_down_keeps_the_others() {
    let mut vhs = Server::new_async().await;
    let mut dvd = Server::new_async().await;
    let mut projector = Server::new_async().await;

    let _vhs_mock = vhs
        .mock("POST", SEARCH_PATH)
        .with_status(200)
        .with_body(films(json!([
            {"title": "Movie B", "releaseYear": 2021, "numberOfCopiesAvailable": 2, "director": "Director", "distributor": "Distributor B"}
        ])))
        .create_async()
        .await;
    let dvd_mock = dvd
        .mock("POST", SEARCH_PATH)
        .with_status(503)
        .create_async()
        .await;
    let _projector_mock = projector
        .mock("POST", SEARCH_PATH)
        .with_status(200)
        .with_body(films(json!([
            {"title": "Movie A", "releaseYear": 2022, "numberOfCopiesAvailable": 1, "director": "Director", "distributor": "Distributor A"}
        ])))
        .create_async()
        .await;

    let search = CatalogSearch::from_config(&config_for(&vhs, &dvd, &projector)).unwrap();
    let request = SearchRequest::default().sort(SortField::ReleaseYear, SortDirection::Desc);

    let response = search.search(&request).await.unwrap();

    let titles: Vec<&str> = response.results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Movie A", "Movie B"]);
    assert_eq!(response.total_results, 2);
    dvd_mock.assert_async().await;
}

#[tokio::test]
async fn test_excluded_provider_is_never_called() {
    let mut vhs = Server::new_async().await;
    let mut dvd = Server::new_async().await;
    let mut projector = Server::new_async().await;

    let vhs_mock = vhs
        .mock("POST", SEARCH_PATH)
        .expect(0)
        .create_async()
        .await;
    let dvd_mock = dvd
        .mock("POST", SEARCH_PATH)
        .with_status(200)
        .with_body(films(json!([
            {"title": "Movie A", "releaseYear": 2022, "numberOfCopiesAvailable": 3, "director": "Director", "distributor": "Distributor A"},
            {"title": "Movie B", "releaseYear": 2021, "numberOfCopiesAvailable": 2, "director": "Director", "distributor": "Distributor B"}
        ])))
        .expect(1)
        .create_async()
        .await;
    let projector_mock = projector
        .mock("POST", SEARCH_PATH)
        .expect(0)
        .create_async()
        .await;

    let search = CatalogSearch::from_config(&config_for(&vhs, &dvd, &projector)).unwrap();
    let request = SearchRequest::default().exclude(MediaFormats::VHS | MediaFormats::PROJECTOR);

    let response = search.search(&request).await.unwrap();

    assert_eq!(response.total_results, 2);
    vhs_mock.assert_async().await;
    dvd_mock.assert_async().await;
    projector_mock.assert_async().await;
}

#[tokio::test]
async fn test_all_excluded_returns_empty_response() {
    let search = CatalogSearch::from_config(&Config::default()).unwrap();
    let request = SearchRequest::from_json(
        r#"{"excludeVHS": true, "excludeDVD": true, "excludeProjector": true,
            "currentPage": 1, "pageSize": 10}"#,
    )
    .unwrap();

    let response = search.search(&request).await.unwrap();

    assert_eq!(response.total_results, 0);
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn test_invalid_page_size_is_rejected() {
    let search = CatalogSearch::from_config(&Config::default()).unwrap();
    let request = SearchRequest::from_json(r#"{"currentPage": 1, "pageSize": 0}"#).unwrap();

    let err = search.search(&request).await.unwrap_err();
    assert_eq!(err.status_code(), 400);
}
