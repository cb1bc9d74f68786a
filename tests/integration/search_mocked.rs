//! ESearch behaviour against a mocked E-utilities server

mod common;

use common::{create_mock_client, esearch_body, mount_esearch};
use pubmed_fetcher::PubMedError;
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
#[traced_test]
async fn test_search_sends_expected_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("term", "covid-19 treatment"))
        .and(query_param("retmode", "json"))
        .and(query_param("retmax", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_body(&["1", "2", "3"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let pmids = client
        .search_articles("covid-19 treatment", 5)
        .await
        .expect("Search should succeed");

    assert_eq!(pmids, vec!["1", "2", "3"]);
    assert!(logs_contain("Search completed successfully"));
}

#[tokio::test]
#[traced_test]
async fn test_search_never_returns_more_than_requested() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, &["5", "4", "3", "2", "1"]).await;
    let client = create_mock_client(&mock_server);

    for max_results in 1..=6 {
        let pmids = client.search_articles("cancer", max_results).await.unwrap();
        assert!(pmids.len() <= max_results);
    }

    // Service order is kept
    let pmids = client.search_articles("cancer", 2).await.unwrap();
    assert_eq!(pmids, vec!["5", "4"]);
}

#[tokio::test]
#[traced_test]
async fn test_search_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let result = client.search_articles("cancer", 10).await;

    match result {
        Err(PubMedError::ApiError { status, .. }) => assert_eq!(status, 500),
        other => panic!("Expected ApiError, got {:?}", other),
    }
    assert!(logs_contain("API request failed with status"));
}

#[tokio::test]
#[traced_test]
async fn test_search_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let result = client.search_articles("cancer", 10).await;

    assert!(matches!(result, Err(PubMedError::JsonError(_))));
}

#[tokio::test]
#[traced_test]
async fn test_search_without_idlist_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"esearchresult": {"count": "0", "ERROR": "Empty term and query_key - nothing todo"}}"#),
        )
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let pmids = client.search_articles("zzzz", 10).await.unwrap();

    assert!(pmids.is_empty());
    assert!(logs_contain("ESearch reported an error"));
}

#[tokio::test]
#[traced_test]
async fn test_blank_query_makes_no_request() {
    let mock_server = MockServer::start().await;
    let client = create_mock_client(&mock_server);

    let pmids = client.search_articles("  ", 10).await.unwrap();
    assert!(pmids.is_empty());

    let received = mock_server.received_requests().await.unwrap();
    assert!(received.is_empty());
}
