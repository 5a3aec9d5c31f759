//! Integration tests for the REST price feed

use serde_json::json;
use traderedge::services::{FeedError, HttpPriceFeed, MarketDataProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, symbol: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/price"))
        .and(query_param("symbol", symbol))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetches_quote() {
    let server = MockServer::start().await;
    serve(
        &server,
        "EURUSD",
        ResponseTemplate::new(200).set_body_json(json!({"symbol": "EURUSD", "price": 1.0853})),
    )
    .await;

    // Trailing slash on the base url is tolerated
    let feed = HttpPriceFeed::new(format!("{}/", server.uri()));
    let quote = feed.latest_quote("EURUSD").await.unwrap();
    assert_eq!(quote.symbol, "EURUSD");
    assert_eq!(quote.price, 1.0853);
    assert_eq!(quote.source, "http");
}

#[tokio::test]
async fn missing_symbol_field_uses_requested_symbol() {
    let server = MockServer::start().await;
    serve(
        &server,
        "GBPUSD",
        ResponseTemplate::new(200).set_body_json(json!({"price": 1.2649})),
    )
    .await;

    let quote = HttpPriceFeed::new(server.uri())
        .latest_quote("GBPUSD")
        .await
        .unwrap();
    assert_eq!(quote.symbol, "GBPUSD");
}

#[tokio::test]
async fn non_positive_price_is_rejected() {
    let server = MockServer::start().await;
    serve(
        &server,
        "USDJPY",
        ResponseTemplate::new(200).set_body_json(json!({"price": -1.0})),
    )
    .await;

    let result = HttpPriceFeed::new(server.uri()).latest_quote("USDJPY").await;
    assert!(matches!(result, Err(FeedError::InvalidPrice { .. })));
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start().await;
    serve(&server, "AUDUSD", ResponseTemplate::new(404)).await;

    let result = HttpPriceFeed::new(server.uri()).latest_quote("AUDUSD").await;
    match result {
        Err(FeedError::Status { symbol, status }) => {
            assert_eq!(symbol, "AUDUSD");
            assert_eq!(status, 404);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_request_error() {
    let server = MockServer::start().await;
    serve(
        &server,
        "EURUSD",
        ResponseTemplate::new(200).set_body_string("not json"),
    )
    .await;

    let result = HttpPriceFeed::new(server.uri()).latest_quote("EURUSD").await;
    assert!(matches!(result, Err(FeedError::Request(_))));
}
