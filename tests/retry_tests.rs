mod common;

use cma_client::ApiError;
use common::{ORG_ID, client, collection, organization, retrying_client};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rate_limited() -> ResponseTemplate {
    ResponseTemplate::new(429)
        .insert_header("x-contentful-ratelimit-reset", "0")
        .set_body_json(json!({
            "sys": { "type": "Error", "id": "RateLimitExceeded" },
            "message": "You have exceeded the rate limit",
        }))
}

#[tokio::test]
async fn rate_limited_request_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(rate_limited())
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(vec![organization(ORG_ID, "Acme")])))
        .expect(1)
        .mount(&server)
        .await;

    let orgs = retrying_client(&server, 3).get_organizations().await.unwrap();
    assert_eq!(orgs.items[0].name, "Acme");
}

#[tokio::test]
async fn server_error_is_retried_until_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(3)
        .mount(&server)
        .await;

    let err = retrying_client(&server, 2).get_organizations().await.unwrap_err();
    match err {
        ApiError::ServerError { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "sys": { "type": "Error", "id": "AccessDenied" },
            "message": "Forbidden",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = retrying_client(&server, 5).get_organizations().await.unwrap_err();
    assert!(matches!(err, ApiError::PermissionDenied(ref m) if m == "Forbidden"));
}

#[tokio::test]
async fn retries_disabled_surfaces_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(rate_limited())
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).get_organizations().await.unwrap_err();
    assert!(matches!(err, ApiError::RateLimited { reset_secs: Some(0) }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn every_request_carries_client_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(header("authorization", "Bearer CFPAT-test"))
        .and(header("user-agent", format!("cma-client/{}", env!("CARGO_PKG_VERSION")).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let orgs = client(&server).get_organizations().await.unwrap();
    assert!(orgs.is_empty());
}
