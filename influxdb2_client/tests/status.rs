use influxdb2_client::{Client, ErrorKind, models::HealthStatus};
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::json;

#[test_log::test(tokio::test)]
async fn ready_and_health_work_without_a_token() {
    let mut mock_server = Server::new_async().await;
    let ready = mock_server
        .mock("GET", "/ready")
        .match_header("Authorization", Matcher::Missing)
        .with_body(r#"{"status":"ready","started":"2021-01-01T00:00:00Z","up":"1h"}"#)
        .create_async()
        .await;
    let health = mock_server
        .mock("GET", "/health")
        .match_header("Authorization", Matcher::Missing)
        .with_body(
            json!({"name": "influxdb", "message": "ready for queries and writes", "status": "pass", "checks": []})
                .to_string(),
        )
        .create_async()
        .await;

    let client = Client::new(mock_server.url(), "").unwrap();

    assert!(client.ready().await.unwrap());
    let check = client.health().await.unwrap();
    assert!(check.is_healthy());

    ready.assert_async().await;
    health.assert_async().await;
}

#[test_log::test(tokio::test)]
async fn unhealthy_server_is_not_an_error() {
    let mut mock_server = Server::new_async().await;
    let mock = mock_server
        .mock("GET", "/health")
        .with_status(503)
        .with_body(
            json!({
                "name": "influxdb",
                "message": "degraded",
                "status": "fail",
                "checks": [{"name": "storage", "status": "fail"}],
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = Client::new(mock_server.url(), "my-token").unwrap();
    let check = client.health().await.expect("unhealthy is a result");

    assert_eq!(check.status, HealthStatus::Fail);
    assert_eq!(check.message.as_deref(), Some("degraded"));
    assert_eq!(check.checks.len(), 1);
    mock.assert_async().await;
}

#[test_log::test(tokio::test)]
async fn health_error_envelope_is_an_api_error() {
    let mut mock_server = Server::new_async().await;
    let _mock = mock_server
        .mock("GET", "/health")
        .with_status(500)
        .with_body(r#"{"code":"internal error","message":"boom"}"#)
        .create_async()
        .await;

    let client = Client::new(mock_server.url(), "my-token").unwrap();
    let err = client.health().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[test_log::test(tokio::test)]
async fn unreachable_server_is_a_transport_error() {
    // nothing listens on the discard port
    let client = Client::new("http://127.0.0.1:9", "").unwrap();

    let err = client.ready().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    let err = client.health().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[test]
fn invalid_server_url_is_rejected() {
    let err = Client::new("not a url", "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
