//! Wire-level tests for the reqwest transports against a wiremock server.

use std::time::Duration;

use serde_json::json;
use surreal_http::{blocking, ClientConfig, Error, Fields, SurrealClient};
use wiremock::matchers::{basic_auth, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(format!("{}/sql", server.uri()))
        .with_credentials("admin", "admin")
        .with_namespace("test")
        .with_database("test")
}

fn ok_body() -> serde_json::Value {
    json!([{"status": "OK", "time": "42µs", "result": [{"id": "test:1", "name": "test"}]}])
}

#[tokio::test]
async fn select_posts_statement_with_context_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sql"))
        .and(header("content-type", "application/json"))
        .and(header("ns", "test"))
        .and(header("db", "test"))
        .and(basic_auth("admin", "admin"))
        .and(body_string("SELECT * FROM test;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = SurrealClient::new(config(&server)).unwrap();
    let rows = client.select("test").await.unwrap();
    assert_eq!(rows, vec![json!({"id": "test:1", "name": "test"})]);

    server.verify().await;
}

#[tokio::test]
async fn use_and_signin_reach_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("ns", "ns2"))
        .and(header("db", "db2"))
        .and(basic_auth("root", "root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = SurrealClient::new(config(&server)).unwrap();
    client.use_ns_db("ns2", "db2");
    client.signin("root", "root");
    client.query("INFO FOR DB;").await.unwrap();

    server.verify().await;
}

#[tokio::test]
async fn forbidden_maps_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": 403,
            "details": "Authentication failed",
        })))
        .mount(&server)
        .await;

    let client = SurrealClient::new(config(&server)).unwrap();
    let err = client.query("SELECT * FROM test;").await.unwrap_err();
    assert!(matches!(err, Error::Authentication(ref body) if body["code"] == 403));
}

#[tokio::test]
async fn bad_request_maps_to_query_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("There was a problem with the query"),
        )
        .mount(&server)
        .await;

    let client = SurrealClient::new(config(&server)).unwrap();
    let err = client.query("SELEC * FROM test;").await.unwrap_err();
    assert!(matches!(err, Error::Query(_)));
    assert_eq!(
        err.payload().unwrap(),
        &json!("There was a problem with the query")
    );
}

#[tokio::test]
async fn empty_create_never_hits_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
        .expect(0)
        .mount(&server)
        .await;

    let client = SurrealClient::new(config(&server)).unwrap();
    assert!(matches!(
        client.create("test", &Fields::new()).await,
        Err(Error::EmptyValues)
    ));

    server.verify().await;
}

#[tokio::test]
async fn unreachable_server_is_http_error() {
    let client = SurrealClient::new(ClientConfig::new("http://127.0.0.1:1/sql")).unwrap();
    let err = client.query("INFO FOR DB;").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn sub_second_timeout_still_gets_a_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_body())
                .set_delay(Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server)
        .with_timeout(Duration::from_millis(800))
        .unwrap();
    let client = SurrealClient::new(config).unwrap();
    let rows = client.select("test").await.unwrap();
    assert_eq!(rows.len(), 1);

    server.verify().await;
}

#[tokio::test]
async fn slow_reply_past_the_timeout_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = config(&server)
        .with_timeout(Duration::from_millis(200))
        .unwrap();
    let client = SurrealClient::new(config).unwrap();
    let err = client.select("test").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[test]
fn zero_timeout_from_serde_is_rejected_at_construction() {
    let config: ClientConfig = serde_json::from_str(r#"{"timeout_ms": 0}"#).unwrap();
    assert!(matches!(
        SurrealClient::new(config.clone()),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        blocking::SurrealClient::new(config),
        Err(Error::Config(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn blocking_client_speaks_the_same_protocol() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sql"))
        .and(header("ns", "test"))
        .and(header("db", "test"))
        .and(basic_auth("admin", "admin"))
        .and(body_string("DELETE test WHERE age > 40;"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"status": "OK", "result": []}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server);
    let rows = tokio::task::spawn_blocking(move || {
        let client = blocking::SurrealClient::new(config)?;
        client.delete("test", Some("age > 40"))
    })
    .await
    .unwrap()
    .unwrap();

    assert!(rows.is_empty());
    server.verify().await;
}
