//! Exercises the reqwest transports against a local mock server.

use catalog_client::{
    BlockingCatalogClient, CatalogClient, ClientError, Payload, RequestOptions,
};
use httpmock::prelude::*;
use serde_json::json;

const ENTITY: &str =
    r#"{"entity":{"guid":"g-123","typeName":"DataSet","attributes":{"name":"orders"}}}"#;

#[test]
fn blocking_get_by_guid_sends_token_and_query() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/atlas/v2/entity/guid/g-123")
            .query_param("minExtInfo", "true")
            .header("authorization", "Bearer secret")
            .header("accept", "application/json");
        then.status(200)
            .header("content-type", "application/json")
            .body(ENTITY);
    });

    let client = BlockingCatalogClient::new(server.base_url())
        .expect("valid url")
        .with_authorization_token("secret");
    let payload = client
        .get_by_guid("g-123", &RequestOptions::new().query("minExtInfo", "true"))
        .expect("success");

    mock.assert();
    assert_eq!(payload.as_bytes(), ENTITY.as_bytes());
    assert_eq!(payload.content_type(), "application/json");
}

#[test]
fn blocking_delete_by_guid_not_found() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/atlas/v2/entity/guid/missing");
        then.status(404)
            .header("content-type", "application/json")
            .body(r#"{"errorCode":"ATLAS-404-00-005"}"#);
    });

    let client = BlockingCatalogClient::new(server.base_url()).expect("valid url");
    let error = client
        .delete_by_guid("missing", &RequestOptions::new())
        .expect_err("404 fails");
    assert!(matches!(
        &error,
        ClientError::RemoteOperationFailed { status: 404, body, .. }
            if body.contains("ATLAS-404-00-005")
    ));

    let envelope = client
        .delete_by_guid_with_response("missing", &RequestOptions::new())
        .expect("404 is data");
    assert_eq!(envelope.status(), 404);
    assert!(!envelope.is_success());

    mock.assert_hits(2);
}

#[tokio::test]
async fn async_add_classifications_posts_body_as_is() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/atlas/v2/entity/guid/g-1/classifications")
                .header("content-type", "application/json")
                .json_body(json!([{"typeName": "PII"}]));
            then.status(204);
        })
        .await;

    let client = CatalogClient::new(server.base_url()).expect("valid url");
    let body = Payload::from(r#"[{"typeName":"PII"}]"#);
    let payload = client
        .add_classifications("g-1", body, &RequestOptions::new())
        .await
        .expect("no content");

    mock.assert_async().await;
    assert!(payload.is_empty());
}

#[tokio::test]
async fn async_list_by_guids_repeats_the_guid_key() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/atlas/v2/entity/bulk")
                .query_param("guid", "a")
                .query_param("guid", "b");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"entities":[]}"#);
        })
        .await;

    let client = CatalogClient::new(server.base_url()).expect("valid url");
    let envelope = client
        .list_by_guids_with_response(&RequestOptions::new().guids(["a", "b"]))
        .await
        .expect("success");

    mock.assert_async().await;
    assert_eq!(envelope.status(), 200);
    assert_eq!(
        envelope.body().map(Payload::as_bytes),
        Some(&br#"{"entities":[]}"#[..])
    );
}

#[tokio::test]
async fn async_unique_attribute_lookup_encodes_prefixed_keys() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/atlas/v2/entity/uniqueAttribute/type/hive_table")
                .query_param("attr:qualifiedName", "db.orders@prod");
            then.status(200).body(ENTITY);
        })
        .await;

    let client = CatalogClient::new(server.base_url()).expect("valid url");
    let options = RequestOptions::new()
        .unique_attribute("qualifiedName", "db.orders@prod")
        .query("unrelated", "dropped");
    let payload = client
        .get_by_unique_attributes("hive_table", &options)
        .await
        .expect("success");

    mock.assert_async().await;
    assert_eq!(payload.as_bytes(), ENTITY.as_bytes());
}

#[tokio::test]
async fn async_server_error_keeps_status_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/atlas/v2/entity/guid/g-9/header");
            then.status(503).body("maintenance");
        })
        .await;

    let client = CatalogClient::new(server.base_url()).expect("valid url");
    match client.get_header("g-9", &RequestOptions::new()).await {
        Err(ClientError::RemoteOperationFailed { status, body, .. }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn async_unreachable_service_is_a_transport_error() {
    let client = CatalogClient::new("http://127.0.0.1:9").expect("valid url");
    let error = client
        .get_header("g-1", &RequestOptions::new())
        .await
        .expect_err("nothing listens");
    assert!(error.is_transport());
}
