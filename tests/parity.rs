mod common;

use catalog_client::{
    BlockingCatalogClient, CatalogClient, ClientError, InvocationState, RequestOptions, operations,
};
use common::{Recording, Unreachable, sample_inputs};

#[tokio::test]
async fn blocking_and_async_build_identical_requests() {
    for op in operations() {
        let (path_params, body, options) = sample_inputs(op);

        let blocking = BlockingCatalogClient::with_transport(Recording::replying(200, "{}"));
        blocking
            .call(op.operation_id, &path_params, body.clone(), &options)
            .unwrap_or_else(|error| panic!("{}: {error}", op.operation_id));
        blocking
            .call_with_response(op.operation_id, &path_params, body.clone(), &options)
            .unwrap_or_else(|error| panic!("{}: {error}", op.operation_id));

        let nonblocking = CatalogClient::with_transport(Recording::replying(200, "{}"));
        nonblocking
            .call(op.operation_id, &path_params, body.clone(), &options)
            .await
            .unwrap_or_else(|error| panic!("{}: {error}", op.operation_id));
        nonblocking
            .call_with_response(op.operation_id, &path_params, body.clone(), &options)
            .await
            .unwrap_or_else(|error| panic!("{}: {error}", op.operation_id));

        let sent = blocking.transport().requests();
        assert_eq!(sent.len(), 2, "{}", op.operation_id);
        assert_eq!(sent[0], sent[1], "{}", op.operation_id);
        assert_eq!(sent, nonblocking.transport().requests(), "{}", op.operation_id);
        assert_eq!(sent[0].method, op.method);
        assert!(!sent[0].path.contains('{'), "{}", sent[0].path);
        assert_eq!(sent[0].body, body, "{}", op.operation_id);
    }
}

#[tokio::test]
async fn named_methods_match_generic_calls() {
    let options = RequestOptions::new().unique_attribute("qualifiedName", "db.t");
    let blocking = BlockingCatalogClient::with_transport(Recording::replying(204, ""));
    blocking
        .remove_classification_by_unique_attribute("hive_table", "PII", &options)
        .expect("no content");

    let nonblocking = CatalogClient::with_transport(Recording::replying(204, ""));
    nonblocking
        .call(
            "removeClassificationByUniqueAttribute",
            &[("typeName", "hive_table"), ("classificationName", "PII")],
            None,
            &options,
        )
        .await
        .expect("no content");

    let sent = blocking.transport().requests();
    assert_eq!(sent, nonblocking.transport().requests());
    assert_eq!(
        sent[0].path,
        "/atlas/v2/entity/uniqueAttribute/type/hive_table/classification/PII"
    );
    assert_eq!(
        sent[0].query,
        vec![("attr:qualifiedName".to_owned(), "db.t".to_owned())]
    );
}

#[tokio::test]
async fn non_success_fails_plain_and_returns_envelope_with_response() {
    for status in [400, 404, 409, 500, 503] {
        for op in operations() {
            let (path_params, body, options) = sample_inputs(op);

            let blocking = BlockingCatalogClient::with_transport(Recording::replying(
                status,
                r#"{"errorCode":"E"}"#,
            ));
            let error = blocking
                .call(op.operation_id, &path_params, body.clone(), &options)
                .expect_err("non-2xx must fail");
            assert_eq!(error.status(), Some(status), "{}", op.operation_id);
            assert!(error.is_remote());
            let envelope = blocking
                .call_with_response(op.operation_id, &path_params, body.clone(), &options)
                .expect("non-2xx is data");
            assert_eq!(envelope.status(), status);

            let nonblocking = CatalogClient::with_transport(Recording::replying(
                status,
                r#"{"errorCode":"E"}"#,
            ));
            let result = nonblocking
                .call(op.operation_id, &path_params, body.clone(), &options)
                .await;
            assert_eq!(InvocationState::of(&result), InvocationState::FailedRemote);
            let envelope = nonblocking
                .call_with_response(op.operation_id, &path_params, body, &options)
                .await
                .expect("non-2xx is data");
            assert_eq!(envelope.status(), status);
            assert!(!envelope.is_success());
        }
    }
}

#[test]
fn get_by_guid_returns_the_service_document() {
    let raw = r#"{"guid":"g-123","typeName":"DataSet"}"#;
    let client = BlockingCatalogClient::with_transport(Recording::replying(200, raw));

    let payload = client
        .get_by_guid("g-123", &RequestOptions::new())
        .expect("success");

    assert_eq!(payload.as_bytes(), raw.as_bytes());
    assert_eq!(
        payload.to_json::<serde_json::Value>().expect("json"),
        serde_json::json!({"guid": "g-123", "typeName": "DataSet"})
    );
}

#[tokio::test]
async fn delete_by_guid_not_found() {
    let client = CatalogClient::with_transport(Recording::replying(
        404,
        r#"{"errorCode":"ATLAS-404-00-005"}"#,
    ));

    match client.delete_by_guid("g-404", &RequestOptions::new()).await {
        Err(ClientError::RemoteOperationFailed {
            operation_id,
            status,
            body,
        }) => {
            assert_eq!(operation_id, "deleteByGuid");
            assert_eq!(status, 404);
            assert!(body.contains("ATLAS-404-00-005"));
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let envelope = client
        .delete_by_guid_with_response("g-404", &RequestOptions::new())
        .await
        .expect("404 is returned as data");
    assert_eq!(envelope.status(), 404);
    assert_eq!(envelope.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn transport_failures_fail_both_variants() {
    let blocking = BlockingCatalogClient::with_transport(Unreachable);
    assert!(blocking.get_header("g-1", &RequestOptions::new()).unwrap_err().is_transport());
    assert!(
        blocking
            .get_header_with_response("g-1", &RequestOptions::new())
            .unwrap_err()
            .is_transport()
    );

    let nonblocking = CatalogClient::with_transport(Unreachable);
    let result = nonblocking.get_header("g-1", &RequestOptions::new()).await;
    assert_eq!(InvocationState::of(&result), InvocationState::FailedTransport);
    let result = nonblocking
        .get_header_with_response("g-1", &RequestOptions::new())
        .await;
    assert_eq!(InvocationState::of(&result), InvocationState::FailedTransport);
}

#[tokio::test]
async fn missing_path_parameter_iff_placeholder_absent() {
    for op in operations().iter().filter(|op| !op.path_params.is_empty()) {
        let (path_params, body, options) = sample_inputs(op);
        for omitted in op.path_params {
            let partial: Vec<_> = path_params
                .iter()
                .copied()
                .filter(|(name, _)| name != omitted)
                .collect();
            let client = CatalogClient::with_transport(Recording::replying(200, "{}"));
            let result = client
                .call(op.operation_id, &partial, body.clone(), &options)
                .await;
            assert!(
                matches!(
                    &result,
                    Err(ClientError::MissingPathParameter { parameter, .. })
                        if parameter == *omitted
                ),
                "{}: {result:?}",
                op.operation_id
            );
            assert!(client.transport().requests().is_empty());
        }
    }
}
