#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use catalog_client::{
    BlockingTransport, BodyRule, ClientError, HttpRequest, MatchKind, OperationDefinition,
    Payload, RawResponse, RequestOptions, Transport, async_trait,
};
use tokio::sync::Notify;

/// Stub transport that records every request and replies with a canned
/// response.
pub struct Recording {
    response: RawResponse,
    seen: Mutex<Vec<HttpRequest>>,
}

impl Recording {
    pub fn replying(status: u16, body: &'static str) -> Self {
        Self {
            response: RawResponse::new(status, body.as_bytes())
                .with_header("content-type", "application/json"),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().expect("lock").clone()
    }

    fn record(&self, request: &HttpRequest) -> RawResponse {
        self.seen.lock().expect("lock").push(request.clone());
        self.response.clone()
    }
}

impl BlockingTransport for Recording {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, ClientError> {
        Ok(self.record(request))
    }
}

#[async_trait]
impl Transport for Recording {
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, ClientError> {
        Ok(self.record(request))
    }
}

/// Stub transport whose `send` parks until released, counting aborts and
/// completed sends.
#[derive(Default)]
pub struct Gated {
    pub started: Notify,
    pub release: Notify,
    pub aborted: Notify,
    pub aborts: AtomicUsize,
    pub completions: AtomicUsize,
}

impl Gated {
    pub fn aborts(&self) -> usize {
        self.aborts.load(Ordering::SeqCst)
    }

    pub fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for Gated {
    async fn send(&self, _request: &HttpRequest) -> Result<RawResponse, ClientError> {
        self.started.notify_one();
        self.release.notified().await;
        self.completions.fetch_add(1, Ordering::SeqCst);
        Ok(RawResponse::new(204, &b""[..]))
    }

    fn abort(&self, _request: &HttpRequest) {
        self.aborts.fetch_add(1, Ordering::SeqCst);
        self.aborted.notify_one();
    }
}

/// Stub transport that always fails as if the connection was refused.
pub struct Unreachable;

impl BlockingTransport for Unreachable {
    fn send(&self, _request: &HttpRequest) -> Result<RawResponse, ClientError> {
        Err(ClientError::TransportMessage("connection refused".to_owned()))
    }
}

#[async_trait]
impl Transport for Unreachable {
    async fn send(&self, _request: &HttpRequest) -> Result<RawResponse, ClientError> {
        Err(ClientError::TransportMessage("connection refused".to_owned()))
    }
}

/// Valid arguments for `operation`: every path parameter, every query
/// parameter it declares, a body when it needs one, and an extra header.
pub fn sample_inputs(
    operation: &OperationDefinition,
) -> (Vec<(&'static str, &'static str)>, Option<Payload>, RequestOptions) {
    let path_params = operation
        .path_params
        .iter()
        .map(|name| match *name {
            "guid" => ("guid", "g-123"),
            "typeName" => ("typeName", "DataSet"),
            "classificationName" => ("classificationName", "PII"),
            other => panic!("no sample value for path parameter {other}"),
        })
        .collect();

    let mut options = RequestOptions::new().header("x-correlation-id", "c-1");
    for param in operation.query_params {
        options = match param.match_kind {
            MatchKind::Exact => options.query(param.name, "v"),
            MatchKind::Prefix if param.name == "attr_" => {
                options.indexed_unique_attribute(0, "qualifiedName", "db.t")
            }
            MatchKind::Prefix => options.unique_attribute("qualifiedName", "db.t"),
        };
    }

    let body = (operation.body == BodyRule::Required)
        .then(|| Payload::from(r#"{"entity":{"typeName":"DataSet"}}"#));

    (path_params, body, options)
}
