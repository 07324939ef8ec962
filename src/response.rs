use bytes::Bytes;
use tracing::{debug, warn};

use crate::operation::{OperationDefinition, ResponseRule};
use crate::payload::JSON_CONTENT_TYPE;
use crate::{ClientError, Payload};

/// A completed HTTP exchange as returned by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Status, headers and optional body of a completed call.
///
/// Returned by the `*_with_response` methods, which hand non-2xx statuses
/// back as data instead of failing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseEnvelope {
    status: u16,
    headers: Vec<(String, String)>,
    body: Option<Payload>,
}

impl ResponseEnvelope {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Response body; `None` when the service sent no content.
    pub fn body(&self) -> Option<&Payload> {
        self.body.as_ref()
    }

    /// Consumes the envelope, returning the body or an empty payload.
    pub fn into_payload(self) -> Payload {
        self.body.unwrap_or_default()
    }
}

/// Maps a transport response into an envelope. Never fails.
pub fn unwrap_envelope(operation: &OperationDefinition, raw: RawResponse) -> ResponseEnvelope {
    if !is_success(raw.status) {
        warn!(
            operation_id = operation.operation_id,
            status = raw.status,
            "catalog operation returned non-success status"
        );
    } else if operation.response == ResponseRule::Empty && !raw.body.is_empty() {
        debug!(
            operation_id = operation.operation_id,
            len = raw.body.len(),
            "body returned by an operation that normally answers without one"
        );
    }

    let body = if raw.body.is_empty() {
        None
    } else {
        let content_type = find_header(&raw.headers, "content-type")
            .unwrap_or(JSON_CONTENT_TYPE)
            .to_owned();
        Some(Payload::new(raw.body, content_type))
    };

    ResponseEnvelope {
        status: raw.status,
        headers: raw.headers,
        body,
    }
}

/// Maps a transport response into its payload, failing on non-2xx statuses.
///
/// The returned bytes are exactly the bytes the transport received.
pub fn unwrap_payload(
    operation: &OperationDefinition,
    raw: RawResponse,
) -> Result<Payload, ClientError> {
    let envelope = unwrap_envelope(operation, raw);
    if envelope.is_success() {
        return Ok(envelope.into_payload());
    }

    Err(ClientError::RemoteOperationFailed {
        operation_id: operation.operation_id.to_owned(),
        status: envelope.status,
        body: envelope
            .body
            .map(|payload| String::from_utf8_lossy(payload.as_bytes()).into_owned())
            .unwrap_or_default(),
    })
}

fn is_success(status: u16) -> bool {
    (200..=299).contains(&status)
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
