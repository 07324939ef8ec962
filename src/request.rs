use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

use crate::operation::{BodyRule, HttpMethod, OperationDefinition, lookup};
use crate::{ClientError, Payload};

/// Caller-supplied extra headers and query parameters.
///
/// This is an escape hatch and is not validated. Query pairs are only sent
/// when the operation declares a matching parameter; headers are always sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header. Repeated names are sent repeatedly.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds a query parameter. Repeated keys (e.g. `guid`) are sent in order.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds one `guid` query parameter per value, for the bulk operations.
    #[must_use]
    pub fn guids<I, S>(self, guids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        guids
            .into_iter()
            .fold(self, |options, guid| options.query("guid", guid))
    }

    /// Selects an entity by unique attribute, sent as `attr:<name>=<value>`.
    #[must_use]
    pub fn unique_attribute(self, name: &str, value: impl Into<String>) -> Self {
        self.query(format!("attr:{name}"), value)
    }

    /// Selects the `index`-th entity of a bulk unique-attribute lookup, sent as
    /// `attr_<index>:<name>=<value>`.
    #[must_use]
    pub fn indexed_unique_attribute(
        self,
        index: usize,
        name: &str,
        value: impl Into<String>,
    ) -> Self {
        self.query(format!("attr_{index}:{name}"), value)
    }
}

/// A transport-ready request described as plain data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub operation_id: &'static str,
    pub method: HttpMethod,
    /// Rendered path relative to the service base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Payload>,
}

/// Builds a request for `operation` from path parameters, body and options.
///
/// `path_params` replaces `{param}` segments in the operation path template.
/// The transformation is pure; both the blocking and async clients call it so
/// they always put the same request on the wire.
pub fn build_request(
    operation: &'static OperationDefinition,
    path_params: &[(&str, &str)],
    body: Option<Payload>,
    options: &RequestOptions,
) -> Result<HttpRequest, ClientError> {
    let path = render_path(operation, path_params)?;
    let query = select_query(operation, options)?;

    match (operation.body, &body) {
        (BodyRule::Forbidden, Some(_)) => {
            return Err(ClientError::UnexpectedBody(operation.operation_id.to_owned()));
        }
        (BodyRule::Required, None) => {
            return Err(ClientError::MissingBody(operation.operation_id.to_owned()));
        }
        _ => {}
    }

    let mut headers = Vec::with_capacity(options.headers.len() + 2);
    if !options
        .headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("accept"))
    {
        headers.push(("accept".to_owned(), "application/json".to_owned()));
    }
    if let Some(payload) = &body {
        headers.push(("content-type".to_owned(), payload.content_type().to_owned()));
    }
    headers.extend(options.headers.iter().cloned());

    debug!(
        operation_id = operation.operation_id,
        method = %operation.method,
        %path,
        query_len = query.len(),
        has_body = body.is_some(),
        "built catalog request"
    );

    Ok(HttpRequest {
        operation_id: operation.operation_id,
        method: operation.method,
        path,
        query,
        headers,
        body,
    })
}

/// Looks up `operation_id` and builds its request.
///
/// This is the single request-building path shared by the blocking and async
/// clients.
pub(crate) fn prepare(
    operation_id: &str,
    path_params: &[(&str, &str)],
    body: Option<Payload>,
    options: &RequestOptions,
) -> Result<(&'static OperationDefinition, HttpRequest), ClientError> {
    let operation = lookup(operation_id)?;
    let request = build_request(operation, path_params, body, options)?;
    Ok((operation, request))
}

fn render_path(
    operation: &OperationDefinition,
    path_params: &[(&str, &str)],
) -> Result<String, ClientError> {
    let mut rendered = operation.path_template.to_owned();

    for required_param in operation.path_params {
        let value = path_params
            .iter()
            .find(|(name, _)| name == required_param)
            .map(|(_, value)| *value)
            .ok_or_else(|| ClientError::MissingPathParameter {
                operation_id: operation.operation_id.to_owned(),
                parameter: (*required_param).to_owned(),
            })?;

        // URL parsers resolve dot segments even when percent-encoded.
        if value.is_empty() || value == "." || value == ".." {
            return Err(ClientError::InvalidPathParameter {
                operation_id: operation.operation_id.to_owned(),
                parameter: (*required_param).to_owned(),
                value: value.to_owned(),
            });
        }

        let placeholder = format!("{{{required_param}}}");
        rendered = rendered.replace(&placeholder, &encode_path_segment(value));
    }

    Ok(rendered)
}

fn select_query(
    operation: &OperationDefinition,
    options: &RequestOptions,
) -> Result<Vec<(String, String)>, ClientError> {
    let mut selected = Vec::with_capacity(options.query.len());
    for (key, value) in &options.query {
        if operation.accepts_query(key) {
            selected.push((key.clone(), value.clone()));
        } else {
            debug!(
                operation_id = operation.operation_id,
                key = key.as_str(),
                "dropping query parameter not accepted by operation"
            );
        }
    }

    if let Some(missing) = operation
        .query_params
        .iter()
        .filter(|param| param.required)
        .find(|param| !selected.iter().any(|(key, _)| param.matches(key)))
    {
        return Err(ClientError::MissingQueryParameter {
            operation_id: operation.operation_id.to_owned(),
            parameter: missing.name.to_owned(),
        });
    }

    Ok(selected)
}

/// Everything but RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}
