//! HTTP transports the clients delegate to.
//!
//! [`Transport`] and [`BlockingTransport`] are the seams between the catalog
//! clients and the network. The reqwest-backed implementations share
//! [`Endpoint`] for URL and header construction, so both put identical
//! requests on the wire.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::{ClientError, HttpRequest, RawResponse};

/// Non-blocking transport.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Sends one request. Called at most once per invocation.
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, ClientError>;

    /// Cancellation hook, invoked exactly once when an in-flight invocation is
    /// cancelled. The pending `send` future is dropped right after.
    fn abort(&self, _request: &HttpRequest) {}
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, ClientError> {
        (**self).send(request).await
    }

    fn abort(&self, request: &HttpRequest) {
        (**self).abort(request);
    }
}

/// Blocking transport; the calling thread waits for the response.
pub trait BlockingTransport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, ClientError>;
}

/// Base URL and credentials shared by the reqwest transports.
#[derive(Clone)]
pub struct Endpoint {
    base_url: Url,
    authorization_token: Option<String>,
}

impl Endpoint {
    /// Parses the base URL, normalizing it to include a trailing slash so
    /// relative operation paths join correctly.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url.as_ref())
            .map_err(|_| ClientError::InvalidBaseUrl(base_url.as_ref().to_owned()))?;

        Ok(Self {
            base_url: ensure_trailing_slash(parsed),
            authorization_token: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for `request`, including its query string.
    pub fn url_for(&self, request: &HttpRequest) -> Result<Url, ClientError> {
        let relative = request.path.trim_start_matches('/');
        let mut url = self
            .base_url
            .join(relative)
            .map_err(|_| ClientError::InvalidPath(request.path.clone()))?;

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }

    /// Header map for `request`, with the bearer token attached when set.
    pub fn headers_for(&self, request: &HttpRequest) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::with_capacity(request.headers.len() + 1);
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ClientError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| ClientError::InvalidHeader(name.to_string()))?;
            headers.append(name, value);
        }

        if let Some(token) = &self.authorization_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ClientError::InvalidHeader(AUTHORIZATION.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_url", &self.base_url.as_str())
            .field(
                "authorization_token",
                &self.authorization_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Async transport backed by [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    endpoint: Endpoint,
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given base URL and a default HTTP client.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: Endpoint::new(base_url)?,
            http: reqwest::Client::new(),
        })
    }

    /// Returns a new transport with an access token attached to all requests.
    ///
    /// This sets `Authorization: Bearer <token>`.
    #[must_use]
    pub fn with_authorization_token(mut self, token: impl Into<String>) -> Self {
        self.endpoint.authorization_token = Some(token.into());
        self
    }

    /// Replaces the HTTP client, e.g. one built with timeouts or a proxy.
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, ClientError> {
        let url = self.endpoint.url_for(request)?;
        debug!(
            operation_id = request.operation_id,
            method = %request.method,
            %url,
            "sending request"
        );

        let mut builder = self
            .http
            .request(request.method.to_reqwest(), url)
            .headers(self.endpoint.headers_for(request)?);
        if let Some(payload) = &request.body {
            builder = builder.body(payload.bytes().clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.bytes().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    fn abort(&self, request: &HttpRequest) {
        debug!(operation_id = request.operation_id, "abandoning in-flight request");
    }
}

/// Blocking transport backed by [`reqwest::blocking::Client`].
///
/// This is the synchronous counterpart of [`ReqwestTransport`]. It must not
/// be used from inside an async runtime.
#[derive(Debug)]
pub struct BlockingReqwestTransport {
    endpoint: Endpoint,
    http: reqwest::blocking::Client,
}

impl BlockingReqwestTransport {
    /// Creates a transport with the given base URL and a default HTTP client.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: Endpoint::new(base_url)?,
            http: reqwest::blocking::Client::new(),
        })
    }

    /// Returns a new transport with an access token attached to all requests.
    ///
    /// This sets `Authorization: Bearer <token>`.
    #[must_use]
    pub fn with_authorization_token(mut self, token: impl Into<String>) -> Self {
        self.endpoint.authorization_token = Some(token.into());
        self
    }

    /// Replaces the HTTP client, e.g. one built with timeouts or a proxy.
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::blocking::Client) -> Self {
        self.http = http;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

impl BlockingTransport for BlockingReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, ClientError> {
        let url = self.endpoint.url_for(request)?;
        debug!(
            operation_id = request.operation_id,
            method = %request.method,
            %url,
            "sending request"
        );

        let mut builder = self
            .http
            .request(request.method.to_reqwest(), url)
            .headers(self.endpoint.headers_for(request)?);
        if let Some(payload) = &request.body {
            builder = builder.body(payload.as_bytes().to_vec());
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.bytes()?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

fn collect_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let mut path = url.path().to_owned();
        path.push('/');
        url.set_path(&path);
    }
    url
}
