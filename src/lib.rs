//! Blocking and async client library for an Atlas-style metadata catalog
//! entity API (entity CRUD, classifications, bulk lookup by GUID or unique
//! attribute).
//!
//! Public API layers:
//! - [`CatalogClient`]/[`BlockingCatalogClient`]: one method pair
//!   (`op` and `op_with_response`) per catalog operation, plus generic
//!   [`CatalogClient::call`] by operation id.
//! - [`Payload`]: opaque request/response bytes; payloads are never parsed by
//!   the client.
//! - [`Transport`]/[`BlockingTransport`]: the HTTP seam, with reqwest-backed
//!   implementations.
//! - [`ClientError`]: unified error type used by all clients.
//!
//! Operation metadata lives in a static table, see [`operations`].

mod blocking_client;
mod client;
mod error;
mod invocation;
mod operation;
mod payload;
mod request;
mod response;
mod surface;
mod transport;

/// Blocking catalog client.
pub use blocking_client::BlockingCatalogClient;
/// Async catalog client.
///
/// See also [`BlockingCatalogClient`] for the blocking variant.
pub use client::CatalogClient;
/// Error type returned by all client operations.
pub use error::ClientError;
pub use invocation::{Invocation, InvocationState};
pub use operation::{
    BodyRule, HttpMethod, MatchKind, OperationDefinition, QueryParam, ResponseRule, lookup,
    operations,
};
pub use payload::{JSON_CONTENT_TYPE, Payload};
pub use request::{HttpRequest, RequestOptions, build_request};
pub use response::{RawResponse, ResponseEnvelope, unwrap_envelope, unwrap_payload};
pub use transport::{
    BlockingReqwestTransport, BlockingTransport, Endpoint, ReqwestTransport, Transport,
};

/// Attribute macro for implementing [`Transport`] outside this crate.
pub use async_trait::async_trait;
