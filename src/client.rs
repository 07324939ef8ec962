use std::sync::Arc;

use crate::invocation::Invocation;
use crate::operation::{OPERATIONS, OperationDefinition};
use crate::request::prepare;
use crate::response::{unwrap_envelope, unwrap_payload};
use crate::surface::catalog_operations;
use crate::transport::{ReqwestTransport, Transport};
use crate::{ClientError, Payload, RequestOptions, ResponseEnvelope};

macro_rules! async_operation_methods {
    ($(
        $(#[doc = $doc:literal])*
        $name:ident, $with_response:ident => $operation_id:literal
            ($($param:ident : $wire:literal),* $(; $body:ident)?);
    )*) => {
        $(
            $(#[doc = $doc])*
            #[doc = ""]
            #[doc = concat!("Operation `", $operation_id, "`. Fails on any non-2xx status.")]
            pub fn $name(
                &self,
                $($param: &str,)*
                $($body: Payload,)?
                options: &RequestOptions,
            ) -> Invocation<Payload> {
                self.call(
                    $operation_id,
                    &[$(($wire, $param)),*],
                    $crate::surface::optional_body!($($body)?),
                    options,
                )
            }

            #[doc = concat!(
                "Like [`Self::", stringify!($name), "`], but hands non-2xx statuses back ",
                "as a [`ResponseEnvelope`] instead of failing."
            )]
            pub fn $with_response(
                &self,
                $($param: &str,)*
                $($body: Payload,)?
                options: &RequestOptions,
            ) -> Invocation<ResponseEnvelope> {
                self.call_with_response(
                    $operation_id,
                    &[$(($wire, $param)),*],
                    $crate::surface::optional_body!($($body)?),
                    options,
                )
            }
        )*
    };
}

/// Async catalog client.
///
/// Every method returns an [`Invocation`] immediately; await it for the
/// result. Calls must be made from within a tokio runtime.
///
/// See also [`crate::BlockingCatalogClient`] for the blocking variant.
#[derive(Debug)]
pub struct CatalogClient<T = ReqwestTransport> {
    transport: Arc<T>,
}

impl<T> Clone for CatalogClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl CatalogClient<ReqwestTransport> {
    /// Creates a client for the catalog service at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        Ok(Self::with_transport(ReqwestTransport::new(base_url)?))
    }

    /// Returns a new client with an access token attached to all requests.
    #[must_use]
    pub fn with_authorization_token(self, token: impl Into<String>) -> Self {
        let transport = Arc::unwrap_or_clone(self.transport);
        Self::with_transport(transport.with_authorization_token(token))
    }
}

impl<T: Transport> CatalogClient<T> {
    /// Creates a client over any [`Transport`].
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns all operations this client can call.
    pub fn operations() -> &'static [OperationDefinition] {
        OPERATIONS
    }

    /// Calls an operation by id and resolves to its payload.
    ///
    /// `path_params` replaces `{param}` segments in the operation path
    /// template. Lookup and request-building failures resolve the returned
    /// handle immediately without touching the transport.
    pub fn call(
        &self,
        operation_id: &str,
        path_params: &[(&str, &str)],
        body: Option<Payload>,
        options: &RequestOptions,
    ) -> Invocation<Payload> {
        match prepare(operation_id, path_params, body, options) {
            Ok((operation, request)) => {
                Invocation::spawn(Arc::clone(&self.transport), operation, request, unwrap_payload)
            }
            Err(error) => Invocation::failed(operation_id.to_owned(), error),
        }
    }

    /// Calls an operation by id and resolves to the full response envelope.
    ///
    /// Only transport failures and contract violations resolve to an error.
    pub fn call_with_response(
        &self,
        operation_id: &str,
        path_params: &[(&str, &str)],
        body: Option<Payload>,
        options: &RequestOptions,
    ) -> Invocation<ResponseEnvelope> {
        match prepare(operation_id, path_params, body, options) {
            Ok((operation, request)) => {
                Invocation::spawn(Arc::clone(&self.transport), operation, request, |op, raw| {
                    Ok(unwrap_envelope(op, raw))
                })
            }
            Err(error) => Invocation::failed(operation_id.to_owned(), error),
        }
    }

    catalog_operations!(async_operation_methods);
}
