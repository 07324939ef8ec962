use tracing::instrument;

use crate::operation::{OPERATIONS, OperationDefinition};
use crate::request::prepare;
use crate::response::{unwrap_envelope, unwrap_payload};
use crate::surface::catalog_operations;
use crate::transport::{BlockingReqwestTransport, BlockingTransport};
use crate::{ClientError, Payload, RequestOptions, ResponseEnvelope};

macro_rules! blocking_operation_methods {
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
            ) -> Result<Payload, ClientError> {
                self.call(
                    $operation_id,
                    &[$(($wire, $param)),*],
                    $crate::surface::optional_body!($($body)?),
                    options,
                )
            }

            #[doc = concat!(
                "Like [`Self::", stringify!($name), "`], but returns non-2xx statuses ",
                "as a [`ResponseEnvelope`] instead of failing."
            )]
            pub fn $with_response(
                &self,
                $($param: &str,)*
                $($body: Payload,)?
                options: &RequestOptions,
            ) -> Result<ResponseEnvelope, ClientError> {
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

/// Blocking catalog client.
///
/// This is the synchronous counterpart of [`crate::CatalogClient`]; it builds
/// and unwraps requests with the same code and only differs in waiting on the
/// calling thread.
#[derive(Debug)]
pub struct BlockingCatalogClient<T = BlockingReqwestTransport> {
    transport: T,
}

impl BlockingCatalogClient<BlockingReqwestTransport> {
    /// Creates a client for the catalog service at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        Ok(Self::with_transport(BlockingReqwestTransport::new(base_url)?))
    }

    /// Returns a new client with an access token attached to all requests.
    #[must_use]
    pub fn with_authorization_token(mut self, token: impl Into<String>) -> Self {
        self.transport = self.transport.with_authorization_token(token);
        self
    }
}

impl<T: BlockingTransport> BlockingCatalogClient<T> {
    /// Creates a client over any [`BlockingTransport`].
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns all operations this client can call.
    pub fn operations() -> &'static [OperationDefinition] {
        OPERATIONS
    }

    /// Calls an operation by id and returns its payload.
    ///
    /// `path_params` replaces `{param}` segments in the operation path
    /// template. Missing required parameters return
    /// [`ClientError::MissingPathParameter`].
    #[instrument(level = "debug", skip(self, path_params, body, options))]
    pub fn call(
        &self,
        operation_id: &str,
        path_params: &[(&str, &str)],
        body: Option<Payload>,
        options: &RequestOptions,
    ) -> Result<Payload, ClientError> {
        let (operation, request) = prepare(operation_id, path_params, body, options)?;
        let raw = self.transport.send(&request)?;
        unwrap_payload(operation, raw)
    }

    /// Calls an operation by id and returns the full response envelope.
    ///
    /// Only transport failures and contract violations return an error.
    #[instrument(level = "debug", skip(self, path_params, body, options))]
    pub fn call_with_response(
        &self,
        operation_id: &str,
        path_params: &[(&str, &str)],
        body: Option<Payload>,
        options: &RequestOptions,
    ) -> Result<ResponseEnvelope, ClientError> {
        let (operation, request) = prepare(operation_id, path_params, body, options)?;
        let raw = self.transport.send(&request)?;
        Ok(unwrap_envelope(operation, raw))
    }

    catalog_operations!(blocking_operation_methods);
}
