use thiserror::Error;

use crate::invocation::InvocationState;

/// Errors returned by catalog client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL is not a valid absolute URL.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Endpoint path could not be joined to the base URL.
    #[error("invalid endpoint path '{0}'")]
    InvalidPath(String),

    /// A header name or value from the request options is not valid HTTP.
    #[error("invalid header '{0}'")]
    InvalidHeader(String),

    /// The requested operation id is not present in the operation table.
    #[error("unknown catalog operation '{0}'")]
    UnknownOperation(String),

    /// A required path template parameter was not provided.
    #[error("missing required path parameter '{parameter}' for operation '{operation_id}'")]
    MissingPathParameter {
        operation_id: String,
        parameter: String,
    },

    /// A path parameter value cannot address a single path segment.
    #[error("path parameter '{parameter}' of '{operation_id}' cannot be '{value}'")]
    InvalidPathParameter {
        operation_id: String,
        parameter: String,
        value: String,
    },

    /// A required query parameter was not present in the request options.
    #[error("missing required query parameter '{parameter}' for operation '{operation_id}'")]
    MissingQueryParameter {
        operation_id: String,
        parameter: String,
    },

    /// A body was supplied for an operation that does not accept one.
    #[error("operation '{0}' does not accept a request body")]
    UnexpectedBody(String),

    /// No body was supplied for an operation that requires one.
    #[error("operation '{0}' requires a request body")]
    MissingBody(String),

    /// Non-success HTTP status with response payload.
    #[error("operation '{operation_id}' failed with status {status}: {body}")]
    RemoteOperationFailed {
        operation_id: String,
        status: u16,
        body: String,
    },

    /// HTTP transport-layer request failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest transport.
    #[error("request failed: {0}")]
    TransportMessage(String),

    /// A payload could not be serialized or deserialized as JSON.
    #[error("failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The invocation was cancelled before the transport completed.
    #[error("invocation was cancelled")]
    Cancelled,
}

impl ClientError {
    /// Returns `true` for connection, timeout and other transport faults.
    pub fn is_transport(&self) -> bool {
        self.state() == InvocationState::FailedTransport
    }

    /// Returns `true` when the remote service answered with a non-2xx status.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteOperationFailed { .. })
    }

    /// Returns `true` when the invocation was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// HTTP status reported by the remote service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteOperationFailed { status, .. } => Some(*status),
            Self::Transport(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Terminal invocation state this error resolves to.
    ///
    /// Contract violations (unknown operation, missing parameters, bodies)
    /// never reach the transport, so they report [`InvocationState::Built`].
    /// URL and header conversion happen inside the transport and count as
    /// transport failures.
    pub fn state(&self) -> InvocationState {
        match self {
            Self::RemoteOperationFailed { .. } => InvocationState::FailedRemote,
            Self::Transport(_)
            | Self::TransportMessage(_)
            | Self::InvalidPath(_)
            | Self::InvalidHeader(_) => InvocationState::FailedTransport,
            Self::Cancelled => InvocationState::Cancelled,
            _ => InvocationState::Built,
        }
    }
}
