//! Deferred results for async catalog calls.

use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, debug_span};

use crate::operation::OperationDefinition;
use crate::transport::Transport;
use crate::{ClientError, HttpRequest, RawResponse};

/// Lifecycle of one invocation.
///
/// `Built → Sent → {Succeeded | FailedRemote | FailedTransport | Cancelled}`.
/// Only `Sent` can move to `Cancelled`, and only in async mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvocationState {
    Built,
    Sent,
    Succeeded,
    FailedRemote,
    FailedTransport,
    Cancelled,
}

impl InvocationState {
    /// Classifies a resolved invocation result.
    pub fn of<T>(result: &Result<T, ClientError>) -> Self {
        match result {
            Ok(_) => Self::Succeeded,
            Err(error) => error.state(),
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Built | Self::Sent)
    }
}

enum Inner<T> {
    /// Failed before reaching the transport.
    Ready(Option<Result<T, ClientError>>),
    Running(JoinHandle<Result<T, ClientError>>),
}

/// Handle to an in-flight async call.
///
/// Awaiting the handle yields the result exactly once. [`Invocation::cancel`]
/// (or dropping an unresolved handle) aborts the transport call; the handle
/// then resolves to [`ClientError::Cancelled`]. Resolution happens on a tokio
/// worker, not necessarily the caller's thread.
#[must_use = "an invocation is cancelled when dropped"]
pub struct Invocation<T> {
    operation_id: Cow<'static, str>,
    inner: Inner<T>,
    cancel: CancellationToken,
    resolved: bool,
}

impl<T: Send + 'static> Invocation<T> {
    /// Hands `request` to `transport` on a new task.
    ///
    /// `unwrap` turns the raw response into the caller-facing result; it runs
    /// only if the transport completes before cancellation.
    pub(crate) fn spawn<Tr, F>(
        transport: Arc<Tr>,
        operation: &'static OperationDefinition,
        request: HttpRequest,
        unwrap: F,
    ) -> Self
    where
        Tr: Transport,
        F: FnOnce(&OperationDefinition, RawResponse) -> Result<T, ClientError> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let cancelled = cancel.clone();

        let span = debug_span!("catalog_call", operation_id = operation.operation_id);
        let task = tokio::spawn(
            async move {
                tokio::select! {
                    biased;
                    () = cancelled.cancelled() => abandon(&*transport, &request),
                    result = transport.send(&request) => {
                        // A cancel that lands while `send` is finishing still wins.
                        if cancelled.is_cancelled() {
                            abandon(&*transport, &request)
                        } else {
                            result.and_then(|raw| unwrap(operation, raw))
                        }
                    }
                }
            }
            .instrument(span),
        );

        Self {
            operation_id: Cow::Borrowed(operation.operation_id),
            inner: Inner::Running(task),
            cancel,
            resolved: false,
        }
    }
}

fn abandon<T, Tr: Transport>(transport: &Tr, request: &HttpRequest) -> Result<T, ClientError> {
    transport.abort(request);
    debug!(operation_id = request.operation_id, "invocation cancelled");
    Err(ClientError::Cancelled)
}

impl<T> Invocation<T> {
    /// A handle that resolves immediately with `error`.
    pub(crate) fn failed(operation_id: impl Into<Cow<'static, str>>, error: ClientError) -> Self {
        Self {
            operation_id: operation_id.into(),
            inner: Inner::Ready(Some(Err(error))),
            cancel: CancellationToken::new(),
            resolved: false,
        }
    }

    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    /// Requests cancellation. Has no effect once the transport has completed.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token that cancels this invocation, for wiring into a caller's own
    /// shutdown handling.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Returns `true` once the result is available without waiting.
    pub fn is_finished(&self) -> bool {
        match &self.inner {
            Inner::Ready(_) => true,
            Inner::Running(task) => task.is_finished(),
        }
    }
}

impl<T> Future for Invocation<T> {
    type Output = Result<T, ClientError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        assert!(!this.resolved, "invocation polled after completion");

        let output = match &mut this.inner {
            Inner::Ready(result) => match result.take() {
                Some(result) => result,
                None => Err(ClientError::Cancelled),
            },
            Inner::Running(task) => match Pin::new(task).poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(result)) => result,
                Poll::Ready(Err(join_error)) if join_error.is_panic() => {
                    std::panic::resume_unwind(join_error.into_panic())
                }
                Poll::Ready(Err(_)) => Err(ClientError::Cancelled),
            },
        };

        this.resolved = true;
        Poll::Ready(output)
    }
}

// The result is only ever moved out, never pinned in place.
impl<T> Unpin for Invocation<T> {}

impl<T> Drop for Invocation<T> {
    fn drop(&mut self) {
        if !self.resolved {
            self.cancel.cancel();
        }
    }
}

impl<T> std::fmt::Debug for Invocation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("operation_id", &self.operation_id)
            .field("cancelled", &self.cancel.is_cancelled())
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}
