//! Spot-termination service implementation.

use crate::probe::SpotTermination;
use futures::future::BoxFuture;
use spot_retry_core::{ProbeError, RunAttempt};
use std::task::{Context, Poll};
use tower_service::Service;

/// A Tower service that runs the spot-termination probe before each call.
///
/// A failing probe short-circuits the call. The inner service is never
/// invoked for that request.
#[derive(Clone, Debug)]
pub struct SpotTerminationService<S> {
    inner: S,
    probe: SpotTermination,
    attempt: RunAttempt,
}

impl<S> SpotTerminationService<S> {
    pub(crate) fn new(inner: S, probe: SpotTermination, attempt: RunAttempt) -> Self {
        Self {
            inner,
            probe,
            attempt,
        }
    }

    /// Get a reference to the inner service.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Consume the wrapper and return the inner service.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, Req> Service<Req> for SpotTerminationService<S>
where
    S: Service<Req>,
    S::Response: Send + 'static,
    S::Error: From<ProbeError> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Req) -> Self::Future {
        if let Err(err) = self.probe.check(self.attempt) {
            return Box::pin(futures::future::ready(Err(err.into())));
        }

        Box::pin(self.inner.call(req))
    }
}
