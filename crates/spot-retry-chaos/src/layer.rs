//! Tower layer for spot-termination probes.

use crate::probe::SpotTermination;
use crate::service::SpotTerminationService;
use spot_retry_core::RunAttempt;
use tower_layer::Layer;

/// A Tower layer that fails every call with a simulated spot termination
/// while the job is on an early attempt.
///
/// The attempt is fixed when the layer is created. The layer never retries.
///
/// # Example
///
/// ```rust
/// use spot_retry_chaos::SpotTermination;
/// use spot_retry_core::{ProbeError, RunAttempt};
/// use tower::ServiceBuilder;
///
/// # async fn example() {
/// let layer = SpotTermination::builder()
///     .name("upload")
///     .build()
///     .layer(RunAttempt::new(2));
///
/// let service = ServiceBuilder::new()
///     .layer(layer)
///     .service_fn(|req: String| async move { Ok::<_, ProbeError>(req) });
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct SpotTerminationLayer {
    probe: SpotTermination,
    attempt: RunAttempt,
}

impl SpotTerminationLayer {
    /// Create a layer gating services on `attempt`.
    pub fn new(probe: SpotTermination, attempt: RunAttempt) -> Self {
        Self { probe, attempt }
    }

    /// The attempt this layer was built for.
    pub fn attempt(&self) -> RunAttempt {
        self.attempt
    }
}

impl<S> Layer<S> for SpotTerminationLayer {
    type Service = SpotTerminationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SpotTerminationService::new(inner, self.probe.clone(), self.attempt)
    }
}
