//! The spot-termination decision.

use crate::config::{SpotTerminationConfig, SpotTerminationConfigBuilder};
use crate::events::SpotTerminationEvent;
use crate::layer::SpotTerminationLayer;
use spot_retry_core::{ProbeError, Result, RunAttempt};
use std::sync::Arc;
use std::time::Instant;

/// Fails early attempts of a CI job with a simulated spot termination.
///
/// [`check`](Self::check) is a pure function of the attempt number: it holds
/// no state between calls and never retries. Reading the environment only
/// happens in [`check_env`](Self::check_env) and
/// [`resolve_attempt`](Self::resolve_attempt).
///
/// # Example
///
/// ```
/// use spot_retry_chaos::SpotTermination;
/// use spot_retry_core::RunAttempt;
///
/// let probe = SpotTermination::default();
///
/// let err = probe.check(RunAttempt::FIRST).unwrap_err();
/// assert!(err.to_string().contains("attempt 1"));
///
/// assert!(probe.check(RunAttempt::new(2)).is_ok());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SpotTermination {
    config: Arc<SpotTerminationConfig>,
}

impl SpotTermination {
    /// Create a new builder for a probe.
    pub fn builder() -> SpotTerminationConfigBuilder {
        SpotTerminationConfigBuilder::new()
    }

    pub(crate) fn new(config: SpotTerminationConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The probe's configuration.
    pub fn config(&self) -> &SpotTerminationConfig {
        &self.config
    }

    /// Decide the outcome for `attempt`.
    ///
    /// Attempts below the configured threshold fail with
    /// [`ProbeError::SimulatedTransientFailure`].
    pub fn check(&self, attempt: RunAttempt) -> Result<()> {
        let attempt = attempt.get();
        let config = &self.config;

        if attempt < config.pass_from {
            self.notify(SpotTerminationEvent::TerminationSimulated {
                probe_name: config.name.clone(),
                timestamp: Instant::now(),
                attempt,
            });

            #[cfg(feature = "tracing")]
            tracing::warn!(
                probe = %config.name,
                attempt,
                pass_from = config.pass_from,
                "spot termination simulated"
            );

            #[cfg(feature = "metrics")]
            metrics::counter!("spot_termination.simulated", "probe" => config.name.clone())
                .increment(1);

            return Err(ProbeError::SimulatedTransientFailure { attempt });
        }

        self.notify(SpotTerminationEvent::PassedThrough {
            probe_name: config.name.clone(),
            timestamp: Instant::now(),
            attempt,
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(probe = %config.name, attempt, "spot probe passed");

        #[cfg(feature = "metrics")]
        metrics::counter!("spot_termination.passed_through", "probe" => config.name.clone())
            .increment(1);

        Ok(())
    }

    fn notify(&self, event: SpotTerminationEvent) {
        let panicked = self.config.listeners.notify(&event);

        if panicked > 0 {
            #[cfg(feature = "tracing")]
            tracing::error!(
                probe = %self.config.name,
                event = event.kind(),
                panicked,
                "spot probe listener panicked"
            );
        }
    }

    /// Read the attempt from the process environment.
    pub fn resolve_attempt(&self) -> Result<RunAttempt> {
        self.config.source.resolve_env()
    }

    /// Read the attempt from the process environment and check it.
    pub fn check_env(&self) -> Result<()> {
        let attempt = self.resolve_attempt()?;
        self.check(attempt)
    }

    /// Resolve the attempt through `lookup` and check it.
    pub fn check_with<F>(&self, lookup: F) -> Result<()>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let attempt = self.config.source.resolve(lookup)?;
        self.check(attempt)
    }

    /// A tower layer that gates services on `attempt`.
    pub fn layer(&self, attempt: RunAttempt) -> SpotTerminationLayer {
        SpotTerminationLayer::new(self.clone(), attempt)
    }

    /// A tower layer gated on the attempt found in the process environment.
    pub fn layer_from_env(&self) -> Result<SpotTerminationLayer> {
        let attempt = self.resolve_attempt()?;
        Ok(self.layer(attempt))
    }
}

/// Check the current `GITHUB_RUN_ATTEMPT` with the default probe.
///
/// Fails on the first attempt and passes on every re-run.
pub fn check_run_attempt() -> Result<()> {
    SpotTermination::default().check_env()
}
