//! Configuration for spot-termination probes.

use crate::events::SpotTerminationEvent;
use crate::probe::SpotTermination;
use spot_retry_core::{AttemptSource, Listeners, MalformedAttempt};

/// Attempt number from which probes stop failing.
pub const DEFAULT_PASS_FROM: i64 = 2;

/// Configuration for a spot-termination probe.
#[derive(Clone, Debug)]
pub struct SpotTerminationConfig {
    /// Name of this probe instance for observability
    pub(crate) name: String,
    /// First attempt that is allowed to pass
    pub(crate) pass_from: i64,
    /// Where the attempt counter comes from
    pub(crate) source: AttemptSource,
    /// Callbacks notified of each decision
    pub(crate) listeners: Listeners<SpotTerminationEvent>,
}

impl SpotTerminationConfig {
    /// Create a new builder for probe configuration.
    pub fn builder() -> SpotTerminationConfigBuilder {
        SpotTerminationConfigBuilder::new()
    }

    /// Name of the probe.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First attempt that passes.
    pub fn pass_from(&self) -> i64 {
        self.pass_from
    }

    /// Attempt source used by environment-reading operations.
    pub fn source(&self) -> &AttemptSource {
        &self.source
    }
}

impl Default for SpotTerminationConfig {
    fn default() -> Self {
        Self {
            name: "<unnamed>".to_string(),
            pass_from: DEFAULT_PASS_FROM,
            source: AttemptSource::new(),
            listeners: Listeners::new(),
        }
    }
}

/// Builder for spot-termination probes.
pub struct SpotTerminationConfigBuilder {
    config: SpotTerminationConfig,
}

impl SpotTerminationConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: SpotTerminationConfig::default(),
        }
    }

    /// Set the name of this probe instance.
    ///
    /// # Example
    /// ```
    /// use spot_retry_chaos::SpotTermination;
    ///
    /// let probe = SpotTermination::builder()
    ///     .name("e2e-spot")
    ///     .build();
    /// assert_eq!(probe.config().name(), "e2e-spot");
    /// ```
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the first attempt that passes. Defaults to `2`.
    ///
    /// Raising it simulates jobs that need several re-runs.
    ///
    /// # Example
    /// ```
    /// use spot_retry_chaos::SpotTermination;
    /// use spot_retry_core::RunAttempt;
    ///
    /// let probe = SpotTermination::builder().pass_from(3).build();
    /// assert!(probe.check(RunAttempt::new(2)).is_err());
    /// assert!(probe.check(RunAttempt::new(3)).is_ok());
    /// ```
    pub fn pass_from(mut self, attempt: i64) -> Self {
        self.config.pass_from = attempt;
        self
    }

    /// Replace the attempt source.
    pub fn source(mut self, source: AttemptSource) -> Self {
        self.config.source = source;
        self
    }

    /// Read the attempt counter from another environment variable.
    pub fn attempt_var(mut self, var: impl Into<String>) -> Self {
        self.config.source = self.config.source.var(var);
        self
    }

    /// Set what happens when the counter is not an integer.
    ///
    /// # Example
    /// ```
    /// use spot_retry_chaos::SpotTermination;
    /// use spot_retry_core::MalformedAttempt;
    ///
    /// let probe = SpotTermination::builder()
    ///     .on_malformed(MalformedAttempt::Reject)
    ///     .build();
    /// let err = probe.check_with(|_| Some("abc".to_string())).unwrap_err();
    /// assert!(err.is_malformed_attempt());
    /// ```
    pub fn on_malformed(mut self, policy: MalformedAttempt) -> Self {
        self.config.source = self.config.source.on_malformed(policy);
        self
    }

    /// Add a listener for simulated terminations.
    ///
    /// # Example
    /// ```
    /// use spot_retry_chaos::SpotTermination;
    ///
    /// let probe = SpotTermination::builder()
    ///     .on_termination_simulated(|attempt| {
    ///         println!("spot reclaimed on attempt {}", attempt);
    ///     })
    ///     .build();
    /// ```
    pub fn on_termination_simulated<F>(mut self, f: F) -> Self
    where
        F: Fn(i64) + Send + Sync + 'static,
    {
        self.config.listeners.subscribe(move |event| {
            if let SpotTerminationEvent::TerminationSimulated { attempt, .. } = event {
                f(*attempt);
            }
        });
        self
    }

    /// Add a listener for attempts that pass through.
    pub fn on_passed_through<F>(mut self, f: F) -> Self
    where
        F: Fn(i64) + Send + Sync + 'static,
    {
        self.config.listeners.subscribe(move |event| {
            if let SpotTerminationEvent::PassedThrough { attempt, .. } = event {
                f(*attempt);
            }
        });
        self
    }

    /// Add a listener for every probe event.
    pub fn on_event<F>(mut self, f: F) -> Self
    where
        F: Fn(&SpotTerminationEvent) + Send + Sync + 'static,
    {
        self.config.listeners.subscribe(f);
        self
    }

    /// Build the probe.
    pub fn build(self) -> SpotTermination {
        SpotTermination::new(self.config)
    }
}

impl Default for SpotTerminationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
