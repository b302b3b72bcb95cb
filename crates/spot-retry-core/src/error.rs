//! Error types raised by spot-termination probes.
//!
//! [`ProbeError`] has two variants:
//!
//! - [`ProbeError::SimulatedTransientFailure`] is raised on purpose to stand in
//!   for an infrastructure fault, such as a spot instance being reclaimed in
//!   the middle of a CI job. Nothing in this workspace recovers from it. It
//!   propagates to the test harness, which marks the job as failed, and the
//!   CI orchestrator decides whether to re-run the job.
//! - [`ProbeError::MalformedAttempt`] only appears when an
//!   [`AttemptSource`](crate::AttemptSource) is configured to reject
//!   unparseable attempt counters instead of defaulting them to the first
//!   attempt.
//!
//! # Example
//!
//! ```
//! use spot_retry_core::ProbeError;
//!
//! let err = ProbeError::SimulatedTransientFailure { attempt: 1 };
//! assert!(err.is_simulated_failure());
//! assert_eq!(err.attempt(), Some(1));
//! assert!(err.to_string().contains("attempt 1"));
//! ```
//!
//! `Debug` prints the same text as `Display`. A test returning
//! `Result<(), ProbeError>` is reported by the harness through `Debug`, so the
//! CI log shows the human-readable message.

use std::fmt;

/// Errors produced while resolving a run attempt or evaluating a probe.
#[derive(Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// A spot termination was simulated because the job is on an early attempt.
    #[error("Simulated spot termination (attempt {attempt}). This should succeed on retry.")]
    SimulatedTransientFailure {
        /// Attempt number the job was running as.
        attempt: i64,
    },
    /// The attempt counter was set but could not be parsed as an integer.
    #[error("malformed run attempt in {var}: {value:?} is not an integer")]
    MalformedAttempt {
        /// Environment variable the value was read from.
        var: String,
        /// Raw value as found in the environment.
        value: String,
    },
}

impl ProbeError {
    /// Returns true if this is a deliberately simulated transient failure.
    pub fn is_simulated_failure(&self) -> bool {
        matches!(self, ProbeError::SimulatedTransientFailure { .. })
    }

    /// Returns true if the attempt counter could not be parsed.
    pub fn is_malformed_attempt(&self) -> bool {
        matches!(self, ProbeError::MalformedAttempt { .. })
    }

    /// The attempt number carried by a simulated failure.
    pub fn attempt(&self) -> Option<i64> {
        match self {
            ProbeError::SimulatedTransientFailure { attempt } => Some(*attempt),
            ProbeError::MalformedAttempt { .. } => None,
        }
    }
}

impl fmt::Debug for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Result type for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
