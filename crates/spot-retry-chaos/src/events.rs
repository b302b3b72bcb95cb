//! Event types for spot-termination probes.

use std::time::Instant;

/// Decision reported by a spot-termination probe, one per check.
#[derive(Debug, Clone)]
pub enum SpotTerminationEvent {
    /// A spot termination was simulated for an early attempt.
    TerminationSimulated {
        /// Name of the probe instance
        probe_name: String,
        /// When the decision was made
        timestamp: Instant,
        /// Attempt the job was running as
        attempt: i64,
    },
    /// The attempt was late enough and the call passed through.
    PassedThrough {
        /// Name of the probe instance
        probe_name: String,
        /// When the decision was made
        timestamp: Instant,
        /// Attempt the job was running as
        attempt: i64,
    },
}

impl SpotTerminationEvent {
    /// Stable identifier, matching the metric name for the same decision.
    pub fn kind(&self) -> &'static str {
        match self {
            SpotTerminationEvent::TerminationSimulated { .. } => "spot_termination.simulated",
            SpotTerminationEvent::PassedThrough { .. } => "spot_termination.passed_through",
        }
    }

    /// True if the probe failed the attempt.
    pub fn is_simulated(&self) -> bool {
        matches!(self, SpotTerminationEvent::TerminationSimulated { .. })
    }

    /// Attempt number the decision was made for.
    pub fn attempt(&self) -> i64 {
        match self {
            SpotTerminationEvent::TerminationSimulated { attempt, .. }
            | SpotTerminationEvent::PassedThrough { attempt, .. } => *attempt,
        }
    }

    /// Name of the probe that made the decision.
    pub fn probe_name(&self) -> &str {
        match self {
            SpotTerminationEvent::TerminationSimulated { probe_name, .. }
            | SpotTerminationEvent::PassedThrough { probe_name, .. } => probe_name,
        }
    }

    /// When the decision was made.
    pub fn timestamp(&self) -> Instant {
        match self {
            SpotTerminationEvent::TerminationSimulated { timestamp, .. }
            | SpotTerminationEvent::PassedThrough { timestamp, .. } => *timestamp,
        }
    }
}
