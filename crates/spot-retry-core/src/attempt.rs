//! Run-attempt resolution.
//!
//! The CI orchestrator exports the attempt number of the current job in an
//! environment variable (`GITHUB_RUN_ATTEMPT` on GitHub Actions). It starts at
//! `1` and goes up each time a failed job is re-run. This module only reads
//! that counter. Nothing here ever sets or persists it.
//!
//! Resolution goes through an injected lookup, so the decision logic can be
//! tested without touching the process environment:
//!
//! ```
//! use spot_retry_core::{AttemptSource, RunAttempt};
//!
//! let source = AttemptSource::new();
//! let attempt = source
//!     .resolve(|_var| Some("2".to_string()))
//!     .unwrap();
//! assert_eq!(attempt, RunAttempt::new(2));
//!
//! // Unset counters mean this is the first attempt
//! assert_eq!(source.resolve(|_| None).unwrap(), RunAttempt::FIRST);
//! ```

use crate::error::{ProbeError, Result};
use std::fmt;

/// Environment variable GitHub Actions uses for the run attempt.
pub const RUN_ATTEMPT_VAR: &str = "GITHUB_RUN_ATTEMPT";

/// Ordinal of the current job execution, as reported by the CI orchestrator.
///
/// Values are kept exactly as parsed, including zero and negatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunAttempt(i64);

impl RunAttempt {
    /// The first execution of a job.
    pub const FIRST: RunAttempt = RunAttempt(1);

    /// Wrap a raw attempt number.
    pub const fn new(attempt: i64) -> Self {
        Self(attempt)
    }

    /// The raw attempt number.
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Parse an attempt counter.
    ///
    /// Surrounding whitespace and a leading sign are accepted. Returns `None`
    /// for anything that is not an integer, including the empty string.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().map(Self)
    }
}

impl Default for RunAttempt {
    fn default() -> Self {
        Self::FIRST
    }
}

impl From<i64> for RunAttempt {
    fn from(attempt: i64) -> Self {
        Self(attempt)
    }
}

impl fmt::Display for RunAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What to do with an attempt counter that is set but not an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedAttempt {
    /// Treat the value as the first attempt.
    #[default]
    DefaultToFirst,
    /// Fail resolution with [`ProbeError::MalformedAttempt`].
    Reject,
}

/// Where the run attempt is read from and how bad values are handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptSource {
    var: String,
    on_malformed: MalformedAttempt,
}

impl AttemptSource {
    /// A source reading [`RUN_ATTEMPT_VAR`] that defaults bad values to the
    /// first attempt.
    pub fn new() -> Self {
        Self {
            var: RUN_ATTEMPT_VAR.to_string(),
            on_malformed: MalformedAttempt::DefaultToFirst,
        }
    }

    /// Read the counter from a different environment variable.
    pub fn var(mut self, var: impl Into<String>) -> Self {
        self.var = var.into();
        self
    }

    /// Set the policy for values that are not integers.
    pub fn on_malformed(mut self, policy: MalformedAttempt) -> Self {
        self.on_malformed = policy;
        self
    }

    /// Name of the environment variable this source reads.
    pub fn var_name(&self) -> &str {
        &self.var
    }

    /// Policy applied to values that are not integers.
    pub fn malformed_policy(&self) -> MalformedAttempt {
        self.on_malformed
    }

    /// Resolve the attempt through `lookup`, which maps a variable name to
    /// its value.
    pub fn resolve<F>(&self, lookup: F) -> Result<RunAttempt>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let Some(raw) = lookup(&self.var) else {
            return Ok(RunAttempt::FIRST);
        };

        match RunAttempt::parse(&raw) {
            Some(attempt) => Ok(attempt),
            None => match self.on_malformed {
                MalformedAttempt::DefaultToFirst => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        var = %self.var,
                        value = %raw,
                        "run attempt is not an integer, treating as first attempt"
                    );
                    Ok(RunAttempt::FIRST)
                }
                MalformedAttempt::Reject => Err(ProbeError::MalformedAttempt {
                    var: self.var.clone(),
                    value: raw,
                }),
            },
        }
    }

    /// Resolve the attempt from the process environment.
    ///
    /// A value that is not valid unicode counts as malformed.
    pub fn resolve_env(&self) -> Result<RunAttempt> {
        self.resolve(|var| {
            std::env::var_os(var).map(|value| value.to_string_lossy().into_owned())
        })
    }
}

impl Default for AttemptSource {
    fn default() -> Self {
        Self::new()
    }
}
