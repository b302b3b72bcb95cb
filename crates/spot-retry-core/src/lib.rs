//! Core types for spot-retry.
//!
//! This crate holds the pieces shared by every spot-termination probe:
//! - Run-attempt resolution from the CI environment
//! - The probe error taxonomy
//! - Listener registry for probe decisions

pub mod attempt;
pub mod error;
pub mod events;

pub use attempt::{AttemptSource, MalformedAttempt, RunAttempt, RUN_ATTEMPT_VAR};
pub use error::{ProbeError, Result};
pub use events::Listeners;
