//! Spot-termination probes for validating CI job retries.
//!
//! A probe fails the first attempt of a CI job with a simulated spot-instance
//! termination. It passes once the orchestrator re-runs the failed job, so a
//! green second attempt shows that re-running failed jobs works.
//!
//! The attempt number comes from `GITHUB_RUN_ATTEMPT`, which GitHub Actions
//! sets to `1` and increments on each re-run. Nothing in this crate retries
//! anything itself.
//!
//! # Features
//!
//! - **Pure decision**: [`SpotTermination::check`] takes the attempt as input
//! - **Environment boundary**: [`SpotTermination::check_env`] and
//!   [`check_run_attempt`] read the counter at the outermost layer
//! - **Event System**: monitor decisions via event listeners
//! - **Tower Layer**: gate any service with [`SpotTerminationLayer`]
//!
//! # Safety
//!
//! **WARNING**: probes fail on purpose. They belong in test targets and CI
//! jobs, never in production services.
//!
//! # Basic Example
//!
//! ```rust
//! use spot_retry_chaos::SpotTermination;
//! use spot_retry_core::RunAttempt;
//!
//! let probe = SpotTermination::builder().name("e2e").build();
//!
//! // First attempt: the spot instance is "reclaimed"
//! let err = probe.check(RunAttempt::FIRST).unwrap_err();
//! assert!(err.is_simulated_failure());
//!
//! // Re-run: passes
//! probe.check(RunAttempt::new(2)).unwrap();
//! ```
//!
//! # As a Test
//!
//! ```rust,ignore
//! use spot_retry_core::ProbeError;
//!
//! #[test]
//! fn e2e_flaky_spot_simulation() -> Result<(), ProbeError> {
//!     spot_retry_chaos::check_run_attempt()
//! }
//! ```
//!
//! # Event Monitoring
//!
//! ```rust
//! use spot_retry_chaos::SpotTermination;
//! use spot_retry_core::RunAttempt;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let terminations = Arc::new(AtomicUsize::new(0));
//! let t = terminations.clone();
//!
//! let probe = SpotTermination::builder()
//!     .on_termination_simulated(move |_attempt| {
//!         t.fetch_add(1, Ordering::SeqCst);
//!     })
//!     .build();
//!
//! let _ = probe.check(RunAttempt::FIRST);
//! assert_eq!(terminations.load(Ordering::SeqCst), 1);
//! ```

pub mod config;
pub mod events;
pub mod layer;
pub mod probe;
pub mod service;

pub use config::{SpotTerminationConfig, SpotTerminationConfigBuilder, DEFAULT_PASS_FROM};
pub use events::SpotTerminationEvent;
pub use layer::SpotTerminationLayer;
pub use probe::{check_run_attempt, SpotTermination};
pub use service::SpotTerminationService;
