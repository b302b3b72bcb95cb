//! Workspace-level tests for spot-retry.
//!
//! This package has no API of its own. Its `tests/` exercise
//! `spot-retry-core` and `spot-retry-chaos` together against the real
//! process environment, and `tests/e2e_spot.rs` holds the checks the CI
//! retry workflow runs.
