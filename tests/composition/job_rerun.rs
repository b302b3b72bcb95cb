//! A job seen across orchestrator re-runs.
//!
//! The orchestrator itself is external. Here each "run" is a fresh layer
//! built for the attempt number the orchestrator would export, which is all
//! a re-run changes from the job's point of view.

use spot_retry_chaos::SpotTermination;
use spot_retry_core::{ProbeError, RunAttempt};
use std::sync::{Arc, Mutex};
use tower::{Service, ServiceBuilder, ServiceExt};

async fn run_job(probe: &SpotTermination, attempt: i64) -> Result<&'static str, ProbeError> {
    let mut job = ServiceBuilder::new()
        .layer(probe.layer(RunAttempt::new(attempt)))
        .service_fn(|_: ()| async { Ok::<_, ProbeError>("uploaded") });

    job.ready().await?.call(()).await
}

#[tokio::test]
async fn job_fails_once_then_passes_on_rerun() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let l = Arc::clone(&log);

    let probe = SpotTermination::builder()
        .name("nightly-e2e")
        .on_event(move |event| {
            l.lock().unwrap().push(event.attempt());
        })
        .build();

    let first = run_job(&probe, 1).await;
    assert_eq!(
        first,
        Err(ProbeError::SimulatedTransientFailure { attempt: 1 })
    );

    let rerun = run_job(&probe, 2).await;
    assert_eq!(rerun, Ok("uploaded"));

    assert_eq!(*log.lock().unwrap(), vec![1, 2]);
}

#[tokio::test]
async fn slow_recovery_needs_more_reruns() {
    let probe = SpotTermination::builder().pass_from(3).build();

    assert!(run_job(&probe, 1).await.is_err());
    assert!(run_job(&probe, 2).await.is_err());
    assert_eq!(run_job(&probe, 3).await, Ok("uploaded"));
}
